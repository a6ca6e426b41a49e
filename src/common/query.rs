// src/common/query.rs

use std::collections::BTreeMap;

// Filtros da lista como a interface mandou (q, storeType, role, city, country, page...)
pub type QueryParams = BTreeMap<String, String>;

// Filtro vazio vira ausência: a API remota não deve ver `q=`.
pub fn strip_empty(params: &QueryParams) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_dropped() {
        let params = QueryParams::from([
            ("q".to_string(), String::new()),
            ("storeType".to_string(), "branch".to_string()),
        ]);
        assert_eq!(
            strip_empty(&params),
            vec![("storeType".to_string(), "branch".to_string())]
        );
    }
}
