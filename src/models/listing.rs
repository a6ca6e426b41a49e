// src/models/listing.rs

use serde::{Deserialize, Serialize};

// Todo registro da API remota é identificado pelo campo `_id`.
pub trait Identified {
    fn record_id(&self) -> &str;
}

// A API responde listas de dois jeitos: paginada ({ data, total }) ou um array puro.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Paged {
        data: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    /// Devolve (itens, total). Sem `total` na resposta, usa o tamanho da página.
    pub fn into_parts(self) -> (Vec<T>, u64) {
        match self {
            ListEnvelope::Paged { data, total } => {
                let total = total.unwrap_or(data.len() as u64);
                (data, total)
            }
            ListEnvelope::Bare(data) => {
                let total = data.len() as u64;
                (data, total)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> RecordEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            RecordEnvelope::Wrapped { data } => data,
            RecordEnvelope::Bare(record) => record,
        }
    }
}

// Linha de tabela: o registro original (com `_id`) mais o alias `id` usado como chave da grade.
#[derive(Debug, Clone, Serialize)]
pub struct Row<T: Serialize> {
    pub id: String,
    #[serde(flatten)]
    pub record: T,
}

impl<T: Serialize + Identified> Row<T> {
    pub fn new(record: T) -> Self {
        Self {
            id: record.record_id().to_string(),
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Thing {
        #[serde(rename = "_id")]
        id: String,
    }

    impl Identified for Thing {
        fn record_id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn paged_and_bare_lists_both_decode() {
        let paged: ListEnvelope<Thing> =
            serde_json::from_value(json!({ "data": [{ "_id": "a" }], "total": 7 })).unwrap();
        let (items, total) = paged.into_parts();
        assert_eq!(items.len(), 1);
        assert_eq!(total, 7);

        let bare: ListEnvelope<Thing> =
            serde_json::from_value(json!([{ "_id": "a" }, { "_id": "b" }])).unwrap();
        assert_eq!(bare.into_parts().1, 2);
    }

    #[test]
    fn row_carries_both_id_and_underscore_id() {
        let row = Row::new(Thing { id: "s1".into() });
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value, json!({ "id": "s1", "_id": "s1" }));
    }
}
