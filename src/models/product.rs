// src/models/product.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::listing::Identified;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Commercial,
    Demo,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[schema(example = "Galaxy S24")]
    pub name: String,

    #[serde(default)]
    pub serial_number: Option<String>,

    #[serde(default)]
    pub barcode: Option<String>,

    pub product_type: ProductType,

    #[serde(default)]
    pub price: Decimal,

    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub store: Option<String>,

    #[serde(default)]
    pub category: Option<String>,
}

impl Identified for Product {
    fn record_id(&self) -> &str {
        &self.id
    }
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    pub product_type: ProductType,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    #[serde(default)]
    pub quantity: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let payload = ProductPayload {
            name: "Cabo USB".into(),
            serial_number: None,
            barcode: None,
            product_type: ProductType::Commercial,
            price: Decimal::new(-100, 2),
            quantity: 3,
            store: None,
            category: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }
}
