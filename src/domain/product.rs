use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::row::Row;
use crate::domain::types::{ImageUrl, Price, ProductId, ProductName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Price,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Price,
    pub image_url: Option<ImageUrl>,
}

/// Updates replace every editable field.
pub type UpdateProduct = NewProduct;

impl Row for Product {
    const TABLE: &'static str = "products";

    type Id = ProductId;
    type New = NewProduct;
    type Update = UpdateProduct;

    fn id(&self) -> ProductId {
        self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        let value = match key {
            "id" => self.id.to_string(),
            "name" => self.name.to_string(),
            "description" => self.description.clone().unwrap_or_default(),
            "category" => self.category.clone().unwrap_or_default(),
            "price" => self.price.to_string(),
            "image_url" => self
                .image_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            "created_at" => self.created_at.format("%Y-%m-%d %H:%M").to_string(),
            _ => return None,
        };
        Some(value)
    }
}
