use serde::Deserialize;
use validator::Validate;

use crate::domain::product::NewProduct;
use crate::domain::types::{Price, ProductName, non_blank};
use crate::forms::{FormError, optional_image};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing a product.
pub struct ProductForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(min = 1))]
    pub price: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<ProductForm> for NewProduct {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let price = form
            .price
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| FormError::InvalidPrice)
            .and_then(|value| Price::new(value).map_err(|_| FormError::InvalidPrice))?;

        Ok(NewProduct {
            name: ProductName::new(form.name).map_err(|_| FormError::InvalidName)?,
            description: non_blank(form.description),
            category: non_blank(form.category),
            price,
            image_url: optional_image(form.image_url)?,
        })
    }
}
