use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{ImageUrl, Price, ProductId, ProductName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for [`crate::domain::product::Product`].
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
/// Insertable form of [`Product`].
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub price: f64,
    pub image_url: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Product`] record.
pub struct UpdateProduct<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub price: f64,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::try_from(product.id)?,
            name: ProductName::new(product.name)?,
            description: product.description,
            category: product.category,
            price: Price::new(product.price)?,
            image_url: product.image_url.map(ImageUrl::new).transpose()?,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            name: product.name.as_str(),
            description: product.description.as_deref(),
            category: product.category.as_deref(),
            price: product.price.get(),
            image_url: product.image_url.as_ref().map(ImageUrl::as_str),
        }
    }
}

impl<'a> UpdateProduct<'a> {
    pub fn new(product: &'a DomainNewProduct, updated_at: NaiveDateTime) -> Self {
        let new = NewProduct::from(product);
        Self {
            name: new.name,
            description: new.description,
            category: new.category,
            price: new.price,
            image_url: new.image_url,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn db_product() -> Product {
        let now = Utc::now().naive_utc();
        Product {
            id: 3,
            name: "Snow globe".to_string(),
            description: None,
            category: Some("Gifts".to_string()),
            price: 9.99,
            image_url: Some("https://cdn.example.com/globe.png".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn product_into_domain() {
        let domain = DomainProduct::try_from(db_product()).unwrap();
        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.name.as_str(), "Snow globe");
        assert_eq!(domain.category.as_deref(), Some("Gifts"));
        assert_eq!(domain.price.get(), 9.99);
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let mut blank = db_product();
        blank.name = "  ".to_string();
        assert_eq!(
            DomainProduct::try_from(blank),
            Err(TypeConstraintError::EmptyString)
        );

        let mut negative = db_product();
        negative.price = -5.0;
        assert_eq!(
            DomainProduct::try_from(negative),
            Err(TypeConstraintError::InvalidPrice)
        );

        let mut bad_url = db_product();
        bad_url.image_url = Some("globe.png".to_string());
        assert_eq!(
            DomainProduct::try_from(bad_url),
            Err(TypeConstraintError::InvalidUrl)
        );
    }

    #[test]
    fn from_domain_new_creates_insertable() {
        let domain = DomainNewProduct {
            name: ProductName::new("Mug").unwrap(),
            description: Some("Ceramic".to_string()),
            category: None,
            price: Price::new(4.5).unwrap(),
            image_url: None,
        };
        let new: NewProduct = (&domain).into();
        assert_eq!(new.name, "Mug");
        assert_eq!(new.description, Some("Ceramic"));
        assert_eq!(new.price, 4.5);
        assert!(new.image_url.is_none());
    }
}
