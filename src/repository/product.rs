//! Repository implementation for catalog products.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::ProductId;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TableQuery, TableReader, TableWriter};
use crate::schema::products;

fn filtered(query: &TableQuery) -> RepositoryResult<products::BoxedQuery<'static, Sqlite>> {
    let mut items = products::table.into_boxed::<Sqlite>();

    if let Some(search) = &query.search {
        let pattern = search.like_pattern();
        items = match search.column.as_str() {
            "name" => items.filter(products::name.like(pattern).escape('\\')),
            "category" => items.filter(products::category.like(pattern).escape('\\')),
            "description" => items.filter(products::description.like(pattern).escape('\\')),
            other => {
                return Err(RepositoryError::ValidationError(format!(
                    "column `{other}` is not searchable on products"
                )));
            }
        };
    }

    Ok(items)
}

impl TableReader<Product> for DieselRepository {
    fn select_rows(&self, query: &TableQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        let mut conn = self.conn()?;

        let total = filtered(query)?.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered(query)?
            .order(products::created_at.desc())
            .then_order_by(products::id.desc());

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = pagination.sql_bounds();
            items = items.offset(offset).limit(limit);
        }

        let products = items
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(|db_product| Product::try_from(db_product).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, products))
    }

    fn get_row(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let mut conn = self.conn()?;

        let db_product = products::table
            .find(id.get())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match db_product {
            Some(db_product) => Ok(Some(
                Product::try_from(db_product).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl TableWriter<Product> for DieselRepository {
    fn insert_row(&self, new_row: &NewProduct) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;

        let insertable = DbNewProduct::from(new_row);
        let db_product = diesel::insert_into(products::table)
            .values(&insertable)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(Product::try_from(db_product)?)
    }

    fn update_row(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;

        let changes = DbUpdateProduct::new(updates, Utc::now().naive_utc());
        let db_product = diesel::update(products::table.find(id.get()))
            .set(&changes)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(Product::try_from(db_product)?)
    }

    fn delete_row(&self, id: ProductId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(products::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
