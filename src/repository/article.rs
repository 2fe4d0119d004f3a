//! Repository implementation for news articles.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::article::{Article, NewArticle, UpdateArticle};
use crate::domain::types::ArticleId;
use crate::models::article::{
    NewArticle as DbNewArticle, Article as DbArticle, UpdateArticle as DbUpdateArticle,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TableQuery, TableReader, TableWriter};
use crate::schema::articles;

fn filtered(query: &TableQuery) -> RepositoryResult<articles::BoxedQuery<'static, Sqlite>> {
    let mut items = articles::table.into_boxed::<Sqlite>();

    if let Some(search) = &query.search {
        let pattern = search.like_pattern();
        items = match search.column.as_str() {
            "title" => items.filter(articles::title.like(pattern).escape('\\')),
            "excerpt" => items.filter(articles::excerpt.like(pattern).escape('\\')),
            other => {
                return Err(RepositoryError::ValidationError(format!(
                    "column `{other}` is not searchable on articles"
                )));
            }
        };
    }

    Ok(items)
}

impl TableReader<Article> for DieselRepository {
    fn select_rows(&self, query: &TableQuery) -> RepositoryResult<(usize, Vec<Article>)> {
        let mut conn = self.conn()?;

        let total = filtered(query)?.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered(query)?
            .order(articles::created_at.desc())
            .then_order_by(articles::id.desc());

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = pagination.sql_bounds();
            items = items.offset(offset).limit(limit);
        }

        let articles = items
            .load::<DbArticle>(&mut conn)?
            .into_iter()
            .map(|db_article| Article::try_from(db_article).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, articles))
    }

    fn get_row(&self, id: ArticleId) -> RepositoryResult<Option<Article>> {
        let mut conn = self.conn()?;

        let db_article = articles::table
            .find(id.get())
            .first::<DbArticle>(&mut conn)
            .optional()?;

        match db_article {
            Some(db_article) => Ok(Some(
                Article::try_from(db_article).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl TableWriter<Article> for DieselRepository {
    fn insert_row(&self, new_row: &NewArticle) -> RepositoryResult<Article> {
        let mut conn = self.conn()?;

        let insertable = DbNewArticle::from(new_row);
        let db_article = diesel::insert_into(articles::table)
            .values(&insertable)
            .get_result::<DbArticle>(&mut conn)?;

        Ok(Article::try_from(db_article)?)
    }

    fn update_row(&self, id: ArticleId, updates: &UpdateArticle) -> RepositoryResult<Article> {
        let mut conn = self.conn()?;

        let changes = DbUpdateArticle::new(updates, Utc::now().naive_utc());
        let db_article = diesel::update(articles::table.find(id.get()))
            .set(&changes)
            .get_result::<DbArticle>(&mut conn)?;

        Ok(Article::try_from(db_article)?)
    }

    fn delete_row(&self, id: ArticleId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(articles::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
