use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::article::{Article as DomainArticle, NewArticle as DomainNewArticle};
use crate::domain::types::{ArticleBody, ArticleId, ArticleTitle, ImageUrl, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::articles)]
/// Diesel model for [`crate::domain::article::Article`].
pub struct Article {
    pub id: i32,
    pub title: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::articles)]
pub struct NewArticle<'a> {
    pub title: &'a str,
    pub excerpt: Option<&'a str>,
    pub body: &'a str,
    pub image_url: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::articles)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateArticle<'a> {
    pub title: &'a str,
    pub excerpt: Option<&'a str>,
    pub body: &'a str,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Article> for DomainArticle {
    type Error = TypeConstraintError;

    fn try_from(article: Article) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ArticleId::try_from(article.id)?,
            title: ArticleTitle::new(article.title)?,
            excerpt: article.excerpt,
            body: ArticleBody::new(article.body)?,
            image_url: article.image_url.map(ImageUrl::new).transpose()?,
            created_at: article.created_at,
            updated_at: article.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewArticle> for NewArticle<'a> {
    fn from(article: &'a DomainNewArticle) -> Self {
        Self {
            title: article.title.as_str(),
            excerpt: article.excerpt.as_deref(),
            body: article.body.as_str(),
            image_url: article.image_url.as_ref().map(ImageUrl::as_str),
        }
    }
}

impl<'a> UpdateArticle<'a> {
    pub fn new(article: &'a DomainNewArticle, updated_at: NaiveDateTime) -> Self {
        let new = NewArticle::from(article);
        Self {
            title: new.title,
            excerpt: new.excerpt,
            body: new.body,
            image_url: new.image_url,
            updated_at,
        }
    }
}
