use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::row::Row;
use crate::domain::types::{ArticleBody, ArticleId, ArticleTitle, ImageUrl};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub excerpt: Option<String>,
    /// Sanitized HTML.
    pub body: ArticleBody,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub excerpt: Option<String>,
    pub body: ArticleBody,
    pub image_url: Option<ImageUrl>,
}

pub type UpdateArticle = NewArticle;

impl Row for Article {
    const TABLE: &'static str = "articles";

    type Id = ArticleId;
    type New = NewArticle;
    type Update = UpdateArticle;

    fn id(&self) -> ArticleId {
        self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        let value = match key {
            "id" => self.id.to_string(),
            "title" => self.title.to_string(),
            "excerpt" => self.excerpt.clone().unwrap_or_default(),
            "body" => self.body.to_string(),
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
