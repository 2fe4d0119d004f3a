use serde::Deserialize;
use validator::Validate;

use crate::domain::article::NewArticle;
use crate::domain::types::{ArticleBody, ArticleTitle, non_blank};
use crate::forms::{FormError, optional_image};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing an article.
pub struct ArticleForm {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1))]
    pub body: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<ArticleForm> for NewArticle {
    type Error = FormError;

    fn try_from(form: ArticleForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewArticle {
            title: ArticleTitle::new(form.title).map_err(|_| FormError::InvalidName)?,
            excerpt: non_blank(form.excerpt),
            body: ArticleBody::new(form.body).map_err(|_| FormError::InvalidBody)?,
            image_url: optional_image(form.image_url)?,
        })
    }
}
