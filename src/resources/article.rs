use crate::domain::article::{Article, NewArticle, UpdateArticle};
use crate::forms::FormError;
use crate::forms::article::ArticleForm;
use crate::resources::{FieldKind, FormField, Resource, thumbnail};
use crate::table::view::Column;

fn image(article: &Article) -> String {
    thumbnail(
        article.image_url.as_ref().map(|url| url.as_str()),
        &article.title,
    )
}

impl Resource for Article {
    const TITLE: &'static str = "Articles";
    const SINGULAR: &'static str = "article";
    const SEARCH_COLUMN: &'static str = "title";

    type Form = ArticleForm;

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::render("", image),
            Column::field("Title", "title"),
            Column::field("Excerpt", "excerpt"),
            Column::field("Published", "created_at"),
        ]
    }

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("title", "Title", FieldKind::Text, true),
            FormField::new("excerpt", "Excerpt", FieldKind::Text, false),
            FormField::new("body", "Body", FieldKind::Textarea, true),
            FormField::new("image_url", "Image URL", FieldKind::Url, false),
        ]
    }

    fn new_from_form(form: ArticleForm) -> Result<NewArticle, FormError> {
        NewArticle::try_from(form)
    }

    fn update_from_form(form: ArticleForm) -> Result<UpdateArticle, FormError> {
        NewArticle::try_from(form)
    }

    fn label(&self) -> String {
        self.title.to_string()
    }
}
