use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::forms::FormError;
use crate::forms::product::ProductForm;
use crate::resources::{FieldKind, FormField, Resource, thumbnail};
use crate::table::view::{Column, escape_html};

fn image(product: &Product) -> String {
    thumbnail(
        product.image_url.as_ref().map(|url| url.as_str()),
        &product.name,
    )
}

fn inquire(product: &Product) -> String {
    format!(
        "<a class=\"btn btn-sm btn-success\" target=\"_blank\" rel=\"noopener\" \
         href=\"/products/{}/inquire\" title=\"Ask about {}\">Inquire</a>",
        product.id,
        escape_html(&product.name)
    )
}

impl Resource for Product {
    const TITLE: &'static str = "Products";
    const SINGULAR: &'static str = "product";
    const SEARCH_COLUMN: &'static str = "name";

    type Form = ProductForm;

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::render("", image),
            Column::field("Name", "name"),
            Column::field("Category", "category"),
            Column::field("Price", "price"),
            Column::field("Added", "created_at"),
        ]
    }

    fn public_columns() -> Vec<Column<Self>> {
        vec![
            Column::render("", image),
            Column::field("Name", "name"),
            Column::field("Category", "category"),
            Column::field("Description", "description"),
            Column::field("Price", "price"),
            Column::render("", inquire),
        ]
    }

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FieldKind::Text, true),
            FormField::new("category", "Category", FieldKind::Text, false),
            FormField::new("price", "Price", FieldKind::Number, true),
            FormField::new("description", "Description", FieldKind::Textarea, false),
            FormField::new("image_url", "Image URL", FieldKind::Url, false),
        ]
    }

    fn new_from_form(form: ProductForm) -> Result<NewProduct, FormError> {
        NewProduct::try_from(form)
    }

    fn update_from_form(form: ProductForm) -> Result<UpdateProduct, FormError> {
        NewProduct::try_from(form)
    }

    fn label(&self) -> String {
        self.name.to_string()
    }
}
