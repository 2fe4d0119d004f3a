use crate::domain::outlet::{NewOutlet, Outlet, UpdateOutlet};
use crate::forms::FormError;
use crate::forms::outlet::OutletForm;
use crate::resources::{FieldKind, FormField, Resource, thumbnail};
use crate::table::view::Column;

fn image(outlet: &Outlet) -> String {
    thumbnail(
        outlet.image_url.as_ref().map(|url| url.as_str()),
        &outlet.name,
    )
}

impl Resource for Outlet {
    const TITLE: &'static str = "Outlets";
    const SINGULAR: &'static str = "outlet";
    const SEARCH_COLUMN: &'static str = "name";

    type Form = OutletForm;

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::render("", image),
            Column::field("Name", "name"),
            Column::field("Address", "address"),
            Column::field("Phone", "phone"),
            Column::field("Opening hours", "opening_hours"),
        ]
    }

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FieldKind::Text, true),
            FormField::new("address", "Address", FieldKind::Text, true),
            FormField::new("phone", "Phone", FieldKind::Tel, false),
            FormField::new("opening_hours", "Opening hours", FieldKind::Text, false),
            FormField::new("image_url", "Image URL", FieldKind::Url, false),
        ]
    }

    fn new_from_form(form: OutletForm) -> Result<NewOutlet, FormError> {
        NewOutlet::try_from(form)
    }

    fn update_from_form(form: OutletForm) -> Result<UpdateOutlet, FormError> {
        NewOutlet::try_from(form)
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.address)
    }
}
