use serde::Deserialize;
use validator::Validate;

use crate::domain::outlet::NewOutlet;
use crate::domain::types::{OutletAddress, OutletName, PhoneNumber, non_blank};
use crate::forms::{FormError, optional_image};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing an outlet.
pub struct OutletForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<OutletForm> for NewOutlet {
    type Error = FormError;

    fn try_from(form: OutletForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let phone = non_blank(form.phone)
            .map(|phone| PhoneNumber::new(phone).map_err(|_| FormError::InvalidPhoneNumber))
            .transpose()?;

        Ok(NewOutlet {
            name: OutletName::new(form.name).map_err(|_| FormError::InvalidName)?,
            address: OutletAddress::new(form.address).map_err(|_| FormError::InvalidAddress)?,
            phone,
            opening_hours: non_blank(form.opening_hours),
            image_url: optional_image(form.image_url)?,
        })
    }
}
