use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::outlet::{NewOutlet as DomainNewOutlet, Outlet as DomainOutlet};
use crate::domain::types::{
    ImageUrl, OutletAddress, OutletId, OutletName, PhoneNumber, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::outlets)]
/// Diesel model for [`crate::domain::outlet::Outlet`].
pub struct Outlet {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::outlets)]
pub struct NewOutlet<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub phone: Option<&'a str>,
    pub opening_hours: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::outlets)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateOutlet<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub phone: Option<&'a str>,
    pub opening_hours: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Outlet> for DomainOutlet {
    type Error = TypeConstraintError;

    fn try_from(outlet: Outlet) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OutletId::try_from(outlet.id)?,
            name: OutletName::new(outlet.name)?,
            address: OutletAddress::new(outlet.address)?,
            phone: outlet.phone.map(PhoneNumber::new).transpose()?,
            opening_hours: outlet.opening_hours,
            image_url: outlet.image_url.map(ImageUrl::new).transpose()?,
            created_at: outlet.created_at,
            updated_at: outlet.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewOutlet> for NewOutlet<'a> {
    fn from(outlet: &'a DomainNewOutlet) -> Self {
        Self {
            name: outlet.name.as_str(),
            address: outlet.address.as_str(),
            phone: outlet.phone.as_ref().map(PhoneNumber::as_str),
            opening_hours: outlet.opening_hours.as_deref(),
            image_url: outlet.image_url.as_ref().map(ImageUrl::as_str),
        }
    }
}

impl<'a> UpdateOutlet<'a> {
    pub fn new(outlet: &'a DomainNewOutlet, updated_at: NaiveDateTime) -> Self {
        let new = NewOutlet::from(outlet);
        Self {
            name: new.name,
            address: new.address,
            phone: new.phone,
            opening_hours: new.opening_hours,
            image_url: new.image_url,
            updated_at,
        }
    }
}
