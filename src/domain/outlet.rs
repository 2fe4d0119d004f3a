use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::row::Row;
use crate::domain::types::{ImageUrl, OutletAddress, OutletId, OutletName, PhoneNumber};

/// A physical shop or kiosk where products can be bought.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Outlet {
    pub id: OutletId,
    pub name: OutletName,
    pub address: OutletAddress,
    pub phone: Option<PhoneNumber>,
    pub opening_hours: Option<String>,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewOutlet {
    pub name: OutletName,
    pub address: OutletAddress,
    pub phone: Option<PhoneNumber>,
    pub opening_hours: Option<String>,
    pub image_url: Option<ImageUrl>,
}

pub type UpdateOutlet = NewOutlet;

impl Row for Outlet {
    const TABLE: &'static str = "outlets";

    type Id = OutletId;
    type New = NewOutlet;
    type Update = UpdateOutlet;

    fn id(&self) -> OutletId {
        self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        let value = match key {
            "id" => self.id.to_string(),
            "name" => self.name.to_string(),
            "address" => self.address.to_string(),
            "phone" => self
                .phone
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            "opening_hours" => self.opening_hours.clone().unwrap_or_default(),
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
