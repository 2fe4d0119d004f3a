//! Domain aggregates exposed by the showcase service layer.

pub mod article;
pub mod event;
pub mod messaging;
pub mod outlet;
pub mod password;
pub mod product;
pub mod row;
pub mod staff;
pub mod types;
pub mod video;
