//! Diesel models and their conversions into domain entities.

pub mod article;
#[cfg(feature = "server")]
pub mod config;
pub mod event;
pub mod outlet;
pub mod product;
pub mod staff;
pub mod video;
