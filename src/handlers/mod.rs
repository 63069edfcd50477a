//! HTTP handlers for the inventory pages.

pub mod entity;
pub use entity::*;
