//! Infrastructure layer.

pub mod catalog;
pub mod map;

pub use self::{catalog::Catalog, map::Provider as MapProvider};
