//! Domain definitions.

pub mod contact;
pub mod listing;

pub use self::listing::Listing;
