//! Read entities definitions.

pub mod listing;
pub mod map;
