//! Background [`Task`]s definitions.

mod background;
pub mod initialize_map;

pub use common::Handler as Task;

pub use self::{background::Background, initialize_map::InitializeMap};
