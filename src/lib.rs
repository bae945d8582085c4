//! Lithuanian internet radio: a station catalog and a playback controller
//! that re-raises the player's lifecycle as events.

pub use catalog::Catalog;
pub use controller::Controller;
pub use error::{Error, Result};
pub use events::{Event, EventKind, Handler};
pub use models::{Options, Station};

pub mod catalog;
pub mod controller;
pub mod error;
pub mod events;
pub mod models;
pub mod player;
