// crates/types/src/lib.rs
//! Shared data model for the pick/ban relay.

pub mod action;
pub mod draft;
pub mod event;
pub mod snapshot;

pub use action::*;
pub use draft::*;
pub use event::*;
pub use snapshot::*;
