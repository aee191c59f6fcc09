//! # bb-views
//!
//! The routing and view-model layer of the explorer: turns paths into
//! routes, routes into REST calls, and responses into the decorated state a
//! template binds to.

pub mod decorate;
pub mod navigator;
pub mod router;
pub mod selection;
pub mod status;
pub mod views;

#[cfg(test)]
mod testing;

pub use navigator::{NavToken, Navigator, Screen, ViewState};
pub use router::Route;
pub use selection::BoardSelection;
pub use status::{StatusCache, StatusPoller};
