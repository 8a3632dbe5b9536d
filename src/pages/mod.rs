//! Routed pages.

pub mod graph;
pub mod home;
pub mod not_found;
