//! Tunnel-Forge Data Model
//!
//! This crate defines the shared data model for the tunnel-forge gateway:
//! protocol identifiers, server endpoints, and the JSON bodies exchanged
//! with clients.

mod error;
mod model;
mod wire;

pub use error::*;
pub use model::*;
pub use wire::*;
