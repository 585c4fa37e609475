//! Tunnel-Forge Gateway library
//!
//! One configuration-driven request handler: proxy config requests to the
//! provisioning backend when it is reachable, synthesize a clearly-tagged
//! mock profile when it is not.

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
