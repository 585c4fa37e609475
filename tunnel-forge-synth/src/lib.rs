//! Tunnel-Forge Config Synthesizer
//!
//! Generates structurally valid connection profiles for seven tunnel
//! protocol families. The output *looks* like real key material and working
//! endpoints but carries no cryptographic property whatsoever: it exists so
//! the gateway can keep answering when the provisioning backend is down,
//! and every document it produces is tagged as mock data.
//!
//! The synthesizer is a pure function over `(protocol, endpoint, user)`:
//! no I/O, no state, no failure path. Randomness comes from the operating
//! system by default and can be injected for deterministic tests.

mod synth;
mod token;

pub use synth::{synthesize, synthesize_with_rng};
pub use token::{alphabet_token, pseudo_key, uuid_v4, PSEUDO_KEY_LEN};
