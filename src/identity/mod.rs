//! Identity and profile records.
//!
//! Users, roles and credentials are owned by an external identity layer;
//! this module models only what the core needs from it: the caller
//! context ([`domain::Actor`]) and the per-user profile aggregates. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
