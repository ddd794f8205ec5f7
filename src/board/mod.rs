//! Shared task-board subsystem.
//!
//! Implements the concurrent task-mutation core: the versioned update
//! protocol with explicit conflict surfacing, least-loaded
//! auto-assignment, audit recording with embedded task snapshots, and
//! the hooks feeding real-time fan-out. The module follows hexagonal
//! architecture:
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
