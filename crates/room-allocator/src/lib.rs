//! Room allocation for pilgrim groups under family and gender segregation rules.
//!
//! The [`allocation`] module holds the allocator itself; the rest is the
//! plumbing the command line and HTTP front ends share.

pub mod allocation;
pub mod config;
pub mod error;
pub mod manifest;
pub mod telemetry;

pub use allocation::{allocate, AllocationResult, PassengerGroup, RoomInventory};
