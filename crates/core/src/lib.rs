//! Boardshipper Core - Shared types library.
//!
//! This crate provides common types used across all Boardshipper components:
//! - `service` - Booking, pricing, and label acquisition services
//! - `cli` - Command-line tools for quoting and operations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices, and
//!   board sizes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
