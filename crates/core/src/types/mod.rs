//! Core types for Boardshipper.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod board;
pub mod email;
pub mod id;
pub mod price;

pub use board::{BoardSize, ParseBoardSizeError};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
