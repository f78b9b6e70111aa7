//! Error types for peercache operations

mod builders;
mod classify;
mod display;
mod types;

pub use types::{Error, Result};
