//! Core errors and constants for `peercache`.
//!
//! Every crate in the workspace reports failures through the single
//! [`Error`] enum defined here, so that a failure raised by a miss-loader on
//! one task can be handed unchanged to every caller coalesced on the same
//! key.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum, its `Result` alias, builder
//!   constructors and classification helpers.
//! - **`constants`**: defaults and environment variable names shared by the
//!   library and the node binary.

pub mod constants;
pub mod errors;

pub use self::{
    constants::*,
    errors::{Error, Result},
};
