//! Core components of the `mojang-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`MojangClient`] and its builder.
//! - The primary [`MojangError`] type.
//! - The JSON transport every endpoint family goes through.

/// The main client (`MojangClient`), builder, and configuration.
pub mod client;
/// The primary error type (`MojangError`) for the crate.
pub mod error;
/// Service traits for abstracting where profiles are loaded from.
pub mod services;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::MojangClient`
pub use client::{MojangClient, MojangClientBuilder};
pub use error::{MojangError, ParseError};
pub use services::ProfileService;
