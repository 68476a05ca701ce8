//! COD Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the COD pipeline.
//!
//! # Overview
//!
//! This crate provides common functionality used across all COD workspace members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Fingerprints**: Content digest utilities for duplicate detection
//! - **Logging**: Tracing setup shared by every binary
//!
//! # Example
//!
//! ```no_run
//! use cod_common::{Result, CodError};
//! use cod_common::fingerprint::fingerprint_bytes;
//!
//! fn describe(data: &[u8]) -> Result<()> {
//!     let digest = fingerprint_bytes(data);
//!     println!("Content fingerprint: {}", digest);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fingerprint;
pub mod logging;

// Re-export commonly used types
pub use error::{CodError, Result};
