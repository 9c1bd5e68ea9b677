//! Core components for AWS Signature Version 4 signing.
//!
//! This crate provides the building blocks shared by the signer and its
//! adapters. It holds no signing policy of its own.
//!
//! ## Overview
//!
//! - [`hash`]: SHA256 digests and HMAC-SHA256 with raw or hex output
//! - [`time`]: timestamp formatting and `Date` header parsing
//! - [`utils`]: general utilities including data redaction
//! - [`Env`]: abstraction over the process environment, used by config loading
//! - [`Error`]: the error type every crate in the workspace reports
//!
//! ## Example
//!
//! ```
//! use sigv4_core::hash::hex_sha256;
//! use sigv4_core::time::{format_iso8601, parse_http_date};
//!
//! let t = parse_http_date("Mon, 09 Sep 2011 23:36:00 GMT").unwrap();
//! assert_eq!(format_iso8601(t), "20110909T233600Z");
//! assert_eq!(
//!     hex_sha256(b""),
//!     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
//! );
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;
