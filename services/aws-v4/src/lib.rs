//! AWS SigV4 signer for request descriptors.
//!
//! Given credentials, region, service, headers, query string and an optional
//! body, [`RequestSigner`] computes the signature and the ready-to-use
//! `Authorization` header value.
//!
//! ## Example
//!
//! ```
//! use http::header;
//! use http::HeaderMap;
//! use http::HeaderValue;
//! use sigv4_aws_v4::{RequestSigner, SigningRequest};
//!
//! # fn main() -> sigv4_core::Result<()> {
//! let mut headers = HeaderMap::new();
//! headers.insert(header::DATE, HeaderValue::from_static("Mon, 09 Sep 2011 23:36:00 GMT"));
//! headers.insert(header::HOST, HeaderValue::from_static("host.foo.com"));
//!
//! let req = SigningRequest {
//!     access_key_id: Some("KEYNAME".to_string()),
//!     secret_access_key: Some("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string()),
//!     region: Some("us-west-1".to_string()),
//!     service: Some("s3".to_string()),
//!     headers: Some(headers),
//!     query_string: Some("foo=Zoo&foo=aha".to_string()),
//!     ..Default::default()
//! };
//!
//! let sig = RequestSigner::new().sign(&req)?;
//! assert_eq!(sig.signed_headers, "date;host");
//! assert!(sig.authorization.starts_with("AWS4-HMAC-SHA256 Credential=KEYNAME/20110909/"));
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

pub mod canonical;

mod config;
pub use config::Config;

mod sign_request;
pub use sign_request::RequestSigner;
pub use sign_request::Signature;
pub use sign_request::SigningRequest;

pub use sigv4_core::hash::EMPTY_STRING_SHA256;
