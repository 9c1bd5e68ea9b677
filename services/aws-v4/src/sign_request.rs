use std::fmt::Debug;
use std::fmt::Formatter;

use bytes::Bytes;
use http::header;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use log::debug;
use serde::Serialize;
use sigv4_core::hash::hex_hmac_sha256;
use sigv4_core::hash::hex_sha256;
use sigv4_core::time::format_date;
use sigv4_core::time::format_iso8601;
use sigv4_core::time::now;
use sigv4_core::time::parse_http_date;
use sigv4_core::time::DateTime;
use sigv4_core::utils::Redact;
use sigv4_core::Error;
use sigv4_core::Result;

use crate::canonical::canonical_headers;
use crate::canonical::canonical_query_string;
use crate::canonical::canonical_request;
use crate::canonical::credential_scope;
use crate::canonical::generate_signing_key;
use crate::canonical::header_value_str;
use crate::canonical::signed_headers;
use crate::canonical::string_to_sign;
use crate::constants::ALGORITHM;
use crate::constants::DEFAULT_CANONICAL_URI;
use crate::constants::X_AMZ_DATE;
use crate::Config;

/// Request descriptor to be signed.
///
/// `access_key_id`, `secret_access_key`, `region`, `service`, `headers` and
/// `query_string` are required, the rest fall back to defaults.
#[derive(Clone, Default)]
pub struct SigningRequest {
    /// Access key id used in the credential.
    pub access_key_id: Option<String>,
    /// Secret access key the signing key is derived from.
    pub secret_access_key: Option<String>,
    /// Region like `us-west-1`.
    pub region: Option<String>,
    /// Service like `s3`.
    pub service: Option<String>,
    /// Request headers. Names are case-insensitive.
    pub headers: Option<HeaderMap>,
    /// Percent-encoded query string in `k=v&k=v` form, without the leading `?`.
    pub query_string: Option<String>,
    /// Request body, hashed as empty if absent.
    pub body: Option<Bytes>,
    /// Request path, default to `/`.
    pub canonical_uri: Option<String>,
    /// Request method, default to `GET`.
    pub method: Option<Method>,
}

impl SigningRequest {
    /// Fill credentials and region from config where the request leaves them unset.
    pub fn with_config(mut self, cfg: &Config) -> Self {
        if self.access_key_id.is_none() {
            self.access_key_id.clone_from(&cfg.access_key_id);
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key.clone_from(&cfg.secret_access_key);
        }
        if self.region.is_none() {
            self.region.clone_from(&cfg.region);
        }
        self
    }
}

impl Debug for SigningRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningRequest")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("region", &self.region)
            .field("service", &self.service)
            .field("headers", &self.headers)
            .field("query_string", &self.query_string)
            .field("body", &self.body.as_ref().map(|b| b.len()))
            .field("canonical_uri", &self.canonical_uri)
            .field("method", &self.method)
            .finish()
    }
}

/// Result of signing a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// Always `AWS4-HMAC-SHA256`.
    pub algorithm: String,
    /// Value for the `Authorization` header.
    pub authorization: String,
    /// `<access_key_id>/<date>/<region>/<service>/aws4_request`
    pub credential: String,
    /// Signing time in ISO8601 basic format: `20110909T233600Z`
    pub date: String,
    /// Hex encoded signature.
    pub signature: String,
    /// Signed header names joined by `;`.
    pub signed_headers: String,
}

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer holds no state besides an optional fixed signing time, so one
/// instance can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer that reads the wall clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// It's only used when the request has no `Date` header. Without it, the
    /// current time is taken.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign the request.
    ///
    /// Required fields are checked before anything is computed. If the
    /// headers carry no `Date`, an `x-amz-date` header is added to the signed
    /// set; the caller must send it along with the request.
    pub fn sign(&self, req: &SigningRequest) -> Result<Signature> {
        let access_key_id = required(&req.access_key_id, "awsAccessKeyId")?;
        let headers = req
            .headers
            .as_ref()
            .ok_or_else(|| Error::missing_parameter("headers"))?;
        let query_string = required(&req.query_string, "queryString")?;
        let region = required(&req.region, "region")?;
        let secret_access_key = required(&req.secret_access_key, "secretAccessKey")?;
        let service = required(&req.service, "service")?;

        let method = req.method.as_ref().unwrap_or(&Method::GET);
        let canonical_uri = req
            .canonical_uri
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CANONICAL_URI);
        let body = req.body.as_deref().unwrap_or_default();

        // Work on a copy, the caller's headers stay untouched.
        let mut headers = headers.clone();
        let signing_time = match date_header(&headers)? {
            Some(date) => parse_http_date(date)?,
            None => {
                let now = self.time.unwrap_or_else(now);
                headers.insert(X_AMZ_DATE, HeaderValue::try_from(format_iso8601(now))?);
                now
            }
        };
        let timestamp = format_iso8601(signing_time);
        let date = format_date(signing_time);

        // canonicalize context
        let canonical_headers = canonical_headers(&headers)?;
        let signed_headers = signed_headers(&headers);

        let scope = credential_scope(&date, region, service);
        debug!("calculated scope: {scope}");
        let credential = format!("{access_key_id}/{scope}");

        let canonical_query = canonical_query_string(query_string)?;
        let payload_hash = hex_sha256(body);

        // build canonical request and string to sign.
        let creq = canonical_request(
            method.as_str(),
            canonical_uri,
            &canonical_query,
            &canonical_headers,
            &signed_headers,
            &payload_hash,
        );
        debug!("calculated canonical request: {creq}");

        let string_to_sign = string_to_sign(&timestamp, &scope, &creq);
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(secret_access_key, &date, region, service);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let authorization = format!(
            "{ALGORITHM} Credential={credential},SignedHeaders={signed_headers},Signature={signature}"
        );

        Ok(Signature {
            algorithm: ALGORITHM.to_string(),
            authorization,
            credential,
            date: timestamp,
            signature,
            signed_headers,
        })
    }
}

/// Required string fields must be present and non-empty.
fn required<'a>(v: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    match v.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::missing_parameter(name)),
    }
}

/// Value of the `Date` header, `None` if absent or empty.
fn date_header(headers: &HeaderMap) -> Result<Option<&str>> {
    let Some(value) = headers.get_all(header::DATE).iter().last() else {
        return Ok(None);
    };

    let value = header_value_str(value)?;
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(value))
}
