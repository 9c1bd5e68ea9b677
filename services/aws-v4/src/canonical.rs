// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Canonicalization steps of the SigV4 signing process.
//!
//! - [Create a canonical request](https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html)
//! - [Create a string to sign](https://docs.aws.amazon.com/general/latest/gr/sigv4-create-string-to-sign.html)
//! - [Calculate the signature](https://docs.aws.amazon.com/general/latest/gr/sigv4-calculate-signature.html)
//!
//! Every function here is pure. [`crate::RequestSigner`] drives them in order,
//! they are public so callers can reproduce or inspect each intermediate value.

use http::HeaderMap;
use http::HeaderValue;
use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;
use sigv4_core::hash::hex_sha256;
use sigv4_core::hash::hmac_sha256;
use sigv4_core::Error;
use sigv4_core::Result;

use crate::constants::ALGORITHM;
use crate::constants::AWS4_REQUEST;
use crate::constants::AWS_QUERY_ENCODE_SET;

/// Normalize a header value.
///
/// Runs of whitespace outside double-quoted substrings collapse to a single
/// space, quoted substrings are kept as is, and the result is trimmed.
///
/// ```
/// use sigv4_aws_v4::canonical::trimall;
///
/// assert_eq!(trimall("  a   b  \"c   d\"  "), "a b \"c   d\"");
/// ```
pub fn trimall(value: &str) -> String {
    let mut s = String::with_capacity(value.len());

    // Splitting on `"` alternates between unquoted and quoted segments,
    // starting with an unquoted one.
    for (idx, part) in value.split('"').enumerate() {
        if idx % 2 == 0 {
            let mut in_whitespace = false;
            for c in part.chars() {
                if !c.is_whitespace() {
                    s.push(c);
                    in_whitespace = false;
                } else if !in_whitespace {
                    s.push(' ');
                    in_whitespace = true;
                }
            }
        } else {
            s.push('"');
            s.push_str(part);
            s.push('"');
        }
    }

    s.trim().to_string()
}

/// Get header names as sorted vector.
///
/// `HeaderMap` stores names lowercased, so names differing only by case are
/// already the same entry here.
fn header_names_sorted(headers: &HeaderMap) -> Vec<&str> {
    let mut names = headers.keys().map(|k| k.as_str()).collect::<Vec<_>>();
    names.sort_unstable();
    names
}

/// Build the canonical headers block.
///
/// ```shell
/// {Host: "a", Date: "b"} => "date:b\nhost:a\n"
/// ```
///
/// If a name carries several values, the last one wins.
pub fn canonical_headers(headers: &HeaderMap) -> Result<String> {
    let mut s = String::with_capacity(256);

    for name in header_names_sorted(headers) {
        let value = match headers.get_all(name).iter().last() {
            Some(v) => header_value_str(v)?,
            None => "",
        };

        s.push_str(name);
        s.push(':');
        s.push_str(&trimall(value));
        s.push('\n');
    }

    Ok(s)
}

/// Build the signed headers list: sorted lowercase header names joined by `;`.
pub fn signed_headers(headers: &HeaderMap) -> String {
    header_names_sorted(headers).join(";")
}

/// Read a header value as text.
///
/// Values are opaque bytes in `http`, we accept any UTF-8 instead of only
/// visible ASCII.
pub(crate) fn header_value_str(value: &HeaderValue) -> Result<&str> {
    std::str::from_utf8(value.as_bytes()).map_err(|e| {
        Error::invalid_header_value("header value is not valid utf-8").with_source(e)
    })
}

/// Build the canonical query string.
///
/// Pairs are ordered by their original `k=v` text, then key and value are
/// percent decoded once and re-encoded with [`AWS_QUERY_ENCODE_SET`].
///
/// Every pair must contain exactly one `=`, and every `%` must be followed by
/// two hex digits.
///
/// ```
/// use sigv4_aws_v4::canonical::canonical_query_string;
///
/// assert_eq!(
///     canonical_query_string("foo=aha&foo=Zoo&bar=a%20b+c").unwrap(),
///     "bar=a%20b%2Bc&foo=Zoo&foo=aha"
/// );
/// ```
pub fn canonical_query_string(query: &str) -> Result<String> {
    if query.is_empty() {
        return Ok(String::new());
    }

    let mut pairs = query.split('&').collect::<Vec<_>>();
    // Sort via the raw pair text, before any decoding.
    pairs.sort_unstable();

    let mut s = String::with_capacity(query.len());
    for (idx, pair) in pairs.into_iter().enumerate() {
        let mut parts = pair.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::invalid_query_string(format!(
                "invalid query pair: {pair:?}"
            )));
        };

        if idx != 0 {
            s.push('&');
        }
        s.extend(utf8_percent_encode(
            &decode_query_component(key)?,
            &AWS_QUERY_ENCODE_SET,
        ));
        s.push('=');
        s.extend(utf8_percent_encode(
            &decode_query_component(value)?,
            &AWS_QUERY_ENCODE_SET,
        ));
    }

    Ok(s)
}

/// Percent decode a query key or value.
///
/// Every `%` must start a two hex digit escape.
fn decode_query_component(v: &str) -> Result<String> {
    let mut bytes = v.bytes();
    while let Some(b) = bytes.next() {
        if b != b'%' {
            continue;
        }
        let (Some(hi), Some(lo)) = (bytes.next(), bytes.next()) else {
            return Err(Error::invalid_query_string(format!(
                "query component {v:?} has a truncated percent escape"
            )));
        };
        if !hi.is_ascii_hexdigit() || !lo.is_ascii_hexdigit() {
            return Err(Error::invalid_query_string(format!(
                "query component {v:?} has an invalid percent escape"
            )));
        }
    }

    percent_decode_str(v)
        .decode_utf8()
        .map(|v| v.into_owned())
        .map_err(|e| {
            Error::invalid_query_string(format!("query component {v:?} is not valid utf-8"))
                .with_source(e)
        })
}

/// Assemble the canonical request.
///
/// ```shell
/// GET
/// /
/// foo=Zoo&foo=aha
/// date:Mon, 09 Sep 2011 23:36:00 GMT
/// host:host.foo.com
///
/// date;host
/// e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
/// ```
///
/// `canonical_headers` already ends with a newline, so the block is followed
/// by an empty line.
pub fn canonical_request(
    method: &str,
    canonical_uri: &str,
    canonical_query: &str,
    canonical_headers: &str,
    signed_headers: &str,
    payload_hash: &str,
) -> String {
    format!(
        "{method}\n{canonical_uri}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{payload_hash}"
    )
}

/// Scope: `"20220313/<region>/<service>/aws4_request"`
///
/// Region and service are lowercased.
pub fn credential_scope(date: &str, region: &str, service: &str) -> String {
    format!(
        "{date}/{}/{}/{AWS4_REQUEST}",
        region.to_lowercase(),
        service.to_lowercase()
    )
}

/// StringToSign:
///
/// ```shell
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/<service>/aws4_request
/// <hashed_canonical_request>
/// ```
pub fn string_to_sign(timestamp: &str, scope: &str, canonical_request: &str) -> String {
    format!(
        "{ALGORITHM}\n{timestamp}\n{scope}\n{}",
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Derive the signing key.
///
/// `region` and `service` are used as given, without lowercasing.
pub fn generate_signing_key(secret: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes())
}
