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

use super::{header_map, init_signing_test, ACCESS_KEY_ID, SECRET_ACCESS_KEY};
use anyhow::Result;
use aws_credential_types::Credentials;
use aws_sigv4::http_request::PercentEncodingMode;
use aws_sigv4::http_request::SignableBody;
use aws_sigv4::http_request::SignableRequest;
use aws_sigv4::http_request::SigningSettings;
use aws_sigv4::sign::v4;
use bytes::Bytes;
use chrono::TimeZone;
use chrono::Utc;
use http::Method;
use pretty_assertions::assert_eq;
use sigv4_aws_v4::{RequestSigner, SigningRequest};
use std::time::SystemTime;

/// (name, method, path, query, headers, body)
type TestCase = (
    &'static str,
    Method,
    &'static str,
    &'static str,
    &'static [(&'static str, &'static str)],
    &'static [u8],
);

fn test_cases() -> Vec<TestCase> {
    vec![
        (
            "get_request",
            Method::GET,
            "/hello",
            "foo=Zoo&foo=aha",
            &[("host", "127.0.0.1:9000")],
            b"",
        ),
        (
            "get_request_with_meta",
            Method::GET,
            "/hello",
            "list-type=2&prefix=abc",
            &[("host", "127.0.0.1:9000"), ("x-amz-meta-note", "hello")],
            b"",
        ),
        (
            "put_request",
            Method::PUT,
            "/hello",
            "part=1",
            &[
                ("host", "hello.s3.test.example.com"),
                ("content-type", "text/plain"),
            ],
            b"Hello,World!",
        ),
    ]
}

/// Requests without `Date` get an injected `x-amz-date` header, exactly like
/// the aws-sigv4 crate does, so both must produce the same signature.
#[test]
fn test_compare_with_aws_sigv4() -> Result<()> {
    init_signing_test();

    let now = Utc.with_ymd_and_hms(2022, 3, 13, 7, 20, 4).unwrap();

    for (name, method, path, query, headers, body) in test_cases() {
        let host = headers
            .iter()
            .find(|(k, _)| *k == "host")
            .map(|(_, v)| *v)
            .expect("host must be set");

        let mut ss = SigningSettings::default();
        ss.percent_encoding_mode = PercentEncodingMode::Single;
        let id = Credentials::new(
            ACCESS_KEY_ID,
            SECRET_ACCESS_KEY,
            None,
            None,
            "hardcoded-credentials",
        )
        .into();
        let sp = v4::SigningParams::builder()
            .identity(&id)
            .region("us-west-1")
            .name("s3")
            .time(SystemTime::from(now))
            .settings(ss)
            .build()
            .expect("signing params must be valid");

        let output = aws_sigv4::http_request::sign(
            SignableRequest::new(
                method.as_str(),
                format!("http://{host}{path}?{query}"),
                headers.iter().copied(),
                SignableBody::Bytes(body),
            )?,
            &sp.into(),
        )?;
        let (_, expected) = output.into_parts();

        let actual = RequestSigner::new().with_time(now).sign(&SigningRequest {
            access_key_id: Some(ACCESS_KEY_ID.to_string()),
            secret_access_key: Some(SECRET_ACCESS_KEY.to_string()),
            region: Some("us-west-1".to_string()),
            service: Some("s3".to_string()),
            headers: Some(header_map(headers)),
            query_string: Some(query.to_string()),
            body: Some(Bytes::from_static(body)),
            canonical_uri: Some(path.to_string()),
            method: Some(method.clone()),
        })?;

        assert_eq!(actual.signature, expected, "{name} signature mismatch");
        assert_eq!(actual.date, "20220313T072004Z", "{name} date mismatch");
    }

    Ok(())
}
