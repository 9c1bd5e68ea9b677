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

use super::{golden_request, header_map, init_signing_test};
use anyhow::Result;
use bytes::Bytes;
use pretty_assertions::assert_eq;
use sigv4_aws_v4::canonical::{canonical_headers, canonical_query_string, signed_headers};
use sigv4_aws_v4::{RequestSigner, SigningRequest};
use sigv4_core::ErrorKind;

const HEADERS: &[(&str, &str)] = &[
    ("Date", "Mon, 09 Sep 2011 23:36:00 GMT"),
    ("Host", "host.foo.com"),
    ("Content-Type", "text/plain"),
    ("X-Amz-Meta-Tag", "  a   \"b   c\"  "),
];

#[test]
fn test_header_order_independence() -> Result<()> {
    init_signing_test();

    let forward = header_map(HEADERS);
    let backward = header_map(&HEADERS.iter().rev().copied().collect::<Vec<_>>());

    assert_eq!(canonical_headers(&forward)?, canonical_headers(&backward)?);
    assert_eq!(signed_headers(&forward), signed_headers(&backward));

    let signer = RequestSigner::new();
    let l = signer.sign(&SigningRequest {
        headers: Some(forward),
        ..golden_request()
    })?;
    let r = signer.sign(&SigningRequest {
        headers: Some(backward),
        ..golden_request()
    })?;
    assert_eq!(l, r);
    assert_eq!(l.signed_headers, "content-type;date;host;x-amz-meta-tag");
    Ok(())
}

#[test]
fn test_query_order_independence() -> Result<()> {
    init_signing_test();

    let queries = [
        "foo=Zoo&foo=aha&bar=1&baz=%20x",
        "baz=%20x&foo=aha&bar=1&foo=Zoo",
        "bar=1&foo=aha&baz=%20x&foo=Zoo",
    ];

    let expected = canonical_query_string(queries[0])?;
    assert_eq!(expected, "bar=1&baz=%20x&foo=Zoo&foo=aha");

    let signer = RequestSigner::new();
    let expected_sig = signer.sign(&SigningRequest {
        query_string: Some(queries[0].to_string()),
        ..golden_request()
    })?;
    for q in &queries[1..] {
        assert_eq!(canonical_query_string(q)?, expected);

        let sig = signer.sign(&SigningRequest {
            query_string: Some(q.to_string()),
            ..golden_request()
        })?;
        assert_eq!(sig, expected_sig, "query {q:?} must sign the same");
    }
    Ok(())
}

#[test]
fn test_empty_body_equals_absent_body() -> Result<()> {
    init_signing_test();

    let signer = RequestSigner::new();
    let absent = signer.sign(&golden_request())?;
    let empty = signer.sign(&SigningRequest {
        body: Some(Bytes::new()),
        ..golden_request()
    })?;
    let non_empty = signer.sign(&SigningRequest {
        body: Some(Bytes::from_static(b"hello")),
        ..golden_request()
    })?;

    assert_eq!(absent, empty);
    assert_ne!(absent.signature, non_empty.signature);
    Ok(())
}

#[test]
fn test_missing_fields_rejected() {
    init_signing_test();

    let cases: [(&str, fn(&mut SigningRequest)); 6] = [
        ("awsAccessKeyId", |r| r.access_key_id = None),
        ("headers", |r| r.headers = None),
        ("queryString", |r| r.query_string = None),
        ("region", |r| r.region = None),
        ("secretAccessKey", |r| r.secret_access_key = None),
        ("service", |r| r.service = None),
    ];

    for (name, f) in cases {
        let mut req = golden_request();
        f(&mut req);

        let err = RequestSigner::new()
            .sign(&req)
            .expect_err("sign must fail");
        assert_eq!(err.kind(), ErrorKind::MissingParameter, "field {name}");
        assert_eq!(err.parameter(), Some(name));
    }
}

#[test]
fn test_malformed_query_rejected() {
    init_signing_test();

    for q in ["foo", "foo=a=b", "foo=Zoo&&foo=aha", "foo=Zoo&aha", "foo=%zz"] {
        let err = RequestSigner::new()
            .sign(&SigningRequest {
                query_string: Some(q.to_string()),
                ..golden_request()
            })
            .expect_err("sign must fail");
        assert_eq!(err.kind(), ErrorKind::InvalidQueryString, "query {q:?}");
    }
}

#[test]
fn test_header_case_collapse_last_wins() -> Result<()> {
    init_signing_test();

    let collapsed = header_map(&[
        ("Date", "Mon, 09 Sep 2011 23:36:00 GMT"),
        ("Host", "ignored.example.com"),
        ("host", "host.foo.com"),
    ]);

    let sig = RequestSigner::new().sign(&SigningRequest {
        headers: Some(collapsed),
        ..golden_request()
    })?;
    let expected = RequestSigner::new().sign(&golden_request())?;

    assert_eq!(sig, expected);
    Ok(())
}
