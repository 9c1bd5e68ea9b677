//! Command line adapter around the SigV4 signer.
//!
//! ```shell
//! sigv4 --access-key-id KEYNAME --secret-access-key ... \
//!     --region us-west-1 --service s3 \
//!     -H 'Date: Mon, 09 Sep 2011 23:36:00 GMT' -H 'Host: host.foo.com' \
//!     --query 'foo=Zoo&foo=aha'
//! ```
//!
//! Credentials and region fall back to `AWS_ACCESS_KEY_ID`,
//! `AWS_SECRET_ACCESS_KEY` and `AWS_REGION`. The result is printed as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use bytes::Bytes;
use clap::Parser;
use http::HeaderMap;
use http::HeaderName;
use http::HeaderValue;
use http::Method;
use log::debug;
use sigv4_aws_v4::Config;
use sigv4_aws_v4::RequestSigner;
use sigv4_aws_v4::Signature;
use sigv4_aws_v4::SigningRequest;
use sigv4_core::OsEnv;

/// Compute an AWS Signature Version 4 authorization for a request.
#[derive(Parser)]
#[command(name = "sigv4", version)]
struct Args {
    /// Access key id, default to env `AWS_ACCESS_KEY_ID`.
    #[arg(long)]
    access_key_id: Option<String>,
    /// Secret access key, default to env `AWS_SECRET_ACCESS_KEY`.
    #[arg(long)]
    secret_access_key: Option<String>,
    /// Region, default to env `AWS_REGION` or `AWS_DEFAULT_REGION`.
    #[arg(long)]
    region: Option<String>,
    /// Service like `s3`.
    #[arg(long)]
    service: Option<String>,
    /// Request header as `Name: value`, can be repeated.
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(HeaderName, HeaderValue)>,
    /// Percent-encoded query string, without the leading `?`.
    #[arg(long)]
    query: Option<String>,
    /// Request body.
    #[arg(long, conflicts_with = "body_file")]
    body: Option<String>,
    /// Read the request body from a file.
    #[arg(long)]
    body_file: Option<PathBuf>,
    /// Request path, default to `/`.
    #[arg(long)]
    uri: Option<String>,
    /// Request method, default to `GET`.
    #[arg(short = 'X', long)]
    method: Option<Method>,
}

fn parse_header(s: &str) -> std::result::Result<(HeaderName, HeaderValue), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("header must be `Name: value`, got {s:?}"))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|e| e.to_string())?;
    let value = HeaderValue::from_bytes(value.as_bytes()).map_err(|e| e.to_string())?;

    Ok((name, value))
}

fn build_request(args: Args, cfg: &Config) -> Result<SigningRequest> {
    let body = match (args.body, args.body_file) {
        (Some(body), _) => Some(Bytes::from(body)),
        (None, Some(path)) => Some(Bytes::from(
            std::fs::read(&path)
                .with_context(|| format!("failed to read body from {}", path.display()))?,
        )),
        (None, None) => None,
    };

    let mut headers = HeaderMap::with_capacity(args.headers.len());
    for (name, value) in args.headers {
        headers.insert(name, value);
    }

    Ok(SigningRequest {
        access_key_id: args.access_key_id,
        secret_access_key: args.secret_access_key,
        region: args.region,
        service: args.service,
        headers: Some(headers),
        query_string: args.query,
        body,
        canonical_uri: args.uri,
        method: args.method,
    }
    .with_config(cfg))
}

fn run(args: Args) -> Result<Signature> {
    let cfg = Config::default().from_env(&OsEnv);
    debug!("loaded config: {cfg:?}");

    let req = build_request(args, &cfg)?;
    debug!("signing request: {req:?}");

    Ok(RequestSigner::new().sign(&req)?)
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()).and_then(|sig| Ok(serde_json::to_string_pretty(&sig)?)) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
