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

//! Time related utils.

use crate::Error;
use chrono::NaiveDateTime;
use chrono::SubsecRound;
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date: `20220301`
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format time into ISO8601 basic format: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parse the value of a `Date` header.
///
/// Accepts http date / RFC2822 (`Mon, 09 Sep 2011 23:36:00 GMT`), RFC3339
/// (`2011-09-09T23:36:00Z`) and ISO8601 basic format (`20110909T233600Z`).
/// Sub-second precision is dropped.
///
/// The leading day-of-week name is ignored, so a weekday that disagrees with
/// the date is not an error.
pub fn parse_http_date(s: &str) -> crate::Result<DateTime> {
    let s = s.trim();
    let without_weekday = match s.split_once(',') {
        Some((_, rest)) => rest.trim(),
        None => s,
    };

    let parsed = chrono::DateTime::parse_from_rfc2822(without_weekday)
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(s))
        .map(|t| t.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%SZ").map(|t| t.and_utc()));

    match parsed {
        Ok(t) => Ok(t.trunc_subsecs(0)),
        Err(e) => Err(Error::invalid_date(format!("invalid date: {s:?}")).with_source(e)),
    }
}
