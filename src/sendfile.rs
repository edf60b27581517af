//! Conditional file responses.
//!
//! Serves one file with content-type by extension, `Last-Modified`
//! validation, and single-range support. Status selection (200, 206, 304,
//! 416) is owned here; callers check that the path exists beforehand.
use std::{
    fs,
    io::{self, Read as _, Seek as _, SeekFrom},
    path::Path,
    time::SystemTime,
};

use http::{
    HeaderValue, Method, StatusCode,
    header::{
        ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, IF_MODIFIED_SINCE,
        LAST_MODIFIED, RANGE,
    },
    request::Parts,
};

use crate::{
    common::log,
    context::{ResponseWriter as _, WebContext},
    error::Error,
};

/// Writes the complete file response for `path`.
///
/// `meta` is the caller's stat result; a missing or unreadable path must be
/// rejected before anything reaches the sink.
pub fn serve(cx: &mut dyn WebContext, path: &Path, meta: &fs::Metadata) -> Result<(), Error> {
    let req = Conditional::from_request(cx.request());
    let w = cx.response();

    let modified = meta.modified().ok();
    if let Some(modified) = modified {
        if let Ok(value) = HeaderValue::from_str(&httpdate::fmt_http_date(modified)) {
            w.headers().insert(LAST_MODIFIED, value);
        }
    }

    if let (Some(since), Some(modified)) = (req.if_modified_since, modified) {
        if !modified_after(modified, since) {
            w.write_status(StatusCode::NOT_MODIFIED);
            return Ok(());
        }
    }

    let len = meta.len();
    let headers = w.headers();
    headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    let content_type = mime_guess::from_path(path).first_or_octet_stream();
    if let Ok(value) = HeaderValue::from_str(content_type.as_ref()) {
        headers.insert(CONTENT_TYPE, value);
    }

    let mut range = None;
    if let Some(value) = req.range.as_deref() {
        match parse_range(value, len) {
            ParsedRange::Single(start, end) => range = Some((start, end)),
            ParsedRange::Unsatisfiable => {
                w.headers().insert(CONTENT_RANGE, unsatisfied_range(len));
                w.write_status(StatusCode::RANGE_NOT_SATISFIABLE);
                return Ok(());
            }
            ParsedRange::Ignore => log!("serving full content for range header {value:?}"),
        }
    }

    let (status, start, body_len) = match range {
        Some((start, end)) => {
            w.headers().insert(CONTENT_RANGE, satisfied_range(start, end, len));
            (StatusCode::PARTIAL_CONTENT, start, end - start + 1)
        }
        None => (StatusCode::OK, 0, len),
    };
    w.headers().insert(CONTENT_LENGTH, HeaderValue::from(body_len));
    w.write_status(status);

    if req.head_only {
        return Ok(());
    }

    let mut file = fs::File::open(path)?;
    if start > 0 {
        file.seek(SeekFrom::Start(start))?;
    }
    io::copy(&mut file.take(body_len), w)?;
    Ok(())
}

/// Request facts a file response depends on, copied out of the head before
/// the writer is borrowed.
#[derive(Debug)]
struct Conditional {
    head_only: bool,
    if_modified_since: Option<SystemTime>,
    range: Option<String>,
}

impl Conditional {
    fn from_request(req: &Parts) -> Conditional {
        let get_or_head = req.method == Method::GET || req.method == Method::HEAD;
        Conditional {
            head_only: req.method == Method::HEAD,
            // conditional requests are defined for GET and HEAD only
            if_modified_since: get_or_head
                .then(|| req.headers.get(IF_MODIFIED_SINCE))
                .flatten()
                .and_then(|value| value.to_str().ok())
                .and_then(|value| httpdate::parse_http_date(value).ok()),
            range: req
                .headers
                .get(RANGE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
        }
    }
}

/// HTTP dates carry whole seconds, sub-second mtime drift must not defeat
/// the cache.
fn modified_after(modified: SystemTime, since: SystemTime) -> bool {
    match modified.duration_since(since) {
        Ok(delta) => delta.as_secs() > 0,
        Err(_) => false,
    }
}

#[derive(Debug, PartialEq)]
enum ParsedRange {
    Single(u64, u64),
    Unsatisfiable,
    Ignore,
}

/// Parses a `bytes=` header against a representation of `len` bytes.
///
/// Multi-range and malformed headers fall back to the full representation,
/// which every client must accept.
fn parse_range(value: &str, len: u64) -> ParsedRange {
    let Some(set) = value.strip_prefix("bytes=") else {
        return ParsedRange::Ignore;
    };
    if set.contains(',') {
        return ParsedRange::Ignore;
    }
    let Some((start, end)) = set.trim().split_once('-') else {
        return ParsedRange::Ignore;
    };

    if start.is_empty() {
        // suffix form: the last `end` bytes
        let Ok(suffix) = end.parse::<u64>() else {
            return ParsedRange::Ignore;
        };
        if suffix == 0 || len == 0 {
            return ParsedRange::Unsatisfiable;
        }
        return ParsedRange::Single(len.saturating_sub(suffix), len - 1);
    }

    let Ok(start) = start.parse::<u64>() else {
        return ParsedRange::Ignore;
    };
    if start >= len {
        return ParsedRange::Unsatisfiable;
    }
    let end = if end.is_empty() {
        len - 1
    } else {
        match end.parse::<u64>() {
            Ok(end) => end.min(len - 1),
            Err(_) => return ParsedRange::Ignore,
        }
    };
    if end < start {
        return ParsedRange::Ignore;
    }
    ParsedRange::Single(start, end)
}

fn satisfied_range(start: u64, end: u64, len: u64) -> HeaderValue {
    let mut buf = itoa::Buffer::new();
    let mut value = Vec::with_capacity(32);
    value.extend_from_slice(b"bytes ");
    value.extend_from_slice(buf.format(start).as_bytes());
    value.push(b'-');
    value.extend_from_slice(buf.format(end).as_bytes());
    value.push(b'/');
    value.extend_from_slice(buf.format(len).as_bytes());
    HeaderValue::from_bytes(&value).expect("digits are a valid header value")
}

fn unsatisfied_range(len: u64) -> HeaderValue {
    let mut buf = itoa::Buffer::new();
    let mut value = Vec::with_capacity(16);
    value.extend_from_slice(b"bytes */");
    value.extend_from_slice(buf.format(len).as_bytes());
    HeaderValue::from_bytes(&value).expect("digits are a valid header value")
}
