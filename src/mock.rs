//! Test doubles for the context capabilities.
use std::io;

use http::{HeaderMap, HeaderName, Method, Request, StatusCode, request::Parts};

use crate::context::{ResponseWriter, WebContext};

pub(crate) struct MockContext {
    request: Parts,
    pub response: Recorder,
}

impl MockContext {
    pub fn get(uri: &str) -> MockContext {
        MockContext::with_method(Method::GET, uri)
    }

    pub fn with_method(method: Method, uri: &str) -> MockContext {
        let (request, ()) = Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        MockContext { request, response: Recorder::default() }
    }

    pub fn header(mut self, name: HeaderName, value: &str) -> MockContext {
        self.request.headers.insert(name, value.parse().unwrap());
        self
    }
}

impl WebContext for MockContext {
    fn request(&self) -> &Parts {
        &self.request
    }

    fn response(&mut self) -> &mut dyn ResponseWriter {
        &mut self.response
    }
}

/// Captures everything a render writes, with sink semantics: first status
/// wins, a body write without a status implies `200 OK`.
#[derive(Default)]
pub(crate) struct Recorder {
    pub status: Option<StatusCode>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Recorder {
    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }

    pub fn untouched(&self) -> bool {
        self.status.is_none() && self.headers.is_empty() && self.body.is_empty()
    }
}

impl io::Write for Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.status.get_or_insert(StatusCode::OK);
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResponseWriter for Recorder {
    fn headers(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, code: StatusCode) {
        self.status.get_or_insert(code);
    }
}
