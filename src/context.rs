//! Consumed capabilities of the host server.
use std::io;

use http::{HeaderMap, StatusCode, request::Parts};

/// Response sink of one in-flight request.
///
/// Headers must be mutated before the first body write. The first
/// [`write_status`][ResponseWriter::write_status] call wins, later calls
/// are no-ops per standard HTTP semantics. A body write without a prior
/// status call implies `200 OK`.
pub trait ResponseWriter: io::Write {
    /// Header map of the pending response.
    fn headers(&mut self) -> &mut HeaderMap;

    /// Writes the status line. First call wins.
    fn write_status(&mut self, code: StatusCode);
}

/// Access to the originating request head and the response sink.
///
/// Implemented by the host server, request-scoped, never shared across
/// requests.
pub trait WebContext {
    /// Head of the originating request.
    fn request(&self) -> &Parts;

    /// Response sink.
    fn response(&mut self) -> &mut dyn ResponseWriter;
}
