//! Reply values, one per response-production strategy.
//!
//! Construct a variant, hand it back from the handler, render it once.
use std::{fmt, path::PathBuf};

use bytes::Bytes;
use http::{HeaderValue, StatusCode};
use serde_json::Value;

use crate::{context::WebContext, encode::TextEncoder, error::Error, template::Templates};

mod head;
mod text;
mod html;
mod json;
mod csv;
mod file;
mod data;
mod redirect;

/// A value that renders itself onto a response sink.
///
/// This trait is the handler return contract. Rendering resolves defaults
/// without mutating the value, but the caller is still expected to invoke
/// it exactly once per response.
pub trait Reply {
    /// Writes status, headers, and body for this value.
    fn render(&self, cx: &mut dyn WebContext) -> Result<(), Error>;
}

/// Status-only response, no body.
#[derive(Debug, Default)]
pub struct Head {
    pub code: StatusCode,
}

/// Plain-text response.
///
/// `Content-Type: text/plain; charset=utf-8`.
#[derive(Debug, Default)]
pub struct Text {
    pub text: String,
    pub code: StatusCode,
}

/// HTML response.
///
/// Body source, first match wins: the literal [`text`](Html::text), the
/// template named [`name`](Html::name), the default template entry point.
/// The template paths write no explicit status, the sink default applies.
pub struct Html<'t> {
    pub text: String,
    pub name: String,
    pub templates: Option<&'t dyn Templates>,
    pub data: Value,
}

/// JSON response.
///
/// Serialization happens before the sink is touched, so a failure leaves
/// the response open for an outer layer to replace.
#[derive(Debug, Default)]
pub struct Json<T = Value> {
    pub data: T,
    pub code: StatusCode,
}

/// CSV response in a legacy byte encoding.
///
/// Every field passes through [`encoder`](Csv::encoder) (Shift_JIS unless
/// configured otherwise) before quoting and emission.
#[derive(Debug, Default)]
pub struct Csv {
    pub rows: Vec<Vec<String>>,
    pub attachment: bool,
    pub code: StatusCode,
    pub encoder: TextEncoder,
}

/// Single-file response.
///
/// The path is stat-ed before anything is written, then the transfer is
/// delegated to [`sendfile::serve`][crate::sendfile::serve].
#[derive(Debug)]
pub struct SendFile {
    pub path: PathBuf,
}

/// Raw byte response.
///
/// No explicit status, the sink default applies unless the context already
/// set one.
#[derive(Debug, Default)]
pub struct Data {
    pub data: Bytes,
    pub content_type: Option<HeaderValue>,
}

/// Redirect response.
#[derive(Debug)]
pub struct Redirect {
    pub location: String,
    pub code: StatusCode,
}

impl Default for Html<'_> {
    fn default() -> Self {
        Html {
            text: String::new(),
            name: String::new(),
            templates: None,
            data: Value::Null,
        }
    }
}

impl fmt::Debug for Html<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Html")
            .field("text", &self.text)
            .field("name", &self.name)
            .field("templates", &self.templates.is_some())
            .field("data", &self.data)
            .finish()
    }
}
