//! Template execution capability.
//!
//! The HTML variant does not render templates itself, it executes a handle
//! implementing [`Templates`]. [`TemplateSet`] is the provided implementor,
//! a registry of closures, so any engine that can write to a byte sink can
//! be plugged in.
use std::{fmt, io};

use fnv::FnvHashMap;
use serde_json::Value;

/// A set of template entry points.
pub trait Templates {
    /// Executes the default entry point against `data`.
    fn render(&self, data: &Value, out: &mut dyn io::Write) -> Result<(), TemplateError>;

    /// Executes the entry point registered under `name` against `data`.
    fn render_named(
        &self,
        name: &str,
        data: &Value,
        out: &mut dyn io::Write,
    ) -> Result<(), TemplateError>;
}

type TemplateFn = dyn Fn(&Value, &mut dyn io::Write) -> Result<(), TemplateError> + Send + Sync;

/// Closure-backed [`Templates`] registry.
#[derive(Default)]
pub struct TemplateSet {
    default: Option<Box<TemplateFn>>,
    named: FnvHashMap<String, Box<TemplateFn>>,
}

impl TemplateSet {
    pub fn new() -> TemplateSet {
        TemplateSet::default()
    }

    /// Registers the default entry point.
    pub fn with_default<F>(mut self, render: F) -> TemplateSet
    where
        F: Fn(&Value, &mut dyn io::Write) -> Result<(), TemplateError> + Send + Sync + 'static,
    {
        self.default = Some(Box::new(render));
        self
    }

    /// Registers an entry point under `name`.
    pub fn with<F>(mut self, name: impl Into<String>, render: F) -> TemplateSet
    where
        F: Fn(&Value, &mut dyn io::Write) -> Result<(), TemplateError> + Send + Sync + 'static,
    {
        self.named.insert(name.into(), Box::new(render));
        self
    }
}

impl Templates for TemplateSet {
    fn render(&self, data: &Value, out: &mut dyn io::Write) -> Result<(), TemplateError> {
        match &self.default {
            Some(render) => render(data, out),
            None => Err(TemplateError::NoDefault),
        }
    }

    fn render_named(
        &self,
        name: &str,
        data: &Value,
        out: &mut dyn io::Write,
    ) -> Result<(), TemplateError> {
        match self.named.get(name) {
            Some(render) => render(data, out),
            None => Err(TemplateError::NotFound(name.into())),
        }
    }
}

impl fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TemplateSet")
            .field("default", &self.default.is_some())
            .field("named", &self.named.len())
            .finish()
    }
}

// ===== Error =====

/// Error from executing a template entry point.
#[derive(Debug)]
pub enum TemplateError {
    /// The HTML value had no template handle to execute.
    Missing,
    /// No entry point registered under this name.
    NotFound(String),
    /// No default entry point registered.
    NoDefault,
    /// Sink failure while rendering.
    Io(io::Error),
    /// Engine failure while rendering.
    Render(Box<dyn std::error::Error + Send + Sync>),
}

impl From<io::Error> for TemplateError {
    fn from(v: io::Error) -> Self {
        Self::Io(v)
    }
}

impl std::error::Error for TemplateError { }

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("no template handle supplied"),
            Self::NotFound(name) => write!(f, "no template named {name:?}"),
            Self::NoDefault => f.write_str("no default template registered"),
            Self::Io(io) => io.fmt(f),
            Self::Render(render) => render.fmt(f),
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Write as _;

    use serde_json::{Value, json};

    use super::{TemplateError, TemplateSet, Templates};

    fn set() -> TemplateSet {
        TemplateSet::new()
            .with_default(|data, out| {
                write!(out, "<h1>{}</h1>", data["title"])?;
                Ok(())
            })
            .with("row", |data, out| {
                write!(out, "<li>{}</li>", data["name"])?;
                Ok(())
            })
    }

    #[test]
    fn default_entry() {
        let mut out = Vec::new();
        set().render(&json!({ "title": "hi" }), &mut out).unwrap();
        assert_eq!(out, br#"<h1>"hi"</h1>"#);
    }

    #[test]
    fn named_entry() {
        let mut out = Vec::new();
        set().render_named("row", &json!({ "name": 1 }), &mut out).unwrap();
        assert_eq!(out, b"<li>1</li>");
    }

    #[test]
    fn unknown_name() {
        let mut out = Vec::new();
        let err = set().render_named("nope", &Value::Null, &mut out).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(name) if name == "nope"));
        assert!(out.is_empty());
    }

    #[test]
    fn no_default_registered() {
        let mut out = Vec::new();
        let err = TemplateSet::new().render(&Value::Null, &mut out).unwrap_err();
        assert!(matches!(err, TemplateError::NoDefault));
    }
}
