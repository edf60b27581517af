//! Render error.
use std::{backtrace::Backtrace, fmt, io};

use crate::{encode::EncodeError, template::TemplateError};

/// Error returned from [`Reply::render`][crate::Reply::render].
pub struct Error {
    kind: Kind,
    backtrace: Backtrace,
}

impl Error {
    /// Returns the underlying [`Backtrace`].
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Returns what failed.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }
}

impl From<Kind> for Error {
    fn from(kind: Kind) -> Self {
        Self { kind, backtrace: Backtrace::capture() }
    }
}

/// The failure classes of a render.
///
/// `Io` and `Template` failures may follow a partially written response;
/// `Json` serialization and the `SendFile` stat check fail before the sink
/// is touched.
#[derive(Debug)]
pub enum Kind {
    Io(io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    Encode(EncodeError),
    Template(TemplateError),
}

impl From<io::Error> for Error {
    fn from(v: io::Error) -> Self {
        Self::from(Kind::Io(v))
    }
}

impl From<serde_json::Error> for Error {
    fn from(v: serde_json::Error) -> Self {
        Self::from(Kind::Json(v))
    }
}

impl From<csv::Error> for Error {
    fn from(v: csv::Error) -> Self {
        Self::from(Kind::Csv(v))
    }
}

impl From<EncodeError> for Error {
    fn from(v: EncodeError) -> Self {
        Self::from(Kind::Encode(v))
    }
}

impl From<TemplateError> for Error {
    fn from(v: TemplateError) -> Self {
        Self::from(Kind::Template(v))
    }
}

impl std::error::Error for Error { }

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut f = f.debug_tuple("Error");
        match &self.kind {
            Kind::Io(e) => f.field(&e),
            Kind::Json(e) => f.field(&e),
            Kind::Csv(e) => f.field(&e),
            Kind::Encode(e) => f.field(&e),
            Kind::Template(e) => f.field(&e),
        }.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            Kind::Io(e) => e.fmt(f)?,
            Kind::Json(e) => e.fmt(f)?,
            Kind::Csv(e) => e.fmt(f)?,
            Kind::Encode(e) => e.fmt(f)?,
            Kind::Template(e) => e.fmt(f)?,
        }

        if let std::backtrace::BacktraceStatus::Captured = self.backtrace.status() {
            let backtrace = self.backtrace.to_string();
            writeln!(f, "\n\nrender error stack backtrace:")?;
            write!(f, "{}", backtrace.trim_end())?;
        }

        Ok(())
    }
}
