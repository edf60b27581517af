use std::io::{self, Write as _};

use http::{
    HeaderValue, Method, StatusCode,
    header::{CONTENT_TYPE, LOCATION},
};

use super::{Redirect, Reply};
use crate::{
    context::{ResponseWriter, WebContext},
    error::Error,
};

impl Redirect {
    /// by default it will redirect with 303 See Other
    pub fn new(location: impl Into<String>) -> Redirect {
        Redirect { location: location.into(), code: StatusCode::SEE_OTHER }
    }

    /// redirect with custom status code
    pub fn with_status(code: StatusCode, location: impl Into<String>) -> Redirect {
        Redirect { location: location.into(), code }
    }
}

impl Default for Redirect {
    fn default() -> Redirect {
        Redirect { location: String::new(), code: StatusCode::SEE_OTHER }
    }
}

impl Reply for Redirect {
    fn render(&self, cx: &mut dyn WebContext) -> Result<(), Error> {
        let method = cx.request().method.clone();
        write(cx.response(), &method, &self.location, self.code)?;
        Ok(())
    }
}

/// Writes a complete redirect response.
///
/// `Location` and status always; `text/html` content type on GET and HEAD;
/// an anchor body on GET only, for clients that do not follow redirects.
pub(crate) fn write(
    w: &mut dyn ResponseWriter,
    method: &Method,
    location: &str,
    code: StatusCode,
) -> io::Result<()> {
    let location_value = HeaderValue::from_str(location).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "location is not a valid header value")
    })?;
    w.headers().insert(LOCATION, location_value);

    let get = method == Method::GET;
    if get || method == Method::HEAD {
        w.headers().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
    }
    w.write_status(code);

    if get {
        let reason = code.canonical_reason().unwrap_or("Redirect");
        writeln!(w, "<a href=\"{}\">{}</a>.", escape(location), reason)?;
    }
    Ok(())
}

fn escape(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
