use std::io::Write as _;

use http::{HeaderValue, StatusCode, header::CONTENT_TYPE};

use super::{Reply, Text};
use crate::{
    context::{ResponseWriter as _, WebContext},
    error::Error,
};

impl Text {
    /// Plain-text response with status `200 OK`.
    pub fn new(text: impl Into<String>) -> Text {
        Text { text: text.into(), code: StatusCode::OK }
    }
}

impl Reply for Text {
    fn render(&self, cx: &mut dyn WebContext) -> Result<(), Error> {
        let w = cx.response();
        w.headers().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        w.write_status(self.code);
        w.write_all(self.text.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use http::{StatusCode, header::CONTENT_TYPE};

    use super::{Reply, Text};
    use crate::mock::MockContext;

    #[test]
    fn body_and_status_match_inputs() {
        let mut cx = MockContext::get("/");
        Text { text: "created".into(), code: StatusCode::CREATED }
            .render(&mut cx)
            .unwrap();
        assert_eq!(cx.response.status, Some(StatusCode::CREATED));
        assert_eq!(cx.response.body_str(), "created");
        assert_eq!(
            cx.response.headers.get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8",
        );
    }

    #[test]
    fn new_defaults_to_ok() {
        let mut cx = MockContext::get("/");
        Text::new("hello").render(&mut cx).unwrap();
        assert_eq!(cx.response.status, Some(StatusCode::OK));
        assert_eq!(cx.response.body_str(), "hello");
    }
}
