use std::io::Write as _;

use http::{HeaderValue, header::CONTENT_TYPE};
use serde_json::Value;

use super::{Html, Reply};
use crate::{
    context::{ResponseWriter as _, WebContext},
    error::Error,
    template::{TemplateError, Templates},
};

impl<'t> Html<'t> {
    /// Literal HTML body.
    pub fn text(text: impl Into<String>) -> Html<'static> {
        Html { text: text.into(), ..Html::default() }
    }

    /// Default template entry point against `data`.
    pub fn template(templates: &'t dyn Templates, data: Value) -> Html<'t> {
        Html { templates: Some(templates), data, ..Html::default() }
    }

    /// Named template entry point against `data`.
    pub fn named(
        templates: &'t dyn Templates,
        name: impl Into<String>,
        data: Value,
    ) -> Html<'t> {
        Html {
            templates: Some(templates),
            name: name.into(),
            data,
            ..Html::default()
        }
    }
}

impl Reply for Html<'_> {
    fn render(&self, cx: &mut dyn WebContext) -> Result<(), Error> {
        let mut w = cx.response();
        w.headers().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );

        // literal body wins, template fields are never consulted
        if !self.text.is_empty() {
            w.write_all(self.text.as_bytes())?;
            return Ok(());
        }

        let templates = self.templates.ok_or(TemplateError::Missing)?;
        if !self.name.is_empty() {
            templates.render_named(&self.name, &self.data, &mut w)?;
            return Ok(());
        }
        templates.render(&self.data, &mut w)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::Write as _;

    use http::{StatusCode, header::CONTENT_TYPE};
    use serde_json::{Value, json};

    use super::{Html, Reply};
    use crate::{
        error::Kind,
        mock::MockContext,
        template::{TemplateError, TemplateSet},
    };

    fn set() -> TemplateSet {
        TemplateSet::new()
            .with_default(|data, out| {
                write!(out, "<h1>count: {}</h1>", data["count"])?;
                Ok(())
            })
            .with("row", |data, out| {
                write!(out, "<li>{}</li>", data["id"])?;
                Ok(())
            })
    }

    #[test]
    fn literal_text_wins_over_templates() {
        // no handle and a bogus name: the literal path must not consult either
        let mut cx = MockContext::get("/");
        let html = Html { name: "does-not-exist".into(), ..Html::text("<p>hi</p>") };
        html.render(&mut cx).unwrap();
        assert_eq!(cx.response.body_str(), "<p>hi</p>");
        assert_eq!(
            cx.response.headers.get(CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8",
        );
    }

    #[test]
    fn named_template_renders() {
        let set = set();
        let mut cx = MockContext::get("/");
        Html::named(&set, "row", json!({ "id": 7 })).render(&mut cx).unwrap();
        assert_eq!(cx.response.body_str(), "<li>7</li>");
        assert_eq!(cx.response.status, Some(StatusCode::OK));
    }

    #[test]
    fn unknown_name_does_not_fall_back() {
        let set = set();
        let mut cx = MockContext::get("/");
        let err = Html::named(&set, "nope", Value::Null).render(&mut cx).unwrap_err();
        assert!(matches!(
            err.kind(),
            Kind::Template(TemplateError::NotFound(name)) if name == "nope",
        ));
        assert!(cx.response.body.is_empty());
    }

    #[test]
    fn default_template_renders() {
        let set = set();
        let mut cx = MockContext::get("/");
        Html::template(&set, json!({ "count": 3 })).render(&mut cx).unwrap();
        assert_eq!(cx.response.body_str(), "<h1>count: 3</h1>");
    }

    #[test]
    fn template_path_requires_a_handle() {
        let mut cx = MockContext::get("/");
        let err = Html::default().render(&mut cx).unwrap_err();
        assert!(matches!(err.kind(), Kind::Template(TemplateError::Missing)));
    }
}
