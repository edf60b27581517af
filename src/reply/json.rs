use std::io::Write as _;

use http::{HeaderValue, StatusCode, header::CONTENT_TYPE};
use serde::Serialize;

use super::{Json, Reply};
use crate::{
    context::{ResponseWriter as _, WebContext},
    error::Error,
};

impl<T: Serialize> Json<T> {
    /// JSON response with status `200 OK`.
    pub fn new(data: T) -> Json<T> {
        Json { data, code: StatusCode::OK }
    }
}

impl<T: Serialize> Reply for Json<T> {
    fn render(&self, cx: &mut dyn WebContext) -> Result<(), Error> {
        // a serialization failure must leave the sink untouched
        let body = serde_json::to_vec(&self.data)?;

        let w = cx.response();
        w.headers().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        w.write_status(self.code);
        w.write_all(&body)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use http::{StatusCode, header::CONTENT_TYPE};
    use serde_json::json;

    use super::{Json, Reply};
    use crate::{error::Kind, mock::MockContext};

    #[test]
    fn serializes_with_default_status() {
        let mut cx = MockContext::get("/");
        Json::new(json!({ "x": 1 })).render(&mut cx).unwrap();
        assert_eq!(cx.response.status, Some(StatusCode::OK));
        assert_eq!(cx.response.body_str(), r#"{"x":1}"#);
        assert_eq!(cx.response.headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn explicit_status_is_kept() {
        let mut cx = MockContext::get("/");
        let data = BTreeMap::from([("a", 5)]);
        Json { data, code: StatusCode::CREATED }.render(&mut cx).unwrap();
        assert_eq!(cx.response.status, Some(StatusCode::CREATED));
        assert_eq!(cx.response.body_str(), r#"{"a":5}"#);
    }

    #[test]
    fn failed_serialization_leaves_the_sink_untouched() {
        struct Broken;
        impl serde::Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("broken"))
            }
        }

        let mut cx = MockContext::get("/");
        let err = Json::new(Broken).render(&mut cx).unwrap_err();
        assert!(matches!(err.kind(), Kind::Json(_)));
        assert!(cx.response.untouched());
    }
}
