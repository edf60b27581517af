use std::io::Write as _;

use bytes::Bytes;
use http::{HeaderValue, header::CONTENT_TYPE};

use super::{Data, Reply};
use crate::{
    context::{ResponseWriter as _, WebContext},
    error::Error,
};

impl Data {
    /// Raw bytes with the sink's default content type.
    pub fn new(data: impl Into<Bytes>) -> Data {
        Data { data: data.into(), content_type: None }
    }

    /// Sets an explicit content type.
    pub fn content_type(mut self, value: HeaderValue) -> Data {
        self.content_type = Some(value);
        self
    }
}

impl Reply for Data {
    fn render(&self, cx: &mut dyn WebContext) -> Result<(), Error> {
        let w = cx.response();
        if let Some(content_type) = &self.content_type {
            w.headers().insert(CONTENT_TYPE, content_type.clone());
        }
        w.write_all(&self.data)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use http::{HeaderValue, StatusCode, header::CONTENT_TYPE};

    use super::{Data, Reply};
    use crate::{context::ResponseWriter as _, mock::MockContext};

    #[test]
    fn bytes_with_sink_default_status() {
        let mut cx = MockContext::get("/");
        Data::new(&b"\x00\x01\x02"[..]).render(&mut cx).unwrap();
        assert_eq!(cx.response.status, Some(StatusCode::OK));
        assert_eq!(cx.response.body, [0, 1, 2]);
        assert!(cx.response.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn explicit_content_type_is_set() {
        let mut cx = MockContext::get("/");
        Data::new(&b"GIF89a"[..])
            .content_type(HeaderValue::from_static("image/gif"))
            .render(&mut cx)
            .unwrap();
        assert_eq!(cx.response.headers.get(CONTENT_TYPE).unwrap(), "image/gif");
    }

    #[test]
    fn pre_set_status_wins() {
        let mut cx = MockContext::get("/");
        cx.response.write_status(StatusCode::NOT_FOUND);
        Data::new(&b"missing"[..]).render(&mut cx).unwrap();
        assert_eq!(cx.response.status, Some(StatusCode::NOT_FOUND));
    }
}
