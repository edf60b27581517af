use http::StatusCode;

use super::{Head, Reply};
use crate::{
    context::{ResponseWriter as _, WebContext},
    error::Error,
};

impl Head {
    /// Head response with `code`.
    pub fn new(code: StatusCode) -> Head {
        Head { code }
    }
}

impl Reply for Head {
    fn render(&self, cx: &mut dyn WebContext) -> Result<(), Error> {
        cx.response().write_status(self.code);
        Ok(())
    }
}
