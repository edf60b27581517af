use std::{fs, io, path::PathBuf};

use super::{Reply, SendFile};
use crate::{context::WebContext, error::Error, sendfile};

impl SendFile {
    /// File response for `path`.
    pub fn new(path: impl Into<PathBuf>) -> SendFile {
        SendFile { path: path.into() }
    }
}

impl Reply for SendFile {
    fn render(&self, cx: &mut dyn WebContext) -> Result<(), Error> {
        // a stat failure must leave the sink untouched
        let meta = fs::metadata(&self.path)?;
        if meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{} is a directory", self.path.display()),
            )
            .into());
        }
        sendfile::serve(cx, &self.path, &meta)
    }
}
