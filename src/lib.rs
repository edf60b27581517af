//! Self-rendering HTTP response values.
//!
//! A handler returns one [`Reply`] value; the host server invokes
//! [`Reply::render`] exactly once to write status, headers, and body onto
//! its response sink. The sink and the originating request head are reached
//! through the [`WebContext`] capability, so this crate performs no IO of
//! its own beyond what the sink provides.

#![warn(missing_debug_implementations)]

mod common;

pub mod context;
pub mod encode;
pub mod error;
pub mod reply;
pub mod sendfile;
pub mod template;

#[cfg(test)]
pub(crate) mod mock;

pub use context::{ResponseWriter, WebContext};
pub use error::Error;
pub use reply::{Csv, Data, Head, Html, Json, Redirect, Reply, SendFile, Text};
