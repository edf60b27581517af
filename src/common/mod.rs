//! Internal utilities.

macro_rules! log {
    ($($tt:tt)*) => {
        {
            #[cfg(feature = "log")]
            log::debug!($($tt)*);
            #[cfg(not(feature = "log"))]
            { let _ = format_args!($($tt)*); }
        }
    };
}

pub(crate) use log;
