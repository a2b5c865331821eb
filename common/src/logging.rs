//! Logging shorthands.
//!
//! [`success!`](crate::success) logs at `info` under its own target, which the
//! CLI formatter renders with a distinct symbol. [`error!`](crate::error) pins
//! failures to the `lanwatch` target so front ends can filter them in one
//! place.

pub const SUCCESS_TARGET: &str = "lanwatch::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "lanwatch::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!(target: "lanwatch", $($arg)*)
    };
}
