//! Cross-crate tests driving the dashboard end to end with in-process fakes.

#[cfg(test)]
mod fakes;

mod dashboard;
