//! Response body handling.
//!
//! The [`ResponseFormat`] trait decides how a success body is turned into
//! the value an operation returns.

mod format;

pub use format::{EmptyFormat, JsonFormat, ResponseFormat};
