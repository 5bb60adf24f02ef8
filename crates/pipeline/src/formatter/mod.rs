//! Formatter nodes: read an event and publish one rendered format.

mod json;
mod jsonx;

pub use json::JsonFormatter;
pub use jsonx::JsonxFormatter;
