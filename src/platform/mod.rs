//! Platform abstraction layer
//!
//! Turns browser events into simulation intents. Kept free of `web_sys` types
//! so the translation can be tested natively.

pub mod input;

pub use input::{Intent, RawInput, translate};
