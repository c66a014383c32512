#![doc = include_str!("../README.md")]

pub mod js;
pub mod pretty;

pub use js::JsTranspiler;
pub use pretty::PrettyPrinter;
