#![doc = include_str!("../README.md")]

pub mod diagnostics;
pub mod span;
pub mod token;
