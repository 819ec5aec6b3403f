//! WebAssembly bindings for the lib8080 interpreter.
//!
//! This module provides JavaScript-callable interfaces to the 8080 CPU,
//! enabling browser-based execution and inspection of program images.

pub mod api;

pub use api::Emulator8080;
