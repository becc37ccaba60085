//! A headless windowing core for virtual lists and tables.
//!
//! For the batch renderer, scroll/resize controller and table extension, see the
//! `vwindow-adapter` crate.
//!
//! This crate owns the math needed to show a huge collection through a small viewport:
//! per-item heights (fixed, or measured with a running-average estimate), total scroll extent,
//! and the buffered index window `[start, end)` to materialize for a scroll offset.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - viewport size along the scroll axis
//! - scroll offset
//! - measured item heights (dynamic mode only)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod fenwick;
mod heights;
mod options;
pub mod range;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use heights::HeightModel;
pub use options::WindowOptions;
pub use types::{Axis, ItemPlacement, ScrollBehavior, WindowRange};
pub use window::Window;
