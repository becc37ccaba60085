//! Engines that drive a host surface with the `vwindow` core.
//!
//! The `vwindow` crate only does the math. This crate adds what an embedding UI needs on top:
//!
//! - [`VirtualScroll`]: scroll/resize handling, frame-coalesced recomputation, debounced
//!   rendering, and a batch renderer that materializes a window across several frames and
//!   commits it in one operation.
//! - [`VirtualTable`]: the same engine with columns, column sorting and row selection.
//! - [`Surface`] / [`TableSurface`]: the host-side scaffold (viewport, spacer, content layer).
//!
//! Everything is single-threaded and cooperative. The host calls `tick(now_ms)` once per display
//! refresh; a fixed ~16ms timer is an acceptable stand-in where no refresh callback exists.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod batch;
mod engine;
mod error;
mod scheduler;
mod surface;
pub mod table;
mod tween;


pub use batch::{BatchRenderer, BatchStep};
pub use engine::{EngineOptions, OnLazyLoad, OnRenderComplete, RenderItem, Tick, VirtualScroll};
pub use error::{BoxError, Error};
pub use scheduler::FrameScheduler;
pub use surface::{Capabilities, Surface, TableSurface};
pub use table::{Column, FieldValue, Modifiers, Row, SelectionState, SortDirection, VirtualTable};
pub use tween::{Easing, ScrollTween};

pub use vwindow::{Axis, ConfigError, ScrollBehavior, WindowOptions, WindowRange};
