//! Pattern Lock Application
//!
//! Glues layout, gesture tracking and rendering into a [`PatternWidget`],
//! mounts widgets into web pages (wasm32) and replays scripted gestures
//! headlessly (native).

mod coords;
mod widget;

pub use coords::client_to_canvas;
pub use widget::{CompletionCallback, PatternWidget};

#[cfg(not(target_arch = "wasm32"))]
mod replay;

#[cfg(not(target_arch = "wasm32"))]
pub use replay::{ReplayError, ReplayResult, ReplayScript, ReplayStep};

#[cfg(target_arch = "wasm32")]
mod canvas2d;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::CanvasSurface;

#[cfg(target_arch = "wasm32")]
pub use web::{mount_all, mount_pattern, run_wasm, MountError};
