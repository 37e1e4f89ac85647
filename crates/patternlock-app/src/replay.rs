//! Headless replay of scripted gestures.
//!
//! A script is a JSON document:
//!
//! ```json
//! {
//!   "grid": { "columns": 3, "rows": 3, "target_size": "300px" },
//!   "viewport": { "width": 800.0, "height": 600.0 },
//!   "events": [
//!     { "type": "down", "position": { "x": 50.0, "y": 50.0 } },
//!     { "type": "move", "position": { "x": 150.0, "y": 150.0 } },
//!     { "resize": { "width": 1024.0, "height": 768.0 } },
//!     { "type": "up" }
//!   ]
//! }
//! ```

use crate::widget::PatternWidget;
use kurbo::Size;
use patternlock_core::{GridConfig, PointerEvent};
use patternlock_render::RecordingSurface;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplayStep {
    /// Viewport change.
    Resize { resize: Size },
    Pointer(PointerEvent),
}

/// A grid, a viewport and the steps to feed a widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    pub events: Vec<ReplayStep>,
}

fn default_viewport() -> Size {
    Size::new(800.0, 600.0)
}

impl ReplayScript {
    /// Parse a script from JSON text.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> ReplayResult<Self> {
        let json = std::fs::read_to_string(path)?;
        log::info!("Loaded replay script {}", path.display());
        Self::from_json(&json)
    }

    /// Feed every step through a widget and collect the emitted codes.
    pub fn run(&self) -> Vec<String> {
        let codes = Rc::new(RefCell::new(Vec::new()));
        let sink = codes.clone();
        let mut widget = PatternWidget::new(
            self.grid.clone(),
            self.viewport,
            RecordingSurface::default(),
            move |code| sink.borrow_mut().push(code.to_string()),
        );

        for step in &self.events {
            match *step {
                ReplayStep::Resize { resize } => widget.resize(resize),
                ReplayStep::Pointer(event) => widget.handle_event(event),
            }
        }
        log::debug!(
            "Replayed {} step(s) over {} frame(s)",
            self.events.len(),
            widget.surface().frame_count()
        );

        codes.take()
    }
}
