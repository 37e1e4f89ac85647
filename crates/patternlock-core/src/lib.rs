//! Pattern Lock Core Library
//!
//! Platform-agnostic grid layout and gesture tracking for the pattern lock
//! widget. Nothing in here touches a browser or a drawing surface.

pub mod config;
pub mod gesture;
pub mod input;
pub mod layout;

pub use config::{
    ConfigError, ConfigResult, GridConfig, SizeSpec, SizeUnit, DEFAULT_COLUMNS,
    DEFAULT_MARGIN_RATIO, DEFAULT_MARKER_RATIO, DEFAULT_ROWS, DEFAULT_SIZE, MAX_DIMENSION,
};
pub use gesture::{GestureState, GestureTracker, PatternCode, HIT_RADIUS_FACTOR};
pub use input::PointerEvent;
pub use layout::{compute_layout, GridLayout, Node};
