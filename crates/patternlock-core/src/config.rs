//! Grid configuration and target size parsing.
//!
//! A [`GridConfig`] is read once from the placeholder element's attributes and
//! stays fixed for the lifetime of a widget. Only the pixel geometry derived
//! from it changes, when the viewport is resized.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column count used when `numx` is missing or unusable.
pub const DEFAULT_COLUMNS: u32 = 3;
/// Row count used when `numy` is missing or unusable.
pub const DEFAULT_ROWS: u32 = 3;
/// Largest accepted column or row count.
pub const MAX_DIMENSION: u32 = 32;
/// Target size used when `size` is missing or unusable.
pub const DEFAULT_SIZE: SizeSpec = SizeSpec {
    value: 100.0,
    unit: SizeUnit::Vmin,
};
/// Share of each cell radius reserved as spacing between neighbouring circles.
pub const DEFAULT_MARGIN_RATIO: f64 = 0.2;
/// Marker radius relative to the circle radius.
pub const DEFAULT_MARKER_RATIO: f64 = 0.25;

/// Placeholder attribute holding the column count.
pub const COLUMNS_ATTRIBUTE: &str = "numx";
/// Placeholder attribute holding the row count.
pub const ROWS_ATTRIBUTE: &str = "numy";
/// Placeholder attribute holding the target size.
pub const SIZE_ATTRIBUTE: &str = "size";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Grid needs at least one column and one row, got {columns}x{rows}")]
    EmptyGrid { columns: u32, rows: u32 },
    #[error("Grid may have at most {max} columns and rows, got {columns}x{rows}", max = MAX_DIMENSION)]
    GridTooLarge { columns: u32, rows: u32 },
    #[error("{name} must lie strictly between 0 and 1, got {value}")]
    RatioOutOfRange { name: &'static str, value: f64 },
    #[error("Invalid size value: {0:?}")]
    InvalidSizeValue(String),
    #[error("Unknown size unit: {0:?}")]
    UnknownUnit(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Unit of a target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    /// Percentage of the viewport width.
    Vw,
    /// Percentage of the viewport height.
    Vh,
    /// Percentage of the smaller viewport dimension.
    Vmin,
    /// Percentage of the larger viewport dimension.
    Vmax,
    /// Absolute pixels.
    Px,
}

impl SizeUnit {
    /// The suffix written after the number, e.g. `vmin`.
    pub fn suffix(self) -> &'static str {
        match self {
            SizeUnit::Vw => "vw",
            SizeUnit::Vh => "vh",
            SizeUnit::Vmin => "vmin",
            SizeUnit::Vmax => "vmax",
            SizeUnit::Px => "px",
        }
    }

    /// Look up a unit by suffix (ASCII case-insensitive).
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "vw" => Some(SizeUnit::Vw),
            "vh" => Some(SizeUnit::Vh),
            "vmin" => Some(SizeUnit::Vmin),
            "vmax" => Some(SizeUnit::Vmax),
            "px" => Some(SizeUnit::Px),
            _ => None,
        }
    }
}

/// A length with a unit, such as `80vw` or `300px`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SizeSpec {
    pub value: f64,
    pub unit: SizeUnit,
}

impl SizeSpec {
    /// Create a size from a value and unit.
    pub fn new(value: f64, unit: SizeUnit) -> Self {
        Self { value, unit }
    }

    /// Parse `<number><unit>`. The number must be finite and positive.
    pub fn parse(raw: &str) -> ConfigResult<Self> {
        let raw = raw.trim();
        let split = raw
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(raw.len());
        let (number, suffix) = raw.split_at(split);

        let value: f64 = number
            .parse()
            .map_err(|_| ConfigError::InvalidSizeValue(raw.to_string()))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidSizeValue(raw.to_string()));
        }

        let unit = SizeUnit::from_suffix(suffix.trim())
            .ok_or_else(|| ConfigError::UnknownUnit(suffix.to_string()))?;

        Ok(Self { value, unit })
    }

    /// Parse an optional attribute value, falling back to [`DEFAULT_SIZE`].
    ///
    /// A missing attribute silently yields the default; a present but
    /// unusable one logs a warning first.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return DEFAULT_SIZE;
        };
        match Self::parse(raw) {
            Ok(size) => size,
            Err(e) => {
                log::warn!("Unknown size {:?} ({}), defaulting to {}", raw, e, DEFAULT_SIZE);
                DEFAULT_SIZE
            }
        }
    }

    /// Resolve to pixels against the given viewport.
    pub fn to_pixels(&self, viewport: Size) -> f64 {
        let percent = self.value / 100.0;
        match self.unit {
            SizeUnit::Vw => percent * viewport.width,
            SizeUnit::Vh => percent * viewport.height,
            SizeUnit::Vmin => percent * viewport.width.min(viewport.height),
            SizeUnit::Vmax => percent * viewport.width.max(viewport.height),
            SizeUnit::Px => self.value,
        }
    }
}

impl Default for SizeSpec {
    fn default() -> Self {
        DEFAULT_SIZE
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for SizeSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SizeSpec {
    type Error = ConfigError;

    fn try_from(value: String) -> ConfigResult<Self> {
        Self::parse(&value)
    }
}

impl From<SizeSpec> for String {
    fn from(size: SizeSpec) -> Self {
        size.to_string()
    }
}

/// Grid dimensions and proportions for one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridConfigRepr")]
pub struct GridConfig {
    columns: u32,
    rows: u32,
    target_size: SizeSpec,
    margin_ratio: f64,
    marker_ratio: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            target_size: DEFAULT_SIZE,
            margin_ratio: DEFAULT_MARGIN_RATIO,
            marker_ratio: DEFAULT_MARKER_RATIO,
        }
    }
}

impl GridConfig {
    /// Create a validated grid configuration.
    pub fn new(
        columns: u32,
        rows: u32,
        target_size: SizeSpec,
        margin_ratio: f64,
        marker_ratio: f64,
    ) -> ConfigResult<Self> {
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid { columns, rows });
        }
        if columns > MAX_DIMENSION || rows > MAX_DIMENSION {
            return Err(ConfigError::GridTooLarge { columns, rows });
        }
        check_ratio("margin_ratio", margin_ratio)?;
        check_ratio("marker_ratio", marker_ratio)?;
        if !target_size.value.is_finite() || target_size.value <= 0.0 {
            return Err(ConfigError::InvalidSizeValue(target_size.to_string()));
        }
        Ok(Self {
            columns,
            rows,
            target_size,
            margin_ratio,
            marker_ratio,
        })
    }

    /// Grid of the given dimensions with default size and proportions.
    pub fn with_dimensions(columns: u32, rows: u32) -> ConfigResult<Self> {
        Self::new(
            columns,
            rows,
            DEFAULT_SIZE,
            DEFAULT_MARGIN_RATIO,
            DEFAULT_MARKER_RATIO,
        )
    }

    /// Build a configuration from placeholder attributes.
    ///
    /// Never fails: every missing or unusable attribute is replaced by its
    /// built-in default, and counts above [`MAX_DIMENSION`] are clamped.
    pub fn from_attributes<F>(attribute: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let columns = parse_count(COLUMNS_ATTRIBUTE, attribute(COLUMNS_ATTRIBUTE), DEFAULT_COLUMNS);
        let rows = parse_count(ROWS_ATTRIBUTE, attribute(ROWS_ATTRIBUTE), DEFAULT_ROWS);
        let target_size = SizeSpec::parse_or_default(attribute(SIZE_ATTRIBUTE).as_deref());

        Self {
            columns,
            rows,
            target_size,
            ..Self::default()
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn target_size(&self) -> SizeSpec {
        self.target_size
    }

    pub fn margin_ratio(&self) -> f64 {
        self.margin_ratio
    }

    pub fn marker_ratio(&self) -> f64 {
        self.marker_ratio
    }

    /// Total number of nodes in the grid.
    pub fn node_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

fn check_ratio(name: &'static str, value: f64) -> ConfigResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::RatioOutOfRange { name, value })
    }
}

/// Parse a positive count the way a lenient HTML attribute reader would:
/// leading digits count, anything after them is ignored.
fn parse_count(name: &str, raw: Option<String>, default: u32) -> u32 {
    let Some(raw) = raw else {
        return default;
    };
    let trimmed = raw.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..digits_end];
    match digits.parse::<u32>() {
        Ok(count) if count > MAX_DIMENSION => {
            log::warn!("{} attribute {:?} exceeds {}, clamping", name, raw, MAX_DIMENSION);
            MAX_DIMENSION
        }
        Ok(count) if count > 0 => count,
        // Only digits, yet not a u32: too many of them.
        Err(_) if !digits.is_empty() => {
            log::warn!("{} attribute {:?} exceeds {}, clamping", name, raw, MAX_DIMENSION);
            MAX_DIMENSION
        }
        _ => {
            log::warn!("Invalid {} attribute {:?}, defaulting to {}", name, raw, default);
            default
        }
    }
}

/// Serde mirror of [`GridConfig`] so deserialized configs go through validation.
#[derive(Deserialize)]
#[serde(default)]
struct GridConfigRepr {
    columns: u32,
    rows: u32,
    target_size: SizeSpec,
    margin_ratio: f64,
    marker_ratio: f64,
}

impl Default for GridConfigRepr {
    fn default() -> Self {
        let defaults = GridConfig::default();
        Self {
            columns: defaults.columns,
            rows: defaults.rows,
            target_size: defaults.target_size,
            margin_ratio: defaults.margin_ratio,
            marker_ratio: defaults.marker_ratio,
        }
    }
}

impl TryFrom<GridConfigRepr> for GridConfig {
    type Error = ConfigError;

    fn try_from(repr: GridConfigRepr) -> ConfigResult<Self> {
        GridConfig::new(
            repr.columns,
            repr.rows,
            repr.target_size,
            repr.margin_ratio,
            repr.marker_ratio,
        )
    }
}
