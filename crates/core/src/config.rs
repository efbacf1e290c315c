//! Reproducible demo configuration.
//!
//! A [`DemoConfig`] captures every tunable the drivers read: the surface
//! pattern and resolution, the ring-wave frequency, the stream cadence and
//! window, and the stream noise seed. It round-trips through JSON so a CLI
//! invocation or browser session can be replayed exactly.

use crate::error::SurfaceError;
use crate::grid::{validate_resolution, MAX_RESOLUTION, MIN_RESOLUTION};
use crate::params::{param_f64, param_u64};
use crate::pattern::Pattern;
use crate::ring::{validate_frequency, MAX_FREQUENCY, MIN_FREQUENCY};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_RESOLUTION: usize = 25;
/// Resolution slider bounds reported to UIs.
pub const SLIDER_MIN_RESOLUTION: usize = 5;
pub const SLIDER_MAX_RESOLUTION: usize = 50;
pub const DEFAULT_FREQUENCY: f64 = 1.0;
pub const DEFAULT_STREAM_PERIOD_MS: u64 = 100;
pub const DEFAULT_WINDOW_BACK: u64 = 100;
pub const DEFAULT_WINDOW_AHEAD: u64 = 10;
pub const DEFAULT_SEED: u64 = 42;

/// Every tunable the demo drivers read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub pattern: Pattern,
    pub resolution: usize,
    pub frequency: f64,
    pub stream_period_ms: u64,
    pub window_back: u64,
    pub window_ahead: u64,
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            pattern: Pattern::default(),
            resolution: DEFAULT_RESOLUTION,
            frequency: DEFAULT_FREQUENCY,
            stream_period_ms: DEFAULT_STREAM_PERIOD_MS,
            window_back: DEFAULT_WINDOW_BACK,
            window_ahead: DEFAULT_WINDOW_AHEAD,
            seed: DEFAULT_SEED,
        }
    }
}

impl DemoConfig {
    /// Reads a config from a JSON params object and validates it.
    ///
    /// Missing keys take their defaults. `pattern` and `resolution` fail fast
    /// when present with the wrong JSON type; the numeric tunables fall back
    /// to their defaults instead. Out-of-range values are always an error.
    pub fn from_json(params: &Value) -> Result<Self, SurfaceError> {
        let config = Self {
            pattern: read_pattern(params)?,
            resolution: read_resolution(params)?,
            frequency: param_f64(params, "frequency", DEFAULT_FREQUENCY),
            stream_period_ms: param_u64(params, "stream_period_ms", DEFAULT_STREAM_PERIOD_MS),
            window_back: param_u64(params, "window_back", DEFAULT_WINDOW_BACK),
            window_ahead: param_u64(params, "window_ahead", DEFAULT_WINDOW_AHEAD),
            seed: param_u64(params, "seed", DEFAULT_SEED),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        validate_resolution(self.resolution)?;
        validate_frequency(self.frequency)?;
        if self.stream_period_ms == 0 {
            return Err(SurfaceError::InvalidConfig(
                "stream_period_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "pattern": self.pattern.name(),
            "resolution": self.resolution,
            "frequency": self.frequency,
            "stream_period_ms": self.stream_period_ms,
            "window_back": self.window_back,
            "window_ahead": self.window_ahead,
            "seed": self.seed,
        })
    }

    /// Schema describing every key, its type, range, and default.
    pub fn param_schema() -> Value {
        json!({
            "pattern": {
                "type": "string",
                "enum": Pattern::names(),
                "default": Pattern::default().name(),
                "description": "Procedural surface pattern"
            },
            "resolution": {
                "type": "integer",
                "min": SLIDER_MIN_RESOLUTION,
                "max": SLIDER_MAX_RESOLUTION,
                "hard_min": MIN_RESOLUTION,
                "hard_max": MAX_RESOLUTION,
                "default": DEFAULT_RESOLUTION,
                "description": "Grid cells per side"
            },
            "frequency": {
                "type": "number",
                "min": MIN_FREQUENCY,
                "max": MAX_FREQUENCY,
                "default": DEFAULT_FREQUENCY,
                "description": "Ring-wave radial frequency"
            },
            "stream_period_ms": {
                "type": "integer",
                "min": 1,
                "default": DEFAULT_STREAM_PERIOD_MS,
                "description": "Milliseconds between stream points"
            },
            "window_back": {
                "type": "integer",
                "default": DEFAULT_WINDOW_BACK,
                "description": "Samples kept in view behind the newest point"
            },
            "window_ahead": {
                "type": "integer",
                "default": DEFAULT_WINDOW_AHEAD,
                "description": "Empty axis space ahead of the newest point"
            },
            "seed": {
                "type": "integer",
                "default": DEFAULT_SEED,
                "description": "Stream noise seed"
            }
        })
    }
}

fn read_pattern(params: &Value) -> Result<Pattern, SurfaceError> {
    match params.get("pattern") {
        None => Ok(Pattern::default()),
        Some(Value::String(name)) => name.parse(),
        Some(other) => Err(SurfaceError::InvalidPattern(other.to_string())),
    }
}

fn read_resolution(params: &Value) -> Result<usize, SurfaceError> {
    match params.get("resolution") {
        None => Ok(DEFAULT_RESOLUTION),
        Some(value) => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| SurfaceError::InvalidResolution(value.to_string())),
    }
}
