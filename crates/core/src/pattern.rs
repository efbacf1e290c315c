//! Named surface patterns selectable from the UI.

use crate::error::SurfaceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Procedural surface pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    /// Data-like terrain: traveling waves, clusters, ridges, and a gradient,
    /// squeezed into [0.005, 0.045].
    #[default]
    Dataset,
    /// Product of a sine and a cosine traveling diagonally.
    Wave,
    /// Three Gaussian hills orbiting the origin.
    Gaussian,
    /// Hyperbolic paraboloid rotating about the vertical axis.
    Saddle,
    /// Damped radial ripple spreading from the origin.
    Ripple,
}

impl Pattern {
    /// Every pattern, in selector order.
    pub const ALL: [Pattern; 5] = [
        Pattern::Dataset,
        Pattern::Wave,
        Pattern::Gaussian,
        Pattern::Saddle,
        Pattern::Ripple,
    ];

    /// The lowercase name used by selectors and JSON.
    pub fn name(self) -> &'static str {
        match self {
            Pattern::Dataset => "dataset",
            Pattern::Wave => "wave",
            Pattern::Gaussian => "gaussian",
            Pattern::Saddle => "saddle",
            Pattern::Ripple => "ripple",
        }
    }

    /// Names of all patterns, in selector order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| SurfaceError::InvalidPattern(s.to_owned()))
    }
}
