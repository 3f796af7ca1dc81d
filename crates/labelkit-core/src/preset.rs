//! Named label canvas sizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canvas size shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePreset {
    /// 50 x 25 mm
    Small,
    /// 100 x 50 mm
    #[default]
    Medium,
    /// 150 x 75 mm
    Large,
    /// Free-form width and height
    Custom,
}

impl SizePreset {
    /// Width and height in millimetres, `None` for [`SizePreset::Custom`].
    pub fn dimensions_mm(&self) -> Option<(f64, f64)> {
        match self {
            Self::Small => Some((50.0, 25.0)),
            Self::Medium => Some((100.0, 50.0)),
            Self::Large => Some((150.0, 75.0)),
            Self::Custom => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Custom => "custom",
        }
    }

    /// All presets in menu order.
    pub fn all() -> [SizePreset; 4] {
        [Self::Small, Self::Medium, Self::Large, Self::Custom]
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dimensions_mm() {
            Some((w, h)) => write!(f, "{} ({}x{}mm)", capitalize(self.as_str()), w, h),
            None => write!(f, "Custom"),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl FromStr for SizePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" | "s" => Ok(Self::Small),
            "medium" | "m" => Ok(Self::Medium),
            "large" | "l" => Ok(Self::Large),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Unknown label size: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_dimensions() {
        assert_eq!(SizePreset::Small.dimensions_mm(), Some((50.0, 25.0)));
        assert_eq!(SizePreset::Medium.dimensions_mm(), Some((100.0, 50.0)));
        assert_eq!(SizePreset::Large.dimensions_mm(), Some((150.0, 75.0)));
        assert_eq!(SizePreset::Custom.dimensions_mm(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(SizePreset::Small.to_string(), "Small (50x25mm)");
        assert_eq!(SizePreset::Custom.to_string(), "Custom");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Large".parse::<SizePreset>(), Ok(SizePreset::Large));
        assert!("huge".parse::<SizePreset>().is_err());
    }
}
