//! Unit conversion utilities
//!
//! Label canvases are specified in millimetres and laid out in pixels.
//! Every conversion between the two goes through [`PX_PER_MM`] so the
//! on-screen preview and the printed document stay dimensionally identical.

/// Screen density in pixels per millimetre at 96 DPI.
pub const BASE_PX_PER_MM: f64 = 3.78;

/// Render scale applied on top of the base density.
pub const RENDER_SCALE: f64 = 2.0;

/// Pixels per millimetre used for all label geometry.
pub const PX_PER_MM: f64 = BASE_PX_PER_MM * RENDER_SCALE;

/// Convert a physical length in millimetres to canvas pixels.
pub fn mm_to_px(mm: f64) -> f64 {
    mm * PX_PER_MM
}

/// Convert canvas pixels back to millimetres.
pub fn px_to_mm(px: f64) -> f64 {
    px / PX_PER_MM
}

/// Parse a user-entered length in millimetres.
///
/// Accepts an optional trailing `mm` suffix and a comma decimal separator.
/// Empty input is an error so callers can substitute their own default.
pub fn parse_length_mm(input: &str) -> Result<f64, String> {
    let trimmed = input.trim().trim_end_matches("mm").trim().replace(',', ".");
    if trimmed.is_empty() {
        return Err("Empty length".to_string());
    }

    let value = trimmed.parse::<f64>().map_err(|e| e.to_string())?;
    if !value.is_finite() {
        return Err(format!("Length is not finite: {}", input.trim()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor() {
        assert!((PX_PER_MM - 7.56).abs() < 1e-12);
    }

    #[test]
    fn test_mm_to_px() {
        assert!((mm_to_px(100.0) - 756.0).abs() < 1e-9);
        assert!((mm_to_px(50.0) - 378.0).abs() < 1e-9);
        assert_eq!(mm_to_px(0.0), 0.0);
    }

    #[test]
    fn test_px_to_mm() {
        assert!((px_to_mm(756.0) - 100.0).abs() < 1e-9);
        assert_eq!(px_to_mm(0.0), 0.0);
    }

    #[test]
    fn test_round_trip_large_values() {
        for value in [0.0, 1.0, 20.0, 1234.5, 98765.4321] {
            assert!((mm_to_px(px_to_mm(value)) - value).abs() < 1e-9 * value.max(1.0));
        }
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length_mm("100").unwrap(), 100.0);
        assert_eq!(parse_length_mm("  62.5 mm ").unwrap(), 62.5);
        assert_eq!(parse_length_mm("40,5").unwrap(), 40.5);
    }

    #[test]
    fn test_parse_length_invalid() {
        assert!(parse_length_mm("").is_err());
        assert!(parse_length_mm("abc").is_err());
        assert!(parse_length_mm("inf").is_err());
    }
}
