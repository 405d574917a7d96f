//! Editor configuration.
//!
//! Every field has a default, so a shell may pass a partial object (or none
//! at all) and still get the stock behaviour of the editor.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::effects::{CartoonParams, SharpenStrength, TextStyle};
use crate::encode::OutputFormat;
use crate::error::EditError;

/// Tunable parameters of an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Width of the box a freshly loaded image is fitted into.
    pub display_width: u32,
    /// Height of the box a freshly loaded image is fitted into.
    pub display_height: u32,
    /// Downscale loaded images into the display box.
    pub fit_on_load: bool,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    /// Interpolation used by load-time fitting and zoom.
    pub resize_filter: FilterType,
    /// Sharpness factor of "Sharpen +".
    pub sharpen_enhance: f32,
    /// Sharpness factor of "Sharpen -".
    pub sharpen_reduce: f32,
    /// Additive noise is drawn from `[0, noise_amplitude)`.
    pub noise_amplitude: u8,
    pub text: TextStyle,
    pub border_color: [u8; 3],
    pub cartoon: CartoonParams,
    pub erase_radius: u32,
    pub erase_color: [u8; 3],
    /// JPEG export quality (1-100).
    pub jpeg_quality: u8,
    pub default_format: OutputFormat,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            display_width: 600,
            display_height: 400,
            fit_on_load: true,
            zoom_in_factor: 1.25,
            zoom_out_factor: 0.8,
            resize_filter: FilterType::Lanczos3,
            sharpen_enhance: 2.0,
            sharpen_reduce: 0.5,
            noise_amplitude: 50,
            text: TextStyle::default(),
            border_color: [0, 0, 0],
            cartoon: CartoonParams::default(),
            erase_radius: 10,
            erase_color: [255, 255, 255],
            jpeg_quality: 90,
            default_format: OutputFormat::Jpg,
        }
    }
}

impl EditorConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sharpness factor for the requested strength.
    pub fn sharpen_factor(&self, strength: SharpenStrength) -> f32 {
        match strength {
            SharpenStrength::Enhance => self.sharpen_enhance,
            SharpenStrength::Reduce => self.sharpen_reduce,
        }
    }

    /// Reject values no session could work with.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.fit_on_load && (self.display_width == 0 || self.display_height == 0) {
            return Err(EditError::InvalidParameter(format!(
                "display box {}x{} has a zero side",
                self.display_width, self.display_height
            )));
        }
        for (name, factor) in [
            ("zoom_in_factor", self.zoom_in_factor),
            ("zoom_out_factor", self.zoom_out_factor),
        ] {
            if !(factor.is_finite() && factor > 0.0) {
                return Err(EditError::InvalidParameter(format!(
                    "{name} must be positive, got {factor}"
                )));
            }
        }
        for (name, factor) in [
            ("sharpen_enhance", self.sharpen_enhance),
            ("sharpen_reduce", self.sharpen_reduce),
        ] {
            if !(factor.is_finite() && factor >= 0.0) {
                return Err(EditError::InvalidParameter(format!(
                    "{name} must be non-negative, got {factor}"
                )));
            }
        }
        self.cartoon.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::new();
        assert_eq!((config.display_width, config.display_height), (600, 400));
        assert_eq!(config.zoom_in_factor, 1.25);
        assert_eq!(config.zoom_out_factor, 0.8);
        assert_eq!(config.erase_radius, 10);
        assert_eq!(config.default_format, OutputFormat::Jpg);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sharpen_factor() {
        let config = EditorConfig::default();
        assert_eq!(config.sharpen_factor(SharpenStrength::Enhance), 2.0);
        assert_eq!(config.sharpen_factor(SharpenStrength::Reduce), 0.5);
    }

    #[test]
    fn test_validate_rejects_bad_zoom() {
        let mut config = EditorConfig::default();
        config.zoom_out_factor = 0.0;
        assert!(matches!(
            config.validate(),
            Err(EditError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_display_box() {
        let mut config = EditorConfig::default();
        config.display_height = 0;
        assert!(config.validate().is_err());

        // Irrelevant when fitting is off
        config.fit_on_load = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_checks_cartoon_params() {
        let mut config = EditorConfig::default();
        config.cartoon.block_size = 4;
        assert!(matches!(
            config.validate(),
            Err(EditError::InvalidParameter(_))
        ));

        // A window this large would overflow the threshold sums
        config.cartoon.block_size = 4101;
        assert!(matches!(
            config.validate(),
            Err(EditError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_sharpen() {
        let mut config = EditorConfig::default();
        config.sharpen_reduce = -0.5;
        assert!(config.validate().is_err());
    }
}
