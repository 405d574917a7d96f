//! The editing session: current image, its history and command dispatch.
//!
//! Every transform follows the same sequence:
//!
//! 1. check an image is loaded and validate the parameters
//! 2. push a snapshot of the current image onto the history
//! 3. run the effect primitive on the current image
//! 4. store the result as the new current image
//!
//! A request rejected in step 1 leaves the session untouched, including
//! sizes a transform could not produce (zoom and border are checked against
//! the dimension limit here). If step 3 still fails the snapshot stays on
//! the history and the current image is left as it was, so a rollback
//! returns the pre-transform state.

use std::path::Path;
use std::sync::Arc;

use crate::command::{Command, ExportedImage, Outcome};
use crate::config::EditorConfig;
use crate::decode::{decode_file, decode_image, resize_by_factor, resize_to_fit, scaled_dimensions};
use crate::effects::{
    add_border, add_noise, apply_sharpness, bordered_dimensions, cartoonize, draw_text,
    erase_at_point, load_font, parse_border_size, EffectError, SharpenStrength,
};
use crate::encode::{encode_image, output_file_name, OutputFormat};
use crate::error::EditError;
use crate::history::EditHistory;
use crate::mapping::{map_to_image_space, WidgetSize};
use crate::state::ImageState;

/// An image editing session owned by a single shell.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    config: EditorConfig,
    current: Option<ImageState>,
    history: EditHistory,
    font: Option<Arc<[u8]>>,
    /// Radius of an armed point erase waiting for the next click.
    pending_erase: Option<u32>,
}

impl EditSession {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a custom configuration.
    pub fn with_config(config: EditorConfig) -> Result<Self, EditError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The current image, if one has been loaded.
    pub fn current_or_none(&self) -> Option<&ImageState> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn can_rollback(&self) -> bool {
        self.history.can_rollback()
    }

    /// Set the font used by text overlays.
    ///
    /// The bytes are parsed once here so a bad font is reported when it is
    /// chosen, not when text is first drawn.
    pub fn set_font(&mut self, font_data: Vec<u8>) -> Result<(), EditError> {
        load_font(&font_data)?;
        self.font = Some(Arc::from(font_data));
        Ok(())
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Run a command and report what it did.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, EditError> {
        let outcome = match command {
            Command::Load { bytes } => {
                let image = self.load(&bytes)?;
                Outcome::Loaded {
                    width: image.width,
                    height: image.height,
                }
            }
            Command::Resize { factor } => applied(self.resize(factor)?),
            Command::Sharpen(strength) => applied(self.sharpen(strength)?),
            Command::AddNoise { seed } => applied(self.add_noise(seed)?),
            Command::AddText { text } => applied(self.add_text(&text)?),
            Command::AddBorder { size } => applied(self.add_border(size)?),
            Command::Cartoonize => applied(self.cartoonize()?),
            Command::PointErase {
                x,
                y,
                widget,
                radius,
            } => {
                self.point_erase(x, y, widget, radius)?;
                let image = self.current()?;
                applied(image)
            }
            Command::Rollback => {
                let image = self.rollback()?;
                Outcome::RolledBack {
                    width: image.width,
                    height: image.height,
                }
            }
            Command::Save { name, format } => Outcome::Saved(self.save(&name, format)?),
        };
        Ok(outcome)
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Decode file bytes and make them the current image.
    ///
    /// On success the history is empty and any armed point erase is
    /// cancelled. On failure the session is unchanged.
    pub fn load(&mut self, bytes: &[u8]) -> Result<&ImageState, EditError> {
        let decoded = decode_image(bytes)?;
        self.install(decoded)
    }

    /// Read and decode a file from disk.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<&ImageState, EditError> {
        let decoded = decode_file(path)?;
        self.install(decoded)
    }

    fn install(&mut self, decoded: ImageState) -> Result<&ImageState, EditError> {
        let image = if self.config.fit_on_load {
            resize_to_fit(
                &decoded,
                self.config.display_width,
                self.config.display_height,
                self.config.resize_filter,
            )?
        } else {
            decoded
        };

        self.history.clear();
        self.pending_erase = None;
        Ok(&*self.current.insert(image))
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// Scale the current image by `factor`.
    pub fn resize(&mut self, factor: f64) -> Result<&ImageState, EditError> {
        let image = self.current()?;
        if scaled_dimensions(image.width, image.height, factor).is_none() {
            return Err(EditError::InvalidParameter(format!(
                "resize factor {factor} on a {}x{} image gives no usable size",
                image.width, image.height
            )));
        }

        let filter = self.config.resize_filter;
        self.apply(|image| Ok(resize_by_factor(image, factor, filter)?))
    }

    pub fn zoom_in(&mut self) -> Result<&ImageState, EditError> {
        self.resize(self.config.zoom_in_factor)
    }

    pub fn zoom_out(&mut self) -> Result<&ImageState, EditError> {
        self.resize(self.config.zoom_out_factor)
    }

    pub fn sharpen(&mut self, strength: SharpenStrength) -> Result<&ImageState, EditError> {
        self.current()?;
        let factor = self.config.sharpen_factor(strength);
        self.apply(|image| Ok(apply_sharpness(image, factor)?))
    }

    /// Add seeded noise with the configured amplitude.
    pub fn add_noise(&mut self, seed: u64) -> Result<&ImageState, EditError> {
        self.current()?;
        let amplitude = self.config.noise_amplitude;
        self.apply(|image| Ok(add_noise(image, amplitude, seed)))
    }

    /// Draw `text` with the session font at the configured position.
    pub fn add_text(&mut self, text: &str) -> Result<&ImageState, EditError> {
        self.current()?;
        if text.trim().is_empty() {
            return Err(EffectError::EmptyText.into());
        }
        let font = self
            .font
            .clone()
            .ok_or_else(|| EditError::InvalidParameter("no font has been set".to_string()))?;

        let style = self.config.text;
        self.apply(|image| Ok(draw_text(image, text, &font, &style)?))
    }

    /// Add a border of `size` pixels in the configured color.
    pub fn add_border(&mut self, size: u32) -> Result<&ImageState, EditError> {
        let image = self.current()?;
        if bordered_dimensions(image.width, image.height, size).is_none() {
            return Err(EffectError::BorderTooLarge {
                width: image.width,
                height: image.height,
                border: size,
            }
            .into());
        }

        let color = self.config.border_color;
        self.apply(|image| Ok(add_border(image, size, color)?))
    }

    /// Parse a border size typed by the user, then add the border.
    pub fn add_border_text(&mut self, size: &str) -> Result<&ImageState, EditError> {
        self.current()?;
        let size = parse_border_size(size)?;
        self.add_border(size)
    }

    pub fn cartoonize(&mut self) -> Result<&ImageState, EditError> {
        self.current()?;
        let params = self.config.cartoon;
        self.apply(|image| Ok(cartoonize(image, &params)?))
    }

    /// Erase a disc under a click given in widget space.
    ///
    /// Returns the image-space point that was erased.
    pub fn point_erase(
        &mut self,
        x: f64,
        y: f64,
        widget: WidgetSize,
        radius: Option<u32>,
    ) -> Result<(u32, u32), EditError> {
        let image = self.current()?;
        let (px, py) = map_to_image_space(
            x,
            y,
            image.width,
            image.height,
            widget.width,
            widget.height,
        )?;

        let radius = radius.unwrap_or(self.config.erase_radius);
        let color = self.config.erase_color;
        self.apply(|image| Ok(erase_at_point(image, px, py, radius, color)))?;
        Ok((px, py))
    }

    // ========================================================================
    // Point interaction
    // ========================================================================

    /// Arm a point erase; the next [`click`](Self::click) performs it.
    ///
    /// Other commands stay available while armed.
    pub fn begin_point_erase(&mut self, radius: Option<u32>) -> Result<(), EditError> {
        self.current()?;
        self.pending_erase = Some(radius.unwrap_or(self.config.erase_radius));
        Ok(())
    }

    pub fn is_point_erase_pending(&self) -> bool {
        self.pending_erase.is_some()
    }

    /// Disarm a pending point erase. Returns whether one was armed.
    pub fn cancel_point_erase(&mut self) -> bool {
        self.pending_erase.take().is_some()
    }

    /// Deliver a click on the display widget.
    ///
    /// Returns `Ok(None)` when nothing is armed. A click with a degenerate
    /// widget size is rejected and leaves the erase armed.
    pub fn click(
        &mut self,
        x: f64,
        y: f64,
        widget: WidgetSize,
    ) -> Result<Option<(u32, u32)>, EditError> {
        let Some(radius) = self.pending_erase else {
            return Ok(None);
        };
        let point = self.point_erase(x, y, widget, Some(radius))?;
        self.pending_erase = None;
        Ok(Some(point))
    }

    // ========================================================================
    // Rollback and save
    // ========================================================================

    /// Restore the most recent snapshot.
    ///
    /// On `NoPriorState` the current image is left as it was.
    pub fn rollback(&mut self) -> Result<&ImageState, EditError> {
        let previous = self.history.rollback()?;
        self.pending_erase = None;
        Ok(&*self.current.insert(previous))
    }

    /// Encode the current image for saving as `"{name}.{format}"`.
    pub fn save(&self, name: &str, format: OutputFormat) -> Result<ExportedImage, EditError> {
        let image = self.current()?;
        if name.trim().is_empty() {
            return Err(EditError::InvalidParameter(
                "output name is empty".to_string(),
            ));
        }

        let bytes = encode_image(image, format, self.config.jpeg_quality)?;
        Ok(ExportedImage {
            file_name: output_file_name(name, format),
            format,
            bytes,
        })
    }

    /// Like [`save`](Self::save) with a format typed by the user.
    pub fn save_as(&self, name: &str, format: &str) -> Result<ExportedImage, EditError> {
        let format = format.parse::<OutputFormat>()?;
        self.save(name, format)
    }

    fn current(&self) -> Result<&ImageState, EditError> {
        self.current.as_ref().ok_or(EditError::NoImageLoaded)
    }

    /// Snapshot the current image, then replace it with `transform`'s result.
    fn apply<F>(&mut self, transform: F) -> Result<&ImageState, EditError>
    where
        F: FnOnce(&ImageState) -> Result<ImageState, EditError>,
    {
        let current = self.current.as_mut().ok_or(EditError::NoImageLoaded)?;
        self.history.snapshot(current);
        *current = transform(current)?;
        Ok(&*current)
    }
}

fn applied(image: &ImageState) -> Outcome {
    Outcome::Applied {
        width: image.width,
        height: image.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::NoPriorState;
    use crate::mapping::DegenerateWidget;
    use crate::state::MAX_DIMENSION;

    const TEST_FONT: &[u8] = include_bytes!("../tests/fixtures/DejaVuSans.ttf");

    fn gradient(width: u32, height: u32) -> ImageState {
        let mut img = ImageState::filled(width, height, [0, 0, 0]);
        for y in 0..height {
            for x in 0..width {
                img.set_pixel(x, y, [(x * 7) as u8, (y * 11) as u8, ((x + y) * 3) as u8]);
            }
        }
        img
    }

    fn png_bytes(image: &ImageState) -> Vec<u8> {
        encode_image(image, OutputFormat::Png, 90).unwrap()
    }

    fn loaded_session(width: u32, height: u32) -> (EditSession, ImageState) {
        let original = gradient(width, height);
        let mut session = EditSession::new();
        session.load(&png_bytes(&original)).unwrap();
        (session, original)
    }

    #[test]
    fn test_load_sets_current_with_empty_history() {
        let (session, original) = loaded_session(40, 30);
        assert_eq!(session.current_or_none(), Some(&original));
        assert!(session.history().is_empty());
        assert!(!session.can_rollback());
    }

    #[test]
    fn test_load_fits_display_box() {
        let mut session = EditSession::new();
        let big = ImageState::filled(1200, 400, [50, 60, 70]);
        let image = session.load(&png_bytes(&big)).unwrap();
        assert_eq!((image.width, image.height), (600, 200));
    }

    #[test]
    fn test_load_without_fit_keeps_size() {
        let config = EditorConfig {
            fit_on_load: false,
            ..EditorConfig::default()
        };
        let mut session = EditSession::with_config(config).unwrap();
        let big = ImageState::filled(700, 10, [1, 2, 3]);
        let image = session.load(&png_bytes(&big)).unwrap();
        assert_eq!((image.width, image.height), (700, 10));
    }

    #[test]
    fn test_failed_load_leaves_session_unchanged() {
        let (mut session, original) = loaded_session(20, 20);
        session.add_noise(1).unwrap();
        let before = session.current_or_none().cloned();

        let result = session.load(b"definitely not an image");
        assert!(matches!(result, Err(EditError::Decode(_))));
        assert_eq!(session.current_or_none().cloned(), before);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().peek(), Some(&original));
    }

    #[test]
    fn test_load_path_missing_file() {
        let mut session = EditSession::new();
        let result = session.load_path("/nonexistent/photo.jpg");
        assert!(matches!(result, Err(EditError::Decode(_))));
        assert!(session.current_or_none().is_none());
    }

    #[test]
    fn test_reload_clears_history() {
        let (mut session, _) = loaded_session(20, 20);
        session.zoom_in().unwrap();
        session.cartoonize().unwrap();
        assert_eq!(session.history().len(), 2);

        let other = gradient(10, 10);
        session.load(&png_bytes(&other)).unwrap();
        assert!(session.history().is_empty());
        assert_eq!(session.current_or_none(), Some(&other));
    }

    #[test]
    fn test_transforms_before_load_are_rejected() {
        let mut session = EditSession::new();
        assert!(matches!(session.zoom_in(), Err(EditError::NoImageLoaded)));
        assert!(matches!(
            session.sharpen(SharpenStrength::Enhance),
            Err(EditError::NoImageLoaded)
        ));
        assert!(matches!(session.add_noise(0), Err(EditError::NoImageLoaded)));
        assert!(matches!(session.add_text("hi"), Err(EditError::NoImageLoaded)));
        assert!(matches!(session.add_border(5), Err(EditError::NoImageLoaded)));
        assert!(matches!(session.cartoonize(), Err(EditError::NoImageLoaded)));
        assert!(matches!(
            session.save("out", OutputFormat::Png),
            Err(EditError::NoImageLoaded)
        ));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_n_transforms_then_n_rollbacks_restore_original() {
        let (mut session, original) = loaded_session(30, 20);

        session.zoom_in().unwrap();
        session.sharpen(SharpenStrength::Enhance).unwrap();
        session.add_noise(42).unwrap();
        session.add_border(3).unwrap();
        session.cartoonize().unwrap();
        session
            .point_erase(5.0, 5.0, WidgetSize::new(30.0, 20.0), None)
            .unwrap();
        session.zoom_out().unwrap();
        assert_eq!(session.history().len(), 7);

        for _ in 0..7 {
            session.rollback().unwrap();
        }
        assert_eq!(session.current_or_none(), Some(&original));

        let result = session.rollback();
        assert!(matches!(result, Err(EditError::NoPriorState(NoPriorState))));
        assert_eq!(session.current_or_none(), Some(&original));
    }

    #[test]
    fn test_rollback_restores_previous_state() {
        let (mut session, original) = loaded_session(16, 16);
        session.add_border(2).unwrap();
        assert_eq!(session.current_or_none().unwrap().width, 20);

        let restored = session.rollback().unwrap();
        assert_eq!(restored, &original);
    }

    #[test]
    fn test_rollback_before_load() {
        let mut session = EditSession::new();
        assert!(matches!(session.rollback(), Err(EditError::NoPriorState(_))));
        assert!(session.current_or_none().is_none());
    }

    #[test]
    fn test_zoom_dimensions() {
        let (mut session, _) = loaded_session(100, 80);
        let zoomed = session.zoom_in().unwrap();
        assert_eq!((zoomed.width, zoomed.height), (125, 100));
        let zoomed = session.zoom_out().unwrap();
        assert_eq!((zoomed.width, zoomed.height), (100, 80));
    }

    #[test]
    fn test_invalid_resize_is_rejected_before_snapshot() {
        let (mut session, original) = loaded_session(4, 4);
        for factor in [0.0, -1.0, f64::NAN, 0.1] {
            let result = session.resize(factor);
            assert!(matches!(result, Err(EditError::InvalidParameter(_))));
        }
        assert!(session.history().is_empty());
        assert_eq!(session.current_or_none(), Some(&original));
    }

    #[test]
    fn test_text_parameter_errors_touch_nothing() {
        let (mut session, original) = loaded_session(10, 10);

        assert!(matches!(
            session.add_text("   "),
            Err(EditError::InvalidParameter(_))
        ));
        // No font set yet
        assert!(matches!(
            session.add_text("hello"),
            Err(EditError::InvalidParameter(_))
        ));
        assert!(session.history().is_empty());
        assert_eq!(session.current_or_none(), Some(&original));
    }

    #[test]
    fn test_set_font_rejects_garbage() {
        let mut session = EditSession::new();
        let result = session.set_font(b"not a font".to_vec());
        assert!(matches!(result, Err(EditError::InvalidParameter(_))));
        assert!(!session.has_font());
    }

    #[test]
    fn test_border_text_parsing() {
        let (mut session, original) = loaded_session(10, 10);
        assert!(matches!(
            session.add_border_text("ten"),
            Err(EditError::InvalidParameter(_))
        ));
        assert!(session.history().is_empty());

        let bordered = session.add_border_text("5").unwrap();
        assert_eq!((bordered.width, bordered.height), (20, 20));
        assert_eq!(session.history().peek(), Some(&original));
    }

    #[test]
    fn test_oversized_border_is_rejected_before_snapshot() {
        let (mut session, original) = loaded_session(10, 10);
        session.add_border(2).unwrap();
        let bordered = session.current_or_none().cloned();

        for size in [MAX_DIMENSION, u32::MAX] {
            let result = session.add_border(size);
            assert!(matches!(result, Err(EditError::InvalidParameter(_))));
        }
        assert_eq!(session.current_or_none().cloned(), bordered);
        assert_eq!(session.history().len(), 1);

        // One transform, one rollback
        assert_eq!(session.rollback().unwrap(), &original);
        assert!(!session.can_rollback());
    }

    #[test]
    fn test_add_text_draws_and_rolls_back() {
        let (mut session, original) = loaded_session(200, 100);
        session.set_font(TEST_FONT.to_vec()).unwrap();
        assert!(session.has_font());

        let drawn = session.add_text("Hi").unwrap().clone();
        assert_eq!((drawn.width, drawn.height), (200, 100));
        let red = drawn
            .pixels
            .chunks_exact(3)
            .filter(|p| *p == [255, 0, 0])
            .count();
        assert!(red > 0, "no glyph pixels were drawn");
        assert_eq!(session.history().len(), 1);

        assert_eq!(session.rollback().unwrap(), &original);
    }

    #[test]
    fn test_add_text_dispatch() {
        let (mut session, _) = loaded_session(120, 80);
        session.set_font(TEST_FONT.to_vec()).unwrap();
        let outcome = session
            .dispatch(Command::AddText {
                text: "Enhance".into(),
            })
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Applied {
                width: 120,
                height: 80
            }
        );
    }

    #[test]
    fn test_noise_is_reproducible() {
        let (mut a, _) = loaded_session(12, 12);
        let (mut b, _) = loaded_session(12, 12);
        assert_eq!(a.add_noise(7).unwrap(), b.add_noise(7).unwrap());
    }

    #[test]
    fn test_point_erase_maps_click() {
        let (mut session, _) = loaded_session(100, 80);
        // Widget shows the image at half size
        let point = session
            .point_erase(25.0, 20.0, WidgetSize::new(50.0, 40.0), Some(2))
            .unwrap();
        assert_eq!(point, (50, 40));

        let image = session.current_or_none().unwrap();
        assert_eq!(image.pixel(50, 40), Some([255, 255, 255]));
        assert_eq!(image.pixel(52, 40), Some([255, 255, 255]));
        assert_ne!(image.pixel(53, 40), Some([255, 255, 255]));
    }

    #[test]
    fn test_point_erase_degenerate_widget() {
        let (mut session, original) = loaded_session(10, 10);
        let result = session.point_erase(1.0, 1.0, WidgetSize::new(0.0, 10.0), None);
        assert!(matches!(
            result,
            Err(EditError::DegenerateWidget(DegenerateWidget { .. }))
        ));
        assert!(session.history().is_empty());
        assert_eq!(session.current_or_none(), Some(&original));
    }

    #[test]
    fn test_click_without_armed_erase_does_nothing() {
        let (mut session, original) = loaded_session(10, 10);
        let result = session.click(5.0, 5.0, WidgetSize::new(10.0, 10.0)).unwrap();
        assert_eq!(result, None);
        assert!(session.history().is_empty());
        assert_eq!(session.current_or_none(), Some(&original));
    }

    #[test]
    fn test_armed_erase_is_consumed_by_click() {
        let (mut session, _) = loaded_session(20, 20);
        session.begin_point_erase(None).unwrap();
        assert!(session.is_point_erase_pending());

        // Other commands stay available while armed
        session.add_noise(3).unwrap();
        assert!(session.is_point_erase_pending());

        let point = session.click(10.0, 10.0, WidgetSize::new(20.0, 20.0)).unwrap();
        assert_eq!(point, Some((10, 10)));
        assert!(!session.is_point_erase_pending());
        assert_eq!(session.history().len(), 2);

        // A second click is not an erase
        assert_eq!(
            session.click(1.0, 1.0, WidgetSize::new(20.0, 20.0)).unwrap(),
            None
        );
    }

    #[test]
    fn test_degenerate_click_keeps_erase_armed() {
        let (mut session, _) = loaded_session(20, 20);
        session.begin_point_erase(Some(1)).unwrap();
        assert!(session.click(1.0, 1.0, WidgetSize::new(-5.0, 20.0)).is_err());
        assert!(session.is_point_erase_pending());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_cancel_and_rollback_disarm() {
        let (mut session, _) = loaded_session(20, 20);
        assert!(matches!(
            EditSession::new().begin_point_erase(None),
            Err(EditError::NoImageLoaded)
        ));

        session.begin_point_erase(None).unwrap();
        assert!(session.cancel_point_erase());
        assert!(!session.cancel_point_erase());

        session.cartoonize().unwrap();
        session.begin_point_erase(None).unwrap();
        session.rollback().unwrap();
        assert!(!session.is_point_erase_pending());
    }

    #[test]
    fn test_save_does_not_mutate() {
        let (mut session, _) = loaded_session(12, 8);
        session.add_noise(9).unwrap();
        let before = session.current_or_none().cloned();

        let export = session.save("enhanced_image", OutputFormat::Png).unwrap();
        assert_eq!(export.file_name, "enhanced_image.png");
        assert_eq!(&export.bytes[1..4], b"PNG");
        assert_eq!(session.current_or_none().cloned(), before);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_save_as_parses_format() {
        let (session, _) = loaded_session(8, 8);
        let export = session.save_as("out", "WEBP").unwrap();
        assert_eq!(export.file_name, "out.webp");
        assert_eq!(export.format, OutputFormat::Webp);

        let result = session.save_as("out", "gif");
        assert!(matches!(result, Err(EditError::UnsupportedFormat(ref f)) if f == "gif"));

        let result = session.save_as("  ", "png");
        assert!(matches!(result, Err(EditError::InvalidParameter(_))));
    }

    #[test]
    fn test_saved_png_round_trips_through_load() {
        let (session, original) = loaded_session(15, 9);
        let export = session.save("copy", OutputFormat::Png).unwrap();

        let mut other = EditSession::new();
        assert_eq!(other.load(&export.bytes).unwrap(), &original);
    }

    #[test]
    fn test_with_config_validates() {
        let config = EditorConfig {
            zoom_in_factor: -2.0,
            ..EditorConfig::default()
        };
        assert!(matches!(
            EditSession::with_config(config),
            Err(EditError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_dispatch_sequence() {
        let original = gradient(40, 32);
        let mut session = EditSession::new();

        let outcome = session
            .dispatch(Command::Load {
                bytes: png_bytes(&original),
            })
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Loaded {
                width: 40,
                height: 32
            }
        );

        let outcome = session.dispatch(Command::Resize { factor: 0.5 }).unwrap();
        assert_eq!(
            outcome,
            Outcome::Applied {
                width: 20,
                height: 16
            }
        );

        session
            .dispatch(Command::Sharpen(SharpenStrength::Reduce))
            .unwrap();
        session.dispatch(Command::AddBorder { size: 2 }).unwrap();
        session
            .dispatch(Command::PointErase {
                x: 0.0,
                y: 0.0,
                widget: WidgetSize::new(24.0, 20.0),
                radius: None,
            })
            .unwrap();
        assert_eq!(session.history().len(), 4);

        let outcome = session
            .dispatch(Command::Save {
                name: "result".into(),
                format: OutputFormat::Jpg,
            })
            .unwrap();
        match outcome {
            Outcome::Saved(export) => assert_eq!(export.file_name, "result.jpg"),
            other => panic!("unexpected outcome: {:?}", other),
        }

        for _ in 0..4 {
            session.dispatch(Command::Rollback).unwrap();
        }
        assert_eq!(session.current_or_none(), Some(&original));
        assert!(matches!(
            session.dispatch(Command::Rollback),
            Err(EditError::NoPriorState(_))
        ));
    }
}
