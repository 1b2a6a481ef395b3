//! Panel configuration and GRAM geometry.
//!
//! The SH1106 GRAM is always 132 columns × 64 rows regardless of the panel
//! glued on top of it. [`DisplayConfig`] describes the panel; everything
//! the flush needs to place it inside GRAM (column offset, page count) is
//! derived from it.

use crate::error::ConfigError;

// ── GRAM geometry ────────────────────────────────────────────────────────

/// Number of GRAM columns.
pub const GRAM_WIDTH: u32 = 132;

/// Number of GRAM rows.
pub const GRAM_HEIGHT: u32 = 64;

/// Number of 8-row pages in GRAM.
pub const GRAM_PAGES: usize = (GRAM_HEIGHT / 8) as usize;

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Panel geometry and power configuration.
///
/// Immutable once handed to the driver. [`DisplayConfig::default()`] is
/// the common 128×64 module running from the internal charge pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Logical width in pixels, `1..=132`. Default: 128.
    pub width: u32,
    /// Logical height in pixels, `1..=64`. Default: 64.
    pub height: u32,
    /// `true` when the panel is driven from an external high-voltage
    /// supply, which disables the internal charge pump. Default: `false`.
    pub external_vcc: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            external_vcc: false,
        }
    }
}

impl DisplayConfig {
    /// Configuration for a `width` × `height` panel on the internal charge
    /// pump.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            external_vcc: false,
        }
    }

    /// Select the external VCC supply.
    pub const fn with_external_vcc(mut self, external_vcc: bool) -> Self {
        self.external_vcc = external_vcc;
        self
    }

    /// Check that the panel fits inside GRAM.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidWidth`] if `width` is not in `1..=132`,
    /// [`ConfigError::InvalidHeight`] if `height` is not in `1..=64`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_geometry(self.width, self.height)
    }

    /// First GRAM column of the panel: `(132 - width) / 2`.
    ///
    /// Saturates to 0 for widths wider than GRAM; such configurations are
    /// rejected by [`validate()`](Self::validate).
    pub fn column_offset(&self) -> u8 {
        (GRAM_WIDTH.saturating_sub(self.width) / 2) as u8
    }

    /// Number of pages covering the panel: `ceil(height / 8)`.
    pub fn page_count(&self) -> usize {
        page_count(self.height)
    }
}

/// Number of pages needed for `height` rows.
pub(crate) fn page_count(height: u32) -> usize {
    height.div_ceil(8) as usize
}

/// Shared geometry check for [`DisplayConfig`] and
/// [`PixelBuffer`](crate::PixelBuffer).
pub(crate) fn check_geometry(width: u32, height: u32) -> Result<(), ConfigError> {
    if width == 0 || width > GRAM_WIDTH {
        return Err(ConfigError::InvalidWidth(width));
    }
    if height == 0 || height > GRAM_HEIGHT {
        return Err(ConfigError::InvalidHeight(height));
    }
    Ok(())
}
