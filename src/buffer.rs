//! Page-packed monochrome frame buffer.
//!
//! [`PixelBuffer`] stores one byte per (column, page) cell, pages laid out
//! one after another:
//!
//! ```text
//!            x = 0      x = 1            x = width-1
//! page 0   [ byte 0 ] [ byte 1 ] ... [ byte width-1 ]     rows 0..=7
//! page 1   [ byte w ] [ ...    ] ... [ byte 2w-1    ]     rows 8..=15
//! ...
//! ```
//!
//! Bit `b` (LSB = 0) of the byte for `(x, page)` is pixel `(x, page*8 + b)`.
//! This is exactly the byte order the controller expects in GRAM, so a page
//! can be streamed to the display without repacking.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, Size},
};
use heapless::Vec;

use crate::config::{check_geometry, page_count, GRAM_PAGES, GRAM_WIDTH};
use crate::error::ConfigError;

/// Largest buffer any valid panel needs: the whole GRAM.
pub const BUFFER_CAPACITY: usize = GRAM_WIDTH as usize * GRAM_PAGES;

/// Monochrome frame buffer in vertical byte-strip layout.
///
/// Storage is fixed-capacity, so a buffer never allocates. Pixels outside
/// the logical `width` × `height` are silently clipped.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pages: usize,
    data: Vec<u8, BUFFER_CAPACITY>,
}

impl PixelBuffer {
    /// Create a cleared buffer for a `width` × `height` panel.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidWidth`] / [`ConfigError::InvalidHeight`] if the
    /// panel does not fit inside the 132×64 GRAM.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        check_geometry(width, height)?;

        let pages = page_count(height);
        let mut data = Vec::new();
        data.resize(width as usize * pages, 0)
            .map_err(|()| ConfigError::InvalidWidth(width))?;

        Ok(Self {
            width: width as usize,
            height: height as usize,
            pages,
            data,
        })
    }

    /// Logical width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Logical height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of 8-row pages, `ceil(height / 8)`.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// The whole buffer, page 0 first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The `width` bytes of one page, or `None` past the last page.
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        if page >= self.pages {
            return None;
        }
        let start = page * self.width;
        Some(&self.data[start..start + self.width])
    }

    /// Iterate over the pages in increasing order.
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks(self.width)
    }

    /// Set or clear every pixel.
    pub fn fill(&mut self, on: bool) {
        self.data.fill(if on { 0xFF } else { 0x00 });
    }

    /// Clear every pixel.
    pub fn clear(&mut self) {
        self.fill(false);
    }

    /// Set a single pixel. Coordinates outside the panel are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y / 8) * self.width + x;
        let mask = 1u8 << (y % 8);
        if on {
            self.data[index] |= mask;
        } else {
            self.data[index] &= !mask;
        }
    }

    /// Read a single pixel, or `None` outside the panel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte = self.data[(y / 8) * self.width + x];
        Some(byte & (1 << (y % 8)) != 0)
    }
}

impl core::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for PixelBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Negative coordinates are off-panel.
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.is_on());
        Ok(())
    }
}
