//! Blocking OLED display driver for the SH1106 controller.
//!
//! The SH1106 owns a 132×64 GRAM organised as 8 pages of 132 columns, while
//! most panels expose a narrower window (typically 128×64). This crate keeps
//! a page-packed frame buffer sized to the panel and maps it into GRAM on
//! every [`Sh1106::show()`], centring it horizontally.
//!
//! # Architecture
//!
//! - **[`PixelBuffer`]**: monochrome frame buffer in vertical byte-strip
//!   (page) layout. Implements the `embedded-graphics` [`DrawTarget`].
//! - **[`interface`]**: the two transports, [`I2cInterface`] (control-byte
//!   framing) and [`SpiInterface`] (D/C line and chip-select framing). Both
//!   implement [`display_interface::WriteOnlyDataCommand`].
//! - **[`Sh1106`]**: the controller. Owns the buffer and a transport, runs
//!   the initialisation sequence and the page-mapped flush, and issues the
//!   power, contrast and invert commands.
//!
//! # Quick Start
//!
//! ```no_run
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use sh1106_oled_rs::{DisplayConfig, Sh1106, DEFAULT_I2C_ADDRESS};
//!
//! # fn example(i2c: impl embedded_hal::i2c::I2c) -> Result<(), sh1106_oled_rs::Sh1106Error> {
//! let mut oled = Sh1106::new_i2c(i2c, DEFAULT_I2C_ADDRESS, DisplayConfig::default())?;
//!
//! Rectangle::new(Point::new(10, 10), Size::new(20, 12))
//!     .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
//!     .draw(&mut oled)
//!     .ok();
//! oled.show()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`] and `defmt::Format`
//!   implementations on the public config and error types.
//!
//! [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget

#![no_std]

#[cfg(test)]
extern crate std;

pub mod buffer;
pub mod commands;
pub mod config;
pub mod driver;
pub mod error;
pub mod interface;

#[cfg(test)]
mod recorder;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use buffer::PixelBuffer;
pub use config::{DisplayConfig, GRAM_HEIGHT, GRAM_PAGES, GRAM_WIDTH};
pub use driver::Sh1106;
pub use error::{ConfigError, Sh1106Error};
pub use interface::{
    I2cInterface, SpiInterface, ALTERNATE_I2C_ADDRESS, DEFAULT_I2C_ADDRESS, SPI_MODE,
};
