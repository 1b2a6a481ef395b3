//! SH1106 controller: initialisation, page-mapped flush and display control.
//!
//! [`Sh1106`] owns a [`PixelBuffer`] and a transport, and manages the
//! display lifecycle: construction without bus traffic, explicit
//! initialisation, and full-frame flushes.

use core::convert::Infallible;

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, Size},
    primitives::Rectangle,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiBus;

use crate::buffer::PixelBuffer;
use crate::commands::Command;
use crate::config::DisplayConfig;
use crate::error::Sh1106Error;
use crate::interface::{I2cInterface, SpiInterface};

/// Contrast programmed during initialisation, mid-scale.
pub const DEFAULT_CONTRAST: u8 = 0x80;

/// Oscillator setting after reset: divide ratio 1, default frequency.
const CLOCK_DIV: u8 = 0x80;

/// Pre-charge phases for the internal charge pump and for external VCC.
const PRECHARGE_INTERNAL_VCC: u8 = 0xF1;
const PRECHARGE_EXTERNAL_VCC: u8 = 0x22;

/// VCOM deselect level, about 0.83 × VCC.
const VCOM_DESELECT: u8 = 0x30;

/// Driver for an SH1106 OLED panel.
///
/// Generic over the transport `DI`, which is either an [`I2cInterface`],
/// a [`SpiInterface`] or any other [`WriteOnlyDataCommand`].
///
/// # Lifecycle
///
/// 1. [`Sh1106::new()`]: validates the geometry, no bus traffic.
/// 2. [`Sh1106::reset()`]: optional hardware reset pulse (SPI modules).
/// 3. [`Sh1106::init()`]: sends the initialisation sequence and blanks
///    GRAM.
/// 4. Draw into the buffer via `embedded-graphics` or
///    [`buffer_mut()`](Self::buffer_mut).
/// 5. [`Sh1106::show()`]: repaints the whole panel.
///
/// [`Sh1106::new_i2c()`] and [`Sh1106::new_spi()`] run steps 1–3 in one
/// call.
///
/// All methods take `&mut self`; sharing a display between execution
/// contexts needs an external mutex around draw + show.
pub struct Sh1106<DI> {
    interface: DI,
    buffer: PixelBuffer,
    config: DisplayConfig,
    /// First GRAM column of the panel, fixed at construction.
    column_offset: u8,
    /// Set to `true` after a successful `init()` call.
    initialized: bool,
}

impl<DI> Sh1106<DI>
where
    DI: WriteOnlyDataCommand,
{
    /// Construct an uninitialised driver.
    ///
    /// No bus traffic is generated. You **must** call [`init()`](Self::init)
    /// before any display operation.
    ///
    /// # Errors
    ///
    /// Returns [`Sh1106Error::Config`] if the panel does not fit in the
    /// 132×64 GRAM.
    pub fn new(interface: DI, config: DisplayConfig) -> Result<Self, Sh1106Error> {
        config.validate()?;
        let buffer = PixelBuffer::new(config.width, config.height)?;
        let column_offset = config.column_offset();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "SH1106 {}x{}: {} pages at column {}",
            config.width,
            config.height,
            buffer.page_count(),
            column_offset
        );

        Ok(Self {
            interface,
            buffer,
            config,
            column_offset,
            initialized: false,
        })
    }

    /// Pulse the reset line.
    ///
    /// RST high for 1 ms, low for 10 ms, then high with a 100 ms settle
    /// before the controller accepts commands. Clears the initialised flag;
    /// call [`init()`](Self::init) afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Sh1106Error::Transport`] with [`DisplayError::RSError`] if
    /// the pin cannot be driven.
    pub fn reset<RST, D>(&mut self, rst: &mut RST, delay: &mut D) -> Result<(), Sh1106Error>
    where
        RST: OutputPin,
        D: DelayNs,
    {
        #[cfg(feature = "defmt")]
        defmt::debug!("SH1106 hardware reset");

        self.initialized = false;

        rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(1);
        rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(10);
        rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(100);
        Ok(())
    }

    /// Initialise the controller.
    ///
    /// Sends the power-up command sequence, then clears the buffer and
    /// flushes it so no stale GRAM content is ever shown. Sets
    /// `initialized = true` only if every write succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`Sh1106Error::Transport`] on the first failed write. The
    /// sequence is not retried and the driver stays uninitialised.
    pub fn init(&mut self) -> Result<(), Sh1106Error> {
        self.initialized = false;

        let result = self.send_init_sequence().and_then(|()| {
            self.buffer.clear();
            self.flush_pages()
        });
        if let Err(e) = result {
            #[cfg(feature = "defmt")]
            defmt::error!("SH1106 init failed: {}", e);
            return Err(e);
        }

        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!("SH1106 initialised");

        Ok(())
    }

    /// Transfer the whole buffer to GRAM, one page at a time.
    ///
    /// Every call repaints every page; there is no dirty tracking.
    ///
    /// # Errors
    ///
    /// Returns [`Sh1106Error::NotInitialized`] before [`init()`](Self::init),
    /// or [`Sh1106Error::Transport`] on the first failed write. Remaining
    /// pages are skipped; call `show()` again to repair the frame.
    pub fn show(&mut self) -> Result<(), Sh1106Error> {
        self.ensure_initialized()?;
        self.flush_pages().map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("SH1106 flush aborted: {}", e);
            e
        })
    }

    /// Turn the panel on.
    pub fn power_on(&mut self) -> Result<(), Sh1106Error> {
        self.command(Command::DisplayOn(true))
    }

    /// Turn the panel off (sleep). GRAM is retained.
    pub fn power_off(&mut self) -> Result<(), Sh1106Error> {
        self.command(Command::DisplayOn(false))
    }

    /// Set the contrast level, 0–255.
    pub fn contrast(&mut self, value: u8) -> Result<(), Sh1106Error> {
        self.command(Command::Contrast(value))
    }

    /// Show GRAM inverted (`true`) or as-is.
    pub fn invert(&mut self, invert: bool) -> Result<(), Sh1106Error> {
        self.command(Command::Invert(invert))
    }

    /// Clear the in-memory buffer.
    ///
    /// Does **not** touch the bus; the panel is unchanged until
    /// [`show()`](Self::show).
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    /// The frame buffer.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// The frame buffer, for direct pixel access.
    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// The configuration the driver was built with.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// First GRAM column the buffer is written to.
    pub fn column_offset(&self) -> u8 {
        self.column_offset
    }

    /// Number of pages written by each [`show()`](Self::show).
    pub fn page_count(&self) -> usize {
        self.buffer.page_count()
    }

    /// Check whether [`init()`](Self::init) has completed.
    ///
    /// No bus traffic is generated.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Consume the driver and return the transport.
    pub fn release(self) -> DI {
        self.interface
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn ensure_initialized(&self) -> Result<(), Sh1106Error> {
        if self.initialized {
            Ok(())
        } else {
            Err(Sh1106Error::NotInitialized)
        }
    }

    fn command(&mut self, command: Command) -> Result<(), Sh1106Error> {
        self.ensure_initialized()?;
        command.send(&mut self.interface)?;
        Ok(())
    }

    fn send_init_sequence(&mut self) -> Result<(), Sh1106Error> {
        let external_vcc = self.config.external_vcc;
        // Heights never exceed 64 once validated.
        let rows = self.config.height as u8;

        let sequence = [
            Command::DisplayOn(false),
            Command::ClockDiv(CLOCK_DIV),
            Command::Multiplex(rows - 1),
            Command::DisplayOffset(0),
            Command::ComPinConfig(rows > 32),
            Command::SegmentRemap(false),
            Command::ReverseComScan(false),
            Command::Contrast(DEFAULT_CONTRAST),
            Command::PreChargePeriod(if external_vcc {
                PRECHARGE_EXTERNAL_VCC
            } else {
                PRECHARGE_INTERNAL_VCC
            }),
            Command::VcomDeselect(VCOM_DESELECT),
            Command::ChargePump(!external_vcc),
            Command::StartLine(0),
            Command::PageAddress(0),
            Command::AllOn(false),
            Command::Invert(false),
            Command::DisplayOn(true),
        ];

        for command in sequence {
            command.send(&mut self.interface)?;
        }
        Ok(())
    }

    /// Page-address, column-address, then the page's bytes, for every page.
    fn flush_pages(&mut self) -> Result<(), Sh1106Error> {
        let lower = self.column_offset & 0x0F;
        let upper = self.column_offset >> 4;

        for (page, row) in self.buffer.pages().enumerate() {
            #[cfg(feature = "defmt")]
            defmt::trace!("SH1106 page {}: {} bytes", page, row.len());

            Command::PageAddress(page as u8).send(&mut self.interface)?;
            Command::LowerColumn(lower).send(&mut self.interface)?;
            Command::HigherColumn(upper).send(&mut self.interface)?;
            self.interface.send_data(DataFormat::U8(row))?;
        }
        Ok(())
    }
}

// ── Transport-specific constructors ──────────────────────────────────────

impl<I2C> Sh1106<I2cInterface<I2C>>
where
    I2C: I2c,
{
    /// Construct and initialise a display on an I2C bus.
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access).
    /// * `address`: 7-bit device address, usually
    ///   [`DEFAULT_I2C_ADDRESS`](crate::DEFAULT_I2C_ADDRESS).
    /// * `config`: panel geometry and VCC source.
    ///
    /// # Errors
    ///
    /// [`Sh1106Error::Config`] for an invalid address or geometry,
    /// [`Sh1106Error::Transport`] if initialisation fails.
    pub fn new_i2c(i2c: I2C, address: u8, config: DisplayConfig) -> Result<Self, Sh1106Error> {
        let interface = I2cInterface::new(i2c, address)?;
        let mut display = Self::new(interface, config)?;
        display.init()?;
        Ok(display)
    }
}

impl<SPI, DC, CS> Sh1106<SpiInterface<SPI, DC, CS>>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Construct, reset and initialise a display on a 4-wire SPI bus.
    ///
    /// The reset pin and delay are only borrowed for the reset pulse.
    ///
    /// # Errors
    ///
    /// [`Sh1106Error::Config`] for an invalid geometry,
    /// [`Sh1106Error::Transport`] if the reset or initialisation fails.
    pub fn new_spi<RST, D>(
        spi: SPI,
        dc: DC,
        rst: &mut RST,
        cs: CS,
        delay: &mut D,
        config: DisplayConfig,
    ) -> Result<Self, Sh1106Error>
    where
        RST: OutputPin,
        D: DelayNs,
    {
        let interface = SpiInterface::new(spi, dc, cs);
        let mut display = Self::new(interface, config)?;
        display.reset(rst, delay)?;
        display.init()?;
        Ok(display)
    }
}

// ── Drawing ──────────────────────────────────────────────────────────────

impl<DI> OriginDimensions for Sh1106<DI> {
    fn size(&self) -> Size {
        self.buffer.size()
    }
}

impl<DI> DrawTarget for Sh1106<DI> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.buffer.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        DrawTarget::clear(&mut self.buffer, color)
    }
}
