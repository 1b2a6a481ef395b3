//! Transport bindings: I2C and 4-wire SPI.
//!
//! Both bindings implement [`WriteOnlyDataCommand`], so the driver only
//! ever asks for "these bytes are commands" or "these bytes are data". How
//! the controller tells the two apart is the binding's business:
//!
//! - **I2C** prefixes each write with a control byte, [`I2C_COMMAND`]
//!   (`0x00`) or [`I2C_DATA`] (`0x40`).
//! - **SPI** drives the D/C line low for commands and high for data, and
//!   frames every write with chip-select.
//!
//! Payloads are never split or retried here; one call is one bus
//! write.

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::i2c::I2c;
use embedded_hal::spi::{Mode, SpiBus, MODE_0};
use heapless::Vec;

use crate::config::GRAM_WIDTH;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Default 7-bit I2C address of SH1106 modules (SA0 low).
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Alternate 7-bit I2C address (SA0 high).
pub const ALTERNATE_I2C_ADDRESS: u8 = 0x3D;

/// I2C control byte announcing a command stream (Co = 0, D/C# = 0).
pub const I2C_COMMAND: u8 = 0x00;

/// I2C control byte announcing a data stream (Co = 0, D/C# = 1).
pub const I2C_DATA: u8 = 0x40;

/// Largest I2C write: control byte plus one full GRAM page row.
const I2C_FRAME_CAPACITY: usize = GRAM_WIDTH as usize + 1;

/// SPI mode expected by the controller: clock idle low, sample on the
/// rising edge.
pub const SPI_MODE: Mode = MODE_0;

/// Only plain byte slices are supported by either binding.
fn bytes(payload: DataFormat<'_>) -> Result<&[u8], DisplayError> {
    match payload {
        DataFormat::U8(slice) => Ok(slice),
        _ => Err(DisplayError::DataFormatNotImplemented),
    }
}

// ---------------------------------------------------------------------------
// I2C
// ---------------------------------------------------------------------------

/// I2C transport.
///
/// Owns the bus for exclusive access.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Create an I2C transport.
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access).
    /// * `address`: 7-bit device address (typically `0x3C` or `0x3D`).
    ///
    /// # Errors
    /// [`ConfigError::InvalidAddress`] if `address` does not fit in 7 bits.
    pub fn new(i2c: I2C, address: u8) -> Result<Self, ConfigError> {
        if address > 0x7F {
            return Err(ConfigError::InvalidAddress(address));
        }
        Ok(Self { i2c, address })
    }

    /// The configured 7-bit address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Write `[control] + payload` as a single bus write.
    ///
    /// Payloads longer than one GRAM row are rejected with
    /// [`DisplayError::OutOfBoundsError`] before any bus traffic.
    fn write_framed(&mut self, control: u8, payload: &[u8]) -> Result<(), DisplayError> {
        let mut frame: Vec<u8, I2C_FRAME_CAPACITY> = Vec::new();
        frame
            .push(control)
            .map_err(|_| DisplayError::OutOfBoundsError)?;
        frame
            .extend_from_slice(payload)
            .map_err(|()| DisplayError::OutOfBoundsError)?;

        self.i2c.write(self.address, &frame).map_err(|_e| {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "I2C write to {=u8:#x} failed: {}",
                self.address,
                defmt::Debug2Format(&_e)
            );
            DisplayError::BusWriteError
        })
    }
}

impl<I2C> WriteOnlyDataCommand for I2cInterface<I2C>
where
    I2C: I2c,
{
    fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
        let payload = bytes(cmd)?;
        self.write_framed(I2C_COMMAND, payload)
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        let payload = bytes(buf)?;
        self.write_framed(I2C_DATA, payload)
    }
}

// ---------------------------------------------------------------------------
// SPI
// ---------------------------------------------------------------------------

/// Chip-select held low for as long as the guard lives.
///
/// Dropping the guard deasserts CS, so an early return on a bus error still
/// releases the device. [`release()`](Self::release) does the same but
/// reports a pin failure.
struct ChipSelect<'a, CS: OutputPin> {
    cs: Option<&'a mut CS>,
}

impl<'a, CS: OutputPin> ChipSelect<'a, CS> {
    fn assert(cs: &'a mut CS) -> Result<Self, DisplayError> {
        cs.set_low().map_err(|_| DisplayError::CSError)?;
        Ok(Self { cs: Some(cs) })
    }

    fn release(mut self) -> Result<(), DisplayError> {
        match self.cs.take() {
            Some(cs) => cs.set_high().map_err(|_| DisplayError::CSError),
            None => Ok(()),
        }
    }
}

impl<CS: OutputPin> Drop for ChipSelect<'_, CS> {
    fn drop(&mut self) {
        if let Some(cs) = self.cs.take() {
            // Already unwinding from a bus error; that error wins.
            let _ = cs.set_high();
        }
    }
}

/// 4-wire SPI transport: SCK/MOSI on the bus, plus D/C and CS pins.
///
/// The bus must be configured for [`SPI_MODE`]. CS is driven here rather
/// than by an `SpiDevice` so the D/C line is guaranteed to settle before
/// the device is selected.
pub struct SpiInterface<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS> SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a SPI transport.
    ///
    /// # Arguments
    /// * `spi`: SPI bus in mode 0 (takes ownership for exclusive access).
    /// * `dc`: Data/Command select output.
    /// * `cs`: Chip-select output, active low. Should idle high.
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self { spi, dc, cs }
    }

    /// Give the bus and pins back.
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }

    /// Set D/C, then clock `payload` out with CS asserted.
    fn write_framed(&mut self, dc: PinState, payload: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_state(dc).map_err(|_| DisplayError::DCError)?;

        let selected = ChipSelect::assert(&mut self.cs)?;
        self.spi.write(payload).map_err(|_| DisplayError::BusWriteError)?;
        // CS must not rise before the last bit has left the shifter.
        self.spi.flush().map_err(|_| DisplayError::BusWriteError)?;
        selected.release()
    }
}

impl<SPI, DC, CS> WriteOnlyDataCommand for SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
        let payload = bytes(cmd)?;
        self.write_framed(PinState::Low, payload)
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        let payload = bytes(buf)?;
        self.write_framed(PinState::High, payload)
    }
}
