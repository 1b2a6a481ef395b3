//! Error types for the SH1106 driver.

use core::fmt;

use display_interface::DisplayError;

/// Invalid construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width is zero or wider than the 132-column GRAM.
    InvalidWidth(u32),
    /// Height is zero or taller than the 64-row GRAM.
    InvalidHeight(u32),
    /// I2C address does not fit in 7 bits.
    InvalidAddress(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidWidth(w) => write!(f, "Invalid width {} (must be 1-132)", w),
            ConfigError::InvalidHeight(h) => write!(f, "Invalid height {} (must be 1-64)", h),
            ConfigError::InvalidAddress(a) => write!(f, "Invalid I2C address {:#04x}", a),
        }
    }
}

/// Errors that can occur during SH1106 display operations.
///
/// Bus-level failures from either transport arrive wrapped in
/// [`DisplayError`], so this enum is non-generic. Nothing is retried: a
/// failed [`show()`](crate::Sh1106::show) leaves GRAM partially written
/// and the caller is expected to call it again.
#[derive(Debug)]
pub enum Sh1106Error {
    /// Transport failure (NACK, timeout, pin or bus error).
    Transport(DisplayError),
    /// Rejected width, height or address.
    Config(ConfigError),
    /// A device operation was attempted before
    /// [`Sh1106::init()`](crate::Sh1106::init) succeeded.
    NotInitialized,
}

impl From<DisplayError> for Sh1106Error {
    fn from(e: DisplayError) -> Self {
        Sh1106Error::Transport(e)
    }
}

impl From<ConfigError> for Sh1106Error {
    fn from(e: ConfigError) -> Self {
        Sh1106Error::Config(e)
    }
}

impl fmt::Display for Sh1106Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Sh1106Error::Transport(e) => write!(f, "Transport error: {:?}", e),
            Sh1106Error::Config(e) => write!(f, "Configuration error: {}", e),
            Sh1106Error::NotInitialized => write!(f, "Display not initialized"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Sh1106Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Sh1106Error::Transport(e) => defmt::write!(f, "Transport error: {}", defmt::Debug2Format(e)),
            Sh1106Error::Config(e) => defmt::write!(f, "Configuration error: {}", e),
            Sh1106Error::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}
