//! SH1106 command opcodes.
//!
//! Most commands are a single byte with the operand OR'd into the low bits
//! (`SET_PAGE_ADDRESS | page`). A handful take a second operand byte
//! (`SET_CONTRAST, value`). [`Command`] encodes both shapes and sends each
//! command as one command-stream write.

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};

// ---------------------------------------------------------------------------
// Fundamental commands
// ---------------------------------------------------------------------------

/// Display off (sleep).
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on.
pub const DISPLAY_ON: u8 = 0xAF;

/// Contrast control; followed by the contrast byte.
pub const SET_CONTRAST: u8 = 0x81;

/// Entire display follows GRAM. `| 0x01` forces every pixel on.
pub const SET_ENTIRE_ON: u8 = 0xA4;

/// Normal display (GRAM bit 1 = pixel lit).
pub const SET_NORMAL_DISPLAY: u8 = 0xA6;

/// Inverse display (GRAM bit 0 = pixel lit).
pub const SET_INVERSE_DISPLAY: u8 = 0xA7;

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Lower column address nibble, `0x00..=0x0F`.
pub const SET_LOWER_COLUMN: u8 = 0x00;

/// Higher column address nibble, `0x10..=0x1F`.
pub const SET_HIGHER_COLUMN: u8 = 0x10;

/// Page address, `0xB0..=0xB7`.
pub const SET_PAGE_ADDRESS: u8 = 0xB0;

/// Display start line, `0x40..=0x7F`.
pub const SET_START_LINE: u8 = 0x40;

// ---------------------------------------------------------------------------
// Hardware configuration
// ---------------------------------------------------------------------------

/// Segment remap. `| 0x01` maps column 131 to SEG0.
pub const SET_SEGMENT_REMAP: u8 = 0xA0;

/// COM output scan direction. `| 0x08` scans from COM[N-1] to COM0.
pub const SET_COM_SCAN: u8 = 0xC0;

/// Multiplex ratio; followed by `rows - 1`.
pub const SET_MUX_RATIO: u8 = 0xA8;

/// Display offset; followed by the vertical shift.
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// COM pins hardware configuration; followed by `0x02` or `0x12`.
pub const SET_COM_PINS: u8 = 0xDA;

// ---------------------------------------------------------------------------
// Timing and driving scheme
// ---------------------------------------------------------------------------

/// Display clock divide ratio / oscillator frequency; followed by the
/// packed setting.
pub const SET_CLOCK_DIV: u8 = 0xD5;

/// Pre-charge period; followed by the packed phase lengths.
pub const SET_PRECHARGE: u8 = 0xD9;

/// VCOM deselect level; followed by the level.
pub const SET_VCOM_DESELECT: u8 = 0xDB;

/// Charge pump setting; followed by [`CHARGE_PUMP_ENABLE`] or
/// [`CHARGE_PUMP_DISABLE`].
pub const SET_CHARGE_PUMP: u8 = 0x8D;

/// Charge pump operand: internal pump on.
pub const CHARGE_PUMP_ENABLE: u8 = 0x14;

/// Charge pump operand: pump bypassed, panel on external VCC.
pub const CHARGE_PUMP_DISABLE: u8 = 0x10;

// ---------------------------------------------------------------------------
// Command encoding
// ---------------------------------------------------------------------------

/// A single SH1106 command with its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Turn the panel on (`true`) or off.
    DisplayOn(bool),
    /// Contrast level, 0–255.
    Contrast(u8),
    /// Invert the panel (`true`) or show GRAM as-is.
    Invert(bool),
    /// Force every pixel on (`true`) or follow GRAM.
    AllOn(bool),
    /// Page address, 0–7.
    PageAddress(u8),
    /// Low nibble of the column address.
    LowerColumn(u8),
    /// High nibble of the column address.
    HigherColumn(u8),
    /// First GRAM row shown on COM0, 0–63.
    StartLine(u8),
    /// Mirror the column order (`true`) or keep it normal.
    SegmentRemap(bool),
    /// Scan COM lines in reverse (`true`) or in normal order.
    ReverseComScan(bool),
    /// Multiplex ratio, given as `rows - 1`.
    Multiplex(u8),
    /// Vertical display offset.
    DisplayOffset(u8),
    /// Alternative (`true`) or sequential COM pin layout.
    ComPinConfig(bool),
    /// Packed clock divide ratio / oscillator frequency.
    ClockDiv(u8),
    /// Packed pre-charge phase lengths.
    PreChargePeriod(u8),
    /// VCOM deselect level.
    VcomDeselect(u8),
    /// Enable (`true`) or bypass the internal charge pump.
    ChargePump(bool),
}

impl Command {
    /// Encode the command into `buf`, returning the used prefix.
    pub fn encode(self, buf: &mut [u8; 2]) -> &[u8] {
        let (first, operand) = match self {
            Command::DisplayOn(on) => (if on { DISPLAY_ON } else { DISPLAY_OFF }, None),
            Command::Contrast(value) => (SET_CONTRAST, Some(value)),
            Command::Invert(invert) => (SET_NORMAL_DISPLAY | invert as u8, None),
            Command::AllOn(on) => (SET_ENTIRE_ON | on as u8, None),
            Command::PageAddress(page) => (SET_PAGE_ADDRESS | (page & 0x07), None),
            Command::LowerColumn(nibble) => (SET_LOWER_COLUMN | (nibble & 0x0F), None),
            Command::HigherColumn(nibble) => (SET_HIGHER_COLUMN | (nibble & 0x0F), None),
            Command::StartLine(line) => (SET_START_LINE | (line & 0x3F), None),
            Command::SegmentRemap(remap) => (SET_SEGMENT_REMAP | remap as u8, None),
            Command::ReverseComScan(reverse) => (SET_COM_SCAN | ((reverse as u8) << 3), None),
            Command::Multiplex(ratio) => (SET_MUX_RATIO, Some(ratio & 0x3F)),
            Command::DisplayOffset(offset) => (SET_DISPLAY_OFFSET, Some(offset & 0x3F)),
            Command::ComPinConfig(alternative) => {
                (SET_COM_PINS, Some(0x02 | ((alternative as u8) << 4)))
            }
            Command::ClockDiv(value) => (SET_CLOCK_DIV, Some(value)),
            Command::PreChargePeriod(value) => (SET_PRECHARGE, Some(value)),
            Command::VcomDeselect(level) => (SET_VCOM_DESELECT, Some(level)),
            Command::ChargePump(enable) => (
                SET_CHARGE_PUMP,
                Some(if enable {
                    CHARGE_PUMP_ENABLE
                } else {
                    CHARGE_PUMP_DISABLE
                }),
            ),
        };

        buf[0] = first;
        match operand {
            Some(operand) => {
                buf[1] = operand;
                &buf[..2]
            }
            None => &buf[..1],
        }
    }

    /// Send the command as a single command-stream write.
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), DisplayError>
    where
        DI: WriteOnlyDataCommand,
    {
        let mut buf = [0u8; 2];
        iface.send_commands(DataFormat::U8(self.encode(&mut buf)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::recorder::{Op, RecordingInterface};

    fn encoded(cmd: Command) -> std::vec::Vec<u8> {
        let mut buf = [0u8; 2];
        cmd.encode(&mut buf).to_vec()
    }

    #[test]
    fn single_byte_commands_or_operand_into_opcode() {
        assert_eq!(encoded(Command::DisplayOn(false)), [0xAE]);
        assert_eq!(encoded(Command::DisplayOn(true)), [0xAF]);
        assert_eq!(encoded(Command::Invert(false)), [0xA6]);
        assert_eq!(encoded(Command::Invert(true)), [0xA7]);
        assert_eq!(encoded(Command::AllOn(false)), [0xA4]);
        assert_eq!(encoded(Command::PageAddress(0)), [0xB0]);
        assert_eq!(encoded(Command::PageAddress(7)), [0xB7]);
        assert_eq!(encoded(Command::StartLine(0)), [0x40]);
        assert_eq!(encoded(Command::SegmentRemap(false)), [0xA0]);
        assert_eq!(encoded(Command::SegmentRemap(true)), [0xA1]);
        assert_eq!(encoded(Command::ReverseComScan(false)), [0xC0]);
        assert_eq!(encoded(Command::ReverseComScan(true)), [0xC8]);
    }

    #[test]
    fn column_nibbles_are_masked() {
        // Column 34 = 0x22.
        assert_eq!(encoded(Command::LowerColumn(34 & 0x0F)), [0x02]);
        assert_eq!(encoded(Command::HigherColumn(34 >> 4)), [0x12]);
        // Stray high bits never leak into the opcode.
        assert_eq!(encoded(Command::LowerColumn(0xFF)), [0x0F]);
        assert_eq!(encoded(Command::HigherColumn(0xFF)), [0x1F]);
    }

    #[test]
    fn two_byte_commands_carry_operand() {
        assert_eq!(encoded(Command::Contrast(0x7F)), [0x81, 0x7F]);
        assert_eq!(encoded(Command::Multiplex(63)), [0xA8, 0x3F]);
        assert_eq!(encoded(Command::DisplayOffset(0)), [0xD3, 0x00]);
        assert_eq!(encoded(Command::ComPinConfig(true)), [0xDA, 0x12]);
        assert_eq!(encoded(Command::ComPinConfig(false)), [0xDA, 0x02]);
        assert_eq!(encoded(Command::ClockDiv(0x80)), [0xD5, 0x80]);
        assert_eq!(encoded(Command::PreChargePeriod(0xF1)), [0xD9, 0xF1]);
        assert_eq!(encoded(Command::VcomDeselect(0x30)), [0xDB, 0x30]);
        assert_eq!(encoded(Command::ChargePump(true)), [0x8D, 0x14]);
        assert_eq!(encoded(Command::ChargePump(false)), [0x8D, 0x10]);
    }

    #[test]
    fn send_issues_one_command_write() {
        let mut iface = RecordingInterface::new();
        Command::Contrast(0x10).send(&mut iface).unwrap();
        assert_eq!(iface.ops, [Op::Command(std::vec![0x81, 0x10])]);
    }
}
