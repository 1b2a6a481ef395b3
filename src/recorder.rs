//! Recording transport for host tests.
//!
//! Captures every command and data write in order, and can be told to fail
//! the Nth write to exercise error propagation.

use std::vec::Vec;

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};

/// One captured transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Command(Vec<u8>),
    Data(Vec<u8>),
}

#[derive(Debug, Default)]
pub struct RecordingInterface {
    pub ops: Vec<Op>,
    /// Zero-based index of the call that fails with `BusWriteError`.
    pub fail_at: Option<usize>,
    calls: usize,
}

impl RecordingInterface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::default()
        }
    }

    /// Commands and data captured since the last call, draining the log.
    pub fn take(&mut self) -> Vec<Op> {
        core::mem::take(&mut self.ops)
    }

    fn record(&mut self, payload: DataFormat<'_>, wrap: fn(Vec<u8>) -> Op) -> Result<(), DisplayError> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_at == Some(call) {
            return Err(DisplayError::BusWriteError);
        }
        match payload {
            DataFormat::U8(bytes) => {
                self.ops.push(wrap(bytes.to_vec()));
                Ok(())
            }
            _ => Err(DisplayError::DataFormatNotImplemented),
        }
    }
}

impl WriteOnlyDataCommand for RecordingInterface {
    fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
        self.record(cmd, Op::Command)
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        self.record(buf, Op::Data)
    }
}
