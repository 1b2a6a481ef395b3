//! End-to-end SPI tests: driver → SpiInterface → bus and pins.

mod common;

use common::{frame, init_writes, Write};
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use sh1106_oled_rs::{DisplayConfig, Sh1106};

/// Bus, D/C and CS expectations for a sequence of writes.
struct Wire {
    spi: Vec<SpiTransaction<u8>>,
    dc: Vec<PinTransaction>,
    cs: Vec<PinTransaction>,
}

fn on_wire(writes: &[Write]) -> Wire {
    let mut wire = Wire {
        spi: Vec::new(),
        dc: Vec::new(),
        cs: Vec::new(),
    };
    for w in writes {
        let (level, payload) = match w {
            Write::Command(bytes) => (PinState::Low, bytes.clone()),
            Write::Data(bytes) => (PinState::High, bytes.clone()),
        };
        wire.dc.push(PinTransaction::set(level));
        wire.cs.push(PinTransaction::set(PinState::Low));
        wire.spi.push(SpiTransaction::write_vec(payload));
        wire.spi.push(SpiTransaction::flush());
        wire.cs.push(PinTransaction::set(PinState::High));
    }
    wire
}

fn reset_pulse() -> PinMock {
    PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ])
}

#[test]
fn new_spi_resets_then_initialises() {
    let config = DisplayConfig::default();
    let wire = on_wire(&init_writes(&config));
    let mut spi = SpiMock::new(&wire.spi);
    let mut dc = PinMock::new(&wire.dc);
    let mut cs = PinMock::new(&wire.cs);
    let mut rst = reset_pulse();

    let mut rst_handle = rst.clone();
    let display = Sh1106::new_spi(
        spi.clone(),
        dc.clone(),
        &mut rst_handle,
        cs.clone(),
        &mut NoopDelay,
        config,
    )
    .unwrap();
    assert!(display.is_initialized());

    spi.done();
    dc.done();
    cs.done();
    rst.done();
}

#[test]
fn short_panel_frame_over_spi() {
    let config = DisplayConfig::new(128, 32);
    let mut writes = init_writes(&config);
    writes.extend(frame(&config, 0xFF));
    let wire = on_wire(&writes);
    let mut spi = SpiMock::new(&wire.spi);
    let mut dc = PinMock::new(&wire.dc);
    let mut cs = PinMock::new(&wire.cs);
    let mut rst = reset_pulse();

    let mut rst_handle = rst.clone();
    let mut display = Sh1106::new_spi(
        spi.clone(),
        dc.clone(),
        &mut rst_handle,
        cs.clone(),
        &mut NoopDelay,
        config,
    )
    .unwrap();
    assert_eq!(display.page_count(), 4);
    display.buffer_mut().fill(true);
    display.show().unwrap();

    spi.done();
    dc.done();
    cs.done();
    rst.done();
}

#[test]
fn release_returns_transport() {
    let config = DisplayConfig::new(64, 48);
    let wire = on_wire(&init_writes(&config));
    let mut spi = SpiMock::new(&wire.spi);
    let mut dc = PinMock::new(&wire.dc);
    let mut cs = PinMock::new(&wire.cs);
    let mut rst = reset_pulse();

    let mut rst_handle = rst.clone();
    let display = Sh1106::new_spi(
        spi.clone(),
        dc.clone(),
        &mut rst_handle,
        cs.clone(),
        &mut NoopDelay,
        config,
    )
    .unwrap();
    assert_eq!(display.column_offset(), 34);
    let (_spi, _dc, _cs) = display.release().release();

    spi.done();
    dc.done();
    cs.done();
    rst.done();
}
