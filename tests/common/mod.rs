//! Shared wire-level expectations for the integration tests.

#![allow(dead_code)]

use sh1106_oled_rs::DisplayConfig;

/// One controller write as it leaves the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Command(Vec<u8>),
    Data(Vec<u8>),
}

/// The initialisation commands for `config`, in order.
pub fn init_commands(config: &DisplayConfig) -> Vec<Write> {
    let rows = config.height as u8;
    let (precharge, pump) = if config.external_vcc {
        (0x22, 0x10)
    } else {
        (0xF1, 0x14)
    };

    [
        vec![0xAE],
        vec![0xD5, 0x80],
        vec![0xA8, rows - 1],
        vec![0xD3, 0x00],
        vec![0xDA, if rows > 32 { 0x12 } else { 0x02 }],
        vec![0xA0],
        vec![0xC0],
        vec![0x81, 0x80],
        vec![0xD9, precharge],
        vec![0xDB, 0x30],
        vec![0x8D, pump],
        vec![0x40],
        vec![0xB0],
        vec![0xA4],
        vec![0xA6],
        vec![0xAF],
    ]
    .into_iter()
    .map(Write::Command)
    .collect()
}

/// The writes of one full `show()` where every page holds `fill`.
pub fn frame(config: &DisplayConfig, fill: u8) -> Vec<Write> {
    let offset = config.column_offset();
    (0..config.page_count() as u8)
        .flat_map(|page| {
            [
                Write::Command(vec![0xB0 | page]),
                Write::Command(vec![offset & 0x0F]),
                Write::Command(vec![0x10 | (offset >> 4)]),
                Write::Data(vec![fill; config.width as usize]),
            ]
        })
        .collect()
}

/// Everything `init()` sends: the command sequence, then a blank frame.
pub fn init_writes(config: &DisplayConfig) -> Vec<Write> {
    let mut writes = init_commands(config);
    writes.extend(frame(config, 0x00));
    writes
}
