// -*- coding: utf-8 -*-

use anyhow::{self as ah, Context as _};
use mculab::debug::{Frame, FrameDecoder};
use std::{io::Read as _, time::Duration};

pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD: u32 = 19_200;

/// Read the debug stream from `port` and pass every decoded frame to `f`.
///
/// Only returns on error.
pub fn run_serial(port: &str, baud: u32, mut f: impl FnMut(Frame)) -> ah::Result<()> {
    let mut serial = serialport::new(port, baud)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .flow_control(serialport::FlowControl::None)
        .stop_bits(serialport::StopBits::One)
        .timeout(Duration::from_millis(500))
        .open()
        .context("Open serial port")?;

    let mut decoder = FrameDecoder::new();
    let mut buf = [0_u8; 64];
    loop {
        let count = match serial.read(&mut buf) {
            Ok(0) => continue,
            Ok(count) => count,
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
            Err(e) => return Err(e).context("Serial port read"),
        };
        for &byte in &buf[..count] {
            if let Some(frame) = decoder.push(byte) {
                f(frame);
            }
        }
    }
}

// vim: ts=4 sw=4 expandtab
