// -*- coding: utf-8 -*-

#![forbid(unsafe_code)]

mod serial;
mod table;

use crate::{
    serial::{DEFAULT_BAUD, DEFAULT_PORT, run_serial},
    table::{Firmware, ValueTable},
};
use anyhow as ah;
use clap::Parser;
use std::{thread, time::Duration};

/// Show the debug values streamed by the lab firmware.
#[derive(Parser, Debug)]
struct Opts {
    /// Serial port device.
    #[arg(default_value = DEFAULT_PORT)]
    port: String,

    /// Serial baud rate.
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Firmware image the values come from.
    #[arg(short, long, value_enum, default_value_t = Firmware::Calculator)]
    firmware: Firmware,

    /// Print every value as it arrives, instead of once per table.
    #[arg(short, long)]
    raw: bool,
}

fn main() -> ah::Result<()> {
    let opts = Opts::parse();

    let mut table = ValueTable::new(opts.firmware);
    loop {
        let res = run_serial(&opts.port, opts.baud, |frame| {
            if opts.raw {
                if let Some(line) = table.describe(&frame) {
                    println!("{line}");
                }
            } else if let Some(text) = table.update(&frame) {
                print!("{text}");
            }
        });
        if let Err(e) = res {
            eprintln!("Serial error: {e:?}");
        }
        thread::sleep(Duration::from_millis(5000));
    }
}

// vim: ts=4 sw=4 expandtab
