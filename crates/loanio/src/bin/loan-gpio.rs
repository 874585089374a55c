// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! `loan-gpio` - loans HPS GPIO 48-53 to the FPGA fabric.
//!
//! Runs the example usage sequence against `/dev/mem`. Must run as root on
//! the HPS. Set `RUST_LOG` to see mapping and register traces on stderr.

use std::process::ExitCode;

use loanio::{DevMem, LoanIo, VERSION, demo};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    info!(version = VERSION, "loan-gpio starting");

    let mut io = LoanIo::new(DevMem::new(), std::io::stdout().lock());
    match demo::run(&mut io) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "cannot write operator output");
            ExitCode::FAILURE
        }
    }
}
