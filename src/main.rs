//! Discount campaigns CLI

use std::{io, process::ExitCode};

use discount_campaigns::{app, config::CalculatorConfig, logging};

fn main() -> ExitCode {
    let config = match CalculatorConfig::load() {
        Ok(config) => config,
        Err(error) => error.exit(),
    };

    let dispatch = logging::dispatch(&config.logging);

    let result =
        tracing::dispatcher::with_default(&dispatch, || app::run(&config, io::stdout().lock()));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
