mod cli;
mod config;
mod logging;
mod monitor;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use crossbeam_channel::{select, tick, unbounded};
use joypoll::{device_path, Gamepad, Settings};

use crate::cli::Cli;
use crate::config::{load_config, Config};
use crate::monitor::{chord_held, render_buttons, StatusTracker};

fn resolve_device(cli: &Cli, config: &Config) -> Result<String, joypoll::Error> {
    if let Some(device) = &cli.device {
        return Ok(device.clone());
    }
    if let Some(index) = cli.index {
        return device_path(index);
    }
    if let Some(device) = &config.device {
        return Ok(device.clone());
    }
    device_path(0)
}

#[allow(clippy::print_stdout)]
fn draw(line: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "\r{line}");
    let _ = stdout.flush();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup(cli.verbose, cli.no_color);

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                print_error!("failed to load config {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let path = match resolve_device(&cli, &config) {
        Ok(path) => path,
        Err(e) => {
            print_error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut settings = Settings::default().with_init_events(config.init_events);
    if let Some(interval) = cli
        .retry_ms
        .map(std::time::Duration::from_millis)
        .or(config.retry_interval)
    {
        settings = settings.with_retry_interval(interval);
    }

    // Handle Ctrl+C to exit cleanly
    let (stop_tx, stop_rx) = unbounded::<()>();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    }) {
        print_error!("failed to set Ctrl+C handler: {e}");
        return ExitCode::FAILURE;
    }

    let mut gamepad = Gamepad::with_settings(path, settings);
    let mut tracker = StatusTracker::new();
    let ticker = tick(config.tick);
    print_info!("watching {}", gamepad.path());

    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(ticker) -> _ => {
                gamepad.refresh();
                if let Some(status) = tracker.update(gamepad.status()) {
                    if status.is_err() {
                        print_warning!("{} unavailable: {status}", gamepad.path());
                    } else {
                        print_info!("{} connected", gamepad.path());
                    }
                }
                draw(&render_buttons(&gamepad, &config.button_names));
                if chord_held(&gamepad, &config.exit_chord) {
                    break;
                }
            }
        }
    }

    gamepad.close_stream();
    draw("\n");
    print_info!("stopped");
    ExitCode::SUCCESS
}
