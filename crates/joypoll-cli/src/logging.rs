// Colorized wrappers for logging

use fern::Dispatch;

#[inline(always)]
pub(crate) fn format_log(message: &str) -> String {
    let now = chrono::Local::now().format("%Y.%m.%d %H:%M:%S").to_string();
    format!("[{now}] {message}")
}

#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => {
        let message = $crate::logging::format_log(&format!($($arg)*));
        log::error!("{}", message.bright_red());
    }
}

#[macro_export]
macro_rules! print_info {
    ($($arg:tt)*) => {
        let message = $crate::logging::format_log(&format!($($arg)*));
        log::info!("{message}");
    }
}

#[macro_export]
macro_rules! print_warning {
    ($($arg:tt)*) => {
        let message = $crate::logging::format_log(&format!($($arg)*));
        log::warn!("{}", message.bright_yellow());
    }
}

/// Setup the logger.
#[allow(clippy::print_stderr)]
pub(crate) fn setup(verbose: bool, no_color: bool) {
    let log_level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let result = Dispatch::new()
        // Start from column zero: the monitor redraws its line with '\r'.
        .format(|out, message, _| out.finish(format_args!("\r{message}")))
        .level(log::LevelFilter::Warn)
        .level_for("joypoll", log_level)
        .chain(std::io::stderr())
        .apply();
    if let Err(e) = result {
        eprintln!("unable to set up logger: {e}");
    }

    if no_color {
        colored::control::set_override(false);
    }
}
