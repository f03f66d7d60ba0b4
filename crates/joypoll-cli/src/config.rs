use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_TICK_MS: u64 = 16;
const DEFAULT_BUTTON_NAMES: [&str; 6] = ["A", "B", "X", "Y", "LB", "RB"];
const DEFAULT_EXIT_CHORD: [usize; 2] = [0, 3];

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("yaml deserialize error: {0}")]
    YamlDeserializeError(#[from] serde_yaml::Error),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("tick_ms must be greater than zero")]
    ZeroTick,
}

/// Monitor settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub device: Option<String>,
    pub retry_interval: Option<Duration>,
    pub tick: Duration,
    pub button_names: Vec<String>,
    /// Buttons that, held together, stop the monitor.
    pub exit_chord: Vec<usize>,
    pub init_events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: None,
            retry_interval: None,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            button_names: DEFAULT_BUTTON_NAMES.iter().map(ToString::to_string).collect(),
            exit_chord: DEFAULT_EXIT_CHORD.to_vec(),
            init_events: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigV1 {
    #[allow(dead_code)]
    version: u8,
    device: Option<String>,
    retry_interval_ms: Option<u64>,
    tick_ms: Option<u64>,
    button_names: Option<Vec<String>>,
    exit_chord: Option<Vec<usize>>,
    init_events: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct VersionedConfig {
    version: u8,
}

/// Parse yaml config.
pub(crate) fn parse_config(input: &str) -> Result<Config, ConfigError> {
    let raw: VersionedConfig = serde_yaml::from_str(input)?;
    if raw.version != 1 {
        return Err(ConfigError::UnsupportedVersion(raw.version));
    }
    let v1: ConfigV1 = serde_yaml::from_str(input)?;
    let defaults = Config::default();
    let tick = match v1.tick_ms {
        Some(0) => return Err(ConfigError::ZeroTick),
        Some(ms) => Duration::from_millis(ms),
        None => defaults.tick,
    };
    Ok(Config {
        device: v1.device,
        retry_interval: v1.retry_interval_ms.map(Duration::from_millis),
        tick,
        button_names: v1.button_names.unwrap_or(defaults.button_names),
        exit_chord: v1.exit_chord.unwrap_or(defaults.exit_chord),
        init_events: v1.init_events.unwrap_or(defaults.init_events),
    })
}

pub(crate) fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let input = std::fs::read_to_string(path)?;
    parse_config(&input)
}
