use crate::seed;
use crate::store::Portal;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeedMode {
    /// Built-in sample school.
    Demo,
    /// Every collection starts empty.
    Empty,
}

impl SeedMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Empty => "empty",
        }
    }

    pub fn load(self) -> Portal {
        match self {
            Self::Demo => seed::demo(),
            Self::Empty => Portal::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Portal data sidecar: JSON requests on stdin, one JSON response per line on stdout.
#[derive(Debug, Parser)]
#[command(name = "campusd", version, about)]
pub struct CliArgs {
    /// Which collections to load at startup and on `portal.reset`.
    #[arg(long, value_enum, env = "CAMPUSD_SEED", default_value = "demo")]
    pub seed: SeedMode,

    /// Log filter directive; `RUST_LOG` takes precedence when set.
    #[arg(long, env = "CAMPUSD_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, value_enum, env = "CAMPUSD_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,
}
