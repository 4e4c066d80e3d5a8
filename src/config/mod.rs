mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{LoggingSettings, ServerSettings, Settings, StorageSettings};

/// Prefix of environment overrides, e.g. `PAIRCHAT_SERVER_PORT=9000`.
pub const ENV_PREFIX: &str = "PAIRCHAT";

/// Loads the configuration from `config/default` and `PAIRCHAT_*`
/// environment variables, then fills anything missing from defaults.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("_")
                .try_parsing(true),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    Ok(merge(partial))
}

fn merge(partial: PartialSettings) -> Settings {
    let default = Settings::default();

    let server = partial.server;
    let storage = partial.storage;
    let logging = partial.logging;

    Settings {
        server: ServerSettings {
            host: server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
        },
        storage: StorageSettings {
            backend: storage
                .as_ref()
                .and_then(|s| s.backend.clone())
                .unwrap_or(default.storage.backend),
            dir: storage
                .as_ref()
                .and_then(|s| s.dir.clone())
                .unwrap_or(default.storage.dir),
        },
        logging: LoggingSettings {
            level: logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
    }
}

#[cfg(test)]
mod tests;
