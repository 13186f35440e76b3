use config::{Config as ConfigLoader, ConfigError, Environment, File};
use eventline::decoder::DecoderConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub fixture: FixtureSettings,
    #[serde(default)]
    pub decoder: DecoderConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSettings {
    pub path: PathBuf,
    /// Event type to count, compared ignoring ASCII case
    #[serde(default = "default_event_type")]
    pub event_type: String,
}

fn default_event_type() -> String {
    "state".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables, e.g. `EVENTLINE_FIXTURE__PATH`,
    ///    `EVENTLINE_DECODER__MAX_LINE_LENGTH`
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::default()
                    .prefix("EVENTLINE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Load settings from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventline::decoder::{DispatchPolicy, Utf8Policy};

    #[test]
    fn test_settings_structure() {
        let toml = r#"
            [fixture]
            path = "fixtures/bench.txt"
            event_type = "State"

            [decoder]
            dispatch_policy = "data_only"
            utf8_policy = "replace"
            max_line_length = 65536

            [logging]
            level = "debug"
            format = "json"
        "#;

        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.fixture.path, PathBuf::from("fixtures/bench.txt"));
        assert_eq!(settings.fixture.event_type, "State");
        assert_eq!(settings.decoder.dispatch_policy, DispatchPolicy::DataOnly);
        assert_eq!(settings.decoder.utf8_policy, Utf8Policy::Replace);
        assert_eq!(settings.decoder.max_line_length, Some(65536));
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_optional_sections() {
        let toml = r#"
            [fixture]
            path = "events.txt"
        "#;

        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.fixture.event_type, "state");
        assert_eq!(settings.decoder, DecoderConfig::default());
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_bundled_default_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        let settings = Settings::from_file(path).unwrap();

        assert_eq!(settings.fixture.path, PathBuf::from("fixtures/state_stream.txt"));
        assert_eq!(settings.decoder.read_chunk_size, 8192);
    }
}
