use std::path::Path;
use std::sync::OnceLock;

use crate::config::schema::{AppConfiguration, RawAppConfiguration};
use crate::config::validation::validate;
use crate::error::{ConfigurationError, Result};

/// Configuration literal compiled into the binary.
const EMBEDDED_CONFIG: &str = include_str!("../../app.config.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` selects TOML; anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|value| value.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

pub fn embedded_source() -> &'static str {
    EMBEDDED_CONFIG
}

/// Parses and validates the embedded configuration. Performs no I/O.
pub fn load_configuration() -> Result<AppConfiguration> {
    load_from_str(EMBEDDED_CONFIG, ConfigFormat::Json)
}

/// Process-wide configuration, loaded on first use and shared read-only after.
pub fn shared() -> Result<&'static AppConfiguration> {
    static SHARED: OnceLock<Result<AppConfiguration>> = OnceLock::new();
    match SHARED.get_or_init(load_configuration) {
        Ok(config) => Ok(config),
        Err(err) => Err(err.clone()),
    }
}

pub fn load_from_str(raw: &str, format: ConfigFormat) -> Result<AppConfiguration> {
    let parsed = parse_raw(raw, format)?;
    match validate(parsed) {
        Ok(config) => {
            tracing::debug!(
                app_id = config.app_id(),
                source = %config.content_source(),
                "loaded app configuration"
            );
            Ok(config)
        }
        Err(err) => {
            tracing::warn!(%err, "app configuration rejected");
            Err(err)
        }
    }
}

pub fn load_from_file(path: &Path) -> Result<AppConfiguration> {
    let content = read_file(path)?;
    load_from_str(&content, ConfigFormat::from_path(path)).map_err(|err| match err {
        ConfigurationError::Parse(message) => ConfigurationError::Parse(format!(
            "failed to parse config '{}': {message}",
            path.display()
        )),
        other => other,
    })
}

pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| {
        ConfigurationError::Io(format!("failed to read config '{}': {err}", path.display()))
    })
}

pub fn parse_raw(raw: &str, format: ConfigFormat) -> Result<RawAppConfiguration> {
    match format {
        ConfigFormat::Json => {
            serde_json::from_str(raw).map_err(|err| ConfigurationError::Parse(err.to_string()))
        }
        ConfigFormat::Toml => {
            toml::from_str(raw).map_err(|err| ConfigurationError::Parse(err.to_string()))
        }
    }
}

/// Untyped JSON view of a document, for schema checks. TOML is converted.
pub fn parse_document(raw: &str, format: ConfigFormat) -> Result<serde_json::Value> {
    match format {
        ConfigFormat::Json => {
            serde_json::from_str(raw).map_err(|err| ConfigurationError::Parse(err.to_string()))
        }
        ConfigFormat::Toml => {
            let value = toml::from_str::<toml::Value>(raw)
                .map_err(|err| ConfigurationError::Parse(err.to_string()))?;
            serde_json::to_value(value).map_err(|err| {
                ConfigurationError::Parse(format!("failed converting toml to json: {err}"))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use super::*;
    use crate::config::schema::ContentSource;

    #[test]
    fn embedded_configuration_is_valid() {
        let config = load_configuration().expect("embedded config should load");

        assert_eq!(config.app_id(), "com.faixabet.app");
        assert_eq!(config.app_name(), "FaixaBet");
        assert_eq!(config.web_dir(), Path::new("www"));
        assert!(!config.bundled_web_runtime());
        assert!(!config.server().cleartext());
        assert_eq!(
            config.server().url().map(|url| url.as_str()),
            Some("https://faixabet9.streamlit.app")
        );
    }

    #[test]
    fn repeated_loads_are_equal() {
        let first = load_configuration().expect("first load");
        let second = load_configuration().expect("second load");
        assert_eq!(first, second);
    }

    #[test]
    fn shared_returns_the_same_instance() {
        let first = shared().expect("shared config");
        let second = shared().expect("shared config");
        assert!(std::ptr::eq(first, second));
        assert_eq!(*first, load_configuration().expect("fresh load"));
    }

    #[test]
    fn embedded_record_serializes_unchanged() {
        let config = load_configuration().expect("embedded config should load");
        let written: serde_json::Value =
            serde_json::from_str(&config.to_json_pretty().expect("serialize")).expect("json");
        let embedded: serde_json::Value =
            serde_json::from_str(embedded_source()).expect("embedded json");
        assert_eq!(written, embedded);
    }

    #[test]
    fn scenario_without_runtime_flag_loads() {
        let raw = r#"{
            "appId": "com.faixabet.app",
            "appName": "FaixaBet",
            "webAssetDirectory": "www",
            "server": { "url": "https://faixabet9.streamlit.app", "cleartext": false }
        }"#;

        let config = load_from_str(raw, ConfigFormat::Json).expect("config should load");
        assert_eq!(config, load_configuration().expect("embedded config"));
    }

    #[test]
    fn cleartext_http_scenario_loads() {
        let raw = r#"{
            "appId": "com.example.app",
            "appName": "Example",
            "webDir": "www",
            "server": { "url": "http://example.com", "cleartext": true }
        }"#;

        let config = load_from_str(raw, ConfigFormat::Json).expect("config should load");
        assert!(config.server().cleartext());
        assert!(config.content_source().is_remote());
    }

    #[test]
    fn missing_app_id_scenario_fails() {
        let raw = r#"{ "appName": "FaixaBet", "webDir": "www" }"#;

        let error = load_from_str(raw, ConfigFormat::Json).expect_err("load should fail");
        assert_eq!(error, ConfigurationError::MissingField("appId"));
    }

    #[test]
    fn local_only_config_uses_web_dir() {
        let raw = r#"{ "appId": "com.example.app", "appName": "Example", "webDir": "dist" }"#;

        let config = load_from_str(raw, ConfigFormat::Json).expect("config should load");
        assert_eq!(config.content_source(), ContentSource::Local("dist".into()));
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let raw = r#"{ "appId": "com.example.app", "appName": "Example", "webDir": "www", "plugins": {} }"#;

        let error = load_from_str(raw, ConfigFormat::Json).expect_err("load should fail");
        assert!(matches!(error, ConfigurationError::Parse(_)));
        assert!(error.to_string().contains("plugins"));
    }

    #[test]
    fn toml_and_json_produce_equal_records() {
        let toml_raw = r#"
            appId = "com.faixabet.app"
            appName = "FaixaBet"
            webDir = "www"
            bundledWebRuntime = false

            [server]
            url = "https://faixabet9.streamlit.app"
            cleartext = false
        "#;

        let from_toml = load_from_str(toml_raw, ConfigFormat::Toml).expect("toml config");
        assert_eq!(from_toml, load_configuration().expect("embedded config"));
    }

    #[test]
    fn format_is_chosen_by_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("app.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("APP.TOML")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("app.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("app")), ConfigFormat::Json);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        file.write_all(embedded_source().as_bytes()).expect("write config");

        let config = load_from_file(file.path()).expect("file config should load");
        assert_eq!(config, load_configuration().expect("embedded config"));
    }

    #[test]
    fn file_parse_errors_name_the_path() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(b"appId = ").expect("write config");

        let error = load_from_file(file.path()).expect_err("load should fail");
        assert!(matches!(error, ConfigurationError::Parse(_)));
        assert!(error.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = load_from_file(&dir.path().join("absent.json")).expect_err("no file");
        assert!(matches!(error, ConfigurationError::Io(_)));
    }

    #[test]
    fn toml_documents_convert_to_json_values() {
        let value = parse_document("appId = \"com.example.app\"\n", ConfigFormat::Toml)
            .expect("toml document");
        assert_eq!(value["appId"], "com.example.app");
    }
}
