use std::path::{Component, Path};
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::config::schema::{
    AppConfiguration, RawAppConfiguration, RawServerConfig, ServerConfig, ServerUrl,
};
use crate::error::{ConfigurationError, Result};

const APP_ID_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$";

pub fn validate(raw: RawAppConfiguration) -> Result<AppConfiguration> {
    let app_id = required(raw.app_id, "appId")?;
    let app_name = required(raw.app_name, "appName")?;
    let web_dir = required(raw.web_dir, "webDir")?;

    validate_app_id(&app_id)?;
    validate_web_dir(&web_dir)?;
    let server = validate_server(raw.server.unwrap_or_default())?;

    Ok(AppConfiguration::from_parts(
        app_id,
        app_name,
        web_dir,
        raw.bundled_web_runtime.unwrap_or(false),
        server,
    ))
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigurationError::MissingField(field)),
    }
}

fn validate_app_id(app_id: &str) -> Result<()> {
    static MATCHER: OnceLock<Option<Regex>> = OnceLock::new();
    let matches = MATCHER
        .get_or_init(|| Regex::new(APP_ID_PATTERN).ok())
        .as_ref()
        .is_some_and(|matcher| matcher.is_match(app_id));

    if matches {
        return Ok(());
    }

    Err(ConfigurationError::InvalidField {
        field: "appId",
        reason: format!(
            "'{app_id}' is not a reverse-domain identifier (expected e.g. 'com.company.app')"
        ),
    })
}

fn validate_web_dir(web_dir: &str) -> Result<()> {
    let has_drive_prefix = web_dir.len() >= 2
        && web_dir.as_bytes()[0].is_ascii_alphabetic()
        && web_dir.as_bytes()[1] == b':';
    let escapes_root = Path::new(web_dir).components().any(|component| {
        matches!(
            component,
            Component::RootDir | Component::Prefix(_) | Component::ParentDir
        )
    });

    if has_drive_prefix || web_dir.starts_with('\\') || escapes_root {
        return Err(ConfigurationError::InvalidField {
            field: "webDir",
            reason: format!("'{web_dir}' must be a relative path inside the project"),
        });
    }

    Ok(())
}

fn validate_server(raw: RawServerConfig) -> Result<ServerConfig> {
    let cleartext = raw.cleartext.unwrap_or(false);
    let Some(url) = raw.url else {
        return Ok(ServerConfig::new(None, cleartext));
    };

    let url = parse_server_url(url)?;
    if !url.is_secure() && !cleartext {
        return Err(ConfigurationError::InsecureTransportConflict {
            url: url.as_str().to_owned(),
        });
    }

    Ok(ServerConfig::new(Some(url), cleartext))
}

fn parse_server_url(value: String) -> Result<ServerUrl> {
    let invalid = |reason: String| ConfigurationError::InvalidUrl {
        url: value.clone(),
        reason,
    };

    if value.trim().is_empty() {
        return Err(invalid("url is empty".to_owned()));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(invalid("url must not contain whitespace".to_owned()));
    }

    let parsed = Url::parse(&value).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "scheme '{}' is not supported; use http or https",
            parsed.scheme()
        )));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("url has no host".to_owned()));
    }

    Ok(ServerUrl::new(value, parsed))
}
