use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, Serializer};
use url::Url;

use crate::error::{ConfigurationError, Result};

/// Wire shape of the configuration document before validation.
///
/// Every field is optional so that an absent key surfaces as
/// [`ConfigurationError::MissingField`] instead of a generic parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RawAppConfiguration {
    pub app_id: Option<String>,
    pub app_name: Option<String>,
    #[serde(alias = "webAssetDirectory")]
    pub web_dir: Option<String>,
    #[serde(alias = "bundledRuntimeFlag")]
    pub bundled_web_runtime: Option<bool>,
    pub server: Option<RawServerConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RawServerConfig {
    pub url: Option<String>,
    pub cleartext: Option<bool>,
}

/// Validated, immutable application shell configuration.
///
/// Only obtainable through [`crate::config::validate`] and the loaders built
/// on it, so every instance satisfies the transport invariant: a remote URL
/// with an `http` scheme implies `cleartext` is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfiguration {
    app_id: String,
    app_name: String,
    web_dir: String,
    bundled_web_runtime: bool,
    server: ServerConfig,
}

impl AppConfiguration {
    pub(crate) fn from_parts(
        app_id: String,
        app_name: String,
        web_dir: String,
        bundled_web_runtime: bool,
        server: ServerConfig,
    ) -> Self {
        Self {
            app_id,
            app_name,
            web_dir,
            bundled_web_runtime,
            server,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Bundled web asset directory, relative to the shell project root.
    pub fn web_dir(&self) -> &Path {
        Path::new(&self.web_dir)
    }

    pub fn bundled_web_runtime(&self) -> bool {
        self.bundled_web_runtime
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Where the shell loads its UI from. A configured server URL wins;
    /// otherwise the local asset directory is used.
    pub fn content_source(&self) -> ContentSource {
        match &self.server.url {
            Some(url) => ContentSource::Remote(url.clone()),
            None => ContentSource::Local(PathBuf::from(&self.web_dir)),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            ConfigurationError::Parse(format!("failed to serialize configuration: {err}"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<ServerUrl>,
    cleartext: bool,
}

impl ServerConfig {
    pub(crate) fn new(url: Option<ServerUrl>, cleartext: bool) -> Self {
        Self { url, cleartext }
    }

    pub fn url(&self) -> Option<&ServerUrl> {
        self.url.as_ref()
    }

    pub fn cleartext(&self) -> bool {
        self.cleartext
    }
}

/// Remote content URL. Keeps the text as written next to the parsed form so
/// the record serializes back unchanged (no normalizing trailing slash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerUrl {
    original: String,
    parsed: Url,
}

impl ServerUrl {
    pub(crate) fn new(original: String, parsed: Url) -> Self {
        Self { original, parsed }
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn url(&self) -> &Url {
        &self.parsed
    }

    pub fn is_secure(&self) -> bool {
        self.parsed.scheme() == "https"
    }
}

impl Serialize for ServerUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl fmt::Display for ServerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum ContentSource {
    Remote(ServerUrl),
    Local(PathBuf),
}

impl ContentSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "remote {url}"),
            Self::Local(dir) => write!(f, "local {}", dir.display()),
        }
    }
}
