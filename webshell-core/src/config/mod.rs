pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    embedded_source, load_configuration, load_from_file, load_from_str, parse_document,
    parse_raw, read_file, shared, ConfigFormat,
};
pub use schema::{
    AppConfiguration, ContentSource, RawAppConfiguration, RawServerConfig, ServerConfig,
    ServerUrl,
};
pub use validation::validate;
