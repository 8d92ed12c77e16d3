mod cli;

use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use serde::Serialize;
use webshell_core::config::{self, AppConfiguration, ConfigFormat};
use webshell_core::{ConfigurationError, Result};

const BUNDLED_SCHEMA: &str = include_str!("../../../docs/app.config.schema.json");
const OUTPUT_SCHEMA: &str = "webshell-cli/output/v1";

#[derive(Debug, Serialize)]
struct CliJsonEnvelope<'a, T: Serialize> {
    schema: &'static str,
    status: &'static str,
    command: &'a str,
    data: T,
}

#[derive(Debug, Serialize)]
struct CliJsonErrorEnvelope<'a> {
    schema: &'static str,
    status: &'static str,
    command: &'a str,
    error: CliJsonErrorPayload,
}

#[derive(Debug, Serialize)]
struct CliJsonErrorPayload {
    code: &'static str,
    message: String,
}

fn main() {
    webshell_core::logging::init_tracing(webshell_core::logging::DEFAULT_LOG_LEVEL);

    let args = cli::Cli::parse_args();
    let command = args.command.clone().unwrap_or(cli::Command::Show);
    let config_path = args.config.as_ref().map(PathBuf::from);

    match render(config_path.as_deref(), args.output, &command) {
        Ok(rendered) => println!("{rendered}"),
        Err(error) => {
            match args.output {
                cli::OutputFormat::Text => eprintln!("webshell failed: {error}"),
                cli::OutputFormat::Json => print_json_error_envelope(command.name(), &error),
            }
            std::process::exit(1);
        }
    }
}

fn render(
    config_path: Option<&Path>,
    output: cli::OutputFormat,
    command: &cli::Command,
) -> Result<String> {
    match command {
        cli::Command::Show => {
            let config = load(config_path)?;
            match output {
                cli::OutputFormat::Text => Ok(config_text(&config)),
                cli::OutputFormat::Json => json_envelope(command.name(), &config),
            }
        }
        cli::Command::Validate { schema } => {
            // runtime rules first so their error codes reach the caller
            let config = load(config_path)?;
            let schema_path = schema.as_ref().map(PathBuf::from);
            validate_against_schema(config_path, schema_path.as_deref())?;
            match output {
                cli::OutputFormat::Text => {
                    Ok("Config is valid against schema and runtime checks.".to_owned())
                }
                cli::OutputFormat::Json => json_envelope(
                    command.name(),
                    serde_json::json!({ "valid": true, "appId": config.app_id() }),
                ),
            }
        }
        cli::Command::Source => {
            let source = load(config_path)?.content_source();
            match output {
                cli::OutputFormat::Text => Ok(source.to_string()),
                cli::OutputFormat::Json => json_envelope(command.name(), &source),
            }
        }
    }
}

fn load(path: Option<&Path>) -> Result<AppConfiguration> {
    match path {
        Some(path) => config::load_from_file(path),
        None => config::load_configuration(),
    }
}

fn config_text(config: &AppConfiguration) -> String {
    let server_url = config
        .server()
        .url()
        .map_or_else(|| "(none)".to_owned(), |url| url.to_string());

    [
        format!("appId:             {}", config.app_id()),
        format!("appName:           {}", config.app_name()),
        format!("webDir:            {}", config.web_dir().display()),
        format!("bundledWebRuntime: {}", config.bundled_web_runtime()),
        format!("server.url:        {server_url}"),
        format!("server.cleartext:  {}", config.server().cleartext()),
        format!("content source:    {}", config.content_source()),
    ]
    .join("\n")
}

fn validate_against_schema(config_path: Option<&Path>, schema_path: Option<&Path>) -> Result<()> {
    let document = match config_path {
        Some(path) => {
            let raw = config::read_file(path)?;
            config::parse_document(&raw, ConfigFormat::from_path(path))?
        }
        None => config::parse_document(config::embedded_source(), ConfigFormat::Json)?,
    };

    let schema_raw = match schema_path {
        Some(path) => std::fs::read_to_string(path).map_err(|err| {
            ConfigurationError::Io(format!(
                "failed to read schema file '{}': {err}",
                path.display()
            ))
        })?,
        None => BUNDLED_SCHEMA.to_owned(),
    };
    let schema_json: serde_json::Value = serde_json::from_str(&schema_raw)
        .map_err(|err| ConfigurationError::Parse(format!("schema is not valid JSON: {err}")))?;

    let compiled = JSONSchema::options().compile(&schema_json).map_err(|err| {
        ConfigurationError::Parse(format!("failed to compile JSON schema: {err}"))
    })?;

    if let Err(errors) = compiled.validate(&document) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        tracing::debug!(%details, "schema validation failed");
        return Err(ConfigurationError::Schema(details));
    }

    Ok(())
}

fn json_envelope<T: Serialize>(command: &str, data: T) -> Result<String> {
    let envelope = CliJsonEnvelope {
        schema: OUTPUT_SCHEMA,
        status: "ok",
        command,
        data,
    };
    serde_json::to_string_pretty(&envelope)
        .map_err(|err| ConfigurationError::Parse(format!("failed to serialize output: {err}")))
}

fn print_json_error_envelope(command: &str, error: &ConfigurationError) {
    let envelope = CliJsonErrorEnvelope {
        schema: OUTPUT_SCHEMA,
        status: "error",
        command,
        error: CliJsonErrorPayload {
            code: error.code(),
            message: error.to_string(),
        },
    };
    match serde_json::to_string(&envelope) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => eprintln!("webshell failed: {error} (and could not render JSON: {err})"),
    }
}
