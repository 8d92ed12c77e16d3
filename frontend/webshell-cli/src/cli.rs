use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "webshell", about = "Web shell app configuration tool")]
pub struct Cli {
    /// Configuration file (.json or .toml). The built-in configuration is used when omitted.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the validated configuration.
    Show,
    /// Check the configuration against the JSON schema and the runtime rules.
    Validate {
        #[arg(long)]
        schema: Option<String>,
    },
    /// Print where the shell loads its content from.
    Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Validate { .. } => "validate",
            Self::Source => "source",
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
