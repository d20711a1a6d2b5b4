use anyhow::bail;
use clap::{Parser, Subcommand};
use typeid::validate_prefix;

/// Upper bound on the number of identifiers `typeid new` prints at once.
pub const MAX_COUNT: usize = 1_000_000;

/// Command-line arguments for the `typeid` binary.
///
/// Every option can also be set through the environment variable named in
/// its help text, or through a `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "typeid",
    version,
    about = "Generate, inspect and convert TypeIDs"
)]
pub struct CliArgs {
    /// Default log filter, used when `RUST_LOG` is not set.
    ///
    /// Environment variable: `TYPEID_LOG`
    #[arg(long, global = true, env = "TYPEID_LOG", default_value_t = String::from("warn"))]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print fresh identifiers.
    New {
        /// Type prefix; empty for bare identifiers.
        ///
        /// Environment variable: `TYPEID_PREFIX`
        #[arg(short, long, env = "TYPEID_PREFIX", default_value_t = String::new())]
        prefix: String,

        /// How many identifiers to print.
        ///
        /// Environment variable: `TYPEID_COUNT`
        #[arg(short = 'n', long, env = "TYPEID_COUNT", default_value_t = 1)]
        count: usize,
    },
    /// Print the prefix, suffix and UUID of each identifier.
    Parse {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Convert UUID text into an identifier.
    Encode {
        /// Type prefix; empty for bare identifiers.
        ///
        /// Environment variable: `TYPEID_PREFIX`
        #[arg(short, long, env = "TYPEID_PREFIX", default_value_t = String::new())]
        prefix: String,

        uuid: String,
    },
    /// Convert an identifier into UUID text.
    Decode { id: String },
}

/// Validated configuration derived from [`CliArgs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    New { prefix: String, count: usize },
    Parse { ids: Vec<String> },
    Encode { prefix: String, uuid: String },
    Decode { id: String },
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let action = match args.command {
            Command::New { prefix, count } => {
                validate_prefix(&prefix)?;
                if count == 0 {
                    bail!("TYPEID_COUNT must be greater than 0");
                }
                if count > MAX_COUNT {
                    bail!("TYPEID_COUNT ({count}) exceeds the maximum of {MAX_COUNT}");
                }
                Action::New { prefix, count }
            }
            Command::Parse { ids } => Action::Parse { ids },
            Command::Encode { prefix, uuid } => {
                validate_prefix(&prefix)?;
                Action::Encode { prefix, uuid }
            }
            Command::Decode { id } => Action::Decode { id },
        };

        Ok(Self {
            log: args.log,
            action,
        })
    }
}
