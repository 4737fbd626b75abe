use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokup_deploy::DeploymentParameters;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "tokup")]
#[command(
    author,
    version,
    about = "Compile, bind and deploy ERC20 tokens to any EVM chain"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, global = true, env = "TOKUP_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// Path to a Tokup.toml configuration file (or a directory containing one).
    ///
    /// Settings are read from ./Tokup.toml when present, then from this file, then
    /// from `TOKUP_`-prefixed environment variables.
    #[arg(long, alias = "conf", global = true, env = "TOKUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Deployment parameters. In menu mode they pre-fill the session.
    #[clap(flatten)]
    pub params: ParamArgs,

    /// The action to run. Defaults to the interactive menu.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the interactive operator menu.
    Menu,
    /// Check that the compiler and the binding generator can be started.
    Check,
    /// Compile the contract and generate its binding.
    Compile,
    /// Compile, then deploy a single token named after the token name and symbol.
    Deploy,
    /// Compile, then deploy COUNT tokens named <name>_<i> with symbols <symbol><i>.
    DeployMany {
        /// Number of instances to deploy.
        #[arg(short, long, allow_negative_numbers = true)]
        count: i64,
    },
    /// Print the effective configuration as TOML.
    Config,
}

/// Deployment parameters taken from flags or the environment.
#[derive(Debug, Clone, Default, Args)]
pub struct ParamArgs {
    /// Hex private key signing the deployment transactions.
    #[arg(long, global = true, env = "TOKUP_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// The token name.
    #[arg(long, alias = "name", global = true, env = "TOKUP_TOKEN_NAME")]
    pub token_name: Option<String>,

    /// The token symbol.
    #[arg(long, alias = "symbol", global = true, env = "TOKUP_TOKEN_SYMBOL")]
    pub token_symbol: Option<String>,

    /// The URL of the chain's JSON-RPC endpoint.
    #[arg(long, alias = "rpc", global = true, env = "TOKUP_RPC_URL")]
    pub rpc_url: Option<String>,
}

impl ParamArgs {
    pub fn to_parameters(&self) -> DeploymentParameters {
        DeploymentParameters::new(
            self.private_key.clone().unwrap_or_default(),
            self.token_name.clone().unwrap_or_default(),
            self.token_symbol.clone().unwrap_or_default(),
            self.rpc_url.clone().unwrap_or_default(),
        )
    }
}
