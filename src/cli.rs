//! Definitions of CLI arguments and commands for the deploy scripts

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use ethers::providers::Middleware;

use crate::{
    commands::{deploy_grant_creator, deploy_stream_manager},
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_NETWORK_CONFIG_PATH, DEFAULT_STREAM_MANAGER_SALT_NONCE,
    },
    errors::ScriptError,
    types::Create2Policy,
};

/// The CLI for the deploy scripts
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    // TODO: Better key management
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: String,

    /// Name of the active network, as keyed in the network configuration file
    #[arg(short, long, env = "NETWORK")]
    pub network: String,

    /// The deploy command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The possible deploy commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the `GrantCreator` contract at its deterministic address
    DeployGrantCreator(DeployGrantCreatorArgs),
    /// Create a new `StreamManager` instance through the pre-deployed factory
    DeployStreamManager(DeployStreamManagerArgs),
}

impl Command {
    /// Run the command
    pub async fn run(
        self,
        client: Arc<impl Middleware>,
        network: &str,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeployGrantCreator(args) => {
                deploy_grant_creator(args, client, network, Create2Policy::standard()).await
            }
            Command::DeployStreamManager(args) => deploy_stream_manager(args, client).await,
        }
    }
}

/// Deploy the `GrantCreator` contract.
///
/// The contract is deployed through the deterministic deployment proxy under a
/// fixed salt, so repeated deployments with identical bytecode and constructor
/// arguments land at the same address on every network. The constructor is
/// wired with the dependency addresses configured for the active network.
#[derive(Args)]
pub struct DeployGrantCreatorArgs {
    /// Path to the per-network deployment configuration file
    #[arg(short, long, default_value = DEFAULT_NETWORK_CONFIG_PATH)]
    pub config_path: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: String,
}

/// Create a new `StreamManager` instance through the pre-deployed
/// `StreamManagerFactory` contract.
///
/// The factory address is fixed and assumed correct for the active network;
/// repeating a salt nonce against a factory that enforces per-salt uniqueness
/// fails the underlying chain call.
#[derive(Args)]
pub struct DeployStreamManagerArgs {
    /// Salt nonce distinguishing instances created from the same factory
    #[arg(short, long, default_value_t = DEFAULT_STREAM_MANAGER_SALT_NONCE)]
    pub salt_nonce: u64,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    /// The factory salt nonce defaults to the fixed production nonce
    #[test]
    fn test_default_salt_nonce() {
        let cli = Cli::try_parse_from([
            "deploy-scripts",
            "--priv-key",
            "0xkey",
            "--rpc-url",
            "http://localhost:8545",
            "--network",
            "testnet",
            "deploy-stream-manager",
        ])
        .unwrap();

        match cli.command {
            Command::DeployStreamManager(args) => assert_eq!(args.salt_nonce, 2),
            _ => panic!("parsed the wrong command"),
        }
    }

    /// The direct deployer reads the checked-in config and artifacts by default
    #[test]
    fn test_default_paths() {
        let cli = Cli::try_parse_from([
            "deploy-scripts",
            "--priv-key",
            "0xkey",
            "--rpc-url",
            "http://localhost:8545",
            "--network",
            "testnet",
            "deploy-grant-creator",
        ])
        .unwrap();

        match cli.command {
            Command::DeployGrantCreator(args) => {
                assert_eq!(args.config_path, "NetworkConfig.json");
                assert_eq!(args.artifacts_dir, "artifacts");
            }
            _ => panic!("parsed the wrong command"),
        }
    }
}
