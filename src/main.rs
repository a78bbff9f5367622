use clap::Parser;
use deploy_scripts::{cli::Cli, errors::ScriptError, utils::setup_client};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    // Load a `.env` file, if present, before the CLI reads the environment
    dotenv::dotenv().ok();

    let Cli {
        priv_key,
        rpc_url,
        network,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let client = setup_client(&priv_key, &rpc_url).await?;

    command.run(client, &network).await
}
