//! Implementations of the two deployment workflows

use std::{path::Path, str::FromStr, sync::Arc};

use ethers::{
    abi::Token,
    providers::Middleware,
    types::{Address, TransactionRequest, U256},
    utils::get_create2_address,
};
use tracing::info;

use crate::{
    cli::{DeployGrantCreatorArgs, DeployStreamManagerArgs},
    constants::{GRANT_CREATOR_CONTRACT_NAME, STREAM_MANAGER_FACTORY_ADDRESS},
    errors::ScriptError,
    solidity::StreamManagerFactory,
    types::{Create2Policy, NetworkConfig},
    utils::{await_confirmation, build_init_code, deterministic_deploy_calldata, load_artifact},
};

/// Deploy the `GrantCreator` contract at its deterministic address, wiring its
/// constructor with the dependency addresses configured for the active network
pub async fn deploy_grant_creator(
    args: DeployGrantCreatorArgs,
    client: Arc<impl Middleware>,
    network: &str,
    policy: Create2Policy,
) -> Result<(), ScriptError> {
    info!("Deploying {GRANT_CREATOR_CONTRACT_NAME}...");

    // Resolve the dependency addresses for the active network
    let config = NetworkConfig::from_file(&args.config_path)?;
    let deployment_config = config.for_network(network)?;
    info!("Using dependency addresses for `{network}`: {deployment_config:#?}");

    let constructor_args = deployment_config
        .constructor_args()
        .into_iter()
        .map(Token::Address)
        .collect::<Vec<_>>();

    // Assemble the init code and its deterministic deployment address
    let artifact = load_artifact(Path::new(&args.artifacts_dir), GRANT_CREATOR_CONTRACT_NAME)?;
    let init_code = build_init_code(&artifact, &constructor_args)?;
    let deployed_address = get_create2_address(policy.deployer, policy.salt, &init_code);

    // Deploy through the deterministic deployment proxy
    let tx = TransactionRequest::new()
        .to(policy.deployer)
        .data(deterministic_deploy_calldata(policy.salt, &init_code));
    let pending = client
        .send_transaction(tx, None /* block */)
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
    await_confirmation(pending).await?;

    println!(
        "constructor args: 0x{}",
        hex::encode(ethers::abi::encode(&constructor_args))
    );
    println!("{GRANT_CREATOR_CONTRACT_NAME} was deployed to {deployed_address:#x}");

    Ok(())
}

/// Create a new `StreamManager` instance through the pre-deployed
/// `StreamManagerFactory` contract, reporting the created instance's address
pub async fn deploy_stream_manager(
    args: DeployStreamManagerArgs,
    client: Arc<impl Middleware>,
) -> Result<(), ScriptError> {
    info!("Deploying StreamManager...");

    // Can `unwrap` here since the factory address constant is known to be valid hex
    let factory_address = Address::from_str(STREAM_MANAGER_FACTORY_ADDRESS).unwrap();
    let factory = StreamManagerFactory::new(factory_address, client);

    let call = factory.deploy_stream_manager(U256::from(args.salt_nonce));
    let pending = call
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    let receipt = await_confirmation(pending).await?;

    // Report the created instance's address exactly as the receipt carries it
    let stream_manager_address = receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment("confirmed receipt carries no contract address".to_string())
    })?;

    println!("StreamManager deployed at {stream_manager_address:#x}");

    Ok(())
}
