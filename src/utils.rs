//! Utilities for the deploy scripts.

use std::{fs::File, io::Read, path::Path, str::FromStr, sync::Arc, time::Duration};

use ethers::{
    abi::{Contract, Token},
    middleware::SignerMiddleware,
    providers::{Http, JsonRpcClient, Middleware, PendingTransaction, Provider},
    signers::{LocalWallet, Signer},
    types::{Bytes, TransactionReceipt, H256, U64},
};
use serde::Deserialize;
use tokio::time::timeout;

use crate::{
    constants::{ARTIFACT_EXTENSION, CONFIRMATION_TIMEOUT_SECS, NUM_DEPLOY_CONFIRMATIONS},
    errors::ScriptError,
};

/// Sets up the client with which to deploy and interact with contracts,
/// from the deployer's private key and the network RPC URL.
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<Arc<impl Middleware>, ScriptError> {
    let provider = Provider::<Http>::try_from(rpc_url)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = LocalWallet::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .as_u64();
    let client = Arc::new(SignerMiddleware::new(
        provider,
        wallet.with_chain_id(chain_id),
    ));

    Ok(client)
}

/// A compiled contract artifact, as emitted by the contract build pipeline
#[derive(Deserialize)]
pub struct ContractArtifact {
    /// The contract ABI
    pub abi: Contract,
    /// The contract deployment bytecode
    pub bytecode: Bytes,
}

/// Parse a compiled contract artifact from its JSON contents
pub fn parse_artifact(contents: &str) -> Result<ContractArtifact, ScriptError> {
    serde_json::from_str(contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
}

/// Load the compiled artifact for the given contract by name from the
/// artifacts directory
pub fn load_artifact(
    artifacts_dir: &Path,
    contract_name: &str,
) -> Result<ContractArtifact, ScriptError> {
    let artifact_path = artifacts_dir.join(format!("{contract_name}.{ARTIFACT_EXTENSION}"));

    let mut file_contents = String::new();
    File::open(&artifact_path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", artifact_path.display())))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    parse_artifact(&file_contents)
}

/// Build the init code for a deployment of the given artifact: the contract
/// bytecode followed by the ABI-encoded constructor arguments
pub fn build_init_code(
    artifact: &ContractArtifact,
    constructor_args: &[Token],
) -> Result<Vec<u8>, ScriptError> {
    let constructor = artifact.abi.constructor().ok_or_else(|| {
        ScriptError::ArtifactParsing("artifact ABI declares no constructor".to_string())
    })?;

    constructor
        .encode_input(artifact.bytecode.to_vec(), constructor_args)
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}

/// Build the calldata with which to call the deterministic deployment proxy:
/// the deployment salt followed by the init code of the deployed contract
pub fn deterministic_deploy_calldata(salt: H256, init_code: &[u8]) -> Vec<u8> {
    let mut calldata = Vec::with_capacity(H256::len_bytes() + init_code.len());
    calldata.extend_from_slice(salt.as_bytes());
    calldata.extend_from_slice(init_code);
    calldata
}

/// Await the confirmation of a submitted transaction, bounded by the
/// configured confirmation timeout, returning the confirmed receipt
pub async fn await_confirmation<P: JsonRpcClient>(
    pending: PendingTransaction<'_, P>,
) -> Result<TransactionReceipt, ScriptError> {
    let receipt = timeout(
        Duration::from_secs(CONFIRMATION_TIMEOUT_SECS),
        pending.confirmations(NUM_DEPLOY_CONFIRMATIONS),
    )
    .await
    .map_err(|_| {
        ScriptError::ConfirmationTimeout(format!(
            "transaction not confirmed after {CONFIRMATION_TIMEOUT_SECS}s"
        ))
    })?
    .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
    .ok_or_else(|| {
        ScriptError::ContractDeployment("transaction dropped from the mempool".to_string())
    })?;

    if receipt.status == Some(U64::zero()) {
        return Err(ScriptError::ContractDeployment(format!(
            "transaction {:#x} reverted",
            receipt.transaction_hash
        )));
    }

    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use ethers::{
        abi::Token,
        types::{Address, H256},
        utils::get_create2_address,
    };

    use crate::constants::GRANT_CREATOR_SALT;

    use super::{build_init_code, deterministic_deploy_calldata, parse_artifact, ContractArtifact};

    /// A minimal artifact with the `GrantCreator` constructor shape
    const TEST_ARTIFACT: &str = r#"{
        "contractName": "GrantCreator",
        "abi": [
            {
                "type": "constructor",
                "stateMutability": "nonpayable",
                "inputs": [
                    { "name": "_hats", "type": "address" },
                    { "name": "_chainingEligibilityFactory", "type": "address" },
                    { "name": "_agreementEligibilityFactory", "type": "address" },
                    { "name": "_allowlistEligibilityFactory", "type": "address" },
                    { "name": "_hatsSignerGateFactory", "type": "address" },
                    { "name": "_lockupLinear", "type": "address" },
                    { "name": "_zkToken", "type": "address" },
                    { "name": "_recipientBranchRoot", "type": "address" }
                ]
            }
        ],
        "bytecode": "0x60806040523480156100105760006000fd5b50610015565b610100806100246000396000f3fe"
    }"#;

    /// Eight distinct constructor arguments for the test artifact
    fn test_constructor_args() -> Vec<Token> {
        (1..=8u64)
            .map(|i| Token::Address(Address::from_low_u64_be(i)))
            .collect()
    }

    /// Parse the test artifact
    fn test_artifact() -> ContractArtifact {
        parse_artifact(TEST_ARTIFACT).unwrap()
    }

    /// The init code is the bytecode followed by the ABI-encoded constructor
    /// arguments
    #[test]
    fn test_init_code_layout() {
        let artifact = test_artifact();
        let args = test_constructor_args();

        let init_code = build_init_code(&artifact, &args).unwrap();

        let bytecode_len = artifact.bytecode.len();
        assert_eq!(&init_code[..bytecode_len], artifact.bytecode.as_ref());
        assert_eq!(&init_code[bytecode_len..], ethers::abi::encode(&args));
    }

    /// Identical (bytecode, constructor arguments, salt) must compute the same
    /// address on every invocation; varying the salt or the arguments must not
    #[test]
    fn test_address_determinism() {
        let deployer = Address::from_str("0x4e59b44847b379578588920cA78FbF26c0B4956C").unwrap();
        let salt = H256::from_str(GRANT_CREATOR_SALT).unwrap();

        let artifact = test_artifact();
        let init_code = build_init_code(&artifact, &test_constructor_args()).unwrap();

        let address = get_create2_address(deployer, salt, &init_code);
        let address_again = get_create2_address(deployer, salt, &init_code);
        assert_eq!(address, address_again);

        let other_salt = H256::from_low_u64_be(1);
        assert_ne!(address, get_create2_address(deployer, other_salt, &init_code));

        let mut other_args = test_constructor_args();
        other_args.reverse();
        let other_init_code = build_init_code(&artifact, &other_args).unwrap();
        assert_ne!(address, get_create2_address(deployer, salt, &other_init_code));
    }

    /// The deployment proxy calldata is the salt followed by the init code
    #[test]
    fn test_deploy_calldata_layout() {
        let salt = H256::from_str(GRANT_CREATOR_SALT).unwrap();
        let init_code = vec![0xde, 0xad, 0xbe, 0xef];

        let calldata = deterministic_deploy_calldata(salt, &init_code);

        assert_eq!(&calldata[..32], salt.as_bytes());
        assert_eq!(&calldata[32..], init_code.as_slice());
    }

    /// An artifact whose ABI declares no constructor is rejected
    #[test]
    fn test_constructorless_artifact() {
        let artifact = parse_artifact(r#"{ "abi": [], "bytecode": "0x6080" }"#).unwrap();

        let res = build_init_code(&artifact, &[]);
        assert!(res.is_err());
    }
}
