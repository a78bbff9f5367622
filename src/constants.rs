//! Constants used in the deploy scripts

/// The name of the contract deployed by the `deploy-grant-creator` command
pub const GRANT_CREATOR_CONTRACT_NAME: &str = "GrantCreator";

/// The salt under which the `GrantCreator` contract is deployed.
///
/// Fixed so that deployments with identical bytecode and constructor arguments
/// land at the same address on every supported network.
pub const GRANT_CREATOR_SALT: &str =
    "0x0000000000000000000000000000000000000000000000000000000000004a75";

/// The address of the deterministic deployment proxy through which CREATE2
/// deployments are made.
///
/// This is the well-known singleton from https://github.com/Arachnid/deterministic-deployment-proxy,
/// assumed to be present on every supported network.
pub const DETERMINISTIC_DEPLOYER_ADDRESS: &str = "0x4e59b44847b379578588920cA78FbF26c0B4956C";

/// The address of the pre-deployed `StreamManagerFactory` contract.
///
/// Assumed already deployed and correct for the active network; this is not
/// verified at run time.
pub const STREAM_MANAGER_FACTORY_ADDRESS: &str = "0x0ab76D0635E50A644433B31f1bb8b0EC5FB19fa4";

/// The default salt nonce passed to the stream manager factory's creation
/// entry point
pub const DEFAULT_STREAM_MANAGER_SALT_NONCE: u64 = 2;

/// The default path to the per-network deployment configuration file
pub const DEFAULT_NETWORK_CONFIG_PATH: &str = "NetworkConfig.json";

/// The default directory containing compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The extension of a compiled contract artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: usize = 1;

/// The maximum number of seconds to wait for a submitted transaction to be
/// confirmed
pub const CONFIRMATION_TIMEOUT_SECS: u64 = 300;
