//! Type definitions used throughout the deploy scripts

use std::{collections::BTreeMap, fs::File, io::Read, path::Path, str::FromStr};

use ethers::types::{Address, H256};
use serde::Deserialize;

use crate::{
    constants::{DETERMINISTIC_DEPLOYER_ADDRESS, GRANT_CREATOR_SALT},
    errors::ScriptError,
};

/// The per-network deployment configuration, mapping network names to the
/// dependency contract addresses deployed on that network
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct NetworkConfig {
    /// The configuration records, keyed by network name
    networks: BTreeMap<String, DeploymentConfig>,
}

impl NetworkConfig {
    /// Parse the network configuration from a JSON document
    pub fn from_json(contents: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(contents).map_err(|e| ScriptError::ConfigRead(e.to_string()))
    }

    /// Read and parse the network configuration from the file at the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let mut file_contents = String::new();
        File::open(path)
            .map_err(|e| ScriptError::ConfigRead(e.to_string()))?
            .read_to_string(&mut file_contents)
            .map_err(|e| ScriptError::ConfigRead(e.to_string()))?;

        Self::from_json(&file_contents)
    }

    /// Look up the configuration record for the given network.
    ///
    /// The lookup is exact, with no fallback network: a record borrowed from
    /// another network would deploy a contract wired to that network's
    /// dependency addresses.
    pub fn for_network(&self, network: &str) -> Result<&DeploymentConfig, ScriptError> {
        self.networks
            .get(network)
            .ok_or_else(|| ScriptError::MissingNetwork(network.to_string()))
    }
}

/// The dependency contract addresses the `GrantCreator` constructor is wired
/// with on a single network
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DeploymentConfig {
    /// Address of the Hats protocol contract
    #[serde(rename = "Hats")]
    pub hats: Address,
    /// Address of the chaining eligibility module factory
    #[serde(rename = "ChainingEligibilityFactory")]
    pub chaining_eligibility_factory: Address,
    /// Address of the agreement eligibility module factory
    #[serde(rename = "AgreementEligibilityFactory")]
    pub agreement_eligibility_factory: Address,
    /// Address of the allowlist eligibility module factory
    #[serde(rename = "AllowlistEligibilityFactory")]
    pub allowlist_eligibility_factory: Address,
    /// Address of the Hats signer gate factory
    #[serde(rename = "HatsSignerGateFactory")]
    pub hats_signer_gate_factory: Address,
    /// Address of the Sablier lockup-linear streaming contract
    #[serde(rename = "LockupLinear")]
    pub lockup_linear: Address,
    /// Address of the ZK token contract
    #[serde(rename = "ZKToken")]
    pub zk_token: Address,
    /// Address of the recipient branch root
    #[serde(rename = "RecipientBranchRoot")]
    pub recipient_branch_root: Address,
}

impl DeploymentConfig {
    /// The `GrantCreator` constructor arguments, in declared order.
    ///
    /// The order must exactly match the contract's constructor signature: a
    /// reordering deploys successfully but wires the contract incorrectly.
    pub fn constructor_args(&self) -> [Address; 8] {
        [
            self.hats,
            self.chaining_eligibility_factory,
            self.agreement_eligibility_factory,
            self.allowlist_eligibility_factory,
            self.hats_signer_gate_factory,
            self.lockup_linear,
            self.zk_token,
            self.recipient_branch_root,
        ]
    }
}

/// The fixed parameters of a deterministic (CREATE2) deployment
#[derive(Clone, Copy, Debug)]
pub struct Create2Policy {
    /// The deterministic deployment proxy the deployment transaction is sent to
    pub deployer: Address,
    /// The salt under which the contract is deployed
    pub salt: H256,
}

impl Create2Policy {
    /// The fixed policy under which production deployments are made
    pub fn standard() -> Self {
        // Can `unwrap` here since both constants are known to be valid hex
        Self {
            deployer: Address::from_str(DETERMINISTIC_DEPLOYER_ADDRESS).unwrap(),
            salt: H256::from_str(GRANT_CREATOR_SALT).unwrap(),
        }
    }
}
