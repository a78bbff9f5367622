//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading or parsing the network configuration file
    ConfigRead(String),
    /// The active network has no entry in the network configuration file
    MissingNetwork(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error reading or parsing a compiled contract artifact
    ArtifactParsing(String),
    /// Error constructing calldata for a deployment or contract method
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Timed out waiting for a submitted transaction to be confirmed
    ConfirmationTimeout(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ConfigRead(s) => write!(f, "error reading network config: {}", s),
            ScriptError::MissingNetwork(s) => {
                write!(f, "no configuration entry for network `{}`", s)
            }
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::ConfirmationTimeout(s) => {
                write!(f, "timed out awaiting confirmation: {}", s)
            }
        }
    }
}

impl Error for ScriptError {}
