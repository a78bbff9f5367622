//! Scripts for deploying the grant-streaming smart contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
mod commands;
pub mod constants;
pub mod errors;
mod solidity;
pub mod types;
pub mod utils;
