//! Definitions of Solidity functions called during deployment

use ethers::contract::abigen;

abigen!(
    StreamManagerFactory,
    r#"[
        function deployStreamManager(uint256 saltNonce) external returns (address)
    ]"#,
);
