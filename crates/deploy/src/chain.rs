//! Connection to the target chain.

use std::{future::Future, str::FromStr, time::Duration};

use alloy_core::primitives::{Address, Bytes, TxHash};
use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use url::Url;

use crate::DeploymentError;

/// A contract confirmed on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: TxHash,
}

/// Submits creation transactions signed by a single credential.
pub trait ContractDeployer: Send + Sync {
    /// Address of the signing account.
    fn deployer_address(&self) -> Address;

    /// Submit `init_code` as a creation transaction and wait until it is mined.
    fn deploy_contract(
        &self,
        init_code: Bytes,
    ) -> impl Future<Output = Result<DeployedContract, DeploymentError>> + Send;
}

/// Opens signed connections to an RPC endpoint.
pub trait ChainConnector: Send + Sync {
    type Deployer: ContractDeployer;

    fn connect(
        &self,
        rpc_endpoint: &str,
        signing_key: &str,
    ) -> Result<Self::Deployer, DeploymentError>;
}

/// Derive signing credentials from a hex private key (with or without `0x`).
pub fn parse_signer(signing_key: &str) -> Result<PrivateKeySigner, DeploymentError> {
    PrivateKeySigner::from_str(signing_key.trim())
        .map_err(|e| DeploymentError::InvalidSigningKey(e.to_string()))
}

/// Parse an http(s) RPC endpoint.
pub fn parse_endpoint(rpc_endpoint: &str) -> Result<Url, DeploymentError> {
    let invalid = |message: String| DeploymentError::InvalidRpcEndpoint {
        endpoint: rpc_endpoint.to_string(),
        message,
    };

    let url = Url::parse(rpc_endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(invalid(format!("unsupported scheme `{}`", scheme))),
    }
}

/// Connects through an alloy HTTP provider.
///
/// The provider fills gas, nonce and chain id with its recommended fillers and
/// signs with the operator key.
#[derive(Debug, Clone, Default)]
pub struct AlloyConnector {
    poll_interval: Option<Duration>,
}

impl AlloyConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override how often receipts are polled while waiting for confirmation.
    pub fn poll_interval(mut self, interval: Option<Duration>) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl ChainConnector for AlloyConnector {
    type Deployer = AlloyDeployer;

    fn connect(&self, rpc_endpoint: &str, signing_key: &str) -> Result<AlloyDeployer, DeploymentError> {
        let signer = parse_signer(signing_key)?;
        let url = parse_endpoint(rpc_endpoint)?;
        let address = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url);

        if let Some(interval) = self.poll_interval {
            provider.client().set_poll_interval(interval);
        }

        tracing::debug!(%address, rpc_endpoint, "Connected signer to RPC endpoint");

        Ok(AlloyDeployer {
            provider: provider.erased(),
            address,
        })
    }
}

/// A signed alloy provider bound to one account.
#[derive(Clone)]
pub struct AlloyDeployer {
    provider: DynProvider,
    address: Address,
}

impl ContractDeployer for AlloyDeployer {
    fn deployer_address(&self) -> Address {
        self.address
    }

    async fn deploy_contract(&self, init_code: Bytes) -> Result<DeployedContract, DeploymentError> {
        let request = TransactionRequest::default()
            .with_from(self.address)
            .with_deploy_code(init_code);

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|e| DeploymentError::Submission(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(%tx_hash, "Deployment transaction submitted, waiting for confirmation...");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| DeploymentError::Confirmation(e.to_string()))?;

        if !receipt.status() {
            return Err(DeploymentError::Reverted {
                tx_hash: tx_hash.to_string(),
            });
        }

        let address = receipt
            .contract_address
            .ok_or_else(|| DeploymentError::MissingContractAddress {
                tx_hash: tx_hash.to_string(),
            })?;

        tracing::debug!(
            %tx_hash,
            %address,
            block_number = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "Deployment transaction mined"
        );

        Ok(DeployedContract { address, tx_hash })
    }
}
