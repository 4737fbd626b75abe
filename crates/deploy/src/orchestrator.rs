//! Deploying one or many token instances.

use std::{fmt, time::Duration};

use alloy_core::primitives::Address;
use tokio::sync::Mutex;

use crate::{
    ChainConnector, ContractDeployer, DeployFailure, DeployedContract, DeploymentParameters,
    InvalidCountError, ParameterError, TokenBinding,
};

/// Upper bound on the result buffer reserved up front for a batch.
const RESULTS_CAPACITY_HINT: u64 = 256;

/// Name and symbol a token instance is deployed with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceLabel {
    pub name: String,
    pub symbol: String,
}

impl InstanceLabel {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// Label of the `index`-th (1-based) instance of a batch: `<name>_<index>` / `<symbol><index>`.
    pub fn nth(base_name: &str, base_symbol: &str, index: u64) -> Self {
        Self {
            name: format!("{}_{}", base_name, index),
            symbol: format!("{}{}", base_symbol, index),
        }
    }

    fn check(&self) -> Result<(), ParameterError> {
        if self.name.is_empty() {
            return Err(ParameterError::MissingTokenName);
        }
        if self.symbol.is_empty() {
            return Err(ParameterError::MissingTokenSymbol);
        }
        Ok(())
    }
}

impl fmt::Display for InstanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

/// Outcome of one deployment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    /// 1-based position of the instance in its batch. Always 1 for single deployments.
    pub index: u64,
    pub label: InstanceLabel,
    pub outcome: Result<DeployedContract, DeployFailure>,
}

impl DeploymentResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Address of the deployed contract, if the deployment succeeded.
    pub fn address(&self) -> Option<Address> {
        self.outcome.as_ref().ok().map(|contract| contract.address)
    }

    pub fn failure(&self) -> Option<&DeployFailure> {
        self.outcome.as_ref().err()
    }
}

/// Drives deployments of the token through a [`ChainConnector`].
///
/// Only one transaction is in flight per orchestrator at any time, so transactions
/// from the operator key get strictly increasing nonces.
pub struct DeploymentOrchestrator<C> {
    connector: C,
    confirmation_timeout: Option<Duration>,
    in_flight: Mutex<()>,
}

impl<C: ChainConnector> DeploymentOrchestrator<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            confirmation_timeout: None,
            in_flight: Mutex::new(()),
        }
    }

    /// Stop waiting for a receipt after `timeout`. Waits indefinitely when `None`.
    pub fn confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Deploy a single instance named `name` / `symbol`.
    ///
    /// Missing parameters are reported without touching the network.
    pub async fn deploy_one(
        &self,
        params: &DeploymentParameters,
        binding: &TokenBinding,
        name: &str,
        symbol: &str,
    ) -> DeploymentResult {
        let label = InstanceLabel::new(name, symbol);

        let outcome = match params.ensure_connectable().and_then(|_| label.check()) {
            Ok(()) => match self.open(params) {
                Ok(deployer) => self.submit(&deployer, binding, &label).await,
                Err(failure) => Err(failure),
            },
            Err(e) => Err(e.into()),
        };

        let result = DeploymentResult {
            index: 1,
            label,
            outcome,
        };
        report(&result);
        result
    }

    /// Deploy `count` instances named `<base_name>_<i>` / `<base_symbol><i>` for `i` in `1..=count`.
    ///
    /// A failed instance never stops the batch: exactly `count` results come back,
    /// in order. The connection is opened once and reused for every instance.
    pub async fn deploy_batch(
        &self,
        params: &DeploymentParameters,
        binding: &TokenBinding,
        base_name: &str,
        base_symbol: &str,
        count: i64,
    ) -> Result<Vec<DeploymentResult>, InvalidCountError> {
        if count < 1 {
            return Err(InvalidCountError(count));
        }
        let count = count as u64;

        let session = params
            .ensure_connectable()
            .and_then(|_| InstanceLabel::new(base_name, base_symbol).check())
            .map_err(DeployFailure::from)
            .and_then(|_| self.open(params));

        tracing::info!(
            count,
            base_name,
            base_symbol,
            "Starting batch deployment..."
        );

        let mut results = Vec::with_capacity(count.min(RESULTS_CAPACITY_HINT) as usize);
        for index in 1..=count {
            let label = InstanceLabel::nth(base_name, base_symbol, index);
            tracing::info!(index, count, name = %label.name, symbol = %label.symbol, "⏳ Deploying instance");

            let outcome = match &session {
                Ok(deployer) => self.submit(deployer, binding, &label).await,
                Err(failure) => Err(failure.clone()),
            };

            let result = DeploymentResult {
                index,
                label,
                outcome,
            };
            report(&result);
            results.push(result);
        }

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        tracing::info!(
            succeeded,
            failed = results.len() - succeeded,
            "Batch deployment finished"
        );

        Ok(results)
    }

    fn open(&self, params: &DeploymentParameters) -> Result<C::Deployer, DeployFailure> {
        self.connector
            .connect(&params.rpc_endpoint, &params.signing_key)
            .map_err(DeployFailure::from)
    }

    async fn submit(
        &self,
        deployer: &C::Deployer,
        binding: &TokenBinding,
        label: &InstanceLabel,
    ) -> Result<DeployedContract, DeployFailure> {
        let _in_flight = self.in_flight.lock().await;

        tracing::info!(
            deployer = %deployer.deployer_address(),
            name = %label.name,
            symbol = %label.symbol,
            "Deploying contract..."
        );

        let deployment = deployer.deploy_contract(binding.deploy_code(&label.name, &label.symbol));

        let outcome = match self.confirmation_timeout {
            Some(limit) => tokio::time::timeout(limit, deployment)
                .await
                .map_err(|_| DeployFailure::Timeout(limit))?,
            None => deployment.await,
        };

        Ok(outcome?)
    }
}

fn report(result: &DeploymentResult) {
    match &result.outcome {
        Ok(contract) => tracing::info!(
            index = result.index,
            name = %result.label.name,
            address = %contract.address,
            tx_hash = %contract.tx_hash,
            "✓ Contract deployed"
        ),
        Err(e) => tracing::error!(
            index = result.index,
            name = %result.label.name,
            kind = e.kind(),
            error = %e,
            "✗ Contract deployment failed"
        ),
    }
}
