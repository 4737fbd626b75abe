//! Operator supplied deployment parameters.

use std::fmt;

use crate::ParameterError;

/// Parameters for deploying token instances.
///
/// Created empty at start-up and replaced wholesale whenever the operator sets new
/// parameters. The orchestrator only ever reads them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DeploymentParameters {
    /// Hex encoded private key used to sign deployment transactions.
    pub signing_key: String,
    /// Base name of the token.
    pub token_name: String,
    /// Base symbol of the token.
    pub token_symbol: String,
    /// JSON-RPC endpoint of the target chain.
    pub rpc_endpoint: String,
}

impl DeploymentParameters {
    pub fn new(
        signing_key: impl Into<String>,
        token_name: impl Into<String>,
        token_symbol: impl Into<String>,
        rpc_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            signing_key: signing_key.into().trim().to_string(),
            token_name: token_name.into().trim().to_string(),
            token_symbol: token_symbol.into().trim().to_string(),
            rpc_endpoint: rpc_endpoint.into().trim().to_string(),
        }
    }

    /// Check the connection parameters needed before any network call.
    pub fn ensure_connectable(&self) -> Result<(), ParameterError> {
        if self.signing_key.is_empty() {
            return Err(ParameterError::MissingSigningKey);
        }
        if self.rpc_endpoint.is_empty() {
            return Err(ParameterError::MissingRpcEndpoint);
        }
        Ok(())
    }

    /// Check that every parameter is set.
    pub fn ensure_complete(&self) -> Result<(), ParameterError> {
        self.ensure_connectable()?;
        if self.token_name.is_empty() {
            return Err(ParameterError::MissingTokenName);
        }
        if self.token_symbol.is_empty() {
            return Err(ParameterError::MissingTokenSymbol);
        }
        Ok(())
    }

    /// Whether the operator has set anything at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Debug for DeploymentParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentParameters")
            .field("signing_key", &redact(&self.signing_key))
            .field("token_name", &self.token_name)
            .field("token_symbol", &self.token_symbol)
            .field("rpc_endpoint", &self.rpc_endpoint)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let params = DeploymentParameters::default();
        assert!(params.is_empty());
        assert_eq!(
            params.ensure_connectable(),
            Err(ParameterError::MissingSigningKey)
        );
    }

    #[test]
    fn test_missing_rpc_endpoint() {
        let params = DeploymentParameters::new("0xabc", "Tok", "TKN", "  ");
        assert_eq!(
            params.ensure_connectable(),
            Err(ParameterError::MissingRpcEndpoint)
        );
    }

    #[test]
    fn test_complete_requires_name_and_symbol() {
        let params = DeploymentParameters::new("0xabc", "", "TKN", "http://localhost:8545");
        assert!(params.ensure_connectable().is_ok());
        assert_eq!(
            params.ensure_complete(),
            Err(ParameterError::MissingTokenName)
        );
    }

    #[test]
    fn test_debug_redacts_signing_key() {
        let params = DeploymentParameters::new(
            "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
            "Tok",
            "TKN",
            "http://localhost:8545",
        );
        let debug = format!("{:?}", params);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("59c6995e"));
    }
}
