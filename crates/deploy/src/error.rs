//! Error taxonomy for the compile → bind → deploy pipeline.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// A required deployment parameter is missing.
///
/// Detected locally before any I/O takes place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("signing key is not set")]
    MissingSigningKey,
    #[error("RPC endpoint is not set")]
    MissingRpcEndpoint,
    #[error("token name is not set")]
    MissingTokenName,
    #[error("token symbol is not set")]
    MissingTokenSymbol,
}

/// The compiler did not produce the expected artifacts.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("contract source not found: {}", .0.display())]
    MissingSource(PathBuf),
    #[error("compiler did not produce {}", .0.display())]
    MissingArtifact(PathBuf),
    #[error("failed to run compiler `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to prepare build directory {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The binding generator did not produce a usable binding.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("binding generator did not produce {}", .0.display())]
    MissingBinding(PathBuf),
    #[error("failed to run binding generator `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read artifact {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid ABI in {}: {message}", path.display())]
    InvalidAbi { path: PathBuf, message: String },
    #[error("invalid bytecode in {}: {message}", path.display())]
    InvalidBytecode { path: PathBuf, message: String },
}

/// Failure of the compile → generate sequence.
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("compilation failed")]
    Compile(#[from] CompileError),
    #[error("binding generation failed")]
    Generate(#[from] GenerateError),
}

/// A batch was requested with fewer than one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid contract count {0}, at least one instance is required")]
pub struct InvalidCountError(pub i64);

/// Failure while connecting, signing, submitting or confirming a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeploymentError {
    #[error("invalid signing key: {0}")]
    InvalidSigningKey(String),
    #[error("invalid RPC endpoint `{endpoint}`: {message}")]
    InvalidRpcEndpoint { endpoint: String, message: String },
    #[error("constructor does not accept (string, string): {0}")]
    ConstructorMismatch(String),
    #[error("failed to submit deployment transaction: {0}")]
    Submission(String),
    #[error("failed to confirm deployment transaction: {0}")]
    Confirmation(String),
    #[error("deployment transaction {tx_hash} reverted")]
    Reverted { tx_hash: String },
    #[error("receipt of transaction {tx_hash} carries no contract address")]
    MissingContractAddress { tx_hash: String },
}

/// Why a single deployment instance did not produce a contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeployFailure {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Deployment(#[from] DeploymentError),
    #[error("deployment not confirmed within {0:?}")]
    Timeout(Duration),
}

impl DeployFailure {
    /// Short label of the failure kind, used in result tables.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parameter(_) => "parameter",
            Self::Deployment(_) => "deployment",
            Self::Timeout(_) => "timeout",
        }
    }
}
