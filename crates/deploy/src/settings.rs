use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// The default name for the tokup configuration file.
pub const TOKUP_CONF_FILENAME: &str = "Tokup.toml";

/// Default compiler program.
pub const DEFAULT_SOLC_PROGRAM: &str = "solc";
/// Default binding generator program.
pub const DEFAULT_BINDING_GENERATOR_PROGRAM: &str = "web3j";

/// Where the contract source lives and where the tools write their outputs.
///
/// All paths are relative to the working directory unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactLayout {
    /// The Solidity source file.
    pub source: PathBuf,
    /// Directory receiving the ABI and bytecode.
    pub build_dir: PathBuf,
    /// Root directory receiving the generated binding.
    pub generated_dir: PathBuf,
    /// Logical namespace of the generated binding (dot separated).
    pub namespace: String,
    /// Name of the contract inside the source file.
    pub contract_name: String,
    /// File extension of the generated binding source.
    pub binding_extension: String,
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self {
            source: PathBuf::from("contracts/Token.sol"),
            build_dir: PathBuf::from("contracts/build"),
            generated_dir: PathBuf::from("src"),
            namespace: "com.token".to_string(),
            contract_name: "Token".to_string(),
            binding_extension: "java".to_string(),
        }
    }
}

impl ArtifactLayout {
    /// Expected ABI output of the compiler.
    pub fn abi_path(&self) -> PathBuf {
        self.build_dir.join(format!("{}.abi", self.contract_name))
    }

    /// Expected bytecode output of the compiler.
    pub fn bin_path(&self) -> PathBuf {
        self.build_dir.join(format!("{}.bin", self.contract_name))
    }

    /// Expected output of the binding generator.
    pub fn binding_path(&self) -> PathBuf {
        let mut path = self.generated_dir.clone();
        path.extend(self.namespace.split('.').filter(|s| !s.is_empty()));
        path.join(format!(
            "{}.{}",
            self.contract_name, self.binding_extension
        ))
    }

    /// Rebase every relative path onto `root`.
    pub fn rooted_at(&self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            source: root.join(&self.source),
            build_dir: root.join(&self.build_dir),
            generated_dir: root.join(&self.generated_dir),
            ..self.clone()
        }
    }
}

/// An external program together with the arguments that precede the ones tokup adds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    pub program: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add leading arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|s| s.into()));
        self
    }
}

/// External tools used to compile and bind the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub solc: ToolCommand,
    pub binding_generator: ToolCommand,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            solc: ToolCommand::new(DEFAULT_SOLC_PROGRAM),
            binding_generator: ToolCommand::new(DEFAULT_BINDING_GENERATOR_PROGRAM),
        }
    }
}

/// Chain interaction settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Give up waiting for a deployment receipt after this many seconds.
    /// Waits forever when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_timeout_secs: Option<u64>,
    /// Receipt polling interval in milliseconds. Uses the provider default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,
}

impl DeployConfig {
    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs.map(Duration::from_secs)
    }

    pub fn poll_interval(&self) -> Option<Duration> {
        self.poll_interval_ms.map(Duration::from_millis)
    }
}

/// Complete tokup configuration. The signing key is never part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layout: ArtifactLayout,
    pub toolchain: ToolchainConfig,
    pub deploy: DeployConfig,
}

impl Settings {
    /// Resolve a configuration path: the file itself, or `Tokup.toml` inside a directory.
    pub fn config_file(path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file or directory not found: {}",
                path.display()
            );
        }

        if path.is_dir() {
            Ok(path.join(TOKUP_CONF_FILENAME))
        } else {
            Ok(path.to_path_buf())
        }
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings to TOML")
    }
}
