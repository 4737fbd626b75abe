//! Compiler outputs on disk.

use std::path::{Path, PathBuf};

use alloy_core::{json_abi::JsonAbi, primitives::Bytes};

use crate::{ArtifactLayout, CompileError, GenerateError};

/// The ABI and bytecode produced by one compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    pub abi_path: PathBuf,
    pub bin_path: PathBuf,
}

impl CompiledArtifact {
    /// Find the artifacts described by `layout`, failing if either file is absent.
    pub fn locate(layout: &ArtifactLayout) -> Result<Self, CompileError> {
        let abi_path = layout.abi_path();
        let bin_path = layout.bin_path();

        for path in [&abi_path, &bin_path] {
            if !path.is_file() {
                return Err(CompileError::MissingArtifact(path.clone()));
            }
        }

        Ok(Self { abi_path, bin_path })
    }

    /// Parse the ABI file.
    pub fn load_abi(&self) -> Result<JsonAbi, GenerateError> {
        let content = read(&self.abi_path)?;
        serde_json::from_str(&content).map_err(|e| GenerateError::InvalidAbi {
            path: self.abi_path.clone(),
            message: e.to_string(),
        })
    }

    /// Decode the creation bytecode. solc writes plain hex; a `0x` prefix is tolerated.
    pub fn load_bytecode(&self) -> Result<Bytes, GenerateError> {
        let content = read(&self.bin_path)?;
        let hex_code = content.trim();
        let hex_code = hex_code.strip_prefix("0x").unwrap_or(hex_code);

        if hex_code.is_empty() {
            return Err(GenerateError::InvalidBytecode {
                path: self.bin_path.clone(),
                message: "bytecode is empty (abstract contract or interface?)".to_string(),
            });
        }

        hex::decode(hex_code)
            .map(Bytes::from)
            .map_err(|e| GenerateError::InvalidBytecode {
                path: self.bin_path.clone(),
                message: e.to_string(),
            })
    }
}

fn read(path: &Path) -> Result<String, GenerateError> {
    std::fs::read_to_string(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}
