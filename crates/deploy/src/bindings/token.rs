//! Typed handle for deploying the token contract.

use std::path::{Path, PathBuf};

use alloy_core::{json_abi::JsonAbi, primitives::Bytes, sol_types::SolValue};

use crate::{CompiledArtifact, GenerateError};

/// Constructor parameter types the token must accept, in order.
const CONSTRUCTOR_TYPES: [&str; 2] = ["string", "string"];

/// A deployable token contract: creation bytecode checked against an ABI whose
/// constructor takes `(string name, string symbol)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBinding {
    bytecode: Bytes,
    binding_source: PathBuf,
}

impl TokenBinding {
    /// Build a binding, checking the constructor signature.
    pub fn new(
        abi: JsonAbi,
        bytecode: Bytes,
        binding_source: impl Into<PathBuf>,
        abi_path: &Path,
    ) -> Result<Self, GenerateError> {
        let inputs = abi
            .constructor()
            .map(|c| c.inputs.iter().map(|p| p.ty.as_str()).collect::<Vec<_>>())
            .unwrap_or_default();

        if inputs != CONSTRUCTOR_TYPES {
            return Err(GenerateError::InvalidAbi {
                path: abi_path.to_path_buf(),
                message: format!(
                    "expected constructor(string,string), found constructor({})",
                    inputs.join(",")
                ),
            });
        }

        Ok(Self {
            bytecode,
            binding_source: binding_source.into(),
        })
    }

    /// Load a binding from compiled artifacts.
    pub fn from_artifact(
        artifact: &CompiledArtifact,
        binding_source: impl Into<PathBuf>,
    ) -> Result<Self, GenerateError> {
        let abi = artifact.load_abi()?;
        let bytecode = artifact.load_bytecode()?;
        Self::new(abi, bytecode, binding_source, &artifact.abi_path)
    }

    /// Path of the generated binding source.
    pub fn binding_source(&self) -> &Path {
        &self.binding_source
    }

    /// Init code deploying a token called `name` with ticker `symbol`.
    pub fn deploy_code(&self, name: &str, symbol: &str) -> Bytes {
        let args = (name.to_string(), symbol.to_string()).abi_encode_params();
        [self.bytecode.as_ref(), args.as_slice()].concat().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN_ABI: &str = r#"[
        {"type":"constructor","inputs":[{"name":"name","type":"string","internalType":"string"},{"name":"symbol","type":"string","internalType":"string"}],"stateMutability":"nonpayable"},
        {"type":"function","name":"name","inputs":[],"outputs":[{"name":"","type":"string","internalType":"string"}],"stateMutability":"view"}
    ]"#;

    fn binding(abi: &str) -> Result<TokenBinding, GenerateError> {
        let abi: JsonAbi = serde_json::from_str(abi).unwrap();
        TokenBinding::new(
            abi,
            Bytes::from_static(&[0x60, 0x80]),
            "src/com/token/Token.java",
            Path::new("Token.abi"),
        )
    }

    #[test]
    fn test_deploy_code_appends_constructor_args() {
        let token = binding(TOKEN_ABI).unwrap();
        let code = token.deploy_code("Tok", "TKN");

        assert_eq!(&code[..2], &[0x60, 0x80]);
        // two offsets, then length + padded data for each string
        assert_eq!(code.len(), 2 + 6 * 32);
        assert_eq!(code[2 + 31], 0x40);
        assert_eq!(&code[2 + 3 * 32..2 + 3 * 32 + 3], b"Tok");
        assert_eq!(&code[2 + 5 * 32..2 + 5 * 32 + 3], b"TKN");
    }

    #[test]
    fn test_rejects_wrong_constructor() {
        let abi = r#"[{"type":"constructor","inputs":[{"name":"supply","type":"uint256"}],"stateMutability":"nonpayable"}]"#;
        assert!(matches!(
            binding(abi),
            Err(GenerateError::InvalidAbi { .. })
        ));
    }

    #[test]
    fn test_rejects_missing_constructor() {
        assert!(binding("[]").is_err());
    }
}
