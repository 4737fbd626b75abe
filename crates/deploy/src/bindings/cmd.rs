//! Command builder for the binding generator.

use std::path::Path;

/// Builder for `solidity generate` arguments.
#[derive(Debug, Clone)]
pub struct GenerateCmdBuilder {
    abi: String,
    bin: String,
    output_dir: String,
    namespace: String,
}

impl GenerateCmdBuilder {
    /// Create a new builder for the given ABI and bytecode files.
    pub fn new(abi: impl AsRef<Path>, bin: impl AsRef<Path>) -> Self {
        Self {
            abi: abi.as_ref().display().to_string(),
            bin: bin.as_ref().display().to_string(),
            output_dir: "src".to_string(),
            namespace: "com.token".to_string(),
        }
    }

    /// Set the root output directory.
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().display().to_string();
        self
    }

    /// Set the namespace of the generated binding.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Build the arguments as a vector of strings.
    pub fn build(self) -> Vec<String> {
        vec![
            "solidity".to_string(),
            "generate".to_string(),
            "-a".to_string(),
            self.abi,
            "-b".to_string(),
            self.bin,
            "-o".to_string(),
            self.output_dir,
            "-p".to_string(),
            self.namespace,
        ]
    }
}
