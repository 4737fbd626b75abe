//! Command builder for solc.

use std::path::Path;

/// Builder for solc arguments.
#[derive(Debug, Clone)]
pub struct SolcCmdBuilder {
    source: String,
    output_dir: String,
}

impl SolcCmdBuilder {
    /// Create a new solc command builder for a single source file.
    pub fn new(source: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            source: source.as_ref().display().to_string(),
            output_dir: output_dir.as_ref().display().to_string(),
        }
    }

    /// Build the arguments as a vector of strings.
    pub fn build(self) -> Vec<String> {
        vec![
            "--abi".to_string(),
            "--bin".to_string(),
            self.source,
            "-o".to_string(),
            self.output_dir,
            // solc refuses to replace files left by a previous run without it.
            "--overwrite".to_string(),
        ]
    }
}
