//! Binding generation for the compiled token.

mod cmd;
mod token;

use std::future::Future;

pub use cmd::GenerateCmdBuilder;
pub use token::TokenBinding;

use crate::{ArtifactLayout, CompiledArtifact, GenerateError, ToolCommand, process};

/// Produces a typed contract handle from compiled artifacts.
///
/// Callers must only pass artifacts returned by a successful compile.
pub trait BindingGenerator: Send + Sync {
    fn generate(
        &self,
        artifact: &CompiledArtifact,
    ) -> impl Future<Output = Result<TokenBinding, GenerateError>> + Send;
}

/// Generates bindings with an external `solidity generate` tool (web3j by default).
#[derive(Debug, Clone)]
pub struct CliBindingGenerator {
    command: ToolCommand,
    layout: ArtifactLayout,
}

impl CliBindingGenerator {
    pub fn new(command: ToolCommand, layout: ArtifactLayout) -> Self {
        Self { command, layout }
    }
}

impl BindingGenerator for CliBindingGenerator {
    async fn generate(&self, artifact: &CompiledArtifact) -> Result<TokenBinding, GenerateError> {
        let binding_path = self.layout.binding_path();

        match std::fs::remove_file(&binding_path) {
            Ok(()) => tracing::debug!(path = %binding_path.display(), "Removed previous binding"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(GenerateError::Io {
                    path: binding_path,
                    source,
                });
            }
        }

        tracing::info!(
            namespace = %self.layout.namespace,
            output_dir = %self.layout.generated_dir.display(),
            "Generating contract binding..."
        );

        let args = GenerateCmdBuilder::new(&artifact.abi_path, &artifact.bin_path)
            .output_dir(&self.layout.generated_dir)
            .namespace(&self.layout.namespace)
            .build();

        process::run_tool("binding-generator", &self.command, &args)
            .await
            .map_err(|source| GenerateError::Spawn {
                program: self.command.program.clone(),
                source,
            })?;

        if !binding_path.is_file() {
            return Err(GenerateError::MissingBinding(binding_path));
        }

        let binding = TokenBinding::from_artifact(artifact, &binding_path)?;

        tracing::info!(path = %binding_path.display(), "✓ Binding generated");

        Ok(binding)
    }
}
