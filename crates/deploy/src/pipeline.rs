//! The compile → bind sequence.

use std::path::PathBuf;

use crate::{BindingGenerator, Compiler, PrepareError, TokenBinding};

/// Compiles the token source and generates its binding, in that order.
///
/// The generator only ever sees artifacts from a compile that succeeded.
pub struct ArtifactPipeline<C, G> {
    source: PathBuf,
    compiler: C,
    generator: G,
}

impl<C: Compiler, G: BindingGenerator> ArtifactPipeline<C, G> {
    pub fn new(source: impl Into<PathBuf>, compiler: C, generator: G) -> Self {
        Self {
            source: source.into(),
            compiler,
            generator,
        }
    }

    /// Compile, then generate the binding.
    pub async fn prepare(&self) -> Result<TokenBinding, PrepareError> {
        tracing::info!(source = %self.source.display(), "⏳ Compiling contract and generating binding...");

        let artifact = self.compiler.compile(&self.source).await?;
        let binding = self.generator.generate(&artifact).await?;

        Ok(binding)
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}
