//! Solidity compilation.

mod cmd;

use std::{future::Future, path::Path};

pub use cmd::SolcCmdBuilder;

use crate::{ArtifactLayout, CompileError, CompiledArtifact, ToolCommand, process};

/// Turns a contract source into ABI and bytecode artifacts.
pub trait Compiler: Send + Sync {
    /// Compile `source`, returning the artifacts once both exist on disk.
    fn compile(
        &self,
        source: &Path,
    ) -> impl Future<Output = Result<CompiledArtifact, CompileError>> + Send;
}

/// Compiles with an external `solc` process.
///
/// Every call recompiles from scratch and replaces the previous artifacts.
#[derive(Debug, Clone)]
pub struct SolcCompiler {
    command: ToolCommand,
    layout: ArtifactLayout,
}

impl SolcCompiler {
    pub fn new(command: ToolCommand, layout: ArtifactLayout) -> Self {
        Self { command, layout }
    }

    /// Remove artifacts of a previous run so they cannot pass for this run's output.
    fn clear_previous_artifacts(&self) -> Result<(), CompileError> {
        std::fs::create_dir_all(&self.layout.build_dir).map_err(|source| CompileError::Io {
            path: self.layout.build_dir.clone(),
            source,
        })?;

        for path in [self.layout.abi_path(), self.layout.bin_path()] {
            match std::fs::remove_file(&path) {
                Ok(()) => tracing::debug!(path = %path.display(), "Removed previous artifact"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => return Err(CompileError::Io { path, source }),
            }
        }

        Ok(())
    }
}

impl Compiler for SolcCompiler {
    async fn compile(&self, source: &Path) -> Result<CompiledArtifact, CompileError> {
        if !source.is_file() {
            return Err(CompileError::MissingSource(source.to_path_buf()));
        }

        self.clear_previous_artifacts()?;

        tracing::info!(
            source = %source.display(),
            build_dir = %self.layout.build_dir.display(),
            "Compiling contract..."
        );

        let args = SolcCmdBuilder::new(source, &self.layout.build_dir).build();
        process::run_tool("solc", &self.command, &args)
            .await
            .map_err(|source| CompileError::Spawn {
                program: self.command.program.clone(),
                source,
            })?;

        let artifact = CompiledArtifact::locate(&self.layout)?;

        tracing::info!(
            abi = %artifact.abi_path.display(),
            bin = %artifact.bin_path.display(),
            "✓ Contract compiled"
        );

        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A stand-in for solc: parses `-o <dir>` and writes the requested outputs.
    const FAKE_SOLC: &str = r#"
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
  esac
  shift
done
mkdir -p "$out"
printf '[{"type":"constructor","inputs":[{"name":"name","type":"string"},{"name":"symbol","type":"string"}],"stateMutability":"nonpayable"}]' > "$out/Token.abi"
printf '6080604052' > "$out/Token.bin"
"#;

    /// A broken compiler that only writes the ABI.
    const ABI_ONLY_SOLC: &str = r#"
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
  esac
  shift
done
mkdir -p "$out"
printf '[]' > "$out/Token.abi"
exit 1
"#;

    fn setup(script: &str) -> (tempdir::TempDir, SolcCompiler, ArtifactLayout) {
        let dir = tempdir::TempDir::new("tokup-solc").unwrap();
        let layout = ArtifactLayout::default().rooted_at(dir.path());
        std::fs::create_dir_all(layout.source.parent().unwrap()).unwrap();
        std::fs::write(&layout.source, "contract Token {}").unwrap();

        let script_path = dir.path().join("solc.sh");
        std::fs::write(&script_path, script).unwrap();

        let command = ToolCommand::new("sh").args([script_path.display().to_string()]);
        let compiler = SolcCompiler::new(command, layout.clone());
        (dir, compiler, layout)
    }

    #[tokio::test]
    async fn test_compile_produces_artifacts() {
        let (_dir, compiler, layout) = setup(FAKE_SOLC);

        let artifact = compiler.compile(&layout.source).await.unwrap();
        assert_eq!(artifact.abi_path, layout.abi_path());
        assert_eq!(artifact.bin_path, layout.bin_path());
    }

    #[tokio::test]
    async fn test_recompile_is_idempotent() {
        let (_dir, compiler, layout) = setup(FAKE_SOLC);

        let first = compiler.compile(&layout.source).await.unwrap();
        let first_code = first.load_bytecode().unwrap();
        let second = compiler.compile(&layout.source).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first_code, second.load_bytecode().unwrap());
        assert_eq!(first.load_abi().unwrap(), second.load_abi().unwrap());
    }

    #[tokio::test]
    async fn test_missing_bytecode_is_compile_failure() {
        let (_dir, compiler, layout) = setup(ABI_ONLY_SOLC);

        match compiler.compile(&layout.source).await {
            Err(CompileError::MissingArtifact(path)) => assert_eq!(path, layout.bin_path()),
            other => panic!("expected missing artifact, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stale_artifacts_do_not_mask_failure() {
        let (_dir, compiler, layout) = setup(ABI_ONLY_SOLC);
        std::fs::create_dir_all(&layout.build_dir).unwrap();
        std::fs::write(layout.bin_path(), "6080").unwrap();

        assert!(compiler.compile(&layout.source).await.is_err());
        assert!(!layout.bin_path().exists());
    }

    #[tokio::test]
    async fn test_missing_source() {
        let (_dir, compiler, layout) = setup(FAKE_SOLC);
        std::fs::remove_file(&layout.source).unwrap();

        assert!(matches!(
            compiler.compile(&layout.source).await,
            Err(CompileError::MissingSource(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_compiler_is_spawn_error() {
        let (_dir, _, layout) = setup(FAKE_SOLC);
        let compiler = SolcCompiler::new(
            ToolCommand::new("tokup-definitely-not-solc"),
            layout.clone(),
        );

        assert!(matches!(
            compiler.compile(&layout.source).await,
            Err(CompileError::Spawn { .. })
        ));
    }
}
