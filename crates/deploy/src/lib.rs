//! tokup-deploy - Compile, bind and deploy an ERC20 token.
//!
//! This crate provides the pipeline behind the `tokup` operator tool: running the
//! Solidity compiler and the binding generator, and deploying one or many token
//! instances to an EVM chain with operator supplied parameters.

mod artifacts;
pub use artifacts::CompiledArtifact;

mod bindings;
pub use bindings::{BindingGenerator, CliBindingGenerator, GenerateCmdBuilder, TokenBinding};

mod chain;
pub use chain::{
    AlloyConnector, AlloyDeployer, ChainConnector, ContractDeployer, DeployedContract,
    parse_endpoint, parse_signer,
};

mod compiler;
pub use compiler::{Compiler, SolcCmdBuilder, SolcCompiler};

mod error;
pub use error::{
    CompileError, DeployFailure, DeploymentError, GenerateError, InvalidCountError,
    ParameterError, PrepareError,
};

mod orchestrator;
pub use orchestrator::{DeploymentOrchestrator, DeploymentResult, InstanceLabel};

mod params;
pub use params::DeploymentParameters;

mod pipeline;
pub use pipeline::ArtifactPipeline;

pub mod process;
pub use process::ToolStatus;

mod settings;
pub use settings::{
    ArtifactLayout, DEFAULT_BINDING_GENERATOR_PROGRAM, DEFAULT_SOLC_PROGRAM, DeployConfig,
    Settings, TOKUP_CONF_FILENAME, ToolCommand, ToolchainConfig,
};

impl Settings {
    /// Build the compile → bind pipeline described by these settings.
    pub fn pipeline(&self) -> ArtifactPipeline<SolcCompiler, CliBindingGenerator> {
        ArtifactPipeline::new(
            self.layout.source.clone(),
            SolcCompiler::new(self.toolchain.solc.clone(), self.layout.clone()),
            CliBindingGenerator::new(
                self.toolchain.binding_generator.clone(),
                self.layout.clone(),
            ),
        )
    }

    /// Build an orchestrator talking to the chain through alloy.
    pub fn orchestrator(&self) -> DeploymentOrchestrator<AlloyConnector> {
        DeploymentOrchestrator::new(AlloyConnector::new().poll_interval(self.deploy.poll_interval()))
            .confirmation_timeout(self.deploy.confirmation_timeout())
    }
}
