//! Interactive operator menu.

use std::io::Write;

use anyhow::{Context, Result};
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokup_deploy::{
    ChainConnector, DeploymentOrchestrator, DeploymentParameters, Settings, TokenBinding,
};

use crate::report;

/// Menu entries, numbered as shown to the operator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter, strum::FromRepr,
)]
#[repr(u8)]
pub enum MenuAction {
    #[strum(to_string = "Set deployment parameters")]
    SetParameters = 1,
    #[strum(to_string = "Compile contract and generate binding")]
    Compile = 2,
    #[strum(to_string = "Deploy a single contract")]
    DeployOne = 3,
    #[strum(to_string = "Deploy contracts in batch")]
    DeployMany = 4,
    #[strum(to_string = "Exit")]
    Exit = 5,
}

impl MenuAction {
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse::<u8>().ok().and_then(Self::from_repr)
    }
}

/// State of one operator session.
pub struct Menu<'a, C, R, W> {
    settings: &'a Settings,
    orchestrator: DeploymentOrchestrator<C>,
    params: DeploymentParameters,
    binding: Option<TokenBinding>,
    input: Lines<R>,
    out: W,
}

impl<'a, C, R, W> Menu<'a, C, R, W>
where
    C: ChainConnector,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        settings: &'a Settings,
        orchestrator: DeploymentOrchestrator<C>,
        params: DeploymentParameters,
        input: R,
        out: W,
    ) -> Self {
        Self {
            settings,
            orchestrator,
            params,
            binding: None,
            input: input.lines(),
            out,
        }
    }

    pub fn params(&self) -> &DeploymentParameters {
        &self.params
    }

    /// Run until the operator exits or the input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.ask("Enter an option (1-5): ").await? else {
                break;
            };

            let Some(action) = MenuAction::parse(&choice) else {
                writeln!(self.out, "Invalid choice, enter a number between 1 and 5.")?;
                continue;
            };

            // Every action reports its own outcome and returns here.
            if let Err(e) = self.dispatch(action).await {
                writeln!(self.out, "✗ {:#}", e)?;
            }

            if action == MenuAction::Exit {
                break;
            }
        }

        writeln!(self.out, "Exiting.")?;
        Ok(())
    }

    async fn dispatch(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::SetParameters => self.set_parameters().await,
            MenuAction::Compile => self.compile().await,
            MenuAction::DeployOne => self.deploy_one().await,
            MenuAction::DeployMany => self.deploy_many().await,
            MenuAction::Exit => Ok(()),
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Choose an action:")?;
        for action in MenuAction::iter() {
            writeln!(self.out, "{}. {}", action as u8, action)?;
        }
        Ok(())
    }

    /// Prompt and read one line. `None` once the input is exhausted.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        let line = self
            .input
            .next_line()
            .await
            .context("Failed to read operator input")?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    async fn ask_required(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt)
            .await?
            .context("Input ended before the question was answered")
    }

    async fn set_parameters(&mut self) -> Result<()> {
        let signing_key = self.ask_required("Private key: ").await?;
        let token_name = self.ask_required("Token name: ").await?;
        let token_symbol = self.ask_required("Token symbol: ").await?;
        let rpc_endpoint =
            self.ask_required("RPC URL (e.g. https://api.helium.fhenix.zone): ").await?;

        self.params =
            DeploymentParameters::new(signing_key, token_name, token_symbol, rpc_endpoint);

        if let Err(e) = self.params.ensure_complete() {
            writeln!(self.out, "⚠ Parameters saved, but {}.", e)?;
        } else {
            writeln!(self.out, "✓ Deployment parameters set.")?;
        }
        tracing::debug!(params = ?self.params, "Deployment parameters replaced");
        Ok(())
    }

    async fn compile(&mut self) -> Result<()> {
        writeln!(self.out, "⏳ Compiling contract and generating binding...")?;
        let binding = self.settings.pipeline().prepare().await?;
        writeln!(
            self.out,
            "✓ Binding generated at {}",
            binding.binding_source().display()
        )?;
        self.binding = Some(binding);
        Ok(())
    }

    fn binding(&self) -> Result<&TokenBinding> {
        self.binding
            .as_ref()
            .context("No compiled contract in this session, run option 2 first")
    }

    async fn deploy_one(&mut self) -> Result<()> {
        let binding = self.binding()?;
        let result = self
            .orchestrator
            .deploy_one(
                &self.params,
                binding,
                &self.params.token_name,
                &self.params.token_symbol,
            )
            .await;

        match &result.outcome {
            Ok(contract) => writeln!(
                self.out,
                "✓ Contract {} deployed at {}",
                result.label.name, contract.address
            )?,
            Err(e) => writeln!(self.out, "✗ Contract {} not deployed: {}", result.label.name, e)?,
        }
        Ok(())
    }

    async fn deploy_many(&mut self) -> Result<()> {
        let answer = self.ask_required("Number of contracts to deploy: ").await?;
        let count: i64 = answer
            .parse()
            .with_context(|| format!("`{}` is not a number", answer))?;

        let binding = self.binding()?;
        let results = self
            .orchestrator
            .deploy_batch(
                &self.params,
                binding,
                &self.params.token_name,
                &self.params.token_symbol,
                count,
            )
            .await?;

        writeln!(self.out, "{}", report::results_table(&results))?;
        writeln!(self.out, "{}", report::summary(&results))?;
        Ok(())
    }
}
