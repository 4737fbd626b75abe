//! tokup compiles an ERC20 token contract, generates its binding and deploys it to any EVM chain.

mod cli;
mod config;
mod menu;
mod report;
mod toolchain;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use menu::Menu;
use tokup_deploy::{
    DeploymentParameters, DeploymentResult, InvalidCountError, Settings, TokenBinding,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    let settings = config::load(cli.config.as_deref())?;
    let params = cli.params.to_parameters();

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            // Missing tools are reported but the menu still opens.
            toolchain::check(&settings).await;

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut menu = Menu::new(
                &settings,
                settings.orchestrator(),
                params,
                stdin,
                std::io::stdout(),
            );
            menu.run().await?;
        }
        Command::Check => {
            if !toolchain::check(&settings).await {
                anyhow::bail!("Some external tools are missing");
            }
        }
        Command::Compile => {
            let binding = compile(&settings).await?;
            tracing::info!(
                binding = %binding.binding_source().display(),
                "✓ Contract compiled and binding generated"
            );
        }
        Command::Deploy => {
            let binding = compile(&settings).await?;
            let result = settings
                .orchestrator()
                .deploy_one(&params, &binding, &params.token_name, &params.token_symbol)
                .await;

            println!("{}", report::results_table(std::slice::from_ref(&result)));
            if let Some(failure) = result.failure() {
                anyhow::bail!("Deployment of {} failed: {}", result.label, failure);
            }
        }
        Command::DeployMany { count } => {
            let results = deploy_many(&settings, &params, count).await?;

            println!("{}", report::results_table(&results));
            let summary = report::summary(&results);
            if results.iter().any(|r| !r.is_success()) {
                anyhow::bail!("Batch deployment incomplete: {}", summary);
            }
            tracing::info!("✓ {}", summary);
        }
        Command::Config => {
            print!("{}", config::render(&settings)?);
        }
    }

    Ok(())
}

async fn compile(settings: &Settings) -> Result<TokenBinding> {
    tracing::info!("⏳ Compiling contract and generating binding...");
    settings
        .pipeline()
        .prepare()
        .await
        .context("Failed to prepare the token contract")
}

async fn deploy_many(
    settings: &Settings,
    params: &DeploymentParameters,
    count: i64,
) -> Result<Vec<DeploymentResult>> {
    // Reject the count before spending time on compilation.
    if count < 1 {
        return Err(InvalidCountError(count).into());
    }
    let binding = compile(settings).await?;
    let results = settings
        .orchestrator()
        .deploy_batch(
            params,
            &binding,
            &params.token_name,
            &params.token_symbol,
            count,
        )
        .await?;
    Ok(results)
}
