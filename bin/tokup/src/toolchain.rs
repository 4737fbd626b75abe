//! Checking that the external tools can be started.

use tokup_deploy::{Settings, ToolCommand, ToolStatus, process};

const SOLC_INSTALL_HINT: &str = "curl -L https://raw.githubusercontent.com/ethereum/solidity/master/scripts/install_solc.sh | sh";
const WEB3J_INSTALL_HINT: &str = "curl -L get.web3j.io | sh";

/// Probe both tools, logging their status. Returns `true` when both can run.
pub async fn check(settings: &Settings) -> bool {
    tracing::info!("⏳ Checking external tools...");

    let tools: [(&str, &ToolCommand, &str); 2] = [
        ("Solidity compiler", &settings.toolchain.solc, SOLC_INSTALL_HINT),
        (
            "Binding generator",
            &settings.toolchain.binding_generator,
            WEB3J_INSTALL_HINT,
        ),
    ];

    let mut all_available = true;
    for (label, command, hint) in tools {
        match process::probe(command).await {
            ToolStatus::Available(version) => {
                tracing::info!(tool = label, program = %command.program, %version, "✓ Tool available");
            }
            ToolStatus::Missing(reason) => {
                all_available = false;
                tracing::warn!(
                    tool = label,
                    program = %command.program,
                    %reason,
                    "✗ Tool not found. Install it with: {}",
                    hint
                );
            }
        }
    }

    all_available
}
