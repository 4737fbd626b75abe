//! Operator facing summaries of deployment results.

use comfy_table::{Table, presets::UTF8_FULL};
use tokup_deploy::DeploymentResult;

/// Render one row per deployment attempt.
pub fn results_table(results: &[DeploymentResult]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Name", "Symbol", "Status", "Address / Error"]);

    for result in results {
        let (status, detail) = match &result.outcome {
            Ok(contract) => ("✓ deployed".to_string(), contract.address.to_string()),
            Err(e) => (format!("✗ {}", e.kind()), e.to_string()),
        };
        table.add_row(vec![
            result.index.to_string(),
            result.label.name.clone(),
            result.label.symbol.clone(),
            status,
            detail,
        ]);
    }

    table
}

/// One line summary, e.g. `4/5 contracts deployed`.
pub fn summary(results: &[DeploymentResult]) -> String {
    let succeeded = results.iter().filter(|r| r.is_success()).count();
    format!("{}/{} contracts deployed", succeeded, results.len())
}
