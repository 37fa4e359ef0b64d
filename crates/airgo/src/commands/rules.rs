//! Detection rule command handler.

use serde::Serialize;
use tabled::Tabled;

use airgo_core::AirGoClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize, Tabled)]
struct RuleRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Pattern")]
    pattern: String,
}

pub fn handle(client: &AirGoClient, global: &GlobalOpts) -> Result<(), CliError> {
    let rules: Vec<RuleRow> = client
        .get_node_rule()
        .iter()
        .map(|r| RuleRow {
            id: r.id,
            pattern: r.pattern.as_str().to_owned(),
        })
        .collect();

    let out = output::render_list(
        &global.output,
        &rules,
        |r| RuleRow {
            id: r.id,
            pattern: r.pattern.clone(),
        },
        |r| r.pattern.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
