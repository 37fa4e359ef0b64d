//! Session identity command handler.

use serde::Serialize;

use airgo_core::AirGoClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Identity plus the local defaults; the key itself is never shown.
#[derive(Serialize)]
struct Description {
    api_host: String,
    node_id: u32,
    node_type: String,
    key: &'static str,
    vless_flow: String,
    speed_limit_mbps: f64,
    device_limit: u32,
    rule_count: usize,
}

fn detail(d: &Description) -> String {
    output::detail_lines(&[
        ("Panel", d.api_host.clone()),
        ("Node ID", d.node_id.to_string()),
        ("Node type", d.node_type.clone()),
        ("Key", d.key.to_owned()),
        ("VLESS flow", d.vless_flow.clone()),
        ("Speed limit", format!("{} Mbps", d.speed_limit_mbps)),
        ("Device limit", d.device_limit.to_string()),
        ("Rules", d.rule_count.to_string()),
    ])
}

pub fn handle(client: &AirGoClient, global: &GlobalOpts) -> Result<(), CliError> {
    let info = client.describe();
    let config = client.config();
    let description = Description {
        api_host: info.api_host,
        node_id: info.node_id,
        node_type: info.node_type.to_string(),
        key: "********",
        vless_flow: config.vless_flow.clone(),
        speed_limit_mbps: config.speed_limit,
        device_limit: config.device_limit,
        rule_count: client.get_node_rule().len(),
    };

    let out = output::render_single(&global.output, &description, detail, |d| {
        d.api_host.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
