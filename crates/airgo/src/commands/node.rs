//! Node config command handler.

use airgo_core::{AirGoClient, NodeInfo};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn or_dash(s: &str) -> String {
    if s.is_empty() { "-".into() } else { s.to_owned() }
}

fn detail(n: &NodeInfo) -> String {
    let mut pairs = vec![
        (
            "Node type",
            n.node_type.map_or_else(|| "-".into(), |t| t.to_string()),
        ),
        ("Node ID", n.node_id.to_string()),
        ("Port", n.port.to_string()),
        ("Speed limit", format!("{} B/s", n.speed_limit)),
        ("Transport", or_dash(&n.transport_protocol)),
        ("Host", or_dash(&n.host)),
        ("Path", or_dash(&n.path)),
        ("Service name", or_dash(&n.service_name)),
        ("Cipher", or_dash(&n.cypher_method)),
        ("TLS", n.enable_tls.to_string()),
        ("REALITY", n.enable_reality.to_string()),
    ];
    if n.enable_vless {
        pairs.push(("VLESS flow", or_dash(&n.vless_flow)));
    }
    if let Some(ref header) = n.header {
        pairs.push(("Header", String::from_utf8_lossy(header).into_owned()));
    }
    if let Some(ref reality) = n.reality_config {
        pairs.push(("REALITY dest", or_dash(&reality.dest)));
        pairs.push(("Server names", reality.server_names.join(", ")));
    }
    output::detail_lines(&pairs)
}

pub async fn handle(client: &AirGoClient, global: &GlobalOpts) -> Result<(), CliError> {
    let node = client.get_node_info().await?;
    if node.is_empty() {
        tracing::warn!("panel returned a node with an unsupported protocol");
    }
    let out = output::render_single(&global.output, &node, detail, |n| n.port.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
