//! Poll loop: fetch node config and users every interval until Ctrl-C.

use std::time::Duration;

use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use airgo_core::store::{NODE_KEY, USER_LIST_KEY};
use airgo_core::{AirGoClient, NodeInfo, UserInfo};

use crate::cli::{GlobalOpts, PollArgs};
use crate::config::Defaults;
use crate::error::CliError;
use crate::output;

/// What one round observed. `None` means unchanged since the last round.
#[derive(Debug, Default, Serialize)]
struct Round {
    node: Option<NodeInfo>,
    users: Option<Vec<UserInfo>>,
}

fn summary(round: &Round) -> String {
    let node = match round.node {
        Some(ref n) => format!("updated (port {}, {})", n.port, n.transport_protocol),
        None => "unchanged".into(),
    };
    let users = match round.users {
        Some(ref u) => format!("updated ({} users)", u.len()),
        None => "unchanged".into(),
    };
    format!("node: {node}; users: {users}")
}

/// One fetch of both resources. The not-modified sentinels are not errors.
async fn poll_once(client: &AirGoClient) -> Result<Round, CliError> {
    let mut round = Round::default();

    match client.get_node_info().await {
        Ok(node) => {
            info!(
                port = node.port,
                transport = %node.transport_protocol,
                etag = %client.validator(NODE_KEY),
                "node config changed"
            );
            round.node = Some(node);
        }
        Err(e) if e.is_not_modified() => info!("node config unchanged"),
        Err(e) => return Err(e.into()),
    }

    match client.get_user_list().await {
        Ok(users) => {
            info!(
                count = users.len(),
                etag = %client.validator(USER_LIST_KEY),
                "user list changed"
            );
            round.users = Some(users);
        }
        Err(e) if e.is_not_modified() => info!("user list unchanged"),
        Err(e) => return Err(e.into()),
    }

    Ok(round)
}

fn print_round(round: &Round, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, round, summary, summary)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    client: &AirGoClient,
    args: &PollArgs,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.once {
        let round = poll_once(client).await?;
        return print_round(&round, global);
    }

    let period = Duration::from_secs(args.interval.unwrap_or(defaults.poll_interval).max(1));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(interval_secs = period.as_secs(), "polling panel");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match poll_once(client).await {
                    Ok(round) => print_round(&round, global)?,
                    // A failed round is retried on the next tick.
                    Err(e) => warn!(error = %e, "poll round failed"),
                }
            }
            _ = &mut shutdown => {
                info!("interrupted, stopping poll loop");
                return Ok(());
            }
        }
    }
}
