//! Telemetry report command handlers.

use airgo_core::{AirGoClient, NodeStatus, OnlineUser, UserTraffic};

use crate::cli::{GlobalOpts, ReportArgs, ReportCommand};
use crate::error::CliError;

/// Parse `<uid>=<ip>` pairs.
fn parse_online(entries: &[String]) -> Result<Vec<OnlineUser>, CliError> {
    entries
        .iter()
        .map(|entry| {
            let invalid = |reason: &str| CliError::Validation {
                field: "online user".into(),
                reason: format!("'{entry}': {reason}"),
            };
            let (uid, ip) = entry
                .split_once('=')
                .ok_or_else(|| invalid("expected <uid>=<ip>"))?;
            let uid = uid
                .trim()
                .parse::<i64>()
                .map_err(|_| invalid("uid is not an integer"))?;
            let ip = ip.trim();
            if ip.is_empty() {
                return Err(invalid("ip is empty"));
            }
            Ok(OnlineUser {
                uid,
                ip: ip.to_owned(),
            })
        })
        .collect()
}

pub async fn handle(
    client: &AirGoClient,
    args: ReportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ReportCommand::Status {
            cpu,
            mem,
            disk,
            uptime,
        } => {
            let status = NodeStatus {
                cpu,
                mem,
                disk,
                uptime,
            };
            client.report_node_status(&status).await?;
            if !global.quiet {
                eprintln!("Node status reported");
            }
            Ok(())
        }

        ReportCommand::Traffic { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let traffic: Vec<UserTraffic> = serde_json::from_str(&raw)?;
            client.report_user_traffic(&traffic).await?;
            if !global.quiet {
                eprintln!("Traffic reported for {} user(s)", traffic.len());
            }
            Ok(())
        }

        ReportCommand::Online { entries } => {
            let online = parse_online(&entries)?;
            client.report_node_online_users(&online).await?;
            if !global.quiet {
                eprintln!("Online users reported ({} entries)", online.len());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_uid_ip_pairs() {
        let entries = vec!["1=1.1.1.1".to_owned(), " 2 = 2001:db8::1".to_owned()];
        let online = parse_online(&entries).unwrap();
        assert_eq!(
            online,
            vec![
                OnlineUser {
                    uid: 1,
                    ip: "1.1.1.1".into()
                },
                OnlineUser {
                    uid: 2,
                    ip: "2001:db8::1".into()
                },
            ]
        );
    }

    #[test]
    fn rejects_malformed_pairs() {
        for bad in ["1.1.1.1", "x=1.1.1.1", "3="] {
            let err = parse_online(&[bad.to_owned()]).unwrap_err();
            assert!(matches!(err, CliError::Validation { .. }), "{bad}: {err}");
        }
    }
}
