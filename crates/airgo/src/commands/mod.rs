//! Command dispatch: bridges CLI args -> AirGoClient -> output formatting.

pub mod config_cmd;
pub mod describe;
pub mod node;
pub mod poll;
pub mod report;
pub mod rules;
pub mod users;

use airgo_core::AirGoClient;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a panel-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &AirGoClient,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Node => node::handle(client, global).await,
        Command::Users => users::handle(client, global).await,
        Command::Rules => rules::handle(client, global),
        Command::Describe => describe::handle(client, global),
        Command::Report(args) => report::handle(client, args, global).await,
        Command::Poll(args) => poll::handle(client, &args, &cfg.defaults, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
