//! User list command handler.

use tabled::Tabled;

use airgo_core::{AirGoClient, UserInfo};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "UID")]
    uid: i64,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "UUID")]
    uuid: String,
    #[tabled(rename = "Speed (B/s)")]
    speed_limit: String,
    #[tabled(rename = "Devices")]
    device_limit: String,
}

fn unlimited_or<T: PartialEq + Default + ToString>(v: &T) -> String {
    if *v == T::default() {
        "unlimited".into()
    } else {
        v.to_string()
    }
}

impl From<&UserInfo> for UserRow {
    fn from(u: &UserInfo) -> Self {
        Self {
            uid: u.uid,
            email: u.email.clone(),
            uuid: u.uuid.clone(),
            speed_limit: unlimited_or(&u.speed_limit),
            device_limit: unlimited_or(&u.device_limit),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &AirGoClient, global: &GlobalOpts) -> Result<(), CliError> {
    let users = client.get_user_list().await?;
    let out = output::render_list(
        &global.output,
        &users,
        |u| UserRow::from(u),
        |u| u.uid.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
