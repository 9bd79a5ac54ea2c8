//! Interactive mode for the server.
//!
//! Prompts for the bind address, port and administrator credentials
//! before starting the server.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Password};

use crate::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Defaults come from [`ServerConfig::load`]; the answers are passed to
/// [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Gorod Reshenii Server");
    println!();

    let defaults = ServerConfig::load().unwrap_or_else(|e| {
        log::warn!("Ignoring server configuration: {e}");
        ServerConfig::default()
    });

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let public_dir: String = Input::new()
        .with_prompt("Public directory")
        .default(defaults.public_dir.display().to_string())
        .interact_text()
        .unwrap_or_else(|_| defaults.public_dir.display().to_string());

    let admin_user: String = Input::new()
        .with_prompt("Administrator username")
        .default(defaults.admin_user.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.admin_user.clone());

    let admin_password = if defaults.admin_password.is_empty() {
        Password::new()
            .with_prompt("Administrator password (empty disables login)")
            .allow_empty_password(true)
            .interact()
            .unwrap_or_default()
    } else {
        defaults.admin_password.clone()
    };

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(ServerConfig {
        bind_addr,
        port,
        public_dir: PathBuf::from(public_dir),
        admin_user,
        admin_password,
    })
    .await
}
