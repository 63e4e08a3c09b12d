use clap::Subcommand;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::cli::session::{load_session, save_session};
use crate::cli::utils::{api_error_message, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to server and store the token")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password")]
        password: String,
        #[arg(long, help = "Server URL, e.g. http://localhost:3000")]
        server: Option<String>,
    },

    #[command(about = "Discard the stored token")]
    Logout,

    #[command(about = "Show the identity carried by the stored token")]
    Whoami,
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    token: String,
    user: Value,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut session = load_session()?;

    match cmd {
        AuthCommands::Login { username, password, server } => {
            if let Some(server) = server {
                url::Url::parse(&server).map_err(|e| anyhow::anyhow!("invalid server URL {}: {}", server, e))?;
                session.server = server;
            }

            let response = reqwest::Client::new()
                .post(session.url("/api/auth/login"))
                .json(&json!({ "username": username, "password": password }))
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                anyhow::bail!(api_error_message(status, &body));
            }

            let reply: LoginReply = serde_json::from_str(&body)?;
            session.login(username.clone(), reply.token);
            save_session(&session)?;

            output_success(
                output_format,
                &format!("Logged in as {}", username),
                Some(json!({ "user": reply.user })),
            )
        }
        AuthCommands::Logout => {
            session.logout();
            save_session(&session)?;
            output_success(output_format, "Logged out", None)
        }
        AuthCommands::Whoami => {
            let token = session
                .token
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Not logged in; run `mediactl auth login` first"))?;

            let response = reqwest::Client::new()
                .get(session.url("/api/auth/me"))
                .bearer_auth(token)
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                anyhow::bail!(api_error_message(status, &body));
            }

            let reply: Value = serde_json::from_str(&body)?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reply)?),
                OutputFormat::Text => {
                    let user = &reply["user"];
                    println!(
                        "{} (user_id {}, level {})",
                        user["username"].as_str().unwrap_or("?"),
                        user["user_id"],
                        user["user_level_id"]
                    );
                }
            }
            Ok(())
        }
    }
}
