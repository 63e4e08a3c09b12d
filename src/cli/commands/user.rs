use clap::Subcommand;
use serde_json::json;

use crate::auth::password::hash_password;
use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::models::{NewUser, ADMIN_LEVEL};
use crate::database::{DatabaseManager, PgStore, Store};
use crate::validation::RegisterRequest;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Admins can only be registered by other admins over HTTP, so the first
    /// one is written straight to the database.
    #[command(about = "Create an admin user directly in the database")]
    CreateAdmin {
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password")]
        password: String,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::CreateAdmin { username, email, password } => {
            let registration = RegisterRequest {
                username,
                password,
                email,
                user_level_id: Some(ADMIN_LEVEL),
            }
            .validate()
            .map_err(|e| anyhow::anyhow!("{}: {}", e, e.to_json()["details"]))?;

            let app_config = config::config();
            let pool = DatabaseManager::connect(app_config).await?;
            let store = PgStore::new(pool);

            let password_hash = hash_password(registration.password, app_config.security.bcrypt_cost).await?;
            let user_id = store
                .insert_user(NewUser {
                    username: registration.username.clone(),
                    password_hash,
                    email: registration.email,
                    user_level_id: ADMIN_LEVEL,
                })
                .await?;

            output_success(
                output_format,
                &format!("Admin {} created", registration.username),
                Some(json!({ "id": user_id })),
            )
        }
    }
}
