//! Command execution: builds the client from configuration, runs one
//! subcommand, and renders the result as JSON.

use crate::cli::{Cli, Command, SettingsCommand, setting_update};
use crate::error::AppError;

use admin_client::ApiClient;
use admin_client::config::{ClientConfig, try_load_dotenv};
use admin_client::credentials::{CredentialStore, FileTokenPersistence, detect_credential_paths};

use common::ErrorLocation;

use models::{
    CurrentUser, IpStatisticsResponse, LogListResponse, PiiSetting, PiiSettingsList,
    PiiTypeStatisticsResponse, StatisticsOverview, TimelineResponse, decode_view,
};

use std::panic::Location;
use std::sync::Arc;
use std::time::SystemTime;

use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Run one invocation end to end and print its output.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    try_load_dotenv();

    let client = build_client(&cli)?;
    let output = execute(&client, &cli.command, cli.raw, SystemTime::now()).await?;

    let rendered = serde_json::to_string_pretty(&output).map_err(|e| AppError::Cli {
        message: format!("Failed to render output: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;
    println!("{rendered}");

    Ok(())
}

/// Wire config, credentials and the `--api-url` override into a client.
///
/// A persisted token that cannot be read is logged and ignored, so a broken
/// token file never blocks `login`.
pub fn build_client(cli: &Cli) -> Result<ApiClient, AppError> {
    let config = match cli.config_dir.clone().or_else(ClientConfig::default_dir) {
        Some(dir) => ClientConfig::load(&dir)?,
        None => {
            debug!("No config directory available, using defaults");
            ClientConfig::default()
        }
    };

    let store = Arc::new(credential_store(cli.ephemeral, &config)?);
    if let Err(e) = store.load() {
        warn!("Ignoring unreadable access token: {e}");
    }

    let client = match cli.api_url.as_deref() {
        Some(base_url) => ApiClient::with_timeout(base_url, store, config.request_timeout())?,
        None => ApiClient::from_config(&config, store)?,
    };

    debug!("Using backend {}", client.base_url());
    Ok(client)
}

fn credential_store(ephemeral: bool, config: &ClientConfig) -> Result<CredentialStore, AppError> {
    if ephemeral {
        debug!("Ephemeral session: access token kept in memory only");
        return Ok(CredentialStore::in_memory());
    }

    let token_file = match &config.credentials.token_file {
        Some(path) => path.clone(),
        None => {
            let paths = detect_credential_paths()?;
            debug!("Credential directory from {}", paths.source);
            paths.token_file
        }
    };

    debug!("Access token file: {}", token_file.display());
    let persistence = FileTokenPersistence::new(token_file);
    Ok(CredentialStore::new(Box::new(persistence)))
}

/// Run `command` and return what should be printed.
///
/// Unless `raw` is set, payloads are normalized through their typed view so
/// missing lists print as empty ones. A payload that is not the expected
/// kind of JSON is printed as received.
pub async fn execute(
    client: &ApiClient,
    command: &Command,
    raw: bool,
    now: SystemTime,
) -> Result<Value, AppError> {
    match command {
        Command::Login { username, password } => {
            client.login(username, password).await?;
            Ok(json!({ "logged_in": true, "username": username }))
        }
        Command::Logout => {
            client.logout()?;
            Ok(json!({ "logged_in": false }))
        }
        Command::Whoami => view::<CurrentUser>(client.fetch_current_user().await?, raw),
        Command::Logs(args) => {
            let payload = client.fetch_logs(&args.to_filter(now)?).await?;
            view::<LogListResponse>(payload, raw)
        }
        Command::Overview(args) => {
            let payload = client.fetch_overview(&args.to_range(now)?).await?;
            view::<StatisticsOverview>(payload, raw)
        }
        Command::Timeline(args) => {
            let payload = client.fetch_timeline(&args.to_filter(now)?).await?;
            view::<TimelineResponse>(payload, raw)
        }
        Command::ByPiiType(args) => {
            let payload = client.fetch_by_pii_type(&args.to_range(now)?).await?;
            view::<PiiTypeStatisticsResponse>(payload, raw)
        }
        Command::ByIp(args) => {
            let payload = client.fetch_by_ip(&args.to_filter(now)?).await?;
            view::<IpStatisticsResponse>(payload, raw)
        }
        Command::Settings { command } => execute_settings(client, command, raw).await,
    }
}

async fn execute_settings(
    client: &ApiClient,
    command: &SettingsCommand,
    raw: bool,
) -> Result<Value, AppError> {
    match command {
        SettingsCommand::List => match client.fetch_all_settings().await {
            Ok(payload) => view::<PiiSettingsList>(payload, raw),
            // An expired session still has to surface so the admin logs in again.
            Err(e) if e.is_unauthorized() => Err(e.into()),
            Err(e) => {
                info!(
                    "Settings unavailable ({}), showing an empty list: {e}",
                    e.error_category()
                );
                to_output(&PiiSettingsList::default())
            }
        },
        SettingsCommand::Get { entity_type } => {
            view::<PiiSetting>(client.fetch_setting(entity_type).await?, raw)
        }
        SettingsCommand::Update {
            entity_type,
            enabled,
            threshold,
        } => {
            let update = setting_update(*enabled, *threshold)?;
            view::<PiiSetting>(client.update_setting(entity_type, &update).await?, raw)
        }
    }
}

fn view<T>(payload: Value, raw: bool) -> Result<Value, AppError>
where
    T: DeserializeOwned + Serialize,
{
    if raw {
        return Ok(payload);
    }

    match decode_view::<T>(&payload) {
        Ok(view) => to_output(&view),
        Err(e) => {
            warn!("Unexpected response shape, printing it unmodified: {e}");
            Ok(payload)
        }
    }
}

#[track_caller]
fn to_output<T: Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Cli {
        message: format!("Failed to serialize output: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}
