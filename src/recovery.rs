//! Credential and session repair.
//!
//! `ensure_ready` guarantees that on return the six settings needed to talk
//! to the remote service are filled in and the session token is verified.
//! It loops through interactive prompts until satisfied; there is no retry
//! cap because an operator is assumed present, and every failed attempt
//! demands fresh operator input before the next one.

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::ConfigStore;
use crate::front::FrontEnd;
use crate::remote::{LoginOutcome, RemoteApi};

async fn prompt_credentials<F: FrontEnd>(config: &mut ConfigStore, front: &F) -> Result<()> {
    info!("please set the account username and password");
    let username = front
        .prompt_text("OpenList username", "", "admin")
        .await?;
    config.set("username", username.trim())?;
    let password = front
        .prompt_text("OpenList password", "", "passwd")
        .await?;
    config.set("password", password.trim())?;
    info!("account credentials saved");
    Ok(())
}

async fn prompt_dest_url<A: RemoteApi, F: FrontEnd>(
    config: &mut ConfigStore,
    api: &mut A,
    front: &F,
) -> Result<()> {
    info!("please set the destination URL");
    let dest = front
        .prompt_text("OpenList server URL", "", "http://127.0.0.1:5244")
        .await?;
    let dest = dest.trim();
    config.set("dest", dest)?;
    api.set_base_url(dest);
    info!("destination URL updated to {dest}");
    Ok(())
}

async fn prompt_directories<F: FrontEnd>(config: &mut ConfigStore, front: &F) -> Result<()> {
    info!("please set the source and media library directories");
    let base = front
        .prompt_text("Source directory on the server", "", "/cloud/share")
        .await?;
    config.set("base_dir", base.trim())?;
    let dst = front
        .prompt_text("Media library directory", "", "/Jellyfin/media")
        .await?;
    config.set("dst_dir", dst.trim())?;
    info!("directories saved");
    Ok(())
}

/// Repair any missing settings, then resolve a verified token.
pub async fn ensure_ready<A: RemoteApi, F: FrontEnd>(
    config: &mut ConfigStore,
    api: &mut A,
    front: &F,
) -> Result<()> {
    if config.get("username").trim().is_empty() || config.get("password").trim().is_empty() {
        prompt_credentials(config, front).await?;
    }
    if config.get("dest").trim().is_empty() {
        prompt_dest_url(config, api, front).await?;
    } else {
        api.set_base_url(config.get("dest").trim());
    }
    if config.get("base_dir").trim().is_empty() || config.get("dst_dir").trim().is_empty() {
        prompt_directories(config, front).await?;
    }

    loop {
        let stored = config.get("token").to_string();
        if !stored.is_empty() {
            if api.verify_token(&stored).await {
                api.set_token(&stored);
                return Ok(());
            }
            warn!("stored token rejected, requesting a new one");
        } else {
            info!("no stored token, logging in");
        }

        let username = config.get("username").trim().to_string();
        let password = config.get("password").trim().to_string();
        match api.login(&username, &password).await {
            LoginOutcome::Token(token) => {
                info!("token obtained, re-verifying");
                if api.verify_token(&token).await {
                    config.set("token", &token)?;
                    api.set_token(&token);
                    info!("token saved");
                    return Ok(());
                }
                // A freshly issued token that fails verification points at
                // the destination, not the credentials.
                error!("fresh token failed verification, check the destination URL");
                prompt_dest_url(config, api, front).await?;
            }
            LoginOutcome::Unauthorized => {
                error!("username or password rejected, please re-enter them");
                prompt_credentials(config, front).await?;
            }
            LoginOutcome::ServerError => {
                error!("server unreachable or failing, check the destination URL");
                prompt_dest_url(config, api, front).await?;
            }
        }
    }
}
