//! Session controller.
//!
//! Runs the three phases of a session against an explicit [`Config`]:
//! configure (choose an instance), authenticate (obtain a token), then the
//! post loop. The config is persisted once, between authentication and the
//! first post.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Result;
use colored::*;
use tracing::{debug, info, warn};

use crate::app_deps::{
    InstanceApi, InstanceApiFactory, PromptInterface, RealInstanceApiFactory, RealPrompt,
};
use crate::config::Config;
use crate::error::{format_error_chain, hint_for};
use crate::errors::{ConfigError, is_cancelled};

pub struct App;

impl App {
    /// Run an interactive session using the real terminal and network.
    pub async fn run(config_path: &Path) -> Result<()> {
        Self::run_with_deps(&RealInstanceApiFactory, &RealPrompt, config_path).await
    }

    /// Run a session with injected dependencies.
    ///
    /// Returns `Ok(())` when the operator ends the post loop. Cancelling a
    /// prompt before the loop starts returns the cancellation error.
    pub async fn run_with_deps(
        factory: &dyn InstanceApiFactory,
        prompt: &dyn PromptInterface,
        config_path: &Path,
    ) -> Result<()> {
        let mut config = Config::load(config_path);

        configure(&mut config, prompt)?;
        let api = factory.create(&config.url)?;
        authenticate(&mut config, api.as_ref(), prompt).await?;
        persist(&config, config_path);

        println!(
            "{} {} {}",
            "Posting to".green(),
            config.url.bright_green(),
            "(Esc to quit)".dimmed()
        );
        post_loop(&config, api.as_ref(), prompt).await
    }

    /// Print what is stored, without revealing the token.
    pub fn show(config_path: &Path) -> Result<()> {
        let config = Config::try_load(config_path)?.unwrap_or_default();

        println!("{} {}", "Config file:".cyan(), config_path.display());
        println!("{} {}", "Instance URL:".cyan(), or_unset(&config.url));
        println!("{} {}", "Username:".cyan(), or_unset(&config.username));
        println!(
            "{} {}",
            "Authenticated:".cyan(),
            if config.is_authenticated() { "yes" } else { "no" }
        );
        Ok(())
    }

    /// Delete the persisted record so the next run starts from scratch.
    pub fn logout(config_path: &Path) -> Result<()> {
        match fs::remove_file(config_path) {
            Ok(()) => {
                info!(path = %config_path.display(), "config removed");
                println!("{} {}", "Removed".green(), config_path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                println!("{} {}", "Nothing stored at".yellow(), config_path.display());
                Ok(())
            }
            Err(e) => Err(ConfigError::Write(format!("{}: {}", config_path.display(), e)).into()),
        }
    }
}

fn or_unset(value: &str) -> ColoredString {
    if value.is_empty() {
        "(not set)".dimmed()
    } else {
        value.normal()
    }
}

/// Ensure an instance URL is set, prompting only when none is stored.
pub fn configure(config: &mut Config, prompt: &dyn PromptInterface) -> Result<()> {
    if config.is_configured() {
        debug!(url = %config.url, "instance already configured");
        return Ok(());
    }

    config.url = prompt.prompt_instance_url()?;
    info!(url = %config.url, "instance configured");
    Ok(())
}

/// Ensure a token is stored, registering the app and exchanging credentials
/// when none is. The config is only modified once the exchange succeeded.
pub async fn authenticate(
    config: &mut Config,
    api: &dyn InstanceApi,
    prompt: &dyn PromptInterface,
) -> Result<()> {
    if config.is_authenticated() {
        debug!("token already stored, skipping authentication");
        return Ok(());
    }

    let registration = api.register_app().await?;
    info!(client_id = %registration.client_id, "application registered");

    let credentials = prompt.prompt_credentials()?;
    let token = api
        .exchange_token(&registration, &credentials.username, &credentials.password)
        .await?;

    config.username = credentials.username;
    config.token = token.authorization();
    info!(username = %config.username, "authenticated");
    Ok(())
}

/// Best-effort save; a failure is reported and the session continues.
pub fn persist(config: &Config, config_path: &Path) {
    if let Err(e) = config.save(config_path) {
        warn!(error = %e, "could not persist config");
        eprintln!("{} {}", "⚠️ ".yellow(), e.to_string().yellow());
    }
}

/// Map an operator cancellation to `None`, passing other results through.
fn unless_cancelled<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if is_cancelled(&e) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Prompt for and publish statuses until the operator cancels a prompt.
///
/// A failed post is reported and does not end the loop.
pub async fn post_loop(
    config: &Config,
    api: &dyn InstanceApi,
    prompt: &dyn PromptInterface,
) -> Result<()> {
    loop {
        let Some(status) = unless_cancelled(prompt.prompt_status())? else {
            break;
        };
        let Some(visibility) = unless_cancelled(prompt.select_visibility())? else {
            break;
        };

        match api.create_status(&config.token, &status, visibility).await {
            Ok(posted) => {
                info!(url = %posted.url, visibility = %visibility, "status created");
                println!("{}", posted.url);
            }
            Err(e) => {
                warn!(error = %format_error_chain(&e), "status not created");
                eprintln!("{} {}", "✗".red(), format_error_chain(&e).red());
                if let Some(hint) = hint_for(&e) {
                    eprintln!("  {}", hint.yellow());
                }
            }
        }
    }

    debug!("post loop finished");
    Ok(())
}
