use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    Collaborators, NotificationsPanel, PlainSupportLink, ReqwestJsonClient, SubmitOutcome,
    TranslationTable,
};
use shared::domain::Catalog;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal_view;

use config::{load_settings, split_list};
use terminal_view::TerminalView;

/// Show and update mailing-list subscriptions.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "notifications.toml")]
    config: PathBuf,
    #[arg(long)]
    server_url: Option<String>,
    /// Comma separated mailing list keys, replaces the configured catalog.
    #[arg(long)]
    catalog: Option<String>,
    #[arg(long)]
    support_email: Option<String>,
    #[arg(long, value_name = "KEY")]
    subscribe: Vec<String>,
    #[arg(long, value_name = "KEY")]
    unsubscribe: Vec<String>,
    /// Submit even when nothing was toggled.
    #[arg(long)]
    submit: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(v) = args.server_url {
        settings.server_url = v;
    }
    if let Some(v) = args.catalog.as_deref() {
        settings.catalog = split_list(v);
    }
    if let Some(v) = args.support_email {
        settings.support_email = v;
    }

    let catalog = Catalog::new(settings.catalog.iter().map(String::as_str))
        .context("invalid mailing list catalog")?;
    let http = ReqwestJsonClient::new(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;

    let mut collaborators = Collaborators::new(Arc::new(http))
        .with_support_link(Arc::new(PlainSupportLink::new(&settings.support_email)));
    if let Some(path) = &settings.translations_path {
        let table = TranslationTable::from_file(path)?;
        info!(path = %path.display(), messages = table.len(), "loaded translations");
        collaborators = collaborators.with_localizer(Arc::new(table));
    }

    let mut panel = NotificationsPanel::mount(
        Arc::new(TerminalView::stdout()),
        catalog,
        collaborators,
    );
    let loaded = panel.loaded().await;
    // Let the render loop print the outcome before we act on it.
    tokio::task::yield_now().await;
    loaded.context("could not load current subscriptions")?;

    let view_model = panel.view_model();
    for key in &args.unsubscribe {
        view_model.set_subscribed(key, false)?;
    }
    for key in &args.subscribe {
        view_model.set_subscribed(key, true)?;
    }

    if args.submit || !args.subscribe.is_empty() || !args.unsubscribe.is_empty() {
        let outcome = view_model.submit().await;
        tokio::task::yield_now().await;
        match outcome.context("could not update email preferences")? {
            SubmitOutcome::Updated => info!(server_url = %settings.server_url, "preferences saved"),
            SubmitOutcome::NotSubscribed => info!("server reported not_subscribed; nothing changed"),
        }
    }

    Ok(())
}
