//! CLI entrypoint for clearflow
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod chat;
mod commands;
mod output;

use anyhow::{Context, Result, bail};
use clap::Parser;
use clearflow_application::{
    CartService, CatalogGateway, ChatService, LOCALE_NAMESPACE, NullStateStore, ReplyService,
    SessionService, StateStore, SupportGateway, TicketWatcher, WatchEnd,
};
use clearflow_domain::Locale;
use clearflow_infrastructure::{CmsClient, ConfigLoader, FileConfig, JsonFileStore};
use commands::{CartCommand, Cli, Command, LocaleCommand, TicketCommand};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Command::ConfigSources = cli.command {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    // === Dependency Injection ===
    let store = open_store(&config);
    let locale = resolve_locale(&cli, &config, store.as_ref())?;
    info!("Using locale {} ({:?})", locale, locale.dir());

    let cms = Arc::new(CmsClient::new(
        config.api.base_url.clone(),
        config.api.timeout(),
    )?);
    let support_params = config
        .support
        .to_support_params(chat::default_greeting(locale));

    match cli.command {
        Command::Products { page } => {
            let page = cms.list_products(locale, page).await?;
            output::print_product_page(&page);
        }

        Command::Product { slug } => {
            let product = cms.product_by_slug(&slug, locale).await?;
            output::print_product(&product);
        }

        Command::Cart { command } => {
            let mut cart = CartService::load(store);
            match command {
                CartCommand::Add { slug, qty } => {
                    let product = cms.product_by_slug(&slug, locale).await?;
                    cart.add_item(&product, qty);
                }
                CartCommand::Remove { id } => cart.remove_item(&id),
                CartCommand::Set { id, quantity } => {
                    if quantity < 1 {
                        bail!("Quantity must be at least 1; use `cart remove` to delete a line.");
                    }
                    cart.update_quantity(&id, quantity);
                }
                CartCommand::Clear => cart.clear(),
                CartCommand::Show => {}
                CartCommand::Refresh => cart.relocalize(cms.as_ref(), locale).await,
                CartCommand::Checkout => {
                    output::print_cart(cart.cart());
                    if !cart.cart().is_empty() {
                        println!();
                        println!("Checkout is not available in this preview; nothing was ordered.");
                    }
                    return Ok(());
                }
            }
            output::print_cart(cart.cart());
        }

        Command::Chat => {
            let sessions = SessionService::load(store);
            let chat_service =
                ChatService::new(sessions, cms.clone(), locale, support_params.greeting.clone());
            chat::run(chat_service).await?;
        }

        Command::Ticket { command } => match command {
            TicketCommand::Show { id } => {
                let ticket = cms.fetch_ticket(&id, locale).await?;
                output::print_ticket(&ticket);
            }
            TicketCommand::Watch { id } => {
                let watcher = TicketWatcher::new(cms.clone(), support_params.poll_interval);
                let thread = Arc::new(Mutex::new(clearflow_domain::ThreadReconciler::new()));
                let cancel = CancellationToken::new();

                let signal_cancel = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        signal_cancel.cancel();
                    }
                });

                let presenter = output::WatchPresenter::new();
                match watcher.watch(&id, locale, thread, cancel, &presenter).await {
                    WatchEnd::Terminal(status) => {
                        println!();
                        println!("Ticket {} is {}; polling stopped.", id, status);
                    }
                    WatchEnd::Cancelled => {
                        println!();
                        println!("Stopped watching ticket {}.", id);
                    }
                }
            }
            TicketCommand::Reply { id, message } => {
                let ticket = cms.fetch_ticket(&id, locale).await?;
                let thread = Mutex::new(clearflow_domain::ThreadReconciler::new());
                let reply = ReplyService::new(cms.clone());
                let status = reply
                    .send(&id, &message, ticket.status, locale, &thread)
                    .await?;

                if let Ok(guard) = thread.lock() {
                    for message in guard.visible() {
                        output::print_message(message);
                    }
                }
                println!();
                println!("status: {}", output::status_label(status));
            }
        },

        Command::Locale { command } => match command {
            LocaleCommand::Show => {
                println!("{} ({:?})", locale, locale.dir());
            }
            LocaleCommand::Set { locale } => {
                let locale: Locale = locale.parse()?;
                save_locale(store.as_ref(), locale);
                println!("Locale preference saved: {}", locale);
            }
        },

        Command::ConfigSources => unreachable!("handled before config load"),
    }

    Ok(())
}

/// Open the durable store at the configured (or platform) state directory.
///
/// Falls back to a no-op store rather than failing; persistence is
/// best-effort everywhere.
fn open_store(config: &FileConfig) -> Arc<dyn StateStore> {
    let dir = config.storage.dir.clone().or_else(JsonFileStore::default_dir);
    match dir {
        Some(dir) => Arc::new(JsonFileStore::new(dir)),
        None => {
            warn!("No state directory available; cart and sessions will not persist");
            Arc::new(NullStateStore)
        }
    }
}

/// Effective locale: `--locale` flag, then saved preference, then config.
fn resolve_locale(cli: &Cli, config: &FileConfig, store: &dyn StateStore) -> Result<Locale> {
    if let Some(flag) = &cli.locale {
        return flag.parse::<Locale>().context("invalid --locale");
    }
    if let Some(saved) = load_locale(store) {
        return Ok(saved);
    }
    config
        .locale
        .parse_default()
        .context("invalid [locale] default in config")
}

fn load_locale(store: &dyn StateStore) -> Option<Locale> {
    match store.get(LOCALE_NAMESPACE) {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(locale) => Some(locale),
            Err(e) => {
                warn!("Discarding unreadable locale preference: {}", e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("Could not read locale preference: {}", e);
            None
        }
    }
}

fn save_locale(store: &dyn StateStore, locale: Locale) {
    let Ok(bytes) = serde_json::to_vec(&locale) else {
        return;
    };
    if let Err(e) = store.set(LOCALE_NAMESPACE, &bytes) {
        warn!("Could not persist locale preference: {}", e);
    }
}
