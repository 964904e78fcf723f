//! AssetDesk - current-user session demo
//!
//! Seeds the in-process store, signs a user in and prints what that user sees.

#![allow(missing_docs)]

use anyhow::Context;
use assetdesk::auth::{Action, MemoryAuthChannel, Resource};
use assetdesk::core::catalog::Catalog;
use assetdesk::storage::{MemoryStore, Seed};
use assetdesk::utils::logging::init_tracing;
use assetdesk::{Config, CurrentUserContext, SessionServices};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "assetdesk", version, about = "Inspect a desk session")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "ASSETDESK_CONFIG")]
    config: Option<PathBuf>,

    /// YAML seed with principals, directory and assets
    #[arg(short, long, env = "ASSETDESK_SEED")]
    seed: Option<PathBuf>,

    /// Principal to sign in as
    #[arg(short, long)]
    user: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::load(args.config.as_deref())
        .await
        .context("loading configuration")?;
    init_tracing(config.logging())?;

    let seed = match &args.seed {
        Some(path) => Seed::from_file(path).await.context("loading seed")?,
        None => Seed::default(),
    };

    let store = MemoryStore::new();
    seed.apply(&store, config.directory())?;
    let channel = MemoryAuthChannel::new();

    let services = SessionServices::from_config(
        &config,
        Some(Arc::new(channel.clone())),
        Some(Arc::new(store.clone())),
    );
    let context = CurrentUserContext::from_config(&config, services)?;

    if let Some(user) = &args.user {
        let principal = seed
            .principal(user)
            .cloned()
            .with_context(|| format!("no principal '{}' in seed", user))?;
        channel.sign_in(principal);
    }

    let principal = context.resolved().await;
    println!("Session: {}", context.state());

    let Some(principal) = principal else {
        println!("Nobody is signed in.");
        return Ok(());
    };
    info!(principal = %principal.id, "Session resolved");

    let subordinates = context.subordinates();
    if principal.is_admin() {
        println!("\nAssociates ({}):", subordinates.len());
        for associate in &subordinates {
            println!("  {:<12} {}", associate.id, associate.name);
        }
        if let Some(err) = context.directory_error() {
            println!("  (stale: {})", err);
        }
    }

    println!("\nPermissions for {}:", principal.role);
    print!("  {:<20}", "resource");
    for action in Action::ALL {
        print!(" {:<7}", action.to_string());
    }
    println!();
    for resource in Resource::all() {
        print!("  {:<20}", resource.to_string());
        for action in Action::ALL {
            let mark = if context.is_authorized(resource, action) {
                "yes"
            } else {
                "-"
            };
            print!(" {:<7}", mark);
        }
        println!();
    }

    println!("\nAssets:");
    for entry in Catalog::global().entries() {
        let assets = match context.assets(entry.kind) {
            Ok(assets) => assets,
            Err(_) => continue,
        };
        for asset in assets.data().unwrap_or_default() {
            println!(
                "  {:<20} {:<12} {} {}",
                entry.label, asset.client_name, entry.identifier_label, asset.identifier
            );
        }
    }

    context.sign_out();
    Ok(())
}
