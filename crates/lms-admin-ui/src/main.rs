//! LMS Admin command-line client
//!
//! Resolves a tenant for a page URL, loads its branding, and prints the resulting document
//! state. Useful for checking tenant themes without a browser.

use anyhow::Context;
use clap::{Parser, Subcommand};
use lms_admin_core::tenant;
use lms_admin_core::{generate_from_seed, ClientConfig, Location, Storage};
use lms_admin_ui::{AppState, ThemeSink};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Location used by commands that do not read the URL
const LOCAL_ORIGIN: &str = "http://localhost/";

#[derive(Debug, Parser)]
#[command(name = "lms-admin", version, about = "LMS admin tenant theming client")]
struct Cli {
    /// REST API base URL
    #[arg(long, global = true, env = "LMS_API_BASE")]
    api_base: Option<String>,

    /// Directory for persisted client state
    #[arg(long, global = true, env = "LMS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show how a URL identifies its tenant, without touching the network
    Detect { url: String },
    /// Load the tenant for a URL and print the applied branding
    Apply {
        url: String,
        /// Print the full document snapshot as JSON instead of CSS
        #[arg(long)]
        json: bool,
    },
    /// Re-fetch the persisted tenant and print the applied branding
    Refresh { url: String },
    /// Forget the cached tenant
    Clear,
    /// Generate a palette from a seed color
    Generate { seed: String },
}

impl Cli {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(api_base) = &self.api_base {
            config = config.with_api_base(api_base.clone());
        }
        if let Some(data_dir) = &self.data_dir {
            config = config.with_data_dir(data_dir.clone());
        }
        config
    }
}

fn print_branding(app: &AppState, json: bool) -> anyhow::Result<()> {
    if json {
        let snapshot = app.document.read().snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        let document = app.document.read();
        println!("/* {} | body: {} */", document.title(), document.class_list().join(" "));
        print!("{}", document.to_css());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    info!("LMS admin v{} (api: {})", env!("CARGO_PKG_VERSION"), config.api_base);

    match &cli.command {
        Command::Detect { url } => {
            let location = Location::parse(url)?;
            let storage = Storage::new_with_path(&config.data_dir)?;
            let detection = tenant::detect(&location, &storage);
            println!("method:  {}", detection.method);
            println!("valid:   {}", detection.is_valid);
            println!("domain:  {}", tenant::tenant_domain(&location));
            if let Some(error) = detection.error {
                println!("error:   {}", error);
            }
            if let Some(cached) = detection.tenant {
                println!("cached:  {} ({})", cached.name, cached.id);
            }
        }
        Command::Apply { url, json } => {
            let app = AppState::new(config, Location::parse(url)?)?;
            let state = app.bootstrap().await;
            if let Some(error) = &state.error {
                eprintln!("warning: {}", error);
            }
            print_branding(&app, *json)?;
        }
        Command::Refresh { url } => {
            let app = AppState::new(config, Location::parse(url)?)?;
            app.tenant_store.rehydrate()?;
            app.tenant_store
                .refresh_tenant()
                .await
                .context("tenant refresh failed")?;
            print_branding(&app, false)?;
        }
        Command::Clear => {
            let app = AppState::new(config, Location::parse(LOCAL_ORIGIN)?)?;
            app.tenant_store.clear_tenant()?;
            println!("Tenant cache cleared");
        }
        Command::Generate { seed } => {
            let palette = generate_from_seed(seed)?;
            println!("{}", serde_json::to_string_pretty(&palette)?);
        }
    }

    Ok(())
}
