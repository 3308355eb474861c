//! CLI entry point for pressroom

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pressroom")]
#[command(version)]
#[command(about = "A static front-end renderer for headless WordPress content", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site from the content export
    #[command(alias = "b")]
    Build,

    /// Build, then serve the generated site
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List site content
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "pressroom=debug,info"
    } else {
        "pressroom=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Build => {
            let app = pressroom::Pressroom::new(&base_dir)?;
            tracing::info!("Building site...");
            app.build()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let app = pressroom::Pressroom::new(&base_dir)?;

            // Build first so the preview matches the export
            tracing::info!("Building site...");
            app.build()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            pressroom::server::start(&app, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let app = pressroom::Pressroom::new(&base_dir)?;
            pressroom::commands::list::run(&app, &r#type)?;
        }

        Commands::Clean => {
            let app = pressroom::Pressroom::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("pressroom version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
