//! CLI entry point for blogcfg

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogcfg")]
#[command(version)]
#[command(about = "Check blog site settings and post front-matter", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Directory holding the posts, relative to the site directory
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write starter settings and a first post
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Validate the settings and every post
    #[command(alias = "c")]
    Check,

    /// List posts or tags
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the posts selected for the home page
    Homepage,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogcfg=debug,info"
    } else {
        "blogcfg=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let open_site = || -> Result<blogcfg::Site> {
        let site = blogcfg::Site::new(&base_dir)?;
        Ok(match &cli.content_dir {
            Some(dir) => site.with_content_dir(dir),
            None => site,
        })
    };

    match cli.command {
        Commands::Init { ref folder } => {
            let target_dir = if folder.is_absolute() {
                folder.clone()
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            blogcfg::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Check => {
            let site = open_site()?;
            site.check()?;
        }

        Commands::List { ref r#type, json } => {
            let site = open_site()?;
            blogcfg::commands::list::run(&site, r#type, json)?;
        }

        Commands::Homepage => {
            let site = open_site()?;
            blogcfg::commands::homepage::run(&site)?;
        }

        Commands::Version => {
            println!("blogcfg version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
