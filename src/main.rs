//! CLI entry point for postkit

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postkit::Blog;

/// Exit code for content that breaks the front-matter rules
const EXIT_INVALID: u8 = 2;

#[derive(Parser)]
#[command(name = "postkit")]
#[command(version)]
#[command(about = "Validate, list and render a markdown blog", long_about = None)]
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
    /// List published posts, tags or categories
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show a single post by slug
    Show {
        slug: String,
    },

    /// Validate post front-matter (all posts when no file is given)
    Validate {
        files: Vec<PathBuf>,
    },

    /// Validate a written file described by a hook message on stdin
    Hook,

    /// Create a new draft post
    New {
        /// Title of the new post
        title: String,

        /// File name (without extension) for the new post
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Fail when any post cannot be loaded
        #[arg(long)]
        strict: bool,
    },

    /// Generate, then serve the site locally
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging; stdout belongs to command output
    let filter = if cli.debug {
        "postkit=debug,info"
    } else {
        "postkit=info"
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
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::List { r#type } => {
            let blog = Blog::new(&base_dir)?;
            postkit::commands::list::run(&blog, &r#type)?;
        }

        Commands::Show { slug } => {
            let blog = Blog::new(&base_dir)?;
            postkit::commands::show::run(&blog, &slug)?;
        }

        Commands::Validate { files } => {
            let blog = Blog::new(&base_dir)?;
            if !postkit::commands::validate::run(&blog, &files)? {
                return Ok(ExitCode::from(EXIT_INVALID));
            }
        }

        Commands::Hook => {
            let blog = Blog::new(&base_dir)?;
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read hook input")?;

            let outcome = postkit::commands::hook::run(&blog, &input);
            if let Some(report) = outcome.report() {
                eprintln!("{}", report);
            }
            return Ok(ExitCode::from(outcome.exit_code() as u8));
        }

        Commands::New { title, slug } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let path = postkit::commands::new::create_post(&blog, &title, slug.as_deref())?;
            println!("Created: {}", path.display());
        }

        Commands::Generate { strict } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            postkit::commands::generate::run_with_options(&blog, strict)?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let blog = Blog::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            blog.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            postkit::server::start(&blog, &ip, port).await?;
        }

        Commands::Clean => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("postkit version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(ExitCode::SUCCESS)
}
