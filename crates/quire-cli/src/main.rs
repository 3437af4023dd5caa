mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "A paginated static blog generator", long_about = None)]
struct Cli {
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build {
        #[arg(long, short, default_value = "blog")]
        root: PathBuf,

        #[arg(long, env = quire::PAGE_SIZE_ENV)]
        posts_per_page: Option<String>,
    },
    New {
        title: Option<String>,

        #[arg(long, short, default_value = "blog")]
        root: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = std::env::var("QUIRE_LOG").unwrap_or_else(|_| {
        if verbose {
            "quire=debug".to_string()
        } else {
            "quire=info".to_string()
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::new(filter))
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            root,
            posts_per_page,
        } => commands::build_blog(&root, posts_per_page.as_deref()),
        Commands::New { title, root } => commands::new_post(&root, title),
    };

    if let Err(error) = result {
        eprintln!("{} {error}", "Error:".red());
        std::process::exit(1);
    }
}
