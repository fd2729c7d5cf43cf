mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    gallery::GallerySubcommand, glossary::GlossarySubcommand, link::LinkSubcommand,
    resource::ResourceSubcommand, section::SectionSubcommand, seo::SeoSubcommand,
    timeline::TimelineSubcommand, user::UserSubcommand, video::VideoSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "swissverse",
    about = "Admin CLI for the Swissverse content backend: edit, reorder, and publish site content",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .swissverse/)
    #[arg(long, global = true, env = "SWISSVERSE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter backend config
    Init {
        /// Base URL of the hosted backend
        #[arg(long)]
        url: String,
        /// API key (or set SWISSVERSE_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Manage timeline moments (ordered within each year)
    Timeline {
        #[command(subcommand)]
        subcommand: TimelineSubcommand,
    },

    /// Manage glossary terms
    Glossary {
        #[command(subcommand)]
        subcommand: GlossarySubcommand,
    },

    /// Manage gallery images
    Gallery {
        #[command(subcommand)]
        subcommand: GallerySubcommand,
    },

    /// Manage resources
    Resource {
        #[command(subcommand)]
        subcommand: ResourceSubcommand,
    },

    /// Manage configurable links
    Link {
        #[command(subcommand)]
        subcommand: LinkSubcommand,
    },

    /// Manage YouTube videos
    Video {
        #[command(subcommand)]
        subcommand: VideoSubcommand,
    },

    /// Manage section titles (singleton per section)
    Section {
        #[command(subcommand)]
        subcommand: SectionSubcommand,
    },

    /// Manage per-page SEO metadata
    Seo {
        #[command(subcommand)]
        subcommand: SeoSubcommand,
    },

    /// Manage user profiles and role grants
    User {
        #[command(subcommand)]
        subcommand: UserSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root_path = cli.root.as_deref();
    let root = root::resolve_root(root_path);

    let result = match cli.command {
        Commands::Init { url, api_key } => cmd::init::run(&root, &url, api_key),
        Commands::Timeline { subcommand } => cmd::timeline::run(&root, subcommand, cli.json),
        Commands::Glossary { subcommand } => cmd::glossary::run(&root, subcommand, cli.json),
        Commands::Gallery { subcommand } => cmd::gallery::run(&root, subcommand, cli.json),
        Commands::Resource { subcommand } => cmd::resource::run(&root, subcommand, cli.json),
        Commands::Link { subcommand } => cmd::link::run(&root, subcommand, cli.json),
        Commands::Video { subcommand } => cmd::video::run(&root, subcommand, cli.json),
        Commands::Section { subcommand } => cmd::section::run(&root, subcommand, cli.json),
        Commands::Seo { subcommand } => cmd::seo::run(&root, subcommand, cli.json),
        Commands::User { subcommand } => cmd::user::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
