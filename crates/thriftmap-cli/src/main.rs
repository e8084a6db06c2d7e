mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use thriftmap_content::{ContentRepository, HttpContentClient, InMemoryRepository};
use thriftmap_engine::SortKey;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "thriftmap")]
#[command(about = "NYC thrift and vintage store discovery, from the terminal")]
struct Cli {
    /// Read content from a local JSON fixture instead of the content API
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// City scope (defaults to the configured city)
    #[arg(long, global = true)]
    city: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List stores, filtered and sorted
    List {
        /// Filter by category slug (repeatable, ORed together)
        #[arg(long)]
        category: Vec<String>,
        /// Filter by neighborhood slug (repeatable, ORed together)
        #[arg(long)]
        neighborhood: Vec<String>,
        /// Filter by region slug (repeatable, ORed together)
        #[arg(long)]
        region: Vec<String>,
        /// Narrow the filtered result by a search term
        #[arg(long)]
        search: Option<String>,
        /// Sort order for the result
        #[arg(long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,
        /// Seed filters from a shareable query string (e.g. "category=vintage")
        #[arg(long)]
        url: Option<String>,
        /// Emit the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show autocomplete suggestions for a partial query
    Search {
        /// Partial store, neighborhood, region, or category name
        query: String,
    },
    /// Show one store in detail
    Show {
        /// Store slug
        slug: String,
    },
    /// Print the marker legend (store types, colors, glyphs)
    Legend,
    /// List blog posts, or show one by slug
    Blog {
        /// Post slug
        slug: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    /// Alphabetical by name
    Name,
    /// Best-rated first
    Rating,
    /// Closest to the city center first
    Distance,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Alphabetical,
            SortArg::Rating => SortKey::Rating,
            SortArg::Distance => SortKey::Distance,
        }
    }
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

async fn dispatch<R: ContentRepository>(
    repo: &R,
    city_slug: &str,
    command: Commands,
) -> anyhow::Result<()> {
    match command {
        Commands::List {
            category,
            neighborhood,
            region,
            search,
            sort,
            url,
            json,
        } => {
            let spec = commands::build_spec(category, neighborhood, region, search, sort.into(), url.as_deref())?;
            commands::run_list(repo, city_slug, &spec, json).await
        }
        Commands::Search { query } => commands::run_search(repo, city_slug, &query).await,
        Commands::Show { slug } => commands::run_show(repo, city_slug, &slug).await,
        Commands::Legend => {
            commands::run_legend();
            Ok(())
        }
        Commands::Blog { slug } => commands::run_blog(repo, slug.as_deref()).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Fixture mode needs no content URL, so skip the full config load there.
    if let Some(path) = &cli.data {
        init_tracing("info")?;
        let city = cli.city.as_deref().unwrap_or("new-york");
        let repo = InMemoryRepository::from_file(path)
            .map_err(|e| anyhow::anyhow!("failed to load fixture {}: {e}", path.display()))?;
        return dispatch(&repo, city, cli.command).await;
    }

    let config = thriftmap_core::load_app_config_from_env()?;
    init_tracing(&config.log_level)?;
    let city = cli.city.as_deref().unwrap_or(&config.city_slug);
    let repo = HttpContentClient::new(
        &config.content_url,
        config.content_timeout_secs,
        &config.content_user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build content client: {e}"))?;
    dispatch(&repo, city, cli.command).await
}
