use anyhow::{Context, Result};
use catalog_search::{
    provider_for, Catalog, EmbeddingMode, RankedItem, SearchConfig, SemanticCatalog,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod fetch;

#[derive(Parser)]
#[command(name = "catalog-finder")]
#[command(about = "Semantic search over list titles", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML config file (defaults < file < CATALOG_FINDER_* env < flags)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override embedding backend in this process
    #[arg(long, global = true, value_enum)]
    embed_mode: Option<EmbedMode>,

    /// Override embedding dimension
    #[arg(long, global = true)]
    dimension: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank listing titles by similarity to a query
    Search(SearchArgs),

    /// Print the titles extracted from a listing
    Titles(TitlesArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Read the listing from a local JSON file instead of fetching it
    #[arg(long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Listing endpoint (defaults to the configured listing_url)
    #[arg(long)]
    url: Option<String>,
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text query
    query: String,

    #[command(flatten)]
    source: SourceArgs,

    /// Number of results (defaults to the configured top_k)
    #[arg(short = 'k', long)]
    k: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct TitlesArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum EmbedMode {
    Stub,
    Tokens,
}

impl EmbedMode {
    const fn as_domain(self) -> EmbeddingMode {
        match self {
            Self::Stub => EmbeddingMode::Stub,
            Self::Tokens => EmbeddingMode::Tokens,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON consumers
    let json_output = match &cli.command {
        Commands::Search(args) => args.json,
        Commands::Titles(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Search(args) => run_search(&config, args).await,
        Commands::Titles(args) => run_titles(&config, args).await,
    }
}

fn resolve_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    config
        .apply_env()
        .context("Invalid CATALOG_FINDER_* environment override")?;

    if let Some(mode) = cli.embed_mode {
        config.embedding_mode = mode.as_domain();
    }
    if let Some(dimension) = cli.dimension {
        config.dimension = dimension;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn load_catalog(config: &SearchConfig, source: SourceArgs) -> Result<Catalog> {
    let response = match source.file {
        Some(path) => fetch::read_listing(&path)?,
        None => {
            let url = source.url.as_deref().unwrap_or(&config.listing_url);
            fetch::fetch_listing(url).await?
        }
    };
    Catalog::from_listing(response).context("Listing has no usable items")
}

async fn run_search(config: &SearchConfig, args: SearchArgs) -> Result<()> {
    let catalog = load_catalog(config, args.source).await?;
    if catalog.is_empty() {
        log::warn!("Listing contains no titles; nothing to rank");
    }

    let embedder = provider_for(config.embedding_mode, config.dimension)?;
    let engine = SemanticCatalog::build(catalog, embedder).context("Failed to index titles")?;
    let k = args.k.unwrap_or(config.top_k);
    let hits = engine
        .search(&args.query, k)
        .with_context(|| format!("Search failed for '{}'", args.query))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        print_hits(&hits);
    }
    Ok(())
}

async fn run_titles(config: &SearchConfig, args: TitlesArgs) -> Result<()> {
    let catalog = load_catalog(config, args.source).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog.titles())?);
    } else {
        for (idx, title) in catalog.titles().iter().enumerate() {
            println!("{idx}\t{title}");
        }
    }
    Ok(())
}

fn print_hits(hits: &[RankedItem]) {
    for hit in hits {
        println!("Rank {}: (Distance: {})\n{}\n", hit.rank, hit.distance, hit.title);
    }
}
