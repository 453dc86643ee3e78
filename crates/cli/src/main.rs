use anyhow::{Context, Result, anyhow};
use catalog::{
    CatalogDetail, CatalogIndex, CatalogItem, ExclusionSet, Genre, ItemKey, MediaKind,
    ReferenceContext,
};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use pipeline::{DEFAULT_FEED_CAP, DEFAULT_RECOMMENDATION_LIMIT, RecommendationScorer, assemble};
use rand::Rng;
use server::{FeedSource, OrchestratorConfig, RecommendationOrchestrator, Recommendations};
use sources::{CatalogProvider, DEFAULT_API_URL, DEFAULT_LANGUAGE, InMemoryProvider, TmdbProvider};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// reel-feed - catalog recommendations and home feed
#[derive(Parser)]
#[command(name = "reel-feed")]
#[command(
    about = "Genre-overlap recommendations and exclusion-aware home feeds",
    long_about = None
)]
struct Cli {
    /// Where catalog data comes from
    #[arg(long, value_enum, default_value_t = ProviderKind::Fixture)]
    provider: ProviderKind,

    /// JSON catalog used by the fixture provider
    #[arg(long, default_value = "data/sample_catalog.json")]
    fixture: PathBuf,

    /// TMDB API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// TMDB API base URL
    #[arg(long, env = "TMDB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Response language sent to TMDB
    #[arg(long, env = "TMDB_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Per-fetch timeout in seconds
    #[arg(long, default_value = "8")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderKind {
    Tmdb,
    Fixture,
}

#[derive(Subcommand)]
enum Commands {
    /// Detail-page recommendations for one item
    Similar {
        /// Catalog ID of the reference item
        #[arg(long)]
        id: u64,

        /// movie or series
        #[arg(long, default_value = "movie")]
        kind: MediaKind,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
        limit: usize,

        /// Show score and shared genres for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Home-page feed of trending movies and series
    Home {
        /// Item already shown elsewhere on the page, e.g. movie:550 (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<ItemKey>,

        /// Feed length
        #[arg(long, default_value_t = DEFAULT_FEED_CAP)]
        cap: usize,
    },

    /// Time scorer and assembler over random synthetic pools
    Benchmark {
        /// Number of pools to score
        #[arg(long, default_value = "1000")]
        pools: usize,

        /// Candidates per pool
        #[arg(long, default_value = "20")]
        pool_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Commands::Similar {
            id,
            kind,
            limit,
            explain,
        } => {
            let config = OrchestratorConfig::default()
                .with_recommendation_limit(limit)
                .with_fetch_timeout(timeout);
            let orchestrator =
                RecommendationOrchestrator::new(build_provider(&cli)?).with_config(config);
            handle_similar(&orchestrator, ItemKey::new(id, kind), explain).await?
        }
        Commands::Home { ref exclude, cap } => {
            let config = OrchestratorConfig::default()
                .with_feed_cap(cap)
                .with_fetch_timeout(timeout);
            let orchestrator =
                RecommendationOrchestrator::new(build_provider(&cli)?).with_config(config);
            let exclude: ExclusionSet = exclude.iter().copied().collect();
            handle_home(&orchestrator, &exclude).await?
        }
        Commands::Benchmark { pools, pool_size } => handle_benchmark(pools, pool_size)?,
    }

    Ok(())
}

fn build_provider(cli: &Cli) -> Result<Arc<dyn CatalogProvider>> {
    match cli.provider {
        ProviderKind::Fixture => {
            let start = Instant::now();
            let index = CatalogIndex::load_from_file(&cli.fixture)
                .with_context(|| format!("Failed to load fixture {}", cli.fixture.display()))?;
            index.validate().context("Fixture failed validation")?;
            println!(
                "{} Loaded {} in {:?}",
                "✓".green(),
                cli.fixture.display(),
                start.elapsed()
            );
            Ok(Arc::new(InMemoryProvider::new(Arc::new(index))))
        }
        ProviderKind::Tmdb => {
            let api_key = cli.api_key.clone().ok_or_else(|| {
                anyhow!("--api-key or TMDB_API_KEY is required for the tmdb provider")
            })?;
            let provider = TmdbProvider::new(api_key)
                .with_api_url(cli.api_url.clone())
                .with_language(cli.language.clone())
                .with_request_timeout(Duration::from_secs(cli.timeout_secs))
                .context("Failed to build HTTP client")?;
            info!(api_url = provider.api_url(), "Using TMDB provider");
            Ok(Arc::new(provider))
        }
    }
}

/// Handle the 'similar' command
async fn handle_similar(
    orchestrator: &RecommendationOrchestrator,
    key: ItemKey,
    explain: bool,
) -> Result<()> {
    match orchestrator.similar_for(key).await {
        Ok(recommendations) => print_recommendations(&recommendations, explain),
        Err(e) => {
            // Same page state as an empty result
            warn!("Recommendations unavailable: {:#}", e);
            println!("{}", "No recommendations".yellow());
        }
    }
    Ok(())
}

/// Handle the 'home' command
async fn handle_home(
    orchestrator: &RecommendationOrchestrator,
    exclude: &ExclusionSet,
) -> Result<()> {
    let feed = orchestrator.home_feed(exclude).await?;

    let source = match feed.source {
        FeedSource::Assembled => feed.source.to_string().green(),
        FeedSource::Seed => feed.source.to_string().yellow(),
        FeedSource::Unavailable => feed.source.to_string().red(),
    };
    println!(
        "{} (source: {}, provider: {})",
        "Home Feed:".bold().blue(),
        source,
        orchestrator.provider_name()
    );

    if feed.items.is_empty() {
        println!("{}", "No recommendations".yellow());
        return Ok(());
    }
    for (rank, item) in feed.items.iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), describe(item));
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(pools: usize, pool_size: usize) -> Result<()> {
    if pools == 0 {
        return Err(anyhow!("--pools must be greater than zero"));
    }

    let mut rng = rand::rng();
    let scorer = RecommendationScorer::new();
    let exclude: ExclusionSet = (0..4).map(|id| ItemKey::new(id, MediaKind::Movie)).collect();

    let mut timings = Vec::with_capacity(pools);
    let mut recommended = 0usize;
    for _ in 0..pools {
        let reference = random_reference(&mut rng);
        let movies = random_pool(&mut rng, MediaKind::Movie, pool_size);
        let series = random_pool(&mut rng, MediaKind::Series, pool_size);

        let start = Instant::now();
        let ranked = scorer.score(&reference, &movies, DEFAULT_RECOMMENDATION_LIMIT)?;
        let feed = assemble(movies, series, &exclude, DEFAULT_FEED_CAP)?;
        timings.push(start.elapsed());

        recommended += ranked.len() + feed.len();
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() - 1) as f32 * p) as usize];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Pools: {} x {} candidates", pools, pool_size);
    println!("Items produced: {}", recommended);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));

    Ok(())
}

fn random_reference(rng: &mut impl Rng) -> ReferenceContext {
    let genres = (0..rng.random_range(1..4))
        .map(|_| {
            let id = rng.random_range(0..19);
            Genre {
                id,
                name: format!("#{}", id),
            }
        })
        .collect();
    let detail = CatalogDetail::new(CatalogItem::new(0, MediaKind::Movie, "Reference"), genres);
    ReferenceContext::from_detail(&detail)
}

fn random_pool(rng: &mut impl Rng, kind: MediaKind, size: usize) -> Vec<CatalogItem> {
    (0..size)
        .map(|i| {
            let genres: Vec<u32> = (0..rng.random_range(0..4))
                .map(|_| rng.random_range(0..19))
                .collect();
            CatalogItem::new(i as u64 + 1, kind, format!("Item {}", i))
                .with_genres(genres)
                .with_votes(rng.random_range(0.0..=10.0), rng.random_range(0..5000))
        })
        .collect()
}

fn describe(item: &CatalogItem) -> String {
    format!(
        "{} [{}] {:.1}/10 ({} votes)",
        item.title,
        item.key(),
        item.vote_average,
        item.vote_count
    )
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &Recommendations, explain: bool) {
    let reference = &recommendations.reference;
    println!(
        "{} {} [{}]",
        "Because you viewed".bold().blue(),
        reference.item().title.bold(),
        reference.genre_names().join(", ")
    );

    let ranking = &recommendations.ranking;
    if ranking.is_empty() {
        println!("{}", "No recommendations".yellow());
        return;
    }

    let context = ReferenceContext::from_detail(reference);
    for (rank, candidate) in ranking.candidates.iter().enumerate() {
        println!(
            "{}. {}",
            (rank + 1).to_string().green(),
            describe(candidate.item())
        );
        if explain {
            println!(
                "   score {:.1}, {} shared genre(s), tier {}",
                candidate.score(),
                context.common_genres(candidate.item()),
                ranking.tier.unwrap_or("none")
            );
        }
    }
}
