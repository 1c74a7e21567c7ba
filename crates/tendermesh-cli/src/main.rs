mod display;

use std::time::Duration;

use clap::{Parser, Subcommand};
use tendermesh_core::{CompanyProfile, SearchFilters};
use tendermesh_engine::{EngineConfig, TenderEngine};

/// Command-line interface for the Tendermesh aggregation engine
#[derive(Parser)]
#[clap(name = "tendermesh", version, about, long_about = None)]
struct Cli {
    /// Per-provider fetch timeout in seconds
    #[clap(long, global = true, default_value = "10")]
    timeout_secs: u64,

    /// Seed for simulated bid counts
    #[clap(long, global = true, env = "TENDERMESH_SEED")]
    seed: Option<u64>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and rank tenders across jurisdictions
    Fetch {
        /// Comma-separated jurisdiction codes (default: all registered)
        #[clap(long, value_delimiter = ',')]
        jurisdictions: Vec<String>,

        /// Maximum number of cards to print
        #[clap(long, default_value = "20")]
        limit: usize,
    },

    /// Search tenders by free text with optional filters
    Search {
        /// Query text
        query: String,

        /// Comma-separated jurisdiction codes (default: all registered)
        #[clap(long, value_delimiter = ',')]
        jurisdictions: Vec<String>,

        /// Category substring filter
        #[clap(long)]
        category: Option<String>,

        /// Minimum disclosed budget
        #[clap(long)]
        min_budget: Option<String>,

        /// Maximum disclosed budget
        #[clap(long)]
        max_budget: Option<String>,

        /// Region substring filter
        #[clap(long)]
        region: Option<String>,

        /// Requirement tags, any match qualifies
        #[clap(long, value_delimiter = ',')]
        requirements: Vec<String>,

        /// Maximum number of cards to print
        #[clap(long, default_value = "20")]
        limit: usize,
    },

    /// List tenders for a region or country fragment
    Locate {
        /// Region or country substring
        location: String,
    },

    /// Recommend tenders for a company profile
    Recommend {
        /// Company capabilities
        #[clap(long, value_delimiter = ',')]
        capabilities: Vec<String>,

        /// Target countries
        #[clap(long, value_delimiter = ',')]
        countries: Vec<String>,

        /// Annual revenue
        #[clap(long)]
        revenue: Option<f64>,

        /// Comma-separated jurisdiction codes (default: all registered)
        #[clap(long, value_delimiter = ',')]
        jurisdictions: Vec<String>,
    },

    /// Show statistics over the aggregated batch
    Stats {
        /// Comma-separated jurisdiction codes (default: all registered)
        #[clap(long, value_delimiter = ',')]
        jurisdictions: Vec<String>,
    },

    /// List supported jurisdictions
    Jurisdictions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("tendermesh v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let mut config =
        EngineConfig::default().with_provider_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(seed) = cli.seed {
        config = config.with_bids_seed(seed);
    }
    let engine = TenderEngine::new(config);

    match cli.command {
        Command::Fetch {
            jurisdictions,
            limit,
        } => {
            let tenders = engine.fetch_all_tenders(&jurisdictions).await?;
            display::print_tenders(&tenders, limit);
        }
        Command::Search {
            query,
            jurisdictions,
            category,
            min_budget,
            max_budget,
            region,
            requirements,
            limit,
        } => {
            let filters = SearchFilters::from_query(
                category,
                min_budget.as_deref(),
                max_budget.as_deref(),
                region,
                requirements,
            )?;
            let tenders = engine
                .search_tenders(&query, &jurisdictions, &filters)
                .await?;
            display::print_tenders(&tenders, limit);
        }
        Command::Locate { location } => {
            let tenders = engine.get_tenders_by_location(&location).await?;
            let count = tenders.len();
            display::print_tenders(&tenders, count);
        }
        Command::Recommend {
            capabilities,
            countries,
            revenue,
            jurisdictions,
        } => {
            let profile = CompanyProfile {
                capabilities,
                countries,
                total_revenue: revenue,
            };
            let recommendations = engine.get_recommendations(&profile, &jurisdictions).await?;
            display::print_recommendations(&recommendations);
        }
        Command::Stats { jurisdictions } => {
            let stats = engine.get_stats(&jurisdictions).await?;
            display::print_stats(&stats);
        }
        Command::Jurisdictions => {
            for info in engine.supported_jurisdictions() {
                println!("  {:<12} {}", info.code, info.display_name);
            }
        }
    }

    Ok(())
}
