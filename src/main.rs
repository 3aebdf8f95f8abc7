use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use housing_analyzer::config::{self, Config, SourceKind};
use housing_analyzer::scrapers::{DaftScraper, ListingSource, PlaceholderSource};
use housing_analyzer::server::{self, AppState};
use housing_analyzer::{AnalyzeClient, FormSnapshot, MemoryPage, SearchSubmission, SubmitOutcome, UiContext};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Property search client and analysis server
#[derive(Parser)]
#[command(name = "housing-analyzer", version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/housing-analyzer/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit one search and print the rendered results
    Search(SearchArgs),
    /// Run the /api/analyze endpoint
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,
        /// Listing source
        #[arg(long, value_enum)]
        source: Option<SourceKind>,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Server base URL
    #[arg(long)]
    base_url: Option<String>,
    /// Write the results HTML to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    property_type: Option<String>,
    #[arg(long)]
    min_price: Option<String>,
    #[arg(long)]
    max_price: Option<String>,
    #[arg(long)]
    min_beds: Option<String>,
    #[arg(long)]
    max_beds: Option<String>,
    #[arg(long)]
    keywords: Option<String>,
}

impl SearchArgs {
    fn form(&self) -> FormSnapshot {
        let fields = [
            ("email", &self.email),
            ("location", &self.location),
            ("propertyType", &self.property_type),
            ("minPrice", &self.min_price),
            ("maxPrice", &self.max_price),
            ("minBeds", &self.min_beds),
            ("maxBeds", &self.max_beds),
            ("keywords", &self.keywords),
        ];
        FormSnapshot::from_pairs(
            fields
                .into_iter()
                .filter_map(|(name, value)| value.clone().map(|value| (name, value))),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref());

    match cli.command {
        Command::Search(args) => search(&config, args).await,
        Command::Serve { bind, source } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let source = source.unwrap_or(config.server.source);
            serve(&config, &bind, source).await
        }
    }
}

async fn search(config: &Config, args: SearchArgs) -> Result<()> {
    let base_url = args.base_url.as_deref().unwrap_or(&config.client.base_url);
    let client = AnalyzeClient::new(base_url, config.client.timeout())?;

    let page = Arc::new(MemoryPage::new());
    let submission = SearchSubmission::new(client, UiContext::bind(page.clone()));

    let outcome = submission.handle_submit(&args.form()).await;
    let html = page.results_html();

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &html).await?;
            info!("💾 Saved results to {}", path.display());
        }
        None => println!("{}", html),
    }

    if let SubmitOutcome::Failed { message } = outcome {
        anyhow::bail!("Analysis failed: {}", message);
    }
    Ok(())
}

async fn serve(config: &Config, bind: &str, source: SourceKind) -> Result<()> {
    let source: Arc<dyn ListingSource> = match source {
        SourceKind::Placeholder => Arc::new(PlaceholderSource::new()),
        SourceKind::Daft => Arc::new(DaftScraper::new(config.daft.clone())?),
    };
    info!("🏠 Housing Analyzer - serving listings from {}", source.source_name());

    server::serve(bind, Arc::new(AppState::new(source)?)).await
}
