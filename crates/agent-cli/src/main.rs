//! Command-line interface for the investment advisor

use agent_invest::{AdvisorConfig, InvestmentCrew, MetricsAggregator, YahooFinanceClient};
use agent_llm::providers::OpenAIProvider;
use agent_utils::{LogFormat, init_tracing, load_dotenv};
use anyhow::{Context as _, bail};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

const TICKER_PROMPT: &str = "투자 자문을 구하고 싶은 기업명을 입력해주세요: ";

#[derive(Parser)]
#[command(name = "invest-advisor")]
#[command(about = "Financial metrics and multi-analyst investment reports", long_about = None)]
struct Cli {
    /// Log output format (pretty or json)
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the financial metrics report for a ticker as JSON
    Metrics {
        /// Stock ticker symbol
        ticker: String,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Run the analyst crew and write the investment report
    Advise(AdviseArgs),
}

#[derive(Args)]
struct AdviseArgs {
    /// Stock ticker symbol, asked for on stdin when omitted
    ticker: Option<String>,
    /// Directory the Markdown report is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Path of the JSON run log
    #[arg(long, conflicts_with = "no_run_log")]
    run_log: Option<PathBuf>,
    /// Skip writing the run log
    #[arg(long)]
    no_run_log: bool,
    /// Print every stage instead of the final recommendation only
    #[arg(long)]
    full_report: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // before tracing, so RUST_LOG from .env reaches the filter
    let dotenv = load_dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_format, "info");
    match dotenv {
        Ok(Some(path)) => info!(path = %path.display(), "Loaded .env file"),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Ignoring .env file"),
    }
    info!("Starting invest-advisor");

    match cli.command {
        Commands::Metrics { ticker, compact } => metrics(&ticker, compact).await,
        Commands::Advise(args) => advise(args).await,
    }
}

async fn metrics(ticker: &str, compact: bool) -> anyhow::Result<()> {
    let config = AdvisorConfig::from_env()?;
    let client = YahooFinanceClient::new(&config)?;
    let aggregator = MetricsAggregator::new(Arc::new(client));

    let report = aggregator
        .analyze(ticker)
        .await
        .with_context(|| format!("failed to analyze {ticker}"))?;

    let json = if compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{json}");
    Ok(())
}

async fn advise(args: AdviseArgs) -> anyhow::Result<()> {
    let ticker = match args.ticker {
        Some(ticker) => ticker,
        None => read_ticker()?,
    };

    let mut builder = AdvisorConfig::builder().with_env();
    if let Some(dir) = args.output_dir {
        builder = builder.output_dir(dir);
    }
    if args.no_run_log {
        builder = builder.run_log(None);
    } else if let Some(path) = args.run_log {
        builder = builder.run_log(Some(path));
    }
    let config = builder.build()?;

    let llm = OpenAIProvider::from_env().context("OpenAI provider is not configured")?;
    let market = YahooFinanceClient::new(&config)?;
    let crew = InvestmentCrew::new(Arc::new(llm), Arc::new(market), config)?;

    let output = crew
        .kickoff(&ticker)
        .await
        .with_context(|| format!("investment crew failed for {ticker}"))?;

    if args.full_report {
        println!("{}", output.format_report());
    } else {
        println!("{}", output.final_output());
    }
    Ok(())
}

fn read_ticker() -> anyhow::Result<String> {
    print!("{TICKER_PROMPT}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let ticker = line.trim().to_string();
    if ticker.is_empty() {
        bail!("no ticker entered");
    }
    Ok(ticker)
}
