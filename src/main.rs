use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Read};

use summoner_report::analysis::champion_stats::MatchSummary;
use summoner_report::display::output::{
    display_error, display_info, display_match_history, display_success,
};
use summoner_report::service::Outcome;
use summoner_report::tool::ToolServer;
use summoner_report::{logging, AnalysisRequest, Analyzer, Config, RiotApiClient};

#[derive(Parser, Debug)]
#[command(name = "Summoner Report")]
#[command(about = "League of Legends match analysis and champion recommendations", long_about = None)]
struct Args {
    /// Platform region (default: RIOT_REGION or kr)
    #[arg(short, long, global = true)]
    region: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Read one JSON request from stdin, print the result as a JSON string (default)
    Run,

    /// Serve the `analyze` tool over stdio (JSON-RPC, one message per line)
    Serve,

    /// Analyze a player from the command line
    Analyze {
        /// Riot ID, e.g. "Hide on bush#KR1"
        player_tag: String,

        /// Report to produce
        #[arg(short = 't', long = "type", value_enum, default_value_t = ReportKind::MatchAnalysis)]
        kind: ReportKind,

        /// Number of recent matches to analyze (1-100)
        #[arg(short, long, default_value = "10")]
        matches: usize,

        /// Also print a per-match table
        #[arg(long)]
        details: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ReportKind {
    MatchAnalysis,
    ChampionRecommendation,
}

impl ReportKind {
    fn label(self) -> &'static str {
        match self {
            ReportKind::MatchAnalysis => "MatchAnalysis",
            ReportKind::ChampionRecommendation => "ChampionRecommendation",
        }
    }
}

fn main() {
    let args = Args::parse();
    logging::init("info");

    match args.command.clone().unwrap_or(Command::Run) {
        Command::Run => run_stdin(args.region),
        Command::Serve => {
            if let Err(e) = serve(args.region) {
                display_error(&format!("{:#}", e));
                std::process::exit(1);
            }
        }
        Command::Analyze {
            player_tag,
            kind,
            matches,
            details,
        } => {
            let request = AnalysisRequest {
                player_tag,
                request_type: kind.label().to_string(),
                match_count: Some(matches),
            };
            if let Err(e) = analyze(args.region, request, details) {
                display_error(&format!("{:#}", e));
                std::process::exit(1);
            }
        }
    }
}

fn build_analyzer(region: Option<String>) -> anyhow::Result<Analyzer> {
    let mut config = Config::from_env()?;
    if let Some(region) = region {
        config = config.with_region(&region);
    }
    Ok(Analyzer::new(RiotApiClient::new(config)))
}

fn run_stdin(region: Option<String>) {
    match read_and_analyze(region) {
        Ok(text) => print!("{}", serde_json::Value::String(text)),
        Err(e) => {
            print!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            std::process::exit(1);
        }
    }
}

fn read_and_analyze(region: Option<String>) -> anyhow::Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;
    let request: AnalysisRequest =
        serde_json::from_str(&input).context("invalid request JSON")?;

    let analyzer = build_analyzer(region)?;
    Ok(analyzer.analyze(&request))
}

fn serve(region: Option<String>) -> anyhow::Result<()> {
    let server = ToolServer::new(build_analyzer(region)?);
    server
        .serve(io::stdin().lock(), io::stdout().lock())
        .context("stdio transport failed")
}

fn analyze(region: Option<String>, request: AnalysisRequest, details: bool) -> anyhow::Result<()> {
    let mut analyzer = build_analyzer(region)?;
    if request.request_type == ReportKind::MatchAnalysis.label() {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        analyzer = analyzer.with_progress(pb);
    }

    display_info(&format!(
        "Fetching {} for {}",
        request.request_type, request.player_tag
    ));

    let outcome = analyzer.run(&request)?;
    display_success("Report ready");

    println!("{}", outcome.render());

    if details {
        if let Outcome::Analysis {
            summary: MatchSummary::Stats(stats),
            ..
        } = &outcome
        {
            display_match_history(&stats.history);
        }
    }

    Ok(())
}
