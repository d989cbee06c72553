use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use monk_indexer::crawlers::HttpFetcher;
use monk_indexer::crawlers::archive::ArchiveCrawler;
use monk_indexer::domain::record::Record;
use monk_indexer::generation::GeminiGenerator;
use monk_indexer::models::config::AppConfig;
use monk_indexer::processing::chat::{NO_MATCH_REPLY, answer_question, run_chat};
use monk_indexer::processing::crawler::process_crawl;
use monk_indexer::repository::{JsonSnapshotRepository, SnapshotReader};

#[derive(Parser)]
#[command(about = "Crawl a blog archive into a JSON snapshot and answer questions from it")]
struct Cli {
    /// Configuration file; `MONK_*` environment variables override it.
    #[arg(long, env = "MONK_CONFIG", default_value = "config.yaml")]
    config: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crawl the archive and overwrite the snapshot.
    Crawl {
        #[arg(long)]
        start_page: Option<u32>,
        #[arg(long)]
        end_page: Option<u32>,
    },
    /// Answer a single question from the snapshot.
    Ask { question: String },
    /// Answer questions read from stdin until `exit`.
    Chat,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration {}: {e}", cli.config);
            std::process::exit(1);
        }
    };
    let repo = JsonSnapshotRepository::new(&config.snapshot_path);

    match cli.command {
        Command::Crawl {
            start_page,
            end_page,
        } => {
            let crawler_config = &config.crawler;
            let fetcher = match HttpFetcher::new(
                &crawler_config.user_agent,
                Duration::from_secs(crawler_config.request_timeout_secs),
            ) {
                Ok(fetcher) => fetcher,
                Err(e) => {
                    log::error!("{e}");
                    std::process::exit(1);
                }
            };
            let crawler = match ArchiveCrawler::from_config(fetcher, crawler_config) {
                Ok(crawler) => crawler,
                Err(e) => {
                    log::error!("{e}");
                    std::process::exit(1);
                }
            };
            let start_page = start_page.unwrap_or(crawler_config.start_page);
            let end_page = end_page.unwrap_or(crawler_config.end_page);
            if process_crawl(&crawler, start_page, end_page, &repo)
                .await
                .is_err()
            {
                std::process::exit(1);
            }
        }
        Command::Ask { question } => {
            let question = question.trim();
            if question.is_empty() {
                println!("{NO_MATCH_REPLY}");
                return;
            }
            let records = load_records(&repo);
            let generator = build_generator(&config);
            let answer = answer_question(
                question,
                &records,
                &generator,
                config.matcher.confidence_floor,
            )
            .await;
            println!("{answer}");
        }
        Command::Chat => {
            let records = load_records(&repo);
            let generator = build_generator(&config);
            let input = BufReader::new(tokio::io::stdin());
            if let Err(e) = run_chat(
                input,
                tokio::io::stdout(),
                &records,
                &generator,
                config.matcher.confidence_floor,
            )
            .await
            {
                log::error!("Chat session failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn load_records(repo: &JsonSnapshotRepository) -> Vec<Record> {
    match repo.load() {
        Ok(records) => {
            log::info!("Loaded {} records from {}", records.len(), repo.path().display());
            records
        }
        Err(e) => {
            log::error!("Error reading snapshot {}: {e}", repo.path().display());
            std::process::exit(1);
        }
    }
}

fn build_generator(config: &AppConfig) -> GeminiGenerator {
    if config.gemini.api_key.is_empty() {
        log::warn!("No Gemini API key configured; answers will fall back to an apology");
    }
    match GeminiGenerator::new(&config.gemini) {
        Ok(generator) => generator,
        Err(e) => {
            log::error!("Failed to build text generator: {e}");
            std::process::exit(1);
        }
    }
}
