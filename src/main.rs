use std::path::PathBuf;

use clap::Parser;

use blogscrape::browser::{self, BrowserSession};
use blogscrape::cli::{Cli, Commands};
use blogscrape::config::Config;
use blogscrape::errors::{ScrapeError, ScrapeResult};
use blogscrape::services::{ContentService, ContentSettings, DirectoryService, StatusService};
use blogscrape::storage::{CsvArticleStore, CsvBlogStore};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run() -> ScrapeResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Blogs { output } => cmd_blogs(&config, output),
        Commands::Content { input } => cmd_content(&config, input),
        Commands::Status { input, json } => cmd_status(&config, input, json),
    }
}

fn article_table(config: &Config, input: Option<String>) -> ScrapeResult<PathBuf> {
    let path = input.map(PathBuf::from).unwrap_or_else(|| config.articles_path());
    if !path.exists() {
        return Err(ScrapeError::MissingTable(path.display().to_string()));
    }
    Ok(path)
}

fn cmd_blogs(config: &Config, output: Option<String>) -> ScrapeResult<()> {
    let path = output.map(PathBuf::from).unwrap_or_else(|| config.blogs_path());
    let service = DirectoryService::from_config(CsvBlogStore::new(&path), config);

    println!("Loading blog directory: {}", config.index_url);

    let session = BrowserSession::new(browser::launch(config)?);
    let report = service.run(session)?;

    println!(
        "Scraped {} blogs (with proper 'View all posts' URLs) and saved to {}",
        report.entries.len(),
        path.display()
    );
    if report.synthesized > 0 {
        println!(
            "  {} listing URLs were guessed from the blog link",
            report.synthesized
        );
    }
    if report.skipped > 0 {
        println!("  {} cards had no link and were skipped", report.skipped);
    }

    Ok(())
}

fn cmd_content(config: &Config, input: Option<String>) -> ScrapeResult<()> {
    let path = article_table(config, input)?;
    let service = ContentService::new(CsvArticleStore::new(&path), ContentSettings::from(config));

    let records = service.prepare()?;

    let session = BrowserSession::new(browser::launch(config)?);
    let summary = service.run(records, session)?;

    println!(
        "Scraping complete. Total articles scraped: {}, failed: {}",
        summary.scraped, summary.failed
    );
    if summary.skipped_invalid > 0 {
        println!("  {} rows have no article_url", summary.skipped_invalid);
    }

    Ok(())
}

fn cmd_status(config: &Config, input: Option<String>, json: bool) -> ScrapeResult<()> {
    let path = article_table(config, input)?;
    let status = StatusService::new(CsvArticleStore::new(&path)).status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Article table: {}\n", path.display());
    println!("  Total:       {}", status.total);
    println!("  Scraped:     {}", status.scraped);
    println!("  Pending:     {}", status.pending);
    println!("  Missing URL: {}", status.invalid_url);

    Ok(())
}
