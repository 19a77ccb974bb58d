use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blogscrape")]
#[command(about = "Resumable scraper for academic blog directories and article metadata")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every blog on the directory page to its listing URL
    Blogs {
        /// Output CSV path (defaults to <data dir>/blogs.csv)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Scrape author, reading time, shares, comments and body for unscraped articles
    Content {
        /// Article table to update in place (defaults to <data dir>/articles.csv)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Show how many articles are scraped, pending or missing a URL
    Status {
        /// Article table to inspect (defaults to <data dir>/articles.csv)
        #[arg(short, long)]
        input: Option<String>,

        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },
}
