use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "schemeqa",
    about = "Index web pages and retrieve the closest one for a question"
)]
pub struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, embed and index pages
    Process {
        /// URLs to process (http, https or ftp)
        urls: Vec<String>,
        /// File with one URL per line; blank lines are ignored
        #[arg(long, short)]
        file: Option<PathBuf>,
    },
    /// Show the indexed document closest to a question
    Answer {
        question: String,
        /// Print only the first N characters of the document text
        #[arg(long)]
        preview: Option<usize>,
    },
    /// Retrieve the closest document and have the LLM answer from it
    Ask { question: String },
    /// Delete the cached documents and index
    Clear,
    /// Re-embed every stored document with the configured encoder
    Reindex,
    /// Show index statistics
    Stats,
}
