use clap::Parser;
use schemeqa::cli::commands::{Cli, Commands};
use schemeqa::config::Config;
use schemeqa::domain::values::source_url::SourceUrl;
use schemeqa::RetrievalService;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    schemeqa::logging::init(cli.verbose);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let service = match RetrievalService::new(&config) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error initializing: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(service, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(service: RetrievalService, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Process { urls, file } => {
            let mut input = urls.join("\n");
            if let Some(path) = file {
                input.push('\n');
                input.push_str(&std::fs::read_to_string(&path)?);
            }
            let urls: Vec<String> = SourceUrl::parse_lines(&input)
                .map_err(|invalid| format!("Invalid URLs: {}", invalid.join(", ")))?
                .into_iter()
                .map(|url| url.as_str().to_string())
                .collect();
            if urls.is_empty() {
                return Err("No URLs given".into());
            }

            let result = service.process(&urls).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Answer { question, preview } => {
            let mut document = service.answer(&question).await?;
            if let Some(max_chars) = preview {
                document.text = document.preview(max_chars);
            }
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Commands::Ask { question } => {
            let answer = service.ask(&question).await?;
            println!("{}", answer.answer);
        }
        Commands::Clear => {
            let dropped = service.clear().await?;
            println!("Cache cleared ({dropped} documents removed)");
        }
        Commands::Reindex => {
            let count = service.reindex().await?;
            println!("Reindexed {count} documents");
        }
        Commands::Stats => {
            let stats = service.stats().await;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
