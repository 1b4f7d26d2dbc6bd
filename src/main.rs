use campusmap::utils::{logger, validation::Validate};
use campusmap::{CliConfig, CrawlPipeline, EtlEngine, LocalStorage};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting campusmap");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let crawl = config.crawl_config();
    if let Err(e) = config.validate().and_then(|_| crawl.validate()) {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = CrawlPipeline::new(storage, config, crawl)?;

    let engine = EtlEngine::new(pipeline);
    match engine.run().await {
        Ok(Some(output_path)) => {
            println!("✅ Crawl completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Ok(None) => {
            println!("⚠️ No data scraped; nothing exported.");
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
