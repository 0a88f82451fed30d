use clap::Parser;
use exam_seating::utils::{logger, validation::Validate};
use exam_seating::{CliConfig, LocalStorage, SeatingEngine, SeatingPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting exam-seating");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let pipeline = SeatingPipeline::new(LocalStorage::default(), config);
    let engine = SeatingEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("Reports saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "Seating run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
