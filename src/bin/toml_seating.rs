use anyhow::Context;
use clap::Parser;
use exam_seating::core::reports::branch_ranges;
use exam_seating::core::{ConfigProvider, Pipeline};
use exam_seating::utils::{logger, validation::Validate};
use exam_seating::{LocalStorage, SeatingEngine, SeatingPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-seating")]
#[command(about = "Exam seating with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "seating.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output directory from config
    #[arg(long)]
    output_path: Option<String>,

    /// Dry run - print the seating plan without writing any report
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config file '{}': {}", args.config, e);
            eprintln!("Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(args.verbose || config.verbose(), config.json_logs());
    tracing::info!("Loaded configuration from: {}", args.config);

    if let Some(output_path) = args.output_path.clone() {
        tracing::info!("Output path overridden to: {}", output_path);
        config.output.path = output_path;
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("DRY RUN MODE - no reports will be written");
        return perform_dry_run(config).await;
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("Configuration Summary:");
    println!("  Session: {}", config.session.name);
    if let Some(description) = &config.session.description {
        println!("  Description: {}", description);
    }
    println!("  Faculty: {}", config.faculty_path());
    println!("  Rooms: {}", config.rooms_path());
    println!("  Students: {}", config.students_path());
    println!("  Output: {}", config.output_path());
    println!("  Reports: {:?}", config.reports());
    println!("  Overflow: {:?}", config.overflow_policy());

    if !config.seating_rooms().is_empty() {
        println!("  Seating rooms: {}", config.seating_rooms().join(", "));
    }

    if args.dry_run {
        println!("  DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: TomlConfig) -> anyhow::Result<()> {
    let pipeline = SeatingPipeline::new(LocalStorage::default(), config);

    let tables = pipeline
        .extract()
        .await
        .context("failed to read roster tables")?;
    let reports = pipeline
        .transform(tables)
        .await
        .context("failed to build the seating plan")?;
    let plan = &reports.plan;

    println!("Seating Plan:");
    for assignment in &plan.assignments {
        println!(
            "  Room {}: {} student(s), invigilator {}",
            assignment.room_no,
            assignment.total_students(),
            assignment.invigilator
        );
        for range in branch_ranges(assignment) {
            println!("    {}", range);
        }
    }

    println!();
    println!(
        "  Seated {} student(s), total capacity {}",
        plan.seated_count(),
        plan.total_capacity
    );
    if plan.has_overflow() {
        println!("  Not seated: {} student(s)", plan.unseated.len());
    }

    println!();
    println!("Would write:");
    for export in &reports.exports {
        println!("  {} ({}, {} bytes)", export.file_name, export.content_type, export.data.len());
    }

    Ok(())
}
