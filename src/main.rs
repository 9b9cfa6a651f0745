use clap::Parser;
use roster_sync::domain::ports::ConfigProvider;
use roster_sync::utils::{logger, validation::Validate};
use roster_sync::{
    ActivityFilter, CliConfig, DirectoryConfig, EtlEngine, LocalStorage, MastodonDirectory,
    RosterError, RosterPipeline,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(env!("CARGO_CRATE_NAME"), cli.verbose);
    } else {
        logger::init_cli_logger(env!("CARGO_CRATE_NAME"), cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!("Roster update failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &CliConfig) -> Result<(), RosterError> {
    let settings = cli.settings()?;
    settings.validate()?;

    let pipeline = RosterPipeline::new(LocalStorage::new(), settings.clone())?;
    let pipeline = match settings.max_inactivity() {
        Some(max_inactivity) => {
            let directory_config = DirectoryConfig::from_env()?;
            directory_config.validate()?;
            tracing::info!(
                "Activity filter enabled: {} weeks via {}",
                max_inactivity.num_weeks(),
                directory_config.base_url
            );

            let directory = MastodonDirectory::new(directory_config, settings.request_timeout())?;
            pipeline.with_activity_filter(ActivityFilter::new(directory, max_inactivity))
        }
        None => pipeline,
    };

    let summary = EtlEngine::new(pipeline).run().await?;
    println!(
        "✅ Wrote {} of {} accounts to {}",
        summary.written, summary.fetched, summary.output_path
    );

    Ok(())
}
