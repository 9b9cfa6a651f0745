use clap::Parser;
use roster_sync::config::DEFAULT_OUTPUT_PATH;
use roster_sync::core::verify::check_roster;
use roster_sync::domain::ports::Storage;
use roster_sync::utils::logger;
use roster_sync::LocalStorage;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "check-roster")]
#[command(about = "Check that every roster row has account, name and link")]
struct Args {
    /// Roster CSV to check
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    path: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(env!("CARGO_CRATE_NAME"), args.verbose);

    let content = LocalStorage::new().read_file(&args.path).await?;
    let report = check_roster(&content)?;
    tracing::debug!("Checked {} rows in {}", report.rows, args.path.display());

    if report.is_clean() {
        println!("✅ {}: {} rows, all complete", args.path.display(), report.rows);
        return Ok(());
    }

    eprint!("{}", report.render());
    std::process::exit(1);
}
