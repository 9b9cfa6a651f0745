use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Library events plus those of the calling binary, `target` being the
/// binary's crate name (`check_roster` for `check-roster`).
fn default_directives(target: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    let mut directives = format!("roster_sync={level}");
    if target != "roster_sync" {
        directives.push_str(&format!(",{target}={level}"));
    }
    if verbose {
        directives.push_str(",info");
    }
    directives
}

fn env_filter(target: &str, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(target, verbose)))
}

/// Warnings about dropped rows stay visible without `--verbose`.
pub fn init_cli_logger(target: &str, verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(target, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines for runs under a scheduler that ships logs elsewhere.
pub fn init_json_logger(target: &str, verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(target, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .json(),
        )
        .init();
}
