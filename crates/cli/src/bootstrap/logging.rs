use sitewarden_domain::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

const CRATE_TARGETS: [&str; 4] = [
    "sitewarden",
    "sitewarden_domain",
    "sitewarden_application",
    "sitewarden_infrastructure",
];

/// Logs go to stderr so command output on stdout stays scriptable.
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let level = config.level.trim().to_ascii_lowercase();
    let directives = CRATE_TARGETS
        .iter()
        .fold(String::from("warn"), |mut acc, target| {
            acc.push_str(&format!(",{}={}", target, level));
            acc
        });
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&directives)
            .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", config.level, e))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
