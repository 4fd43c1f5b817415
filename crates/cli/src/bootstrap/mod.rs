mod logging;

pub use logging::init_logging;

use sitewarden_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    Ok(config)
}

pub fn log_startup(config: &Config) {
    info!(
        storage_path = %config.storage.path,
        storage_key = %config.storage.key,
        blocked_page = %config.guard.blocked_page_url,
        "Sitewarden v{} ready",
        env!("CARGO_PKG_VERSION")
    );
}
