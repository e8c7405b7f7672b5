use clap::Parser;
use navbar_admin::core::config::{AdminConfig, CliOverrides, load_config, resolve};
use navbar_admin::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "navbar-admin", about = "Manage navbar entries on a remote content service")]
struct Args {
    /// Base URL of the content service (overrides config and environment)
    #[arg(long)]
    base_url: Option<String>,

    /// Start with an empty form instead of the first fetched record
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Logger level comes from config, so report load errors once it is up
    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(e) => (AdminConfig::default(), Some(e)),
    };
    let resolved = resolve(
        &config,
        &CliOverrides {
            base_url: args.base_url,
            no_seed: args.no_seed,
        },
    );

    // Initialize file logger - writes to navbar-admin.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("navbar-admin.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Using default config: {}", e);
    }
    log::info!(
        "Navbar admin starting up against {} (seed: {:?})",
        resolved.base_url,
        resolved.seed_policy
    );

    tui::run(resolved)
}
