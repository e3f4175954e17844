// boba - demo of composable terminal forms with stack-based routing
//
// Startup:
// - CLI: subcommands (config --show/--path) run and exit early
// - Config: env vars > ~/.config/boba/config.toml > defaults
// - Logging: events go to an in-memory buffer (shown on the logs page) and,
//   optionally, to rotating JSON files
// - Router: demo route tree, quit key and default view from config
// - TUI: drives the program until the quit key

mod cli;

use anyhow::{Context, Result};
use boba::config::Config;
use boba::logging::{self, LogBuffer};
use boba::router::{Router, RouterOptions};
use boba::theme::Theme;
use boba::{demo, tui, Program};
use cli::Outcome;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let route_override = match cli::handle_cli()? {
        Outcome::Handled => return Ok(()),
        Outcome::Run { route } => route,
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env()?;
    if let Some(route) = route_override {
        config.start_route = route;
    }

    let theme = Theme::new(&config.colors).context("invalid [colors] configuration")?;

    // The guard flushes the file writer on drop, so hold it until exit
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, log_buffer.clone())?;

    tracing::info!(
        route = %config.start_route,
        default_view = ?config.default_view,
        "starting boba v{}",
        boba::config::VERSION
    );

    let router = Router::new(RouterOptions {
        route: config.start_route.clone(),
        routes: demo::routes(&config, &theme, log_buffer),
        quit: config.keys.quit.clone(),
        default_view: config.default_view.clone(),
    })
    .with_context(|| format!("cannot start on route {:?}", config.start_route))?;

    let mut program = Program::new(router);
    tui::run(&mut program).await?;

    tracing::info!("shutting down");
    Ok(())
}
