mod background;
mod config;
mod frontend;

use tracing::{info, warn};
use zones::engine::{Action, EngineCore};
use zones::persist::PersistError;
use zones::render;

use crate::background::Background;
use crate::config::{AppConfig, ConfigError};
use crate::frontend::Frontend;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("background image: {0}")]
    Image(#[from] image::ImageError),
    #[error("window: {0}")]
    Window(#[from] minifb::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

fn main() -> Result<(), AppError> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenv {
        // A missing .env is the normal case.
        if !e.not_found() {
            warn!(error = %e, "ignoring unreadable .env");
        }
    }

    let config = AppConfig::from_env()?;
    info!(
        background = %config.background.display(),
        zones_file = %config.zones_file.display(),
        target_fps = config.target_fps,
        "starting zonepick"
    );

    let background = Background::open(&config.background)?;
    let mut frontend = Frontend::open(&config, background)?;

    let mut core = EngineCore::new(config.zones_file.clone());
    let skipped = core.load_zones()?;
    if !skipped.is_empty() {
        warn!(count = skipped.len(), "some zone records were malformed and skipped");
    }
    core.set_reference_size(frontend.reference_size());

    run(&mut frontend, &mut core)?;
    info!(score = core.score(), "session ended");
    Ok(())
}

/// One input pass then one render pass per frame until the window closes.
fn run(frontend: &mut Frontend, core: &mut EngineCore) -> Result<(), AppError> {
    loop {
        for event in frontend.poll_events() {
            for action in core.handle(event) {
                match action {
                    Action::Quit => return Ok(()),
                    Action::Resized(_) => {
                        frontend.refit();
                        core.set_reference_size(frontend.reference_size());
                    }
                    Action::ZoneConsumed { total, .. } => info!(total, "zone hit"),
                    _ => {}
                }
            }
        }

        render::draw_scene(frontend, core);
        frontend.present()?;
    }
}
