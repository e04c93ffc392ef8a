use std::process::ExitCode;

use tinsel::{SceneConfig, Viewer, ViewerError};

fn run() -> Result<(), ViewerError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {}", path);
            SceneConfig::load(path)?
        }
        None => SceneConfig::default(),
    };

    Viewer::new().with_config(config).run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("tinsel=info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
