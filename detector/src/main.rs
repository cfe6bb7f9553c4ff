use std::path::{Path, PathBuf};

use trash_cam::camera::OpenCvCamera;
use trash_cam::window::HighGuiWindow;
use trash_cam::{start, StopSignal, EXIT_FAILURE, EXIT_OK};
use trash_cam_common::config::{Config, ConfigError, Credentials, API_KEY_ENV};
use trash_cam_vision::GoogleVisionClient;
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "trash-cam.toml";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    let config = match load_config(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(EXIT_FAILURE);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.parse().unwrap_or_default()),
        )
        .init();

    info!(
        device = config.camera.device_index,
        endpoint = %config.vision.endpoint,
        window = %config.display.window_title,
        "starting trash-cam"
    );

    let stop = StopSignal::new();
    let code = start(
        &config,
        OpenCvCamera::open,
        |vision| {
            let credentials = Credentials::from_env();
            if !credentials.has_api_key() {
                warn!(var = API_KEY_ENV, "API key not set, recognition requests will be rejected");
            }
            let client = GoogleVisionClient::new(vision, credentials)?;
            info!(endpoint = client.endpoint(), "using recognition endpoint");
            Ok(client)
        },
        HighGuiWindow::open,
        &stop,
    )
    .await;

    if code != EXIT_OK {
        std::process::exit(code);
    }
}

/// An explicit path must exist; the default path is optional.
fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => Config::load(p),
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_PATH)),
    }
}
