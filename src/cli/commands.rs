//! Subcommand handlers for send, ping and config actions.

use std::error::Error;
use std::path::{Path, PathBuf};

use super::args::ConfigAction;
use crate::camera::{FrameSource, StillFrameSource};
use crate::config::{default_path as get_config_path, Config, DEFAULT_CONFIG_TOML};
use crate::controller::{Controller, ControllerSettings, ShutterOutcome};
use crate::editor::Rotation;
use crate::geometry::{Rect, Size};
use crate::transport::{FileSink, SendOutcome, Transport, UploadClient};

/// Options for the `send` subcommand.
#[derive(Debug, Clone)]
pub struct SendOptions {
    pub input: PathBuf,
    pub zoom: Option<f64>,
    pub rotate: Rotation,
    pub crop: Option<Rect>,
    pub viewport: Option<Size>,
    pub quick: bool,
    pub output: Option<PathBuf>,
}

fn upload_client(config: &Config) -> Result<UploadClient, Box<dyn Error>> {
    Ok(UploadClient::with_paths(
        config.server.url.clone(),
        config.server.upload_path.clone(),
        config.server.ping_path.clone(),
    )?)
}

/// Run the full capture → edit → send pipeline on an image file.
pub async fn run_send(config: &Config, options: SendOptions) -> Result<(), Box<dyn Error>> {
    let source = StillFrameSource::open(&options.input)?;

    let mut settings = ControllerSettings::from(config);
    if let Some(viewport) = options.viewport {
        settings.viewport = viewport;
    }
    settings.instant_send |= options.quick;

    match &options.output {
        Some(path) => {
            let sink = FileSink::new(path);
            run_pipeline(Controller::new(source, sink, settings), &options).await
        }
        None => {
            let client = upload_client(config)?;
            println!("Sending to {}", client.upload_url());
            run_pipeline(Controller::new(source, client, settings), &options).await
        }
    }
}

async fn run_pipeline<S: FrameSource, T: Transport>(
    mut controller: Controller<S, T>,
    options: &SendOptions,
) -> Result<(), Box<dyn Error>> {
    if let Some(factor) = options.zoom {
        controller.set_zoom(factor).await;
    }

    let outcome = match controller.shutter().await? {
        ShutterOutcome::Sent(outcome) => outcome,
        ShutterOutcome::Ignored => SendOutcome::Skipped,
        ShutterOutcome::Editing => {
            for _ in 0..options.rotate.degrees() / 90 {
                controller.rotate();
            }
            if let Some(crop) = options.crop {
                controller.set_crop_rect(crop);
            }
            if let Some(session) = controller.session() {
                println!(
                    "Editing: rotation {}, preview {}, crop {:?}",
                    session.rotation(),
                    session.canvas_size(),
                    session.crop_rect()
                );
            }
            controller.confirm().await?
        }
    };

    match outcome {
        SendOutcome::Sent(receipt) => {
            println!("{}", controller.status().current().message());
            if let Some(message) = receipt.message {
                println!("  {}", message);
            }
        }
        SendOutcome::Skipped => println!("A send is already in progress."),
    }
    Ok(())
}

/// Check that the receiver answers its health endpoint.
pub async fn run_ping(config: &Config) -> Result<(), Box<dyn Error>> {
    let client = upload_client(config)?;
    let ping = client.ping().await?;
    println!(
        "{} is up: status {} ({})",
        client.base_url(),
        ping.status,
        ping.service.as_deref().unwrap_or("unknown service")
    );
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config: &Config, path: Option<&Path>) {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!("  Server: {}{}", config.server.url, config.server.upload_path);
            println!("  JPEG quality: {}", config.capture.jpeg_quality);
            println!("  Filename: {}", config.capture.filename);
            println!(
                "  Instant send: {}",
                if config.capture.instant_send { "yes" } else { "no" }
            );
            println!(
                "  Software zoom: {:.1}x - {:.1}x (step {})",
                config.zoom.min, config.zoom.max, config.zoom.step
            );
            println!(
                "  Viewport: {}",
                config.editor.viewport()
            );
            println!(
                "  Crop margin / min size: {} / {}",
                config.editor.crop_margin, config.editor.min_crop_size
            );
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'snappaste config show' to view current settings.");
                std::process::exit(1);
            }

            // Create parent directories if needed
            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            if let Err(e) = std::fs::write(&config_path, DEFAULT_CONFIG_TOML) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }

            println!("Created config file: {}", config_path.display());
        }
    }
}
