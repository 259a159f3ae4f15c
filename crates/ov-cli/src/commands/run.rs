//! Supervised session
//!
//! Starts the renderer, then forwards draw commands read from stdin (one
//! JSON object per line) until stdin closes or the user interrupts. The
//! renderer is stopped on the way out.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output::{format_placement, print_error, print_info, print_success, print_warning};
use ov_client::{ClientError, OverlayClient};
use ov_core::config::{ConfigFile, RendererConfig};
use ov_core::{ProcessSupervisor, RendererLauncher};

/// Placement overrides for the renderer window
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct PlacementArgs {
    /// Window x position
    #[arg(long)]
    pub x: Option<u32>,
    /// Window y position
    #[arg(long)]
    pub y: Option<u32>,
    /// Window width
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,
    /// Window height
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,
}

impl PlacementArgs {
    /// Apply the overrides on top of a configured placement
    pub fn apply(&self, base: RendererConfig) -> RendererConfig {
        RendererConfig::new(
            self.x.unwrap_or(base.x),
            self.y.unwrap_or(base.y),
            self.width.unwrap_or(base.width),
            self.height.unwrap_or(base.height),
        )
    }
}

/// How the stdin loop ended
enum Exit {
    EndOfInput,
    Interrupted,
}

/// Run a supervised renderer session
pub async fn run_command(file: ConfigFile, placement: PlacementArgs) -> Result<()> {
    let renderer = placement.apply(file.renderer);
    let supervisor = Arc::new(ProcessSupervisor::new(file.supervisor.clone(), renderer));

    print_info(&format!(
        "Starting renderer at {}",
        format_placement(&renderer)
    ));
    supervisor
        .start(renderer)
        .await
        .context("Failed to start renderer")?;
    print_success(&format!(
        "Renderer running (PID: {})",
        supervisor
            .pid()
            .await
            .map(|pid| pid.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));

    let launcher: Arc<dyn RendererLauncher> = supervisor.clone();
    let mut client = OverlayClient::with_address(launcher, file.client.address());

    let result = forward_stdin(&mut client).await;

    match &result {
        Ok(Exit::Interrupted) => tracing::info!("Received Ctrl+C, stopping renderer..."),
        Ok(Exit::EndOfInput) => tracing::info!("End of input, stopping renderer..."),
        Err(e) => tracing::error!("Session ended with error: {:#}", e),
    }

    supervisor
        .stop()
        .await
        .context("Failed to stop renderer")?;
    print_success("Renderer stopped");

    result.map(|_| ())
}

/// Forward stdin lines to the renderer until EOF or Ctrl+C
async fn forward_stdin(client: &mut OverlayClient) -> Result<Exit> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut forwarded = 0usize;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => return Ok(Exit::Interrupted),
        };

        let Some(line) = line else {
            tracing::debug!(forwarded, "Input closed");
            return Ok(Exit::EndOfInput);
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let payload: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                print_warning(&format!("Skipping invalid JSON: {}", e));
                continue;
            }
        };

        match client.send_raw(&payload).await {
            Ok(()) => forwarded += 1,
            // The renderer could not be (re)started: nothing left to talk to
            Err(e @ ClientError::Launcher(_)) => return Err(e.into()),
            Err(e) => print_error(&format!("Draw command dropped: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_overrides() {
        let base = RendererConfig::new(10, 20, 800, 600);

        assert_eq!(PlacementArgs::default().apply(base), base);

        let overrides = PlacementArgs {
            x: Some(0),
            width: Some(1024),
            ..Default::default()
        };
        assert_eq!(overrides.apply(base), RendererConfig::new(0, 20, 1024, 600));
    }
}
