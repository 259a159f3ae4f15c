//! One-shot draw commands
//!
//! These talk to a renderer that is already running (for example under
//! `overlayctl run` or the host application). Nothing is started here.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use crate::output::print_success;
use ov_client::{OverlayClient, ShapeMessage, TextMessage, TextSize, DEFAULT_TTL, SHAPE_RECT};
use ov_core::config::ClientConfig;
use ov_core::ExternalRenderer;

/// Color names the renderer understands besides `#rrggbb`
const NAMED_COLORS: [&str; 5] = ["red", "green", "yellow", "blue", "black"];

/// Accept only colors the renderer can parse
///
/// The renderer silently drops a command with any other color, so reject it
/// here instead of reporting a send that will never be drawn.
pub fn parse_color(s: &str) -> Result<String, String> {
    let is_hex =
        s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit());
    if is_hex || NAMED_COLORS.contains(&s) {
        Ok(s.to_string())
    } else {
        Err(format!("expected #rrggbb or one of: {}", NAMED_COLORS.join(", ")))
    }
}

/// Arguments for `overlayctl text`
#[derive(Args, Debug)]
pub struct TextArgs {
    /// Element id (reusing an id replaces the element)
    pub id: String,
    /// Text to draw
    pub text: String,
    /// Text color (#rrggbb, red, green, yellow, blue or black)
    #[arg(short, long, default_value = "#ffffff", value_parser = parse_color)]
    pub color: String,
    /// Horizontal position
    #[arg(short, long, default_value_t = 0)]
    pub x: u32,
    /// Vertical position
    #[arg(short, long, default_value_t = 0)]
    pub y: u32,
    /// Seconds to stay visible (0 removes, negative never expires)
    #[arg(short, long, default_value_t = DEFAULT_TTL, allow_negative_numbers = true)]
    pub ttl: i64,
    /// Font size: normal or large
    #[arg(short, long, default_value = "normal")]
    pub size: TextSize,
}

/// Arguments for `overlayctl shape`
#[derive(Args, Debug)]
pub struct ShapeArgs {
    /// Element id (reusing an id replaces the element)
    pub id: String,
    /// Shape name
    #[arg(long, default_value = SHAPE_RECT, value_parser = [SHAPE_RECT])]
    pub shape: String,
    /// Outline color (#rrggbb, red, green, yellow, blue or black)
    #[arg(short, long, default_value = "#ffffff", value_parser = parse_color)]
    pub color: String,
    /// Fill color (#rrggbb, red, green, yellow, blue or black)
    #[arg(short, long, default_value = "#000000", value_parser = parse_color)]
    pub fill: String,
    /// Horizontal position
    #[arg(short, long)]
    pub x: u32,
    /// Vertical position
    #[arg(short, long)]
    pub y: u32,
    /// Width
    #[arg(short, long)]
    pub w: u32,
    /// Height
    #[arg(long)]
    pub h: u32,
    /// Seconds to stay visible (0 removes, negative never expires)
    #[arg(short, long, default_value_t = DEFAULT_TTL, allow_negative_numbers = true)]
    pub ttl: i64,
}

/// Send a text element
pub async fn text_command(client_config: &ClientConfig, args: TextArgs) -> Result<()> {
    let message = TextMessage::new(&args.id, &args.text, &args.color, args.x, args.y)
        .with_ttl(args.ttl)
        .with_size(args.size);

    let mut client = one_shot_client(client_config);
    client
        .send(message)
        .await
        .with_context(|| failed_send(&client))?;

    print_success(&format!("Sent text '{}'", args.id));
    Ok(())
}

/// Send a shape element
pub async fn shape_command(client_config: &ClientConfig, args: ShapeArgs) -> Result<()> {
    let message = ShapeMessage::new(
        &args.id,
        &args.shape,
        &args.color,
        &args.fill,
        args.x,
        args.y,
        args.w,
        args.h,
        args.ttl,
    );

    let mut client = one_shot_client(client_config);
    client
        .send(message)
        .await
        .with_context(|| failed_send(&client))?;

    print_success(&format!("Sent shape '{}'", args.id));
    Ok(())
}

/// Remove an element
pub async fn clear_command(client_config: &ClientConfig, id: &str) -> Result<()> {
    let mut client = one_shot_client(client_config);
    client
        .clear(id)
        .await
        .with_context(|| failed_send(&client))?;

    print_success(&format!("Cleared '{}'", id));
    Ok(())
}

fn one_shot_client(client_config: &ClientConfig) -> OverlayClient {
    OverlayClient::with_address(Arc::new(ExternalRenderer), client_config.address())
}

fn failed_send(client: &OverlayClient) -> String {
    format!(
        "Failed to send to renderer at {}. Is it running?",
        client.address()
    )
}
