use anyhow::{Context, Result};

use crate::timeline::labels::{LabelFont, DEFAULT_RIGHT_MARGIN_PX};
use crate::timeline::viewport::DEFAULT_MOBILE_BREAKPOINT_PX;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Gap kept between a timeline label and the right edge of the track.
    pub right_margin_px: f64,
    pub mobile_breakpoint_px: f64,
    pub label_font: LabelFont,
    pub org_font_px: f64,
    pub period_font_px: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let label_font = match lookup("TIMELINE_LABEL_FONT") {
            Some(raw) => raw
                .parse::<LabelFont>()
                .map_err(anyhow::Error::msg)
                .context("TIMELINE_LABEL_FONT must be 'sans-serif' or 'monospace'")?,
            None => LabelFont::SansSerif,
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            right_margin_px: parse_or(&lookup, "TIMELINE_RIGHT_MARGIN_PX", DEFAULT_RIGHT_MARGIN_PX)?,
            mobile_breakpoint_px: parse_or(
                &lookup,
                "TIMELINE_MOBILE_BREAKPOINT_PX",
                DEFAULT_MOBILE_BREAKPOINT_PX,
            )?,
            label_font,
            org_font_px: parse_or(&lookup, "TIMELINE_ORG_FONT_PX", 14.0)?,
            period_font_px: parse_or(&lookup, "TIMELINE_PERIOD_FONT_PX", 12.0)?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
