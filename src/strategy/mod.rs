pub mod logo;
pub mod procedural;

use crate::canvas::Canvas;
use crate::config::AppConfig;
use crate::error::IconError;

/// How the canvas is produced. Exactly one strategy runs per invocation;
/// a failing strategy never falls back to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Circle and text label drawn from scratch.
    Procedural,
    /// The configured logo fitted onto a white canvas.
    Logo,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Procedural => "procedural",
            Strategy::Logo => "logo",
        }
    }

    pub fn render(&self, config: &AppConfig) -> Result<Canvas, IconError> {
        match self {
            Strategy::Procedural => procedural::draw(&config.procedural),
            Strategy::Logo => logo::compose_from_file(&config.logo_path),
        }
    }
}
