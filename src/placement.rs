// placement.rs
//! Where and how the window ends up on screen.

use crate::args::ResolvedConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Size and position are ignored.
    Fullscreen,
    /// Position is ignored; the size is what the window restores to.
    Maximized { width: f64, height: f64 },
    /// At least one axis given. The missing axis is left to the host.
    Positioned {
        width: f64,
        height: f64,
        x: Option<f64>,
        y: Option<f64>,
    },
    /// Centered on the primary display.
    Centered { width: f64, height: f64 },
}

impl Placement {
    /// Fullscreen wins over maximized, which wins over any explicit position.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let (width, height) = (config.width, config.height);
        if config.fullscreen {
            Placement::Fullscreen
        } else if config.maximized {
            Placement::Maximized { width, height }
        } else if config.has_position() {
            Placement::Positioned {
                width,
                height,
                x: config.x,
                y: config.y,
            }
        } else {
            Placement::Centered { width, height }
        }
    }
}
