// host.rs
use crate::args::ResolvedConfig;
use crate::icon::IconError;
use crate::placement::Placement;
use std::path::Path;

/// Something that can realize a resolved configuration as an on-screen window
/// showing web content.
pub trait WindowHost {
    fn load_document(&mut self, uri: &str);
    fn set_title(&mut self, title: &str);
    fn set_size(&mut self, width: f64, height: f64);
    fn set_resizable(&mut self, resizable: bool);
    fn set_always_on_top(&mut self, always_on_top: bool);
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn set_maximized(&mut self, maximized: bool);
    /// `None` leaves that axis to the host's own placement.
    fn set_position(&mut self, x: Option<f64>, y: Option<f64>);
    fn center_on_primary_screen(&mut self);
    fn set_icon(&mut self, path: &Path) -> Result<(), IconError>;
    /// Blocks until the window is closed.
    fn show(&mut self) -> anyhow::Result<()>;
}

#[derive(Debug)]
pub enum IconOutcome {
    NotRequested,
    Applied,
    Failed(IconError),
}

/// Push `config` into `host`. Everything except `show` happens here.
///
/// An icon that cannot be used is reported back, never treated as fatal.
pub fn configure<H: WindowHost + ?Sized>(config: &ResolvedConfig, host: &mut H) -> IconOutcome {
    if let Some(url) = &config.url {
        host.load_document(url);
    }
    host.set_title(&config.title);
    host.set_resizable(config.resizable);
    host.set_always_on_top(config.always_on_top);

    let icon = match &config.icon {
        None => IconOutcome::NotRequested,
        Some(path) => match host.set_icon(path) {
            Ok(()) => IconOutcome::Applied,
            Err(err) => IconOutcome::Failed(err),
        },
    };

    match Placement::from_config(config) {
        Placement::Fullscreen => host.set_fullscreen(true),
        Placement::Maximized { width, height } => {
            host.set_size(width, height);
            host.set_maximized(true);
        }
        Placement::Positioned {
            width,
            height,
            x,
            y,
        } => {
            host.set_size(width, height);
            host.set_position(x, y);
        }
        Placement::Centered { width, height } => {
            host.set_size(width, height);
            host.center_on_primary_screen();
        }
    }

    icon
}
