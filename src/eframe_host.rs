// eframe_host.rs
use crate::host::WindowHost;
use crate::icon::{self, IconError};
use crate::viewer::ViewerApp;
use anyhow::{Result, anyhow};
use eframe::egui::{self, Pos2, Rect, ViewportBuilder};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

/// Toolkit-level application state. Created once at startup, handed to the
/// host, and dropped when the window closes.
#[derive(Debug)]
pub struct AppContext {
    app_id: String,
}

impl AppContext {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }
}

/// Placement that needs geometry only known once the window is on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingPlacement {
    None,
    Axis { x: Option<f32>, y: Option<f32> },
}

impl PendingPlacement {
    /// Outer position to request, or `None` while the needed geometry is
    /// still unknown.
    pub fn resolve(&self, outer: Option<Rect>) -> Option<Pos2> {
        match *self {
            PendingPlacement::None => None,
            PendingPlacement::Axis { x, y } => {
                let current = outer?.min;
                Some(egui::pos2(x.unwrap_or(current.x), y.unwrap_or(current.y)))
            }
        }
    }
}

/// Window host backed by eframe. Settings accumulate into a viewport builder
/// until `show` opens the window.
pub struct EframeHost {
    context: Option<AppContext>,
    viewport: ViewportBuilder,
    document: Option<String>,
    /// Center on the primary monitor when the window is created.
    centered: bool,
    pending: PendingPlacement,
}

impl EframeHost {
    pub fn new(context: AppContext) -> Self {
        Self {
            context: Some(context),
            viewport: ViewportBuilder::default(),
            document: None,
            centered: false,
            pending: PendingPlacement::None,
        }
    }

    fn update(&mut self, f: impl FnOnce(ViewportBuilder) -> ViewportBuilder) {
        self.viewport = f(std::mem::take(&mut self.viewport));
    }
}

impl WindowHost for EframeHost {
    fn load_document(&mut self, uri: &str) {
        self.document = Some(uri.to_string());
    }

    fn set_title(&mut self, title: &str) {
        let title = title.to_string();
        self.update(|v| v.with_title(title));
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.update(|v| v.with_inner_size([width as f32, height as f32]));
    }

    fn set_resizable(&mut self, resizable: bool) {
        self.update(|v| v.with_resizable(resizable));
    }

    fn set_always_on_top(&mut self, always_on_top: bool) {
        if always_on_top {
            self.update(|v| v.with_always_on_top());
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.update(|v| v.with_fullscreen(fullscreen));
    }

    fn set_maximized(&mut self, maximized: bool) {
        self.update(|v| v.with_maximized(maximized));
    }

    fn set_position(&mut self, x: Option<f64>, y: Option<f64>) {
        match (x, y) {
            (Some(x), Some(y)) => {
                self.pending = PendingPlacement::None;
                self.update(|v| v.with_position([x as f32, y as f32]));
            }
            (None, None) => self.pending = PendingPlacement::None,
            (x, y) => {
                self.pending = PendingPlacement::Axis {
                    x: x.map(|x| x as f32),
                    y: y.map(|y| y as f32),
                }
            }
        }
    }

    fn center_on_primary_screen(&mut self) {
        self.pending = PendingPlacement::None;
        self.centered = true;
    }

    fn set_icon(&mut self, path: &Path) -> Result<(), IconError> {
        let data = icon::load_icon(path)?;
        debug!("Decoded icon {}x{}", data.width, data.height);
        self.update(|v| v.with_icon(Arc::new(data)));
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        let context = self
            .context
            .take()
            .ok_or_else(|| anyhow!("window has already been shown"))?;
        let document = self.document.take();
        let pending = self.pending;

        let options = eframe::NativeOptions {
            viewport: std::mem::take(&mut self.viewport),
            centered: self.centered,
            ..Default::default()
        };

        match &document {
            Some(uri) => info!("Opening window for {}", uri),
            None => warn!("Opening window without a document"),
        }
        eframe::run_native(
            context.app_id(),
            options,
            Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, document, pending)))),
        )
        .map_err(|e| anyhow!("window host failed: {e}"))?;

        info!("Window closed");
        drop(context);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::host::configure;

    fn new_host() -> EframeHost {
        EframeHost::new(AppContext::new("local-viewer-test"))
    }

    #[test]
    fn builder_collects_settings() {
        let config = args::resolve(
            &["http://example.com", "Docs", "640", "480", "--alwaysontop", "--x=10", "--y=20"],
            &std::env::temp_dir(),
        );
        let mut host = new_host();
        configure(&config, &mut host);

        let viewport = &host.viewport;
        assert_eq!(viewport.title.as_deref(), Some("Docs"));
        assert_eq!(viewport.inner_size, Some(egui::vec2(640.0, 480.0)));
        assert_eq!(viewport.position, Some(egui::pos2(10.0, 20.0)));
        assert_eq!(viewport.resizable, Some(true));
        assert_eq!(viewport.window_level, Some(egui::WindowLevel::AlwaysOnTop));
        assert_eq!(host.pending, PendingPlacement::None);
        assert_eq!(host.document.as_deref(), Some("http://example.com"));
    }

    #[test]
    fn fullscreen_and_maximized_flags() {
        let mut host = new_host();
        host.set_fullscreen(true);
        assert_eq!(host.viewport.fullscreen, Some(true));
        let mut host = new_host();
        host.set_maximized(true);
        assert_eq!(host.viewport.maximized, Some(true));
    }

    #[test]
    fn centering_happens_when_window_is_created() {
        let config = args::resolve(&["a.html", "t", "1200", "800"], &std::env::temp_dir());
        let mut host = new_host();
        configure(&config, &mut host);
        assert!(host.centered);
        assert_eq!(host.pending, PendingPlacement::None);
        assert_eq!(host.viewport.position, None);
        assert_eq!(host.viewport.inner_size, Some(egui::vec2(1200.0, 800.0)));
    }

    #[test]
    fn explicit_position_is_not_centered() {
        let config = args::resolve(&["a.html", "--x=10", "--y=20"], &std::env::temp_dir());
        let mut host = new_host();
        configure(&config, &mut host);
        assert!(!host.centered);
        assert_eq!(host.viewport.position, Some(egui::pos2(10.0, 20.0)));
    }

    #[test]
    fn single_axis_is_deferred() {
        let config = args::resolve(&["page.html", "--x=100", "--y=center"], &std::env::temp_dir());
        let mut host = new_host();
        configure(&config, &mut host);
        assert_eq!(
            host.pending,
            PendingPlacement::Axis {
                x: Some(100.0),
                y: None
            }
        );
    }

    #[test]
    fn pending_axis_keeps_current_other_axis() {
        let pending = PendingPlacement::Axis {
            x: Some(100.0),
            y: None,
        };
        let outer = Rect::from_min_size(egui::pos2(40.0, 55.0), egui::vec2(300.0, 200.0));
        assert_eq!(pending.resolve(None), None);
        assert_eq!(pending.resolve(Some(outer)), Some(egui::pos2(100.0, 55.0)));
        assert_eq!(PendingPlacement::None.resolve(Some(outer)), None);
    }

    #[test]
    fn unreadable_icon_leaves_builder_untouched() {
        let mut host = new_host();
        let missing = std::env::temp_dir().join("local-viewer-no-icon.png");
        assert!(host.set_icon(&missing).is_err());
        assert!(host.viewport.icon.is_none());
    }
}
