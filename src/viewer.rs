// viewer.rs
use crate::document;
use crate::eframe_host::PendingPlacement;
use crate::page::{BlockKind, Page};
use eframe::egui::{self, RichText};
use log::{debug, error, warn};
use std::sync::mpsc;
use std::thread;

const BASE_SIZE: f32 = 16.0; // Default font size
const BLOCK_SPACING: f32 = 6.0;
/// Frames to wait for the platform to report the window rect before giving up
/// on a deferred placement.
const PLACEMENT_FRAMES: u32 = 60;

#[derive(Clone, Debug)]
enum ContentState {
    Loading(String),
    Error(String),
    Loaded { url: String, page: Page },
}

type LoadResult = Result<Page, String>;

pub struct ViewerApp {
    state: ContentState,
    receiver: mpsc::Receiver<LoadResult>,
    pending: PendingPlacement,
    placement_frames: u32,
}

impl ViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        url: Option<String>,
        pending: PendingPlacement,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let (sender, receiver) = mpsc::channel();
        let state = match url {
            Some(url) => {
                let url_to_load = url.clone();
                let ctx = cc.egui_ctx.clone();
                thread::spawn(move || {
                    let result = document::load_document(&url_to_load)
                        .map(|body| Page::parse(&body))
                        .map_err(|e| format!("{e:#}"));
                    sender
                        .send(result)
                        .unwrap_or_else(|e| warn!("Failed to deliver document: {}", e));
                    ctx.request_repaint();
                });
                ContentState::Loading(url)
            }
            None => ContentState::Error("No document location could be resolved.".into()),
        };

        Self {
            state,
            receiver,
            pending,
            placement_frames: 0,
        }
    }

    fn receive(&mut self) {
        let ContentState::Loading(url) = &self.state else {
            return;
        };
        match self.receiver.try_recv() {
            Ok(Ok(page)) => {
                if let Some(title) = &page.title {
                    debug!("Document title: {}", title);
                }
                self.state = ContentState::Loaded {
                    url: url.clone(),
                    page,
                };
            }
            Ok(Err(message)) => {
                error!("Failed to load {}: {}", url, message);
                self.state = ContentState::Error(format!("Failed to load {}: {}", url, message));
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.state = ContentState::Error("Document loader stopped unexpectedly.".into());
            }
        }
    }

    /// Finish a placement that needed the window to exist first.
    fn apply_pending_placement(&mut self, ctx: &egui::Context) {
        if self.pending == PendingPlacement::None {
            return;
        }
        let outer = ctx.input(|i| i.viewport().outer_rect);
        match self.pending.resolve(outer) {
            Some(position) => {
                debug!("Moving window to {:?}", position);
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(position));
                self.pending = PendingPlacement::None;
            }
            None if self.placement_frames >= PLACEMENT_FRAMES => {
                warn!("Window position never became available, keeping default placement");
                self.pending = PendingPlacement::None;
            }
            None => {
                self.placement_frames += 1;
                ctx.request_repaint();
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_pending_placement(ctx);
        self.receive();

        egui::CentralPanel::default().show(ctx, |ui| match &self.state {
            ContentState::Loading(url) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Loading {}...", url));
                });
            }
            ContentState::Error(err) => {
                ui.colored_label(egui::Color32::RED, err);
            }
            ContentState::Loaded { url, page } => {
                if page.is_empty() {
                    ui.weak(format!("{} has no visible text.", url));
                    return;
                }
                egui::ScrollArea::vertical()
                    .auto_shrink(false)
                    .show(ui, |ui| render_page(ui, page));
            }
        });
    }
}

fn render_page(ui: &mut egui::Ui, page: &Page) {
    for block in &page.blocks {
        let text = match block.kind {
            BlockKind::Heading(level) => RichText::new(&block.text)
                .size(BASE_SIZE * heading_scale(level))
                .strong(),
            BlockKind::Paragraph => RichText::new(&block.text).size(BASE_SIZE),
        };
        ui.label(text);
        ui.add_space(BLOCK_SPACING);
    }
}

fn heading_scale(level: u8) -> f32 {
    match level {
        1 => 2.0,
        2 => 1.5,
        3 => 1.25,
        _ => 1.1,
    }
}
