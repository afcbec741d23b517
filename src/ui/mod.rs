//! # Padlabel User Interface
//!
//! eframe application hosting the label form and the diagram canvas.
//!
//! ## Layout
//! - **Left panel**: color, scale, one field per control, the current code with a
//!   copy button, and a field to load a code.
//! - **Central panel**: the controller diagram, re-rendered every frame.
//! - **Bottom panel**: image loading status.
//!
//! ## Data Flow
//! ```text
//! form edits ──► AnnotatorSession::apply ──► state + re-encoded code
//!                          │
//!                          └──► Renderer ──► EguiSurface ──► painter
//! image loader ──mpsc──► AssetStore::poll (once per frame)
//! ```

pub mod common;
pub mod form;

use crate::assets::{AssetStore, ImageId, LoadedImage};
use crate::render::{EguiSurface, FrameOutcome, Renderer};
use crate::state::session::AnnotatorSession;
use eframe::egui::{self, Align2, FontId, Frame, RichText, Sense};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use self::common::UiColors;
use self::form::FormData;

/// Top-level application state.
pub struct PadlabelUI {
    /// Single owner of the diagram state and its code
    session: AnnotatorSession,

    /// Form edit buffers
    form: FormData,

    renderer: Renderer,

    /// Uploaded controller textures
    assets: AssetStore,

    /// Decoded images arriving from the loader tasks
    image_receiver: mpsc::Receiver<LoadedImage>,

    last_outcome: Option<FrameOutcome>,
}

impl PadlabelUI {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        session: AnnotatorSession,
        renderer: Renderer,
        image_receiver: mpsc::Receiver<LoadedImage>,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);
        PadlabelUI {
            form: FormData::new(session.state()),
            session,
            renderer,
            assets: AssetStore::default(),
            image_receiver,
            last_outcome: None,
        }
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let mut surface =
            EguiSurface::new(&painter, response.rect, &self.assets, UiColors::CANVAS_BG);
        let outcome = self.renderer.render(self.session.state(), &mut surface);

        if self.last_outcome != Some(outcome) {
            debug!("Canvas frame outcome: {:?}", outcome);
            self.last_outcome = Some(outcome);
        }

        if outcome == FrameOutcome::Skipped {
            painter.text(
                response.rect.center(),
                Align2::CENTER_CENTER,
                format!(
                    "Loading images {}/{}",
                    self.assets.loaded_count(),
                    ImageId::ALL.len()
                ),
                FontId::proportional(14.0),
                UiColors::TEXT_DIM,
            );
            ui.ctx().request_repaint_after(Duration::from_millis(33));
        }
    }
}

impl eframe::App for PadlabelUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.assets.poll(ctx, &mut self.image_receiver);

        egui::SidePanel::left("form_panel")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                self.form.render(ui, &mut self.session);
            });

        egui::TopBottomPanel::bottom("status_panel")
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let (text, color) = if self.assets.is_ready() {
                        ("Images loaded".to_string(), UiColors::ACTIVE)
                    } else {
                        (
                            format!(
                                "Images {}/{}",
                                self.assets.loaded_count(),
                                ImageId::ALL.len()
                            ),
                            UiColors::INACTIVE,
                        )
                    };
                    ui.label(RichText::new(text).color(color));
                });
            });

        egui::CentralPanel::default()
            .frame(Frame::new().fill(UiColors::CANVAS_BG))
            .show(ctx, |ui| self.render_canvas(ui));
    }
}
