//! Form panel: the input fields, the code display and code loading.

use super::common::{create_frame, UiColors};
use crate::codec::CodecError;
use crate::controls::{Control, ControlKind, CONTROL_COUNT, REGISTRY_VERSION};
use crate::render::{parse_css_color, to_hex};
use crate::state::session::AnnotatorSession;
use crate::state::{ControllerState, StateAction};
use eframe::egui::{Color32, DragValue, Key, Label, RichText, ScrollArea, TextEdit, TextStyle, Ui};
use tracing::info;

/// Edit buffers mirroring the current state, one per form field.
///
/// Every edit is forwarded to [`AnnotatorSession::apply`]; after a code is loaded
/// the buffers are refreshed from the new state.
pub struct FormData {
    color: String,
    scale_percent: i32,
    labels: [String; CONTROL_COUNT],
    code_input: String,
    load_error: Option<String>,
}

impl FormData {
    pub fn new(state: &ControllerState) -> Self {
        let mut form = Self {
            color: String::new(),
            scale_percent: 0,
            labels: Default::default(),
            code_input: String::new(),
            load_error: None,
        };
        form.sync_from(state);
        form
    }

    /// Overwrites every buffer with the values of `state`.
    pub fn sync_from(&mut self, state: &ControllerState) {
        self.color = state.color().to_owned();
        self.scale_percent = state.scale_percent();
        for (control, label) in state.labels() {
            self.labels[control.position()] = label.to_owned();
        }
    }

    pub fn render(&mut self, ui: &mut Ui, session: &mut AnnotatorSession) {
        ui.heading("Controller labels");
        ui.add_space(4.0);

        self.render_settings(ui, session);
        ui.separator();

        ScrollArea::vertical()
            .max_height((ui.available_height() - 170.0).max(120.0))
            .show(ui, |ui| {
                self.render_labels(ui, session);
            });

        ui.separator();
        self.render_code(ui, session);
    }

    fn render_settings(&mut self, ui: &mut Ui, session: &mut AnnotatorSession) {
        ui.horizontal(|ui| {
            ui.label("Color");

            let current = parse_css_color(&self.color).unwrap_or(Color32::BLACK);
            let mut rgb = [current.r(), current.g(), current.b()];
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                self.color = to_hex(Color32::from_rgb(rgb[0], rgb[1], rgb[2]));
                session.apply(StateAction::SetColor(self.color.clone()));
            }

            if ui
                .add(TextEdit::singleline(&mut self.color).desired_width(110.0))
                .changed()
            {
                session.apply(StateAction::SetColor(self.color.clone()));
            }
        });

        ui.horizontal(|ui| {
            ui.label("Scale");
            if ui
                .add(DragValue::new(&mut self.scale_percent).speed(1).suffix("%"))
                .changed()
            {
                session.apply(StateAction::SetScale(self.scale_percent));
            }

            if ui.button("Clear labels").clicked() {
                session.apply(StateAction::ClearLabels);
                self.sync_from(session.state());
            }
        });
    }

    fn render_labels(&mut self, ui: &mut Ui, session: &mut AnnotatorSession) {
        for kind in ControlKind::ALL {
            ui.label(RichText::new(kind.heading()).strong());

            for control in Control::ALL.iter().filter(|control| control.kind() == kind) {
                let buffer = &mut self.labels[control.position()];
                ui.horizontal(|ui| {
                    ui.add_sized([150.0, 18.0], Label::new(control.display_name()));
                    let response = ui.add(
                        TextEdit::singleline(&mut *buffer)
                            .hint_text("hidden")
                            .desired_width(f32::INFINITY),
                    );
                    if response.changed() {
                        session.apply(StateAction::SetLabel(*control, buffer.clone()));
                    }
                });
            }
            ui.add_space(6.0);
        }
    }

    fn render_code(&mut self, ui: &mut Ui, session: &mut AnnotatorSession) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Code").strong());
            ui.label(
                RichText::new(format!("format v{}", REGISTRY_VERSION))
                    .small()
                    .color(UiColors::TEXT_DIM),
            );
            if ui.button("Copy").clicked() {
                ui.ctx().copy_text(session.token().to_string());
                info!("Copied code to clipboard");
            }
        });

        create_frame(UiColors::INNER_BG, UiColors::BORDER).show(ui, |ui| {
            let mut token = session.token().as_str();
            ui.add(
                TextEdit::multiline(&mut token)
                    .font(TextStyle::Monospace)
                    .desired_rows(2)
                    .desired_width(f32::INFINITY),
            );
        });

        ui.horizontal(|ui| {
            let response = ui.add(
                TextEdit::singleline(&mut self.code_input)
                    .hint_text("Paste a code")
                    .desired_width(ui.available_width() - 60.0),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.button("Load").clicked() || submitted {
                self.load_code(session);
            }
        });

        if let Some(error) = &self.load_error {
            ui.label(RichText::new(error).color(UiColors::INACTIVE));
        }
    }

    fn load_code(&mut self, session: &mut AnnotatorSession) {
        match session.load_code(self.code_input.trim()) {
            Ok(()) => {
                self.sync_from(session.state());
                self.code_input.clear();
                self.load_error = None;
            }
            Err(CodecError::EmptyToken) => self.load_error = None,
            Err(e) => self.load_error = Some(format!("Code not loaded: {}", e)),
        }
    }
}

