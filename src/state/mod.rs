//! # Controller State
//!
//! Holds the color, scale and per-control labels currently being visualized.
//!
//! There is exactly one [`ControllerState`] per running diagram. It is owned by an
//! [`AnnotatorSession`](session::AnnotatorSession) and every change goes through
//! [`ControllerState::apply`], so the encoded code can be refreshed after each
//! mutation in one place.
//!
//! ## Reserved Character
//! [`LABEL_PLACEHOLDER`] (U+0001) stands in for commas inside encoded fields.
//! User input never carries it: `SetLabel` and `SetColor` strip it before storing.

pub mod session;

use crate::controls::{Control, CONTROL_COUNT};
use tracing::debug;

/// Escape character for literal commas inside encoded labels (U+0001).
pub const LABEL_PLACEHOLDER: char = '\u{1}';

pub const DEFAULT_COLOR: &str = "#ffffff";
pub const DEFAULT_SCALE_PERCENT: i32 = 40;

/// The color/scale/label configuration of one diagram.
///
/// Labels are stored by registry position, so there is always exactly one entry
/// per control. An empty label hides that control's annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerState {
    color: String,
    scale_percent: i32,
    labels: [String; CONTROL_COUNT],
}

/// A single mutation of a [`ControllerState`].
#[derive(Debug, Clone, PartialEq)]
pub enum StateAction {
    SetColor(String),
    SetScale(i32),
    SetLabel(Control, String),
    ClearLabels,
    /// Wholesale replacement, used after decoding a code.
    Replace(ControllerState),
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR, DEFAULT_SCALE_PERCENT)
    }
}

impl ControllerState {
    /// Creates a state with every label empty.
    pub fn new(color: impl Into<String>, scale_percent: i32) -> Self {
        Self {
            color: strip_placeholder(color.into()),
            scale_percent,
            labels: Default::default(),
        }
    }

    /// Builder used by tests and the startup path.
    pub fn with_label(mut self, control: Control, label: impl Into<String>) -> Self {
        self.labels[control.position()] = strip_placeholder(label.into());
        self
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn scale_percent(&self) -> i32 {
        self.scale_percent
    }

    /// Controller scale factor (`scale_percent / 100`).
    pub fn scale(&self) -> f32 {
        self.scale_percent as f32 / 100.0
    }

    pub fn label(&self, control: Control) -> &str {
        &self.labels[control.position()]
    }

    /// Whether the control's annotation is drawn.
    pub fn is_shown(&self, control: Control) -> bool {
        !self.label(control).is_empty()
    }

    /// Labels in registry order.
    pub fn labels(&self) -> impl Iterator<Item = (Control, &str)> {
        Control::ALL
            .iter()
            .map(move |control| (*control, self.labels[control.position()].as_str()))
    }

    /// Applies a mutation. Returns `true` if the state actually changed.
    pub fn apply(&mut self, action: StateAction) -> bool {
        let changed = match action {
            StateAction::SetColor(color) => {
                let color = strip_placeholder(color);
                replace_if_different(&mut self.color, color)
            }
            StateAction::SetScale(scale_percent) => {
                let changed = self.scale_percent != scale_percent;
                self.scale_percent = scale_percent;
                changed
            }
            StateAction::SetLabel(control, label) => {
                let label = strip_placeholder(label);
                replace_if_different(&mut self.labels[control.position()], label)
            }
            StateAction::ClearLabels => {
                let changed = self.labels.iter().any(|label| !label.is_empty());
                self.labels.iter_mut().for_each(String::clear);
                changed
            }
            StateAction::Replace(state) => {
                let changed = *self != state;
                *self = state;
                changed
            }
        };

        if changed {
            debug!("Controller state changed");
        }
        changed
    }
}

fn replace_if_different(slot: &mut String, value: String) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn strip_placeholder(value: String) -> String {
    if value.contains(LABEL_PLACEHOLDER) {
        value.replace(LABEL_PLACEHOLDER, "")
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_hides_everything() {
        let state = ControllerState::default();
        assert_eq!(state.color(), DEFAULT_COLOR);
        assert_eq!(state.scale_percent(), DEFAULT_SCALE_PERCENT);
        assert!(Control::ALL.iter().all(|c| !state.is_shown(*c)));
        assert_eq!(state.labels().count(), CONTROL_COUNT);
    }

    #[test]
    fn test_apply_reports_changes() {
        let mut state = ControllerState::default();
        assert!(state.apply(StateAction::SetLabel(Control::A, "Jump".into())));
        assert!(!state.apply(StateAction::SetLabel(Control::A, "Jump".into())));
        assert!(state.apply(StateAction::SetScale(55)));
        assert!(!state.apply(StateAction::SetScale(55)));
        assert_eq!(state.label(Control::A), "Jump");
        assert_eq!(state.scale(), 0.55);
    }

    #[test]
    fn test_placeholder_is_stripped_from_input() {
        let mut state = ControllerState::default();
        state.apply(StateAction::SetLabel(Control::X, "Re\u{1}load".into()));
        state.apply(StateAction::SetColor("#ff\u{1}0000".into()));
        assert_eq!(state.label(Control::X), "Reload");
        assert_eq!(state.color(), "#ff0000");
    }

    #[test]
    fn test_clear_labels_keeps_settings() {
        let mut state = ControllerState::new("#123456", 70)
            .with_label(Control::Lt, "Aim")
            .with_label(Control::Rt, "Shoot");
        assert!(state.apply(StateAction::ClearLabels));
        assert!(!state.apply(StateAction::ClearLabels));
        assert_eq!(state.color(), "#123456");
        assert_eq!(state.scale_percent(), 70);
        assert!(!state.is_shown(Control::Rt));
    }

    #[test]
    fn test_labels_iterate_in_registry_order() {
        let state = ControllerState::default().with_label(Control::Share, "Clip");
        let (last, label) = state.labels().last().unwrap();
        assert_eq!(last, Control::Share);
        assert_eq!(label, "Clip");
    }
}
