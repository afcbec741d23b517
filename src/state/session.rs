//! Annotator session: the single owner of the diagram state and its code.

use super::{ControllerState, StateAction};
use crate::codec::{self, CodecError, EncodedToken};
use tracing::{error, info, warn};

/// Owns the one [`ControllerState`] of the running diagram together with its
/// canonical code.
///
/// Form handlers, the renderer and the code display all go through this type.
/// The code is re-encoded after every change and after every successful load,
/// so the displayed code is always the canonical encoding of the current state.
#[derive(Debug, Clone)]
pub struct AnnotatorSession {
    state: ControllerState,
    token: EncodedToken,
}

impl Default for AnnotatorSession {
    fn default() -> Self {
        Self::new(ControllerState::default())
    }
}

impl AnnotatorSession {
    pub fn new(state: ControllerState) -> Self {
        let mut session = Self {
            state,
            token: EncodedToken::default(),
        };
        session.refresh_token();
        session
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn token(&self) -> &EncodedToken {
        &self.token
    }

    /// Single update entry point for state mutations.
    ///
    /// Returns `true` if the state changed (and the code was regenerated).
    pub fn apply(&mut self, action: StateAction) -> bool {
        let changed = self.state.apply(action);
        if changed {
            self.refresh_token();
        }
        changed
    }

    /// Replaces the state with the one carried by `code`.
    ///
    /// On failure the current state and code are left exactly as they were and
    /// the error is handed back for display only.
    pub fn load_code(&mut self, code: &str) -> Result<(), CodecError> {
        match codec::decode(code, &self.state) {
            Ok(state) => {
                self.state.apply(StateAction::Replace(state));
                self.refresh_token();
                info!("Loaded controller state from code");
                Ok(())
            }
            Err(e) => {
                warn!("Ignoring code: {}", e);
                Err(e)
            }
        }
    }

    fn refresh_token(&mut self) {
        match codec::encode(&self.state) {
            Ok(token) => self.token = token,
            Err(e) => error!("Failed to encode controller state, keeping previous code: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Control;

    #[test]
    fn test_token_follows_every_change() {
        let mut session = AnnotatorSession::default();
        let initial = session.token().clone();

        assert!(session.apply(StateAction::SetLabel(Control::Y, "Swap".into())));
        assert_ne!(session.token(), &initial);
        assert_eq!(session.token(), &codec::encode(session.state()).unwrap());

        let before = session.token().clone();
        assert!(!session.apply(StateAction::SetLabel(Control::Y, "Swap".into())));
        assert_eq!(session.token(), &before);
    }

    #[test]
    fn test_empty_code_is_a_no_op() {
        let mut session = AnnotatorSession::new(
            ControllerState::new("#ff00ff", 30).with_label(Control::Menu, "Pause"),
        );
        let state = session.state().clone();
        let token = session.token().clone();

        assert!(session.load_code("").is_err());
        assert!(session.load_code("%%%").is_err());
        assert!(session.load_code("aGVsbG8gd29ybGQ=").is_err());

        assert_eq!(session.state(), &state);
        assert_eq!(session.token(), &token);
    }

    #[test]
    fn test_load_replaces_state_and_canonicalizes_code() {
        let shared = ControllerState::new("#ff0000", 40)
            .with_label(Control::A, "Jump")
            .with_label(Control::X, "Reload, fast");
        let code = codec::encode(&shared).unwrap();

        let mut session = AnnotatorSession::new(
            ControllerState::new("#000000", 90).with_label(Control::Share, "Clip"),
        );
        session.load_code(code.as_str()).unwrap();

        assert_eq!(session.state(), &shared);
        assert!(!session.state().is_shown(Control::Share));
        assert_eq!(session.token(), &code);
    }
}
