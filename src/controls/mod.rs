//! # Control Registry
//!
//! The fixed, ordered catalogue of every annotatable input on the controller.
//!
//! ## Wire Order
//! The position of a control in [`Control::ALL`] is its column in an encoded
//! label code. Codes already shared rely on this order, so the list is
//! append-only: new controls go at the end and nothing is ever reordered or
//! removed without bumping [`REGISTRY_VERSION`].
//!
//! ```text
//! a b x y dpad_up dpad_down dpad_left dpad_right lb rb lt rt
//! left_stick_vertical left_stick_horizontal right_stick_vertical
//! right_stick_horizontal view menu share
//! ```

use std::fmt;

/// Version of the field order below. Bump when the order changes incompatibly.
pub const REGISTRY_VERSION: u32 = 1;

/// Number of controls in the registry.
pub const CONTROL_COUNT: usize = 19;

/// A single named input of the controller.
///
/// Discriminants are the wire positions and must match the order of [`Control::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    DpadUp = 4,
    DpadDown = 5,
    DpadLeft = 6,
    DpadRight = 7,
    Lb = 8,
    Rb = 9,
    Lt = 10,
    Rt = 11,
    LeftStickVertical = 12,
    LeftStickHorizontal = 13,
    RightStickVertical = 14,
    RightStickHorizontal = 15,
    View = 16,
    Menu = 17,
    Share = 18,
}

/// Physical category of a control, used to group form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    FaceButton,
    DpadDirection,
    Bumper,
    Trigger,
    StickAxis,
    MenuButton,
}

impl ControlKind {
    /// Kinds in the order the form presents them.
    pub const ALL: [ControlKind; 6] = [
        ControlKind::FaceButton,
        ControlKind::DpadDirection,
        ControlKind::Bumper,
        ControlKind::Trigger,
        ControlKind::StickAxis,
        ControlKind::MenuButton,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            ControlKind::FaceButton => "Face buttons",
            ControlKind::DpadDirection => "D-pad",
            ControlKind::Bumper => "Bumpers",
            ControlKind::Trigger => "Triggers",
            ControlKind::StickAxis => "Sticks",
            ControlKind::MenuButton => "Menu buttons",
        }
    }
}

impl Control {
    /// Canonical registry order (wire field order).
    pub const ALL: [Control; CONTROL_COUNT] = [
        Control::A,
        Control::B,
        Control::X,
        Control::Y,
        Control::DpadUp,
        Control::DpadDown,
        Control::DpadLeft,
        Control::DpadRight,
        Control::Lb,
        Control::Rb,
        Control::Lt,
        Control::Rt,
        Control::LeftStickVertical,
        Control::LeftStickHorizontal,
        Control::RightStickVertical,
        Control::RightStickHorizontal,
        Control::View,
        Control::Menu,
        Control::Share,
    ];

    /// Column of this control in an encoded label code.
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Stable identifier, identical to the form field id of the web tool.
    pub const fn name(self) -> &'static str {
        match self {
            Control::A => "a",
            Control::B => "b",
            Control::X => "x",
            Control::Y => "y",
            Control::DpadUp => "dpad_up",
            Control::DpadDown => "dpad_down",
            Control::DpadLeft => "dpad_left",
            Control::DpadRight => "dpad_right",
            Control::Lb => "lb",
            Control::Rb => "rb",
            Control::Lt => "lt",
            Control::Rt => "rt",
            Control::LeftStickVertical => "left_stick_vertical",
            Control::LeftStickHorizontal => "left_stick_horizontal",
            Control::RightStickVertical => "right_stick_vertical",
            Control::RightStickHorizontal => "right_stick_horizontal",
            Control::View => "view",
            Control::Menu => "menu",
            Control::Share => "share",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Control::A => "A",
            Control::B => "B",
            Control::X => "X",
            Control::Y => "Y",
            Control::DpadUp => "Up",
            Control::DpadDown => "Down",
            Control::DpadLeft => "Left",
            Control::DpadRight => "Right",
            Control::Lb => "LB",
            Control::Rb => "RB",
            Control::Lt => "LT",
            Control::Rt => "RT",
            Control::LeftStickVertical => "Left stick (vertical)",
            Control::LeftStickHorizontal => "Left stick (horizontal)",
            Control::RightStickVertical => "Right stick (vertical)",
            Control::RightStickHorizontal => "Right stick (horizontal)",
            Control::View => "View",
            Control::Menu => "Menu",
            Control::Share => "Share",
        }
    }

    pub fn kind(self) -> ControlKind {
        match self {
            Control::A | Control::B | Control::X | Control::Y => ControlKind::FaceButton,
            Control::DpadUp | Control::DpadDown | Control::DpadLeft | Control::DpadRight => {
                ControlKind::DpadDirection
            }
            Control::Lb | Control::Rb => ControlKind::Bumper,
            Control::Lt | Control::Rt => ControlKind::Trigger,
            Control::LeftStickVertical
            | Control::LeftStickHorizontal
            | Control::RightStickVertical
            | Control::RightStickHorizontal => ControlKind::StickAxis,
            Control::View | Control::Menu | Control::Share => ControlKind::MenuButton,
        }
    }

    /// Looks up a control by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|control| control.name() == name)
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
