//! # Layout Table
//!
//! Static description of where each control's annotation is drawn.
//!
//! ## Coordinate System
//! All points are controller-relative: the origin is the center of the base image,
//! `x = ±1` is its left/right edge and `y = ±1` its top/bottom edge. Points outside
//! that range sit beside the controller where the label text goes. Coordinates do
//! not depend on the display scale; the renderer projects them onto the canvas.
//!
//! ## Draw Order
//! [`DRAW_ORDER`] lists every entry in painting order. D-pad directions and stick
//! axes share one base image each ([`SharedOverlay`]), drawn once before their
//! members whenever any member has a label.

use crate::assets::ImageId;
use crate::controls::Control;

/// A point in controller-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelPoint {
    pub x: f32,
    pub y: f32,
}

pub const fn rel(x: f32, y: f32) -> RelPoint {
    RelPoint { x, y }
}

/// Horizontal alignment of the label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor and runs right
    Left,
    /// Text ends at the anchor
    Right,
}

/// How much horizontal room a label may take before wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxWidth {
    /// From the anchor to the right canvas edge
    ToRightEdge,
    /// From the left canvas edge to the anchor
    ToLeftEdge,
}

impl MaxWidth {
    /// Available width for an anchor at canvas x-coordinate `x`.
    pub fn evaluate(self, canvas_width: f32, x: f32) -> f32 {
        match self {
            MaxWidth::ToRightEdge => canvas_width - x,
            MaxWidth::ToLeftEdge => x,
        }
    }
}

/// Highlight drawn over the controller for one control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    /// An image centred at `at`, sized `scale` relative to the reference scale.
    Image {
        image: ImageId,
        at: RelPoint,
        scale: f32,
    },
    /// A glowing square on one arm of the d-pad, bright on the `direction` side.
    DpadHighlight { at: RelPoint, direction: RelPoint },
}

/// Annotation of a single control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry {
    pub control: Control,
    pub overlay: Overlay,
    /// Pointer polyline; the arrowhead sits on the last point.
    pub arrow: &'static [RelPoint],
    pub text_at: RelPoint,
    pub anchor: TextAnchor,
    pub max_width: Option<MaxWidth>,
}

/// A base image shared by several entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedOverlay {
    pub image: ImageId,
    pub at: RelPoint,
    pub scale: f32,
    pub members: &'static [Control],
}

impl SharedOverlay {
    pub fn is_shown(&self, mut shown: impl FnMut(Control) -> bool) -> bool {
        self.members.iter().any(|control| shown(*control))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutItem {
    Shared(SharedOverlay),
    Entry(LayoutEntry),
}

/// Returns the layout entry of a control.
pub fn entry(control: Control) -> Option<&'static LayoutEntry> {
    entries().find(|entry| entry.control == control)
}

/// All entries in draw order.
pub fn entries() -> impl Iterator<Item = &'static LayoutEntry> {
    DRAW_ORDER.iter().filter_map(|item| match item {
        LayoutItem::Entry(entry) => Some(entry),
        LayoutItem::Shared(_) => None,
    })
}

const fn image(image: ImageId, at: RelPoint, scale: f32) -> Overlay {
    Overlay::Image { image, at, scale }
}

const fn right_side(
    control: Control,
    overlay: Overlay,
    arrow: &'static [RelPoint],
    text_at: RelPoint,
) -> LayoutItem {
    LayoutItem::Entry(LayoutEntry {
        control,
        overlay,
        arrow,
        text_at,
        anchor: TextAnchor::Left,
        max_width: Some(MaxWidth::ToRightEdge),
    })
}

const fn left_side(
    control: Control,
    overlay: Overlay,
    arrow: &'static [RelPoint],
    text_at: RelPoint,
) -> LayoutItem {
    LayoutItem::Entry(LayoutEntry {
        control,
        overlay,
        arrow,
        text_at,
        anchor: TextAnchor::Right,
        max_width: Some(MaxWidth::ToLeftEdge),
    })
}

const DPAD: [Control; 4] = [
    Control::DpadUp,
    Control::DpadDown,
    Control::DpadLeft,
    Control::DpadRight,
];
const LEFT_STICK: [Control; 2] = [Control::LeftStickVertical, Control::LeftStickHorizontal];
const RIGHT_STICK: [Control; 2] = [Control::RightStickVertical, Control::RightStickHorizontal];

const DPAD_AT: RelPoint = rel(-0.24, 0.31);
const LEFT_STICK_AT: RelPoint = rel(-0.482, -0.11);
const RIGHT_STICK_AT: RelPoint = rel(0.2595, 0.31);

pub static DRAW_ORDER: [LayoutItem; 22] = [
    // face buttons
    right_side(
        Control::A,
        image(ImageId::A, rel(0.5, 0.05), 0.5),
        &[rel(1.0, 0.05), rel(0.6, 0.05)],
        rel(1.01, 0.05),
    ),
    right_side(
        Control::B,
        image(ImageId::B, rel(0.635, -0.14), 0.5),
        &[rel(1.0, -0.14), rel(0.75, -0.14)],
        rel(1.01, -0.14),
    ),
    right_side(
        Control::X,
        image(ImageId::X, rel(0.37, -0.13), 0.5),
        &[rel(1.0, -0.5), rel(0.37, -0.5), rel(0.37, -0.25)],
        rel(1.01, -0.5),
    ),
    right_side(
        Control::Y,
        image(ImageId::Y, rel(0.505, -0.32), 0.5),
        &[rel(1.0, -0.32), rel(0.6, -0.32)],
        rel(1.01, -0.32),
    ),
    // d-pad
    LayoutItem::Shared(SharedOverlay {
        image: ImageId::Dpad,
        at: DPAD_AT,
        scale: 1.05,
        members: &DPAD,
    }),
    left_side(
        Control::DpadUp,
        Overlay::DpadHighlight {
            at: rel(-0.24, 0.15),
            direction: rel(0.0, -1.0),
        },
        &[rel(-1.0, 0.5), rel(-0.4, 0.5), rel(-0.4, 0.15), rel(-0.3, 0.15)],
        rel(-1.01, 0.5),
    ),
    left_side(
        Control::DpadDown,
        Overlay::DpadHighlight {
            at: rel(-0.24, 0.47),
            direction: rel(0.0, 1.0),
        },
        &[rel(-1.0, 0.65), rel(-0.24, 0.65), rel(-0.24, 0.55)],
        rel(-1.01, 0.65),
    ),
    left_side(
        Control::DpadLeft,
        Overlay::DpadHighlight {
            at: rel(-0.33, 0.31),
            direction: rel(-1.0, 0.0),
        },
        &[rel(-1.0, 0.8), rel(-0.33, 0.8), rel(-0.33, 0.4)],
        rel(-1.01, 0.8),
    ),
    left_side(
        Control::DpadRight,
        Overlay::DpadHighlight {
            at: rel(-0.15, 0.31),
            direction: rel(1.0, 0.0),
        },
        &[rel(-1.0, 0.95), rel(-0.15, 0.95), rel(-0.15, 0.4)],
        rel(-1.01, 0.95),
    ),
    // triggers
    left_side(
        Control::Lt,
        image(ImageId::Lt, rel(-0.52, -0.88), 0.75),
        &[rel(-1.0, -0.88), rel(-0.65, -0.88)],
        rel(-1.01, -0.88),
    ),
    right_side(
        Control::Rt,
        image(ImageId::Rt, rel(0.52, -0.88), 0.75),
        &[rel(1.0, -0.88), rel(0.65, -0.88)],
        rel(1.01, -0.88),
    ),
    // bumpers
    left_side(
        Control::Lb,
        image(ImageId::Lb, rel(-0.8, -0.7), 0.75),
        &[rel(-1.0, -0.7), rel(-0.95, -0.7)],
        rel(-1.01, -0.7),
    ),
    right_side(
        Control::Rb,
        image(ImageId::Rb, rel(0.8, -0.7), 0.75),
        &[rel(1.0, -0.7), rel(0.95, -0.7)],
        rel(1.01, -0.7),
    ),
    // left stick
    LayoutItem::Shared(SharedOverlay {
        image: ImageId::LeftStick,
        at: LEFT_STICK_AT,
        scale: 0.75,
        members: &LEFT_STICK,
    }),
    left_side(
        Control::LeftStickVertical,
        image(ImageId::ArrowsVertical, LEFT_STICK_AT, 0.75),
        &[rel(-1.0, -0.4), rel(-0.55, -0.4)],
        rel(-1.01, -0.4),
    ),
    left_side(
        Control::LeftStickHorizontal,
        image(ImageId::ArrowsHorizontal, LEFT_STICK_AT, 0.75),
        &[rel(-1.0, -0.11), rel(-0.8, -0.11)],
        rel(-1.01, -0.11),
    ),
    // right stick
    LayoutItem::Shared(SharedOverlay {
        image: ImageId::RightStick,
        at: RIGHT_STICK_AT,
        scale: 0.75,
        members: &RIGHT_STICK,
    }),
    right_side(
        Control::RightStickVertical,
        image(ImageId::ArrowsVertical, RIGHT_STICK_AT, 0.75),
        &[rel(1.0, 0.6), rel(0.35, 0.6)],
        rel(1.01, 0.6),
    ),
    right_side(
        Control::RightStickHorizontal,
        image(ImageId::ArrowsHorizontal, RIGHT_STICK_AT, 0.75),
        &[rel(1.0, 0.31), rel(0.55, 0.31)],
        rel(1.01, 0.31),
    ),
    // menu buttons
    left_side(
        Control::View,
        image(ImageId::View, rel(-0.125, -0.125), 0.4),
        &[rel(-1.0, -1.0), rel(-0.125, -1.0), rel(-0.125, -0.25)],
        rel(-1.01, -1.0),
    ),
    right_side(
        Control::Menu,
        image(ImageId::Menu, rel(0.15, -0.125), 0.4),
        &[rel(1.0, -1.0), rel(0.15, -1.0), rel(0.15, -0.25)],
        rel(1.01, -1.0),
    ),
    right_side(
        Control::Share,
        image(ImageId::Share, rel(0.01, 0.0), 0.4),
        &[rel(1.0, -1.3), rel(0.01, -1.3), rel(0.01, -0.1)],
        rel(1.01, -1.3),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_control_has_exactly_one_entry() {
        for control in Control::ALL {
            let count = entries().filter(|entry| entry.control == control).count();
            assert_eq!(count, 1, "{} has {} entries", control, count);
            assert_eq!(entry(control).map(|e| e.control), Some(control));
        }
    }

    #[test]
    fn test_arrows_have_a_head_segment() {
        for entry in entries() {
            assert!(entry.arrow.len() >= 2, "{} arrow too short", entry.control);
        }
    }

    #[test]
    fn test_shared_overlays_precede_members() {
        for (index, item) in DRAW_ORDER.iter().enumerate() {
            let LayoutItem::Shared(shared) = item else {
                continue;
            };
            for member in shared.members {
                let position = DRAW_ORDER
                    .iter()
                    .position(|item| matches!(item, LayoutItem::Entry(e) if e.control == *member))
                    .unwrap();
                assert!(position > index, "{} drawn before its base image", member);
            }
        }
    }

    #[test]
    fn test_text_sits_beside_controller_on_arrow_side() {
        for entry in entries() {
            let tail = entry.arrow[0];
            assert_eq!(tail.y, entry.text_at.y, "{}", entry.control);
            match entry.anchor {
                TextAnchor::Left => {
                    assert!(entry.text_at.x > 1.0);
                    assert_eq!(entry.max_width, Some(MaxWidth::ToRightEdge));
                }
                TextAnchor::Right => {
                    assert!(entry.text_at.x < -1.0);
                    assert_eq!(entry.max_width, Some(MaxWidth::ToLeftEdge));
                }
            }
        }
    }

    #[test]
    fn test_max_width_policies() {
        assert_eq!(MaxWidth::ToRightEdge.evaluate(800.0, 600.0), 200.0);
        assert_eq!(MaxWidth::ToLeftEdge.evaluate(800.0, 150.0), 150.0);
    }

    #[test]
    fn test_shared_overlay_visibility() {
        let LayoutItem::Shared(dpad) = DRAW_ORDER[4] else {
            panic!("d-pad base image moved");
        };
        assert!(!dpad.is_shown(|_| false));
        assert!(dpad.is_shown(|control| control == Control::DpadLeft));
        assert!(!dpad.is_shown(|control| control == Control::A));
    }
}
