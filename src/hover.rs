// Hover micro-interactions: magnetic buttons, card image parallax, 3D tilt.
// Pure geometry over the hovered element's rect; the tween is the only side effect.

use crate::effects::{Ease, Prop, Props, Target, TweenOptions};
use crate::host::Host;
use crate::types::{ElementId, Pointer, Rect};

const MAGNETIC_PULL: f64 = 0.3;
const PARALLAX_RANGE: f64 = 20.0;
const TILT_DEGREES: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEffect {
    /// Button drifts toward the pointer.
    Magnetic(ElementId),
    /// Image inside a work card shifts with the pointer.
    Parallax { image: ElementId },
    /// Project card rotates toward the pointer.
    Tilt(ElementId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    Move,
    Leave,
}

pub fn magnetic_offset(bounds: &Rect, pointer: Pointer) -> (f64, f64) {
    let center = bounds.center();
    (
        (pointer.x - center.x) * MAGNETIC_PULL,
        (pointer.y - center.y) * MAGNETIC_PULL,
    )
}

pub fn parallax_offset(bounds: &Rect, pointer: Pointer) -> (f64, f64) {
    let (x, y) = bounds.normalized(pointer);
    (x * PARALLAX_RANGE, y * PARALLAX_RANGE)
}

/// Returns `(rotate_y, rotate_x)` in degrees.
pub fn tilt_angles(bounds: &Rect, pointer: Pointer) -> (f64, f64) {
    let (x, y) = bounds.normalized(pointer);
    (x * TILT_DEGREES, -y * TILT_DEGREES)
}

/// Build the tween for one hover event. `None` when a move lacks geometry.
pub fn hover_request(
    effect: HoverEffect,
    phase: HoverPhase,
    pointer: Option<Pointer>,
    bounds: Option<Rect>,
) -> Option<(ElementId, Props, TweenOptions)> {
    let geometry = pointer.zip(bounds);
    match (effect, phase) {
        (HoverEffect::Magnetic(el), HoverPhase::Move) => {
            let (pointer, bounds) = geometry?;
            let (x, y) = magnetic_offset(&bounds, pointer);
            Some((
                el,
                Props::new().with(Prop::X, x).with(Prop::Y, y),
                TweenOptions::new(0.3, Ease::Power2Out),
            ))
        }
        (HoverEffect::Magnetic(el), HoverPhase::Leave) => Some((
            el,
            Props::new().with(Prop::X, 0.0).with(Prop::Y, 0.0),
            TweenOptions::new(0.5, Ease::ElasticOut),
        )),
        (HoverEffect::Parallax { image }, HoverPhase::Move) => {
            let (pointer, bounds) = geometry?;
            let (x, y) = parallax_offset(&bounds, pointer);
            Some((
                image,
                Props::new().with(Prop::X, x).with(Prop::Y, y),
                TweenOptions::new(0.5, Ease::Power2Out),
            ))
        }
        (HoverEffect::Parallax { image }, HoverPhase::Leave) => Some((
            image,
            Props::new().with(Prop::X, 0.0).with(Prop::Y, 0.0),
            TweenOptions::new(0.5, Ease::Power2Out),
        )),
        (HoverEffect::Tilt(card), HoverPhase::Move) => {
            let (pointer, bounds) = geometry?;
            let (rotate_y, rotate_x) = tilt_angles(&bounds, pointer);
            Some((
                card,
                Props::new()
                    .with(Prop::RotateY, rotate_y)
                    .with(Prop::RotateX, rotate_x),
                TweenOptions::new(0.3, Ease::Power2Out),
            ))
        }
        (HoverEffect::Tilt(card), HoverPhase::Leave) => Some((
            card,
            Props::new().with(Prop::RotateY, 0.0).with(Prop::RotateX, 0.0),
            TweenOptions::new(0.5, Ease::Power2Out),
        )),
    }
}

pub fn apply_hover(
    host: &mut dyn Host,
    effect: HoverEffect,
    phase: HoverPhase,
    pointer: Option<Pointer>,
    bounds: Option<Rect>,
) {
    if let Some((el, props, options)) = hover_request(effect, phase, pointer, bounds) {
        host.animate_to(&Target::Element(el), &props, &options);
    }
}
