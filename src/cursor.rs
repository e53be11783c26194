// Custom cursor: a dot that tracks the pointer exactly and an outline that trails it.
// Desktop only; on mobile the element is hidden and no listeners are attached.

use crate::effects::{Ease, Prop, Props, Target, TweenOptions};
use crate::host::Host;
use crate::types::{ClassName, ElementId, ViewportState};

/// Elements that put the cursor in its hover state.
pub const HOVER_SELECTOR: &str = "a, button, .btn, .nav-link, .mobile-link, .work-card, \
    .question-card, .value-card, .highlight-card, .timeline-item, .skill-category, \
    .area-item, .video-wrapper, .play-btn";

pub struct CustomCursor {
    root: ElementId,
    dot: Option<ElementId>,
    outline: Option<ElementId>,
}

impl CustomCursor {
    /// Look up the cursor elements. Returns `None` when there is no cursor or
    /// the viewport is mobile; in the latter case the cursor is hidden.
    pub fn init(host: &mut dyn Host, viewport: &ViewportState, enabled: bool) -> Option<Self> {
        let root = host.query(".cursor")?;
        if viewport.is_mobile || !enabled {
            host.set_style(root, "display", "none");
            return None;
        }
        Some(CustomCursor {
            root,
            dot: host.query(".cursor-dot"),
            outline: host.query(".cursor-outline"),
        })
    }

    pub fn follow(&self, host: &mut dyn Host, viewport: &ViewportState) {
        let to = Props::new()
            .with(Prop::X, viewport.pointer.x)
            .with(Prop::Y, viewport.pointer.y);
        if let Some(dot) = self.dot {
            host.animate_to(&Target::Element(dot), &to, &TweenOptions::new(0.1, Ease::None));
        }
        if let Some(outline) = self.outline {
            host.animate_to(
                &Target::Element(outline),
                &to,
                &TweenOptions::new(0.3, Ease::Power2Out),
            );
        }
    }

    pub fn set_hover(&self, host: &mut dyn Host, hovering: bool) {
        host.set_class(self.root, ClassName::CursorHover, hovering);
    }

    /// Fade the cursor when the pointer leaves or re-enters the window.
    pub fn set_visible(&self, host: &mut dyn Host, visible: bool) {
        let opacity = if visible { 1.0 } else { 0.0 };
        host.animate_to(
            &Target::Element(self.root),
            &Props::new().with(Prop::Opacity, opacity),
            &TweenOptions::new(0.2, Ease::Power2Out),
        );
    }
}
