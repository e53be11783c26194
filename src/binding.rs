// Declarative listener table: which event on which target maps to which engine action.
// The dispatcher emits bindings once at init; the host attaches them.

use crate::hover::{HoverEffect, HoverPhase};
use crate::types::{ElementId, MediaEvent, Pointer, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent {
    Click,
    PointerMove,
    PointerEnter,
    PointerLeave,
    Scroll,
    Resize,
    Load,
    PageHide,
    Play,
    Pause,
    Ended,
}

impl DomEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomEvent::Click => "click",
            DomEvent::PointerMove => "mousemove",
            DomEvent::PointerEnter => "mouseenter",
            DomEvent::PointerLeave => "mouseleave",
            DomEvent::Scroll => "scroll",
            DomEvent::Resize => "resize",
            DomEvent::Load => "load",
            DomEvent::PageHide => "pagehide",
            DomEvent::Play => "play",
            DomEvent::Pause => "pause",
            DomEvent::Ended => "ended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindTarget {
    Window,
    Document,
    Element(ElementId),
}

/// Behavior descriptor carried by a binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    PointerMoved,
    CursorHover(bool),
    CursorVisible(bool),
    Scrolled,
    NavToggle,
    MenuLink,
    CarouselPrev,
    CarouselNext,
    CarouselDot(usize),
    PlayButton(usize),
    Media(usize, MediaEvent),
    AnchorClick(ElementId),
    ScrollIndicator(ElementId),
    Hover(HoverEffect, HoverPhase),
    Resized,
    PageLoaded,
    PageHidden,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub target: BindTarget,
    pub event: DomEvent,
    pub action: Action,
}

impl Binding {
    pub fn new(target: BindTarget, event: DomEvent, action: Action) -> Self {
        Binding {
            target,
            event,
            action,
        }
    }

    pub fn on(el: ElementId, event: DomEvent, action: Action) -> Self {
        Binding::new(BindTarget::Element(el), event, action)
    }
}

/// Event payload extracted by the host before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EventInput {
    pub pointer: Option<Pointer>,
    /// Bounding rect of the bound element, for hover effects.
    pub bounds: Option<Rect>,
}

impl EventInput {
    pub fn pointer(x: f64, y: f64) -> Self {
        EventInput {
            pointer: Some(Pointer::new(x, y)),
            bounds: None,
        }
    }

    pub fn within(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// What the host should do with the native event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub stop_propagation: bool,
    pub prevent_default: bool,
}

impl Response {
    pub fn stop_propagation() -> Self {
        Response {
            stop_propagation: true,
            prevent_default: false,
        }
    }

    pub fn prevent_default() -> Self {
        Response {
            stop_propagation: false,
            prevent_default: true,
        }
    }
}
