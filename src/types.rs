// Strong typing over strings. Newtypes for element handles, timers and pixel geometry.
// State enums live here so the projection code and the web binding share one vocabulary.

use serde::{Deserialize, Serialize};

/// Opaque handle to a DOM element owned by the host. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(u32);

impl ElementId {
    pub fn new(index: u32) -> Self {
        ElementId(index)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Handle to a scene created by the render collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderHandle(u32);

impl RenderHandle {
    pub fn new(index: u32) -> Self {
        RenderHandle(index)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Ticket handed out by the resize debouncer. Only the latest one settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerTicket(u32);

impl TimerTicket {
    pub fn new(seq: u32) -> Self {
        TimerTicket(seq)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Pointer position in CSS pixels, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    pub fn new(x: f64, y: f64) -> Self {
        Pointer { x, y }
    }
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        ViewportSize { width, height }
    }
}

/// Element bounding rectangle (client coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Pointer {
        Pointer::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Pointer position relative to this rect, mapped to -0.5..0.5 on each axis.
    /// A degenerate rect maps everything to the center.
    pub fn normalized(&self, pointer: Pointer) -> (f64, f64) {
        if self.width <= 0.0 || self.height <= 0.0 {
            return (0.0, 0.0);
        }
        (
            (pointer.x - self.left) / self.width - 0.5,
            (pointer.y - self.top) / self.height - 0.5,
        )
    }
}

/// Published viewport snapshot, threaded explicitly into consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewportState {
    pub is_mobile: bool,
    pub pointer: Pointer,
    pub size: ViewportSize,
}

/// Page load lifecycle. `Ready` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Revealing,
    Ready,
}

/// Mirrored media element state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
    Ended,
}

/// Native media notifications the watcher listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
}

/// CSS classes forming the styling contract with the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassName {
    Scrolled,
    NavHidden,
    Active,
    Playing,
    Loaded,
    CursorHover,
}

impl ClassName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassName::Scrolled => "scrolled",
            ClassName::NavHidden => "nav-hidden",
            ClassName::Active => "active",
            ClassName::Playing => "playing",
            ClassName::Loaded => "loaded",
            ClassName::CursorHover => "cursor-hover",
        }
    }
}
