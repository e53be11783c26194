// Narrow interfaces to everything outside the crate: the document, the
// tweening engine, the text splitter, the render engine and the event loop.
// The browser implementation lives in `web`; tests use a recording double.

use crate::binding::Binding;
use crate::effects::{Animator, Callback};
use crate::scene::SceneSpec;
use crate::types::{ClassName, ElementId, RenderHandle, ViewportSize};

/// Document queries and mutations. Lookups never fail: absence is an empty result.
pub trait Dom {
    fn query_all(&mut self, selector: &str) -> Vec<ElementId>;

    fn query(&mut self, selector: &str) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_within(&mut self, root: ElementId, selector: &str) -> Vec<ElementId>;

    fn query_one_within(&mut self, root: ElementId, selector: &str) -> Option<ElementId> {
        self.query_within(root, selector).into_iter().next()
    }

    fn children(&mut self, parent: ElementId) -> Vec<ElementId>;

    /// Element following the `section` that contains `el`.
    fn next_section(&mut self, el: ElementId) -> Option<ElementId>;

    fn body(&mut self) -> Option<ElementId>;

    fn set_class(&mut self, el: ElementId, class: ClassName, on: bool);

    fn set_style(&mut self, el: ElementId, property: &str, value: &str);

    fn inline_style(&self, el: ElementId, property: &str) -> Option<String>;

    fn set_text(&mut self, el: ElementId, text: &str);

    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;

    /// Layout width in CSS px, measured live.
    fn offset_width(&self, el: ElementId) -> f64;

    /// Total length of an SVG geometry element.
    fn path_length(&self, el: ElementId) -> Option<f64>;

    fn viewport_size(&self) -> ViewportSize;

    fn scroll_y(&self) -> f64;
}

/// Glyph-level decomposition of text nodes.
pub trait TextSplitter {
    /// Split `el` into per-character nodes. Empty when splitting is unavailable.
    fn split_into_characters(&mut self, el: ElementId) -> Vec<ElementId>;
}

/// Scene creation on the render engine, which runs its own frame loop.
pub trait SceneRenderer {
    fn create_scene(&mut self, canvas: ElementId, spec: &SceneSpec) -> Option<RenderHandle>;

    fn notify_resize(&mut self, handle: RenderHandle, size: ViewportSize);

    /// Forward the pointer as -0.5..0.5 offsets from the viewport center.
    fn notify_pointer(&mut self, handle: RenderHandle, x: f64, y: f64);
}

/// Event loop services.
pub trait Platform {
    /// Attach a listener described by `binding`.
    fn bind(&mut self, binding: Binding);

    /// Deliver `callback` back to the engine after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: u32, callback: Callback);

    /// Ask a media element to start playback.
    fn play_media(&mut self, media: ElementId);

    fn current_year(&self) -> i32;

    fn random_seed(&mut self) -> u64;
}

/// Everything the engine needs from its environment.
pub trait Host: Dom + Animator + TextSplitter + SceneRenderer + Platform {}

impl<T: Dom + Animator + TextSplitter + SceneRenderer + Platform> Host for T {}
