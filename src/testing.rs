// Recording host for unit tests: a tiny fake document keyed by exact selector
// strings, plus logs of every effect request, binding and timer.

use std::collections::{HashMap, HashSet};

use crate::binding::Binding;
use crate::effects::{Animator, Callback, Props, ScrollTrigger, Target, TweenOptions};
use crate::host::{Dom, Platform, SceneRenderer, TextSplitter};
use crate::scene::SceneSpec;
use crate::types::{ClassName, ElementId, RenderHandle, ViewportSize};

#[derive(Debug, Default)]
struct FakeElement {
    classes: HashSet<ClassName>,
    styles: HashMap<String, String>,
    attributes: HashMap<String, String>,
    text: Option<String>,
    width: f64,
    path_length: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTween {
    pub target: Target,
    pub from: Option<Props>,
    pub to: Props,
    pub options: TweenOptions,
}

pub struct RecordingHost {
    elements: Vec<FakeElement>,
    selectors: HashMap<String, Vec<ElementId>>,
    scoped: HashMap<(ElementId, String), Vec<ElementId>>,
    children: HashMap<ElementId, Vec<ElementId>>,
    next_sections: HashMap<ElementId, ElementId>,
    splits: HashMap<ElementId, Vec<ElementId>>,
    body: ElementId,
    pub viewport: ViewportSize,
    pub scroll_y: f64,
    pub year: i32,
    pub tweens: Vec<RecordedTween>,
    pub triggers: Vec<ScrollTrigger>,
    pub refreshes: usize,
    pub window_scrolls: Vec<(ElementId, f64)>,
    pub bindings: Vec<Binding>,
    pub timeouts: Vec<(u32, Callback)>,
    pub played: Vec<ElementId>,
    pub scenes: Vec<(ElementId, SceneSpec)>,
    pub scene_resizes: Vec<(RenderHandle, ViewportSize)>,
    pub scene_pointers: Vec<(RenderHandle, f64, f64)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        let mut host = RecordingHost {
            elements: Vec::new(),
            selectors: HashMap::new(),
            scoped: HashMap::new(),
            children: HashMap::new(),
            next_sections: HashMap::new(),
            splits: HashMap::new(),
            body: ElementId::new(0),
            viewport: ViewportSize::new(1280.0, 800.0),
            scroll_y: 0.0,
            year: 2026,
            tweens: Vec::new(),
            triggers: Vec::new(),
            refreshes: 0,
            window_scrolls: Vec::new(),
            bindings: Vec::new(),
            timeouts: Vec::new(),
            played: Vec::new(),
            scenes: Vec::new(),
            scene_resizes: Vec::new(),
            scene_pointers: Vec::new(),
        };
        host.body = host.element();
        host
    }

    pub fn element(&mut self) -> ElementId {
        self.elements.push(FakeElement::default());
        ElementId::new(self.elements.len() as u32 - 1)
    }

    pub fn elements(&mut self, count: usize) -> Vec<ElementId> {
        (0..count).map(|_| self.element()).collect()
    }

    /// Create an element and make it match `selector`.
    pub fn register(&mut self, selector: &str) -> ElementId {
        let el = self.element();
        self.selectors.entry(selector.to_string()).or_default().push(el);
        el
    }

    pub fn register_all(&mut self, selector: &str, els: &[ElementId]) {
        self.selectors
            .entry(selector.to_string())
            .or_default()
            .extend_from_slice(els);
    }

    pub fn register_within(&mut self, root: ElementId, selector: &str, els: &[ElementId]) {
        self.scoped
            .entry((root, selector.to_string()))
            .or_default()
            .extend_from_slice(els);
    }

    pub fn set_children(&mut self, parent: ElementId, els: &[ElementId]) {
        self.children.insert(parent, els.to_vec());
    }

    pub fn set_next_section(&mut self, el: ElementId, next: ElementId) {
        self.next_sections.insert(el, next);
    }

    pub fn set_split(&mut self, el: ElementId, chars: &[ElementId]) {
        self.splits.insert(el, chars.to_vec());
    }

    pub fn set_width(&mut self, el: ElementId, width: f64) {
        self.get_mut(el).width = width;
    }

    pub fn set_path_length(&mut self, el: ElementId, length: f64) {
        self.get_mut(el).path_length = Some(length);
    }

    pub fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        self.get_mut(el)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_style_value(&mut self, el: ElementId, property: &str, value: &str) {
        self.get_mut(el)
            .styles
            .insert(property.to_string(), value.to_string());
    }

    pub fn body_id(&self) -> ElementId {
        self.body
    }

    pub fn has_class(&self, el: ElementId, class: ClassName) -> bool {
        self.get(el).classes.contains(&class)
    }

    pub fn style(&self, el: ElementId, property: &str) -> Option<String> {
        self.get(el).styles.get(property).cloned()
    }

    pub fn text(&self, el: ElementId) -> Option<String> {
        self.get(el).text.clone()
    }

    /// Completions attached to recorded tweens, in request order.
    pub fn completions(&self) -> Vec<Callback> {
        self.tweens.iter().filter_map(|t| t.options.on_complete).collect()
    }

    fn get(&self, el: ElementId) -> &FakeElement {
        &self.elements[el.as_u32() as usize]
    }

    fn get_mut(&mut self, el: ElementId) -> &mut FakeElement {
        &mut self.elements[el.as_u32() as usize]
    }
}

impl Dom for RecordingHost {
    fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        self.selectors.get(selector).cloned().unwrap_or_default()
    }

    fn query_within(&mut self, root: ElementId, selector: &str) -> Vec<ElementId> {
        self.scoped
            .get(&(root, selector.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn children(&mut self, parent: ElementId) -> Vec<ElementId> {
        self.children.get(&parent).cloned().unwrap_or_default()
    }

    fn next_section(&mut self, el: ElementId) -> Option<ElementId> {
        self.next_sections.get(&el).copied()
    }

    fn body(&mut self) -> Option<ElementId> {
        Some(self.body)
    }

    fn set_class(&mut self, el: ElementId, class: ClassName, on: bool) {
        let classes = &mut self.get_mut(el).classes;
        if on {
            classes.insert(class);
        } else {
            classes.remove(&class);
        }
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        self.set_style_value(el, property, value);
    }

    fn inline_style(&self, el: ElementId, property: &str) -> Option<String> {
        self.style(el, property)
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        self.get_mut(el).text = Some(text.to_string());
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.get(el).attributes.get(name).cloned()
    }

    fn offset_width(&self, el: ElementId) -> f64 {
        self.get(el).width
    }

    fn path_length(&self, el: ElementId) -> Option<f64> {
        self.get(el).path_length
    }

    fn viewport_size(&self) -> ViewportSize {
        self.viewport
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }
}

impl Animator for RecordingHost {
    fn animate_to(&mut self, target: &Target, to: &Props, options: &TweenOptions) {
        self.tweens.push(RecordedTween {
            target: target.clone(),
            from: None,
            to: to.clone(),
            options: options.clone(),
        });
    }

    fn animate_from_to(&mut self, target: &Target, from: &Props, to: &Props, options: &TweenOptions) {
        self.tweens.push(RecordedTween {
            target: target.clone(),
            from: Some(from.clone()),
            to: to.clone(),
            options: options.clone(),
        });
    }

    fn observe_scroll_trigger(&mut self, trigger: &ScrollTrigger) {
        self.triggers.push(trigger.clone());
    }

    fn refresh_scroll_observers(&mut self) {
        self.refreshes += 1;
    }

    fn scroll_window_to(&mut self, target: ElementId, offset_y: f64, _options: &TweenOptions) {
        self.window_scrolls.push((target, offset_y));
    }
}

impl TextSplitter for RecordingHost {
    fn split_into_characters(&mut self, el: ElementId) -> Vec<ElementId> {
        self.splits.get(&el).cloned().unwrap_or_default()
    }
}

impl SceneRenderer for RecordingHost {
    fn create_scene(&mut self, canvas: ElementId, spec: &SceneSpec) -> Option<RenderHandle> {
        self.scenes.push((canvas, spec.clone()));
        Some(RenderHandle::new(self.scenes.len() as u32 - 1))
    }

    fn notify_resize(&mut self, handle: RenderHandle, size: ViewportSize) {
        self.scene_resizes.push((handle, size));
    }

    fn notify_pointer(&mut self, handle: RenderHandle, x: f64, y: f64) {
        self.scene_pointers.push((handle, x, y));
    }
}

impl Platform for RecordingHost {
    fn bind(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    fn set_timeout(&mut self, delay_ms: u32, callback: Callback) {
        self.timeouts.push((delay_ms, callback));
    }

    fn play_media(&mut self, media: ElementId) {
        self.played.push(media);
    }

    fn current_year(&self) -> i32 {
        self.year
    }

    fn random_seed(&mut self) -> u64 {
        0x5eed
    }
}
