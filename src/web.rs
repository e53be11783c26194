// Browser binding: implements the host traits over web-sys and the page's
// globals (gsap, ScrollTrigger, Splitting, createScene), and owns the listener
// closures that feed events and completions back into the engine.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use js_sys::{Array, Function, Object, Reflect};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlMediaElement, MouseEvent, NodeList,
    SvgGeometryElement, Window,
};

use crate::binding::{BindTarget, Binding, EventInput, Response};
use crate::config::EngineConfig;
use crate::dispatcher::Engine;
use crate::effects::{Animator, Callback, Props, ScrollTrigger, Target, TweenOptions};
use crate::host::{Dom, Platform, SceneRenderer, TextSplitter};
use crate::logging;
use crate::scene::SceneSpec;
use crate::types::{ClassName, ElementId, Rect, RenderHandle, ViewportSize};

thread_local! {
    static BOOTED: RefCell<Option<Rc<Shared>>> = const { RefCell::new(None) };
}

struct Runtime {
    engine: Engine,
    host: WebHost,
}

/// The runtime plus completions that arrived while it was borrowed.
struct Shared {
    runtime: RefCell<Runtime>,
    deferred: RefCell<VecDeque<Callback>>,
}

/// Run `f` against the engine, then drain deferred completions.
/// `None` when the runtime is gone or already borrowed.
fn with_runtime<R>(
    shared: &Weak<Shared>,
    f: impl FnOnce(&mut Engine, &mut WebHost) -> R,
) -> Option<R> {
    let shared = shared.upgrade()?;
    let result = {
        let mut runtime = shared.runtime.try_borrow_mut().ok()?;
        let Runtime { engine, host } = &mut *runtime;
        f(engine, host)
    };
    drain(&shared);
    Some(result)
}

fn drain(shared: &Shared) {
    loop {
        let Ok(mut runtime) = shared.runtime.try_borrow_mut() else {
            // The outer dispatch drains once it releases the runtime.
            return;
        };
        let Some(callback) = shared.deferred.borrow_mut().pop_front() else {
            return;
        };
        let Runtime { engine, host } = &mut *runtime;
        engine.complete(callback, host);
    }
}

/// Queue a completion and deliver it as soon as the runtime is free.
fn deliver(shared: &Weak<Shared>, callback: Callback) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    shared.deferred.borrow_mut().push_back(callback);
    drain(&shared);
}

/// Optional page global, `None` when undefined.
fn global(window: &Window, name: &str) -> Option<JsValue> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn call_method(receiver: &JsValue, name: &str, args: &[&JsValue]) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(receiver, &JsValue::from_str(name))?.dyn_into()?;
    let array = Array::new();
    for arg in args {
        array.push(arg);
    }
    Reflect::apply(&method, receiver, &array)
}

fn json_object(vars: Map<String, Value>) -> Result<JsValue, JsValue> {
    js_sys::JSON::parse(&Value::Object(vars).to_string())
}

fn log_failure(context: &str, result: Result<JsValue, JsValue>) {
    if let Err(e) = result {
        warn!(error = ?e, "{context} failed");
    }
}

const ID_ATTRIBUTE: &str = "data-motion-id";

pub struct WebHost {
    window: Window,
    document: Document,
    elements: Vec<Element>,
    scenes: Vec<JsValue>,
    gsap: Option<JsValue>,
    scroll_trigger: Option<JsValue>,
    splitting: Option<JsValue>,
    scene_factory: Option<JsValue>,
    shared: Weak<Shared>,
}

impl WebHost {
    fn new(window: Window, document: Document, shared: Weak<Shared>) -> Self {
        let gsap = global(&window, "gsap");
        let scroll_trigger = global(&window, "ScrollTrigger");
        if let Some(gsap) = &gsap {
            let mut plugins = Vec::new();
            plugins.extend(scroll_trigger.clone());
            plugins.extend(global(&window, "ScrollToPlugin"));
            let args: Vec<&JsValue> = plugins.iter().collect();
            log_failure("gsap.registerPlugin", call_method(gsap, "registerPlugin", &args));
        } else {
            warn!("gsap not found, animations disabled");
        }
        WebHost {
            splitting: global(&window, "Splitting"),
            scene_factory: global(&window, "createScene"),
            window,
            document,
            elements: Vec::new(),
            scenes: Vec::new(),
            gsap,
            scroll_trigger,
            shared,
        }
    }

    /// Map an element to a stable id. The id is stamped on the element so a
    /// repeat lookup is a single attribute read.
    fn intern(&mut self, el: Element) -> ElementId {
        let stamped = el
            .get_attribute(ID_ATTRIBUTE)
            .and_then(|value| value.parse::<usize>().ok());
        if let Some(index) = stamped {
            if self.elements.get(index) == Some(&el) {
                return ElementId::new(index as u32);
            }
        }
        let index = self.elements.len();
        if let Err(e) = el.set_attribute(ID_ATTRIBUTE, &index.to_string()) {
            warn!(error = ?e, "stamping element id failed");
        }
        self.elements.push(el);
        ElementId::new(index as u32)
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.as_u32() as usize)
    }

    fn html(&self, id: ElementId) -> Option<&HtmlElement> {
        self.element(id).and_then(|el| el.dyn_ref::<HtmlElement>())
    }

    fn intern_list(&mut self, list: Result<NodeList, JsValue>, selector: &str) -> Vec<ElementId> {
        let list = match list {
            Ok(list) => list,
            Err(e) => {
                debug!(selector, error = ?e, "selector rejected");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.intern(el))
            .collect()
    }

    fn targets(&self, target: &Target) -> JsValue {
        let array = Array::new();
        for id in target.elements() {
            if let Some(el) = self.element(id) {
                array.push(el);
            }
        }
        array.into()
    }

    fn completion(&self, callback: Callback) -> JsValue {
        let shared = self.shared.clone();
        Closure::once_into_js(move || deliver(&shared, callback))
    }

    /// Attach the trigger element and `onEnter` to a `scrollTrigger` vars object.
    fn attach_trigger(&self, vars: &JsValue, trigger: &ScrollTrigger) -> Result<(), JsValue> {
        if let Some(el) = self.element(trigger.trigger) {
            Reflect::set(vars, &"trigger".into(), el)?;
        }
        if let Some(callback) = trigger.on_enter {
            Reflect::set(vars, &"onEnter".into(), &self.completion(callback))?;
        }
        Ok(())
    }

    fn tween_vars(&self, props: &Props, options: &TweenOptions) -> Result<JsValue, JsValue> {
        let vars = json_object(options.to_vars(props))?;
        if let Some(callback) = options.on_complete {
            Reflect::set(&vars, &"onComplete".into(), &self.completion(callback))?;
        }
        if let Some(trigger) = &options.scroll_trigger {
            let nested = Reflect::get(&vars, &"scrollTrigger".into())?;
            self.attach_trigger(&nested, trigger)?;
        }
        Ok(vars)
    }

    fn tween(&self, method: &str, args: &[&JsValue]) {
        let Some(gsap) = &self.gsap else {
            return;
        };
        log_failure(method, call_method(gsap, method, args));
    }
}

impl Dom for WebHost {
    fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        let list = self.document.query_selector_all(selector);
        self.intern_list(list, selector)
    }

    fn query_within(&mut self, root: ElementId, selector: &str) -> Vec<ElementId> {
        let Some(list) = self.element(root).map(|el| el.query_selector_all(selector)) else {
            return Vec::new();
        };
        self.intern_list(list, selector)
    }

    fn children(&mut self, parent: ElementId) -> Vec<ElementId> {
        let Some(collection) = self.element(parent).map(Element::children) else {
            return Vec::new();
        };
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .map(|el| self.intern(el))
            .collect()
    }

    fn next_section(&mut self, el: ElementId) -> Option<ElementId> {
        let section = self.element(el)?.closest("section").ok()??;
        let next = section.next_element_sibling()?;
        Some(self.intern(next))
    }

    fn body(&mut self) -> Option<ElementId> {
        let body: Element = self.document.body()?.into();
        Some(self.intern(body))
    }

    fn set_class(&mut self, el: ElementId, class: ClassName, on: bool) {
        if let Some(el) = self.element(el) {
            if let Err(e) = el.class_list().toggle_with_force(class.as_str(), on) {
                warn!(class = class.as_str(), error = ?e, "class toggle failed");
            }
        }
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        if let Some(el) = self.html(el) {
            if let Err(e) = el.style().set_property(property, value) {
                warn!(property, error = ?e, "style update failed");
            }
        }
    }

    fn inline_style(&self, el: ElementId, property: &str) -> Option<String> {
        self.html(el)?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(el) = self.element(el) {
            el.set_text_content(Some(text));
        }
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.element(el)?.get_attribute(name)
    }

    fn offset_width(&self, el: ElementId) -> f64 {
        self.html(el).map(|el| el.offset_width() as f64).unwrap_or(0.0)
    }

    fn path_length(&self, el: ElementId) -> Option<f64> {
        let path = self.element(el)?.dyn_ref::<SvgGeometryElement>()?;
        Some(path.get_total_length() as f64)
    }

    fn viewport_size(&self) -> ViewportSize {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        ViewportSize::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

impl Animator for WebHost {
    fn animate_to(&mut self, target: &Target, to: &Props, options: &TweenOptions) {
        if target.is_empty() {
            return;
        }
        match self.tween_vars(to, options) {
            Ok(vars) => self.tween("to", &[&self.targets(target), &vars]),
            Err(e) => warn!(error = ?e, "tween vars rejected"),
        }
    }

    fn animate_from_to(&mut self, target: &Target, from: &Props, to: &Props, options: &TweenOptions) {
        if target.is_empty() {
            return;
        }
        let vars = json_object(from.to_json_map()).and_then(|from| {
            let to = self.tween_vars(to, options)?;
            Ok((from, to))
        });
        match vars {
            Ok((from, to)) => self.tween("fromTo", &[&self.targets(target), &from, &to]),
            Err(e) => warn!(error = ?e, "tween vars rejected"),
        }
    }

    fn observe_scroll_trigger(&mut self, trigger: &ScrollTrigger) {
        let Some(scroll_trigger) = &self.scroll_trigger else {
            return;
        };
        let vars = json_object(trigger.to_vars())
            .and_then(|vars| self.attach_trigger(&vars, trigger).map(|_| vars));
        match vars {
            Ok(vars) => log_failure("ScrollTrigger.create", call_method(scroll_trigger, "create", &[&vars])),
            Err(e) => warn!(error = ?e, "scroll trigger vars rejected"),
        }
    }

    fn refresh_scroll_observers(&mut self) {
        if let Some(scroll_trigger) = &self.scroll_trigger {
            log_failure("ScrollTrigger.refresh", call_method(scroll_trigger, "refresh", &[]));
        }
    }

    fn scroll_window_to(&mut self, target: ElementId, offset_y: f64, options: &TweenOptions) {
        let Some(el) = self.element(target) else {
            return;
        };
        let vars = json_object(options.to_vars(&Props::new())).and_then(|vars| {
            let scroll_to = Object::new();
            Reflect::set(&scroll_to, &"y".into(), el)?;
            Reflect::set(&scroll_to, &"offsetY".into(), &JsValue::from_f64(offset_y))?;
            Reflect::set(&vars, &"scrollTo".into(), &scroll_to)?;
            Ok(vars)
        });
        match vars {
            Ok(vars) => {
                let window: &JsValue = self.window.as_ref();
                self.tween("to", &[window, &vars]);
            }
            Err(e) => warn!(error = ?e, "scroll vars rejected"),
        }
    }
}

impl TextSplitter for WebHost {
    fn split_into_characters(&mut self, el: ElementId) -> Vec<ElementId> {
        let (Some(splitting), Some(element)) = (&self.splitting, self.element(el)) else {
            return Vec::new();
        };
        let Ok(splitting) = splitting.clone().dyn_into::<Function>() else {
            return Vec::new();
        };
        let options = Object::new();
        let chars = Reflect::set(&options, &"target".into(), element)
            .and_then(|_| Reflect::set(&options, &"by".into(), &"chars".into()))
            .and_then(|_| splitting.call1(&JsValue::NULL, &options))
            .and_then(|results| Reflect::get(&results, &JsValue::from_f64(0.0)))
            .and_then(|first| Reflect::get(&first, &"chars".into()));
        let chars = match chars {
            Ok(chars) if Array::is_array(&chars) => Array::from(&chars),
            Ok(_) => return Vec::new(),
            Err(e) => {
                warn!(error = ?e, "text splitting failed");
                return Vec::new();
            }
        };
        chars
            .iter()
            .filter_map(|c| c.dyn_into::<Element>().ok())
            .map(|c| self.intern(c))
            .collect()
    }
}

impl SceneRenderer for WebHost {
    fn create_scene(&mut self, canvas: ElementId, spec: &SceneSpec) -> Option<RenderHandle> {
        let factory = self.scene_factory.as_ref()?.clone().dyn_into::<Function>().ok()?;
        let canvas = self.element(canvas)?;
        let spec = match spec.to_json() {
            Ok(json) => js_sys::JSON::parse(&json),
            Err(e) => {
                warn!(error = %e, "scene spec serialization failed");
                return None;
            }
        };
        let scene = match spec.and_then(|spec| factory.call2(&JsValue::NULL, canvas, &spec)) {
            Ok(scene) if !scene.is_undefined() && !scene.is_null() => scene,
            Ok(_) => return None,
            Err(e) => {
                warn!(error = ?e, "createScene failed");
                return None;
            }
        };
        self.scenes.push(scene);
        Some(RenderHandle::new(self.scenes.len() as u32 - 1))
    }

    fn notify_resize(&mut self, handle: RenderHandle, size: ViewportSize) {
        if let Some(scene) = self.scenes.get(handle.as_u32() as usize) {
            let (w, h) = (JsValue::from_f64(size.width), JsValue::from_f64(size.height));
            log_failure("scene.resize", call_method(scene, "resize", &[&w, &h]));
        }
    }

    fn notify_pointer(&mut self, handle: RenderHandle, x: f64, y: f64) {
        if let Some(scene) = self.scenes.get(handle.as_u32() as usize) {
            let (x, y) = (JsValue::from_f64(x), JsValue::from_f64(y));
            log_failure("scene.pointer", call_method(scene, "pointer", &[&x, &y]));
        }
    }
}

fn event_input(event: &Event) -> EventInput {
    let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
        return EventInput::default();
    };
    let input = EventInput::pointer(mouse.client_x() as f64, mouse.client_y() as f64);
    match event.current_target().and_then(|t| t.dyn_into::<Element>().ok()) {
        Some(el) => {
            let rect = el.get_bounding_client_rect();
            input.within(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
        }
        None => input,
    }
}

fn apply_response(event: &Event, response: Response) {
    if response.prevent_default {
        event.prevent_default();
    }
    if response.stop_propagation {
        event.stop_propagation();
    }
}

impl Platform for WebHost {
    fn bind(&mut self, binding: Binding) {
        let target: EventTarget = match binding.target {
            BindTarget::Window => self.window.clone().into(),
            BindTarget::Document => self.document.clone().into(),
            BindTarget::Element(id) => match self.element(id) {
                Some(el) => el.clone().into(),
                None => return,
            },
        };
        let shared = self.shared.clone();
        let action = binding.action;
        let listener = Closure::wrap(Box::new(move |event: Event| {
            let input = event_input(&event);
            match with_runtime(&shared, |engine, host| engine.handle(action, input, host)) {
                Some(response) => apply_response(&event, response),
                None => debug!(?action, "runtime busy, event dropped"),
            }
        }) as Box<dyn FnMut(Event)>);

        if let Err(e) = target
            .add_event_listener_with_callback(binding.event.as_str(), listener.as_ref().unchecked_ref())
        {
            warn!(event = binding.event.as_str(), error = ?e, "listener not attached");
        }
        // Listeners live as long as the page.
        listener.forget();
    }

    fn set_timeout(&mut self, delay_ms: u32, callback: Callback) {
        let handler = self.completion(callback);
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(handler.unchecked_ref(), delay)
        {
            warn!(error = ?e, "setTimeout failed");
        }
    }

    fn play_media(&mut self, media: ElementId) {
        let Some(video) = self.element(media).and_then(|el| el.dyn_ref::<HtmlMediaElement>()) else {
            return;
        };
        match video.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    warn!(error = ?e, "video playback rejected");
                }
            }),
            Err(e) => warn!(error = ?e, "video playback failed"),
        }
    }

    fn current_year(&self) -> i32 {
        js_sys::Date::new_0().get_full_year() as i32
    }

    fn random_seed(&mut self) -> u64 {
        let word = || (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        (word() << 32) | word()
    }
}

/// Entry point called by the page once the DOM is ready. `config_json` may be
/// omitted or empty for the defaults. A second call does nothing.
#[wasm_bindgen]
pub fn boot(config_json: Option<String>) -> Result<(), JsValue> {
    let config = EngineConfig::from_json(config_json.as_deref().unwrap_or(""))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    logging::init(&config.log_filter);

    if BOOTED.with(|slot| slot.borrow().is_some()) {
        debug!("boot called twice");
        return Ok(());
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let shared = Rc::new_cyclic(|weak: &Weak<Shared>| Shared {
        runtime: RefCell::new(Runtime {
            engine: Engine::new(config),
            host: WebHost::new(window, document, weak.clone()),
        }),
        deferred: RefCell::new(VecDeque::new()),
    });
    with_runtime(&Rc::downgrade(&shared), |engine, host| engine.init_core(host));
    BOOTED.with(|slot| *slot.borrow_mut() = Some(shared));
    info!("motion core booted");
    Ok(())
}
