// Interaction dispatcher: owns every component, wires them to the page in a
// fixed order, and routes bound DOM events and completions back to them.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::binding::{Action, BindTarget, Binding, DomEvent, EventInput, Response};
use crate::carousel::{CarouselController, CarouselElements};
use crate::config::EngineConfig;
use crate::cursor::{CustomCursor, HOVER_SELECTOR};
use crate::debounce::Debouncer;
use crate::effects::{Callback, Ease, TweenOptions};
use crate::host::Host;
use crate::hover::apply_hover;
use crate::loader::{LoaderElements, LoaderSequencer};
use crate::nav::{NavController, NavElements, NavState};
use crate::page::{self, PageAnimations};
use crate::playback::VideoWatcher;
use crate::scene::{self, SceneSpec};
use crate::signal::ReadySignal;
use crate::types::{ElementId, LoadState, MediaEvent, RenderHandle, ViewportState};
use crate::viewport::ViewportTracker;

/// Work deferred until the loader reports Ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadyTask {
    PageAnimations,
    RefreshScrollObservers,
}

pub struct Engine {
    config: EngineConfig,
    initialized: bool,
    viewport: ViewportTracker,
    cursor: Option<CustomCursor>,
    loader: Option<LoaderSequencer>,
    ready: ReadySignal<ReadyTask>,
    nav: Option<NavController>,
    scenes: Vec<RenderHandle>,
    videos: Vec<VideoWatcher>,
    carousel: Option<CarouselController>,
    resize: Debouncer,
    page: PageAnimations,
    rng: SmallRng,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            viewport: ViewportTracker::new(config.mobile_breakpoint, Default::default()),
            config,
            initialized: false,
            cursor: None,
            loader: None,
            ready: ReadySignal::new(),
            nav: None,
            scenes: Vec::new(),
            videos: Vec::new(),
            carousel: None,
            resize: Debouncer::new(),
            page: PageAnimations::new(),
            rng: SmallRng::seed_from_u64(0),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport.state()
    }

    /// `Ready` when the page has no loader.
    pub fn load_state(&self) -> LoadState {
        self.loader
            .as_ref()
            .map(LoaderSequencer::state)
            .unwrap_or(LoadState::Ready)
    }

    pub fn nav(&self) -> Option<&NavController> {
        self.nav.as_ref()
    }

    pub fn carousel(&self) -> Option<&CarouselController> {
        self.carousel.as_ref()
    }

    pub fn videos(&self) -> &[VideoWatcher] {
        &self.videos
    }

    pub fn page_initialized(&self) -> bool {
        self.page.is_initialized()
    }

    /// Wire every component to the page. Only the first call does anything.
    pub fn init_core(&mut self, host: &mut dyn Host) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.rng = SmallRng::seed_from_u64(host.random_seed());

        self.init_viewport(host);
        self.init_loader(host);
        self.init_nav(host);
        page::init_split_text(host);
        self.init_scenes(host);
        self.init_videos(host);
        self.init_carousel(host);

        for anchor in host.query_all("a[href^=\"#\"]") {
            host.bind(Binding::on(anchor, DomEvent::Click, Action::AnchorClick(anchor)));
        }
        if let Some(year) = host.query("#year") {
            let text = host.current_year().to_string();
            host.set_text(year, &text);
        }
        host.bind(Binding::new(BindTarget::Window, DomEvent::Resize, Action::Resized));

        page::init_ambient(host);
        host.bind(Binding::new(BindTarget::Window, DomEvent::Load, Action::PageLoaded));
        host.bind(Binding::new(BindTarget::Window, DomEvent::PageHide, Action::PageHidden));

        if self.loader.is_none() {
            self.page.init(host, &mut self.rng);
        }
        info!(
            mobile = self.viewport.state().is_mobile,
            scenes = self.scenes.len(),
            videos = self.videos.len(),
            "interaction core initialized"
        );
    }

    fn init_viewport(&mut self, host: &mut dyn Host) {
        self.viewport = ViewportTracker::new(self.config.mobile_breakpoint, host.viewport_size());
        host.bind(Binding::new(BindTarget::Document, DomEvent::PointerMove, Action::PointerMoved));

        let state = self.viewport.state();
        self.cursor = CustomCursor::init(host, &state, self.config.custom_cursor);
        if self.cursor.is_none() {
            return;
        }
        for el in host.query_all(HOVER_SELECTOR) {
            host.bind(Binding::on(el, DomEvent::PointerEnter, Action::CursorHover(true)));
            host.bind(Binding::on(el, DomEvent::PointerLeave, Action::CursorHover(false)));
        }
        host.bind(Binding::new(BindTarget::Document, DomEvent::PointerLeave, Action::CursorVisible(false)));
        host.bind(Binding::new(BindTarget::Document, DomEvent::PointerEnter, Action::CursorVisible(true)));
    }

    fn init_loader(&mut self, host: &mut dyn Host) {
        let Some(elements) = LoaderElements::query(host) else {
            return;
        };
        self.ready.subscribe(ReadyTask::PageAnimations);
        self.ready.subscribe(ReadyTask::RefreshScrollObservers);
        let mut loader = LoaderSequencer::new(elements);
        loader.start(host);
        self.loader = Some(loader);
    }

    fn init_nav(&mut self, host: &mut dyn Host) {
        let Some(elements) = NavElements::query(host) else {
            return;
        };
        host.bind(Binding::new(BindTarget::Window, DomEvent::Scroll, Action::Scrolled));
        if let Some(toggle) = elements.toggle {
            host.bind(Binding::on(toggle, DomEvent::Click, Action::NavToggle));
        }
        for link in &elements.links {
            host.bind(Binding::on(*link, DomEvent::Click, Action::MenuLink));
        }
        let state = NavState::new(self.config.scrolled_threshold, self.config.hide_threshold);
        self.nav = Some(NavController::new(elements, state));
    }

    fn init_scenes(&mut self, host: &mut dyn Host) {
        let is_mobile = self.viewport.state().is_mobile;
        if let Some(canvas) = host.query("#hero-canvas") {
            let count = self.config.hero_particles.for_viewport(is_mobile);
            let spec = SceneSpec::ParticleField(scene::particle_field(count, self.rng.gen()));
            self.attach_scene(host, canvas, &spec);
        }
        if let Some(canvas) = host.query("#curiosity-canvas") {
            let count = self.config.curiosity_tori.for_viewport(is_mobile);
            let spec = SceneSpec::TorusField(scene::torus_field(count, self.rng.gen()));
            self.attach_scene(host, canvas, &spec);
        }
    }

    fn attach_scene(&mut self, host: &mut dyn Host, canvas: ElementId, spec: &SceneSpec) {
        match host.create_scene(canvas, spec) {
            Some(handle) => self.scenes.push(handle),
            None => debug!(?canvas, "render engine unavailable, scene skipped"),
        }
    }

    fn init_videos(&mut self, host: &mut dyn Host) {
        self.videos = VideoWatcher::query_all(host);
        for (index, watcher) in self.videos.iter().enumerate() {
            host.bind(Binding::on(watcher.play_button(), DomEvent::Click, Action::PlayButton(index)));
            for (event, media) in [
                (DomEvent::Play, MediaEvent::Play),
                (DomEvent::Pause, MediaEvent::Pause),
                (DomEvent::Ended, MediaEvent::Ended),
            ] {
                host.bind(Binding::on(watcher.video(), event, Action::Media(index, media)));
            }
        }
    }

    fn init_carousel(&mut self, host: &mut dyn Host) {
        let Some(elements) = CarouselElements::query(host) else {
            return;
        };
        if let Some(prev) = elements.prev {
            host.bind(Binding::on(prev, DomEvent::Click, Action::CarouselPrev));
        }
        if let Some(next) = elements.next {
            host.bind(Binding::on(next, DomEvent::Click, Action::CarouselNext));
        }
        for (index, dot) in elements.dots.iter().enumerate() {
            host.bind(Binding::on(*dot, DomEvent::Click, Action::CarouselDot(index)));
        }
        let carousel = CarouselController::new(elements, self.config.carousel_gap);
        carousel.render(host);
        self.carousel = Some(carousel);
    }

    /// Route one bound DOM event.
    pub fn handle(&mut self, action: Action, input: EventInput, host: &mut dyn Host) -> Response {
        match action {
            Action::PointerMoved => {
                let Some(pointer) = input.pointer else {
                    return Response::default();
                };
                let state = self.viewport.on_pointer_move(pointer.x, pointer.y);
                if let Some(cursor) = &self.cursor {
                    cursor.follow(host, &state);
                }
                let (x, y) = self.viewport.normalized_pointer();
                for handle in &self.scenes {
                    host.notify_pointer(*handle, x, y);
                }
            }
            Action::CursorHover(hovering) => {
                if let Some(cursor) = &self.cursor {
                    cursor.set_hover(host, hovering);
                }
            }
            Action::CursorVisible(visible) => {
                if let Some(cursor) = &self.cursor {
                    cursor.set_visible(host, visible);
                }
            }
            Action::Scrolled => {
                if let Some(nav) = &mut self.nav {
                    let scroll_y = host.scroll_y();
                    nav.on_scroll(host, scroll_y);
                }
            }
            Action::NavToggle => {
                if let Some(nav) = &mut self.nav {
                    nav.toggle_menu(host);
                }
            }
            Action::MenuLink => {
                if let Some(nav) = &mut self.nav {
                    nav.close_menu(host);
                }
            }
            Action::CarouselPrev => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.prev(host);
                }
            }
            Action::CarouselNext => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.next(host);
                }
            }
            Action::CarouselDot(index) => {
                if let Some(carousel) = &mut self.carousel {
                    if let Err(e) = carousel.jump_to(host, index) {
                        warn!(error = %e, "carousel dot ignored");
                    }
                }
            }
            Action::PlayButton(index) => {
                if let Some(watcher) = self.videos.get(index) {
                    watcher.on_play_button_activated(host);
                }
                return Response::stop_propagation();
            }
            Action::Media(index, event) => {
                if let Some(watcher) = self.videos.get_mut(index) {
                    watcher.on_media_event(host, event);
                }
            }
            Action::AnchorClick(anchor) => {
                self.scroll_to_anchor(host, anchor);
                return Response::prevent_default();
            }
            Action::ScrollIndicator(indicator) => {
                if let Some(next) = host.next_section(indicator) {
                    host.scroll_window_to(next, 0.0, &TweenOptions::new(1.0, Ease::Power3InOut));
                }
            }
            Action::Hover(effect, phase) => {
                apply_hover(host, effect, phase, input.pointer, input.bounds);
            }
            Action::Resized => {
                let ticket = self.resize.trigger();
                host.set_timeout(self.config.resize_quiet_ms, Callback::ResizeSettled(ticket));
            }
            Action::PageLoaded => {
                host.refresh_scroll_observers();
                info!("page loaded");
            }
            Action::PageHidden => {
                if let Some(nav) = &mut self.nav {
                    nav.teardown(host);
                }
            }
        }
        Response::default()
    }

    fn scroll_to_anchor(&mut self, host: &mut dyn Host, anchor: ElementId) {
        let Some(href) = host.attribute(anchor, "href") else {
            return;
        };
        if href.len() < 2 {
            return;
        }
        match host.query(&href) {
            Some(target) => host.scroll_window_to(
                target,
                self.config.smooth_scroll_offset,
                &TweenOptions::new(1.0, Ease::Power3InOut),
            ),
            None => debug!(%href, "anchor target missing"),
        }
    }

    /// Route a completion requested earlier through an effect or timer.
    pub fn complete(&mut self, callback: Callback, host: &mut dyn Host) {
        match callback {
            Callback::LoaderProgressDone => {
                if let Some(loader) = &mut self.loader {
                    loader.on_progress_complete(host);
                }
            }
            Callback::LoaderHidden => {
                let reached_ready = match &mut self.loader {
                    Some(loader) => loader.on_intro_complete(host),
                    None => false,
                };
                if reached_ready {
                    for task in self.ready.emit() {
                        self.run_ready_task(host, task);
                    }
                }
            }
            Callback::MenuClosed { generation } => {
                if let Some(nav) = &mut self.nav {
                    nav.on_close_complete(host, generation);
                }
            }
            Callback::ResizeSettled(ticket) => {
                if self.resize.settle(ticket) {
                    self.on_resize_settled(host);
                }
            }
            Callback::SkillBarEnter { index } => self.page.on_skill_bar_enter(host, index),
            Callback::InfinityEnter => self.page.on_infinity_enter(host),
        }
    }

    fn run_ready_task(&mut self, host: &mut dyn Host, task: ReadyTask) {
        match task {
            ReadyTask::PageAnimations => {
                self.page.init(host, &mut self.rng);
            }
            ReadyTask::RefreshScrollObservers => host.refresh_scroll_observers(),
        }
    }

    fn on_resize_settled(&mut self, host: &mut dyn Host) {
        let size = host.viewport_size();
        let state = self.viewport.on_resize(size);
        debug!(width = size.width, mobile = state.is_mobile, "resize settled");
        host.refresh_scroll_observers();
        if let Some(carousel) = &self.carousel {
            carousel.render(host);
        }
        for handle in &self.scenes {
            host.notify_resize(*handle, size);
        }
    }
}
