// Navigation: scroll-derived nav classes and the mobile menu state machine.
// The menu boolean lags the exit animation; the page scroll lock follows it 1:1.

use tracing::debug;

use crate::effects::{Callback, Ease, Prop, Props, Target, TweenOptions};
use crate::host::Host;
use crate::types::{ClassName, ElementId};

/// Flags derived from one scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavFlags {
    pub is_scrolled: bool,
    pub should_hide: bool,
}

/// Mobile menu lifecycle. `Closing` carries the generation its completion must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
    Closing { generation: u32 },
}

/// Page-wide scroll lock, owned by the navigation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollLock {
    locked: bool,
}

impl ScrollLock {
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Scroll tracking and menu state. Pure; effects go through `NavController`.
#[derive(Debug, Clone)]
pub struct NavState {
    scrolled_threshold: f64,
    hide_threshold: f64,
    scroll_y: f64,
    last_scroll_y: f64,
    menu: MenuState,
    generation: u32,
    lock: ScrollLock,
}

impl NavState {
    pub fn new(scrolled_threshold: f64, hide_threshold: f64) -> Self {
        NavState {
            scrolled_threshold,
            hide_threshold,
            scroll_y: 0.0,
            last_scroll_y: 0.0,
            menu: MenuState::Closed,
            generation: 0,
            lock: ScrollLock::default(),
        }
    }

    /// Derive nav flags from a new scroll offset. No hysteresis: flags flip
    /// on every crossing.
    pub fn on_scroll(&mut self, scroll_y: f64) -> NavFlags {
        self.scroll_y = scroll_y;
        let flags = NavFlags {
            is_scrolled: scroll_y > self.scrolled_threshold,
            should_hide: scroll_y > self.last_scroll_y && scroll_y > self.hide_threshold,
        };
        self.last_scroll_y = scroll_y;
        flags
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn last_scroll_y(&self) -> f64 {
        self.last_scroll_y
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    /// True while open and while the exit animation runs.
    pub fn menu_open(&self) -> bool {
        !matches!(self.menu, MenuState::Closed)
    }

    pub fn scroll_lock(&self) -> ScrollLock {
        self.lock
    }

    /// Returns whether an open effect should play.
    pub fn open(&mut self) -> bool {
        match self.menu {
            MenuState::Open => false,
            MenuState::Closed => {
                self.menu = MenuState::Open;
                self.lock.locked = true;
                true
            }
            MenuState::Closing { .. } => {
                // Re-open mid-close: the pending close completion goes stale.
                self.generation = self.generation.wrapping_add(1);
                self.menu = MenuState::Open;
                self.lock.locked = true;
                true
            }
        }
    }

    /// Returns the generation the close completion must carry, if a close started.
    pub fn close(&mut self) -> Option<u32> {
        match self.menu {
            MenuState::Open => {
                self.generation = self.generation.wrapping_add(1);
                self.menu = MenuState::Closing {
                    generation: self.generation,
                };
                Some(self.generation)
            }
            MenuState::Closed | MenuState::Closing { .. } => None,
        }
    }

    /// Close effect finished. Stale generations are ignored.
    pub fn close_complete(&mut self, generation: u32) -> bool {
        match self.menu {
            MenuState::Closing { generation: pending } if pending == generation => {
                self.menu = MenuState::Closed;
                self.lock.locked = false;
                true
            }
            _ => false,
        }
    }

    /// Force the menu closed and unlocked from any state.
    /// A close already in flight goes stale.
    pub fn reset(&mut self) -> bool {
        let changed = self.menu != MenuState::Closed || self.lock.locked;
        if let MenuState::Closing { .. } = self.menu {
            self.generation = self.generation.wrapping_add(1);
        }
        self.menu = MenuState::Closed;
        self.lock.locked = false;
        changed
    }
}

pub struct NavElements {
    pub nav: ElementId,
    pub toggle: Option<ElementId>,
    pub menu: Option<ElementId>,
    pub menu_bg: Option<ElementId>,
    pub links: Vec<ElementId>,
    pub body: Option<ElementId>,
}

impl NavElements {
    pub fn query(host: &mut dyn Host) -> Option<Self> {
        let nav = host.query(".nav")?;
        Some(NavElements {
            nav,
            toggle: host.query(".nav-toggle"),
            menu: host.query(".mobile-menu"),
            menu_bg: host.query(".mobile-menu-bg"),
            links: host.query_all(".mobile-link"),
            body: host.body(),
        })
    }
}

/// Applies `NavState` transitions to the page.
pub struct NavController {
    elements: NavElements,
    state: NavState,
}

impl NavController {
    pub fn new(elements: NavElements, state: NavState) -> Self {
        NavController { elements, state }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn on_scroll(&mut self, host: &mut dyn Host, scroll_y: f64) -> NavFlags {
        let flags = self.state.on_scroll(scroll_y);
        host.set_class(self.elements.nav, ClassName::Scrolled, flags.is_scrolled);
        host.set_class(self.elements.nav, ClassName::NavHidden, flags.should_hide);
        flags
    }

    /// Close when open; otherwise open, which also cancels a close in progress.
    pub fn toggle_menu(&mut self, host: &mut dyn Host) {
        if self.state.menu() == MenuState::Open {
            self.close_menu(host);
        } else {
            self.open_menu(host);
        }
    }

    pub fn open_menu(&mut self, host: &mut dyn Host) {
        if !self.state.open() {
            return;
        }
        debug!("menu opening");
        self.project(host);

        if let Some(bg) = self.elements.menu_bg {
            host.animate_from_to(
                &Target::Element(bg),
                &Props::new().with(Prop::ScaleY, 0.0),
                &Props::new().with(Prop::ScaleY, 1.0),
                &TweenOptions::new(0.5, Ease::Power3InOut),
            );
        }
        if !self.elements.links.is_empty() {
            host.animate_from_to(
                &Target::Elements(self.elements.links.clone()),
                &Props::new().with(Prop::Y, 50.0).with(Prop::Opacity, 0.0),
                &Props::new().with(Prop::Y, 0.0).with(Prop::Opacity, 1.0),
                &TweenOptions::new(0.5, Ease::Power3Out).stagger(0.1).delay(0.3),
            );
        }
    }

    pub fn close_menu(&mut self, host: &mut dyn Host) {
        let Some(generation) = self.state.close() else {
            return;
        };
        debug!(generation, "menu closing");
        self.project(host);

        if self.elements.links.is_empty() {
            // Nothing to animate out, so nothing would ever report completion.
            self.on_close_complete(host, generation);
            return;
        }
        host.animate_to(
            &Target::Elements(self.elements.links.clone()),
            &Props::new().with(Prop::Y, -30.0).with(Prop::Opacity, 0.0),
            &TweenOptions::new(0.3, Ease::Power3In)
                .stagger(0.05)
                .on_complete(Callback::MenuClosed { generation }),
        );
    }

    pub fn on_close_complete(&mut self, host: &mut dyn Host, generation: u32) {
        if self.state.close_complete(generation) {
            debug!(generation, "menu closed");
            self.project(host);
        }
    }

    /// Close the menu and unlock page scroll unconditionally, e.g. when the
    /// page is being left mid-animation.
    pub fn teardown(&mut self, host: &mut dyn Host) {
        if self.state.reset() {
            debug!("menu reset on teardown");
            self.project(host);
        }
    }

    /// Project menu state onto classes and the body scroll lock.
    fn project(&self, host: &mut dyn Host) {
        let menu = self.state.menu();
        if let Some(toggle) = self.elements.toggle {
            host.set_class(toggle, ClassName::Active, menu == MenuState::Open);
        }
        if let Some(panel) = self.elements.menu {
            host.set_class(panel, ClassName::Active, self.state.menu_open());
        }
        self.project_lock(host);
    }

    fn project_lock(&self, host: &mut dyn Host) {
        if let Some(body) = self.elements.body {
            let overflow = if self.state.scroll_lock().is_locked() {
                "hidden"
            } else {
                ""
            };
            host.set_style(body, "overflow", overflow);
        }
    }
}
