// motion_core: Rust/WASM interaction core for the portfolio site.
// Components are state machines behind host traits; the browser binding in `web` is plumbing.

mod binding;
mod carousel;
mod config;
mod cursor;
mod debounce;
mod dispatcher;
mod effects;
mod error;
mod host;
mod hover;
mod loader;
mod logging;
mod nav;
mod page;
mod playback;
mod scene;
mod signal;
mod types;
mod viewport;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
mod web;

use wasm_bindgen::prelude::*;

pub use binding::{Action, BindTarget, Binding, DomEvent, EventInput, Response};
pub use carousel::{Carousel, CarouselController, CarouselElements, CarouselFrame};
pub use config::{DeviceCounts, EngineConfig};
pub use cursor::CustomCursor;
pub use debounce::Debouncer;
pub use dispatcher::Engine;
pub use effects::{
    Animator, Callback, Ease, Prop, PropValue, Props, ScrollTrigger, Target, TweenOptions,
};
pub use error::EngineError;
pub use host::{Dom, Host, Platform, SceneRenderer, TextSplitter};
pub use hover::{HoverEffect, HoverPhase};
pub use loader::{LoaderElements, LoaderSequencer};
pub use nav::{MenuState, NavController, NavElements, NavFlags, NavState, ScrollLock};
pub use page::PageAnimations;
pub use playback::VideoWatcher;
pub use scene::{ParticleField, SceneSpec, Torus, TorusField};
pub use signal::ReadySignal;
pub use types::*;
pub use viewport::{compute_is_mobile, ViewportTracker, MOBILE_BREAKPOINT};

#[cfg(target_arch = "wasm32")]
pub use web::boot;

pub use logging::init as init_logging;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
