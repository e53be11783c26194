// Page-wide entrance animations, run once when the page becomes Ready.
// Most reveals are rows in a declarative table; the handful with state or
// callbacks (skill bars, infinity stroke, hover cards) are spelled out below.

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::debug;

use crate::binding::{Action, Binding, DomEvent};
use crate::effects::{Callback, Ease, Prop, Props, ScrollTrigger, Target, TweenOptions};
use crate::hover::{HoverEffect, HoverPhase};
use crate::host::Host;
use crate::types::ElementId;

/// Which elements a reveal rule animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// First match only.
    First,
    /// Every match, individually, with its own trigger.
    Each,
    /// Children of every match, staggered, triggered by the parent.
    Children,
    /// Children of the first match.
    ChildrenOfFirst,
}

struct Reveal {
    selector: &'static str,
    scope: Scope,
    from: &'static [(Prop, f64)],
    to: &'static [(Prop, f64)],
    duration: f64,
    ease: Ease,
    stagger: Option<f64>,
    delay: f64,
    /// Extra delay per match index.
    delay_step: f64,
    /// Odd matches enter from the opposite side.
    mirror_x: bool,
    /// Scroll trigger start; `None` plays immediately.
    start: Option<&'static str>,
}

const REST: &[(Prop, f64)] = &[(Prop::Y, 0.0), (Prop::Opacity, 1.0)];

const REVEALS: &[Reveal] = &[
    Reveal {
        selector: ".hero-content, .about-hero-content, .curiosity-hero-content, .page-header-content",
        scope: Scope::ChildrenOfFirst,
        from: &[(Prop::Y, 60.0), (Prop::Opacity, 0.0)],
        to: REST,
        duration: 1.0,
        ease: Ease::Power4Out,
        stagger: Some(0.15),
        delay: 0.5,
        delay_step: 0.0,
        mirror_x: false,
        start: None,
    },
    Reveal {
        selector: ".fade-in-up, .section-tag, .section-header, .story-text p, .details-text",
        scope: Scope::Each,
        from: &[(Prop::Y, 50.0), (Prop::Opacity, 0.0)],
        to: REST,
        duration: 0.8,
        ease: Ease::Power3Out,
        stagger: None,
        delay: 0.0,
        delay_step: 0.0,
        mirror_x: false,
        start: Some("top 90%"),
    },
    Reveal {
        selector: ".reveal",
        scope: Scope::Each,
        from: &[(Prop::Y, 80.0), (Prop::Opacity, 0.0)],
        to: REST,
        duration: 1.0,
        ease: Ease::Power4Out,
        stagger: None,
        delay: 0.0,
        delay_step: 0.0,
        mirror_x: false,
        start: Some("top 85%"),
    },
    Reveal {
        selector: ".questions-grid, .values-grid, .highlights-grid, .exploration-areas",
        scope: Scope::Children,
        from: &[(Prop::Y, 60.0), (Prop::Opacity, 0.0)],
        to: REST,
        duration: 0.6,
        ease: Ease::Power3Out,
        stagger: Some(0.1),
        delay: 0.0,
        delay_step: 0.0,
        mirror_x: false,
        start: Some("top 80%"),
    },
    Reveal {
        selector: ".work-card",
        scope: Scope::Each,
        from: &[(Prop::Y, 80.0), (Prop::Opacity, 0.0)],
        to: REST,
        duration: 0.8,
        ease: Ease::Power3Out,
        stagger: None,
        delay: 0.0,
        delay_step: 0.15,
        mirror_x: false,
        start: Some("top 85%"),
    },
    Reveal {
        selector: ".timeline-item",
        scope: Scope::Each,
        from: &[(Prop::X, -50.0), (Prop::Opacity, 0.0)],
        to: &[(Prop::X, 0.0), (Prop::Opacity, 1.0)],
        duration: 0.8,
        ease: Ease::Power3Out,
        stagger: None,
        delay: 0.0,
        delay_step: 0.0,
        mirror_x: true,
        start: Some("top 85%"),
    },
    Reveal {
        selector: ".stat-card",
        scope: Scope::Each,
        from: &[(Prop::Y, 40.0), (Prop::Opacity, 0.0), (Prop::Scale, 0.9)],
        to: &[(Prop::Y, 0.0), (Prop::Opacity, 1.0), (Prop::Scale, 1.0)],
        duration: 0.6,
        ease: Ease::BackOut,
        stagger: None,
        delay: 0.0,
        delay_step: 0.1,
        mirror_x: false,
        start: Some("top 90%"),
    },
    Reveal {
        selector: ".quote-wrapper, .quote-interactive",
        scope: Scope::First,
        from: &[(Prop::Y, 50.0), (Prop::Opacity, 0.0)],
        to: REST,
        duration: 1.0,
        ease: Ease::Power3Out,
        stagger: None,
        delay: 0.0,
        delay_step: 0.0,
        mirror_x: false,
        start: Some("top 80%"),
    },
    Reveal {
        selector: ".resume-preview",
        scope: Scope::First,
        from: &[(Prop::Scale, 0.9), (Prop::Opacity, 0.0)],
        to: &[(Prop::Scale, 1.0), (Prop::Opacity, 1.0)],
        duration: 1.0,
        ease: Ease::Power3Out,
        stagger: None,
        delay: 0.0,
        delay_step: 0.0,
        mirror_x: false,
        start: Some("top 80%"),
    },
    Reveal {
        selector: ".resume-download-section",
        scope: Scope::First,
        from: &[(Prop::Y, 30.0), (Prop::Opacity, 0.0)],
        to: REST,
        duration: 0.8,
        ease: Ease::Power3Out,
        stagger: None,
        delay: 0.0,
        delay_step: 0.0,
        mirror_x: false,
        start: Some("top 90%"),
    },
    Reveal {
        selector: ".project-card",
        scope: Scope::Each,
        from: &[(Prop::Y, 80.0), (Prop::Opacity, 0.0), (Prop::RotateY, -10.0)],
        to: &[(Prop::Y, 0.0), (Prop::Opacity, 1.0), (Prop::RotateY, 0.0)],
        duration: 0.8,
        ease: Ease::Power3Out,
        stagger: None,
        delay: 0.0,
        delay_step: 0.1,
        mirror_x: false,
        start: Some("top 85%"),
    },
];

fn run_reveal(host: &mut dyn Host, rule: &Reveal) {
    match rule.scope {
        Scope::First => {
            if let Some(el) = host.query(rule.selector) {
                apply_reveal(host, rule, Target::Element(el), el, 0);
            }
        }
        Scope::Each => {
            for (i, el) in host.query_all(rule.selector).into_iter().enumerate() {
                apply_reveal(host, rule, Target::Element(el), el, i);
            }
        }
        Scope::Children => {
            for parent in host.query_all(rule.selector) {
                let children = host.children(parent);
                if !children.is_empty() {
                    apply_reveal(host, rule, Target::Elements(children), parent, 0);
                }
            }
        }
        Scope::ChildrenOfFirst => {
            if let Some(parent) = host.query(rule.selector) {
                let children = host.children(parent);
                if !children.is_empty() {
                    apply_reveal(host, rule, Target::Elements(children), parent, 0);
                }
            }
        }
    }
}

fn apply_reveal(host: &mut dyn Host, rule: &Reveal, target: Target, trigger: ElementId, index: usize) {
    let mut from = Props::from_pairs(rule.from);
    if rule.mirror_x && index % 2 == 1 {
        if let Some(x) = from.number(Prop::X) {
            from = from.with(Prop::X, -x);
        }
    }
    let mut options =
        TweenOptions::new(rule.duration, rule.ease).delay(rule.delay + rule.delay_step * index as f64);
    if let Some(stagger) = rule.stagger {
        options = options.stagger(stagger);
    }
    if let Some(start) = rule.start {
        options = options.triggered_by(ScrollTrigger::new(trigger, start));
    }
    host.animate_from_to(&target, &from, &Props::from_pairs(rule.to), &options);
}

/// State kept between page init and scroll-trigger callbacks.
#[derive(Debug, Default)]
pub struct PageAnimations {
    initialized: bool,
    skill_bars: Vec<(ElementId, String)>,
    infinity_path: Option<ElementId>,
}

impl PageAnimations {
    pub fn new() -> Self {
        PageAnimations::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run every page animation. Only the first call does anything.
    pub fn init(&mut self, host: &mut dyn Host, rng: &mut SmallRng) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        debug!("initializing page animations");

        for rule in REVEALS {
            run_reveal(host, rule);
        }
        bind_card_hovers(host);
        self.init_skill_bars(host);
        init_image_decorations(host);
        init_floating_shapes(host, rng);
        self.init_infinity_symbol(host);
        init_marquees(host);
        true
    }

    fn init_skill_bars(&mut self, host: &mut dyn Host) {
        for (index, bar) in host.query_all(".skill-bar span").into_iter().enumerate() {
            let width = host.inline_style(bar, "width").unwrap_or_default();
            host.set_style(bar, "width", "0%");
            host.observe_scroll_trigger(
                &ScrollTrigger::new(bar, "top 90%").once_on_enter(Callback::SkillBarEnter { index }),
            );
            self.skill_bars.push((bar, width));
        }
    }

    /// Grow a skill bar back to its authored width.
    pub fn on_skill_bar_enter(&self, host: &mut dyn Host, index: usize) {
        let Some((bar, width)) = self.skill_bars.get(index) else {
            return;
        };
        if width.is_empty() {
            return;
        }
        host.animate_to(
            &Target::Element(*bar),
            &Props::new().with_text(Prop::Width, width.clone()),
            &TweenOptions::new(1.2, Ease::Power3Out),
        );
    }

    fn init_infinity_symbol(&mut self, host: &mut dyn Host) {
        let Some(path) = host.query(".infinity-symbol path") else {
            return;
        };
        let Some(length) = host.path_length(path) else {
            return;
        };
        host.animate_to(
            &Target::Element(path),
            &Props::new()
                .with(Prop::StrokeDasharray, length)
                .with(Prop::StrokeDashoffset, length),
            &TweenOptions::immediate(),
        );
        self.infinity_path = Some(path);
        if let Some(section) = host.query(".philosophy-section") {
            host.observe_scroll_trigger(
                &ScrollTrigger::new(section, "top 60%").once_on_enter(Callback::InfinityEnter),
            );
        }
    }

    /// Draw the infinity stroke.
    pub fn on_infinity_enter(&self, host: &mut dyn Host) {
        if let Some(path) = self.infinity_path {
            host.animate_to(
                &Target::Element(path),
                &Props::new().with(Prop::StrokeDashoffset, 0.0),
                &TweenOptions::new(2.0, Ease::Power2InOut),
            );
        }
    }
}

fn bind_card_hovers(host: &mut dyn Host) {
    for card in host.query_all(".work-card") {
        if let Some(image) = host.query_one_within(card, ".work-image img, .work-video video") {
            let effect = HoverEffect::Parallax { image };
            host.bind(Binding::on(card, DomEvent::PointerMove, Action::Hover(effect, HoverPhase::Move)));
            host.bind(Binding::on(card, DomEvent::PointerLeave, Action::Hover(effect, HoverPhase::Leave)));
        }
    }
    for card in host.query_all(".project-card") {
        let effect = HoverEffect::Tilt(card);
        host.bind(Binding::on(card, DomEvent::PointerMove, Action::Hover(effect, HoverPhase::Move)));
        host.bind(Binding::on(card, DomEvent::PointerLeave, Action::Hover(effect, HoverPhase::Leave)));
    }
}

fn init_image_decorations(host: &mut dyn Host) {
    let Some(container) = host.query(".about-hero-image .image-container") else {
        return;
    };
    for (selector, shift) in [(".image-decoration-1", -50.0), (".image-decoration-2", 50.0)] {
        if let Some(decoration) = host.query(selector) {
            host.animate_to(
                &Target::Element(decoration),
                &Props::new().with(Prop::Y, shift),
                &TweenOptions::new(0.5, Ease::None).triggered_by(
                    ScrollTrigger::new(container, "top bottom").scrubbed("bottom top", 1.0),
                ),
            );
        }
    }
}

fn init_floating_shapes(host: &mut dyn Host, rng: &mut SmallRng) {
    for (i, shape) in host.query_all(".floating-shape").into_iter().enumerate() {
        host.animate_to(
            &Target::Element(shape),
            &Props::new()
                .with(Prop::Y, rng.gen_range(-30.0..=30.0))
                .with(Prop::X, rng.gen_range(-20.0..=20.0))
                .with(Prop::Rotation, rng.gen_range(-15.0..=15.0)),
            &TweenOptions::new(rng.gen_range(3.0..=6.0), Ease::SineInOut)
                .repeat_forever()
                .yoyo()
                .delay(i as f64 * 0.5),
        );
    }
}

fn init_marquees(host: &mut dyn Host) {
    for marquee in host.query_all(".marquee-content") {
        let speed = host
            .attribute(marquee, "data-speed")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|s| *s > 0.0)
            .unwrap_or(20.0);
        host.animate_to(
            &Target::Element(marquee),
            &Props::new().with(Prop::XPercent, -50.0),
            &TweenOptions::new(speed, Ease::None).repeat_forever(),
        );
    }
}

/// Split `[data-splitting]` headings into characters and reveal them on scroll.
pub fn init_split_text(host: &mut dyn Host) {
    for el in host.query_all("[data-splitting]") {
        let chars = host.split_into_characters(el);
        if chars.is_empty() {
            continue;
        }
        host.animate_from_to(
            &Target::Elements(chars),
            &Props::new()
                .with(Prop::Y, 100.0)
                .with(Prop::Opacity, 0.0)
                .with(Prop::RotateX, -90.0),
            &Props::new()
                .with(Prop::Y, 0.0)
                .with(Prop::Opacity, 1.0)
                .with(Prop::RotateX, 0.0),
            &TweenOptions::new(0.8, Ease::BackOut)
                .stagger(0.02)
                .triggered_by(ScrollTrigger::new(el, "top 85%")),
        );
    }
}

/// Effects the page wires at load regardless of Ready: scroll parallax,
/// magnetic buttons and section scroll indicators.
pub fn init_ambient(host: &mut dyn Host) {
    for el in host.query_all(".parallax") {
        host.animate_to(
            &Target::Element(el),
            &Props::new().with(Prop::YPercent, -20.0),
            &TweenOptions::new(0.5, Ease::None)
                .triggered_by(ScrollTrigger::new(el, "top bottom").scrubbed("bottom top", 1.0)),
        );
    }
    for button in host.query_all(".btn-primary, .btn-large") {
        let effect = HoverEffect::Magnetic(button);
        host.bind(Binding::on(button, DomEvent::PointerMove, Action::Hover(effect, HoverPhase::Move)));
        host.bind(Binding::on(button, DomEvent::PointerLeave, Action::Hover(effect, HoverPhase::Leave)));
    }
    for indicator in host.query_all(".scroll-indicator, .header-scroll-indicator") {
        host.bind(Binding::on(indicator, DomEvent::Click, Action::ScrollIndicator(indicator)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(1)
    }

    #[test]
    fn init_runs_once() {
        let mut host = RecordingHost::new();
        host.register(".reveal");
        let mut page = PageAnimations::new();

        assert!(page.init(&mut host, &mut rng()));
        let after_first = host.tweens.len();
        assert_eq!(after_first, 1);

        assert!(!page.init(&mut host, &mut rng()));
        assert_eq!(host.tweens.len(), after_first);
    }

    #[test]
    fn timeline_alternates_sides() {
        let mut host = RecordingHost::new();
        let items = host.elements(3);
        host.register_all(".timeline-item", &items);

        PageAnimations::new().init(&mut host, &mut rng());
        let xs: Vec<f64> = host
            .tweens
            .iter()
            .filter_map(|t| t.from.as_ref().and_then(|f| f.number(Prop::X)))
            .collect();
        assert_eq!(xs, vec![-50.0, 50.0, -50.0]);
    }

    #[test]
    fn work_cards_get_indexed_delay_and_parallax() {
        let mut host = RecordingHost::new();
        let cards = host.elements(2);
        host.register_all(".work-card", &cards);
        let image = host.element();
        host.register_within(cards[1], ".work-image img, .work-video video", &[image]);

        PageAnimations::new().init(&mut host, &mut rng());
        assert_eq!(host.tweens[0].options.delay, None);
        assert_eq!(host.tweens[1].options.delay, Some(0.15));

        let hover_targets: Vec<_> = host.bindings.iter().map(|b| b.action).collect();
        assert_eq!(
            hover_targets,
            vec![
                Action::Hover(HoverEffect::Parallax { image }, HoverPhase::Move),
                Action::Hover(HoverEffect::Parallax { image }, HoverPhase::Leave),
            ]
        );
    }

    #[test]
    fn skill_bars_reset_then_grow_on_enter() {
        let mut host = RecordingHost::new();
        let bar = host.register(".skill-bar span");
        host.set_style_value(bar, "width", "85%");
        let mut page = PageAnimations::new();
        page.init(&mut host, &mut rng());

        assert_eq!(host.style(bar, "width").as_deref(), Some("0%"));
        assert_eq!(host.triggers.len(), 1);
        assert_eq!(host.triggers[0].on_enter, Some(Callback::SkillBarEnter { index: 0 }));
        assert!(host.triggers[0].once);

        page.on_skill_bar_enter(&mut host, 0);
        let grow = host.tweens.last().unwrap();
        assert_eq!(grow.to.get(Prop::Width), Some(&crate::effects::PropValue::Text("85%".into())));
    }

    #[test]
    fn infinity_symbol_primes_and_draws() {
        let mut host = RecordingHost::new();
        let path = host.register(".infinity-symbol path");
        host.set_path_length(path, 420.0);
        host.register(".philosophy-section");
        let mut page = PageAnimations::new();
        page.init(&mut host, &mut rng());

        assert_eq!(host.tweens[0].to.number(Prop::StrokeDashoffset), Some(420.0));
        assert_eq!(host.triggers[0].on_enter, Some(Callback::InfinityEnter));

        page.on_infinity_enter(&mut host);
        assert_eq!(host.tweens.last().unwrap().to.number(Prop::StrokeDashoffset), Some(0.0));
    }

    #[test]
    fn marquee_speed_defaults_to_twenty() {
        let mut host = RecordingHost::new();
        let fast = host.element();
        let plain = host.element();
        host.register_all(".marquee-content", &[fast, plain]);
        host.set_attribute(fast, "data-speed", "12");

        PageAnimations::new().init(&mut host, &mut rng());
        let durations: Vec<f64> = host.tweens.iter().map(|t| t.options.duration).collect();
        assert_eq!(durations, vec![12.0, 20.0]);
        assert!(host.tweens.iter().all(|t| t.options.repeat == Some(-1)));
    }

    #[test]
    fn hero_children_stagger_in_without_trigger() {
        let mut host = RecordingHost::new();
        let hero = host.register(
            ".hero-content, .about-hero-content, .curiosity-hero-content, .page-header-content",
        );
        let lines = host.elements(3);
        host.set_children(hero, &lines);

        PageAnimations::new().init(&mut host, &mut rng());
        assert_eq!(host.tweens.len(), 1);
        let tween = &host.tweens[0];
        assert_eq!(tween.target, Target::Elements(lines));
        assert_eq!(tween.from.as_ref().and_then(|f| f.number(Prop::Y)), Some(60.0));
        assert_eq!(tween.options.stagger, Some(0.15));
        assert_eq!(tween.options.delay, Some(0.5));
        assert!(tween.options.scroll_trigger.is_none());
    }

    #[test]
    fn card_grid_children_reveal_on_parent_trigger() {
        let mut host = RecordingHost::new();
        let grids = host.elements(2);
        host.register_all(
            ".questions-grid, .values-grid, .highlights-grid, .exploration-areas",
            &grids,
        );
        let cards = host.elements(3);
        host.set_children(grids[0], &cards);

        PageAnimations::new().init(&mut host, &mut rng());
        // The empty grid is skipped.
        assert_eq!(host.tweens.len(), 1);
        let tween = &host.tweens[0];
        assert_eq!(tween.target, Target::Elements(cards));
        assert_eq!(tween.options.stagger, Some(0.1));
        let trigger = tween.options.scroll_trigger.as_ref().unwrap();
        assert_eq!(trigger.trigger, grids[0]);
        assert_eq!(trigger.start, "top 80%");
    }

    #[test]
    fn floating_shapes_stay_in_range() {
        let mut host = RecordingHost::new();
        let shapes = host.elements(4);
        host.register_all(".floating-shape", &shapes);
        PageAnimations::new().init(&mut host, &mut rng());

        for tween in &host.tweens {
            assert!(tween.to.number(Prop::Y).unwrap().abs() <= 30.0);
            assert!(tween.to.number(Prop::X).unwrap().abs() <= 20.0);
            assert!((3.0..=6.0).contains(&tween.options.duration));
            assert!(tween.options.yoyo);
        }
    }

    #[test]
    fn split_text_skips_when_splitter_returns_nothing() {
        let mut host = RecordingHost::new();
        let heading = host.register("[data-splitting]");
        init_split_text(&mut host);
        assert!(host.tweens.is_empty());

        let chars = host.elements(5);
        host.set_split(heading, &chars);
        init_split_text(&mut host);
        assert_eq!(host.tweens.len(), 1);
        assert_eq!(host.tweens[0].target, Target::Elements(chars));
    }

    #[test]
    fn ambient_binds_magnetic_buttons_and_indicators() {
        let mut host = RecordingHost::new();
        let button = host.register(".btn-primary, .btn-large");
        let indicator = host.register(".scroll-indicator, .header-scroll-indicator");
        init_ambient(&mut host);

        assert!(host.bindings.contains(&Binding::on(
            button,
            DomEvent::PointerLeave,
            Action::Hover(HoverEffect::Magnetic(button), HoverPhase::Leave)
        )));
        assert!(host.bindings.contains(&Binding::on(
            indicator,
            DomEvent::Click,
            Action::ScrollIndicator(indicator)
        )));
    }
}
