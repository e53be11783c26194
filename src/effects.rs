// Effect requests: the vocabulary this crate speaks to the tweening engine.
// Requests are fire-and-forget; completions come back as `Callback` values.

use serde_json::{Map, Value};

use crate::types::{ElementId, TimerTicket};

/// Animatable property, named as the tweening engine expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prop {
    X,
    Y,
    Opacity,
    RotateX,
    RotateY,
    Rotation,
    Scale,
    ScaleY,
    Width,
    XPercent,
    YPercent,
    StrokeDasharray,
    StrokeDashoffset,
}

impl Prop {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prop::X => "x",
            Prop::Y => "y",
            Prop::Opacity => "opacity",
            Prop::RotateX => "rotateX",
            Prop::RotateY => "rotateY",
            Prop::Rotation => "rotation",
            Prop::Scale => "scale",
            Prop::ScaleY => "scaleY",
            Prop::Width => "width",
            Prop::XPercent => "xPercent",
            Prop::YPercent => "yPercent",
            Prop::StrokeDasharray => "strokeDasharray",
            Prop::StrokeDashoffset => "strokeDashoffset",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Number(f64),
    Text(String),
}

impl PropValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            PropValue::Text(_) => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            PropValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            PropValue::Text(s) => Value::String(s.clone()),
        }
    }
}

/// Ordered property deltas for one tween.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Props(Vec<(Prop, PropValue)>);

impl Props {
    pub fn new() -> Self {
        Props(Vec::new())
    }

    pub fn from_pairs(pairs: &[(Prop, f64)]) -> Self {
        Props(
            pairs
                .iter()
                .map(|(p, v)| (*p, PropValue::Number(*v)))
                .collect(),
        )
    }

    pub fn with(mut self, prop: Prop, value: f64) -> Self {
        self.set(prop, PropValue::Number(value));
        self
    }

    pub fn with_text(mut self, prop: Prop, value: impl Into<String>) -> Self {
        self.set(prop, PropValue::Text(value.into()));
        self
    }

    fn set(&mut self, prop: Prop, value: PropValue) {
        match self.0.iter_mut().find(|(p, _)| *p == prop) {
            Some(slot) => slot.1 = value,
            None => self.0.push((prop, value)),
        }
    }

    pub fn get(&self, prop: Prop) -> Option<&PropValue> {
        self.0.iter().find(|(p, _)| *p == prop).map(|(_, v)| v)
    }

    pub fn number(&self, prop: Prop) -> Option<f64> {
        self.get(prop).and_then(PropValue::as_number)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json_map(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(p, v)| (p.as_str().to_string(), v.to_json()))
            .collect()
    }
}

/// Easing curves used by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    None,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    Power4Out,
    BackOut,
    ElasticOut,
    SineInOut,
}

impl Ease {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ease::None => "none",
            Ease::Power2Out => "power2.out",
            Ease::Power2InOut => "power2.inOut",
            Ease::Power3In => "power3.in",
            Ease::Power3Out => "power3.out",
            Ease::Power3InOut => "power3.inOut",
            Ease::Power4Out => "power4.out",
            Ease::BackOut => "back.out(1.7)",
            Ease::ElasticOut => "elastic.out(1, 0.5)",
            Ease::SineInOut => "sine.inOut",
        }
    }
}

/// One-shot completions routed back into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callback {
    LoaderProgressDone,
    LoaderHidden,
    MenuClosed { generation: u32 },
    ResizeSettled(TimerTicket),
    SkillBarEnter { index: usize },
    InfinityEnter,
}

/// Scroll-linked trigger configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrigger {
    pub trigger: ElementId,
    pub start: &'static str,
    pub end: Option<&'static str>,
    pub scrub: Option<f64>,
    pub once: bool,
    pub on_enter: Option<Callback>,
}

impl ScrollTrigger {
    pub fn new(trigger: ElementId, start: &'static str) -> Self {
        ScrollTrigger {
            trigger,
            start,
            end: None,
            scrub: None,
            once: false,
            on_enter: None,
        }
    }

    pub fn scrubbed(mut self, end: &'static str, scrub: f64) -> Self {
        self.end = Some(end);
        self.scrub = Some(scrub);
        self
    }

    pub fn once_on_enter(mut self, callback: Callback) -> Self {
        self.once = true;
        self.on_enter = Some(callback);
        self
    }

    /// Plain vars for the trigger. The element and `onEnter` are attached by the host.
    pub fn to_vars(&self) -> Map<String, Value> {
        let mut vars = Map::new();
        vars.insert("start".into(), Value::String(self.start.to_string()));
        if let Some(end) = self.end {
            vars.insert("end".into(), Value::String(end.to_string()));
        }
        match self.scrub {
            Some(scrub) => {
                vars.insert("scrub".into(), PropValue::Number(scrub).to_json());
            }
            None if self.on_enter.is_none() => {
                vars.insert(
                    "toggleActions".into(),
                    Value::String("play none none none".into()),
                );
            }
            None => {}
        }
        if self.once {
            vars.insert("once".into(), Value::Bool(true));
        }
        vars
    }
}

/// Timing and sequencing for one tween.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenOptions {
    pub duration: f64,
    pub ease: Ease,
    pub stagger: Option<f64>,
    pub delay: Option<f64>,
    pub repeat: Option<i32>,
    pub yoyo: bool,
    pub scroll_trigger: Option<ScrollTrigger>,
    pub on_complete: Option<Callback>,
}

impl TweenOptions {
    pub fn new(duration: f64, ease: Ease) -> Self {
        TweenOptions {
            duration,
            ease,
            stagger: None,
            delay: None,
            repeat: None,
            yoyo: false,
            scroll_trigger: None,
            on_complete: None,
        }
    }

    /// Zero-duration set, applied on the next tick.
    pub fn immediate() -> Self {
        TweenOptions::new(0.0, Ease::None)
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = if delay > 0.0 { Some(delay) } else { None };
        self
    }

    pub fn repeat_forever(mut self) -> Self {
        self.repeat = Some(-1);
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn triggered_by(mut self, trigger: ScrollTrigger) -> Self {
        self.scroll_trigger = Some(trigger);
        self
    }

    pub fn on_complete(mut self, callback: Callback) -> Self {
        self.on_complete = Some(callback);
        self
    }

    /// Merge destination props and timing into one vars object.
    /// Element references and callbacks are left for the host to attach.
    pub fn to_vars(&self, props: &Props) -> Map<String, Value> {
        let mut vars = props.to_json_map();
        vars.insert("duration".into(), PropValue::Number(self.duration).to_json());
        vars.insert("ease".into(), Value::String(self.ease.as_str().into()));
        if let Some(stagger) = self.stagger {
            vars.insert("stagger".into(), PropValue::Number(stagger).to_json());
        }
        if let Some(delay) = self.delay {
            vars.insert("delay".into(), PropValue::Number(delay).to_json());
        }
        if let Some(repeat) = self.repeat {
            vars.insert("repeat".into(), Value::from(repeat));
        }
        if self.yoyo {
            vars.insert("yoyo".into(), Value::Bool(true));
        }
        if let Some(trigger) = &self.scroll_trigger {
            vars.insert("scrollTrigger".into(), Value::Object(trigger.to_vars()));
        }
        vars
    }
}

/// What a tween acts on.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Element(ElementId),
    Elements(Vec<ElementId>),
}

impl Target {
    pub fn is_empty(&self) -> bool {
        matches!(self, Target::Elements(els) if els.is_empty())
    }

    pub fn elements(&self) -> Vec<ElementId> {
        match self {
            Target::Element(el) => vec![*el],
            Target::Elements(els) => els.clone(),
        }
    }
}

/// Capabilities consumed from the tweening engine.
pub trait Animator {
    fn animate_to(&mut self, target: &Target, to: &Props, options: &TweenOptions);

    fn animate_from_to(&mut self, target: &Target, from: &Props, to: &Props, options: &TweenOptions);

    fn observe_scroll_trigger(&mut self, trigger: &ScrollTrigger);

    fn refresh_scroll_observers(&mut self);

    /// Smoothly scroll the window so `target` sits `offset_y` px below the top.
    fn scroll_window_to(&mut self, target: ElementId, offset_y: f64, options: &TweenOptions);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn props_overwrite_existing_entries() {
        let props = Props::new().with(Prop::Y, 50.0).with(Prop::Y, 0.0).with(Prop::Opacity, 1.0);
        assert_eq!(props.number(Prop::Y), Some(0.0));
        assert_eq!(props.to_json_map().len(), 2);
    }

    #[test]
    fn vars_carry_timing_and_props() {
        let options = TweenOptions::new(0.6, Ease::BackOut).stagger(0.1).delay(0.3);
        let vars = options.to_vars(&Props::new().with(Prop::Y, 0.0).with_text(Prop::Width, "100%"));

        assert_eq!(vars["y"], Value::from(0.0));
        assert_eq!(vars["width"], Value::from("100%"));
        assert_eq!(vars["ease"], Value::from("back.out(1.7)"));
        assert_eq!(vars["stagger"], Value::from(0.1));
        assert_eq!(vars["delay"], Value::from(0.3));
        assert!(!vars.contains_key("repeat"));
    }

    #[test]
    fn zero_delay_is_omitted() {
        let vars = TweenOptions::new(1.0, Ease::None).delay(0.0).to_vars(&Props::new());
        assert!(!vars.contains_key("delay"));
    }

    #[test]
    fn reveal_trigger_plays_once_forward() {
        let trigger = ScrollTrigger::new(ElementId::new(3), "top 85%");
        let vars = trigger.to_vars();
        assert_eq!(vars["start"], Value::from("top 85%"));
        assert_eq!(vars["toggleActions"], Value::from("play none none none"));
        assert!(!vars.contains_key("once"));
    }

    #[test]
    fn scrubbed_trigger_has_range_and_no_toggle_actions() {
        let trigger = ScrollTrigger::new(ElementId::new(1), "top bottom").scrubbed("bottom top", 1.0);
        let vars = trigger.to_vars();
        assert_eq!(vars["end"], Value::from("bottom top"));
        assert_eq!(vars["scrub"], Value::from(1.0));
        assert!(!vars.contains_key("toggleActions"));
    }

    #[test]
    fn empty_target_detected() {
        assert!(Target::Elements(Vec::new()).is_empty());
        assert!(!Target::Element(ElementId::new(0)).is_empty());
    }
}
