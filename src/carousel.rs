// Quick-links carousel: a bounded index over a fixed number of cards.
// No wraparound; programmatic jumps outside the range are rejected.

use crate::effects::{Ease, Prop, Props, Target, TweenOptions};
use crate::error::EngineError;
use crate::host::Host;
use crate::types::{ClassName, ElementId};

const DISABLED_OPACITY: &str = "0.3";
const ENABLED_OPACITY: &str = "1";

/// Index state. Invariant: `current < count` whenever `count > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
    count: usize,
}

/// Everything a render needs, computed from state plus one live measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselFrame {
    pub offset: f64,
    pub active_dot: usize,
    pub at_start: bool,
    pub at_end: bool,
}

impl Carousel {
    pub fn new(count: usize) -> Self {
        Carousel { current: 0, count }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Advance one card. Returns whether the index moved.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.count {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one card. Returns whether the index moved.
    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), EngineError> {
        if index >= self.count {
            return Err(EngineError::IndexOutOfRange {
                index,
                count: self.count,
            });
        }
        self.current = index;
        Ok(())
    }

    pub fn frame(&self, item_width: f64, gap: f64) -> CarouselFrame {
        CarouselFrame {
            offset: self.current as f64 * (item_width + gap),
            active_dot: self.current,
            at_start: self.current == 0,
            at_end: self.count == 0 || self.current == self.count - 1,
        }
    }
}

pub struct CarouselElements {
    pub track: ElementId,
    pub cards: Vec<ElementId>,
    pub prev: Option<ElementId>,
    pub next: Option<ElementId>,
    pub dots: Vec<ElementId>,
}

impl CarouselElements {
    /// Requires the carousel root, its track and at least one card.
    pub fn query(host: &mut dyn Host) -> Option<Self> {
        let root = host.query(".quick-links-carousel")?;
        let track = host.query_one_within(root, ".carousel-track")?;
        let cards = host.query_within(root, ".carousel-card");
        if cards.is_empty() {
            return None;
        }
        Some(CarouselElements {
            track,
            cards,
            prev: host.query_one_within(root, ".carousel-prev"),
            next: host.query_one_within(root, ".carousel-next"),
            dots: host.query_within(root, ".carousel-dot"),
        })
    }
}

pub struct CarouselController {
    elements: CarouselElements,
    state: Carousel,
    gap: f64,
}

impl CarouselController {
    pub fn new(elements: CarouselElements, gap: f64) -> Self {
        let state = Carousel::new(elements.cards.len());
        CarouselController {
            elements,
            state,
            gap,
        }
    }

    pub fn state(&self) -> &Carousel {
        &self.state
    }

    pub fn next(&mut self, host: &mut dyn Host) {
        if self.state.next() {
            self.render(host);
        }
    }

    pub fn prev(&mut self, host: &mut dyn Host) {
        if self.state.prev() {
            self.render(host);
        }
    }

    pub fn jump_to(&mut self, host: &mut dyn Host, index: usize) -> Result<(), EngineError> {
        self.state.jump_to(index)?;
        self.render(host);
        Ok(())
    }

    /// Re-measure and re-apply the current position. Safe to repeat.
    pub fn render(&self, host: &mut dyn Host) {
        let item_width = self
            .elements
            .cards
            .first()
            .map(|card| host.offset_width(*card))
            .unwrap_or(0.0);
        let frame = self.state.frame(item_width, self.gap);

        host.animate_to(
            &Target::Element(self.elements.track),
            &Props::new().with(Prop::X, -frame.offset),
            &TweenOptions::new(0.5, Ease::Power2Out),
        );

        for (i, dot) in self.elements.dots.iter().enumerate() {
            host.set_class(*dot, ClassName::Active, i == frame.active_dot);
        }
        if let Some(prev) = self.elements.prev {
            let opacity = if frame.at_start { DISABLED_OPACITY } else { ENABLED_OPACITY };
            host.set_style(prev, "opacity", opacity);
        }
        if let Some(next) = self.elements.next {
            let opacity = if frame.at_end { DISABLED_OPACITY } else { ENABLED_OPACITY };
            host.set_style(next, "opacity", opacity);
        }
    }
}
