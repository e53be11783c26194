// Intro loader: staggered title, progress bar, fade-out, then Ready.
// Each stage chains through an explicit completion callback; there is no timeout.

use tracing::debug;

use crate::effects::{Callback, Ease, Prop, Props, Target, TweenOptions};
use crate::host::Host;
use crate::types::{ClassName, ElementId, LoadState};

pub struct LoaderElements {
    pub root: ElementId,
    pub progress: Option<ElementId>,
    pub text_spans: Vec<ElementId>,
}

impl LoaderElements {
    pub fn query(host: &mut dyn Host) -> Option<Self> {
        let root = host.query(".loader")?;
        let progress = host.query(".loader-progress");
        let text_spans = match host.query(".loader-text") {
            Some(text) => host.query_within(text, "span"),
            None => Vec::new(),
        };
        Some(LoaderElements {
            root,
            progress,
            text_spans,
        })
    }
}

/// Drives `LoadState` from `Loading` to `Ready`.
pub struct LoaderSequencer {
    elements: LoaderElements,
    state: LoadState,
}

impl LoaderSequencer {
    pub fn new(elements: LoaderElements) -> Self {
        LoaderSequencer {
            elements,
            state: LoadState::Loading,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Begin the intro. Only acts from `Loading`.
    pub fn start(&mut self, host: &mut dyn Host) {
        if self.state != LoadState::Loading {
            return;
        }
        self.state = LoadState::Revealing;
        debug!("loader revealing");

        if !self.elements.text_spans.is_empty() {
            host.animate_from_to(
                &Target::Elements(self.elements.text_spans.clone()),
                &Props::new()
                    .with(Prop::Y, 50.0)
                    .with(Prop::Opacity, 0.0)
                    .with(Prop::RotateX, -90.0),
                &Props::new()
                    .with(Prop::Y, 0.0)
                    .with(Prop::Opacity, 1.0)
                    .with(Prop::RotateX, 0.0),
                &TweenOptions::new(0.6, Ease::BackOut).stagger(0.1),
            );
        }

        match self.elements.progress {
            Some(progress) => host.animate_to(
                &Target::Element(progress),
                &Props::new().with_text(Prop::Width, "100%"),
                &TweenOptions::new(1.5, Ease::Power2InOut).on_complete(Callback::LoaderProgressDone),
            ),
            None => self.on_progress_complete(host),
        }
    }

    /// Progress bar filled: fade the loader out.
    pub fn on_progress_complete(&mut self, host: &mut dyn Host) {
        if self.state != LoadState::Revealing {
            return;
        }
        host.animate_to(
            &Target::Element(self.elements.root),
            &Props::new().with(Prop::Opacity, 0.0),
            &TweenOptions::new(0.5, Ease::Power2Out)
                .delay(0.3)
                .on_complete(Callback::LoaderHidden),
        );
    }

    /// `Revealing -> Ready`, at most once. Returns whether this call made the transition.
    pub fn on_intro_complete(&mut self, host: &mut dyn Host) -> bool {
        if self.state != LoadState::Revealing {
            return false;
        }
        self.state = LoadState::Ready;
        host.set_style(self.elements.root, "display", "none");
        if let Some(body) = host.body() {
            host.set_class(body, ClassName::Loaded, true);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;

    fn loader_page() -> (RecordingHost, ElementId, ElementId) {
        let mut host = RecordingHost::new();
        let root = host.register(".loader");
        let progress = host.register(".loader-progress");
        let text = host.register(".loader-text");
        let spans = host.elements(3);
        host.register_within(text, "span", &spans);
        (host, root, progress)
    }

    #[test]
    fn start_requests_intro_and_progress() {
        let (mut host, _, progress) = loader_page();
        let mut loader = LoaderSequencer::new(LoaderElements::query(&mut host).unwrap());

        loader.start(&mut host);
        assert_eq!(loader.state(), LoadState::Revealing);
        assert_eq!(host.tweens.len(), 2);

        let bar = host.tweens.last().unwrap();
        assert_eq!(bar.target, Target::Element(progress));
        assert_eq!(bar.options.on_complete, Some(Callback::LoaderProgressDone));
    }

    #[test]
    fn progress_completion_fades_loader() {
        let (mut host, root, _) = loader_page();
        let mut loader = LoaderSequencer::new(LoaderElements::query(&mut host).unwrap());
        loader.start(&mut host);
        loader.on_progress_complete(&mut host);

        let fade = host.tweens.last().unwrap();
        assert_eq!(fade.target, Target::Element(root));
        assert_eq!(fade.options.delay, Some(0.3));
        assert_eq!(fade.options.on_complete, Some(Callback::LoaderHidden));
    }

    #[test]
    fn intro_completes_once() {
        let (mut host, root, _) = loader_page();
        let mut loader = LoaderSequencer::new(LoaderElements::query(&mut host).unwrap());
        loader.start(&mut host);

        assert!(loader.on_intro_complete(&mut host));
        assert!(!loader.on_intro_complete(&mut host));
        assert_eq!(loader.state(), LoadState::Ready);
        assert_eq!(host.style(root, "display").as_deref(), Some("none"));
        let body = host.body_id();
        assert!(host.has_class(body, ClassName::Loaded));
    }

    #[test]
    fn intro_complete_before_start_is_ignored() {
        let (mut host, _, _) = loader_page();
        let mut loader = LoaderSequencer::new(LoaderElements::query(&mut host).unwrap());
        assert!(!loader.on_intro_complete(&mut host));
        assert_eq!(loader.state(), LoadState::Loading);
    }

    #[test]
    fn missing_progress_bar_goes_straight_to_fade() {
        let mut host = RecordingHost::new();
        let root = host.register(".loader");
        let mut loader = LoaderSequencer::new(LoaderElements::query(&mut host).unwrap());

        loader.start(&mut host);
        assert_eq!(host.tweens.len(), 1);
        assert_eq!(host.tweens[0].target, Target::Element(root));
        assert_eq!(host.tweens[0].options.on_complete, Some(Callback::LoaderHidden));
    }

    #[test]
    fn no_loader_element_means_no_sequencer() {
        let mut host = RecordingHost::new();
        assert!(LoaderElements::query(&mut host).is_none());
    }
}
