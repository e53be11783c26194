// Video playback watcher. Mirrors the media element's own play/pause/ended
// notifications into the wrapper's `playing` class; it never pauses anything.

use crate::host::Host;
use crate::types::{ClassName, ElementId, MediaEvent, PlaybackState};

pub struct VideoWatcher {
    wrapper: ElementId,
    video: ElementId,
    play_button: ElementId,
    state: PlaybackState,
}

impl VideoWatcher {
    /// One watcher per `.video-wrapper` that has both a video and a play button.
    pub fn query_all(host: &mut dyn Host) -> Vec<Self> {
        let wrappers = host.query_all(".video-wrapper");
        let mut watchers = Vec::with_capacity(wrappers.len());
        for wrapper in wrappers {
            let Some(video) = host.query_one_within(wrapper, "video") else {
                continue;
            };
            let Some(play_button) = host.query_one_within(wrapper, ".play-btn") else {
                continue;
            };
            watchers.push(VideoWatcher::new(wrapper, video, play_button));
        }
        watchers
    }

    pub fn new(wrapper: ElementId, video: ElementId, play_button: ElementId) -> Self {
        VideoWatcher {
            wrapper,
            video,
            play_button,
            state: PlaybackState::Paused,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn video(&self) -> ElementId {
        self.video
    }

    pub fn play_button(&self) -> ElementId {
        self.play_button
    }

    /// Custom play control pressed. The caller stops the click from bubbling.
    pub fn on_play_button_activated(&self, host: &mut dyn Host) {
        host.play_media(self.video);
    }

    pub fn on_media_event(&mut self, host: &mut dyn Host, event: MediaEvent) {
        self.state = match event {
            MediaEvent::Play => PlaybackState::Playing,
            MediaEvent::Pause => PlaybackState::Paused,
            MediaEvent::Ended => PlaybackState::Ended,
        };
        host.set_class(self.wrapper, ClassName::Playing, self.is_playing());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;

    fn video_page() -> (RecordingHost, ElementId, ElementId) {
        let mut host = RecordingHost::new();
        let wrapper = host.register(".video-wrapper");
        let video = host.element();
        let button = host.element();
        host.register_within(wrapper, "video", &[video]);
        host.register_within(wrapper, ".play-btn", &[button]);
        (host, wrapper, video)
    }

    #[test]
    fn play_then_pause_mirrors_flag() {
        let (mut host, wrapper, video) = video_page();
        let mut watchers = VideoWatcher::query_all(&mut host);
        assert_eq!(watchers.len(), 1);
        let watcher = &mut watchers[0];
        assert_eq!(watcher.video(), video);

        watcher.on_media_event(&mut host, MediaEvent::Play);
        assert!(host.has_class(wrapper, ClassName::Playing));

        watcher.on_media_event(&mut host, MediaEvent::Pause);
        assert!(!host.has_class(wrapper, ClassName::Playing));
        assert_eq!(watcher.state(), PlaybackState::Paused);
        assert!(host.played.is_empty());
    }

    #[test]
    fn ended_clears_flag() {
        let (mut host, wrapper, _) = video_page();
        let mut watchers = VideoWatcher::query_all(&mut host);
        watchers[0].on_media_event(&mut host, MediaEvent::Play);
        watchers[0].on_media_event(&mut host, MediaEvent::Ended);
        assert!(!host.has_class(wrapper, ClassName::Playing));
        assert_eq!(watchers[0].state(), PlaybackState::Ended);
    }

    #[test]
    fn play_button_requests_native_playback() {
        let (mut host, _, video) = video_page();
        let watchers = VideoWatcher::query_all(&mut host);
        watchers[0].on_play_button_activated(&mut host);
        assert_eq!(host.played, vec![video]);
    }

    #[test]
    fn wrapper_without_button_is_skipped() {
        let mut host = RecordingHost::new();
        let wrapper = host.register(".video-wrapper");
        let video = host.element();
        host.register_within(wrapper, "video", &[video]);
        assert!(VideoWatcher::query_all(&mut host).is_empty());
    }
}
