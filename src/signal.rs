// One-shot notification channel. Subscribers register before the signal fires;
// `emit` hands them out exactly once, later emits return nothing.

#[derive(Debug)]
pub struct ReadySignal<T> {
    subscribers: Vec<T>,
    fired: bool,
}

impl<T> ReadySignal<T> {
    pub fn new() -> Self {
        ReadySignal {
            subscribers: Vec::new(),
            fired: false,
        }
    }

    /// Register a subscriber. Returns `false` if the signal already fired,
    /// in which case the subscriber is dropped.
    pub fn subscribe(&mut self, subscriber: T) -> bool {
        if self.fired {
            return false;
        }
        self.subscribers.push(subscriber);
        true
    }

    /// Fire the signal, draining subscribers in registration order.
    pub fn emit(&mut self) -> Vec<T> {
        if self.fired {
            return Vec::new();
        }
        self.fired = true;
        std::mem::take(&mut self.subscribers)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

impl<T> Default for ReadySignal<T> {
    fn default() -> Self {
        Self::new()
    }
}
