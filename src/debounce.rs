// Trailing-edge debouncer for resize bursts. Every trigger re-arms the quiet period
// by issuing a fresh ticket; only the newest ticket settles.

use crate::types::TimerTicket;

#[derive(Debug, Default)]
pub struct Debouncer {
    latest: u32,
    pending: bool,
}

impl Debouncer {
    pub fn new() -> Self {
        Debouncer::default()
    }

    /// Start (or restart) the quiet period.
    pub fn trigger(&mut self) -> TimerTicket {
        self.latest = self.latest.wrapping_add(1);
        self.pending = true;
        TimerTicket::new(self.latest)
    }

    /// Timer for `ticket` expired. True only for the trailing trigger, once.
    pub fn settle(&mut self, ticket: TimerTicket) -> bool {
        if self.pending && ticket.as_u32() == self.latest {
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
