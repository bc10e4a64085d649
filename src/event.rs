use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

/// Poll-based event source for the render loop. Keys return as they
/// arrive; a quiet interval yields a Tick. The optional wake deadline
/// shortens the wait so a due pending action fires on time rather than
/// at the next whole tick.
pub struct EventPoller {
    tick_rate: Duration,
    last_tick: Instant,
}

impl EventPoller {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            last_tick: Instant::now(),
        }
    }

    fn timeout(&self, wake_at: Option<Instant>) -> Duration {
        let now = Instant::now();
        let until_tick = self.tick_rate.saturating_sub(now - self.last_tick);
        match wake_at {
            Some(due) => until_tick.min(due.saturating_duration_since(now)),
            None => until_tick,
        }
    }

    pub fn next(&mut self, wake_at: Option<Instant>) -> io::Result<AppEvent> {
        loop {
            if event::poll(self.timeout(wake_at))? {
                // Resize needs no handling of its own; every pass redraws
                if let Event::Key(key) = event::read()? {
                    return Ok(AppEvent::Key(key));
                }
            } else {
                self.last_tick = Instant::now();
                return Ok(AppEvent::Tick);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timeout_is_capped_by_the_tick_rate() {
        let poller = EventPoller::new(Duration::from_millis(100));
        assert!(poller.timeout(None) <= Duration::from_millis(100));
    }

    #[test]
    fn wake_deadline_shortens_the_wait() {
        let poller = EventPoller::new(Duration::from_secs(60));
        let soon = Instant::now() + Duration::from_millis(5);
        assert!(poller.timeout(Some(soon)) <= Duration::from_millis(5));
    }

    #[test]
    fn past_deadline_polls_without_blocking() {
        let poller = EventPoller::new(Duration::from_secs(60));
        let past = Instant::now() - Duration::from_millis(5);
        assert_eq!(poller.timeout(Some(past)), Duration::ZERO);
    }
}
