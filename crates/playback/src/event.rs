//! Outbound notifications and the listener registry.

use std::panic::{AssertUnwindSafe, catch_unwind};

use kinematics::MotionKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The model's own end condition (landing, rest, or duration).
    Analytic,
    /// The object's footprint reached the edge of the surface.
    Boundary,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Analytic => "analytic",
            Self::Boundary => "boundary",
        })
    }
}

/// Something observable happened to the animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A description was loaded. `warning` is set when the subtype was
    /// unknown and the projectile model was used instead.
    Loaded {
        subtype: MotionKind,
        warning: Option<String>,
    },
    Played,
    Paused,
    Reset,
    Stepped { time: f64 },
    /// A solution step's window started playing.
    StepActivated {
        index: usize,
        title: String,
        window: (f64, f64),
    },
    /// Segment playback reached the end of its window and paused.
    SegmentCompleted { time: f64 },
    Ended { time: f64, reason: EndReason },
}

/// Identifier for a subscribed listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(u64);

type Callback = Box<dyn Fn(&Event)>;

/// Listeners called synchronously, in subscription order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Callback)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: Fn(&Event) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        debug!(listener.id = id.0, "Listener subscribed");
        id
    }

    /// Removes a listener. Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        let removed = self.entries.len() != before;
        if removed {
            debug!(listener.id = id.0, "Listener unsubscribed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `event` to every listener. A panicking listener is logged
    /// and skipped.
    pub fn emit(&self, event: &Event) {
        for (id, callback) in &self.entries {
            if catch_unwind(AssertUnwindSafe(|| callback(event))).is_err() {
                warn!(listener.id = id.0, ?event, "Listener panicked");
            }
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_emit_unsubscribe() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        let sink = Rc::clone(&seen);
        let id = listeners.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        listeners.emit(&Event::Played);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&Event::Paused);

        assert_eq!(*seen.borrow(), vec![Event::Played]);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();
        listeners.subscribe(|_| panic!("listener failure"));
        let counter = Rc::clone(&count);
        listeners.subscribe(move |_| *counter.borrow_mut() += 1);

        listeners.emit(&Event::Reset);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(Event::Ended {
            time: 2.0,
            reason: EndReason::Boundary,
        })
        .unwrap();
        assert_eq!(json["event"], "ended");
        assert_eq!(json["reason"], "boundary");
    }
}
