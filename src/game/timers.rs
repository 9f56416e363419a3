use crate::core::{Side, Square};
use crate::display::scene::{EffectId, ElementId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Fixed delays in milliseconds. All of them must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Move start to placeholder restoration (and captured piece removal).
    pub settle: u64,
    pub capture_effect: u64,
    pub nudge: u64,
    pub game_over_notice: u64,
    /// Confirmed human move to the next AI check.
    pub human_to_ai: u64,
    /// AI move to the next AI move.
    pub ai_chain: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            settle: 300,
            capture_effect: 600,
            nudge: 100,
            game_over_notice: 500,
            human_to_ai: 500,
            ai_chain: 1000,
        }
    }
}

impl Timing {
    /// Raises zero delays to 1ms, returning the names of fields that were changed.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut fixed = Vec::new();
        for (name, value) in [
            ("settle", &mut self.settle),
            ("capture_effect", &mut self.capture_effect),
            ("nudge", &mut self.nudge),
            ("game_over_notice", &mut self.game_over_notice),
            ("human_to_ai", &mut self.human_to_ai),
            ("ai_chain", &mut self.ai_chain),
        ] {
            if *value == 0 {
                *value = 1;
                fixed.push(name);
            }
        }
        fixed
    }

    pub fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }
}

/// Deferred work owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    CheckAi,
    ClearNudge(ElementId),
    RemoveElement(ElementId),
    ExpireEffect(EffectId),
    Settle { from: Square, to: Square },
    GameOverNotice(Option<Side>),
}

#[derive(Debug, PartialEq, Eq)]
struct Scheduled {
    due: Duration,
    seq: u64,
    timer: Timer,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; earliest deadline first, then insertion order
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Deadline queue keyed on time elapsed since the controller started.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Scheduled>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, timer: Timer) {
        self.seq += 1;
        self.heap.push(Scheduled {
            due,
            seq: self.seq,
            timer,
        });
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|s| s.due)
    }

    /// Pops the earliest timer if it is due at `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, Timer)> {
        if self.heap.peek()?.due > now {
            return None;
        }
        self.heap.pop().map(|s| (s.due, s.timer))
    }

    pub fn contains(&self, timer: &Timer) -> bool {
        self.heap.iter().any(|s| &s.timer == timer)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
