// queue.rs — GoalQueue: pending goals ordered by priority.
//
// Selection always takes the highest priority first. Goals with equal
// priority come out in the order they were enqueued, so every entry carries
// a monotonically increasing sequence number that breaks ties.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::goal::RescueGoal;

/// Heap entry. Ordering: higher priority first, then lower sequence first.
#[derive(Debug)]
struct QueuedGoal {
    seq: u64,
    goal: RescueGoal,
}

impl PartialEq for QueuedGoal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedGoal {}

impl PartialOrd for QueuedGoal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedGoal {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the "greatest" entry pops first.
        self.goal
            .priority
            .cmp(&other.goal.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority queue of Pending goals.
///
/// A goal leaves the queue permanently once selected; nothing is ever
/// re-enqueued automatically.
#[derive(Debug, Default)]
pub struct GoalQueue {
    heap: BinaryHeap<QueuedGoal>,
    next_seq: u64,
}

impl GoalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a Pending goal.
    pub fn enqueue(&mut self, goal: RescueGoal) {
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::debug!(goal_id = %goal.goal_id, priority = goal.priority, seq, "goal enqueued");
        self.heap.push(QueuedGoal { seq, goal });
    }

    /// Remove the highest-priority goal (FIFO among equals) and mark it Active.
    pub fn select_next(&mut self) -> Option<RescueGoal> {
        let mut goal = self.heap.pop()?.goal;
        goal.activate();
        Some(goal)
    }

    /// The goal `select_next` would return, without removing it.
    #[cfg(test)]
    pub(crate) fn peek(&self) -> Option<&RescueGoal> {
        self.heap.peek().map(|entry| &entry.goal)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disaster::{DisasterEvent, DisasterKind, SensorReadings, Severity};
    use crate::goal::GoalStatus;

    fn goal(zone: &str, severity: Severity) -> RescueGoal {
        RescueGoal::from_event(DisasterEvent::new(
            zone,
            zone,
            DisasterKind::Earthquake,
            severity,
            SensorReadings {
                temperature: 25.0,
                water_level: 1.0,
                seismic_activity: 4.2,
            },
        ))
    }

    #[test]
    fn empty_queue_selects_nothing() {
        let mut queue = GoalQueue::new();
        assert!(queue.is_empty());
        assert!(queue.peek().is_none());
        assert!(queue.select_next().is_none());
    }

    #[test]
    fn selection_is_priority_max_with_fifo_tie_break() {
        let mut queue = GoalQueue::new();
        queue.enqueue(goal("p2", Severity::Moderate));
        queue.enqueue(goal("p4-first", Severity::Critical));
        queue.enqueue(goal("p4-second", Severity::Critical));
        queue.enqueue(goal("p1", Severity::Low));
        assert_eq!(queue.len(), 4);

        let order: Vec<(u8, String)> = std::iter::from_fn(|| queue.select_next())
            .map(|g| (g.priority, g.target_zone))
            .collect();

        assert_eq!(
            order,
            vec![
                (4, "p4-first".to_string()),
                (4, "p4-second".to_string()),
                (2, "p2".to_string()),
                (1, "p1".to_string()),
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn selected_goal_is_active() {
        let mut queue = GoalQueue::new();
        queue.enqueue(goal("Zone-A", Severity::High));
        assert_eq!(queue.peek().unwrap().status(), GoalStatus::Pending);

        let selected = queue.select_next().unwrap();
        assert_eq!(selected.status(), GoalStatus::Active);
        assert!(queue.is_empty());
    }

    #[test]
    fn fifo_holds_across_interleaved_enqueues() {
        let mut queue = GoalQueue::new();
        queue.enqueue(goal("a", Severity::High));
        queue.enqueue(goal("b", Severity::High));
        assert_eq!(queue.select_next().unwrap().target_zone, "a");

        queue.enqueue(goal("c", Severity::High));
        assert_eq!(queue.select_next().unwrap().target_zone, "b");
        assert_eq!(queue.select_next().unwrap().target_zone, "c");
    }
}
