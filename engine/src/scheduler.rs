use std::{cmp::Reverse, collections::BinaryHeap};

use crate::Instant;

/// Queue of delayed tasks.
///
/// Tasks due at the same instant come out in the order they were
/// scheduled.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    queue: BinaryHeap<Reverse<(Instant, u64, T)>>,
    seq: u64,
}

impl<T: Ord> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler {
            queue: Default::default(),
            seq: 0,
        }
    }
}

impl<T: Ord> Scheduler<T> {
    pub fn schedule(&mut self, at: Instant, task: T) {
        self.queue.push(Reverse((at, self.seq, task)));
        self.seq += 1;
    }

    /// Take the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<T> {
        match self.queue.peek() {
            Some(Reverse((at, _, _))) if *at <= now => {
                self.queue.pop().map(|Reverse((_, _, task))| task)
            }
            _ => None,
        }
    }

    /// Remove all scheduled tasks matching the predicate.
    ///
    /// Returns the number of tasks removed.
    pub fn cancel(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.queue.len();
        self.queue.retain(|Reverse((_, _, task))| !pred(task));
        before - self.queue.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.queue.peek().map(|Reverse((at, _, _))| *at)
    }

    pub fn contains(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        self.queue.iter().any(|Reverse((_, _, task))| pred(task))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn due_order() {
        let mut s = Scheduler::default();
        s.schedule(Instant(5), 'b');
        s.schedule(Instant(3), 'z');
        s.schedule(Instant(5), 'a');

        assert_eq!(s.next_due(), Some(Instant(3)));
        assert_eq!(s.pop_due(Instant(2)), None);
        assert_eq!(s.pop_due(Instant(4)), Some('z'));
        assert_eq!(s.pop_due(Instant(4)), None);
        // Same instant, scheduling order wins over task order.
        assert_eq!(s.pop_due(Instant(5)), Some('b'));
        assert_eq!(s.pop_due(Instant(5)), Some('a'));
        assert!(s.is_empty());
    }

    #[test]
    fn cancelling() {
        let mut s = Scheduler::default();
        for i in 0..6 {
            s.schedule(Instant(i), i % 2);
        }
        assert_eq!(s.cancel(|&t| t == 1), 3);
        assert!(!s.contains(|&t| t == 1));
        assert_eq!(s.len(), 3);

        let mut left = Vec::new();
        while let Some(t) = s.pop_due(Instant(10)) {
            left.push(t);
        }
        assert_eq!(left, vec![0, 0, 0]);
    }
}
