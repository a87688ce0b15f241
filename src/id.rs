//! Task identifier generation

use crate::snapshot::MAX_SAFE_ID;
use crate::task::TaskId;
use chrono::Utc;

/// Hands out task ids derived from the wall clock
///
/// Ids are the current Unix time in milliseconds. When the clock has not
/// moved past the last id (several tasks in the same millisecond, or the
/// clock went backwards) the next id is `last + 1` instead, so ids never
/// repeat and never decrease.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    last_id: TaskId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id using the current time
    pub fn next_id(&mut self) -> TaskId {
        self.next_id_at(Utc::now().timestamp_millis())
    }

    /// Next id for a given clock reading in Unix milliseconds
    pub fn next_id_at(&mut self, now_millis: i64) -> TaskId {
        let now = TaskId::try_from(now_millis).unwrap_or(0);

        if now > self.last_id {
            self.last_id = now;
        } else {
            self.last_id = self.last_id.saturating_add(1);
        }

        self.last_id
    }

    /// Make sure future ids are greater than `id`
    ///
    /// Ids are capped at [`MAX_SAFE_ID`] so there is always room to count up.
    pub fn observe(&mut self, id: TaskId) {
        self.last_id = self.last_id.max(id.min(MAX_SAFE_ID));
    }

    /// The most recently issued (or observed) id, `0` if none
    pub fn last_id(&self) -> TaskId {
        self.last_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_the_clock_when_it_advances() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id_at(1_000), 1_000);
        assert_eq!(ids.next_id_at(1_005), 1_005);
        assert_eq!(ids.last_id(), 1_005);
    }

    #[test]
    fn same_millisecond_increments() {
        let mut ids = IdGenerator::new();
        let issued: Vec<TaskId> = (0..4).map(|_| ids.next_id_at(2_000)).collect();
        assert_eq!(issued, vec![2_000, 2_001, 2_002, 2_003]);
    }

    #[test]
    fn clock_going_backwards_still_increases() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id_at(5_000), 5_000);
        assert_eq!(ids.next_id_at(4_000), 5_001);
        // catches up with the clock once it passes the last id again
        assert_eq!(ids.next_id_at(5_001), 5_002);
        assert_eq!(ids.next_id_at(9_000), 9_000);
    }

    #[test]
    fn negative_clock_reading_is_treated_as_zero() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id_at(-10), 1);
        assert_eq!(ids.next_id_at(-10), 2);
    }

    #[test]
    fn observe_raises_the_floor() {
        let mut ids = IdGenerator::new();
        ids.observe(10_000);
        assert_eq!(ids.next_id_at(3_000), 10_001);

        ids.observe(5);
        assert_eq!(ids.last_id(), 10_001);
    }

    #[test]
    fn observing_huge_ids_does_not_overflow() {
        let mut ids = IdGenerator::new();
        ids.observe(TaskId::MAX);

        assert_eq!(ids.last_id(), MAX_SAFE_ID);
        assert_eq!(ids.next_id_at(1_700_000_000_000), MAX_SAFE_ID + 1);
        assert_eq!(ids.next_id_at(1_700_000_000_000), MAX_SAFE_ID + 2);
    }

    #[test]
    fn real_clock_ids_are_strictly_increasing() {
        let mut ids = IdGenerator::new();
        let issued: Vec<TaskId> = (0..1_000).map(|_| ids.next_id()).collect();
        assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
