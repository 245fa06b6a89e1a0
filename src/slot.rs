//! 15-minute slots of a week, and their availability state

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

pub const DAYS_PER_WEEK: usize = 7;
pub const SLOTS_PER_HOUR: usize = 4;
pub const HOURS_PER_DAY: usize = 24;
pub const SLOTS_PER_DAY: usize = SLOTS_PER_HOUR * HOURS_PER_DAY;
pub const SLOTS_PER_WEEK: usize = SLOTS_PER_DAY * DAYS_PER_WEEK;
/// How many tasks can be displayed side by side in a slot
pub const TASK_LANES: usize = 5;
/// Selection counters above this value are displayed as this value
pub const COUNTER_DISPLAY_CAP: u64 = 5;

/// The index of a slot in a week, i.e. `day * 96 + quarter_hour_of_day`.
///
/// It is always lower than [`SLOTS_PER_WEEK`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u16);

impl SlotIndex {
    /// Returns `None` if `day` or `quarter` are out of range
    pub fn new(day: usize, quarter: usize) -> Option<Self> {
        if day >= DAYS_PER_WEEK || quarter >= SLOTS_PER_DAY {
            return None;
        }
        Some(Self((day * SLOTS_PER_DAY + quarter) as u16))
    }

    /// All the slots of a week, day by day
    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (0..SLOTS_PER_WEEK as u16).map(SlotIndex)
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    pub fn day(&self) -> usize {
        self.as_usize() / SLOTS_PER_DAY
    }

    pub fn quarter(&self) -> usize {
        self.as_usize() % SLOTS_PER_DAY
    }

    /// All the slots of a week, grouped by hour
    pub fn by_hour() -> impl Iterator<Item = Vec<SlotIndex>> {
        (0..SLOTS_PER_WEEK / SLOTS_PER_HOUR).map(|hour| {
            (0..SLOTS_PER_HOUR)
                .map(|quarter| SlotIndex((hour * SLOTS_PER_HOUR + quarter) as u16))
                .collect()
        })
    }
}

impl TryFrom<usize> for SlotIndex {
    type Error = String;

    fn try_from(idx: usize) -> Result<Self, Self::Error> {
        if idx < SLOTS_PER_WEEK {
            Ok(Self(idx as u16))
        } else {
            Err(format!("Slot index {} is out of range (0..{})", idx, SLOTS_PER_WEEK))
        }
    }
}

impl Display for SlotIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// How many users selected a slot, and whether the current user is one of them
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockState {
    pub count: u64,
    pub in_block: bool,
}

impl BlockState {
    pub fn new(count: u64, in_block: bool) -> Self {
        Self { count, in_block }
    }

    /// The counter as it is displayed (capped at [`COUNTER_DISPLAY_CAP`])
    pub fn display_count(&self) -> u64 {
        self.count.min(COUNTER_DISPLAY_CAP)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_index_bounds() {
        assert_eq!(SlotIndex::new(0, 0).unwrap().as_usize(), 0);
        assert_eq!(SlotIndex::new(1, 5).unwrap().as_usize(), 101);
        assert_eq!(SlotIndex::new(6, 95).unwrap().as_usize(), 671);
        assert!(SlotIndex::new(7, 0).is_none());
        assert!(SlotIndex::new(0, 96).is_none());

        assert!(SlotIndex::try_from(671).is_ok());
        assert!(SlotIndex::try_from(672).is_err());
        assert_eq!(SlotIndex::all().count(), SLOTS_PER_WEEK);

        let slot = SlotIndex::try_from(101).unwrap();
        assert_eq!((slot.day(), slot.quarter()), (1, 5));
    }

    #[test]
    fn hour_groups() {
        let hours: Vec<Vec<usize>> = SlotIndex::by_hour()
            .map(|hour| hour.iter().map(|s| s.as_usize()).collect())
            .collect();
        assert_eq!(hours.len(), 168);
        assert_eq!(hours[0], vec![0, 1, 2, 3]);
        assert_eq!(hours[1], vec![4, 5, 6, 7]);
        assert_eq!(hours[167], vec![668, 669, 670, 671]);
    }

    #[test]
    fn counter_is_capped() {
        assert_eq!(BlockState::new(3, false).display_count(), 3);
        assert_eq!(BlockState::new(5, true).display_count(), 5);
        assert_eq!(BlockState::new(6, true).display_count(), 5);
        assert_eq!(BlockState::new(40, false).display_count(), 5);
    }
}
