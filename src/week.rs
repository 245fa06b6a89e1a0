//! The weekly payload returned by `get-cal-list`, `prev-week` and `next-week`

use serde::Deserialize;
use serde_json::Value;

use crate::ids::WeekMarker;
use crate::slot::{BlockState, SlotIndex, TASK_LANES};
use crate::tag::Tag;
use crate::task::TaskSummary;

/// What the server knows about a single slot.
///
/// Missing or malformed `block` and `tasks` fields are not errors: they are replaced by an empty slot.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct SlotRecord {
    pub block: BlockState,
    pub lanes: [Option<TaskSummary>; TASK_LANES],
}

static EMPTY_SLOT: SlotRecord = SlotRecord {
    block: BlockState { count: 0, in_block: false },
    lanes: [None, None, None, None, None],
};

impl From<Value> for SlotRecord {
    fn from(value: Value) -> Self {
        let block = match value.get("block").and_then(Value::as_array) {
            Some(pair) => BlockState {
                count: pair.get(0).and_then(Value::as_u64).unwrap_or(0),
                in_block: pair.get(1).and_then(Value::as_bool).unwrap_or(false),
            },
            None => BlockState::default(),
        };

        let mut lanes: [Option<TaskSummary>; TASK_LANES] = Default::default();
        if let Some(raw_lanes) = value.get("tasks").and_then(Value::as_array) {
            for (lane, raw_lane) in lanes.iter_mut().zip(raw_lanes) {
                // Each lane is a list that holds zero or one task
                *lane = raw_lane.as_array()
                    .and_then(|tasks| tasks.first())
                    .and_then(|task| match serde_json::from_value(task.clone()) {
                        Ok(task) => Some(task),
                        Err(err) => {
                            log::debug!("Ignoring malformed task {} ({})", task, err);
                            None
                        }
                    });
            }
        }

        Self { block, lanes }
    }
}


/// A week's worth of calendar state
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct WeekPayload {
    /// One date label per day
    #[serde(default)]
    pub week: Vec<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Slot records, day by day
    #[serde(default)]
    pub data: Vec<Vec<SlotRecord>>,
}

impl WeekPayload {
    /// The marker of this week (its first date label), if any
    pub fn marker(&self) -> Option<WeekMarker> {
        self.week.first().map(|first| WeekMarker::from(first.as_str()))
    }

    /// The date label of a given day, or an empty string if the server did not send it
    pub fn day_label(&self, day: usize) -> &str {
        self.week.get(day).map(String::as_str).unwrap_or("")
    }

    /// The record of a given slot. Slots the server did not send are empty.
    pub fn slot(&self, slot: SlotIndex) -> &SlotRecord {
        self.data.get(slot.day())
            .and_then(|day| day.get(slot.quarter()))
            .unwrap_or(&EMPTY_SLOT)
    }
}
