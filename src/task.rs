//! Tasks, as they appear in the weekly grid and in the detail view

use serde::Deserialize;

use crate::ids::TaskId;
use crate::slot::SLOTS_PER_DAY;

/// A task as it is laid out in a slot of the weekly grid
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TaskSummary {
    pub id: TaskId,
    #[serde(default)]
    pub topic: String,
    #[serde(rename = "startTime", default)]
    pub start_time: String,
    #[serde(rename = "endTime", default)]
    pub end_time: String,
    /// The first slot of the task, within its day
    #[serde(rename = "startBlock")]
    pub start_block: u16,
    /// The slot the task ends at (exclusive), within its day
    #[serde(rename = "endBlock")]
    pub end_block: u16,
    #[serde(default)]
    pub color: String,
}

impl TaskSummary {
    /// The flat index of the slot this task starts at, for a given day of the week
    pub fn start_index(&self, day: usize) -> usize {
        day * SLOTS_PER_DAY + self.start_block as usize
    }

    /// How many slots the task spans
    pub fn span(&self) -> u16 {
        self.end_block.saturating_sub(self.start_block)
    }

    /// Height of the rendered block, in percent of a slot
    pub fn height_percent(&self) -> u32 {
        self.span() as u32 * 100
    }
}


/// Everything the back of the card shows about a task
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TaskDetail {
    pub id: TaskId,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "startTime", default)]
    pub start_time: String,
    #[serde(rename = "endTime", default)]
    pub end_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_geometry() {
        let task: TaskSummary = serde_json::from_value(serde_json::json!({
            "id": 3, "topic": "Standup", "startTime": "01:15:00", "endTime": "02:15:00",
            "startBlock": 5, "endBlock": 9, "color": "#ABCDEF"
        })).unwrap();

        assert_eq!(task.start_index(0), 5);
        assert_eq!(task.start_index(2), 197);
        assert_eq!(task.span(), 4);
        assert_eq!(task.height_percent(), 400);
    }

    #[test]
    fn inverted_task_has_no_height() {
        let task: TaskSummary = serde_json::from_value(serde_json::json!({
            "id": 1, "startBlock": 9, "endBlock": 5
        })).unwrap();
        assert_eq!(task.height_percent(), 0);
        assert_eq!(task.topic, "");
    }

    #[test]
    fn detail_optional_fields() {
        let detail: TaskDetail = serde_json::from_value(serde_json::json!({
            "id": 8, "topic": "Review", "date": "2021-11-30",
            "startTime": "10:00:00", "endTime": "11:00:00"
        })).unwrap();
        assert_eq!(detail.id, TaskId::new(8));
        assert_eq!(detail.description, "");
        assert_eq!(detail.link, "");
    }
}
