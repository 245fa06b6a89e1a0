//! The weekly grid (front face of the card)

use maud::{html, Markup};

use crate::document::element;
use crate::slot::{BlockState, SlotIndex, HOURS_PER_DAY};
use crate::tag::css_color;
use crate::task::TaskSummary;
use crate::week::WeekPayload;

/// Render the 24 hour labels, then every slot of the week, grouped by hour.
///
/// The output always holds one `div.grid` per slot, each with one availability button and five task lanes,
/// whatever the payload contains.
pub fn week_grid(payload: &WeekPayload) -> Markup {
    html! {
        div.week {
            (hour_labels())
            @for hour in SlotIndex::by_hour() {
                div.hour {
                    @for slot in hour {
                        (slot_group(payload, slot))
                    }
                }
            }
        }
    }
}

fn hour_labels() -> Markup {
    html! {
        @for hour in 0..HOURS_PER_DAY {
            div.hour { (hour) ":00" }
        }
    }
}

fn slot_group(payload: &WeekPayload, slot: SlotIndex) -> Markup {
    let record = payload.slot(slot);
    html! {
        div.grid {
            (availability_button(slot, &record.block))
            @for (lane, task) in record.lanes.iter().enumerate() {
                (task_lane(slot, lane, task.as_ref()))
            }
        }
    }
}

fn availability_button(slot: SlotIndex, block: &BlockState) -> Markup {
    let selected = if block.in_block { "true" } else { "false" };
    html! {
        button class={ "cell_" (block.display_count()) } style="border-radius:0px"
            value=(selected) id=(element::block(slot)) data-slot=(slot.as_usize()) {}
    }
}

/// A task is only drawn on the slot it starts at. Every other lane gets a hidden placeholder, so that columns stay aligned.
fn task_lane(slot: SlotIndex, lane: usize, task: Option<&TaskSummary>) -> Markup {
    match task {
        Some(task) if task.start_index(slot.day()) == slot.as_usize() => html! {
            button class={ "task_" (lane) }
                style={ "height:" (task.height_percent()) "%;background-color:" (css_color(&task.color)) }
                id=(element::task(task.id)) data-task=(task.id.as_u64()) {
                (task.topic)
            }
        },
        _ => html! {
            div class={ "task_" (lane) } style="visibility:hidden" {}
        },
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::slot::{SLOTS_PER_WEEK, TASK_LANES};

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    fn empty_day() -> serde_json::Value {
        json!(vec![json!({"block": [0, false], "tasks": [[], [], [], [], []]}); 96])
    }

    #[test]
    fn grid_shape_does_not_depend_on_data() {
        let full: WeekPayload = serde_json::from_value(json!({
            "week": ["2021-11-29"],
            "data": vec![empty_day(); 7],
        })).unwrap();
        let empty = WeekPayload::default();
        let partial: WeekPayload = serde_json::from_value(json!({"data": [[{"tasks": [[]]}]]})).unwrap();

        for payload in &[full, empty, partial] {
            let html = week_grid(payload).into_string();
            assert_eq!(count(&html, r#"<div class="grid">"#), SLOTS_PER_WEEK);
            assert_eq!(count(&html, r#"class="task_"#), SLOTS_PER_WEEK * TASK_LANES);
            assert_eq!(count(&html, "data-slot="), SLOTS_PER_WEEK);
            // 24 hour labels, and one container per hour of the week
            assert_eq!(count(&html, r#"<div class="hour">"#), 24 + SLOTS_PER_WEEK / 4);
        }
    }

    #[test]
    fn task_is_drawn_at_its_start_slot_only() {
        let task = json!({"id": 3, "topic": "Standup", "startBlock": 5, "endBlock": 9, "color": "#ABCDEF"});
        let mut day = vec![json!({}); 96];
        for quarter in 5..9 {
            day[quarter] = json!({"block": [1, false], "tasks": [[task], [], [], [], []]});
        }
        let payload: WeekPayload = serde_json::from_value(json!({"data": [day]})).unwrap();
        let html = week_grid(&payload).into_string();

        assert_eq!(count(&html, r#"id="id_task_3""#), 1);
        assert!(html.contains(
            r#"<button class="task_0" style="height:400%;background-color:#abcdef" id="id_task_3" data-task="3">Standup</button>"#
        ));

        // The visible block sits in the group of slot 5
        let start = html.find(r#"id="id_block_5""#).unwrap();
        let task_pos = html.find(r#"id="id_task_3""#).unwrap();
        let next = html.find(r#"id="id_block_6""#).unwrap();
        assert!(start < task_pos && task_pos < next);

        // Slots 6 to 8 only hold hidden lanes
        let visible_lanes = count(&html, r#"<button class="task_"#);
        assert_eq!(visible_lanes, 1);
        assert_eq!(count(&html, r#"<div class="task_0" style="visibility:hidden">"#), SLOTS_PER_WEEK - 1);
    }

    #[test]
    fn task_on_a_later_day() {
        let task = json!({"id": 12, "topic": "Gym", "startBlock": 0, "endBlock": 2, "color": "green"});
        let mut data = vec![json!([]); 7];
        data[2] = json!([{"tasks": [[], [], [task], [], []]}]);
        let payload: WeekPayload = serde_json::from_value(json!({"data": data})).unwrap();
        let html = week_grid(&payload).into_string();

        let task_pos = html.find(r#"id="id_task_12""#).unwrap();
        assert!(html.find(r#"id="id_block_192""#).unwrap() < task_pos);
        assert!(task_pos < html.find(r#"id="id_block_193""#).unwrap());
        assert!(html.contains(r#"class="task_2" style="height:200%;background-color:#008000""#));
    }

    #[test]
    fn counters_are_capped() {
        let mut day = vec![json!({}); 96];
        day[0] = json!({"block": [5, true]});
        day[1] = json!({"block": [6, true]});
        day[2] = json!({"block": [42, true]});
        day[3] = json!({"block": [2, false]});
        let payload: WeekPayload = serde_json::from_value(json!({"data": [day]})).unwrap();
        let html = week_grid(&payload).into_string();

        for idx in 0..3 {
            let expected = format!(r#"<button class="cell_5" style="border-radius:0px" value="true" id="id_block_{}""#, idx);
            assert!(html.contains(&expected), "missing {}", expected);
        }
        assert!(html.contains(r#"<button class="cell_2" style="border-radius:0px" value="false" id="id_block_3""#));
        assert!(html.contains(r#"<button class="cell_0" style="border-radius:0px" value="false" id="id_block_4""#));
    }

    #[test]
    fn topics_are_escaped() {
        let task = json!({"id": 1, "topic": "<script>alert(1)</script>", "startBlock": 0, "endBlock": 1, "color": "#fff"});
        let payload: WeekPayload = serde_json::from_value(json!({"data": [[{"tasks": [[task]]}]]})).unwrap();
        let html = week_grid(&payload).into_string();

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("<script>") == false);
    }
}
