//! The task detail (back face of the card)

use maud::{html, Markup};

use crate::task::TaskDetail;

/// Render a task detail. Empty description, location and link are left out.
pub fn task_detail(task: &TaskDetail) -> Markup {
    html! {
        div.back_wrapper {
            div.info_0 { "TOPIC: " (task.topic) }
            @if !task.description.is_empty() {
                div.info_1 { "DESCRIPTION: " (task.description) }
            }
            @if !task.location.is_empty() {
                div.info_2 { "LOCATION: " (task.location) }
            }
            @if !task.link.is_empty() {
                div.info_1 {
                    "LINK: "
                    a.info_1 target="_blank" href=(task.link) style="text-decoration:underline" { (task.link) }
                }
            }
            div.info_2 { "DATE: " (task.date) }
            div.info_3 { "START TIME: " (task.start_time) }
            div.info_4 { "END TIME: " (task.end_time) }
            div.info_5 {
                a.view_button href={ "/modify_task/" (task.id.as_u64()) } { "Modify Task" }
            }
        }
    }
}
