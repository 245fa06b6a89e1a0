//! Week header, tag list, and the printable view

use maud::{html, Markup};

use crate::document::element;
use crate::render::grid::week_grid;
use crate::slot::DAYS_PER_WEEK;
use crate::tag::Tag;
use crate::week::WeekPayload;

pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// The content of a day's header cell: its name, then its date
pub fn weekday_label(day: usize, date: &str) -> Markup {
    let name = WEEKDAY_NAMES.get(day).copied().unwrap_or("");
    html! {
        (name) br; (date)
    }
}

/// The seven header cells of a week
pub fn week_header(payload: &WeekPayload) -> Markup {
    html! {
        @for day in 0..DAYS_PER_WEEK {
            div.wkday id=(element::weekday(day)) {
                (weekday_label(day, payload.day_label(day)))
            }
        }
    }
}

pub fn tag_list(tags: &[Tag]) -> Markup {
    html! {
        @for tag in tags {
            li style={ "color:" (tag.css_color()) ";text-shadow:-1px 0 black, 0 1px black, 1px 0 black, 0 -1px black;" } {
                (tag.name)
            }
        }
    }
}

/// A standalone version of the week (header and grid), suited for printing
pub fn print_view(payload: &WeekPayload) -> Markup {
    html! {
        div.wkdays { (week_header(payload)) }
        div.print { (week_grid(payload)) }
    }
}
