//! HTML rendering of the weekly view.
//!
//! These functions are pure: they turn server data into markup, and never touch the page.

pub mod detail;
pub mod grid;
pub mod header;

pub use detail::task_detail;
pub use grid::week_grid;
pub use header::{print_view, tag_list, week_header, weekday_label};
