//! The two faces of the calendar card, and local slot selection

use crate::document::{element, Mutation};
use crate::ids::TaskId;
use crate::render;
use crate::slot::{SlotIndex, SLOTS_PER_WEEK};
use crate::task::TaskDetail;
use crate::week::WeekPayload;

/// Which face of the card is visible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    /// The weekly grid
    Front,
    /// The detail of a task, that was opened from the grid
    Back { task: TaskId },
}

impl Default for Face {
    fn default() -> Self {
        Face::Front
    }
}

impl Face {
    /// Turn the card to show a task.
    ///
    /// Returns the page writes to perform, or `None` if the card already shows a task.
    pub fn show_task(&mut self, detail: &TaskDetail) -> Option<Vec<Mutation>> {
        if let Face::Back { task } = self {
            log::debug!("Task {} is already shown, ignoring task {}", task, detail.id);
            return None;
        }

        *self = Face::Back { task: detail.id };
        Some(vec![
            Mutation::set_inner_html(element::BACK, render::task_detail(detail).into_string()),
            Mutation::set_value(element::BACK, detail.id),
            Mutation::scroll_into_view(element::BACK),
            Mutation::ToggleFlip,
        ])
    }

    /// Turn the card back to the grid, with the task that was shown in view.
    ///
    /// Returns the page writes to perform, or `None` if the grid is already shown.
    pub fn show_grid(&mut self) -> Option<Vec<Mutation>> {
        let task = match self {
            Face::Front => {
                log::debug!("The grid is already shown");
                return None;
            },
            Face::Back { task } => *task,
        };

        *self = Face::Front;
        Some(vec![
            Mutation::scroll_into_view(&element::task(task)),
            Mutation::ToggleFlip,
        ])
    }
}


/// Whether the current user selected each slot of the displayed week
#[derive(Clone, Debug, PartialEq)]
pub struct Selections {
    selected: Vec<bool>,
}

impl Default for Selections {
    fn default() -> Self {
        Self { selected: vec![false; SLOTS_PER_WEEK] }
    }
}

impl Selections {
    /// Read the selections the server sent
    pub fn from_week(payload: &WeekPayload) -> Self {
        Self {
            selected: SlotIndex::all().map(|slot| payload.slot(slot).block.in_block).collect(),
        }
    }

    pub fn is_selected(&self, slot: SlotIndex) -> bool {
        self.selected[slot.as_usize()]
    }

    /// Invert the selection of a slot, and return its new value
    pub fn toggle(&mut self, slot: SlotIndex) -> bool {
        let value = &mut self.selected[slot.as_usize()];
        *value = !*value;
        *value
    }

    /// The write that shows the current selection of a slot
    pub fn mutation(&self, slot: SlotIndex) -> Mutation {
        Mutation::set_value(&element::block(slot), self.is_selected(slot))
    }
}
