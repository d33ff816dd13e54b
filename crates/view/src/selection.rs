//! Selection tracking and bulk-action panel visibility.

use serde::{Deserialize, Serialize};

use crate::row::RowRef;

/// Current selection plus the panel flag derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selection: Vec<RowRef>,
    pub panel_visible: bool,
}

/// A change of panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelTransition {
    Opened,
    Closed,
}

/// Result of feeding a selection event through [`SelectionState::on_selection_changed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionUpdate {
    pub state: SelectionState,
    /// `Some` only when the panel flag actually flipped.
    pub transition: Option<PanelTransition>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection wholesale with the table's new selection.
    ///
    /// The panel flag is compared against its previous value, so moving
    /// between two non-empty selections never reports a transition.
    pub fn on_selection_changed(&self, selection: Vec<RowRef>) -> SelectionUpdate {
        let wants_panel = !selection.is_empty();
        let transition = match (self.panel_visible, wants_panel) {
            (false, true) => Some(PanelTransition::Opened),
            (true, false) => Some(PanelTransition::Closed),
            _ => None,
        };
        if let Some(t) = transition {
            tracing::debug!(transition = ?t, selected = selection.len(), "selection panel toggled");
        }

        SelectionUpdate {
            state: SelectionState {
                selection,
                panel_visible: wants_panel,
            },
            transition,
        }
    }

    pub fn has_selected(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selection.iter().any(|r| r.id == id)
    }
}
