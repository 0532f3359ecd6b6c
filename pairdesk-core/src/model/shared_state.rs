use crate::model::problem::Problem;
use serde::{Deserialize, Serialize};

/// Which pane of the room every participant is looking at.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoomTab {
    #[default]
    Lobby,
    Coding,
    Whiteboard,
}

/// The room-wide UI fields every participant replicates. Each participant
/// holds its own copy; whoever edits a field broadcasts it and the last
/// message processed wins.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SharedState {
    pub active_tab: RoomTab,
    pub selected_problem: Option<Problem>,
    pub code: String,
    pub language: String,
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            active_tab: RoomTab::default(),
            selected_problem: None,
            code: String::new(),
            language: "javascript".to_owned(),
        }
    }
}

/// A local edit to one shared field.
#[derive(Debug, Clone, PartialEq)]
pub enum SharedChange {
    Tab(RoomTab),
    Problem(Problem),
    Code(String),
    Language(String),
}
