use serde::{Deserialize, Serialize};

use crate::engine::MAX_PINS;

/// Dialog shown to the user when a command cannot be carried out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn capacity_exceeded() -> Self {
        Self {
            title: "Too many pins".into(),
            message: format!(
                "You can add only {} pins. Delete a pin before adding another.",
                MAX_PINS
            ),
        }
    }

    pub fn nothing_to_delete() -> Self {
        Self {
            title: "Nothing to delete".into(),
            message: "There are no pins on the map.".into(),
        }
    }
}
