//! Data that outlives a session.

use serde::{Deserialize, Serialize};

/// The reader's last position: category tag, unit index and global verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPosition {
    pub criteria_number: u8,
    pub position: u32,
    pub ayah_number: u32,
}

impl Default for SavedPosition {
    fn default() -> Self {
        Self {
            criteria_number: 0,
            position: 1,
            ayah_number: 1,
        }
    }
}
