//! Label — the labeler's binary training target (§4.6).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Loss = 0,
    Success = 1,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> u8 {
        label.as_u8()
    }
}
