// UI models module

use serde::{Deserialize, Serialize};

/// Calendar view modes exposed to the hosting widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Month,
    #[default]
    Week,
    Day,
}

impl ViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Month => "month",
            ViewType::Week => "week",
            ViewType::Day => "day",
        }
    }
}
