use serde::{Deserialize, Serialize};

use crate::models::DAYS_PER_WEEK;

/// Configuration for week segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationConfig {
    /// Length of each segment. Segments always start on a Monday.
    pub days_per_segment: u32,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            days_per_segment: DAYS_PER_WEEK,
        }
    }
}
