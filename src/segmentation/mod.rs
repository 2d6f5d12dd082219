pub mod algorithm;
pub mod config;
pub mod selection;

pub use algorithm::{align_to_monday, segment_series, segment_weeks};
pub use config::SegmentationConfig;
pub use selection::{find_week, select_weeks, TrailingAnchor, WeekSelection};
