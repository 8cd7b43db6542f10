//! Weekly timetable engine: semester week arithmetic, week-spec containment,
//! and merging of consecutive class sections into grid blocks.

pub mod availability;
pub mod calendar;
pub mod conflict;
pub mod layout;

pub use calendar::{
    DateRangeCheck, WeekDateRange, is_date_range_valid, week_date_range_for, week_number_for,
};
pub use layout::{RenderBlock, build_render_blocks};
pub use models::weeks::is_week_active;
