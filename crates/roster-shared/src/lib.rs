pub mod entry;
pub mod export;
pub mod grouping;
pub mod month;
pub mod renderer;
pub mod rows;
pub mod schedule;
pub mod search;

pub use entry::{
  RosterEntry,
  builtin_entries,
  date_key
};
pub use grouping::GroupingIndex;
pub use month::ViewState;
pub use renderer::{
  CalendarRenderer,
  RosterSource
};
pub use rows::{
  RowDescriptor,
  RowStyle,
  SlotCell,
  StaffBadge,
  StaffKind
};
pub use schedule::{
  HolidaySet,
  ScheduleConfig,
  StaffConfig
};
pub use search::{
  ScheduleQuery,
  StaffPattern,
  search_schedule
};
