mod calendar_row;
mod calendar_table;
mod roster_toolbar;
mod search_panel;
mod staff_badge;

pub use calendar_table::CalendarTable;
pub use roster_toolbar::RosterToolbar;
pub use search_panel::{
  SearchForm,
  SearchPanel
};
