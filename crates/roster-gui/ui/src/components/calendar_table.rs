use roster_shared::RowDescriptor;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

use super::calendar_row::CalendarRow;

#[derive(Properties, PartialEq)]
pub struct CalendarTableProps {
  pub rows:  Vec<RowDescriptor>,
  pub slots: Vec<String>
}

/// The month grid. Rows are keyed by
/// date so navigation replaces them
/// wholesale.
#[function_component(CalendarTable)]
pub fn calendar_table(
  props: &CalendarTableProps
) -> Html {
  html! {
      <table class="roster-calendar">
          <thead>
              <tr>
                  <th>{ "日期" }</th>
                  <th>{ "星期" }</th>
                  {
                      for props.slots.iter().map(|slot| html! {
                          <th>{ slot }</th>
                      })
                  }
              </tr>
          </thead>
          <tbody id="calendarBody">
              {
                  for props.rows.iter().map(|row| html! {
                      <CalendarRow key={row.key.clone()} row={row.clone()} />
                  })
              }
          </tbody>
      </table>
  }
}
