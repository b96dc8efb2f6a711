use roster_shared::RowDescriptor;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::staff_badge::StaffBadgeItem;

#[derive(Properties, PartialEq)]
pub struct CalendarRowProps {
  pub row: RowDescriptor
}

#[function_component(CalendarRow)]
pub fn calendar_row(
  props: &CalendarRowProps
) -> Html {
  let row = &props.row;

  html! {
      <tr class={classes!(row.css_class())} data-date={row.key.clone()}>
          <td class="date-cell">{ &row.date_label }</td>
          <td class="weekday-cell">{ &row.weekday_label }</td>
          {
              for row.cells.iter().map(|cell| html! {
                  <td class="slot-cell" title={cell.slot.clone()}>
                      {
                          for cell.staff.iter().map(|badge| html! {
                              <StaffBadgeItem badge={badge.clone()} />
                          })
                      }
                  </td>
              })
          }
      </tr>
  }
}
