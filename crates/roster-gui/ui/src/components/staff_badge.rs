use roster_shared::StaffBadge;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StaffBadgeItemProps {
  pub badge: StaffBadge
}

#[function_component(StaffBadgeItem)]
pub fn staff_badge_item(
  props: &StaffBadgeItemProps
) -> Html {
  html! {
      <div class={classes!("staff-item", props.badge.kind.css_class())}>
          { &props.badge.name }
      </div>
  }
}
