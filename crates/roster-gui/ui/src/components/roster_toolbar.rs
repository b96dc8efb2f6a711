use web_sys::{
  Event,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct RosterToolbarProps {
  pub month_key:       String,
  pub on_month_change: Callback<Event>,
  pub on_prev:         Callback<MouseEvent>,
  pub on_next:         Callback<MouseEvent>,
  pub on_refresh:      Callback<MouseEvent>,
  pub on_export:       Callback<MouseEvent>
}

#[function_component(RosterToolbar)]
pub fn roster_toolbar(
  props: &RosterToolbarProps
) -> Html {
  html! {
      <div class="actions roster-toolbar">
          <button id="prevMonth" class="btn" type="button" onclick={props.on_prev.clone()}>{ "上个月" }</button>
          <input
              id="monthPicker"
              type="month"
              value={props.month_key.clone()}
              onchange={props.on_month_change.clone()}
          />
          <button id="nextMonth" class="btn" type="button" onclick={props.on_next.clone()}>{ "下个月" }</button>
          <button id="refreshData" class="btn" type="button" onclick={props.on_refresh.clone()}>{ "刷新" }</button>
          <button id="exportScheduleBtn" class="btn" type="button" onclick={props.on_export.clone()}>{ "排班导出" }</button>
      </div>
  }
}
