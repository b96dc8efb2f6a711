use roster_shared::RosterEntry;
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  InputEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html
};

/// Raw values of the search inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
  pub staff:     String,
  pub from:      String,
  pub to:        String,
  pub slot:      String,
  pub core_only: bool
}

#[derive(Properties, PartialEq)]
pub struct SearchPanelProps {
  pub form:      SearchForm,
  pub slots:     Vec<String>,
  pub results:   Option<Vec<RosterEntry>>,
  pub on_change: Callback<SearchForm>,
  pub on_search: Callback<MouseEvent>
}

fn text_input(
  props: &SearchPanelProps,
  apply: fn(&mut SearchForm, String)
) -> Callback<InputEvent> {
  let form = props.form.clone();
  let on_change = props.on_change.clone();
  Callback::from(move |e: InputEvent| {
    if let Some(input) =
      e.target_dyn_into::<HtmlInputElement>()
    {
      let mut next = form.clone();
      apply(&mut next, input.value());
      on_change.emit(next);
    }
  })
}

#[function_component(SearchPanel)]
pub fn search_panel(
  props: &SearchPanelProps
) -> Html {
  let on_staff = text_input(props, |form, v| {
    form.staff = v;
  });
  let on_from = text_input(props, |form, v| {
    form.from = v;
  });
  let on_to = text_input(props, |form, v| {
    form.to = v;
  });

  let on_slot = {
    let form = props.form.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |e: Event| {
      if let Some(select) =
        e.target_dyn_into::<HtmlSelectElement>()
      {
        let mut next = form.clone();
        next.slot = select.value();
        on_change.emit(next);
      }
    })
  };

  let on_core = {
    let form = props.form.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |e: Event| {
      if let Some(input) =
        e.target_dyn_into::<HtmlInputElement>()
      {
        let mut next = form.clone();
        next.core_only = input.checked();
        on_change.emit(next);
      }
    })
  };

  html! {
      <div class="panel search-panel">
          <div class="header">{ "排班查询" }</div>
          <div class="actions">
              <input
                  type="search"
                  placeholder="姓名 或 /正则/"
                  value={props.form.staff.clone()}
                  oninput={on_staff}
              />
              <input type="date" value={props.form.from.clone()} oninput={on_from} />
              <input type="date" value={props.form.to.clone()} oninput={on_to} />
              <select onchange={on_slot}>
                  <option value="" selected={props.form.slot.is_empty()}>{ "全部时段" }</option>
                  {
                      for props.slots.iter().map(|slot| html! {
                          <option value={slot.clone()} selected={*slot == props.form.slot}>{ slot }</option>
                      })
                  }
              </select>
              <label>
                  <input type="checkbox" checked={props.form.core_only} onchange={on_core} />
                  { "仅核心" }
              </label>
              <button id="searchScheduleBtn" class="btn" type="button" onclick={props.on_search.clone()}>{ "查询" }</button>
          </div>
          {
              match &props.results {
                  | None => html! {},
                  | Some(entries) if entries.is_empty() => html! {
                      <div class="empty">{ "没有匹配的排班" }</div>
                  },
                  | Some(entries) => html! {
                      <ul class="search-results">
                          {
                              for entries.iter().map(|entry| {
                                  let kind = if entry.core_staff { "core-staff" } else { "regular-staff" };
                                  html! {
                                      <li key={entry.id.to_string()}>
                                          <span class="search-date">{ entry.date_key() }</span>
                                          <span class="search-slot">{ &entry.time_slot }</span>
                                          <span class={classes!("staff-item", kind)}>{ &entry.staff_name }</span>
                                      </li>
                                  }
                              })
                          }
                      </ul>
                  }
              }
          }
      </div>
  }
}
