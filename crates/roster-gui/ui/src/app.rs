use roster_shared::export::{
  export_csv,
  export_file_name
};
use roster_shared::{
  CalendarRenderer,
  RosterEntry,
  ScheduleConfig,
  ScheduleQuery,
  StaffConfig,
  search_schedule
};
use web_sys::{
  Event,
  HtmlInputElement,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  TargetCast,
  function_component,
  html,
  use_state
};

use crate::components::{
  CalendarTable,
  RosterToolbar,
  SearchForm,
  SearchPanel
};
use crate::download::download_text;

fn load_calendar() -> CalendarRenderer {
  CalendarRenderer::new(
    ScheduleConfig::embedded()
  )
}

fn load_staff_config(
  calendar: &CalendarRenderer
) -> Option<StaffConfig> {
  match calendar
    .schedule()
    .load_staff_config()
  {
    | Ok(staff) => {
      tracing::info!(
        core = %staff.core_staff,
        test_staffs = staff.test_staffs.len(),
        "loaded staff config"
      );
      Some(staff)
    }
    | Err(error) => {
      tracing::warn!(%error, "staff config unavailable");
      None
    }
  }
}

fn run_search(
  calendar: &CalendarRenderer,
  form: &SearchForm
) -> Result<Vec<RosterEntry>, String> {
  let query = ScheduleQuery::from_fields(
    &form.staff,
    &form.from,
    &form.to,
    &form.slot,
    form.core_only
  )
  .map_err(|e| format!("{e:#}"))?;
  Ok(
    search_schedule(
      calendar.entries(),
      &query
    )
    .into_iter()
    .cloned()
    .collect()
  )
}

#[function_component(App)]
pub fn app() -> Html {
  let calendar = use_state(load_calendar);
  let staff_config = {
    let snapshot = (*calendar).clone();
    use_state(move || {
      load_staff_config(&snapshot)
    })
  };
  let search_form =
    use_state(SearchForm::default);
  let search_results =
    use_state(|| None::<Vec<RosterEntry>>);
  let status =
    use_state(|| None::<String>);

  let on_month_change = {
    let calendar = calendar.clone();
    let status = status.clone();
    Callback::from(move |e: Event| {
      let Some(input) =
        e.target_dyn_into::<HtmlInputElement>()
      else {
        tracing::warn!(
          "month change event had \
           non-input target"
        );
        return;
      };
      let mut next = (*calendar).clone();
      match next
        .set_month_from_picker(&input.value())
      {
        | Ok(_) => {
          calendar.set(next);
          status.set(None);
        }
        | Err(error) => {
          tracing::warn!(%error, "ignoring month picker value");
          status.set(Some(format!(
            "无效的月份: {}",
            input.value()
          )));
        }
      }
    })
  };

  let on_prev = {
    let calendar = calendar.clone();
    Callback::from(move |_: MouseEvent| {
      let mut next = (*calendar).clone();
      next.prev_month();
      calendar.set(next);
    })
  };

  let on_next = {
    let calendar = calendar.clone();
    Callback::from(move |_: MouseEvent| {
      let mut next = (*calendar).clone();
      next.next_month();
      calendar.set(next);
    })
  };

  let on_refresh = {
    let calendar = calendar.clone();
    let search_results =
      search_results.clone();
    Callback::from(move |_: MouseEvent| {
      let mut next = (*calendar).clone();
      next.refresh();
      calendar.set(next);
      search_results.set(None);
    })
  };

  let on_search_change = {
    let search_form = search_form.clone();
    Callback::from(move |form: SearchForm| {
      search_form.set(form);
    })
  };

  let on_search = {
    let calendar = calendar.clone();
    let search_form = search_form.clone();
    let search_results =
      search_results.clone();
    let status = status.clone();
    Callback::from(move |_: MouseEvent| {
      match run_search(
        &calendar,
        &search_form
      ) {
        | Ok(hits) => {
          tracing::debug!(
            form = ?*search_form,
            hits = hits.len(),
            "schedule search"
          );
          search_results.set(Some(hits));
          status.set(None);
        }
        | Err(error) => {
          status.set(Some(error));
        }
      }
    })
  };

  let on_export = {
    let calendar = calendar.clone();
    let status = status.clone();
    Callback::from(move |_: MouseEvent| {
      let rows = calendar.render_calendar();
      let csv = export_csv(
        &rows,
        &calendar.schedule().time_slots
      );
      let file_name = export_file_name(
        &calendar.view().month_key()
      );
      if let Err(error) = download_text(
        &file_name,
        "text/csv;charset=utf-8",
        &csv
      ) {
        tracing::error!(%error, "export failed");
        status.set(Some(format!(
          "导出失败: {error}"
        )));
      }
    })
  };

  let rows = calendar.render_calendar();
  let month_key =
    calendar.view().month_key();

  html! {
      <div class="roster-app">
          <header class="roster-header">
              <h1>{ format!("排班表 {month_key}") }</h1>
              {
                  match &*staff_config {
                      | Some(staff) => html! {
                          <div class="staff-legend">
                              <span class="staff-item core-staff">{ &staff.core_staff }</span>
                              {
                                  for staff.test_staffs.iter().map(|name| html! {
                                      <span class="staff-item regular-staff">{ name }</span>
                                  })
                              }
                          </div>
                      },
                      | None => html! {}
                  }
              }
          </header>

          <RosterToolbar
              month_key={month_key.clone()}
              on_month_change={on_month_change}
              on_prev={on_prev}
              on_next={on_next}
              on_refresh={on_refresh}
              on_export={on_export}
          />

          {
              match &*status {
                  | Some(message) => html! {
                      <div class="status error">{ message }</div>
                  },
                  | None => html! {}
              }
          }

          <CalendarTable
              rows={rows}
              slots={calendar.schedule().time_slots.clone()}
          />

          <SearchPanel
              form={(*search_form).clone()}
              slots={calendar.schedule().time_slots.clone()}
              results={(*search_results).clone()}
              on_change={on_search_change}
              on_search={on_search}
          />
      </div>
  }
}
