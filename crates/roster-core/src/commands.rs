use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use chrono_tz::Tz;
use roster_shared::export::{export_csv, render_html_table};
use roster_shared::{CalendarRenderer, ScheduleQuery, StaffPattern, search_schedule};
use tracing::{info, instrument};

use crate::cli::{Command, MonthArgs};
use crate::config::Config;
use crate::datastore::write_atomic;
use crate::datetime::{parse_date_arg, parse_month_arg, resolve_timezone};
use crate::render::Renderer;

#[instrument(skip(calendar, cfg, renderer, command))]
pub fn dispatch(
    calendar: &mut CalendarRenderer,
    cfg: &Config,
    renderer: &mut Renderer,
    command: Command,
) -> anyhow::Result<()> {
    let tz = resolve_timezone(cfg);

    match command {
        Command::Show { month } => {
            focus_month(calendar, cfg, &month, tz)?;
            let rows = calendar.render_calendar();
            let title = calendar.view().month_key();
            renderer.print_calendar(&title, &rows, &calendar.schedule().time_slots)
        }
        Command::Html { month, output } => {
            focus_month(calendar, cfg, &month, tz)?;
            let page = html_page(calendar);
            emit(output.as_deref(), &page)
        }
        Command::Search {
            staff,
            from,
            to,
            slot,
            core,
            json,
        } => {
            let query = ScheduleQuery {
                staff: staff.as_deref().map(StaffPattern::parse).transpose()?,
                from: from.as_deref().map(|raw| parse_date_arg(raw, tz)).transpose()?,
                to: to.as_deref().map(|raw| parse_date_arg(raw, tz)).transpose()?,
                slot,
                core_only: core,
            };
            let hits = search_schedule(calendar.entries(), &query);
            info!(hits = hits.len(), "search complete");
            if json {
                let text = serde_json::to_string_pretty(&hits)?;
                emit(None, &format!("{text}\n"))
            } else {
                renderer.print_search_results(&hits)
            }
        }
        Command::Export { month, output } => {
            focus_month(calendar, cfg, &month, tz)?;
            let rows = calendar.render_calendar();
            let csv = export_csv(&rows, &calendar.schedule().time_slots);
            emit(output.as_deref(), &csv)
        }
        Command::Staff => {
            let staff = calendar.schedule().load_staff_config()?;
            renderer.print_staff(&staff)
        }
    }
}

/// Applies `--month` (or the `month` setting) and then `--prev`/`--next`.
pub fn focus_month(
    calendar: &mut CalendarRenderer,
    cfg: &Config,
    args: &MonthArgs,
    tz: Tz,
) -> anyhow::Result<()> {
    let requested = args.month.clone().or_else(|| cfg.get("month"));
    if let Some(raw) = requested {
        let date =
            parse_month_arg(&raw, tz).with_context(|| format!("invalid month setting: {raw}"))?;
        calendar.set_reference(date)?;
    }

    if args.prev {
        calendar.prev_month();
    } else if args.next {
        calendar.next_month();
    }
    Ok(())
}

/// A standalone page with the same element ids as the browser view.
pub fn html_page(calendar: &CalendarRenderer) -> String {
    let month = calendar.view().month_key();
    let rows = calendar.render_calendar();
    let table = render_html_table(&rows, &calendar.schedule().time_slots);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"zh-CN\">\n\
         <head>\n<meta charset=\"utf-8\">\n<title>排班表 {month}</title>\n</head>\n\
         <body>\n\
         <div class=\"roster-toolbar\">\n\
         <button id=\"prevMonth\" type=\"button\">上个月</button>\n\
         <input id=\"monthPicker\" type=\"month\" value=\"{month}\">\n\
         <button id=\"nextMonth\" type=\"button\">下个月</button>\n\
         <button id=\"refreshData\" type=\"button\">刷新</button>\n\
         <button id=\"searchScheduleBtn\" type=\"button\">排班查询</button>\n\
         <button id=\"exportScheduleBtn\" type=\"button\">排班导出</button>\n\
         </div>\n\
         {table}\
         </body>\n\
         </html>\n"
    )
}

fn emit(output: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            write_atomic(path, contents)?;
            info!(file = %path.display(), "wrote output");
            Ok(())
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(contents.as_bytes())?;
            out.flush()?;
            Ok(())
        }
    }
}
