use std::fs;

use roster_core::cli::{Command, MonthArgs};
use roster_core::commands::{dispatch, focus_month, html_page};
use roster_core::config::Config;
use roster_core::datastore::{RosterFile, write_atomic};
use roster_core::render::Renderer;
use roster_shared::{CalendarRenderer, RowStyle, ScheduleConfig};
use tempfile::tempdir;

#[test]
fn roster_file_feeds_the_calendar() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("roster.jsonl");
    fs::write(
        &path,
        concat!(
            "{\"id\": 1, \"date\": \"2026-03-02\", \"time_slot\": \"8:00～9:00\", \"staff_name\": \"林子旺\", \"core_staff\": 0}\n",
            "\n",
            "{\"id\": 2, \"date\": \"2026-03-02\", \"time_slot\": \"8:00～9:00\", \"staff_name\": \"郑晨昊\", \"core_staff\": 1}\n",
        ),
    )
    .expect("write roster");

    let entries = RosterFile::new(&path).load().expect("load roster");
    assert_eq!(entries.len(), 2);

    let mut calendar = CalendarRenderer::with_entries(ScheduleConfig::embedded(), entries);
    let cfg = Config::defaults();
    let args = MonthArgs {
        month: Some("2026-03".to_string()),
        ..MonthArgs::default()
    };
    focus_month(&mut calendar, &cfg, &args, chrono_tz::Asia::Shanghai).expect("focus month");

    let rows = calendar.refresh();
    let monday = rows
        .iter()
        .find(|row| row.key == "2026-03-02")
        .expect("row for 2026-03-02");
    assert_eq!(monday.style, None);
    let names = monday.cells[0]
        .staff
        .iter()
        .map(|badge| badge.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["林子旺", "郑晨昊"]);
}

#[test]
fn malformed_roster_file_reports_line() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("roster.jsonl");
    fs::write(&path, "{\"id\": 1}\n").expect("write roster");

    let err = RosterFile::new(&path).load().expect_err("missing fields");
    assert!(format!("{err:#}").contains("line 1"));
}

#[test]
fn export_command_writes_month_csv() {
    let temp = tempdir().expect("tempdir");
    let output = temp.path().join("roster-2026-02.csv");

    let mut calendar = CalendarRenderer::new(ScheduleConfig::embedded());
    let cfg = Config::defaults();
    let mut renderer = Renderer::plain();
    dispatch(
        &mut calendar,
        &cfg,
        &mut renderer,
        Command::Export {
            month: MonthArgs::default(),
            output: Some(output.clone()),
        },
    )
    .expect("export");

    let csv = fs::read_to_string(&output).expect("read export");
    assert_eq!(csv.lines().count(), 29);
    assert!(csv.contains("2026-02-15,星期日,,,,,林子旺,林子旺,林子旺"));
}

#[test]
fn next_month_flag_and_rc_month_setting() {
    let mut calendar = CalendarRenderer::new(ScheduleConfig::embedded());
    let mut cfg = Config::defaults();
    cfg.apply_overrides([("rc.month".to_string(), "2025-12".to_string())]);

    let args = MonthArgs {
        next: true,
        ..MonthArgs::default()
    };
    focus_month(&mut calendar, &cfg, &args, chrono_tz::Asia::Shanghai).expect("focus month");
    assert_eq!(calendar.view().month_key(), "2026-01");

    let bad = MonthArgs {
        month: Some("2026/01".to_string()),
        ..MonthArgs::default()
    };
    assert!(focus_month(&mut calendar, &cfg, &bad, chrono_tz::Asia::Shanghai).is_err());
}

#[test]
fn html_page_carries_host_element_ids() {
    let calendar = CalendarRenderer::new(ScheduleConfig::embedded());
    let page = html_page(&calendar);

    for id in [
        "monthPicker",
        "prevMonth",
        "nextMonth",
        "refreshData",
        "calendarBody",
        "searchScheduleBtn",
        "exportScheduleBtn",
    ] {
        assert!(page.contains(&format!("id=\"{id}\"")), "missing #{id}");
    }
    assert!(page.contains("value=\"2026-02\""));
    assert!(page.contains("class=\"holiday-row\""));

    let rows = calendar.render_calendar();
    assert_eq!(
        rows.iter()
            .filter(|row| row.style == Some(RowStyle::Holiday))
            .count(),
        8
    );
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("out.html");
    fs::write(&path, "old").expect("seed file");

    write_atomic(&path, "new").expect("write");
    assert_eq!(fs::read_to_string(&path).expect("read"), "new");
}
