use std::io::{self, IsTerminal, Write};

use roster_shared::{RosterEntry, RowDescriptor, RowStyle, StaffConfig, StaffKind};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color = cfg.get_bool("color")?.unwrap_or(true) && io::stdout().is_terminal();

        Ok(Self { color })
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip(self, rows, slots))]
    pub fn print_calendar(
        &mut self,
        title: &str,
        rows: &[RowDescriptor],
        slots: &[String],
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_calendar(&mut out, title, rows, slots)
    }

    pub fn write_calendar<W: Write>(
        &self,
        mut out: W,
        title: &str,
        rows: &[RowDescriptor],
        slots: &[String],
    ) -> anyhow::Result<()> {
        writeln!(out, "{title}")?;
        writeln!(out)?;

        let headers = ["日期", "星期"]
            .into_iter()
            .map(str::to_string)
            .chain(slots.iter().cloned())
            .collect::<Vec<_>>();

        let mut table = Vec::with_capacity(rows.len());
        for row in rows {
            let code = match row.style {
                Some(RowStyle::Holiday) => Some("31"),
                Some(RowStyle::Weekend) => Some("33"),
                None => None,
            };
            let mut cells = vec![
                self.paint_opt(&row.date_label, code),
                self.paint_opt(&row.weekday_label, code),
            ];
            for cell in &row.cells {
                let names = cell
                    .staff
                    .iter()
                    .map(|badge| match badge.kind {
                        StaffKind::Core => self.paint(&format!("{}*", badge.name), "1"),
                        StaffKind::Regular => badge.name.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                cells.push(names);
            }
            table.push(cells);
        }

        write_table(&mut out, headers, table)
    }

    #[tracing::instrument(skip(self, entries))]
    pub fn print_search_results(&mut self, entries: &[&RosterEntry]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_search_results(&mut out, entries)
    }

    pub fn write_search_results<W: Write>(
        &self,
        mut out: W,
        entries: &[&RosterEntry],
    ) -> anyhow::Result<()> {
        if entries.is_empty() {
            writeln!(out, "No matching roster entries.")?;
            return Ok(());
        }

        let headers = vec![
            "ID".to_string(),
            "Date".to_string(),
            "Slot".to_string(),
            "Staff".to_string(),
            "Role".to_string(),
        ];
        let rows = entries
            .iter()
            .map(|entry| {
                let role = if entry.core_staff { "core" } else { "regular" };
                vec![
                    self.paint(&entry.id.to_string(), "33"),
                    entry.date_key(),
                    entry.time_slot.clone(),
                    entry.staff_name.clone(),
                    role.to_string(),
                ]
            })
            .collect();

        write_table(&mut out, headers, rows)?;
        writeln!(out)?;
        writeln!(out, "{} entries", entries.len())?;
        Ok(())
    }

    #[tracing::instrument(skip(self, staff))]
    pub fn print_staff(&mut self, staff: &StaffConfig) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "core      {}", self.paint(&staff.core_staff, "1"))?;
        writeln!(out, "test      {}", staff.test_staffs.join(", "))?;
        Ok(())
    }

    fn paint_opt(&self, text: &str, code: Option<&str>) -> String {
        match code {
            Some(code) => self.paint(text, code),
            None => text.to_string(),
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        let padding = widths[idx].saturating_sub(UnicodeWidthStr::width(headers[idx].as_str()));
        write!(writer, "{}{} ", headers[idx], " ".repeat(padding))?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use roster_shared::{CalendarRenderer, ScheduleConfig};

    use super::*;

    #[test]
    fn calendar_table_aligns_wide_names() {
        let calendar = CalendarRenderer::new(ScheduleConfig::embedded());
        let rows = calendar.render_calendar();
        let mut buf = Vec::new();
        Renderer::plain()
            .write_calendar(&mut buf, "2026-02", &rows, &calendar.schedule().time_slots)
            .expect("write calendar");
        let text = String::from_utf8(buf).expect("utf8 output");

        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "2026-02");
        // Title, blank, header, rule and one line per day.
        assert_eq!(lines.len(), 4 + rows.len());
        let valentine = lines
            .iter()
            .find(|line| line.starts_with("2/14 "))
            .expect("line for 2/14");
        assert!(valentine.contains("郑晨昊* 林子旺 曾婷婷 陈伟强"));

        let widths = lines[2..]
            .iter()
            .map(|line| UnicodeWidthStr::width(line.trim_end()))
            .collect::<Vec<_>>();
        assert!(widths.iter().all(|w| *w <= widths[1]));
    }

    #[test]
    fn strip_ansi_removes_color_codes() {
        assert_eq!(strip_ansi("\x1b[31m2/15\x1b[0m"), "2/15");
    }

    #[test]
    fn invalid_color_setting_is_rejected() {
        let mut cfg = Config::defaults();
        cfg.apply_overrides([("color".to_string(), "sometimes".to_string())]);
        assert!(Renderer::new(&cfg).is_err());

        cfg.apply_overrides([("color".to_string(), "n".to_string())]);
        assert!(!Renderer::new(&cfg).expect("renderer").color);
    }
}
