use std::fmt::Write as _;

use crate::rows::{
  RowDescriptor,
  StaffKind
};

const CSV_BADGE_SEPARATOR: &str = "、";

/// File name offered for a month export.
pub fn export_file_name(
  month_key: &str
) -> String {
  format!("roster-{month_key}.csv")
}

/// Month grid as CSV: date, weekday and
/// one column per time slot. Core staff
/// carry a trailing `*`.
pub fn export_csv(
  rows: &[RowDescriptor],
  slots: &[String]
) -> String {
  let mut out = String::new();

  let header = ["日期", "星期"]
    .into_iter()
    .map(str::to_string)
    .chain(slots.iter().cloned())
    .map(|field| csv_field(&field))
    .collect::<Vec<_>>();
  out.push_str(&header.join(","));
  out.push_str("\r\n");

  for row in rows {
    let mut fields = vec![
      csv_field(&row.key),
      csv_field(&row.weekday_label),
    ];
    for cell in &row.cells {
      let names = cell
        .staff
        .iter()
        .map(|badge| match badge.kind {
          | StaffKind::Core => {
            format!("{}*", badge.name)
          }
          | StaffKind::Regular => {
            badge.name.clone()
          }
        })
        .collect::<Vec<_>>()
        .join(CSV_BADGE_SEPARATOR);
      fields.push(csv_field(&names));
    }
    out.push_str(&fields.join(","));
    out.push_str("\r\n");
  }

  out
}

fn csv_field(raw: &str) -> String {
  if raw.contains([',', '"', '\n', '\r'])
  {
    format!(
      "\"{}\"",
      raw.replace('"', "\"\"")
    )
  } else {
    raw.to_string()
  }
}

/// Static markup for the calendar table.
/// The body carries the `calendarBody`
/// id the browser view writes into.
pub fn render_html_table(
  rows: &[RowDescriptor],
  slots: &[String]
) -> String {
  let mut out = String::new();
  out.push_str(
    "<table class=\"roster-calendar\">\n"
  );
  out.push_str("  <thead>\n    <tr>");
  out.push_str("<th>日期</th><th>星期</th>");
  for slot in slots {
    let _ = write!(
      out,
      "<th>{}</th>",
      escape_html(slot)
    );
  }
  out.push_str("</tr>\n  </thead>\n");
  out.push_str(
    "  <tbody id=\"calendarBody\">\n"
  );
  for row in rows {
    render_html_row(&mut out, row);
  }
  out.push_str("  </tbody>\n</table>\n");
  out
}

fn render_html_row(
  out: &mut String,
  row: &RowDescriptor
) {
  match row.css_class() {
    | Some(class) => {
      let _ = write!(
        out,
        "    <tr class=\"{class}\" \
         data-date=\"{}\">",
        row.key
      );
    }
    | None => {
      let _ = write!(
        out,
        "    <tr data-date=\"{}\">",
        row.key
      );
    }
  }
  let _ = write!(
    out,
    "<td class=\"date-cell\">{}</td>\
     <td class=\"weekday-cell\">{}</td>",
    escape_html(&row.date_label),
    escape_html(&row.weekday_label)
  );
  for cell in &row.cells {
    out.push_str("<td class=\"slot-cell\">");
    for badge in &cell.staff {
      let _ = write!(
        out,
        "<div class=\"staff-item {}\">{}</div>",
        badge.kind.css_class(),
        escape_html(&badge.name)
      );
    }
    out.push_str("</td>");
  }
  out.push_str("</tr>\n");
}

pub fn escape_html(raw: &str) -> String {
  let mut out =
    String::with_capacity(raw.len());
  for ch in raw.chars() {
    match ch {
      | '&' => out.push_str("&amp;"),
      | '<' => out.push_str("&lt;"),
      | '>' => out.push_str("&gt;"),
      | '"' => out.push_str("&quot;"),
      | '\'' => out.push_str("&#39;"),
      | other => out.push(other)
    }
  }
  out
}
