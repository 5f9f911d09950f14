//! Save-the-date calendar file
//!
//! Renders the wedding as an iCalendar (`.ics`) document that guests can
//! import into their calendar app. Times are floating local times, so the
//! event shows at 4 PM wherever the guest's calendar lives.

use chrono::NaiveDateTime;

/// MIME type for the download
pub const ICS_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

const ICS_DATE_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Longest content line in octets before folding
const MAX_LINE_OCTETS: usize = 75;

/// A single calendar event
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub product_id: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub summary: String,
    pub description: String,
    pub location: String,
    /// Page the guest downloaded the file from
    pub url: Option<String>,
}

impl CalendarEvent {
    /// Render as an iCalendar document with CRLF line endings
    pub fn to_ics(&self) -> String {
        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{}", self.product_id),
            "BEGIN:VEVENT".to_string(),
            format!("DTSTART:{}", self.starts_at.format(ICS_DATE_FORMAT)),
            format!("DTEND:{}", self.ends_at.format(ICS_DATE_FORMAT)),
            format!("SUMMARY:{}", escape_text(&self.summary)),
            format!("DESCRIPTION:{}", escape_text(&self.description)),
            format!("LOCATION:{}", escape_text(&self.location)),
        ];
        if let Some(url) = &self.url {
            lines.push(format!("URL:{}", url));
        }
        lines.push("STATUS:CONFIRMED".to_string());
        lines.push("END:VEVENT".to_string());
        lines.push("END:VCALENDAR".to_string());

        let mut out = String::new();
        for line in lines {
            out.push_str(&fold_line(&line));
            out.push_str("\r\n");
        }
        out
    }
}

/// Escape a TEXT value: backslash, semicolon, comma and newlines
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Split a content line into 75-octet chunks joined by CRLF + space,
/// never cutting a UTF-8 sequence
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            // the leading space counts towards the continuation line
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out
}
