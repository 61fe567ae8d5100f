//! ICS document generation.

use icalendar::Calendar;

const PRODID: &str = "PRODID:-//icspipe//EN";

/// What `Calendar::new()` puts in PRODID.
const WRITER_PRODID: &str = "PRODID:ICALENDAR-RS";

/// Serialize a calendar to ICS text.
///
/// The icalendar writer stamps any event without a DTSTAMP with the current
/// time, so output for such events differs between runs.
pub fn generate_calendar(calendar: &Calendar) -> String {
    tidy_calendar_header(&calendar.to_string())
}

/// Clean up ICS output from the icalendar crate
/// - The writer emits its own VERSION/PRODID/CALSCALE ahead of the ones
///   carried over from the source document; keep one of each
/// - Keep the source document's PRODID; ours only stands in for the
///   writer's placeholder or a missing one
fn tidy_calendar_header(ics: &str) -> String {
    let prodid = source_prodid(ics).unwrap_or(PRODID);
    let mut result = String::with_capacity(ics.len());
    let mut depth = 0usize;
    let mut seen_version = false;
    let mut seen_prodid = false;
    let mut seen_calscale = false;

    for line in ics.lines() {
        if line.starts_with("BEGIN:") {
            depth += 1;
        }

        if depth == 1 {
            if line.starts_with("VERSION:") {
                if seen_version {
                    continue;
                }
                seen_version = true;
            } else if line.starts_with("PRODID:") {
                if !seen_prodid {
                    result.push_str(prodid);
                    result.push_str("\r\n");
                    seen_prodid = true;
                }
                continue;
            } else if line.starts_with("CALSCALE:") {
                if seen_calscale {
                    continue;
                }
                seen_calscale = true;
            }
        }

        if line.starts_with("END:") {
            depth = depth.saturating_sub(1);
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// First top-level PRODID line that did not come from the icalendar writer.
fn source_prodid(ics: &str) -> Option<&str> {
    let mut depth = 0usize;
    for line in ics.lines() {
        if line.starts_with("BEGIN:") {
            depth += 1;
        } else if line.starts_with("END:") {
            depth = depth.saturating_sub(1);
        } else if depth == 1 && line.starts_with("PRODID:") && line != WRITER_PRODID {
            return Some(line);
        }
    }
    None
}
