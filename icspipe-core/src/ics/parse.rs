//! ICS document parsing using the icalendar crate's parser.

use std::path::Path;

use icalendar::Calendar;
use icalendar::parser::unfold;

use crate::error::{IcsPipeError, IcsPipeResult};

/// Parse ICS content into a calendar, keeping every component.
pub fn parse_calendar(content: &str) -> IcsPipeResult<Calendar> {
    if !content.contains("BEGIN:VCALENDAR") {
        return Err(IcsPipeError::IcsParse(
            "no VCALENDAR found in document".to_string(),
        ));
    }

    let unfolded = unfold(content);
    unfolded
        .parse::<Calendar>()
        .map_err(|e| IcsPipeError::IcsParse(e.to_string()))
}

/// Read and parse an .ics file.
pub fn read_calendar(path: &Path) -> IcsPipeResult<Calendar> {
    let content = std::fs::read_to_string(path)?;
    parse_calendar(&content)
        .map_err(|e| IcsPipeError::IcsParse(format!("{}: {}", path.display(), e)))
}
