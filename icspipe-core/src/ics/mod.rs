//! Calendar document reading and writing.
//!
//! Documents are decoded and encoded with the icalendar crate. The chain only
//! ever sees the `VEVENT` components; everything else is carried through.

mod generate;
mod parse;

pub use generate::generate_calendar;
pub use parse::{parse_calendar, read_calendar};
