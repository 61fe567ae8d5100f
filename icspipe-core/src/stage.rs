//! A chain stage: one of the filter or pipe kinds.

use std::fmt;

use icalendar::Event;

use crate::descriptor::Descriptor;
use crate::filter::Filter;
use crate::pipe::Pipe;
use crate::summary_map::SummaryMapPipe;

pub enum Stage {
    Filter(Filter),
    Pipe(Pipe),
    SummaryMap(SummaryMapPipe),
}

impl Stage {
    pub fn descriptor(&self) -> &Descriptor {
        match self {
            Stage::Filter(filter) => &filter.descriptor,
            Stage::Pipe(pipe) => &pipe.descriptor,
            Stage::SummaryMap(map) => &map.descriptor,
        }
    }

    pub fn name(&self) -> &str {
        self.descriptor().name()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Stage::Filter(_) => "filter",
            Stage::Pipe(_) => "pipe",
            Stage::SummaryMap(_) => "summary_map",
        }
    }

    /// Whether this stage must run on `event`.
    ///
    /// Summary maps ignore the descriptor predicate and only apply to
    /// summaries present in their table.
    pub fn applies(&self, event: &Event) -> bool {
        match self {
            Stage::SummaryMap(map) => map.applies(event),
            other => other.descriptor().applies(event),
        }
    }

    /// Rebuild the stage under a new name, keeping everything else.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        match self {
            Stage::Filter(mut filter) => {
                filter.descriptor = filter.descriptor.with_name(name);
                Stage::Filter(filter)
            }
            Stage::Pipe(mut pipe) => {
                pipe.descriptor = pipe.descriptor.with_name(name);
                Stage::Pipe(pipe)
            }
            Stage::SummaryMap(mut map) => {
                map.descriptor = map.descriptor.with_name(name);
                Stage::SummaryMap(map)
            }
        }
    }
}

impl From<Filter> for Stage {
    fn from(filter: Filter) -> Self {
        Stage::Filter(filter)
    }
}

impl From<Pipe> for Stage {
    fn from(pipe: Pipe) -> Self {
        Stage::Pipe(pipe)
    }
}

impl From<SummaryMapPipe> for Stage {
    fn from(map: SummaryMapPipe) -> Self {
        Stage::SummaryMap(map)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "<{} '{}' @{}>",
            self.kind(),
            self.name(),
            self.descriptor().priority()
        )
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
