//! Stage descriptor: the name, position and applicability shared by every stage.

use std::cmp::Ordering;
use std::fmt;

use icalendar::Event;

/// Name carried by a descriptor until the loader gives it its export identifier.
pub const ANONYMOUS: &str = "anonymous";

/// Applicability or acceptance test over an event.
pub type Predicate = Box<dyn Fn(&Event) -> bool>;

/// Position of a stage in the chain. Lower runs earlier.
///
/// `Last` is the default and sorts after every finite priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Priority {
    At(i64),
    #[default]
    Last,
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Priority::At(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Priority::At(value) => write!(f, "{}", value),
            Priority::Last => write!(f, "last"),
        }
    }
}

/// Named, ordered, conditionally applicable stage header.
pub struct Descriptor {
    name: String,
    priority: Priority,
    applies_to: Option<Predicate>,
}

impl Default for Descriptor {
    fn default() -> Self {
        Descriptor {
            name: ANONYMOUS.to_string(),
            priority: Priority::Last,
            applies_to: None,
        }
    }
}

impl Descriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Descriptor {
            name: name.into(),
            ..self
        }
    }

    pub fn with_priority(self, priority: impl Into<Priority>) -> Self {
        Descriptor {
            priority: priority.into(),
            ..self
        }
    }

    /// Restrict the stage to events matching `predicate`.
    pub fn applies_when(self, predicate: impl Fn(&Event) -> bool + 'static) -> Self {
        Descriptor {
            applies_to: Some(Box::new(predicate)),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_anonymous(&self) -> bool {
        self.name == ANONYMOUS
    }

    /// Whether the stage must run on `event`. Always true without a predicate.
    pub fn applies(&self, event: &Event) -> bool {
        self.applies_to
            .as_ref()
            .is_none_or(|predicate| predicate(event))
    }

    pub fn sort_key(&self) -> (Priority, &str) {
        (self.priority, &self.name)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("conditional", &self.applies_to.is_some())
            .finish()
    }
}

/// Chain order: ascending by priority, then by name.
pub fn compare(a: &Descriptor, b: &Descriptor) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}
