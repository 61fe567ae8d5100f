//! TOML plugin files.
//!
//! ```toml
//! description = "Courses I follow"
//!
//! [stages.trim_a_distance]
//! kind = "pipe"
//! priority = 0
//! strip = "A DISTANCE - "
//!
//! [stages.shortens]
//! kind = "summary_map"
//! priority = 1
//! map = { "Ingénierie du logiciel" = "Ingénierie" }
//!
//! [stages.followed_courses]
//! kind = "filter"
//! accept_summaries = ["Laboratoire", "Ingénierie"]
//!
//! [stages.fix_timezone]
//! kind = "pipe"
//! shift = "2h"
//! ```
//!
//! The table key is the stage's export identifier, used as its name unless
//! `name` is set.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Duration;
use icalendar::Event;
use serde::Deserialize;

use crate::descriptor::Descriptor;
use crate::error::{IcsPipeError, IcsPipeResult};
use crate::filter::Filter;
use crate::pipe::Pipe;
use crate::plugin::{Export, Plugin};
use crate::record::EventRecord;
use crate::stage::Stage;
use crate::summary_map::SummaryMapPipe;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginFileConfig {
    #[serde(default)]
    description: String,
    #[serde(default)]
    stages: BTreeMap<String, toml::Table>,
}

/// Keys every stage table may carry, whatever its kind.
const COMMON_KEYS: &[&str] = &["kind", "name", "priority", "when"];

/// Longest accepted `shift`, about a hundred years.
const MAX_SHIFT_DAYS: i64 = 36_525;

/// One `[stages.<ident>]` table, as written.
#[derive(Debug, Clone, Deserialize)]
pub struct StageConfig {
    pub name: Option<String>,
    pub priority: Option<i64>,
    pub when: Option<WhenConfig>,
    #[serde(flatten)]
    pub kind: KindConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhenConfig {
    pub summary_in: Option<Vec<String>>,
    pub summary_contains: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindConfig {
    Filter {
        accept_summaries: Option<Vec<String>>,
        reject_summaries: Option<Vec<String>>,
    },
    Pipe {
        strip: Option<String>,
        replace: Option<ReplaceConfig>,
        shift: Option<String>,
    },
    SummaryMap {
        map: BTreeMap<String, String>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplaceConfig {
    pub from: String,
    pub to: String,
}

/// A plugin read from a TOML file. Stages are checked when the file loads.
#[derive(Debug)]
pub struct PluginFile {
    name: String,
    description: String,
    stages: BTreeMap<String, StageSpec>,
}

#[derive(Debug, Clone)]
struct StageSpec {
    name: Option<String>,
    priority: Option<i64>,
    when: Option<WhenConfig>,
    action: Action,
}

#[derive(Debug, Clone)]
enum Action {
    Accept(Vec<String>),
    Reject(Vec<String>),
    Edit(Edit),
    Rename(BTreeMap<String, String>),
}

#[derive(Debug, Clone, Default)]
struct Edit {
    strip: Option<String>,
    replace: Option<(String, String)>,
    shift: Option<Duration>,
}

impl PluginFile {
    /// Load and check a plugin file. The plugin is named after the file stem.
    pub fn load(path: &Path) -> IcsPipeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "plugin".to_string());

        Self::parse(&name, &content)
            .map_err(|e| IcsPipeError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse plugin file content. Errors name the offending stage.
    pub fn parse(name: &str, content: &str) -> Result<Self, String> {
        let config: PluginFileConfig = toml::from_str(content).map_err(|e| e.to_string())?;

        let stages = config
            .stages
            .into_iter()
            .map(|(ident, table)| {
                let spec = check_keys(&table)
                    .and_then(|()| {
                        toml::Value::Table(table)
                            .try_into::<StageConfig>()
                            .map_err(|e| e.to_string())
                    })
                    .and_then(StageSpec::from_config)
                    .map_err(|e| format!("stage '{}': {}", ident, e))?;
                Ok((ident, spec))
            })
            .collect::<Result<_, String>>()?;

        Ok(PluginFile {
            name: name.to_string(),
            description: config.description,
            stages,
        })
    }
}

/// Reject keys the stage's kind does not use, so a typo is not silently dropped.
fn check_keys(table: &toml::Table) -> Result<(), String> {
    let kind_keys: &[&str] = match table.get("kind").and_then(|kind| kind.as_str()) {
        Some("filter") => &["accept_summaries", "reject_summaries"],
        Some("pipe") => &["strip", "replace", "shift"],
        Some("summary_map") => &["map"],
        // serde reports a missing or unknown kind
        _ => return Ok(()),
    };

    match table
        .keys()
        .find(|key| !COMMON_KEYS.contains(&key.as_str()) && !kind_keys.contains(&key.as_str()))
    {
        Some(key) => Err(format!("unknown key `{}`", key)),
        None => Ok(()),
    }
}

impl Plugin for PluginFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn exports(&self) -> Vec<Export> {
        self.stages
            .iter()
            .map(|(ident, spec)| Export::new(ident.clone(), spec.build()))
            .collect()
    }
}

impl StageSpec {
    fn from_config(config: StageConfig) -> Result<Self, String> {
        let empty_when = config
            .when
            .as_ref()
            .is_some_and(|when| when.summary_in.is_none() && when.summary_contains.is_none());
        if empty_when {
            return Err("`when` needs `summary_in` or `summary_contains`".to_string());
        }
        if config.when.is_some() && matches!(config.kind, KindConfig::SummaryMap { .. }) {
            return Err("summary_map applies to its own keys and takes no `when`".to_string());
        }

        let action = match config.kind {
            KindConfig::Filter {
                accept_summaries: Some(accept),
                reject_summaries: None,
            } => Action::Accept(accept),
            KindConfig::Filter {
                accept_summaries: None,
                reject_summaries: Some(reject),
            } => Action::Reject(reject),
            KindConfig::Filter { .. } => {
                return Err(
                    "filter needs exactly one of `accept_summaries` or `reject_summaries`"
                        .to_string(),
                );
            }
            KindConfig::Pipe {
                strip: None,
                replace: None,
                shift: None,
            } => return Err("pipe needs at least one of `strip`, `replace` or `shift`".to_string()),
            KindConfig::Pipe {
                strip,
                replace,
                shift,
            } => Action::Edit(Edit {
                strip,
                replace: replace.map(|r| (r.from, r.to)),
                shift: shift.as_deref().map(parse_shift).transpose()?,
            }),
            KindConfig::SummaryMap { map } => Action::Rename(map),
        };

        Ok(StageSpec {
            name: config.name,
            priority: config.priority,
            when: config.when,
            action,
        })
    }

    fn build(&self) -> Stage {
        let mut descriptor = Descriptor::new();
        if let Some(name) = &self.name {
            descriptor = descriptor.with_name(name.clone());
        }
        if let Some(priority) = self.priority {
            descriptor = descriptor.with_priority(priority);
        }
        if let Some(when) = self.when.clone() {
            descriptor = descriptor.applies_when(move |event| when.matches(event));
        }

        match &self.action {
            Action::Accept(summaries) => {
                let summaries = summaries.clone();
                Filter::new(move |event| {
                    event
                        .label()
                        .is_some_and(|label| summaries.iter().any(|s| s == label))
                })
                .with_descriptor(descriptor)
                .into()
            }
            Action::Reject(summaries) => {
                let summaries = summaries.clone();
                Filter::new(move |event| {
                    !event
                        .label()
                        .is_some_and(|label| summaries.iter().any(|s| s == label))
                })
                .with_descriptor(descriptor)
                .into()
            }
            Action::Edit(edit) => {
                let edit = edit.clone();
                Pipe::new(move |event| edit.apply(event))
                    .with_descriptor(descriptor)
                    .into()
            }
            Action::Rename(map) => SummaryMapPipe::new(map.clone())
                .with_descriptor(descriptor)
                .into(),
        }
    }
}

impl WhenConfig {
    /// True when every condition given holds.
    fn matches(&self, event: &Event) -> bool {
        let label = event.label();

        let in_list = self
            .summary_in
            .as_ref()
            .is_none_or(|list| label.is_some_and(|l| list.iter().any(|s| s == l)));
        let contains = self
            .summary_contains
            .as_ref()
            .is_none_or(|needle| label.is_some_and(|l| l.contains(needle.as_str())));

        in_list && contains
    }
}

impl Edit {
    fn apply(&self, event: &mut Event) {
        if let Some(label) = event.label() {
            let mut edited = label.to_string();
            if let Some(strip) = &self.strip {
                edited = edited.replace(strip.as_str(), "");
            }
            if let Some((from, to)) = &self.replace {
                edited = edited.replace(from.as_str(), to);
            }
            if Some(edited.as_str()) != event.label() {
                event.set_label(&edited);
            }
        }

        if let Some(by) = self.shift {
            event.shift_times(by);
        }
    }
}

/// Parse a signed humantime duration such as `"2h"` or `"-1h 30m"`.
pub fn parse_shift(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let (negative, magnitude) = match value.strip_prefix('-') {
        Some(rest) => (true, rest.trim()),
        None => (false, value),
    };

    let std_duration = humantime::parse_duration(magnitude)
        .map_err(|e| format!("invalid shift '{}': {}", value, e))?;
    let duration = Duration::from_std(std_duration)
        .ok()
        .filter(|duration| *duration <= Duration::days(MAX_SHIFT_DAYS))
        .ok_or_else(|| format!("shift '{}' is out of range (max 100 years)", value))?;

    Ok(if negative { -duration } else { duration })
}
