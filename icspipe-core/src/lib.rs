//! Core engine for icspipe.
//!
//! Calendar events are run through an ordered chain of stages. A stage is
//! either a filter (may drop the event) or a pipe (mutates it in place):
//! - `descriptor`, `filter`, `pipe`, `summary_map` and `stage` define the stages
//! - `chain` orders them and `executor` applies them to a calendar
//! - `plugin` resolves a named plugin source and loads its chain
//! - `config` reads declarative TOML plugin files
//! - `ics` reads and writes calendar documents

pub mod chain;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod executor;
pub mod filter;
pub mod ics;
pub mod pipe;
pub mod plugin;
pub mod record;
pub mod stage;
pub mod summary_map;

pub use chain::Chain;
pub use descriptor::{Descriptor, Priority};
pub use error::{IcsPipeError, IcsPipeResult};
pub use executor::{RunReport, Verdict, execute};
pub use filter::Filter;
pub use pipe::Pipe;
pub use plugin::{Export, Plugin, PluginRegistry};
pub use record::EventRecord;
pub use stage::Stage;
pub use summary_map::SummaryMapPipe;
