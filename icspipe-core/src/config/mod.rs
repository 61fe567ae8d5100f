//! Declarative plugin files.

mod plugin_file;

pub use plugin_file::{
    KindConfig, PluginFile, ReplaceConfig, StageConfig, WhenConfig, parse_shift,
};
