//! Plugin sources and chain loading.
//!
//! A plugin exposes its stages through an explicit export list, each stage
//! under a stable identifier. Loading a plugin names its anonymous stages
//! after those identifiers and sorts everything into a [`Chain`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::chain::Chain;
use crate::config::PluginFile;
use crate::error::{IcsPipeError, IcsPipeResult};
use crate::stage::Stage;

/// A stage exposed by a plugin under a stable identifier.
pub struct Export {
    pub ident: String,
    pub stage: Stage,
}

impl Export {
    pub fn new(ident: impl Into<String>, stage: impl Into<Stage>) -> Self {
        Export {
            ident: ident.into(),
            stage: stage.into(),
        }
    }
}

/// A source of stages.
pub trait Plugin {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Every stage this plugin provides. Order does not matter.
    fn exports(&self) -> Vec<Export>;
}

/// Build the chain for `plugin`.
///
/// Anonymous stages take the identifier they were exported under. A plugin
/// exporting nothing yields an empty, pass-through chain.
pub fn load_chain(plugin: &dyn Plugin) -> Chain {
    let stages: Vec<Stage> = plugin
        .exports()
        .into_iter()
        .map(|export| {
            if export.stage.descriptor().is_anonymous() {
                export.stage.renamed(export.ident)
            } else {
                export.stage
            }
        })
        .collect();

    if stages.is_empty() {
        tracing::warn!(
            "Plugin '{}' exports no stages; events pass through unchanged",
            plugin.name()
        );
    }

    let chain = Chain::new(stages);
    tracing::debug!("Found pipes and filters: {:?}", chain.stages());
    chain
}

type PluginFactory = fn() -> Box<dyn Plugin>;

/// Built-in plugins, plus lookup of TOML plugin files.
#[derive(Default)]
pub struct PluginRegistry {
    builtins: BTreeMap<String, PluginFactory>,
    plugin_dir: Option<PathBuf>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        PluginRegistry {
            builtins: BTreeMap::new(),
            plugin_dir: Self::default_plugin_dir(),
        }
    }

    /// `~/.config/icspipe/plugins` on Linux, the platform equivalent elsewhere.
    pub fn default_plugin_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("icspipe").join("plugins"))
    }

    pub fn with_plugin_dir(self, dir: Option<PathBuf>) -> Self {
        PluginRegistry {
            plugin_dir: dir,
            ..self
        }
    }

    pub fn register(&mut self, name: &str, factory: PluginFactory) -> &mut Self {
        self.builtins.insert(name.to_string(), factory);
        self
    }

    pub fn builtin_names(&self) -> Vec<&str> {
        self.builtins.keys().map(String::as_str).collect()
    }

    /// Find the plugin called `identifier`.
    ///
    /// Tried in order: a built-in of that name, a path to a TOML plugin file,
    /// then `<identifier>.toml` in the plugin directory.
    pub fn resolve(&self, identifier: &str) -> IcsPipeResult<Box<dyn Plugin>> {
        if let Some(factory) = self.builtins.get(identifier) {
            return Ok(factory());
        }

        let expanded = shellexpand::tilde(identifier);
        let path = Path::new(expanded.as_ref());
        if path.is_file() {
            return Ok(Box::new(PluginFile::load(path)?));
        }

        if let Some(dir) = &self.plugin_dir {
            let candidate = dir.join(format!("{}.toml", identifier));
            if candidate.is_file() {
                return Ok(Box::new(PluginFile::load(&candidate)?));
            }
        }

        Err(IcsPipeError::PluginNotFound {
            name: identifier.to_string(),
            available: self.builtin_names().join(", "),
        })
    }

    /// Resolve `identifier` and build its chain.
    pub fn load_chain(&self, identifier: &str) -> IcsPipeResult<Chain> {
        let plugin = self.resolve(identifier)?;
        Ok(load_chain(plugin.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::filter::Filter;
    use crate::pipe::Pipe;
    use indoc::indoc;

    struct Sample;

    impl Plugin for Sample {
        fn name(&self) -> &str {
            "sample"
        }

        fn exports(&self) -> Vec<Export> {
            vec![
                Export::new("zulu", Pipe::new(|_| {})),
                Export::new(
                    "named_elsewhere",
                    Filter::new(|_| true).with_descriptor(Descriptor::new().with_name("keeper")),
                ),
                Export::new(
                    "first",
                    Pipe::new(|_| {}).with_descriptor(Descriptor::new().with_priority(0)),
                ),
            ]
        }
    }

    struct Nothing;

    impl Plugin for Nothing {
        fn name(&self) -> &str {
            "nothing"
        }

        fn exports(&self) -> Vec<Export> {
            Vec::new()
        }
    }

    fn sample() -> Box<dyn Plugin> {
        Box::new(Sample)
    }

    fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new().with_plugin_dir(None);
        registry.register("sample", sample);
        registry
    }

    #[test]
    fn test_load_chain_names_anonymous_stages() {
        let chain = load_chain(&Sample);
        assert_eq!(chain.names(), vec!["first", "keeper", "zulu"]);
    }

    #[test]
    fn test_load_chain_empty_plugin_passes_through() {
        assert!(load_chain(&Nothing).is_empty());
    }

    #[test]
    fn test_resolve_builtin() {
        let plugin = registry().resolve("sample").unwrap();
        assert_eq!(plugin.name(), "sample");
    }

    #[test]
    fn test_resolve_unknown_lists_builtins() {
        let err = registry().load_chain("plugin.missing").err().unwrap();
        match err {
            IcsPipeError::PluginNotFound { name, available } => {
                assert_eq!(name, "plugin.missing");
                assert_eq!(available, "sample");
            }
            other => panic!("Expected PluginNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_toml_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.toml");
        std::fs::write(
            &path,
            indoc! {r#"
                [stages.only_labs]
                kind = "filter"
                accept_summaries = ["Laboratoire"]
            "#},
        )
        .unwrap();

        let chain = registry().load_chain(path.to_str().unwrap()).unwrap();
        assert_eq!(chain.names(), vec!["only_labs"]);
    }

    #[test]
    fn test_resolve_from_plugin_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("labs.toml"),
            indoc! {r#"
                [stages.rename]
                kind = "summary_map"
                map = { "TP" = "Laboratoire" }
            "#},
        )
        .unwrap();

        let registry = registry().with_plugin_dir(Some(dir.path().to_path_buf()));
        let plugin = registry.resolve("labs").unwrap();
        assert_eq!(plugin.name(), "labs");
    }
}
