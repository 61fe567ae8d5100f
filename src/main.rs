mod logging;
mod render;
mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use icspipe_core::PluginRegistry;

#[derive(Parser)]
#[command(name = "icspipe", version)]
#[command(about = "Run the events of an .ics calendar through a chain of pipes and filters")]
struct Cli {
    /// The path to the <filename>.ics
    input: PathBuf,

    /// Plugin with the pipes and filters: a built-in (e.g. "ade"), a path to a
    /// TOML plugin file, or the name of one in ~/.config/icspipe/plugins
    plugin: String,

    /// Where to write the transformed calendar
    #[arg(short, long, default_value = "out.ics")]
    output: PathBuf,

    /// Run the chain and print the report without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    let output = (!cli.dry_run).then_some(cli.output.as_path());
    run::run(&builtin_plugins(), &cli.input, &cli.plugin, output)
}

/// Registry with every plugin compiled into the binary.
fn builtin_plugins() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry.register(icspipe_plugin_ade::NAME, icspipe_plugin_ade::plugin);
    registry
}
