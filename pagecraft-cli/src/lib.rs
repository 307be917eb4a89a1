//! # Pagecraft CLI
//!
//! Replays recorded builder sessions and writes the exported page.
//!
//! Configuration comes from flags or the environment:
//! `PAGECRAFT_OUTPUT` (output file), `PAGECRAFT_TITLE` (document title), and
//! `PAGECRAFT_EPOCH_MS` (fixed id timestamp, so scripts can address elements
//! as `element-{epoch}-{n}`).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod script;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pagecraft_core::markup::default_markup;
use pagecraft_core::{
    BuilderState, Clock, Element, ElementFactory, ElementId, ElementType, ExportConfig, FormSpec,
    Outcome,
};

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "pagecraft", version, about = "Drag-and-drop page builder, scripted")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a script and write the standalone HTML document.
    Build(BuildArgs),
    /// Replay a script and print the clean preview fragment.
    Preview(ReplayArgs),
    /// Replay a script and print every outcome as a JSON line.
    Replay(ReplayArgs),
    /// Print the properties form of a block type with its default values.
    Form {
        /// Block type tag (heading, paragraph, image, button, divider, spacer).
        block: String,
        /// Print the panel markup instead of JSON.
        #[arg(long)]
        html: bool,
    },
    /// List the block types with their default markup.
    Blocks,
}

/// Options shared by every command that replays a script.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Path to the JSON action script.
    pub script: PathBuf,
    /// Fixed timestamp for element ids.
    #[arg(long, env = "PAGECRAFT_EPOCH_MS")]
    pub epoch_ms: Option<u64>,
}

/// Options for `build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Script to replay.
    #[command(flatten)]
    pub replay: ReplayArgs,
    /// Output file; defaults to the download name.
    #[arg(short, long, env = "PAGECRAFT_OUTPUT")]
    pub output: Option<PathBuf>,
    /// Document title.
    #[arg(long, env = "PAGECRAFT_TITLE", default_value = "My Website")]
    pub title: String,
    /// Also write the canvas snapshot (JSON) to this path.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl ReplayArgs {
    fn builder(&self, config: ExportConfig) -> BuilderState {
        let clock = self.epoch_ms.map_or(Clock::System, Clock::Fixed);
        BuilderState::with_factory(ElementFactory::with_clock(clock)).with_export_config(config)
    }

    fn replay(&self, config: ExportConfig) -> anyhow::Result<(BuilderState, Vec<Outcome>)> {
        let actions = script::load_script(&self.script)?;
        let mut state = self.builder(config);
        let outcomes = script::replay(&mut state, actions);
        Ok((state, outcomes))
    }
}

/// Run a parsed command, writing user-facing output to `out`.
///
/// # Errors
///
/// Returns an error on unreadable scripts, unknown block types, or failed
/// writes.
pub fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    match cli.command {
        Command::Build(args) => build(&args, out),
        Command::Preview(args) => {
            let (mut state, _) = args.replay(ExportConfig::default())?;
            writeln!(out, "{}", state.open_preview())?;
            Ok(())
        }
        Command::Replay(args) => {
            let (_, outcomes) = args.replay(ExportConfig::default())?;
            for outcome in outcomes {
                writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
            }
            Ok(())
        }
        Command::Form { block, html } => {
            let ty: ElementType = block
                .parse()
                .with_context(|| format!("cannot build a form for {block:?}"))?;
            let form = FormSpec::for_element(&Element::new(ElementId::from_parts(0, 1), ty));
            if html {
                writeln!(out, "{}", form.to_html())?;
            } else {
                writeln!(out, "{}", serde_json::to_string_pretty(&form)?)?;
            }
            Ok(())
        }
        Command::Blocks => {
            for ty in ElementType::ALL {
                writeln!(out, "{ty}\t{}", default_markup(ty.as_str()))?;
            }
            Ok(())
        }
    }
}

fn build(args: &BuildArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let config = ExportConfig {
        title: args.title.clone(),
        ..ExportConfig::default()
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.file_name));
    let (state, _) = args.replay.replay(config)?;

    let download = state.save();
    std::fs::write(&output, &download.body)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if let Some(path) = &args.snapshot {
        let json = state.snapshot_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    }

    tracing::info!(output = %output.display(), elements = state.canvas().len(), "page exported");
    writeln!(out, "{}", output.display())?;
    Ok(())
}
