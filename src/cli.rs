//! CLI: JSON sample(s) → (swift | objc | schema)
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::debug;

use crate::config::{Configuration, Framework, Syntax};
use crate::input::{self, Document, Selection};
use crate::{codegen, inference, output, Generation};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Swift or Objective-C model classes from sample JSON objects
#[derive(Parser, Debug)]
#[command(name = "json-fit", version)]
pub struct CommandLineInterface {
    /// debug-level logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit a single `.swift` file per input
    Swift(SwiftOut),
    /// emit a `.h` / `.m` pair per input
    Objc(ObjcOut),
    /// print the inferred type model as JSON
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; must yield exactly one value.
    #[arg(long)]
    jq_expr: Option<String>,

    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
struct GenerationSettings {
    /// root type name and output file stem (default: `Model`, or the file
    /// stem of each input when several are given)
    #[arg(long)]
    name: Option<String>,

    /// prepended to every generated type name
    #[arg(long)]
    prefix: Option<String>,

    /// appended to every generated type name
    #[arg(long)]
    suffix: Option<String>,

    #[arg(long, value_enum)]
    framework: Option<Framework>,

    /// add the framework's marker protocol (YYModel) to generated classes
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    confirms_marker_protocol: Option<bool>,

    /// leave the prefix off nested type names
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    ignore_prefix: Option<bool>,

    /// an empty array drops every later field of its object
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    legacy_empty_array_abort: Option<bool>,

    #[arg(long)]
    max_depth: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// directory the generated files are written to
    #[arg(long, default_value = "fit")]
    out_dir: PathBuf,

    /// print generated sources instead of writing them
    #[arg(long)]
    stdout: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct SwiftOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generation_settings: GenerationSettings,

    /// declare nested types inside their parent class
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    inline: Option<bool>,

    #[command(flatten)]
    output_settings: OutputSettings,
}

#[derive(clap::Parser, Debug)]
struct ObjcOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generation_settings: GenerationSettings,

    #[command(flatten)]
    output_settings: OutputSettings,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generation_settings: GenerationSettings,

    /// target whose constraints shape the model
    #[arg(long, value_enum, default_value_t = Syntax::Swift)]
    syntax: Syntax,

    /// model nested types inline (Swift only)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    inline: Option<bool>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> anyhow::Result<Vec<Document>> {
        let selection = Selection {
            json_pointer: self.json_pointer.as_deref(),
            jq_expr: self.jq_expr.as_deref(),
        };
        let documents = input::load_documents(&self.input, &selection)?;
        if documents.is_empty() {
            bail!("no input documents");
        }
        Ok(documents)
    }

    fn base_configuration(&self) -> anyhow::Result<Configuration> {
        match self.config.as_ref() {
            Some(path) => Ok(Configuration::from_path(path)?),
            None => Ok(Configuration::default()),
        }
    }
}

impl GenerationSettings {
    fn apply(&self, mut config: Configuration) -> Configuration {
        if let Some(name) = self.name.as_ref() {
            config.output_file_name = name.clone();
        }
        if let Some(prefix) = self.prefix.as_ref() {
            config.prefix = prefix.clone();
        }
        if let Some(suffix) = self.suffix.as_ref() {
            config.suffix = suffix.clone();
        }
        if let Some(framework) = self.framework {
            config.framework_dialect = framework;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(confirms) = self.confirms_marker_protocol {
            config.confirms_marker_protocol = confirms;
        }
        if let Some(ignore_prefix) = self.ignore_prefix {
            config.ignore_prefix = ignore_prefix;
        }
        if let Some(legacy) = self.legacy_empty_array_abort {
            config.legacy_empty_array_abort = legacy;
        }
        config
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Swift(target) => {
                if target.output_settings.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let mut config = target
                    .generation_settings
                    .apply(target.input_settings.base_configuration()?)
                    .with_syntax(Syntax::Swift);
                if let Some(inline) = target.inline {
                    config.use_inline_nested_types = inline;
                }
                generate_all(&target.input_settings, &target.generation_settings, &config, &target.output_settings)
            }
            Command::Objc(target) => {
                if target.output_settings.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let config = target
                    .generation_settings
                    .apply(target.input_settings.base_configuration()?)
                    .with_syntax(Syntax::Objc);
                generate_all(&target.input_settings, &target.generation_settings, &config, &target.output_settings)
            }
            Command::Schema(target) => {
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let mut config = target
                    .generation_settings
                    .apply(target.input_settings.base_configuration()?)
                    .with_syntax(target.syntax);
                if let Some(inline) = target.inline {
                    config.use_inline_nested_types = inline;
                }
                config.validate()?;

                let documents = target.input_settings.load_documents()?;
                let emitter = codegen::emitter_for(config.output_file_syntax);
                let options = emitter.infer_options(&config);
                let inferences = documents
                    .iter()
                    .map(|doc| {
                        let config = per_document(&config, &target.generation_settings, doc, documents.len());
                        inference::infer(&doc.value, &config, options)
                            .with_context(|| format!("inference failed for {}", doc.label))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;

                let schema_src = if inferences.len() == 1 {
                    serde_json::to_string_pretty(&inferences[0])?
                } else {
                    serde_json::to_string_pretty(&inferences)?
                };
                match target.out.as_ref() {
                    Some(out) => {
                        if let Some(parent) = out.parent() {
                            std::fs::create_dir_all(parent)
                                .with_context(|| format!("creating {}", parent.display()))?;
                        }
                        std::fs::write(out, &schema_src)
                            .with_context(|| format!("writing {}", out.display()))?;
                    }
                    None => println!("{schema_src}"),
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// With several inputs and no explicit `--name`, each root type is named
/// after its file.
fn per_document(
    config: &Configuration,
    settings: &GenerationSettings,
    doc: &Document,
    total: usize,
) -> Configuration {
    match doc.stem.as_deref() {
        Some(stem) if total > 1 && settings.name.is_none() => {
            config.clone().with_output_file_name(input::type_name_from_stem(stem))
        }
        _ => config.clone(),
    }
}

/// Output file names claimed by more than one input, as
/// `Feed.swift: a/feed.json, b/feed.json`.
fn output_collisions<'a>(generated: impl Iterator<Item = (&'a str, &'a Generation)>) -> Vec<String> {
    let mut owners: IndexMap<&'a str, Vec<&'a str>> = IndexMap::new();
    for (label, generation) in generated {
        for file in &generation.files {
            owners.entry(file.file_name.as_str()).or_default().push(label);
        }
    }
    owners
        .into_iter()
        .filter(|(_, labels)| labels.len() > 1)
        .map(|(file_name, labels)| format!("{file_name}: {}", labels.join(", ")))
        .collect()
}

fn generate_all(
    input_settings: &InputSettings,
    settings: &GenerationSettings,
    config: &Configuration,
    output_settings: &OutputSettings,
) -> anyhow::Result<()> {
    config.validate()?;
    let documents = input_settings.load_documents()?;
    debug!(inputs = documents.len(), "generating");

    // all text is produced before anything is written
    let results: Vec<(&Document, crate::Result<Generation>)> = documents
        .par_iter()
        .map(|doc| {
            let config = per_document(config, settings, doc, documents.len());
            (doc, crate::generate(&doc.value, &config))
        })
        .collect();

    if !output_settings.stdout {
        let generated = results
            .iter()
            .filter_map(|(doc, result)| result.as_ref().ok().map(|g| (doc.label.as_str(), g)));
        let collisions = output_collisions(generated);
        if !collisions.is_empty() {
            // refuse before the first write so no input silently replaces another
            return Err(crate::Error::input(format!(
                "several inputs produce the same output file; pass --name per run or rename the inputs:\n  {}",
                collisions.join("\n  ")
            ))
            .into());
        }
    }

    let mut failures = 0usize;
    for (doc, result) in results {
        let generation = match result {
            Ok(generation) => generation,
            Err(error) => {
                failures += 1;
                eprintln!("{} {}: {error}", "✗".red().bold(), doc.label);
                continue;
            }
        };
        for diagnostic in &generation.diagnostics {
            eprintln!("  {} {diagnostic}", "skipped".yellow());
        }
        if output_settings.stdout {
            for file in &generation.files {
                println!("{}", format!("// ——— {} ———", file.file_name).dimmed());
                print!("{}", file.contents);
            }
            continue;
        }
        let written = output::write_generation(&output_settings.out_dir, &generation)?;
        let names: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
        eprintln!("{} {} → {}", "✓".green().bold(), doc.label, names.join(", "));
    }

    if failures > 0 {
        bail!("{failures} of {} inputs failed", documents.len());
    }
    Ok(())
}
