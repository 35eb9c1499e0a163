//! Golden-file runner: regenerate every case under `fixtures/` and diff it
//! against `fixtures/<case>/expected/`.
//!
//! A case is a directory holding `input.json` and an optional `config.json`.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use json_fit::Configuration;
use regex::Regex;

#[derive(Parser, Debug)]
struct Args {
    /// directory containing one sub-directory per case
    #[arg(long, default_value = "fixtures")]
    fixtures: PathBuf,

    /// rewrite the expected files instead of comparing
    #[arg(long)]
    bless: bool,

    /// only run cases whose name matches this regex
    #[arg(long)]
    filter: Option<Regex>,
}

enum Outcome {
    Pass,
    Blessed,
    Fail(Vec<String>),
}

fn main() -> ExitCode {
    let args = Args::parse();
    let cases = match list_cases(&args.fixtures, args.filter.as_ref()) {
        Ok(cases) => cases,
        Err(error) => {
            eprintln!("{} {error}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    let mut failed = 0usize;
    for case in &cases {
        let name = case.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        match run_case(case, args.bless) {
            Ok(Outcome::Pass) => eprintln!("{} {name}", "pass".green()),
            Ok(Outcome::Blessed) => eprintln!("{} {name}", "blessed".cyan()),
            Ok(Outcome::Fail(problems)) => {
                failed += 1;
                eprintln!("{} {name}", "FAIL".red().bold());
                for problem in problems {
                    eprintln!("    {problem}");
                }
            }
            Err(error) => {
                failed += 1;
                eprintln!("{} {name}: {error}", "ERROR".red().bold());
            }
        }
    }

    eprintln!("{} cases, {} failed", cases.len(), failed);
    if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn list_cases(root: &Path, filter: Option<&Regex>) -> Result<Vec<PathBuf>, String> {
    let entries = std::fs::read_dir(root).map_err(|e| format!("{}: {e}", root.display()))?;
    let mut cases: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.join("input.json").is_file())
        .filter(|path| {
            let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
            filter.is_none_or(|re| re.is_match(&name))
        })
        .collect();
    cases.sort();
    Ok(cases)
}

fn run_case(case: &Path, bless: bool) -> Result<Outcome, String> {
    let input_path = case.join("input.json");
    let source = std::fs::read_to_string(&input_path).map_err(|e| format!("{}: {e}", input_path.display()))?;

    let config_path = case.join("config.json");
    let config = if config_path.is_file() {
        Configuration::from_path(&config_path).map_err(|e| e.to_string())?
    } else {
        Configuration::default()
    };

    let generation = json_fit::generate_from_str(&source, &config).map_err(|e| e.to_string())?;
    let expected_dir = case.join("expected");

    if bless {
        json_fit::output::write_generation(&expected_dir, &generation).map_err(|e| e.to_string())?;
        return Ok(Outcome::Blessed);
    }

    let mut problems = Vec::new();
    for file in &generation.files {
        let path = expected_dir.join(&file.file_name);
        match std::fs::read_to_string(&path) {
            Ok(expected) if expected == file.contents => {}
            Ok(expected) => problems.push(first_difference(&file.file_name, &expected, &file.contents)),
            Err(_) => problems.push(format!("{}: no expected file (run with --bless)", file.file_name)),
        }
    }
    if problems.is_empty() { Ok(Outcome::Pass) } else { Ok(Outcome::Fail(problems)) }
}

fn first_difference(file_name: &str, expected: &str, actual: &str) -> String {
    let mut expected_lines = expected.lines();
    let mut actual_lines = actual.lines();
    let mut line = 1usize;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (Some(e), Some(a)) if e == a => line += 1,
            (e, a) => {
                return format!(
                    "{file_name}:{line}: expected {:?}, got {:?}",
                    e.unwrap_or("<eof>"),
                    a.unwrap_or("<eof>")
                );
            }
        }
    }
}
