use crate::config::Project;
use crate::input::{load_tree, InputArgs};
use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use genui_linter::{grade_composition, grade_tree, GradeReport, ViolationLevel};
use genui_normalizer::Normalizer;
use serde::Serialize;
use std::borrow::Cow;

#[derive(Args, Debug)]
pub struct GradeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Normalize the tree before grading
    #[arg(long)]
    pub normalize: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GradeOutput<'a> {
    normalized_by: &'a [&'static str],
    structural: &'a GradeReport,
    composition: &'a GradeReport,
    all_pass: bool,
}

/// Grade a tree; `Ok(false)` when some rule failed
pub fn grade(args: GradeArgs, project: &Project) -> Result<bool> {
    let doc = load_tree(&args.input)?;
    let options = project.grade_options()?;

    let (tree, normalized_by) = if args.normalize || project.config.normalize {
        let normalizer = Normalizer::with_catalog(options.validator.shared_catalog());
        let normalized = normalizer.run_traced(&doc);
        (normalized.document, normalized.changed)
    } else {
        (Cow::Borrowed(&doc), Vec::new())
    };

    let structural = grade_tree(&tree, &options);
    let composition = grade_composition(&tree, &options);
    let all_pass = structural.all_pass && composition.all_pass;

    match args.format {
        OutputFormat::Json => {
            let output = GradeOutput {
                normalized_by: &normalized_by,
                structural: &structural,
                composition: &composition,
                all_pass,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("🔍 {} {}", "Grading".green().bold(), args.input.input.display());
            if !normalized_by.is_empty() {
                println!("   Normalized by: {}", normalized_by.join(", ").dimmed());
            }
            println!();

            print_report("Structure", &structural);
            print_report("Composition", &composition);

            let failed = structural.failed_rules().len() + composition.failed_rules().len();
            if all_pass {
                println!("✨ {} All rules pass", "Done".green().bold());
            } else {
                println!("✨ {} {} rule(s) failed", "Done".red().bold(), failed);
            }
        }
    }

    Ok(all_pass)
}

fn print_report(title: &str, report: &GradeReport) {
    if report.results.is_empty() {
        return;
    }

    println!("{}", title.bold());
    for result in &report.results {
        let mark = if result.pass { "✓".green() } else { "✗".red() };
        println!("  {} {}", mark, result.rule);

        for violation in &result.violations {
            let level = match violation.level {
                ViolationLevel::Error => "error".red().bold(),
                ViolationLevel::Warning => "warning".yellow().bold(),
                ViolationLevel::Info => "info".blue().bold(),
            };
            match &violation.element_key {
                Some(key) => println!("      {} [{}] {}", level, key, violation.message),
                None => println!("      {} {}", level, violation.message),
            }
            if let Some(suggestion) = &violation.suggestion {
                println!("        {} {}", "💡".dimmed(), suggestion.dimmed());
            }
        }
    }
    println!();
}
