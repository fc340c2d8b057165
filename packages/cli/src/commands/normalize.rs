use crate::config::Project;
use crate::input::{load_tree, InputArgs};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Print the normalized tree as JSON
pub fn normalize(args: NormalizeArgs, project: &Project) -> Result<()> {
    let doc = load_tree(&args.input)?;
    let normalized = project.normalizer()?.run_traced(&doc);

    println!("{}", serde_json::to_string_pretty(normalized.document.as_ref())?);

    if normalized.is_changed() {
        eprintln!(
            "{} {}",
            "Normalized".green().bold(),
            normalized.changed.join(", ")
        );
    } else {
        eprintln!("{} Tree already in normal form", "✓".green());
    }

    Ok(())
}
