//! List the named mesh presets.

use brandloom::PatternTag;
use brandloom::patterns::presets::preset_names;
use clap::Args;

use super::common::parse_pattern;

#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Only list presets for this pattern.
    #[arg(value_parser = parse_pattern)]
    pub pattern: Option<PatternTag>,
}

pub fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    let tags: Vec<PatternTag> = match args.pattern {
        Some(tag) => vec![tag],
        None => PatternTag::all().to_vec(),
    };

    let mut listed = 0;
    for tag in tags {
        let names = preset_names(tag);
        if names.is_empty() {
            continue;
        }
        println!("{}:", tag);
        for name in names {
            println!("  {}", name);
        }
        listed += 1;
    }

    if listed == 0 {
        if let Some(tag) = args.pattern {
            anyhow::bail!("pattern {} has no presets", tag);
        }
    }
    Ok(())
}
