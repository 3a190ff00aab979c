//! Print a complete default design document as YAML.

use brandloom::PatternTag;
use clap::Args;

use super::common::{Design, parse_pattern};

#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Pattern whose default parameters to print.
    #[arg(value_parser = parse_pattern)]
    pub pattern: PatternTag,
}

pub fn cmd_defaults(args: DefaultsArgs) -> anyhow::Result<()> {
    let text = serde_yaml::to_string(&Design::defaults_for(args.pattern))?;
    print!("{}", text);
    Ok(())
}
