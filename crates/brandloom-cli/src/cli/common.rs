//! Common utilities shared across CLI commands.

use std::path::Path;

use anyhow::{Context as _, bail};
use brandloom::patterns::presets::find_preset;
use brandloom::{GlobalState, PatternParams, PatternTag};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A design document: the CLI's configuration file.
///
/// `params` may be omitted, in which case the defaults for `globals.pattern`
/// are used. When present, its tag wins over `globals.pattern`. A `preset`
/// names a mesh preset that replaces the parameters wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Design {
    pub globals: GlobalState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<PatternParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
}

impl Design {
    /// A design holding the default globals and parameters for one pattern.
    pub fn defaults_for(tag: PatternTag) -> Self {
        Self {
            globals: GlobalState {
                pattern: tag,
                ..GlobalState::default()
            },
            params: Some(PatternParams::defaults_for(tag)),
            preset: None,
        }
    }

    /// Read a design from YAML (`.yaml`/`.yml`) or JSON (`.json`).
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read design '{}'", path.display()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => serde_json::from_str(&text)
                .with_context(|| format!("parse JSON design '{}'", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&text)
                .with_context(|| format!("parse YAML design '{}'", path.display())),
            other => bail!(
                "unsupported design extension '{}' (expected .yaml, .yml or .json)",
                other
            ),
        }
    }

    /// Switch to another pattern. Parameters and preset for a different tag are dropped.
    pub fn with_pattern(mut self, tag: PatternTag) -> Self {
        if self.params.as_ref().is_some_and(|p| p.tag() != tag) {
            self.params = None;
            self.preset = None;
        }
        self.globals.pattern = tag;
        self
    }

    /// Settle on one tag and one parameter record.
    pub fn resolve(self) -> anyhow::Result<(GlobalState, PatternParams)> {
        let mut globals = self.globals;
        let mut params = self
            .params
            .unwrap_or_else(|| PatternParams::defaults_for(globals.pattern));
        globals.pattern = params.tag();

        if let Some(name) = self.preset {
            params = find_preset(globals.pattern, &name).with_context(|| {
                format!("no preset named '{}' for pattern {}", name, globals.pattern)
            })?;
        }
        Ok((globals, params))
    }
}

/// Seed selection for `render --seed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedArg {
    Fixed(u32),
    Random,
}

impl SeedArg {
    pub fn resolve(self) -> u32 {
        match self {
            SeedArg::Fixed(seed) => seed,
            SeedArg::Random => random_seed(),
        }
    }
}

/// A fresh seed in `[0, 2^31 - 1)`.
pub fn random_seed() -> u32 {
    rand::rng().random_range(0..i32::MAX as u32)
}

/// clap value parser for `--seed`.
pub fn parse_seed(s: &str) -> Result<SeedArg, String> {
    if s.eq_ignore_ascii_case("random") {
        return Ok(SeedArg::Random);
    }
    s.parse::<u32>()
        .map(SeedArg::Fixed)
        .map_err(|_| format!("expected a non-negative integer or 'random', got '{}'", s))
}

/// clap value parser for pattern tags.
pub fn parse_pattern(s: &str) -> Result<PatternTag, String> {
    PatternTag::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = PatternTag::all().iter().map(|t| t.name()).collect();
        format!("unknown pattern '{}' (expected one of: {})", s, names.join(", "))
    })
}

/// Create the parent directory of an output path if needed.
pub fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_parser_accepts_numbers_and_random() {
        assert_eq!(parse_seed("7"), Ok(SeedArg::Fixed(7)));
        assert_eq!(parse_seed("RANDOM"), Ok(SeedArg::Random));
        assert!(parse_seed("-3").is_err());
        assert!(parse_seed("abc").is_err());
    }

    #[test]
    fn random_seed_stays_in_range() {
        for _ in 0..100 {
            assert!(random_seed() < i32::MAX as u32);
        }
    }

    #[test]
    fn pattern_parser_uses_aliases() {
        assert_eq!(parse_pattern("bars"), Ok(PatternTag::VerticalBars));
        assert_eq!(parse_pattern("glaze"), Ok(PatternTag::Glaze));
        let err = parse_pattern("spiral").unwrap_err();
        assert!(err.contains("horizontalBands"), "lists valid names: {err}");
    }

    #[test]
    fn params_tag_overrides_globals_pattern() {
        let yaml = "globals:\n  pattern: glaze\nparams:\n  pattern: verticalBars\n  barCount: 3\n";
        let design: Design = serde_yaml::from_str(yaml).unwrap();
        let (globals, params) = design.resolve().unwrap();
        assert_eq!(globals.pattern, PatternTag::VerticalBars);
        match params {
            PatternParams::VerticalBars(p) => assert_eq!(p.bar_count, 3),
            other => panic!("unexpected params {:?}", other.tag()),
        }
    }

    #[test]
    fn missing_params_fall_back_to_defaults() {
        let design: Design = serde_yaml::from_str("globals:\n  pattern: diagonalContours\n").unwrap();
        let (globals, params) = design.resolve().unwrap();
        assert_eq!(globals.pattern, PatternTag::DiagonalContours);
        assert_eq!(params, PatternParams::defaults_for(PatternTag::DiagonalContours));
    }

    #[test]
    fn preset_replaces_params() {
        let yaml = "globals:\n  pattern: glaze\npreset: preset 3\n";
        let design: Design = serde_yaml::from_str(yaml).unwrap();
        let (_, params) = design.resolve().unwrap();
        assert_eq!(params, find_preset(PatternTag::Glaze, "Preset 3").unwrap());
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let yaml = "globals:\n  pattern: horizontalBands\npreset: Sage Horizon\n";
        let design: Design = serde_yaml::from_str(yaml).unwrap();
        assert!(design.resolve().is_err());
    }

    #[test]
    fn switching_pattern_drops_foreign_params() {
        let design = Design::defaults_for(PatternTag::VerticalBars).with_pattern(PatternTag::Glaze);
        let (globals, params) = design.resolve().unwrap();
        assert_eq!(globals.pattern, PatternTag::Glaze);
        assert_eq!(params.tag(), PatternTag::Glaze);
    }

    #[test]
    fn default_design_survives_yaml() {
        for &tag in PatternTag::all() {
            let design = Design::defaults_for(tag);
            let text = serde_yaml::to_string(&design).unwrap();
            let back: Design = serde_yaml::from_str(&text).unwrap();
            assert_eq!(back.params, design.params, "{tag}");
            assert_eq!(back.globals, design.globals, "{tag}");
        }
    }
}
