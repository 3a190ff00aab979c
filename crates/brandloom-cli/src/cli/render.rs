//! Render a design document to SVG and optionally PNG.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use brandloom::export::{self, RasterJob};
use brandloom::{PatternTag, SceneStats, generate, generate_strict};
use clap::Args;
use tracing::info;

use super::common::{Design, SeedArg, ensure_parent, parse_pattern, parse_seed};

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Design document (.yaml, .yml or .json).
    pub design: PathBuf,

    /// Output SVG path. Without it (and without --png) the SVG goes to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also rasterize to this PNG path.
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Pixel scale for the PNG.
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Render this pattern instead of the one in the design.
    #[arg(short, long, value_parser = parse_pattern)]
    pub pattern: Option<PatternTag>,

    /// Override the seed: an integer, or `random`.
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<SeedArg>,

    /// Print primitive counts to stderr.
    #[arg(long)]
    pub stats: bool,

    /// Reject out-of-range parameters instead of degrading.
    #[arg(long)]
    pub strict: bool,
}

pub fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut design = Design::load(&args.design)?;
    if let Some(tag) = args.pattern {
        design = design.with_pattern(tag);
    }
    let (mut globals, params) = design.resolve()?;
    if let Some(seed) = args.seed {
        globals.seed = seed.resolve();
        info!("seed {}", globals.seed);
    }

    let scene = if args.strict {
        generate_strict(&params, &globals)?
    } else {
        generate(&params, &globals)
    };

    if args.stats {
        print_stats(globals.pattern, &scene.stats());
    }

    let svg = export::serialize(&scene)?;

    // Rasterize on a worker while the SVG is written.
    let job = args.png.as_ref().map(|_| RasterJob::spawn(scene, args.scale));

    match &args.output {
        Some(path) => {
            ensure_parent(path)?;
            std::fs::write(path, &svg).with_context(|| format!("write svg '{}'", path.display()))?;
            info!("wrote {}", path.display());
        }
        None if args.png.is_none() => {
            std::io::stdout()
                .write_all(svg.as_bytes())
                .context("write svg to stdout")?;
        }
        None => {}
    }

    if let (Some(job), Some(path)) = (job, &args.png) {
        let image = job.wait()?;
        let bytes = export::encode_png(&image)?;
        ensure_parent(path)?;
        std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
        info!("wrote {} ({}x{})", path.display(), image.width(), image.height());
    }

    Ok(())
}

fn print_stats(tag: PatternTag, stats: &SceneStats) {
    eprintln!("pattern:    {}", tag);
    eprintln!("rects:      {}", stats.rects);
    eprintln!("paths:      {}", stats.paths);
    eprintln!("polylines:  {}", stats.polylines);
    eprintln!("groups:     {}", stats.groups);
    eprintln!("mask rects: {}", stats.mask_rects);
    eprintln!("drawables:  {}", stats.drawables());
}
