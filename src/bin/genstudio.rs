use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use genstudio::{
    AspectRatio, Compositor, CompositorConfig, EntryMeta, Gallery, Palette, Prompt, RenderOptions,
    RenderParams, ShapeMode,
};

#[derive(Parser, Debug)]
#[command(name = "genstudio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single image as a PNG.
    Render(RenderArgs),
    /// Render several seed variations of the same parameters.
    Variations(VariationsArgs),
    /// List the built-in palettes.
    Palettes,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Render parameters JSON. When given, the scene flags below are ignored.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Compositor tunables JSON (defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Framing preset (4:5, 1:1 or 16:9); overrides --width/--height.
    #[arg(long)]
    aspect: Option<AspectRatio>,

    /// Long edge in pixels used with --aspect.
    #[arg(long, default_value_t = 1024)]
    size: u32,

    #[arg(long, default_value_t = 1024, allow_negative_numbers = true)]
    width: i64,

    #[arg(long, default_value_t = 1024, allow_negative_numbers = true)]
    height: i64,

    /// Built-in palette name.
    #[arg(long, default_value = "pastel")]
    palette: Palette,

    #[arg(long, default_value_t = 12)]
    shapes: u32,

    /// 0 draws fresh entropy.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// blob or spiky.
    #[arg(long, default_value = "blob")]
    mode: ShapeMode,

    #[arg(long)]
    flat: bool,

    #[arg(long)]
    shadow: bool,

    #[arg(long)]
    noise: bool,

    #[arg(long)]
    soften: bool,

    /// Caption text drawn in the bottom-left corner.
    #[arg(long, conflicts_with = "prompt")]
    label: Option<String>,

    /// Prompt JSON whose text becomes the caption.
    #[arg(long)]
    prompt: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct VariationsArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[arg(long, default_value_t = 4)]
    count: usize,

    /// Output directory; files are named `gen_<seed>.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Also write every variation into one ZIP archive.
    #[arg(long)]
    zip: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Variations(args) => cmd_variations(args),
        Command::Palettes => cmd_palettes(),
    }
}

fn load_compositor(path: Option<&Path>) -> anyhow::Result<Compositor> {
    let config = match path {
        Some(p) => {
            let json = std::fs::read_to_string(p)
                .with_context(|| format!("read compositor config '{}'", p.display()))?;
            serde_json::from_str::<CompositorConfig>(&json)
                .with_context(|| format!("parse compositor config '{}'", p.display()))?
        }
        None => CompositorConfig::default(),
    };
    Ok(Compositor::new(config)?)
}

fn load_params(scene: &SceneArgs) -> anyhow::Result<RenderParams> {
    if let Some(path) = &scene.params {
        return Ok(RenderParams::from_path(path)?);
    }

    let (width, height) = match scene.aspect {
        Some(aspect) => {
            let (w, h) = aspect.dimensions(scene.size);
            (i64::from(w), i64::from(h))
        }
        None => (scene.width, scene.height),
    };

    let label = match &scene.prompt {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read prompt '{}'", path.display()))?;
            let prompt: Prompt = serde_json::from_str(&json)
                .with_context(|| format!("parse prompt '{}'", path.display()))?;
            Some(prompt.text())
        }
        None => scene.label.clone(),
    };

    Ok(RenderParams {
        width,
        height,
        palette: scene.palette.clone(),
        shape_count: scene.shapes,
        seed: scene.seed,
        mode: scene.mode,
        options: RenderOptions {
            gradient: !scene.flat,
            shadow: scene.shadow,
            noise: scene.noise,
            soften: scene.soften,
            label,
        },
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let compositor = load_compositor(args.scene.config.as_deref())?;
    let params = load_params(&args.scene)?;

    let image = compositor.render(&params)?;

    image.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_variations(args: VariationsArgs) -> anyhow::Result<()> {
    let compositor = load_compositor(args.scene.config.as_deref())?;
    let params = load_params(&args.scene)?;

    let variations = genstudio::render_variations(&compositor, &params, args.count)?;

    let mut gallery = Gallery::new(variations.len().max(1))?;
    for v in variations.iter().rev() {
        let meta = EntryMeta {
            prompt: params.options.label.clone().unwrap_or_default(),
            seed: v.seed,
            palette: params.palette.name().unwrap_or("custom").to_string(),
            mode: params.mode,
        };
        gallery.insert(&v.image, meta)?;
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for entry in gallery.iter() {
        let out = args.out_dir.join(entry.file_name());
        std::fs::write(&out, &entry.png)
            .with_context(|| format!("write png '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }

    if let Some(zip_path) = &args.zip {
        let bytes = gallery.export_zip()?;
        std::fs::write(zip_path, bytes)
            .with_context(|| format!("write zip '{}'", zip_path.display()))?;
        eprintln!("wrote {}", zip_path.display());
    }
    Ok(())
}

fn cmd_palettes() -> anyhow::Result<()> {
    for name in Palette::names() {
        let palette = Palette::named(name)?;
        let hex: Vec<String> = palette
            .colors()
            .iter()
            .map(|c| format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b))
            .collect();
        println!("{name:<8} {}", hex.join(" "));
    }
    Ok(())
}
