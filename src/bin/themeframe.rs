use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "themeframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a frame and write it as a PNG.
    Render(RenderArgs),
    /// Print resolved metrics and margins as JSON.
    Metrics(MetricsArgs),
}

#[derive(Args, Debug)]
struct ThemeArgs {
    /// Theme SVG containing the frame elements.
    #[arg(long, required_unless_present = "demo", conflicts_with = "demo")]
    svg: Option<PathBuf>,

    /// Use the built-in flat demo theme instead of an SVG.
    #[arg(long)]
    demo: bool,

    /// Element prefix, e.g. `hover` or `north`.
    #[arg(long, default_value = "")]
    prefix: String,

    /// Enabled borders: `all`, `none` or a list such as `top,left`.
    #[arg(long, default_value = "all")]
    borders: String,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    theme: ThemeArgs,

    /// Frame width in pixels.
    #[arg(long)]
    width: f64,

    /// Frame height in pixels.
    #[arg(long)]
    height: f64,

    /// Persistent frame cache directory.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct MetricsArgs {
    #[command(flatten)]
    theme: ThemeArgs,

    /// Frame width used for the reported contents rect.
    #[arg(long, default_value_t = 100.0)]
    width: f64,

    /// Frame height used for the reported contents rect.
    #[arg(long, default_value_t = 100.0)]
    height: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Metrics(args) => cmd_metrics(args),
    }
}

fn demo_theme() -> themeframe::SolidElementSource {
    use themeframe::PixelSize;

    let edge = [40, 44, 52, 255];
    let corner = [24, 26, 32, 255];
    themeframe::SolidElementSource::new("demo")
        .with_element("center", PixelSize::new(16, 16), [70, 76, 90, 255])
        .with_element("top", PixelSize::new(16, 6), edge)
        .with_element("bottom", PixelSize::new(16, 6), edge)
        .with_element("left", PixelSize::new(6, 16), edge)
        .with_element("right", PixelSize::new(6, 16), edge)
        .with_element("topleft", PixelSize::new(6, 6), corner)
        .with_element("topright", PixelSize::new(6, 6), corner)
        .with_element("bottomleft", PixelSize::new(6, 6), corner)
        .with_element("bottomright", PixelSize::new(6, 6), corner)
}

fn open_frame(theme: &ThemeArgs) -> anyhow::Result<themeframe::FrameSvg> {
    let opts = themeframe::FrameSvgOpts::from_env();
    let mut frame = match &theme.svg {
        Some(path) => themeframe::FrameSvg::from_svg_path(path, opts)
            .with_context(|| format!("load theme '{}'", path.display()))?,
        None => themeframe::FrameSvg::new(demo_theme(), opts),
    };

    let borders = themeframe::EnabledBorders::parse_list(&theme.borders)?;
    frame.set_element_prefix(&theme.prefix);
    frame.set_enabled_borders(borders);
    if !theme.prefix.is_empty() && frame.actual_prefix().is_empty() {
        eprintln!(
            "theme has no '{}' elements, using the default set",
            theme.prefix
        );
    }
    Ok(frame)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut frame = open_frame(&args.theme)?;
    if let Some(dir) = &args.cache_dir {
        let cache = themeframe::DiskFrameCache::new(dir)
            .with_context(|| format!("open frame cache '{}'", dir.display()))?;
        frame = frame.with_cache(Arc::new(cache));
    }

    frame.resize_frame(themeframe::Size::new(args.width, args.height));
    if !frame.is_drawable() {
        anyhow::bail!("theme has no center element for prefix '{}'", frame.prefix());
    }
    let pixmap = frame.frame_pixmap();
    if pixmap.is_empty() {
        anyhow::bail!("frame size {}x{} produced no image", args.width, args.height);
    }
    frame.flush_write_back();

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    pixmap
        .to_rgba_image()?
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

#[derive(serde::Serialize)]
struct MetricsReport {
    prefix: String,
    actual_prefix: String,
    drawable: bool,
    borders: themeframe::EnabledBorders,
    metrics: themeframe::FrameMetrics,
    margins: themeframe::Margins,
    contents_rect: [f64; 4],
}

fn cmd_metrics(args: MetricsArgs) -> anyhow::Result<()> {
    let mut frame = open_frame(&args.theme)?;
    frame.resize_frame(themeframe::Size::new(args.width, args.height));

    let r = frame.contents_rect();
    let report = MetricsReport {
        prefix: frame.prefix().to_string(),
        actual_prefix: frame.actual_prefix().to_string(),
        drawable: frame.is_drawable(),
        borders: frame.enabled_borders(),
        metrics: frame.metrics(),
        margins: frame.margins(),
        contents_rect: [r.x0, r.y0, r.x1, r.y1],
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize metrics")?
    );
    Ok(())
}
