use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "brandpost", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default layout document.
    Init(InitArgs),
    /// Embed an image file into a document slot.
    SetImage(SetImageArgs),
    /// Feed recorded pointer events through an editor session.
    Replay(ReplayArgs),
    /// Export a document as a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Output document JSON.
    #[arg(long)]
    out: PathBuf,

    /// Post format.
    #[arg(long, default_value = "square")]
    format: brandpost::PostFormat,
}

#[derive(Parser, Debug)]
struct SetImageArgs {
    /// Document JSON, updated in place.
    #[arg(long)]
    doc: PathBuf,

    /// Which slot to replace.
    #[arg(long, value_enum)]
    kind: KindChoice,

    /// Image file (png, jpeg, webp, gif or bmp).
    #[arg(long)]
    file: PathBuf,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Document JSON, updated in place.
    #[arg(long)]
    doc: PathBuf,

    /// JSON array of pointer events.
    #[arg(long)]
    events: PathBuf,

    /// Preview size as `WxH`; defaults to the format's preview size.
    #[arg(long, value_parser = parse_rect)]
    rect: Option<brandpost::PreviewRect>,

    /// Editor options JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Document JSON.
    #[arg(long)]
    doc: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// TrueType/OpenType font for the text layers.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Editor options JSON (export settings are read from `export`).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    Background,
    Circle,
}

impl From<KindChoice> for brandpost::AssetKind {
    fn from(k: KindChoice) -> Self {
        match k {
            KindChoice::Background => Self::Background,
            KindChoice::Circle => Self::Circle,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Init(args) => cmd_init(args),
        Command::SetImage(args) => cmd_set_image(args),
        Command::Replay(args) => cmd_replay(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn parse_rect(s: &str) -> Result<brandpost::PreviewRect, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    if !(w > 0.0 && h > 0.0) {
        return Err("width and height must be > 0".to_owned());
    }
    Ok(brandpost::PreviewRect::new(0.0, 0.0, w, h))
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<brandpost::EditorOpts> {
    Ok(match path {
        Some(p) => brandpost::EditorOpts::from_path(p)?,
        None => brandpost::EditorOpts::default(),
    })
}

fn write_doc(path: &Path, doc: &brandpost::LayoutDocument) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, doc.to_json_pretty()?)
        .with_context(|| format!("write document '{}'", path.display()))?;
    Ok(())
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let doc = brandpost::LayoutDocument::default()
        .apply(brandpost::EditAction::SetFormat(args.format));
    write_doc(&args.out, &doc)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

// Opens a session over an in-memory store seeded with the document on disk.
fn open_session(
    doc_path: &Path,
    opts: &brandpost::EditorOpts,
) -> anyhow::Result<brandpost::EditorSession<brandpost::MemoryStore>> {
    let doc = brandpost::LayoutDocument::from_path(doc_path)?;
    let mut store = brandpost::MemoryStore::new();
    brandpost::PersistenceBridge::save(&mut store, &opts.storage_key, &doc)?;
    Ok(brandpost::EditorSession::open(store, opts))
}

fn cmd_set_image(args: SetImageArgs) -> anyhow::Result<()> {
    let opts = brandpost::EditorOpts::default();
    let mut session = open_session(&args.doc, &opts)?;
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("read image '{}'", args.file.display()))?;
    session.load_asset(args.kind.into(), &bytes, Instant::now())?;
    write_doc(&args.doc, session.document())?;
    eprintln!("updated {}", args.doc.display());
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.config.as_deref())?;
    let mut session = open_session(&args.doc, &opts)?;
    if let Some(rect) = args.rect {
        session.set_preview_rect(rect);
    }

    let f = File::open(&args.events)
        .with_context(|| format!("open events '{}'", args.events.display()))?;
    let events: Vec<brandpost::PointerEvent> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse events JSON")?;

    for ev in &events {
        if let Some(tap) = session.handle_event(ev, Instant::now()) {
            println!("tap {:?} at ({}, {})", tap.target, ev.x, ev.y);
        }
    }
    session.flush(Instant::now());

    write_doc(&args.doc, session.document())?;
    eprintln!(
        "replayed {} events, wrote {}",
        events.len(),
        args.doc.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.config.as_deref())?;
    let doc = brandpost::LayoutDocument::from_path(&args.doc)?;
    let rasterizer = match &args.font {
        Some(p) => brandpost::CpuRasterizer::from_font_path(p)?,
        None => brandpost::CpuRasterizer::new(),
    };

    let exporter = brandpost::Exporter::new(rasterizer, opts.export);
    let image = match exporter.export(&doc)? {
        brandpost::ExportOutcome::Done(image) => image,
        brandpost::ExportOutcome::Busy => anyhow::bail!("an export is already running"),
    };
    image.save_png(&args.out)?;

    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        image.width,
        image.height
    );
    Ok(())
}
