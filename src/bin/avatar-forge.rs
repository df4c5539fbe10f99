use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "avatar-forge", version)]
struct Cli {
    /// Print debug tracing to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one avatar as a PNG.
    Render(RenderArgs),
    /// List the available background designs.
    Designs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Params JSON; flags given here override its fields.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Background design id (see `avatar-forge designs`).
    #[arg(long)]
    design: Option<String>,

    /// First color, `#RRGGBB`.
    #[arg(long)]
    color1: Option<String>,

    /// Second color, `#RRGGBB`.
    #[arg(long)]
    color2: Option<String>,

    /// Third color, `#RRGGBB`.
    #[arg(long)]
    color3: Option<String>,

    /// Caption (at most 10 characters; empty for none).
    #[arg(long)]
    text: Option<String>,

    /// `circle` or `square`.
    #[arg(long)]
    shape: Option<String>,

    /// Seed for randomized designs.
    #[arg(long)]
    seed: Option<u64>,

    /// Caption font file.
    #[arg(long = "font")]
    font_path: Option<PathBuf>,

    /// Extra font directory, searched before system fonts. Repeatable.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Output PNG path.
    #[arg(long, default_value = avatar_forge::DEFAULT_FILENAME)]
    out: PathBuf,

    /// Print the SHA-256 of the written PNG bytes.
    #[arg(long)]
    digest: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Designs => {
            for d in avatar_forge::Design::ALL {
                println!("{:<10} {}", d.id(), d.label());
            }
            Ok(())
        }
    }
}

fn read_params_json(path: &Path) -> anyhow::Result<avatar_forge::RenderParamsDef> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open params '{}'", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse params JSON '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let base = match &args.in_path {
        Some(p) => read_params_json(p)?,
        None => avatar_forge::RenderParamsDef::default(),
    };
    let flags = avatar_forge::RenderParamsDef {
        design: args.design,
        color1: args.color1,
        color2: args.color2,
        color3: args.color3,
        text: args.text,
        shape: args.shape,
    };
    let params = base.merged_with(flags).resolve()?;

    let settings = avatar_forge::RenderSettings {
        font_path: args.font_path,
        font_dirs: args.font_dirs,
        glitch_seed: args.seed,
    };
    let mut renderer = avatar_forge::Renderer::new(settings)?;
    let image = renderer.render(&params)?;

    let png = avatar_forge::export_png(&image)?;
    avatar_forge::write_png(&png, &args.out)?;

    if args.digest {
        println!("{}", sha256_hex(&png));
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
