use aquamark::config::{self, ToolConfig};
use aquamark::imaging::MagickBackend;
use aquamark::process::{ProcessRequest, process_image};
use aquamark::scan;
use aquamark::types::Size;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aquamark")]
#[command(about = "Batch image resizer with randomized watermark stamping")]
#[command(long_about = "\
Batch image resizer with randomized watermark stamping

Resizes each source image to a target size, optionally emits thumbnail and
secondary-resize derivatives into fixed subdirectories, then composites a
semi-transparent greyscale watermark at a random anchor + offset onto the
main output. Requires ImageMagick (`convert` and `composite`) on PATH.

With three images in the source directory, a run produces:

  Output/
  ├── sample1_wm.jpg              # Resized + watermarked
  ├── sample2_wm.jpg
  ├── sample3_wm.jpg
  ├── Thumbs/                     # With --thumbs; never watermarked
  │   └── sample1_wm.jpg ...
  └── Resizes/                    # With --resizes; never watermarked
      └── sample1_wm.jpg ...

Every flag has a default supplied by aquamark.toml; run
'aquamark gen-config' to print a documented stock config.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "aquamark.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize and watermark images
    Run(RunArgs),
    /// Print a stock aquamark.toml with all options documented
    GenConfig,
}

#[derive(Args)]
struct RunArgs {
    /// Source directory or file
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Destination directory or file
    #[arg(short = 'o', long, visible_alias = "out")]
    dest: Option<PathBuf>,

    /// Output size (e.g. 640x480)
    #[arg(long)]
    size: Option<Size>,

    /// Watermark image
    #[arg(short, long)]
    watermark: Option<PathBuf>,

    /// Append to the source filename stem; only used when the destination
    /// is a directory
    #[arg(long)]
    append: Option<String>,

    /// Output files using this filename as a base name
    #[arg(short = 'f', long)]
    output_filename: Option<String>,

    /// Filetypes to pick up when the source is a directory (comma-separated)
    #[arg(long, value_delimiter = ',')]
    types: Option<Vec<String>>,

    /// Create thumbnails
    #[arg(short = 't', long)]
    thumbs: bool,

    /// Thumbnail size (e.g. 60x40)
    #[arg(long)]
    thumbs_size: Option<Size>,

    /// Create secondary resizes
    #[arg(short = 'r', long)]
    resizes: bool,

    /// Secondary resize size (e.g. 200x400)
    #[arg(long)]
    resizes_size: Option<Size>,

    /// Print ImageMagick invocations instead of executing them
    #[arg(short = 'd', long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;

    let cli = Cli::parse();
    let config = ToolConfig::load(&cli.config)?;

    match cli.command {
        Command::Run(args) => run(&args, &config),
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(())
        }
    }
}

fn run(args: &RunArgs, config: &ToolConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = args
        .source
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.locations.source));
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.locations.target));
    let watermark = args
        .watermark
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.locations.watermark_file));
    let size = args.size.unwrap_or(config.output.size);
    let append = args.append.as_deref().unwrap_or(&config.output.append);
    let explicit_name = args
        .output_filename
        .as_deref()
        .or(config.output.default_name.as_deref());
    let filetypes = args
        .types
        .clone()
        .unwrap_or_else(|| config.locations.filetypes.clone());
    let thumbnail = args
        .thumbs
        .then(|| args.thumbs_size.unwrap_or(config.output.thumb_size));
    let resize = args
        .resizes
        .then(|| args.resizes_size.unwrap_or(config.output.resize_size));

    let backend = if args.dry_run {
        MagickBackend::dry_run()
    } else {
        MagickBackend::new()
    };
    let mut rng = rand::thread_rng();

    let sources = if source.is_dir() {
        scan::find_images(&source, &filetypes)?
    } else {
        vec![source.clone()]
    };

    let mut processed = 0usize;
    let mut failed = 0usize;
    for src in &sources {
        let request = ProcessRequest {
            source: src.as_path(),
            destination: &dest,
            watermark: &watermark,
            output_size: size,
            append,
            explicit_name,
            thumbnail,
            resize,
            thumbnail_dir: &config.locations.target_thumbnail,
            resize_dir: &config.locations.target_resizes,
        };
        match process_image(&backend, &mut rng, &request) {
            Ok(Some(outcome)) => {
                processed += 1;
                println!(
                    "  {} → {} ({})",
                    src.display(),
                    outcome.outputs.main.display(),
                    outcome.placement
                );
            }
            Ok(None) => {}
            Err(e) => {
                failed += 1;
                eprintln!("  {}: {e}", src.display());
            }
        }
    }

    println!("{processed} image(s) processed, {failed} failed");
    if failed > 0 {
        return Err(format!("{failed} image(s) failed").into());
    }
    Ok(())
}
