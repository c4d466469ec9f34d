use clap::{ArgAction, Parser};
use create_gallery::config::{self, Overrides};
use create_gallery::imaging::{Geometry, ImageMagickBackend};
use create_gallery::scan::SortOrder;
use create_gallery::{output, pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "create_gallery")]
#[command(about = "Turn directories of photos into static gallery pages")]
#[command(long_about = "\
Turn directories of photos into static gallery pages

Each directory is processed on its own. Every .jpg and .png directly inside
it becomes a gallery entry; files whose names contain -thumb or -page are
treated as generated and skipped.

Generated next to the photos:

  trip/
  ├── gallery.toml          # optional per-gallery config
  ├── beach.jpg
  ├── beach-thumb.jpg       # thumbnail, made by the converter
  ├── beach.textile         # detail page (--pages)
  └── index.textile         # gallery index

Configuration is layered: built-in defaults, then --config FILE, then
DIR/gallery.toml, then command-line flags.

Run 'create_gallery --gen-config' to print a documented gallery.toml.")]
#[command(version)]
struct Cli {
    /// Gallery directories, processed in order
    directories: Vec<PathBuf>,

    /// Also write one detail page per photo
    #[arg(long)]
    pages: bool,

    /// Base URL for links; empty keeps links relative
    #[arg(long)]
    url: Option<String>,

    /// Thumbnail geometry passed to the converter
    #[arg(short, long, value_name = "WxH")]
    geometry: Option<String>,

    /// Root directory that link paths are made relative to
    #[arg(long, value_name = "DIR")]
    site_root: Option<PathBuf>,

    /// Gallery order
    #[arg(long, value_enum)]
    order: Option<SortOrder>,

    /// Extra config file, layered under each DIR/gallery.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a stock gallery.toml with all options documented
    #[arg(long)]
    gen_config: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            geometry: self.geometry.as_deref().map(Geometry::new),
            url: self.url.clone(),
            pages: self.pages,
            order: self.order,
            site_root: self.site_root.clone(),
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    if cli.directories.is_empty() {
        output::print_no_directories();
        return Ok(());
    }

    let overrides = cli.overrides();
    for dir in &cli.directories {
        let config = config::load_config(dir, cli.config.as_deref(), &overrides)?;
        let backend = ImageMagickBackend::with_program(config.converter.program.clone());
        let report = pipeline::build_gallery(&backend, dir, &config)?;
        output::print_gallery_output(&report);
    }

    Ok(())
}
