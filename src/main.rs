//! # ptraster CLI
//!
//! Command-line interface for P-touch tape label printing.
//!
//! ## Usage
//!
//! ```bash
//! # Show printer status
//! ptraster status --device /dev/usb/lp0
//!
//! # Print an image on whatever tape is installed
//! ptraster print label.png
//!
//! # Encode a job for 12mm tape into a file, with a PNG preview
//! ptraster encode label.png --media tze12 --output label.bin --png preview.png
//!
//! # List known media
//! ptraster media
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=ptraster=debug` for protocol detail.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use image::DynamicImage;
use tracing_subscriber::EnvFilter;

use ptraster::{
    DeviceTransport, Media, MediaRegistry, PtrasterError, Result,
    config::Config,
    job::{JobOptions, PrintJob},
    media::{MediaType, MediaWidth},
    protocol::{CommandBuilder, StatusInformation, query_status_information},
    raster::{RasterEncodeConfig, RasterEncoder},
};

/// ptraster - P-touch label printer utility
#[derive(Parser, Debug)]
#[command(name = "ptraster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Query and show printer status
    Status {
        /// Printer device path
        #[arg(long)]
        device: Option<String>,

        /// Print status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print an image on the installed tape
    Print {
        /// Image file; its height runs across the tape
        image: PathBuf,

        /// Printer device path
        #[arg(long)]
        device: Option<String>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Encode a print job to a file instead of a printer
    Encode {
        /// Image file; its height runs across the tape
        image: PathBuf,

        /// Output file for the command stream
        #[arg(long, short, value_name = "FILE")]
        output: PathBuf,

        /// Also save the encoded raster as a PNG preview
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// List known media
    Media {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Media name (e.g. tze12, hs6) or "auto" to ask the printer
    #[arg(long, default_value = "auto")]
    media: String,

    /// Extra left margin across the tape, in millimetres
    #[arg(long, value_name = "MM")]
    margin_left: Option<f32>,

    /// Extra right margin across the tape, in millimetres
    #[arg(long, value_name = "MM")]
    margin_right: Option<f32>,

    /// Do not cut after the label
    #[arg(long)]
    no_cut: bool,

    /// Mirror the printout
    #[arg(long)]
    mirror: bool,

    /// Chain printing: skip the final feed and cut
    #[arg(long)]
    chain: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let registry = MediaRegistry::new();
    config.apply(&registry);

    match cli.command {
        Commands::Status { device, json } => {
            let device = device.unwrap_or_else(|| config.device.clone());
            let mut transport = DeviceTransport::open(&device)?;
            let status = request_status(&mut transport, &config)?;
            if json {
                let text = serde_json::to_string_pretty(&status)
                    .map_err(|e| PtrasterError::Config(e.to_string()))?;
                println!("{}", text);
            } else {
                println!("{}", status);
                println!("Media:        {}", registry.info(status.media(&registry)).name);
            }
        }
        Commands::Print {
            image,
            device,
            layout,
        } => {
            let device = device.unwrap_or_else(|| config.device.clone());
            let img = load_image(&image)?;
            let mut transport = DeviceTransport::open(&device)?;

            let (media, media_type, media_width) = if layout.media == "auto" {
                let status = request_status(&mut transport, &config)?;
                if status.has_error() {
                    return Err(PtrasterError::Transport(format!(
                        "Printer reports: {}",
                        status.error_information
                    )));
                }
                (status.media(&registry), status.media_type, status.media_width)
            } else {
                resolve_media(&layout.media, &config)?
            };

            let options = job_options(&layout, &config, media_type, media_width)?;
            println!("Printing {} on {}...", image.display(), registry.info(media).name);
            PrintJob::new(&img, media, options, &registry).write_to(&mut transport)?;
            println!("Printed successfully!");
        }
        Commands::Encode {
            image,
            output,
            png,
            layout,
        } => {
            if layout.media == "auto" {
                return Err(PtrasterError::Config(
                    "encode needs an explicit --media (no printer to ask)".to_string(),
                ));
            }
            let img = load_image(&image)?;
            let (media, media_type, media_width) = resolve_media(&layout.media, &config)?;
            let options = job_options(&layout, &config, media_type, media_width)?;

            if let Some(png_path) = png {
                save_preview(&png_path, &img, media, &options, &registry)?;
                println!("Saved preview to {}", png_path.display());
            }

            let file = File::create(&output)?;
            PrintJob::new(&img, media, options, &registry).write_to(BufWriter::new(file))?;
            println!("Saved job to {}", output.display());
        }
        Commands::Media { json } => {
            let entries = registry.registered();
            if json {
                let list: Vec<_> = entries
                    .iter()
                    .map(|(media, info)| serde_json::json!({ "id": media, "name": media.to_string(), "info": info }))
                    .collect();
                let text = serde_json::to_string_pretty(&list)
                    .map_err(|e| PtrasterError::Config(e.to_string()))?;
                println!("{}", text);
            } else {
                println!("Available media:");
                for (media, info) in entries {
                    println!(
                        "  {:<10} {:<24} print area {:>5.2}mm, margin {:>4.2}mm",
                        media.to_string(),
                        info.name,
                        info.print_area_mm,
                        info.page_margin_mm
                    );
                }
            }
        }
    }

    Ok(())
}

/// Reset the receiver, then request and read a status packet.
fn request_status(transport: &mut DeviceTransport, config: &Config) -> Result<StatusInformation> {
    let mut cb = CommandBuilder::new(&mut *transport);
    cb.invalidate(config.invalidate_bytes)?;
    cb.initialize()?;
    query_status_information(transport)
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path)
        .map_err(|e| PtrasterError::Image(format!("Failed to load {}: {}", path.display(), e)))
}

/// Resolve a media name to its identifier and wire codes, consulting
/// custom media from the config first.
fn resolve_media(name: &str, config: &Config) -> Result<(Media, MediaType, MediaWidth)> {
    let media = Media::parse(name)
        .ok_or_else(|| PtrasterError::Config(format!("Unknown media '{}'", name)))?;
    if let Some(custom) = config.custom_media.iter().find(|c| c.id == media) {
        return Ok((media, custom.media_type, custom.media_width));
    }
    let (media_type, media_width) = media
        .wire_codes()
        .ok_or_else(|| PtrasterError::Config(format!("No media codes known for '{}'", name)))?;
    Ok((media, media_type, media_width))
}

fn job_options(
    layout: &LayoutArgs,
    config: &Config,
    media_type: MediaType,
    media_width: MediaWidth,
) -> Result<JobOptions> {
    Ok(JobOptions {
        model: config.model_code()?,
        media_type,
        media_width,
        auto_cut: config.auto_cut && !layout.no_cut,
        mirror: config.mirror || layout.mirror,
        chain: config.chain || layout.chain,
        margin_dots: config.margin_dots,
        invalidate_bytes: config.invalidate_bytes,
        margin_left_mm: layout.margin_left.unwrap_or(config.margin_left_mm),
        margin_right_mm: layout.margin_right.unwrap_or(config.margin_right_mm),
    })
}

/// Save the encoded raster as a PNG: one column per raster line, one row
/// per head dot, black where a dot prints.
fn save_preview(
    path: &Path,
    img: &DynamicImage,
    media: Media,
    options: &JobOptions,
    registry: &MediaRegistry,
) -> Result<()> {
    use image::{GrayImage, Luma};

    let config = RasterEncodeConfig::from_registry(options.model, media, registry);
    let mut encoder = RasterEncoder::new(img, Some(&config));
    encoder.set_margin(options.margin_left_mm, options.margin_right_mm);

    let width = encoder.raster_number();
    let dots = encoder.total_dots();
    let mut preview = GrayImage::from_pixel(width, dots, Luma([255]));
    for x in 0..width {
        let line = encoder.encode_column(x);
        for y in 0..dots {
            let is_black = (line[(y / 8) as usize] >> (7 - y % 8)) & 1 == 1;
            if is_black {
                preview.put_pixel(x, y, Luma([0]));
            }
        }
    }

    preview
        .save(path)
        .map_err(|e| PtrasterError::Image(format!("Failed to save PNG: {}", e)))?;
    Ok(())
}
