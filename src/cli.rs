use crate::config::{parse_filter, parse_format, parse_hex_color, parse_quality, parse_size};
use crate::config::Options;
use crate::logging::LogLevel;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// imagix - create or convert images through a true-color canvas
#[derive(Parser, Debug, Default)]
#[command(name = "imagix")]
#[command(version)]
#[command(about = "Create or convert GIF, JPEG, PNG, WBMP and GD2 images", long_about = None)]
pub struct Cli {
    /// Image to load (gif, jpeg, jpg, png, wbmp, gd2); omit for a blank canvas
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file; encoded bytes are written to stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (gif, jpeg, interlaced-jpeg, png, png24, wbmp, gd2)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Blank canvas size (e.g., 64x64)
    #[arg(short, long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Flood fill from the top-left corner (RRGGBB or RRGGBBAA)
    #[arg(long, value_name = "COLOR")]
    pub fill: Option<String>,

    /// JPEG quality (0-100) or PNG compression level (0-9)
    #[arg(short, long, value_name = "N")]
    pub quality: Option<String>,

    /// PNG row filter (none, sub, up, avg, paeth, adaptive)
    #[arg(long, value_name = "FILTER")]
    pub filter: Option<String>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref input) = self.input {
            opts.input = Some(input.clone());
        }

        if let Some(ref output) = self.output {
            opts.output = Some(output.clone());
        }

        if let Some(ref format) = self.format {
            opts.format = parse_format(format)?;
        } else if let Some(format) = self.output.as_deref().and_then(Self::format_from_extension) {
            opts.format = format;
        }

        if let Some(ref size) = self.size {
            opts.size = parse_size(size).context("Invalid size format")?;
        }

        if let Some(ref fill) = self.fill {
            opts.fill = Some(parse_hex_color(fill)?);
        }

        if let Some(ref quality) = self.quality {
            opts.quality = Some(parse_quality(quality, opts.format)?);
        }

        if let Some(ref filter) = self.filter {
            opts.filter = Some(parse_filter(filter)?);
        }

        if self.verbose > 0 {
            opts.log_level = LogLevel::from_verbosity(self.verbose);
        }

        Ok(opts)
    }

    fn format_from_extension(path: &std::path::Path) -> Option<crate::graphics::ImageType> {
        let ext = crate::io::extension_lowercase(path)?;
        parse_format(&ext).ok()
    }
}
