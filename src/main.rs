use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;

use imagix::config::Options;
use imagix::graphics::{Canvas, Export};
use imagix::{logging, Cli};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    let options = cli.merge_into_options(Options::default())?;

    logging::init(options.log_level).context("Failed to initialize logging")?;
    log::info!("imagix starting");

    let mut canvas = match &options.input {
        Some(path) => Canvas::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Canvas::new(options.size.width, options.size.height)?,
    };
    log::info!("Canvas: {}x{}", canvas.width(), canvas.height());

    if let Some(fill) = options.fill {
        let handle = canvas.create_color(fill.r, fill.g, fill.b, fill.a);
        canvas.fill_origin(handle);
    }

    let export = canvas.to_image(
        options.format,
        options.output.as_deref(),
        options.quality,
        options.filter,
    )?;

    match export {
        Export::Bytes(bytes) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes).context("Failed to write to stdout")?;
            stdout.flush()?;
        }
        Export::Written => {
            if let Some(path) = &options.output {
                log::info!("Wrote {} image to {}", options.format, path.display());
            }
        }
        Export::Failed => anyhow::bail!("Could not export image as {}", options.format),
    }

    canvas.dispose();
    Ok(())
}
