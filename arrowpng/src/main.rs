use anyhow::{Context, Result, bail};
use arrowsdf::prelude::*;
use clap::{ArgMatches, Command, arg};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn cli() -> Command {
    Command::new("arrowpng")
        .about("Renders antialiased SDF arrows into PNG files.")
        .version("0.1.0")
        .arg(arg!([CONFIG] "Optional TOML settings file"))
        .arg(arg!(-k --kind <KIND> "Arrow kind (curved, triangle-90/60/30, angle-90/60/30) or 'all'"))
        .arg(arg!(-m --mode <MODE> "Paint mode (filled or stroke)"))
        .arg(arg!(-r --resolution <RES> "Output resolution (WIDTHxHEIGHT)"))
        .arg(arg!(-o --output <FILE> "Output PNG file").default_value("arrow.png"))
        .arg(arg!(--"print-config" "Print the effective settings as TOML and exit"))
}

fn main() {
    env_logger::init();

    if let Err(err) = run(cli().get_matches()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(matches: ArgMatches) -> Result<()> {
    let mut settings = match matches.get_one::<String>("CONFIG") {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to read settings from '{}'", path))?,
        None => Settings::default(),
    };

    let mut kinds = vec![];
    match matches.get_one::<String>("kind").map(String::as_str) {
        Some("all") => kinds.extend(ArrowKind::iterator()),
        Some(kind) => {
            settings.kind = kind.parse()?;
            kinds.push(settings.kind);
        }
        None => kinds.push(settings.kind),
    }

    if let Some(mode) = matches.get_one::<String>("mode") {
        settings.mode = mode.parse()?;
    }

    if let Some(resolution) = matches.get_one::<String>("resolution") {
        let Some((width, height)) = parse_resolution(resolution) else {
            bail!("Invalid resolution '{}', expected WIDTHxHEIGHT", resolution);
        };
        settings.width = width;
        settings.height = height;
    }

    if matches.get_flag("print-config") {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let output = PathBuf::from(
        matches
            .get_one::<String>("output")
            .map(String::as_str)
            .unwrap_or("arrow.png"),
    );
    let rasterizer = settings.rasterizer();

    for kind in &kinds {
        let shader = settings
            .shader_for(*kind)
            .with_context(|| format!("Invalid parameters for {}", kind))?;

        let t0 = Instant::now();
        let texture = rasterizer.render(&shader);
        info!(
            "Rendered {} ({}x{}) in {}ms",
            kind,
            texture.width,
            texture.height,
            t0.elapsed().as_millis()
        );

        let path = if kinds.len() > 1 {
            output_for_kind(&output, *kind)
        } else {
            output.clone()
        };
        texture
            .save_png(&path)
            .with_context(|| format!("Failed to save '{}'", path.display()))?;
        println!("Saved {}", path.display());
    }

    Ok(())
}

fn parse_resolution(resolution: &str) -> Option<(usize, usize)> {
    let (w, h) = resolution.split_once('x')?;
    let (w, h) = (w.trim().parse().ok()?, h.trim().parse().ok()?);
    (w > 0 && h > 0).then_some((w, h))
}

/// `out.png` becomes `out-<kind>.png`.
fn output_for_kind(output: &Path, kind: ArrowKind) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "arrow".into());
    output.with_file_name(format!("{}-{}.png", stem, kind))
}
