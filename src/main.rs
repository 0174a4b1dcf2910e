use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use markboard::Config;
use markboard::draw::{Background, color, render};
use markboard::engine::{CanvasEngine, Tool};
use markboard::util::{Point, Size};

#[derive(Parser, Debug)]
#[command(name = "markboard")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("MARKBOARD_GIT_HASH"), ")"))]
#[command(about = "Headless annotation canvas engine: tool showcase and PNG export")]
struct Cli {
    /// Background PNG image to annotate
    #[arg(long, short = 'b', value_name = "PNG")]
    background: Option<PathBuf>,

    /// Output PNG path (defaults to a timestamped file name)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Logical canvas size as WIDTHxHEIGHT (defaults to the configured size)
    #[arg(long, short = 's', value_name = "WxH")]
    size: Option<String>,

    /// Export at the background image's native pixel size
    #[arg(long, action = ArgAction::SetTrue)]
    native_size: bool,

    /// Explicit config file path (defaults to ~/.config/markboard/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let canvas_size = match &cli.size {
        Some(spec) => parse_size(spec)?,
        None => config.canvas_size(),
    };

    if cli.native_size && cli.background.is_none() {
        anyhow::bail!("--native-size requires --background");
    }

    let mut engine = CanvasEngine::with_style(canvas_size, config.style_state());
    engine.set_scale_factor(config.canvas.scale_factor);

    if let Some(path) = &cli.background {
        let bg = Background::from_png_path(path)
            .with_context(|| format!("Failed to load background {}", path.display()))?;
        engine.set_background(bg);
    }

    run_showcase(&mut engine);
    log::info!("Showcase committed {} items", engine.items().len());

    let surface = engine
        .capture_image(cli.native_size)
        .context("Failed to render the canvas")?;
    let output = cli.output.unwrap_or_else(default_output_path);
    render::write_png(&surface, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {}x{} image to {}",
        surface.width(),
        surface.height(),
        output.display()
    );
    Ok(())
}

/// Draws one example of every construction tool in a grid, then
/// demonstrates a selection edit, all through the public pointer API.
fn run_showcase(engine: &mut CanvasEngine) {
    let tools: Vec<Tool> = Tool::ALL
        .iter()
        .copied()
        .filter(|t| t.creates_items())
        .collect();
    let palette = [
        color::RED,
        color::BLUE,
        color::GREEN,
        color::ORANGE,
        color::PINK,
        color::BLACK,
    ];

    let cols = 5;
    let rows = tools.len().div_ceil(cols);
    let size = engine.canvas_size();
    let cell_w = size.width / cols as f64;
    let cell_h = size.height / rows as f64;

    for (i, tool) in tools.iter().enumerate() {
        let col = (i % cols) as f64;
        let row = (i / cols) as f64;
        let a = Point::new(
            (col + 0.15) * cell_w,
            (row + 0.15) * cell_h,
        );
        let b = Point::new(
            (col + 0.85) * cell_w,
            (row + 0.85) * cell_h,
        );

        engine.set_stroke_color(palette[i % palette.len()]);
        engine
            .set_fill_color(matches!(*tool, Tool::Star | Tool::Pentagon).then_some(color::YELLOW));
        engine.set_dash_pattern(matches!(*tool, Tool::Oval).then(|| vec![8.0, 4.0]));
        engine.set_tool(*tool);

        engine.pointer_down(a);
        if *tool == Tool::Pen {
            // A little zig-zag; the pen keeps every raw point
            let mid_y = (a.y + b.y) / 2.0;
            for step in 1..=6 {
                let t = step as f64 / 6.0;
                let x = a.x + (b.x - a.x) * t;
                let y = if step % 2 == 0 { mid_y } else { b.y };
                engine.pointer_move(Point::new(x, y));
            }
        } else {
            engine.pointer_move(Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0));
        }
        engine.pointer_up(b);
        log::debug!(
            "Drew {} sample in {}",
            tool.label(),
            color::color_to_name(&engine.style().stroke_color)
        );
    }

    // Select the first sample and thicken it through the edit surface
    engine.set_tool(Tool::Selector);
    let first_center = Point::new(cell_w * 0.5, cell_h * 0.85);
    engine.pointer_down(first_center);
    engine.pointer_up(first_center);
    if engine.selection().is_some() {
        engine.update_selected_line_width(engine.style().line_width * 2.0);
    }
}

/// Parses a "WIDTHxHEIGHT" size argument.
fn parse_size(spec: &str) -> Result<Size> {
    let parse = |part: Option<&str>| -> Option<f64> { part?.trim().parse().ok() };
    let mut parts = spec.split(['x', 'X']);
    let size = match (parse(parts.next()), parse(parts.next()), parts.next()) {
        (Some(width), Some(height), None) => Size::new(width, height),
        _ => anyhow::bail!("Invalid size '{spec}', expected WIDTHxHEIGHT (e.g. 800x600)"),
    };
    if size.is_degenerate() {
        anyhow::bail!("Size '{spec}' must have positive dimensions");
    }
    Ok(size)
}

/// Timestamped default output name in the current directory.
fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "markboard-{}.png",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ))
}
