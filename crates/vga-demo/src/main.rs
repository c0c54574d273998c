//! Mode 13h demo binary.
//!
//! Draws one of the demo screens into an in-memory VGA and shows it in a
//! winit window with a pixels framebuffer, or renders it headless and writes
//! PNG/BMP captures.

mod app;
mod capture;
mod config;
mod scenes;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use ibm_vga::Mode13h;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vga_raster::{Cursor, Mouse};
use winit::event_loop::EventLoop;

use crate::app::App;
use crate::config::RunnerConfig;

#[derive(Parser, Debug)]
#[command(name = "vga-demo", about = "Draw mode 13h demo screens")]
struct Args {
    #[command(subcommand)]
    scene: Scene,

    /// Render without opening a window
    #[arg(long, global = true)]
    headless: bool,

    /// Save the final screen as a PNG
    #[arg(long, global = true, value_name = "PNG")]
    screenshot: Option<PathBuf>,

    /// Save the final screen and palette as an 8-bit BMP
    #[arg(long, global = true, value_name = "BMP")]
    save_bmp: Option<PathBuf>,

    /// Window scale factor
    #[arg(long, global = true, default_value_t = RunnerConfig::default().scale)]
    scale: u32,

    /// Mouse cursor image for paint mode
    #[arg(long, global = true, value_enum, default_value_t = CursorKind::Cross)]
    cursor: CursorKind,
}

#[derive(Subcommand, Debug)]
enum Scene {
    /// Pixel grid, lines, rectangles, circles and a triangle
    Shapes,
    /// Glyphs and a multi-line string from a font strip
    Text {
        /// Font bitmap: 95 glyphs side by side, space first
        #[arg(long, value_name = "BMP")]
        font: PathBuf,
    },
    /// Show a BMP with its palette
    View {
        image: PathBuf,
    },
    /// Paint with the mouse (headless: a scripted stroke)
    Paint,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CursorKind {
    Cross,
    Pointer,
}

impl CursorKind {
    fn image(self) -> Cursor {
        match self {
            Self::Cross => Cursor::CROSS,
            Self::Pointer => Cursor::POINTER,
        }
    }
}

/// Build the chosen screen. Paint mode also returns its mouse context.
fn prepare(args: &Args) -> (Mode13h, Option<Mouse>) {
    let mut vga = Mode13h::new();
    let mut mouse = None;

    match &args.scene {
        Scene::Shapes => {
            if let Err(e) = scenes::shapes(&mut vga) {
                eprintln!("Drawing failed: {e}");
                process::exit(1);
            }
        }
        Scene::Text { font } => {
            let font_bitmap = match format_bmp::load(font, false) {
                Ok(bm) => bm,
                Err(e) => {
                    eprintln!("Failed to load font {}: {e}", font.display());
                    process::exit(1);
                }
            };
            eprintln!("Loaded font: {}", font.display());
            scenes::text(&mut vga, &font_bitmap, 10);
        }
        Scene::View { image } => {
            let bitmap = match format_bmp::load(image, true) {
                Ok(bm) => bm,
                Err(e) => {
                    eprintln!("Could not load {}: {e}", image.display());
                    process::exit(1);
                }
            };
            if let Err(e) = scenes::view(&mut vga, &bitmap) {
                eprintln!("Could not show {}: {e}", image.display());
                process::exit(1);
            }
        }
        Scene::Paint => {
            scenes::paint_palette(&mut vga);
            mouse = Some(Mouse::new(args.cursor.image()));
        }
    }

    (vga, mouse)
}

fn write_captures(args: &Args, vga: &Mode13h) {
    if let Some(ref path) = args.screenshot {
        if let Err(e) = capture::save_screenshot(vga, path) {
            eprintln!("Screenshot error: {e}");
            process::exit(1);
        }
        eprintln!("Screenshot saved to {}", path.display());
    }
    if let Some(ref path) = args.save_bmp {
        if let Err(e) = capture::save_bmp(vga, path) {
            eprintln!("Could not save {}: {e}", path.display());
            process::exit(1);
        }
        eprintln!("Screen saved to {}", path.display());
    }
}

fn run_headless(args: &Args) {
    let (mut vga, mouse) = prepare(args);
    if let Some(mut mouse) = mouse {
        scenes::paint_stroke(&mut vga, &mut mouse);
    }
    info!(retraces = vga.retrace_count(), "headless render done");
    write_captures(args, &vga);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.headless {
        run_headless(&args);
        return;
    }

    let (vga, mouse) = prepare(&args);
    let config = RunnerConfig {
        scale: args.scale.max(1),
        ..RunnerConfig::default()
    };
    let mut app = App::new(vga, mouse, config);

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            eprintln!("Failed to create event loop: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        eprintln!("Event loop error: {e}");
        process::exit(1);
    }

    let vga = app.finish();
    write_captures(&args, &vga);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands_and_globals() {
        let args = Args::try_parse_from([
            "vga-demo",
            "--headless",
            "paint",
            "--cursor",
            "pointer",
            "--save-bmp",
            "out.bmp",
        ])
        .expect("valid command line");
        assert!(args.headless);
        assert!(matches!(args.scene, Scene::Paint));
        assert!(matches!(args.cursor, CursorKind::Pointer));
        assert_eq!(args.save_bmp, Some(PathBuf::from("out.bmp")));
        assert_eq!(args.scale, 3);
    }

    #[test]
    fn text_needs_a_font() {
        assert!(Args::try_parse_from(["vga-demo", "text"]).is_err());
        let args =
            Args::try_parse_from(["vga-demo", "text", "--font", "f.bmp"]).expect("valid");
        assert!(matches!(args.scene, Scene::Text { .. }));
    }

    #[test]
    fn cursor_kinds_map_to_images() {
        assert_eq!(CursorKind::Cross.image(), Cursor::CROSS);
        assert_eq!(CursorKind::Pointer.image(), Cursor::POINTER);
    }
}
