//! Terminal wireframe viewer (default binary).
//!
//! Loads an OBJ model (or the builtin cube), then renders it every frame into
//! a Braille/ASCII canvas with depth fog until `q` or Ctrl-C.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tui_wireframe::core::{terminal_canvas_size, Canvas, Mesh, MeshArena, RenderConfig, Renderer, Scene, Viewer};
use tui_wireframe::input::{handle_key_event, should_quit};
use tui_wireframe::term::{
    CanvasView, ColorContext, ColorSources, FrameBuffer, HudStats, TermCaps, TermPalette,
    TerminalRenderer, Viewport,
};
use tui_wireframe::types::{parse_hex_color, DVec3};

/// Input poll budget per frame (~60 fps when idle).
const FRAME_POLL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "tui-wireframe")]
#[command(about = "Depth-buffered wireframe renderer for the terminal")]
#[command(after_help = "\
examples:
  tui-wireframe                                          Demo cube (no model needed)
  tui-wireframe cobra.obj --obj-color #FF8800 --bg-color #1A1A2E
  tui-wireframe cobra.obj --fog-exp 0.3 --fog-end 200    Gentle fog, long range
  tui-wireframe cobra.obj --no-fog --ascii --mono")]
struct Cli {
    /// Path to a Wavefront .obj file
    model: Option<PathBuf>,

    /// Disable color output
    #[arg(long)]
    no_color: bool,

    /// Force monochrome output
    #[arg(long)]
    mono: bool,

    /// Use the ASCII density ramp instead of Braille
    #[arg(long)]
    ascii: bool,

    /// Disable the depth pre-pass (hidden edges show through)
    #[arg(long)]
    no_zbuffer: bool,

    /// Disable backface culling
    #[arg(long)]
    no_cull: bool,

    /// Disable depth fog
    #[arg(long)]
    no_fog: bool,

    /// Wireframe color, #RRGGBB
    #[arg(long, default_value = "#D0DD14")]
    obj_color: String,

    /// Background color, #RRGGBB
    #[arg(long, default_value = "#0E0E2C")]
    bg_color: String,

    /// Color distant edges fade toward, #RRGGBB
    #[arg(long, default_value = "#8D0582")]
    fog_color: String,

    /// View depth where fog begins
    #[arg(long, default_value_t = 3.0)]
    fog_start: f64,

    /// View depth where fog is fully opaque
    #[arg(long, default_value_t = 50.0)]
    fog_end: f64,

    /// Fog curve exponent: <1 slow start, 1 linear, >1 fast start
    #[arg(long, default_value_t = 0.6)]
    fog_exp: f64,

    /// Far clipping distance; objects beyond are culled
    #[arg(long, default_value_t = 150.0)]
    far_plane: f64,

    /// Number of fog gradient steps (clamped to 6-30)
    #[arg(long, default_value_t = 15, allow_negative_numbers = true)]
    gradient_steps: i64,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::detect_terminal();
        if self.no_color || self.mono {
            config.use_color = false;
        }
        if self.ascii {
            config.use_braille = false;
        }
        if self.no_zbuffer {
            config.use_zbuffer = false;
        }
        if self.no_cull {
            config.use_culling = false;
        }
        if self.no_fog {
            config.use_fog = false;
        }
        config.fog_start = self.fog_start;
        config.fog_end = self.fog_end;
        config.fog_exp = self.fog_exp;
        config.far_plane = self.far_plane;
        // Also rebuilds the fog model from the fields above.
        config.set_gradient_steps(self.gradient_steps.clamp(0, i64::from(u16::MAX)) as usize);
        config
    }

    fn color_sources(&self) -> ColorSources {
        let parse = |name: &str, s: &str| {
            let rgb = parse_hex_color(s);
            if rgb.is_none() {
                log::warn!("invalid {name} color {s:?}, using default");
            }
            rgb
        };
        ColorSources::new(
            parse("object", &self.obj_color),
            parse("background", &self.bg_color),
            parse("fog", &self.fog_color),
        )
    }
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .try_init();
    let cli = Cli::parse();

    let config = cli.render_config();
    let mut arena = MeshArena::new();
    let model = arena.insert(Mesh::load_or_cube(cli.model.as_deref()));
    let mut scene = Scene::new();
    scene.add(model, DVec3::ZERO);

    let mut palette = TermPalette::new(TermCaps::from_env());
    let colors = ColorContext::new(
        &mut palette,
        cli.color_sources(),
        config.gradient_steps(),
        config.use_color,
    );

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut viewer = Viewer::new(config, scene, model, seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut viewer, &arena, &palette, &colors);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(
    term: &mut TerminalRenderer,
    viewer: &mut Viewer,
    arena: &MeshArena,
    palette: &TermPalette,
    colors: &ColorContext,
) -> Result<()> {
    let view = CanvasView::new();
    let mut renderer = Renderer::new();
    let mut canvas = Canvas::new(0, 0);
    let mut fb = FrameBuffer::new(0, 0);

    let (vertices, faces) = arena
        .get(viewer.spawn_mesh)
        .map(|m| (m.vertices().len(), m.faces().len()))
        .unwrap_or_default();

    let mut frame_count = 0u32;
    let mut fps = 0u32;
    let mut last_fps = Instant::now();

    loop {
        // Input.
        if event::poll(FRAME_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        viewer.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let frame_start = Instant::now();

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let (cw, ch) = terminal_canvas_size(w, h).unwrap_or((0, 0));
        canvas.reset(cw, ch);
        renderer.render_into(&mut canvas, &viewer.scene, arena, &viewer.camera, &viewer.config);

        frame_count += 1;
        if last_fps.elapsed() >= Duration::from_secs(1) {
            fps = frame_count;
            frame_count = 0;
            last_fps = Instant::now();
        }

        let stats = HudStats {
            instances: viewer.scene.len(),
            vertices,
            faces,
            fps,
            frame_ms: frame_start.elapsed().as_secs_f64() * 1000.0,
        };
        view.render_into(
            &canvas,
            &viewer.config,
            colors.pairs(),
            palette,
            &stats,
            Viewport::new(w, h),
            &mut fb,
        );
        term.draw_swap(&mut fb)?;
    }
}
