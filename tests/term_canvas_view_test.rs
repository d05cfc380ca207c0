use tui_wireframe::core::{Camera, Mesh, MeshArena, RenderConfig, Renderer, Scene};
use tui_wireframe::term::{
    build_three_zone_gradient, init_color_pairs, nearest_xterm256, CanvasView, ColorSources,
    ColorTier, HudStats, TermCaps, TermColor, TermPalette, Viewport,
};
use tui_wireframe::types::{DVec3, Rgb};

const OBJECT: Rgb = Rgb::new(208, 221, 20);
const BACKGROUND: Rgb = Rgb::new(14, 14, 44);
const FOG: Rgb = Rgb::new(141, 5, 130);

fn sources() -> ColorSources {
    ColorSources::new(Some(OBJECT), Some(BACKGROUND), Some(FOG))
}

fn cube_frame(
    palette: &mut TermPalette,
    config: &RenderConfig,
) -> tui_wireframe::term::FrameBuffer {
    let mut arena = MeshArena::new();
    let cube = arena.insert(Mesh::cube());
    let mut scene = Scene::new();
    scene.add(cube, DVec3::ZERO);

    let (canvas, _) = Renderer::new()
        .render(81, 24, &scene, &arena, &Camera::default(), config)
        .unwrap();
    let pairs = init_color_pairs(palette, &sources(), config.gradient_steps(), config.use_color);
    CanvasView::new().render(
        &canvas,
        config,
        &pairs,
        palette,
        &HudStats::default(),
        Viewport::new(81, 24),
    )
}

#[test]
fn truecolor_frame_uses_exact_colors() {
    let mut palette = TermPalette::new(TermCaps::from_vars("xterm-256color", "truecolor"));
    let config = RenderConfig::default();
    let fb = cube_frame(&mut palette, &config);

    let glyphs: Vec<_> = fb
        .cells()
        .iter()
        .skip(fb.width() as usize)
        .filter(|c| c.ch != ' ')
        .collect();
    assert!(!glyphs.is_empty());
    // The whole cube sits well inside the first fog zone.
    for cell in glyphs {
        assert_eq!(cell.style.fg, TermColor::Rgb(OBJECT));
        assert_eq!(cell.style.bg, TermColor::Rgb(BACKGROUND));
    }
    // Empty cells carry the background fill.
    assert_eq!(
        fb.get(80, 23).map(|c| c.style.bg),
        Some(TermColor::Rgb(BACKGROUND))
    );
}

#[test]
fn xterm256_frame_uses_nearest_indices() {
    let mut palette = TermPalette::new(TermCaps::from_vars("xterm-256color", ""));
    let config = RenderConfig::default();
    let fb = cube_frame(&mut palette, &config);

    let fg = TermColor::Indexed(nearest_xterm256(OBJECT));
    let bg = TermColor::Indexed(nearest_xterm256(BACKGROUND));
    let glyph = fb
        .cells()
        .iter()
        .skip(fb.width() as usize)
        .find(|c| c.ch != ' ')
        .unwrap();
    assert_eq!((glyph.style.fg, glyph.style.bg), (fg, bg));
}

#[test]
fn color_toggle_off_uses_terminal_defaults() {
    let mut palette = TermPalette::new(TermCaps::from_vars("xterm-256color", "truecolor"));
    let mut config = RenderConfig::default();
    config.use_color = false;
    let fb = cube_frame(&mut palette, &config);
    assert!(fb
        .cells()
        .iter()
        .all(|c| c.style.fg == TermColor::Default && c.style.bg == TermColor::Default));
}

#[test]
fn header_is_centered_and_bold() {
    let mut palette = TermPalette::new(TermCaps::from_vars("dumb", ""));
    let config = RenderConfig::default();
    let fb = cube_frame(&mut palette, &config);

    let header = fb.row_text(0);
    assert!(header.starts_with('='));
    assert!(header.contains(" OBJ:0 | V:0 F:0 | FPS:0 | 0.0ms | ["));
    // 80 usable columns; the last terminal column stays blank.
    assert_eq!(header.chars().nth(79), Some('='));
    assert_eq!(header.chars().nth(80), Some(' '));
    assert!(fb.get(0, 0).map(|c| c.style.bold).unwrap_or(false));
}

#[test]
fn gradient_feeds_pairs_in_order() {
    let mut palette = TermPalette::new(TermCaps::from_vars("xterm-256color", "truecolor"));
    let pairs = init_color_pairs(&mut palette, &sources(), 15, true);
    assert_eq!(pairs.tier, ColorTier::TrueColor);

    let gradient = build_three_zone_gradient(&sources(), 15);
    for (i, rgb) in gradient.iter().enumerate() {
        assert_eq!(
            palette.pair_style(pairs.pair_for(i)).fg,
            TermColor::Rgb(*rgb)
        );
    }
}
