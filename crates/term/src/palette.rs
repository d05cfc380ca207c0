//! Color quantization: depth gradient → terminal color pairs.
//!
//! The gradient has three zones (object → fog, fog → background, flat
//! background) and is mapped onto whatever the terminal offers. Tiers are
//! tried in [`ColorTier::RANKED`] order; the first one the terminal supports
//! wins. Failures never escape: a slot that cannot be defined falls back to
//! the nearest xterm-256 index, a pair that cannot be defined becomes pair 0,
//! and a backend that cannot start colors yields an all-zero palette.

use anyhow::Result;

use crate::core::ZoneCounts;
use crate::types::Rgb;

/// Levels of the xterm 6x6x6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Approximate RGB of the 8 basic ANSI colors.
const ANSI8: [Rgb; 8] = [
    Rgb::new(0, 0, 0),
    Rgb::new(128, 0, 0),
    Rgb::new(0, 128, 0),
    Rgb::new(128, 128, 0),
    Rgb::new(0, 0, 128),
    Rgb::new(128, 0, 128),
    Rgb::new(0, 128, 128),
    Rgb::new(192, 192, 192),
];

/// First register used for redefined colors (keeps ANSI 0-15 intact).
pub const FIRST_FREE_SLOT: u16 = 16;

/// Palette index for white; the background pair writes black on it.
const WHITE_SLOT: u16 = 7;

/// A color register as seen by [`ColorBackend::init_pair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    /// The terminal's default color.
    Default,
    Index(u16),
}

/// A curses-style color surface: numbered registers and numbered pairs.
///
/// Pair 0 is always "default on default" and cannot be redefined.
pub trait ColorBackend {
    /// Turn color handling on. An error means no color at all.
    fn start(&mut self) -> Result<()>;
    fn color_count(&self) -> Result<u16>;
    /// Whether registers can be redefined with arbitrary RGB.
    fn can_change_color(&self) -> Result<bool>;
    /// Whether [`ColorSlot::Default`] is usable as a background.
    fn supports_default_bg(&self) -> Result<bool>;
    fn init_color(&mut self, slot: u16, rgb: Rgb) -> Result<()>;
    fn init_pair(&mut self, pair: u16, fg: ColorSlot, bg: ColorSlot) -> Result<()>;
}

/// User-facing colors the gradient is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSources {
    pub object: Rgb,
    pub fog: Rgb,
    pub background: Rgb,
}

impl ColorSources {
    /// Missing colors fall back to green object, black background, and fog
    /// matching the background.
    pub fn new(object: Option<Rgb>, background: Option<Rgb>, fog: Option<Rgb>) -> Self {
        let background = background.unwrap_or(Rgb::BLACK);
        Self {
            object: object.unwrap_or(Rgb::new(0, 255, 0)),
            fog: fog.unwrap_or(background),
            background,
        }
    }
}

impl Default for ColorSources {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

/// Linear RGB ramp from `a` to `b` with `steps` entries (ties round to even).
pub fn build_gradient(a: Rgb, b: Rgb, steps: usize) -> Vec<Rgb> {
    let lerp = |x: u8, y: u8, t: f64| {
        let (x, y) = (x as f64, y as f64);
        (x + (y - x) * t).round_ties_even().clamp(0.0, 255.0) as u8
    };
    (0..steps)
        .map(|i| {
            let t = if steps > 1 {
                i as f64 / (steps - 1) as f64
            } else {
                0.0
            };
            Rgb::new(lerp(a.r, b.r, t), lerp(a.g, b.g, t), lerp(a.b, b.b, t))
        })
        .collect()
}

/// The full depth gradient: object → fog, fog → background, then flat background.
pub fn build_three_zone_gradient(sources: &ColorSources, steps: usize) -> Vec<Rgb> {
    let zones = ZoneCounts::split(steps);
    let mut out = build_gradient(sources.object, sources.fog, zones.near);
    out.extend(build_gradient(sources.fog, sources.background, zones.fog));
    out.extend(std::iter::repeat(sources.background).take(zones.far));
    out
}

/// Nearest xterm-256 index, searching the color cube and the grayscale ramp.
///
/// The grayscale entry wins only when strictly nearer than the cube entry.
pub fn nearest_xterm256(c: Rgb) -> u8 {
    let axis = |v: u8| {
        let mut best = 0;
        for i in 1..CUBE_LEVELS.len() {
            if v.abs_diff(CUBE_LEVELS[i]) < v.abs_diff(CUBE_LEVELS[best]) {
                best = i;
            }
        }
        best
    };
    let (ri, gi, bi) = (axis(c.r), axis(c.g), axis(c.b));
    let cube_idx = 16 + ri * 36 + gi * 6 + bi;
    let cube_dist = c.dist_sq(Rgb::new(CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]));

    let avg = (c.r as i32 + c.g as i32 + c.b as i32) / 3;
    let step = (avg - 3).div_euclid(10).clamp(0, 23);
    let level = (8 + step * 10) as u8;
    let gray_dist = c.dist_sq(Rgb::new(level, level, level));

    if gray_dist < cube_dist {
        (232 + step) as u8
    } else {
        cube_idx as u8
    }
}

/// Nearest of the 8 basic ANSI colors (ties go to the lower index).
pub fn nearest_ansi8(c: Rgb) -> u8 {
    let mut best = 0;
    for (i, reference) in ANSI8.iter().enumerate().skip(1) {
        if c.dist_sq(*reference) < c.dist_sq(ANSI8[best]) {
            best = i;
        }
    }
    best as u8
}

/// What the terminal reported, with failed queries already defaulted.
#[derive(Debug, Clone, Copy)]
struct Capabilities {
    colors: u16,
    can_change: bool,
    default_bg: bool,
}

/// Resolved foreground registers plus the shared background register.
struct Slots {
    fg: Vec<ColorSlot>,
    bg: ColorSlot,
}

/// A color strategy, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTier {
    /// Gradient colors written into dedicated registers.
    TrueColor,
    Xterm256,
    /// Object, fog and background each snapped to a basic ANSI color.
    Ansi8,
    Mono,
}

impl ColorTier {
    pub const RANKED: [ColorTier; 4] = [
        ColorTier::TrueColor,
        ColorTier::Xterm256,
        ColorTier::Ansi8,
        ColorTier::Mono,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorTier::TrueColor => "truecolor",
            ColorTier::Xterm256 => "xterm256",
            ColorTier::Ansi8 => "ansi8",
            ColorTier::Mono => "mono",
        }
    }

    fn supported(self, caps: Capabilities) -> bool {
        match self {
            ColorTier::TrueColor => caps.colors >= 256 && caps.can_change,
            ColorTier::Xterm256 => caps.colors >= 256,
            ColorTier::Ansi8 => caps.colors >= 8,
            ColorTier::Mono => true,
        }
    }

    /// `None` means no color pairs at all.
    fn resolve<B: ColorBackend + ?Sized>(
        self,
        backend: &mut B,
        caps: Capabilities,
        sources: &ColorSources,
        steps: usize,
    ) -> Option<Slots> {
        let bg_rgb = sources.background;
        let default_bg = caps.default_bg && bg_rgb == Rgb::BLACK;

        match self {
            ColorTier::TrueColor => {
                let gradient = build_three_zone_gradient(sources, steps);
                let fg = gradient
                    .iter()
                    .enumerate()
                    .map(|(i, &rgb)| {
                        let slot = FIRST_FREE_SLOT + i as u16;
                        match backend.init_color(slot, rgb) {
                            Ok(()) => ColorSlot::Index(slot),
                            Err(err) => {
                                log::debug!("color register {slot} unavailable ({err}), using nearest xterm color");
                                ColorSlot::Index(nearest_xterm256(rgb) as u16)
                            }
                        }
                    })
                    .collect();

                let bg = if default_bg {
                    ColorSlot::Default
                } else {
                    let slot = FIRST_FREE_SLOT + steps as u16;
                    match backend.init_color(slot, bg_rgb) {
                        Ok(()) => ColorSlot::Index(slot),
                        Err(err) => {
                            log::debug!("background register {slot} unavailable ({err})");
                            ColorSlot::Index(nearest_xterm256(bg_rgb) as u16)
                        }
                    }
                };
                Some(Slots { fg, bg })
            }
            ColorTier::Xterm256 => {
                let fg = build_three_zone_gradient(sources, steps)
                    .into_iter()
                    .map(|rgb| ColorSlot::Index(nearest_xterm256(rgb) as u16))
                    .collect();
                let bg = if default_bg {
                    ColorSlot::Default
                } else {
                    ColorSlot::Index(nearest_xterm256(bg_rgb) as u16)
                };
                Some(Slots { fg, bg })
            }
            ColorTier::Ansi8 => {
                let zones = ZoneCounts::split(steps);
                let slot = |c: Rgb| ColorSlot::Index(nearest_ansi8(c) as u16);
                let mut fg = vec![slot(sources.object); zones.near];
                fg.extend(std::iter::repeat(slot(sources.fog)).take(zones.fog));
                fg.extend(std::iter::repeat(slot(bg_rgb)).take(zones.far));
                let bg = if default_bg {
                    ColorSlot::Default
                } else {
                    slot(bg_rgb)
                };
                Some(Slots { fg, bg })
            }
            ColorTier::Mono => None,
        }
    }
}

/// Pair ids for each gradient step plus the full-screen background pair.
///
/// Pair 0 means "terminal default".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPairs {
    pub gradient: Vec<u16>,
    pub background: u16,
    pub tier: ColorTier,
}

impl ColorPairs {
    pub fn monochrome(steps: usize) -> Self {
        Self {
            gradient: vec![0; steps],
            background: 0,
            tier: ColorTier::Mono,
        }
    }

    /// Pair for a fog color index; out-of-range indices use pair 0.
    #[inline]
    pub fn pair_for(&self, color_index: usize) -> u16 {
        self.gradient.get(color_index).copied().unwrap_or(0)
    }
}

/// Run the tier cascade against `backend` and define the color pairs.
///
/// Gradient pairs are `1..=steps`; the background pair is `steps + 1`.
pub fn init_color_pairs<B: ColorBackend + ?Sized>(
    backend: &mut B,
    sources: &ColorSources,
    steps: usize,
    use_color: bool,
) -> ColorPairs {
    if !use_color {
        return ColorPairs::monochrome(steps);
    }
    if let Err(err) = backend.start() {
        log::info!("terminal colors unavailable: {err}");
        return ColorPairs::monochrome(steps);
    }

    let caps = Capabilities {
        colors: backend.color_count().unwrap_or(8),
        can_change: backend.can_change_color().unwrap_or(false),
        default_bg: backend.supports_default_bg().unwrap_or(false),
    };

    let tier = ColorTier::RANKED
        .into_iter()
        .find(|t| t.supported(caps))
        .unwrap_or(ColorTier::Mono);
    log::info!("color tier: {} ({} colors)", tier.as_str(), caps.colors);

    let Some(slots) = tier.resolve(backend, caps, sources, steps) else {
        return ColorPairs::monochrome(steps);
    };

    let mut gradient: Vec<u16> = slots
        .fg
        .iter()
        .take(steps)
        .enumerate()
        .map(|(i, &fg)| {
            let pair = i as u16 + 1;
            match backend.init_pair(pair, fg, slots.bg) {
                Ok(()) => pair,
                Err(err) => {
                    log::debug!("color pair {pair} unavailable: {err}");
                    0
                }
            }
        })
        .collect();
    let pad = gradient.last().copied().unwrap_or(0);
    gradient.resize(steps, pad);

    let bg_pair = steps as u16 + 1;
    let bg_fg = if slots.bg == ColorSlot::Index(WHITE_SLOT) {
        ColorSlot::Index(0)
    } else {
        ColorSlot::Index(WHITE_SLOT)
    };
    let background = match backend.init_pair(bg_pair, bg_fg, slots.bg) {
        Ok(()) => bg_pair,
        Err(err) => {
            log::debug!("background pair unavailable: {err}");
            0
        }
    };

    ColorPairs {
        gradient,
        background,
        tier,
    }
}

/// Session color state. Pairs are rebuilt only when their inputs change.
#[derive(Debug, Clone)]
pub struct ColorContext {
    sources: ColorSources,
    steps: usize,
    use_color: bool,
    pairs: ColorPairs,
}

impl ColorContext {
    pub fn new<B: ColorBackend + ?Sized>(
        backend: &mut B,
        sources: ColorSources,
        steps: usize,
        use_color: bool,
    ) -> Self {
        let pairs = init_color_pairs(backend, &sources, steps, use_color);
        Self {
            sources,
            steps,
            use_color,
            pairs,
        }
    }

    /// Re-run the cascade if `sources` or `steps` differ from the last run.
    ///
    /// Returns whether the pairs were rebuilt.
    pub fn reinit<B: ColorBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        sources: ColorSources,
        steps: usize,
    ) -> bool {
        if sources == self.sources && steps == self.steps {
            return false;
        }
        self.sources = sources;
        self.steps = steps;
        self.pairs = init_color_pairs(backend, &self.sources, steps, self.use_color);
        true
    }

    pub fn pairs(&self) -> &ColorPairs {
        &self.pairs
    }

    pub fn sources(&self) -> &ColorSources {
        &self.sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::collections::HashMap;

    /// In-memory backend with configurable capabilities and failures.
    #[derive(Default)]
    struct MockBackend {
        colors: u16,
        can_change: bool,
        default_bg: bool,
        fail_start: bool,
        fail_slots: Vec<u16>,
        fail_pairs: Vec<u16>,
        registers: HashMap<u16, Rgb>,
        pairs: HashMap<u16, (ColorSlot, ColorSlot)>,
    }

    impl MockBackend {
        fn with_colors(colors: u16, can_change: bool) -> Self {
            Self {
                colors,
                can_change,
                default_bg: true,
                ..Default::default()
            }
        }
    }

    impl ColorBackend for MockBackend {
        fn start(&mut self) -> Result<()> {
            if self.fail_start {
                bail!("no colors");
            }
            Ok(())
        }
        fn color_count(&self) -> Result<u16> {
            Ok(self.colors)
        }
        fn can_change_color(&self) -> Result<bool> {
            Ok(self.can_change)
        }
        fn supports_default_bg(&self) -> Result<bool> {
            Ok(self.default_bg)
        }
        fn init_color(&mut self, slot: u16, rgb: Rgb) -> Result<()> {
            if self.fail_slots.contains(&slot) {
                bail!("slot {slot} refused");
            }
            self.registers.insert(slot, rgb);
            Ok(())
        }
        fn init_pair(&mut self, pair: u16, fg: ColorSlot, bg: ColorSlot) -> Result<()> {
            if self.fail_pairs.contains(&pair) {
                bail!("pair {pair} refused");
            }
            self.pairs.insert(pair, (fg, bg));
            Ok(())
        }
    }

    fn sources() -> ColorSources {
        ColorSources::new(
            Some(Rgb::new(208, 221, 20)),
            Some(Rgb::new(14, 14, 44)),
            Some(Rgb::new(141, 5, 130)),
        )
    }

    #[test]
    fn gradient_black_to_white() {
        let g = build_gradient(Rgb::BLACK, Rgb::WHITE, 5);
        assert_eq!(g.len(), 5);
        assert_eq!(g[0], Rgb::BLACK);
        assert_eq!(g[4], Rgb::WHITE);
        assert!(g.windows(2).all(|w| w[0].r <= w[1].r));
        // 127.5 and 191.25 / 63.75 rounding.
        assert_eq!(g[1], Rgb::new(64, 64, 64));
        assert_eq!(g[2], Rgb::new(128, 128, 128));
        assert_eq!(g[3], Rgb::new(191, 191, 191));
    }

    #[test]
    fn gradient_rounds_half_to_even() {
        // 0 → 5 over 3 steps: 2.5 rounds down to 2.
        let g = build_gradient(Rgb::BLACK, Rgb::new(5, 0, 0), 3);
        assert_eq!(g[1].r, 2);
        // 0 → 7 over 3 steps: 3.5 rounds up to 4.
        let g = build_gradient(Rgb::BLACK, Rgb::new(7, 0, 0), 3);
        assert_eq!(g[1].r, 4);
    }

    #[test]
    fn gradient_single_step_is_start_color() {
        assert_eq!(build_gradient(Rgb::WHITE, Rgb::BLACK, 1), vec![Rgb::WHITE]);
        assert!(build_gradient(Rgb::WHITE, Rgb::BLACK, 0).is_empty());
    }

    #[test]
    fn three_zone_layout() {
        let s = sources();
        let g = build_three_zone_gradient(&s, 15);
        assert_eq!(g.len(), 15);
        assert_eq!(g[0], s.object);
        assert_eq!(g[4], s.fog);
        assert_eq!(g[5], s.fog);
        assert_eq!(g[9], s.background);
        assert!(g[10..].iter().all(|&c| c == s.background));
    }

    #[test]
    fn xterm_nearest_prefers_gray_when_strictly_closer() {
        assert_eq!(nearest_xterm256(Rgb::new(10, 10, 10)), 232);
        assert_eq!(nearest_xterm256(Rgb::BLACK), 16);
        assert_eq!(nearest_xterm256(Rgb::WHITE), 231);
        assert_eq!(nearest_xterm256(Rgb::new(255, 0, 0)), 196);
        // Exact gray-ramp level 128 (step 12).
        assert_eq!(nearest_xterm256(Rgb::new(128, 128, 128)), 244);
    }

    #[test]
    fn xterm_cube_axis_ties_go_low() {
        // 115 is 20 from both 95 and 135.
        assert_eq!(nearest_xterm256(Rgb::new(115, 0, 0)), 16 + 36);
    }

    #[test]
    fn ansi8_nearest() {
        assert_eq!(nearest_ansi8(Rgb::BLACK), 0);
        assert_eq!(nearest_ansi8(Rgb::WHITE), 7);
        assert_eq!(nearest_ansi8(Rgb::new(200, 10, 10)), 1);
        assert_eq!(nearest_ansi8(Rgb::new(14, 14, 44)), 0);
        assert_eq!(nearest_ansi8(Rgb::new(141, 5, 130)), 5);
    }

    #[test]
    fn disabled_color_is_all_zero() {
        let mut b = MockBackend::with_colors(256, true);
        let pairs = init_color_pairs(&mut b, &sources(), 12, false);
        assert_eq!(pairs, ColorPairs::monochrome(12));
        assert!(b.pairs.is_empty());
    }

    #[test]
    fn failed_start_is_all_zero() {
        let mut b = MockBackend::with_colors(256, true);
        b.fail_start = true;
        let pairs = init_color_pairs(&mut b, &sources(), 12, true);
        assert_eq!(pairs.gradient, vec![0; 12]);
        assert_eq!(pairs.background, 0);
    }

    #[test]
    fn truecolor_defines_registers() {
        let mut b = MockBackend::with_colors(256, true);
        let s = sources();
        let pairs = init_color_pairs(&mut b, &s, 12, true);
        assert_eq!(pairs.tier, ColorTier::TrueColor);
        assert_eq!(pairs.gradient, (1..=12).collect::<Vec<u16>>());
        assert_eq!(pairs.background, 13);
        assert_eq!(b.registers[&16], s.object);
        assert_eq!(b.registers[&28], s.background);
        assert_eq!(
            b.pairs[&1],
            (ColorSlot::Index(16), ColorSlot::Index(28))
        );
        assert_eq!(
            b.pairs[&13],
            (ColorSlot::Index(7), ColorSlot::Index(28))
        );
    }

    #[test]
    fn truecolor_slot_failure_falls_back_per_slot() {
        let mut b = MockBackend::with_colors(256, true);
        b.fail_slots = vec![17];
        let s = sources();
        let pairs = init_color_pairs(&mut b, &s, 12, true);
        assert_eq!(pairs.tier, ColorTier::TrueColor);

        let g = build_three_zone_gradient(&s, 12);
        let fallback = ColorSlot::Index(nearest_xterm256(g[1]) as u16);
        assert_eq!(b.pairs[&2].0, fallback);
        assert_eq!(b.pairs[&1].0, ColorSlot::Index(16));
        assert_eq!(b.pairs[&3].0, ColorSlot::Index(18));
    }

    #[test]
    fn black_background_uses_terminal_default() {
        let mut b = MockBackend::with_colors(256, true);
        let s = ColorSources::new(Some(Rgb::WHITE), None, None);
        init_color_pairs(&mut b, &s, 6, true);
        assert_eq!(b.pairs[&1].1, ColorSlot::Default);
        assert_eq!(b.pairs[&7], (ColorSlot::Index(7), ColorSlot::Default));
        // No register spent on the background.
        assert!(!b.registers.contains_key(&22));
    }

    #[test]
    fn xterm256_tier_without_redefinable_registers() {
        let mut b = MockBackend::with_colors(256, false);
        let s = sources();
        let pairs = init_color_pairs(&mut b, &s, 12, true);
        assert_eq!(pairs.tier, ColorTier::Xterm256);
        assert!(b.registers.is_empty());
        let bg = ColorSlot::Index(nearest_xterm256(s.background) as u16);
        assert_eq!(
            b.pairs[&1],
            (ColorSlot::Index(nearest_xterm256(s.object) as u16), bg)
        );
    }

    #[test]
    fn ansi8_tier_replicates_zone_colors() {
        let mut b = MockBackend::with_colors(8, false);
        b.default_bg = false;
        let s = ColorSources::new(Some(Rgb::new(0, 255, 0)), Some(Rgb::WHITE), Some(Rgb::new(200, 0, 0)));
        let pairs = init_color_pairs(&mut b, &s, 12, true);
        assert_eq!(pairs.tier, ColorTier::Ansi8);
        let fgs: Vec<ColorSlot> = (1..=12).map(|p| b.pairs[&p].0).collect();
        assert_eq!(&fgs[..4], &[ColorSlot::Index(2); 4]);
        assert_eq!(&fgs[4..8], &[ColorSlot::Index(1); 4]);
        assert_eq!(&fgs[8..], &[ColorSlot::Index(7); 4]);
        // White background gets a black foreground on its fill pair.
        assert_eq!(b.pairs[&13], (ColorSlot::Index(0), ColorSlot::Index(7)));
    }

    #[test]
    fn too_few_colors_is_mono() {
        let mut b = MockBackend::with_colors(2, false);
        let pairs = init_color_pairs(&mut b, &sources(), 12, true);
        assert_eq!(pairs.tier, ColorTier::Mono);
        assert_eq!(pairs.gradient, vec![0; 12]);
    }

    #[test]
    fn failed_pairs_become_zero() {
        let mut b = MockBackend::with_colors(256, false);
        b.fail_pairs = vec![3, 13];
        let pairs = init_color_pairs(&mut b, &sources(), 12, true);
        assert_eq!(pairs.gradient[2], 0);
        assert_eq!(pairs.gradient[3], 4);
        assert_eq!(pairs.background, 0);
    }

    #[test]
    fn context_reinit_only_on_change() {
        let mut b = MockBackend::with_colors(256, false);
        let mut ctx = ColorContext::new(&mut b, sources(), 12, true);
        assert!(!ctx.reinit(&mut b, sources(), 12));
        assert!(ctx.reinit(&mut b, sources(), 15));
        assert_eq!(ctx.pairs().gradient.len(), 15);
        assert_eq!(ctx.pairs().background, 16);
    }

    #[test]
    fn pair_lookup_out_of_range_is_default() {
        let pairs = ColorPairs {
            gradient: vec![1, 2],
            background: 3,
            tier: ColorTier::Xterm256,
        };
        assert_eq!(pairs.pair_for(1), 2);
        assert_eq!(pairs.pair_for(5), 0);
    }
}
