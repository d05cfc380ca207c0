//! Crossterm color backend.
//!
//! Crossterm writes colors directly, so the curses-style register/pair model
//! is kept in memory here and resolved to [`TermColor`]s at draw time.

use std::collections::HashMap;
use std::env;

use anyhow::{bail, Result};

use crate::fb::{CellStyle, TermColor};
use crate::palette::{ColorBackend, ColorSlot};
use crate::types::Rgb;

/// What the attached terminal can do with color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCaps {
    /// Addressable palette size; 0 means no color.
    pub colors: u16,
    /// Registers may be redefined with arbitrary RGB (24-bit output).
    pub can_change_color: bool,
    pub default_bg: bool,
}

impl TermCaps {
    /// Detect capabilities from `TERM` and `COLORTERM`.
    pub fn from_env() -> Self {
        let term = env::var("TERM").unwrap_or_default();
        let colorterm = env::var("COLORTERM").unwrap_or_default();
        Self::from_vars(&term, &colorterm)
    }

    pub fn from_vars(term: &str, colorterm: &str) -> Self {
        let term = term.to_ascii_lowercase();
        let colorterm = colorterm.to_ascii_lowercase();

        let (colors, can_change_color) = if term.is_empty() || term == "dumb" {
            (0, false)
        } else if colorterm == "truecolor" || colorterm == "24bit" {
            (256, true)
        } else if term.contains("256color") {
            (256, false)
        } else {
            (8, false)
        };

        Self {
            colors,
            can_change_color,
            default_bg: true,
        }
    }

    /// Number of definable pairs, pair 0 included.
    pub fn max_pairs(&self) -> u16 {
        match self.colors {
            0 => 0,
            c if c < 256 => 64,
            _ => 256,
        }
    }
}

/// In-memory color registers and pairs backed by crossterm colors.
#[derive(Debug, Clone)]
pub struct TermPalette {
    caps: TermCaps,
    started: bool,
    registers: HashMap<u16, Rgb>,
    pairs: HashMap<u16, (ColorSlot, ColorSlot)>,
}

impl TermPalette {
    pub fn new(caps: TermCaps) -> Self {
        Self {
            caps,
            started: false,
            registers: HashMap::new(),
            pairs: HashMap::new(),
        }
    }

    pub fn caps(&self) -> TermCaps {
        self.caps
    }

    /// Style for a pair id. Pair 0 and undefined pairs use terminal defaults.
    pub fn pair_style(&self, pair: u16) -> CellStyle {
        match self.pairs.get(&pair) {
            Some(&(fg, bg)) => CellStyle::new(self.slot_color(fg), self.slot_color(bg)),
            None => CellStyle::default(),
        }
    }

    fn slot_color(&self, slot: ColorSlot) -> TermColor {
        match slot {
            ColorSlot::Default => TermColor::Default,
            ColorSlot::Index(i) => match self.registers.get(&i) {
                Some(&rgb) => TermColor::Rgb(rgb),
                None => u8::try_from(i).map_or(TermColor::Default, TermColor::Indexed),
            },
        }
    }

    fn check_slot(&self, slot: ColorSlot) -> Result<()> {
        match slot {
            ColorSlot::Default if !self.caps.default_bg => bail!("default colors not supported"),
            ColorSlot::Index(i) if i >= self.caps.colors => {
                bail!("color {i} out of range (terminal has {})", self.caps.colors)
            }
            _ => Ok(()),
        }
    }
}

impl ColorBackend for TermPalette {
    fn start(&mut self) -> Result<()> {
        if self.caps.colors == 0 {
            bail!("terminal reports no color support");
        }
        self.started = true;
        Ok(())
    }

    fn color_count(&self) -> Result<u16> {
        Ok(self.caps.colors)
    }

    fn can_change_color(&self) -> Result<bool> {
        Ok(self.caps.can_change_color)
    }

    fn supports_default_bg(&self) -> Result<bool> {
        Ok(self.caps.default_bg)
    }

    fn init_color(&mut self, slot: u16, rgb: Rgb) -> Result<()> {
        if !self.started {
            bail!("colors not started");
        }
        if !self.caps.can_change_color {
            bail!("terminal cannot redefine colors");
        }
        if slot >= self.caps.colors {
            bail!("color register {slot} out of range");
        }
        self.registers.insert(slot, rgb);
        Ok(())
    }

    fn init_pair(&mut self, pair: u16, fg: ColorSlot, bg: ColorSlot) -> Result<()> {
        if !self.started {
            bail!("colors not started");
        }
        if pair == 0 || pair >= self.caps.max_pairs() {
            bail!("color pair {pair} out of range");
        }
        self.check_slot(fg)?;
        self.check_slot(bg)?;
        self.pairs.insert(pair, (fg, bg));
        Ok(())
    }
}
