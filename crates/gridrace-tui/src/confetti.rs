//! Confetti overlay for the celebration screen.
//!
//! Particles are spawned in one burst when the race ends, fall one row per
//! frame and wrap back to the top at a fresh random column.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

const GLYPHS: [char; 5] = ['*', '+', '•', '✦', 'o'];
const PALETTE: [Color; 6] = [
    Color::Yellow,
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Magenta,
    Color::Cyan,
];

/// One piece of confetti, in cells relative to the overlay area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfettiParticle {
    pub x: u16,
    pub y: u16,
    pub glyph: char,
    pub color: Color,
}

/// A burst of confetti particles.
pub struct Confetti {
    particles: Vec<ConfettiParticle>,
    rng: StdRng,
}

impl Confetti {
    /// Empty overlay; `seed` makes the burst reproducible.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            particles: Vec::new(),
            rng,
        }
    }

    /// Spawn `count` particles at random positions in the top half of `area`.
    pub fn burst(&mut self, area: Rect, count: usize) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let top_half = (area.height / 2).max(1);
        for _ in 0..count {
            let particle = ConfettiParticle {
                x: self.rng.gen_range(0..area.width),
                y: self.rng.gen_range(0..top_half),
                glyph: GLYPHS[self.rng.gen_range(0..GLYPHS.len())],
                color: PALETTE[self.rng.gen_range(0..PALETTE.len())],
            };
            self.particles.push(particle);
        }
    }

    /// Move every particle down one row, wrapping those that leave `area`.
    pub fn fall(&mut self, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for particle in &mut self.particles {
            particle.y += 1;
            if particle.y >= area.height {
                particle.y = 0;
                particle.x = self.rng.gen_range(0..area.width);
            }
        }
    }

    #[must_use]
    pub fn particles(&self) -> &[ConfettiParticle] {
        &self.particles
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Widget for &Confetti {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for particle in &self.particles {
            if particle.x >= area.width || particle.y >= area.height {
                continue;
            }
            if let Some(cell) = buf.cell_mut((area.x + particle.x, area.y + particle.y)) {
                cell.set_char(particle.glyph).set_fg(particle.color);
            }
        }
    }
}
