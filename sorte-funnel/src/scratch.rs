//! Scratch-off coverage tracking.
//!
//! The surface is a pixel bitmap. Pointer samples inside a down/up bracket
//! erase a filled circle; a running counter keeps the erased total so a sample
//! costs only the pixels under the brush.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScratchConfig {
    pub width: u32,
    pub height: u32,
    pub brush_radius: u32,
    /// Coverage that must be strictly exceeded to reveal.
    pub reveal_threshold: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScratchPhase {
    Unscratched,
    Revealed,
}

#[derive(Debug, Clone)]
pub struct ScratchSurface {
    cfg: ScratchConfig,
    erased: Vec<bool>,
    erased_count: u64,
    drawing: bool,
    phase: ScratchPhase,
}

impl ScratchSurface {
    #[must_use]
    pub fn new(cfg: ScratchConfig) -> Self {
        let total = usize::try_from(u64::from(cfg.width) * u64::from(cfg.height)).unwrap_or(0);
        Self {
            cfg,
            erased: vec![false; total],
            erased_count: 0,
            drawing: false,
            phase: ScratchPhase::Unscratched,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> ScratchPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        matches!(self.phase, ScratchPhase::Revealed)
    }

    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        self.drawing
    }

    #[must_use]
    pub fn total_pixels(&self) -> u64 {
        self.erased.len() as u64
    }

    #[must_use]
    pub const fn erased_pixels(&self) -> u64 {
        self.erased_count
    }

    /// Fraction of the surface erased so far, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage(&self) -> f64 {
        if self.erased.is_empty() {
            return 0.0;
        }
        self.erased_count as f64 / self.erased.len() as f64
    }

    pub fn pointer_down(&mut self) {
        self.drawing = true;
    }

    pub fn pointer_up(&mut self) {
        self.drawing = false;
    }

    /// Pointer sample in surface coordinates. Ignored outside a down/up bracket.
    /// Returns the phase after the sample.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> ScratchPhase {
        if self.drawing {
            self.erase_circle(x, y);
        }
        self.phase
    }

    /// Erase every pixel whose center lies within the brush radius of `(x, y)`.
    /// A radius of zero erases only the pixel under the point.
    pub fn erase_circle(&mut self, x: f32, y: f32) -> ScratchPhase {
        let r = self.cfg.brush_radius;
        if r == 0 {
            if x >= 0.0 && y >= 0.0 {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                self.erase_pixel(x as u32, y as u32);
            }
            return self.update_phase();
        }

        let radius = f64::from(r);
        let (cx, cy) = (f64::from(x), f64::from(y));
        let min_x = (cx - radius).floor().max(0.0);
        let max_x = (cx + radius).ceil().min(f64::from(self.cfg.width));
        let min_y = (cy - radius).floor().max(0.0);
        let max_y = (cy + radius).ceil().min(f64::from(self.cfg.height));
        if min_x >= max_x || min_y >= max_y {
            return self.phase;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (x0, x1, y0, y1) = (min_x as u32, max_x as u32, min_y as u32, max_y as u32);
        let radius_sq = radius * radius;
        for py in y0..y1 {
            let dy = f64::from(py) + 0.5 - cy;
            for px in x0..x1 {
                let dx = f64::from(px) + 0.5 - cx;
                if dx * dx + dy * dy <= radius_sq {
                    self.erase_pixel(px, py);
                }
            }
        }
        self.update_phase()
    }

    fn erase_pixel(&mut self, px: u32, py: u32) {
        if px >= self.cfg.width || py >= self.cfg.height {
            return;
        }
        let idx = py as usize * self.cfg.width as usize + px as usize;
        if let Some(cell) = self.erased.get_mut(idx)
            && !*cell
        {
            *cell = true;
            self.erased_count += 1;
        }
    }

    fn update_phase(&mut self) -> ScratchPhase {
        if self.phase == ScratchPhase::Unscratched
            && self.coverage() > f64::from(self.cfg.reveal_threshold)
        {
            self.phase = ScratchPhase::Revealed;
            self.drawing = false;
        }
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: u32, height: u32, brush_radius: u32) -> ScratchSurface {
        ScratchSurface::new(ScratchConfig {
            width,
            height,
            brush_radius,
            reveal_threshold: 0.5,
        })
    }

    #[test]
    fn moves_outside_bracket_do_nothing() {
        let mut surface = grid(10, 10, 3);
        surface.pointer_move(5.0, 5.0);
        assert_eq!(surface.erased_pixels(), 0);
        surface.pointer_down();
        surface.pointer_move(5.0, 5.0);
        assert!(surface.erased_pixels() > 0);
        surface.pointer_up();
        let before = surface.erased_pixels();
        surface.pointer_move(0.0, 0.0);
        assert_eq!(surface.erased_pixels(), before);
    }

    #[test]
    fn exactly_half_stays_hidden() {
        let mut surface = grid(10, 10, 0);
        for i in 0..50 {
            surface.erase_circle((i % 10) as f32 + 0.5, (i / 10) as f32 + 0.5);
        }
        assert_eq!(surface.erased_pixels(), 50);
        assert!((surface.coverage() - 0.5).abs() < f64::EPSILON);
        assert_eq!(surface.phase(), ScratchPhase::Unscratched);

        assert_eq!(surface.erase_circle(0.5, 9.5), ScratchPhase::Revealed);
    }

    #[test]
    fn repeated_samples_do_not_double_count() {
        let mut surface = grid(20, 20, 2);
        surface.erase_circle(10.0, 10.0);
        let once = surface.erased_pixels();
        surface.erase_circle(10.0, 10.0);
        assert_eq!(surface.erased_pixels(), once);
    }

    #[test]
    fn brush_is_clipped_to_surface() {
        let mut surface = grid(8, 8, 50);
        surface.erase_circle(-100.0, -100.0);
        assert_eq!(surface.erased_pixels(), 0);
        surface.erase_circle(4.0, 4.0);
        assert_eq!(surface.erased_pixels(), 64);
        assert!(surface.is_revealed());
    }

    #[test]
    fn reveal_is_irreversible() {
        let mut surface = grid(4, 4, 10);
        surface.pointer_down();
        assert_eq!(surface.pointer_move(2.0, 2.0), ScratchPhase::Revealed);
        assert!(!surface.is_drawing());
        surface.pointer_down();
        surface.pointer_up();
        assert_eq!(surface.phase(), ScratchPhase::Revealed);
    }

    #[test]
    fn default_card_needs_several_strokes() {
        let mut surface = grid(320, 192, 25);
        surface.pointer_down();
        let phase = surface.pointer_move(160.0, 96.0);
        assert_eq!(phase, ScratchPhase::Unscratched);
        for row in 0..4 {
            for col in 0..7 {
                surface.pointer_move(25.0 + col as f32 * 45.0, 25.0 + row as f32 * 45.0);
            }
        }
        assert!(surface.is_revealed());
    }
}
