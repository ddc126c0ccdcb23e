//! Terminal cell grid implementing the sprite surface.

use motes_core::{
    ColorTheme, ElementId, MemorySurface, MotionSample, Sprite, SpriteKind, Surface, Vec2, Viewport,
};
use ratatui::{
    Frame,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::color::sprite_color;
use crate::glyphs::{glow_char, point_char};

/// Paint order, back to front.
const LAYERS: [SpriteKind; 4] = [
    SpriteKind::Orb,
    SpriteKind::Particle,
    SpriteKind::Mote,
    SpriteKind::Spark,
];

/// Opacity below which point sprites are not drawn.
const MIN_VISIBLE_OPACITY: f32 = 0.02;

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    color: Color,
    intensity: f32,
}

/// Sprite surface drawn onto a terminal grid.
#[derive(Debug)]
pub struct TerminalSurface {
    /// Sprite storage.
    sprites: MemorySurface,
    /// Pixels per cell.
    cell: CellSize,
    /// Grid width in cells.
    cols: u16,
    /// Grid height in cells.
    rows: u16,
    /// Scene time used to sample sprite motion.
    clock_ms: u64,
}

impl TerminalSurface {
    /// Create a surface covering `cols` × `rows` cells.
    pub fn new(cols: u16, rows: u16, cell: CellSize) -> Self {
        let cell = CellSize {
            width: cell.width.max(1.0),
            height: cell.height.max(1.0),
        };
        Self {
            sprites: MemorySurface::new(grid_viewport(cols, rows, cell)),
            cell,
            cols,
            rows,
            clock_ms: 0,
        }
    }

    /// Change the grid size and return the new pixel viewport.
    pub fn resize(&mut self, cols: u16, rows: u16) -> Viewport {
        self.cols = cols;
        self.rows = rows;
        let viewport = grid_viewport(cols, rows, self.cell);
        self.sprites.resize(viewport);
        viewport
    }

    /// Grid size in cells.
    pub fn dimensions(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Set the scene time used when sampling sprite motion.
    pub fn set_clock(&mut self, now_ms: u64) {
        self.clock_ms = now_ms;
    }

    /// Pixel position of the centre of a cell.
    pub fn cell_to_pixel(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.cell.width,
            (row as f32 + 0.5) * self.cell.height,
        )
    }

    /// Cell containing a pixel position, if it is on the grid.
    pub fn pixel_to_cell(&self, position: Vec2) -> Option<(u16, u16)> {
        if !position.is_finite() || position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let col = (position.x / self.cell.width) as u64;
        let row = (position.y / self.cell.height) as u64;
        if col >= self.cols as u64 || row >= self.rows as u64 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    pub fn sprites(&self) -> &MemorySurface {
        &self.sprites
    }

    /// Render every sprite over the whole frame.
    pub fn render(&self, frame: &mut Frame, theme: ColorTheme) {
        let area = frame.area();
        frame.render_widget(Paragraph::new(self.paint(theme)), area);
    }

    /// Rasterize the sprites into one styled line per row.
    pub fn paint(&self, theme: ColorTheme) -> Vec<Line<'static>> {
        let mut grid: Vec<Option<Cell>> = vec![None; self.cols as usize * self.rows as usize];

        for kind in LAYERS {
            for (_, sprite) in self.sprites.iter().filter(|(_, s)| s.kind == kind) {
                let sample = sprite.sample(self.clock_ms);
                match kind {
                    SpriteKind::Orb => self.paint_glow(&mut grid, sprite, &sample, theme),
                    _ => self.paint_point(&mut grid, sprite, &sample, theme),
                }
            }
        }

        grid.chunks(self.cols.max(1) as usize)
            .take(self.rows as usize)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(cell) => {
                            Span::styled(cell.ch.to_string(), Style::new().fg(cell.color))
                        }
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    /// Paint an orb as a soft disc, keeping the brightest glow per cell.
    fn paint_glow(
        &self,
        grid: &mut [Option<Cell>],
        sprite: &Sprite,
        sample: &MotionSample,
        theme: ColorTheme,
    ) {
        let radius = sprite.size * sample.scale / 2.0;
        if radius <= 0.0 || !sample.position.is_finite() {
            return;
        }
        let center = sample.position;
        let first_col = ((center.x - radius) / self.cell.width).floor().max(0.0) as u64;
        let last_col = ((center.x + radius) / self.cell.width).ceil().max(0.0) as u64;
        let first_row = ((center.y - radius) / self.cell.height).floor().max(0.0) as u64;
        let last_row = ((center.y + radius) / self.cell.height).ceil().max(0.0) as u64;

        for row in first_row..last_row.min(self.rows as u64) {
            for col in first_col..last_col.min(self.cols as u64) {
                let (col, row) = (col as u16, row as u16);
                let distance = self.cell_to_pixel(col, row).distance(center) / radius;
                if distance >= 1.0 {
                    continue;
                }
                let intensity = (1.0 - distance) * sample.opacity;
                let Some(ch) = glow_char(intensity) else {
                    continue;
                };
                let idx = row as usize * self.cols as usize + col as usize;
                if grid[idx].is_none_or(|existing| existing.intensity < intensity) {
                    grid[idx] = Some(Cell {
                        ch,
                        color: sprite_color(theme, SpriteKind::Orb, intensity),
                        intensity,
                    });
                }
            }
        }
    }

    /// Paint a point sprite into the cell under it, over anything below.
    fn paint_point(
        &self,
        grid: &mut [Option<Cell>],
        sprite: &Sprite,
        sample: &MotionSample,
        theme: ColorTheme,
    ) {
        if sample.opacity < MIN_VISIBLE_OPACITY {
            return;
        }
        let Some((col, row)) = self.pixel_to_cell(sample.position) else {
            return;
        };
        let idx = row as usize * self.cols as usize + col as usize;
        grid[idx] = Some(Cell {
            ch: point_char(sprite.kind, sprite.size * sample.scale, sample.opacity),
            color: sprite_color(theme, sprite.kind, sample.opacity),
            intensity: sample.opacity,
        });
    }
}

impl Surface for TerminalSurface {
    fn viewport(&self) -> Viewport {
        self.sprites.viewport()
    }

    fn create(&mut self, sprite: Sprite) -> ElementId {
        self.sprites.create(sprite)
    }

    fn set_position(&mut self, id: ElementId, position: Vec2) {
        self.sprites.set_position(id, position);
    }

    fn set_opacity(&mut self, id: ElementId, opacity: f32) {
        self.sprites.set_opacity(id, opacity);
    }

    fn remove(&mut self, id: ElementId) -> bool {
        self.sprites.remove(id)
    }

    fn contains(&self, id: ElementId) -> bool {
        self.sprites.contains(id)
    }

    fn len(&self) -> usize {
        self.sprites.len()
    }
}

fn grid_viewport(cols: u16, rows: u16, cell: CellSize) -> Viewport {
    Viewport::new(cols as f32 * cell.width, rows as f32 * cell.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motes_core::Motion;
    use ratatui::{Terminal, backend::TestBackend};

    fn symbol(lines: &[Line], col: usize, row: usize) -> String {
        lines[row].spans[col].content.to_string()
    }

    #[test]
    fn test_viewport_follows_grid() {
        let mut surface = TerminalSurface::new(80, 24, CellSize::default());
        assert_eq!(surface.viewport(), Viewport::new(640.0, 384.0));
        let resized = surface.resize(40, 10);
        assert_eq!(resized, Viewport::new(320.0, 160.0));
        assert_eq!(surface.viewport(), resized);
        assert_eq!(surface.dimensions(), (40, 10));
    }

    #[test]
    fn test_cell_pixel_mapping() {
        let surface = TerminalSurface::new(10, 5, CellSize::default());
        let center = surface.cell_to_pixel(3, 2);
        assert_eq!(center, Vec2::new(28.0, 40.0));
        assert_eq!(surface.pixel_to_cell(center), Some((3, 2)));
        assert_eq!(surface.pixel_to_cell(Vec2::new(-1.0, 4.0)), None);
        assert_eq!(surface.pixel_to_cell(Vec2::new(80.0, 4.0)), None);
        assert_eq!(surface.pixel_to_cell(Vec2::new(f32::NAN, 4.0)), None);
    }

    #[test]
    fn test_point_sprite_lands_in_its_cell() {
        let mut surface = TerminalSurface::new(10, 5, CellSize::default());
        let at = surface.cell_to_pixel(3, 2);
        surface.create(Sprite::new(SpriteKind::Mote, at, 3.0));

        let lines = surface.paint(ColorTheme::Cyan);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].spans.len(), 10);
        assert_eq!(symbol(&lines, 3, 2), "•");
        assert_eq!(symbol(&lines, 4, 2), " ");
    }

    #[test]
    fn test_orb_glows_over_several_cells() {
        let mut surface = TerminalSurface::new(20, 10, CellSize::default());
        let at = surface.cell_to_pixel(10, 5);
        surface.create(Sprite::new(SpriteKind::Orb, at, 100.0).with_opacity(0.4));

        let lines = surface.paint(ColorTheme::Blue);
        assert_eq!(symbol(&lines, 10, 5), "▓");
        let lit = lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .filter(|span| span.content != " ")
            .count();
        assert!(lit > 9, "only {lit} cells lit");
    }

    #[test]
    fn test_points_draw_over_orbs() {
        let mut surface = TerminalSurface::new(20, 10, CellSize::default());
        let at = surface.cell_to_pixel(10, 5);
        surface.create(Sprite::new(SpriteKind::Mote, at, 4.5));
        surface.create(Sprite::new(SpriteKind::Orb, at, 100.0).with_opacity(0.4));

        let lines = surface.paint(ColorTheme::Green);
        assert_eq!(symbol(&lines, 10, 5), "●");
    }

    #[test]
    fn test_motion_sampled_at_clock() {
        let mut surface = TerminalSurface::new(10, 10, CellSize::default());
        let from = Vec2::new(44.0, 170.0);
        let to = Vec2::new(44.0, -10.0);
        surface.create(
            Sprite::new(SpriteKind::Particle, from, 2.5)
                .with_motion(Motion::glide(0, from, to, 1_800)),
        );

        let lines = surface.paint(ColorTheme::White);
        assert!(lines.iter().all(|line| line.spans.iter().all(|s| s.content == " ")));

        surface.set_clock(900);
        let lines = surface.paint(ColorTheme::White);
        assert_eq!(symbol(&lines, 5, 5), "•");
    }

    #[test]
    fn test_faded_spark_hidden() {
        let mut surface = TerminalSurface::new(10, 10, CellSize::default());
        let at = surface.cell_to_pixel(1, 1);
        surface.create(
            Sprite::new(SpriteKind::Spark, at, 3.0)
                .with_motion(Motion::glide(0, at, at, 1_000).with_opacity(1.0, 0.0)),
        );
        assert_eq!(symbol(&surface.paint(ColorTheme::Cyan), 1, 1), "*");
        surface.set_clock(1_000);
        assert_eq!(symbol(&surface.paint(ColorTheme::Cyan), 1, 1), " ");
    }

    #[test]
    fn test_render_into_terminal_buffer() {
        let mut surface = TerminalSurface::new(12, 6, CellSize::default());
        let at = surface.cell_to_pixel(2, 1);
        let id = surface.create(Sprite::new(SpriteKind::Mote, at, 1.5));

        let mut terminal = Terminal::new(TestBackend::new(12, 6)).unwrap();
        terminal
            .draw(|frame| surface.render(frame, ColorTheme::Magenta))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.cell((2, 1)).unwrap().symbol(), "·");

        assert!(surface.remove(id));
        terminal
            .draw(|frame| surface.render(frame, ColorTheme::Magenta))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.cell((2, 1)).unwrap().symbol(), " ");
    }
}
