//! First-person view widget
//!
//! The corridor is drawn as nested frames, one per row of the visibility
//! cone. Row `d` owns the band between frame `d` and frame `d + 1` on each
//! side; a wall ahead at depth `d` fills frame `d`.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use mm_core::vision::{Side, VisibilityCode};

use crate::theme::Theme;

struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    fn put(&mut self, x: usize, y: usize, c: char) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = c;
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| row.iter().collect())
            .collect()
    }
}

/// Frame geometry for a canvas and cone depth
struct Frames {
    width: usize,
    height: usize,
    count: usize,
}

impl Frames {
    fn inset_x(&self, k: usize) -> usize {
        k * self.width / (2 * self.count)
    }

    fn inset_y(&self, k: usize) -> usize {
        k * self.height / (2 * self.count)
    }

    /// Top edge of a side wall at column offset `x` from the near edge
    fn top_at(&self, x: usize) -> usize {
        x * self.height / self.width
    }
}

/// Render a visibility code as `height` lines of `width` characters.
///
/// Canvases smaller than 4x4 come back blank.
pub fn render_view(code: VisibilityCode, width: usize, height: usize) -> Vec<String> {
    let mut canvas = Canvas::new(width, height);
    if width < 4 || height < 4 {
        return canvas.into_lines();
    }

    let steps = code.depth().max_depth();
    let frames = Frames {
        width,
        height,
        count: steps + 2,
    };

    let blocked = (1..=steps).find(|&d| code.center(d) == Some(true));
    let last_row = blocked.map_or(steps, |d| d - 1);

    for depth in 0..=last_row {
        for side in [Side::Left, Side::Right] {
            if let Some(wall) = code.side(depth, side) {
                draw_side(&mut canvas, &frames, depth, side, wall);
            }
        }
    }

    if let Some(depth) = blocked {
        draw_front(&mut canvas, &frames, depth);
    }

    canvas.into_lines()
}

fn draw_side(canvas: &mut Canvas, frames: &Frames, depth: usize, side: Side, wall: bool) {
    let (top_edge, bottom_edge) = match side {
        Side::Right => ('/', '\\'),
        _ => ('\\', '/'),
    };

    for x in frames.inset_x(depth)..frames.inset_x(depth + 1) {
        let column = match side {
            Side::Right => frames.width - 1 - x,
            _ => x,
        };

        if wall {
            let top = frames.top_at(x);
            let bottom = frames.height - 1 - top;
            canvas.put(column, top, top_edge);
            canvas.put(column, bottom, bottom_edge);
            for y in top + 1..bottom {
                canvas.put(column, y, ':');
            }
        } else {
            // the far wall of the side passage, seen flat
            let top = frames.inset_y(depth + 1);
            let bottom = frames.height - 1 - top;
            canvas.put(column, top, '-');
            canvas.put(column, bottom, '-');
            for y in top + 1..bottom {
                canvas.put(column, y, '.');
            }
        }
    }
}

fn draw_front(canvas: &mut Canvas, frames: &Frames, depth: usize) {
    let left = frames.inset_x(depth);
    let right = frames.width - 1 - left;
    let top = frames.inset_y(depth);
    let bottom = frames.height - 1 - top;

    for y in top..=bottom {
        for x in left..=right {
            let c = match (x == left || x == right, y == top || y == bottom) {
                (true, true) => '+',
                (false, true) => '-',
                (true, false) => '|',
                (false, false) => '#',
            };
            canvas.put(x, y, c);
        }
    }
}

/// Widget for rendering the first-person view
pub struct FirstPersonWidget<'a> {
    code: VisibilityCode,
    title: &'a str,
    tint: Option<Color>,
    theme: &'a Theme,
}

impl<'a> FirstPersonWidget<'a> {
    pub fn new(code: VisibilityCode, title: &'a str, theme: &'a Theme) -> Self {
        Self {
            code,
            title,
            tint: None,
            theme,
        }
    }

    /// Color side walls with the wall-set color
    pub fn tint(mut self, color: Option<Color>) -> Self {
        self.tint = color;
        self
    }

    fn style_for(&self, c: char) -> Style {
        let color = match c {
            '#' | '+' | '|' | '-' => self.theme.view_front,
            '.' => self.theme.view_opening,
            _ => self.tint.map_or(self.theme.view_wall, |t| self.theme.tint(t)),
        };
        Style::default().fg(color)
    }
}

impl Widget for FirstPersonWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .border_style(Style::default().fg(self.theme.border));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = render_view(self.code, inner.width as usize, inner.height as usize);
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                if let Some(cell) =
                    buf.cell_mut(Position::new(inner.x + x as u16, inner.y + y as u16))
                {
                    cell.set_char(ch);
                    cell.set_style(self.style_for(ch));
                }
            }
        }
    }
}
