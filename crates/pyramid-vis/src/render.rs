//! Terminal rendering.
//!
//! Draws every cell as a colored block, a border on the outer edge of each
//! row, and a red `X` on violating cells. Output is queued and flushed once
//! per frame, so the renderer works on any `Write` (stdout or a buffer).

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use pyramid_rules::ConvergenceState;
use pyramid_topology::{Color, Position, Pyramid, RowEdges};

use crate::layout::Layout;

/// Window title.
pub const TITLE: &str = "Pyramid Game";

const BORDER: char = '│';
const MARKER: char = 'X';

/// Terminal color for a cell color.
pub fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.rgb();
    TermColor::Rgb { r, g, b }
}

/// Draws pyramids into a writer.
pub struct TerminalRenderer<W: Write> {
    out: W,
    layout: Layout,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, layout: Layout) -> Self {
        Self { out, layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Redraw the whole screen.
    pub fn draw(&mut self, pyramid: &Pyramid, convergence: &ConvergenceState) -> io::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            MoveTo(self.layout.margin, 0),
            SetAttribute(Attribute::Bold),
            Print(TITLE),
            SetAttribute(Attribute::Reset)
        )?;

        for row in pyramid.rows() {
            for (index, cell) in row.iter().enumerate() {
                self.draw_cell(cell.position(), cell.color(), cell.is_violating())?;
                let edges = RowEdges::of(index, row.len());
                if edges.first {
                    let x = self.layout.left_border(cell.position());
                    self.draw_border(x, cell.position())?;
                }
                if edges.last {
                    let x = self.layout.right_border(cell.position());
                    self.draw_border(x, cell.position())?;
                }
            }
        }

        self.draw_status(pyramid, convergence)?;
        self.out.flush()
    }

    fn draw_cell(
        &mut self,
        position: Position,
        color: Color,
        violating: bool,
    ) -> io::Result<()> {
        let (x, y) = self.layout.cell_origin(position);
        let block = " ".repeat(self.layout.cell_width as usize);

        queue!(self.out, SetBackgroundColor(term_color(color)))?;
        for line in 0..self.layout.cell_height {
            queue!(self.out, MoveTo(x, y + line), Print(&block))?;
        }

        if violating {
            let (mx, my) = self.layout.marker(position);
            queue!(
                self.out,
                MoveTo(mx, my),
                SetForegroundColor(TermColor::Red),
                SetAttribute(Attribute::Bold),
                Print(MARKER),
                SetAttribute(Attribute::Reset)
            )?;
        }

        queue!(self.out, ResetColor)
    }

    fn draw_border(&mut self, x: u16, position: Position) -> io::Result<()> {
        let (_, y) = self.layout.cell_origin(position);
        for line in 0..self.layout.cell_height {
            queue!(self.out, MoveTo(x, y + line), Print(BORDER))?;
        }
        Ok(())
    }

    fn draw_status(&mut self, pyramid: &Pyramid, convergence: &ConvergenceState) -> io::Result<()> {
        let violating = pyramid.cells().filter(|c| c.is_violating()).count();
        let status = if violating == 0 {
            format!("valid after {} rounds | q to quit", convergence.rounds)
        } else {
            format!(
                "invalid: {} violating | round {} | q to quit",
                violating, convergence.rounds
            )
        };

        queue!(
            self.out,
            MoveTo(self.layout.margin, self.layout.status_row(pyramid.row_count())),
            Print(status)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyramid_rules::RuleEngine;
    use pyramid_topology::ColorSequence;

    fn render(rows: Vec<Vec<Color>>) -> String {
        let pyramid = Pyramid::from_colors(rows).unwrap();
        let mut engine = RuleEngine::new(pyramid, ColorSequence::constant(Color::Pink));
        engine.validate();

        let mut renderer = TerminalRenderer::new(Vec::new(), Layout::default());
        renderer.draw(engine.pyramid(), engine.convergence()).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn title_is_drawn() {
        let out = render(vec![vec![Color::Pink]]);
        assert!(out.contains(TITLE));
    }

    #[test]
    fn markers_only_on_violating_cells() {
        let valid = render(vec![vec![Color::Yellow], vec![Color::Yellow; 3]]);
        assert_eq!(valid.matches(MARKER).count(), 0);
        assert!(valid.contains("valid after 0 rounds"));

        let invalid = render(vec![vec![Color::Blue], vec![Color::Blue; 3]]);
        assert_eq!(invalid.matches(MARKER).count(), 3);
        assert!(invalid.contains("invalid: 3 violating"));
    }

    #[test]
    fn borders_on_each_row_edge() {
        let out = render(vec![vec![Color::Pink], vec![Color::Pink; 3]]);
        let per_edge = Layout::default().cell_height as usize;
        assert_eq!(out.matches(BORDER).count(), 2 * 2 * per_edge);
    }

    #[test]
    fn cells_use_palette_colors() {
        assert_eq!(
            term_color(Color::Blue),
            TermColor::Rgb { r: 0, g: 210, b: 255 }
        );
    }
}
