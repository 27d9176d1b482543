use std::{convert::TryFrom, io};

use crate::{Coords, TermInt};
use crate::term::{TermManager, text_width};

use crossterm::style::Stylize;
use game_2048::{Tile, Tiles, NO_TILE};

pub const DEFAULT_SCALE: TermInt = 3;
pub const MIN_SCALE: TermInt = 2;
pub const MAX_SCALE: TermInt = 8;

const GAME_OVER: &str = "Game over!";
const YOU_WIN: &str = "You win!";

/// Where the board goes on a terminal of a given size.
///
/// A cell is `2 * scale` columns wide and `scale` rows high, with one
/// column / row of border between cells and around the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Layout {
    cols: TermInt,
    rows: TermInt,
    side: TermInt,
    cell_width: TermInt,
    cell_height: TermInt,
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl Layout {
    pub fn new(term_size: Coords, side: usize, scale: TermInt) -> Self {
        let (cols, rows) = term_size;
        // Anything wider than the terminal saturates and then just doesn't fit.
        let side = TermInt::try_from(side).unwrap_or(TermInt::MAX);
        let (cell_width, cell_height) = (scale.saturating_mul(2), scale);
        let width = cell_width.saturating_mul(side).saturating_add(side).saturating_add(1);
        let height = cell_height.saturating_mul(side).saturating_add(side).saturating_add(1);
        let top_left = (cols.saturating_sub(width) / 2, rows.saturating_sub(height) / 2);

        Layout { cols, rows, side, cell_width, cell_height, top_left, width, height }
    }

    /// The board needs a free row below it for the status bar.
    pub fn fits(&self) -> bool {
        self.cols > self.width && self.rows > self.height
    }

    /// Where a label `len` columns wide is printed for the tile at `index`.
    pub fn tile_pos(&self, index: usize, len: TermInt) -> Coords {
        let side = self.side as usize;
        let (col, row) = ((index % side) as TermInt, (index / side) as TermInt);
        let x = col.saturating_mul(self.cell_width + 1)
            .saturating_add(1 + self.cell_width.saturating_sub(len) / 2);
        let y = row.saturating_mul(self.cell_height + 1)
            .saturating_add(1 + self.cell_height / 2);

        (self.top_left.0.saturating_add(x), self.top_left.1.saturating_add(y))
    }

    /// Centred just below the board, if there is room above the status bar.
    pub fn banner_pos(&self, len: TermInt) -> Option<Coords> {
        let y = self.top_left.1.saturating_add(self.height);
        if !self.fits() || y.saturating_add(1) >= self.rows || len > self.cols {
            return None;
        }

        Some(((self.cols - len) / 2, y))
    }

    pub fn status_row(&self) -> TermInt {
        self.rows.saturating_sub(1)
    }

    fn rule(&self, left: char, mid: char, right: char) -> String {
        self.line(left, '─', mid, right)
    }

    fn line(&self, left: char, fill: char, mid: char, right: char) -> String {
        let cell: String = std::iter::repeat(fill).take(self.cell_width as usize).collect();
        let mut line = String::new();

        line.push(left);
        for i in 0..self.side {
            line.push_str(&cell);
            line.push(if i == self.side - 1 { right } else { mid });
        }

        line
    }
}

/// Draws the whole screen: borders, tiles, status bar and end-of-game banner.
pub fn draw(term: &mut TermManager, layout: &Layout, tiles: &Tiles) -> io::Result<()> {
    if layout.fits() {
        draw_board(term, layout)?;
        draw_tiles(term, layout, tiles)?;

        if let Some(text) = banner(tiles) {
            if let Some(pos) = layout.banner_pos(text_width(text)) {
                term.print_at(pos, text.red().bold())?;
            }
        }
    }

    draw_statusbar(term, layout, tiles)?;
    term.flush()
}

fn banner(tiles: &Tiles) -> Option<&'static str> {
    if tiles.is_win() {
        Some(YOU_WIN)
    } else if tiles.is_game_over() {
        Some(GAME_OVER)
    } else {
        None
    }
}

fn draw_board(term: &mut TermManager, layout: &Layout) -> io::Result<()> {
    let (x, y) = layout.top_left;
    let blank = layout.line('│', ' ', '│', '│');
    let mut row = y;

    term.print_at((x, row), layout.rule('┌', '┬', '┐').yellow())?;
    for i in 0..layout.side {
        for _ in 0..layout.cell_height {
            row += 1;
            term.print_at((x, row), blank.as_str().yellow())?;
        }

        row += 1;
        let rule = if i == layout.side - 1 {
            layout.rule('└', '┴', '┘')
        } else {
            layout.rule('├', '┼', '┤')
        };
        term.print_at((x, row), rule.yellow())?;
    }

    Ok(())
}

fn draw_tiles(term: &mut TermManager, layout: &Layout, tiles: &Tiles) -> io::Result<()> {
    for (i, tile) in tiles.items().iter().enumerate() {
        if *tile == NO_TILE {
            continue;
        }

        let label = tile.to_string();
        let pos = layout.tile_pos(i, text_width(&label));
        term.print_at(pos, label.cyan().bold())?;
    }

    Ok(())
}

fn draw_statusbar(term: &mut TermManager, layout: &Layout, tiles: &Tiles) -> io::Result<()> {
    let line = status_line(tiles.score(), layout.cols as usize);
    term.print_at((0, layout.status_row()), line.white().on_blue())
}

fn status_line(score: Tile, cols: usize) -> String {
    let text = format!(" {} │ ←↓↑→ Move │ u Undo │ r Reset │ q Quit", score);
    format!("{:<width$}", text, width = cols).chars().take(cols).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_is_centred() {
        let layout = Layout::new((80, 24), 4, 3);

        assert_eq!(layout.width, 4 * 6 + 5);
        assert_eq!(layout.height, 4 * 3 + 5);
        assert_eq!(layout.top_left, ((80 - 29) / 2, (24 - 17) / 2));
        assert!(layout.fits());
    }

    #[test]
    fn small_terminal_does_not_fit() {
        assert!(!Layout::new((29, 40), 4, 3).fits());
        assert!(!Layout::new((80, 17), 4, 3).fits());
        assert!(Layout::new((30, 18), 4, 3).fits());
    }

    #[test]
    fn labels_sit_in_the_middle_of_their_cell() {
        let layout = Layout::new((29, 17), 4, 3);

        assert_eq!(layout.tile_pos(0, 1), (3, 2));
        assert_eq!(layout.tile_pos(0, 4), (2, 2));
        assert_eq!(layout.tile_pos(5, 2), (10, 6));
        assert_eq!(layout.tile_pos(15, 4), (23, 14));
    }

    #[test]
    fn huge_boards_do_not_fit() {
        for &(side, scale) in &[(12000, DEFAULT_SCALE), (5000, MAX_SCALE), (usize::MAX, MIN_SCALE)] {
            let layout = Layout::new((200, 60), side, scale);

            assert!(!layout.fits());
            assert_eq!(layout.banner_pos(10), None);

            let (x, y) = layout.tile_pos(side.saturating_mul(side) - 1, 4);
            assert!(x >= layout.top_left.0 && y > layout.top_left.1);
        }
    }

    #[test]
    fn banner_needs_a_free_row() {
        let layout = Layout::new((40, 30), 4, 3);
        assert_eq!(layout.banner_pos(10), Some((15, layout.top_left.1 + 17)));

        let tight = Layout::new((40, 18), 4, 3);
        assert_eq!(tight.banner_pos(10), None);
    }

    #[test]
    fn rules_span_the_board() {
        let layout = Layout::new((80, 24), 2, 2);

        assert_eq!(layout.rule('┌', '┬', '┐'), "┌────┬────┐");
        assert_eq!(layout.line('│', ' ', '│', '│'), "│    │    │");
        assert_eq!(text_width(&layout.rule('├', '┼', '┤')), layout.width);
    }

    #[test]
    fn status_line_fills_the_row() {
        let line = status_line(2048, 60);
        assert!(line.starts_with(" 2048 │"));
        assert_eq!(line.chars().count(), 60);

        assert_eq!(status_line(4, 10).chars().count(), 10);
    }
}
