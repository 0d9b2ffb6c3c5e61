//! Two-player tic-tac-toe with a running tally.

use std::fmt;

use xlos_render::{Color, Point, Rect, Renderer, RoundedRect, Stroke, TextStyle};
use xlos_style::RenderConfig;

use crate::app::{App, AppAction};
use crate::input::{Key, RawEvent};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mark::X => "X",
            Mark::O => "O",
        })
    }
}

/// Games won by each side and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub x: u32,
    pub o: u32,
    pub draws: u32,
}

/// The board fills the largest centered square that leaves an 18 px border.
/// A finished game is tallied and the board cleared immediately.
#[derive(Debug)]
pub struct TicTacToe {
    board: [Option<Mark>; 9],
    turn: Mark,
    tally: Tally,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self {
            board: [None; 9],
            turn: Mark::X,
            tally: Tally::default(),
        }
    }
}

impl TicTacToe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &[Option<Mark>; 9] {
        &self.board
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Place the current player's mark on square `index` (row-major).
    ///
    /// Occupied or out-of-range squares are ignored.
    pub fn play(&mut self, index: usize) {
        if !matches!(self.board.get(index), Some(None)) {
            return;
        }
        self.board[index] = Some(self.turn);
        if self.has_line(self.turn) {
            match self.turn {
                Mark::X => self.tally.x += 1,
                Mark::O => self.tally.o += 1,
            }
            self.clear();
        } else if self.board.iter().all(Option::is_some) {
            self.tally.draws += 1;
            self.clear();
        } else {
            self.turn = self.turn.other();
        }
    }

    fn has_line(&self, mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|i| self.board[*i] == Some(mark)))
    }

    fn clear(&mut self) {
        self.board = [None; 9];
        self.turn = Mark::X;
    }

    /// Board origin and cell size for `content`.
    fn geometry(content: Rect) -> (Point, f32) {
        let size = content.width().min(content.height()) - 36.0;
        let cell = (size / 3.0).floor();
        let origin = Point::new(
            content.left() + ((content.width() - size) / 2.0).floor(),
            content.top() + ((content.height() - size) / 2.0).floor(),
        );
        (origin, cell)
    }

    fn square_at(content: Rect, point: Point) -> Option<usize> {
        let (origin, cell) = Self::geometry(content);
        if cell <= 0.0 {
            return None;
        }
        let gx = ((point.x - origin.x) / cell).floor();
        let gy = ((point.y - origin.y) / cell).floor();
        if (0.0..3.0).contains(&gx) && (0.0..3.0).contains(&gy) {
            Some(gy as usize * 3 + gx as usize)
        } else {
            None
        }
    }
}

impl App for TicTacToe {
    fn name(&self) -> &str {
        "TicTacToe"
    }

    fn handle_event(&mut self, event: &RawEvent, content: Rect) -> Option<AppAction> {
        if let Some(point) = event.left_press()
            && content.contains(point)
            && let Some(index) = Self::square_at(content, point)
        {
            self.play(index);
        } else if event.pressed_key() == Some(Key::Character('r')) {
            self.clear();
        }
        None
    }

    fn draw(&mut self, renderer: &mut dyn Renderer, content: Rect, config: &RenderConfig) {
        let palette = config.palette();
        renderer.fill_rounded_rect(RoundedRect::new(content, 8.0), palette.panel);
        renderer.draw_text(
            &format!(
                "TicTacToe: turn {} (R reset)   X {}  O {}  Draw {}",
                self.turn, self.tally.x, self.tally.o, self.tally.draws
            ),
            Point::new(content.left() + 8.0, content.top() + 8.0),
            &TextStyle::new(13.0, palette.text_muted),
        );

        let (origin, cell) = Self::geometry(content);
        let grid = Stroke::new(Color::from_rgb8(120, 120, 120), 2.0);
        for i in 0..4 {
            let offset = i as f32 * cell;
            renderer.draw_line(
                Point::new(origin.x + offset, origin.y),
                Point::new(origin.x + offset, origin.y + 3.0 * cell),
                &grid,
            );
            renderer.draw_line(
                Point::new(origin.x, origin.y + offset),
                Point::new(origin.x + 3.0 * cell, origin.y + offset),
                &grid,
            );
        }

        for (index, mark) in self.board.iter().enumerate() {
            let square = Rect::new(
                origin.x + (index % 3) as f32 * cell,
                origin.y + (index / 3) as f32 * cell,
                cell,
                cell,
            );
            match mark {
                Some(Mark::X) => {
                    let stroke = Stroke::new(Color::from_rgb8(0, 160, 255), 4.0);
                    renderer.draw_line(square.top_left(), square.bottom_right(), &stroke);
                    renderer.draw_line(square.top_right(), square.bottom_left(), &stroke);
                }
                Some(Mark::O) => renderer.stroke_circle(
                    square.center(),
                    (cell / 2.0 - 8.0).max(1.0),
                    &Stroke::new(Color::from_rgb8(60, 200, 80), 4.0),
                ),
                None => {}
            }
        }
    }
}
