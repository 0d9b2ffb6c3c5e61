//! Snake, confined to its window.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use xlos_render::{Color, Point, Rect, Renderer, RoundedRect, TextStyle};
use xlos_style::RenderConfig;

use crate::app::{App, AppAction};
use crate::input::{Key, RawEvent};

/// Side of one grid cell in pixels.
pub const CELL: f32 = 18.0;
/// Frames between moves (about 0.12 s at 60 fps).
pub const FRAMES_PER_STEP: u32 = 7;
const INSET: f32 = 3.0;
const MIN_CELLS: i32 = 3;

type Cell = (i32, i32);

/// The classic game on a grid sized to the window's content area.
///
/// The board dimensions are recomputed on every move, so resizing the window
/// shrinks or grows the playing field. Leaving the field or running into
/// itself ends the game until `R` is pressed.
#[derive(Debug)]
pub struct Snake {
    /// Head first.
    body: Vec<Cell>,
    direction: Cell,
    food: Cell,
    alive: bool,
    score: u32,
    frames: u32,
    rng: StdRng,
}

impl Default for Snake {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Snake {
    /// Create a game with food placed from system entropy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game with deterministic food placement.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut snake = Self {
            body: Vec::new(),
            direction: (1, 0),
            food: (0, 0),
            alive: true,
            score: 0,
            frames: 0,
            rng,
        };
        snake.reset();
        snake
    }

    /// Start over.
    pub fn reset(&mut self) {
        self.body = vec![(5, 5), (4, 5), (3, 5)];
        self.direction = (1, 0);
        self.food = (10, 8);
        self.alive = true;
        self.score = 0;
        self.frames = 0;
    }

    pub fn body(&self) -> &[(i32, i32)] {
        &self.body
    }

    pub fn food(&self) -> (i32, i32) {
        self.food
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Grid columns and rows that fit in `area`.
    pub fn grid_size(area: Rect) -> (i32, i32) {
        (
            ((area.width() / CELL) as i32).max(MIN_CELLS),
            ((area.height() / CELL) as i32).max(MIN_CELLS),
        )
    }

    fn play_area(content: Rect) -> Rect {
        content.deflate(INSET)
    }

    fn turn(&mut self, direction: Cell) {
        // No reversing into the neck.
        if direction != (-self.direction.0, -self.direction.1) {
            self.direction = direction;
        }
    }

    /// Move one cell on a `cols` x `rows` board.
    pub fn step(&mut self, cols: i32, rows: i32) {
        if !self.alive {
            return;
        }
        let (hx, hy) = self.body[0];
        let head = (hx + self.direction.0, hy + self.direction.1);
        if head.0 < 0 || head.1 < 0 || head.0 >= cols || head.1 >= rows || self.body.contains(&head)
        {
            self.alive = false;
            tracing::debug!(score = self.score, "snake died");
            return;
        }
        self.body.insert(0, head);
        if head == self.food {
            self.score += 1;
            let free: Vec<Cell> = (0..cols)
                .flat_map(|x| (0..rows).map(move |y| (x, y)))
                .filter(|cell| !self.body.contains(cell))
                .collect();
            self.food = free.choose(&mut self.rng).copied().unwrap_or((0, 0));
        } else {
            self.body.pop();
        }
    }
}

impl App for Snake {
    fn name(&self) -> &str {
        "Snake"
    }

    fn handle_event(&mut self, event: &RawEvent, _content: Rect) -> Option<AppAction> {
        match event.pressed_key()? {
            Key::ArrowUp => self.turn((0, -1)),
            Key::ArrowDown => self.turn((0, 1)),
            Key::ArrowLeft => self.turn((-1, 0)),
            Key::ArrowRight => self.turn((1, 0)),
            Key::Character('r') => self.reset(),
            _ => {}
        }
        None
    }

    fn update(&mut self, content: Rect) {
        self.frames += 1;
        if self.frames < FRAMES_PER_STEP {
            return;
        }
        self.frames = 0;
        let (cols, rows) = Self::grid_size(Self::play_area(content));
        self.step(cols, rows);
    }

    fn draw(&mut self, renderer: &mut dyn Renderer, content: Rect, config: &RenderConfig) {
        let palette = config.palette();
        renderer.fill_rounded_rect(RoundedRect::new(content, 8.0), palette.panel);

        let area = Self::play_area(content);
        let cell_rect = |(x, y): Cell| {
            Rect::new(
                area.left() + x as f32 * CELL,
                area.top() + y as f32 * CELL,
                CELL - 1.0,
                CELL - 1.0,
            )
        };
        for segment in &self.body {
            renderer.fill_rect(cell_rect(*segment), Color::from_rgb8(0, 180, 0));
        }
        renderer.fill_rect(cell_rect(self.food), Color::from_rgb8(220, 50, 50));

        let status = if self.alive {
            format!("Score: {}  (Arrows) R reset", self.score)
        } else {
            format!("Game over! Score: {}  R reset", self.score)
        };
        renderer.draw_text(
            &status,
            Point::new(content.left() + 8.0, content.top() + 6.0),
            &TextStyle::new(13.0, palette.text_muted),
        );
    }
}
