//! Pure projection of a [`GameState`] onto drawing primitives
//!
//! Nothing here knows about terminals. Surface coordinates are `f64` with the
//! origin at the top-left corner and y growing downward; one grid cell is
//! `cell_size` units wide.

use crate::game::{
    ColorParseError, Direction, Ending, GameConfig, GameState, Palette, Phase, Position, Rgb,
};

/// Axis-aligned rectangle in surface units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn square(x: f64, y: f64, side: f64) -> Self {
        Self::new(x, y, side, side)
    }
}

/// One drawing call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Fill {
        rect: Rect,
        color: Rgb,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        color: Rgb,
    },
}

/// Text drawn over the board when the game is not simply running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Paused,
    GameOver { score: u32 },
    Won { score: u32 },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// In draw order: background, grid, food, body, head, eyes
    pub primitives: Vec<Primitive>,
    pub overlay: Option<Overlay>,
}

/// Fixed drawing settings, resolved once from the config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBuilder {
    palette: Palette,
    show_grid: bool,
    grid_size: usize,
    cell_size: f64,
}

impl SceneBuilder {
    pub fn new(config: &GameConfig, cell_size: f64) -> Result<Self, ColorParseError> {
        Ok(Self {
            palette: config.palette()?,
            show_grid: config.show_grid,
            grid_size: config.grid_size,
            cell_size,
        })
    }

    pub fn build(&self, state: &GameState) -> Scene {
        let side = self.grid_size as f64 * self.cell_size;
        let mut primitives = vec![Primitive::Fill {
            rect: Rect::square(0.0, 0.0, side),
            color: self.palette.background,
        }];

        if self.show_grid {
            for i in 0..=self.grid_size {
                let offset = i as f64 * self.cell_size;
                primitives.push(Primitive::Line {
                    from: (offset, 0.0),
                    to: (offset, side),
                    color: self.palette.grid,
                });
                primitives.push(Primitive::Line {
                    from: (0.0, offset),
                    to: (side, offset),
                    color: self.palette.grid,
                });
            }
        }

        if let Some(food) = state.food {
            let half = self.cell_size / 2.0;
            primitives.push(Primitive::Circle {
                center: (
                    food.x as f64 * self.cell_size + half,
                    food.y as f64 * self.cell_size + half,
                ),
                radius: half * 0.8,
                color: self.palette.food,
            });
        }

        for segment in state.snake.body_segments() {
            primitives.push(Primitive::Fill {
                rect: self.cell_rect(*segment),
                color: self.palette.snake_body,
            });
        }

        let head = state.snake.head();
        primitives.push(Primitive::Fill {
            rect: self.cell_rect(head),
            color: self.palette.snake_head,
        });
        for eye in self.eyes(head, state.direction()) {
            primitives.push(Primitive::Fill {
                rect: eye,
                color: self.palette.eyes,
            });
        }

        let overlay = match state.phase {
            Phase::Paused => Some(Overlay::Paused),
            Phase::Over(Ending::Won) => Some(Overlay::Won { score: state.score }),
            Phase::Over(Ending::Lost(_)) => Some(Overlay::GameOver { score: state.score }),
            Phase::Idle | Phase::Running => None,
        };

        Scene {
            width: side,
            height: side,
            primitives,
            overlay,
        }
    }

    fn cell_rect(&self, pos: Position) -> Rect {
        Rect::square(
            pos.x as f64 * self.cell_size,
            pos.y as f64 * self.cell_size,
            self.cell_size,
        )
    }

    /// The two eyes sit on the edge of the head facing `direction`
    fn eyes(&self, head: Position, direction: Direction) -> [Rect; 2] {
        let cell = self.cell_size;
        let size = cell / 5.0;
        let inset = cell / 3.0;
        let x = head.x as f64 * cell;
        let y = head.y as f64 * cell;
        let near = inset;
        let far = cell - inset - size;

        let ((ax, ay), (bx, by)) = match direction {
            Direction::Up => ((near, near), (far, near)),
            Direction::Down => ((near, far), (far, far)),
            Direction::Left => ((near, near), (near, far)),
            Direction::Right => ((far, near), (far, far)),
        };

        [
            Rect::square(x + ax, y + ay, size),
            Rect::square(x + bx, y + by, size),
        ]
    }
}
