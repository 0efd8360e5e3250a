use std::time::Duration;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::{Direction, Intent},
    config::GameConfig,
    state::{CollisionType, Ending, GameState, Phase, Position, Snake},
};

/// What the periodic tick timer should currently be doing
///
/// Every arming gets a fresh `epoch`, so a timer that sees a different
/// schedule than the one it holds must cancel and re-arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Stopped,
    Armed { every: Duration, epoch: u64 },
}

/// Result of a game tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set when this tick finished the game
    pub ending: Option<Ending>,
    pub score_changed: bool,
    /// The tick interval shrank and the schedule was re-armed
    pub speed_changed: bool,
}

/// The game engine: owns the state and is its only writer
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
    state: GameState,
    schedule: Schedule,
    epoch: u64,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with an entropy-seeded random source
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let state = fresh_state(&config, &mut rng);
        Self {
            config,
            rng,
            state,
            schedule: Schedule::Stopped,
            epoch: 0,
        }
    }

    /// Resume from a hand-built state. A `Running` state comes back armed.
    pub fn with_state(config: GameConfig, rng: R, state: GameState) -> Self {
        let mut engine = Self {
            config,
            rng,
            state,
            schedule: Schedule::Stopped,
            epoch: 0,
        };
        if engine.state.is_running() {
            engine.rearm();
        }
        engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Route an input intent to the matching transition
    ///
    /// A direction while idle starts the game before steering.
    pub fn apply(&mut self, intent: Intent) -> &GameState {
        match intent {
            Intent::Steer(direction) => {
                if self.state.phase == Phase::Idle {
                    self.start();
                }
                self.steer(direction)
            }
            Intent::Start => self.start(),
            Intent::TogglePause => self.toggle_pause(),
            Intent::Restart => self.restart(),
        }
    }

    /// Leave `Idle` or a finished game and start ticking
    pub fn start(&mut self) -> &GameState {
        match self.state.phase {
            Phase::Over(_) => {
                self.reset();
            }
            Phase::Idle => {}
            Phase::Running | Phase::Paused => return &self.state,
        }

        self.state.phase = Phase::Running;
        self.rearm();
        debug!("game started at {}ms per tick", self.state.speed_ms);
        &self.state
    }

    pub fn toggle_pause(&mut self) -> &GameState {
        match self.state.phase {
            Phase::Running => {
                self.state.phase = Phase::Paused;
                self.cancel();
                debug!("game paused at score {}", self.state.score);
            }
            Phase::Paused => {
                self.state.phase = Phase::Running;
                self.rearm();
                debug!("game resumed at {}ms per tick", self.state.speed_ms);
            }
            Phase::Idle | Phase::Over(_) => {}
        }
        &self.state
    }

    /// Throw the current game away and return to `Idle`
    pub fn restart(&mut self) -> &GameState {
        self.reset();
        debug!("game restarted");
        &self.state
    }

    /// Buffer a direction change for the next tick
    ///
    /// A reversal of the committed direction is dropped, as is any steering
    /// while paused or finished.
    pub fn steer(&mut self, direction: Direction) -> &GameState {
        let accepts_input = matches!(self.state.phase, Phase::Idle | Phase::Running);
        if accepts_input && !self.state.snake.direction.is_opposite(direction) {
            self.state.next_direction = direction;
        }
        &self.state
    }

    /// Advance the game by exactly one step
    pub fn tick(&mut self) -> TickReport {
        if !self.state.is_running() {
            return TickReport::default();
        }

        self.state.snake.direction = self.state.next_direction;
        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction);
        let grew = self.state.food == Some(new_head);

        self.state.snake.advance(new_head, grew);
        self.state.steps += 1;
        trace!("tick {}: head at {:?}", self.state.steps, new_head);

        // Collision wins over eating
        if let Some(collision) = self.check_collision(new_head) {
            self.finish(Ending::Lost(collision));
            return TickReport {
                ate_food: false,
                ending: Some(Ending::Lost(collision)),
                score_changed: false,
                speed_changed: false,
            };
        }

        let mut report = TickReport::default();
        if grew {
            report.ate_food = true;
            report.score_changed = true;
            self.state.score = self.state.score.saturating_add(self.config.score_per_food);

            let faster = self
                .state
                .speed_ms
                .saturating_sub(self.config.speed_decrement_ms)
                .max(self.config.min_speed_ms);
            if faster < self.state.speed_ms {
                self.state.speed_ms = faster;
                self.rearm();
                report.speed_changed = true;
            }

            match place_food(&self.state, &mut self.rng) {
                Some(food) => self.state.food = Some(food),
                None => {
                    self.state.food = None;
                    self.finish(Ending::Won);
                    report.ending = Some(Ending::Won);
                }
            }
        }

        report
    }

    /// Check if the freshly moved head causes a collision
    fn check_collision(&self, head: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if self.state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn finish(&mut self, ending: Ending) {
        self.cancel();
        self.state.phase = Phase::Over(ending);
        match ending {
            Ending::Won => info!("game won with final score {}", self.state.score),
            Ending::Lost(collision) => info!(
                "game over ({:?}) with final score {}",
                collision, self.state.score
            ),
        }
    }

    fn reset(&mut self) {
        self.cancel();
        self.state = fresh_state(&self.config, &mut self.rng);
    }

    /// Cancel whatever is armed, then arm at the current speed
    fn rearm(&mut self) {
        self.cancel();
        self.epoch += 1;
        self.schedule = Schedule::Armed {
            every: self.state.tick_interval(),
            epoch: self.epoch,
        };
    }

    fn cancel(&mut self) {
        self.schedule = Schedule::Stopped;
    }
}

/// A new idle game: snake centred heading right, first food placed
fn fresh_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let center = (config.grid_size / 2) as i32;
    let snake = Snake::new(
        Position::new(center, center),
        Direction::Right,
        config.initial_snake_length,
    );

    let mut state = GameState::new(snake, None, config.grid_size, config.initial_speed_ms);
    state.food = place_food(&state, rng);
    state
}

/// Pick a free cell uniformly at random; `None` when the grid is full
fn place_food(state: &GameState, rng: &mut impl Rng) -> Option<Position> {
    let candidates = state.free_cells();
    if candidates.is_empty() {
        return None;
    }

    Some(candidates[rng.gen_range(0..candidates.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn running(config: GameConfig, snake: Snake, food: Position) -> GameEngine<StdRng> {
        let mut state = GameState::new(
            snake,
            Some(food),
            config.grid_size,
            config.initial_speed_ms,
        );
        state.phase = Phase::Running;
        GameEngine::with_state(config, StdRng::seed_from_u64(7), state)
    }

    #[test]
    fn test_fresh_engine() {
        let engine = GameEngine::with_seed(GameConfig::default(), 1);
        let state = engine.state();

        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.speed_ms, 150);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(engine.schedule(), Schedule::Stopped);

        let food = state.food.unwrap();
        assert!(state.is_in_bounds(food));
        assert!(!state.is_occupied_by_snake(food));
    }

    #[test]
    fn test_tick_is_noop_unless_running() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let before = engine.state().clone();

        assert_eq!(engine.tick(), TickReport::default());
        assert_eq!(engine.state(), &before);

        engine.start();
        engine.toggle_pause();
        let paused = engine.state().clone();
        assert_eq!(engine.tick(), TickReport::default());
        assert_eq!(engine.state(), &paused);
    }

    #[test]
    fn test_start_arms_schedule() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        engine.start();

        assert!(engine.state().is_running());
        assert_eq!(
            engine.schedule(),
            Schedule::Armed {
                every: Duration::from_millis(150),
                epoch: 1
            }
        );

        // Starting again while running changes nothing
        engine.start();
        assert_eq!(
            engine.schedule(),
            Schedule::Armed {
                every: Duration::from_millis(150),
                epoch: 1
            }
        );
    }

    #[test]
    fn test_pause_and_resume() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);

        // No-op while idle
        engine.toggle_pause();
        assert_eq!(engine.state().phase, Phase::Idle);

        engine.start();
        engine.toggle_pause();
        assert!(engine.state().is_paused());
        assert_eq!(engine.schedule(), Schedule::Stopped);

        engine.start();
        assert!(engine.state().is_paused(), "start must not resume");

        engine.toggle_pause();
        assert!(engine.state().is_running());
        assert_eq!(
            engine.schedule(),
            Schedule::Armed {
                every: Duration::from_millis(150),
                epoch: 2
            }
        );
    }

    #[test]
    fn test_resume_uses_accelerated_interval() {
        let config = GameConfig::small();
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let mut engine = running(config, snake, Position::new(6, 5));

        let report = engine.tick();
        assert!(report.speed_changed);
        assert_eq!(engine.state().speed_ms, 148);

        engine.toggle_pause();
        engine.toggle_pause();
        match engine.schedule() {
            Schedule::Armed { every, .. } => assert_eq!(every, Duration::from_millis(148)),
            Schedule::Stopped => panic!("resume should re-arm"),
        }
    }

    #[test]
    fn test_restart_from_any_phase() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3);
        engine.start();
        engine.tick();
        engine.restart();

        assert_eq!(engine.state().phase, Phase::Idle);
        assert_eq!(engine.state().steps, 0);
        assert_eq!(engine.schedule(), Schedule::Stopped);

        engine.start();
        engine.toggle_pause();
        engine.restart();
        assert_eq!(engine.state().phase, Phase::Idle);
        assert_eq!(engine.schedule(), Schedule::Stopped);
    }

    #[test]
    fn test_start_after_game_over_resets() {
        let config = GameConfig::small();
        let snake = Snake::new(Position::new(9, 5), Direction::Right, 3);
        let mut engine = running(config, snake, Position::new(0, 0));
        engine.state.score = 30;

        engine.tick();
        assert!(engine.state().is_over());
        assert_eq!(engine.schedule(), Schedule::Stopped);

        engine.start();
        assert!(engine.state().is_running());
        assert_eq!(engine.state().score, 0);
        assert_eq!(engine.state().snake.head(), Position::new(5, 5));
        assert!(matches!(engine.schedule(), Schedule::Armed { .. }));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        engine.start();
        let initial_head = engine.state().snake.head();

        let report = engine.tick();

        assert_eq!(report.ending, None);
        assert_eq!(engine.state().steps, 1);
        assert_eq!(engine.state().snake.head(), initial_head.moved_by(1, 0));
    }

    #[test]
    fn test_food_consumption() {
        let config = GameConfig::small();
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let mut engine = running(config, snake, Position::new(6, 5));

        let report = engine.tick();

        assert!(report.ate_food);
        assert!(report.score_changed);
        assert_eq!(engine.state().score, 10);
        assert_eq!(engine.state().snake.len(), 4);

        let food = engine.state().food.unwrap();
        assert!(!engine.state().is_occupied_by_snake(food));
    }

    #[test]
    fn test_score_saturates() {
        let config = GameConfig::small();
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let mut engine = running(config, snake, Position::new(6, 5));
        engine.state.score = u32::MAX - 3;

        let report = engine.tick();

        assert!(report.ate_food);
        assert_eq!(engine.state().score, u32::MAX);
        assert!(engine.state().is_running());
    }

    #[test]
    fn test_speed_floor() {
        let config = GameConfig {
            initial_speed_ms: 51,
            ..GameConfig::small()
        };
        let snake = Snake::new(Position::new(2, 5), Direction::Right, 1);
        let mut engine = running(config, snake, Position::new(3, 5));

        let report = engine.tick();
        assert!(report.speed_changed);
        assert_eq!(engine.state().speed_ms, 50);

        engine.state.food = Some(Position::new(4, 5));
        let epoch_before = engine.schedule();
        let report = engine.tick();
        assert!(report.ate_food);
        assert!(!report.speed_changed);
        assert_eq!(engine.state().speed_ms, 50);
        assert_eq!(engine.schedule(), epoch_before);
    }

    #[test]
    fn test_wall_collision() {
        let config = GameConfig::small();
        let snake = Snake::new(Position::new(0, 5), Direction::Left, 3);
        let mut engine = running(config, snake, Position::new(5, 5));

        let report = engine.tick();

        assert_eq!(report.ending, Some(Ending::Lost(CollisionType::Wall)));
        assert_eq!(engine.state().phase, Phase::Over(Ending::Lost(CollisionType::Wall)));
    }

    #[test]
    fn test_self_collision() {
        let config = GameConfig::small();
        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut engine = running(config, snake, Position::new(8, 8));

        engine.tick(); // (6,5)
        engine.steer(Direction::Down);
        engine.tick(); // (6,6)
        engine.steer(Direction::Left);
        engine.tick(); // (5,6)
        engine.steer(Direction::Up);
        let report = engine.tick(); // (5,5) is still body

        assert_eq!(report.ending, Some(Ending::Lost(CollisionType::SelfCollision)));
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        let config = GameConfig::small();
        // A 2x2 loop: the head chases the tail cell that is about to move
        let snake = Snake::from_segments(
            [
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(4, 6),
                Position::new(4, 5),
            ],
            Direction::Up,
        )
        .unwrap();
        let mut engine = running(config, snake, Position::new(0, 0));

        engine.steer(Direction::Left);
        let report = engine.tick();

        assert_eq!(report.ending, None);
        assert_eq!(engine.state().snake.head(), Position::new(4, 5));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        engine.start();

        engine.steer(Direction::Left);
        assert_eq!(engine.state().next_direction, Direction::Right);

        engine.steer(Direction::Up);
        assert_eq!(engine.state().next_direction, Direction::Up);
        // Still relative to the committed direction, not the pending one
        engine.steer(Direction::Down);
        assert_eq!(engine.state().next_direction, Direction::Down);
    }

    #[test]
    fn test_steering_ignored_when_paused_or_over() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        engine.start();
        engine.toggle_pause();
        engine.steer(Direction::Up);
        assert_eq!(engine.state().next_direction, Direction::Right);
    }

    #[test]
    fn test_direction_intent_starts_idle_game() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        engine.apply(Intent::Steer(Direction::Down));

        assert!(engine.state().is_running());
        assert_eq!(engine.state().next_direction, Direction::Down);
    }

    #[test]
    fn test_win_when_grid_fills() {
        let config = GameConfig {
            grid_size: 2,
            initial_snake_length: 1,
            ..Default::default()
        };
        let snake = Snake::from_segments(
            [Position::new(1, 0), Position::new(0, 0), Position::new(0, 1)],
            Direction::Down,
        )
        .unwrap();
        let mut state = GameState::new(snake, Some(Position::new(1, 1)), 2, 150);
        state.phase = Phase::Running;
        let mut engine = GameEngine::with_state(config, StepRng::new(0, 1), state);

        let report = engine.tick();

        assert_eq!(report.ending, Some(Ending::Won));
        assert!(engine.state().is_won());
        assert_eq!(engine.state().food, None);
        assert_eq!(engine.state().snake.len(), 4);
        assert_eq!(engine.state().score, 10);
        assert_eq!(engine.schedule(), Schedule::Stopped);
    }

    #[test]
    fn test_food_follows_fixed_draws() {
        let config = GameConfig::small();
        // StepRng(0, 0) always draws the lowest index: the first free cell
        let engine = GameEngine::with_rng(config, StepRng::new(0, 0));
        assert_eq!(engine.state().food, Some(Position::new(0, 0)));
    }
}
