use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseEvent,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::debug;
use rand::Rng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::ticker::Ticker;
use crate::game::{GameEngine, Intent, Phase};
use crate::input::{Gesture, InputHandler, KeyAction, SwipeTracker};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, SceneBuilder};

/// Surface units per grid cell
const CELL_SIZE: f64 = 20.0;

pub struct HumanMode<R: Rng = StdRng> {
    engine: GameEngine<R>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    swipes: SwipeTracker,
    should_quit: bool,
}

impl<R: Rng> HumanMode<R> {
    pub fn new(engine: GameEngine<R>) -> Result<Self> {
        let scenes = SceneBuilder::new(engine.config(), CELL_SIZE)
            .context("Invalid colors in game config")?;

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(scenes),
            input_handler: InputHandler::new(),
            swipes: SwipeTracker::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Armed and re-armed only from the engine's schedule
        let mut ticker = Ticker::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = ticker.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update(self.engine.state().is_running());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            // Whatever just ran may have changed pace, paused, or ended the game
            ticker.sync(self.engine.schedule());

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Game(intent) => self.apply(intent),
                    KeyAction::Quit => {
                        self.should_quit = true;
                    }
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }

        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match self.swipes.handle_mouse_event(mouse) {
            Some(Gesture::Swipe(direction)) => self.apply(Intent::Steer(direction)),
            // A tap only ever starts a fresh board
            Some(Gesture::Tap) if self.engine.state().phase == Phase::Idle => {
                self.apply(Intent::Start)
            }
            _ => {}
        }
    }

    fn apply(&mut self, intent: Intent) {
        let was_idle = self.engine.state().phase == Phase::Idle;
        let was_over = self.engine.state().is_over();
        debug!("intent {:?}", intent);

        let state = self.engine.apply(intent);
        let started = state.is_running() && (was_idle || was_over);
        let reset = state.phase == Phase::Idle && !was_idle;

        if started || reset {
            self.metrics.on_game_start();
        }
        self.metrics.set_score(self.engine.state().score);
    }

    fn update_game(&mut self) {
        let report = self.engine.tick();

        if report.score_changed {
            self.metrics.set_score(self.engine.state().score);
        }

        if report.ending.is_some() {
            self.metrics.on_game_over(self.engine.state().score);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
