use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine, Points},
    },
};

use super::scene::{self, Overlay, Primitive, Scene, SceneBuilder};
use crate::game::{GameState, Rgb};
use crate::metrics::GameMetrics;

/// Paints scenes onto a terminal frame
pub struct Renderer {
    scenes: SceneBuilder,
}

impl Renderer {
    pub fn new(scenes: SceneBuilder) -> Self {
        Self { scenes }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let scene = self.scenes.build(state);
        let board = board_area(chunks[1]);
        // Half blocks give two vertical pixels per terminal cell
        let pixel = (
            scene.width / board.width.saturating_sub(2).max(1) as f64,
            scene.height / (board.height.saturating_sub(2).max(1) as f64 * 2.0),
        );
        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .marker(Marker::HalfBlock)
            .x_bounds([0.0, scene.width])
            .y_bounds([0.0, scene.height])
            .paint(|ctx| paint_scene(ctx, &scene, pixel));
        frame.render_widget(canvas, board);

        if let Some(overlay) = scene.overlay {
            let popup = popup_area(board);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_overlay(overlay), popup);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{}ms", state.speed_ms), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_overlay(&self, overlay: Overlay) -> Paragraph<'static> {
        let (title, color, score) = match overlay {
            Overlay::Paused => ("PAUSED", Color::Yellow, None),
            Overlay::GameOver { score } => ("GAME OVER", Color::Red, Some(score)),
            Overlay::Won { score } => ("YOU WIN!", Color::Green, Some(score)),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
        ];

        match score {
            Some(score) => {
                text.push(Line::from(vec![
                    Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        score.to_string(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                text.push(Line::from(""));
                text.push(Line::from(vec![
                    Span::styled("Press ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        "R",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        "Q",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" to quit", Style::default().fg(Color::Gray)),
                ]));
            }
            None => {
                text.push(Line::from(vec![
                    Span::styled("Press ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        "Space",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" to resume", Style::default().fg(Color::Gray)),
                ]));
            }
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" start | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Cyan)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Largest square-looking board (two columns per row) centred in `area`
fn board_area(area: Rect) -> Rect {
    let rows = area.height.min(area.width / 2);
    let cols = rows * 2;
    Rect::new(
        area.x + (area.width - cols) / 2,
        area.y + (area.height - rows) / 2,
        cols,
        rows,
    )
}

fn popup_area(area: Rect) -> Rect {
    let width = area.width.min(36);
    let height = area.height.min(8);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Draw primitives in order; the canvas y axis points up, the scene's down
fn paint_scene(ctx: &mut Context, scene: &Scene, pixel: (f64, f64)) {
    let flip = |y: f64| scene.height - y;

    for primitive in &scene.primitives {
        match *primitive {
            Primitive::Fill { rect, color } => {
                let coords: Vec<(f64, f64)> = fill_points(rect, pixel)
                    .into_iter()
                    .map(|(x, y)| (x, flip(y)))
                    .collect();
                ctx.draw(&Points {
                    coords: &coords,
                    color: to_color(color),
                });
            }
            Primitive::Line { from, to, color } => {
                ctx.draw(&CanvasLine {
                    x1: from.0,
                    y1: flip(from.1),
                    x2: to.0,
                    y2: flip(to.1),
                    color: to_color(color),
                });
            }
            Primitive::Circle {
                center,
                radius,
                color,
            } => {
                let coords: Vec<(f64, f64)> = disc_points(center, radius, pixel)
                    .into_iter()
                    .map(|(x, y)| (x, flip(y)))
                    .collect();
                ctx.draw(&Points {
                    coords: &coords,
                    color: to_color(color),
                });
            }
        }
    }
}

/// Centres of every pixel inside `rect`, plus the rect centre so tiny
/// shapes never vanish
fn fill_points(rect: scene::Rect, (px, py): (f64, f64)) -> Vec<(f64, f64)> {
    let mut points = vec![(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)];

    let first_col = (rect.x / px).floor() as i64;
    let last_col = ((rect.x + rect.width) / px).ceil() as i64;
    let first_row = (rect.y / py).floor() as i64;
    let last_row = ((rect.y + rect.height) / py).ceil() as i64;

    for row in first_row..last_row {
        let y = (row as f64 + 0.5) * py;
        if y < rect.y || y >= rect.y + rect.height {
            continue;
        }
        for col in first_col..last_col {
            let x = (col as f64 + 0.5) * px;
            if x >= rect.x && x < rect.x + rect.width {
                points.push((x, y));
            }
        }
    }

    points
}

fn disc_points(center: (f64, f64), radius: f64, pixel: (f64, f64)) -> Vec<(f64, f64)> {
    let bounds = scene::Rect::square(center.0 - radius, center.1 - radius, radius * 2.0);
    let mut points: Vec<(f64, f64)> = fill_points(bounds, pixel)
        .into_iter()
        .filter(|(x, y)| (x - center.0).powi(2) + (y - center.1).powi(2) <= radius * radius)
        .collect();
    points.push(center);
    points
}
