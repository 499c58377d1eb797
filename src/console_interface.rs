use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::core::{Cell, Direction, GameChangeType, GridWorld, PuzzleState, UserAction, Vec2};
use crate::models::GameRenderState;
use crate::session::GameSession;

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &GameSession,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let rows = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(3)])
            .split(f.area());
        let columns = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(rows[0]);

        // Game area
        let game_text = render_game_to_string(session.world(), session.state());
        let title = format!("{} | moves: {}", session.level_name(), session.moves());
        let game_paragraph = Paragraph::new(game_text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(game_paragraph, columns[0]);

        let budget_paragraph = Paragraph::new(render_budgets_to_string(session.state()))
            .block(Block::default().borders(Borders::ALL).title("Crates"))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(budget_paragraph, columns[1]);

        let status = render_status_line(state);
        let status_paragraph = Paragraph::new(status)
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center);
        f.render_widget(status_paragraph, rows[1]);

        // Instructions
        let instructions = if state.won {
            "You Win! N for the next level, R to replay, Q to quit"
        } else {
            "WASD/Arrows move | H hint | C check | R reset | N next level | Q quit"
        };
        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, rows[2]);
    })?;
    Ok(())
}

fn render_status_line(state: &GameRenderState) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(err) = &state.error {
        parts.push(format!("Error: {}", err));
    }
    match state.last_change {
        Some(GameChangeType::CrateDestroyed(id)) => parts.push(format!("Crate {} broke!", id.0)),
        Some(change_type) => parts.push(format!("Last: {:?}", change_type)),
        None => {}
    }
    if state.hint_pending {
        parts.push("Thinking...".to_string());
    } else if let Some(hint) = &state.hint {
        parts.push(hint.to_human_string());
    }
    if let Some(message) = &state.message {
        parts.push(message.clone());
    }
    parts.join(" | ")
}

/// Draws the board with the usual Sokoban symbols; broken crates show as `x`.
pub fn render_game_to_string(world: &GridWorld, game: &PuzzleState) -> String {
    let mut result = String::new();
    for y in 0..world.height() {
        for x in 0..world.width() {
            let pos = Vec2 { x, y };
            let has_player = pos == game.player;
            let has_crate = game.has_crate_at(&pos);
            let has_wreck = game.destroyed.values().any(|&p| p == pos);
            let ch = match world.cell(&pos) {
                Some(Cell::Wall) | None => '#',
                Some(Cell::Floor) => {
                    if has_player {
                        '@'
                    } else if has_crate {
                        '$'
                    } else if has_wreck {
                        'x'
                    } else {
                        ' '
                    }
                }
                Some(Cell::Target) => {
                    if has_player {
                        '+'
                    } else if has_crate {
                        '*'
                    } else if has_wreck {
                        'x'
                    } else {
                        '.'
                    }
                }
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}

pub fn render_budgets_to_string(game: &PuzzleState) -> String {
    let mut lines: Vec<(usize, String)> = game
        .crates
        .iter()
        .map(|(id, c)| {
            (
                id.0,
                format!("#{} at {}: {} pushes left", id.0, c.position, c.pushes_remaining),
            )
        })
        .chain(
            game.destroyed
                .iter()
                .map(|(id, pos)| (id.0, format!("#{} at {}: broken", id.0, pos))),
        )
        .collect();
    lines.sort_by_key(|(id, _)| *id);

    let mut result = String::new();
    for (_, line) in lines {
        result.push_str(&line);
        result.push('\n');
    }
    result
}

pub enum ConsoleInput {
    UserAction(UserAction),
    Hint,
    Check,
    Reset,
    NextLevel,
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input() -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(std::time::Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
                KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Up))
                }
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Down))
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Left))
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Right))
                }
                KeyCode::Char('h') | KeyCode::Char('H') => ConsoleInput::Hint,
                KeyCode::Char('c') | KeyCode::Char('C') => ConsoleInput::Check,
                KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::Reset,
                KeyCode::Char('n') | KeyCode::Char('N') => ConsoleInput::NextLevel,
                _ => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}
