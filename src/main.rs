// Sokoban with crates that break after a fixed number of pushes.
// Controls: W/A/S/D or arrow keys to move, H hint, C check, R reset, N next level, Q quit.
// Tiles: '#' wall, '@' player, '$' crate, '.' goal, '*' crate on goal, '+' player on goal, ' ' floor.

use std::io;

use clap::Parser;
use log::{error, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use brittle_crates::config::{Args, Command};
use brittle_crates::console_interface::ConsoleInput::*;
use brittle_crates::console_interface::{
    cleanup_terminal, handle_input, render_game, setup_terminal,
};
use brittle_crates::core::GameChangeType;
use brittle_crates::level::{Level, load_level_from_file};
use brittle_crates::logging::FileLogger;
use brittle_crates::models::GameRenderState;
use brittle_crates::planner::evaluate;
use brittle_crates::session::{GameSession, HintWorker};
use brittle_crates::state_graph::{
    GraphRenderState, PopulateResult, StateGraph, get_graph_info, get_json_data, populate_step,
    render_graph, trim_unwinnable,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    FileLogger::init(&args.log_file, args.log_level)?;

    let mut session = open_session(&args)?;

    match args.command.unwrap_or(Command::Play) {
        Command::Play => {
            let mut terminal = setup_terminal()?;
            let result = run_interactive(&mut session, &mut terminal);
            cleanup_terminal()?;
            result?;
        }
        Command::Hint { json } => {
            run_hint(&session, json)?;
        }
        Command::Graph {
            node_limit,
            no_trim,
            export,
        } => {
            let mut terminal = setup_terminal()?;
            let result = run_state_graph(&session, node_limit, &mut terminal);
            cleanup_terminal()?;
            let mut state_graph = result?;
            report_state_graph(&session, &mut state_graph, !no_trim, export)?;
        }
    }

    Ok(())
}

fn open_session(args: &Args) -> Result<GameSession, Box<dyn std::error::Error>> {
    let session = if args.levels.is_dir() {
        GameSession::from_dir(args.levels.clone(), args.rules(), args.horizon())?
    } else {
        let level: Level = load_level_from_file(&args.levels, args.rules())?;
        GameSession::from_level(level, args.rules(), args.horizon())
    };
    info!(
        "opened {} with budget {} and {:?}",
        session.level_name(),
        args.budget,
        args.policy
    );
    Ok(session)
}

fn run_hint(session: &GameSession, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let verdict = evaluate(session.state(), session.world(), session.horizon());
    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        println!("{}: {}", session.level_name(), verdict.to_human_string());
        println!("states expanded: {}", verdict.expanded);
    }
    Ok(())
}

fn run_state_graph(
    session: &GameSession,
    node_limit: usize,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<StateGraph, Box<dyn std::error::Error>> {
    let mut state_graph = StateGraph::new();
    state_graph.upsert_state(session.state().clone());

    let start_time = std::time::Instant::now();
    let mut last_render_time = start_time;
    let mut processed_since_last_render = 0;

    'outer: loop {
        let stop_time = std::time::Instant::now() + std::time::Duration::from_millis(1000);
        while std::time::Instant::now() < stop_time {
            if state_graph.nodes.len() >= node_limit {
                info!("node limit {} reached", node_limit);
                break 'outer;
            }
            let PopulateResult::Populated = populate_step(&mut state_graph, session.world()) else {
                break 'outer;
            };
            processed_since_last_render += 1;
        }

        let current_time = std::time::Instant::now();
        render_graph(
            terminal,
            GraphRenderState {
                graph: &state_graph,
                world: session.world(),
                processed_since_last_render,
                start_time,
                last_render_time,
                current_time,
            },
        )?;

        last_render_time = current_time;
        processed_since_last_render = 0;
    }

    Ok(state_graph)
}

fn report_state_graph(
    session: &GameSession,
    state_graph: &mut StateGraph,
    trim: bool,
    export: Option<std::path::PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", get_graph_info(state_graph, session.world()));
    if trim {
        let trimmed_stats = trim_unwinnable(state_graph, session.world());
        println!(
            "Trimmed {} ({:.1}%) nodes and {} ({:.1}%) edges",
            trimmed_stats.nodes_removed(),
            trimmed_stats.nodes_removed_percentage(),
            trimmed_stats.edges_removed(),
            trimmed_stats.edges_removed_percentage()
        );
        println!("{}", get_graph_info(state_graph, session.world()));
    }

    if let Some(path) = export {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, get_json_data(state_graph, session.world())?)?;
        println!("State graph exported to {}", path.display());
    }
    Ok(())
}

fn run_interactive(
    session: &mut GameSession,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let hints = HintWorker::spawn();
    let mut render = GameRenderState::new();
    render.won = session.check();
    render_game(terminal, session, &render)?;

    loop {
        let input = match handle_input() {
            Ok(input) => input,
            Err(err) => {
                error!("error reading input: {}", err);
                break;
            }
        };

        let mut dirty = false;
        match input {
            Quit => break,
            UserAction(user_action) => {
                match session.act(user_action) {
                    Ok(change) => {
                        render.last_change = Some(change);
                        render.error = None;
                        render.hint = None;
                        render.hint_pending = false;
                        if let GameChangeType::CrateDestroyed(_) = change {
                            let lost = session.state().live_count() < session.world().total_targets();
                            render.message = Some(if lost {
                                format!(
                                    "{} crate(s) broken, the level can no longer be won",
                                    session.destroyed_count()
                                )
                            } else {
                                format!("{} crate(s) broken", session.destroyed_count())
                            });
                        }
                    }
                    Err(rejected) => render.error = Some(rejected.to_string()),
                }
                render.won = session.check();
                dirty = true;
            }
            Hint => {
                if !render.hint_pending {
                    hints.request(session);
                    render.hint_pending = true;
                    dirty = true;
                }
            }
            Check => {
                render.won = session.check();
                render.message = Some(if render.won {
                    "Solved!".to_string()
                } else {
                    "Not solved yet".to_string()
                });
                dirty = true;
            }
            Reset => {
                session.reset();
                render = GameRenderState::new();
                dirty = true;
            }
            NextLevel => {
                render = GameRenderState::new();
                if let Err(err) = session.next_level() {
                    error!("could not load the next level: {}", err);
                    render.error = Some(err.to_string());
                }
                render.won = session.check();
                dirty = true;
            }
            Timeout | Unknown => {}
        }

        if render.hint_pending {
            if let Some(verdict) = hints.poll(session.generation()) {
                info!("hint: {}", verdict.to_human_string());
                render.hint = Some(verdict);
                render.hint_pending = false;
                dirty = true;
            }
        }

        if dirty {
            render_game(terminal, session, &render)?;
        }
    }

    Ok(())
}
