use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::core::{DestructionPolicy, GridWorld, InvariantError, PuzzleState, Vec2};

#[derive(Error, Debug)]
pub enum LevelError {
    #[error("level is empty")]
    Empty,
    #[error("no levels found in {}", .0.display())]
    NoLevels(PathBuf),
    #[error("level has no player")]
    MissingPlayer,
    #[error("level has a second player at {0}")]
    MultiplePlayers(Vec2),
    #[error("level breaks an invariant: {0}")]
    Invalid(#[from] InvariantError),
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a parsed level is turned into rules: every crate starts with the same budget.
#[derive(Clone, Copy, Debug)]
pub struct LevelRules {
    pub push_budget: u32,
    pub policy: DestructionPolicy,
}

pub struct Level {
    pub name: String,
    pub world: GridWorld,
    pub initial: PuzzleState,
}

/// Parses a level drawn with the usual Sokoban symbols.
///
/// `#` wall, `$` crate, `.` goal, `@` player, `*` crate on goal, `+` player on goal, anything
/// else floor. Blank lines and `Title:` lines are skipped, and short rows are padded with floor.
pub fn parse_level(s: &str, rules: LevelRules) -> Result<(PuzzleState, GridWorld), LevelError> {
    let lines: Vec<&str> = s
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.to_lowercase().starts_with("title:")
        })
        .collect();
    if lines.is_empty() {
        return Err(LevelError::Empty);
    }

    let height = lines.len() as i32;
    let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as i32;

    let mut walls = Vec::new();
    let mut goals = Vec::new();
    let mut crates = Vec::new();
    let mut player: Option<Vec2> = None;

    for (y, line) in lines.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            let pos = Vec2 {
                x: x as i32,
                y: y as i32,
            };
            let (is_player, is_crate, is_goal) = match ch {
                '#' => {
                    walls.push(pos);
                    continue;
                }
                '$' => (false, true, false),
                '.' => (false, false, true),
                '@' => (true, false, false),
                '*' => (false, true, true),
                '+' => (true, false, true),
                _ => continue,
            };
            if is_player && player.replace(pos).is_some() {
                return Err(LevelError::MultiplePlayers(pos));
            }
            if is_crate {
                crates.push((pos, rules.push_budget));
            }
            if is_goal {
                goals.push(pos);
            }
        }
    }

    let player = player.ok_or(LevelError::MissingPlayer)?;
    let world = GridWorld::new(width, height, walls, goals, rules.policy)?;
    let state = PuzzleState::new(player, crates);
    state.validate(&world)?;

    debug!(
        "parsed {}x{} level with {} crates and {} goals",
        width,
        height,
        state.live_count(),
        world.total_targets()
    );
    Ok((state, world))
}

pub fn load_level_from_file(path: &Path, rules: LevelRules) -> Result<Level, LevelError> {
    let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (initial, world) = parse_level(&text, rules)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    info!("loaded level {}", name);
    Ok(Level {
        name,
        world,
        initial,
    })
}

/// Every `.txt` file directly inside `dir`, sorted by name.
pub fn list_level_files(dir: &Path) -> Result<Vec<PathBuf>, LevelError> {
    let io_err = |source| LevelError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
