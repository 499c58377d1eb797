use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::core::{GameChangeType, GridWorld, PuzzleState, Rejected, UserAction, step};
use crate::level::{Level, LevelError, LevelRules, list_level_files, load_level_from_file};
use crate::planner::{Horizon, PlanVerdict, evaluate};

/// The game as the player sees it: one level, its current state, and the way to the next level.
pub struct GameSession {
    levels: Vec<PathBuf>,
    level_index: usize,
    rules: LevelRules,
    horizon: Horizon,
    name: String,
    world: Arc<GridWorld>,
    initial: PuzzleState,
    current: PuzzleState,
    moves: usize,
    generation: u64,
}

impl GameSession {
    pub fn from_level(level: Level, rules: LevelRules, horizon: Horizon) -> GameSession {
        GameSession {
            levels: Vec::new(),
            level_index: 0,
            rules,
            horizon,
            name: level.name,
            world: Arc::new(level.world),
            current: level.initial.clone(),
            initial: level.initial,
            moves: 0,
            generation: 0,
        }
    }

    /// Opens the first level found in `dir`.
    pub fn from_dir(dir: PathBuf, rules: LevelRules, horizon: Horizon) -> Result<GameSession, LevelError> {
        let levels = list_level_files(&dir)?;
        let Some(first) = levels.first() else {
            return Err(LevelError::NoLevels(dir));
        };
        let level = load_level_from_file(first, rules)?;
        let mut session = GameSession::from_level(level, rules, horizon);
        session.levels = levels;
        Ok(session)
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn shared_world(&self) -> Arc<GridWorld> {
        Arc::clone(&self.world)
    }

    pub fn state(&self) -> &PuzzleState {
        &self.current
    }

    pub fn level_name(&self) -> &str {
        &self.name
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Bumped on every change of the current state; hints computed for an older generation are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn destroyed_count(&self) -> usize {
        self.current.destroyed_count()
    }

    pub fn act(&mut self, action: UserAction) -> Result<GameChangeType, Rejected> {
        let (next, change) = step(&self.world, &self.current, action)?;
        if let GameChangeType::CrateDestroyed(id) = change {
            info!("crate {:?} broke after its last push", id);
        }
        self.current = next;
        self.moves += 1;
        self.generation += 1;
        Ok(change)
    }

    pub fn reset(&mut self) {
        debug!("reset {}", self.name);
        self.current = self.initial.clone();
        self.moves = 0;
        self.generation += 1;
    }

    pub fn check(&self) -> bool {
        self.world.is_won(&self.current)
    }

    pub fn hint(&self) -> PlanVerdict {
        evaluate(&self.current, &self.world, self.horizon)
    }

    /// Moves on to the next level file, wrapping around after the last one.
    pub fn next_level(&mut self) -> Result<(), LevelError> {
        if self.levels.is_empty() {
            self.reset();
            return Ok(());
        }
        let index = (self.level_index + 1) % self.levels.len();
        let level = load_level_from_file(&self.levels[index], self.rules)?;
        self.level_index = index;
        self.name = level.name;
        self.world = Arc::new(level.world);
        self.current = level.initial.clone();
        self.initial = level.initial;
        self.moves = 0;
        self.generation += 1;
        Ok(())
    }
}

struct HintRequest {
    generation: u64,
    world: Arc<GridWorld>,
    state: PuzzleState,
    horizon: Horizon,
}

struct HintResponse {
    generation: u64,
    verdict: PlanVerdict,
}

/// Runs oracle requests on a background thread so the render loop never waits on a search.
///
/// Requests queued while a search runs are coalesced to the newest one. Results are tagged
/// with the generation they were asked for and dropped if the session has moved on.
pub struct HintWorker {
    requests: Option<Sender<HintRequest>>,
    results: Receiver<HintResponse>,
    handle: Option<JoinHandle<()>>,
}

impl HintWorker {
    pub fn spawn() -> HintWorker {
        let (request_tx, request_rx) = mpsc::channel::<HintRequest>();
        let (result_tx, result_rx) = mpsc::channel::<HintResponse>();

        let handle = std::thread::spawn(move || {
            while let Ok(mut request) = request_rx.recv() {
                while let Ok(newer) = request_rx.try_recv() {
                    request = newer;
                }
                let verdict = evaluate(&request.state, &request.world, request.horizon);
                let response = HintResponse {
                    generation: request.generation,
                    verdict,
                };
                if result_tx.send(response).is_err() {
                    break;
                }
            }
        });

        HintWorker {
            requests: Some(request_tx),
            results: result_rx,
            handle: Some(handle),
        }
    }

    pub fn request(&self, session: &GameSession) {
        let request = HintRequest {
            generation: session.generation(),
            world: session.shared_world(),
            state: session.state().clone(),
            horizon: session.horizon(),
        };
        let sent = self
            .requests
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok());
        if !sent {
            warn!("hint worker is gone, dropping request");
        }
    }

    /// Returns a finished verdict for `current_generation`, if one is ready.
    pub fn poll(&self, current_generation: u64) -> Option<PlanVerdict> {
        let mut fresh = None;
        while let Ok(response) = self.results.try_recv() {
            if response.generation == current_generation {
                fresh = Some(response.verdict);
            } else {
                debug!("dropping stale hint for generation {}", response.generation);
            }
        }
        fresh
    }

    /// Blocks up to `timeout` for a verdict matching `current_generation`.
    pub fn wait(&self, current_generation: u64, timeout: Duration) -> Option<PlanVerdict> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.results.recv_timeout(remaining) {
                Ok(response) if response.generation == current_generation => {
                    return Some(response.verdict);
                }
                Ok(response) => {
                    debug!("dropping stale hint for generation {}", response.generation);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }
}

impl Drop for HintWorker {
    fn drop(&mut self) {
        // closing the request channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("hint worker panicked");
            }
        }
    }
}
