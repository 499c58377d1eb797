#[cfg(test)]
mod test {
    use std::time::Duration;

    use crate::core::*;
    use crate::level::{Level, LevelRules, list_level_files, parse_level};
    use crate::planner::{Horizon, SearchConclusion};
    use crate::session::{GameSession, HintWorker};

    const RULES: LevelRules = LevelRules {
        push_budget: 5,
        policy: DestructionPolicy::Unconditional,
    };

    fn session_for(level: &str) -> GameSession {
        let (initial, world) = parse_level(level, RULES).unwrap();
        let level = Level {
            name: "test".to_string(),
            world,
            initial,
        };
        GameSession::from_level(level, RULES, Horizon::default())
    }

    #[test]
    fn act_advances_and_reset_restores() {
        let mut session = session_for("#@$ .#");
        let start = session.state().clone();

        assert_eq!(session.act(UserAction::Move(Direction::Right)), Ok(GameChangeType::PlayerAndCrateMove));
        assert_eq!(session.moves(), 1);
        assert_eq!(session.generation(), 1);
        assert_ne!(session.state(), &start);

        session.reset();
        assert_eq!(session.state(), &start);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn rejected_action_changes_nothing() {
        let mut session = session_for("#@$ .#");
        let start = session.state().clone();

        assert_eq!(session.act(UserAction::Move(Direction::Left)), Err(Rejected::IntoWall));
        assert_eq!(session.state(), &start);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn check_and_hint_follow_the_current_state() {
        let mut session = session_for("#@$ .#");
        assert!(!session.check());
        assert_eq!(session.hint().suggested_action, Some(Direction::Right));

        session.act(UserAction::Move(Direction::Right)).unwrap();
        session.act(UserAction::Move(Direction::Right)).unwrap();
        assert!(session.check());
        assert_eq!(session.hint().conclusion, SearchConclusion::AlreadyWon);
    }

    #[test]
    fn next_level_without_files_restarts() {
        let mut session = session_for("#@$ .#");
        session.act(UserAction::Move(Direction::Right)).unwrap();
        session.next_level().unwrap();
        assert_eq!(session.moves(), 0);
        assert_eq!(session.level_name(), "test");
    }

    #[test]
    fn next_level_cycles_through_directory() {
        let dir = std::env::temp_dir().join(format!("brittle_crates_session_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("1.txt"), "#@$.#\n").unwrap();
        std::fs::write(dir.join("2.txt"), "#@ $.#\n").unwrap();
        assert_eq!(list_level_files(&dir).unwrap().len(), 2);

        let mut session = GameSession::from_dir(dir, RULES, Horizon::default()).unwrap();
        assert_eq!(session.level_name(), "1.txt");
        session.next_level().unwrap();
        assert_eq!(session.level_name(), "2.txt");
        assert_eq!(session.world().width(), 6);
        session.next_level().unwrap();
        assert_eq!(session.level_name(), "1.txt");
    }

    #[test]
    fn destroyed_count_tracks_broken_crates() {
        let (initial, world) = parse_level("#@$  #", LevelRules {
            push_budget: 1,
            policy: DestructionPolicy::Unconditional,
        })
        .unwrap();
        let mut session = GameSession::from_level(
            Level {
                name: "break".to_string(),
                world,
                initial,
            },
            RULES,
            Horizon::default(),
        );
        assert_eq!(session.act(UserAction::Move(Direction::Right)), Ok(GameChangeType::CrateDestroyed(CrateId(0))));
        assert_eq!(session.destroyed_count(), 1);
    }

    #[test]
    fn hint_worker_delivers_current_verdict() {
        let session = session_for("#@$ .#");
        let worker = HintWorker::spawn();
        worker.request(&session);

        let verdict = worker.wait(session.generation(), Duration::from_secs(5));
        assert_eq!(verdict.and_then(|v| v.suggested_action), Some(Direction::Right));
    }

    #[test]
    fn hint_worker_drops_stale_verdicts() {
        let mut session = session_for("#@$ .#");
        let worker = HintWorker::spawn();
        worker.request(&session);
        session.act(UserAction::Move(Direction::Right)).unwrap();

        assert_eq!(worker.wait(session.generation(), Duration::from_millis(300)), None);

        worker.request(&session);
        let verdict = worker.wait(session.generation(), Duration::from_secs(5));
        assert_eq!(verdict.map(|v| v.conclusion), Some(SearchConclusion::Solved { depth: 1 }));
    }
}
