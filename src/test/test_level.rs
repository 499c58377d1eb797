#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use crate::core::*;
    use crate::level::*;
    use crate::test::test_util::GameTestState;

    fn rules() -> LevelRules {
        LevelRules {
            push_budget: 3,
            policy: DestructionPolicy::Unconditional,
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("brittle_crates_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parse_reads_every_symbol() {
        let (state, world) = parse_level(r#"
#####
# $.#
#*+ #
#####
"#, rules()).unwrap();

        assert_eq!(world.width(), 5);
        assert_eq!(world.height(), 4);
        assert_eq!(state.player, Vec2 { x: 2, y: 2 });
        assert_eq!(world.total_targets(), 3);
        assert!(world.is_goal(&Vec2 { x: 3, y: 1 }));
        assert!(world.is_goal(&Vec2 { x: 1, y: 2 }));
        assert!(world.is_goal(&Vec2 { x: 2, y: 2 }));
        assert!(world.is_wall(&Vec2 { x: 0, y: 0 }));

        let crates: Vec<(Vec2, u32)> = state
            .crates
            .values()
            .map(|c| (c.position, c.pushes_remaining))
            .collect();
        assert_eq!(crates, vec![(Vec2 { x: 2, y: 1 }, 3), (Vec2 { x: 1, y: 2 }, 3)]);
        assert!(state.destroyed.is_empty());
    }

    #[test]
    fn parse_skips_titles_and_pads_rows() {
        let (state, world) = parse_level(r#"
Title: Tiny
####
#@$.#

#####
"#, rules()).unwrap();

        assert_eq!(world.height(), 3);
        assert_eq!(world.width(), 5);
        assert_eq!(world.cell(&Vec2 { x: 4, y: 0 }), Some(Cell::Floor));
        assert_eq!(state.live_count(), 1);
    }

    #[test]
    fn parse_round_trips_through_render() {
        let level = r#"
#######
#@ $ .#
# *   #
#######
"#;
        let game = GameTestState::new(level);
        game.assert_matches(level);
    }

    #[test]
    fn parse_without_player_fails() {
        let result = parse_level("#$.#", rules());
        assert!(matches!(result, Err(LevelError::MissingPlayer)));
    }

    #[test]
    fn parse_with_two_players_fails() {
        let result = parse_level("#@ +#", rules());
        assert!(matches!(result, Err(LevelError::MultiplePlayers(Vec2 { x: 3, y: 0 }))));
    }

    #[test]
    fn parse_empty_level_fails() {
        assert!(matches!(parse_level("\n   \nTitle: nothing\n", rules()), Err(LevelError::Empty)));
    }

    #[test]
    fn load_level_from_file_names_level_after_file() {
        let dir = scratch_dir("load");
        let path = dir.join("corridor.txt");
        std::fs::write(&path, "#@$.#\n").unwrap();

        let level = load_level_from_file(&path, rules()).unwrap();

        assert_eq!(level.name, "corridor.txt");
        assert_eq!(level.initial.live_count(), 1);
        assert_eq!(level.world.total_targets(), 1);
    }

    #[test]
    fn load_missing_file_reports_io_error() {
        let dir = scratch_dir("missing");
        let result = load_level_from_file(&dir.join("nope.txt"), rules());
        assert!(matches!(result, Err(LevelError::Io { .. })));
    }

    #[test]
    fn list_level_files_sorts_and_filters() {
        let dir = scratch_dir("list");
        std::fs::write(dir.join("b.txt"), "#@$.#\n").unwrap();
        std::fs::write(dir.join("a.txt"), "#@$.#\n").unwrap();
        std::fs::write(dir.join("notes.md"), "not a level").unwrap();

        let files = list_level_files(&dir).unwrap();

        assert_eq!(files, vec![dir.join("a.txt"), dir.join("b.txt")]);
    }
}
