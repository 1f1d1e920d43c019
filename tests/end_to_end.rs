use std::fs;
use std::path::{Path, PathBuf};
use wordle_infogain::cache::{CacheLoad, CacheStore};
use wordle_infogain::core::{ResponseModel, Word, WordPool};
use wordle_infogain::solver::{GameStatus, Session, Solver, StrategyKind};
use wordle_infogain::wordlists::{ListSize, WordLists};

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn session(size: ListSize) -> Session {
    let lists = WordLists::load(&data("small.txt"), Some(&data("large.txt"))).unwrap();
    Session::new(
        ResponseModel::new(5).unwrap(),
        lists.guesses(size, 5).unwrap(),
        lists.targets(5).unwrap(),
    )
    .unwrap()
}

#[test]
fn single_word_pool_is_solved_in_one_guess() {
    let pool = WordPool::new([Word::new("crane").unwrap()], 5).unwrap();
    let session = Session::new(ResponseModel::new(5).unwrap(), pool.clone(), pool).unwrap();
    let cache = session.build_cache().unwrap();

    for kind in [StrategyKind::Heuristic, StrategyKind::Entropy] {
        let solver = Solver::new(&session, Some(&cache), kind).unwrap();
        let result = solver.play_target(0, None).unwrap();
        assert_eq!(result.status, GameStatus::Won, "{kind}");
        assert_eq!(result.guess_count(), 1, "{kind}");
    }
}

#[test]
fn every_target_is_solved_by_both_strategies() {
    let session = session(ListSize::Small);
    let cache = session.build_cache().unwrap();

    for kind in [StrategyKind::Heuristic, StrategyKind::Entropy] {
        let solver = Solver::new(&session, Some(&cache), kind).unwrap();
        for target in 0..session.targets().len() {
            let result = solver.play_target(target, None).unwrap();
            assert!(result.is_win(), "{kind} failed on target {target}");
            assert_eq!(
                result.trace.last().unwrap().guess,
                session.targets()[target],
                "{kind}"
            );
        }
    }
}

#[test]
fn large_pool_guesses_may_come_from_outside_the_targets() {
    let session = session(ListSize::Large);
    assert!(session.guesses().len() > session.targets().len());
    // the small list comes first in the merged pool
    assert_eq!(session.guesses()[0], session.targets()[0]);

    let cache = session.build_cache().unwrap();
    let solver = Solver::new(&session, Some(&cache), StrategyKind::Entropy).unwrap();
    let target = session.targets().index_of(&Word::new("grace").unwrap()).unwrap();
    let result = solver.play_target(target, None).unwrap();
    assert!(result.is_win());
    for step in &result.trace {
        assert!(step.candidates_after <= step.candidates_before);
    }
}

#[test]
fn persisted_cache_reloads_identically() {
    let session = session(ListSize::Small);
    let cache = session.build_cache().unwrap();
    let dir = std::env::temp_dir().join(format!("wordle_infogain_e2e_{}", std::process::id()));
    let store = CacheStore::new(&dir);

    assert!(matches!(store.load(&session, "small"), Ok(CacheLoad::Missing)));
    store.persist(&session, "small", &cache).unwrap();
    let CacheLoad::Loaded(reloaded) = store.load(&session, "small").unwrap() else {
        panic!("cache files were not found after persisting");
    };
    assert_eq!(reloaded, cache);

    let solver = Solver::new(&session, Some(&reloaded), StrategyKind::Entropy).unwrap();
    let fresh = Solver::new(&session, Some(&cache), StrategyKind::Entropy).unwrap();
    for target in [0, 17, 42] {
        let a = solver.play_target(target, None).unwrap();
        let b = fresh.play_target(target, None).unwrap();
        let words = |r: &wordle_infogain::solver::GameResult| {
            r.trace.iter().map(|s| s.guess.clone()).collect::<Vec<_>>()
        };
        assert_eq!(words(&a), words(&b));
    }

    fs::remove_dir_all(&dir).unwrap();
}
