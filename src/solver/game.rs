//! The guess, respond, prune cycle of a single game

use super::strategy::{Strategy, StrategyKind, StrategyType};
use super::{CandidateSet, Session, SessionCache};
use crate::core::{Response, ResponseModel, SolverError, Word};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

/// Where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    /// The last response was all-correct
    Won,
    /// No candidate is consistent with the responses received
    Exhausted,
}

/// One guess and the response it received
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub guess: Word,
    /// Index of the guess in the guess pool, if it is a pool word
    pub guess_index: Option<usize>,
    pub score: f64,
    pub response: Response,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// Final state of a game and the steps that led there
#[derive(Debug, Clone, PartialEq)]
pub struct GameResult {
    pub status: GameStatus,
    pub trace: Vec<Step>,
}

impl GameResult {
    #[must_use]
    pub fn guess_count(&self) -> usize {
        self.trace.len()
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.status == GameStatus::Won
    }
}

/// Source of responses to guesses
pub trait Oracle {
    /// Response to `guess`, valid for `model`
    ///
    /// # Errors
    /// Returns an error only when no response can be produced at all.
    fn respond(&mut self, guess: &Word, model: &ResponseModel) -> Result<Response, SolverError>;
}

/// Oracle answering for a known target, by table lookup when possible
#[derive(Debug, Clone, Copy)]
pub struct TargetOracle<'s> {
    session: &'s Session,
    cache: Option<&'s SessionCache>,
    target: usize,
}

impl<'s> TargetOracle<'s> {
    /// # Errors
    /// Returns `SolverError::UnknownWord` if `target` is not a target-pool index.
    pub fn new(
        session: &'s Session,
        cache: Option<&'s SessionCache>,
        target: usize,
    ) -> Result<Self, SolverError> {
        if target >= session.targets().len() {
            return Err(SolverError::UnknownWord(format!("#{target}")));
        }
        Ok(Self {
            session,
            cache,
            target,
        })
    }

    #[must_use]
    pub fn target(&self) -> &'s Word {
        &self.session.targets()[self.target]
    }
}

impl Oracle for TargetOracle<'_> {
    fn respond(&mut self, guess: &Word, model: &ResponseModel) -> Result<Response, SolverError> {
        match (self.cache, self.session.guesses().index_of(guess)) {
            (Some(cache), Some(g)) => cache.table.response(g, self.target),
            _ => model.evaluate(guess, self.target()),
        }
    }
}

/// State of one game in progress
///
/// Created fresh for every game; the candidate set and the strategy's
/// distribution cache only ever shrink until the game ends.
#[derive(Debug, Clone)]
pub struct Game<'s> {
    session: &'s Session,
    cache: Option<&'s SessionCache>,
    strategy: StrategyType<'s>,
    candidates: CandidateSet,
    history: FxHashSet<Word>,
    trace: Vec<Step>,
    status: GameStatus,
}

impl<'s> Game<'s> {
    /// # Errors
    /// Returns `SolverError::MissingCache` if the strategy needs the
    /// precomputed tables and `cache` is `None`.
    pub fn new(
        session: &'s Session,
        cache: Option<&'s SessionCache>,
        kind: StrategyKind,
    ) -> Result<Self, SolverError> {
        Ok(Self {
            session,
            cache,
            strategy: StrategyType::new(kind, session, cache)?,
            candidates: CandidateSet::full(session.targets().len()),
            history: FxHashSet::default(),
            trace: Vec::new(),
            status: GameStatus::InProgress,
        })
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Words of the remaining candidates
    #[must_use]
    pub fn remaining(&self) -> Vec<&'s Word> {
        self.candidates.words(self.session.targets())
    }

    #[must_use]
    pub fn trace(&self) -> &[Step] {
        &self.trace
    }

    /// Pick the next guess and its score
    ///
    /// `first_guess` replaces the strategy's choice on the first turn only.
    /// The candidates are searched instead of the guess pool when the strategy
    /// asks for it, or when no pool word scores above zero while several
    /// candidates remain. Previously issued guesses are never offered again.
    /// Returns `None` once the game is over.
    #[must_use]
    pub fn next_guess(&self, first_guess: Option<&Word>) -> Option<(Word, f64)> {
        if self.status != GameStatus::InProgress {
            return None;
        }
        if let Some(first) = first_guess.filter(|_| self.trace.is_empty()) {
            return Some((first.clone(), self.strategy.score(first)));
        }

        let candidates = self.remaining();
        let narrowed = self.strategy.should_narrow_pool(&candidates);
        let picked = if narrowed {
            self.strategy.select_guess(&candidates, &self.history)
        } else {
            let pool: Vec<&Word> = self.session.guesses().iter().collect();
            self.strategy.select_guess(&pool, &self.history)
        };

        let picked = match picked {
            Some((_, score)) if !narrowed && score <= 0.0 && candidates.len() > 1 => {
                log::debug!("no informative guess left, choosing among candidates");
                self.strategy.select_guess(&candidates, &self.history)
            }
            None if !narrowed => self.strategy.select_guess(&candidates, &self.history),
            picked => picked,
        };
        picked.map(|(word, score)| (word.clone(), score))
    }

    /// Apply the response to a guess: check for a win, prune the candidates
    /// and refresh the strategy
    ///
    /// # Errors
    /// Returns `SolverError::LengthMismatch` if the guess has the wrong length
    /// and `SolverError::InvalidResponseFormat` if the response does.
    pub fn record(
        &mut self,
        guess: Word,
        score: f64,
        response: Response,
    ) -> Result<GameStatus, SolverError> {
        let session = self.session;
        let model = session.model();
        if guess.len() != model.length() {
            return Err(SolverError::LengthMismatch {
                guess: guess.len(),
                target: model.length(),
            });
        }
        if response.len() != model.length() {
            return Err(SolverError::InvalidResponseFormat(model.render(&response)));
        }

        let before = self.candidates.len();
        let guess_index = session.guesses().index_of(&guess);

        if response.is_win() {
            self.status = GameStatus::Won;
        } else {
            let code = model.encode(&response);
            let pruned = match (self.cache, guess_index) {
                (Some(cache), Some(g)) => self.candidates.prune_with_table(&cache.table, g, code),
                _ => {
                    let targets = session.targets();
                    self.candidates
                        .prune(code, |t| model.evaluate_code(&guess, &targets[t]))?
                }
            };

            if pruned.is_empty() {
                self.status = GameStatus::Exhausted;
            } else if pruned.len() < before {
                self.strategy.refresh(&pruned);
            }
            self.candidates = pruned;
        }

        log::debug!(
            "{:<32}{} -> {} ({} -> {} candidates)",
            "recorded guess",
            guess,
            model.render(&response),
            before,
            self.candidates.len()
        );

        self.history.insert(guess.clone());
        self.trace.push(Step {
            guess,
            guess_index,
            score,
            response,
            candidates_before: before,
            candidates_after: self.candidates.len(),
        });
        Ok(self.status)
    }

    /// Run the game to completion against `oracle`
    ///
    /// # Errors
    /// Propagates oracle failures and response validation errors.
    pub fn play<O>(
        mut self,
        oracle: &mut O,
        first_guess: Option<&Word>,
    ) -> Result<GameResult, SolverError>
    where
        O: Oracle + ?Sized,
    {
        while self.status == GameStatus::InProgress {
            let Some((guess, score)) = self.next_guess(first_guess) else {
                self.status = GameStatus::Exhausted;
                break;
            };
            let response = oracle.respond(&guess, self.session.model())?;
            self.record(guess, score, response)?;
        }
        Ok(self.into_result())
    }

    #[must_use]
    pub fn into_result(self) -> GameResult {
        GameResult {
            status: self.status,
            trace: self.trace,
        }
    }
}

/// Plays games of one strategy against one session
#[derive(Debug, Clone, Copy)]
pub struct Solver<'s> {
    session: &'s Session,
    cache: Option<&'s SessionCache>,
    kind: StrategyKind,
}

impl<'s> Solver<'s> {
    /// # Errors
    /// Returns `SolverError::MissingCache` if `kind` needs the precomputed
    /// tables and `cache` is `None`.
    pub fn new(
        session: &'s Session,
        cache: Option<&'s SessionCache>,
        kind: StrategyKind,
    ) -> Result<Self, SolverError> {
        if kind.needs_cache() && cache.is_none() {
            return Err(SolverError::MissingCache);
        }
        Ok(Self {
            session,
            cache,
            kind,
        })
    }

    #[must_use]
    pub const fn session(&self) -> &'s Session {
        self.session
    }

    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Start a new game with a fresh candidate set and distribution cache
    ///
    /// # Errors
    /// See [`Game::new`].
    pub fn new_game(&self) -> Result<Game<'s>, SolverError> {
        Game::new(self.session, self.cache, self.kind)
    }

    /// Play a full game against any oracle
    ///
    /// # Errors
    /// Propagates oracle failures.
    pub fn play<O>(
        &self,
        oracle: &mut O,
        first_guess: Option<&Word>,
    ) -> Result<GameResult, SolverError>
    where
        O: Oracle + ?Sized,
    {
        self.new_game()?.play(oracle, first_guess)
    }

    /// Play a full game against the target at `target` in the target pool
    ///
    /// # Errors
    /// Returns `SolverError::UnknownWord` if the index is out of range.
    pub fn play_target(
        &self,
        target: usize,
        first_guess: Option<&Word>,
    ) -> Result<GameResult, SolverError> {
        let mut oracle = TargetOracle::new(self.session, self.cache, target)?;
        self.play(&mut oracle, first_guess)
    }

    /// Score every guess-pool word against the full target pool
    ///
    /// Sorted by descending score, then alphabetically.
    ///
    /// # Errors
    /// See [`Game::new`].
    pub fn initial_scores(&self) -> Result<Vec<(&'s Word, f64)>, SolverError> {
        let strategy = StrategyType::new(self.kind, self.session, self.cache)?;
        let mut scores: Vec<(&'s Word, f64)> = self
            .session
            .guesses()
            .words()
            .par_iter()
            .map(|word| (word, strategy.score(word)))
            .collect();
        scores.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        Ok(scores)
    }
}
