//! Interactive play
//!
//! Plays one game step by step, printing every guess. Responses come either
//! from a known target or from the user, who is re-prompted until the typed
//! response is valid.

use crate::core::{Response, ResponseModel, SolverError, Word};
use crate::output::{print_game_header, print_game_result, print_response, print_turn};
use crate::solver::{GameResult, GameStatus, Oracle, Solver, TargetOracle};
use rand::prelude::IndexedRandom;
use std::io::{BufRead, Write};

/// Oracle reading responses typed by the user
#[derive(Debug)]
pub struct PromptOracle<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptOracle<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>, SolverError> {
        writeln!(self.output, "{text}").map_err(|e| SolverError::Oracle(e.to_string()))?;
        self.output
            .flush()
            .map_err(|e| SolverError::Oracle(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| SolverError::Oracle(e.to_string()))?;
        Ok((read > 0).then(|| line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Oracle for PromptOracle<R, W> {
    fn respond(&mut self, _: &Word, model: &ResponseModel) -> Result<Response, SolverError> {
        let text = format!("Type the response...\n{}", model.describe());
        loop {
            let Some(line) = self.prompt(&text)? else {
                return Err(SolverError::Oracle("input closed before a response".into()));
            };
            match model.parse(&line) {
                Ok(response) => return Ok(response),
                Err(e) => {
                    writeln!(self.output, "(invalid response: {e})")
                        .map_err(|e| SolverError::Oracle(e.to_string()))?;
                }
            }
        }
    }
}

/// Resolve the target of an interactive game
///
/// An explicit word wins over `random`; with neither the target stays unknown.
///
/// # Errors
/// Returns `SolverError::UnknownWord` if `requested` is not a target-pool word.
pub fn choose_target(
    solver: &Solver<'_>,
    requested: Option<&str>,
    random: bool,
) -> Result<Option<usize>, SolverError> {
    let targets = solver.session().targets();
    if let Some(text) = requested {
        return targets.find(text).map(|(index, _)| Some(index));
    }
    if random {
        log::info!("{:<32}", "generating target");
        return Ok(targets
            .words()
            .choose(&mut rand::rng())
            .and_then(|word| targets.index_of(word)));
    }
    Ok(None)
}

/// Play one game, printing each turn
///
/// With a `known` target, responses are computed; otherwise `oracle` is asked.
///
/// # Errors
/// Propagates oracle failures and solver errors.
pub fn play_interactive(
    solver: &Solver<'_>,
    mut known: Option<TargetOracle<'_>>,
    oracle: &mut dyn Oracle,
    first_guess: Option<&Word>,
) -> Result<GameResult, SolverError> {
    let model = solver.session().model();
    print_game_header(known.as_ref().map(TargetOracle::target));

    let mut game = solver.new_game()?;
    let mut turn = 0;

    while game.status() == GameStatus::InProgress {
        let Some((guess, score)) = game.next_guess(first_guess) else {
            break;
        };
        turn += 1;
        print_turn(turn, game.candidates().len(), &guess, score);

        let response = match known.as_mut() {
            Some(target) => {
                let response = target.respond(&guess, model)?;
                print_response(model, &response);
                response
            }
            None => oracle.respond(&guess, model)?,
        };
        game.record(guess, score, response)?;
    }

    let result = game.into_result();
    print_game_result(&result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WordPool;
    use crate::solver::{Session, StrategyKind};
    use std::io::Cursor;

    fn session() -> Session {
        let pool = WordPool::new(
            ["crane", "slate", "irate", "crate", "grate", "coach"].map(|w| Word::new(w).unwrap()),
            5,
        )
        .unwrap();
        Session::new(ResponseModel::new(5).unwrap(), pool.clone(), pool).unwrap()
    }

    #[test]
    fn prompt_oracle_retries_until_valid() {
        let model = ResponseModel::new(5).unwrap();
        let input = Cursor::new("\n22\n2x202\n00202\n");
        let mut output = Vec::new();
        let mut oracle = PromptOracle::new(input, &mut output);

        let response = oracle.respond(&Word::new("crane").unwrap(), &model).unwrap();
        assert_eq!(model.render(&response), "00202");

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("invalid response").count(), 3);
        assert!(printed.contains("correct letter but wrong position"));
    }

    #[test]
    fn prompt_oracle_fails_on_closed_input() {
        let model = ResponseModel::new(5).unwrap();
        let mut oracle = PromptOracle::new(Cursor::new("abc\n"), Vec::new());
        assert!(matches!(
            oracle.respond(&Word::new("crane").unwrap(), &model),
            Err(SolverError::Oracle(_))
        ));
    }

    #[test]
    fn user_responses_drive_the_game() {
        let session = session();
        let solver = Solver::new(&session, None, StrategyKind::Heuristic).unwrap();
        let first = Word::new("crane").unwrap();

        // Answers as if the target were "slate"
        let input = Cursor::new("00202\n22222\n");
        let mut oracle = PromptOracle::new(input, Vec::new());
        let result = play_interactive(&solver, None, &mut oracle, Some(&first)).unwrap();

        assert!(result.is_win());
        assert_eq!(result.guess_count(), 2);
        assert_eq!(result.trace[1].guess.text(), "slate");
    }

    #[test]
    fn known_target_needs_no_input() {
        let session = session();
        let solver = Solver::new(&session, None, StrategyKind::Heuristic).unwrap();
        let target = choose_target(&solver, Some("coach"), false).unwrap().unwrap();
        let known = TargetOracle::new(&session, None, target).unwrap();

        let mut unused = PromptOracle::new(Cursor::new(""), Vec::new());
        let result = play_interactive(&solver, Some(known), &mut unused, None).unwrap();
        assert!(result.is_win());
        assert_eq!(result.trace.last().unwrap().guess.text(), "coach");
    }

    #[test]
    fn choose_target_modes() {
        let session = session();
        let solver = Solver::new(&session, None, StrategyKind::Heuristic).unwrap();

        assert_eq!(choose_target(&solver, None, false).unwrap(), None);
        assert!(choose_target(&solver, None, true).unwrap().is_some());
        assert!(matches!(
            choose_target(&solver, Some("zebra"), false),
            Err(SolverError::UnknownWord(_))
        ));
    }
}
