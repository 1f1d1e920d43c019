//! Flat-text persistence of the session cache
//!
//! The response table is stored as `guess \t target \t response` lines and the
//! initial histograms as `guess \t response \t count` lines, with responses
//! written in the session's symbols. Loading is an explicit step that reports
//! whether the files were present; persisting is a separate step.

use crate::core::{ResponseCode, SolverError};
use crate::solver::entropy::Histogram;
use crate::solver::{Histograms, ResponseTable, Session, SessionCache};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const TABLE_PREFIX: &str = "precompute_responses";
const HISTOGRAM_PREFIX: &str = "precompute_init_distribution";

/// Errors raised while reading or writing cache files
#[derive(Debug)]
pub enum CacheError {
    Io(io::Error),
    /// A line does not have the expected shape
    Malformed { line: usize, reason: String },
    /// A stored response does not decode under the session's model
    Response(SolverError),
    /// The file ended before every entry was present
    Incomplete { expected: usize, found: usize },
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cache I/O error: {e}"),
            Self::Malformed { line, reason } => {
                write!(f, "malformed cache line {line}: {reason}")
            }
            Self::Response(e) => write!(f, "corrupted cached response: {e}"),
            Self::Incomplete { expected, found } => {
                write!(f, "incomplete cache: expected {expected} entries, found {found}")
            }
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Response(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CacheError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<SolverError> for CacheError {
    fn from(e: SolverError) -> Self {
        Self::Response(e)
    }
}

/// Outcome of looking for a persisted cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLoad {
    Loaded(SessionCache),
    Missing,
}

/// Directory holding persisted session caches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File-name suffix identifying `session` under `tag`
    ///
    /// Holds the word length, both pool sizes and the session fingerprint, so
    /// a cache of other word lists or symbols is never picked up.
    #[must_use]
    pub fn signature(session: &Session, tag: &str) -> String {
        format!(
            "{tag}_k{}_{}x{}_{:016x}",
            session.word_length(),
            session.guesses().len(),
            session.targets().len(),
            session.fingerprint()
        )
    }

    #[must_use]
    pub fn table_path(&self, session: &Session, tag: &str) -> PathBuf {
        self.path(TABLE_PREFIX, session, tag)
    }

    #[must_use]
    pub fn histogram_path(&self, session: &Session, tag: &str) -> PathBuf {
        self.path(HISTOGRAM_PREFIX, session, tag)
    }

    fn path(&self, prefix: &str, session: &Session, tag: &str) -> PathBuf {
        self.dir
            .join(format!("{prefix}_{}.txt", Self::signature(session, tag)))
    }

    /// Read the persisted cache for `session`, if both files exist
    ///
    /// # Errors
    /// Any unreadable, malformed or incomplete file aborts the load.
    pub fn load(&self, session: &Session, tag: &str) -> Result<CacheLoad, CacheError> {
        let table_path = self.table_path(session, tag);
        let histogram_path = self.histogram_path(session, tag);
        if !table_path.exists() || !histogram_path.exists() {
            return Ok(CacheLoad::Missing);
        }

        let start = Instant::now();
        let table = read_table(&table_path, session)?;
        let initial = read_histograms(&histogram_path, session)?;
        log::info!(
            "{:<32}{} in {:.2}s",
            "loaded cached response table",
            table_path.display(),
            start.elapsed().as_secs_f64()
        );
        Ok(CacheLoad::Loaded(SessionCache { table, initial }))
    }

    /// Write `cache` for `session`, replacing any previous files
    ///
    /// # Errors
    /// Returns `CacheError::Io` if a file cannot be written.
    pub fn persist(
        &self,
        session: &Session,
        tag: &str,
        cache: &SessionCache,
    ) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        let model = session.model();

        let table_path = self.table_path(session, tag);
        let mut out = BufWriter::new(File::create(&table_path)?);
        for (g, t, code) in cache.table.entries() {
            writeln!(out, "{g}\t{t}\t{}", model.render_code(code)?)?;
        }
        out.flush()?;

        let histogram_path = self.histogram_path(session, tag);
        let mut out = BufWriter::new(File::create(&histogram_path)?);
        for (g, histogram) in cache.initial.iter() {
            let mut counts: Vec<(ResponseCode, usize)> =
                histogram.iter().map(|(&code, &count)| (code, count)).collect();
            counts.sort_unstable();
            for (code, count) in counts {
                writeln!(out, "{g}\t{}\t{count}", model.render_code(code)?)?;
            }
        }
        out.flush()?;

        log::info!("{:<32}{}", "saved response table", table_path.display());
        log::info!("{:<32}{}", "saved initial histograms", histogram_path.display());
        Ok(())
    }

    /// Load the cache, or build and persist it when missing or unreadable
    ///
    /// A corrupted cache is reported and rebuilt, never partially used.
    ///
    /// # Errors
    /// Only fails if building the cache fails.
    pub fn load_or_build(
        &self,
        session: &Session,
        tag: &str,
    ) -> Result<SessionCache, SolverError> {
        match self.load(session, tag) {
            Ok(CacheLoad::Loaded(cache)) if session.fits(&cache) => return Ok(cache),
            Ok(CacheLoad::Loaded(_)) => log::warn!("cached tables do not fit the word lists"),
            Ok(CacheLoad::Missing) => {
                log::info!("{:<32}{}", "no cached tables in", self.dir.display());
            }
            Err(e) => log::warn!("discarding cached tables: {e}"),
        }

        let cache = session.build_cache()?;
        if let Err(e) = self.persist(session, tag, &cache) {
            log::warn!("could not save cached tables: {e}");
        }
        Ok(cache)
    }
}

/// Split a tab-separated line into exactly three fields
fn fields(line: &str, number: usize) -> Result<[&str; 3], CacheError> {
    let parts: Vec<&str> = line.trim_end().split('\t').collect();
    <[&str; 3]>::try_from(parts).map_err(|parts| CacheError::Malformed {
        line: number,
        reason: format!("expected 3 fields, found {}", parts.len()),
    })
}

fn index(field: &str, bound: usize, number: usize) -> Result<usize, CacheError> {
    match field.parse::<usize>() {
        Ok(i) if i < bound => Ok(i),
        _ => Err(CacheError::Malformed {
            line: number,
            reason: format!("index {field:?} outside 0..{bound}"),
        }),
    }
}

fn read_table(path: &Path, session: &Session) -> Result<ResponseTable, CacheError> {
    let model = session.model();
    let guess_count = session.guesses().len();
    let target_count = session.targets().len();
    let expected = guess_count * target_count;

    let mut codes: Vec<Option<ResponseCode>> = vec![None; expected];
    let mut found = 0;

    for (i, line) in BufReader::new(File::open(path)?).lines().enumerate() {
        let line = line?;
        let number = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let [g, t, response] = fields(&line, number)?;
        let g = index(g, guess_count, number)?;
        let t = index(t, target_count, number)?;
        let code = model.encode(&model.parse(response)?);

        let slot = &mut codes[g * target_count + t];
        if slot.replace(code).is_some() {
            return Err(CacheError::Malformed {
                line: number,
                reason: format!("duplicate entry for ({g}, {t})"),
            });
        }
        found += 1;
    }

    let codes: Option<Vec<ResponseCode>> = codes.into_iter().collect();
    codes
        .map(|codes| ResponseTable::from_codes(model.length(), guess_count, target_count, codes))
        .ok_or(CacheError::Incomplete { expected, found })
}

fn read_histograms(path: &Path, session: &Session) -> Result<Histograms, CacheError> {
    let model = session.model();
    let guess_count = session.guesses().len();
    let total = session.targets().len();
    let mut per_guess: Vec<Histogram> = vec![Histogram::default(); guess_count];

    for (i, line) in BufReader::new(File::open(path)?).lines().enumerate() {
        let line = line?;
        let number = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let [g, response, count] = fields(&line, number)?;
        let g = index(g, guess_count, number)?;
        let code = model.encode(&model.parse(response)?);
        let count = count.parse::<usize>().map_err(|e| CacheError::Malformed {
            line: number,
            reason: format!("count {count:?}: {e}"),
        })?;

        if per_guess[g].insert(code, count).is_some() {
            return Err(CacheError::Malformed {
                line: number,
                reason: format!("duplicate response {response} for guess {g}"),
            });
        }
    }

    let complete = per_guess
        .iter()
        .filter(|histogram| histogram.values().sum::<usize>() == total)
        .count();
    if complete != guess_count {
        return Err(CacheError::Incomplete {
            expected: guess_count,
            found: complete,
        });
    }
    Ok(Histograms::from_parts(per_guess, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ResponseModel, Word, WordPool};

    fn pool(list: &[&str]) -> WordPool {
        WordPool::new(list.iter().map(|w| Word::new(*w).unwrap()), 5).unwrap()
    }

    fn session(symbols: [char; 3]) -> Session {
        Session::new(
            ResponseModel::with_symbols(5, symbols).unwrap(),
            pool(&["crane", "slate", "robot", "speed"]),
            pool(&["coach", "floor", "erase"]),
        )
        .unwrap()
    }

    fn temp_store(name: &str) -> CacheStore {
        let dir = std::env::temp_dir().join(format!(
            "wordle_infogain_cache_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        CacheStore::new(dir)
    }

    #[test]
    fn persisted_cache_reloads_identically() {
        let session = session(ResponseModel::DEFAULT_SYMBOLS);
        let store = temp_store("roundtrip");
        let built = session.build_cache().unwrap();

        assert_eq!(store.load(&session, "small").unwrap(), CacheLoad::Missing);
        store.persist(&session, "small", &built).unwrap();
        let loaded = store.load(&session, "small").unwrap();

        assert_eq!(loaded, CacheLoad::Loaded(built));
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn custom_symbols_round_trip() {
        let session = session(['-', 'Y', 'G']);
        let store = temp_store("symbols");
        let built = session.build_cache().unwrap();

        store.persist(&session, "small", &built).unwrap();
        let text = fs::read_to_string(store.table_path(&session, "small")).unwrap();
        for line in text.lines() {
            let response = line.split('\t').nth(2).unwrap();
            assert!(response.chars().all(|c| "-YG".contains(c)), "{line}");
        }

        assert_eq!(store.load(&session, "small").unwrap(), CacheLoad::Loaded(built));
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn corrupted_symbol_aborts_load() {
        let session = session(ResponseModel::DEFAULT_SYMBOLS);
        let store = temp_store("corrupt");
        let built = session.build_cache().unwrap();
        store.persist(&session, "small", &built).unwrap();

        let path = store.table_path(&session, "small");
        let text = fs::read_to_string(&path).unwrap();
        let mut lines: Vec<&str> = text.lines().collect();
        lines[0] = "0\t0\t0000x";
        fs::write(&path, lines.join("\n")).unwrap();

        assert!(matches!(
            store.load(&session, "small"),
            Err(CacheError::Response(SolverError::UnknownResponseSymbol { .. }))
        ));
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn truncated_table_is_incomplete() {
        let session = session(ResponseModel::DEFAULT_SYMBOLS);
        let store = temp_store("truncated");
        let built = session.build_cache().unwrap();
        store.persist(&session, "small", &built).unwrap();

        let path = store.table_path(&session, "small");
        let text = fs::read_to_string(&path).unwrap();
        let kept: Vec<&str> = text.lines().skip(1).collect();
        fs::write(&path, kept.join("\n")).unwrap();

        assert!(matches!(
            store.load(&session, "small"),
            Err(CacheError::Incomplete { expected: 12, found: 11 })
        ));
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn load_or_build_recovers_from_corruption() {
        let session = session(ResponseModel::DEFAULT_SYMBOLS);
        let store = temp_store("recover");
        let built = session.build_cache().unwrap();
        store.persist(&session, "small", &built).unwrap();
        fs::write(store.histogram_path(&session, "small"), "not\ta cache\n").unwrap();

        let cache = store.load_or_build(&session, "small").unwrap();
        assert_eq!(cache, built);
        // The rebuilt cache was written back
        assert_eq!(store.load(&session, "small").unwrap(), CacheLoad::Loaded(built));
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn signature_names_pools() {
        let session = session(ResponseModel::DEFAULT_SYMBOLS);
        assert_eq!(
            CacheStore::signature(&session, "large"),
            format!("large_k5_4x3_{:016x}", session.fingerprint())
        );
    }

    #[test]
    fn cache_of_other_words_with_same_sizes_is_rebuilt() {
        let model = ResponseModel::new(5).unwrap();
        let first = Session::new(
            model.clone(),
            pool(&["crane", "slate", "robot"]),
            pool(&["crane", "slate", "robot"]),
        )
        .unwrap();
        let second = Session::new(
            model,
            pool(&["coach", "floor", "erase"]),
            pool(&["coach", "floor", "erase"]),
        )
        .unwrap();
        let store = temp_store("stale");
        store.persist(&first, "small", &first.build_cache().unwrap()).unwrap();

        assert_eq!(store.load(&second, "small").unwrap(), CacheLoad::Missing);

        let cache = store.load_or_build(&second, "small").unwrap();
        assert_eq!(cache, second.build_cache().unwrap());
        let model = second.model();
        for (g, t, code) in cache.table.entries() {
            let expected = model
                .evaluate_code(&second.guesses()[g], &second.targets()[t])
                .unwrap();
            assert_eq!(code, expected, "guess {g} target {t}");
        }
        // the first session's files are left alone
        assert!(matches!(store.load(&first, "small"), Ok(CacheLoad::Loaded(_))));
        fs::remove_dir_all(store.dir()).unwrap();
    }
}
