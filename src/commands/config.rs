//! Session configuration shared by every command

use super::CommandError;
use crate::cache::CacheStore;
use crate::core::{ResponseModel, SolverError, Word};
use crate::solver::{Session, SessionCache, StrategyKind};
use crate::wordlists::{ListSize, WordLists};
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

/// Strategy together with the guess list it draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyChoice {
    /// Letter frequencies, guessing from the small list
    Heuristic,
    /// Entropy with the small list as guesses
    SmallEntropy,
    /// Entropy with the merged large pool as guesses
    LargeEntropy,
}

impl StrategyChoice {
    #[must_use]
    pub const fn kind(self) -> StrategyKind {
        match self {
            Self::Heuristic => StrategyKind::Heuristic,
            Self::SmallEntropy | Self::LargeEntropy => StrategyKind::Entropy,
        }
    }

    #[must_use]
    pub const fn list_size(self) -> ListSize {
        match self {
            Self::Heuristic | Self::SmallEntropy => ListSize::Small,
            Self::LargeEntropy => ListSize::Large,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::SmallEntropy => "small-entropy",
            Self::LargeEntropy => "large-entropy",
        }
    }
}

impl fmt::Display for StrategyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heuristic" => Ok(Self::Heuristic),
            "small-entropy" | "entropy" => Ok(Self::SmallEntropy),
            "large-entropy" => Ok(Self::LargeEntropy),
            other => Err(format!(
                "unknown strategy '{other}': choose heuristic, small-entropy or large-entropy"
            )),
        }
    }
}

/// Everything needed to set up a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub small: PathBuf,
    pub large: PathBuf,
    pub length: usize,
    pub symbols: [char; 3],
    pub cache_dir: PathBuf,
    pub use_cache: bool,
    pub strategy: StrategyChoice,
    pub first_guess: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            small: PathBuf::from("data/small.txt"),
            large: PathBuf::from("data/large.txt"),
            length: 5,
            symbols: ResponseModel::DEFAULT_SYMBOLS,
            cache_dir: PathBuf::from("output"),
            use_cache: true,
            strategy: StrategyChoice::Heuristic,
            first_guess: None,
        }
    }
}

impl SessionConfig {
    /// Load the word lists and build the session's pools
    ///
    /// # Errors
    /// Fails if a list cannot be read, the length or symbols are unusable, or
    /// no word of the requested length exists.
    pub fn open_session(&self) -> Result<Session, CommandError> {
        let size = self.strategy.list_size();
        let large = (size == ListSize::Large).then_some(self.large.as_path());
        let lists = WordLists::load(&self.small, large)?;

        let model = ResponseModel::with_symbols(self.length, self.symbols)?;
        let session = Session::new(
            model,
            lists.guesses(size, self.length)?,
            lists.targets(self.length)?,
        )?;
        log::info!(
            "{:<32}{} guesses, {} targets",
            format!("opened {} session", self.strategy),
            session.guesses().len(),
            session.targets().len()
        );
        Ok(session)
    }

    /// Precomputed tables for strategies that need them
    ///
    /// Read from the cache directory when enabled, otherwise built in memory.
    ///
    /// # Errors
    /// Only fails if building the tables fails.
    pub fn load_cache(&self, session: &Session) -> Result<Option<SessionCache>, SolverError> {
        if !self.strategy.kind().needs_cache() {
            return Ok(None);
        }
        let cache = if self.use_cache {
            let tag = self.strategy.list_size().name();
            CacheStore::new(&self.cache_dir).load_or_build(session, tag)?
        } else {
            session.build_cache()?
        };
        Ok(Some(cache))
    }

    /// The configured first guess, checked against the word length
    ///
    /// # Errors
    /// Returns `SolverError::Word` if the text is not a word of the session length.
    pub fn first_guess(&self) -> Result<Option<Word>, SolverError> {
        self.first_guess
            .as_deref()
            .map(|text| Word::with_length(text, self.length).map_err(SolverError::from))
            .transpose()
    }

    /// Path `<cache_dir>/<name>_<strategy>.txt`, creating the directory
    ///
    /// # Errors
    /// Returns an I/O error if the directory cannot be created.
    pub fn output_path(&self, name: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.cache_dir)?;
        Ok(self.cache_dir.join(format!("{name}_{}.txt", self.strategy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_choice_maps_to_kind_and_list() {
        let choice: StrategyChoice = "large-entropy".parse().unwrap();
        assert_eq!(choice.kind(), StrategyKind::Entropy);
        assert_eq!(choice.list_size(), ListSize::Large);
        assert_eq!(choice.to_string(), "large-entropy");

        let choice: StrategyChoice = "Heuristic".parse().unwrap();
        assert_eq!(choice.kind(), StrategyKind::Heuristic);
        assert_eq!(choice.list_size(), ListSize::Small);

        assert!("minimax".parse::<StrategyChoice>().is_err());
    }

    #[test]
    fn first_guess_must_match_length() {
        let mut config = SessionConfig {
            first_guess: Some("Crane".into()),
            ..SessionConfig::default()
        };
        assert_eq!(config.first_guess().unwrap().unwrap().text(), "crane");

        config.first_guess = Some("cat".into());
        assert!(matches!(config.first_guess(), Err(SolverError::Word(_))));

        config.first_guess = None;
        assert_eq!(config.first_guess().unwrap(), None);
    }

    #[test]
    fn open_session_reads_lists_from_disk() {
        let dir = std::env::temp_dir()
            .join(format!("wordle_infogain_config_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("small.txt"), "crane\nslate\ncat\n").unwrap();
        fs::write(dir.join("large.txt"), "robot\nslate\n").unwrap();

        let config = SessionConfig {
            small: dir.join("small.txt"),
            large: dir.join("large.txt"),
            cache_dir: dir.join("output"),
            strategy: StrategyChoice::LargeEntropy,
            ..SessionConfig::default()
        };
        let session = config.open_session().unwrap();
        assert_eq!(session.guesses().len(), 3);
        assert_eq!(session.targets().len(), 2);

        let cache = config.load_cache(&session).unwrap().unwrap();
        assert!(session.fits(&cache));
        assert!(CacheStore::new(&config.cache_dir).table_path(&session, "large").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn heuristic_needs_no_cache() {
        let config = SessionConfig::default();
        let pool = crate::core::WordPool::new([Word::new("crane").unwrap()], 5).unwrap();
        let session = Session::new(ResponseModel::new(5).unwrap(), pool.clone(), pool).unwrap();
        assert_eq!(config.load_cache(&session).unwrap(), None);
    }
}
