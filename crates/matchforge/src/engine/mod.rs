//! Profile-driven scoring entry point.
//!
//! An [`Engine`] prepares every profile of a [`MatchConfig`] against a
//! [`ScorerRegistry`] up front, so parameter errors and unrepresentable
//! cutoffs surface at construction rather than on the first call.


use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info};

use matchforge_config::{ConfigError, MatchConfig, ParallelConfig, PreprocessMode};
use matchforge_core::preprocess::preprocess_value;
use matchforge_core::{
    DefaultProcess, HostValue, Preprocessor, ResultDomain, Score, ScoreType, ScorerError,
    StringView,
};
use matchforge_scoring::{score_parallel, PreparedScorer, ScorerRegistry};

/// Engine error
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Scorer error: {0}")]
    Scorer(#[from] ScorerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown profile '{0}'")]
    UnknownProfile(String),
}

static DEFAULT_PROCESS: DefaultProcess = DefaultProcess;

/// A prepared profile: scorer, preprocessing and default cutoff and hint,
/// already converted into the scorer's result domain.
#[derive(Debug, Clone)]
pub struct Profile {
    name: String,
    scorer: PreparedScorer,
    preprocess: PreprocessMode,
    cutoff: Option<Score>,
    hint: Option<Score>,
}

impl Profile {
    fn new(
        name: &str,
        config: &matchforge_config::ProfileConfig,
        registry: &ScorerRegistry,
    ) -> Result<Self, EngineError> {
        let scorer = registry.prepare(&config.scorer, &config.params)?;
        let domain = scorer.flags().domain();
        let cutoff = config
            .score_cutoff
            .map(|v| Score::from_f64_in(domain, v))
            .transpose()?;
        let hint = config
            .score_hint
            .map(|v| Score::from_f64_in(domain, v))
            .transpose()?;
        Ok(Self {
            name: name.to_string(),
            scorer,
            preprocess: config.preprocess,
            cutoff,
            hint,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scorer(&self) -> &PreparedScorer {
        &self.scorer
    }

    pub fn domain(&self) -> ResultDomain {
        self.scorer.flags().domain()
    }

    pub fn cutoff(&self) -> Option<Score> {
        self.cutoff
    }

    pub fn hint(&self) -> Option<Score> {
        self.hint
    }

    pub fn preprocessor(&self) -> Option<&'static dyn Preprocessor> {
        match self.preprocess {
            PreprocessMode::None => None,
            PreprocessMode::Default => Some(&DEFAULT_PROCESS),
        }
    }

    /// Scores two host values with the profile's defaults.
    pub fn score(&self, a: &HostValue, b: &HostValue) -> Result<Score, ScorerError> {
        self.scorer
            .score_values(a, b, self.preprocessor(), self.cutoff, self.hint)
    }

    fn convert(&self, value: &HostValue) -> Result<Option<StringView>, ScorerError> {
        if value.is_none() {
            if self.scorer.flags().none_is_worst_score() {
                return Ok(None);
            }
            return Err(ScorerError::Conversion(format!(
                "profile '{}' cannot score a none value",
                self.name
            )));
        }
        preprocess_value(self.preprocessor(), value).map(Some)
    }
}

/// Scores host values according to named profiles.
#[derive(Debug)]
pub struct Engine {
    profiles: BTreeMap<String, Profile>,
    parallel: ParallelConfig,
}

impl Engine {
    /// Prepares every profile in `config`.
    ///
    /// # Errors
    ///
    /// Configuration that fails validation, unknown scorers, rejected
    /// parameters, and cutoffs or hints not representable in the scorer's
    /// domain.
    pub fn from_config(registry: &ScorerRegistry, config: &MatchConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut profiles = BTreeMap::new();
        for (name, profile) in &config.profiles {
            profiles.insert(name.clone(), Profile::new(name, profile, registry)?);
        }
        info!(
            event = "engine_ready",
            profiles = profiles.len(),
            chunk_size = config.parallel.chunk_size,
            min_batch = config.parallel.min_batch,
        );
        Ok(Self {
            profiles,
            parallel: config.parallel.clone(),
        })
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, EngineError> {
        self.profiles
            .get(name)
            .ok_or_else(|| EngineError::UnknownProfile(name.to_string()))
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Scores one pair of host values.
    pub fn score(&self, profile: &str, a: &HostValue, b: &HostValue) -> Result<Score, EngineError> {
        Ok(self.profile(profile)?.score(a, b)?)
    }

    /// Scores `needle` against every haystack.
    ///
    /// `None` haystacks (and a `None` needle) score as the worst score when
    /// the scorer allows it. Batches of at least `parallel.min_batch`
    /// haystacks are split across rayon workers.
    pub fn score_many(
        &self,
        profile: &str,
        needle: &HostValue,
        haystacks: &[HostValue],
    ) -> Result<Vec<Score>, EngineError> {
        let profile = self.profile(profile)?;
        let worst = profile.scorer.flags().worst_score();
        let mut results = vec![worst; haystacks.len()];

        let Some(needle) = profile.convert(needle)? else {
            return Ok(results);
        };

        let mut slots = Vec::with_capacity(haystacks.len());
        let mut views = Vec::with_capacity(haystacks.len());
        for (i, value) in haystacks.iter().enumerate() {
            if let Some(view) = profile.convert(value)? {
                slots.push(i);
                views.push(view);
            }
        }
        if views.is_empty() {
            return Ok(results);
        }

        let scores = if views.len() >= self.parallel.min_batch {
            self.score_parallel(profile, &needle, &views)?
        } else {
            let refs: Vec<&StringView> = views.iter().collect();
            profile
                .scorer
                .cached(&[&needle])?
                .score_many(&refs, profile.cutoff, profile.hint)?
                .to_scores()
        };
        for (slot, score) in slots.into_iter().zip(scores) {
            results[slot] = score;
        }
        Ok(results)
    }

    fn score_parallel(
        &self,
        profile: &Profile,
        needle: &StringView,
        haystacks: &[StringView],
    ) -> Result<Vec<Score>, ScorerError> {
        debug!(
            event = "engine_parallel",
            profile = profile.name(),
            haystacks = haystacks.len(),
        );
        match profile.domain() {
            ResultDomain::F64 => self.score_parallel_typed::<f64>(profile, needle, haystacks),
            ResultDomain::I64 => self.score_parallel_typed::<i64>(profile, needle, haystacks),
            ResultDomain::SizeT => self.score_parallel_typed::<usize>(profile, needle, haystacks),
        }
    }

    fn score_parallel_typed<T: ScoreType>(
        &self,
        profile: &Profile,
        needle: &StringView,
        haystacks: &[StringView],
    ) -> Result<Vec<Score>, ScorerError> {
        let typed = profile.scorer.typed::<T>()?;
        let cutoff = profile.cutoff.map(typed_score::<T>).transpose()?;
        let hint = profile.hint.map(typed_score::<T>).transpose()?;
        let scores = score_parallel(
            &typed,
            needle,
            haystacks,
            cutoff,
            hint,
            self.parallel.chunk_size,
        )?;
        Ok(scores.into_iter().map(T::into_score).collect())
    }
}

fn typed_score<T: ScoreType>(score: Score) -> Result<T, ScorerError> {
    T::from_score(score).ok_or_else(|| {
        ScorerError::Construction(format!("score {} is not in the {} domain", score, T::DOMAIN))
    })
}
