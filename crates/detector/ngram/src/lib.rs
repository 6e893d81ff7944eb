pub mod detect;
pub mod extract;
pub mod index;
pub mod normalize;

use std::sync::Arc;

use textlang_interface::{Detector, Error, LangProfile};

use crate::detect::NGramDetector;
use crate::index::ProbabilityIndex;

/// Owns the probability index built from the loaded profiles and hands out
/// detection sessions sharing it. Load everything up front; the index is
/// immutable afterwards, so sessions may run from any number of threads.
pub struct DetectorFactory {
    index: Arc<ProbabilityIndex>,
    seed: Option<u64>,
}

impl DetectorFactory {
    /// Build the index from profiles in order; the order fixes the language
    /// positions reported by [`languages`](Self::languages). Duplicate
    /// language codes are rejected.
    pub fn from_profiles(profiles: &[LangProfile]) -> Result<Self, Error> {
        Ok(Self {
            index: Arc::new(ProbabilityIndex::build(profiles)?),
            seed: None,
        })
    }

    /// Convenience over [`from_profiles`](Self::from_profiles) for profiles
    /// still in their JSON records.
    pub fn from_json_profiles<S: AsRef<str>>(profiles: &[S]) -> Result<Self, Error> {
        let parsed = profiles
            .iter()
            .map(|json| LangProfile::from_json(json.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_profiles(&parsed)
    }

    /// Fix the random seed for every session created afterwards. Detection
    /// becomes reproducible for identical text and profiles.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    /// Loaded language codes in load order.
    pub fn languages(&self) -> &[String] {
        self.index.languages()
    }

    /// Drop the loaded profiles. Sessions created earlier keep the index
    /// they were built with.
    pub fn clear(&mut self) {
        self.index = Arc::new(ProbabilityIndex::empty());
    }

    pub fn detector(&self) -> NGramDetector {
        NGramDetector::new(Arc::clone(&self.index), self.seed)
    }

    pub fn detector_with_alpha(&self, alpha: f64) -> NGramDetector {
        let mut detector = self.detector();
        detector.set_alpha(alpha);
        detector
    }
}

impl Detector for DetectorFactory {
    fn detect_language(&self, text: &str) -> Option<String> {
        let mut detector = self.detector();
        detector.append(text);
        detector
            .detect()
            .ok()
            .filter(|lang| lang != detect::UNKNOWN_LANG)
    }
}
