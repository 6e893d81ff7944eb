use std::collections::HashMap;

use textlang_interface::{Error, LangProfile, N_GRAM};

/// Immutable lookup from n-gram to a dense per-language probability vector.
///
/// Language positions follow profile load order and never change afterwards;
/// callers that hold on to probability vectors rely on them.
pub struct ProbabilityIndex {
    languages: Vec<String>,
    table: HashMap<String, Vec<f64>>,
}

impl ProbabilityIndex {
    pub fn empty() -> Self {
        Self {
            languages: Vec::new(),
            table: HashMap::new(),
        }
    }

    pub fn build(profiles: &[LangProfile]) -> Result<Self, Error> {
        let total = profiles.len();
        let mut languages: Vec<String> = Vec::with_capacity(total);
        let mut table: HashMap<String, Vec<f64>> = HashMap::new();
        for (index, profile) in profiles.iter().enumerate() {
            if profile.name.is_empty() {
                return Err(Error::InitParam("profile has no language code".to_owned()));
            }
            if languages.contains(&profile.name) {
                return Err(Error::InitParam(format!(
                    "duplicate language profile: {}",
                    profile.name
                )));
            }
            languages.push(profile.name.clone());
            for (gram, &count) in &profile.freq {
                let len = gram.chars().count();
                if len == 0 || len > N_GRAM {
                    continue;
                }
                let denominator = profile.n_words[len - 1];
                if denominator == 0 {
                    continue;
                }
                let row = table
                    .entry(gram.clone())
                    .or_insert_with(|| vec![0.0; total]);
                row[index] = count as f64 / denominator as f64;
            }
        }
        Ok(Self { languages, table })
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn contains(&self, gram: &str) -> bool {
        self.table.contains_key(gram)
    }

    pub fn probabilities(&self, gram: &str) -> Option<&[f64]> {
        self.table.get(gram).map(Vec::as_slice)
    }
}
