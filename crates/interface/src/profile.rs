use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Longest gram length a profile may carry.
pub const N_GRAM: usize = 3;

/// Per-language frequency table produced by an external training run.
///
/// `n_words[k]` is the total number of observed `k+1`-grams in the training
/// corpus, the denominator turning `freq` counts into probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LangProfile {
    pub name: String,
    pub freq: HashMap<String, u64>,
    pub n_words: [u64; N_GRAM],
}

impl LangProfile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            freq: HashMap::new(),
            n_words: [0; N_GRAM],
        }
    }

    /// Parse one profile from its JSON record
    /// (`{"name":"en","freq":{..},"n_words":[..]}`).
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let profile: LangProfile =
            serde_json::from_str(json).map_err(|e| Error::InitParam(e.to_string()))?;
        if profile.name.is_empty() {
            return Err(Error::InitParam("profile has no language code".to_owned()));
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use crate::LangProfile;

    #[test]
    fn parse_json_record() {
        let profile = LangProfile::from_json(
            r#"{"name":"en","freq":{"a":3,"ab":2,"abc":1},"n_words":[3,2,1]}"#,
        )
        .expect("Failed to parse profile");
        assert_eq!(profile.name, "en");
        assert_eq!(profile.freq["ab"], 2);
        assert_eq!(profile.n_words, [3, 2, 1]);
    }

    #[test]
    fn reject_missing_name() {
        let err = LangProfile::from_json(r#"{"name":"","freq":{},"n_words":[0,0,0]}"#);
        assert!(err.is_err());
    }

    #[test]
    fn reject_malformed_record() {
        assert!(LangProfile::from_json(r#"{"freq":{}}"#).is_err());
        assert!(LangProfile::from_json("not json").is_err());
    }
}
