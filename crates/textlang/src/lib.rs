pub use textlang_interface::{Detector, Error, LangProfile, Language, N_GRAM};

pub use textlang_ngram::detect::{
    NGramDetector, ALPHA_DEFAULT, ALPHA_WIDTH, BASE_FREQ, CONV_THRESHOLD, ITERATION_LIMIT,
    MAX_TEXT_LENGTH_DEFAULT, N_TRIAL, PROB_THRESHOLD, UNKNOWN_LANG,
};
pub use textlang_ngram::extract::NGram;
pub use textlang_ngram::index::ProbabilityIndex;
pub use textlang_ngram::normalize::{normalize, normalize_vi};
pub use textlang_ngram::DetectorFactory;
