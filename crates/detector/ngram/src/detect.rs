use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};
use rand_distr::StandardNormal;
use regex::Regex;
use textlang_interface::{Error, Language, N_GRAM};

use crate::extract::NGram;
use crate::index::ProbabilityIndex;
use crate::normalize::normalize_vi;

pub const ALPHA_DEFAULT: f64 = 0.5;
pub const ALPHA_WIDTH: f64 = 0.05;
pub const ITERATION_LIMIT: usize = 1000;
pub const PROB_THRESHOLD: f64 = 0.1;
pub const CONV_THRESHOLD: f64 = 0.99999;
pub const BASE_FREQ: f64 = 10000.0;
pub const N_TRIAL: usize = 7;
pub const MAX_TEXT_LENGTH_DEFAULT: usize = 10_000;
pub const UNKNOWN_LANG: &str = "unknown";

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("https?://[-_.?&~;+=/#0-9A-Za-z]{1,2076}").expect("invalid url pattern")
});
static MAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("[-_.0-9A-Za-z]{1,64}@[-_0-9A-Za-z]{1,255}[-_.0-9A-Za-z]{1,255}")
        .expect("invalid mail pattern")
});

/// Single-use detection session.
///
/// Append the target text, then call [`detect`](Self::detect) or
/// [`probabilities`](Self::probabilities); the posterior is computed once
/// and cached. [`clear`](Self::clear) returns the session to its fresh
/// state. Sessions borrow the shared index read-only, so any number of them
/// may run concurrently.
pub struct NGramDetector {
    index: Arc<ProbabilityIndex>,
    text: Vec<char>,
    langprob: Option<Vec<f64>>,
    alpha: f64,
    max_text_length: usize,
    prior: Option<Vec<f64>>,
    seed: Option<u64>,
    verbose: bool,
}

impl NGramDetector {
    pub(crate) fn new(index: Arc<ProbabilityIndex>, seed: Option<u64>) -> Self {
        Self {
            index,
            text: Vec::new(),
            langprob: None,
            alpha: ALPHA_DEFAULT,
            max_text_length: MAX_TEXT_LENGTH_DEFAULT,
            prior: None,
            seed,
            verbose: false,
        }
    }

    /// Set the smoothing parameter. The default of 0.5 is the expected
    /// likelihood estimate.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    pub fn set_max_text_length(&mut self, max_text_length: usize) {
        self.max_text_length = max_text_length;
    }

    /// Route per-update and per-trial diagnostics through the `log` facade.
    pub fn set_verbose(&mut self) {
        self.verbose = true;
    }

    /// Set prior probabilities over the loaded languages. Entries must be
    /// non-negative with at least one positive; unknown codes are ignored.
    /// The prior is normalized to sum to one.
    pub fn set_prior_map(&mut self, prior_map: &HashMap<String, f64>) -> Result<(), Error> {
        let languages = self.index.languages();
        let mut prior = vec![0.0; languages.len()];
        let mut sum = 0.0;
        for (i, lang) in languages.iter().enumerate() {
            if let Some(&p) = prior_map.get(lang) {
                if p < 0.0 {
                    return Err(Error::InitParam(
                        "prior probability must be non-negative".to_owned(),
                    ));
                }
                prior[i] = p;
                sum += p;
            }
        }
        if sum <= 0.0 {
            return Err(Error::InitParam(
                "at least one prior probability must be non-zero".to_owned(),
            ));
        }
        for p in &mut prior {
            *p /= sum;
        }
        self.prior = Some(prior);
        Ok(())
    }

    /// Append target text, stripping URLs and e-mail addresses, normalizing
    /// Vietnamese and collapsing space runs. Characters beyond
    /// `max_text_length` are cut down.
    pub fn append(&mut self, text: &str) {
        let text = URL_REGEX.replace_all(text, " ");
        let text = MAIL_REGEX.replace_all(&text, " ");
        let text = normalize_vi(&text);
        let mut pre = self.text.last().copied().unwrap_or(' ');
        for ch in text.chars() {
            if self.text.len() >= self.max_text_length {
                break;
            }
            if ch != ' ' || pre != ' ' {
                self.text.push(ch);
            }
            pre = ch;
        }
    }

    /// Append target text read from `reader`. At most enough bytes for
    /// `max_text_length` characters are consumed; I/O errors surface
    /// verbatim.
    pub fn append_reader<R: Read>(&mut self, reader: &mut R) -> Result<(), Error> {
        let mut text = String::new();
        reader
            .take(self.max_text_length as u64 * 4)
            .read_to_string(&mut text)?;
        self.append(&text);
        Ok(())
    }

    /// Reset to the fresh state: text buffer and cached posterior are
    /// dropped, parameters stay.
    pub fn clear(&mut self) {
        self.text.clear();
        self.langprob = None;
    }

    /// The language code with the highest probability, or `"unknown"` when
    /// no candidate passes the probability threshold.
    pub fn detect(&mut self) -> Result<String, Error> {
        let probabilities = self.probabilities()?;
        Ok(probabilities
            .into_iter()
            .next()
            .map(|language| language.lang)
            .unwrap_or_else(|| UNKNOWN_LANG.to_owned()))
    }

    /// Candidates with probability above [`PROB_THRESHOLD`], ordered by
    /// descending probability. Ties keep profile load order.
    pub fn probabilities(&mut self) -> Result<Vec<Language>, Error> {
        if self.langprob.is_none() {
            self.detect_block()?;
        }
        Ok(self.sort_probability(self.langprob.as_deref().unwrap_or(&[])))
    }

    fn detect_block(&mut self) -> Result<(), Error> {
        self.cleaning_text();
        let ngrams = self.extract_ngrams();
        if ngrams.is_empty() {
            return Err(Error::CantDetect("no features in text".to_owned()));
        }

        let mut langprob = vec![0.0; self.index.len()];
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        for _ in 0..N_TRIAL {
            let mut prob = self.init_probability();
            let gauss: f64 = rng.sample(StandardNormal);
            let alpha = self.alpha + gauss * ALPHA_WIDTH;

            let mut i = 0;
            loop {
                let r = rng.random_range(0..ngrams.len());
                self.update_lang_prob(&mut prob, &ngrams[r], alpha);
                if i % 5 == 0 {
                    if normalize_prob(&mut prob) > CONV_THRESHOLD || i >= ITERATION_LIMIT {
                        break;
                    }
                    if self.verbose {
                        log::trace!("> {:?}", self.sort_probability(&prob));
                    }
                }
                i += 1;
            }
            for (accumulated, p) in langprob.iter_mut().zip(&prob) {
                *accumulated += p / N_TRIAL as f64;
            }
            if self.verbose {
                log::debug!("==> {:?}", self.sort_probability(&prob));
            }
        }
        self.langprob = Some(langprob);
        Ok(())
    }

    /// Drop Latin letters when the text is predominantly written in another
    /// script; short embedded Latin fragments would otherwise bias the
    /// result.
    fn cleaning_text(&mut self) {
        let mut latin = 0usize;
        let mut non_latin = 0usize;
        for &ch in &self.text {
            if ('A'..='z').contains(&ch) {
                latin += 1;
            } else if ch >= '\u{300}' && !('\u{1e00}'..='\u{1eff}').contains(&ch) {
                non_latin += 1;
            }
        }
        if latin * 2 < non_latin {
            self.text.retain(|ch| !('A'..='z').contains(ch));
        }
    }

    fn extract_ngrams(&self) -> Vec<String> {
        let mut list = Vec::new();
        let mut gram = NGram::new();
        for &ch in &self.text {
            gram.add_char(ch);
            for n in 1..=N_GRAM {
                if let Some(w) = gram.get(n) {
                    if self.index.contains(&w) {
                        list.push(w);
                    }
                }
            }
        }
        list
    }

    fn init_probability(&self) -> Vec<f64> {
        match &self.prior {
            Some(prior) => prior.clone(),
            None => vec![1.0 / self.index.len() as f64; self.index.len()],
        }
    }

    fn update_lang_prob(&self, prob: &mut [f64], gram: &str, alpha: f64) -> bool {
        let Some(row) = self.index.probabilities(gram) else {
            return false;
        };
        if self.verbose {
            log::trace!("{}: {}", gram, self.word_prob_to_string(row));
        }
        let weight = alpha / BASE_FREQ;
        for (p, v) in prob.iter_mut().zip(row) {
            *p *= weight + v;
        }
        true
    }

    fn sort_probability(&self, prob: &[f64]) -> Vec<Language> {
        let mut list: Vec<Language> = prob
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p > PROB_THRESHOLD)
            .map(|(j, &p)| Language::new(self.index.languages()[j].clone(), p))
            .collect();
        list.sort_by(|a, b| {
            b.prob
                .partial_cmp(&a.prob)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        list
    }

    fn word_prob_to_string(&self, row: &[f64]) -> String {
        let mut out = String::new();
        for (lang, &p) in self.index.languages().iter().zip(row) {
            if p >= 0.00001 {
                out.push_str(&format!(" {lang}:{p:.5}"));
            }
        }
        out
    }
}

/// Normalize in place to sum one and return the maximum component.
fn normalize_prob(prob: &mut [f64]) -> f64 {
    let sum: f64 = prob.iter().sum();
    let mut max = 0.0;
    for p in prob.iter_mut() {
        *p /= sum;
        if *p > max {
            max = *p;
        }
    }
    max
}
