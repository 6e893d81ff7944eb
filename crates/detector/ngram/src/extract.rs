use textlang_interface::N_GRAM;

use crate::normalize::normalize;

/// Rolling window over the last three folded characters.
///
/// The window starts space-filled, so the first real character already
/// participates in bigrams with a leading-space context. Unigrams are held
/// back until a word boundary has been seen, which skips the first word of
/// the text.
pub struct NGram {
    window: [char; N_GRAM],
    filled: usize,
    seen_space: bool,
}

impl NGram {
    pub fn new() -> Self {
        Self {
            window: [' '; N_GRAM],
            // the sentinel space counts as one populated slot
            filled: 1,
            seen_space: false,
        }
    }

    pub fn add_char(&mut self, ch: char) {
        let ch = normalize(ch);
        if ch == ' ' && self.window[N_GRAM - 1] == ' ' {
            return;
        }
        self.window.rotate_left(1);
        self.window[N_GRAM - 1] = ch;
        if self.filled < N_GRAM {
            self.filled += 1;
        }
        if ch == ' ' {
            self.seen_space = true;
        }
    }

    /// The current `n`-gram, or `None` while the window cannot provide one.
    pub fn get(&self, n: usize) -> Option<String> {
        if n < 1 || n > N_GRAM || self.filled < n {
            return None;
        }
        if n == 1 {
            let ch = self.window[N_GRAM - 1];
            if !self.seen_space || ch == ' ' {
                return None;
            }
            return Some(ch.to_string());
        }
        let tail = &self.window[N_GRAM - n..];
        if tail.iter().all(|&c| c == ' ') {
            return None;
        }
        Some(tail.iter().collect())
    }
}

impl Default for NGram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::NGram;

    #[test]
    fn empty_window_yields_nothing() {
        let gram = NGram::new();
        for n in 0..=4 {
            assert_eq!(gram.get(n), None);
        }
    }

    #[test]
    fn first_word_skips_unigrams() {
        let mut gram = NGram::new();
        gram.add_char('a');
        assert_eq!(gram.get(1), None);
        assert_eq!(gram.get(2), Some(" a".to_owned()));
        assert_eq!(gram.get(3), None);
    }

    #[test]
    fn unigrams_start_after_a_boundary() {
        let mut gram = NGram::new();
        for ch in "ab c".chars() {
            gram.add_char(ch);
        }
        assert_eq!(gram.get(1), Some("c".to_owned()));
        assert_eq!(gram.get(2), Some(" c".to_owned()));
        assert_eq!(gram.get(3), Some("b c".to_owned()));
    }

    #[test]
    fn window_rolls_through_a_word() {
        let mut gram = NGram::new();
        gram.add_char('a');
        gram.add_char('b');
        assert_eq!(gram.get(2), Some("ab".to_owned()));
        assert_eq!(gram.get(3), Some(" ab".to_owned()));
        gram.add_char('c');
        assert_eq!(gram.get(3), Some("abc".to_owned()));
        gram.add_char(' ');
        assert_eq!(gram.get(1), None);
        assert_eq!(gram.get(2), Some("c ".to_owned()));
        assert_eq!(gram.get(3), Some("bc ".to_owned()));
    }

    #[test]
    fn space_runs_collapse() {
        let mut gram = NGram::new();
        for ch in "a   b".chars() {
            gram.add_char(ch);
        }
        assert_eq!(gram.get(3), Some("a b".to_owned()));
    }

    #[test]
    fn leading_spaces_are_ignored() {
        let mut gram = NGram::new();
        gram.add_char(' ');
        gram.add_char(' ');
        assert_eq!(gram.get(2), None);
        gram.add_char('x');
        assert_eq!(gram.get(2), Some(" x".to_owned()));
        assert_eq!(gram.get(3), None);
    }

    #[test]
    fn folding_applies_before_windowing() {
        let mut gram = NGram::new();
        for ch in "a,b".chars() {
            gram.add_char(ch);
        }
        // the comma folds to a space
        assert_eq!(gram.get(3), Some("a b".to_owned()));
        assert_eq!(gram.get(1), Some("b".to_owned()));
    }
}
