//! Word-list profanity filter.

use std::collections::HashSet;

use chirpy_core::ports::BodyFilter;

const DEFAULT_BANNED: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];
const MASK: &str = "****";

/// Masks banned words, matched case-insensitively on whole space-separated words.
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    banned: HashSet<String>,
}

impl ProfanityFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            banned: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED)
    }
}

impl BodyFilter for ProfanityFilter {
    fn filter(&self, body: &str) -> String {
        body.split(' ')
            .map(|word| {
                if self.banned.contains(&word.to_lowercase()) {
                    MASK
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_banned_words_any_case() {
        let filter = ProfanityFilter::default();
        assert_eq!(
            filter.filter("What a Kerfuffle that SHARBERT was"),
            "What a **** that **** was"
        );
    }

    #[test]
    fn test_leaves_punctuated_words_and_spacing() {
        let filter = ProfanityFilter::default();
        assert_eq!(filter.filter("fornax!  ok"), "fornax!  ok");
        assert_eq!(filter.filter(""), "");
    }
}
