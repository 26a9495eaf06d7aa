//! Symptom text handling: tokenizing free text and fuzzy keyword matching.
//!
//! Matching is plain substring containment rather than a symptom ontology, so "breathing"
//! matches "difficulty breathing" and "fever" matches "prolonged fever". This is a known
//! precision limitation: "ache" also matches "headache".

use crate::constants::MIN_TOKEN_LEN;

/// Split free text into symptom tokens.
///
/// Text is lowercased and split on commas, periods and whitespace. Tokens shorter than three
/// characters are discarded. Order is kept and duplicates are not removed.
pub fn tokenize_symptoms(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c == ',' || c == '.' || c.is_whitespace())
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_owned)
        .collect()
}

/// Either string contains the other.
pub fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Some token overlaps some keyword.
pub fn any_overlap<T, K>(tokens: &[T], keywords: &[K]) -> bool
where
    T: AsRef<str>,
    K: AsRef<str>,
{
    tokens
        .iter()
        .any(|t| keywords.iter().any(|k| overlaps(t.as_ref(), k.as_ref())))
}

/// Some token contains one of the terms (one direction only).
pub fn any_contains<T: AsRef<str>>(tokens: &[T], terms: &[&str]) -> bool {
    tokens
        .iter()
        .any(|t| terms.iter().any(|term| t.as_ref().contains(term)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_punctuation_and_whitespace() {
        let tokens = tokenize_symptoms("High fever, chills.  Headache\tand vomiting");
        assert_eq!(
            tokens,
            vec!["high", "fever", "chills", "headache", "and", "vomiting"]
        );
    }

    #[test]
    fn tokenize_drops_short_tokens() {
        assert_eq!(tokenize_symptoms("a is ok bad"), vec!["bad"]);
        assert!(tokenize_symptoms(" ,. ").is_empty());
    }

    #[test]
    fn overlap_is_bidirectional() {
        assert!(overlaps("breathing", "difficulty breathing"));
        assert!(overlaps("difficulty breathing", "breathing"));
        assert!(!overlaps("cough", "fever"));
    }

    #[test]
    fn contains_is_one_directional() {
        assert!(any_contains(&["watery diarrhea"], &["diarrhea"]));
        assert!(!any_contains(&["dry"], &["dry mouth"]));
    }

    #[test]
    fn any_overlap_checks_all_pairs() {
        let signals = ["severe dehydration", "sunken eyes"];
        assert!(any_overlap(&["eyes"], &signals));
        assert!(!any_overlap(&["cough", "fever"], &signals));
    }
}
