//! String similarity scoring
//!
//! Produces a ratio in 0..=100 between two short strings. Input is NFC
//! normalized, lowercased, and token-sorted before a character-level edit
//! distance is taken, so `"valle cocora"` and `"cocora valle"` score 100 and
//! the measure stays stable for short, accented Spanish strings.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Scores above this value pass the fuzzy stages (strictly greater-than)
pub const SIMILARITY_THRESHOLD: u8 = 60;

/// Whether a score clears the acceptance threshold
pub fn passes_threshold(score: u8) -> bool {
    score > SIMILARITY_THRESHOLD
}

/// Similarity ratio in 0..=100 between two strings
///
/// Case-insensitive; exact (case-insensitive) equality scores 100, and the
/// empty string scores 0 against any non-empty string.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());
    let distance = levenshtein(&a_chars, &b_chars);

    (((max_len - distance) * 100) / max_len) as u8
}

/// Score every choice against the query and return the top `limit` as
/// `(choice, score)` pairs, highest score first
pub fn extract<'a>(query: &str, choices: &'a [String], limit: usize) -> Vec<(&'a str, u8)> {
    let mut scored: Vec<(&str, u8)> = choices
        .iter()
        .map(|choice| (choice.as_str(), ratio(query, choice)))
        .collect();
    // Stable sort keeps first-seen order among equal scores
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(limit);
    scored
}

/// NFC-normalize, lowercase, and token-sort
fn normalize(text: &str) -> String {
    let folded = text.nfc().collect::<String>().to_lowercase();
    let mut words: Vec<&str> = folded.unicode_words().collect();
    if words.is_empty() {
        return folded.trim().to_string();
    }
    words.sort_unstable();
    words.join(" ")
}

/// Classic two-row Levenshtein edit distance over characters
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equality_scores_100() {
        assert_eq!(ratio("cartagena", "cartagena"), 100);
        assert_eq!(ratio("Cartagena", "cartagena"), 100);
        assert_eq!(ratio("", ""), 100);
    }

    #[test]
    fn test_empty_against_non_empty_scores_0() {
        assert_eq!(ratio("", "cartagena"), 0);
        assert_eq!(ratio("cartagena", ""), 0);
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(ratio("catagena", "cartagena"), ratio("cartagena", "catagena"));
        assert_eq!(ratio("medelin", "medellín"), ratio("medellín", "medelin"));
    }

    #[test]
    fn test_typo_stays_above_threshold() {
        // One dropped letter out of nine
        let score = ratio("catagena", "cartagena");
        assert!(passes_threshold(score), "score was {}", score);
    }

    #[test]
    fn test_unrelated_strings_fail_threshold() {
        let score = ratio("xyz123", "cartagena");
        assert!(!passes_threshold(score), "score was {}", score);
    }

    #[test]
    fn test_token_order_does_not_matter() {
        assert_eq!(ratio("valle cocora", "cocora valle"), 100);
    }

    #[test]
    fn test_threshold_boundary_60_is_excluded() {
        // 10 chars, 4 substitutions: (10 - 4) * 100 / 10 = 60 exactly
        let score = ratio("aaaaaaaaaa", "aaaaaabbbb");
        assert_eq!(score, 60);
        assert!(!passes_threshold(score));
        assert!(!passes_threshold(59));
    }

    #[test]
    fn test_threshold_boundary_61_is_included() {
        // 18 chars, 7 substitutions: (18 - 7) * 100 / 18 = 61
        let score = ratio("aaaaaaaaaaaaaaaaaa", "aaaaaaaaaaabbbbbbb");
        assert_eq!(score, 61);
        assert!(passes_threshold(score));
    }

    #[test]
    fn test_extract_ranks_and_truncates() {
        let choices = vec![
            "Bolívar".to_string(),
            "Antioquia".to_string(),
            "Quindío".to_string(),
            "Boyacá".to_string(),
        ];
        let top = extract("bolivar", &choices, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].0, "Bolívar");
        assert!(top[0].1 > top[2].1);
    }

    #[test]
    fn test_extract_limit_larger_than_choices() {
        let choices = vec!["playa".to_string()];
        let top = extract("playa", &choices, 3);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0], ("playa", 100));
    }
}
