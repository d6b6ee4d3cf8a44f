//! "Did you mean" lookup for unrecognized words

use strsim::normalized_damerau_levenshtein;

/// Minimum similarity a candidate needs before it is offered.
pub const SIMILARITY_CUTOFF: f64 = 0.6;

/// Returns the candidate closest to `word`, if any clears the cutoff.
///
/// Ties keep the earlier candidate, so catalog order decides.
pub fn closest_match<'a>(word: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let mut best: Option<(&'a str, f64)> = None;
    for &candidate in candidates {
        let score = normalized_damerau_levenshtein(word, candidate);
        if score < SIMILARITY_CUTOFF {
            continue;
        }
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((candidate, score)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: &[&str] = &["if", "for", "func", "return", "range", "comparison"];

    #[test]
    fn test_close_word_is_suggested() {
        assert_eq!(closest_match("retrun", NAMES), Some("return"));
        assert_eq!(closest_match("fucn", NAMES), Some("func"));
    }

    #[test]
    fn test_distant_word_has_no_suggestion() {
        assert_eq!(closest_match("zzzzzz", NAMES), None);
        assert_eq!(closest_match("", NAMES), None);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        assert_eq!(closest_match("fo", &["for", "fo_"]), Some("for"));
    }
}
