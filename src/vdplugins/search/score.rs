use super::SearchOptions;

/// Approximate substring score of `pattern` inside `text`, both lower-cased.
///
/// Every window of `text` whose length is within the error budget of the
/// pattern is compared by Levenshtein distance. A window starting at `start`
/// with `errors` edits scores
/// `errors / pattern_len + |start - location| / distance`; the best score at
/// or under the threshold wins. `0.0` is a perfect match at the expected location.
pub fn fuzzy_score(pattern: &str, text: &str, options: &SearchOptions) -> Option<f64> {
    let pattern_len = pattern.chars().count();
    if pattern_len == 0 {
        return Some(0.0);
    }

    let max_errors = (options.threshold * pattern_len as f64).floor() as usize;
    let min_window = pattern_len.saturating_sub(max_errors).max(1);
    let max_window = pattern_len.saturating_add(max_errors);

    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let text_len = bounds.len() - 1;

    let mut best: Option<f64> = None;
    for start in 0..text_len {
        let proximity = proximity(start, options);
        if proximity > options.threshold {
            if start >= options.location {
                break;
            }
            continue;
        }

        for window in min_window..=max_window {
            if start + window > text_len {
                break;
            }
            let candidate = &text[bounds[start]..bounds[start + window]];
            let errors = strsim::levenshtein(pattern, candidate);
            if errors > max_errors {
                continue;
            }

            let score = errors as f64 / pattern_len as f64 + proximity;
            if score <= options.threshold && best.map_or(true, |b| score < b) {
                best = Some(score);
            }
        }
    }
    best
}

fn proximity(start: usize, options: &SearchOptions) -> f64 {
    let offset = start.abs_diff(options.location);
    if options.distance == 0 {
        return if offset == 0 { 0.0 } else { 1.0 };
    }
    offset as f64 / options.distance as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(pattern: &str, text: &str) -> Option<f64> {
        fuzzy_score(pattern, text, &SearchOptions::default())
    }

    #[test]
    fn exact_prefix_scores_zero() {
        assert_eq!(score("al", "alpha"), Some(0.0));
    }

    #[test]
    fn later_matches_pay_for_distance() {
        let s = score("logger", "message logger").unwrap();
        assert!((s - 0.08).abs() < 1e-9, "got {}", s);
    }

    #[test]
    fn tolerates_a_typo_in_longer_patterns() {
        let s = score("mesage", "message logger").unwrap();
        assert!(s > 0.0 && s <= 0.3, "got {}", s);
    }

    #[test]
    fn short_patterns_need_exact_characters() {
        assert_eq!(score("al", "beta"), None);
        assert_eq!(score("y", "x"), None);
    }

    #[test]
    fn far_away_matches_are_rejected() {
        let text = format!("{}needle", "x".repeat(40));
        assert_eq!(score("needle", &text), None);
    }

    #[test]
    fn zero_distance_requires_expected_location() {
        let options = SearchOptions {
            distance: 0,
            ..SearchOptions::default()
        };
        assert_eq!(fuzzy_score("ta", "beta", &options), None);
        assert_eq!(fuzzy_score("be", "beta", &options), Some(0.0));
    }

    #[test]
    fn huge_threshold_saturates_instead_of_overflowing() {
        let options = SearchOptions {
            threshold: 1e300,
            ..SearchOptions::default()
        };
        assert!(fuzzy_score("al", "beta", &options).is_some());
        assert_eq!(fuzzy_score("al", "alpha", &options), Some(0.0));
    }

    #[test]
    fn handles_multibyte_text() {
        assert_eq!(score("übe", "überlay"), Some(0.0));
        assert_eq!(score("x", ""), None);
    }
}
