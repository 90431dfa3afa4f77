//! Ranking bibliography keys by similarity to a mistyped key.

/// Distance between a bad key and a candidate; lower is closer.
pub trait KeyRanker {
    fn score(&self, bad_key: &str, candidate: &str) -> f64;
}

/// Edit distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl KeyRanker for Levenshtein {
    fn score(&self, bad_key: &str, candidate: &str) -> f64 {
        strsim::levenshtein(bad_key, candidate) as f64
    }
}

/// `1 - jaro_winkler`, so shared prefixes rank higher than with plain edit
/// distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl KeyRanker for JaroWinkler {
    fn score(&self, bad_key: &str, candidate: &str) -> f64 {
        1.0 - strsim::jaro_winkler(bad_key, candidate)
    }
}

/// Every key in `pool`, closest first.
///
/// Equal distances are ordered lexicographically and duplicate keys are
/// dropped, so the output is deterministic for any pool order.
pub fn suggest_keys<'a>(
    bad_key: &str,
    pool: impl IntoIterator<Item = &'a str>,
    ranker: &dyn KeyRanker,
) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = pool
        .into_iter()
        .map(|candidate| (ranker.score(bad_key, candidate), candidate))
        .collect();

    scored.sort_by(|(da, ka), (db, kb)| da.total_cmp(db).then_with(|| ka.cmp(kb)));
    scored.dedup_by(|(_, a), (_, b)| a == b);

    log::debug!("ranked {} candidates for {bad_key:?}", scored.len());
    scored.into_iter().map(|(_, key)| key.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_ranking() {
        let pool = ["smith2021", "jones2019", "smit2020"];
        let ranked = suggest_keys("smith2020", pool, &Levenshtein);
        assert_eq!(ranked, vec!["smit2020", "smith2021", "jones2019"]);
    }

    #[test]
    fn test_exact_key_ranks_first() {
        let pool = ["doe2019", "smith2020", "smith2002"];
        let ranked = suggest_keys("smith2020", pool, &Levenshtein);
        assert_eq!(ranked[0], "smith2020");
    }

    #[test]
    fn test_empty_pool() {
        let ranked = suggest_keys("anything", std::iter::empty(), &Levenshtein);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let pool = ["a", "b", "a"];
        let ranked = suggest_keys("a", pool, &Levenshtein);
        assert_eq!(ranked, vec!["a", "b"]);
    }

    #[test]
    fn test_jaro_winkler_prefers_shared_prefix() {
        let pool = ["knuth1984", "xnuth1984x"];
        let ranked = suggest_keys("knuth1948", pool, &JaroWinkler);
        assert_eq!(ranked[0], "knuth1984");
        assert!(JaroWinkler.score("same", "same").abs() < f64::EPSILON);
    }
}
