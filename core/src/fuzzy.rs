use crate::catalog::CatalogItem;
use strsim::normalized_levenshtein;

/// Minimum similarity (0-100) for a candidate to be kept. Tunable default,
/// inherited from the system this replaces.
pub const SCORE_CUTOFF: f64 = 70.0;
/// How many matches are merged into the expanded query. Tunable default.
pub const MAX_MATCHES: usize = 5;
// Score assigned when one casefolded string contains the other. Keeps a
// short query like an exact track name matching its longer neighbors.
const PARTIAL_SCORE: f64 = 90.0;

#[derive(Debug, Clone)]
pub struct FuzzyMatch {
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct ResolvedQuery {
    /// Space-joined kept match texts, score-descending. Fed to the index.
    pub expanded: String,
    pub matches: Vec<FuzzyMatch>,
    /// Did-you-mean text when the top match differs from the query after
    /// casefolding. Display-only; never alters retrieval.
    pub hint: Option<String>,
}

/// Matches free-text queries against every known track name, artist name,
/// and album name in the catalog.
pub struct FuzzyResolver {
    // track names, then artist names, then album names, each in item_id
    // order; this order is the tie-break for equal scores
    candidates: Vec<String>,
}

fn similarity(query: &str, candidate: &str) -> f64 {
    if candidate.is_empty() {
        return 0.0;
    }
    let ratio = normalized_levenshtein(query, candidate) * 100.0;
    let (short, long) = if query.len() <= candidate.len() {
        (query, candidate)
    } else {
        (candidate, query)
    };
    if short.len() >= 3 && long.contains(short) {
        ratio.max(PARTIAL_SCORE)
    } else {
        ratio
    }
}

impl FuzzyResolver {
    pub fn new(items: &[CatalogItem]) -> Self {
        let mut candidates = Vec::with_capacity(items.len() * 3);
        candidates.extend(items.iter().map(|i| i.track_name.clone()));
        candidates.extend(items.iter().map(|i| i.artist_name.clone()));
        candidates.extend(items.iter().map(|i| i.album.clone()));
        Self { candidates }
    }

    /// Score `query` against every candidate (0-100, casefolded normalized
    /// Levenshtein with a containment boost), keep scores >= `SCORE_CUTOFF`
    /// sorted descending, truncated to `MAX_MATCHES`. Returns `None` when
    /// nothing clears the cutoff.
    pub fn resolve(&self, query: &str) -> Option<ResolvedQuery> {
        let folded = query.to_lowercase();
        let mut matches: Vec<FuzzyMatch> = Vec::new();
        for candidate in &self.candidates {
            let score = similarity(&folded, &candidate.to_lowercase());
            if score >= SCORE_CUTOFF {
                matches.push(FuzzyMatch {
                    text: candidate.clone(),
                    score,
                });
            }
        }
        if matches.is_empty() {
            return None;
        }
        // stable sort keeps candidate-pool order on equal scores
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(MAX_MATCHES);

        let top = &matches[0];
        let hint = if top.text.to_lowercase() != folded {
            Some(top.text.clone())
        } else {
            None
        };
        let expanded = matches
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(
            kept = matches.len(),
            top_score = top.score,
            "fuzzy resolution"
        );
        Some(ResolvedQuery {
            expanded,
            matches,
            hint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, RawRecord};

    fn resolver() -> FuzzyResolver {
        let rows = vec![
            RawRecord {
                track_name: "Roop Tera Mastana".into(),
                artist_name: "Kishore Kumar".into(),
                album: "Aradhana".into(),
                duration_ms: 225_000,
                spotify_uri: "spotify:track:aaa".into(),
            },
            RawRecord {
                track_name: "Mere Sapno Ki Rani".into(),
                artist_name: "Kishore Kumar".into(),
                album: "Aradhana".into(),
                duration_ms: 180_000,
                spotify_uri: "spotify:track:bbb".into(),
            },
        ];
        let catalog = Catalog::from_records(rows).unwrap();
        FuzzyResolver::new(catalog.items())
    }

    #[test]
    fn typo_resolves_with_hint() {
        let r = resolver();
        let resolved = r.resolve("Kishor Kumarr").unwrap();
        assert_eq!(resolved.hint.as_deref(), Some("Kishore Kumar"));
        assert!(resolved.expanded.contains("Kishore Kumar"));
    }

    #[test]
    fn exact_match_has_no_hint() {
        let r = resolver();
        let resolved = r.resolve("kishore kumar").unwrap();
        assert_eq!(resolved.hint, None);
        assert_eq!(resolved.matches[0].score, 100.0);
    }

    #[test]
    fn gibberish_is_no_match() {
        let r = resolver();
        assert!(r.resolve("xqzwvbnk").is_none());
    }

    #[test]
    fn equal_scores_keep_candidate_order() {
        let r = resolver();
        // both artist entries score 100; track names come before artists in
        // the pool, so the two artist copies stay adjacent and in item order
        let resolved = r.resolve("Kishore Kumar").unwrap();
        let texts: Vec<&str> = resolved.matches.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts[0], "Kishore Kumar");
        assert_eq!(texts[1], "Kishore Kumar");
    }

    #[test]
    fn keeps_at_most_five_matches() {
        let rows: Vec<RawRecord> = (0..8)
            .map(|i| RawRecord {
                track_name: "Same Name".into(),
                artist_name: format!("Artist {i}"),
                album: String::new(),
                duration_ms: 1_000,
                spotify_uri: format!("spotify:track:{i}"),
            })
            .collect();
        let catalog = Catalog::from_records(rows).unwrap();
        let r = FuzzyResolver::new(catalog.items());
        let resolved = r.resolve("Same Name").unwrap();
        assert_eq!(resolved.matches.len(), MAX_MATCHES);
    }
}
