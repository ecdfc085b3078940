use crate::index::{LexicalIndex, TermVector};
use crate::ItemId;
use std::cmp::Ordering;

/// Score every catalog item against `query` by cosine similarity and return
/// the `k` best as `(item_id, score)` pairs.
///
/// Item vectors are stored L2-normalized, so the cosine is the posting dot
/// product divided by the query norm. A zero query vector scores 0 against
/// everything; there is never a division by zero. Equal scores order by
/// ascending `item_id`, so repeated calls return identical lists. `k`
/// larger than the catalog clamps to the catalog size.
pub fn rank(query: &TermVector, index: &LexicalIndex, k: usize) -> Vec<(ItemId, f32)> {
    let n = index.num_items() as usize;
    let mut scores = vec![0.0f32; n];
    let q_norm = query.norm();
    if q_norm > 0.0 {
        for (tid, q_weight) in query.iter() {
            for p in index.postings(tid) {
                scores[p.item_id as usize] += p.weight * q_weight;
            }
        }
        for s in scores.iter_mut() {
            *s /= q_norm;
        }
    }

    let mut ranked: Vec<(ItemId, f32)> = scores
        .into_iter()
        .enumerate()
        .map(|(i, s)| (i as ItemId, s))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(k.min(n));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, RawRecord};

    fn row(track: &str, artist: &str, album: &str) -> RawRecord {
        RawRecord {
            track_name: track.into(),
            artist_name: artist.into(),
            album: album.into(),
            duration_ms: 1_000,
            spotify_uri: String::new(),
        }
    }

    #[test]
    fn zero_vector_ranks_by_item_id() {
        let catalog = Catalog::from_records(vec![
            row("Tum Hi Ho", "Arijit Singh", "Aashiqui 2"),
            row("Chaiyya Chaiyya", "Sukhwinder Singh", "Dil Se"),
            row("Roop Tera Mastana", "Kishore Kumar", "Aradhana"),
        ])
        .unwrap();
        let index = LexicalIndex::build(catalog.items());
        let query = index.transform("wholly unknown words");
        let ranked = rank(&query, &index, 2);
        assert_eq!(ranked, vec![(0, 0.0), (1, 0.0)]);
    }

    #[test]
    fn identical_items_tie_break_ascending() {
        // same combined text under distinct dedup keys
        let catalog = Catalog::from_records(vec![
            row("Dil Se", "Rahman", ""),
            row("Dil", "Se Rahman", ""),
        ])
        .unwrap();
        let index = LexicalIndex::build(catalog.items());
        let query = index.transform("Dil Se Rahman");
        let ranked = rank(&query, &index, 2);
        assert_eq!(ranked[0].0, 0);
        assert_eq!(ranked[1].0, 1);
        assert_eq!(ranked[0].1, ranked[1].1);
    }

    #[test]
    fn k_clamps_to_catalog_size() {
        let catalog = Catalog::from_records(vec![
            row("Tum Hi Ho", "Arijit Singh", "Aashiqui 2"),
            row("Chaiyya Chaiyya", "Sukhwinder Singh", "Dil Se"),
        ])
        .unwrap();
        let index = LexicalIndex::build(catalog.items());
        let query = index.transform("Singh");
        assert_eq!(rank(&query, &index, 100).len(), 2);
        assert_eq!(rank(&query, &index, 1).len(), 1);
    }

    #[test]
    fn higher_overlap_scores_higher() {
        let catalog = Catalog::from_records(vec![
            row("Tum Hi Ho", "Arijit Singh", "Aashiqui 2"),
            row("Chaiyya Chaiyya", "Sukhwinder Singh", "Dil Se"),
        ])
        .unwrap();
        let index = LexicalIndex::build(catalog.items());
        let query = index.transform("Chaiyya Chaiyya Sukhwinder Singh Dil Se");
        let ranked = rank(&query, &index, 2);
        assert_eq!(ranked[0].0, 1);
        assert!(ranked[0].1 > ranked[1].1);
    }
}
