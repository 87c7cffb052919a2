/**
 * Search Index
 *
 * In-process inverted index over composition titles and bodies,
 * supporting exact (stemmed) and fuzzy (edit-distance tolerant) term
 * queries scoped by owner.
 *
 * # Layout
 *
 * Each indexed entry contributes postings under both the stemmed term
 * and the folded surface form of every token, so exact search matches
 * stems ("running" finds "run") while fuzzy search measures edit
 * distance against surface forms ("internationl" finds
 * "international"). Stems are what an English analyzer matches on;
 * surface forms are what typo distances are meaningful against.
 *
 * # Concurrency
 *
 * A single `parking_lot::RwLock` guards the index. Queries take the
 * read lock, mutations the write lock; the index is shared across
 * workers via `Arc` inside `AppState`.
 */

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use crate::pagination::{Page, PageQuery};
use crate::search::analyzer::analyze;

/// Mirror of a composition's current committed fields.
#[derive(Debug, Clone, Serialize)]
pub struct IndexEntry {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
}

/// A scored search hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub entry: IndexEntry,
    pub score: f32,
}

#[derive(Default)]
struct IndexInner {
    /// Current entries by composition id.
    docs: HashMap<Uuid, IndexEntry>,
    /// term -> (doc id -> term frequency). Terms include both stemmed
    /// and surface forms.
    postings: HashMap<String, HashMap<Uuid, f32>>,
}

impl IndexInner {
    fn remove_postings(&mut self, id: Uuid) {
        self.postings.retain(|_, docs| {
            docs.remove(&id);
            !docs.is_empty()
        });
    }

    fn add_postings(&mut self, id: Uuid, text: &str, weight: f32) {
        for token in analyze(text) {
            *self
                .postings
                .entry(token.stemmed.clone())
                .or_default()
                .entry(id)
                .or_insert(0.0) += weight;

            if token.surface != token.stemmed {
                *self
                    .postings
                    .entry(token.surface)
                    .or_default()
                    .entry(id)
                    .or_insert(0.0) += weight;
            }
        }
    }
}

/// Shared inverted index. Construct once at startup and clone the
/// `Arc` into every consumer.
#[derive(Default)]
pub struct SearchIndex {
    inner: RwLock<IndexInner>,
}

/// Title matches count double; a hit in the title is a stronger signal
/// than one in the body.
const TITLE_WEIGHT: f32 = 2.0;
const CONTENT_WEIGHT: f32 = 1.0;

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Old postings for the id are removed
    /// first, so repeated upserts converge on the latest fields.
    pub fn upsert(&self, entry: IndexEntry) {
        let mut inner = self.inner.write();
        inner.remove_postings(entry.id);
        inner.add_postings(entry.id, &entry.title, TITLE_WEIGHT);
        inner.add_postings(entry.id, &entry.content, CONTENT_WEIGHT);
        inner.docs.insert(entry.id, entry);
    }

    /// Remove an entry and all its postings. Unknown ids are a no-op.
    pub fn delete_by_id(&self, id: Uuid) {
        let mut inner = self.inner.write();
        if inner.docs.remove(&id).is_some() {
            inner.remove_postings(id);
        }
    }

    /// Drop every entry. Used by rebuild before replaying the primary
    /// store.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.docs.clear();
        inner.postings.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact term search: any analyzed (stemmed) query term occurring
    /// in the title or content. Relevance is summed term frequency,
    /// sorted descending with id as the stable tie-break.
    pub fn exact_search(&self, query: &str, owner_id: Option<Uuid>, page: PageQuery) -> Page<SearchHit> {
        let inner = self.inner.read();
        let mut scores: HashMap<Uuid, f32> = HashMap::new();

        for token in analyze(query) {
            if let Some(docs) = inner.postings.get(&token.stemmed) {
                for (id, tf) in docs {
                    *scores.entry(*id).or_insert(0.0) += tf;
                }
            }
        }

        Self::collect_hits(&inner, scores, owner_id, page)
    }

    /// Fuzzy term search: each query term matches index terms within
    /// its automatic edit budget (0 edits for 1-2 chars, 1 for 3-5,
    /// 2 for 6+). At least one term must match. Closer matches score
    /// higher.
    pub fn fuzzy_search(&self, query: &str, owner_id: Option<Uuid>, page: PageQuery) -> Page<SearchHit> {
        let inner = self.inner.read();
        let mut scores: HashMap<Uuid, f32> = HashMap::new();

        for token in analyze(query) {
            let budget = max_edits(token.surface.chars().count());

            for (term, docs) in &inner.postings {
                let distance = if budget == 0 {
                    (*term == token.surface || *term == token.stemmed).then_some(0)
                } else {
                    within_edit_distance(&token.surface, term, budget)
                };
                let Some(distance) = distance else {
                    continue;
                };

                let discount = 1.0 / (1.0 + distance as f32);
                for (id, tf) in docs {
                    *scores.entry(*id).or_insert(0.0) += tf * discount;
                }
            }
        }

        Self::collect_hits(&inner, scores, owner_id, page)
    }

    fn collect_hits(
        inner: &IndexInner,
        scores: HashMap<Uuid, f32>,
        owner_id: Option<Uuid>,
        page: PageQuery,
    ) -> Page<SearchHit> {
        let mut hits: Vec<SearchHit> = scores
            .into_iter()
            .filter_map(|(id, score)| {
                let entry = inner.docs.get(&id)?;
                if let Some(owner) = owner_id {
                    if entry.owner_id != owner {
                        return None;
                    }
                }
                Some(SearchHit {
                    entry: entry.clone(),
                    score,
                })
            })
            .collect();

        // Score descending, id ascending for a stable order.
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.entry.id.cmp(&b.entry.id))
        });

        Page::from_sorted(hits, page)
    }
}

/// Automatic per-term edit budget scaled by term length: 0 edits for
/// 1-2 character terms, 1 for 3-5, 2 for 6+.
pub fn max_edits(term_len: usize) -> u32 {
    match term_len {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    }
}

/// Levenshtein distance between `a` and `b`, bounded by `max`.
///
/// Returns `Some(distance)` when the strings are within `max` edits,
/// `None` otherwise. Bails out early once every cell of a row exceeds
/// the bound.
pub fn within_edit_distance(a: &str, b: &str, max: u32) -> Option<u32> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let max = max as usize;

    if a.len().abs_diff(b.len()) > max {
        return None;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];

        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
            row_min = row_min.min(curr[j + 1]);
        }

        if row_min > max {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[b.len()];
    (distance <= max).then_some(distance as u32)
}
