//! Coverage-based license text matching.
//!
//! Documents and catalog texts are reduced to lower-case word tokens and
//! compared through overlapping word shingles. A catalog entry matches when
//! nearly all of its own text shows up in the document; the document's
//! coverage is the share of its tokens claimed by accepted matches.

use std::collections::HashMap;

use serde::Serialize;
use tracing::trace;

/// Words per shingle.
pub const SHINGLE_LEN: usize = 5;

/// Minimum share of a catalog text, in percent, that must appear in a
/// document for that entry to count as a match.
pub const MIN_MATCH_PERCENT: f64 = 90.0;

/// Lines with more tokens than this are never treated as copyright notices.
pub const MAX_NOTICE_TOKENS: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    /// Catalog identifier of the matched text.
    pub id: String,
    /// Percentage of the catalog text found in the document.
    pub percent: f64,
    /// First document token claimed by the match.
    pub start: usize,
    /// One past the last document token claimed by the match.
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Coverage {
    /// Percentage of the document recognized as license text.
    pub percent: f64,
    /// Longest stretch of consecutive document tokens no match claims.
    pub unmatched_run: usize,
    pub matches: Vec<Match>,
}

/// Splits `text` into lower-case ASCII word tokens, dropping copyright
/// notices.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in text.lines() {
        let body = strip_comment_markers(line);
        let words: Vec<String> = body
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();

        if is_copyright_notice(body, &words) {
            continue;
        }
        tokens.extend(words);
    }
    tokens
}

/// A notice opens with `copyright`, `©` or `(c)`, carries a year or the
/// `(c)` mark, and is too short to state terms of its own.
fn is_copyright_notice(body: &str, words: &[String]) -> bool {
    let Some(first) = words.first() else {
        return false;
    };
    if words.len() > MAX_NOTICE_TOKENS {
        return false;
    }
    let lower = body.to_ascii_lowercase();
    let opens = first == "copyright" || lower.starts_with('©') || lower.starts_with("(c)");
    let marked = lower.contains("(c)") || lower.contains('©');
    opens && (marked || words.iter().any(|w| is_year(w)))
}

fn is_year(word: &str) -> bool {
    matches!(word, "year" | "yyyy") || (word.len() == 4 && word.bytes().all(|b| b.is_ascii_digit()))
}

fn strip_comment_markers(line: &str) -> &str {
    let mut rest = line.trim_start();
    loop {
        let stripped = rest
            .strip_prefix("//")
            .or_else(|| rest.strip_prefix("/*"))
            .or_else(|| rest.strip_prefix('#'))
            .or_else(|| rest.strip_prefix('*'));
        match stripped {
            Some(next) => rest = next.trim_start(),
            None => return rest,
        }
    }
}

fn shingle_keys(tokens: &[String]) -> Vec<String> {
    if tokens.len() < SHINGLE_LEN {
        return Vec::new();
    }
    tokens.windows(SHINGLE_LEN).map(|w| w.join(" ")).collect()
}

/// One indexed catalog text.
#[derive(Debug, Clone)]
pub struct Template {
    id: String,
    token_count: usize,
    shingles: HashMap<String, Vec<usize>>,
}

impl Template {
    /// Indexes `text` under `id`. Returns `None` if the text is too short to
    /// form a single shingle.
    pub fn new(id: impl Into<String>, text: &str) -> Option<Self> {
        let tokens = tokenize(text);
        let keys = shingle_keys(&tokens);
        if keys.is_empty() {
            return None;
        }

        let mut shingles: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, key) in keys.into_iter().enumerate() {
            shingles.entry(key).or_default().push(pos);
        }

        Some(Self {
            id: id.into(),
            token_count: tokens.len(),
            shingles,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn compare(&self, doc_keys: &[String], doc_len: usize) -> Option<Candidate<'_>> {
        let mut doc_hit = vec![false; doc_len];
        let mut template_hit = vec![false; self.token_count];

        for (i, key) in doc_keys.iter().enumerate() {
            let Some(positions) = self.shingles.get(key) else {
                continue;
            };
            doc_hit[i..i + SHINGLE_LEN].fill(true);
            for &pos in positions {
                template_hit[pos..pos + SHINGLE_LEN].fill(true);
            }
        }

        let found = template_hit.iter().filter(|hit| **hit).count();
        let percent = 100.0 * found as f64 / self.token_count as f64;
        if found == 0 || percent < MIN_MATCH_PERCENT {
            return None;
        }

        let hits: Vec<usize> = doc_hit
            .iter()
            .enumerate()
            .filter_map(|(i, hit)| hit.then_some(i))
            .collect();
        Some(Candidate {
            id: &self.id,
            percent,
            hits,
        })
    }
}

struct Candidate<'a> {
    id: &'a str,
    percent: f64,
    hits: Vec<usize>,
}

/// The matching engine over a fixed set of templates.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    templates: Vec<Template>,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a catalog text. Returns `false` if the text was too short to index.
    pub fn add(&mut self, id: impl Into<String>, text: &str) -> bool {
        match Template::new(id, text) {
            Some(template) => {
                self.templates.push(template);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(Template::id)
    }

    pub fn scan(&self, text: &str) -> Coverage {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Coverage::default();
        }
        let doc_keys = shingle_keys(&tokens);

        let mut candidates: Vec<Candidate<'_>> = self
            .templates
            .iter()
            .filter_map(|t| t.compare(&doc_keys, tokens.len()))
            .collect();

        // Larger matches first; a full copy of a shorter text wins ties.
        candidates.sort_by(|a, b| {
            b.hits
                .len()
                .cmp(&a.hits.len())
                .then_with(|| b.percent.total_cmp(&a.percent))
                .then_with(|| a.id.cmp(b.id))
        });

        let mut claimed = vec![false; tokens.len()];
        let mut matches = Vec::new();
        for candidate in candidates {
            let overlap = candidate.hits.iter().filter(|&&i| claimed[i]).count();
            if overlap * 2 > candidate.hits.len() {
                trace!(id = candidate.id, "dropping match subsumed by a larger one");
                continue;
            }
            for &i in &candidate.hits {
                claimed[i] = true;
            }
            let start = candidate.hits.first().copied().unwrap_or(0);
            let end = candidate.hits.last().map_or(0, |last| last + 1);
            matches.push(Match {
                id: candidate.id.to_string(),
                percent: candidate.percent,
                start,
                end,
            });
        }
        matches.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

        let covered = claimed.iter().filter(|c| **c).count();
        let unmatched_run = claimed
            .split(|c| *c)
            .map(<[bool]>::len)
            .max()
            .unwrap_or(0);
        Coverage {
            percent: 100.0 * covered as f64 / tokens.len() as f64,
            unmatched_run,
            matches,
        }
    }
}
