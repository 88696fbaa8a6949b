//! Shared helpers used across the archetype builders.
//!
//! Every builder assembles the same pieces: dedup a candidate pool, sample
//! distinct distractors, shuffle the final choice set, format prompt strings.
//! These helpers centralise that work so archetype files hold question logic
//! only.
//!
//! ## RNG ordering
//!
//! Sampling draws from the RNG until a set reaches its target size
//! (rejection via set accumulation), so the exact number of draws depends on
//! collisions. That is fine — determinism only requires that the draw
//! sequence is a pure function of the seed, which it is. Targets are capped
//! at the pool's distinct-value count so exhausted pools terminate instead
//! of spinning.

use std::collections::HashSet;

use crate::quiz_engine::content::{CharItem, SynAntItem};
use crate::quiz_engine::rng::QuizRng;

/// Deduplicate, keeping first-occurrence order. Pool order feeds `next_index`
/// draws, so it must be stable across calls with the same content.
pub fn dedup_keep_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

/// Pick `count` distinct values from `pool`. If the pool holds fewer distinct
/// values than requested, all of them are returned (callers render fewer
/// choices rather than failing).
pub fn pick_distinct(rng: &mut QuizRng, pool: &[String], count: usize) -> Vec<String> {
    let uniq = dedup_keep_order(pool.iter().cloned());
    if uniq.len() <= count {
        return uniq;
    }

    let mut picked = Vec::with_capacity(count);
    let mut seen = HashSet::new();
    while picked.len() < count {
        let candidate = &uniq[rng.next_index(uniq.len())];
        if seen.insert(candidate.clone()) {
            picked.push(candidate.clone());
        }
    }
    picked
}

/// Grow `picked` with distinct draws from `pool` until it reaches `target`
/// (or the pool cannot supply any more distinct values).
pub fn extend_distinct(rng: &mut QuizRng, picked: &mut Vec<String>, pool: &[String], target: usize) {
    if pool.is_empty() {
        return;
    }

    let mut seen: HashSet<String> = picked.iter().cloned().collect();
    let fresh = pool
        .iter()
        .filter(|w| !seen.contains(*w))
        .collect::<HashSet<_>>()
        .len();
    let target = target.min(picked.len() + fresh);

    while picked.len() < target {
        let candidate = &pool[rng.next_index(pool.len())];
        if seen.insert(candidate.clone()) {
            picked.push(candidate.clone());
        }
    }
}

/// Render a `{slotKey}` template with the given values, substituting `____`
/// for any slot that has no value.
pub fn render_template<'a, F>(template: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                out.push_str(lookup(key).unwrap_or("____"));
                rest = &after[close + 1..];
            }
            None => {
                // Unbalanced brace: keep the remainder verbatim.
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Remove parenthesised hints, both ASCII `(...)` and full-width `（…）`.
/// Polyphone context sentences carry in-line reading hints that would give
/// the answer away.
pub fn strip_paren_hints(input: &str) -> String {
    strip_delimited(&strip_delimited(input, '(', ')'), '（', '）')
}

fn strip_delimited(input: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut depth = 0usize;
    for c in input.chars() {
        if c == open {
            depth += 1;
        } else if c == close && depth > 0 {
            depth -= 1;
        } else if depth == 0 {
            out.push(c);
        }
    }
    out
}

/// Punctuation that is never blanked out of a poem line.
pub fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '，' | '。' | '！' | '？' | '、' | '；' | '：' | ',' | '.' | '!' | '?' | ';' | ':'
    )
}

/// Collapse whitespace and clip to `max_chars`, appending an ellipsis when
/// clipped. Used for passage excerpts in explanations.
pub fn truncate_excerpt(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let clipped: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{clipped}…")
}

/// Unit-wide candidate-word pool for syn/ant distractors: every synonym /
/// antonym / prompt word, then every character-associated word, deduped in
/// that order.
pub fn word_candidates(chars: &[&CharItem], syn_ant: &[&SynAntItem]) -> Vec<String> {
    let mut words = Vec::new();
    for s in syn_ant {
        words.push(s.word.clone());
        if let Some(syn) = &s.synonym {
            words.push(syn.clone());
        }
        if let Some(ant) = &s.antonym {
            words.push(ant.clone());
        }
    }
    for c in chars {
        for w in &c.words {
            words.push(w.clone());
        }
    }
    dedup_keep_order(words.into_iter().filter(|w| !w.is_empty()))
}
