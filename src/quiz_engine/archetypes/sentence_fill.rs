//! Sentence-pattern fill: one correct word per slot, drawn uniformly from
//! that slot's bank. Regular runs show a trimmed bank (correct + up to three
//! sampled members) so large banks never appear verbatim; the boss variant
//! shows the full bank.

use std::collections::BTreeMap;

use crate::quiz_engine::content::SentencePattern;
use crate::quiz_engine::error::QuizError;
use crate::quiz_engine::helpers::{dedup_keep_order, extend_distinct};
use crate::quiz_engine::models::{BossPhase, FillQuestion, FillSlot, Question};
use crate::quiz_engine::rng::QuizRng;

fn draw_correct(
    rng: &mut QuizRng,
    pattern: &SentencePattern,
) -> Result<BTreeMap<String, String>, QuizError> {
    let mut correct = BTreeMap::new();
    for slot in &pattern.slots {
        let bank = pattern
            .word_bank
            .get(&slot.key)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| QuizError::EmptySlotPool {
                pattern_id: pattern.pattern_id.clone(),
                slot: slot.key.clone(),
            })?;
        let picked = bank[rng.next_index(bank.len())].clone();
        correct.insert(slot.key.clone(), picked);
    }
    Ok(correct)
}

fn slots_of(pattern: &SentencePattern) -> Vec<FillSlot> {
    pattern
        .slots
        .iter()
        .map(|s| FillSlot {
            key: s.key.clone(),
            label: s.label.clone(),
        })
        .collect()
}

fn knowledge_refs(pattern: &SentencePattern) -> Vec<String> {
    vec![
        format!("kp_sentence_pattern:{}", pattern.pattern_id),
        format!("kp_pattern_name:{}", pattern.name),
    ]
}

pub fn build_sentence_fill(
    rng: &mut QuizRng,
    pattern: &SentencePattern,
) -> Result<Question, QuizError> {
    // Draw + bank trimming interleave per slot, in declared slot order, so
    // RNG consumption is independent of the word-bank map ordering.
    let mut correct = BTreeMap::new();
    let mut word_bank = BTreeMap::new();
    for slot in &pattern.slots {
        let bank = pattern
            .word_bank
            .get(&slot.key)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| QuizError::EmptySlotPool {
                pattern_id: pattern.pattern_id.clone(),
                slot: slot.key.clone(),
            })?;
        let picked = bank[rng.next_index(bank.len())].clone();

        let mut candidates = vec![picked.clone()];
        extend_distinct(rng, &mut candidates, bank, 4);
        word_bank.insert(slot.key.clone(), rng.shuffle(&candidates));
        correct.insert(slot.key.clone(), picked);
    }

    Ok(Question::Fill(FillQuestion {
        question_id: String::new(),
        prompt: format!("用句型“{}”完成句子：", pattern.name),
        knowledge_refs: knowledge_refs(pattern),
        template: pattern.template.clone(),
        slots: slots_of(pattern),
        word_bank,
        correct,
        phase_id: None,
    }))
}

/// Boss finale: full word bank on display, persona-framed prompt.
pub fn build_boss_sentence_fill(
    rng: &mut QuizRng,
    pattern: &SentencePattern,
) -> Result<Question, QuizError> {
    let correct = draw_correct(rng, pattern)?;

    let word_bank: BTreeMap<String, Vec<String>> = pattern
        .word_bank
        .iter()
        .map(|(k, v)| (k.clone(), dedup_keep_order(v.iter().cloned())))
        .collect();

    Ok(Question::Fill(FillQuestion {
        question_id: String::new(),
        prompt: format!("幕后主使：用句型“{}”写出结案陈词：", pattern.name),
        knowledge_refs: knowledge_refs(pattern),
        template: pattern.template.clone(),
        slots: slots_of(pattern),
        word_bank,
        correct,
        phase_id: Some(BossPhase::Boss),
    }))
}
