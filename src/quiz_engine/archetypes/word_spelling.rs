//! Word spelling: match a pinyin reading to the word it spells, with
//! distractors drawn from the rest of the unit's word list.

use crate::quiz_engine::content::WordEntry;
use crate::quiz_engine::helpers::{dedup_keep_order, extend_distinct};
use crate::quiz_engine::models::{
    BossPhase, ChoiceArchetype, ChoiceQuestion, Question, QuestionMeta,
};
use crate::quiz_engine::rng::QuizRng;

fn prompt_for(item: &WordEntry, persona: &str) -> String {
    match &item.pinyin {
        Some(py) => format!("{persona}拼音“{py}”对应的词语是？"),
        None => format!("{persona}选出正确的词语："),
    }
}

pub fn build_word_spelling(
    rng: &mut QuizRng,
    item: &WordEntry,
    all_words: &[&WordEntry],
    choice_count: usize,
) -> Question {
    let correct = item.word.clone();
    let pool = dedup_keep_order(
        all_words
            .iter()
            .map(|w| w.word.clone())
            .filter(|w| *w != correct),
    );

    let mut picked = vec![correct.clone()];
    extend_distinct(rng, &mut picked, &pool, choice_count);
    let choices = rng.shuffle(&picked);

    Question::Choice(ChoiceQuestion {
        question_id: String::new(),
        archetype: ChoiceArchetype::McqWordSpelling,
        prompt: prompt_for(item, ""),
        knowledge_refs: vec![format!("kp_word:{}", item.word)],
        choices,
        correct_choice: correct,
        phase_id: None,
        meta: QuestionMeta {
            pinyin: item.pinyin.clone(),
            ..QuestionMeta::default()
        },
    })
}

/// Boss phase 1 variant: shuffle-then-take distractors, minion persona.
pub fn build_boss_word_spelling(
    rng: &mut QuizRng,
    item: &WordEntry,
    all_words: &[&WordEntry],
) -> Question {
    let correct = item.word.clone();
    let pool = dedup_keep_order(
        all_words
            .iter()
            .map(|w| w.word.clone())
            .filter(|w| *w != correct),
    );
    let distractors: Vec<String> = rng.shuffle(&pool).into_iter().take(3).collect();

    let mut choices = vec![correct.clone()];
    choices.extend(distractors);
    let choices = rng.shuffle(&choices);

    Question::Choice(ChoiceQuestion {
        question_id: String::new(),
        archetype: ChoiceArchetype::McqWordSpelling,
        prompt: prompt_for(item, "证物搬运工："),
        knowledge_refs: vec![format!("kp_word:{}", item.word)],
        choices,
        correct_choice: correct,
        phase_id: Some(BossPhase::Minion1),
        meta: QuestionMeta {
            pinyin: item.pinyin.clone(),
            source: Some("minion".to_string()),
            ..QuestionMeta::default()
        },
    })
}
