//! Character recall: pinyin-from-character and character-from-pinyin.
//!
//! Distractors come from the other characters in the unit, never the
//! target's own value. Regular runs unique-sample `choice_count - 1` of
//! them; boss runs shuffle the pool and take the first three.

use crate::quiz_engine::content::CharItem;
use crate::quiz_engine::helpers::{dedup_keep_order, pick_distinct};
use crate::quiz_engine::models::{
    BossPhase, ChoiceArchetype, ChoiceQuestion, Question, QuestionMeta,
};
use crate::quiz_engine::rng::QuizRng;

/// "What is the pinyin of this character?"
pub fn build_pinyin(
    rng: &mut QuizRng,
    item: &CharItem,
    all_chars: &[&CharItem],
    choice_count: usize,
) -> Question {
    let correct = item.pinyin.clone();
    let pool: Vec<String> = all_chars
        .iter()
        .map(|c| c.pinyin.clone())
        .filter(|p| *p != correct)
        .collect();
    let distractors = pick_distinct(rng, &pool, choice_count.saturating_sub(1));

    let mut choices = vec![correct.clone()];
    choices.extend(distractors);
    let choices = rng.shuffle(&choices);

    Question::Choice(ChoiceQuestion {
        question_id: String::new(),
        archetype: ChoiceArchetype::McqPinyin,
        prompt: format!("“{}”的拼音是？", item.hanzi),
        knowledge_refs: vec![format!("kp_char:{}", item.hanzi)],
        choices,
        correct_choice: correct,
        phase_id: None,
        meta: QuestionMeta {
            hanzi: Some(item.hanzi.clone()),
            ..QuestionMeta::default()
        },
    })
}

/// "Which character matches this pinyin?"
pub fn build_hanzi_by_pinyin(
    rng: &mut QuizRng,
    item: &CharItem,
    all_chars: &[&CharItem],
    choice_count: usize,
) -> Question {
    let correct = item.hanzi.clone();
    let pool: Vec<String> = all_chars
        .iter()
        .map(|c| c.hanzi.clone())
        .filter(|h| *h != correct)
        .collect();
    let distractors = pick_distinct(rng, &pool, choice_count.saturating_sub(1));

    let mut choices = vec![correct.clone()];
    choices.extend(distractors);
    let choices = rng.shuffle(&choices);

    Question::Choice(ChoiceQuestion {
        question_id: String::new(),
        archetype: ChoiceArchetype::McqHanziByPinyin,
        prompt: format!("拼音“{}”对应的汉字是？", item.pinyin),
        knowledge_refs: vec![format!("kp_char:{}", item.hanzi)],
        choices,
        correct_choice: correct,
        phase_id: None,
        meta: QuestionMeta {
            hanzi: Some(item.hanzi.clone()),
            pinyin: Some(item.pinyin.clone()),
            ..QuestionMeta::default()
        },
    })
}

/// Boss phase 1 pinyin question, fronted by the minion persona.
pub fn build_boss_pinyin(rng: &mut QuizRng, item: &CharItem, all_chars: &[&CharItem]) -> Question {
    let correct = item.pinyin.clone();
    let pool = dedup_keep_order(
        all_chars
            .iter()
            .map(|c| c.pinyin.clone())
            .filter(|p| *p != correct),
    );
    let distractors: Vec<String> = rng.shuffle(&pool).into_iter().take(3).collect();

    let mut choices = vec![correct.clone()];
    choices.extend(distractors);
    let choices = rng.shuffle(&choices);

    Question::Choice(ChoiceQuestion {
        question_id: String::new(),
        archetype: ChoiceArchetype::McqPinyin,
        prompt: format!("证物搬运工：标签“{}”读音是？", item.hanzi),
        knowledge_refs: vec![format!("kp_char:{}", item.hanzi)],
        choices,
        correct_choice: correct,
        phase_id: Some(BossPhase::Minion1),
        meta: QuestionMeta {
            hanzi: Some(item.hanzi.clone()),
            source: Some("minion".to_string()),
            ..QuestionMeta::default()
        },
    })
}
