//! Polyphone questions: which reading does this character take here?
//!
//! The choice set is exactly the item's own listed pronunciations — no
//! external distractor sourcing. One option is drawn uniformly as the
//! target; its context sentence (hints stripped) or example word frames the
//! prompt.

use crate::quiz_engine::content::PolyphoneItem;
use crate::quiz_engine::error::QuizError;
use crate::quiz_engine::helpers::strip_paren_hints;
use crate::quiz_engine::models::{
    BossPhase, ChoiceArchetype, ChoiceQuestion, Question, QuestionMeta,
};
use crate::quiz_engine::rng::QuizRng;

pub fn build_polyphone(rng: &mut QuizRng, item: &PolyphoneItem) -> Result<Question, QuizError> {
    build(rng, item, None, "")
}

/// Boss phase 2 variant, fronted by the minion persona.
pub fn build_boss_polyphone(
    rng: &mut QuizRng,
    item: &PolyphoneItem,
) -> Result<Question, QuizError> {
    build(rng, item, Some(BossPhase::Minion2), "伪证专家：")
}

fn build(
    rng: &mut QuizRng,
    item: &PolyphoneItem,
    phase_id: Option<BossPhase>,
    persona: &str,
) -> Result<Question, QuizError> {
    if item.options.len() < 2 {
        return Err(QuizError::MalformedItem {
            item_id: item.item_id.clone(),
            reason: "polyphone item needs at least two pronunciations",
        });
    }

    let picked = &item.options[rng.next_index(item.options.len())];
    let correct = picked.pinyin.clone();
    let example = picked.example.clone();

    let context = picked
        .sentence
        .as_deref()
        .map(|s| strip_paren_hints(s).trim().to_string())
        .filter(|s| !s.is_empty());

    let prompt = match &context {
        Some(sentence) => format!("{persona}在句子“{sentence}”里，“{}”读音是？", item.hanzi),
        None => format!("{persona}“{example}”里的“{}”读音是？", item.hanzi),
    };

    let all: Vec<String> = item.options.iter().map(|o| o.pinyin.clone()).collect();
    let choices = rng.shuffle(&all);

    let meta = QuestionMeta {
        hanzi: Some(item.hanzi.clone()),
        example: Some(example.clone()),
        source: phase_id.map(|_| "minion".to_string()),
        ..QuestionMeta::default()
    };

    Ok(Question::Choice(ChoiceQuestion {
        question_id: String::new(),
        archetype: ChoiceArchetype::McqPolyphone,
        prompt,
        knowledge_refs: vec![format!("kp_poly:{}:{correct}:{example}", item.hanzi)],
        choices,
        correct_choice: correct,
        phase_id,
        meta,
    }))
}
