//! Confusing-words disambiguation: the item authors its own prompt and
//! declared distractors; regular runs top the choice set up from a broader
//! word pool, boss runs use only what the item declares.

use crate::quiz_engine::content::ConfusingItem;
use crate::quiz_engine::helpers::{dedup_keep_order, extend_distinct};
use crate::quiz_engine::models::{
    BossPhase, ChoiceArchetype, ChoiceQuestion, Question, QuestionMeta,
};
use crate::quiz_engine::rng::QuizRng;

pub fn build_confusing(
    rng: &mut QuizRng,
    item: &ConfusingItem,
    distractor_pool: &[String],
    choice_count: usize,
) -> Question {
    let mut picked = dedup_keep_order(
        std::iter::once(item.correct.clone()).chain(item.distractors.iter().cloned()),
    );
    extend_distinct(rng, &mut picked, distractor_pool, choice_count);

    let choices = rng.shuffle(&picked);

    Question::Choice(ChoiceQuestion {
        question_id: String::new(),
        archetype: ChoiceArchetype::McqConfusing,
        prompt: item.prompt.clone(),
        knowledge_refs: vec![format!("kp_confusing:{}", item.item_id)],
        choices,
        correct_choice: item.correct.clone(),
        phase_id: None,
        meta: meta_for(item, None),
    })
}

/// Boss phase 2 variant: only the item-declared distractors, minion persona.
pub fn build_boss_confusing(rng: &mut QuizRng, item: &ConfusingItem) -> Question {
    let picked = dedup_keep_order(
        std::iter::once(item.correct.clone()).chain(item.distractors.iter().cloned()),
    );
    let choices = rng.shuffle(&picked);

    Question::Choice(ChoiceQuestion {
        question_id: String::new(),
        archetype: ChoiceArchetype::McqConfusing,
        prompt: format!("伪证专家：{}", item.prompt),
        knowledge_refs: vec![format!("kp_confusing:{}", item.item_id)],
        choices,
        correct_choice: item.correct.clone(),
        phase_id: Some(BossPhase::Minion2),
        meta: meta_for(item, Some("minion")),
    })
}

fn meta_for(item: &ConfusingItem, source: Option<&str>) -> QuestionMeta {
    QuestionMeta {
        rule: item.rule.clone(),
        examples: item.examples.clone(),
        source: source.map(str::to_string),
        ..QuestionMeta::default()
    }
}
