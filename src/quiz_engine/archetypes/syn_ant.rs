//! Synonym / antonym questions.
//!
//! The correct choice is whichever relation the item declares. When the item
//! carries both, the paired opposite is preferred as a distractor — it is
//! the most instructive wrong answer — before filling to four choices from
//! the unit-wide word pool.

use crate::quiz_engine::content::SynAntItem;
use crate::quiz_engine::error::QuizError;
use crate::quiz_engine::helpers::extend_distinct;
use crate::quiz_engine::models::{ChoiceArchetype, ChoiceQuestion, Question, QuestionMeta};
use crate::quiz_engine::rng::QuizRng;

pub fn build_syn_ant(
    rng: &mut QuizRng,
    item: &SynAntItem,
    word_candidates: &[String],
) -> Result<Question, QuizError> {
    let correct = item
        .synonym
        .clone()
        .or_else(|| item.antonym.clone())
        .ok_or_else(|| QuizError::MalformedItem {
            item_id: item.item_id.clone(),
            reason: "syn_ant item has neither synonym nor antonym",
        })?;

    let is_synonym = item.synonym.is_some();
    let prompt = if is_synonym {
        format!("“{}”的近义词是？", item.word)
    } else {
        format!("“{}”的反义词是？", item.word)
    };

    let mut picked = vec![correct.clone()];
    let paired = if is_synonym { &item.antonym } else { &item.synonym };
    if let Some(p) = paired {
        if *p != correct {
            picked.push(p.clone());
        }
    }

    let pool: Vec<String> = word_candidates
        .iter()
        .filter(|w| **w != correct && **w != item.word)
        .cloned()
        .collect();
    extend_distinct(rng, &mut picked, &pool, 4);

    let choices = rng.shuffle(&picked);

    let knowledge_refs = if is_synonym {
        vec![
            format!("kp_syn:{}~{}", item.word, correct),
            format!("kp_word:{}", item.word),
        ]
    } else {
        vec![
            format!("kp_ant:{}!{}", item.word, correct),
            format!("kp_word:{}", item.word),
        ]
    };

    Ok(Question::Choice(ChoiceQuestion {
        question_id: String::new(),
        archetype: ChoiceArchetype::McqSynAnt,
        prompt,
        knowledge_refs,
        choices,
        correct_choice: correct,
        phase_id: None,
        meta: QuestionMeta {
            word: Some(item.word.clone()),
            ..QuestionMeta::default()
        },
    }))
}
