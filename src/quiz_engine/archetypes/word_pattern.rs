//! Word-structure matching: which word fits this pattern (AABB, ABAB, …)?
//! The correct example comes from the target pattern; distractors come from
//! every other pattern's examples.

use crate::quiz_engine::content::WordPattern;
use crate::quiz_engine::error::QuizError;
use crate::quiz_engine::helpers::extend_distinct;
use crate::quiz_engine::models::{ChoiceArchetype, ChoiceQuestion, Question, QuestionMeta};
use crate::quiz_engine::rng::QuizRng;

pub fn build_word_pattern_match(
    rng: &mut QuizRng,
    pattern: &WordPattern,
    all_patterns: &[&WordPattern],
    choice_count: usize,
) -> Result<Question, QuizError> {
    if pattern.examples.is_empty() {
        return Err(QuizError::MalformedItem {
            item_id: pattern.pattern_id.clone(),
            reason: "word pattern has no example words",
        });
    }
    let correct = pattern.examples[rng.next_index(pattern.examples.len())].clone();

    let pool: Vec<String> = all_patterns
        .iter()
        .flat_map(|p| p.examples.iter())
        .filter(|w| !w.trim().is_empty() && **w != correct)
        .cloned()
        .collect();

    let mut picked = vec![correct.clone()];
    extend_distinct(rng, &mut picked, &pool, choice_count);
    let choices = rng.shuffle(&picked);

    Ok(Question::Choice(ChoiceQuestion {
        question_id: String::new(),
        archetype: ChoiceArchetype::McqWordPatternMatch,
        prompt: format!("下面哪个词语属于“{}”结构？", pattern.pattern_type),
        knowledge_refs: vec![
            format!("kp_word_pattern:{}", pattern.pattern_id),
            format!("kp_word_pattern_type:{}", pattern.pattern_type),
        ],
        choices,
        correct_choice: correct,
        phase_id: None,
        meta: QuestionMeta {
            pattern_type: Some(pattern.pattern_type.clone()),
            ..QuestionMeta::default()
        },
    }))
}
