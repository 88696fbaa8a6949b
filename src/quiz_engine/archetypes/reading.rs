//! Reading comprehension: lift a passage's embedded MCQ or true/false
//! sub-question into a boss question, keeping a pointer back to the passage
//! so the explainer can quote it.

use crate::quiz_engine::content::{Passage, PassageQuestion};
use crate::quiz_engine::models::{
    BossPhase, ChoiceArchetype, ChoiceQuestion, Question, QuestionMeta,
};
use crate::quiz_engine::rng::QuizRng;

pub const TRUE_LABEL: &str = "对";
pub const FALSE_LABEL: &str = "错";

pub fn build_reading(
    rng: &mut QuizRng,
    passage: &Passage,
    question: &PassageQuestion,
    phase_id: BossPhase,
) -> Question {
    let meta = QuestionMeta {
        title: Some(passage.title.clone()),
        passage_id: Some(passage.passage_id.clone()),
        source: Some("reading".to_string()),
        ..QuestionMeta::default()
    };

    match question {
        PassageQuestion::Mcq(mcq) => Question::Choice(ChoiceQuestion {
            question_id: String::new(),
            archetype: ChoiceArchetype::ReadingMcq,
            prompt: format!("幕后主使：{}", mcq.prompt),
            knowledge_refs: vec![format!(
                "kp_reading:{}:{}",
                passage.passage_id, mcq.question_id
            )],
            choices: rng.shuffle(&mcq.choices),
            correct_choice: mcq.correct_choice.clone(),
            phase_id: Some(phase_id),
            meta,
        }),
        PassageQuestion::TrueFalse(tf) => Question::Choice(ChoiceQuestion {
            question_id: String::new(),
            archetype: ChoiceArchetype::ReadingTrueFalse,
            prompt: format!("幕后主使：{}", tf.prompt),
            knowledge_refs: vec![format!(
                "kp_reading:{}:{}",
                passage.passage_id, tf.question_id
            )],
            choices: vec![TRUE_LABEL.to_string(), FALSE_LABEL.to_string()],
            correct_choice: if tf.answer { TRUE_LABEL } else { FALSE_LABEL }.to_string(),
            phase_id: Some(phase_id),
            meta,
        }),
    }
}
