//! Player-facing projection of a run.
//!
//! Runs carry their answer keys so the server can regrade them at any time;
//! the client must never see those. This module builds the JSON payload
//! actually sent to the player, with `correctChoice` / `correct` stripped and
//! only display material kept.

use serde_json::{json, Map, Value};

use crate::quiz_engine::models::{ChoiceQuestion, FillQuestion, Question, Run};

/// Serialize one choice question without its answer key.
fn choice_to_client(q: &ChoiceQuestion) -> Value {
    let mut obj = Map::new();
    obj.insert("questionId".to_string(), json!(q.question_id));
    obj.insert("type".to_string(), json!(q.archetype.wire_name()));
    obj.insert("prompt".to_string(), json!(q.prompt));
    obj.insert("knowledgeRefs".to_string(), json!(q.knowledge_refs));
    obj.insert("choices".to_string(), json!(q.choices));
    if let Some(phase) = q.phase_id {
        obj.insert("phaseId".to_string(), json!(phase));
    }
    if !q.meta.is_empty() {
        obj.insert("meta".to_string(), json!(q.meta));
    }
    Value::Object(obj)
}

/// Serialize one fill question: the template, slots, and word banks are the
/// puzzle itself, the `correct` map stays server-side.
fn fill_to_client(q: &FillQuestion) -> Value {
    let mut obj = Map::new();
    obj.insert("questionId".to_string(), json!(q.question_id));
    obj.insert("type".to_string(), json!("sentence_pattern_fill"));
    obj.insert("prompt".to_string(), json!(q.prompt));
    obj.insert("knowledgeRefs".to_string(), json!(q.knowledge_refs));
    obj.insert("template".to_string(), json!(q.template));
    obj.insert("slots".to_string(), json!(q.slots));
    obj.insert("wordBank".to_string(), json!(q.word_bank));
    if let Some(phase) = q.phase_id {
        obj.insert("phaseId".to_string(), json!(phase));
    }
    Value::Object(obj)
}

pub fn question_to_client(q: &Question) -> Value {
    match q {
        Question::Choice(q) => choice_to_client(q),
        Question::Fill(q) => fill_to_client(q),
    }
}

/// The full client payload for a freshly started run.
pub fn run_to_client_json(run: &Run) -> Value {
    json!({
        "runId": run.run_id,
        "unitId": run.unit_id,
        "seed": run.seed,
        "questions": run.questions.iter().map(question_to_client).collect::<Vec<Value>>(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::quiz_engine::models::{BossPhase, ChoiceArchetype, FillSlot, QuestionMeta};

    fn sample_run() -> Run {
        let mut bank = BTreeMap::new();
        bank.insert("a".to_string(), vec!["狐狸".to_string(), "小马".to_string()]);
        let mut correct = BTreeMap::new();
        correct.insert("a".to_string(), "狐狸".to_string());

        Run {
            run_id: "r1".to_string(),
            unit_id: "u1".to_string(),
            seed: 42,
            questions: vec![
                Question::Choice(ChoiceQuestion {
                    question_id: "r1:1".to_string(),
                    archetype: ChoiceArchetype::McqPinyin,
                    prompt: "“狐”的拼音是？".to_string(),
                    knowledge_refs: vec!["kp_char:狐".to_string()],
                    choices: vec!["hú".to_string(), "mǎ".to_string()],
                    correct_choice: "hú".to_string(),
                    phase_id: Some(BossPhase::Minion1),
                    meta: QuestionMeta {
                        hanzi: Some("狐".to_string()),
                        ..QuestionMeta::default()
                    },
                }),
                Question::Fill(FillQuestion {
                    question_id: "r1:2".to_string(),
                    prompt: "用句型完成句子：".to_string(),
                    knowledge_refs: vec!["kp_sentence_pattern:p1".to_string()],
                    template: "{a}在跑。".to_string(),
                    slots: vec![FillSlot {
                        key: "a".to_string(),
                        label: "谁".to_string(),
                    }],
                    word_bank: bank,
                    correct,
                    phase_id: None,
                }),
            ],
        }
    }

    #[test]
    fn projection_never_contains_answer_keys() {
        let payload = run_to_client_json(&sample_run());
        let text = payload.to_string();
        assert!(!text.contains("correctChoice"));
        assert!(!text.contains("\"correct\""));
    }

    #[test]
    fn projection_keeps_display_material() {
        let payload = run_to_client_json(&sample_run());
        let questions = payload["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 2);

        assert_eq!(questions[0]["type"], "mcq_pinyin");
        assert_eq!(questions[0]["phaseId"], "minion1");
        assert_eq!(questions[0]["meta"]["hanzi"], "狐");
        assert_eq!(questions[0]["choices"].as_array().unwrap().len(), 2);

        assert_eq!(questions[1]["type"], "sentence_pattern_fill");
        assert_eq!(questions[1]["template"], "{a}在跑。");
        assert_eq!(questions[1]["wordBank"]["a"][0], "狐狸");
        assert_eq!(questions[1]["slots"][0]["key"], "a");
        assert!(questions[1].get("correct").is_none());
    }
}
