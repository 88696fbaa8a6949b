//! Grading: pure, total, never fails.
//!
//! A wrong, missing, or malformed answer is an expected runtime condition —
//! it grades as incorrect, it does not error. The only comparison is exact
//! string equality; the UI is responsible for submitting the option strings
//! it was given.

use std::collections::HashMap;

use crate::quiz_engine::models::{Answer, GradeDetail, GradeResult, Question};

pub fn grade_run(questions: &[Question], answers: &[Answer]) -> GradeResult {
    let by_id: HashMap<&str, &Answer> = answers
        .iter()
        .map(|a| (a.question_id.as_str(), a))
        .collect();

    let details: Vec<GradeDetail> = questions
        .iter()
        .map(|q| GradeDetail {
            question_id: q.question_id().to_string(),
            is_correct: is_correct(q, by_id.get(q.question_id()).copied()),
        })
        .collect();

    let correct = details.iter().filter(|d| d.is_correct).count();
    let total = questions.len();
    let score = if total == 0 {
        0
    } else {
        (correct as f64 / total as f64 * 100.0).round() as u32
    };

    GradeResult {
        total,
        correct,
        score,
        details,
    }
}

fn is_correct(question: &Question, answer: Option<&Answer>) -> bool {
    let Some(answer) = answer else {
        // Unanswered counts as incorrect, never as a separate state.
        return false;
    };

    match question {
        Question::Choice(q) => answer.choice == q.correct_choice,
        Question::Fill(q) => {
            // The structured payload is authoritative; `choice` is only a
            // display summary. Not-an-object or a missing slot is a miss.
            let Some(payload) = answer.payload.as_ref().and_then(|p| p.as_object()) else {
                return false;
            };
            q.correct.iter().all(|(key, expected)| {
                payload
                    .get(key)
                    .and_then(|v| v.as_str())
                    .is_some_and(|v| v == expected)
            })
        }
    }
}
