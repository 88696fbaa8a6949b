//! Poem blanks: blank one character out of a line and ask which one it was.
//! Distractors are other characters of the same poem, so every option at
//! least looks plausible to someone who half-remembers the lines.

use crate::quiz_engine::content::Poem;
use crate::quiz_engine::error::QuizError;
use crate::quiz_engine::helpers::{dedup_keep_order, extend_distinct, is_punctuation};
use crate::quiz_engine::models::{
    BossPhase, ChoiceArchetype, ChoiceQuestion, Question, QuestionMeta,
};
use crate::quiz_engine::rng::QuizRng;

fn is_blankable(c: char) -> bool {
    !c.is_whitespace() && !is_punctuation(c)
}

pub fn build_poem_blank(
    rng: &mut QuizRng,
    poem: &Poem,
    phase_id: BossPhase,
) -> Result<Question, QuizError> {
    let lines: Vec<&String> = poem.lines.iter().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return Err(QuizError::MalformedItem {
            item_id: poem.poem_id.clone(),
            reason: "poem has no non-empty lines",
        });
    }

    let line = lines[rng.next_index(lines.len())];
    let chars: Vec<char> = line.chars().collect();

    let candidate_positions: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| is_blankable(**c))
        .map(|(idx, _)| idx)
        .collect();
    if candidate_positions.is_empty() {
        return Err(QuizError::MalformedItem {
            item_id: poem.poem_id.clone(),
            reason: "poem line has no blankable characters",
        });
    }

    let blank_at = candidate_positions[rng.next_index(candidate_positions.len())];
    let correct_char = chars[blank_at].to_string();

    let blanked: String = chars
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            if idx == blank_at {
                "__".to_string()
            } else {
                c.to_string()
            }
        })
        .collect();

    let distractor_pool: Vec<String> = dedup_keep_order(
        lines
            .iter()
            .flat_map(|l| l.chars())
            .filter(|c| is_blankable(*c))
            .map(|c| c.to_string()),
    )
    .into_iter()
    .filter(|c| *c != correct_char)
    .collect();

    let mut picked = vec![correct_char.clone()];
    extend_distinct(rng, &mut picked, &distractor_pool, 4);
    let choices = rng.shuffle(&picked);

    Ok(Question::Choice(ChoiceQuestion {
        question_id: String::new(),
        archetype: ChoiceArchetype::PoemBlank,
        prompt: format!(
            "古诗填空：{}（{}）\n{blanked}",
            poem.title, poem.author
        ),
        knowledge_refs: vec![
            format!("kp_poem:{}", poem.poem_id),
            format!("kp_poem_title:{}", poem.title),
        ],
        choices,
        correct_choice: correct_char,
        phase_id: Some(phase_id),
        meta: QuestionMeta {
            title: Some(poem.title.clone()),
            author: Some(poem.author.clone()),
            poem_id: Some(poem.poem_id.clone()),
            source: Some("poem".to_string()),
            ..QuestionMeta::default()
        },
    }))
}
