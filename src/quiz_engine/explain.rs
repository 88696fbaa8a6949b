//! Post-answer explanation text.
//!
//! Explanations are rebuilt from content on demand, never stored with the
//! run. Each archetype has a fixed template; content lookups that fail fall
//! back to a shorter line rather than erroring, since the answer has already
//! been graded by the time an explanation is rendered.

use crate::quiz_engine::content::{ContentSchema, Passage, Poem, Unit};
use crate::quiz_engine::helpers::{render_template, truncate_excerpt};
use crate::quiz_engine::models::{
    Answer, ChoiceArchetype, ChoiceQuestion, FillQuestion, Question,
};

const PASSAGE_HINT_LEN: usize = 120;

/// Builds the explanation for one answered question. `answer` only affects
/// fill questions, where the student's own filled sentence is echoed back.
pub fn explain_question(
    content: &ContentSchema,
    unit_id: &str,
    question: &Question,
    answer: Option<&Answer>,
) -> String {
    let unit = content.unit(unit_id).ok();
    match question {
        Question::Choice(q) => explain_choice(unit, q),
        Question::Fill(q) => explain_fill(q, answer),
    }
}

fn explain_choice(unit: Option<&Unit>, q: &ChoiceQuestion) -> String {
    match q.archetype {
        ChoiceArchetype::McqPinyin => {
            let tail = q
                .meta
                .hanzi
                .as_deref()
                .map(|hanzi| word_tail(unit, hanzi))
                .unwrap_or_default();
            format!("正确读音：{}{}", q.correct_choice, tail)
        }

        ChoiceArchetype::McqHanziByPinyin => {
            let hanzi = q.correct_choice.as_str();
            let pinyin = q
                .meta
                .pinyin
                .as_deref()
                .map(|p| format!("（{}）", p))
                .unwrap_or_default();
            format!("正确汉字：{}{}{}", hanzi, pinyin, word_tail(unit, hanzi))
        }

        ChoiceArchetype::McqPolyphone => {
            match (q.meta.hanzi.as_deref(), q.meta.example.as_deref()) {
                (Some(hanzi), Some(example)) => format!(
                    "在“{}”里，“{}”读“{}”，注意看词语语境。",
                    example, hanzi, q.correct_choice
                ),
                _ => format!("正确答案：{}", q.correct_choice),
            }
        }

        ChoiceArchetype::McqSynAnt => match q.meta.word.as_deref() {
            Some(word) if q.prompt.contains("近义词") => {
                format!("“{}”的近义词是“{}”，意思相近。", word, q.correct_choice)
            }
            Some(word) if q.prompt.contains("反义词") => {
                format!("“{}”的反义词是“{}”，意思相反。", word, q.correct_choice)
            }
            _ => format!("正确答案是“{}”。", q.correct_choice),
        },

        ChoiceArchetype::McqConfusing => {
            let mut lines = vec![format!("正确答案：{}", q.correct_choice)];
            if let Some(rule) = q.meta.rule.as_deref() {
                lines.push(format!("辨析：{}", rule));
            }
            if !q.meta.examples.is_empty() {
                lines.push(format!("例句：{}", q.meta.examples.join("；")));
            }
            lines.join("\n")
        }

        ChoiceArchetype::McqWordSpelling => {
            let pinyin = q
                .meta
                .pinyin
                .as_deref()
                .map(|p| format!("（{}）", p))
                .unwrap_or_default();
            format!("正确词语：{}{}", q.correct_choice, pinyin)
        }

        ChoiceArchetype::McqWordPatternMatch => {
            let pattern = q.meta.pattern_type.as_deref().unwrap_or("");
            format!("“{}”属于“{}”结构。", q.correct_choice, pattern)
        }

        ChoiceArchetype::PoemBlank => {
            let mut lines = vec![format!("正确：{}", q.correct_choice)];
            if let Some(poem) = find_poem(unit, q) {
                if !poem.glossary.is_empty() {
                    let entries: Vec<String> = poem
                        .glossary
                        .iter()
                        .map(|(term, gloss)| format!("{}：{}", term, gloss))
                        .collect();
                    lines.push(format!("注释：{}", entries.join("；")));
                }
                if let Some(meaning) = poem.meaning.as_deref() {
                    if !meaning.trim().is_empty() {
                        lines.push(format!("诗意：{}", meaning));
                    }
                }
            }
            lines.join("\n")
        }

        ChoiceArchetype::ReadingMcq => reading_lines(unit, q, "线索"),
        ChoiceArchetype::ReadingTrueFalse => reading_lines(unit, q, "依据"),
    }
}

fn explain_fill(q: &FillQuestion, answer: Option<&Answer>) -> String {
    let reference = render_template(&q.template, |key| q.correct.get(key).map(String::as_str));
    let mut text = format!("句型提示：照着句子结构填词。参考：{}", reference);

    if let Some(payload) = answer.and_then(|a| a.payload.as_ref()).and_then(|p| p.as_object()) {
        let yours = render_template(&q.template, |key| payload.get(key).and_then(|v| v.as_str()));
        text.push_str(&format!("\n你的句子：{}", yours));
    }
    text
}

/// `，组词：word1、word2` from the character table, at most two words.
fn word_tail(unit: Option<&Unit>, hanzi: &str) -> String {
    let words: Vec<&str> = unit
        .map(|u| u.char_items())
        .unwrap_or_default()
        .iter()
        .filter(|c| c.hanzi == hanzi)
        .flat_map(|c| c.words.iter())
        .map(String::as_str)
        .filter(|w| !w.is_empty())
        .take(2)
        .collect();

    if words.is_empty() {
        String::new()
    } else {
        format!("，组词：{}", words.join("、"))
    }
}

fn find_poem<'a>(unit: Option<&'a Unit>, q: &ChoiceQuestion) -> Option<&'a Poem> {
    let poems = unit?.poems();
    if let Some(poem_id) = q.meta.poem_id.as_deref() {
        return poems.into_iter().find(|p| p.poem_id == poem_id);
    }
    let title = q.meta.title.as_deref()?;
    poems.into_iter().find(|p| {
        p.title == title
            && q.meta
                .author
                .as_deref()
                .is_none_or(|author| p.author == author)
    })
}

fn find_passage<'a>(unit: Option<&'a Unit>, q: &ChoiceQuestion) -> Option<&'a Passage> {
    let passages = unit?.passages();
    if let Some(passage_id) = q.meta.passage_id.as_deref() {
        return passages.into_iter().find(|p| p.passage_id == passage_id);
    }
    let title = q.meta.title.as_deref()?;
    passages.into_iter().find(|p| p.title == title)
}

fn reading_lines(unit: Option<&Unit>, q: &ChoiceQuestion, label: &str) -> String {
    let mut lines = vec![format!("正确答案：{}", q.correct_choice)];
    if let Some(passage) = find_passage(unit, q) {
        let hint = truncate_excerpt(&passage.text, PASSAGE_HINT_LEN);
        if !hint.is_empty() {
            lines.push(format!("{}：{}", label, hint));
        }
    }
    lines.join("\n")
}
