use super::domain::{
    AnswerPolarity, AnswerValue, Category, Question, QuestionId, QuestionType,
};
use super::engine::EngineError;
use super::question_bank::QuestionRepository;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Highest value on the answer scale.
pub const SCALE_MAX: u8 = 4;

const SCALE_LABELS: [&str; 5] = [
    "0 — совсем не про меня (not like me at all)",
    "1 — скорее не про меня (mostly not like me)",
    "2 — отчасти про меня (somewhat like me)",
    "3 — скорее про меня (mostly like me)",
    "4 — полностью про меня (completely like me)",
];

/// One answered question rendered for the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptItem {
    pub question_id: QuestionId,
    pub question_text: String,
    pub category: Category,
    pub question_type: QuestionType,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

/// A scale answer that contributes to category scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub question_id: QuestionId,
    pub question_text: String,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<AnswerPolarity>,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedAnswers {
    pub transcript: Vec<TranscriptItem>,
    pub scored: BTreeMap<Category, Vec<ScoredAnswer>>,
}

/// Resolves each answer against the question repository.
///
/// Answers whose question id is unknown are dropped from both the transcript and scoring.
/// Only scale answers are scored; everything else is transcript-only.
pub fn normalize<Q>(
    questions: &Q,
    answers: &BTreeMap<QuestionId, AnswerValue>,
) -> Result<NormalizedAnswers, EngineError>
where
    Q: QuestionRepository + ?Sized,
{
    let mut normalized = NormalizedAnswers::default();

    for (question_id, value) in answers {
        let Some(question) = questions.find(*question_id)? else {
            debug!(question_id = question_id.0, "skipping answer for unknown question");
            continue;
        };

        let score = if question.question_type == QuestionType::Scale {
            Some(scale_score(&question, value)?)
        } else {
            None
        };

        normalized.transcript.push(TranscriptItem {
            question_id: question.id,
            question_text: question.text.clone(),
            category: question.category,
            question_type: question.question_type,
            answer: format_answer(&question, value),
            score,
        });

        if let Some(score) = score {
            normalized
                .scored
                .entry(question.category)
                .or_default()
                .push(ScoredAnswer {
                    question_id: question.id,
                    question_text: question.text,
                    score,
                    polarity: question.polarity,
                });
        }
    }

    Ok(normalized)
}

fn scale_score(question: &Question, value: &AnswerValue) -> Result<u8, EngineError> {
    value
        .as_integer()
        .filter(|score| (0..=SCALE_MAX as i64).contains(score))
        .map(|score| score as u8)
        .ok_or_else(|| EngineError::InvalidScaleValue {
            question_id: question.id,
            value: value.display(),
        })
}

/// Renders an answer for the transcript.
pub fn format_answer(question: &Question, value: &AnswerValue) -> String {
    if let AnswerValue::List(values) = value {
        if !question.question_type.is_choice() {
            return value.display();
        }
        return values
            .iter()
            .map(|item| option_label(question, item).unwrap_or_else(|| item.display()))
            .collect::<Vec<_>>()
            .join(", ");
    }

    match question.question_type {
        QuestionType::Scale => value
            .as_integer()
            .and_then(|score| usize::try_from(score).ok())
            .and_then(|index| SCALE_LABELS.get(index))
            .map(|label| label.to_string())
            .unwrap_or_else(|| value.display()),
        QuestionType::SingleChoice | QuestionType::MultipleChoice => {
            option_label(question, value).unwrap_or_else(|| value.display())
        }
        QuestionType::YesNo => match value.as_integer() {
            Some(1) => "Да".to_string(),
            Some(0) => "Нет".to_string(),
            _ => value.display(),
        },
        QuestionType::Text => value.display(),
    }
}

fn option_label(question: &Question, value: &AnswerValue) -> Option<String> {
    if question.options.is_empty() {
        return None;
    }
    let index = match value {
        AnswerValue::Integer(index) => usize::try_from(*index).ok()?,
        AnswerValue::Text(raw) => raw.trim().parse::<usize>().ok()?,
        _ => return None,
    };
    question.options.get(index).cloned()
}
