use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a single test item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub u64);

/// Identifier of the test a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TestId(pub u64);

/// Reference to the user who submitted a test.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Scale,
    SingleChoice,
    MultipleChoice,
    Text,
    YesNo,
}

impl QuestionType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "scale" => Some(Self::Scale),
            "single_choice" => Some(Self::SingleChoice),
            "multiple_choice" => Some(Self::MultipleChoice),
            "text" => Some(Self::Text),
            "yes_no" => Some(Self::YesNo),
            _ => None,
        }
    }

    pub const fn is_choice(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultipleChoice)
    }
}

/// Fixed grouping used to aggregate scale answers.
///
/// Declaration order is the reporting order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Interests,
    Skills,
    Values,
    WorkEnvironment,
    Personality,
    LearningMotivation,
    DisabilityAccessibility,
}

impl Category {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Interests,
            Self::Skills,
            Self::Values,
            Self::WorkEnvironment,
            Self::Personality,
            Self::LearningMotivation,
            Self::DisabilityAccessibility,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Interests => "Интересы",
            Self::Skills => "Навыки",
            Self::Values => "Ценности",
            Self::WorkEnvironment => "Рабочая среда",
            Self::Personality => "Личностные качества",
            Self::LearningMotivation => "Обучаемость и мотивация",
            Self::DisabilityAccessibility => "Инвалидность и доступность",
        }
    }

    pub const fn english_label(self) -> &'static str {
        match self {
            Self::Interests => "Interests",
            Self::Skills => "Skills",
            Self::Values => "Values",
            Self::WorkEnvironment => "Work environment",
            Self::Personality => "Personality",
            Self::LearningMotivation => "Learning & motivation",
            Self::DisabilityAccessibility => "Disability & accessibility",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::Interests => "interests",
            Self::Skills => "skills",
            Self::Values => "values",
            Self::WorkEnvironment => "work_environment",
            Self::Personality => "personality",
            Self::LearningMotivation => "learning_motivation",
            Self::DisabilityAccessibility => "disability_accessibility",
        }
    }

    /// Resolves a category from its Russian label, English label, or snake_case key.
    pub fn from_label(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        Self::ordered().into_iter().find(|category| {
            category.label().to_lowercase() == needle
                || category.english_label().to_lowercase() == needle
                || category.key() == needle
        })
    }
}

/// How an accessibility question is phrased.
///
/// A capability question reports a difficulty when scored low; a need question states an
/// accommodation when scored high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerPolarity {
    Capability,
    Need,
}

impl AnswerPolarity {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "capability" => Some(Self::Capability),
            "need" => Some(Self::Need),
            _ => None,
        }
    }
}

/// Immutable test item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub test_id: TestId,
    pub text: String,
    pub question_type: QuestionType,
    pub category: Category,
    pub position: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<AnswerPolarity>,
}

/// Raw answer value; its shape depends on the question type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Integer(i64),
    Decimal(f64),
    Flag(bool),
    Text(String),
    List(Vec<AnswerValue>),
}

impl AnswerValue {
    /// Integer view of the value, accepting numeric strings.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AnswerValue::Integer(value) => Some(*value),
            AnswerValue::Decimal(value) if value.fract() == 0.0 && value.is_finite() => {
                Some(*value as i64)
            }
            AnswerValue::Text(value) => value.trim().parse().ok(),
            _ => None,
        }
    }

    /// Plain rendering used when no type-specific label applies.
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Integer(value) => value.to_string(),
            AnswerValue::Decimal(value) => value.to_string(),
            AnswerValue::Flag(true) => "Да".to_string(),
            AnswerValue::Flag(false) => "Нет".to_string(),
            AnswerValue::Text(value) => value.clone(),
            AnswerValue::List(values) => values
                .iter()
                .map(AnswerValue::display)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Identifier of a stored test result.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResultId(pub String);

/// Answers a user sends when completing a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerTestSubmission {
    pub user_id: UserId,
    #[serde(default)]
    pub answers: BTreeMap<QuestionId, AnswerValue>,
    #[serde(default)]
    pub disability_text: Option<String>,
    /// When the user opened the test; defaults to the submission time.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}
