use super::domain::{AnswerPolarity, Category, Question, QuestionId, QuestionType, TestId};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Test id of the built-in career test.
pub const STANDARD_TEST_ID: TestId = TestId(1);

/// Read access to test items.
pub trait QuestionRepository: Send + Sync {
    fn find(&self, id: QuestionId) -> Result<Option<Question>, QuestionBankError>;
    fn for_test(&self, test_id: TestId) -> Result<Vec<Question>, QuestionBankError>;
}

/// View of a repository restricted to the questions owned by one test.
pub struct TestQuestions<'a, Q: ?Sized> {
    inner: &'a Q,
    test_id: TestId,
}

impl<'a, Q: QuestionRepository + ?Sized> TestQuestions<'a, Q> {
    pub fn new(inner: &'a Q, test_id: TestId) -> Self {
        Self { inner, test_id }
    }
}

impl<Q: QuestionRepository + ?Sized> QuestionRepository for TestQuestions<'_, Q> {
    fn find(&self, id: QuestionId) -> Result<Option<Question>, QuestionBankError> {
        Ok(self
            .inner
            .find(id)?
            .filter(|question| question.test_id == self.test_id))
    }

    fn for_test(&self, test_id: TestId) -> Result<Vec<Question>, QuestionBankError> {
        if test_id != self.test_id {
            return Ok(Vec::new());
        }
        self.inner.for_test(test_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionBankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid question bank CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("question bank row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),
    #[error("question bank unavailable: {0}")]
    Unavailable(String),
}

/// In-memory set of questions, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: BTreeMap<QuestionId, Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        let mut map = BTreeMap::new();
        for question in questions {
            let id = question.id;
            if map.insert(id, question).is_some() {
                return Err(QuestionBankError::DuplicateId(id));
            }
        }
        Ok(Self { questions: map })
    }

    pub fn standard() -> Self {
        let questions = standard_questions()
            .into_iter()
            .map(|question| (question.id, question))
            .collect();
        Self { questions }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, QuestionBankError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Imports `id,test_id,position,type,category,text,options,polarity` rows.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, QuestionBankError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut questions = Vec::new();

        for (index, record) in csv_reader.deserialize::<QuestionRow>().enumerate() {
            let row = record?;
            questions.push(row.into_question(index + 1)?);
        }

        Self::new(questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.values()
    }
}

impl QuestionRepository for QuestionBank {
    fn find(&self, id: QuestionId) -> Result<Option<Question>, QuestionBankError> {
        Ok(self.questions.get(&id).cloned())
    }

    fn for_test(&self, test_id: TestId) -> Result<Vec<Question>, QuestionBankError> {
        let mut questions: Vec<Question> = self
            .questions
            .values()
            .filter(|question| question.test_id == test_id)
            .cloned()
            .collect();
        questions.sort_by_key(|question| (question.position, question.id));
        Ok(questions)
    }
}

#[derive(Debug, Deserialize)]
struct QuestionRow {
    id: u64,
    test_id: u64,
    position: u32,
    #[serde(rename = "type")]
    question_type: String,
    category: String,
    text: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    options: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    polarity: Option<String>,
}

impl QuestionRow {
    fn into_question(self, row: usize) -> Result<Question, QuestionBankError> {
        let question_type =
            QuestionType::parse(&self.question_type).ok_or_else(|| QuestionBankError::InvalidRow {
                row,
                reason: format!("unknown question type '{}'", self.question_type),
            })?;
        let category =
            Category::from_label(&self.category).ok_or_else(|| QuestionBankError::InvalidRow {
                row,
                reason: format!("unknown category '{}'", self.category),
            })?;
        let polarity = match self.polarity.as_deref() {
            Some(raw) => Some(AnswerPolarity::parse(raw).ok_or_else(|| {
                QuestionBankError::InvalidRow {
                    row,
                    reason: format!("unknown polarity '{raw}'"),
                }
            })?),
            None => None,
        };
        if self.text.trim().is_empty() {
            return Err(QuestionBankError::InvalidRow {
                row,
                reason: "question text is empty".to_string(),
            });
        }

        let options = self
            .options
            .map(|raw| {
                raw.split('|')
                    .map(|option| option.trim().to_string())
                    .filter(|option| !option.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Question {
            id: QuestionId(self.id),
            test_id: TestId(self.test_id),
            text: self.text,
            question_type,
            category,
            position: self.position,
            options,
            polarity,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

struct Item(
    u64,
    QuestionType,
    Category,
    &'static str,
    &'static [&'static str],
    Option<AnswerPolarity>,
);

fn standard_questions() -> Vec<Question> {
    use AnswerPolarity::{Capability, Need};
    use Category::*;
    use QuestionType::*;

    #[rustfmt::skip]
    let items = [
        Item(1, Scale, Interests, "Мне интересно работать с компьютерами и цифровыми технологиями", &[], None),
        Item(2, Scale, Interests, "Мне нравится создавать визуальные материалы: рисунки, макеты, видео", &[], None),
        Item(3, Scale, Interests, "Мне интересно объяснять и помогать другим разбираться в новом", &[], None),
        Item(4, Scale, Skills, "Я уверенно работаю с текстами, таблицами и документами", &[], None),
        Item(5, Scale, Skills, "Я легко нахожу закономерности в цифрах и данных", &[], None),
        Item(6, Scale, Skills, "Я владею жестовым языком или готов его изучать", &[], None),
        Item(7, Scale, Values, "Для меня важно, чтобы работа приносила пользу людям", &[], None),
        Item(8, Scale, Values, "Для меня важна стабильность и предсказуемый доход", &[], None),
        Item(9, Scale, WorkEnvironment, "Мне комфортно работать в тихой обстановке без постоянных отвлечений", &[], None),
        Item(10, Scale, WorkEnvironment, "Я хорошо работаю в команде с чётким распределением ролей", &[], None),
        Item(11, Scale, Personality, "Я считаю себя интровертом", &[], None),
        Item(12, Scale, Personality, "Я быстро устаю от длительного общения", &[], None),
        Item(13, Scale, Personality, "Я внимателен к деталям и довожу дела до конца", &[], None),
        Item(14, Scale, LearningMotivation, "Я готов регулярно учиться и проходить онлайн-курсы", &[], None),
        Item(15, Scale, LearningMotivation, "Мне легко поддерживать мотивацию без внешнего контроля", &[], None),
        Item(16, Scale, DisabilityAccessibility, "Я могу долго работать стоя", &[], Some(Capability)),
        Item(17, Scale, DisabilityAccessibility, "Я могу поднимать и переносить тяжёлые предметы", &[], Some(Capability)),
        Item(18, Scale, DisabilityAccessibility, "Я свободно воспринимаю речь на слух в шумной обстановке", &[], Some(Capability)),
        Item(19, Scale, DisabilityAccessibility, "Моё зрение позволяет долго работать с мелким текстом", &[], Some(Capability)),
        Item(20, Scale, DisabilityAccessibility, "Мне легко сохранять спокойный темп в напряжённой обстановке", &[], Some(Capability)),
        Item(21, Scale, DisabilityAccessibility, "Я предпочёл бы работать из дома", &[], Some(Need)),
        Item(22, Scale, DisabilityAccessibility, "Мне подходит работа по сокращённому графику", &[], Some(Need)),
        Item(23, Scale, DisabilityAccessibility, "Мне важны регулярные перерывы в течение рабочего дня", &[], Some(Need)),
        Item(24, MultipleChoice, Interests, "Какие направления вам ближе?", &["IT и цифровые сервисы", "Дизайн и медиа", "Образование", "Социальная сфера", "Администрирование"], None),
        Item(25, SingleChoice, WorkEnvironment, "Какой формат работы вы предпочитаете?", &["Удалённо", "Гибрид", "В офисе"], None),
        Item(26, YesNo, Values, "Есть ли у вас опыт волонтёрской работы?", &[], None),
        Item(27, Text, Personality, "Опишите, чем вам нравится заниматься в свободное время", &[], None),
    ];

    items
        .into_iter()
        .enumerate()
        .map(|(index, Item(id, question_type, category, text, options, polarity))| Question {
            id: QuestionId(id),
            test_id: STANDARD_TEST_ID,
            text: text.to_string(),
            question_type,
            category,
            position: index as u32 + 1,
            options: options.iter().map(|option| option.to_string()).collect(),
            polarity,
        })
        .collect()
}
