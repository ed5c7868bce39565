use super::super::domain::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

pub const STANDARD_CATALOG_VERSION: &str = "2024.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandLevel {
    Low,
    Medium,
    High,
}

impl DemandLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "низкая",
            Self::Medium => "средняя",
            Self::High => "высокая",
        }
    }
}

/// Health flag an occupation-specific consideration reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsiderationTrigger {
    Mobility,
    Vision,
    Hearing,
    Cognitive,
}

/// Occupation-specific adjustment applied when its trigger is flagged.
///
/// A zero `adjustment` only records the note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consideration {
    pub trigger: ConsiderationTrigger,
    #[serde(default)]
    pub adjustment: i16,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationCandidate {
    pub title: String,
    pub description: String,
    pub requirements: BTreeMap<Category, u8>,
    pub remote_work_possible: bool,
    pub physical_demands: DemandLevel,
    pub social_interaction: DemandLevel,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub considerations: Vec<Consideration>,
}

impl OccupationCandidate {
    /// Rejects requirement maps the matcher cannot divide by.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("occupation title is empty".to_string());
        }
        if self.requirements.is_empty() {
            return Err("no category requirements".to_string());
        }
        if let Some((category, required)) = self
            .requirements
            .iter()
            .find(|(_, required)| **required == 0 || **required > 100)
        {
            return Err(format!(
                "requirement for {} must be within 1..=100, got {}",
                category.label(),
                required
            ));
        }
        Ok(())
    }
}

/// Versioned, read-only list of occupations. Declaration order breaks ranking ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationCatalog {
    pub version: String,
    pub occupations: Vec<OccupationCandidate>,
}

impl OccupationCatalog {
    pub fn standard() -> Self {
        Self {
            version: STANDARD_CATALOG_VERSION.to_string(),
            occupations: standard_occupations(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.occupations.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        for occupation in &self.occupations {
            occupation
                .validate()
                .map_err(|reason| CatalogError::InvalidOccupation {
                    title: occupation.title.clone(),
                    reason,
                })?;
            if !seen.insert(occupation.title.as_str()) {
                return Err(CatalogError::InvalidOccupation {
                    title: occupation.title.clone(),
                    reason: "duplicate title".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, title: &str) -> Option<&OccupationCandidate> {
        self.occupations
            .iter()
            .find(|occupation| occupation.title == title)
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Empty,
    InvalidOccupation { title: String, reason: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read occupation catalog: {}", err),
            CatalogError::Json(err) => write!(f, "invalid occupation catalog JSON: {}", err),
            CatalogError::Empty => write!(f, "occupation catalog has no entries"),
            CatalogError::InvalidOccupation { title, reason } => {
                write!(f, "invalid occupation '{}': {}", title, reason)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Json(err) => Some(err),
            CatalogError::Empty | CatalogError::InvalidOccupation { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

fn requirements(entries: &[(Category, u8)]) -> BTreeMap<Category, u8> {
    entries.iter().copied().collect()
}

fn roles(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|role| role.to_string()).collect()
}

fn standard_occupations() -> Vec<OccupationCandidate> {
    use Category::*;
    use DemandLevel::{High, Low, Medium};

    vec![
        OccupationCandidate {
            title: "Веб-разработчик".to_string(),
            description: "Создание сайтов и веб-приложений, работа с кодом и цифровыми сервисами."
                .to_string(),
            requirements: requirements(&[(Interests, 60), (Skills, 70), (LearningMotivation, 60)]),
            remote_work_possible: true,
            physical_demands: Low,
            social_interaction: Low,
            roles: roles(&["Frontend-разработчик", "Верстальщик", "Тестировщик веб-приложений"]),
            considerations: Vec::new(),
        },
        OccupationCandidate {
            title: "Графический дизайнер".to_string(),
            description: "Разработка визуальных материалов, макетов и фирменного стиля."
                .to_string(),
            requirements: requirements(&[(Interests, 60), (Skills, 60), (Personality, 50)]),
            remote_work_possible: true,
            physical_demands: Low,
            social_interaction: Low,
            roles: roles(&["Дизайнер интерфейсов", "Иллюстратор", "Дизайнер презентаций"]),
            considerations: vec![Consideration {
                trigger: ConsiderationTrigger::Vision,
                adjustment: 0,
                note: "Работа требует зрительной нагрузки: уточните возможность использовать экранное увеличение и контрастные темы"
                    .to_string(),
            }],
        },
        OccupationCandidate {
            title: "Аналитик данных".to_string(),
            description: "Сбор, обработка и интерпретация данных для принятия решений.".to_string(),
            requirements: requirements(&[
                (Skills, 70),
                (LearningMotivation, 60),
                (WorkEnvironment, 50),
            ]),
            remote_work_possible: true,
            physical_demands: Low,
            social_interaction: Low,
            roles: roles(&["Младший аналитик", "Специалист по отчётности", "Аналитик BI"]),
            considerations: vec![Consideration {
                trigger: ConsiderationTrigger::Vision,
                adjustment: 0,
                note: "Много работы с таблицами и графиками: потребуются программы экранного доступа"
                    .to_string(),
            }],
        },
        OccupationCandidate {
            title: "Контент-менеджер".to_string(),
            description: "Наполнение сайтов и соцсетей, подготовка и публикация материалов."
                .to_string(),
            requirements: requirements(&[(Interests, 50), (Skills, 50), (Personality, 50)]),
            remote_work_possible: true,
            physical_demands: Low,
            social_interaction: Medium,
            roles: roles(&["Редактор сайта", "SMM-специалист", "Копирайтер"]),
            considerations: Vec::new(),
        },
        OccupationCandidate {
            title: "Переводчик жестового языка".to_string(),
            description: "Перевод между русским жестовым языком и звучащей речью.".to_string(),
            requirements: requirements(&[(Skills, 70), (Values, 60), (Personality, 60)]),
            remote_work_possible: true,
            physical_demands: Medium,
            social_interaction: High,
            roles: roles(&[
                "Сурдопереводчик",
                "Переводчик видеоконтента",
                "Ассистент по доступности",
            ]),
            considerations: Vec::new(),
        },
        OccupationCandidate {
            title: "Преподаватель / тренер".to_string(),
            description: "Обучение взрослых и детей, проведение курсов и тренингов.".to_string(),
            requirements: requirements(&[
                (Interests, 60),
                (Values, 60),
                (Personality, 60),
                (LearningMotivation, 60),
            ]),
            remote_work_possible: true,
            physical_demands: Medium,
            social_interaction: High,
            roles: roles(&["Онлайн-преподаватель", "Тренер курсов", "Методист"]),
            considerations: vec![Consideration {
                trigger: ConsiderationTrigger::Hearing,
                adjustment: -30,
                note: "Преподавание опирается на устную коммуникацию с аудиторией".to_string(),
            }],
        },
        OccupationCandidate {
            title: "Специалист службы поддержки".to_string(),
            description: "Консультирование клиентов в чатах, по почте и телефону.".to_string(),
            requirements: requirements(&[(Skills, 50), (Values, 50), (Personality, 60)]),
            remote_work_possible: true,
            physical_demands: Low,
            social_interaction: High,
            roles: roles(&[
                "Оператор чата",
                "Специалист первой линии",
                "Менеджер по работе с клиентами",
            ]),
            considerations: Vec::new(),
        },
        OccupationCandidate {
            title: "Бухгалтер".to_string(),
            description: "Ведение учёта, подготовка отчётности и работа с документами.".to_string(),
            requirements: requirements(&[(Skills, 60), (Values, 50), (WorkEnvironment, 60)]),
            remote_work_possible: true,
            physical_demands: Low,
            social_interaction: Low,
            roles: roles(&[
                "Помощник бухгалтера",
                "Специалист по расчётам",
                "Бухгалтер на аутсорсе",
            ]),
            considerations: Vec::new(),
        },
        OccupationCandidate {
            title: "Социальный работник".to_string(),
            description: "Поддержка людей в сложных жизненных ситуациях, сопровождение и консультации."
                .to_string(),
            requirements: requirements(&[(Values, 70), (Personality, 60), (Interests, 50)]),
            remote_work_possible: false,
            physical_demands: Medium,
            social_interaction: High,
            roles: roles(&[
                "Специалист по социальной работе",
                "Социальный координатор",
                "Равный консультант",
            ]),
            considerations: Vec::new(),
        },
        OccupationCandidate {
            title: "Офис-администратор".to_string(),
            description: "Организация работы офиса, документооборот и встреча посетителей."
                .to_string(),
            requirements: requirements(&[(Skills, 50), (WorkEnvironment, 60), (Personality, 50)]),
            remote_work_possible: false,
            physical_demands: Medium,
            social_interaction: Medium,
            roles: roles(&["Администратор", "Секретарь", "Делопроизводитель"]),
            considerations: Vec::new(),
        },
        OccupationCandidate {
            title: "Мастер ручной работы".to_string(),
            description: "Изготовление изделий ручной работы, ремонт и реставрация.".to_string(),
            requirements: requirements(&[(Interests, 60), (Skills, 60), (WorkEnvironment, 50)]),
            remote_work_possible: false,
            physical_demands: High,
            social_interaction: Low,
            roles: roles(&["Мастер мастерской", "Реставратор", "Ремесленник"]),
            considerations: vec![Consideration {
                trigger: ConsiderationTrigger::Mobility,
                adjustment: -10,
                note: "Работа в мастерской требует свободы передвижения и доступа к инструментам"
                    .to_string(),
            }],
        },
        OccupationCandidate {
            title: "Специалист по цифровой доступности".to_string(),
            description: "Проверка сайтов и сервисов на доступность для людей с инвалидностью."
                .to_string(),
            requirements: requirements(&[(Skills, 60), (Values, 60), (LearningMotivation, 50)]),
            remote_work_possible: true,
            physical_demands: Low,
            social_interaction: Medium,
            roles: roles(&[
                "Тестировщик доступности",
                "Консультант по доступной среде",
                "Эксперт по инклюзии",
            ]),
            considerations: Vec::new(),
        },
    ]
}
