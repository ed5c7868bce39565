use super::aggregation::CategoryStat;
use super::domain::AnswerPolarity;
use super::normalizer::ScoredAnswer;
use serde::{Deserialize, Serialize};

/// Concern groups recognised in free-text disability descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernGroup {
    Mobility,
    Vision,
    Hearing,
    Cognitive,
    Chronic,
    SocialAnxiety,
}

impl ConcernGroup {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Mobility,
            Self::Vision,
            Self::Hearing,
            Self::Cognitive,
            Self::Chronic,
            Self::SocialAnxiety,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mobility => "опорно-двигательный аппарат",
            Self::Vision => "зрение",
            Self::Hearing => "слух",
            Self::Cognitive => "когнитивные особенности",
            Self::Chronic => "хронические заболевания",
            Self::SocialAnxiety => "социальная тревожность",
        }
    }

    const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Mobility => &[
                "коляск",
                "инвалидн",
                "ходьб",
                "передвиж",
                "опорно-двигат",
                "ампутац",
                "паралич",
                "костыл",
                "трост",
                "дцп",
            ],
            Self::Vision => &["зрени", "слеп", "слабовид", "незряч", "глаз"],
            Self::Hearing => &["слух", "глух", "слабослыш", "кохлеар", "жестов"],
            Self::Cognitive => &[
                "аутизм",
                "аутич",
                "сдвг",
                "дислекс",
                "памят",
                "концентрац",
                "когнитив",
                "внимани",
            ],
            Self::Chronic => &[
                "хронич",
                "диабет",
                "астм",
                "эпилеп",
                "онколог",
                "сердеч",
                "устал",
                "утомля",
            ],
            Self::SocialAnxiety => &[
                "тревож",
                "социофоб",
                "фоби",
                "паническ",
                "депресс",
                "стресс",
            ],
        }
    }
}

/// Inferred accommodation needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAnalysis {
    pub needs_remote_work: bool,
    pub needs_low_physical: bool,
    pub needs_low_social: bool,
    pub needs_flexible_schedule: bool,
    pub mobility_considerations: bool,
    pub vision_considerations: bool,
    pub hearing_considerations: bool,
    pub cognitive_considerations: bool,
    #[serde(default)]
    pub detected_concerns: Vec<ConcernGroup>,
}

impl HealthAnalysis {
    pub fn any_need(&self) -> bool {
        self.needs_remote_work
            || self.needs_low_physical
            || self.needs_low_social
            || self.needs_flexible_schedule
            || self.mobility_considerations
            || self.vision_considerations
            || self.hearing_considerations
            || self.cognitive_considerations
    }

    fn apply_concern(&mut self, group: ConcernGroup) {
        match group {
            ConcernGroup::Mobility => {
                self.needs_remote_work = true;
                self.needs_low_physical = true;
                self.mobility_considerations = true;
            }
            ConcernGroup::Vision => self.vision_considerations = true,
            ConcernGroup::Hearing => self.hearing_considerations = true,
            ConcernGroup::Cognitive => {
                self.cognitive_considerations = true;
                self.needs_flexible_schedule = true;
            }
            ConcernGroup::Chronic => {
                self.needs_flexible_schedule = true;
                self.needs_low_physical = true;
            }
            ConcernGroup::SocialAnxiety => {
                self.needs_low_social = true;
                self.needs_remote_work = true;
            }
        }
        if !self.detected_concerns.contains(&group) {
            self.detected_concerns.push(group);
        }
    }
}

/// Flags derived from low answers to capability questions.
const CAPABILITY_MARKERS: &[(&str, Flag)] = &[
    ("стоя", Flag::LowPhysical),
    ("поднимать", Flag::LowPhysical),
    ("слух", Flag::Hearing),
    ("зрение", Flag::Vision),
    ("спокойный", Flag::LowSocial),
];

/// Flags derived from high answers to need questions.
const NEED_MARKERS: &[(&str, Flag)] = &[
    ("дома", Flag::RemoteWork),
    ("сокращённому", Flag::FlexibleSchedule),
    ("сокращенному", Flag::FlexibleSchedule),
    ("перерывы", Flag::FlexibleSchedule),
];

#[derive(Debug, Clone, Copy)]
enum Flag {
    RemoteWork,
    LowPhysical,
    LowSocial,
    FlexibleSchedule,
    Vision,
    Hearing,
}

impl HealthAnalysis {
    fn set(&mut self, flag: Flag) {
        match flag {
            Flag::RemoteWork => self.needs_remote_work = true,
            Flag::LowPhysical => self.needs_low_physical = true,
            Flag::LowSocial => self.needs_low_social = true,
            Flag::FlexibleSchedule => self.needs_flexible_schedule = true,
            Flag::Vision => self.vision_considerations = true,
            Flag::Hearing => self.hearing_considerations = true,
        }
    }
}

/// Merges the free-text scan with the accessibility category answers.
///
/// `disability` should be the stat for the disability and accessibility category; other
/// categories contribute nothing.
pub fn analyze_health(
    disability_text: Option<&str>,
    disability: Option<&CategoryStat>,
) -> HealthAnalysis {
    let mut analysis = HealthAnalysis::default();

    if let Some(text) = disability_text {
        for group in detect_concerns(text) {
            analysis.apply_concern(group);
        }
    }

    if let Some(stat) = disability {
        for answer in &stat.low_scores {
            if answer.polarity != Some(AnswerPolarity::Need) {
                apply_markers(&mut analysis, answer, CAPABILITY_MARKERS);
            }
        }
        for answer in &stat.high_scores {
            if answer.polarity != Some(AnswerPolarity::Capability) {
                apply_markers(&mut analysis, answer, NEED_MARKERS);
            }
        }
    }

    analysis
}

/// Concern groups whose keywords occur in `text`.
pub fn detect_concerns(text: &str) -> Vec<ConcernGroup> {
    let lowered = text.to_lowercase();
    if lowered.trim().is_empty() {
        return Vec::new();
    }

    ConcernGroup::ordered()
        .into_iter()
        .filter(|group| {
            group
                .keywords()
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .collect()
}

fn apply_markers(analysis: &mut HealthAnalysis, answer: &ScoredAnswer, markers: &[(&str, Flag)]) {
    let text = answer.question_text.to_lowercase();
    for (marker, flag) in markers {
        if text.contains(marker) {
            analysis.set(*flag);
        }
    }
}
