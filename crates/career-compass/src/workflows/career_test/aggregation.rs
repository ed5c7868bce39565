use super::domain::Category;
use super::normalizer::{ScoredAnswer, SCALE_MAX};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Qualitative level derived from a category percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLevel {
    NoData,
    Low,
    BelowMedium,
    Medium,
    High,
    VeryHigh,
}

impl ScoreLevel {
    pub const fn from_percentage(percentage: u8) -> Self {
        if percentage >= 75 {
            Self::VeryHigh
        } else if percentage >= 60 {
            Self::High
        } else if percentage >= 40 {
            Self::Medium
        } else if percentage >= 25 {
            Self::BelowMedium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "очень высокий",
            Self::High => "высокий",
            Self::Medium => "средний",
            Self::BelowMedium => "ниже среднего",
            Self::Low => "низкий",
            Self::NoData => "нет данных",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: Category,
    pub label: String,
    pub answered: usize,
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: u8,
    pub level: ScoreLevel,
    pub average_score: f32,
    pub high_scores: Vec<ScoredAnswer>,
    pub low_scores: Vec<ScoredAnswer>,
}

impl CategoryStat {
    fn empty(category: Category) -> Self {
        Self {
            category,
            label: category.label().to_string(),
            answered: 0,
            total_score: 0,
            max_score: 0,
            percentage: 0,
            level: ScoreLevel::NoData,
            average_score: 0.0,
            high_scores: Vec::new(),
            low_scores: Vec::new(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.answered > 0
    }
}

pub type CategoryStats = BTreeMap<Category, CategoryStat>;

/// Builds one stat per fixed category; categories without scored answers report `NoData`.
pub fn aggregate(scored: &BTreeMap<Category, Vec<ScoredAnswer>>) -> CategoryStats {
    Category::ordered()
        .into_iter()
        .map(|category| {
            let stat = match scored.get(&category) {
                Some(answers) if !answers.is_empty() => summarize(category, answers),
                _ => CategoryStat::empty(category),
            };
            (category, stat)
        })
        .collect()
}

/// Round-half-up percentage of `total` over `max`, kept in integers.
fn rounded_percentage(total: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    ((200 * total + max) / (2 * max)).min(100) as u8
}

fn summarize(category: Category, answers: &[ScoredAnswer]) -> CategoryStat {
    let count = answers.len() as u32;
    let total_score: u32 = answers.iter().map(|answer| answer.score as u32).sum();
    let max_score = count * SCALE_MAX as u32;
    let percentage = rounded_percentage(total_score, max_score);
    let average_score = ((total_score as f32 / count as f32) * 10.0).round() / 10.0;

    CategoryStat {
        category,
        label: category.label().to_string(),
        answered: answers.len(),
        total_score,
        max_score,
        percentage,
        level: ScoreLevel::from_percentage(percentage),
        average_score,
        high_scores: answers
            .iter()
            .filter(|answer| answer.score >= 3)
            .cloned()
            .collect(),
        low_scores: answers
            .iter()
            .filter(|answer| answer.score <= 1)
            .cloned()
            .collect(),
    }
}

/// Categories with data, strongest first; ties keep category order.
pub fn ranked(stats: &CategoryStats) -> Vec<&CategoryStat> {
    let mut ranked: Vec<&CategoryStat> = stats.values().filter(|stat| stat.has_data()).collect();
    ranked.sort_by(|left, right| right.percentage.cmp(&left.percentage));
    ranked
}
