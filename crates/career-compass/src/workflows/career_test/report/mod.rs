//! Narrative sections of the career report.
//!
//! Every section is a pure function of [`NarrativeContext`]; sections are computed
//! independently and are not cross-checked against each other.

mod accessibility;
mod fallback;
mod profile;
mod scenarios;
mod steps;
mod strengths;
pub mod views;

pub use accessibility::{accessibility_map, risks_and_limits};
pub use profile::{ai_explanation, intro, personal_profile, summary};
pub use scenarios::professional_scenarios;
pub use steps::next_steps;
pub use strengths::{growth_areas, strengths};
pub use views::{AccessibilityMap, CareerReport, NextSteps, ProfessionalScenarios, Scenario};

use super::aggregation::{CategoryStat, CategoryStats};
use super::domain::{Category, QuestionType};
use super::health::HealthAnalysis;
use super::matching::CareerMatch;
use super::normalizer::TranscriptItem;

const INTROVERSION_MARKERS: &[&str] = &["интроверт", "в одиночку", "самостоятельно"];
const FATIGUE_MARKERS: &[&str] = &["устаю", "утомля", "усталост"];

/// Everything the section generators read.
pub struct NarrativeContext<'a> {
    pub stats: &'a CategoryStats,
    pub health: &'a HealthAnalysis,
    pub transcript: &'a [TranscriptItem],
    pub matches: &'a [CareerMatch],
}

impl<'a> NarrativeContext<'a> {
    pub fn stat(&self, category: Category) -> Option<&'a CategoryStat> {
        self.stats.get(&category).filter(|stat| stat.has_data())
    }

    pub fn percentage(&self, category: Category) -> Option<u8> {
        self.stat(category).map(|stat| stat.percentage)
    }

    pub fn scored_answers(&self) -> usize {
        self.stats.values().map(|stat| stat.answered).sum()
    }

    /// Self-described introversion: an agreeing scale answer or a free-text mention.
    pub fn mentions_introversion(&self) -> bool {
        self.transcript
            .iter()
            .any(|item| agrees_with(item, INTROVERSION_MARKERS))
    }

    /// Answers reporting quick fatigue.
    pub fn reports_fatigue(&self) -> bool {
        self.transcript
            .iter()
            .any(|item| agrees_with(item, FATIGUE_MARKERS))
    }
}

fn agrees_with(item: &TranscriptItem, markers: &[&str]) -> bool {
    let contains = |text: &str| {
        let lowered = text.to_lowercase();
        markers.iter().any(|marker| lowered.contains(marker))
    };

    match item.question_type {
        QuestionType::Scale => item.score.unwrap_or(0) >= 3 && contains(&item.question_text),
        QuestionType::YesNo => item.answer == "Да" && contains(&item.question_text),
        _ => contains(&item.answer),
    }
}

pub fn compose(context: &NarrativeContext<'_>) -> CareerReport {
    CareerReport {
        intro: intro(context),
        personal_profile: personal_profile(context),
        accessibility_map: accessibility_map(context),
        strengths: strengths(context),
        professional_scenarios: professional_scenarios(context),
        risks_and_limits: risks_and_limits(context),
        growth_areas: growth_areas(context),
        next_steps: next_steps(context),
        ai_explanation: ai_explanation(context),
        summary: summary(context),
    }
}
