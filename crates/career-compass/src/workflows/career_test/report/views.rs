use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityMap {
    pub suitable: Vec<String>,
    pub conditional: Vec<String>,
    pub not_recommended: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub title: String,
    pub reasoning: String,
    pub roles: Vec<String>,
    pub format: String,
    pub risks: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalScenarios {
    pub main: Scenario,
    pub alternative: Scenario,
    pub potential: Scenario,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextSteps {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub medium_term: Vec<String>,
    pub long_term: Vec<String>,
}

/// User-facing report with a fixed set of sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerReport {
    pub intro: String,
    pub personal_profile: String,
    pub accessibility_map: AccessibilityMap,
    pub strengths: Vec<String>,
    pub professional_scenarios: ProfessionalScenarios,
    pub risks_and_limits: Vec<String>,
    pub growth_areas: Vec<String>,
    pub next_steps: NextSteps,
    pub ai_explanation: String,
    pub summary: String,
}
