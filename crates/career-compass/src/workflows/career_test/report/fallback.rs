use super::views::{AccessibilityMap, CareerReport, NextSteps, ProfessionalScenarios, Scenario};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn general_scenario(title: &str) -> Scenario {
    Scenario {
        title: title.to_string(),
        reasoning: "Рекомендация сформирована без учёта ваших ответов.".to_string(),
        roles: Vec::new(),
        format: "Обсуждается индивидуально".to_string(),
        risks: "Оцените вместе с консультантом.".to_string(),
    }
}

impl CareerReport {
    /// Static report returned when the personalised one cannot be built.
    pub fn fallback() -> Self {
        Self {
            intro: "Не удалось автоматически обработать ваши ответы. Ниже приведены общие рекомендации."
                .to_string(),
            personal_profile: "Персональный профиль временно недоступен.".to_string(),
            accessibility_map: AccessibilityMap {
                suitable: strings(&["Удалённая работа", "Гибкий график"]),
                conditional: strings(&["Гибридный формат"]),
                not_recommended: Vec::new(),
            },
            strengths: Vec::new(),
            professional_scenarios: ProfessionalScenarios {
                main: general_scenario("Консультация с карьерным специалистом"),
                alternative: general_scenario("Пробные проекты в интересующих сферах"),
                potential: general_scenario("Обучение востребованной профессии"),
            },
            risks_and_limits: strings(&["Рекомендации не персонализированы."]),
            growth_areas: Vec::new(),
            next_steps: NextSteps {
                immediate: strings(&["Попробуйте пройти тест ещё раз позже."]),
                short_term: strings(&["Обратитесь к карьерному консультанту."]),
                medium_term: strings(&["Выберите направление для обучения."]),
                long_term: strings(&["Постройте план профессионального развития."]),
            },
            ai_explanation: "Автоматический анализ не был выполнен из-за внутренней ошибки."
                .to_string(),
            summary: "Результаты временно недоступны.".to_string(),
        }
    }
}
