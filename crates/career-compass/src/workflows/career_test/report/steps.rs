use super::super::domain::Category;
use super::views::NextSteps;
use super::NarrativeContext;

pub fn next_steps(context: &NarrativeContext<'_>) -> NextSteps {
    let mut steps = NextSteps::default();

    match context.matches.first() {
        Some(best) => {
            steps.immediate.push(format!(
                "Изучите профессию «{}»: обязанности, требования и вакансии в вашем регионе.",
                best.title
            ));
            if let Some(role) = best.roles.first() {
                steps
                    .short_term
                    .push(format!("Найдите стажировку или пробный проект на роль «{role}»."));
            }
        }
        None => steps
            .immediate
            .push("Пройдите тест полностью, чтобы получить подборку профессий.".to_string()),
    }
    steps
        .immediate
        .push("Обсудите результаты с карьерным консультантом.".to_string());

    if context.health.any_need() {
        steps.immediate.push(
            "Составьте список необходимых условий работы и адаптаций рабочего места.".to_string(),
        );
        steps.short_term.push(
            "Узнайте о программах поддержки занятости и квотируемых рабочих местах.".to_string(),
        );
    }

    match context.percentage(Category::Skills) {
        Some(value) if value >= 70 => steps
            .short_term
            .push("Оформите резюме и портфолио, подчеркнув сильные навыки.".to_string()),
        _ => steps
            .short_term
            .push("Выберите базовый онлайн-курс по выбранному направлению.".to_string()),
    }

    match context.percentage(Category::LearningMotivation) {
        Some(value) if value >= 50 => steps.medium_term.push(
            "Пройдите профессиональное обучение и получите подтверждающий сертификат."
                .to_string(),
        ),
        _ => steps.medium_term.push(
            "Выделите регулярное время на обучение: начните с коротких модулей.".to_string(),
        ),
    }
    steps
        .medium_term
        .push("Начните откликаться на вакансии и стажировки.".to_string());

    if context.matches.len() > 1 {
        steps.long_term.push(
            "Сравните основное и альтернативное направления по опыту первых месяцев работы."
                .to_string(),
        );
    }
    steps
        .long_term
        .push("Закрепитесь в профессии и выстройте план карьерного роста.".to_string());

    steps
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::stats;
    use super::*;
    use crate::workflows::career_test::health::HealthAnalysis;

    #[test]
    fn every_horizon_has_at_least_one_step() {
        let stats = stats(&[]);
        let health = HealthAnalysis::default();
        let context = NarrativeContext {
            stats: &stats,
            health: &health,
            transcript: &[],
            matches: &[],
        };

        let steps = next_steps(&context);

        assert!(steps.immediate[0].contains("Пройдите тест полностью"));
        assert!(!steps.short_term.is_empty());
        assert!(!steps.medium_term.is_empty());
        assert_eq!(steps.long_term.len(), 1);
    }

    #[test]
    fn accessibility_needs_add_support_steps() {
        let stats = stats(&[(Category::Skills, 80)]);
        let health = HealthAnalysis {
            needs_flexible_schedule: true,
            ..HealthAnalysis::default()
        };
        let context = NarrativeContext {
            stats: &stats,
            health: &health,
            transcript: &[],
            matches: &[],
        };

        let steps = next_steps(&context);

        assert_eq!(steps.immediate.len(), 3);
        assert!(steps
            .short_term
            .iter()
            .any(|step| step.contains("программах поддержки")));
        assert!(steps.short_term.iter().any(|step| step.contains("портфолио")));
    }
}
