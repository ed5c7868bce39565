use super::super::aggregation::{ranked, ScoreLevel};
use super::super::domain::Category;
use super::NarrativeContext;

pub fn intro(context: &NarrativeContext<'_>) -> String {
    let answered = context.transcript.len();
    let scored = context.scored_answers();

    if scored == 0 {
        return format!(
            "Вы ответили на {answered} вопрос(ов), но среди них нет ответов по шкале. \
Отчёт построен по общим рекомендациям; пройдите тест полностью, чтобы получить персональный профиль."
        );
    }

    let categories = ranked(context.stats);
    let mut intro = format!(
        "Отчёт построен по {answered} ответам, из них {scored} оценены по шкале в {} категориях.",
        categories.len()
    );
    if let Some(top) = categories.first() {
        intro.push_str(&format!(
            " Наиболее выражена категория «{}» ({}%).",
            top.label, top.percentage
        ));
    }
    intro
}

pub fn personal_profile(context: &NarrativeContext<'_>) -> String {
    let categories = ranked(context.stats);
    if categories.is_empty() {
        return "Недостаточно данных для построения личного профиля.".to_string();
    }

    let mut sentences = Vec::new();

    let pronounced: Vec<String> = categories
        .iter()
        .filter(|stat| stat.level >= ScoreLevel::High)
        .map(|stat| {
            format!(
                "«{}» ({}%, {} уровень)",
                stat.label,
                stat.percentage,
                stat.level.label()
            )
        })
        .collect();
    if pronounced.is_empty() {
        sentences.push(
            "Ваш профиль сбалансирован: ни одна категория не выделяется резко, поэтому стоит пробовать разные направления."
                .to_string(),
        );
    } else {
        sentences.push(format!("Ваши сильные стороны: {}.", pronounced.join(", ")));
    }

    match context.percentage(Category::Personality) {
        Some(value) if value >= 70 => sentences.push(
            "Вы внимательны, ответственны и умеете доводить начатое до конца.".to_string(),
        ),
        Some(value) if value < 40 => sentences.push(
            "Личностные качества пока выражены слабо: комфортнее начинать с понятных, структурированных задач."
                .to_string(),
        ),
        _ => {}
    }

    if context.mentions_introversion() {
        sentences.push(
            "Вы описываете себя как интроверта: продуктивнее всего вы будете в самостоятельной работе или в небольшой команде."
                .to_string(),
        );
    }

    if let Some(value) = context.percentage(Category::LearningMotivation) {
        if value >= 75 {
            sentences.push(
                "Высокая мотивация к обучению позволит быстро осваивать новую профессию."
                    .to_string(),
            );
        } else if value < 50 {
            sentences.push(
                "Мотивация к обучению умеренная: выбирайте короткие практические курсы."
                    .to_string(),
            );
        }
    }

    if context.health.any_need() {
        sentences.push(
            "При выборе работы важно учитывать ваши потребности в доступной среде."
                .to_string(),
        );
    }

    sentences.join(" ")
}

pub fn ai_explanation(context: &NarrativeContext<'_>) -> String {
    let scored = context.scored_answers();
    let mut explanation = format!(
        "Результат рассчитан автоматически по {scored} ответам по шкале от 0 до 4. \
Для каждой категории вычислен процент от максимально возможного балла. \
Совпадение с профессией равно среднему соответствию ваших процентов требованиям профессии"
    );

    let adjusted = context
        .matches
        .iter()
        .filter(|entry| !entry.adjustments.is_empty())
        .count();
    if adjusted > 0 {
        explanation.push_str(&format!(
            " с поправками на потребности в доступности (учтены для {adjusted} профессий)."
        ));
    } else {
        explanation.push('.');
    }

    if !context.health.detected_concerns.is_empty() {
        let concerns = context
            .health
            .detected_concerns
            .iter()
            .map(|concern| concern.label())
            .collect::<Vec<_>>()
            .join(", ");
        explanation.push_str(&format!(" Из вашего описания учтены особенности: {concerns}."));
    }

    explanation.push_str(
        " Отчёт носит рекомендательный характер и не заменяет консультацию специалиста.",
    );
    explanation
}

pub fn summary(context: &NarrativeContext<'_>) -> String {
    let top = ranked(context.stats).into_iter().next();
    match (top, context.matches.first()) {
        (Some(category), Some(best)) => format!(
            "Ваш ведущий профиль — «{}» ({}%). Наиболее подходящее направление: «{}» (совпадение {}%).",
            category.label, category.percentage, best.title, best.match_percentage
        ),
        (None, Some(best)) => format!(
            "Данных по шкале недостаточно; предварительно подходящее направление: «{}».",
            best.title
        ),
        (Some(category), None) => format!(
            "Ваш ведущий профиль — «{}» ({}%).",
            category.label, category.percentage
        ),
        (None, None) => {
            "Пройдите тест полностью, чтобы получить рекомендации по профессиям.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{scale_item, stats};
    use super::*;
    use crate::workflows::career_test::health::HealthAnalysis;

    #[test]
    fn profile_lists_pronounced_categories_and_introversion() {
        let stats = stats(&[(Category::Skills, 80), (Category::Values, 30)]);
        let health = HealthAnalysis::default();
        let transcript = [scale_item("Я считаю себя интровертом", 4)];
        let context = NarrativeContext {
            stats: &stats,
            health: &health,
            transcript: &transcript,
            matches: &[],
        };

        let profile = personal_profile(&context);

        assert!(profile.contains("«Навыки» (80%, очень высокий уровень)"));
        assert!(!profile.contains("Ценности"));
        assert!(profile.contains("интроверта"));
    }

    #[test]
    fn intro_explains_missing_scale_answers() {
        let stats = stats(&[]);
        let health = HealthAnalysis::default();
        let context = NarrativeContext {
            stats: &stats,
            health: &health,
            transcript: &[],
            matches: &[],
        };

        assert!(intro(&context).contains("нет ответов по шкале"));
        assert_eq!(
            personal_profile(&context),
            "Недостаточно данных для построения личного профиля."
        );
    }

    #[test]
    fn summary_names_top_category() {
        let stats = stats(&[(Category::Interests, 55), (Category::Skills, 65)]);
        let health = HealthAnalysis::default();
        let context = NarrativeContext {
            stats: &stats,
            health: &health,
            transcript: &[],
            matches: &[],
        };

        assert!(summary(&context).contains("«Навыки» (65%)"));
    }
}
