use super::super::aggregation::ranked;
use super::super::domain::Category;
use super::super::normalizer::SCALE_MAX;
use super::NarrativeContext;

const MAX_STRENGTHS: usize = 5;
const STRENGTH_THRESHOLD: u8 = 60;
const GROWTH_THRESHOLD: u8 = 60;

/// Strong categories first, then individual answers at the top of the scale; at most five.
pub fn strengths(context: &NarrativeContext<'_>) -> Vec<String> {
    let mut strengths: Vec<String> = ranked(context.stats)
        .into_iter()
        .filter(|stat| stat.percentage >= STRENGTH_THRESHOLD)
        .map(|stat| {
            format!(
                "{}: {} уровень ({}%)",
                stat.label,
                stat.level.label(),
                stat.percentage
            )
        })
        .collect();

    let full_marks = context
        .transcript
        .iter()
        .filter(|item| item.score == Some(SCALE_MAX))
        .filter(|item| item.category != Category::DisabilityAccessibility)
        .map(|item| item.question_text.trim_end_matches('.').to_string());

    for text in full_marks {
        if strengths.len() >= MAX_STRENGTHS {
            break;
        }
        if !strengths.contains(&text) {
            strengths.push(text);
        }
    }

    strengths.truncate(MAX_STRENGTHS);
    strengths
}

/// Categories below the growth threshold, weakest first, each with advice.
pub fn growth_areas(context: &NarrativeContext<'_>) -> Vec<String> {
    let mut weak: Vec<_> = ranked(context.stats)
        .into_iter()
        .filter(|stat| stat.percentage < GROWTH_THRESHOLD)
        .filter(|stat| stat.category != Category::DisabilityAccessibility)
        .collect();
    weak.sort_by_key(|stat| stat.percentage);

    weak.into_iter()
        .map(|stat| {
            format!(
                "{} ({}%): {}",
                stat.label,
                stat.percentage,
                advice(stat.category)
            )
        })
        .collect()
}

fn advice(category: Category) -> &'static str {
    match category {
        Category::Interests => {
            "попробуйте короткие пробные проекты в разных сферах, чтобы найти то, что увлекает"
        }
        Category::Skills => "пройдите практический курс и соберите портфолио из учебных задач",
        Category::Values => "сформулируйте, что для вас важно в работе, и сверяйте с этим вакансии",
        Category::WorkEnvironment => {
            "опишите комфортные для вас условия работы и обсуждайте их на собеседованиях"
        }
        Category::Personality => "развивайте самоорганизацию: планируйте день и отмечайте выполненное",
        Category::LearningMotivation => {
            "ставьте небольшие учебные цели и отмечайте прогресс каждую неделю"
        }
        Category::DisabilityAccessibility => {
            "узнайте о доступных мерах поддержки и адаптации рабочего места"
        }
    }
}
