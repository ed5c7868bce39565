use super::super::matching::CareerMatch;
use super::views::{ProfessionalScenarios, Scenario};
use super::NarrativeContext;

pub fn professional_scenarios(context: &NarrativeContext<'_>) -> ProfessionalScenarios {
    let scenario = |index: usize, kind: &str| match context.matches.get(index) {
        Some(entry) => from_match(entry, kind, context.health.needs_remote_work),
        None => placeholder(kind),
    };

    ProfessionalScenarios {
        main: scenario(0, "Основной"),
        alternative: scenario(1, "Альтернативный"),
        potential: scenario(2, "Перспективный"),
    }
}

fn from_match(entry: &CareerMatch, kind: &str, needs_remote: bool) -> Scenario {
    let format = match (entry.remote_work_possible, needs_remote) {
        (true, true) => "Удалённо",
        (true, false) => "Удалённо, гибрид или в офисе",
        (false, true) => "Очно; потребуется адаптация рабочего места",
        (false, false) => "Очно",
    };

    let penalties: Vec<&str> = entry
        .penalties()
        .map(|adjustment| adjustment.note.as_str())
        .collect();
    let risks = if penalties.is_empty() {
        "Существенных рисков не выявлено.".to_string()
    } else {
        format!("Учтите: {}.", penalties.join("; "))
    };

    Scenario {
        title: entry.title.clone(),
        reasoning: format!(
            "{kind} сценарий. {} {}",
            entry.description, entry.reasoning
        ),
        roles: entry.roles.clone(),
        format: format.to_string(),
        risks,
    }
}

fn placeholder(kind: &str) -> Scenario {
    Scenario {
        title: format!("{kind} сценарий не определён"),
        reasoning: "Недостаточно данных для подбора профессии.".to_string(),
        roles: Vec::new(),
        format: "Не определён".to_string(),
        risks: "Пройдите тест полностью, чтобы оценить риски.".to_string(),
    }
}
