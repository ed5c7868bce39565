use super::super::aggregation::ranked;
use super::super::domain::Category;
use super::views::AccessibilityMap;
use super::NarrativeContext;

const WEAK_CATEGORY_THRESHOLD: u8 = 40;

pub fn accessibility_map(context: &NarrativeContext<'_>) -> AccessibilityMap {
    let health = context.health;
    let mut map = AccessibilityMap::default();

    if !health.any_need() {
        map.suitable.push("Офисная работа".to_string());
        map.suitable.push("Гибридный формат".to_string());
        map.suitable.push("Удалённая работа".to_string());
        map.conditional.push("Работа с высокой физической нагрузкой".to_string());
        return map;
    }

    if health.needs_remote_work || health.mobility_considerations {
        map.suitable.push("Удалённая работа из дома".to_string());
        map.conditional
            .push("Гибридный формат при доступном офисе и транспорте".to_string());
        map.not_recommended
            .push("Работа с ежедневными поездками и разъездами".to_string());
    } else {
        map.suitable.push("Офисная или гибридная работа".to_string());
    }

    if health.needs_low_physical {
        map.suitable.push("Сидячая работа за компьютером".to_string());
        map.not_recommended
            .push("Работа стоя и подъём тяжестей".to_string());
    }

    if health.needs_low_social {
        map.suitable
            .push("Самостоятельные задачи с письменной коммуникацией".to_string());
        map.conditional.push("Работа в небольшой постоянной команде".to_string());
        map.not_recommended
            .push("Постоянная работа с потоком клиентов".to_string());
    }

    if health.needs_flexible_schedule {
        map.suitable.push("Гибкий или сокращённый график".to_string());
        map.not_recommended
            .push("Сменный график и жёсткие дедлайны без перерывов".to_string());
    }

    if health.vision_considerations {
        map.conditional.push(
            "Работа с экраном при наличии экранного увеличителя или программы чтения с экрана"
                .to_string(),
        );
    }

    if health.hearing_considerations {
        map.conditional
            .push("Совещания при наличии субтитров или переводчика жестового языка".to_string());
        map.not_recommended
            .push("Работа, основанная на телефонных звонках".to_string());
    }

    if health.cognitive_considerations {
        map.conditional
            .push("Многозадачная работа при чётких инструкциях и чек-листах".to_string());
    }

    map
}

pub fn risks_and_limits(context: &NarrativeContext<'_>) -> Vec<String> {
    let health = context.health;
    let mut risks = Vec::new();

    if health.needs_remote_work {
        risks.push(
            "Не все работодатели готовы к полностью удалённому формату: уточняйте это заранее."
                .to_string(),
        );
    }
    if health.needs_low_physical {
        risks.push("Профессии с физической нагрузкой могут ухудшить самочувствие.".to_string());
    }
    if health.needs_low_social {
        risks.push(
            "Интенсивное общение может быстро истощать: планируйте время на восстановление."
                .to_string(),
        );
    }
    if health.needs_flexible_schedule {
        risks.push(
            "Жёсткий график может быть тяжёлым: обсуждайте с работодателем гибкие условия."
                .to_string(),
        );
    }
    if health.hearing_considerations {
        risks.push(
            "Голосовые коммуникации потребуют технических средств или текстовых альтернатив."
                .to_string(),
        );
    }
    if health.vision_considerations {
        risks.push(
            "Работа с мелким текстом и графикой потребует вспомогательных технологий.".to_string(),
        );
    }

    for stat in ranked(context.stats)
        .into_iter()
        .rev()
        .filter(|stat| stat.percentage < WEAK_CATEGORY_THRESHOLD)
    {
        if stat.category == Category::DisabilityAccessibility {
            continue;
        }
        risks.push(format!(
            "Категория «{}» выражена слабо ({}%): профессии, где она ключевая, могут даваться тяжелее.",
            stat.label, stat.percentage
        ));
    }

    if context.reports_fatigue() {
        risks.push(
            "Вы отмечаете быструю утомляемость: избегайте перегрузок и длительных смен."
                .to_string(),
        );
    }

    risks
}
