use super::super::health::HealthAnalysis;
use super::catalog::{ConsiderationTrigger, DemandLevel, OccupationCandidate};
use super::MatchAdjustment;

const REMOTE_MATCH_BONUS: i16 = 15;
const REMOTE_MISMATCH_PENALTY: i16 = -20;
const LOW_PHYSICAL_MATCH_BONUS: i16 = 10;
const LOW_PHYSICAL_MISMATCH_PENALTY: i16 = -25;
const LOW_SOCIAL_MATCH_BONUS: i16 = 10;
const LOW_SOCIAL_MISMATCH_PENALTY: i16 = -15;

/// Bonuses and penalties from comparing health flags with an occupation's attributes.
pub(crate) fn accessibility_adjustments(
    occupation: &OccupationCandidate,
    health: &HealthAnalysis,
) -> Vec<MatchAdjustment> {
    let mut adjustments = Vec::new();

    if health.needs_remote_work {
        adjustments.push(if occupation.remote_work_possible {
            MatchAdjustment::new(REMOTE_MATCH_BONUS, "возможна удалённая работа")
        } else {
            MatchAdjustment::new(
                REMOTE_MISMATCH_PENALTY,
                "нужна удалённая работа, а профессия предполагает присутствие на месте",
            )
        });
    }

    if health.needs_low_physical {
        adjustments.push(if occupation.physical_demands == DemandLevel::Low {
            MatchAdjustment::new(LOW_PHYSICAL_MATCH_BONUS, "низкая физическая нагрузка")
        } else {
            MatchAdjustment::new(
                LOW_PHYSICAL_MISMATCH_PENALTY,
                format!(
                    "физическая нагрузка {}, а требуется низкая",
                    occupation.physical_demands.label()
                ),
            )
        });
    }

    if health.needs_low_social {
        adjustments.push(if occupation.social_interaction == DemandLevel::Low {
            MatchAdjustment::new(LOW_SOCIAL_MATCH_BONUS, "минимальное общение с людьми")
        } else {
            MatchAdjustment::new(
                LOW_SOCIAL_MISMATCH_PENALTY,
                format!(
                    "интенсивность общения {}, а комфортнее низкая",
                    occupation.social_interaction.label()
                ),
            )
        });
    }

    for consideration in &occupation.considerations {
        let triggered = match consideration.trigger {
            ConsiderationTrigger::Mobility => health.mobility_considerations,
            ConsiderationTrigger::Vision => health.vision_considerations,
            ConsiderationTrigger::Hearing => health.hearing_considerations,
            ConsiderationTrigger::Cognitive => health.cognitive_considerations,
        };
        if triggered {
            adjustments.push(MatchAdjustment::new(
                consideration.adjustment,
                consideration.note.clone(),
            ));
        }
    }

    adjustments
}
