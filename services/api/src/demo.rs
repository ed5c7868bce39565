use crate::infra::{load_engine, load_question_bank, InMemoryResultRepository};
use career_compass::config::{CareerTestConfig, DEFAULT_MAX_MATCHES};
use career_compass::error::AppError;
use career_compass::workflows::career_test::{
    AnswerValue, CareerTestOutcome, CareerTestService, CareerTestSubmission, QuestionId, UserId,
    STANDARD_TEST_ID,
};
use chrono::{Duration, Utc};
use clap::Args;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file with answers keyed by question id, or an object with `answers` and
    /// `disability_text`
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// CSV question bank (defaults to the built-in career test)
    #[arg(long)]
    pub(crate) questions: Option<PathBuf>,
    /// JSON occupation catalog (defaults to the built-in catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Free-text description of health conditions or accessibility needs
    #[arg(long)]
    pub(crate) disability_text: Option<String>,
    /// Number of ranked occupations to keep
    #[arg(long, default_value_t = DEFAULT_MAX_MATCHES)]
    pub(crate) max_matches: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Disability text for the canned submission
    #[arg(long)]
    pub(crate) disability_text: Option<String>,
    /// Print the stored result as JSON after the readable report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Deserialize)]
struct AnswersEnvelope {
    answers: BTreeMap<QuestionId, AnswerValue>,
    #[serde(default)]
    disability_text: Option<String>,
}

type Answers = BTreeMap<QuestionId, AnswerValue>;

/// Accepts `{"answers": {...}, "disability_text": ...}` or a bare answer map.
fn parse_answers(raw: &str) -> Result<(Answers, Option<String>), AppError> {
    if let Ok(envelope) = serde_json::from_str::<AnswersEnvelope>(raw) {
        return Ok((envelope.answers, envelope.disability_text));
    }
    let answers = serde_json::from_str::<Answers>(raw).map_err(std::io::Error::from)?;
    Ok((answers, None))
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        questions,
        catalog,
        disability_text,
        max_matches,
    } = args;

    let (answers, file_disability_text) = parse_answers(&std::fs::read_to_string(answers)?)?;
    let disability_text = disability_text.or(file_disability_text);

    let bank = load_question_bank(questions.as_deref())?;
    let engine = load_engine(catalog.as_deref(), max_matches)?;
    let outcome = engine.evaluate(&bank, &answers, disability_text.as_deref());

    let rendered = serde_json::to_string_pretty(&outcome).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        disability_text,
        json,
    } = args;

    let config = CareerTestConfig::default();
    let bank = load_question_bank(config.question_bank_path.as_deref())?;
    let engine = load_engine(config.catalog_path.as_deref(), config.max_matches)?;
    let repository = Arc::new(InMemoryResultRepository::default());
    let service = CareerTestService::new(Arc::new(bank), repository, Arc::new(engine));

    println!("Career test demo");
    let submission = demo_submission(
        disability_text.or_else(|| Some("Передвигаюсь на инвалидной коляске".to_string())),
    );
    let result = match service.submit(STANDARD_TEST_ID, submission) {
        Ok(result) => result,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Stored result {} for {} ({} s to complete)",
        result.result_id.0, result.user_id.0, result.completion_seconds
    );

    render_outcome(&result.outcome);

    match service.history(&result.user_id) {
        Ok(history) => {
            println!("\nHistory for {}", result.user_id.0);
            for entry in history.iter().map(|result| result.summary_view()) {
                println!(
                    "  - {} | {} | {}",
                    entry.result_id.0,
                    entry.completed_at.format("%Y-%m-%d %H:%M"),
                    entry.top_match.as_deref().unwrap_or("нет совпадений")
                );
            }
        }
        Err(err) => println!("  History unavailable: {}", err),
    }

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("\nStored result payload:\n{}", json),
            Err(err) => println!("  Stored result payload unavailable: {}", err),
        }
    }

    Ok(())
}

fn render_outcome(outcome: &CareerTestOutcome) {
    let report = &outcome.report;
    if outcome.fallback {
        println!("  Personalised report unavailable; showing the general report");
    }

    println!("\n{}", report.intro);
    println!("\nCategory profile:");
    for stat in outcome.category_stats.values().filter(|stat| stat.has_data()) {
        println!(
            "  - {}: {}% ({}, {} answers)",
            stat.label,
            stat.percentage,
            stat.level.label(),
            stat.answered
        );
    }

    let concerns: Vec<&str> = outcome
        .health
        .detected_concerns
        .iter()
        .map(|concern| concern.label())
        .collect();
    if !concerns.is_empty() {
        println!("Detected considerations: {}", concerns.join(", "));
    }

    println!("\nTop matches:");
    for entry in &outcome.matches {
        println!(
            "  - {} {}% (base {}%, {} adjustments)",
            entry.title,
            entry.match_percentage,
            entry.base_percentage,
            entry.adjustments.len()
        );
    }

    let scenarios = &report.professional_scenarios;
    println!("\nScenarios:");
    for (kind, scenario) in [
        ("main", &scenarios.main),
        ("alternative", &scenarios.alternative),
        ("potential", &scenarios.potential),
    ] {
        println!("  - {kind}: {} [{}]", scenario.title, scenario.format);
        println!("    risks: {}", scenario.risks);
    }

    if !report.strengths.is_empty() {
        println!("\nStrengths:");
        for strength in &report.strengths {
            println!("  - {strength}");
        }
    }

    println!("\nNext steps:");
    for (horizon, steps) in [
        ("immediate", &report.next_steps.immediate),
        ("short term", &report.next_steps.short_term),
        ("medium term", &report.next_steps.medium_term),
        ("long term", &report.next_steps.long_term),
    ] {
        for step in steps {
            println!("  - [{horizon}] {step}");
        }
    }

    println!("\n{}", report.summary);
}

fn demo_submission(disability_text: Option<String>) -> CareerTestSubmission {
    let scale = [
        (1, 4),
        (2, 3),
        (3, 2),
        (4, 4),
        (5, 3),
        (6, 1),
        (7, 3),
        (8, 4),
        (9, 4),
        (10, 2),
        (11, 3),
        (12, 2),
        (13, 4),
        (14, 4),
        (15, 3),
        (16, 0),
        (17, 0),
        (18, 4),
        (19, 4),
        (20, 3),
        (21, 4),
        (22, 2),
        (23, 3),
    ];
    let mut answers: BTreeMap<QuestionId, AnswerValue> = scale
        .into_iter()
        .map(|(id, score)| (QuestionId(id), AnswerValue::Integer(score)))
        .collect();
    answers.insert(
        QuestionId(24),
        AnswerValue::List(vec![AnswerValue::Integer(0), AnswerValue::Integer(1)]),
    );
    answers.insert(QuestionId(25), AnswerValue::Integer(0));
    answers.insert(QuestionId(26), AnswerValue::Flag(true));
    answers.insert(
        QuestionId(27),
        AnswerValue::Text("Рисую и собираю сайты для друзей".to_string()),
    );

    CareerTestSubmission {
        user_id: UserId("demo-user".to_string()),
        answers,
        disability_text,
        started_at: Some(Utc::now() - Duration::minutes(14)),
    }
}
