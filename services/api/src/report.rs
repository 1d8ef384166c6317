use crate::infra::{load_engine, parse_answers, AnswerSheet};
use chrono::Local;
use clap::Args;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use vacant_home_diagnosis::config::AppConfig;
use vacant_home_diagnosis::diagnosis::{
    AnswerSheetImporter, AnswerSheetResult, DiagnosisEngine, DiagnosisOutcome, Discriminant,
    LoadingSequence, QuestionView, ResultView, SessionError, Transition,
};
use vacant_home_diagnosis::error::AppError;

const GAUGE_WIDTH: usize = 20;

#[derive(Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Skip the timed analysis messages before the result.
    #[arg(long)]
    pub(crate) skip_loading: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// One answer per question in catalog order, e.g. `A,B,D,...` or `ABD...`
    #[arg(long, value_parser = parse_answers)]
    pub(crate) answers: AnswerSheet,
    /// Print the outcome and result payload as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Answer-sheet CSV export with `respondent` and `Q1`..`Qn` columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the scored rows as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Answer(Discriminant),
    Back,
    Quit,
    Unrecognized,
}

fn parse_input(line: &str) -> Input {
    match line.trim().to_ascii_lowercase().as_str() {
        "back" | "<" | "p" => Input::Back,
        "quit" | "exit" | "q" => Input::Quit,
        "1" => Input::Answer(Discriminant::A),
        "2" => Input::Answer(Discriminant::B),
        "3" => Input::Answer(Discriminant::C),
        "4" => Input::Answer(Discriminant::D),
        other => other
            .parse::<Discriminant>()
            .map(Input::Answer)
            .unwrap_or(Input::Unrecognized),
    }
}

fn read_line() -> Result<Option<String>, AppError> {
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

pub(crate) async fn run_interactive(args: RunArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(&config.diagnosis)?;
    let mut session = engine.session();
    let mut view = session.start()?;

    println!("Vacant home diagnosis");
    println!(
        "{} questions. Answer with A-D, `back` to revisit the previous question, `quit` to stop.",
        view.total
    );

    let outcome = loop {
        print!("{}", format_question(&view));

        let Some(line) = read_line()? else {
            println!("\nDiagnosis abandoned.");
            return Ok(());
        };

        match parse_input(&line) {
            Input::Answer(value) => match session.answer(value) {
                Ok(Transition::Question(next)) => view = next,
                Ok(Transition::Completed(outcome)) => break outcome,
                Err(SessionError::UnknownOption { value, .. }) => {
                    println!("Option {value} is not available for this question.");
                }
                Err(err) => return Err(err.into()),
            },
            Input::Back => view = session.back()?,
            Input::Quit => {
                println!("Diagnosis abandoned.");
                return Ok(());
            }
            Input::Unrecognized => println!("Please answer A, B, C or D."),
        }
    };

    let sequence = if args.skip_loading {
        LoadingSequence::instant()
    } else {
        LoadingSequence::standard()
    };
    println!();
    sequence.play(|step| println!("  {}", step.message)).await;

    println!("\n{}", format_outcome(&engine, &outcome));
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(&config.diagnosis)?;
    let outcome = engine.evaluate(&args.answers.0)?;

    if args.json {
        let body = serde_json::json!({
            "policy": engine.policy().name,
            "outcome": outcome,
            "result": engine.render(&outcome),
        });
        println!("{}", serde_json::to_string_pretty(&body).map_err(io::Error::from)?);
    } else {
        println!("{}", format_outcome(&engine, &outcome));
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(&config.diagnosis)?;
    let results = AnswerSheetImporter::from_path(&args.csv, &engine)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).map_err(io::Error::from)?
        );
    } else {
        println!(
            "Answer sheets: {} ({} policy, generated {})",
            args.csv.display(),
            engine.policy().name,
            Local::now().format("%Y-%m-%d %H:%M")
        );
        print!("{}", format_batch(&engine, &results));
    }
    Ok(())
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(&config.diagnosis)?;
    print!("{}", format_catalog(&engine));
    Ok(())
}

fn risk_gauge(risk: i32) -> String {
    let filled = usize::try_from(risk.clamp(0, 100)).unwrap_or(0) * GAUGE_WIDTH / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled),
        risk
    )
}

fn format_question(view: &QuestionView) -> String {
    let mut out = format!("\nQ{}/{}  {}\n", view.number, view.total, view.text);
    for option in &view.options {
        out.push_str(&format!("  {}) {}\n", option.value, option.text));
    }
    if view.can_go_back {
        out.push_str("  (type `back` for the previous question)\n");
    }
    out
}

fn format_result(view: &ResultView) -> String {
    let payload = &view.payload;
    let mut out = format!("{}\n{}\n", payload.label, payload.headline);
    if !payload.sub_copy.is_empty() {
        out.push_str(&format!("{}\n", payload.sub_copy));
    }
    out.push_str(&format!("\nRisk  {}\n", risk_gauge(view.risk)));
    out.push_str(&format!(
        "Scores  U {} | L {} | B {} | V {}\n",
        view.totals.urgency, view.totals.legal, view.totals.burden, view.totals.value
    ));
    out.push_str(&format!("\nWhy now: {}\n", payload.why_now));
    out.push_str(&format!("Risk if left alone: {}\n", payload.risk));

    if !payload.actions.is_empty() {
        out.push_str("\nNext steps\n");
        for (index, action) in payload.actions.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", index + 1, action));
        }
    }
    if !payload.supplement.is_empty() {
        out.push_str(&format!("\n{}\n", payload.supplement));
    }
    out.push_str(&format!("\n>> {}\n", payload.cta_text));
    out
}

fn format_outcome(engine: &DiagnosisEngine, outcome: &DiagnosisOutcome) -> String {
    match engine.render(outcome) {
        Some(view) => format_result(&view),
        None => format!(
            "Result type {} has no description in the result catalog.\nRisk  {}\n",
            outcome.category,
            risk_gauge(outcome.risk)
        ),
    }
}

fn format_batch(engine: &DiagnosisEngine, results: &[AnswerSheetResult]) -> String {
    let width = results
        .iter()
        .map(|row| row.respondent.len())
        .max()
        .unwrap_or(0)
        .max("respondent".len());

    let mut out = format!("{:<width$}  type  risk\n", "respondent");
    for row in results {
        let label = engine
            .results()
            .get(row.outcome.category)
            .map(|payload| payload.label.as_str())
            .unwrap_or("(no description)");
        out.push_str(&format!(
            "{:<width$}  {:<4}  {}  {}\n",
            row.respondent,
            row.outcome.category.as_str(),
            risk_gauge(row.outcome.risk),
            label
        ));
    }
    out
}

fn format_catalog(engine: &DiagnosisEngine) -> String {
    let questions = engine.questions();
    let risk = &engine.policy().risk;
    let mut out = format!(
        "Policy: {} | max attainable score {} | risk scale max {}\n",
        engine.policy().name,
        questions.max_attainable_score(),
        risk.max_score()
    );

    for question in questions.questions() {
        out.push_str(&format!("\nQ{} {}\n", question.id, question.text));
        for option in &question.options {
            let deltas: Vec<String> = option
                .score
                .iter()
                .map(|(key, delta)| format!("{key}{delta:+}"))
                .collect();
            let deltas = if deltas.is_empty() {
                "-".to_string()
            } else {
                deltas.join(" ")
            };
            out.push_str(&format!("  {}) {}  [{}]\n", option.value, option.text, deltas));
        }
    }
    out
}
