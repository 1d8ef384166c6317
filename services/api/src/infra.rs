use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use vacant_home_diagnosis::config::DiagnosisConfig;
use vacant_home_diagnosis::diagnosis::{DiagnosisEngine, Discriminant};
use vacant_home_diagnosis::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<DiagnosisEngine>,
}

pub(crate) fn load_engine(config: &DiagnosisConfig) -> Result<Arc<DiagnosisEngine>, AppError> {
    Ok(Arc::new(config.build_engine()?))
}

/// Answers in catalog order, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnswerSheet(pub(crate) Vec<Discriminant>);

/// Accepts `A,B,C`, `A B C` or a bare `ABC` run.
pub(crate) fn parse_answers(raw: &str) -> Result<AnswerSheet, String> {
    let tokens: Vec<String> = if raw.contains(',') || raw.contains(char::is_whitespace) {
        raw.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        raw.chars().map(String::from).collect()
    };

    if tokens.is_empty() {
        return Err("expected at least one answer".to_string());
    }

    tokens
        .iter()
        .map(|token| {
            token
                .parse::<Discriminant>()
                .map_err(|err| format!("failed to parse answer '{token}' ({err})"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(AnswerSheet)
}
