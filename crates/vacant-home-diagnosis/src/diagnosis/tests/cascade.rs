use super::common::*;
use crate::diagnosis::catalog::{CategoryCode, Discriminant, ResultCategory};
use crate::diagnosis::classification::{
    classify, CategoryRule, Clause, Condition, DiagnosisPolicy, PolicyPreset,
};
use crate::diagnosis::ledger::AnswerLedger;
use crate::diagnosis::scoring::ScoreTotals;

fn dual(totals: ScoreTotals, ledger: &AnswerLedger) -> ResultCategory {
    classify(&totals, ledger, &DiagnosisPolicy::dual_threshold())
}

fn single(totals: ScoreTotals, ledger: &AnswerLedger) -> ResultCategory {
    classify(&totals, ledger, &DiagnosisPolicy::single_threshold())
}

#[test]
fn extreme_urgency_is_an_emergency() {
    let ledger = AnswerLedger::new();
    assert_eq!(dual(ScoreTotals::new(20, 0, 0, 0), &ledger), ResultCategory::E);
}

#[test]
fn combined_urgency_and_burden_is_an_emergency() {
    let ledger = AnswerLedger::new();
    assert_eq!(dual(ScoreTotals::new(13, 0, 13, 0), &ledger), ResultCategory::E);
    assert_eq!(dual(ScoreTotals::new(13, 13, 0, 0), &ledger), ResultCategory::E);
    assert_ne!(dual(ScoreTotals::new(13, 0, 10, 0), &ledger), ResultCategory::E);
}

#[test]
fn legal_score_with_unsettled_title_routes_to_rights() {
    let ledger = ledger_with(&[(5, Discriminant::B)]);
    assert_eq!(dual(ScoreTotals::new(0, 14, 0, 0), &ledger), ResultCategory::C);
}

#[test]
fn legal_score_with_family_dispute_routes_to_rights() {
    let ledger = ledger_with(&[(5, Discriminant::A), (7, Discriminant::D)]);
    assert_eq!(dual(ScoreTotals::new(0, 13, 0, 0), &ledger), ResultCategory::C);
}

#[test]
fn legal_score_without_supporting_answers_falls_through() {
    let ledger = ledger_with(&[(5, Discriminant::A), (7, Discriminant::B)]);
    assert_eq!(dual(ScoreTotals::new(0, 14, 0, 0), &ledger), ResultCategory::A);
    assert_eq!(dual(ScoreTotals::new(0, 19, 0, 0), &ledger), ResultCategory::C);
}

#[test]
fn missing_answers_never_match() {
    let ledger = AnswerLedger::new();
    assert_eq!(dual(ScoreTotals::new(0, 18, 0, 0), &ledger), ResultCategory::A);
    assert_eq!(dual(ScoreTotals::new(0, 0, 18, 0), &ledger), ResultCategory::A);
}

#[test]
fn burden_requires_poor_condition_answers_below_the_ceiling() {
    let poor_garden = ledger_with(&[(9, Discriminant::C)]);
    let poor_building = ledger_with(&[(10, Discriminant::D)]);
    let fine = ledger_with(&[(9, Discriminant::A), (10, Discriminant::B)]);

    assert_eq!(dual(ScoreTotals::new(0, 0, 13, 0), &poor_garden), ResultCategory::B);
    assert_eq!(dual(ScoreTotals::new(0, 0, 13, 0), &poor_building), ResultCategory::B);
    assert_eq!(dual(ScoreTotals::new(0, 0, 13, 0), &fine), ResultCategory::A);
    assert_eq!(dual(ScoreTotals::new(0, 0, 19, 0), &fine), ResultCategory::B);
}

#[test]
fn value_path_needs_keep_intent_and_manageable_burden() {
    let keep = ledger_with(&[(15, Discriminant::A)]);
    let sell = ledger_with(&[(15, Discriminant::C)]);

    assert_eq!(dual(ScoreTotals::new(0, 0, 12, 13), &keep), ResultCategory::D);
    assert_eq!(dual(ScoreTotals::new(0, 0, 12, 13), &sell), ResultCategory::A);
    assert_eq!(dual(ScoreTotals::new(0, 0, 13, 13), &keep), ResultCategory::A);
    assert_eq!(dual(ScoreTotals::new(0, 0, 0, 19), &sell), ResultCategory::D);
}

#[test]
fn everything_below_thresholds_is_the_default() {
    let ledger = ledger_with(&[
        (5, Discriminant::C),
        (7, Discriminant::D),
        (9, Discriminant::D),
        (10, Discriminant::D),
        (15, Discriminant::A),
    ]);
    assert_eq!(dual(ScoreTotals::new(12, 12, 12, 12), &ledger), ResultCategory::A);
}

#[test]
fn emergency_outranks_every_later_rule() {
    let ledger = ledger_with(&[
        (5, Discriminant::B),
        (9, Discriminant::C),
        (15, Discriminant::A),
    ]);
    let totals = ScoreTotals::new(19, 19, 19, 19);
    assert_eq!(dual(totals, &ledger), ResultCategory::E);

    let totals = ScoreTotals::new(0, 19, 19, 19);
    assert_eq!(dual(totals, &ledger), ResultCategory::C);

    let totals = ScoreTotals::new(0, 0, 19, 19);
    assert_eq!(dual(totals, &ledger), ResultCategory::B);
}

#[test]
fn single_threshold_policy_uses_lower_triggers() {
    let ledger = ledger_with(&[(5, Discriminant::C)]);
    assert_eq!(single(ScoreTotals::new(12, 0, 0, 0), &ledger), ResultCategory::E);
    assert_eq!(single(ScoreTotals::new(0, 10, 0, 0), &ledger), ResultCategory::C);
    assert_eq!(single(ScoreTotals::new(0, 0, 12, 0), &ledger), ResultCategory::B);
    assert_eq!(single(ScoreTotals::new(0, 0, 11, 10), &ledger), ResultCategory::D);
    assert_eq!(single(ScoreTotals::new(0, 0, 15, 10), &ledger), ResultCategory::B);
    assert_eq!(single(ScoreTotals::new(11, 9, 11, 9), &ledger), ResultCategory::A);
}

#[test]
fn single_threshold_policy_flags_collapsing_buildings() {
    let ledger = ledger_with(&[(10, Discriminant::D)]);
    assert_eq!(single(ScoreTotals::default(), &ledger), ResultCategory::B);
}

#[test]
fn policies_round_trip_through_json() {
    for preset in [PolicyPreset::DualThreshold, PolicyPreset::SingleThreshold] {
        let policy = DiagnosisPolicy::preset(preset);
        let json = serde_json::to_string(&policy).expect("policy serializes");
        let parsed = DiagnosisPolicy::from_reader(json.as_bytes()).expect("policy parses");
        assert_eq!(parsed, policy);
    }
}

#[test]
fn custom_policy_thresholds_are_data() {
    let json = r#"{
        "name": "strict-legal",
        "rules": [
            {"category": "C", "any_of": [
                {"all_of": [
                    {"kind": "score_at_least", "category": "L", "threshold": 5},
                    {"kind": "answer_in", "question_id": 6, "values": ["D"]}
                ]}
            ]}
        ],
        "fallback": "A"
    }"#;
    let policy = DiagnosisPolicy::from_reader(json.as_bytes()).expect("policy parses");
    assert_eq!(policy.risk.max_score(), 55);
    assert_eq!(policy.referenced_questions(), vec![6]);

    let ledger = ledger_with(&[(6, Discriminant::D)]);
    let totals = ScoreTotals::new(0, 5, 0, 0);
    assert_eq!(classify(&totals, &ledger, &policy), ResultCategory::C);
}

#[test]
fn empty_clause_always_holds() {
    let policy = DiagnosisPolicy {
        name: "catch-all".to_string(),
        rules: vec![CategoryRule {
            category: ResultCategory::B,
            any_of: vec![Clause { all_of: Vec::new() }],
        }],
        fallback: ResultCategory::A,
        risk: Default::default(),
    };
    let ledger = AnswerLedger::new();
    assert_eq!(
        classify(&ScoreTotals::default(), &ledger, &policy),
        ResultCategory::B
    );
}

#[test]
fn score_at_most_compares_inclusively() {
    let policy = DiagnosisPolicy {
        name: "low-burden".to_string(),
        rules: vec![CategoryRule {
            category: ResultCategory::D,
            any_of: vec![Clause {
                all_of: vec![Condition::ScoreAtMost {
                    category: CategoryCode::Burden,
                    threshold: 3,
                }],
            }],
        }],
        fallback: ResultCategory::A,
        risk: Default::default(),
    };
    let ledger = AnswerLedger::new();
    assert_eq!(
        classify(&ScoreTotals::new(0, 0, 3, 0), &ledger, &policy),
        ResultCategory::D
    );
    assert_eq!(
        classify(&ScoreTotals::new(0, 0, 4, 0), &ledger, &policy),
        ResultCategory::A
    );
}

#[test]
fn standard_policies_reference_catalog_questions() {
    let catalog = engine();
    for preset in [PolicyPreset::DualThreshold, PolicyPreset::SingleThreshold] {
        for question_id in DiagnosisPolicy::preset(preset).referenced_questions() {
            assert!(catalog.questions().by_id(question_id).is_some());
        }
    }
    assert_eq!(
        DiagnosisPolicy::dual_threshold().referenced_questions(),
        vec![5, 7, 9, 10, 15]
    );
}

#[test]
fn presets_parse_from_configuration_strings() {
    assert_eq!(
        "single-threshold".parse::<PolicyPreset>().ok(),
        Some(PolicyPreset::SingleThreshold)
    );
    assert_eq!(
        "DUAL_THRESHOLD".parse::<PolicyPreset>().ok(),
        Some(PolicyPreset::DualThreshold)
    );
    assert!("waterfall".parse::<PolicyPreset>().is_err());
}
