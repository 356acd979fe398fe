//! End-to-end scenarios for `ConditionsCmd::execute` and parsing, matching
//! the verdicts and evidence that legacy alert rules produce.

use chrono::{Duration, TimeZone, Utc};

use alertcond_classic::{
    Condition, ConditionOperator, ConditionsCmd, EvalMatch, Evaluator, RangeKind, ReducerKind,
    Results, ThresholdKind, Value, Vars,
};
use alertcond_core::{Labels, Number, Series};

// ── Helpers ─────────────────────────────────────────────────────────

fn series_with_labels(labels: Option<Labels>, values: &[Option<f64>]) -> Value {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut s = Series::new(None, labels);
    for (i, v) in values.iter().enumerate() {
        s.push(t0 + Duration::seconds(i as i64), *v);
    }
    Value::Series(s)
}

fn series(values: &[f64]) -> Value {
    let values: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    series_with_labels(None, &values)
}

fn number(v: f64) -> Value {
    Value::Number(Number::new(None, Some(v)))
}

fn vars_a(values: Vec<Value>) -> Vars {
    let mut vars = Vars::new();
    vars.insert("A".to_string(), values.into_iter().collect());
    vars
}

fn threshold(kind: ThresholdKind, threshold: f64) -> Evaluator {
    Evaluator::Threshold { kind, threshold }
}

fn condition(
    ref_id: &str,
    reducer: ReducerKind,
    operator: ConditionOperator,
    evaluator: Evaluator,
) -> Condition {
    Condition {
        input_ref_id: ref_id.to_string(),
        reducer,
        operator,
        evaluator,
    }
}

fn avg_gt(t: f64) -> ConditionsCmd {
    ConditionsCmd::new(
        "",
        vec![condition(
            "A",
            ReducerKind::Avg,
            ConditionOperator::And,
            threshold(ThresholdKind::Gt, t),
        )],
    )
}

fn matched(value: f64) -> EvalMatch {
    EvalMatch {
        value: Some(value),
        ..EvalMatch::default()
    }
}

fn expected(value: Option<f64>, meta: Vec<EvalMatch>) -> Results {
    let mut n = Number::new(None, value);
    n.set_meta(meta);
    Results::single(n)
}

fn no_data() -> Results {
    expected(None, vec![EvalMatch::no_data()])
}

fn run(cmd: &ConditionsCmd, vars: &Vars) -> Results {
    let res = cmd.execute(Utc::now(), vars);
    assert_eq!(res.len(), 1, "result must hold exactly one value");
    res
}

// ── Single condition ────────────────────────────────────────────────

#[test]
fn single_query_single_condition() {
    let res = run(&avg_gt(34.0), &vars_a(vec![series(&[30.0, 40.0])]));
    assert_eq!(res, expected(Some(1.0), vec![matched(35.0)]));
}

#[test]
fn single_condition_empty_series_is_no_data() {
    let res = run(&avg_gt(34.0), &vars_a(vec![series(&[])]));
    assert_eq!(res, no_data());
}

#[test]
fn empty_series_and_non_empty_series() {
    let res = run(&avg_gt(0.5), &vars_a(vec![series(&[]), series(&[3.0])]));
    assert_eq!(res, expected(Some(1.0), vec![matched(3.0)]));
}

#[test]
fn all_null_points_is_no_data() {
    let res = run(
        &avg_gt(0.5),
        &vars_a(vec![series_with_labels(None, &[None, None])]),
    );
    assert_eq!(res, no_data());
}

#[test]
fn multiple_series_one_true_keeps_labels() {
    let labels: Labels = [("h", "1")].into_iter().collect();
    let res = run(
        &avg_gt(34.0),
        &vars_a(vec![
            series_with_labels(Some(labels.clone()), &[Some(30.0), Some(40.0)]),
            series(&[0.0, 10.0]),
        ]),
    );
    assert_eq!(
        res,
        expected(
            Some(1.0),
            vec![EvalMatch {
                value: Some(35.0),
                metric: None,
                labels: Some(labels),
            }]
        )
    );
}

#[test]
fn multiple_series_second_true() {
    let res = run(
        &avg_gt(34.0),
        &vars_a(vec![series(&[0.0, 10.0]), series(&[30.0, 40.0])]),
    );
    assert_eq!(res, expected(Some(1.0), vec![matched(35.0)]));
}

#[test]
fn multiple_series_none_true_is_zero_with_empty_evidence() {
    let res = run(
        &avg_gt(34.0),
        &vars_a(vec![series(&[0.0, 10.0]), series(&[20.0, 30.0])]),
    );
    assert_eq!(res, expected(Some(0.0), vec![]));
}

#[test]
fn ranged_diff_not_firing() {
    let cmd = ConditionsCmd::new(
        "",
        vec![condition(
            "A",
            ReducerKind::Diff,
            ConditionOperator::And,
            Evaluator::Ranged {
                kind: RangeKind::WithinRange,
                lower: 2.0,
                upper: 3.0,
            },
        )],
    );
    let res = run(&cmd, &vars_a(vec![series(&[30.0, 40.0])]));
    assert_eq!(res, expected(Some(0.0), vec![]));
}

#[test]
fn explicit_no_data_value() {
    let res = run(&avg_gt(1.0), &vars_a(vec![Value::NoData]));
    assert_eq!(res, no_data());
}

#[test]
fn empty_results_batch() {
    let res = run(&avg_gt(1.0), &vars_a(vec![]));
    assert_eq!(res, no_data());
}

#[test]
fn missing_input_key() {
    let res = run(&avg_gt(1.0), &Vars::new());
    assert_eq!(res, no_data());
}

#[test]
fn numbers_are_accepted() {
    let res = run(
        &avg_gt(1.0),
        &vars_a(vec![number(5.0), number(10.0), number(15.0)]),
    );
    assert_eq!(
        res,
        expected(Some(1.0), vec![matched(5.0), matched(10.0), matched(15.0)])
    );
}

#[test]
fn match_count_equals_firing_series_count() {
    let res = run(
        &avg_gt(10.0),
        &vars_a(vec![
            series(&[20.0]),
            series(&[5.0]),
            series(&[11.0, 13.0]),
            series(&[]),
            series(&[100.0]),
        ]),
    );
    assert_eq!(
        res,
        expected(Some(1.0), vec![matched(20.0), matched(12.0), matched(100.0)])
    );
}

// ── Multiple conditions ─────────────────────────────────────────────

#[test]
fn single_query_two_conditions_or() {
    let cmd = ConditionsCmd::new(
        "",
        vec![
            condition(
                "A",
                ReducerKind::Max,
                ConditionOperator::And,
                threshold(ThresholdKind::Gt, 34.0),
            ),
            condition(
                "A",
                ReducerKind::Min,
                ConditionOperator::Or,
                threshold(ThresholdKind::Gt, 12.0),
            ),
        ],
    );
    let res = run(&cmd, &vars_a(vec![series(&[30.0, 40.0])]));
    assert_eq!(res, expected(Some(1.0), vec![matched(40.0), matched(30.0)]));
    assert_eq!(cmd.needs_vars(), vec!["A"]);
}

fn two_inputs(op: ConditionOperator) -> ConditionsCmd {
    ConditionsCmd::new(
        "",
        vec![
            condition(
                "A",
                ReducerKind::Avg,
                ConditionOperator::And,
                threshold(ThresholdKind::Gt, 1.0),
            ),
            condition("B", ReducerKind::Avg, op, threshold(ThresholdKind::Gt, 1.0)),
        ],
    )
}

#[test]
fn both_no_data_is_no_data() {
    for op in [ConditionOperator::And, ConditionOperator::Or] {
        let res = run(&two_inputs(op), &Vars::new());
        assert_eq!(res, no_data(), "operator {}", op);
    }
}

// Mixed chains compose the no-data flag with the same operator as the
// firing flag: `and` needs both sides to be no-data, `or` needs either.

#[test]
fn mixed_firing_and_no_data_with_and_is_not_firing() {
    let vars = vars_a(vec![series(&[5.0])]);
    let res = run(&two_inputs(ConditionOperator::And), &vars);
    assert_eq!(res, expected(Some(0.0), vec![matched(5.0)]));
}

#[test]
fn mixed_firing_and_no_data_with_or_is_no_data() {
    let vars = vars_a(vec![series(&[5.0])]);
    let res = run(&two_inputs(ConditionOperator::Or), &vars);
    assert_eq!(res, no_data());
}

#[test]
fn mixed_no_data_then_firing_with_and_is_not_firing() {
    let mut vars = Vars::new();
    vars.insert("B".to_string(), Results::single(Number::new(None, Some(5.0))));
    let res = run(&two_inputs(ConditionOperator::And), &vars);
    assert_eq!(res, expected(Some(0.0), vec![matched(5.0)]));
}

#[test]
fn and_chain_of_firing_conditions() {
    let mut vars = vars_a(vec![series(&[5.0])]);
    vars.insert("B".to_string(), Results::single(Number::new(None, Some(2.0))));
    let res = run(&two_inputs(ConditionOperator::And), &vars);
    assert_eq!(res, expected(Some(1.0), vec![matched(5.0), matched(2.0)]));
}

// ── Parse then execute ──────────────────────────────────────────────

const BASIC_THRESHOLD_JSON: &str = r#"{
    "conditions": [
      {
        "evaluator": { "params": [2], "type": "gt" },
        "operator": { "type": "and" },
        "query": { "params": ["A"] },
        "reducer": { "params": [], "type": "avg" },
        "type": "query"
      }
    ]
}"#;

const RANGED_JSON: &str = r#"{
    "conditions": [
      {
        "evaluator": { "params": [2, 3], "type": "within_range" },
        "operator": { "type": "or" },
        "query": { "params": ["A"] },
        "reducer": { "params": [], "type": "diff" },
        "type": "query"
      }
    ]
}"#;

#[test]
fn unmarshal_basic_threshold_condition() {
    let cmd = ConditionsCmd::from_json_str(BASIC_THRESHOLD_JSON, "").unwrap();
    assert_eq!(
        cmd,
        ConditionsCmd::new(
            "",
            vec![condition(
                "A",
                ReducerKind::Avg,
                ConditionOperator::And,
                threshold(ThresholdKind::Gt, 2.0),
            )]
        )
    );
    assert_eq!(cmd.needs_vars(), vec!["A"]);
}

#[test]
fn unmarshal_ranged_condition() {
    let cmd = ConditionsCmd::from_json_str(RANGED_JSON, "").unwrap();
    assert_eq!(
        cmd,
        ConditionsCmd::new(
            "",
            vec![condition(
                "A",
                ReducerKind::Diff,
                ConditionOperator::Or,
                Evaluator::Ranged {
                    kind: RangeKind::WithinRange,
                    lower: 2.0,
                    upper: 3.0,
                },
            )]
        )
    );
    assert_eq!(cmd.needs_vars(), vec!["A"]);
}

#[test]
fn parsed_command_reproduces_scenario() {
    let cmd = ConditionsCmd::from_json_str(BASIC_THRESHOLD_JSON, "").unwrap();
    let res = run(&cmd, &vars_a(vec![series(&[1.0, 5.0])]));
    assert_eq!(res, expected(Some(1.0), vec![matched(3.0)]));

    let ranged = ConditionsCmd::from_json_str(RANGED_JSON, "").unwrap();
    let res = run(&ranged, &vars_a(vec![series(&[10.0, 12.5])]));
    assert_eq!(res, expected(Some(1.0), vec![matched(2.5)]));
}

#[test]
fn result_serializes_in_legacy_shape() {
    let res = run(&avg_gt(34.0), &vars_a(vec![series(&[30.0, 40.0])]));
    let json = serde_json::to_value(&res).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "number": { "value": 1.0, "meta": [{ "value": 35.0 }] } }])
    );

    let res = run(&avg_gt(34.0), &Vars::new());
    let json = serde_json::to_value(&res).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "number": { "value": null, "meta": [{ "metric": "NoData" }] } }])
    );
}
