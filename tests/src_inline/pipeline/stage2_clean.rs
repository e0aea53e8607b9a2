use super::*;
use crate::model::schema::Schema;

const EPS: f64 = 1e-12;

fn raw(group: &str, student: &str, values: &[Option<f64>]) -> RawRecord {
    RawRecord {
        group: group.to_string(),
        student: student.to_string(),
        values: values.to_vec(),
    }
}

fn table(features: &[&str], records: Vec<RawRecord>) -> CombinedTable {
    CombinedTable {
        schema: Schema {
            group_column: "grupo".to_string(),
            student_column: "alumno".to_string(),
            numeric: features.iter().map(|s| s.to_string()).collect(),
            categorical: Vec::new(),
        },
        records,
    }
}

fn agg(group: u32, values: &[Option<f64>]) -> AggregatedRecord {
    AggregatedRecord {
        student: 0,
        group,
        attempts: 2,
        values: values.to_vec(),
    }
}

#[test]
fn test_correct_signs_idempotent() {
    let mut records = vec![
        raw("A", "Ana", &[Some(-5.0), None, Some(2.0)]),
        raw("B", "Luis", &[Some(-0.5), Some(-3.0), Some(0.0)]),
    ];
    correct_signs(&mut records);
    let once = records.clone();
    correct_signs(&mut records);
    assert_eq!(once, records);
    assert_eq!(records[0].values, vec![Some(5.0), None, Some(2.0)]);
    assert_eq!(records[1].values, vec![Some(0.5), Some(3.0), Some(0.0)]);
}

#[test]
fn test_aggregate_two_attempts_mean_and_single_attempt() {
    let mut records = vec![
        raw("A", "Ana", &[Some(-5.0)]),
        raw("A", "Luis", &[Some(4.0)]),
        raw("A", "Ana", &[Some(7.0)]),
    ];
    correct_signs(&mut records);
    let aggregation = aggregate_attempts(&records, 1);

    assert_eq!(aggregation.records.len(), 2);
    let ana = &aggregation.records[0];
    assert_eq!(aggregation.students.label(ana.student), "Ana");
    assert_eq!(ana.attempts, 2);
    assert!((ana.values[0].unwrap() - 6.0).abs() < EPS);

    let luis = &aggregation.records[1];
    assert_eq!(aggregation.students.label(luis.student), "Luis");
    assert_eq!(luis.attempts, 1);
    assert_eq!(luis.values[0], Some(4.0));
}

#[test]
fn test_aggregate_same_student_in_two_groups_stays_separate() {
    let records = vec![
        raw("B", "Ana", &[Some(1.0)]),
        raw("A", "Ana", &[Some(3.0)]),
    ];
    let aggregation = aggregate_attempts(&records, 1);
    assert_eq!(aggregation.records.len(), 2);
    assert_eq!(aggregation.groups.label(aggregation.records[0].group), "A");
    assert_eq!(aggregation.records[0].values[0], Some(3.0));
    assert_eq!(aggregation.groups.label(aggregation.records[1].group), "B");
}

#[test]
fn test_aggregate_mean_ignores_missing_attempt() {
    let records = vec![
        raw("A", "Ana", &[None, Some(2.0)]),
        raw("A", "Ana", &[Some(8.0), None]),
        raw("A", "Eva", &[None, Some(1.0)]),
    ];
    let aggregation = aggregate_attempts(&records, 2);
    assert_eq!(aggregation.records[0].values, vec![Some(8.0), Some(2.0)]);
    assert_eq!(aggregation.records[1].values, vec![None, Some(1.0)]);
}

#[test]
fn test_drop_rows_with_any_missing_value() {
    let (kept, dropped) = drop_rows_with_missing(vec![
        agg(0, &[None, None]),
        agg(0, &[None, Some(1.0)]),
        agg(0, &[Some(2.0), Some(3.0)]),
    ]);
    assert_eq!(dropped, 2);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].values, vec![Some(2.0), Some(3.0)]);
}

#[test]
fn test_group_medians_per_group() {
    let records = vec![
        agg(0, &[Some(1.0)]),
        agg(0, &[Some(3.0)]),
        agg(0, &[None]),
        agg(1, &[Some(100.0)]),
    ];
    let medians = group_medians(&records, 1);
    assert_eq!(medians[&0], vec![Some(2.0)]);
    assert_eq!(medians[&1], vec![Some(100.0)]);
}

#[test]
fn test_imputation_uses_own_group_only() {
    let groups = CategoryPool::from_values(["A", "B"]);
    let records = vec![
        agg(0, &[Some(1.0), Some(10.0)]),
        agg(0, &[Some(5.0), None]),
        agg(0, &[Some(3.0), Some(20.0)]),
        agg(1, &[Some(1000.0), Some(9000.0)]),
        agg(1, &[None, Some(1.0)]),
    ];
    let medians = group_medians(&records, 2);
    let features = vec!["x".to_string(), "y".to_string()];
    let (clean, imputed) = impute_group_medians(records, &medians, &groups, &features).unwrap();

    assert_eq!(imputed, 2);
    assert!((clean[1].values[1] - 15.0).abs() < EPS);
    assert!((clean[4].values[0] - 1000.0).abs() < EPS);
    assert_eq!(clean[0].values, vec![1.0, 10.0]);
}

#[test]
fn test_imputation_undefined_group_median_fails() {
    let groups = CategoryPool::from_values(["A", "B"]);
    let records = vec![agg(0, &[Some(1.0), None]), agg(1, &[Some(2.0), Some(4.0)])];
    let medians = group_medians(&records, 2);
    let features = vec!["x".to_string(), "y".to_string()];
    let err = impute_group_medians(records, &medians, &groups, &features).unwrap_err();
    match err {
        CleanError::UndefinedGroupMedian { group, column } => {
            assert_eq!(group, "A");
            assert_eq!(column, "y");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_run_stage2_ana_scenario() {
    let input = table(
        &["nota"],
        vec![
            raw("A", "Ana", &[Some(-5.0)]),
            raw("A", "Ana", &[Some(7.0)]),
            raw("A", "Ana", &[Some(-5.0)]),
            raw("A", "Ana", &[Some(7.0)]),
            raw("B", "Luis", &[Some(2.0)]),
            raw("B", "Luis", &[Some(4.0)]),
        ],
    );
    let out = run_stage2(input).unwrap();
    assert_eq!(out.table.n_records(), 2);
    assert_eq!(out.table.student_label(0), "Ana");
    assert_eq!(out.table.group_label(0), "A");
    assert!((out.table.records[0].values[0] - 6.0).abs() < EPS);
    assert!((out.table.records[1].values[0] - 3.0).abs() < EPS);
    assert_eq!(out.stats.raw_records, 6);
    assert_eq!(out.stats.irregular_pairs, 1);
}

#[test]
fn test_run_stage2_drops_partially_missing_pair() {
    let input = table(
        &["mates", "lengua"],
        vec![
            raw("B", "Eva", &[Some(9.0), Some(8.5)]),
            raw("B", "Eva", &[Some(9.5), Some(9.0)]),
            raw("B", "Sara", &[Some(7.0), None]),
            raw("B", "Sara", &[Some(6.0), None]),
        ],
    );
    let out = run_stage2(input).unwrap();
    assert_eq!(out.stats.aggregated_records, 2);
    assert_eq!(out.stats.dropped_records, 1);
    assert_eq!(out.stats.imputed_cells, 0);
    assert_eq!(out.table.n_records(), 1);
    assert_eq!(out.table.student_label(0), "Eva");
    assert_eq!(out.table.records[0].values, vec![9.25, 8.75]);
}

#[test]
fn test_run_stage2_one_attempt_missing_is_filled_by_the_other() {
    let input = table(
        &["x", "y"],
        vec![
            raw("A", "Ana", &[Some(2.0), None]),
            raw("A", "Ana", &[Some(4.0), Some(6.0)]),
            raw("A", "Luis", &[Some(1.0), Some(1.0)]),
        ],
    );
    let out = run_stage2(input).unwrap();
    assert_eq!(out.stats.dropped_records, 0);
    assert_eq!(out.table.records[0].values, vec![3.0, 6.0]);
}

#[test]
fn test_run_stage2_nothing_left_fails() {
    let input = table(
        &["x", "y"],
        vec![raw("A", "Ana", &[Some(1.0), None]), raw("A", "Luis", &[None, Some(2.0)])],
    );
    let err = run_stage2(input).unwrap_err();
    assert!(matches!(err, CleanError::NothingLeft));
}

#[test]
fn test_run_stage2_empty_fails() {
    let err = run_stage2(table(&["x"], Vec::new())).unwrap_err();
    assert!(matches!(err, CleanError::Empty));
}
