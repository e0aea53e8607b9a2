use std::collections::BTreeMap;

use crate::model::category::CategoryPool;
use crate::model::stats::{mean_defined, median};
use crate::model::table::{AggregatedRecord, CleanRecord, CleanTable, CombinedTable, RawRecord};

const EXPECTED_ATTEMPTS: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    #[error("no records to clean")]
    Empty,
    #[error("every aggregated row has at least one missing numeric value")]
    NothingLeft,
    #[error("group '{group}' has no defined value for column '{column}'; cannot impute")]
    UndefinedGroupMedian { group: String, column: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub raw_records: usize,
    pub aggregated_records: usize,
    pub dropped_records: usize,
    pub imputed_cells: usize,
    pub irregular_pairs: usize,
}

#[derive(Debug)]
pub struct Stage2Output {
    pub table: CleanTable,
    pub stats: CleanStats,
}

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub students: CategoryPool,
    pub groups: CategoryPool,
    pub records: Vec<AggregatedRecord>,
}

/// Per group code, the median of every numeric column over its defined values.
pub type GroupMedians = BTreeMap<u32, Vec<Option<f64>>>;

pub fn run_stage2(table: CombinedTable) -> Result<Stage2Output, CleanError> {
    if table.records.is_empty() {
        return Err(CleanError::Empty);
    }
    let features = table.schema.numeric.clone();
    if !table.schema.categorical.is_empty() {
        crate::warn!(
            "non-numeric columns are not aggregated and will be dropped: {}",
            table.schema.categorical.join(", ")
        );
    }

    let mut records = table.records;
    correct_signs(&mut records);

    let aggregation = aggregate_attempts(&records, features.len());
    let irregular_pairs = aggregation
        .records
        .iter()
        .filter(|r| r.attempts != EXPECTED_ATTEMPTS)
        .count();
    if irregular_pairs > 0 {
        crate::warn!(
            "{} student/group pairs do not have exactly {} attempts",
            irregular_pairs,
            EXPECTED_ATTEMPTS
        );
    }
    let aggregated_records = aggregation.records.len();

    let (kept, dropped_records) = drop_rows_with_missing(aggregation.records);
    if kept.is_empty() {
        return Err(CleanError::NothingLeft);
    }
    let medians = group_medians(&kept, features.len());
    let (clean, imputed_cells) =
        impute_group_medians(kept, &medians, &aggregation.groups, &features)?;

    let stats = CleanStats {
        raw_records: records.len(),
        aggregated_records,
        dropped_records,
        imputed_cells,
        irregular_pairs,
    };
    crate::info!(
        "cleaned: raw={}, aggregated={}, dropped={}, imputed_cells={}",
        stats.raw_records,
        stats.aggregated_records,
        stats.dropped_records,
        stats.imputed_cells
    );

    Ok(Stage2Output {
        table: CleanTable {
            features,
            students: aggregation.students,
            groups: aggregation.groups,
            records: clean,
        },
        stats,
    })
}

/// Scores are only ever wrong in sign, so every defined value is replaced by its magnitude.
pub fn correct_signs(records: &mut [RawRecord]) {
    for record in records {
        for value in record.values.iter_mut().flatten() {
            *value = value.abs();
        }
    }
}

/// Collapses all attempts of one (student, group) pair into their column-wise mean.
/// Output is ordered by student label, then group label.
pub fn aggregate_attempts(records: &[RawRecord], n_features: usize) -> Aggregation {
    let students = CategoryPool::from_values(records.iter().map(|r| r.student.as_str()));
    let groups = CategoryPool::from_values(records.iter().map(|r| r.group.as_str()));

    let mut partitions: BTreeMap<(u32, u32), Vec<&RawRecord>> = BTreeMap::new();
    for record in records {
        let (Some(student), Some(group)) =
            (students.code(&record.student), groups.code(&record.group))
        else {
            continue;
        };
        partitions.entry((student, group)).or_default().push(record);
    }

    let mut out = Vec::with_capacity(partitions.len());
    for ((student, group), rows) in partitions {
        let values = (0..n_features)
            .map(|col| mean_defined(rows.iter().map(|r| r.values.get(col).copied().flatten())))
            .collect();
        out.push(AggregatedRecord {
            student,
            group,
            attempts: rows.len(),
            values,
        });
    }

    Aggregation {
        students,
        groups,
        records: out,
    }
}

/// Drops every row with at least one undefined value. Returns the survivors and the drop count.
pub fn drop_rows_with_missing(records: Vec<AggregatedRecord>) -> (Vec<AggregatedRecord>, usize) {
    let before = records.len();
    let kept: Vec<AggregatedRecord> = records.into_iter().filter(|r| !r.has_missing()).collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

pub fn group_medians(records: &[AggregatedRecord], n_features: usize) -> GroupMedians {
    let mut buckets: BTreeMap<u32, Vec<Vec<f64>>> = BTreeMap::new();
    for record in records {
        let columns = buckets
            .entry(record.group)
            .or_insert_with(|| vec![Vec::new(); n_features]);
        for (col, value) in record.values.iter().enumerate() {
            if let (Some(v), Some(bucket)) = (value, columns.get_mut(col)) {
                bucket.push(*v);
            }
        }
    }
    buckets
        .into_iter()
        .map(|(group, columns)| (group, columns.iter().map(|c| median(c)).collect()))
        .collect()
}

/// Fills each undefined cell from its own group's median. Never reads another group.
pub fn impute_group_medians(
    records: Vec<AggregatedRecord>,
    medians: &GroupMedians,
    groups: &CategoryPool,
    features: &[String],
) -> Result<(Vec<CleanRecord>, usize), CleanError> {
    let mut imputed = 0usize;
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        let mut values = Vec::with_capacity(record.values.len());
        for (col, value) in record.values.iter().enumerate() {
            let filled = match value {
                Some(v) => *v,
                None => {
                    let fill = medians
                        .get(&record.group)
                        .and_then(|m| m.get(col).copied().flatten())
                        .ok_or_else(|| CleanError::UndefinedGroupMedian {
                            group: groups.label(record.group).to_string(),
                            column: features.get(col).cloned().unwrap_or_default(),
                        })?;
                    imputed += 1;
                    fill
                }
            };
            values.push(filled);
        }
        out.push(CleanRecord {
            student: record.student,
            group: record.group,
            attempts: record.attempts,
            values,
        });
    }
    Ok((out, imputed))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_clean.rs"]
mod tests;
