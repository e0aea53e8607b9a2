use crate::model::category::CategoryPool;
use crate::model::schema::Schema;

/// One attempt as read from disk. `values` follows `Schema::numeric`; `None` is an empty cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub group: String,
    pub student: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct CombinedTable {
    pub schema: Schema,
    pub records: Vec<RawRecord>,
}

impl CombinedTable {
    pub fn n_records(&self) -> usize {
        self.records.len()
    }
}

/// Mean of all attempts of one (student, group) pair, before imputation.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord {
    pub student: u32,
    pub group: u32,
    pub attempts: usize,
    pub values: Vec<Option<f64>>,
}

impl AggregatedRecord {
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(Option::is_none)
    }
}

/// Fully defined row handed to standardization.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub student: u32,
    pub group: u32,
    pub attempts: usize,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct CleanTable {
    pub features: Vec<String>,
    pub students: CategoryPool,
    pub groups: CategoryPool,
    pub records: Vec<CleanRecord>,
}

impl CleanTable {
    pub fn n_records(&self) -> usize {
        self.records.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    pub fn student_label(&self, row: usize) -> &str {
        self.records
            .get(row)
            .map(|r| self.students.label(r.student))
            .unwrap_or("")
    }

    pub fn group_label(&self, row: usize) -> &str {
        self.records
            .get(row)
            .map(|r| self.groups.label(r.group))
            .unwrap_or("")
    }
}
