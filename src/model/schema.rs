/// Column layout shared by every input file, resolved once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub group_column: String,
    pub student_column: String,
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl Schema {
    pub fn n_features(&self) -> usize {
        self.numeric.len()
    }
}
