use std::collections::BTreeMap;

/// Interned categorical column. Codes follow the sorted order of the distinct labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPool {
    labels: Vec<String>,
    codes: BTreeMap<String, u32>,
}

impl CategoryPool {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut codes: BTreeMap<String, u32> = BTreeMap::new();
        for value in values {
            if !codes.contains_key(value) {
                codes.insert(value.to_string(), 0);
            }
        }
        let mut labels = Vec::with_capacity(codes.len());
        for (idx, (label, code)) in codes.iter_mut().enumerate() {
            *code = idx as u32;
            labels.push(label.clone());
        }
        Self { labels, codes }
    }

    pub fn code(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    pub fn label(&self, code: u32) -> &str {
        self.labels
            .get(code as usize)
            .map(String::as_str)
            .unwrap_or("")
    }
}
