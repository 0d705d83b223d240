use crate::domain::model::InspectionRecord;
use std::collections::HashSet;

pub const DEFAULT_EXCLUDED_RISK: &str = "Risk 3 (Low)";

/// Drops records whose risk level is in the excluded set.
///
/// Matching is exact string equality: case and whitespace count. If the
/// upstream vocabulary changes spelling, excluded records will start to leak
/// through, so keep the set in sync with the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskFilter {
    excluded: HashSet<String>,
}

impl RiskFilter {
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    pub fn retains(&self, record: &InspectionRecord) -> bool {
        !self.excluded.contains(&record.risk)
    }

    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.excluded.iter().map(String::as_str)
    }
}

impl Default for RiskFilter {
    fn default() -> Self {
        Self::new([DEFAULT_EXCLUDED_RISK])
    }
}
