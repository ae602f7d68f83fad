// crates/rdm2geojson-core/src/common.rs
use crate::category::Category;
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for one export run.
///
/// Returned by [`crate::export`] next to the collection. Counts are the
/// number of features each source contributed, after extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    pub customs: usize,
    pub quest: usize,
    pub raid: usize,
    pub iv: usize,
}

impl ExportStats {
    pub fn total(&self) -> usize {
        self.customs + self.quest + self.raid + self.iv
    }

    pub(crate) fn record(&mut self, category: Category, count: usize) {
        match category {
            Category::Quest => self.quest += count,
            Category::Raid => self.raid += count,
            Category::Iv => self.iv += count,
        }
    }
}
