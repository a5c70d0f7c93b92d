use serde::Serialize;

/// What happened to one data line of an imported roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RowOutcome {
    Inserted { horse_id: i32 },
    SkippedDuplicate { reason: String },
    SkippedFull { reason: String },
    Rejected { reason: String },
    Malformed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowReport {
    pub line: usize,
    #[serde(flatten)]
    pub outcome: RowOutcome,
}

/// Structured result of a roster import, one entry per data line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub rows: Vec<RowReport>,
}

impl ImportReport {
    pub fn push(&mut self, line: usize, outcome: RowOutcome) {
        self.rows.push(RowReport { line, outcome });
    }

    pub fn inserted(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, RowOutcome::Inserted { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.rows.len() - self.inserted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_json_shape() {
        let mut report = ImportReport::default();
        report.push(2, RowOutcome::Inserted { horse_id: 7 });
        report.push(
            3,
            RowOutcome::SkippedFull {
                reason: "Stable 'North' is full (1/1)".into(),
            },
        );

        assert_eq!(report.inserted(), 1);
        assert_eq!(report.skipped(), 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rows"][0]["outcome"], "inserted");
        assert_eq!(json["rows"][0]["horse_id"], 7);
        assert_eq!(json["rows"][1]["outcome"], "skipped_full");
        assert_eq!(json["rows"][1]["line"], 3);
    }
}
