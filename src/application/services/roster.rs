//! Roster export/import service

use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing::{info, warn};

use super::StableService;
use crate::application::roster::{read_roster, write_roster, ImportReport, RowOutcome};
use crate::domain::{DomainError, DomainResult};

/// Moves a stable's horses to and from CSV. Imports go through
/// [`StableService::add_horse`], so every row meets the same capacity and
/// duplicate rules as interactive creation.
pub struct RosterService {
    stables: Arc<StableService>,
}

impl RosterService {
    pub fn new(stables: Arc<StableService>) -> Self {
        Self { stables }
    }

    /// Write the stable's horses in default order. Returns the number of
    /// data rows written.
    pub async fn export_roster<W: Write + Send>(
        &self,
        stable_id: i32,
        out: &mut W,
    ) -> DomainResult<usize> {
        let horses = self.stables.sort_horses_by_name(stable_id).await?;
        let written = write_roster(out, &horses)
            .map_err(|e| DomainError::Storage(format!("roster export failed: {}", e)))?;
        info!(stable_id, rows = written, "Roster exported");
        Ok(written)
    }

    /// Import every data line into the stable. Per-row problems are
    /// recorded in the report and never abort the batch.
    pub async fn import_roster<R: BufRead + Send>(
        &self,
        stable_id: i32,
        input: R,
    ) -> DomainResult<ImportReport> {
        self.stables.get_stable(stable_id).await?;

        let rows = read_roster(input)
            .map_err(|e| DomainError::Storage(format!("roster import failed: {}", e)))?;

        let mut report = ImportReport::default();
        for row in rows {
            let attrs = match row.result {
                Ok(attrs) => attrs,
                Err(e) => {
                    warn!(stable_id, line = row.line, error = %e, "Malformed roster row skipped");
                    report.push(row.line, RowOutcome::Malformed { reason: e.to_string() });
                    continue;
                }
            };

            let outcome = match self.stables.add_horse(stable_id, attrs).await {
                Ok(horse) => RowOutcome::Inserted { horse_id: horse.id() },
                Err(e @ DomainError::DuplicateHorse(_)) => {
                    warn!(stable_id, line = row.line, error = %e, "Duplicate horse skipped");
                    RowOutcome::SkippedDuplicate { reason: e.to_string() }
                }
                Err(e @ DomainError::StableFull { .. }) => {
                    warn!(stable_id, line = row.line, error = %e, "Stable full, row skipped");
                    RowOutcome::SkippedFull { reason: e.to_string() }
                }
                Err(e @ DomainError::Validation(_)) => {
                    warn!(stable_id, line = row.line, error = %e, "Invalid horse skipped");
                    RowOutcome::Rejected { reason: e.to_string() }
                }
                Err(e) => return Err(e),
            };
            report.push(row.line, outcome);
        }

        info!(
            stable_id,
            inserted = report.inserted(),
            skipped = report.skipped(),
            "Roster imported"
        );
        Ok(report)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::roster::HEADER;
    use crate::domain::{Horse, HorseCondition, HorseType, NewHorse, RepositoryProvider};
    use crate::infrastructure::InMemoryRepositoryProvider;
    use chrono::{TimeZone, Utc};

    fn attrs(name: &str, breed: &str, age: i32) -> NewHorse {
        NewHorse {
            name: name.into(),
            breed: breed.into(),
            horse_type: HorseType::ColdBlooded,
            status: HorseCondition::InTraining,
            age,
            price: 4500.25,
            weight_kg: 612.4,
            height_cm: 171.0,
            microchip_id: Some("CHIP-1".into()),
            acquisition_date: Some(Utc.with_ymd_and_hms(2023, 11, 2, 9, 0, 0).unwrap()),
        }
    }

    fn services() -> (Arc<StableService>, RosterService) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let stables = Arc::new(StableService::new(repos));
        let roster = RosterService::new(stables.clone());
        (stables, roster)
    }

    #[tokio::test]
    async fn export_then_import_round_trips() {
        let (stables, roster) = services();
        let source = stables.create_stable("Source", 2).await.unwrap();
        stables
            .add_horse(source.id(), attrs("Bell, Jr.", "Quarter Horse", 5))
            .await
            .unwrap();
        stables
            .add_horse(source.id(), attrs("Arrow", "Arabian", 3))
            .await
            .unwrap();

        let mut buf = Vec::new();
        assert_eq!(roster.export_roster(source.id(), &mut buf).await.unwrap(), 2);
        let text = String::from_utf8(buf.clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "Arrow,Arabian,ZIMNOKRWISTY,TRENING,3,4500.25,612.4,171.0,CHIP-1,2023-11-02"
        );
        assert!(lines[2].starts_with("\"Bell, Jr.\",Quarter Horse,"));

        let target = stables.create_stable("Target", 2).await.unwrap();
        let report = roster
            .import_roster(target.id(), buf.as_slice())
            .await
            .unwrap();
        assert_eq!(report.inserted(), 2);

        let mut before: Vec<Horse> = stables.list_horses(source.id()).await.unwrap();
        let mut after: Vec<Horse> = stables.list_horses(target.id()).await.unwrap();
        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert_eq!(after[1].name(), "Bell, Jr.");
        assert_eq!(after[0].price(), 4500.25);
        assert_eq!(
            after[0].acquisition_date(),
            Utc.with_ymd_and_hms(2023, 11, 2, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn import_skips_bad_rows_and_keeps_going() {
        let (stables, roster) = services();
        let stable = stables.create_stable("North", 2).await.unwrap();

        let csv = format!(
            "{HEADER}\n\
             Arrow,Arabian,KUC,ZDROWY,3,100.00,400.0,140.0,,2024-05-01\n\
             arrow,ARABIAN,KUC,CHORY,3,1.00,300.0,120.0,,2024-05-01\n\
             too,short\n\
             Ghost,Arabian,KUC,ZDROWY,3,-5.00,400.0,140.0,,2024-05-01\n\
             Bolt,Arabian,KUC,ZDROWY,4,100.00,400.0,140.0,,2024-05-01\n\
             Comet,Arabian,KUC,ZDROWY,5,100.00,400.0,140.0,,2024-05-01\n"
        );

        let report = roster
            .import_roster(stable.id(), csv.as_bytes())
            .await
            .unwrap();

        let kinds: Vec<(usize, &str)> = report
            .rows
            .iter()
            .map(|r| {
                let kind = match r.outcome {
                    RowOutcome::Inserted { .. } => "inserted",
                    RowOutcome::SkippedDuplicate { .. } => "duplicate",
                    RowOutcome::SkippedFull { .. } => "full",
                    RowOutcome::Rejected { .. } => "rejected",
                    RowOutcome::Malformed { .. } => "malformed",
                };
                (r.line, kind)
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                (2, "inserted"),
                (3, "duplicate"),
                (4, "malformed"),
                (5, "rejected"),
                (6, "inserted"),
                (7, "full"),
            ]
        );
        assert_eq!(stables.list_horses(stable.id()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_stable_is_not_found() {
        let (_, roster) = services();
        let mut buf = Vec::new();
        assert!(matches!(
            roster.export_roster(9, &mut buf).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            roster.import_roster(9, HEADER.as_bytes()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
