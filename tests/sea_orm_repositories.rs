//! Services running against the SeaORM repositories on SQLite.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use stable_registry::application::{RatingService, RosterService, RowOutcome, StableService};
use stable_registry::domain::{DomainError, HorseCondition, HorseType, NewHorse, RepositoryProvider};
use stable_registry::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};

async fn repos() -> Arc<dyn RepositoryProvider> {
    repos_with(&DatabaseConfig::in_memory()).await
}

async fn repos_with(config: &DatabaseConfig) -> Arc<dyn RepositoryProvider> {
    let db = init_database(config).await.unwrap();
    run_migrations(&db).await.unwrap();
    Arc::new(SeaOrmRepositoryProvider::new(db))
}

fn horse(name: &str, breed: &str, age: i32, price: f64) -> NewHorse {
    NewHorse {
        name: name.to_string(),
        breed: breed.to_string(),
        horse_type: HorseType::WarmBlooded,
        status: HorseCondition::Healthy,
        age,
        price,
        weight_kg: 480.0,
        height_cm: 160.0,
        microchip_id: Some(format!("CHIP-{}", name.to_uppercase())),
        acquisition_date: Some(Utc.with_ymd_and_hms(2023, 3, 14, 0, 0, 0).unwrap()),
    }
}

#[tokio::test]
async fn stable_names_are_unique_ignoring_case() {
    let svc = StableService::new(repos().await);
    svc.create_stable("North", 3).await.unwrap();

    let err = svc.create_stable("nORTH", 5).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");
    assert_eq!(svc.list_stables().await.unwrap().len(), 1);
}

#[tokio::test]
async fn stable_names_clash_across_non_ascii_case() {
    let svc = StableService::new(repos().await);
    svc.create_stable("Łąka", 3).await.unwrap();

    let err = svc.create_stable("łąka", 3).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");
    let err = svc.create_stable(" ŁĄKA ", 3).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");

    svc.create_stable("Żuraw", 1).await.unwrap();
    let names: Vec<_> = svc
        .list_stables()
        .await
        .unwrap()
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(names, vec!["Łąka", "Żuraw"]);
}

#[tokio::test]
async fn non_ascii_duplicates_are_rejected() {
    let svc = StableService::new(repos().await);
    let north = svc.create_stable("North", 5).await.unwrap();

    svc.add_horse(north.id(), horse("Śnieżka", "Arab", 3, 100.0))
        .await
        .unwrap();

    let err = svc
        .add_horse(north.id(), horse("Śnieżka", "Arab", 3, 100.0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateHorse(_)), "got {err:?}");

    // different breed, different horse
    svc.add_horse(north.id(), horse("ŚNIEŻKA", "ŁATKA", 3, 1.0))
        .await
        .unwrap();

    let err = svc
        .add_horse(north.id(), horse("śnieżka", "łatka", 3, 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateHorse(_)), "got {err:?}");

    assert_eq!(svc.list_horses(north.id()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_inserts_on_a_file_database_fill_to_capacity() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("stables.db");
    let config = DatabaseConfig::sqlite(path.to_str().unwrap());
    let svc = Arc::new(StableService::new(repos_with(&config).await));
    let north = svc.create_stable("North", 3).await.unwrap();

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let svc = svc.clone();
            let stable_id = north.id();
            tokio::spawn(async move {
                svc.add_horse(stable_id, horse(&format!("Colt {i}"), "Arab", 2, 10.0))
                    .await
            })
        })
        .collect();

    let mut inserted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => inserted += 1,
            Err(e) => assert!(matches!(e, DomainError::StableFull { .. }), "got {e:?}"),
        }
    }
    assert_eq!(inserted, 3);
    assert_eq!(svc.list_horses(north.id()).await.unwrap().len(), 3);

    assert_eq!(svc.remove_stable(north.id()).await.unwrap(), 3);
    assert_eq!(svc.total_herd_value().await.unwrap(), 0.0);
}

#[tokio::test]
async fn capacity_and_duplicates_are_enforced() {
    let svc = StableService::new(repos().await);
    let north = svc.create_stable("North", 2).await.unwrap();
    let south = svc.create_stable("South", 2).await.unwrap();

    svc.add_horse(north.id(), horse("Arrow", "Arabian", 4, 1000.0))
        .await
        .unwrap();

    let err = svc
        .add_horse(north.id(), horse("ARROW", "arabian", 4, 5.0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateHorse(_)), "got {err:?}");

    // same key is fine in another stable
    svc.add_horse(south.id(), horse("Arrow", "Arabian", 4, 1000.0))
        .await
        .unwrap();

    svc.add_horse(north.id(), horse("Bell", "Haflinger", 6, 300.0))
        .await
        .unwrap();
    let err = svc
        .add_horse(north.id(), horse("Comet", "Fjord", 2, 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::StableFull { .. }), "got {err:?}");

    let fill = svc.stable_occupancy(north.id()).await.unwrap();
    assert_eq!(fill.current, 2);
    assert_eq!(fill.percentage, 1.0);
    assert_eq!(svc.get_stable(north.id()).await.unwrap().horse_ids().len(), 2);
}

#[tokio::test]
async fn updates_persist() {
    let svc = StableService::new(repos().await);
    let north = svc.create_stable("North", 2).await.unwrap();
    let h = svc
        .add_horse(north.id(), horse("Arrow", "Arabian", 4, 1000.0))
        .await
        .unwrap();

    svc.change_horse_status(h.id(), HorseCondition::InTraining)
        .await
        .unwrap();
    svc.change_horse_weight(h.id(), -30.0).await.unwrap();
    assert!(svc.change_horse_weight(h.id(), -1000.0).await.is_err());

    let stored = svc.get_horse(h.id()).await.unwrap();
    assert_eq!(stored.status(), HorseCondition::InTraining);
    assert_eq!(stored.weight_kg(), 450.0);
}

#[tokio::test]
async fn removing_a_stable_cascades_to_horses_and_ratings() {
    let repos = repos().await;
    let svc = StableService::new(repos.clone());
    let ratings = RatingService::new(repos.clone());

    let north = svc.create_stable("North", 3).await.unwrap();
    let a = svc
        .add_horse(north.id(), horse("Arrow", "Arabian", 4, 1000.0))
        .await
        .unwrap();
    svc.add_horse(north.id(), horse("Bell", "Haflinger", 6, 300.0))
        .await
        .unwrap();
    ratings.add_rating(a.id(), 5, Some("fast"), None).await.unwrap();

    assert_eq!(svc.total_herd_value().await.unwrap(), 1300.0);
    assert_eq!(svc.remove_stable(north.id()).await.unwrap(), 2);

    assert!(matches!(
        svc.get_horse(a.id()).await.unwrap_err(),
        DomainError::NotFound { .. }
    ));
    assert_eq!(ratings.average_rating_for_horse(a.id()).await.unwrap(), None);
    assert_eq!(svc.total_herd_value().await.unwrap(), 0.0);
}

#[tokio::test]
async fn rating_statistics_group_by_name() {
    let repos = repos().await;
    let svc = StableService::new(repos.clone());
    let ratings = RatingService::new(repos.clone());

    let north = svc.create_stable("North", 5).await.unwrap();
    let spirit_young = svc
        .add_horse(north.id(), horse("Spirit", "Mustang", 3, 1.0))
        .await
        .unwrap();
    let spirit_old = svc
        .add_horse(north.id(), horse("Spirit", "Mustang", 9, 1.0))
        .await
        .unwrap();
    let bell = svc
        .add_horse(north.id(), horse("Bell", "Haflinger", 6, 1.0))
        .await
        .unwrap();

    for (id, v) in [(spirit_young.id(), 2), (spirit_old.id(), 4), (bell.id(), 5)] {
        ratings.add_rating(id, v, None, None).await.unwrap();
    }
    assert!(ratings.add_rating(9999, 3, None, None).await.is_err());

    let stats = ratings.rating_stats_for_stable(north.id()).await.unwrap();
    let names: Vec<_> = stats.iter().map(|s| s.horse_name.as_str()).collect();
    assert_eq!(names, vec!["Bell", "Spirit"]);
    assert_eq!(stats[1].count, 2);
    assert_eq!(stats[1].average, 3.0);
    assert_eq!(
        ratings.average_rating_for_horse(bell.id()).await.unwrap(),
        Some(5.0)
    );
}

#[tokio::test]
async fn roster_round_trip_between_stables() {
    let repos = repos().await;
    let svc = Arc::new(StableService::new(repos));
    let roster = RosterService::new(svc.clone());

    let source = svc.create_stable("Source", 5).await.unwrap();
    svc.add_horse(source.id(), horse("Comet", "Fjord", 2, 10.0))
        .await
        .unwrap();
    svc.add_horse(source.id(), horse("Bell, Jr.", "Haflinger", 6, 300.5))
        .await
        .unwrap();

    let mut csv = Vec::new();
    assert_eq!(roster.export_roster(source.id(), &mut csv).await.unwrap(), 2);

    let target = svc.create_stable("Target", 1).await.unwrap();
    let report = roster.import_roster(target.id(), csv.as_slice()).await.unwrap();
    assert_eq!(report.inserted(), 1);
    assert!(matches!(
        report.rows[1].outcome,
        RowOutcome::SkippedFull { .. }
    ));

    let imported = svc.list_horses(target.id()).await.unwrap();
    assert_eq!(imported[0].name(), "Bell, Jr.");
    assert_eq!(imported[0].price(), 300.5);
    assert_eq!(
        imported[0].acquisition_date(),
        Utc.with_ymd_and_hms(2023, 3, 14, 0, 0, 0).unwrap()
    );
}
