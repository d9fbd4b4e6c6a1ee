//! Postgres repository tests
//!
//! Exercise the SQL behind the account and bundle stores: the usage
//! compare-and-swap, tier changes and the JSONB bundle round-trip.
//! Requires a database (`TEST_DATABASE_URL`); run with `--ignored`.

use chrono::{Duration, DurationRound, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use studyforge_accounts::{AccountRepository, AccountUsageStore, PlanTier, UsageSnapshot};
use studyforge_common::RepositoryError;
use studyforge_learning::{
    parse_artifact, ArtifactBundle, ArtifactStore, BundleRepository, FlashcardArtifact,
    PlanArtifact, QuizArtifact,
};

use crate::common::{connect_database, flashcards_json, plan_json, quiz_json};

async fn insert_account(pool: &PgPool) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO accounts (id, email, username) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(format!("pg_{}@studyforge.test", id.simple()))
        .bind(format!("pg_{}", id.simple()))
        .execute(pool)
        .await
        .unwrap();
    id
}

fn bundle(owner_id: Uuid, topic: &str, created_at: chrono::DateTime<Utc>) -> ArtifactBundle {
    let plan: PlanArtifact = parse_artifact(&plan_json()).unwrap();
    let flashcards: FlashcardArtifact = parse_artifact(&flashcards_json()).unwrap();
    let quiz: QuizArtifact = parse_artifact(&quiz_json()).unwrap();
    ArtifactBundle::new(owner_id, topic.to_string(), plan, flashcards, quiz, created_at).unwrap()
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_commit_usage_compare_and_swap() {
    let pool = connect_database().await.unwrap();
    let repo = AccountRepository::new(pool.clone());
    let id = insert_account(&pool).await;

    let fresh = repo.load(id).await.unwrap().unwrap();
    assert_eq!(fresh.usage(), UsageSnapshot::default());

    // Microsecond precision survives the round-trip through TIMESTAMPTZ
    let now = Utc::now()
        .duration_trunc(Duration::microseconds(1))
        .unwrap();
    let first = UsageSnapshot {
        daily_generations_used: 1,
        last_generation_at: Some(now),
    };
    repo.commit_usage(id, fresh.usage(), first).await.unwrap();
    assert_eq!(repo.load(id).await.unwrap().unwrap().usage(), first);

    // A stale snapshot (NULL timestamp) no longer matches
    let stale = repo.commit_usage(id, fresh.usage(), first).await;
    assert!(matches!(stale, Err(RepositoryError::Conflict)));

    let second = UsageSnapshot {
        daily_generations_used: 2,
        last_generation_at: Some(now + Duration::seconds(1)),
    };
    repo.commit_usage(id, first, second).await.unwrap();
    assert_eq!(repo.load(id).await.unwrap().unwrap().usage(), second);

    let missing = repo
        .commit_usage(Uuid::new_v4(), UsageSnapshot::default(), first)
        .await;
    assert!(matches!(missing, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_set_tier_stamps_upgrade_once() {
    let pool = connect_database().await.unwrap();
    let repo = AccountRepository::new(pool.clone());
    let id = insert_account(&pool).await;

    let upgraded = repo.set_tier(id, PlanTier::Premium).await.unwrap();
    assert_eq!(upgraded.tier, PlanTier::Premium);
    let stamped = upgraded.upgraded_at;
    assert!(stamped.is_some());

    let again = repo.set_tier(id, PlanTier::Premium).await.unwrap();
    assert_eq!(again.upgraded_at, stamped);

    let missing = repo.set_tier(Uuid::new_v4(), PlanTier::Premium).await;
    assert!(matches!(missing, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_bundle_round_trip_and_listing() {
    let pool = connect_database().await.unwrap();
    let repo = BundleRepository::new(pool.clone());
    let owner = insert_account(&pool).await;

    let base = Utc::now();
    let older = bundle(owner, "Optik", base - Duration::minutes(1));
    let newer = bundle(owner, "Akustik", base);

    repo.create(&older).await.unwrap();
    repo.create(&newer).await.unwrap();

    let fetched = repo.find(older.id).await.unwrap().unwrap();
    assert_eq!(fetched.owner_id, owner);
    assert_eq!(fetched.topic, "Optik");
    assert_eq!(fetched.plan, older.plan);
    assert_eq!(fetched.flashcards, older.flashcards);
    assert_eq!(fetched.quiz, older.quiz);

    let duplicate = repo.create(&older).await;
    assert!(matches!(duplicate, Err(RepositoryError::AlreadyExists)));

    let summaries = repo.list_by_owner(owner, 10, 0).await.unwrap();
    let topics: Vec<&str> = summaries.iter().map(|s| s.topic.as_str()).collect();
    assert_eq!(topics, vec!["Akustik", "Optik"]);

    assert!(repo.find(Uuid::new_v4()).await.unwrap().is_none());
}
