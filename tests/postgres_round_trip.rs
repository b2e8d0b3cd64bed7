mod common;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rebel_kingdoms::SaveStore;
use rebel_kingdoms::db::{delete_save, load_store, migrate, save_store};
use rebel_kingdoms::sim::TickContext;
use rebel_kingdoms::sim::rebellion::RebellionSystem;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::ContainerAsync;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;

async fn setup() -> (PgPool, ContainerAsync<Postgres>) {
    let container = Postgres::default().start().await.unwrap();
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let pool = PgPoolOptions::new()
        .connect(&format!(
            "postgres://postgres:postgres@{}:{}/postgres",
            host, port
        ))
        .await
        .unwrap();
    (pool, container)
}

fn engine_state() -> SaveStore {
    let common::Realm { mut world, .. } = common::restive_realm();
    let mut system = RebellionSystem::new(common::eager_config());
    system.on_new_game_created(&world);
    let mut rng = SmallRng::seed_from_u64(3);
    let mut signals = Vec::new();
    let mut ctx = TickContext {
        world: &mut world,
        rng: &mut rng,
        signals: &mut signals,
        inbox: &[],
    };
    system.daily_tick(&mut ctx);
    let mut store = SaveStore::new();
    system.save(&mut store).unwrap();
    store
}

#[tokio::test]
#[ignore]
async fn store_round_trips_through_postgres() {
    let (pool, _container) = setup().await;
    migrate(&pool).await.unwrap();
    // Migration is idempotent.
    migrate(&pool).await.unwrap();

    let store = engine_state();
    save_store(&pool, "campaign-1", &store).await.unwrap();
    let loaded = load_store(&pool, "campaign-1").await.unwrap();
    assert_eq!(loaded, store);

    let mut restored = RebellionSystem::new(common::eager_config());
    restored.restore(&loaded).unwrap();
    let mut resaved = SaveStore::new();
    restored.save(&mut resaved).unwrap();
    assert_eq!(
        serde_json::to_vec(&resaved).unwrap(),
        serde_json::to_vec(&store).unwrap()
    );
}

#[tokio::test]
#[ignore]
async fn saving_twice_overwrites_and_saves_are_isolated() {
    let (pool, _container) = setup().await;
    migrate(&pool).await.unwrap();

    let store = engine_state();
    save_store(&pool, "campaign-1", &SaveStore::new()).await.unwrap();
    save_store(&pool, "campaign-1", &store).await.unwrap();
    save_store(&pool, "campaign-1", &store).await.unwrap();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM campaign_state WHERE save_name = $1")
        .bind("campaign-1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 2);

    assert!(load_store(&pool, "campaign-2").await.unwrap().is_empty());
    assert_eq!(delete_save(&pool, "campaign-1").await.unwrap(), 2);
    assert!(load_store(&pool, "campaign-1").await.unwrap().is_empty());
}
