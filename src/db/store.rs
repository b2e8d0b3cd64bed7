use sqlx::PgPool;

use crate::persist::SaveStore;

/// Upsert every key of `store` under `save_name` in one transaction.
pub async fn save_store(pool: &PgPool, save_name: &str, store: &SaveStore) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for (key, value) in store.iter() {
        sqlx::query(include_str!("../../sql/upsert_state.sql"))
            .bind(save_name)
            .bind(key)
            .bind(value.to_string())
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// Load every key stored under `save_name`. An unknown save loads as an
/// empty store.
pub async fn load_store(pool: &PgPool, save_name: &str) -> Result<SaveStore, sqlx::Error> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT key, value::text FROM campaign_state WHERE save_name = $1 ORDER BY key")
            .bind(save_name)
            .fetch_all(pool)
            .await?;

    let mut store = SaveStore::new();
    for (key, text) in rows {
        let value = serde_json::from_str(&text).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        store.put_raw(key, value);
    }
    Ok(store)
}

/// Drop a save. Returns how many keys were removed.
pub async fn delete_save(pool: &PgPool, save_name: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM campaign_state WHERE save_name = $1")
        .bind(save_name)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
