use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};

use crate::{
    error::StoreError,
    models::{focus::FocusMode, tag::Tag},
};

/// Persistence collaborator for focus modes.
///
/// Handlers validate before calling in; implementations may assume a
/// non-empty name and at least one tag.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FocusModeStore: Send + Sync {
    /// All focus modes ordered by id, each with its tags in stored order.
    async fn get_all(&self) -> Result<Vec<FocusMode>, StoreError>;

    /// Persist a new focus mode and return it with its assigned id.
    async fn create(&self, mode: &FocusMode) -> Result<FocusMode, StoreError>;

    /// Replace the record keyed by `mode.id`, tags included.
    async fn update(&self, mode: &FocusMode) -> Result<FocusMode, StoreError>;

    /// Remove a focus mode. Deleting an unknown id is not an error.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

#[derive(FromRow)]
struct FocusModeRow {
    id: i64,
    name: String,
    last_used_at: Option<DateTime<Utc>>,
}

#[derive(FromRow)]
struct FocusModeTagRow {
    focus_mode_id: i64,
    id: i64,
    name: String,
    color: Option<String>,
}

impl FocusModeRow {
    fn into_focus_mode(self, tags: Vec<Tag>) -> FocusMode {
        FocusMode {
            id: self.id,
            name: self.name,
            tags,
            last_used_at: self.last_used_at,
        }
    }
}

pub struct PgFocusModeStore {
    pool: PgPool,
}

impl PgFocusModeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FocusModeStore for PgFocusModeStore {
    async fn get_all(&self) -> Result<Vec<FocusMode>, StoreError> {
        let rows = sqlx::query_as::<_, FocusModeRow>(
            "SELECT id, name, last_used_at FROM focus_modes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let tag_rows = sqlx::query_as::<_, FocusModeTagRow>(
            "SELECT fmt.focus_mode_id, t.id, t.name, t.color
             FROM focus_mode_tags fmt
             JOIN tags t ON t.id = fmt.tag_id
             ORDER BY fmt.focus_mode_id, fmt.position",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tags_by_mode = group_tags(tag_rows);
        let modes = rows
            .into_iter()
            .map(|row| {
                let tags = tags_by_mode.remove(&row.id).unwrap_or_default();
                row.into_focus_mode(tags)
            })
            .collect();
        Ok(modes)
    }

    async fn create(&self, mode: &FocusMode) -> Result<FocusMode, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, FocusModeRow>(
            "INSERT INTO focus_modes (name)
             VALUES ($1)
             RETURNING id, name, last_used_at",
        )
        .bind(&mode.name)
        .fetch_one(&mut *tx)
        .await?;

        insert_tags(&mut *tx, row.id, &mode.tags).await?;
        let tags = load_tags(&mut *tx, row.id).await?;
        tx.commit().await?;

        Ok(row.into_focus_mode(tags))
    }

    async fn update(&self, mode: &FocusMode) -> Result<FocusMode, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, FocusModeRow>(
            "UPDATE focus_modes
             SET name = $1
             WHERE id = $2
             RETURNING id, name, last_used_at",
        )
        .bind(&mode.name)
        .bind(mode.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound(mode.id))?;

        // Whole-record replace: drop the previous tag list before writing the new one
        sqlx::query("DELETE FROM focus_mode_tags WHERE focus_mode_id = $1")
            .bind(row.id)
            .execute(&mut *tx)
            .await?;
        insert_tags(&mut *tx, row.id, &mode.tags).await?;
        let tags = load_tags(&mut *tx, row.id).await?;
        tx.commit().await?;

        Ok(row.into_focus_mode(tags))
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM focus_modes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Attach `tags` to a focus mode, keeping the submitted order. A tag listed
/// twice keeps its first position.
async fn insert_tags(conn: &mut PgConnection, focus_id: i64, tags: &[Tag]) -> Result<(), StoreError> {
    let tag_ids: Vec<i64> = tags.iter().map(|t| t.id).collect();
    sqlx::query(
        "INSERT INTO focus_mode_tags (focus_mode_id, tag_id, position)
         SELECT $1, t.tag_id, (t.ord - 1)::INT
         FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS t(tag_id, ord)
         ON CONFLICT (focus_mode_id, tag_id) DO NOTHING",
    )
    .bind(focus_id)
    .bind(&tag_ids)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        let foreign_key = e
            .as_database_error()
            .and_then(|d| d.code())
            .as_deref()
            == Some(FOREIGN_KEY_VIOLATION);
        if foreign_key {
            StoreError::UnknownTag(tag_ids.clone())
        } else {
            StoreError::Database(e)
        }
    })?;
    Ok(())
}

async fn load_tags(conn: &mut PgConnection, focus_id: i64) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        "SELECT t.id, t.name, t.color
         FROM focus_mode_tags fmt
         JOIN tags t ON t.id = fmt.tag_id
         WHERE fmt.focus_mode_id = $1
         ORDER BY fmt.position",
    )
    .bind(focus_id)
    .fetch_all(&mut *conn)
    .await
}

fn group_tags(rows: Vec<FocusModeTagRow>) -> HashMap<i64, Vec<Tag>> {
    let mut grouped: HashMap<i64, Vec<Tag>> = HashMap::new();
    for row in rows {
        grouped.entry(row.focus_mode_id).or_default().push(Tag {
            id: row.id,
            name: row.name,
            color: row.color,
        });
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_row(focus_mode_id: i64, id: i64, name: &str) -> FocusModeTagRow {
        FocusModeTagRow {
            focus_mode_id,
            id,
            name: name.into(),
            color: None,
        }
    }

    #[test]
    fn test_group_tags_keeps_row_order_per_mode() {
        let grouped = group_tags(vec![
            tag_row(1, 5, "work"),
            tag_row(1, 2, "email"),
            tag_row(2, 7, "reading"),
        ]);

        let first: Vec<i64> = grouped[&1].iter().map(|t| t.id).collect();
        assert_eq!(first, vec![5, 2]);
        assert_eq!(grouped[&2][0].name, "reading");
        assert!(!grouped.contains_key(&3));
    }

    async fn seed_tag(pool: &PgPool, name: &str) -> Tag {
        sqlx::query_as::<_, Tag>("INSERT INTO tags (name) VALUES ($1) RETURNING id, name, color")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn mode(id: i64, name: &str, tags: &[&Tag]) -> FocusMode {
        FocusMode {
            id,
            name: name.into(),
            tags: tags.iter().map(|t| (*t).clone()).collect(),
            last_used_at: None,
        }
    }

    fn tag_names(mode: &FocusMode) -> Vec<&str> {
        mode.tags.iter().map(|t| t.name.as_str()).collect()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_keeps_submitted_order_and_first_duplicate(pool: PgPool) {
        let a = seed_tag(&pool, "a").await;
        let b = seed_tag(&pool, "b").await;
        let store = PgFocusModeStore::new(pool);

        let created = store.create(&mode(999, "Deep Work", &[&b, &a, &b])).await.unwrap();
        assert_ne!(created.id, 999);
        assert_eq!(tag_names(&created), vec!["b", "a"]);

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_accepts_long_names(pool: PgPool) {
        let long = "x".repeat(300);
        let tag = seed_tag(&pool, &"t".repeat(200)).await;
        let store = PgFocusModeStore::new(pool);

        let created = store.create(&mode(0, &long, &[&tag])).await.unwrap();
        assert_eq!(created.name, long);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_replaces_name_and_tags(pool: PgPool) {
        let a = seed_tag(&pool, "a").await;
        let b = seed_tag(&pool, "b").await;
        let c = seed_tag(&pool, "c").await;
        let store = PgFocusModeStore::new(pool);

        let created = store.create(&mode(0, "Before", &[&a, &b])).await.unwrap();
        let updated = store
            .update(&mode(created.id, "After", &[&c, &a]))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "After");
        assert_eq!(tag_names(&updated), vec!["c", "a"]);
        assert_eq!(store.get_all().await.unwrap(), vec![updated]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_unknown_id(pool: PgPool) {
        let a = seed_tag(&pool, "a").await;
        let store = PgFocusModeStore::new(pool);

        let err = store.update(&mode(4242, "Ghost", &[&a])).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(4242)));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_tag_is_reported_and_rolled_back(pool: PgPool) {
        let a = seed_tag(&pool, "a").await;
        let ghost = Tag { id: a.id + 1000, name: "ghost".into(), color: None };
        let store = PgFocusModeStore::new(pool);

        let err = store.create(&mode(0, "Deep Work", &[&a, &ghost])).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownTag(_)));
        assert!(store.get_all().await.unwrap().is_empty());

        let created = store.create(&mode(0, "Deep Work", &[&a])).await.unwrap();
        let err = store
            .update(&mode(created.id, "Renamed", &[&ghost]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownTag(_)));
        // the failed update leaves the previous record intact
        assert_eq!(store.get_all().await.unwrap(), vec![created]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_is_idempotent(pool: PgPool) {
        let a = seed_tag(&pool, "a").await;
        let store = PgFocusModeStore::new(pool);

        let created = store.create(&mode(0, "Deep Work", &[&a])).await.unwrap();
        store.delete(created.id).await.unwrap();
        store.delete(created.id).await.unwrap();
        store.delete(777).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
