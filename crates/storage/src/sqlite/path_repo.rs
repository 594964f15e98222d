use std::collections::HashMap;

use chrono::{DateTime, Utc};
use pathway_core::model::{LearningPath, ModuleId, ModuleStatus, PathId, Resource};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{
    map_module_row, map_resource_row, map_summary_row, position_to_i64, ser, store_error,
};
use crate::repository::{PathRepository, PathSummaryRecord, StorageError};

fn insert_error(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StorageError::Conflict;
        }
    }
    store_error(e)
}

#[async_trait::async_trait]
impl PathRepository for SqliteRepository {
    async fn insert_path(
        &self,
        path: &LearningPath,
        created_at: DateTime<Utc>,
    ) -> Result<PathId, StorageError> {
        let id = path
            .path_id()
            .filter(|id| !id.is_empty())
            .cloned()
            .ok_or_else(|| StorageError::Serialization("path has no id".into()))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(store_error)?;

        sqlx::query(
            r"
            INSERT INTO learning_paths (id, title, description, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(id.as_str())
        .bind(path.title())
        .bind(path.description())
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(insert_error)?;

        for (position, module) in path.modules().iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO learning_modules
                    (path_id, id, position, title, description, status, estimated_hours, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ",
            )
            .bind(id.as_str())
            .bind(module.id().as_str())
            .bind(position_to_i64(position)?)
            .bind(module.title())
            .bind(module.description())
            .bind(module.status().as_str())
            .bind(module.estimated_hours())
            .bind(created_at)
            .execute(&mut *tx)
            .await
            .map_err(insert_error)?;

            for (res_position, resource) in module.resources().iter().enumerate() {
                sqlx::query(
                    r"
                    INSERT INTO module_resources (path_id, module_id, position, kind, title, url)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    ",
                )
                .bind(id.as_str())
                .bind(module.id().as_str())
                .bind(position_to_i64(res_position)?)
                .bind(resource.kind().as_str())
                .bind(resource.title())
                .bind(resource.url())
                .execute(&mut *tx)
                .await
                .map_err(insert_error)?;
            }
        }

        tx.commit()
            .await
            .map_err(store_error)?;
        Ok(id)
    }

    async fn get_path(&self, id: &PathId) -> Result<Option<LearningPath>, StorageError> {
        let Some(path_row) = sqlx::query(
            r"
            SELECT id, title, description FROM learning_paths WHERE id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?
        else {
            return Ok(None);
        };

        let resource_rows = sqlx::query(
            r"
            SELECT module_id, kind, title, url
            FROM module_resources
            WHERE path_id = ?1
            ORDER BY module_id ASC, position ASC
            ",
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let mut resources: HashMap<String, Vec<Resource>> = HashMap::new();
        for row in &resource_rows {
            let (module_id, resource) = map_resource_row(row)?;
            resources.entry(module_id).or_default().push(resource);
        }

        let module_rows = sqlx::query(
            r"
            SELECT id, title, description, status, estimated_hours
            FROM learning_modules
            WHERE path_id = ?1
            ORDER BY position ASC
            ",
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let mut modules = Vec::with_capacity(module_rows.len());
        for row in &module_rows {
            let module_id: String = row.try_get("id").map_err(ser)?;
            let module_resources = resources.remove(&module_id).unwrap_or_default();
            modules.push(map_module_row(row, module_resources)?);
        }

        LearningPath::from_persisted(
            PathId::new(path_row.try_get::<String, _>("id").map_err(ser)?),
            path_row.try_get::<String, _>("title").map_err(ser)?,
            path_row.try_get::<String, _>("description").map_err(ser)?,
            modules,
        )
        .map(Some)
        .map_err(ser)
    }

    async fn list_paths(&self, limit: u32) -> Result<Vec<PathSummaryRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT
                p.id,
                p.title,
                p.description,
                p.created_at,
                COUNT(m.id) AS module_count,
                COALESCE(SUM(CASE WHEN m.status = 'completed' THEN 1 ELSE 0 END), 0)
                    AS completed_count
            FROM learning_paths p
            LEFT JOIN learning_modules m ON m.path_id = p.id
            GROUP BY p.id
            ORDER BY p.created_at DESC, p.id ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.iter().map(map_summary_row).collect()
    }

    async fn update_module_status(
        &self,
        path_id: &PathId,
        module_id: &ModuleId,
        status: ModuleStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE learning_modules
            SET status = ?1, updated_at = ?2
            WHERE path_id = ?3 AND id = ?4
            ",
        )
        .bind(status.as_str())
        .bind(updated_at)
        .bind(path_id.as_str())
        .bind(module_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
