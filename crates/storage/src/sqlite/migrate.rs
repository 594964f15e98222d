use chrono::Utc;
use sqlx::SqlitePool;

/// Apply versioned schema migrations. Each version runs in its own transaction.
pub(crate) async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: paths, ordered modules with status, ordered resources.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS learning_paths (
                    id TEXT PRIMARY KEY,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS learning_modules (
                    path_id TEXT NOT NULL,
                    id TEXT NOT NULL,
                    position INTEGER NOT NULL CHECK (position >= 0),
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    status TEXT NOT NULL
                        CHECK (status IN ('not-started', 'in-progress', 'completed')),
                    estimated_hours REAL NOT NULL CHECK (estimated_hours >= 0),
                    updated_at TEXT NOT NULL,
                    PRIMARY KEY (path_id, id),
                    FOREIGN KEY (path_id) REFERENCES learning_paths(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS module_resources (
                    path_id TEXT NOT NULL,
                    module_id TEXT NOT NULL,
                    position INTEGER NOT NULL CHECK (position >= 0),
                    kind TEXT NOT NULL CHECK (kind IN ('video', 'article', 'course')),
                    title TEXT NOT NULL,
                    url TEXT NOT NULL,
                    PRIMARY KEY (path_id, module_id, position),
                    FOREIGN KEY (path_id, module_id)
                        REFERENCES learning_modules(path_id, id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_learning_modules_path_position
                    ON learning_modules (path_id, position);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_learning_paths_created
                    ON learning_paths (created_at);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
