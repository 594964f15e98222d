use pathway_core::model::{
    LearningModule, ModuleId, ModuleStatus, Resource, ResourceKind,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{PathSummaryRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Transport failures become `Connection`; anything the database itself reports
/// is a rejection.
pub(crate) fn store_error(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StorageError::Connection(e.to_string()),
        _ => StorageError::Rejected(e.to_string()),
    }
}

pub(crate) fn position_to_i64(position: usize) -> Result<i64, StorageError> {
    i64::try_from(position).map_err(|_| StorageError::Serialization("position overflow".into()))
}

fn count_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

/// Status column values are CHECK-constrained, so anything unknown is a corrupt row.
pub(crate) fn parse_status(s: &str) -> Result<ModuleStatus, StorageError> {
    s.parse::<ModuleStatus>().map_err(ser)
}

pub(crate) fn parse_resource_kind(s: &str) -> Result<ResourceKind, StorageError> {
    s.parse::<ResourceKind>().map_err(ser)
}

pub(crate) fn map_resource_row(row: &SqliteRow) -> Result<(String, Resource), StorageError> {
    let module_id: String = row.try_get("module_id").map_err(ser)?;
    let kind = parse_resource_kind(&row.try_get::<String, _>("kind").map_err(ser)?)?;
    let resource = Resource::new(
        kind,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("url").map_err(ser)?,
    )
    .map_err(ser)?;
    Ok((module_id, resource))
}

pub(crate) fn map_module_row(
    row: &SqliteRow,
    resources: Vec<Resource>,
) -> Result<LearningModule, StorageError> {
    let status = parse_status(&row.try_get::<String, _>("status").map_err(ser)?)?;
    LearningModule::new(
        ModuleId::new(row.try_get::<String, _>("id").map_err(ser)?),
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("description").map_err(ser)?,
        status,
        row.try_get::<f64, _>("estimated_hours").map_err(ser)?,
        resources,
    )
    .map_err(ser)
}

pub(crate) fn map_summary_row(row: &SqliteRow) -> Result<PathSummaryRecord, StorageError> {
    Ok(PathSummaryRecord {
        id: pathway_core::model::PathId::new(row.try_get::<String, _>("id").map_err(ser)?),
        title: row.try_get("title").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        module_count: count_from_i64(
            "module_count",
            row.try_get::<i64, _>("module_count").map_err(ser)?,
        )?,
        completed_count: count_from_i64(
            "completed_count",
            row.try_get::<i64, _>("completed_count").map_err(ser)?,
        )?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}
