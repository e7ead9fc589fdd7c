use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use std::fmt;
use uuid::Uuid;

use crate::db::schema;
use crate::session::{ExerciseSummary, SessionSummary};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .with_context(|| format!("Invalid timestamp '{}'", s))
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = schema::workout_summaries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SummaryRow {
    pub id: i64,
    pub session_id: String,
    pub workout_id: i64,
    pub workout_name: String,
    pub started_at: Option<String>,
    pub duration_seconds: i64,
    pub exercises: String,
    pub notes: String,
    pub saved_at: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = schema::workout_summaries)]
pub struct NewSummaryRow<'a> {
    pub session_id: String,
    pub workout_id: i64,
    pub workout_name: &'a str,
    pub started_at: Option<String>,
    pub duration_seconds: i64,
    pub exercises: String,
    pub notes: &'a str,
    pub saved_at: String,
}

impl<'a> NewSummaryRow<'a> {
    pub fn from_summary(summary: &'a SessionSummary, saved_at: &NaiveDateTime) -> Result<Self> {
        Ok(Self {
            session_id: summary.session_id.to_string(),
            workout_id: summary.workout_id,
            workout_name: &summary.workout_name,
            started_at: summary.started_at.as_ref().map(format_timestamp),
            duration_seconds: i64::try_from(summary.total_duration_seconds)?,
            exercises: serde_json::to_string(&summary.per_exercise)?,
            notes: &summary.notes,
            saved_at: format_timestamp(saved_at),
        })
    }
}

/// A summary as it came back from a store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSummary {
    pub id: i64,
    pub saved_at: NaiveDateTime,
    pub summary: SessionSummary,
}

impl TryFrom<SummaryRow> for StoredSummary {
    type Error = anyhow::Error;

    fn try_from(row: SummaryRow) -> Result<Self> {
        let per_exercise: Vec<ExerciseSummary> = serde_json::from_str(&row.exercises)
            .with_context(|| format!("Corrupt exercise data for summary {}", row.id))?;
        let summary = SessionSummary {
            session_id: Uuid::parse_str(&row.session_id)?,
            workout_id: row.workout_id,
            workout_name: row.workout_name,
            started_at: row.started_at.as_deref().map(parse_timestamp).transpose()?,
            total_duration_seconds: u64::try_from(row.duration_seconds)?,
            per_exercise,
            notes: row.notes,
        };
        Ok(StoredSummary {
            id: row.id,
            saved_at: parse_timestamp(&row.saved_at)?,
            summary,
        })
    }
}

impl fmt::Display for StoredSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} - {} ({}, {} sets, {:.1}lbs volume)",
            self.id,
            self.saved_at.format("%Y-%m-%d %H:%M"),
            self.summary.workout_name,
            self.summary.duration_display(),
            self.summary.total_sets(),
            self.summary.total_volume()
        )
    }
}
