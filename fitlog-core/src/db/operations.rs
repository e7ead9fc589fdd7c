use anyhow::Result;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::db::models::{NewSummaryRow, StoredSummary, SummaryRow};
use crate::db::schema::workout_summaries;
use crate::session::SessionSummary;

pub fn insert_summary(
    conn: &mut SqliteConnection,
    summary: &SessionSummary,
    saved_at: &NaiveDateTime,
) -> Result<i64> {
    let row = NewSummaryRow::from_summary(summary, saved_at)?;
    diesel::insert_into(workout_summaries::table)
        .values(&row)
        .returning(workout_summaries::id)
        .get_result::<i64>(conn)
        .map_err(Into::into)
}

/// Newest first.
pub fn list_summaries(conn: &mut SqliteConnection) -> Result<Vec<StoredSummary>> {
    workout_summaries::table
        .order(workout_summaries::id.desc())
        .select(SummaryRow::as_select())
        .load::<SummaryRow>(conn)?
        .into_iter()
        .map(StoredSummary::try_from)
        .collect()
}

pub fn list_summaries_for_workout(
    conn: &mut SqliteConnection,
    workout_id: i64,
) -> Result<Vec<StoredSummary>> {
    workout_summaries::table
        .filter(workout_summaries::workout_id.eq(workout_id))
        .order(workout_summaries::id.desc())
        .select(SummaryRow::as_select())
        .load::<SummaryRow>(conn)?
        .into_iter()
        .map(StoredSummary::try_from)
        .collect()
}

pub fn get_summary(conn: &mut SqliteConnection, summary_id: i64) -> Result<Option<StoredSummary>> {
    workout_summaries::table
        .find(summary_id)
        .select(SummaryRow::as_select())
        .first::<SummaryRow>(conn)
        .optional()?
        .map(StoredSummary::try_from)
        .transpose()
}

pub fn delete_summary(conn: &mut SqliteConnection, summary_id: i64) -> Result<usize> {
    diesel::delete(workout_summaries::table.find(summary_id))
        .execute(conn)
        .map_err(Into::into)
}
