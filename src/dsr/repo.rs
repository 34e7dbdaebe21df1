use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

/// Daily status report row; every report belongs to exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Dsr {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub hours: f64,
    #[serde(rename = "date", with = "crate::dsr::wire_date")]
    pub report_date: Date,
    pub project: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn insert(
    db: &PgPool,
    user_id: i64,
    content: &str,
    hours: f64,
    report_date: Date,
    project: &str,
) -> Result<Dsr, sqlx::Error> {
    sqlx::query_as::<_, Dsr>(
        r#"
        INSERT INTO dsrs (user_id, content, hours, report_date, project)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, content, hours, report_date, project, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(content)
    .bind(hours)
    .bind(report_date)
    .bind(project)
    .fetch_one(db)
    .await
}

/// Scoped update: touches the row only when it exists and belongs to the
/// user, so a foreign id and a missing id are indistinguishable to the
/// caller. Only content and hours are editable after creation.
pub async fn update_owned(
    db: &PgPool,
    id: i64,
    user_id: i64,
    content: Option<&str>,
    hours: Option<f64>,
) -> Result<Option<Dsr>, sqlx::Error> {
    sqlx::query_as::<_, Dsr>(
        r#"
        UPDATE dsrs
        SET content = COALESCE($3::text, content),
            hours = COALESCE($4::float8, hours),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, content, hours, report_date, project, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(content)
    .bind(hours)
    .fetch_optional(db)
    .await
}

pub async fn find_owned(db: &PgPool, id: i64, user_id: i64) -> Result<Option<Dsr>, sqlx::Error> {
    sqlx::query_as::<_, Dsr>(
        r#"
        SELECT id, user_id, content, hours, report_date, project, created_at, updated_at
        FROM dsrs
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn list_page(
    db: &PgPool,
    user_id: i64,
    start_date: Option<Date>,
    end_date: Option<Date>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Dsr>, sqlx::Error> {
    sqlx::query_as::<_, Dsr>(
        r#"
        SELECT id, user_id, content, hours, report_date, project, created_at, updated_at
        FROM dsrs
        WHERE user_id = $1
          AND ($2::date IS NULL OR report_date >= $2)
          AND ($3::date IS NULL OR report_date <= $3)
        ORDER BY report_date DESC, id DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

/// Full matching count for the same filter, independent of pagination.
pub async fn count(
    db: &PgPool,
    user_id: i64,
    start_date: Option<Date>,
    end_date: Option<Date>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM dsrs
        WHERE user_id = $1
          AND ($2::date IS NULL OR report_date >= $2)
          AND ($3::date IS NULL OR report_date <= $3)
        "#,
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn serializes_with_wire_field_names() {
        let dsr = Dsr {
            id: 42,
            user_id: 7,
            content: "Fixed bug X".into(),
            hours: 3.0,
            report_date: date!(2024 - 01 - 10),
            project: "DSR System".into(),
            created_at: datetime!(2024-01-10 9:00 UTC),
            updated_at: datetime!(2024-01-10 9:00 UTC),
        };

        let json = serde_json::to_value(&dsr).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["date"], "2024-01-10");
        assert_eq!(json["project"], "DSR System");
        assert!(json.get("report_date").is_none());
    }
}
