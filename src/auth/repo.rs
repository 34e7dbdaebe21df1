use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 hash, not exposed in JSON
    pub profile_picture: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, profile_picture, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Find a user by primary key.
    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, profile_picture, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with hashed password. A duplicate email surfaces as
    /// a unique violation from the database.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        profile_picture: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, profile_picture)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, profile_picture, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(profile_picture)
        .fetch_one(db)
        .await
    }

    pub async fn update_profile(
        db: &PgPool,
        id: i64,
        name: &str,
        profile_picture: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, profile_picture = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, password_hash, profile_picture, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(profile_picture)
        .fetch_one(db)
        .await
    }

    pub async fn set_password(
        db: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE email = $1")
            .bind(email)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn password_hash_never_serializes() {
        let user = User {
            id: 7,
            name: "Jordan".into(),
            email: "jordan@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            profile_picture: None,
            created_at: datetime!(2024-01-10 0:00 UTC),
            updated_at: datetime!(2024-01-10 0:00 UTC),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "jordan@example.com");
        assert_eq!(json["profilePicture"], serde_json::Value::Null);
    }
}
