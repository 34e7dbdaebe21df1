use async_trait::async_trait;
use rand::Rng;
use sqlx::{FromRow, PgPool};
use time::{Duration, OffsetDateTime};
use tracing::info;

pub const OTP_LENGTH: usize = 6;

/// One live reset code per email; replaced on reissue, deleted on consume.
#[derive(Debug, Clone, FromRow)]
pub struct OtpRecord {
    pub email: String,
    pub code: String,
    pub expires_at: OffsetDateTime,
    #[allow(dead_code)]
    pub created_at: OffsetDateTime,
}

pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..OTP_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0u8..10)))
        .collect()
}

/// Store a fresh code for this email, replacing any previous one.
pub async fn issue(
    db: &PgPool,
    email: &str,
    code: &str,
    ttl_minutes: i64,
) -> Result<OtpRecord, sqlx::Error> {
    let expires_at = OffsetDateTime::now_utc() + Duration::minutes(ttl_minutes);
    sqlx::query_as::<_, OtpRecord>(
        r#"
        INSERT INTO password_otps (email, code, expires_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (email)
        DO UPDATE SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at, created_at = now()
        RETURNING email, code, expires_at, created_at
        "#,
    )
    .bind(email)
    .bind(code)
    .bind(expires_at)
    .fetch_one(db)
    .await
}

/// Check-and-consume in one statement: the row disappears exactly when the
/// code matches and has not expired, so a code can never be redeemed twice.
/// A mismatch deletes nothing, leaving the code available for retry.
pub async fn consume(db: &PgPool, email: &str, code: &str) -> Result<bool, sqlx::Error> {
    let deleted = sqlx::query_scalar::<_, String>(
        r#"
        DELETE FROM password_otps
        WHERE email = $1 AND code = $2 AND expires_at > now()
        RETURNING code
        "#,
    )
    .bind(email)
    .bind(code)
    .fetch_optional(db)
    .await?;
    Ok(deleted.is_some())
}

/// Expired codes are dead either way; drop them so only live codes remain
/// between requests.
pub async fn purge_expired(db: &PgPool, email: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM password_otps WHERE email = $1 AND expires_at <= now()")
        .bind(email)
        .execute(db)
        .await?;
    Ok(())
}

/// Delivery channel for reset codes. Kept behind a trait so the transport
/// (mail, SMS) stays outside this crate.
#[async_trait]
pub trait OtpSender: Send + Sync {
    async fn send_otp(&self, email: &str, code: &str) -> anyhow::Result<()>;
}

/// Default sender: records issuance in the log only.
#[derive(Clone)]
pub struct LogOtpSender;

#[async_trait]
impl OtpSender for LogOtpSender {
    async fn send_otp(&self, email: &str, code: &str) -> anyhow::Result<()> {
        info!(%email, %code, "password reset code issued");
        Ok(())
    }
}
