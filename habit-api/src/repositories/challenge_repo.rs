use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::repo_error::RepositoryError;

#[async_trait]
pub trait ChallengeRecordRepository {
    async fn list_challenges(&self) -> Result<Vec<DatabaseChallenge>, RepositoryError>;
    async fn get_challenge(&self, id: i32) -> Result<Option<DatabaseChallenge>, RepositoryError>;
    async fn create_challenge(
        &self,
        challenge: &NewDatabaseChallenge,
    ) -> Result<DatabaseChallenge, RepositoryError>;
    async fn replace_challenges(
        &self,
        challenges: &[NewDatabaseChallenge],
    ) -> Result<Vec<DatabaseChallenge>, RepositoryError>;
}

pub struct ChallengeRecordRepositoryImpl {
    pool: PgPool,
}

impl ChallengeRecordRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DatabaseChallenge {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub duration_days: i32,
    pub habits: Vec<String>,
    pub challenge_type: String,
    pub created_at: OffsetDateTime,
}

pub struct NewDatabaseChallenge {
    pub title: String,
    pub description: Option<String>,
    pub duration_days: i32,
    pub habits: Vec<String>,
    pub challenge_type: String,
    pub created_at: OffsetDateTime,
}

const INSERT_CHALLENGE: &str = r#"
    INSERT INTO challenges (title, description, duration_days, habits, challenge_type, created_at)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, title, description, duration_days, habits, challenge_type, created_at
"#;

fn insert_query(
    challenge: &NewDatabaseChallenge,
) -> sqlx::query::QueryAs<'_, sqlx::Postgres, DatabaseChallenge, sqlx::postgres::PgArguments> {
    sqlx::query_as::<_, DatabaseChallenge>(INSERT_CHALLENGE)
        .bind(&challenge.title)
        .bind(&challenge.description)
        .bind(challenge.duration_days)
        .bind(&challenge.habits)
        .bind(&challenge.challenge_type)
        .bind(challenge.created_at)
}

#[async_trait]
impl ChallengeRecordRepository for ChallengeRecordRepositoryImpl {
    async fn list_challenges(&self) -> Result<Vec<DatabaseChallenge>, RepositoryError> {
        let challenges = sqlx::query_as::<_, DatabaseChallenge>(
            r#"
            SELECT id, title, description, duration_days, habits, challenge_type, created_at
            FROM challenges
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(challenges)
    }

    async fn get_challenge(&self, id: i32) -> Result<Option<DatabaseChallenge>, RepositoryError> {
        let challenge = sqlx::query_as::<_, DatabaseChallenge>(
            r#"
            SELECT id, title, description, duration_days, habits, challenge_type, created_at
            FROM challenges
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(challenge)
    }

    async fn create_challenge(
        &self,
        challenge: &NewDatabaseChallenge,
    ) -> Result<DatabaseChallenge, RepositoryError> {
        Ok(insert_query(challenge).fetch_one(&self.pool).await?)
    }

    async fn replace_challenges(
        &self,
        challenges: &[NewDatabaseChallenge],
    ) -> Result<Vec<DatabaseChallenge>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM challenges")
            .execute(&mut *tx)
            .await?;

        let mut inserted = Vec::with_capacity(challenges.len());
        for challenge in challenges {
            inserted.push(insert_query(challenge).fetch_one(&mut *tx).await?);
        }

        tx.commit().await?;

        Ok(inserted)
    }
}
