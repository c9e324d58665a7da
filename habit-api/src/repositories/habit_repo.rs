use async_trait::async_trait;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};

use super::repo_error::RepositoryError;

#[async_trait]
pub trait HabitRecordRepository {
    async fn list_habits(&self, category: Option<&str>)
        -> Result<Vec<DatabaseHabit>, RepositoryError>;
    async fn get_habit(&self, id: i32) -> Result<Option<DatabaseHabit>, RepositoryError>;
    async fn completions_for(
        &self,
        habit_ids: &[i32],
    ) -> Result<Vec<DatabaseCompletion>, RepositoryError>;
    async fn screen_time_for(
        &self,
        habit_ids: &[i32],
    ) -> Result<Vec<DatabaseScreenTime>, RepositoryError>;
    async fn create_habit(&self, habit: &NewDatabaseHabit) -> Result<DatabaseHabit, RepositoryError>;
    async fn save_habit(
        &self,
        habit: &DatabaseHabit,
        completions: &[DatabaseCompletion],
        screen_time: &[DatabaseScreenTime],
    ) -> Result<(), RepositoryError>;
    async fn delete_habit(&self, id: i32) -> Result<bool, RepositoryError>;
}

pub struct HabitRecordRepositoryImpl {
    pool: PgPool,
}

impl HabitRecordRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DatabaseHabit {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub frequency: String,
    pub category: String,
    pub habit_type: String,
    pub streak: i32,
    pub screen_time_goal: i32,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DatabaseCompletion {
    pub habit_id: i32,
    pub day: Date,
    pub completed_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DatabaseScreenTime {
    pub habit_id: i32,
    pub day: Date,
    pub minutes: i32,
}

pub struct NewDatabaseHabit {
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub frequency: String,
    pub category: String,
    pub habit_type: String,
    pub screen_time_goal: i32,
    pub created_at: OffsetDateTime,
}

#[async_trait]
impl HabitRecordRepository for HabitRecordRepositoryImpl {
    async fn list_habits(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<DatabaseHabit>, RepositoryError> {
        let habits = sqlx::query_as::<_, DatabaseHabit>(
            r#"
            SELECT id, name, description, icon, frequency, category, habit_type, streak, screen_time_goal, created_at
            FROM habits
            WHERE $1::TEXT IS NULL OR category = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(habits)
    }

    async fn get_habit(&self, id: i32) -> Result<Option<DatabaseHabit>, RepositoryError> {
        let habit = sqlx::query_as::<_, DatabaseHabit>(
            r#"
            SELECT id, name, description, icon, frequency, category, habit_type, streak, screen_time_goal, created_at
            FROM habits
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(habit)
    }

    async fn completions_for(
        &self,
        habit_ids: &[i32],
    ) -> Result<Vec<DatabaseCompletion>, RepositoryError> {
        let completions = sqlx::query_as::<_, DatabaseCompletion>(
            r#"
            SELECT habit_id, day, completed_at
            FROM habit_completions
            WHERE habit_id = ANY($1)
            ORDER BY habit_id, day
            "#,
        )
        .bind(habit_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(completions)
    }

    async fn screen_time_for(
        &self,
        habit_ids: &[i32],
    ) -> Result<Vec<DatabaseScreenTime>, RepositoryError> {
        let entries = sqlx::query_as::<_, DatabaseScreenTime>(
            r#"
            SELECT habit_id, day, minutes
            FROM habit_screen_time
            WHERE habit_id = ANY($1)
            ORDER BY habit_id, day
            "#,
        )
        .bind(habit_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn create_habit(&self, habit: &NewDatabaseHabit) -> Result<DatabaseHabit, RepositoryError> {
        let created = sqlx::query_as::<_, DatabaseHabit>(
            r#"
            INSERT INTO habits (name, description, icon, frequency, category, habit_type, screen_time_goal, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, description, icon, frequency, category, habit_type, streak, screen_time_goal, created_at
            "#,
        )
        .bind(&habit.name)
        .bind(&habit.description)
        .bind(&habit.icon)
        .bind(&habit.frequency)
        .bind(&habit.category)
        .bind(&habit.habit_type)
        .bind(habit.screen_time_goal)
        .bind(habit.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn save_habit(
        &self,
        habit: &DatabaseHabit,
        completions: &[DatabaseCompletion],
        screen_time: &[DatabaseScreenTime],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // habit_type and created_at are immutable and never written back.
        let updated = sqlx::query(
            r#"
            UPDATE habits
            SET name = $1, description = $2, icon = $3, frequency = $4, category = $5, streak = $6, screen_time_goal = $7
            WHERE id = $8
            "#,
        )
        .bind(&habit.name)
        .bind(&habit.description)
        .bind(&habit.icon)
        .bind(&habit.frequency)
        .bind(&habit.category)
        .bind(habit.streak)
        .bind(habit.screen_time_goal)
        .bind(habit.id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(habit.id.to_string()));
        }

        sqlx::query("DELETE FROM habit_completions WHERE habit_id = $1")
            .bind(habit.id)
            .execute(&mut *tx)
            .await?;

        let (days, completed_at): (Vec<Date>, Vec<OffsetDateTime>) = completions
            .iter()
            .map(|c| (c.day, c.completed_at))
            .unzip();
        sqlx::query(
            r#"
            INSERT INTO habit_completions (habit_id, day, completed_at)
            SELECT $1, day, completed_at
            FROM UNNEST($2::DATE[], $3::TIMESTAMPTZ[]) AS t(day, completed_at)
            "#,
        )
        .bind(habit.id)
        .bind(days)
        .bind(completed_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM habit_screen_time WHERE habit_id = $1")
            .bind(habit.id)
            .execute(&mut *tx)
            .await?;

        let (days, minutes): (Vec<Date>, Vec<i32>) =
            screen_time.iter().map(|s| (s.day, s.minutes)).unzip();
        sqlx::query(
            r#"
            INSERT INTO habit_screen_time (habit_id, day, minutes)
            SELECT $1, day, minutes
            FROM UNNEST($2::DATE[], $3::INTEGER[]) AS t(day, minutes)
            "#,
        )
        .bind(habit.id)
        .bind(days)
        .bind(minutes)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn delete_habit(&self, id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
