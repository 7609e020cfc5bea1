use async_trait::async_trait;
use sqlx::{Connection, SqlitePool};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::course::encode_technology;
use crate::models::{Course, CourseRow, CreateCourseParams, UpdateCourseParams};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no course found with id {id}")]
    NotFound { id: Uuid },

    #[error("duplicate course id {id}")]
    DuplicateKey { id: String },

    #[error("malformed technology column for course {id}: {source}")]
    Decode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode technology: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// CRUD operations over the `courses` table.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Course>, StoreError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Course, StoreError>;
    async fn create(&self, params: CreateCourseParams) -> Result<Course, StoreError>;
    async fn update(&self, id: Uuid, params: UpdateCourseParams) -> Result<Course, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS courses (
    id CHAR(36) PRIMARY KEY NOT NULL,
    name VARCHAR(255) NOT NULL,
    price DOUBLE NOT NULL,
    technology TEXT NOT NULL
)
"#;

#[derive(Clone)]
pub struct SqliteCourseStore {
    db: SqlitePool,
}

impl SqliteCourseStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.db).await?;
        Ok(())
    }

    async fn insert_with_id(
        &self,
        id: String,
        params: CreateCourseParams,
    ) -> Result<Course, StoreError> {
        let technology = params.technology.unwrap_or_default();
        let blob = encode_technology(&technology)?;

        let result = sqlx::query(
            "INSERT INTO courses (id, name, price, technology) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&id)
        .bind(&params.name)
        .bind(params.price)
        .bind(&blob)
        .execute(&self.db)
        .await;

        match result {
            Ok(done) => debug!("inserted course {} ({} row)", id, done.rows_affected()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(StoreError::DuplicateKey { id });
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Course {
            id,
            name: params.name,
            price: params.price,
            technology,
        })
    }
}

fn decode_row(row: CourseRow) -> Result<Course, StoreError> {
    let id = row.id.clone();
    row.into_course()
        .map_err(|source| StoreError::Decode { id, source })
}

#[async_trait]
impl CourseRepository for SqliteCourseStore {
    async fn get_all(&self) -> Result<Vec<Course>, StoreError> {
        let rows = sqlx::query_as::<_, CourseRow>(
            "SELECT id, name, price, technology FROM courses",
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(decode_row).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Course, StoreError> {
        let row = sqlx::query_as::<_, CourseRow>(
            "SELECT id, name, price, technology FROM courses WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound { id })?;

        decode_row(row)
    }

    async fn create(&self, params: CreateCourseParams) -> Result<Course, StoreError> {
        self.insert_with_id(Uuid::new_v4().to_string(), params).await
    }

    async fn update(&self, id: Uuid, params: UpdateCourseParams) -> Result<Course, StoreError> {
        let blob = encode_technology(params.technology.as_deref().unwrap_or_default())?;

        let affected = sqlx::query(
            "UPDATE courses SET name = ?1, price = ?2, technology = ?3 WHERE id = ?4",
        )
        .bind(&params.name)
        .bind(params.price)
        .bind(&blob)
        .bind(id.to_string())
        .execute(&self.db)
        .await?
        .rows_affected();
        debug!("updated course {} ({} rows)", id, affected);

        self.get_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let affected = sqlx::query("DELETE FROM courses WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.db)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(StoreError::NotFound { id });
        }
        debug!("deleted course {}", id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.db.acquire().await?;
        conn.ping().await?;
        Ok(())
    }
}
