use async_trait::async_trait;
use sqlx::{query_as, QueryBuilder};

use crate::{
    application::{
        dto::file_dto::FileDTO, error::ApplicationError,
        repositories::file_repository::FileRepository,
    },
    domain::models::file::{File, FileSummary, StorageUsage},
};

const SUMMARY_COLUMNS: &str = "id, file_name, file_type, size, trashed, uploaded_at";

pub struct PgFileRepository {
    pool: sqlx::PgPool,
}

impl PgFileRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE wildcards so user input only ever matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create_file(&self, file: FileDTO) -> Result<FileSummary, ApplicationError> {
        let mut file = file;
        file.sanitize();

        let query = format!(
            r#"
            INSERT INTO application.files (
                file_name, file_type, size, content, trashed, uploaded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SUMMARY_COLUMNS}
        "#
        );

        let new_file: File = file.into();

        let created: FileDTO = query_as::<_, FileDTO>(&query)
            .bind(&new_file.file_name)
            .bind(&new_file.file_type)
            .bind(new_file.size as i64)
            .bind(&new_file.content)
            .bind(new_file.trashed)
            .bind(new_file.uploaded_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(created.into())
    }

    async fn get_file(&self, id: i64) -> Result<File, ApplicationError> {
        let query = "SELECT * FROM application.files WHERE id = $1";

        let fetched: FileDTO = query_as::<_, FileDTO>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApplicationError::NotFound)?;

        Ok(fetched.into())
    }

    async fn list_files(&self, query: &str) -> Result<Vec<FileSummary>, ApplicationError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {SUMMARY_COLUMNS} FROM application.files WHERE trashed = FALSE"
        ));
        if !query.is_empty() {
            builder.push(" AND file_name ILIKE ");
            builder.push_bind(format!("%{}%", escape_like(query)));
            builder.push(" ESCAPE '\\'");
        }
        builder.push(" ORDER BY uploaded_at DESC, id DESC");

        let rows: Vec<FileDTO> = builder
            .build_query_as::<FileDTO>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(FileSummary::from).collect())
    }

    async fn list_trashed_files(&self) -> Result<Vec<FileSummary>, ApplicationError> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM application.files WHERE trashed = TRUE ORDER BY uploaded_at DESC, id DESC"
        );

        let rows: Vec<FileDTO> = query_as::<_, FileDTO>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(FileSummary::from).collect())
    }

    async fn update_file(&self, file: FileDTO) -> Result<FileSummary, ApplicationError> {
        if !file.has_changes() {
            return self.get_file(file.id).await.map(FileSummary::from);
        }

        let mut builder = QueryBuilder::new("UPDATE application.files SET ");
        let mut separated = builder.separated(", ");

        if let Some(file_name) = &file.file_name {
            separated.push("file_name = ");
            separated.push_bind_unseparated(file_name);
        }
        if let Some(trashed) = file.trashed {
            separated.push("trashed = ");
            separated.push_bind_unseparated(trashed);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(file.id);
        builder.push(format!(" RETURNING {SUMMARY_COLUMNS}"));

        let updated = builder
            .build_query_as::<FileDTO>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApplicationError::NotFound)?;

        Ok(updated.into())
    }

    async fn toggle_trashed(&self, id: i64) -> Result<FileSummary, ApplicationError> {
        let query = format!(
            r#"
            UPDATE application.files
            SET trashed = NOT trashed
            WHERE id = $1
            RETURNING {SUMMARY_COLUMNS}
        "#
        );

        let updated: FileDTO = query_as::<_, FileDTO>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApplicationError::NotFound)?;

        Ok(updated.into())
    }

    async fn delete_file(&self, id: i64) -> Result<FileSummary, ApplicationError> {
        let query = format!("DELETE FROM application.files WHERE id = $1 RETURNING {SUMMARY_COLUMNS}");

        let deleted: FileDTO = query_as::<_, FileDTO>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApplicationError::NotFound)?;

        Ok(deleted.into())
    }

    async fn purge_trashed(&self) -> Result<u64, ApplicationError> {
        let result = sqlx::query("DELETE FROM application.files WHERE trashed = TRUE")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn usage(&self) -> Result<StorageUsage, ApplicationError> {
        let query = r#"
            SELECT
                COUNT(*) FILTER (WHERE NOT trashed),
                COUNT(*) FILTER (WHERE trashed),
                COALESCE(SUM(size), 0)::BIGINT
            FROM application.files
        "#;

        let (file_count, trashed_count, total_bytes): (i64, i64, i64) = sqlx::query_as(query)
            .fetch_one(&self.pool)
            .await?;

        Ok(StorageUsage {
            file_count: file_count.max(0) as u64,
            trashed_count: trashed_count.max(0) as u64,
            total_bytes: total_bytes.max(0) as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_neutralises_wildcards() {
        assert_eq!(escape_like("report"), "report");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\tmp"), "c:\\\\tmp");
    }
}
