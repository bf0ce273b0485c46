use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};

use crate::data::post_repository::{PostRepository, PostTransaction};
use crate::domain::error::DomainError;
use crate::domain::page::{Page, PageRequest};
use crate::domain::post::{Post, PostId};
use crate::domain::search::PostSearchCriteria;

const SELECT_POST: &str = r#"
    SELECT
        id,
        title,
        content,
        created_by,
        created_at,
        updated_by,
        updated_at
    FROM posts
"#;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) struct PostgresPostTransaction {
    tx: Transaction<'static, Postgres>,
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_by: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn begin(&self) -> Result<Box<dyn PostTransaction>, DomainError> {
        let tx = self.pool.begin().await.map_err(map_post_db_error)?;
        Ok(Box::new(PostgresPostTransaction { tx }))
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn find_page(
        &self,
        request: PageRequest,
        criteria: &PostSearchCriteria,
    ) -> Result<Page<Post>, DomainError> {
        let offset = i64::try_from(request.offset()).map_err(|_| DomainError::Validation {
            field: "page",
            message: "is out of range",
        })?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts WHERE 1=1");
        push_filters(&mut count, criteria);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        let mut select = QueryBuilder::<Postgres>::new(SELECT_POST);
        select.push(" WHERE 1=1");
        push_filters(&mut select, criteria);
        select
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(i64::from(request.size()))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = select
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        let posts = rows
            .into_iter()
            .map(map_row_to_post)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(posts, request, total.max(0) as u64))
    }
}

#[async_trait]
impl PostTransaction for PostgresPostTransaction {
    async fn find_by_id_for_update(&mut self, id: PostId) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} WHERE id = $1 FOR UPDATE"))
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn save(&mut self, post: &Post) -> Result<PostId, DomainError> {
        match post.id() {
            None => sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO posts (title, content, created_by, created_at)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(post.title())
            .bind(post.content())
            .bind(post.created_by())
            .bind(post.created_at())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_post_db_error),
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE posts
                    SET title = $2,
                        content = $3,
                        updated_by = $4,
                        updated_at = $5
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(post.title())
                .bind(post.content())
                .bind(post.updated_by())
                .bind(post.updated_at())
                .execute(&mut *self.tx)
                .await
                .map_err(map_post_db_error)?;

                if result.rows_affected() == 0 {
                    return Err(DomainError::post_not_found(id));
                }
                Ok(id)
            }
        }
    }

    async fn delete(&mut self, post: &Post) -> Result<(), DomainError> {
        let Some(id) = post.id() else {
            return Err(DomainError::Validation {
                field: "id",
                message: "post was never stored",
            });
        };

        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_post_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::post_not_found(id));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx.commit().await.map_err(map_post_db_error)
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, criteria: &PostSearchCriteria) {
    if let Some(title) = criteria.title() {
        builder
            .push(" AND strpos(title, ")
            .push_bind(title.to_string())
            .push(") > 0");
    }
    if let Some(created_by) = criteria.created_by() {
        builder
            .push(" AND created_by = ")
            .push_bind(created_by.to_string());
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    let id = row.id;
    Post::restore(
        id,
        row.title,
        row.content,
        row.created_by,
        row.created_at,
        row.updated_by,
        row.updated_at,
    )
    .map_err(|err| DomainError::Persistence(format!("corrupted post row {id}: {err}")))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Persistence(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::PostgresPostRepository;
    use crate::data::post_repository::PostRepository;
    use crate::domain::error::DomainError;
    use crate::domain::page::PageRequest;
    use crate::domain::post::{Post, PostUpdateRequest};
    use crate::domain::search::PostSearchCriteria;
    use crate::infrastructure::database::{create_pool, run_migrations};

    async fn repository() -> PostgresPostRepository {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = create_pool(&url, 2).await.expect("pool must connect");
        run_migrations(&pool).await.expect("migrations must apply");
        PostgresPostRepository::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL (DATABASE_URL)"]
    async fn save_update_and_delete_round_trip() {
        let repo = repository().await;
        let suffix = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
        let author = format!("pg_author_{suffix}");

        let mut tx = repo.begin().await.expect("begin");
        let id = tx
            .save(&Post::new(author.clone(), "pg title", "pg content"))
            .await
            .expect("insert");
        tx.commit().await.expect("commit");

        let mut tx = repo.begin().await.expect("begin");
        let mut post = tx
            .find_by_id_for_update(id)
            .await
            .expect("select")
            .expect("post must exist");
        post.apply_update(PostUpdateRequest {
            title: "pg title updated".to_string(),
            content: "pg content updated".to_string(),
            updated_by: author.clone(),
        })
        .expect("author may update");
        tx.save(&post).await.expect("update");
        tx.commit().await.expect("commit");

        let stored = repo
            .find_by_id(id)
            .await
            .expect("select")
            .expect("post must exist");
        assert_eq!(stored.title(), "pg title updated");
        assert_eq!(stored.updated_by(), Some(author.as_str()));

        let page = repo
            .find_page(
                PageRequest::new(0, 10).expect("valid page"),
                &PostSearchCriteria::new(None, Some(author.clone())),
            )
            .await
            .expect("page");
        assert_eq!(page.total_elements, 1);

        let mut tx = repo.begin().await.expect("begin");
        tx.delete(&stored).await.expect("delete");
        tx.commit().await.expect("commit");

        assert!(repo.find_by_id(id).await.expect("select").is_none());
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL (DATABASE_URL)"]
    async fn dropped_transaction_rolls_back() {
        let repo = repository().await;

        let id = {
            let mut tx = repo.begin().await.expect("begin");
            tx.save(&Post::new("rollback", "t", "c"))
                .await
                .expect("insert")
        };

        assert!(repo.find_by_id(id).await.expect("select").is_none());

        let mut tx = repo.begin().await.expect("begin");
        let err = tx
            .delete(
                &Post::restore(id, "t", "c", "rollback", chrono::Utc::now(), None, None)
                    .expect("valid"),
            )
            .await
            .expect_err("row must not exist");
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
