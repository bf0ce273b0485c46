use reqwest::{Client, Method};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{BoardClientError, BoardClientResult};
use crate::models::{PostDetail, PostPage, PostQuery, PostSummary};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostRequestDto<'a> {
    title: &'a str,
    content: &'a str,
    created_by: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePostRequestDto<'a> {
    title: &'a str,
    content: &'a str,
    updated_by: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeletePostQuery<'a> {
    created_by: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListPostsQuery<'a> {
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostIdDto {
    id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostDetailDto {
    id: i64,
    title: String,
    content: String,
    created_by: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_by: Option<String>,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostSummaryDto {
    id: i64,
    title: String,
    created_by: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_by: Option<String>,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostPageDto {
    content: Vec<PostSummaryDto>,
    page: u32,
    size: u32,
    total_elements: u64,
    total_pages: u64,
    has_next: bool,
}

impl From<PostDetailDto> for PostDetail {
    fn from(value: PostDetailDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_by: value.updated_by,
            updated_at: value.updated_at,
        }
    }
}

impl From<PostSummaryDto> for PostSummary {
    fn from(value: PostSummaryDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_by: value.updated_by,
            updated_at: value.updated_at,
        }
    }
}

impl From<PostPageDto> for PostPage {
    fn from(value: PostPageDto) -> Self {
        Self {
            posts: value.content.into_iter().map(PostSummary::from).collect(),
            page: value.page,
            size: value.size,
            total_elements: value.total_elements,
            total_pages: value.total_pages,
            has_next: value.has_next,
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `board-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> BoardClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> BoardClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        BoardClientError::from_http_status(status, Some(message))
    }

    /// отправляет запрос и разбирает JSON-ответ либо ошибку сервера
    async fn execute<TRes>(&self, request: reqwest::RequestBuilder) -> BoardClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(BoardClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(BoardClientError::from_reqwest)
    }

    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
    ) -> BoardClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let request = self.client.request(method, self.endpoint(path)).json(body);
        self.execute(request).await
    }

    /// Создаёт пост от имени `created_by` и возвращает его идентификатор.
    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        created_by: &str,
    ) -> BoardClientResult<i64> {
        let payload = CreatePostRequestDto {
            title,
            content,
            created_by,
        };
        let dto: PostIdDto = self
            .send_json(Method::POST, "/api/posts", &payload)
            .await?;
        Ok(dto.id)
    }

    /// Получает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> BoardClientResult<PostDetail> {
        let request = self
            .client
            .request(Method::GET, self.endpoint(&format!("/api/posts/{id}")));
        let dto: PostDetailDto = self.execute(request).await?;
        Ok(dto.into())
    }

    /// Обновляет пост. Сервер разрешает это только автору.
    pub async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
        updated_by: &str,
    ) -> BoardClientResult<i64> {
        let payload = UpdatePostRequestDto {
            title,
            content,
            updated_by,
        };
        let dto: PostIdDto = self
            .send_json(Method::PUT, &format!("/api/posts/{id}"), &payload)
            .await?;
        Ok(dto.id)
    }

    /// Удаляет пост. Сервер разрешает это только автору.
    pub async fn delete_post(&self, id: i64, created_by: &str) -> BoardClientResult<i64> {
        let request = self
            .client
            .request(Method::DELETE, self.endpoint(&format!("/api/posts/{id}")))
            .query(&DeletePostQuery { created_by });
        let dto: PostIdDto = self.execute(request).await?;
        Ok(dto.id)
    }

    /// Возвращает страницу постов с необязательными фильтрами.
    pub async fn list_posts(&self, query: &PostQuery) -> BoardClientResult<PostPage> {
        let params = ListPostsQuery {
            page: query.page,
            size: query.size,
            title: query.title.as_deref(),
            created_by: query.created_by.as_deref(),
        };
        let request = self
            .client
            .request(Method::GET, self.endpoint("/api/posts"))
            .query(&params);
        let dto: PostPageDto = self.execute(request).await?;
        Ok(dto.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:8080/").expect("client must build");
        let full = client.endpoint("/api/posts");
        assert_eq!(full, "http://localhost:8080/api/posts");
    }

    #[test]
    fn page_dto_maps_content_and_metadata() {
        let raw = serde_json::json!({
            "content": [{
                "id": 1,
                "title": "title1",
                "createdBy": "harris1",
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedBy": null,
                "updatedAt": null
            }],
            "page": 0,
            "size": 5,
            "numberOfElements": 1,
            "totalElements": 6,
            "totalPages": 2,
            "hasNext": true,
            "first": true,
            "last": false
        });

        let dto: PostPageDto = serde_json::from_value(raw).expect("page must deserialize");
        let page = PostPage::from(dto);
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].created_by, "harris1");
        assert!(page.posts[0].updated_at.is_none());
        assert_eq!(page.total_elements, 6);
        assert!(page.has_next);
    }

    #[test]
    fn list_query_omits_absent_filters() {
        let params = ListPostsQuery {
            page: 2,
            size: None,
            title: None,
            created_by: Some("harris1"),
        };

        let value = serde_json::to_value(&params).expect("query must serialize");
        assert_eq!(value, serde_json::json!({ "page": 2, "createdBy": "harris1" }));
    }
}
