//! Клиентская библиотека для работы с board-server по HTTP.
//!
//! Сервер не проверяет личность пользователя: автор передаётся в запросе как
//! строка. `BoardClient` запоминает «текущего пользователя» и подставляет
//! его во все изменяющие операции, а сервер разрешает редактировать и
//! удалять пост только его автору.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BoardClientError, BoardClientResult};
pub use http_client::HttpClient;
pub use models::{PostDetail, PostPage, PostQuery, PostSummary};

#[derive(Debug, Clone)]
/// Клиент доски объявлений с сохранённым текущим пользователем.
pub struct BoardClient {
    http_client: HttpClient,
    user: Option<String>,
}

impl BoardClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> BoardClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(base_url)?,
            user: None,
        })
    }

    /// Устанавливает текущего пользователя.
    pub fn set_user(&mut self, user: impl Into<String>) {
        self.user = Some(user.into());
    }

    /// Возвращает текущего пользователя, если он установлен.
    pub fn get_user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Сбрасывает текущего пользователя.
    pub fn clear_user(&mut self) {
        self.user = None;
    }

    /// Создаёт пост от имени текущего пользователя.
    pub async fn create_post(&self, title: &str, content: &str) -> BoardClientResult<i64> {
        let user = self.require_user()?;
        self.http_client.create_post(title, content, user).await
    }

    /// Возвращает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> BoardClientResult<PostDetail> {
        self.http_client.get_post(id).await
    }

    /// Обновляет пост от имени текущего пользователя.
    ///
    /// Если пользователь не автор поста, возвращается
    /// [`BoardClientError::Forbidden`].
    pub async fn update_post(&self, id: i64, title: &str, content: &str) -> BoardClientResult<i64> {
        let user = self.require_user()?;
        self.http_client.update_post(id, title, content, user).await
    }

    /// Удаляет пост от имени текущего пользователя.
    ///
    /// Если пользователь не автор поста, возвращается
    /// [`BoardClientError::Forbidden`].
    pub async fn delete_post(&self, id: i64) -> BoardClientResult<i64> {
        let user = self.require_user()?;
        self.http_client.delete_post(id, user).await
    }

    /// Возвращает страницу постов.
    pub async fn list_posts(&self, query: &PostQuery) -> BoardClientResult<PostPage> {
        self.http_client.list_posts(query).await
    }

    fn require_user(&self) -> BoardClientResult<&str> {
        self.user.as_deref().ok_or(BoardClientError::MissingUser)
    }
}
