use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Полное представление поста.
pub struct PostDetail {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Автор поста.
    pub created_by: String,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
    /// Кто последним редактировал пост; `None`, если пост не редактировался.
    pub updated_by: Option<String>,
    /// Дата и время последнего редактирования (UTC).
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Краткое представление поста в списке (без содержимого).
pub struct PostSummary {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Автор поста.
    pub created_by: String,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
    /// Кто последним редактировал пост.
    pub updated_by: Option<String>,
    /// Дата и время последнего редактирования (UTC).
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Страница списка постов.
pub struct PostPage {
    /// Посты на текущей странице.
    pub posts: Vec<PostSummary>,
    /// Номер страницы (с нуля).
    pub page: u32,
    /// Размер страницы.
    pub size: u32,
    /// Общее количество подходящих постов.
    pub total_elements: u64,
    /// Общее количество страниц.
    pub total_pages: u64,
    /// Есть ли следующая страница.
    pub has_next: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Параметры запроса списка постов.
pub struct PostQuery {
    /// Номер страницы (с нуля).
    pub page: u32,
    /// Размер страницы; при `None` сервер использует значение по умолчанию.
    pub size: Option<u32>,
    /// Подстрока, которую должен содержать заголовок.
    pub title: Option<String>,
    /// Точный автор.
    pub created_by: Option<String>,
}
