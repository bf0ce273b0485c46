use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use board_client::{BoardClient, BoardClientError, PostDetail, PostPage, PostQuery};
use clap::{Parser, Subcommand};

const USER_FILE: &str = ".board_user";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "board-cli", version, about = "CLI клиент для board-server")]
struct Cli {
    /// Адрес сервера (по умолчанию BOARD_SERVER или http://127.0.0.1:8080).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Пользователь, от имени которого выполняются изменения.
    /// Переопределяет сохранённого командой `use`.
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Запомнить пользователя для следующих команд.
    Use {
        #[arg(long)]
        user: String,
    },
    /// Создание поста (требует пользователя).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Обновление поста (только автором).
    ///
    /// Если `--content` не указан, используется текущее содержимое поста.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
    },
    /// Удаление поста (только автором).
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Список постов.
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long)]
        size: Option<u32>,
        /// Подстрока заголовка.
        #[arg(long)]
        title: Option<String>,
        /// Точный автор.
        #[arg(long)]
        created_by: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server.or_else(|| std::env::var("BOARD_SERVER").ok()));
    let mut client = BoardClient::new(server).map_err(map_client_error)?;

    let stored_user = load_user().context("не удалось прочитать .board_user")?;
    if let Some(user) = resolve_user(cli.user, stored_user) {
        client.set_user(user);
    }

    match cli.command {
        Command::Use { user } => {
            let user = parse_user_content(&user).context("имя пользователя не может быть пустым")?;
            persist_user(&user).context("не удалось сохранить пользователя")?;
            println!("Текущий пользователь: {user}");
        }
        Command::Create { title, content } => {
            let id = client
                .create_post(&title, &content)
                .await
                .map_err(map_client_error)?;
            println!("Пост создан: id={id}");
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            print_post("Пост", &post);
        }
        Command::Update { id, title, content } => {
            // Если пользователь не передал --content, сохраняем текущее содержимое поста.
            let content = match content {
                Some(content) => content,
                None => client.get_post(id).await.map_err(map_client_error)?.content,
            };

            let id = client
                .update_post(id, &title, &content)
                .await
                .map_err(map_client_error)?;
            println!("Пост обновлён: id={id}");
        }
        Command::Delete { id } => {
            let id = client.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
        Command::List {
            page,
            size,
            title,
            created_by,
        } => {
            let query = PostQuery {
                page,
                size,
                title,
                created_by,
            };
            let list = client
                .list_posts(&query)
                .await
                .map_err(map_client_error)?;
            print_list(&list);
        }
    }

    Ok(())
}

fn resolve_server(server: Option<String>) -> String {
    let raw = server.unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn resolve_user(flag: Option<String>, stored: Option<String>) -> Option<String> {
    flag.as_deref().and_then(parse_user_content).or(stored)
}

fn parse_user_content(raw: &str) -> Option<String> {
    let user = raw.trim().to_string();
    if user.is_empty() {
        return None;
    }
    Some(user)
}

fn load_user() -> io::Result<Option<String>> {
    if !Path::new(USER_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(USER_FILE)?;
    Ok(parse_user_content(&raw))
}

fn persist_user(user: &str) -> io::Result<()> {
    fs::write(USER_FILE, user)
}

fn map_client_error(err: BoardClientError) -> anyhow::Error {
    let message = match err {
        BoardClientError::MissingUser => {
            "не задан пользователь: выполните `board-cli use --user ...` или передайте --user"
                .to_string()
        }
        BoardClientError::Forbidden(message) => format!("операция запрещена: {message}"),
        BoardClientError::NotFound => "пост не найден".to_string(),
        BoardClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        BoardClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_post(title: &str, post: &PostDetail) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("content: {}", post.content);
    println!("created_by: {}", post.created_by);
    println!("created_at: {}", post.created_at);
    if let (Some(updated_by), Some(updated_at)) = (&post.updated_by, post.updated_at) {
        println!("updated_by: {updated_by}");
        println!("updated_at: {updated_at}");
    }
}

fn print_list(list: &PostPage) {
    println!(
        "Постов: {} (page={}, size={}, total={}, pages={})",
        list.posts.len(),
        list.page,
        list.size,
        list.total_elements,
        list.total_pages
    );

    for post in &list.posts {
        println!(
            "- [{}] {} (created_by={})",
            post.id, post.title, post.created_by
        );
    }

    if list.has_next {
        println!("Следующая страница: --page {}", list.page + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn resolve_server_defaults_to_local() {
        assert_eq!(resolve_server(None), DEFAULT_SERVER);
    }

    #[test]
    fn user_flag_overrides_stored_user() {
        let user = resolve_user(Some(" harris ".to_string()), Some("justo".to_string()));
        assert_eq!(user.as_deref(), Some("harris"));
    }

    #[test]
    fn blank_user_flag_falls_back_to_stored_user() {
        let user = resolve_user(Some("  ".to_string()), Some("justo".to_string()));
        assert_eq!(user.as_deref(), Some("justo"));
    }

    #[test]
    fn parse_user_content_rejects_blank() {
        assert!(parse_user_content("   ").is_none());
        assert_eq!(parse_user_content(" harris\n").as_deref(), Some("harris"));
    }
}
