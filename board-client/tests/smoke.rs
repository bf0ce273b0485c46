use std::time::{SystemTime, UNIX_EPOCH};

use board_client::{BoardClient, BoardClientError, PostQuery};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running board-server"]
async fn http_smoke_flow() {
    let base_url =
        std::env::var("BOARD_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let mut client = BoardClient::new(base_url).expect("client must build");

    let author = format!("smoke_author_{}", unique_suffix());
    client.set_user(author.clone());

    let id = client
        .create_post("smoke title", "smoke content")
        .await
        .expect("create_post must succeed");
    assert!(id > 0);

    let fetched = client.get_post(id).await.expect("get_post must succeed");
    assert_eq!(fetched.id, id);
    assert_eq!(fetched.created_by, author);
    assert!(fetched.updated_by.is_none());

    let listed = client
        .list_posts(&PostQuery {
            created_by: Some(author.clone()),
            ..PostQuery::default()
        })
        .await
        .expect("list_posts must succeed");
    assert_eq!(listed.total_elements, 1);
    assert_eq!(listed.posts[0].id, id);

    client.set_user(format!("{author}_intruder"));
    let forbidden = client
        .update_post(id, "hijacked", "hijacked")
        .await
        .expect_err("non-author must be rejected");
    assert!(matches!(forbidden, BoardClientError::Forbidden(_)));
    let forbidden = client
        .delete_post(id)
        .await
        .expect_err("non-author must be rejected");
    assert!(matches!(forbidden, BoardClientError::Forbidden(_)));

    client.set_user(author.clone());
    let updated_id = client
        .update_post(id, "smoke title updated", "smoke content updated")
        .await
        .expect("update_post must succeed");
    assert_eq!(updated_id, id);

    let updated = client.get_post(id).await.expect("get_post must succeed");
    assert_eq!(updated.title, "smoke title updated");
    assert_eq!(updated.updated_by.as_deref(), Some(author.as_str()));

    let deleted_id = client.delete_post(id).await.expect("delete_post must succeed");
    assert_eq!(deleted_id, id);

    let after_delete = client.get_post(id).await;
    assert!(matches!(after_delete, Err(BoardClientError::NotFound)));
}
