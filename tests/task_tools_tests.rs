//! Task tool tests: add, list, update, toggle, delete, select_task, stickers
mod common;

use common::*;
use task_calendar_mcp::tasks::local_date_today;

#[tokio::test]
async fn test_add_with_defaults_then_list_today() {
    let server = get_test_handler(None);

    let result = server
        .handle_add("Buy milk".to_string(), None, None, None, None)
        .await
        .unwrap();
    assert!(result.contains("Task created with ID: #1"));
    assert!(result.contains("priority: none, location: any"));

    let list = server.handle_list(None, None, None).await.unwrap();
    assert!(list.contains("Tasks for today"));
    assert!(list.contains("Buy milk"));
}

#[tokio::test]
async fn test_add_rejects_blank_text() {
    let server = get_test_handler(None);
    assert!(server
        .handle_add("   ".to_string(), None, None, None, None)
        .await
        .is_err());
    let list = server.handle_list(None, None, Some(true)).await.unwrap();
    assert_eq!(list, "All tasks: no tasks");
}

#[tokio::test]
async fn test_add_rejects_invalid_arguments() {
    let server = get_test_handler(None);
    let bad_priority = server
        .handle_add("x".to_string(), Some("urgent".to_string()), None, None, None)
        .await;
    assert!(bad_priority.is_err());

    let bad_sticker = server
        .handle_add("x".to_string(), None, None, None, Some("unicorn".to_string()))
        .await;
    assert!(bad_sticker.is_err());

    let bad_date = server
        .handle_add("x".to_string(), None, Some("tomorrow".to_string()), None, None)
        .await;
    assert!(bad_date.is_err());
}

#[tokio::test]
async fn test_ids_are_never_reused() {
    let server = get_test_handler(None);
    let first = server
        .handle_add("one".to_string(), None, None, None, None)
        .await
        .unwrap();
    let first_id = extract_id_from_response(&first);
    server.handle_delete(first_id.clone()).await.unwrap();

    let second = server
        .handle_add("two".to_string(), None, None, None, None)
        .await
        .unwrap();
    assert_eq!(first_id, "#1");
    assert_eq!(extract_id_from_response(&second), "#2");
}

#[tokio::test]
async fn test_list_selects_date_and_hides_completed() {
    let server = get_test_handler(None);
    let done = server
        .handle_add(
            "File taxes".to_string(),
            Some("high".to_string()),
            Some("2026-11-02 09:00".to_string()),
            None,
            None,
        )
        .await
        .unwrap();
    server
        .handle_add(
            "Return books".to_string(),
            None,
            Some("2026-11-02".to_string()),
            Some("outdoor".to_string()),
            None,
        )
        .await
        .unwrap();
    server
        .handle_toggle(extract_id_from_response(&done))
        .await
        .unwrap();

    let list = server
        .handle_list(Some("2026-11-02".to_string()), None, None)
        .await
        .unwrap();
    assert!(list.contains("Tasks for 2026-11-02 (2 task(s))"));

    let hidden = server.handle_list(None, Some(false), None).await.unwrap();
    assert!(hidden.contains("Return books"));
    assert!(!hidden.contains("File taxes"));
}

#[tokio::test]
async fn test_update_partial_fields() {
    let server = get_test_handler(None);
    server
        .handle_add(
            "Draft".to_string(),
            Some("low".to_string()),
            Some("2026-10-20 15:45".to_string()),
            None,
            Some("note".to_string()),
        )
        .await
        .unwrap();

    // date only keeps the time of day
    let result = server
        .handle_update(
            "#1".to_string(),
            Some("Final draft".to_string()),
            None,
            Some("2026-10-22".to_string()),
            None,
            None,
        )
        .await
        .unwrap();
    assert!(result.contains("Final draft"));
    assert!(result.contains("priority: low"));
    assert!(result.contains("2026-10-22 15:45"));
    assert!(result.contains("📝"));

    let cleared = server
        .handle_update(
            "1".to_string(),
            Some("  ".to_string()),
            None,
            None,
            None,
            Some(String::new()),
        )
        .await
        .unwrap();
    assert!(cleared.contains("Final draft"));
    assert!(!cleared.contains("📝"));
}

#[tokio::test]
async fn test_update_unknown_task_fails() {
    let server = get_test_handler(None);
    let result = server
        .handle_update("#9".to_string(), Some("x".to_string()), None, None, None, None)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_toggle_twice_restores() {
    let server = get_test_handler(None);
    server
        .handle_add("Water plants".to_string(), None, None, None, None)
        .await
        .unwrap();

    let first = server.handle_toggle("#1".to_string()).await.unwrap();
    let second = server.handle_toggle("#1".to_string()).await.unwrap();
    assert_eq!(first, "Task #1 marked as completed");
    assert_eq!(second, "Task #1 marked as open");
}

#[tokio::test]
async fn test_operations_after_delete_fail_without_side_effects() {
    let server = get_test_handler(None);
    server
        .handle_add("Temporary".to_string(), None, None, None, None)
        .await
        .unwrap();
    server.handle_delete("#1".to_string()).await.unwrap();

    assert!(server.handle_toggle("#1".to_string()).await.is_err());
    assert!(server.handle_delete("#1".to_string()).await.is_err());
    assert!(server
        .handle_add_sticker("#1".to_string(), "idea".to_string())
        .await
        .is_err());
    let list = server.handle_list(None, None, Some(true)).await.unwrap();
    assert_eq!(list, "All tasks: no tasks");
}

#[tokio::test]
async fn test_select_task_moves_selected_date() {
    let server = get_test_handler(None);
    server
        .handle_add(
            "Dentist".to_string(),
            Some("medium".to_string()),
            Some("2026-12-03 10:30".to_string()),
            None,
            None,
        )
        .await
        .unwrap();

    let detail = server.handle_select_task("#1".to_string()).await.unwrap();
    assert!(detail.contains("Task #1: Dentist"));
    assert!(detail.contains("Medium Priority"));

    let list = server.handle_list(None, None, None).await.unwrap();
    assert!(list.contains("Tasks for 2026-12-03"));

    let calendar = server.handle_calendar(None, None, None).await.unwrap();
    assert!(calendar.starts_with("December 2026"));
    assert!(calendar.contains("[3*]"));
}

#[tokio::test]
async fn test_sticker_add_and_remove() {
    let server = get_test_handler(None);
    server
        .handle_add("Party".to_string(), None, None, None, None)
        .await
        .unwrap();

    let added = server
        .handle_add_sticker("#1".to_string(), "party".to_string())
        .await
        .unwrap();
    assert!(added.contains("now 1 sticker(s)"));
    server
        .handle_add_sticker("#1".to_string(), "coffee".to_string())
        .await
        .unwrap();

    let out_of_range = server
        .handle_remove_sticker("#1".to_string(), 5)
        .await
        .unwrap();
    assert!(out_of_range.contains("nothing removed"));

    let removed = server
        .handle_remove_sticker("#1".to_string(), 0)
        .await
        .unwrap();
    assert!(removed.contains("🎉"));

    let detail = server.handle_select_task("#1".to_string()).await.unwrap();
    assert!(detail.contains("0. ☕ Coffee (coffee)"));
}

#[tokio::test]
async fn test_sticker_catalog_follows_theme() {
    let server = get_test_handler(None);

    let default = server.handle_stickers(None).await.unwrap();
    assert!(default.contains("Ocean (ocean)"));
    assert!(!default.contains("Forest (forest)"));

    server
        .handle_theme(Some("forest".to_string()))
        .await
        .unwrap();
    let forest = server.handle_stickers(None).await.unwrap();
    assert!(forest.contains("Forest (forest)"));

    let all = server.handle_stickers(Some("all".to_string())).await.unwrap();
    assert!(all.contains("Aurora (aurora)"));
    assert!(server
        .handle_stickers(Some("weather".to_string()))
        .await
        .is_err());
}

#[tokio::test]
async fn test_theme_tool() {
    let server = get_test_handler(None);
    let current = server.handle_theme(None).await.unwrap();
    assert!(current.starts_with("Current theme: 🌊 Ocean"));

    let switched = server
        .handle_theme(Some("Moonlight".to_string()))
        .await
        .unwrap();
    assert!(switched.starts_with("Theme set to 🌙 Moonlight"));
    assert!(switched.contains("from-indigo-100 to-purple-200 bg-indigo-600"));
    assert!(server.handle_theme(Some("neon".to_string())).await.is_err());
}

#[tokio::test]
async fn test_notifications_tool() {
    let server = get_test_handler(None);
    let today = local_date_today();
    let far = today + chrono::Duration::days(30);
    server
        .handle_add(
            "Far but urgent".to_string(),
            Some("high".to_string()),
            Some(far.to_string()),
            None,
            None,
        )
        .await
        .unwrap();
    server
        .handle_add(
            "Far and calm".to_string(),
            Some("low".to_string()),
            Some(far.to_string()),
            None,
            None,
        )
        .await
        .unwrap();

    let text = server.handle_notifications().await.unwrap();
    assert!(text.contains("Far but urgent"));
    assert!(!text.contains("Far and calm"));
}
