mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use rstest::rstest;

use helpers::{TestApp, body_text, checklist_item_count, location};

async fn app_with_task() -> (TestApp, i64) {
    let app = TestApp::new().await;
    let task_id = app
        .insert_task("Pay rent", Utc::now() + Duration::days(1))
        .await;
    (app, task_id)
}

#[rstest]
#[tokio::test]
async fn create_toggle_and_toggle_back() {
    let (app, task_id) = app_with_task().await;

    let response = app
        .post_form(
            &format!("/task/{task_id}/checklist/create/"),
            "content=step+1",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/task/{task_id}/"));

    let (_, html) = app.get_page(&format!("/task/{task_id}/")).await;
    assert_eq!(checklist_item_count(&html), 1);
    assert!(html.contains("step 1"));
    assert!(html.contains(r#"class="unchecked""#));

    let items = app.db.checklist_for_task(task_id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert!(!items[0].checked);
    let item_id = items[0].id;
    let toggle_uri = format!("/task/{task_id}/checklist/{item_id}/update/");

    let response = app.post_form(&toggle_uri, "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/task/{task_id}/"));
    let (_, html) = app.get_page(&format!("/task/{task_id}/")).await;
    assert!(html.contains(r#"class="checked""#));

    app.post_form(&toggle_uri, "").await;
    let item = app
        .db
        .get_checklist_item(task_id, item_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!item.checked);
}

#[rstest]
#[tokio::test]
async fn owner_comes_from_the_route() {
    let (app, task_id) = app_with_task().await;
    let other_id = app.insert_task("Other", Utc::now()).await;

    let response = app
        .post_form(
            &format!("/task/{task_id}/checklist/create/"),
            &format!("content=step&task={other_id}&task_id={other_id}"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let items = app.db.checklist_for_task(task_id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].task_id, task_id);
    assert!(app.db.checklist_for_task(other_id).await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn get_on_update_only_confirms() {
    let (app, task_id) = app_with_task().await;
    let item_id = app.db.create_checklist_item(task_id, "step 1").await.unwrap();

    for _ in 0..2 {
        let (status, html) = app
            .get_page(&format!("/task/{task_id}/checklist/{item_id}/update/"))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("as done?"));
    }

    let item = app
        .db
        .get_checklist_item(task_id, item_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!item.checked);
}

#[rstest]
#[tokio::test]
async fn blank_content_is_redisplayed() {
    let (app, task_id) = app_with_task().await;

    let response = app
        .post_form(&format!("/task/{task_id}/checklist/create/"), "content=++")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("This field is required."));
    assert!(app.db.checklist_for_task(task_id).await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn create_form_names_the_task() {
    let (app, task_id) = app_with_task().await;

    let (status, html) = app
        .get_page(&format!("/task/{task_id}/checklist/create/"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Pay rent"));
    assert!(html.contains(r#"name="content""#));
}

#[rstest]
#[tokio::test]
async fn missing_task_rejects_checklist_create() {
    let app = TestApp::new().await;

    let (status, _) = app.get_page("/task/42/checklist/create/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = app
        .post_form("/task/42/checklist/create/", "content=step")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("update")]
#[case("delete")]
#[tokio::test]
async fn item_under_wrong_task_is_not_found(#[case] action: &str) {
    let (app, task_id) = app_with_task().await;
    let other_id = app.insert_task("Other", Utc::now()).await;
    let item_id = app.db.create_checklist_item(task_id, "step").await.unwrap();
    let uri = format!("/task/{other_id}/checklist/{item_id}/{action}/");

    let (status, _) = app.get_page(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = app.post_form(&uri, "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let item = app
        .db
        .get_checklist_item(task_id, item_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!item.checked);
}

#[rstest]
#[tokio::test]
async fn delete_requires_confirmation() {
    let (app, task_id) = app_with_task().await;
    let keep = app.db.create_checklist_item(task_id, "keep me").await.unwrap();
    let item_id = app.db.create_checklist_item(task_id, "drop me").await.unwrap();
    let uri = format!("/task/{task_id}/checklist/{item_id}/delete/");

    let (status, html) = app.get_page(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("drop me"));
    assert_eq!(app.db.checklist_for_task(task_id).await.unwrap().len(), 2);

    let response = app.post_form(&uri, "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/task/{task_id}/"));

    let items = app.db.checklist_for_task(task_id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, keep);
}
