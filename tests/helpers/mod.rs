#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use taskboard::db::Db;
use taskboard::models::NewTask;
use taskboard::routes::create_router;
use taskboard::state::AppState;
use taskboard::templates::Templates;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub db: Db,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Db::connect_in_memory().await.unwrap();
        let templates = Templates::new().unwrap();
        let router = create_router(AppState::new(db.clone(), templates));
        Self { router, db }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn get_page(&self, uri: &str) -> (StatusCode, String) {
        let response = self.get(uri).await;
        let status = response.status();
        (status, body_text(response).await)
    }

    pub async fn insert_task(&self, title: &str, due: DateTime<Utc>) -> i64 {
        self.db
            .create_task(&NewTask {
                title: title.to_string(),
                task_type: "work".to_string(),
                due,
            })
            .await
            .unwrap()
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

/// `datetime-local` form value `days` from now.
pub fn form_due(days: i64) -> String {
    (Utc::now() + Duration::days(days))
        .format("%Y-%m-%dT%H:%M")
        .to_string()
}

pub fn checklist_item_count(html: &str) -> usize {
    html.matches("data-item=").count()
}
