//! End-to-end tests over the full middleware stack with an in-memory database

use axum::body::Body;
use chrono::{Duration, SecondsFormat, Utc};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use hr_server::{App, Config, ServerState, build_app};
use serde_json::{Value, json};
use tower::ServiceExt;

const BASE: &str = "http://testserver/api/v1";

async fn app() -> App {
    let state = ServerState::initialize(&Config::in_memory()).await.unwrap();
    build_app(state)
}

async fn send(app: &App, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "testserver");
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_employee(app: &App, name: &str, email: &str, position: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/employees/",
        Some(json!({"name": name, "email": email, "position": position})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

fn at(offset: Duration) -> String {
    (Utc::now() + offset).to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[tokio::test]
async fn test_employee_create_returns_read_shape() {
    let app = app().await;
    let body = create_employee(&app, "John Doe", "johndoe@testmail.com", "employee").await;
    let id = body["id"].as_i64().unwrap();
    assert_eq!(
        body,
        json!({
            "url": format!("{BASE}/employees/{id}/"),
            "id": id,
            "name": "John Doe",
            "email": "johndoe@testmail.com",
            "position": "employee",
            "is_manager": false,
            "department": null
        })
    );

    let (status, fetched) = send(&app, "GET", &format!("/api/v1/employees/{id}/"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_employee_email_filter() {
    let app = app().await;
    create_employee(&app, "Bob One", "bob@example.com", "employee").await;
    create_employee(&app, "Bob Two", "BOBBY@example.com", "employee").await;
    create_employee(&app, "Alice", "alice@example.com", "manager").await;

    let (status, body) = send(&app, "GET", "/api/v1/employees/?email=bob", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/api/v1/employees/?name=alice", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["is_manager"], json!(true));

    let (_, body) = send(&app, "GET", "/api/v1/employees/?name=two&email=alice", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_employee_validation_errors() {
    let app = app().await;
    create_employee(&app, "Bob", "bob@example.com", "employee").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/employees/",
        Some(json!({"name": "Bob 2", "email": "bob@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"email": ["employee with this email already exists."]}));

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/employees/",
        Some(json!({"email": "", "position": "ceo"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], json!(["This field is required."]));
    assert_eq!(body["email"], json!(["This field may not be blank."]));
    assert_eq!(body["position"], json!(["\"ceo\" is not a valid choice."]));

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/employees/",
        Some(json!({"name": "X", "email": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["email"], json!(["Enter a valid email address."]));
}

#[tokio::test]
async fn test_employee_patch_and_put() {
    let app = app().await;
    let created = create_employee(&app, "Bob", "bob@example.com", "employee").await;
    let uri = format!("/api/v1/employees/{}/", created["id"]);

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({"position": "manager"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_manager"], json!(true));
    assert_eq!(body["name"], json!("Bob"));

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"name": "Robert"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"email": ["This field is required."]}));

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({"name": "Robert", "email": "robert@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], json!("robert@example.com"));
    assert_eq!(body["position"], json!("manager"));
}

#[tokio::test]
async fn test_not_found_and_malformed_requests() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/api/v1/employees/999/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "No Employee matches the given query."}));

    let (status, _) = send(&app, "GET", "/api/v1/departments/abc/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/v1/nothing-here/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Not found."}));

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/employees/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["detail"].as_str().unwrap().starts_with("JSON parse error - "));

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/employees/")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"name": "x"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({"detail": "Unsupported media type in request. Expected 'application/json'."})
    );

    let (status, body) = send(&app, "POST", "/api/v1/employees/", Some(json!([1]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"non_field_errors": ["Invalid data. Expected a dictionary, but got list."]})
    );
}

#[tokio::test]
async fn test_trailing_slash_is_optional() {
    let app = app().await;
    let (status, _) = send(&app, "GET", "/api/v1/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/api/v1/employees/", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], json!("ok"));
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let app = app().await;
    let request = Request::builder()
        .uri("/api/v1/employees/")
        .header(header::HOST, "testserver")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let id = response.headers().get("x-request-id").expect("x-request-id header");
    assert!(!id.to_str().unwrap().is_empty());

    let request = Request::builder()
        .uri("/api/v1/employees/")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn test_employee_name_filter_folds_non_ascii() {
    let app = app().await;
    create_employee(&app, "Ádám Kovács", "adam@example.com", "employee").await;
    create_employee(&app, "Eve", "eve@example.com", "employee").await;

    for needle in ["%C3%A1d%C3%A1m", "%C3%81D%C3%81M"] {
        let (status, body) =
            send(&app, "GET", &format!("/api/v1/employees/?name={needle}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let found = body.as_array().unwrap();
        assert_eq!(found.len(), 1, "{needle}");
        assert_eq!(found[0]["name"], json!("Ádám Kovács"));
    }
}

#[tokio::test]
async fn test_demoting_manager_keeps_department_reference() {
    let app = app().await;
    let boss = create_employee(&app, "Jane", "jane@example.com", "manager").await;
    let (_, dept) = send(
        &app,
        "POST",
        "/api/v1/departments/",
        Some(json!({"name": "Ops", "manager": boss["url"]})),
    )
    .await;

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/v1/employees/{}/", boss["id"]),
        Some(json!({"position": "employee"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, reloaded) = send(&app, "GET", &format!("/api/v1/departments/{}/", dept["id"]), None).await;
    assert_eq!(reloaded["manager"], boss["url"]);
}

#[tokio::test]
async fn test_department_manager_must_be_manager() {
    let app = app().await;
    let staff = create_employee(&app, "John Doe", "johndoe@testmail.com", "employee").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/departments/",
        Some(json!({"name": "HR", "manager": staff["url"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"manager": ["The chosen Employee is not Manager."]}));

    let (_, list) = send(&app, "GET", "/api/v1/departments/", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_department_manager_enrollment() {
    let app = app().await;
    let boss = create_employee(&app, "Jane Smith", "janesmith@testmail.com", "manager").await;

    let (status, dept) = send(
        &app,
        "POST",
        "/api/v1/departments/",
        Some(json!({"name": "IT Department", "manager": boss["url"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{dept}");
    let dept_id = dept["id"].as_i64().unwrap();
    assert_eq!(dept["manager"], boss["url"]);
    assert_eq!(dept["description"], json!(""));

    let (_, reloaded) = send(&app, "GET", &format!("/api/v1/employees/{}/", boss["id"]), None).await;
    assert_eq!(reloaded["department"]["id"], json!(dept_id));
    assert_eq!(reloaded["department"]["name"], json!("IT Department"));

    let (status, members) = send(
        &app,
        "GET",
        &format!("/api/v1/departments/{dept_id}/employees/"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(members.as_array().unwrap().len(), 1);
    assert_eq!(members[0]["id"], boss["id"]);

    let (status, _) = send(&app, "GET", "/api/v1/departments/999/employees/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/departments/",
        Some(json!({"name": "IT Department", "manager": boss["url"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], json!(["department with this name already exists."]));
    assert_eq!(body["manager"], json!(["department with this manager already exists."]));
}

#[tokio::test]
async fn test_delete_manager_and_department() {
    let app = app().await;
    let boss = create_employee(&app, "Jane", "jane@example.com", "manager").await;
    let (_, dept) = send(
        &app,
        "POST",
        "/api/v1/departments/",
        Some(json!({"name": "IT", "manager": boss["url"]})),
    )
    .await;
    let dept_uri = format!("/api/v1/departments/{}/", dept["id"]);

    let (status, body) = send(&app, "DELETE", &format!("/api/v1/employees/{}/", boss["id"]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, dept) = send(&app, "GET", &dept_uri, None).await;
    assert_eq!(dept["manager"], Value::Null);

    let member = create_employee(&app, "Steve", "steve@example.com", "employee").await;
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/v1/employees/{}/", member["id"]),
        Some(json!({"department": dept["url"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &dept_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, member) = send(&app, "GET", &format!("/api/v1/employees/{}/", member["id"]), None).await;
    assert_eq!(member["department"], Value::Null);
}

#[tokio::test]
async fn test_appointment_create_and_update() {
    let app = app().await;
    let owner = create_employee(&app, "John Doe", "johndoe@testmail.com", "employee").await;
    let guest = create_employee(&app, "Guest", "guest@testmail.com", "employee").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/appointments/",
        Some(json!({
            "start_datetime": "2025-06-07T10:00:00Z",
            "end_datetime": "2025-06-07T11:00:00Z",
            "title": "API Test",
            "employee": owner["url"],
            "participants": [guest["url"]],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["url"], json!(format!("{BASE}/appointments/{id}/")));
    assert_eq!(body["title"], json!("API Test"));
    assert_eq!(body["description"], json!(""));
    assert_eq!(body["start_datetime"], json!("2025-06-07T10:00:00Z"));
    assert_eq!(body["employee"], owner);
    assert_eq!(body["participants"], json!([guest]));
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());

    let uri = format!("/api/v1/appointments/{id}/");
    let (status, body) = send(&app, "PATCH", &uri, Some(json!({"title": "Updated Title"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], json!("Updated Title"));
    assert_eq!(body["participants"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({"participants": ["/api/v1/employees/999/"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"participants": ["Invalid hyperlink - Object does not exist."]}));
}

#[tokio::test]
async fn test_appointment_end_must_follow_start() {
    let app = app().await;
    let owner = create_employee(&app, "John Doe", "johndoe@testmail.com", "employee").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/appointments/",
        Some(json!({
            "start_datetime": "2025-06-07T11:00:00Z",
            "end_datetime": "2025-06-07T11:00:00Z",
            "title": "Broken",
            "employee": owner["url"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"non_field_errors": ["Constraint \"end_after_start\" is violated."]})
    );

    let (_, list) = send(&app, "GET", "/api/v1/appointments/", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_appointment_closest() {
    let app = app().await;
    let owner = create_employee(&app, "John Doe", "johndoe@testmail.com", "employee").await;

    let (status, body) = send(&app, "GET", "/api/v1/appointments/closest/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "No future appointments found."}));

    for (title, start, end) in [
        ("Past Appointment", Duration::days(-2), Duration::days(-2) + Duration::hours(1)),
        ("Future Appointment", Duration::hours(1), Duration::hours(2)),
        ("Later Appointment", Duration::days(3), Duration::days(3) + Duration::hours(1)),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/appointments/",
            Some(json!({
                "start_datetime": at(start),
                "end_datetime": at(end),
                "title": title,
                "employee": owner["url"],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/v1/appointments/closest/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], json!("Future Appointment"));
}

#[tokio::test]
async fn test_appointment_date_filter() {
    let app = app().await;
    let owner = create_employee(&app, "John Doe", "johndoe@testmail.com", "employee").await;

    for (title, start, end) in [
        ("Morning", "2025-06-07T09:00:00Z", "2025-06-07T10:00:00Z"),
        ("Overnight", "2025-06-06T22:00:00Z", "2025-06-07T01:00:00Z"),
        ("Next day", "2025-06-08T09:00:00Z", "2025-06-08T10:00:00Z"),
    ] {
        send(
            &app,
            "POST",
            "/api/v1/appointments/",
            Some(json!({
                "start_datetime": start,
                "end_datetime": end,
                "title": title,
                "employee": owner["url"],
            })),
        )
        .await;
    }

    let (status, body) = send(&app, "GET", "/api/v1/appointments/?date=2025-06-07", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Overnight", "Morning"]);

    let (_, body) = send(&app, "GET", "/api/v1/appointments/", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = send(&app, "GET", "/api/v1/appointments/?date=june", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"date": ["Enter a valid date."]}));
}

#[tokio::test]
async fn test_owner_delete_cascades_to_appointments() {
    let app = app().await;
    let owner = create_employee(&app, "Owner", "owner@testmail.com", "employee").await;
    let (_, appointment) = send(
        &app,
        "POST",
        "/api/v1/appointments/",
        Some(json!({
            "start_datetime": "2025-06-07T09:00:00Z",
            "end_datetime": "2025-06-07T10:00:00Z",
            "title": "Owned",
            "employee": owner["url"],
        })),
    )
    .await;

    send(&app, "DELETE", &format!("/api/v1/employees/{}/", owner["id"]), None).await;

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/v1/appointments/{}/", appointment["id"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
