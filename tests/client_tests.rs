//! Integration tests for the PortalClient using mockito for HTTP mocking.

use portal_mcp_server::models::{
    ApplicationFilters, ApplicationStatus, AuthTokens, CreateApplicationRequest, LoginRequest,
    Priority, Role, ServiceType,
};
use portal_mcp_server::{PortalApiError, PortalClient, SessionStore};
use mockito::{Matcher, Server};
use std::sync::Arc;

fn session_at(name: &str) -> Arc<SessionStore> {
    let path = std::env::temp_dir().join(format!(
        "portal-client-{}-{}.json",
        name,
        std::process::id()
    ));
    let store = SessionStore::new(path);
    let _ = store.clear();
    Arc::new(store)
}

fn signed_in_session(name: &str) -> Arc<SessionStore> {
    let store = session_at(name);
    store
        .store(&AuthTokens {
            access_token: "token-123".to_string(),
            refresh_token: "refresh-123".to_string(),
        })
        .unwrap();
    store
}

#[test]
fn test_login_decodes_auth_payload() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Json(serde_json::json!({
            "email": "ivan@example.com",
            "password": "secret1"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "success": true,
            "message": "Login successful",
            "data": {
                "user": {
                    "id": "u1",
                    "email": "ivan@example.com",
                    "full_name": "Иван Петров",
                    "phone": "79991234567",
                    "role": "client",
                    "is_email_verified": true
                },
                "tokens": {"accessToken": "a1", "refreshToken": "r1"}
            }
        }"#,
        )
        .create();

    let client = PortalClient::with_base_url(server.url(), session_at("login"));
    let payload = client
        .login(&LoginRequest {
            email: "ivan@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .unwrap();

    mock.assert();
    assert_eq!(payload.user.id, "u1");
    assert_eq!(payload.user.role, Role::Client);
    assert_eq!(payload.user.phone.as_deref(), Some("79991234567"));
    assert_eq!(payload.tokens.access_token, "a1");
    assert_eq!(payload.tokens.refresh_token, "r1");
}

#[test]
fn test_bearer_header_sent_when_signed_in() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/auth/profile")
        .match_header("authorization", "Bearer token-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success": true, "data": {"user": {"id": "u1", "email": "a@b.ru", "full_name": "A", "role": "manager"}}}"#,
        )
        .create();

    let client = PortalClient::with_base_url(server.url(), signed_in_session("bearer"));
    let user = client.get_profile().unwrap();

    mock.assert();
    assert_eq!(user.role, Role::Manager);
    assert_eq!(client.metrics().http_requests_total(), 1);
}

#[test]
fn test_no_authorization_header_without_session() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/auth/forgot-password")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "message": "Email sent"}"#)
        .create();

    let client = PortalClient::with_base_url(server.url(), session_at("anonymous"));
    client.forgot_password("ivan@example.com").unwrap();

    mock.assert();
}

#[test]
fn test_get_applications_with_filters() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/applications")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("status".into(), "submitted".into()),
            Matcher::UrlEncoded("contact_phone".into(), "79991234567".into()),
            Matcher::UrlEncoded("search".into(), "лендинг".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "success": true,
            "data": {
                "applications": [{
                    "id": "a1",
                    "title": "Лендинг для кофейни",
                    "service_type": "landing_page",
                    "status": "submitted",
                    "statusDisplay": "Отправлена",
                    "priority": "medium",
                    "contact_full_name": "Иван",
                    "contact_email": "ivan@example.com",
                    "contact_phone": "79991234567"
                }]
            }
        }"#,
        )
        .create();

    let client = PortalClient::with_base_url(server.url(), signed_in_session("list"));
    let filters = ApplicationFilters {
        status: Some(ApplicationStatus::Submitted),
        contact_phone: Some("+7 (999) 123-45-67".to_string()),
        search: Some("лендинг".to_string()),
        ..Default::default()
    };
    let applications = client.get_applications(&filters).unwrap();

    mock.assert();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].service_type, Some(ServiceType::LandingPage));
    assert_eq!(applications[0].priority, Some(Priority::Normal));
    assert_eq!(applications[0].status_label(), "Отправлена");
    assert_eq!(client.metrics().applications_fetched_total(), 1);
}

#[test]
fn test_create_application_sends_canonical_phone() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/applications")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "title": "Интернет-магазин",
            "service_type": "ecommerce",
            "contact_phone": "79991234567"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success": true, "data": {"application": {"id": "a2", "title": "Интернет-магазин", "status": "draft"}}}"#,
        )
        .create();

    let client = PortalClient::with_base_url(server.url(), signed_in_session("create"));
    let request = CreateApplicationRequest {
        title: "Интернет-магазин".to_string(),
        service_type: Some(ServiceType::Ecommerce),
        contact_full_name: "Иван".to_string(),
        contact_email: "ivan@example.com".to_string(),
        contact_phone: "79991234567".to_string(),
        ..Default::default()
    };
    let created = client.create_application(&request).unwrap();

    mock.assert();
    assert_eq!(created.id, "a2");
    assert_eq!(created.status, ApplicationStatus::Draft);
}

#[test]
fn test_unauthorized_maps_to_unauthorized() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/auth/profile")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "message": "Token expired"}"#)
        .create();

    let client = PortalClient::with_base_url(server.url(), signed_in_session("expired"));
    let result = client.get_profile();

    mock.assert();
    assert!(matches!(result, Err(PortalApiError::Unauthorized)));
    assert_eq!(client.metrics().http_errors_total(), 1);
}

#[test]
fn test_forbidden_and_not_found_carry_message() {
    let mut server = Server::new();

    let forbidden = server
        .mock("GET", "/admin/users")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "message": "Admin access required"}"#)
        .create();
    let missing = server
        .mock("GET", "/applications/nope")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "message": "Application not found"}"#)
        .create();

    let client = PortalClient::with_base_url(server.url(), signed_in_session("denied"));

    match client.admin_get_users(None) {
        Err(PortalApiError::Forbidden(message)) => assert_eq!(message, "Admin access required"),
        other => panic!("Expected Forbidden, got {:?}", other),
    }
    match client.get_application("nope") {
        Err(PortalApiError::NotFound(message)) => assert_eq!(message, "Application not found"),
        other => panic!("Expected NotFound, got {:?}", other),
    }

    forbidden.assert();
    missing.assert();
}

#[test]
fn test_validation_errors_from_error_body() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/auth/register")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "success": false,
            "message": "Validation failed",
            "errors": [
                {"field": "email", "message": "Invalid email format"},
                "Phone already exists"
            ]
        }"#,
        )
        .create();

    let client = PortalClient::with_base_url(server.url(), session_at("register"));
    let request = portal_mcp_server::models::RegisterRequest {
        full_name: "Иван".to_string(),
        email: "bad".to_string(),
        password: "secret1".to_string(),
        phone: "79991234567".to_string(),
        company_name: None,
    };

    match client.register(&request) {
        Err(PortalApiError::Validation(errors)) => {
            assert_eq!(errors, vec!["Invalid email format", "Phone already exists"]);
        }
        other => panic!("Expected Validation, got {:?}", other),
    }
    mock.assert();
}

#[test]
fn test_rejected_envelope_with_success_status() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "message": "Invalid credentials"}"#)
        .create();

    let client = PortalClient::with_base_url(server.url(), session_at("rejected"));
    let result = client.login(&LoginRequest {
        email: "ivan@example.com".to_string(),
        password: "wrong".to_string(),
    });

    mock.assert();
    match result {
        Err(PortalApiError::Rejected(message)) => assert_eq!(message, "Invalid credentials"),
        other => panic!("Expected Rejected, got {:?}", other),
    }
}

#[test]
fn test_server_error_maps_to_api_error() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/admin/stats/dashboard")
        .with_status(500)
        .with_body("Internal Server Error")
        .create();

    let client = PortalClient::with_base_url(server.url(), signed_in_session("crash"));
    let result = client.admin_dashboard_stats();

    mock.assert();
    match result {
        Err(PortalApiError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[test]
fn test_admin_application_accepts_wrapped_and_bare_payloads() {
    let mut server = Server::new();

    let wrapped = server
        .mock("GET", "/admin/applications/a1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success": true, "data": {"application": {"id": "a1", "title": "Wrapped", "status": "in_review"}}}"#,
        )
        .create();
    let bare = server
        .mock("GET", "/admin/applications/a2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success": true, "data": {"id": "a2", "title": "Bare", "status": "approved"}}"#,
        )
        .create();

    let client = PortalClient::with_base_url(server.url(), signed_in_session("details"));

    let first = client.admin_get_application("a1").unwrap();
    assert_eq!(first.title, "Wrapped");
    assert_eq!(first.status, ApplicationStatus::InReview);

    let second = client.admin_get_application("a2").unwrap();
    assert_eq!(second.title, "Bare");
    assert_eq!(second.status, ApplicationStatus::Approved);

    wrapped.assert();
    bare.assert();
}

#[test]
fn test_admin_actions_send_expected_bodies() {
    let mut server = Server::new();

    let status = server
        .mock("PUT", "/admin/applications/a1/status")
        .match_body(Matcher::Json(serde_json::json!({"status": "in_progress"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "message": "Status updated"}"#)
        .create();
    let assign = server
        .mock("PUT", "/admin/applications/a1/assign")
        .match_body(Matcher::Json(serde_json::json!({"managerId": "m7"})))
        .with_status(200)
        .with_body("")
        .create();
    let role = server
        .mock("PUT", "/admin/users/u3/role")
        .match_body(Matcher::Json(serde_json::json!({"role": "manager"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true}"#)
        .create();

    let client = PortalClient::with_base_url(server.url(), signed_in_session("admin"));
    client
        .admin_update_status("a1", ApplicationStatus::InProgress)
        .unwrap();
    client.admin_assign_manager("a1", "m7").unwrap();
    client.admin_update_user_role("u3", Role::Manager).unwrap();

    status.assert();
    assign.assert();
    role.assert();
}

#[test]
fn test_ids_are_escaped_in_paths() {
    let mut server = Server::new();

    let delete = server
        .mock("DELETE", "/applications/a1%2Fnotes%3Fx%3D1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true}"#)
        .create();
    let pin = server
        .mock("POST", "/notes/n%201%23top/pin")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": {"note": {"id": "n 1#top", "is_pinned": true}}}"#)
        .create();

    let client = PortalClient::with_base_url(server.url(), signed_in_session("escape"));
    client.delete_application("a1/notes?x=1").unwrap();
    let note = client.toggle_note_pin("n 1#top").unwrap();
    assert!(note.is_pinned);

    delete.assert();
    pin.assert();
}

#[test]
fn test_admin_users_filtered_by_role() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/admin/users")
        .match_query(Matcher::UrlEncoded("role".into(), "admin".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success": true, "data": {"users": [{"id": "u1", "email": "root@studio.ru", "full_name": "Root", "role": "admin"}]}}"#,
        )
        .create();

    let client = PortalClient::with_base_url(server.url(), signed_in_session("users"));
    let users = client.admin_get_users(Some(Role::Admin)).unwrap();

    mock.assert();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, Role::Admin);
    assert_eq!(client.metrics().users_fetched_total(), 1);
}

#[test]
fn test_notifications_and_unread_count() {
    let mut server = Server::new();

    let list = server
        .mock("GET", "/notifications")
        .match_query(Matcher::UrlEncoded("unread_only".into(), "true".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success": true, "data": {"notifications": [{"id": "n1", "message": "Статус изменен", "is_read": false}]}}"#,
        )
        .create();
    let count = server
        .mock("GET", "/notifications/unread-count")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": {"unreadCount": 3}}"#)
        .create();
    let mark_all = server
        .mock("PATCH", "/notifications/mark-all-read")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true}"#)
        .create();

    let client = PortalClient::with_base_url(server.url(), signed_in_session("notifications"));

    let notifications = client.get_notifications(true).unwrap();
    assert_eq!(notifications.len(), 1);
    assert!(!notifications[0].is_read);
    assert_eq!(client.get_unread_count().unwrap(), 3);
    client.mark_all_notifications_read().unwrap();

    list.assert();
    count.assert();
    mark_all.assert();
}

#[test]
fn test_connection_failure_maps_to_http_error() {
    let client = PortalClient::with_base_url(
        "http://127.0.0.1:1".to_string(),
        session_at("offline"),
    );
    let result = client.get_profile();
    assert!(matches!(
        result,
        Err(PortalApiError::HttpError(_)) | Err(PortalApiError::Timeout)
    ));
}
