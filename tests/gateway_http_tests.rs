//! Wire-level tests of the REST gateway against an in-process stub.

mod stub;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use stub::http::{Route, StubServer};
use vkm_catalog::adapter::outbound::http::HttpCatalogGateway;
use vkm_catalog::adapter::outbound::session::SessionIdentity;
use vkm_catalog::domain::{FilterSpec, ItemId, ItemInput, SubjectId, UserPatch};
use vkm_catalog::error::{GatewayError, UNREACHABLE_MESSAGE};
use vkm_catalog::port::{CatalogAdmin, CatalogGateway, IdentityContext};

fn gateway(server: &StubServer, session: Arc<SessionIdentity>) -> HttpCatalogGateway {
    let identity: Arc<dyn IdentityContext> = session;
    HttpCatalogGateway::new(server.base_url(), Duration::from_secs(5), identity).unwrap()
}

fn anonymous(server: &StubServer) -> HttpCatalogGateway {
    gateway(server, Arc::new(SessionIdentity::anonymous()))
}

fn vkm(id: &str, name: &str) -> serde_json::Value {
    json!({ "_id": id, "name": name, "studycredit": 30, "location": "Breda", "level": "NLQF6" })
}

#[tokio::test]
async fn filter_sends_only_present_fields() {
    let server = StubServer::start(vec![Route::get("/vkm/filter", json!([vkm("a", "Robotics")]))]).await;
    let gw = anonymous(&server);

    let spec = FilterSpec::clear()
        .with_study_credit(Some(30))
        .with_location(Some("Den Bosch"));
    let items = gw.list_by_filter(&spec).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Robotics");
    let requests = server.requests();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].query(), Some("studyCredit=30&location=Den+Bosch"));
}

#[tokio::test]
async fn unconstrained_filter_has_no_query_string() {
    let server = StubServer::start(vec![Route::get("/vkm/filter", json!([]))]).await;
    let gw = anonymous(&server);

    let items = gw.list_by_filter(&FilterSpec::clear()).await.unwrap();

    assert!(items.is_empty());
    assert_eq!(server.requests()[0].target, "/vkm/filter");
}

#[tokio::test]
async fn bearer_header_follows_session() {
    let server = StubServer::start(vec![Route::get("/vkm", json!([]))]).await;
    let session = Arc::new(SessionIdentity::anonymous());
    let gw = gateway(&server, Arc::clone(&session));

    gw.list_all().await.unwrap();
    session.login(SubjectId::new("u1"), "jwt-1");
    gw.list_all().await.unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].authorization, None);
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer jwt-1"));
}

#[tokio::test]
async fn service_failure_carries_status_and_body() {
    let server = StubServer::start(vec![Route::new(
        "GET",
        "/vkm/filter",
        500,
        r#"{"message":"db down"}"#,
    )])
    .await;
    let gw = anonymous(&server);

    let err = gw.list_by_filter(&FilterSpec::clear()).await.unwrap_err();

    assert_eq!(
        err,
        GatewayError::ServiceFailure {
            status: 500,
            body: r#"{"message":"db down"}"#.into(),
        }
    );
    assert_eq!(err.user_message(), "API request failed: Internal Server Error");
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gw = HttpCatalogGateway::new(
        &format!("http://{addr}"),
        Duration::from_secs(2),
        Arc::new(SessionIdentity::anonymous()),
    )
    .unwrap();
    let err = gw.list_all().await.unwrap_err();

    assert!(matches!(err, GatewayError::NetworkFailure { .. }));
    assert_eq!(err.user_message(), UNREACHABLE_MESSAGE);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = StubServer::start(vec![Route::new("GET", "/vkm", 200, "{\"not\": \"a list\"}")]).await;
    let gw = anonymous(&server);

    assert!(matches!(gw.list_all().await, Err(GatewayError::Decode(_))));
}

#[tokio::test]
async fn list_by_ids_skips_missing_items() {
    let server = StubServer::start(vec![
        Route::get("/vkm/a", vkm("a", "Robotics")),
        Route::get("/vkm/c", vkm("c", "Ethics")),
    ])
    .await;
    let gw = anonymous(&server);

    let ids = [ItemId::new("a"), ItemId::new("b"), ItemId::new("c")];
    let items = gw.list_by_ids(&ids).await.unwrap();

    let mut got: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    got.sort_unstable();
    assert_eq!(got, vec!["a", "c"]);
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn list_by_ids_fails_on_server_error() {
    let server = StubServer::start(vec![
        Route::get("/vkm/a", vkm("a", "Robotics")),
        Route::new("GET", "/vkm/b", 503, ""),
    ])
    .await;
    let gw = anonymous(&server);

    let err = gw
        .list_by_ids(&[ItemId::new("a"), ItemId::new("b")])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn principal_profile_decodes_recommendations() {
    let server = StubServer::start(vec![Route::get(
        "/users/u1",
        json!({
            "_id": "u1",
            "username": "sanne",
            "email": "sanne@example.nl",
            "recommended_vkms": ["r2", "r1"],
        }),
    )])
    .await;
    let gw = anonymous(&server);

    let principal = gw
        .fetch_principal_profile(&SubjectId::new("u1"))
        .await
        .unwrap();
    assert_eq!(principal.subject_id.as_str(), "u1");
    assert_eq!(
        principal.recommended_item_ids,
        vec![ItemId::new("r2"), ItemId::new("r1")]
    );
}

#[tokio::test]
async fn missing_principal_is_not_found() {
    let server = StubServer::start(vec![]).await;
    let gw = anonymous(&server);

    let err = gw
        .fetch_principal_profile(&SubjectId::new("ghost"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::NotFound {
            resource: "user ghost".into()
        }
    );
}

#[tokio::test]
async fn create_item_posts_wire_names() {
    let server = StubServer::start(vec![Route::new(
        "POST",
        "/vkm",
        201,
        vkm("new1", "Data Science").to_string(),
    )])
    .await;
    let gw = anonymous(&server);

    let input = ItemInput {
        name: Some("Data Science".into()),
        short_description: Some("Numbers".into()),
        study_credit: Some(30),
        ..ItemInput::default()
    };
    let item = gw.create_item(&input).await.unwrap();

    assert_eq!(item.id.as_str(), "new1");
    let sent: serde_json::Value = serde_json::from_str(&server.requests()[0].body).unwrap();
    assert_eq!(
        sent,
        json!({ "name": "Data Science", "shortdescription": "Numbers", "studycredit": 30 })
    );
}

#[tokio::test]
async fn update_without_body_refetches_item() {
    let server = StubServer::start(vec![
        Route::new("PUT", "/vkm/a", 204, ""),
        Route::get("/vkm/a", vkm("a", "Renamed")),
    ])
    .await;
    let gw = anonymous(&server);

    let input = ItemInput {
        name: Some("Renamed".into()),
        ..ItemInput::default()
    };
    let item = gw.update_item(&ItemId::new("a"), &input).await.unwrap();

    assert_eq!(item.name, "Renamed");
    let methods: Vec<String> = server.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["PUT", "GET"]);
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = StubServer::start(vec![Route::new("DELETE", "/users/u9", 204, "")]).await;
    let gw = anonymous(&server);

    gw.delete_user(&SubjectId::new("u9")).await.unwrap();
    assert_eq!(server.requests()[0].method, "DELETE");
}

#[tokio::test]
async fn delete_missing_item_is_not_found() {
    let server = StubServer::start(vec![]).await;
    let gw = anonymous(&server);

    let err = gw.delete_item(&ItemId::new("zz")).await.unwrap_err();
    assert_eq!(err.to_string(), "item zz not found");
}

#[tokio::test]
async fn user_patch_skips_absent_fields() {
    let server = StubServer::start(vec![Route::new(
        "PUT",
        "/users/u1",
        200,
        json!({ "_id": "u1", "username": "sanne", "email": "s@example.nl", "group": "INF3A" })
            .to_string(),
    )])
    .await;
    let gw = anonymous(&server);

    let patch = UserPatch {
        group: Some("INF3A".into()),
        ..UserPatch::default()
    };
    let user = gw.update_user(&SubjectId::new("u1"), &patch).await.unwrap();

    assert_eq!(user.group, "INF3A");
    let sent: serde_json::Value = serde_json::from_str(&server.requests()[0].body).unwrap();
    assert_eq!(sent, json!({ "group": "INF3A" }));
}

#[tokio::test]
async fn list_users_decodes_accounts() {
    let server = StubServer::start(vec![Route::get(
        "/users",
        json!([
            { "_id": "u1", "username": "a", "email": "a@example.nl", "is_admin": true },
            { "_id": "u2", "username": "b", "email": "b@example.nl", "is_student": true },
        ]),
    )])
    .await;
    let gw = anonymous(&server);

    let users = gw.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].role_label(), "admin, staff");
    assert_eq!(users[1].role_label(), "student");
}
