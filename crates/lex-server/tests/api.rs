//! End-to-end HTTP tests against the router with an in-memory database and
//! scripted LLM providers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use lex_config::{AuthConfig, GeneralConfig};
use lex_db::service::LexService;
use lex_llm::{LlmError, LlmProvider, PetitionDrafter, Prompt};
use lex_server::{AppState, build_router};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

const DRAFT: &str = "EXCELENTÍSSIMO SENHOR PREGOEIRO\n\nA recorrente vem apresentar recurso.";

/// Always answers with the same result.
struct Fixed(fn() -> Result<String, LlmError>);

#[async_trait]
impl LlmProvider for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn complete(&self, _prompt: &Prompt) -> Result<String, LlmError> {
        (self.0)()
    }
}

async fn app_with(provider: Fixed) -> Router {
    let service = LexService::new_local(":memory:").await.unwrap();
    let drafter = PetitionDrafter::new(vec![Arc::new(provider) as Arc<dyn LlmProvider>], 2);
    let auth = AuthConfig {
        jwt_secret: "test-secret".into(),
        ..Default::default()
    };
    build_router(AppState::new(service, drafter, auth, GeneralConfig::default()))
}

async fn app() -> Router {
    app_with(Fixed(|| Ok(DRAFT.to_string()))).await
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    Reply { status, headers, body }
}

async fn signup(app: &Router, email: &str) -> String {
    let reply = send(
        app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "name": "Ana Souza", "email": email, "password": "correct horse" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["token"].as_str().unwrap().to_string()
}

fn petition_body() -> Value {
    json!({
        "process_number": "0001234-56.2024.8.26.0100",
        "kind": "administrative_appeal",
        "entity": "Prefeitura de Campinas",
        "reason": "Inabilitação indevida",
        "description": "A empresa foi inabilitada no pregão 12/2024.",
        "arguments": "Atendimento integral ao edital.",
        "request": "Reforma da decisão.",
        "city": "Campinas",
        "document_date": "2024-10-01"
    })
}

fn customer_body() -> Value {
    json!({
        "legal_name": "Construtora Alfa Ltda",
        "tax_id": "12.345.678/0001-95",
        "city": "Campinas",
        "state": "sp"
    })
}

async fn create_petition(app: &Router, token: &str) -> String {
    let mut body = petition_body();
    body["content"] = json!(DRAFT);
    let reply = send(app, Method::POST, "/api/petitions", Some(token), Some(body)).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["id"].as_str().unwrap().to_string()
}

async fn wait_for_job(app: &Router, token: &str, job_id: &str) -> Value {
    let uri = format!("/api/petitions/generate/{job_id}");
    for _ in 0..200 {
        let reply = send(app, Method::GET, &uri, Some(token), None).await;
        assert_eq!(reply.status, StatusCode::OK);
        if matches!(reply.body["status"].as_str(), Some("completed" | "failed")) {
            return reply.body;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {job_id} never finished");
}

#[tokio::test]
async fn health_is_public() {
    let app = app().await;
    let reply = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn signup_sets_cookie_and_opens_session() {
    let app = app().await;
    let reply = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "name": " Ana Souza ", "email": "Ana@Example.com", "password": "correct horse" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["user"]["email"], "ana@example.com");
    assert_eq!(reply.body["user"]["name"], "Ana Souza");
    assert!(reply.body["user"].get("password_hash").is_none());

    let cookie = reply.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("lex_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=604800"));

    let token = reply.body["token"].as_str().unwrap();
    let session = send(&app, Method::GET, "/api/auth/session", Some(token), None).await;
    assert_eq!(session.status, StatusCode::OK);
    assert_eq!(session.body["email"], "ana@example.com");

    // The cookie alone is enough.
    let pair = cookie.split(';').next().unwrap();
    let request = Request::builder()
        .uri("/api/auth/session")
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn signup_rejects_duplicates_and_weak_passwords() {
    let app = app().await;
    signup(&app, "ana@example.com").await;

    let duplicate = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "name": "Outra Ana", "email": "ANA@example.com", "password": "correct horse" })),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["error"], "E-mail já cadastrado");

    let weak = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "name": "Bia", "email": "bia@example.com", "password": "123" })),
    )
    .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);
    assert_eq!(weak.body["error"], "A senha deve ter pelo menos 8 caracteres");

    let malformed = send(&app, Method::POST, "/api/auth/signup", None, Some(json!({ "email": 1 }))).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_checks_credentials() {
    let app = app().await;
    signup(&app, "ana@example.com").await;

    let wrong = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ana@example.com", "password": "wrong password" })),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["error"], "E-mail ou senha inválidos");

    let unknown = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "correct horse" })),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);

    let ok = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": " ANA@example.com", "password": "correct horse" })),
    )
    .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert!(ok.headers.contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = app().await;
    let reply = send(&app, Method::POST, "/api/auth/logout", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    let cookie = reply.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("lex_session=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn protected_routes_require_a_valid_session() {
    let app = app().await;
    for uri in ["/api/petitions", "/api/customers", "/api/auth/session"] {
        let reply = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(reply.body["error"], "Sessão inválida ou expirada");

        let forged = send(&app, Method::GET, uri, Some("not-a-token"), None).await;
        assert_eq!(forged.status, StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn token_of_a_deleted_user_is_rejected() {
    let state = AppState::new(
        LexService::new_local(":memory:").await.unwrap(),
        PetitionDrafter::new(Vec::new(), 1),
        AuthConfig {
            jwt_secret: "test-secret".into(),
            ..Default::default()
        },
        GeneralConfig::default(),
    );
    let service = Arc::clone(&state.service);
    let app = build_router(state);

    let token = signup(&app, "ana@example.com").await;
    let session = send(&app, Method::GET, "/api/auth/session", Some(&token), None).await;
    assert_eq!(session.status, StatusCode::OK);
    let user_id = session.body["id"].as_str().unwrap().to_string();

    service
        .db()
        .conn()
        .execute("DELETE FROM users WHERE id = ?1", [user_id.as_str()])
        .await
        .unwrap();

    let reply = send(&app, Method::GET, "/api/auth/session", Some(&token), None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"], "Sessão inválida ou expirada");
}

#[tokio::test]
async fn list_limit_is_clamped_and_validated() {
    let app = app().await;
    let ana = signup(&app, "ana@example.com").await;
    for tax_id in ["12345678000195", "11222333000181"] {
        let mut body = customer_body();
        body["tax_id"] = json!(tax_id);
        let created = send(&app, Method::POST, "/api/customers", Some(&ana), Some(body)).await;
        assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    }

    let one = send(&app, Method::GET, "/api/customers?limit=0", Some(&ana), None).await;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.body.as_array().unwrap().len(), 1);

    let all = send(&app, Method::GET, "/api/customers?limit=10000", Some(&ana), None).await;
    assert_eq!(all.body.as_array().unwrap().len(), 2);

    for uri in ["/api/customers?limit=abc", "/api/petitions?limit=-1"] {
        let reply = send(&app, Method::GET, uri, Some(&ana), None).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(reply.body["error"].as_str().unwrap().starts_with("Parâmetros inválidos"));
    }
}

#[tokio::test]
async fn customers_are_created_and_listed_per_user() {
    let app = app().await;
    let ana = signup(&app, "ana@example.com").await;
    let bia = signup(&app, "bia@example.com").await;

    let created = send(&app, Method::POST, "/api/customers", Some(&ana), Some(customer_body())).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["tax_id"], "12345678000195");
    assert_eq!(created.body["state"], "SP");

    let mut invalid = customer_body();
    invalid["tax_id"] = json!("123");
    let rejected = send(&app, Method::POST, "/api/customers", Some(&ana), Some(invalid)).await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);

    let listed = send(&app, Method::GET, "/api/customers", Some(&ana), None).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
    let others = send(&app, Method::GET, "/api/customers", Some(&bia), None).await;
    assert_eq!(others.body, json!([]));
}

#[tokio::test]
async fn petitions_crud_is_owner_scoped() {
    let app = app().await;
    let ana = signup(&app, "ana@example.com").await;
    let bia = signup(&app, "bia@example.com").await;
    let id = create_petition(&app, &ana).await;
    let uri = format!("/api/petitions/{id}");

    let got = send(&app, Method::GET, &uri, Some(&ana), None).await;
    assert_eq!(got.status, StatusCode::OK);
    assert_eq!(got.body["content"], DRAFT);

    for method in [Method::GET, Method::DELETE] {
        let foreign = send(&app, method, &uri, Some(&bia), None).await;
        assert_eq!(foreign.status, StatusCode::NOT_FOUND);
        assert_eq!(foreign.body["error"], "Petição não encontrada");
    }

    let updated = send(
        &app,
        Method::PUT,
        &uri,
        Some(&ana),
        Some(json!({ "content": "Texto revisado", "city": null })),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["content"], "Texto revisado");
    assert_eq!(updated.body["city"], Value::Null);

    let listed = send(&app, Method::GET, "/api/petitions?limit=10", Some(&ana), None).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let deleted = send(&app, Method::DELETE, &uri, Some(&ana), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    let gone = send(&app, Method::GET, &uri, Some(&ana), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn petition_with_foreign_customer_is_rejected() {
    let app = app().await;
    let ana = signup(&app, "ana@example.com").await;
    let bia = signup(&app, "bia@example.com").await;
    let customer = send(&app, Method::POST, "/api/customers", Some(&bia), Some(customer_body())).await;

    let mut body = petition_body();
    body["content"] = json!(DRAFT);
    body["customer_id"] = customer.body["id"].clone();
    let reply = send(&app, Method::POST, "/api/petitions", Some(&ana), Some(body.clone())).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "Cliente não encontrado");

    let generate = send(&app, Method::POST, "/api/petitions/generate", Some(&ana), Some(body)).await;
    assert_eq!(generate.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_requires_fields_and_content() {
    let app = app().await;
    let ana = signup(&app, "ana@example.com").await;

    let no_content = send(&app, Method::POST, "/api/petitions", Some(&ana), Some(petition_body())).await;
    assert_eq!(no_content.status, StatusCode::BAD_REQUEST);

    let mut body = petition_body();
    body["request"] = json!("  ");
    let reply = send(&app, Method::POST, "/api/petitions/generate", Some(&ana), Some(body)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Campo obrigatório não informado: pedido");
}

#[tokio::test]
async fn generation_completes_in_background() {
    let app = app().await;
    let ana = signup(&app, "ana@example.com").await;

    let accepted = send(&app, Method::POST, "/api/petitions/generate", Some(&ana), Some(petition_body())).await;
    assert_eq!(accepted.status, StatusCode::ACCEPTED);
    assert_eq!(accepted.body["status"], "pending");
    let job_id = accepted.body["job_id"].as_str().unwrap().to_string();

    let done = wait_for_job(&app, &ana, &job_id).await;
    assert_eq!(done["status"], "completed");
    assert_eq!(done["attempts"], 1);
    assert_eq!(done["error"], Value::Null);
    assert_eq!(done["petition"]["content"], DRAFT);
    assert_eq!(done["petition"]["process_number"], "0001234-56.2024.8.26.0100");

    let listed = send(&app, Method::GET, "/api/petitions", Some(&ana), None).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let bia = signup(&app, "bia@example.com").await;
    let foreign = send(&app, Method::GET, &format!("/api/petitions/generate/{job_id}"), Some(&bia), None).await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn generation_failure_is_reported_on_the_job() {
    let app = app_with(Fixed(|| {
        Err(LlmError::RateLimited {
            retry_after_secs: None,
        })
    }))
    .await;
    let ana = signup(&app, "ana@example.com").await;

    let accepted = send(&app, Method::POST, "/api/petitions/generate", Some(&ana), Some(petition_body())).await;
    let job_id = accepted.body["job_id"].as_str().unwrap().to_string();

    let done = wait_for_job(&app, &ana, &job_id).await;
    assert_eq!(done["status"], "failed");
    assert_eq!(done["attempts"], 2);
    assert_eq!(done["petition"], Value::Null);
    assert!(done["error"].as_str().unwrap().contains("sobrecarregado"));

    let listed = send(&app, Method::GET, "/api/petitions", Some(&ana), None).await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn download_returns_docx_envelope() {
    let app = app().await;
    let ana = signup(&app, "ana@example.com").await;
    let id = create_petition(&app, &ana).await;

    let reply = send(&app, Method::GET, &format!("/api/petitions/{id}/download"), Some(&ana), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.body["filename"],
        "administrative_appeal-0001234-56-2024-8-26-0100.docx"
    );
    assert_eq!(reply.body["mime_type"], lex_docx::DOCX_MIME_TYPE);

    let bytes = lex_docx::decode_base64(reply.body["content"].as_str().unwrap()).unwrap();
    let summary = lex_docx::inspect(&bytes).unwrap();
    assert_eq!(summary.paragraphs[0], "RECURSO ADMINISTRATIVO");
    assert!(summary.paragraphs.iter().any(|p| p == "A recorrente vem apresentar recurso."));

    let missing = send(&app, Method::GET, "/api/petitions/pet-00000000/download", Some(&ana), None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
