//! Router assembly
//!
//! | Method | Path | Roles |
//! |---|---|---|
//! | GET | /api/clientes | public |
//! | GET | /api/clientes/{id} | admin or user |
//! | POST | /api/clientes | admin |
//! | PUT | /api/clientes/{id} | admin |
//! | DELETE | /api/clientes/{id} | admin |
//!
//! `/health` and `/ready` are unauthenticated.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put, MethodRouter},
    Router,
};

use crate::{
    handlers::{create_customer, delete_customer, get_customer, list_customers, update_customer},
    health::{health, readiness},
    middleware::{Role, RoleGuard},
    repository::CustomerRepository,
    state::AppState,
};

fn guarded<R: CustomerRepository>(
    route: MethodRouter<AppState<R>>,
    guard: &RoleGuard,
) -> MethodRouter<AppState<R>> {
    route.route_layer(from_fn_with_state(guard.clone(), RoleGuard::middleware))
}

/// Build the full application router
pub fn router<R: CustomerRepository>(state: AppState<R>) -> Router {
    let admin = RoleGuard::new(state.auth().clone(), &[Role::Admin]);
    let admin_or_user = RoleGuard::new(state.auth().clone(), &[Role::Admin, Role::User]);

    let customers = Router::new()
        .route(
            "/clientes",
            get(list_customers::<R>).merge(guarded(post(create_customer::<R>), &admin)),
        )
        .route(
            "/clientes/{id}",
            guarded(get(get_customer::<R>), &admin_or_user).merge(guarded(
                put(update_customer::<R>).delete(delete_customer::<R>),
                &admin,
            )),
        );

    Router::new()
        .route("/health", get(health::<R>))
        .route("/ready", get(readiness::<R>))
        .nest("/api", customers)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        customer::{Customer, CustomerPayload},
        middleware::{Claims, JwtAuth},
        repository::{
            InMemoryCustomerRepository, Repository, RepositoryError, RepositoryOperation,
            RepositoryResult,
        },
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const SECRET: &[u8] = b"router-test-secret";

    fn token(roles: &[&str]) -> String {
        let claims = Claims {
            sub: "tester".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: chrono::Utc::now().timestamp() + 600,
            iat: None,
            iss: None,
            aud: None,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
    }

    fn admin() -> String {
        token(&["ROLE_ADMIN"])
    }

    fn user() -> String {
        token(&["ROLE_USER"])
    }

    fn app_with<R: CustomerRepository>(repo: R) -> Router {
        router(AppState::new(
            Config::default(),
            repo,
            JwtAuth::from_secret(SECRET),
        ))
    }

    fn app() -> Router {
        app_with(InMemoryCustomerRepository::new())
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(t) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, body: Value) -> Value {
        let response = send(app, Method::POST, "/api/clientes", Some(&admin()), Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_create_returns_envelope_with_new_id() {
        let app = app();
        let response = send(
            &app,
            Method::POST,
            "/api/clientes",
            Some(&admin()),
            Some(json!({ "name": "Ana", "email": "ana@x.com", "phone": "123" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/api/clientes/1"
        );
        let body = json_body(response).await;
        assert!(body["mensaje"].is_string());
        assert!(body["cliente"]["id"].as_i64().unwrap() > 0);
        assert_eq!(body["cliente"]["name"], "Ana");
    }

    #[tokio::test]
    async fn test_create_then_get_by_returned_id() {
        let app = app();
        let created = create(&app, json!({ "name": "Ana", "email": "ana@x.com" })).await;
        let id = created["cliente"]["id"].as_i64().unwrap();

        let response = send(&app, Method::GET, &format!("/api/clientes/{}", id), Some(&user()), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["id"], id);
        assert_eq!(body["name"], "Ana");
        assert_eq!(body["email"], "ana@x.com");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_404() {
        let response = send(&app(), Method::GET, "/api/clientes/999999", Some(&admin()), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert!(body["mensaje"].as_str().unwrap().contains("999999"));
    }

    #[tokio::test]
    async fn test_invalid_create_is_400_with_one_error_per_field() {
        let app = app();
        let response = send(
            &app,
            Method::POST,
            "/api/clientes",
            Some(&admin()),
            Some(json!({ "name": "", "email": "bad" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);

        let list = send(&app, Method::GET, "/api/clientes", None, None).await;
        assert_eq!(json_body(list).await, json!([]));
    }

    #[tokio::test]
    async fn test_null_required_fields_are_validation_errors() {
        let app = app();
        let response = send(
            &app,
            Method::POST,
            "/api/clientes",
            Some(&admin()),
            Some(json!({ "name": null, "email": "bad" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body,
            json!({
                "errors": [
                    "Field 'name' must not be empty",
                    "Field 'email' must be a well-formed email address"
                ]
            })
        );

        let response = send(
            &app,
            Method::POST,
            "/api/clientes",
            Some(&admin()),
            Some(json!({ "name": "Ana", "email": null })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["errors"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_copies_fields() {
        let app = app();
        let created = create(&app, json!({ "name": "Ana", "email": "ana@x.com", "phone": "123" })).await;
        let id = created["cliente"]["id"].as_i64().unwrap();
        let uri = format!("/api/clientes/{}", id);

        let response = send(
            &app,
            Method::PUT,
            &uri,
            Some(&admin()),
            Some(json!({ "id": 777, "name": "Ana2", "email": "a2@x.com", "phone": "999" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["cliente"]["id"], id);
        assert_eq!(body["cliente"]["created_at"], created["cliente"]["created_at"]);

        let stored = json_body(send(&app, Method::GET, &uri, Some(&admin()), None).await).await;
        assert_eq!(stored["name"], "Ana2");
        assert_eq!(stored["email"], "a2@x.com");
        assert_eq!(stored["phone"], "999");
        assert_eq!(stored["id"], id);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let app = app();
        let response = send(
            &app,
            Method::PUT,
            "/api/clientes/55",
            Some(&admin()),
            Some(json!({ "name": "Ana", "email": "ana@x.com" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &app,
            Method::PUT,
            "/api/clientes/55",
            Some(&admin()),
            Some(json!({ "name": "", "email": "ana@x.com" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_404() {
        let app = app();
        let created = create(&app, json!({ "name": "Ana", "email": "ana@x.com" })).await;
        let uri = format!("/api/clientes/{}", created["cliente"]["id"]);

        let response = send(&app, Method::DELETE, &uri, Some(&admin()), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["mensaje"].is_string());
        assert!(body.get("cliente").is_none());

        let response = send(&app, Method::GET, &uri, Some(&admin()), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::DELETE, &uri, Some(&admin()), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_is_public_and_ordered() {
        let app = app();
        create(&app, json!({ "name": "Ana", "email": "ana@x.com" })).await;
        create(&app, json!({ "name": "Luis", "email": "luis@x.com" })).await;

        let response = send(&app, Method::GET, "/api/clientes", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Ana", "Luis"]);
    }

    #[tokio::test]
    async fn test_role_gating() {
        let app = app();
        let payload = json!({ "name": "Ana", "email": "ana@x.com" });

        // No token
        let response = send(&app, Method::POST, "/api/clientes", None, Some(payload.clone())).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let response = send(&app, Method::GET, "/api/clientes/1", None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Garbage token
        let response = send(&app, Method::GET, "/api/clientes/1", Some("nope"), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // User role on admin routes
        let response = send(&app, Method::POST, "/api/clientes", Some(&user()), Some(payload.clone())).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let response = send(&app, Method::PUT, "/api/clientes/1", Some(&user()), Some(payload)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let response = send(&app, Method::DELETE, "/api/clientes/1", Some(&user()), None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Token without any known role
        let response = send(&app, Method::GET, "/api/clientes/1", Some(&token(&["ROLE_GUEST"])), None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // User role may read by id
        let response = send(&app, Method::GET, "/api/clientes/1", Some(&user()), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[derive(Clone)]
    struct FailingRepository;

    impl Repository<i64, Customer, CustomerPayload> for FailingRepository {
        async fn find_all(&self) -> RepositoryResult<Vec<Customer>> {
            Err(RepositoryError::database_error(RepositoryOperation::FindAll, "relation \"clientes\" does not exist"))
        }

        async fn find_by_id(&self, _id: &i64) -> RepositoryResult<Option<Customer>> {
            Err(RepositoryError::database_error(RepositoryOperation::FindById, "boom"))
        }

        async fn create(&self, _data: CustomerPayload) -> RepositoryResult<Customer> {
            Err(RepositoryError::database_error(RepositoryOperation::Create, "boom"))
        }

        async fn save(&self, _entity: Customer) -> RepositoryResult<Customer> {
            Err(RepositoryError::database_error(RepositoryOperation::Save, "boom"))
        }

        async fn delete(&self, _entity: &Customer) -> RepositoryResult<()> {
            Err(RepositoryError::database_error(RepositoryOperation::Delete, "boom"))
        }

        async fn ping(&self) -> RepositoryResult<()> {
            Err(RepositoryError::connection_failed(RepositoryOperation::Ping, "down"))
        }
    }

    #[tokio::test]
    async fn test_persistence_failures_are_500_with_detail() {
        let app = app_with(FailingRepository);

        let response = send(&app, Method::GET, "/api/clientes", None, None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["mensaje"].is_string());
        assert!(body["error"].as_str().unwrap().contains("does not exist"));

        let response = send(
            &app,
            Method::POST,
            "/api/clientes",
            Some(&admin()),
            Some(json!({ "name": "Ana", "email": "ana@x.com" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = send(
            &app,
            Method::PUT,
            "/api/clientes/1",
            Some(&admin()),
            Some(json!({ "name": "Ana", "email": "ana@x.com" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = send(&app, Method::DELETE, "/api/clientes/1", Some(&admin()), None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health_and_readiness() {
        let response = send(&app(), Method::GET, "/health", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");

        let response = send(&app(), Method::GET, "/ready", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app_with(FailingRepository), Method::GET, "/ready", None, None).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["ready"], false);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let response = send(&app(), Method::GET, "/api/clientes/abc", Some(&admin()), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
