use std::{sync::Arc, time::Instant};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use tracing::{error, info};

use crate::{
    app_state::AppState,
    authentication::basic_auth_guard,
    environment::ApiConfig,
    logger::setup_info_logger,
    postgres::{PostgresClient, PostgresConnectionError, PostgresError},
    product::api::create_product_routes,
    schema::apply_schema,
    shared::HttpError,
};

#[derive(Error, Debug)]
pub enum StartError {
    #[error("Failed to connect to the database: {0}")]
    DatabaseConnectionError(#[from] PostgresConnectionError),

    #[error("Could not apply db schema to postgres: {0}")]
    CouldNotApplyDbSchema(#[from] PostgresError),

    #[error("Failed to start the API: {0}")]
    ApiStartupError(#[from] std::io::Error),
}

/// Liveness endpoint: 200 with a JSON content type and no body.
async fn status() -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")])
}

#[derive(Serialize)]
struct Version {
    version: String,
}

/// Reports the version string shipped next to the binary.
///
/// A missing or unreadable version file is logged and reported as an empty
/// string rather than failing the request. Only the last line of the file
/// counts.
async fn version(State(state): State<Arc<AppState>>) -> Result<Json<Version>, HttpError> {
    let version = match tokio::fs::read_to_string(&state.version_file).await {
        Ok(contents) => contents.lines().last().unwrap_or_default().trim().to_string(),
        Err(e) => {
            error!("Failed to read version file {}: {}", state.version_file.display(), e);
            String::new()
        }
    };

    Ok(Json(Version { version }))
}

/// Middleware that logs every request with its status and elapsed time.
///
/// Purely observational; the response passes through untouched. The elapsed
/// time is measured around the whole downstream stack, so it fires no matter
/// how the handler concluded.
async fn activity_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let duration = start.elapsed();

    if status.is_client_error() || status.is_server_error() {
        error!("{} {} responded with {} after {:?}", method, uri, status, duration);
    } else {
        info!("{} {} responded with {} after {:?}", method, uri, status, duration);
    }

    response
}

/// Builds the full application router around the supplied state.
///
/// The five API routes sit behind the basic auth guard; the static file
/// fallback does not (the original service registered its file server
/// outside the auth wrapper). The activity logger covers everything.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let api_routes = Router::new()
        .route("/status", any(status))
        .route("/version", any(version))
        .merge(create_product_routes())
        .layer(middleware::from_fn(basic_auth_guard));

    Router::new()
        .merge(api_routes)
        .fallback_service(ServeDir::new("."))
        .layer(middleware::from_fn(activity_logger))
        .layer(cors)
        .with_state(state)
}

/// Connects to the database, applies the schema and serves the API until the
/// process is stopped. Configuration and connection failures are fatal here;
/// nothing downstream of a successful start aborts the process.
pub async fn start() -> Result<(), StartError> {
    setup_info_logger();
    dotenvy::dotenv().ok();

    info!("Starting up the server");

    let config = ApiConfig::from_env();

    let postgres = PostgresClient::new().await?;

    apply_schema(&postgres).await?;
    info!("Applied database schema");

    let state = Arc::new(AppState::new(Arc::new(postgres)));

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_address).await?;
    info!("shoestore is up on http://{}", config.listen_address);
    axum::serve(listener, app).await.map_err(StartError::ApiStartupError)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        io::Write as _,
        path::PathBuf,
        sync::{
            atomic::{AtomicI32, Ordering},
            Mutex,
        },
    };

    use async_trait::async_trait;
    use axum::http::Request;
    use base64::{engine::general_purpose, Engine as _};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::product::{Color, Product, ProductId, ProductStore, StoreError};

    struct MemoryProductStore {
        products: Mutex<Vec<Product>>,
        next_id: AtomicI32,
    }

    impl MemoryProductStore {
        fn new() -> Self {
            MemoryProductStore { products: Mutex::new(Vec::new()), next_id: AtomicI32::new(1) }
        }
    }

    #[async_trait]
    impl ProductStore for MemoryProductStore {
        async fn create_product(&self, mut product: Product) -> Result<Product, StoreError> {
            product.id = ProductId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            for (index, color) in product.colors.iter_mut().enumerate() {
                color.id = index as i32 + 1;
            }
            self.products.lock().unwrap().push(product.clone());
            Ok(product)
        }

        async fn get_products(&self) -> Result<Vec<Product>, StoreError> {
            Ok(self.products.lock().unwrap().clone())
        }

        async fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
            Ok(self.products.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
            self.products.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }
    }

    fn test_app() -> Router {
        create_app(Arc::new(AppState::new(Arc::new(MemoryProductStore::new()))))
    }

    fn auth_header() -> String {
        format!("Basic {}", general_purpose::STANDARD.encode("admin:test"))
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", auth_header())
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn rejects_wrong_credentials() {
        let app = test_app();

        let request = Request::builder()
            .method("GET")
            .uri("/list")
            .header(
                "Authorization",
                format!("Basic {}", general_purpose::STANDARD.encode("admin:nope")),
            )
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Authorization failed");
    }

    #[tokio::test]
    async fn rejects_malformed_authorization_headers() {
        let malformed = [
            None,
            Some("Bearer abcdef"),
            Some("Basic"),
            Some("Basic !!!not-base64!!!"),
            Some("Basic YWRtaW50ZXN0"), // "admintest", no colon
        ];

        for header in malformed {
            let app = test_app();

            let mut builder = Request::builder().method("GET").uri("/list");
            if let Some(value) = header {
                builder = builder.header("Authorization", value);
            }

            let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "header: {:?}", header);
        }
    }

    #[tokio::test]
    async fn status_is_empty_json_ok() {
        let app = test_app();

        let response = app.oneshot(request("GET", "/status", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn add_assigns_ids_and_echoes_fields() {
        let app = test_app();

        let response = app
            .oneshot(request(
                "POST",
                "/add",
                r#"{"code": "runner", "color": [{"name": "red"}, {"name": "blue"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_ne!(body["id"], 0);
        assert_eq!(body["code"], "runner");
        assert_eq!(body["color"][0]["name"], "red");
        assert_eq!(body["color"][1]["name"], "blue");
    }

    #[tokio::test]
    async fn list_returns_every_added_product() {
        let app = test_app();

        for code in ["runner", "boot"] {
            let response = app
                .clone()
                .oneshot(request("POST", "/add", &format!(r#"{{"code": "{}"}}"#, code)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app.oneshot(request("GET", "/list", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let codes: Vec<&str> =
            body.as_array().unwrap().iter().map(|p| p["code"].as_str().unwrap()).collect();
        assert_eq!(codes.len(), 2);
        assert!(codes.contains(&"runner"));
        assert!(codes.contains(&"boot"));
    }

    #[tokio::test]
    async fn list_by_id_wraps_the_single_product_in_an_array() {
        let app = test_app();

        let response =
            app.clone().oneshot(request("POST", "/add", r#"{"code": "runner"}"#)).await.unwrap();
        let created = body_json(response).await;
        let id = created["id"].as_i64().unwrap();

        let response =
            app.oneshot(request("GET", &format!("/list?id={}", id), "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["code"], "runner");
    }

    #[tokio::test]
    async fn list_by_unknown_id_is_an_empty_array() {
        let app = test_app();

        let response = app.oneshot(request("GET", "/list?id=999", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn list_by_non_numeric_id_is_a_bad_request() {
        let app = test_app();

        let response = app.oneshot(request("GET", "/list?id=runner", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleted_product_no_longer_appears_in_list() {
        let app = test_app();

        let response =
            app.clone().oneshot(request("POST", "/add", r#"{"code": "runner"}"#)).await.unwrap();
        let created = body_json(response).await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(request("DELETE", "/delete", &format!(r#"{{"id": {}}}"#, id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());

        let response = app.oneshot(request("GET", "/list", "")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn wrong_method_is_forbidden_even_when_authenticated() {
        let cases = [("GET", "/add"), ("POST", "/list"), ("GET", "/delete")];

        for (method, uri) in cases {
            let app = test_app();

            let response = app.oneshot(request(method, uri, "{}")).await.unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{} {}", method, uri);
        }
    }

    #[tokio::test]
    async fn malformed_body_is_an_internal_error() {
        let app = test_app();

        let response = app.oneshot(request("POST", "/add", "not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    fn app_with_version_file(version_file: PathBuf) -> Router {
        let state = AppState {
            store: Arc::new(MemoryProductStore::new()),
            version_file,
        };
        create_app(Arc::new(state))
    }

    #[tokio::test]
    async fn version_reports_the_last_line_of_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ignored older line").unwrap();
        writeln!(file, "1.2.3").unwrap();

        let app = app_with_version_file(file.path().to_path_buf());

        let response = app.oneshot(request("GET", "/version", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "version": "1.2.3" }));
    }

    #[tokio::test]
    async fn version_with_missing_file_is_an_empty_string() {
        let app = app_with_version_file(PathBuf::from("./no-such-version-file"));

        let response = app.oneshot(request("GET", "/version", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "version": "" }));
    }

    #[tokio::test]
    async fn fallback_serves_404_without_requiring_auth() {
        let app = test_app();

        let request = Request::builder()
            .method("GET")
            .uri("/no-such-file")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
