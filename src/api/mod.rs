use crate::models::{
    Category, FilterCriteria, GpsCoords, ItemDraft, ItemRecord, ItemType, MatchRecord, Profile,
};
use crate::session::SessionStore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    /// Client-side rejection; never reached the network.
    Validation,
    /// Transport failure (unreachable, timeout).
    Network,
    /// 401 from the backend.
    Auth,
    /// 404 from the backend.
    NotFound,
    /// Any other non-success status.
    Http,
    /// Response body did not decode.
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Validation,
            status: None,
            message: message.into(),
        }
    }

    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            status: None,
            message: e.to_string(),
        }
    }

    fn from_status(status: u16, body: String) -> Self {
        let message = extract_error_detail(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("Request failed ({status})")
            } else {
                body
            }
        });

        let kind = match status {
            401 => ApiErrorKind::Auth,
            404 => ApiErrorKind::NotFound,
            _ => ApiErrorKind::Http,
        };

        Self {
            kind,
            status: Some(status),
            message,
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Pulls the backend's human-readable `detail` out of a JSON error body.
pub(crate) fn extract_error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(|s| s.to_string())
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub backend_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_backend_url = "http://localhost:8000".to_string();

        // We support BOTH `window.ENV.API_URL` and `window.ENV.api_url`
        // (legacy/implementation detail) for compatibility.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    // 1) Preferred: API_URL
                    if let Ok(url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = url.as_string() {
                            return Self {
                                backend_url: url_str,
                            };
                        }
                    }

                    // 2) Fallback: api_url
                    if let Ok(url) = js_sys::Reflect::get(&env, &"api_url".into()) {
                        if let Some(url_str) = url.as_string() {
                            return Self {
                                backend_url: url_str,
                            };
                        }
                    }
                }
            }
        }

        Self {
            backend_url: default_backend_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// All backend routes live under `/api` on the configured origin.
pub(crate) fn api_base(backend_url: &str) -> String {
    format!("{}/api", backend_url.trim_end_matches('/'))
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
}

/// Login and register answer with the same token + profile shape.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AuthResponse {
    pub token: String,
    pub user: Profile,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct CreateItemRequest {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_coords: Option<GpsCoords>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,

    #[serde(rename = "type")]
    pub item_type: ItemType,
}

impl CreateItemRequest {
    pub fn from_draft(draft: &ItemDraft, category: Category, item_type: ItemType) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            category,
            location: draft.location.clone(),
            gps_coords: draft.gps_coords,
            image_base64: draft.image_base64.clone(),
            item_type,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct RematchResponse {
    pub new_confidence: f64,
}

/// Single outbound gateway. Attaches the current credential on every call,
/// surfaces transport/status failures as [`ApiError`], and nothing else:
/// no retry, no caching, and no session mutation (even on a 401 — that
/// decision belongs to callers).
#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: String, session: SessionStore) -> Self {
        Self { base_url, session }
    }

    pub fn from_env(session: SessionStore) -> Self {
        Self::new(api_base(&EnvConfig::new().backend_url), session)
    }

    fn with_auth_headers(
        &self,
        mut req: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = self.session.token() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let res = self
            .with_auth_headers(req)
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, body))
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let req = client.get(format!("{}{}", self.base_url, path)).query(query);
        self.execute(req).await
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &impl serde::Serialize,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let req = client
            .request(method, format!("{}{}", self.base_url, path))
            .json(body);
        self.execute(req).await
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        self.send_json(
            reqwest::Method::POST,
            "/auth/login",
            &LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<AuthResponse> {
        self.send_json(
            reqwest::Method::POST,
            "/auth/register",
            &RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    pub async fn update_profile(&self, name: &str, email: &str) -> ApiResult<Profile> {
        self.send_json(
            reqwest::Method::PUT,
            "/auth/profile",
            &UpdateProfileRequest {
                name: name.to_string(),
                email: email.to_string(),
            },
        )
        .await
    }

    pub async fn list_items(&self, criteria: &FilterCriteria) -> ApiResult<Vec<ItemRecord>> {
        self.get("/items", &criteria.query_params()).await
    }

    pub async fn my_items(&self) -> ApiResult<Vec<ItemRecord>> {
        self.get("/items/my-items", &[]).await
    }

    pub async fn get_item(&self, item_id: &str) -> ApiResult<ItemRecord> {
        self.get(&format!("/items/{}", item_id), &[]).await
    }

    pub async fn create_item(&self, req: &CreateItemRequest) -> ApiResult<ItemRecord> {
        self.send_json(reqwest::Method::POST, "/items", req).await
    }

    pub async fn delete_item(&self, item_id: &str) -> ApiResult<()> {
        // Response body is an acknowledgment message we do not use.
        let _: serde_json::Value = self
            .send_json(
                reqwest::Method::DELETE,
                &format!("/items/{}", item_id),
                &serde_json::json!({}),
            )
            .await?;
        Ok(())
    }

    pub async fn list_matches(&self) -> ApiResult<Vec<MatchRecord>> {
        self.get("/matches", &[]).await
    }

    pub async fn rematch(&self, match_id: &str) -> ApiResult<RematchResponse> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/matches/{}/rematch", match_id),
            &serde_json::json!({}),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TypeFilter;

    #[test]
    fn test_api_base_trims_trailing_slash() {
        assert_eq!(api_base("http://localhost:8000"), "http://localhost:8000/api");
        assert_eq!(api_base("http://localhost:8000/"), "http://localhost:8000/api");
        assert_eq!(api_base("https://lofo.example.com//"), "https://lofo.example.com/api");
    }

    #[test]
    fn test_extract_error_detail() {
        assert_eq!(
            extract_error_detail(r#"{"detail": "Item not found"}"#),
            Some("Item not found".to_string())
        );
        assert_eq!(extract_error_detail(r#"{"error": "x"}"#), None);
        assert_eq!(extract_error_detail("not json"), None);
    }

    #[test]
    fn test_error_from_status_maps_auth_and_not_found() {
        let e = ApiError::from_status(401, r#"{"detail": "Invalid token"}"#.to_string());
        assert_eq!(e.kind, ApiErrorKind::Auth);
        assert_eq!(e.status, Some(401));
        assert_eq!(e.message, "Invalid token");

        let e = ApiError::from_status(404, String::new());
        assert_eq!(e.kind, ApiErrorKind::NotFound);
        assert_eq!(e.message, "Request failed (404)");

        let e = ApiError::from_status(500, "boom".to_string());
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(e.message, "boom");
    }

    #[test]
    fn test_auth_response_contract_deserialize() {
        // Contract based on the backend auth handlers.
        let json = r#"{
            "token": "jwt-token",
            "user": {"id": "u1", "name": "Asha", "email": "asha@example.com"}
        }"#;
        let parsed: AuthResponse = serde_json::from_str(json).expect("auth response should parse");
        assert_eq!(parsed.token, "jwt-token");
        assert_eq!(parsed.user.email, "asha@example.com");
    }

    #[test]
    fn test_rematch_response_contract_deserialize() {
        let parsed: RematchResponse =
            serde_json::from_str(r#"{"new_confidence": 0.42}"#).expect("should parse");
        assert!((parsed.new_confidence - 0.42).abs() < 1e-9);
    }

    #[test]
    fn test_create_item_request_serialization() {
        let draft = ItemDraft {
            title: "Blue Backpack".to_string(),
            description: String::new(),
            category: "Bags".to_string(),
            location: "Library".to_string(),
            gps_coords: None,
            image_base64: None,
        };
        let req = CreateItemRequest::from_draft(&draft, Category::Bags, ItemType::Lost);
        let v = serde_json::to_value(req).expect("should serialize");

        assert_eq!(v["type"], "lost");
        assert_eq!(v["category"], "Bags");
        // Optional fields are omitted, not sent as null.
        assert!(v.get("gps_coords").is_none());
        assert!(v.get("image_base64").is_none());
    }

    #[test]
    fn test_create_item_request_includes_coords_when_present() {
        let draft = ItemDraft {
            title: "Wallet".to_string(),
            description: "Brown leather".to_string(),
            category: "Accessories".to_string(),
            location: "Cafeteria".to_string(),
            gps_coords: Some(GpsCoords {
                lat: 12.9716,
                lng: 77.5946,
            }),
            image_base64: Some("aGVsbG8=".to_string()),
        };
        let req = CreateItemRequest::from_draft(&draft, Category::Accessories, ItemType::Found);
        let v = serde_json::to_value(req).expect("should serialize");

        assert_eq!(v["type"], "found");
        assert_eq!(v["gps_coords"]["lat"], 12.9716);
        assert_eq!(v["image_base64"], "aGVsbG8=");
    }

    #[test]
    fn test_list_items_query_reflects_criteria() {
        let criteria = FilterCriteria {
            type_filter: TypeFilter::Only(ItemType::Found),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.query_params(), vec![("type", "found".to_string())]);
    }
}
