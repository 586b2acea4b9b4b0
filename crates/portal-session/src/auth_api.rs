//! Remote authentication API bindings.
//!
//! Five operations, each a single request/response exchange against the
//! versioned API base: login, register, guest login, refresh, logout.

use crate::{AuthUser, Role};
use async_trait::async_trait;
use portal_api::{ApiClient, ApiResult};
use serde::{Deserialize, Serialize};

/// Credentials used to log in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload used to register a new teacher or student.
///
/// The role is attached by `SessionService`; callers supply a
/// `RegisterProfile` and cannot set it themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Teacher a student should be assigned to; ignored for teachers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
}

/// Caller-supplied registration fields, without the role tag.
#[derive(Debug, Clone, Default)]
pub struct RegisterProfile {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub teacher_id: Option<String>,
}

impl RegisterProfile {
    /// Tag the profile with a role, producing the wire payload.
    pub(crate) fn into_request(self, role: Role) -> RegisterRequest {
        RegisterRequest {
            email: self.email,
            password: self.password,
            role,
            first_name: self.first_name,
            last_name: self.last_name,
            teacher_id: self.teacher_id,
        }
    }
}

/// Payload for a guest login: a display name is all a guest has.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestLoginRequest {
    pub first_name: String,
}

/// Payload describing the refresh token to rotate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Payload describing the refresh token to revoke on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Response returned when authentication succeeds.
///
/// Guest sessions carry no refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSuccess {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub user: AuthUser,
}

/// Port for the remote authentication API.
///
/// `HttpAuthApi` is the production implementation; tests inject mocks.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticate with email and password.
    ///
    /// # Errors
    /// * `ApiError::Status` with the server's message on invalid credentials
    async fn login(&self, payload: &LoginRequest) -> ApiResult<AuthSuccess>;

    /// Register a new account with a role-tagged payload.
    async fn register(&self, payload: &RegisterRequest) -> ApiResult<AuthSuccess>;

    /// Start a guest session from a display name.
    async fn guest_login(&self, payload: &GuestLoginRequest) -> ApiResult<AuthSuccess>;

    /// Exchange a refresh token for fresh credentials.
    async fn refresh(&self, payload: &RefreshRequest) -> ApiResult<AuthSuccess>;

    /// Revoke the refresh token server-side; the response body is ignored.
    async fn logout(&self, payload: &LogoutRequest) -> ApiResult<()>;
}

/// HTTP implementation of `AuthApi` over the shared `ApiClient`.
pub struct HttpAuthApi {
    api: ApiClient,
}

impl HttpAuthApi {
    /// Create the bindings over an API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, payload: &LoginRequest) -> ApiResult<AuthSuccess> {
        self.api.post("/auth/login", payload).await
    }

    async fn register(&self, payload: &RegisterRequest) -> ApiResult<AuthSuccess> {
        self.api.post("/auth/register", payload).await
    }

    async fn guest_login(&self, payload: &GuestLoginRequest) -> ApiResult<AuthSuccess> {
        self.api.post("/auth/guest", payload).await
    }

    async fn refresh(&self, payload: &RefreshRequest) -> ApiResult<AuthSuccess> {
        self.api.post("/auth/refresh", payload).await
    }

    async fn logout(&self, payload: &LogoutRequest) -> ApiResult<()> {
        self.api.post_and_ignore("/auth/logout", payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_profile_is_role_tagged() {
        let profile = RegisterProfile {
            email: "a@b.com".to_string(),
            password: "pw".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
            teacher_id: Some("t1".to_string()),
        };
        let request = profile.into_request(Role::Student);
        assert_eq!(request.role, Role::Student);
        assert_eq!(request.teacher_id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_register_request_wire_shape() {
        let request = RegisterRequest {
            email: "a@b.com".to_string(),
            password: "pw".to_string(),
            role: Role::Teacher,
            first_name: Some("Ada".to_string()),
            last_name: None,
            teacher_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["role"], "teacher");
        assert_eq!(json["firstName"], "Ada");
        // absent optionals are omitted, not null
        assert!(json.get("lastName").is_none());
        assert!(json.get("teacherId").is_none());
    }

    #[test]
    fn test_auth_success_parses_without_refresh_token() {
        let json = r#"{
            "accessToken": "A",
            "expiresIn": 900,
            "user": {"id": "g1", "role": "student", "isGuest": true}
        }"#;
        let auth: AuthSuccess = serde_json::from_str(json).unwrap();
        assert_eq!(auth.access_token, "A");
        assert_eq!(auth.refresh_token, None);
        assert!(auth.user.is_guest);
    }

    #[test]
    fn test_logout_request_omits_missing_token() {
        let json = serde_json::to_string(&LogoutRequest {
            refresh_token: None,
        })
        .unwrap();
        assert_eq!(json, "{}");
    }
}
