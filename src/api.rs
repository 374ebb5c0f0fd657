use crate::config::AppConfig;
use crate::session::TokenValidator;
use crate::types::{
    AuthResponse, DifficultyLevel, LoginRequest, RegisterRequest, TopicDto, UserProfile,
};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("network error")]
    Network(#[from] reqwest::Error),
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("authentication rejected ({0})")]
    Rejected(u16),
}

#[derive(Debug, Error)]
pub enum TopicError {
    #[error("network error")]
    Network(#[from] reqwest::Error),
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("topic request failed ({0})")]
    Status(u16),
    #[error("no topic available")]
    Empty,
}

/// Stateless wrapper around the four remote operations the app uses. One
/// attempt per call, fixed timeout, no retries.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Result<Self, AuthError> {
        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let res = self
            .http
            .post(format!("{}/users/login", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(AuthError::Rejected(res.status().as_u16()));
        }

        let text = res.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        let res = self
            .http
            .post(format!("{}/users/register", self.base_url))
            .json(request)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(AuthError::Rejected(res.status().as_u16()));
        }

        let text = res.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get_profile(&self, token: &str) -> Result<UserProfile, AuthError> {
        let res = self
            .http
            .get(format!("{}/users/profile", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(AuthError::Rejected(res.status().as_u16()));
        }

        let text = res.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetches one random topic. The backend answers with an array; the first
    /// element is the topic to practice.
    pub async fn get_random_topic(&self) -> Result<TopicDto, TopicError> {
        let url = format!(
            "{}/topics?random=1&difficulty={}",
            self.base_url,
            urlencoding::encode(DifficultyLevel::Beginner.as_str())
        );
        let res = self.http.get(url).send().await?;

        if !res.status().is_success() {
            return Err(TopicError::Status(res.status().as_u16()));
        }

        let text = res.text().await?;
        let topics: Vec<TopicDto> = serde_json::from_str(&text)?;
        topics.into_iter().next().ok_or(TopicError::Empty)
    }
}

#[async_trait]
impl TokenValidator for BackendClient {
    async fn validate(&self, token: &str) -> Result<(), AuthError> {
        self.get_profile(token).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LanguageCode;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    const TOPIC_BODY: &str = r#"[{
        "id": "t-1",
        "title": "Daily Routine and Hobbies",
        "description": "Tell us about your typical day",
        "difficulty_level": "beginner",
        "is_active": true,
        "language": "en",
        "created_at": "2026-01-10T08:30:00Z",
        "min_duration": 60,
        "min_words": 50
    }]"#;

    fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn request_complete(buf: &[u8]) -> bool {
        let Some(end) = find_subslice(buf, b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&buf[..end]);
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        buf.len() >= end + 4 + content_length
    }

    /// One-endpoint HTTP stub: answers every request with the given status
    /// and body, and records the raw requests it saw.
    async fn spawn_stub(status: u16, body: &'static str) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&seen);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    loop {
                        let n = socket.read(&mut chunk).await.unwrap_or(0);
                        if n == 0 {
                            break;
                        }
                        buf.extend_from_slice(&chunk[..n]);
                        if request_complete(&buf) {
                            break;
                        }
                    }
                    log.lock().await.push(String::from_utf8_lossy(&buf).to_string());

                    let response = format!(
                        "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        (format!("http://{addr}"), seen)
    }

    fn client_for(base_url: &str) -> BackendClient {
        let config = AppConfig {
            api_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            ..AppConfig::default()
        };
        BackendClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn login_posts_credentials_and_extracts_token() {
        let (base_url, seen) =
            spawn_stub(200, r#"{"access_token":"tok-1","token_type":"bearer"}"#).await;
        let client = client_for(&base_url);

        let auth = client.login("a@b.c", "hunter2").await.unwrap();
        assert_eq!(auth.access_token, "tok-1");

        let requests = seen.lock().await;
        assert!(requests[0].starts_with("POST /users/login"));
        assert!(requests[0].contains(r#""email":"a@b.c""#));
    }

    #[tokio::test]
    async fn login_rejection_maps_to_auth_error() {
        let (base_url, _) = spawn_stub(401, r#"{"message":"bad credentials"}"#).await;
        let client = client_for(&base_url);

        match client.login("a@b.c", "wrong").await {
            Err(AuthError::Rejected(401)) => {}
            other => panic!("expected Rejected(401), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_sends_five_field_payload() {
        let (base_url, seen) = spawn_stub(200, r#"{"access_token":"tok-2"}"#).await;
        let client = client_for(&base_url);

        let request = RegisterRequest {
            email: "a@b.c".to_string(),
            password: "hunter2".to_string(),
            username: "ann".to_string(),
            target_language: LanguageCode::En,
            user_language: LanguageCode::Ru,
        };
        let auth = client.register(&request).await.unwrap();
        assert_eq!(auth.access_token, "tok-2");

        let requests = seen.lock().await;
        assert!(requests[0].starts_with("POST /users/register"));
        assert!(requests[0].contains(r#""username":"ann""#));
        assert!(requests[0].contains(r#""user_language":"ru""#));
    }

    #[tokio::test]
    async fn get_profile_sends_bearer_header() {
        let body = r#"{"id":"u-1","email":"a@b.c","username":null,"target_language":null,"user_language":null}"#;
        let (base_url, seen) = spawn_stub(200, body).await;
        let client = client_for(&base_url);

        let profile = client.get_profile("tok-9").await.unwrap();
        assert_eq!(profile.id, "u-1");

        let requests = seen.lock().await;
        let request = requests[0].to_ascii_lowercase();
        assert!(request.starts_with("get /users/profile"));
        assert!(request.contains("authorization: bearer tok-9"));
    }

    #[tokio::test]
    async fn random_topic_takes_first_array_element() {
        let (base_url, seen) = spawn_stub(200, TOPIC_BODY).await;
        let client = client_for(&base_url);

        let topic = client.get_random_topic().await.unwrap();
        assert_eq!(topic.id, "t-1");
        assert_eq!(topic.min_words, 50);

        let requests = seen.lock().await;
        assert!(requests[0].starts_with("GET /topics?random=1&difficulty=beginner"));
    }

    #[tokio::test]
    async fn random_topic_empty_array_is_an_error() {
        let (base_url, _) = spawn_stub(200, "[]").await;
        let client = client_for(&base_url);

        assert!(matches!(
            client.get_random_topic().await,
            Err(TopicError::Empty)
        ));
    }
}
