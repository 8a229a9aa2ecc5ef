use crate::config::LookupSettings;
use crate::profile::ProfileFields;
use crate::scraper::{ProfileScraper, ScrapeError};
use crate::utils::truncate_str;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

const WEB_PROFILE_INFO_PATH: &str = "/api/v1/users/web_profile_info/";

/// Profile scraper backed by Instagram's anonymous `web_profile_info` endpoint.
///
/// The inner `reqwest::Client` is connection-pooled and cheap to share, so one
/// instance serves every incoming message.
pub struct InstagramClient {
    http: HttpClient,
    endpoint: String,
    app_id: String,
}

impl InstagramClient {
    /// Create a new client from lookup settings
    #[must_use]
    pub fn new(settings: &LookupSettings) -> Self {
        let http = HttpClient::builder()
            .user_agent(settings.instagram_user_agent.clone())
            .build()
            .unwrap_or_else(|_| HttpClient::new());
        Self {
            http,
            endpoint: format!(
                "{}{WEB_PROFILE_INFO_PATH}",
                settings.instagram_api_base.trim_end_matches('/')
            ),
            app_id: settings.instagram_app_id.clone(),
        }
    }
}

#[async_trait]
impl ProfileScraper for InstagramClient {
    #[instrument(skip(self))]
    async fn fetch_profile(&self, username: &str) -> Result<ProfileFields, ScrapeError> {
        if username.is_empty() {
            return Err(ScrapeError::InvalidUsername(username.to_string()));
        }

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("username", username)])
            .header("x-ig-app-id", &self.app_id)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ScrapeError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::NetworkError(e.to_string()))?;
        debug!(status, bytes = body.len(), "web_profile_info responded");

        parse_profile_response(username, status, &body)
    }
}

#[derive(Deserialize)]
struct WebProfileInfo {
    data: WebProfileData,
}

#[derive(Deserialize)]
struct WebProfileData {
    user: Option<RawUser>,
}

#[derive(Deserialize)]
struct EdgeCount {
    count: u64,
}

#[derive(Deserialize)]
struct RawUser {
    id: String,
    username: String,
    full_name: Option<String>,
    biography: Option<String>,
    #[serde(default)]
    is_private: bool,
    #[serde(default)]
    is_verified: bool,
    profile_pic_url: Option<String>,
    profile_pic_url_hd: Option<String>,
    external_url: Option<String>,
    edge_followed_by: Option<EdgeCount>,
    edge_follow: Option<EdgeCount>,
    edge_owner_to_timeline_media: Option<EdgeCount>,
}

/// Map a `web_profile_info` response onto profile fields or a scrape error.
fn parse_profile_response(
    username: &str,
    status: u16,
    body: &str,
) -> Result<ProfileFields, ScrapeError> {
    if status == 404 {
        return Err(ScrapeError::NotExists(username.to_string()));
    }

    if !(200..300).contains(&status) {
        let trimmed = body.trim_start();
        // Nginx/proxy error pages
        let is_html = trimmed.starts_with("<!DOCTYPE")
            || trimmed.starts_with("<html")
            || trimmed.starts_with("<HTML");
        let message = if is_html {
            "(server returned HTML error page)".to_string()
        } else {
            truncate_str(trimmed, 200)
        };
        warn!(status, "Instagram rejected profile request");
        return Err(ScrapeError::ApiError { status, message });
    }

    let info: WebProfileInfo =
        serde_json::from_str(body).map_err(|e| ScrapeError::MalformedResponse(e.to_string()))?;

    let Some(user) = info.data.user else {
        return Err(ScrapeError::NotExists(username.to_string()));
    };

    let Some(posts) = user.edge_owner_to_timeline_media else {
        if user.is_private {
            return Err(ScrapeError::PrivateNotFollowed(user.username));
        }
        return Err(missing("edge_owner_to_timeline_media"));
    };

    let user_id = user.id.parse::<u64>().map_err(|_| {
        ScrapeError::MalformedResponse(format!("non-numeric user id {:?}", user.id))
    })?;

    Ok(ProfileFields {
        username: user.username,
        user_id,
        full_name: non_empty(user.full_name),
        followers: user
            .edge_followed_by
            .ok_or_else(|| missing("edge_followed_by"))?
            .count,
        following: user.edge_follow.ok_or_else(|| missing("edge_follow"))?.count,
        post_count: posts.count,
        bio: non_empty(user.biography),
        is_private: user.is_private,
        is_verified: user.is_verified,
        profile_pic_url: non_empty(user.profile_pic_url_hd)
            .or_else(|| non_empty(user.profile_pic_url)),
        external_url: non_empty(user.external_url),
    })
}

fn missing(field: &str) -> ScrapeError {
    ScrapeError::MalformedResponse(format!("missing field `{field}`"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const PUBLIC_PROFILE: &str = r#"{
        "data": {
            "user": {
                "id": "12",
                "username": "jack",
                "full_name": "Jack Dorsey",
                "biography": "",
                "is_private": false,
                "is_verified": true,
                "profile_pic_url": "https://cdn.example/small.jpg",
                "profile_pic_url_hd": "https://cdn.example/hd.jpg",
                "external_url": null,
                "edge_followed_by": { "count": 1234567 },
                "edge_follow": { "count": 42 },
                "edge_owner_to_timeline_media": { "count": 7, "edges": [] }
            }
        },
        "status": "ok"
    }"#;

    #[test]
    fn test_parse_public_profile() {
        let profile = parse_profile_response("jack", 200, PUBLIC_PROFILE).expect("parses");

        assert_eq!(profile.username, "jack");
        assert_eq!(profile.user_id, 12);
        assert_eq!(profile.full_name.as_deref(), Some("Jack Dorsey"));
        assert_eq!(profile.followers, 1_234_567);
        assert_eq!(profile.following, 42);
        assert_eq!(profile.post_count, 7);
        assert_eq!(profile.bio, None);
        assert!(profile.is_verified);
        assert!(!profile.is_private);
        assert_eq!(
            profile.profile_pic_url.as_deref(),
            Some("https://cdn.example/hd.jpg")
        );
        assert_eq!(profile.external_url, None);
    }

    #[test]
    fn test_parse_not_found() {
        let err = parse_profile_response("ghost", 404, "").expect_err("should fail");
        assert!(matches!(err, ScrapeError::NotExists(ref u) if u == "ghost"));

        let err = parse_profile_response("ghost", 200, r#"{"data":{"user":null}}"#)
            .expect_err("should fail");
        assert!(matches!(err, ScrapeError::NotExists(_)));
    }

    #[test]
    fn test_parse_private_without_media() {
        let body = r#"{"data":{"user":{
            "id": "5", "username": "locked", "is_private": true,
            "edge_followed_by": {"count": 1}, "edge_follow": {"count": 2}
        }}}"#;
        let err = parse_profile_response("locked", 200, body).expect_err("should fail");
        assert!(matches!(err, ScrapeError::PrivateNotFollowed(ref u) if u == "locked"));
    }

    #[test]
    fn test_parse_private_with_counts_succeeds() {
        let body = r#"{"data":{"user":{
            "id": "5", "username": "locked", "is_private": true,
            "edge_followed_by": {"count": 1}, "edge_follow": {"count": 2},
            "edge_owner_to_timeline_media": {"count": 3}
        }}}"#;
        let profile = parse_profile_response("locked", 200, body).expect("parses");
        assert!(profile.is_private);
        assert_eq!(profile.profile_pic_url, None);
    }

    #[test]
    fn test_parse_api_errors() {
        let err = parse_profile_response("jack", 429, r#"{"message":"Please wait a few minutes"}"#)
            .expect_err("should fail");
        assert!(matches!(err, ScrapeError::ApiError { status: 429, .. }));
        assert!(err.to_string().contains("Please wait"));

        let err = parse_profile_response("jack", 502, "<html><body>Bad gateway</body></html>")
            .expect_err("should fail");
        assert!(err.to_string().contains("HTML error page"));
        assert!(!err.to_string().contains("<body>"));
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_profile_response("jack", 200, "not json").expect_err("should fail");
        assert!(matches!(err, ScrapeError::MalformedResponse(_)));

        let body = r#"{"data":{"user":{
            "id": "abc", "username": "jack",
            "edge_followed_by": {"count": 1}, "edge_follow": {"count": 2},
            "edge_owner_to_timeline_media": {"count": 3}
        }}}"#;
        let err = parse_profile_response("jack", 200, body).expect_err("should fail");
        assert!(err.to_string().contains("non-numeric user id"));
    }

    #[tokio::test]
    async fn test_empty_username_rejected_without_request() {
        let settings = LookupSettings {
            // Unroutable; a request would fail with a network error instead
            instagram_api_base: "http://127.0.0.1:9".to_string(),
            ..LookupSettings::default()
        };
        let client = InstagramClient::new(&settings);
        let err = client.fetch_profile("").await.expect_err("should fail");
        assert!(matches!(err, ScrapeError::InvalidUsername(_)));
    }

    /// Answers a single request with `status_line` and `body`, returning the
    /// lowercased request head once the exchange is done.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.expect("read request");
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\n\
                 content-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&head).to_lowercase()
        });

        (base_url, server)
    }

    fn client_for(base_url: String) -> InstagramClient {
        InstagramClient::new(&LookupSettings {
            instagram_api_base: base_url,
            ..LookupSettings::default()
        })
    }

    #[tokio::test]
    async fn test_fetch_sends_username_and_app_id() {
        let (base_url, server) = serve_once("200 OK", PUBLIC_PROFILE).await;

        let profile = client_for(base_url)
            .fetch_profile("jack")
            .await
            .expect("profile fetched");
        assert_eq!(profile.username, "jack");
        assert_eq!(profile.followers, 1_234_567);

        let head = server.await.expect("server task");
        assert!(
            head.starts_with("get /api/v1/users/web_profile_info/?username=jack http/1.1\r\n"),
            "unexpected request line: {head}"
        );
        let app_id = LookupSettings::default().instagram_app_id;
        assert!(head.contains(&format!("\r\nx-ig-app-id: {app_id}\r\n")));
        assert!(head.contains("\r\naccept: application/json\r\n"));
        assert!(head.contains("\r\nuser-agent: "));
    }

    #[tokio::test]
    async fn test_fetch_maps_http_status() {
        let (base_url, server) = serve_once("404 Not Found", r#"{"status":"fail"}"#).await;
        let err = client_for(base_url)
            .fetch_profile("ghost")
            .await
            .expect_err("should fail");
        assert!(matches!(err, ScrapeError::NotExists(ref u) if u == "ghost"));
        server.await.expect("server task");

        let (base_url, server) = serve_once(
            "429 Too Many Requests",
            r#"{"message":"Please wait a few minutes","status":"fail"}"#,
        )
        .await;
        let err = client_for(base_url)
            .fetch_profile("jack")
            .await
            .expect_err("should fail");
        assert!(matches!(err, ScrapeError::ApiError { status: 429, .. }));
        assert!(err.to_string().contains("Please wait"));
        server.await.expect("server task");
    }
}
