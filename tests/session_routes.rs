use axum::http::{header, StatusCode};
use chrono::Utc;
use serde_json::{json, Value};

use lingo_portal::config::{
    BackendConfiguration, Configuration, OAuthConfiguration, ProviderCredentials,
    ServerConfiguration, SessionConfiguration,
};
use lingo_portal::handlers::SESSION_COOKIE;
use lingo_portal::models::{CanonicalIdentity, SessionClaims};
use lingo_portal::services::SessionSigner;
use lingo_portal::{router, AppState};

const SESSION_SECRET: &str = "integration-test-secret";

fn test_configuration() -> Configuration {
    Configuration {
        server: ServerConfiguration {
            host: "127.0.0.1".to_string(),
            port: 0,
            public_url: "http://localhost:3000".to_string(),
            login_ttl_seconds: 600,
        },
        backend: BackendConfiguration {
            url: "http://localhost:8080".to_string(),
        },
        session: SessionConfiguration {
            secret: SESSION_SECRET.to_string(),
            ttl_seconds: 3600,
        },
        oauth: OAuthConfiguration {
            google: ProviderCredentials {
                client_id: "google-id".to_string(),
                client_secret: "google-secret".to_string(),
                scopes: vec![],
            },
            naver: ProviderCredentials {
                client_id: "naver-id".to_string(),
                client_secret: "naver-secret".to_string(),
                scopes: vec![],
            },
        },
    }
}

async fn serve_portal() -> String {
    let state = AppState::from_configuration(&test_configuration()).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn mint_session_token() -> String {
    let signer = SessionSigner::new(SESSION_SECRET.as_bytes(), 3600);
    let identity = CanonicalIdentity {
        id: "42".to_string(),
        name: Some("Kim".to_string()),
        email: Some("k@x.com".to_string()),
        image: Some("http://img".to_string()),
        provider: "naver".to_string(),
    };
    let claims = SessionClaims::issue(
        &identity,
        "provider-access-token",
        json!({"response": {"id": "42"}}),
        Utc::now(),
        3600,
    );
    signer.issue(&claims).unwrap()
}

#[tokio::test]
async fn session_without_cookie_is_anonymous() {
    let portal_url = serve_portal().await;

    let body: Value = reqwest::get(format!("{}/auth/session", portal_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["user"], Value::Null);
}

#[tokio::test]
async fn session_with_valid_cookie_returns_the_identity() {
    let portal_url = serve_portal().await;
    let token = mint_session_token();

    let response = no_redirect_client()
        .get(format!("{}/auth/session", portal_url))
        .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // a renewed cookie rides on every successful read
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with(&format!("{}=", SESSION_COOKIE)));
    assert!(set_cookie.contains("HttpOnly"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["id"], "42");
    assert_eq!(body["user"]["name"], "Kim");
    assert_eq!(body["user"]["email"], "k@x.com");
    assert_eq!(body["user"]["image"], "http://img");
    assert_eq!(body["user"]["provider"], "naver");
    assert!(body["expires"].is_string());
}

#[tokio::test]
async fn session_with_garbage_cookie_is_anonymous() {
    let portal_url = serve_portal().await;

    let response = no_redirect_client()
        .get(format!("{}/auth/session", portal_url))
        .header(header::COOKIE, format!("{}=garbage", SESSION_COOKIE))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // the dead cookie is dropped
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("Max-Age=0"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"], Value::Null);
}

#[tokio::test]
async fn signout_clears_the_session() {
    let portal_url = serve_portal().await;
    let token = mint_session_token();
    let client = no_redirect_client();

    let response = client
        .post(format!("{}/auth/signout", portal_url))
        .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with(&format!("{}=", SESSION_COOKIE)));
    assert!(set_cookie.contains("Max-Age=0"));

    // a read after the browser honors the removal is anonymous again
    let body: Value = client
        .get(format!("{}/auth/session", portal_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["user"], Value::Null);
}

#[tokio::test]
async fn signin_redirects_to_the_provider() {
    let portal_url = serve_portal().await;

    let response = no_redirect_client()
        .get(format!("{}/auth/signin/google", portal_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.starts_with("https://accounts.google.com/o/oauth2/v2/auth"));
    assert!(location.contains("client_id=google-id"));
    assert!(location.contains("state="));
}

#[tokio::test]
async fn signin_with_unknown_provider_is_404() {
    let portal_url = serve_portal().await;

    let response = no_redirect_client()
        .get(format!("{}/auth/signin/github", portal_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn callback_with_unknown_state_is_rejected() {
    let portal_url = serve_portal().await;

    let response = no_redirect_client()
        .get(format!(
            "{}/auth/callback/google?code=abc&state=never-issued",
            portal_url
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    // no session cookie is issued on a failed callback
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn provider_declined_callback_redirects_to_login() {
    let portal_url = serve_portal().await;
    let client = no_redirect_client();

    // start a real sign-in to obtain a live state token
    let signin = client
        .get(format!("{}/auth/signin/naver", portal_url))
        .send()
        .await
        .unwrap();
    let location = signin
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    let state = url::Url::parse(location)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap();

    let response = client
        .get(format!(
            "{}/auth/callback/naver?error=access_denied&state={}",
            portal_url, state
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login?error=access_denied"
    );
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}
