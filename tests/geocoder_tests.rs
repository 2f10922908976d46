// tests/geocoder_tests.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use geoquiz::{
    location::geocoder::{CountryResolver, GeocodeError, GeocoderConfig, NominatimResolver},
    models::coordinate::Coordinate,
};

/// What the fake geocoder answers with.
#[derive(Clone)]
enum Reply {
    Json(&'static str),
    Status(StatusCode),
}

/// What the fake geocoder saw.
#[derive(Default)]
struct Seen {
    query: HashMap<String, String>,
    user_agent: Option<String>,
}

#[derive(Clone)]
struct FakeState {
    reply: Reply,
    seen: Arc<Mutex<Seen>>,
}

async fn reverse(
    State(state): State<FakeState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    {
        let mut seen = state.seen.lock().unwrap();
        seen.query = query;
        seen.user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
    }

    match state.reply {
        Reply::Json(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Reply::Status(status) => status.into_response(),
    }
}

/// Spawns a fake Nominatim on a random port.
/// Returns its base URL and the record of the last request.
async fn spawn_geocoder(reply: Reply) -> (String, Arc<Mutex<Seen>>) {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let app = Router::new().route("/reverse", get(reverse)).with_state(FakeState {
        reply,
        seen: seen.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, seen)
}

fn resolver(base_url: &str) -> NominatimResolver {
    NominatimResolver::new(GeocoderConfig {
        base_url: base_url.to_string(),
        user_agent: "geoquiz-tests/1.0".to_string(),
        language: Some("pt-BR".to_string()),
    })
    .expect("Failed to build resolver")
}

fn brasilia() -> Coordinate {
    Coordinate::new(-15.7801, -47.9292)
}

#[tokio::test]
async fn extracts_country_and_identifies_client() {
    let (address, seen) = spawn_geocoder(Reply::Json(
        r#"{"place_id": 1, "address": {"city": "Brasília", "country": "Brasil", "country_code": "br"}}"#,
    ))
    .await;

    let country = resolver(&address).resolve_country(brasilia()).await;
    assert_eq!(country.as_deref(), Some("Brasil"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.query.get("lat").map(String::as_str), Some("-15.7801"));
    assert_eq!(seen.query.get("lon").map(String::as_str), Some("-47.9292"));
    assert_eq!(seen.query.get("format").map(String::as_str), Some("json"));
    assert_eq!(
        seen.query.get("accept-language").map(String::as_str),
        Some("pt-BR")
    );
    assert_eq!(seen.user_agent.as_deref(), Some("geoquiz-tests/1.0"));
}

#[tokio::test]
async fn missing_country_field_is_unknown() {
    let (address, _) = spawn_geocoder(Reply::Json(r#"{"address": {"city": "Nowhere"}}"#)).await;
    assert_eq!(resolver(&address).resolve_country(brasilia()).await, None);
}

#[tokio::test]
async fn missing_address_is_unknown() {
    // Nominatim answers 200 with an error object over open sea.
    let (address, _) = spawn_geocoder(Reply::Json(r#"{"error": "Unable to geocode"}"#)).await;

    let resolver = resolver(&address);
    assert_eq!(resolver.resolve_country(Coordinate::new(0.0, 0.0)).await, None);
    assert!(matches!(
        resolver.lookup(Coordinate::new(0.0, 0.0)).await,
        Ok(None)
    ));
}

#[tokio::test]
async fn empty_country_is_unknown() {
    let (address, _) = spawn_geocoder(Reply::Json(r#"{"address": {"country": ""}}"#)).await;
    assert_eq!(resolver(&address).resolve_country(brasilia()).await, None);
}

#[tokio::test]
async fn server_error_is_unknown() {
    let (address, _) = spawn_geocoder(Reply::Status(StatusCode::SERVICE_UNAVAILABLE)).await;

    let resolver = resolver(&address);
    assert_eq!(resolver.resolve_country(brasilia()).await, None);
    assert!(matches!(
        resolver.lookup(brasilia()).await,
        Err(GeocodeError::Status(status)) if status == StatusCode::SERVICE_UNAVAILABLE
    ));
}

#[tokio::test]
async fn malformed_body_is_unknown() {
    let (address, _) = spawn_geocoder(Reply::Json("<html>not json</html>")).await;

    let resolver = resolver(&address);
    assert_eq!(resolver.resolve_country(brasilia()).await, None);
    assert!(matches!(
        resolver.lookup(brasilia()).await,
        Err(GeocodeError::Body(_))
    ));
}

#[tokio::test]
async fn unreachable_service_is_unknown() {
    // Bind and drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let resolver = resolver(&format!("http://127.0.0.1:{}", port));
    assert_eq!(resolver.resolve_country(brasilia()).await, None);
    assert!(matches!(
        resolver.lookup(brasilia()).await,
        Err(GeocodeError::Request(_))
    ));
}
