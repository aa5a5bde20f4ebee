#![allow(dead_code)]

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use policy_aggregator::{AppConfig, FeedSourceConfig, FetchConfig};
use std::net::SocketAddr;
use std::sync::Once;
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const TEST_API_KEY: &str = "test-key-123";

pub const DIP_JSON: &str = r#"{
  "numFound": 3,
  "documents": [
    {
      "id": "311234",
      "titel": "Entwurf eines Gesetzes zur Stärkung von Wachstumschancen, Investitionen und Innovation sowie Steuervereinfachung und Steuerfairness (Wachstumschancengesetz)",
      "abstract": "Steuerliche Maßnahmen zur Stärkung der Liquidität.",
      "vorgangstyp": "Gesetzgebung",
      "sachgebiet": ["Öffentliche Finanzen, Steuern und Abgaben", "Wirtschaft"],
      "beratungsstand": "Verkündet",
      "datum": "2024-03-27",
      "aktualisiert": "2024-04-02T10:15:00+02:00"
    },
    {
      "id": "312000",
      "titel": "Entwurf eines Gesetzes zur Änderung des Bundeswehrbeschaffungsbeschleunigungsgesetzes",
      "vorgangstyp": "Gesetzgebung",
      "sachgebiet": [],
      "aktueller_stand": "Dem Bundesrat zugeleitet - Noch nicht beraten",
      "datum": "2024-05-10"
    },
    {
      "id": "313500",
      "titel": "Verordnung über Pflegemindestlöhne",
      "abstract": "",
      "vorgangstyp": "Verordnung",
      "sachgebiet": ["Gesundheit"],
      "datum": "not-a-date"
    }
  ]
}"#;

pub const GOVERNMENT_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Pressemitteilungen der Bundesregierung</title>
    <link>https://www.bundesregierung.de</link>
    <description>Aktuelle Pressemitteilungen</description>
    <item>
      <title>Kabinett beschließt Klimaschutzprogramm</title>
      <link>https://www.bundesregierung.de/breg-de/aktuelles/klima-1</link>
      <description>&lt;p&gt;Das Bundeskabinett hat heute das &lt;b&gt;Klimaschutzprogramm&lt;/b&gt; beschlossen.&lt;/p&gt;</description>
      <pubDate>Tue, 14 May 2024 12:30:00 +0200</pubDate>
    </item>
    <item>
      <title>Digitalstrategie vorgestellt</title>
      <link>https://www.bundesregierung.de/breg-de/aktuelles/digital-2</link>
      <description>Die Bundesregierung stellt ihre Digitalstrategie vor.</description>
      <pubDate>Mon, 13 May 2024 08:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

pub const COURT_RDF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns="http://purl.org/rss/1.0/" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel rdf:about="https://www.bundesverfassungsgericht.de/">
    <title>Bundesverfassungsgericht - Pressemitteilungen</title>
    <link>https://www.bundesverfassungsgericht.de/</link>
    <description>Pressemitteilungen</description>
  </channel>
  <item rdf:about="https://www.bundesverfassungsgericht.de/pm-45">
    <title>Wahlrechtsreform teilweise verfassungswidrig</title>
    <link>https://www.bundesverfassungsgericht.de/pm-45</link>
    <description>Der Zweite Senat hat entschieden, dass die Grundmandatsklausel fortgilt.</description>
    <dc:date>2024-07-30T10:00:00+02:00</dc:date>
  </item>
</rdf:RDF>"#;

/// A 150-character title without any bracketed short name.
pub fn long_title() -> String {
    let title = "Entwurf eines Gesetzes zur Modernisierung und Vereinfachung der Verwaltungsverfahren in Bund und Ländern sowie zur Anpassung weiterer Vorschriften ..";
    let mut title = title.to_string();
    while title.chars().count() < 150 {
        title.push('.');
    }
    title.chars().take(150).collect()
}

/// Press servers reject clients that do not look like a browser.
pub fn browser_only(headers: &HeaderMap, body: &'static str) -> axum::response::Response {
    let is_browser = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|ua| ua.starts_with("Mozilla/"))
        .unwrap_or(false);

    if is_browser {
        ([(axum::http::header::CONTENT_TYPE, "application/rss+xml")], body).into_response()
    } else {
        StatusCode::FORBIDDEN.into_response()
    }
}

/// DIP stand-in that insists on the `ApiKey` header.
pub async fn dip_handler(headers: HeaderMap) -> axum::response::Response {
    let authorized = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("ApiKey {}", TEST_API_KEY))
        .unwrap_or(false);

    if authorized {
        ([(axum::http::header::CONTENT_TYPE, "application/json")], DIP_JSON).into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

/// Serves the three healthy upstreams plus a few broken ones.
pub fn upstream_router() -> Router {
    Router::new()
        .route("/api/v1/vorgang", get(dip_handler))
        .route("/breg.xml", get(|headers: HeaderMap| async move { browser_only(&headers, GOVERNMENT_RSS) }))
        .route("/bverfg.xml", get(|headers: HeaderMap| async move { browser_only(&headers, COURT_RDF) }))
        .route("/unavailable.xml", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .route("/garbage.json", get(|| async { "{ this is not json" }))
        .route("/html.xml", get(|| async { "<html><body>Wartungsarbeiten</body></html>" }))
}

/// Bind `router` on an ephemeral local port and return its address.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test upstream crashed");
    });
    addr
}

/// Config pointing every source at the fake upstream.
pub fn test_config(addr: SocketAddr, api_key: Option<&str>) -> AppConfig {
    let base = format!("http://{}", addr);
    let mut config = AppConfig::default();
    config.dip.base_url = format!("{}/api/v1/vorgang", base);
    config.dip.api_key = api_key.map(str::to_string);
    config.government = FeedSourceConfig::new(format!("{}/breg.xml", base));
    config.court = FeedSourceConfig::new(format!("{}/bverfg.xml", base));
    config.fetch = FetchConfig {
        timeout_seconds: 5,
        ..FetchConfig::default()
    };
    config
}
