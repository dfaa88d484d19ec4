// Serves the static test site under tests/testsite from a wiremock server.

use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const TESTSITE_PAGES: [(&str, &str); 6] = [
    ("index.html", include_str!("../testsite/index.html")),
    ("about.html", include_str!("../testsite/about.html")),
    ("homeware.html", include_str!("../testsite/homeware.html")),
    ("garden.html", include_str!("../testsite/garden.html")),
    ("tools.html", include_str!("../testsite/tools.html")),
    ("exercise.html", include_str!("../testsite/exercise.html")),
];

/// Start a server hosting the test site. Every page, the catalogue PDF and the missing
/// contact page must each be requested exactly once before the server is dropped.
pub async fn start_testsite() -> MockServer {
    let mock_server = MockServer::start().await;

    for (name, body) in TESTSITE_PAGES {
        Mock::given(method("GET"))
            .and(path(format!("/{}", name)))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string(body),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/catalogue.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.4 catalogue".to_vec()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contact.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    mock_server
}

/// Base URL of the server with a trailing slash.
pub fn base_url(mock_server: &MockServer) -> String {
    format!("{}/", mock_server.uri())
}
