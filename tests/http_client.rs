mod common;

use common::{dead_url, serve_once};
use emoji_core::error::RemoteError;
use emoji_core::remote::{reassemble, HttpTranslator, Translation, TranslationRequest, Translator};
use emoji_core::{Config, Mode, Style};

fn translator(url: &str) -> HttpTranslator {
    let config = Config {
        api_url: url.to_string(),
        timeout_ms: 5_000,
        ..Config::default()
    };
    HttpTranslator::new(&config).unwrap()
}

#[test]
fn buffered_translation_posts_json() {
    let (url, server) = serve_once(
        "200 OK",
        "application/json",
        r#"{"success":true,"translatedText":"🍕❤️","mode":"emojify","style":"standard"}"#,
    );
    let request = TranslationRequest::new("I love pizza", Mode::Emojify, Style::Standard, 1000);
    let text = translator(&url).fetch(&request).unwrap();
    assert_eq!(text, "🍕❤️");

    let seen = server.join().unwrap();
    assert!(seen.starts_with("POST / "), "{seen}");
    assert!(seen.contains(r#""text":"I love pizza""#));
    assert!(seen.contains(r#""mode":"emojify""#));
    assert!(seen.contains(r#""style":"standard""#));
    assert!(seen.contains(r#""instruction":"Your task is to take the plain text message"#));
}

#[test]
fn client_error_carries_server_message() {
    let (url, server) = serve_once(
        "400 Bad Request",
        "application/json",
        r#"{"success":false,"error":"No text provided"}"#,
    );
    let request = TranslationRequest::new("x", Mode::Combo, Style::Minimal, 1000);
    let err = translator(&url).fetch(&request).unwrap_err();
    server.join().unwrap();
    match &err {
        RemoteError::Status { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "No text provided");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "API error: 400 - No text provided");
}

#[test]
fn plain_text_error_body_is_used_verbatim() {
    let (url, server) = serve_once("500 Internal Server Error", "text/plain", "model overloaded");
    let request = TranslationRequest::new("x", Mode::Combo, Style::Minimal, 1000);
    let err = translator(&url).fetch(&request).unwrap_err();
    server.join().unwrap();
    assert_eq!(err.to_string(), "API error: 500 - model overloaded");
}

#[test]
fn success_false_in_ok_response_is_rejected() {
    let (url, server) = serve_once(
        "200 OK",
        "application/json",
        r#"{"success":false,"error":"Error processing with AI: busy"}"#,
    );
    let request = TranslationRequest::new("x", Mode::Emojify, Style::Standard, 1000);
    let err = translator(&url).fetch(&request).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, RemoteError::Rejected(ref m) if m == "Error processing with AI: busy"));
}

#[test]
fn long_input_is_cut_before_sending() {
    let (url, server) = serve_once("200 OK", "application/json", r#"{"success":true,"translatedText":"ok"}"#);
    let long = "a".repeat(1500);
    let request = TranslationRequest::new(&long, Mode::Emojify, Style::Standard, 1000);
    translator(&url).fetch(&request).unwrap();
    let seen = server.join().unwrap();
    assert!(seen.contains(&"a".repeat(1000)));
    assert!(!seen.contains(&"a".repeat(1001)));
}

#[test]
fn streaming_uses_get_and_event_stream() {
    let body = "data: {\"response\":\"Hi\"}\n\ndata: {\"response\":\" there\"}\n\n";
    let (url, server) = serve_once("200 OK", "text/event-stream", body);
    let request = TranslationRequest::new("hello there", Mode::Combo, Style::Expressive, 1000);
    let Translation::Stream(stream) = translator(&url).translate(&request, true).unwrap() else {
        panic!("expected a stream");
    };
    let mut fragments = Vec::new();
    let text = reassemble(stream, |f| fragments.push(f.to_string())).unwrap();
    assert_eq!(text, "Hi there");
    assert_eq!(fragments, vec!["Hi", " there"]);

    let seen = server.join().unwrap();
    assert!(seen.starts_with("GET /?text=hello+there"), "{seen}");
    assert!(seen.contains("mode=emoji-combo"));
    assert!(seen.contains("style=expressive"));
    assert!(seen.contains("stream=true"));
    assert!(seen.to_ascii_lowercase().contains("accept: text/event-stream"));
}

#[test]
fn failed_stream_open_is_an_error() {
    let (url, server) = serve_once("503 Service Unavailable", "text/plain", "");
    let request = TranslationRequest::new("hi", Mode::Emojify, Style::Standard, 1000);
    let err = translator(&url).open_stream(&request).err().unwrap();
    server.join().unwrap();
    assert_eq!(err.to_string(), "API error: 503 - Unknown error");
}

#[test]
fn unreachable_endpoint_is_transport_error() {
    let request = TranslationRequest::new("hi", Mode::Emojify, Style::Standard, 1000);
    let err = translator(&dead_url()).fetch(&request).unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)));
}

#[test]
fn recommendation_sends_query_without_mode() {
    let (url, server) = serve_once("200 OK", "text/event-stream", "data: {\"response\":\"🍕 ❤️ 😋 🇮🇹 🍽️\"}\n\n");
    let long = "b".repeat(150);
    let stream = translator(&url).recommend(&long).unwrap();
    let text = reassemble(stream, |_| {}).unwrap();
    assert_eq!(text.split(' ').count(), 5);

    let seen = server.join().unwrap();
    let request_line = seen.lines().next().unwrap();
    assert!(request_line.contains(&format!("query={}", "b".repeat(100))));
    assert!(!request_line.contains(&"b".repeat(101)));
    assert!(!request_line.contains("mode="));
}
