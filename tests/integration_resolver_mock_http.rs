use std::collections::{HashMap, VecDeque};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::{Value, json};
use translation_runtime::core::types::{ProviderId, TranslationOrigin};
use translation_runtime::providers::anthropic::AnthropicAdapter;
use translation_runtime::providers::google_translate::GoogleTranslateAdapter;
use translation_runtime::providers::openai::OpenAiAdapter;
use translation_runtime::{TranslationResolver, TranslatorConfig};

#[derive(Debug, Clone)]
struct MockResponse {
    status_code: u16,
    body: String,
}

impl MockResponse {
    fn json(body: Value) -> Self {
        Self {
            status_code: 200,
            body: body.to_string(),
        }
    }

    fn status(status_code: u16, body: &str) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }
}

struct MockServer {
    addr: std::net::SocketAddr,
    captured_requests: Arc<Mutex<Vec<String>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockServer {
    /// Serves exactly one connection per queued response, then stops.
    fn start(responses: Vec<MockResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");

        let queue = Arc::new(Mutex::new(VecDeque::from(responses)));
        let captured_requests = Arc::new(Mutex::new(Vec::new()));
        let captured_clone = Arc::clone(&captured_requests);

        let handle = thread::spawn(move || {
            loop {
                let Some(response) = queue.lock().expect("queue lock").pop_front() else {
                    break;
                };

                let (mut stream, _) = listener.accept().expect("accept connection");
                stream
                    .set_read_timeout(Some(Duration::from_secs(3)))
                    .expect("set stream timeout");

                let request = read_http_request_with_body(&mut stream);
                captured_clone.lock().expect("capture lock").push(request);

                let response_text = build_http_response(response.status_code, &response.body);
                let _ = stream.write_all(response_text.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            addr,
            captured_requests,
            handle: Some(handle),
        }
    }

    fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn captured_request_paths(&self) -> Vec<String> {
        self.captured_requests
            .lock()
            .expect("capture lock")
            .iter()
            .map(|raw_request| {
                let request_line = raw_request.lines().next().unwrap_or_default();
                request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    fn captured_json_bodies(&self) -> Vec<Value> {
        self.captured_requests
            .lock()
            .expect("capture lock")
            .iter()
            .map(|raw_request| {
                let (_, body) = raw_request
                    .split_once("\r\n\r\n")
                    .expect("request has a body");
                serde_json::from_str(body).expect("request body is json")
            })
            .collect()
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("join mock server");
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn openai_success(text: &str) -> MockResponse {
    MockResponse::json(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }]
    }))
}

fn google_success(text: &str) -> MockResponse {
    MockResponse::json(json!({
        "data": { "translations": [{ "translatedText": text }] }
    }))
}

#[tokio::test]
async fn test_chain_falls_through_failed_and_unconfigured_providers() {
    let mut openai_server = MockServer::start(vec![MockResponse::status(
        500,
        r#"{"error":{"message":"server exploded","type":"server_error"}}"#,
    )]);
    let mut google_server = MockServer::start(vec![google_success("Hola amigos")]);

    let resolver = TranslationResolver::builder()
        .with_adapter(Arc::new(
            OpenAiAdapter::with_base_url(Some("sk-test".to_string()), openai_server.url())
                .expect("openai adapter"),
        ))
        .with_adapter(Arc::new(AnthropicAdapter::new(None).expect("anthropic adapter")))
        .with_adapter(Arc::new(
            GoogleTranslateAdapter::with_base_url(Some("AIza-test".to_string()), google_server.url())
                .expect("google adapter"),
        ))
        .build();

    let result = resolver
        .translate("Hello friends", "auto", "es")
        .await
        .expect("valid request");

    assert_eq!(result.translated_text, "Hola amigos");
    assert_eq!(
        result.origin,
        TranslationOrigin::Provider(ProviderId::GoogleTranslate)
    );

    openai_server.shutdown();
    google_server.shutdown();

    assert_eq!(
        openai_server.captured_request_paths(),
        vec!["/v1/chat/completions".to_string()]
    );
    assert_eq!(
        google_server.captured_request_paths(),
        vec!["/language/translate/v2".to_string()]
    );

    let openai_body = &openai_server.captured_json_bodies()[0];
    assert_eq!(openai_body["model"], "gpt-3.5-turbo");
    assert_eq!(openai_body["messages"][1]["content"], "Hello friends");

    let google_body = &google_server.captured_json_bodies()[0];
    assert_eq!(
        google_body,
        &json!({ "q": "Hello friends", "target": "es", "key": "AIza-test" })
    );
}

#[tokio::test]
async fn test_every_provider_failing_yields_placeholder() {
    let mut openai_server = MockServer::start(vec![MockResponse::status(
        401,
        r#"{"error":{"message":"bad key","type":"invalid_request_error","code":"invalid_api_key"}}"#,
    )]);
    let mut anthropic_server = MockServer::start(vec![MockResponse::status(
        529,
        r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
    )]);
    let mut google_server = MockServer::start(vec![MockResponse::status(200, "not json")]);

    let resolver = TranslationResolver::builder()
        .with_adapter(Arc::new(
            OpenAiAdapter::with_base_url(Some("sk-test".to_string()), openai_server.url())
                .expect("openai adapter"),
        ))
        .with_adapter(Arc::new(
            AnthropicAdapter::with_base_url(Some("sk-ant".to_string()), anthropic_server.url())
                .expect("anthropic adapter"),
        ))
        .with_adapter(Arc::new(
            GoogleTranslateAdapter::with_base_url(Some("AIza".to_string()), google_server.url())
                .expect("google adapter"),
        ))
        .build();

    let result = resolver
        .translate("Bonjour ca va", "auto", "es")
        .await
        .expect("valid request");

    assert_eq!(result.translated_text, "[ES] Bonjour ca va");
    assert_eq!(result.origin, TranslationOrigin::Placeholder);

    openai_server.shutdown();
    anthropic_server.shutdown();
    google_server.shutdown();

    assert_eq!(openai_server.captured_request_paths().len(), 1);
    assert_eq!(
        anthropic_server.captured_request_paths(),
        vec!["/v1/messages".to_string()]
    );
    assert_eq!(google_server.captured_request_paths().len(), 1);
}

#[tokio::test]
async fn test_phrase_table_hit_makes_no_requests() {
    let mut openai_server = MockServer::start(Vec::new());

    let resolver = TranslationResolver::builder()
        .with_adapter(Arc::new(
            OpenAiAdapter::with_base_url(Some("sk-test".to_string()), openai_server.url())
                .expect("openai adapter"),
        ))
        .build();

    let result = resolver
        .translate("Hello World", "auto", "fr")
        .await
        .expect("valid request");

    assert_eq!(result.translated_text, "Bonjour le Monde");
    assert_eq!(result.origin, TranslationOrigin::PhraseTable);

    openai_server.shutdown();
    assert!(openai_server.captured_request_paths().is_empty());
}

#[tokio::test]
async fn test_config_built_resolver_uses_configured_order_and_endpoints() {
    let mut google_server = MockServer::start(vec![google_success("Guten Tag")]);
    let mut openai_server = MockServer::start(Vec::new());

    let env: HashMap<&str, String> = HashMap::from([
        ("GOOGLE_TRANSLATE_API_KEY", "AIza-config".to_string()),
        ("GOOGLE_TRANSLATE_BASE_URL", google_server.url()),
        ("OPENAI_API_KEY", "sk-config".to_string()),
        ("OPENAI_BASE_URL", openai_server.url()),
        ("TRANSLATOR_PROVIDER_ORDER", "google-translate,openai".to_string()),
        ("TRANSLATOR_REQUEST_TIMEOUT_MS", "2000".to_string()),
    ]);
    let config = TranslatorConfig::from_lookup(|key| env.get(key).cloned()).expect("config");
    let resolver = config.build_resolver().expect("resolver");

    let result = resolver
        .translate("Good day", "en", "de")
        .await
        .expect("valid request");

    assert_eq!(result.translated_text, "Guten Tag");
    assert_eq!(
        result.origin,
        TranslationOrigin::Provider(ProviderId::GoogleTranslate)
    );

    google_server.shutdown();
    openai_server.shutdown();

    assert_eq!(
        google_server.captured_json_bodies(),
        vec![json!({ "q": "Good day", "source": "en", "target": "de", "key": "AIza-config" })]
    );
    assert!(openai_server.captured_request_paths().is_empty());
}

#[tokio::test]
async fn test_second_provider_answers_after_first_fails() {
    let mut openai_server = MockServer::start(vec![openai_success("   ")]);
    let mut anthropic_server = MockServer::start(vec![MockResponse::json(json!({
        "id": "msg_1",
        "type": "message",
        "role": "assistant",
        "content": [{ "type": "text", "text": "Buongiorno a tutti" }],
        "stop_reason": "end_turn"
    }))]);

    let resolver = TranslationResolver::builder()
        .with_adapter(Arc::new(
            OpenAiAdapter::with_base_url(Some("sk-test".to_string()), openai_server.url())
                .expect("openai adapter"),
        ))
        .with_adapter(Arc::new(
            AnthropicAdapter::with_base_url(Some("sk-ant".to_string()), anthropic_server.url())
                .expect("anthropic adapter"),
        ))
        .build();

    let result = resolver
        .translate("Good morning everyone", "auto", "it")
        .await
        .expect("valid request");

    assert_eq!(result.translated_text, "Buongiorno a tutti");
    assert_eq!(result.origin, TranslationOrigin::Provider(ProviderId::Anthropic));

    openai_server.shutdown();
    anthropic_server.shutdown();

    let anthropic_body = &anthropic_server.captured_json_bodies()[0];
    assert_eq!(anthropic_body["model"], "claude-3-sonnet-20240229");
    assert_eq!(
        anthropic_body["messages"][0]["content"],
        "Translate this text from auto to it. Only respond with the translation: \"Good morning everyone\""
    );
}

fn read_http_request_with_body(stream: &mut std::net::TcpStream) -> String {
    let mut request = Vec::new();
    let mut chunk = [0_u8; 1024];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(bytes_read) => {
                request.extend_from_slice(&chunk[..bytes_read]);

                if let Some(header_end) =
                    request.windows(4).position(|window| window == b"\r\n\r\n")
                {
                    let headers = String::from_utf8_lossy(&request[..header_end]).to_string();
                    let content_length = headers
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
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            Err(error)
                if error.kind() == std::io::ErrorKind::WouldBlock
                    || error.kind() == std::io::ErrorKind::TimedOut =>
            {
                break;
            }
            Err(error) => panic!("failed reading request: {error}"),
        }
    }

    String::from_utf8_lossy(&request).to_string()
}

fn build_http_response(status_code: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_code,
        status_reason(status_code),
        body.len(),
        body,
    )
}

fn status_reason(status_code: u16) -> &'static str {
    match status_code {
        200 => "OK",
        401 => "Unauthorized",
        500 => "Internal Server Error",
        529 => "Overloaded",
        _ => "Unknown",
    }
}
