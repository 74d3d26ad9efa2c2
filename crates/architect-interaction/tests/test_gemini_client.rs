use architect_core::prompt::{CreativityLevel, PromptGenerator, PromptStyle, SuperPromptRequest};
use architect_interaction::GeminiClient;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

struct CapturedRequest {
    head: String,
    body: Value,
}

/// Serves exactly one HTTP exchange and hands back what the client sent.
async fn serve_once(status: u16, response_body: String) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1beta/models", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buffer.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buffer.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            buffer.extend_from_slice(&chunk[..n]);
        }
        let body: Value =
            serde_json::from_slice(&buffer[header_end..header_end + content_length]).unwrap();

        let reply = format!(
            "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{response_body}",
            response_body.len()
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        CapturedRequest { head, body }
    });

    (base_url, handle)
}

fn text_response(text: &str) -> String {
    json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
        .to_string()
}

#[tokio::test]
async fn test_generate_super_prompt_round_trip() {
    let (base_url, server) = serve_once(200, text_response("[PERSONA]\nSales coach")).await;
    let client = GeminiClient::new("gemini-2.5-flash").with_base_url(base_url);

    let request = SuperPromptRequest {
        idea: "Write a cold-call script".into(),
        style: PromptStyle::SalesMarketing,
        creativity: CreativityLevel::High,
        attachments: vec![],
    };
    let prompt = client
        .generate_super_prompt("test-key", &request)
        .await
        .unwrap();
    assert_eq!(prompt, "[PERSONA]\nSales coach");

    let captured = server.await.unwrap();
    assert!(captured
        .head
        .starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent"));
    assert!(captured.head.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    assert!(!captured.head.contains("key=test-key"));
    assert_eq!(captured.body["generationConfig"]["temperature"], json!(0.9_f32));
    assert!(captured.body["systemInstruction"].is_object());
}

#[tokio::test]
async fn test_execute_prompt_uses_fallback_when_no_text() {
    let (base_url, server) =
        serve_once(200, json!({ "candidates": [{ "finishReason": "SAFETY" }] }).to_string()).await;
    let client = GeminiClient::new("gemini-2.5-flash").with_base_url(base_url);

    let result = client.execute_prompt("test-key", "[PERSONA]\n...").await.unwrap();
    assert_eq!(result, "No response generated.");

    let captured = server.await.unwrap();
    assert!(captured.body.get("systemInstruction").is_none());
}

#[tokio::test]
async fn test_http_error_is_service_error() {
    let body = json!({ "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" } });
    let (base_url, server) = serve_once(400, body.to_string()).await;
    let client = GeminiClient::new("gemini-2.5-flash").with_base_url(base_url);

    let err = client.execute_prompt("bad-key", "prompt").await.unwrap_err();
    assert!(err.is_service());
    assert!(err.to_string().contains("API key not valid"));
    assert!(!err.to_string().contains("bad-key"));
    server.await.unwrap();
}
