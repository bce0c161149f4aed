//! Integration tests for SMS service functionality

use std::sync::Arc;

use sb_core::services::otp::SmsServiceTrait;
use sb_infra::sms::{
    create_sms_service, ConsoleSmsService, HttpSmsConfig, HttpSmsService, SmsService,
    SmsServiceAdapter,
};
use sb_infra::InfrastructureError;
use sb_shared::config::SmsConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Serves one canned HTTP response per connection and forwards each raw request
async fn spawn_gateway(responses: Vec<&'static str>) -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            tx.send(request).unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
    });

    (format!("http://{}/send", addr), rx)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let lower = line.to_ascii_lowercase();
                    lower
                        .strip_prefix("content-length:")
                        .and_then(|v| v.trim().parse::<usize>().ok())
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                return text;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn http_config(url: &str) -> HttpSmsConfig {
    HttpSmsConfig {
        gateway_url: url.to_string(),
        api_key: "secret-key".to_string(),
        sender_id: "SPRTBR".to_string(),
        request_timeout_secs: 5,
        max_retries: 3,
        retry_delay_ms: 1,
    }
}

const OK_WITH_ID: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 23\r\nConnection: close\r\n\r\n{\"messageId\":\"msg-123\"}";
const OK_EMPTY: &str = "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
const SERVER_ERROR: &str = "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

#[tokio::test]
async fn test_console_workflow() {
    let service = create_sms_service(&SmsConfig::default());
    assert_eq!(service.provider_name(), "Console");

    let result = service.send_verification_code("+919876543210", "123456", 10).await;
    assert!(result.unwrap().starts_with("console_"));
    assert!(service.is_available().await);
}

#[tokio::test]
async fn test_provider_aliases_and_fallback() {
    for provider in ["console", "mock", "LOG", "carrier-pigeon"] {
        let config = SmsConfig {
            provider: provider.to_string(),
            ..Default::default()
        };
        assert_eq!(create_sms_service(&config).provider_name(), "Console");
    }

    // HTTP without a gateway falls back to the console
    let config = SmsConfig {
        provider: "http".to_string(),
        ..Default::default()
    };
    assert_eq!(create_sms_service(&config).provider_name(), "Console");

    let config = SmsConfig {
        provider: "http".to_string(),
        gateway_url: Some("https://sms.example.com/send".to_string()),
        ..Default::default()
    };
    assert_eq!(create_sms_service(&config).provider_name(), "Http");
}

#[tokio::test]
async fn test_console_counter_and_failure() {
    let service = ConsoleSmsService::new();
    for i in 1..=3 {
        service
            .send_sms("+15550001234", &format!("Message {}", i))
            .await
            .unwrap();
        assert_eq!(service.get_message_count(), i);
    }
    service.reset_counter();
    assert_eq!(service.get_message_count(), 0);

    service.set_simulate_failure(true);
    assert!(!service.is_available().await);
    assert!(matches!(
        service.send_sms("+15550001234", "hello").await,
        Err(InfrastructureError::Sms(_))
    ));
    assert_eq!(service.get_message_count(), 0);
}

#[tokio::test]
async fn test_http_posts_json_with_bearer_key() {
    let (url, mut requests) = spawn_gateway(vec![OK_WITH_ID]).await;
    let service = HttpSmsService::new(http_config(&url)).unwrap();

    let message_id = service
        .send_verification_code("+919876543210", "042042", 3)
        .await
        .unwrap();
    assert_eq!(message_id, "msg-123");

    let request = requests.recv().await.unwrap();
    assert!(request.starts_with("POST /send HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer secret-key"));
    assert!(request.contains("\"to\":\"+919876543210\""));
    assert!(request.contains("\"from\":\"SPRTBR\""));
    assert!(request.contains("Your SportsBridge verification code is: 042042."));
    assert!(request.contains("expire in 3 minutes"));
}

#[tokio::test]
async fn test_http_generates_id_when_gateway_sends_none() {
    let (url, _requests) = spawn_gateway(vec![OK_EMPTY]).await;
    let service = HttpSmsService::new(http_config(&url)).unwrap();

    let message_id = service.send_sms("+15550001234", "hello").await.unwrap();
    assert!(message_id.starts_with("http_"));
}

#[tokio::test]
async fn test_http_retries_server_errors() {
    let (url, mut requests) = spawn_gateway(vec![SERVER_ERROR, SERVER_ERROR, OK_WITH_ID]).await;
    let service = HttpSmsService::new(http_config(&url)).unwrap();

    let message_id = service.send_sms("+15550001234", "hello").await.unwrap();
    assert_eq!(message_id, "msg-123");

    for _ in 0..3 {
        assert!(requests.recv().await.is_some());
    }
}

#[tokio::test]
async fn test_http_gives_up_after_max_retries() {
    let (url, _requests) = spawn_gateway(vec![SERVER_ERROR, SERVER_ERROR, SERVER_ERROR]).await;
    let service = HttpSmsService::new(http_config(&url)).unwrap();

    let err = service.send_sms("+15550001234", "hello").await.unwrap_err();
    match err {
        InfrastructureError::Sms(msg) => assert!(msg.contains("after 3 attempts")),
        other => panic!("Expected Sms error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_client_error_is_not_retried() {
    let (url, mut requests) = spawn_gateway(vec![BAD_REQUEST]).await;
    let service = HttpSmsService::new(http_config(&url)).unwrap();

    let err = service.send_sms("+15550001234", "hello").await.unwrap_err();
    match err {
        InfrastructureError::Sms(msg) => assert!(msg.contains("400")),
        other => panic!("Expected Sms error, got {:?}", other),
    }
    assert!(requests.recv().await.is_some());
    assert!(requests.recv().await.is_none());
}

#[tokio::test]
async fn test_adapter_maps_errors_to_strings() {
    let console = Arc::new(ConsoleSmsService::new());
    let adapter = SmsServiceAdapter::new(console.clone());
    assert_eq!(adapter.provider_name(), "Console");

    assert!(adapter
        .send_verification_code("+15550001234", "123456")
        .await
        .is_ok());
    assert_eq!(console.get_message_count(), 1);

    console.set_simulate_failure(true);
    let err = adapter
        .send_verification_code("+15550001234", "123456")
        .await
        .unwrap_err();
    assert!(err.contains("Simulated SMS failure"));
}

#[tokio::test]
async fn test_adapter_quotes_configured_code_lifetime() {
    let (url, mut requests) = spawn_gateway(vec![OK_WITH_ID]).await;
    let http: Arc<dyn SmsService> = Arc::new(HttpSmsService::new(http_config(&url)).unwrap());
    let adapter = SmsServiceAdapter::new(http).with_code_ttl_minutes(2);
    assert_eq!(adapter.code_ttl_minutes(), 2);

    adapter
        .send_verification_code("+919876543210", "314159")
        .await
        .unwrap();

    let request = requests.recv().await.unwrap();
    assert!(request.contains("Your SportsBridge verification code is: 314159."));
    assert!(request.contains("expire in 2 minutes"));
    assert!(!request.contains("10 minutes"));
}

#[tokio::test]
async fn test_adapter_over_trait_object() {
    let adapter: SmsServiceAdapter = SmsServiceAdapter::new(create_sms_service(&SmsConfig::default()));
    assert!(adapter.is_available().await);
    assert!(adapter
        .send_verification_code("+15550001234", "123456")
        .await
        .is_ok());
}
