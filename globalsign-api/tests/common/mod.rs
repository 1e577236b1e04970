//! Shared test tools: a scripted SOAP stub server and assertion macros

#![allow(dead_code)]

use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex};

use globalsign_api::{
    CertificateApi, ClientConfig, Credentials, EndpointOverrides, Environment, GlobalSignClient,
    create_client,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const USERNAME: &str = "stub-user";
pub const PASSWORD: &str = "stub-pa55word";

/// Skip the test when environment variables are missing
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

// ============ SOAP fixtures ============

/// Wraps `inner` into `<{operation}Response><Response>` inside a SOAP envelope.
pub fn soap_response(operation: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><ns2:{operation}Response xmlns:ns2="http://stub.order.gasapiserver.esp.globalsign.com"><Response>{inner}</Response></ns2:{operation}Response></soap:Body></soap:Envelope>"#
    )
}

/// `OrderResponseHeader` with the given success code and `(code, message)` errors.
pub fn order_header(success_code: i32, errors: &[(&str, &str)]) -> String {
    format!(
        "<OrderResponseHeader><SuccessCode>{success_code}</SuccessCode>{}<Timestamp>2024-03-01T10:00:00.000+00:00</Timestamp></OrderResponseHeader>",
        error_list(errors)
    )
}

/// `QueryResponseHeader` with the given success code and `(code, message)` errors.
pub fn query_header(success_code: i32, errors: &[(&str, &str)]) -> String {
    format!(
        "<QueryResponseHeader><SuccessCode>{success_code}</SuccessCode>{}</QueryResponseHeader>",
        error_list(errors)
    )
}

fn error_list(errors: &[(&str, &str)]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|(code, message)| {
            format!("<Error><ErrorCode>{code}</ErrorCode><ErrorMessage>{message}</ErrorMessage></Error>")
        })
        .collect();
    format!("<Errors>{items}</Errors>")
}

/// A SOAP 1.1 fault document.
pub fn soap_fault(fault_code: &str, fault_string: &str) -> String {
    format!(
        r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><soap:Fault><faultcode>{fault_code}</faultcode><faultstring>{fault_string}</faultstring></soap:Fault></soap:Body></soap:Envelope>"#
    )
}

// ============ Stub server ============

/// One request received by the stub server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Local HTTP server answering each connection with the next scripted response.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Starts the server with `(status, body)` responses served in order.
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::new(Mutex::new(VecDeque::from(responses)));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                let queue = Arc::clone(&queue);
                tokio::spawn(async move {
                    serve(stream, &recorded, &queue).await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Client with every endpoint pointed at this server and reconnects disabled.
    pub fn client(&self) -> GlobalSignClient {
        GlobalSignClient::builder(Credentials::new(USERNAME, PASSWORD))
            .endpoints(EndpointOverrides::with_base_url(&self.base_url))
            .max_reconnects(0)
            .build()
            .unwrap()
    }
}

async fn serve(
    mut stream: TcpStream,
    recorded: &Mutex<Vec<RecordedRequest>>,
    queue: &Mutex<VecDeque<(u16, String)>>,
) {
    let Some(request) = read_request(&mut stream).await else {
        return;
    };
    recorded.lock().unwrap().push(request);

    let (status, body) = queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((500, String::new()));
    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: text/xml; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next()?;
    let path = request_line.split_whitespace().nth(1)?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }

    let body = String::from_utf8_lossy(&buffer[header_end..]).into_owned();
    Some(RecordedRequest {
        path,
        headers,
        body,
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

// ============ Live sandbox ============

/// Sandbox client built from `GLOBALSIGN_USERNAME` / `GLOBALSIGN_PASSWORD`.
pub fn sandbox_client() -> Option<Arc<dyn CertificateApi>> {
    let username = env::var("GLOBALSIGN_USERNAME").ok()?;
    let password = env::var("GLOBALSIGN_PASSWORD").ok()?;
    let config = ClientConfig::new(Credentials::new(username, password), Environment::Sandbox);
    create_client(config).ok()
}
