#![allow(dead_code)]

use std::{
    io::{
        BufRead,
        BufReader,
        Read,
        Write,
    },
    net::{
        TcpListener,
        TcpStream,
    },
    sync::{
        Arc,
        Mutex,
    },
    thread,
};
use url::Url;

pub const DISABLE_LOGINS_PAGE: &str = include_str!("../fixtures/disable_logins.html");
pub const LOGIN_PAGE: &str = include_str!("../fixtures/login.html");

pub const SESSION_COOKIE: &str = "JSESSIONID=stub-session-1";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub cookie: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl StubResponse {
    pub fn ok(body: impl ToString) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// A minimal HTTP/1.1 server standing in for the Server Manager console.
///
/// Every connection serves exactly one request and is closed afterwards.
pub struct ConsoleStub {
    url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ConsoleStub {
    pub fn start(handler: impl Fn(&RecordedRequest) -> StubResponse + Send + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = Url::parse(&format!("http://{}/manage", listener.local_addr().unwrap())).unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else {
                    break;
                };
                let Some(request) = read_request(&stream) else {
                    continue;
                };
                recorded.lock().unwrap().push(request.clone());
                write_response(stream, handler(&request));
            }
        });

        Self { url, requests }
    }

    /// Behaves like a console that accepts the login and serves the fixture page.
    pub fn healthy() -> Self {
        Self::start(|request| match request.target.as_str() {
            "/manage/home" => StubResponse::ok("<html>Server Manager</html>")
                .with_header("Set-Cookie", &format!("{SESSION_COOKIE}; Path=/manage")),
            "/manage/j_security_check" => StubResponse::ok("<html>Welcome</html>"),
            "/manage/target?targetType=webserver&action=disableLogins" => StubResponse::ok(DISABLE_LOGINS_PAGE),
            "/manage/logon?action=logout" => StubResponse::ok("<html>Signed out</html>"),
            _ => StubResponse::status(404),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn targets(&self) -> Vec<String> {
        self.requests().into_iter().map(|request| request.target).collect()
    }
}

/// A console url nothing is listening on.
pub fn unreachable_url() -> Url {
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    Url::parse(&format!("http://127.0.0.1:{port}/manage")).unwrap()
}

fn read_request(stream: &TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut content_length = 0;
    let mut cookie = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().ok()?,
                "cookie" => cookie = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        target,
        cookie,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn write_response(mut stream: TcpStream, response: StubResponse) {
    let mut head = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        response.body.len()
    );
    for (name, value) in &response.headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("\r\n");

    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
    let _ = stream.flush();
}
