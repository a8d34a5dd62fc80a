//! Minimal HTTP/1.1 server with canned routes for fetch integration tests.
//!
//! Each connection gets one response and is closed. Unknown paths get 404.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

/// How long `/slow` waits before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(3);

/// Number of body chunks `/trickle` sends after its title.
pub const TRICKLE_CHUNKS: usize = 8;
/// Pause before each `/trickle` chunk.
pub const TRICKLE_PAUSE: Duration = Duration::from_millis(150);

/// Starts the server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{}", port);
    let base_for_thread = base.clone();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let base = base_for_thread.clone();
            thread::spawn(move || handle(stream, &base));
        }
    });
    base
}

fn respond(stream: &mut TcpStream, status: &str, extra_headers: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
        status,
        body.len(),
        extra_headers,
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn handle(mut stream: TcpStream, base: &str) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (path, user_agent) = parse_request(request);

    match path {
        "/page" => respond(
            &mut stream,
            "200 OK",
            "",
            "<html><head><title>Plain Page</title></head><body>hi</body></html>",
        ),
        "/og" => respond(
            &mut stream,
            "200 OK",
            "",
            "<html><head><title>Fallback</title>\
             <meta property=\"og:title\" content=\"OG &amp; Friends\"></head></html>",
        ),
        "/no-title" => respond(&mut stream, "200 OK", "", "<html><body>no title</body></html>"),
        "/ua" => {
            let body = format!("<title>{}</title>", user_agent);
            respond(&mut stream, "200 OK", "", &body);
        }
        "/redirect" => respond(
            &mut stream,
            "302 Found",
            "Location: /page\r\n",
            "<title>Redirecting</title>",
        ),
        "/redirect-abs" => {
            let location = format!("Location: {}/og\r\n", base);
            respond(&mut stream, "301 Moved Permanently", &location, "moved");
        }
        "/double" => respond(
            &mut stream,
            "302 Found",
            "Location: /redirect\r\n",
            "<title>First Hop</title>",
        ),
        "/redirect-missing" => respond(
            &mut stream,
            "307 Temporary Redirect",
            "Location: missing\r\n",
            "",
        ),
        "/redirect-no-location" => respond(
            &mut stream,
            "302 Found",
            "",
            "<title>Nowhere To Go</title>",
        ),
        "/redirect-file" => respond(
            &mut stream,
            "302 Found",
            "Location: file:///etc/hostname\r\n",
            "",
        ),
        "/trickle" => trickle(&mut stream),
        "/server-error" => respond(&mut stream, "500 Internal Server Error", "", "oops"),
        "/slow" => {
            thread::sleep(SLOW_DELAY);
            respond(&mut stream, "200 OK", "", "<title>Too Late</title>");
        }
        _ => respond(&mut stream, "404 Not Found", "", "<title>Not Found</title>"),
    }
}

/// Streams a titled page slowly: the whole body takes longer than a short
/// timeout, but no single gap does.
fn trickle(stream: &mut TcpStream) {
    let chunk = "<!-- padding -->";
    let head = "<title>Slow But Steady</title>";
    let len = head.len() + chunk.len() * TRICKLE_CHUNKS;
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        len, head
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    let _ = stream.flush();
    for _ in 0..TRICKLE_CHUNKS {
        thread::sleep(TRICKLE_PAUSE);
        if stream.write_all(chunk.as_bytes()).is_err() {
            return;
        }
        let _ = stream.flush();
    }
}

/// Returns (path, user-agent) from the request head.
fn parse_request(request: &str) -> (&str, &str) {
    let mut path = "";
    let mut user_agent = "";
    for (i, line) in request.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if i == 0 {
            path = line.split_whitespace().nth(1).unwrap_or("");
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                user_agent = value.trim();
            }
        }
    }
    (path, user_agent)
}
