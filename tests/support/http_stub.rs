use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Serialize a canned HTTP/1.1 response that closes the connection.
pub fn http_response(status: &str, headers: &[&str], body: &[u8]) -> Vec<u8> {
    let mut out = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n",
        body.len()
    );
    for header in headers {
        out.push_str(header);
        out.push_str("\r\n");
    }
    out.push_str("\r\n");
    let mut bytes = out.into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

/// Answer one connection per entry in `responses`, in order.
///
/// Each request line (e.g. `GET /api/report/abc HTTP/1.1`) is sent on the
/// returned channel once its response has been written.
pub fn serve_sequence(responses: Vec<Vec<u8>>) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for response in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let head = read_request(&mut stream);
            let _ = stream.write_all(&response);
            let _ = stream.flush();
            let request_line = head.lines().next().unwrap_or_default().to_string();
            let _ = tx.send(request_line);
        }
    });
    (format!("http://{addr}"), rx)
}

fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 8192];
    let head_end = loop {
        let read = stream.read(&mut buf).unwrap_or(0);
        if read == 0 {
            break raw.len();
        }
        raw.extend_from_slice(&buf[..read]);
        if let Some(pos) = raw.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&raw[..head_end]).into_owned();
    let expected = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while raw.len() - head_end < expected {
        let read = stream.read(&mut buf).unwrap_or(0);
        if read == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..read]);
    }
    head
}
