use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

/// A request as seen by [`CaptureServer`].
#[derive(Debug, Clone)]
pub(super) struct CapturedRequest {
    pub(super) method: String,
    pub(super) path: String,
    pub(super) content_type: Option<String>,
    pub(super) body: Vec<u8>,
}

/// Minimal HTTP/1.1 server that records every request and answers with a fixed status.
pub(super) struct CaptureServer {
    pub(super) url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl CaptureServer {
    pub(super) fn spawn(status_line: &'static str) -> Result<Self, String> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .map_err(|err| format!("bind test server failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("server addr failed: {}", err))?;
        listener
            .set_nonblocking(true)
            .map_err(|err| format!("set_nonblocking failed: {}", err))?;

        let requests = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel();
        let captured = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        let captured = Arc::clone(&captured);
                        thread::spawn(move || handle_client(stream, status_line, &captured));
                    }
                    Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            url: format!("http://{}", addr),
            requests,
            shutdown: shutdown_tx,
            thread: Some(handle),
        })
    }

    pub(super) fn requests(&self) -> Vec<CapturedRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Drop for CaptureServer {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

fn handle_client(
    mut stream: TcpStream,
    status_line: &'static str,
    captured: &Mutex<Vec<CapturedRequest>>,
) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    if let Ok(mut guard) = captured.lock() {
        guard.push(request);
    }
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        status_line
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    drop(stream.flush());
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request(stream: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            return None;
        }
        buffer.extend_from_slice(chunk.get(..read)?);
        if let Some(pos) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(buffer.get(..header_end)?).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_owned();
    let path = request_line.next()?.to_owned();

    let mut content_length = 0usize;
    let mut content_type = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_ascii_lowercase();
            if name == "content-length" {
                content_length = value.trim().parse().ok()?;
            } else if name == "content-type" {
                content_type = Some(value.trim().to_owned());
            }
        }
    }

    let body_start = header_end.checked_add(4)?;
    let mut body = buffer.get(body_start..)?.to_vec();
    while body.len() < content_length {
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(chunk.get(..read)?);
    }
    body.truncate(content_length);

    Some(CapturedRequest {
        method,
        path,
        content_type,
        body,
    })
}
