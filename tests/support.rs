use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a mock vehicle API for tests.
///
/// Serves the fixtures the probe plans poke at: vehicles 1234 and 1235
/// exist, 1236 does not, 1234 has a null battery level, and the engine
/// endpoint accepts START/STOP and rejects anything else. `POST /echo`
/// answers with the received request body verbatim.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_vehicle_api() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn handle_client(mut stream: TcpStream) {
    let Some((request_line, body)) = read_request(&mut stream) else {
        return;
    };
    let (status, response_body) = route(&request_line, &body);

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        response_body.len(),
        response_body
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request(stream: &mut TcpStream) -> Option<(String, String)> {
    drop(stream.set_read_timeout(Some(Duration::from_secs(2))));
    let mut raw = Vec::new();
    let mut buffer = [0u8; 1024];

    let header_end = loop {
        let read = stream.read(&mut buffer).ok()?;
        if read == 0 {
            return None;
        }
        raw.extend_from_slice(buffer.get(..read)?);
        if let Some(position) = find_header_end(&raw) {
            break position;
        }
        if raw.len() > 64 * 1024 {
            return None;
        }
    };

    let head = String::from_utf8_lossy(raw.get(..header_end)?).into_owned();
    let request_line = head.lines().next().unwrap_or("").to_owned();
    let content_length = head
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

    let body_start = header_end.checked_add(4)?;
    let mut body: Vec<u8> = raw.get(body_start..)?.to_vec();
    while body.len() < content_length {
        let read = stream.read(&mut buffer).ok()?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(buffer.get(..read)?);
    }

    Some((request_line, String::from_utf8_lossy(&body).into_owned()))
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|window| window == b"\r\n\r\n")
}

fn route(request_line: &str, body: &str) -> (&'static str, String) {
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");

    if path.starts_with("/vehicles/1236") {
        return (
            "404 Not Found",
            r#"{"message":"Vehicle id: 1236 not found."}"#.to_owned(),
        );
    }

    match (method, path) {
        ("GET", "/vehicles/1234") => (
            "200 OK",
            r#"{"vin":"123123412","color":"Metallic Silver","doorCount":4,"driveTrain":"v8"}"#
                .to_owned(),
        ),
        ("GET", "/vehicles/1235") => (
            "200 OK",
            r#"{"vin":"1235AZ91XP","color":"Forest Green","doorCount":2,"driveTrain":"electric"}"#
                .to_owned(),
        ),
        ("GET", "/vehicles/1234/doors") => (
            "200 OK",
            r#"[{"location":"frontLeft","locked":true},{"location":"frontRight","locked":true},{"location":"backLeft","locked":false},{"location":"backRight","locked":true}]"#
                .to_owned(),
        ),
        ("GET", "/vehicles/1235/fuel") | ("GET", "/vehicles/1234/battery") => {
            ("200 OK", r#"{"percentage":null}"#.to_owned())
        }
        ("POST", "/vehicles/1234/engine") => {
            if body.contains("START") || body.contains("STOP") {
                ("200 OK", r#"{"status":"success"}"#.to_owned())
            } else {
                ("400 Bad Request", r#"{"message":"Invalid engine action."}"#.to_owned())
            }
        }
        ("POST", "/echo") => ("200 OK", body.to_owned()),
        _ => ("404 Not Found", r#"{"message":"Not Found"}"#.to_owned()),
    }
}

/// Run the `vprobe` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_vprobe<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = vprobe_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run vprobe failed: {}", err))
}

fn vprobe_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_vprobe").map_or_else(
        || Err("CARGO_BIN_EXE_vprobe missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
