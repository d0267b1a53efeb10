use std::io::{BufRead, BufReader, Write};
use std::process::{ChildStdout, Command, Stdio};
use std::time::{Duration, Instant};

use serde_json::Value;

const SERVER_TIMEOUT: Duration = Duration::from_secs(5);
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_millis(200);

#[test]
fn initialize_smoke() {
    let mut server = spawn_server();
    let mut reader = take_reader(&mut server);

    // Send initialize request
    send_lsp_message(&mut server, &create_initialize_request());

    // Read and validate response
    let response = read_lsp_message(&mut reader);
    validate_initialize_response(&response);

    // Clean shutdown
    shutdown_server(server);
}

#[test]
fn did_open_publishes_diagnostics() {
    let mut server = spawn_server();
    let mut reader = take_reader(&mut server);

    send_lsp_message(&mut server, &create_initialize_request());
    let _ = read_lsp_message(&mut reader);

    send_lsp_message(
        &mut server,
        &serde_json::json!({
            "jsonrpc": "2.0",
            "method": "initialized",
            "params": {}
        }),
    );
    send_lsp_message(
        &mut server,
        &serde_json::json!({
            "jsonrpc": "2.0",
            "method": "textDocument/didOpen",
            "params": {
                "textDocument": {
                    "uri": "file:///tmp/crontab",
                    "languageId": "crontab",
                    "version": 1,
                    "text": "# jobs\n1,2,x * * * * /bin/true\n"
                }
            }
        }),
    );

    let notification = read_until_method(&mut reader, "textDocument/publishDiagnostics");
    let diagnostics = notification["params"]["diagnostics"]
        .as_array()
        .expect("diagnostics array");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["message"], "Minute[2] invalid value: x");
    assert_eq!(diagnostics[0]["range"]["start"]["line"], 1);
    assert_eq!(diagnostics[0]["range"]["start"]["character"], 4);
    assert_eq!(diagnostics[0]["range"]["end"]["character"], 5);
    assert_eq!(diagnostics[0]["severity"], 1);

    shutdown_server(server);
}

fn spawn_server() -> std::process::Child {
    let bin_path = std::env::var("CARGO_BIN_EXE_cron-ls")
        .unwrap_or_else(|_| "target/debug/cron-ls".to_string());

    Command::new(bin_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env("CRON_LS_TEST_EXIT", "1")
        .spawn()
        .expect("Failed to spawn language server")
}

fn take_reader(child: &mut std::process::Child) -> BufReader<ChildStdout> {
    let stdout = child
        .stdout
        .take()
        .expect("Child stdout should be available");
    BufReader::new(stdout)
}

fn create_initialize_request() -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "processId": null,
            "rootUri": null,
            "capabilities": {
                "textDocument": {
                    "hover": { "dynamicRegistration": false },
                    "documentSymbol": { "dynamicRegistration": false }
                }
            },
            "clientInfo": { "name": "test-client", "version": "1.0" }
        }
    })
}

fn send_lsp_message(child: &mut std::process::Child, message: &Value) {
    let body = message.to_string();
    let request = format!("Content-Length: {}\r\n\r\n{}", body.len(), body);

    let stdin = child
        .stdin
        .as_mut()
        .expect("Child stdin should be available");
    stdin
        .write_all(request.as_bytes())
        .expect("Failed to write request");
    stdin.flush().expect("Failed to flush stdin");
}

fn read_lsp_message(reader: &mut BufReader<ChildStdout>) -> Value {
    let content_length = read_content_length_header(reader);
    let body = read_message_body(reader, content_length);

    serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("Invalid JSON response: {}\nBody: {}", e, body))
}

fn read_until_method(reader: &mut BufReader<ChildStdout>, method: &str) -> Value {
    let start_time = Instant::now();

    loop {
        if start_time.elapsed() > SERVER_TIMEOUT {
            panic!("Timeout waiting for {}", method);
        }

        let message = read_lsp_message(reader);
        if message.get("method").and_then(|m| m.as_str()) == Some(method) {
            return message;
        }
    }
}

fn read_content_length_header(reader: &mut BufReader<ChildStdout>) -> usize {
    let start_time = Instant::now();
    let mut content_length = None;

    loop {
        if start_time.elapsed() > SERVER_TIMEOUT {
            panic!("Timeout waiting for response headers");
        }

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => panic!("Unexpected EOF while reading headers"),
            Ok(_) => {
                if line.trim().is_empty() {
                    // End of headers - we've consumed the empty line
                    break;
                }

                if let Some(length_str) = line.strip_prefix("Content-Length:") {
                    content_length = Some(
                        length_str
                            .trim()
                            .parse::<usize>()
                            .expect("Invalid Content-Length header"),
                    );
                }
            }
            Err(e) => panic!("Error reading headers: {}", e),
        }
    }

    content_length.expect("Missing Content-Length header")
}

fn read_message_body(reader: &mut BufReader<ChildStdout>, content_length: usize) -> String {
    let mut body_bytes = vec![0u8; content_length];
    std::io::Read::read_exact(reader, &mut body_bytes).expect("Failed to read response body");

    String::from_utf8(body_bytes).expect("Response body should be valid UTF-8")
}

fn validate_initialize_response(response: &Value) {
    assert_eq!(
        response.get("jsonrpc").and_then(|v| v.as_str()),
        Some("2.0"),
        "Response should have jsonrpc: '2.0'"
    );

    assert_eq!(
        response.get("id").and_then(|v| v.as_i64()),
        Some(1),
        "Response should have matching request id"
    );

    let result = response
        .get("result")
        .expect("Response should contain 'result' field");

    let capabilities = result
        .get("capabilities")
        .expect("Result should contain server capabilities");

    assert!(capabilities.is_object(), "Capabilities should be an object");
    assert_eq!(capabilities["hoverProvider"], true);
    assert_eq!(capabilities["documentSymbolProvider"], true);
    assert_eq!(capabilities["textDocumentSync"], 1);
    assert_eq!(result["serverInfo"]["name"], "cron-ls");
}

fn shutdown_server(mut child: std::process::Child) {
    // Close stdin to signal we're done
    drop(child.stdin.take());

    // Give the server a moment to exit gracefully
    std::thread::sleep(SHUTDOWN_GRACE_PERIOD);

    match child.try_wait() {
        Ok(Some(status)) => {
            if !status.success() {
                eprintln!("Server exited with non-zero status: {:?}", status);
            }
        }
        Ok(None) => {
            // Still running, force termination
            eprintln!("Server didn't exit gracefully, forcing termination");
            let _ = child.kill();
            let _ = child.wait();
        }
        Err(e) => panic!("Error checking server status: {}", e),
    }
}
