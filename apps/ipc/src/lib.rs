//! # Suanpan IPC Library
//!
//! The line-JSON dispatcher between the Electron shell and suanpan-core.
//!
//! ## Module Organization
//! ```text
//! suanpan_ipc/
//! ├── lib.rs          ◄─── You are here (stdin line loop)
//! ├── protocol.rs     ◄─── Request/Response wire types
//! ├── state.rs        ◄─── Session (engine + converter)
//! └── dispatch.rs     ◄─── Request → core call → Response
//! ```
//!
//! ## Transport Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  • One JSON request per stdin line, one JSON response per stdout line   │
//! │  • Blank lines are skipped                                              │
//! │  • Malformed JSON / unknown action → {"success":false,"error":"…"}      │
//! │  • EOF on stdin → clean shutdown                                        │
//! │  • stderr carries logs ONLY; stdout is never polluted                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop is deliberately blocking and single-threaded: requests are
//! tiny, every core operation completes in constant time, and the frontend
//! sends one request at a time. An async runtime would buy nothing here.

pub mod dispatch;
pub mod protocol;
pub mod state;

use std::io::{BufRead, Write};

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use dispatch::handle_request;
use protocol::{Request, Response};
use state::Session;

/// Runs the dispatcher until stdin reaches EOF.
///
/// ## Startup Sequence
/// 1. Initialize tracing (stderr)
/// 2. Create the session (fresh engine, default unit registry)
/// 3. Serve the stdin line loop
pub fn run() {
    init_tracing();

    info!("Suanpan IPC server started");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new();

    serve(stdin.lock(), stdout.lock(), &mut session);

    info!("EOF received, shutting down");
}

/// The request/response loop, generic over its streams for testability.
fn serve(input: impl BufRead, mut output: impl Write, session: &mut Session) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!(%err, "Failed to read request line");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => handle_request(session, request),
            Err(err) => {
                debug!(%err, "Rejected malformed request line");
                Response::failure(format!("Invalid request: {err}"))
            }
        };

        if let Err(err) = send_response(&mut output, &response) {
            // Broken pipe means the shell went away; nothing left to serve
            error!(%err, "Failed to send response");
            break;
        }
    }
}

/// Writes one response as a single stdout line and flushes immediately -
/// the frontend blocks on the reply, so buffering would deadlock it.
fn send_response(output: &mut impl Write, response: &Response) -> std::io::Result<()> {
    let json = serde_json::to_string(response)?;
    writeln!(output, "{json}")?;
    output.flush()
}

/// Initializes the tracing subscriber for structured logging on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every dispatched request
/// - `RUST_LOG=suanpan_ipc=trace` - Trace this crate only
/// - Default: INFO level
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,suanpan=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test helper: feeds raw input through the serve loop and returns
    /// everything written to "stdout".
    fn serve_lines(input: &str) -> Vec<String> {
        let mut output = Vec::new();
        let mut session = Session::new();
        serve(input.as_bytes(), &mut output, &mut session);
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_one_response_line_per_request_line() {
        let responses = serve_lines(concat!(
            r#"{"action":"press_digit","digit":"4"}"#,
            "\n",
            r#"{"action":"press_digit","digit":"2"}"#,
            "\n",
        ));
        assert_eq!(
            responses,
            vec![
                r#"{"success":true,"display":"4","error":false}"#,
                r#"{"success":true,"display":"42","error":false}"#,
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let responses = serve_lines("\n   \n");
        assert!(responses.is_empty());
    }

    #[test]
    fn test_malformed_json_gets_failure_envelope_and_loop_continues() {
        let responses = serve_lines(concat!(
            "not json\n",
            r#"{"action":"press_digit","digit":"7"}"#,
            "\n",
        ));
        assert_eq!(responses.len(), 2);
        assert!(responses[0].starts_with(r#"{"success":false,"error":"Invalid request:"#));
        assert_eq!(responses[1], r#"{"success":true,"display":"7","error":false}"#);
    }

    #[test]
    fn test_unknown_action_gets_failure_envelope() {
        let responses = serve_lines("{\"action\":\"exchange_rate\",\"currency\":\"USD\"}\n");
        assert_eq!(responses.len(), 1);
        assert!(responses[0].starts_with(r#"{"success":false,"error":"Invalid request:"#));
    }

    #[test]
    fn test_eof_ends_loop_cleanly() {
        // Input without trailing newline still serves the last line
        let responses = serve_lines(r#"{"action":"clear"}"#);
        assert_eq!(
            responses,
            vec![r#"{"success":true,"display":"0","error":false}"#]
        );
    }
}
