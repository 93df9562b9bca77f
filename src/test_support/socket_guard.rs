//! Skips wiremock tests in sandboxes that cannot bind a localhost socket.

use std::net::TcpListener;
use std::panic::Location;

use wiremock::MockServer;

/// Environment variable that turns a skipped socket test into a failure.
const REQUIRE_SOCKET_TESTS_VAR: &str = "EVENTFEED_REQUIRE_SOCKET_TESTS";

fn socket_tests_required() -> bool {
    std::env::var(REQUIRE_SOCKET_TESTS_VAR)
        .ok()
        .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

#[track_caller]
fn should_skip_socket_bound_test() -> bool {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return false;
    }

    let location = Location::caller();
    let message = format!(
        "[socket-bound-test] cannot bind localhost socket at {}:{}; wiremock-based test cannot run in this environment",
        location.file(),
        location.line()
    );
    if socket_tests_required() {
        panic!("{message}. Set {REQUIRE_SOCKET_TESTS_VAR}=0 to allow local skip behavior.");
    }

    eprintln!("{message}. Skipping test. Set {REQUIRE_SOCKET_TESTS_VAR}=1 to fail-fast instead.");
    true
}

pub(crate) async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        None
    } else {
        Some(MockServer::start().await)
    }
}
