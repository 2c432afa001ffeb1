//! Oracle client: one JSON POST carrying the offerings, one reply.

use serde::{Deserialize, Serialize};

use crate::config::OracleConfig;
use crate::zodiac::{Offering, Reading, Sign, TasteTags, TasteTwin};

pub const UNREACHABLE_MESSAGE: &str =
    "The cosmic rays are interfering! The server could not be reached.";

/// Request body: `{ "inputs": [{ "type": ..., "name": ... }, ...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OracleRequest {
    pub inputs: Vec<Offering>,
}

/// Error while consulting the Oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// Transport failure, bad status or an undecodable body.
    Unreachable(String),
    /// The Oracle answered with an `error` field.
    Refused(String),
}

impl OracleError {
    /// Text shown on the error screen.
    pub fn user_message(&self) -> String {
        match self {
            OracleError::Unreachable(_) => UNREACHABLE_MESSAGE.to_string(),
            OracleError::Refused(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleError::Unreachable(detail) => write!(f, "Oracle unreachable: {}", detail),
            OracleError::Refused(message) => write!(f, "Oracle refused: {}", message),
        }
    }
}

impl std::error::Error for OracleError {}

// ─── Wire format ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OracleReply {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    result: Option<ReadingPayload>,
    #[serde(default)]
    all_signs: Vec<Sign>,
}

/// The primary sign with the two embedded sub-results.
#[derive(Debug, Deserialize)]
struct ReadingPayload {
    #[serde(flatten)]
    sign: Sign,
    #[serde(default)]
    taste_tags: Option<TasteTags>,
    #[serde(default)]
    taste_twin: Option<TasteTwin>,
}

/// Decode a reply body into a `Reading`.
pub fn decode_reply(body: &str) -> Result<Reading, OracleError> {
    let reply: OracleReply = serde_json::from_str(body)
        .map_err(|e| OracleError::Unreachable(format!("Malformed reply: {}", e)))?;

    if let Some(message) = reply.error.filter(|m| !m.is_empty()) {
        return Err(OracleError::Refused(message));
    }

    let payload = reply
        .result
        .ok_or_else(|| OracleError::Unreachable("Reply carried no result".to_string()))?;

    Ok(Reading {
        sign: payload.sign,
        tags: payload.taste_tags,
        twin: payload.taste_twin,
        catalog: reply.all_signs,
    })
}

/// Send the offerings to the Oracle (blocking).
pub fn consult(config: &OracleConfig, request: &OracleRequest) -> Result<Reading, OracleError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()
        .map_err(|e| OracleError::Unreachable(format!("Client error: {}", e)))?;

    log::info!(
        "Consulting the Oracle at {} with {} offering(s)",
        config.endpoint,
        request.inputs.len()
    );

    let response = client
        .post(config.endpoint.as_str())
        .header("Accept", "application/json")
        .json(request)
        .send()
        .map_err(|e| OracleError::Unreachable(format!("Request failed: {}", e)))?;

    let status = response.status();
    let body = response
        .text()
        .map_err(|e| OracleError::Unreachable(format!("Failed to read body: {}", e)))?;
    log::debug!("Oracle replied {} ({} bytes)", status, body.len());

    if !status.is_success() {
        if let Err(OracleError::Refused(detail)) = decode_reply(&body) {
            log::debug!("Oracle error body on HTTP {}: {}", status.as_u16(), detail);
        }
        return Err(OracleError::Unreachable(format!("HTTP {}", status.as_u16())));
    }

    decode_reply(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::session::Session;
    use crate::zodiac::OfferingKind;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::JoinHandle;
    use std::time::Duration;

    const HERMIT_REPLY: &str = r#"{
        "result": {
            "name": "The Hermit", "emoji": "🌑", "constellation": "Cosmic Isolation",
            "prophecy": "You will find the lamp.", "description": "A lone figure.",
            "symbolism": "Solitude.", "absurdity": 3, "rare": false,
            "compatibility": "Gets along with the void.",
            "taste_tags": ["Lonely", "80s Sci-Fi"],
            "taste_twin": {"name": "The Wanderer", "emoji": "🧭", "bio": "Off the map."}
        },
        "all_signs": [
            {"name": "The Hermit", "emoji": "🌑", "constellation": "Cosmic Isolation",
             "description": "", "absurdity": 3, "rare": false, "compatibility": "x"},
            {"name": "Lunar Elevator Muzak", "emoji": "🌙", "constellation": "Cosmic Isolation",
             "description": "", "absurdity": 3, "rare": false, "compatibility": "y"}
        ]
    }"#;

    #[test]
    fn request_body_matches_wire_shape() {
        let request = OracleRequest {
            inputs: vec![
                Offering::new(OfferingKind::Movie, "Dune"),
                Offering::new(OfferingKind::Game, "Hades"),
            ],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"inputs": [
                {"type": "movie", "name": "Dune"},
                {"type": "game", "name": "Hades"}
            ]})
        );
    }

    #[test]
    fn reply_is_unpacked_into_three_sub_results() {
        let reading = decode_reply(HERMIT_REPLY).unwrap();
        assert_eq!(reading.sign.name, "The Hermit");
        assert_eq!(reading.sign.prophecy, "You will find the lamp.");
        assert_eq!(reading.tags.as_deref(), Some(&["Lonely".to_string(), "80s Sci-Fi".to_string()][..]));
        assert_eq!(reading.twin.as_ref().map(|t| t.name.as_str()), Some("The Wanderer"));
        assert_eq!(reading.catalog.len(), 2);
    }

    #[test]
    fn error_field_is_a_refusal() {
        let err = decode_reply(r#"{"error": "The stars are silent."}"#).unwrap_err();
        assert_eq!(err, OracleError::Refused("The stars are silent.".to_string()));
        assert_eq!(err.user_message(), "The stars are silent.");
    }

    #[test]
    fn error_wins_over_a_result() {
        let body = r#"{"error": "nope", "result": {"name": "x", "emoji": "x", "constellation": "x"}}"#;
        assert!(matches!(decode_reply(body), Err(OracleError::Refused(_))));
    }

    #[test]
    fn garbage_collapses_to_unreachable() {
        let err = decode_reply("<html>502</html>").unwrap_err();
        assert!(matches!(err, OracleError::Unreachable(_)));
        assert_eq!(err.user_message(), UNREACHABLE_MESSAGE);

        let err = decode_reply("{}").unwrap_err();
        assert!(matches!(err, OracleError::Unreachable(_)));
    }

    #[test]
    fn missing_tags_and_twin_are_none() {
        let body = r#"{"result": {"name": "x", "emoji": "✨", "constellation": "Absurd Nostalgia"}, "all_signs": []}"#;
        let reading = decode_reply(body).unwrap();
        assert!(reading.tags.is_none());
        assert!(reading.twin.is_none());
        assert!(reading.catalog.is_empty());
    }

    // ── consult against a one-shot local server ─────────────────────────────

    fn config_for(addr: std::net::SocketAddr) -> OracleConfig {
        OracleConfig {
            endpoint: url::Url::parse(&format!("http://{}/get-zodiac", addr)).unwrap(),
            timeout: Duration::from_secs(5),
            ..OracleConfig::default()
        }
    }

    /// Body of one HTTP request, read up to its `Content-Length`.
    fn read_body(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len {
                    return String::from_utf8_lossy(&buf[end + 4..end + 4 + len]).into_owned();
                }
            }
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                return String::new();
            }
            buf.extend_from_slice(&chunk[..n]);
        }
    }

    /// Answer a single request with `status` and `body`; the handle yields the request body.
    fn serve_once(status: &'static str, body: &'static str) -> (OracleConfig, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let config = config_for(listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_body(&mut stream);
            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).unwrap();
            request
        });
        (config, handle)
    }

    fn dune() -> OracleRequest {
        OracleRequest {
            inputs: vec![Offering::new(OfferingKind::Movie, "Dune")],
        }
    }

    #[test]
    fn consult_posts_only_filled_rows() {
        let mut session = Session::new("https://zodiac.example");
        session.set_offering_name(0, "Dune");
        session.add_offering();
        session.add_offering();
        session.set_offering_kind(2, OfferingKind::Game);
        session.set_offering_name(2, "Hades");
        let request = session.submit().unwrap();

        let (config, server) = serve_once("200 OK", HERMIT_REPLY);
        let reading = consult(&config, &request).unwrap();
        assert_eq!(reading.sign.name, "The Hermit");
        assert_eq!(reading.catalog.len(), 2);

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({"inputs": [
                {"type": "movie", "name": "Dune"},
                {"type": "game", "name": "Hades"}
            ]})
        );
    }

    #[test]
    fn consult_passes_on_a_refusal() {
        let (config, server) = serve_once("200 OK", r#"{"error": "The stars are silent."}"#);
        let err = consult(&config, &dune()).unwrap_err();
        server.join().unwrap();
        assert_eq!(err, OracleError::Refused("The stars are silent.".to_string()));
    }

    #[test]
    fn server_error_status_hides_the_body() {
        let (config, server) = serve_once(
            "500 Internal Server Error",
            r#"{"error": "Internal traceback: KeyError 'API_KEY'"}"#,
        );
        let err = consult(&config, &dune()).unwrap_err();
        server.join().unwrap();
        assert_eq!(err, OracleError::Unreachable("HTTP 500".to_string()));
        assert_eq!(err.user_message(), UNREACHABLE_MESSAGE);
    }

    #[test]
    fn closed_port_is_unreachable() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let err = consult(&config_for(addr), &dune()).unwrap_err();
        assert!(matches!(err, OracleError::Unreachable(_)));
        assert_eq!(err.user_message(), UNREACHABLE_MESSAGE);
    }
}
