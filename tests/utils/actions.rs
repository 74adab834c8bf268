#![allow(dead_code)] // Not every test file uses every action

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

/// Status and JSON body of one request.
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl TestSetup {
    /// Send a request through the full router and read the JSON reply
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> Reply {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        Reply { status, body }
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn start_game(&self, opponent: &str) -> Reply {
        self.request(
            "POST",
            "/session",
            Some(json!({ "opponent": opponent, "date": "2024-11-02" })),
        )
        .await
    }

    /// Click on a 500x375 court at pixel (x, y). Primary button records a make.
    pub async fn shoot(&self, player: &str, x: f64, y: f64, made: bool) -> Reply {
        self.request(
            "POST",
            "/session/shots",
            Some(json!({
                "player": player,
                "pointer": { "x": x, "y": y },
                "surface": { "left": 0.0, "top": 0.0, "width": 500.0, "height": 375.0 },
                "button": if made { "primary" } else { "secondary" }
            })),
        )
        .await
    }

    pub async fn record(&self, player: &str, action: &str) -> Reply {
        self.request(
            "POST",
            "/session/actions",
            Some(json!({ "player": player, "action": action })),
        )
        .await
    }

    pub async fn end_game(&self) -> Reply {
        self.request("POST", "/session/end", None).await
    }

    pub async fn reset(&self) -> Reply {
        self.request("POST", "/session/reset", None).await
    }

    pub async fn session(&self) -> Value {
        self.request("GET", "/session", None).await.body
    }

    pub async fn stats(&self) -> Value {
        self.request("GET", "/session/stats", None).await.body
    }
}
