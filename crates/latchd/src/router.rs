//! Request routing: maps method/path/body to service calls and errors to
//! status codes. The JSON surface is a compatibility contract with deployed
//! dashboard clients: shapes and messages are fixed.

use latch_core::responses::{
    CommandResponse, ConfigResponse, ErrorResponse, HealthResponse, LogEntryResponse,
};
use latch_db::error::StoreError;
use latch_engine::{ConfigUpdate, EngineError, LockService};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Body of `POST /door/unlock`. A missing pin field is simply a wrong PIN.
#[derive(Debug, Deserialize)]
struct UnlockRequest {
    #[serde(default)]
    pin: String,
}

/// Status code plus JSON body, ready for the gateway to send.
pub struct Reply {
    pub status: u16,
    pub body: serde_json::Value,
}

fn json_reply(status: u16, value: &impl Serialize) -> Reply {
    match serde_json::to_value(value) {
        Ok(body) => Reply { status, body },
        Err(error) => Reply {
            status: 500,
            body: json!({ "error": format!("response serialization: {error}") }),
        },
    }
}

fn error_reply(error: &EngineError) -> Reply {
    let status = match error {
        EngineError::InvalidPin => 401,
        EngineError::Store(StoreError::NoResult) => 404,
        // Validation faults share the 500 bucket with store failures; the
        // surface does not distinguish client from server fault.
        EngineError::Validation(_) | EngineError::Store(_) => 500,
    };
    json_reply(
        status,
        &ErrorResponse {
            error: error.to_string(),
        },
    )
}

fn bad_request(detail: &str) -> Reply {
    json_reply(
        400,
        &ErrorResponse {
            error: format!("invalid JSON body: {detail}"),
        },
    )
}

fn not_found() -> Reply {
    json_reply(
        404,
        &ErrorResponse {
            error: "not found".to_string(),
        },
    )
}

/// Dispatch one request.
pub async fn route(service: &LockService, method: &str, url: &str, body: &str) -> Reply {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        ("GET", "/door/status") => match service.status().await {
            Ok(status) => json_reply(200, &status),
            Err(error) => error_reply(&error),
        },

        ("POST", "/door/lock") => match service.lock().await {
            Ok(_) => json_reply(200, &CommandResponse::ok("Door locked")),
            Err(error) => error_reply(&error),
        },

        ("POST", "/door/unlock") => {
            let request: UnlockRequest = match serde_json::from_str(body) {
                Ok(request) => request,
                Err(error) => return bad_request(&error.to_string()),
            };
            match service.unlock(&request.pin).await {
                Ok(_) => json_reply(200, &CommandResponse::ok("Door unlocked")),
                Err(EngineError::InvalidPin) => {
                    json_reply(401, &CommandResponse::rejected("Invalid PIN"))
                }
                Err(error) => error_reply(&error),
            }
        }

        ("GET", "/logs") => match service.recent_logs().await {
            Ok(entries) => {
                let entries: Vec<LogEntryResponse> =
                    entries.into_iter().map(LogEntryResponse::from).collect();
                json_reply(200, &entries)
            }
            Err(error) => error_reply(&error),
        },

        ("GET", "/health") => match service.health().await {
            Ok(()) => json_reply(
                200,
                &HealthResponse {
                    status: "online".to_string(),
                    database: "connected".to_string(),
                },
            ),
            Err(error) => json_reply(
                503,
                &HealthResponse {
                    status: "offline".to_string(),
                    database: error.to_string(),
                },
            ),
        },

        ("GET", "/config") => match service.config().await {
            Ok(config) => json_reply(200, &ConfigResponse::from(config)),
            Err(error) => error_reply(&error),
        },

        ("PUT", "/config") => {
            let update: ConfigUpdate = match serde_json::from_str(body) {
                Ok(update) => update,
                Err(error) => return bad_request(&error.to_string()),
            };
            match service.update_config(update).await {
                Ok(_) => json_reply(200, &CommandResponse::ok("Configuration saved")),
                Err(error) => error_reply(&error),
            }
        }

        ("GET", "/analytics/activity_by_hour") => match service.activity_by_hour().await {
            Ok(hours) => json_reply(200, &hours),
            Err(error) => error_reply(&error),
        },

        ("GET", "/analytics/daily_activity") => match service.daily_activity().await {
            Ok(days) => json_reply(200, &days),
            Err(error) => error_reply(&error),
        },

        ("GET", "/analytics/unlocked_duration") => match service.unlocked_durations().await {
            Ok(spans) => json_reply(200, &spans),
            Err(error) => error_reply(&error),
        },

        ("GET", "/analytics/threats") => match service.threats().await {
            Ok(threats) => json_reply(200, &threats),
            Err(error) => error_reply(&error),
        },

        ("GET", "/analytics/total_counts") => match service.total_counts().await {
            Ok(counts) => json_reply(200, &counts),
            Err(error) => error_reply(&error),
        },

        _ => not_found(),
    }
}
