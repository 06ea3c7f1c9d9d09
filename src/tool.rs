//! Newline-delimited JSON-RPC 2.0 tool server over stdio.
//!
//! Exposes one tool, `analyze`, to an orchestrator speaking the tool-calling
//! protocol (`initialize`, `tools/list`, `tools/call`).

use serde_json::{json, Value};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::display::report;
use crate::service::{AnalysisRequest, Analyzer};

pub const SERVER_NAME: &str = "riot_server";
pub const TOOL_NAME: &str = "analyze";
const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

pub struct ToolServer {
    analyzer: Analyzer,
}

impl ToolServer {
    pub fn new(analyzer: Analyzer) -> Self {
        ToolServer { analyzer }
    }

    /// Serve until the reader hits EOF.
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> std::io::Result<()> {
        info!("✅ {} started, waiting for requests", SERVER_NAME);

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Some(reply) = self.handle_line(&line) {
                writeln!(writer, "{}", reply)?;
                writer.flush()?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Replies to one message; notifications get `None`.
    pub fn handle_line(&self, line: &str) -> Option<Value> {
        let message: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => return Some(error_reply(Value::Null, PARSE_ERROR, &e.to_string())),
        };

        let id = message.get("id").cloned();
        let Some(method) = message.get("method").and_then(Value::as_str) else {
            return Some(error_reply(id.unwrap_or(Value::Null), INVALID_REQUEST, "missing method"));
        };
        debug!(method, "received message");

        // No id means notification: never answered.
        let id = id?;

        let result = match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") }
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": [tool_descriptor()] })),
            "tools/call" => self.call_tool(message.get("params")),
            other => {
                warn!(method = other, "unknown method");
                Err((METHOD_NOT_FOUND, format!("method not found: {}", other)))
            }
        };

        Some(match result {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err((code, message)) => error_reply(id, code, &message),
        })
    }

    fn call_tool(&self, params: Option<&Value>) -> Result<Value, (i64, String)> {
        let params = params.ok_or((INVALID_PARAMS, "missing params".to_string()))?;
        let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
        if name != TOOL_NAME {
            return Err((INVALID_PARAMS, format!("unknown tool: {}", name)));
        }

        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
        let request: AnalysisRequest = serde_json::from_value(arguments)
            .map_err(|e| (INVALID_PARAMS, format!("invalid arguments: {}", e)))?;

        let text = self.analyzer.analyze(&request);
        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "isError": report::is_error(&text)
        }))
    }
}

pub fn tool_descriptor() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": "League of Legends match analysis or champion recommendation",
        "inputSchema": {
            "type": "object",
            "properties": {
                "playerTag": {
                    "type": "string",
                    "description": "Riot ID, e.g. Hide on bush#KR1"
                },
                "requestType": {
                    "type": "string",
                    "enum": ["MatchAnalysis", "ChampionRecommendation"],
                    "description": "Kind of report"
                },
                "matchCount": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 100,
                    "description": "Recent matches to analyze (default 10)"
                }
            },
            "required": ["playerTag", "requestType"]
        }
    })
}

fn error_reply(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    })
}
