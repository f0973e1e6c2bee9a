//! Line-delimited JSON-RPC 2.0 over stdio for a presentation front end.

use std::io::{BufRead, Write};
use std::sync::Arc;

use qurani_core::{
    Category, NavError, NavigationState, Navigator, RangeBound, Selection, VerseStore,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    #[serde(default)]
    params: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct RpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i32,
    message: String,
}

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const STORAGE_ERROR: i32 = -32000;
const NOT_FOUND: i32 = -32001;

impl RpcResponse {
    fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<serde_json::Value>, code: i32, message: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.to_string(),
            }),
        }
    }

    fn from_nav_error(id: Option<serde_json::Value>, err: &NavError) -> Self {
        let code = match err {
            NavError::InvalidCategory(_)
            | NavError::NoActiveCategory
            | NavError::OutOfRangeIndex { .. } => INVALID_PARAMS,
            NavError::UnknownVerseNumber(_) | NavError::IndexLookupMiss(_) => NOT_FOUND,
            NavError::StorageUnavailable(_) | NavError::Storage(_) => STORAGE_ERROR,
        };
        Self::error(id, code, &err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct StateView<'a> {
    text: &'a str,
    title: String,
    selection: Selection,
    category: Option<Category>,
    index: Option<u32>,
    has_next: bool,
    has_previous: bool,
    verse_count: usize,
}

fn state_view(state: &NavigationState) -> serde_json::Value {
    let view = StateView {
        text: state.text(),
        title: state.title(),
        selection: state.selection(),
        category: state.category(),
        index: state.index(),
        has_next: state.has_next(),
        has_previous: state.has_previous(),
        verse_count: state.verse_count(),
    };
    serde_json::to_value(view).unwrap_or(serde_json::Value::Null)
}

/// A step that went nowhere answers with empty text, like the reader does.
fn optional_state_view(state: Option<Arc<NavigationState>>) -> serde_json::Value {
    match state {
        Some(state) => state_view(&state),
        None => serde_json::json!({ "text": "" }),
    }
}

fn handle_categories(id: Option<serde_json::Value>) -> RpcResponse {
    let categories: Vec<_> = Category::all()
        .iter()
        .map(|category| {
            serde_json::json!({
                "name": category,
                "tag": category.as_tag(),
                "label": category.label(),
                "arabic_label": category.arabic_label(),
                "max_index": category.max_index(),
            })
        })
        .collect();
    RpcResponse::success(id, serde_json::json!({ "categories": categories }))
}

/// Accepts a category name ("page", "juz", ...) or its numeric tag.
fn parse_category(value: Option<&serde_json::Value>) -> Result<Category, String> {
    match value {
        Some(serde_json::Value::String(name)) => {
            Category::from_str(name).ok_or_else(|| format!("Unknown category: {}", name))
        }
        Some(value) => match value.as_i64() {
            Some(tag) => Category::from_tag(tag).map_err(|e| e.to_string()),
            None => Err(format!("Invalid category: {}", value)),
        },
        None => Err("Missing 'category' parameter".to_string()),
    }
}

fn get_u32(args: &serde_json::Value, name: &str) -> Result<Option<u32>, String> {
    match args.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| format!("'{}' must be a non-negative integer", name)),
    }
}

fn require_u32(args: &serde_json::Value, name: &str) -> Result<u32, String> {
    get_u32(args, name)?.ok_or_else(|| format!("Missing '{}' parameter", name))
}

fn get_bool(args: &serde_json::Value, name: &str) -> Result<Option<bool>, String> {
    match args.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| format!("'{}' must be a boolean", name)),
    }
}

fn range_bound(
    args: &serde_json::Value,
    chapter_key: &str,
    verse_key: &str,
) -> Result<Option<RangeBound>, String> {
    let Some(chapter) = get_u32(args, chapter_key)? else {
        return Ok(None);
    };
    let verse = match args.get(verse_key) {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => Some(
            value
                .as_i64()
                .ok_or_else(|| format!("'{}' must be an integer", verse_key))?,
        ),
    };
    Ok(Some(RangeBound::new(chapter, verse)))
}

fn handle_call<S: VerseStore>(
    nav: &mut Navigator<S>,
    method: &str,
    args: &serde_json::Value,
) -> Result<Result<serde_json::Value, NavError>, RpcCallError> {
    let value = match method {
        "state" => Ok(state_view(&nav.state())),
        "select" => {
            let category = parse_category(args.get("category")).map_err(RpcCallError::params)?;
            let index = require_u32(args, "index").map_err(RpcCallError::params)?;
            nav.select(category, index).map(|state| state_view(&state))
        }
        "next" => nav.next().map(optional_state_view),
        "previous" => nav.previous().map(optional_state_view),
        "goto" => {
            let index = require_u32(args, "index").map_err(RpcCallError::params)?;
            nav.goto(index).map(optional_state_view)
        }
        "range" => {
            let from = range_bound(args, "from_chapter", "from_verse")
                .map_err(RpcCallError::params)?;
            let to =
                range_bound(args, "to_chapter", "to_verse").map_err(RpcCallError::params)?;
            nav.range_query(from, to).map(|state| state_view(&state))
        }
        "locate" => {
            let verse = require_u32(args, "verse").map_err(RpcCallError::params)?;
            nav.locate_by_verse_number(verse).map(|located| {
                let mut view = state_view(&located.state);
                view["verse_text"] = serde_json::Value::String(located.verse_text);
                view
            })
        }
        "options" => {
            let mut options = nav.options();
            if let Some(show) = get_bool(args, "show_verse_number").map_err(RpcCallError::params)? {
                options.show_verse_number = show;
            }
            if let Some(per_line) =
                get_bool(args, "one_verse_per_line").map_err(RpcCallError::params)?
            {
                options.one_verse_per_line = per_line;
            }
            nav.set_options(options);
            Ok(serde_json::to_value(options).unwrap_or(serde_json::Value::Null))
        }
        "resolve" => {
            let offset = args
                .get("offset")
                .and_then(|v| v.as_u64())
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    RpcCallError::params("'offset' must be a non-negative integer".to_string())
                })?;
            nav.resolve_offset(offset)
                .map(|meta| serde_json::to_value(meta).unwrap_or(serde_json::Value::Null))
        }
        _ => {
            return Err(RpcCallError {
                code: METHOD_NOT_FOUND,
                message: format!("Method not found: {}", method),
            })
        }
    };
    Ok(value)
}

struct RpcCallError {
    code: i32,
    message: String,
}

impl RpcCallError {
    fn params(message: String) -> Self {
        Self {
            code: INVALID_PARAMS,
            message,
        }
    }
}

fn handle_request<S: VerseStore>(nav: &mut Navigator<S>, request: RpcRequest) -> RpcResponse {
    debug!(method = %request.method, "rpc request");
    if request.method == "categories" {
        return handle_categories(request.id);
    }
    match handle_call(nav, &request.method, &request.params) {
        Ok(Ok(result)) => RpcResponse::success(request.id, result),
        Ok(Err(err)) => {
            warn!("{}: {}", request.method, err);
            RpcResponse::from_nav_error(request.id, &err)
        }
        Err(err) => RpcResponse::error(request.id, err.code, &err.message),
    }
}

fn write_response<W: Write>(writer: &mut W, response: &RpcResponse) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, response)?;
    writeln!(writer)?;
    writer.flush()
}

/// Answers one request per input line until the input closes.
pub fn serve<S, R, W>(nav: &mut Navigator<S>, reader: R, mut writer: W) -> anyhow::Result<()>
where
    S: VerseStore,
    R: BufRead,
    W: Write,
{
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RpcRequest>(&line) {
            Ok(request) => handle_request(nav, request),
            Err(e) => RpcResponse::error(None, PARSE_ERROR, &format!("Parse error: {}", e)),
        };
        write_response(&mut writer, &response)?;
    }
    Ok(())
}

pub fn run_rpc_server<S: VerseStore>(nav: &mut Navigator<S>) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve(nav, stdin.lock(), stdout.lock())
}
