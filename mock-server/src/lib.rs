use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_API_KEY: &str = "mock-key";

const ITEMS: &[(u64, &str)] = &[
    (501, "Red Potion"),
    (502, "Orange Potion"),
    (503, "Yellow Potion"),
    (607, "Yggdrasil Berry"),
    (1101, "Sword"),
    (1228, "Combat Knife"),
    (2301, "Cotton Shirt"),
    (2601, "Clip"),
];

const MONSTERS: &[(u64, &str)] = &[
    (1002, "Poring"),
    (1031, "Poporing"),
    (1113, "Drops"),
    (1039, "Baphomet"),
    (1038, "Osiris"),
];

#[derive(Clone)]
pub struct AppState {
    api_key: String,
    auctions: Arc<RwLock<HashMap<Uuid, Value>>>,
}

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: impl Into<String>) -> Router {
    let state = AppState {
        api_key: api_key.into(),
        auctions: Arc::new(RwLock::new(HashMap::new())),
    };
    Router::new()
        .route("/api/v1/{route}/{endpoint}", post(dispatch))
        .route("/api/{route}/{endpoint}", post(dispatch))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_key(listener, DEFAULT_API_KEY).await
}

pub async fn run_with_key(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock backend listening");
    }
    axum::serve(listener, app_with_key(api_key)).await
}

async fn dispatch(
    State(state): State<AppState>,
    Path((route, endpoint)): Path<(String, String)>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    debug!(%route, %endpoint, "mock request");

    if (route.as_str(), endpoint.as_str()) == ("util", "validate") {
        return validate(&state, &payload);
    }
    if !is_authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let answer = match (route.as_str(), endpoint.as_str()) {
        ("util", "help") => Some(help(&payload)),
        ("item", "embed") => item_embed(&payload),
        ("item", "browser") => Some(item_browser(&payload)),
        ("item", "reward") => Some(reward(&payload)),
        ("monster", "embed") => monster_pages(&payload),
        ("monster", "browser") => Some(monster_search(&payload)),
        ("trivia", "q") => Some(trivia(&payload)),
        ("disguise", "mob") => Some(json!({ "id": 1002, "name": "Poring" })),
        ("bossfight", "boss") => Some(spawn_boss(&payload)),
        ("bossfight", "embed") => Some(boss_embed(&payload)),
        ("bossfight", "gear") => Some(gear_list()),
        ("auction", "create") => Some(create_auction(&state, &payload).await),
        ("auction", "embed") => auction_embed(&state, &payload).await,
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    match answer {
        Some(value) => Json(value).into_response(),
        None => empty(),
    }
}

/// 200 with no body: the backend's way of saying "no result".
fn empty() -> Response {
    StatusCode::OK.into_response()
}

fn is_authorized(state: &AppState, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", state.api_key);
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected)
}

fn validate(state: &AppState, payload: &Value) -> Response {
    if payload["key"].as_str() == Some(state.api_key.as_str()) {
        Json(json!(true)).into_response()
    } else {
        empty()
    }
}

fn item_name(id: u64) -> Option<&'static str> {
    ITEMS.iter().find(|(item_id, _)| *item_id == id).map(|(_, name)| *name)
}

fn monster_name(id: u64) -> Option<&'static str> {
    MONSTERS.iter().find(|(mob_id, _)| *mob_id == id).map(|(_, name)| *name)
}

fn help(payload: &Value) -> Value {
    let commands = payload["commandList"].as_array().cloned().unwrap_or_default();
    let items: Vec<Value> = commands
        .iter()
        .map(|command| {
            json!({
                "name": command["name"],
                "embed": {
                    "title": command["name"],
                    "description": command["description"],
                },
            })
        })
        .collect();
    Value::Array(items)
}

fn item_embed(payload: &Value) -> Option<Value> {
    let id = payload["id"].as_u64()?;
    let name = match payload["data"]["name"].as_str() {
        Some(name) => name.to_string(),
        None => item_name(id)?.to_string(),
    };
    Some(json!({
        "title": name,
        "url": format!("https://www.divine-pride.net/database/item/{id}"),
        "fields": [{ "name": "ID", "value": id.to_string(), "inline": true }],
    }))
}

fn item_browser(payload: &Value) -> Value {
    let items = payload["items"].as_array().cloned().unwrap_or_default();
    let entries: Vec<Value> = items
        .iter()
        .map(|item| {
            json!({
                "id": item["id"],
                "embed": { "title": item["name"], "description": format!("ID: {}", item["id"]) },
            })
        })
        .collect();
    Value::Array(entries)
}

fn reward(payload: &Value) -> Value {
    let id = payload["itemID"].as_u64().unwrap_or_default();
    let name = item_name(id).unwrap_or("Unknown Item");
    json!({
        "title": "Reward",
        "description": format!(
            "{} received {}x {name}",
            payload["username"].as_str().unwrap_or("Unknown"),
            payload["amount"].as_u64().unwrap_or_default(),
        ),
    })
}

fn monster_pages(payload: &Value) -> Option<Value> {
    let id = payload["id"].as_u64()?;
    let name = monster_name(id)?;
    Some(json!([
        { "page": "stats", "embed": { "title": name, "description": "Stats" } },
        { "page": "drops", "embed": { "title": name, "description": "Drops" } },
    ]))
}

fn monster_search(payload: &Value) -> Value {
    let needle = payload["name"].as_str().unwrap_or_default().to_lowercase();
    let matches: Vec<Value> = MONSTERS
        .iter()
        .filter(|(_, name)| name.to_lowercase().contains(&needle))
        .map(|(id, name)| json!({ "id": id, "embed": { "title": name } }))
        .collect();
    Value::Array(matches)
}

fn trivia(payload: &Value) -> Value {
    let lang = payload["lang"].as_str().unwrap_or("en");
    json!({
        "lang": lang,
        "question": "Which monster is pink and bouncy?",
        "answers": ["poring"],
    })
}

fn spawn_boss(payload: &Value) -> Value {
    let id = payload["list"]
        .as_array()
        .and_then(|list| list.first())
        .and_then(Value::as_u64)
        .unwrap_or(1039);
    let name = monster_name(id).unwrap_or("Unknown Boss");
    json!({
        "id": id,
        "name": name,
        "hp": 668000,
        "dropRate": payload["dropRate"],
        "drops": [
            { "id": 1228, "chance": 0.25, "embed": { "title": "Combat Knife" } },
            { "id": 607, "chance": 0.5, "embed": { "title": "Yggdrasil Berry" } },
        ],
    })
}

fn boss_embed(payload: &Value) -> Value {
    let boss = &payload["bossData"];
    json!({
        "title": boss["name"],
        "description": format!("HP: {}", boss["hp"]),
    })
}

fn gear_list() -> Value {
    json!({
        "weapon": [
            { "id": 1101, "embed": { "title": "Sword" } },
            { "id": 1228, "embed": { "title": "Combat Knife" } },
        ],
        "armor": [{ "id": 2301, "embed": { "title": "Cotton Shirt" } }],
        "accessory": [{ "id": 2601, "embed": { "title": "Clip" } }],
    })
}

async fn create_auction(state: &AppState, payload: &Value) -> Value {
    let id = Uuid::new_v4();
    let auction = json!({
        "id": id,
        "item": payload["item"],
        "bids": [],
    });
    state.auctions.write().await.insert(id, auction.clone());
    auction
}

/// Renders a stored auction; an unknown id has no embed.
async fn auction_embed(state: &AppState, payload: &Value) -> Option<Value> {
    let id: Uuid = payload["auction"]["id"].as_str()?.parse().ok()?;
    let auctions = state.auctions.read().await;
    let auction = auctions.get(&id)?;
    let kind = payload["type"].as_str().unwrap_or("info");
    let title = match kind {
        "history" => "Auction won",
        _ => "Auction",
    };
    Some(json!({
        "title": title,
        "description": auction["item"]["name"],
        "footer": { "text": kind },
    }))
}
