use axum::extract::Json;
use serde_json::{json, Value};

pub async fn check() -> Json<Value> {
    Json(json!({ "message": "It works well" }))
}
