//! List a resource collection with the async `RestService`.
//!
//! Run:
//! `cargo run --example query_items`
//!
//! Optional env vars:
//! - `REST_BASE_URL` (defaults to `https://jsonplaceholder.typicode.com`)
//! - `REST_ITEM_LIMIT` (defaults to `5`)

use restful_client::{BaseService, RestService, Serializable};
use serde_json::{Value, json};

#[derive(Debug, Default)]
struct Todo {
    id: i64,
    title: String,
    completed: bool,
}

impl Serializable for Todo {
    fn serialize(&self) -> Value {
        json!({"id": self.id, "title": self.title, "completed": self.completed})
    }

    fn deserialize(&mut self, input: &Value) {
        if let Some(id) = input.get("id").and_then(Value::as_i64) {
            self.id = id;
        }
        if let Some(title) = input.get("title").and_then(Value::as_str) {
            self.title = title.to_owned();
        }
        if let Some(completed) = input.get("completed").and_then(Value::as_bool) {
            self.completed = completed;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let base_url = std::env::var("REST_BASE_URL")
        .unwrap_or_else(|_| "https://jsonplaceholder.typicode.com".to_owned());
    let limit = std::env::var("REST_ITEM_LIMIT").unwrap_or_else(|_| "5".to_owned());

    let service: RestService<Todo> =
        RestService::new(BaseService::new(base_url)?).with_base_path("/todos");

    let todos = service.query(&[("_limit", limit.as_str())], None).await?;
    for todo in &todos {
        let marker = if todo.completed { "x" } else { " " };
        println!("#{} [{marker}] {}", todo.id, todo.title);
    }
    Ok(())
}
