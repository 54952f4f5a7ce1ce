//! Exercise the blocking CRUD client against a local server.
//!
//! Run:
//! `cargo run --example blocking_crud`
//!
//! Optional env vars:
//! - `REST_BASE_URL` (defaults to `http://localhost:3000`)

use restful_client::{BlockingBaseService, BlockingRestService, Serializable};
use serde_json::{Value, json};

#[derive(Debug, Default)]
struct Note {
    id: i64,
    body: String,
}

impl Serializable for Note {
    fn serialize(&self) -> Value {
        json!({"id": self.id, "body": self.body})
    }

    fn deserialize(&mut self, input: &Value) {
        if let Some(id) = input.get("id").and_then(Value::as_i64) {
            self.id = id;
        }
        if let Some(body) = input.get("body").and_then(Value::as_str) {
            self.body = body.to_owned();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let base_url =
        std::env::var("REST_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

    let service: BlockingRestService<Note> =
        BlockingRestService::new(BlockingBaseService::new(base_url)?).with_base_path("/notes");

    let created = service.create_one(
        &Note {
            id: 0,
            body: "first".to_owned(),
        },
        None,
    )?;
    println!(
        "create: success={} description={}",
        created.success, created.description
    );

    let Some(id) = created.data.get("id").and_then(|id| id.parse::<i64>().ok()) else {
        println!("server returned no id; stopping here");
        return Ok(());
    };

    match service.get_one(Some(id), None)? {
        Some(note) => println!("fetch: #{} {}", note.id, note.body),
        None => println!("fetch: note {id} not found"),
    }

    let deleted = service.delete_one(Some(id), None)?;
    println!("delete: success={}", deleted.success);
    Ok(())
}
