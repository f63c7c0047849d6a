// src/main.rs
use user_registry::start;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    start::run().await
}
