//! Smush Backend Binary
//!
//! Serves the match-tracker API on BIND_ADDR (e.g. 0.0.0.0:8888).

#[tokio::main]
async fn main() {
    smush_core::log();
    smush_core::kys();
    smush_server::run().await.unwrap();
}
