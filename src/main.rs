mod allocator;
mod data;
mod error;
mod planner;
mod roster;
mod server;
mod store;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    server::run_server().await;
}
