use serde_json::json;

use waypoint::config::ServerConfig;
use waypoint::http::request::Method;
use waypoint::persist::JsonFile;
use waypoint::router::handler::Handler;
use waypoint::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = ServerConfig::load()?;
    let mut server = Server::new(cfg)?;

    server.attach("mongodb")?;

    server.register(
        "/users",
        &[Method::GET],
        Handler::new("get_users", |_| {
            Ok(json!({"users": ["user1", "user2", "user3"]}))
        }),
    )?;

    server.register(
        "/data",
        &[Method::GET],
        Handler::new("get_data", |_| {
            let document = JsonFile::new("data.json").read()?;
            Ok(document)
        }),
    )?;

    server.register(
        "/echo",
        &[Method::POST, Method::PUT],
        Handler::new("echo_body", |ctx| {
            let body = ctx.json_body().unwrap_or_else(|_| json!(null));
            Ok(json!({"received": body}))
        }),
    )?;

    server.register(
        "/greet/<name>",
        &[Method::GET],
        Handler::new("greet", |ctx| Ok(json!({"name": ctx.param("name")}))),
    )?;

    tracing::info!(
        "Available routes: {}",
        serde_json::to_string_pretty(&server.list_routes())?
    );

    tokio::select! {
        res = server.run() => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
