use clap::Parser;

/// Codepad room relay server.
#[derive(Parser, Debug)]
#[command(name = "codepad-server", about = "WebSocket room relay for collaborative editing")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8000")]
    listen: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, codepad_server::app()).await
}
