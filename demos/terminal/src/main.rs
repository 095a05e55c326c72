mod app;

use app::App;

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let room = args.next().unwrap_or_else(|| "lobby".to_string());
    let client = args
        .next()
        .unwrap_or_else(|| format!("guest-{}", std::process::id()));
    let authority = args.next().unwrap_or_else(|| "127.0.0.1:8000".to_string());

    match App::connect(&authority, &room, &client).await {
        Ok(app) => app.run().await,
        Err(err) => eprintln!("{err}"),
    }
}
