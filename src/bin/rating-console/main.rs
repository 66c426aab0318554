use anyhow::Context;
use restaurant_ranking::{App, AppConfig};
use tokio::io::{AsyncBufReadExt, BufReader};

mod handlers;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("fail to setup logging")?;

    let mut app = App::new(config);
    tracing::info!("{} restaurants loaded", app.total_count());
    println!("{}", handlers::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("fail to read from stdin")?
    {
        match handlers::handle_line(&mut app, &line) {
            handlers::Reply::Text(text) => println!("{text}"),
            handlers::Reply::Silent => (),
            handlers::Reply::Quit => break,
        }
    }

    Ok(())
}
