use crossterm::event::{self, Event};
use crossterm::{execute, terminal};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use xiangqi_client::app::{AppEvent, Runtime};
use xiangqi_client::config::ClientConfig;
use xiangqi_client::network::HttpBackend;
use xiangqi_client::ui::{self, Input};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::load_or_default();
    init_logging(&config.log_file)?;
    info!(backend = %config.backend_url, "starting");

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run(config).await;

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Err(e) = &res {
        error!(error = %e, "exited with error");
    }
    res
}

/// 画面は raw モードなのでログはファイルへ
fn init_logging(path: &str) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run(config: ClientConfig) -> anyhow::Result<()> {
    let game = match ui::selection::start_menu(&config)? {
        Some(game) => game,
        None => return Ok(()),
    };
    info!(?game, "game selected");

    let backend = HttpBackend::new(&config.backend_url, config.request_timeout())?;
    let mut runtime = Runtime::new(backend, config.timing, game);

    let tx = runtime.sender();
    std::thread::spawn(move || loop {
        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(e) => {
                error!(error = %e, "input thread stopped");
                let _ = tx.send(AppEvent::Input(Input::Quit));
                break;
            }
        };
        if let Some(input) = ui::map_key(key) {
            if tx.send(AppEvent::Input(input)).is_err() || input == Input::Quit {
                break;
            }
        }
    });

    runtime.run().await
}
