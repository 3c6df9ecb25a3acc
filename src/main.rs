use mazegrid::app::{App, Settings};
use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    let settings = Settings::from_env();

    // Log to a file so the menu and animations keep the terminal to themselves
    std::fs::create_dir_all(settings.logs_dir())?;
    let file_appender = tracing_appender::rolling::daily(settings.logs_dir(), "mazegrid.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    let stdin = std::io::stdin();
    let mut app = App::new(settings, stdin.lock(), std::io::stdout());
    app.run()
}
