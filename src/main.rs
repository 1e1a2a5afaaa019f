mod config;
mod error;
mod models;
mod ui;

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::{LOG_ENV, config_path, load_config, log_path};
use crate::error::Result;
use crate::ui::{App, render};

/// 打开日志文件；路径不可用或打不开时返回 None
fn open_log_file(log_path: Result<PathBuf>) -> Option<File> {
    let log_path = log_path.ok()?;
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .ok()
}

/// 日志写入文件，避免干扰终端界面；没有文件时丢弃日志
fn setup_logging(log_file: Option<File>, default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init(),
    }
}

fn main() -> Result<()> {
    // 加载配置 (~/.config/featureboard/config.toml)
    let config_path = config_path()?;
    let config = load_config(&config_path)?;

    setup_logging(open_log_file(log_path()), &config.log_filter);
    tracing::info!(
        config = %config_path.display(),
        seeds = config.suggestions.len(),
        sort_key = %config.sort_key,
        "featureboard starting"
    );

    // 创建应用状态
    let mut app = App::new(config.into_store());

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("terminal loop failed: {}", e);
    }
    tracing::info!(suggestions = app.store.len(), "featureboard exiting");

    result.map_err(Into::into)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()?
            && key.kind == crossterm::event::KeyEventKind::Press
            && ui::handle_key_event(app, key.code)
        {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::log_path_in;

    #[test]
    fn test_open_log_file_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_log_file(log_path_in(dir.path())).is_some());
        assert!(dir.path().join("featureboard").join("featureboard.log").exists());
    }

    #[test]
    fn test_open_log_file_falls_back_when_data_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_home = dir.path().join("data_home");
        fs::write(&data_home, "").unwrap();

        assert!(open_log_file(log_path_in(&data_home)).is_none());
    }

    #[test]
    fn test_open_log_file_without_data_dir() {
        assert!(open_log_file(Err(crate::error::Error::NoDataDir)).is_none());
    }
}
