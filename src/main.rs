mod chime;
mod clipboard;
mod config;
mod error;
mod models;
mod round;
mod selector;
mod storage;
mod timer;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::chime::TerminalBell;
use crate::clipboard::Clipboard;
use crate::config::{Cli, Config};
use crate::ui::{App, render};

/// 主循环轮询间隔
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// 获取数据目录路径 (~/.local/share/ngword/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("ngword");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 日志写入文件，终端由 TUI 占用
fn init_logging(level: &str) -> anyhow::Result<PathBuf> {
    let log_path = get_data_dir()?.join("ngword.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_env("NGWORD_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(log_path)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;
    let log_path = init_logging(&config.log_level)?;
    tracing::info!(topics = %config.topics_path.display(), "starting");

    // 创建应用状态
    let clipboard = Clipboard::from_config(&config.clipboard);
    let mut app = App::new(
        config,
        clipboard,
        Box::new(TerminalBell::stdout()),
        StdRng::from_entropy(),
    );

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("terminal loop failed: {}", e);
        eprintln!("ログ: {}", log_path.display());
    }
    tracing::info!("exiting");

    Ok(result?)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    // 先画出加载中的状态，再读取题目文件
    terminal.draw(|f| render(f, app))?;
    app.load_topics();

    let mut redraw = true;
    loop {
        if redraw {
            terminal.draw(|f| render(f, app))?;
            redraw = false;
        }

        if event::poll(TICK_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }
                    if ui::handle_key_event(app, key.code, Instant::now())? {
                        break;
                    }
                    redraw = true;
                }
                Event::Resize(_, _) => redraw = true,
                _ => {}
            }
        }

        if app.tick(Instant::now()) {
            redraw = true;
        }
    }
    Ok(())
}
