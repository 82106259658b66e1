//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod topic;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::logic::MSG_MANUAL_COPY;
use super::state::{App, AppMode, DataStatus, Dialog};
use crate::timer::TimerState;
use components::{centered_rect, key_hint, render_dialog_framework, render_input_widget};
use topic::{ListEntry, TopicView};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题与状态
            Constraint::Min(10),   // 题目
            Constraint::Length(5), // 计时器与答案
            Constraint::Length(5), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_topic(frame, app, chunks[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);
    render_timer(frame, app, bottom[0]);
    render_answer(frame, app, bottom[1]);

    render_help(frame, app, chunks[3]);

    // 渲染弹窗
    match &app.mode {
        AppMode::EditingRounds => render_rounds_dialog(frame, app),
        AppMode::Dialog(dialog) => render_message_dialog(frame, dialog),
        AppMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let status_color = match app.status {
        DataStatus::Loading => Color::Yellow,
        DataStatus::Loaded(_) => Color::Green,
        DataStatus::Failed => Color::Red,
    };
    let loaded_at = app
        .loaded_at
        .map(|t| format!(" ({} 読込)", t.format("%H:%M")))
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(
            "NGワード ゲームマスター",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{}{}", app.status.label(), loaded_at),
            Style::default().fg(status_color),
        ),
        Span::raw("   "),
        Span::styled(
            format!("ラウンド {}", app.round.round_count),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let title = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_topic(frame: &mut Frame, app: &App, area: Rect) {
    let Some(topic) = app.current_topic() else {
        let hint = if app.can_draw() {
            "[d] でお題を引く"
        } else {
            "お題データがありません"
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().title("お題").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let view = TopicView::project(topic, &app.round.ng_words);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            view.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("カテゴリ: {}", view.category)),
        Line::from(format!("学年: {}", view.grade)),
        Line::from(format!("難易度: {}", view.difficulty)),
    ];
    if !view.aliases.is_empty() {
        lines.push(Line::from(view.aliases.clone()));
    }
    if !view.notes.is_empty() {
        lines.push(Line::from(format!("メモ: {}", view.notes)));
    }

    let details = Paragraph::new(lines)
        .block(Block::default().title("お題").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(details, columns[0]);

    frame.render_widget(entry_list("NG候補", &view.ban_list), columns[1]);
    frame.render_widget(entry_list("NGワード", &view.picked), columns[2]);
}

fn entry_list<'a>(title: &'a str, entries: &[ListEntry]) -> List<'a> {
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let style = if entry.emphasized {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(Span::styled(format!("・{}", entry.text), style)))
        })
        .collect();

    List::new(items).block(Block::default().title(title).borders(Borders::ALL))
}

fn render_timer(frame: &mut Frame, app: &App, area: Rect) {
    let timer = &app.round.timer;
    let value_style = if timer.is_warning() {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    let state = match timer.state() {
        TimerState::Idle => "待機中",
        TimerState::Running => "進行中",
        TimerState::Paused => "一時停止",
    };

    let text = vec![
        Line::from(Span::styled(timer.display(), value_style)),
        Line::from(Span::styled(state, Style::default().fg(Color::Gray))),
    ];
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().title("タイマー").borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_answer(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.current_topic() {
        Some(topic) if app.round.answer_revealed => Line::from(Span::styled(
            topic.topic.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Some(_) => Line::from(Span::styled(
            "[a] で答えを表示",
            Style::default().fg(Color::DarkGray),
        )),
        None => Line::from(""),
    };

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(Block::default().title("答え").borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let controls = app.round.timer.controls();
    let copy_label = if app.copy_feedback_until.is_some() {
        "コピーしました"
    } else {
        "DMコピー"
    };

    let mut topic_keys = Vec::new();
    topic_keys.extend(key_hint("d", "お題を引く", app.can_draw()));
    topic_keys.extend(key_hint("n", "引き直し", app.can_draw()));
    topic_keys.extend(key_hint("c", copy_label, app.can_copy()));
    topic_keys.extend(key_hint("a", "答え", app.can_reveal()));
    topic_keys.extend(key_hint("l", "再読込", true));

    let mut timer_keys = Vec::new();
    timer_keys.extend(key_hint("space", "開始/停止", true));
    timer_keys.extend(key_hint("s", "開始", controls.start));
    timer_keys.extend(key_hint("x", "停止", controls.stop));
    timer_keys.extend(key_hint("r", "リセット", controls.reset));
    timer_keys.extend(key_hint("+/-/e", "ラウンド", true));
    timer_keys.extend(key_hint("q", "終了", true));

    let message = Line::from(Span::styled(
        app.message.clone().unwrap_or_default(),
        Style::default().fg(Color::Cyan),
    ));

    let help = Paragraph::new(vec![Line::from(topic_keys), Line::from(timer_keys), message])
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn render_rounds_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(40, 20, frame.area());
    let inner = render_dialog_framework(frame, area, "ラウンド数");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    render_input_widget(
        frame,
        chunks[0],
        "ラウンド",
        &app.input_buffer,
        true,
        Color::Yellow,
    );

    let hint = Paragraph::new("Enter で確定、Esc で取消").style(Style::default().fg(Color::Gray));
    frame.render_widget(hint, chunks[1]);
}

fn render_message_dialog(frame: &mut Frame, dialog: &Dialog) {
    let area = centered_rect(60, 40, frame.area());

    let (title, body, color) = match dialog {
        Dialog::Error(message) => ("エラー", message.clone(), Color::Red),
        Dialog::ManualCopy(text) => (
            "手動でコピー",
            format!("{}\n\n{}", MSG_MANUAL_COPY, text),
            Color::Yellow,
        ),
    };

    let inner = render_dialog_framework(frame, area, title);
    let widget = Paragraph::new(format!("{}\n\n[Enter] 閉じる", body))
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, inner);
}
