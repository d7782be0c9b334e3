use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::BackendName;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::StatusKind;
use crate::domain::models::TextArea;
use crate::domain::services::AppState;
use crate::domain::services::EventsService;

fn hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::Magenta;
    }

    let red = u8::from_str_radix(&hex[0..2], 16).unwrap_or(200);
    let green = u8::from_str_radix(&hex[2..4], 16).unwrap_or(120);
    let blue = u8::from_str_radix(&hex[4..6], 16).unwrap_or(220);
    return Color::Rgb(red, green, blue);
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    return Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1];
}

fn render_session<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let session = app_state.sessions.active();
    if session.is_none() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("No comic yet. Type a story idea below and press Enter."),
            Line::from("Tab cycles example ideas, CTRL+P flips between 1 and 2 pages."),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("inkstrip"),
        );

        frame.render_widget(empty, rect);
        return;
    }

    let session = session.unwrap();
    let accent = hex_color(&session.gradient_from);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("\"{}\"", session.story_idea),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Session {} | requested {} page(s) | received {}",
            session.id,
            session.pages_requested.as_usize(),
            session.pages.len()
        )),
        Line::from(""),
    ];

    for (idx, page) in session.pages.iter().enumerate() {
        let mut style = Style::default();
        let mut marker = "  ";
        if app_state.viewer.index() == Some(idx) {
            style = Style::default().fg(accent).add_modifier(Modifier::BOLD);
            marker = "> ";
        }

        lines.push(Line::from(Span::styled(
            format!("{marker}{}. {}", page.page_number, page.display_title()),
            style,
        )));
    }

    let pages = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent))
            .title("inkstrip")
            .padding(Padding::new(1, 1, 0, 0)),
    );

    frame.render_widget(pages, rect);
}

fn render_status<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let line = match &app_state.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => Color::Green,
                StatusKind::Error => Color::Red,
            };
            Line::from(Span::styled(
                status.text.to_string(),
                Style::default().fg(color),
            ))
        }
        None => Line::from(format!(
            "Enter: generate | Tab: example idea | CTRL+O: viewer | CTRL+E: export | CTRL+P: pages ({}) | CTRL+R: regenerate | CTRL+C: quit",
            app_state.page_count.as_usize()
        )),
    };

    frame.render_widget(Paragraph::new(line), rect);
}

fn render_viewer<B: Backend>(frame: &mut Frame<B>, area: Rect, app_state: &AppState) {
    let session = app_state.sessions.active();
    if session.is_none() {
        return;
    }

    let session = session.unwrap();
    let index = app_state.viewer.index().unwrap_or(0);
    if index >= session.pages.len() {
        return;
    }

    let page = &session.pages[index];
    let accent = hex_color(&session.gradient_from);
    let rect = centered_rect(70, 60, area);

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            page.display_title(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Image: {}", page.image_url)),
        Line::from(""),
        Line::from("Left/Right: navigate | Esc: close"),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(accent))
            .title(format!(
                " Page {} of {} ",
                index + 1,
                session.pages.len()
            ))
            .padding(Padding::new(1, 1, 0, 0)),
    );

    frame.render_widget(Clear, rect);
    frame.render_widget(body, rect);
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let loading = Loading::default();

    loop {
        terminal.draw(|frame| {
            let frame_size = frame.size();
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Max(1),
                    Constraint::Max(4),
                ])
                .split(frame_size);

            render_session(frame, layout[0], app_state);
            render_status(frame, layout[1], app_state);

            if app_state.waiting_for_backend {
                loading.render(frame, layout[2]);
            } else {
                frame.render_widget(textarea.widget(), layout[2]);
            }

            if app_state.viewer.is_open() {
                render_viewer(frame, frame_size, app_state);
            }
        })?;

        match events.next().await? {
            Event::GenerationComplete(request, pages) => {
                app_state.handle_generation_complete(request, pages);
                textarea = TextArea::default();
            }
            Event::GenerationFailed(reason) => {
                app_state.handle_generation_failed(&reason);
            }
            Event::ExportComplete(file_path) => {
                app_state.handle_export_complete(&file_path);
            }
            Event::ExportFailed(reason) => {
                app_state.handle_export_failed(&reason);
            }
            Event::KeyboardCTRLC() => break,
            Event::KeyboardEnter() => {
                if app_state.viewer.is_open() {
                    app_state.viewer.close();
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                app_state.submit_prompt(&input_str, &tx)?;
            }
            Event::KeyboardEsc() => {
                app_state.viewer.close();
            }
            Event::KeyboardCTRLO() => {
                app_state.open_viewer();
            }
            Event::KeyboardCTRLE() => {
                app_state.request_export(&tx)?;
            }
            Event::KeyboardCTRLP() => {
                app_state.toggle_page_count();
            }
            Event::KeyboardCTRLR() => {
                app_state.resubmit_last(&tx)?;
            }
            Event::KeyboardTab() => {
                if !app_state.waiting_for_backend && !app_state.viewer.is_open() {
                    let prompt = app_state.next_example();
                    textarea = TextArea::default();
                    textarea.insert_str(prompt);
                }
            }
            Event::KeyboardLeft() => {
                if app_state.viewer.is_open() {
                    app_state.viewer_prev();
                } else if !app_state.waiting_for_backend {
                    textarea.input(Input {
                        key: Key::Left,
                        ctrl: false,
                        alt: false,
                    });
                }
            }
            Event::KeyboardRight() => {
                if app_state.viewer.is_open() {
                    app_state.viewer_next();
                } else if !app_state.waiting_for_backend {
                    textarea.input(Input {
                        key: Key::Right,
                        ctrl: false,
                        alt: false,
                    });
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.waiting_for_backend && !app_state.viewer.is_open() {
                    textarea.insert_str(text);
                }
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.waiting_for_backend && !app_state.viewer.is_open() {
                    textarea.input(input);
                }
            }
            Event::UITick() => continue,
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let backend_name = BackendName::parse(Config::get(ConfigKey::Backend))?;
    let mut app_state = AppState::new(backend_name).await?;

    start_loop(&mut terminal, &mut app_state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
