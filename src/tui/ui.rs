use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::App;
use crate::config::Config;
use crate::models::{AnalysisStatus, AppMode, Sentiment};
use crate::render::{analysis_lines, post_lines};

const APP_NAME: &str = "InstaFlow AI";

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(3), // Input box
            Constraint::Length(2), // Inline error / file info
            Constraint::Min(0),    // Result
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    match app.mode {
        AppMode::LinkInspector => {
            render_url_input(frame, app, chunks[1]);
            render_url_error(frame, app, chunks[2]);
            render_post(frame, app, chunks[3]);
        }
        AppMode::ContentAi => {
            render_media_input(frame, app, chunks[1]);
            render_media_info(frame, app, chunks[2]);
            render_analysis(frame, app, chunks[3]);
        }
    }
    render_status(frame, app, chunks[4]);

    if let Some(alert) = &app.alert {
        render_alert(frame, alert);
    }

    if app.show_help {
        render_help(frame);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = [AppMode::LinkInspector, AppMode::ContentAi]
        .iter()
        .map(|m| Line::from(m.label()))
        .collect::<Vec<_>>();
    let selected = match app.mode {
        AppMode::LinkInspector => 0,
        AppMode::ContentAi => 1,
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(format!(" {APP_NAME} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_input(frame: &mut Frame, title: &str, value: &str, placeholder: &str, area: Rect) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = if value.is_empty() {
        Line::from(Span::styled(placeholder, Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(format!("> {value}_"))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_url_input(frame: &mut Frame, app: &App, area: Rect) {
    render_input(
        frame,
        " Instagram Link Inspector ",
        &app.url_input,
        "https://www.instagram.com/p/...",
        area,
    );
}

fn render_url_error(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(error) = &app.url_error {
        let paragraph = Paragraph::new(format!("! {error}")).style(Style::default().fg(Color::Red));
        frame.render_widget(paragraph, area);
    }
}

fn render_media_input(frame: &mut Frame, app: &App, area: Rect) {
    render_input(
        frame,
        " Upload Media to Analyze ",
        &app.media_input,
        "Path to an MP4, MOV, JPG or PNG file",
        area,
    );
}

fn render_media_info(frame: &mut Frame, app: &App, area: Rect) {
    if let Some((name, description)) = &app.media_label {
        let line = Line::from(vec![
            Span::styled(format!("{name} "), Style::default().fg(Color::White)),
            Span::styled(description.as_str(), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn status_text(status: AnalysisStatus, idle: &str, ready: Vec<Line<'static>>) -> Vec<Line<'static>> {
    match status {
        AnalysisStatus::Idle => vec![Line::from(idle.to_string())],
        AnalysisStatus::Analyzing => vec![Line::from("Analyzing...")],
        AnalysisStatus::Failed => vec![Line::from("Analysis failed. Press Enter to retry.")],
        AnalysisStatus::NoApiKey => format!(
            "Gemini API key not configured.\n\nAdd it to:\n{}\n\nExample:\ngemini_api_key = \"AIza...\"\n\nor set GEMINI_API_KEY.",
            Config::config_path().display()
        )
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect(),
        AnalysisStatus::Ready => ready,
    }
}

const HEADINGS: [&str; 5] = [
    "AI Summary:",
    "Original Caption:",
    "Vibe Check:",
    "Viral Hashtags:",
    "Caption Ideas:",
];

fn to_lines(lines: Vec<String>, sentiment: Option<Sentiment>) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .map(|l| {
            let style = if HEADINGS.contains(&l.as_str()) {
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
            } else if l.starts_with('#') {
                Style::default().fg(Color::Blue)
            } else if let (Some(s), true) = (sentiment, l.starts_with("Sentiment:")) {
                Style::default().fg(sentiment_color(s))
            } else {
                Style::default()
            };
            Line::from(Span::styled(l, style))
        })
        .collect()
}

fn render_post(frame: &mut Frame, app: &App, area: Rect) {
    let ready = app
        .post
        .as_ref()
        .map(|post| {
            let mut lines = to_lines(post_lines(post, app.wrap_width), None);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Preview: {}", post.thumbnail_or_placeholder()),
                Style::default().fg(Color::DarkGray),
            )));
            lines
        })
        .unwrap_or_default();

    let content = status_text(
        app.post_status,
        "Paste a link and press Enter to extract captions, hashtags and metadata using Gemini AI.",
        ready,
    );

    let block = Block::default()
        .title(" Post ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Neutral => Color::Yellow,
        Sentiment::Negative => Color::Red,
    }
}

fn render_analysis(frame: &mut Frame, app: &App, area: Rect) {
    let ready = app
        .analysis
        .as_ref()
        .map(|result| to_lines(analysis_lines(result, app.wrap_width), Some(result.sentiment)))
        .unwrap_or_default();

    let content = status_text(
        app.media_status,
        "Enter a file path and press Enter. AI will generate captions and hashtags.",
        ready,
    );

    let block = Block::default()
        .title(" AI Insights ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let status = if app.is_busy() {
        "⏳ Analyzing..."
    } else {
        match app.mode {
            AppMode::LinkInspector => "Enter:analyze  Tab:switch  ^O:open post  ^U:clear  F1:help  Esc:quit",
            AppMode::ContentAi => "Enter:analyze  Tab:switch  ^U:clear  F1:help  Esc:quit",
        }
    };

    let paragraph = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_alert(frame: &mut Frame, alert: &str) {
    let area = centered_rect(50, 20, frame.area());

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(format!("{alert}\n\nPress Enter to dismiss"))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = vec![
        "",
        " Views:",
        "   Tab      Switch Link Inspector / Content AI",
        "",
        " Actions:",
        "   Enter    Analyze link or file",
        "   Ctrl+O   Open original post in browser",
        "   Ctrl+U   Clear input",
        "",
        " General:",
        "   F1       Show this help",
        "   Esc      Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
