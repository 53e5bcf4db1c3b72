use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

use crate::api::ApiClient;
use crate::app::{App, Field};

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &ApiClient,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app, client.base_url()))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.focus {
                // Form has focus: keystrokes edit the current field.
                Some(field) => match key.code {
                    KeyCode::Esc => app.cancel_form(),
                    KeyCode::Tab => app.focus = Some(field.next()),
                    KeyCode::BackTab => app.focus = Some(field.prev()),
                    KeyCode::Enter => submit(app, client),
                    KeyCode::Backspace => {
                        app.form.field_mut(field).pop();
                    }
                    KeyCode::Char(c) => app.form.field_mut(field).push(c),
                    _ => {}
                },
                // List navigation.
                None => match key.code {
                    KeyCode::Char('q') => return Ok(()), // Quit
                    KeyCode::Char('a') => app.start_creating(),
                    KeyCode::Char('e') => app.start_editing(),
                    KeyCode::Char('c') => {
                        if let Some(id) = app.selected_task().and_then(|t| t.id) {
                            app.complete(id);
                        }
                    }
                    KeyCode::Char('d') => delete_selected(app, client),
                    KeyCode::Char('r') => reload(app, client),
                    KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                    KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                    _ => {}
                },
            }
        }
    }
}

/// Fetch the full list and fold it into the screen state. Failures are
/// logged and the previous state is left untouched.
pub fn reload(app: &mut App, client: &ApiClient) {
    match client.list() {
        Ok(tasks) => app.apply_fetched(tasks),
        Err(err) => tracing::error!("failed to fetch tasks: {err}"),
    }
}

fn submit(app: &mut App, client: &ApiClient) {
    match app.editing {
        Some(id) => {
            let mut task = app.form.to_task();
            task.id = Some(id);
            match client.update(id, &task) {
                Ok(updated) => app.apply_updated(updated),
                // Stay in editing mode with the form intact.
                Err(err) => tracing::error!("failed to update task {id}: {err}"),
            }
        }
        None => match client.create(&app.form.to_task()) {
            Ok(created) => app.apply_created(created),
            Err(err) => tracing::error!("failed to create task: {err}"),
        },
    }
}

fn delete_selected(app: &mut App, client: &ApiClient) {
    let Some(id) = app.selected_task().and_then(|t| t.id) else {
        return;
    };
    match client.delete(id) {
        Ok(()) => app.apply_deleted(id),
        Err(err) => tracing::error!("failed to delete task {id}: {err}"),
    }
}

pub fn draw(f: &mut Frame, app: &App, api_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(5), // form
            Constraint::Min(3),    // task list
            Constraint::Length(1), // key hints
        ])
        .split(f.area());

    draw_header(f, chunks[0], api_url);
    draw_form(f, chunks[1], app);
    draw_list(f, chunks[2], app);
    draw_footer(f, chunks[3], app);
}

fn draw_header(f: &mut Frame, area: Rect, api_url: &str) {
    let title = Line::from(vec![
        Span::styled(
            " tugas ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        Span::styled(api_url, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.editing.is_some() {
        " Update Task "
    } else {
        " Add Task "
    };

    let lines: Vec<Line> = [Field::Title, Field::Deadline, Field::Session]
        .into_iter()
        .map(|field| {
            let focused = app.focus == Some(field);
            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut spans = vec![
                Span::styled(format!("{:<9}", field.label()), label_style),
                Span::raw(app.form.field(field).to_string()),
            ];
            if focused {
                spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
            }
            Line::from(spans)
        })
        .collect();

    let form = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(if app.focus.is_some() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            }),
    );
    f.render_widget(form, area);
}

fn draw_list(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .map(|t| {
            let (title_style, detail_style) = if t.completed {
                (
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                (
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::Gray),
                )
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(t.id.map_or_else(|| "[-] ".to_string(), |id| format!("[#{id}] "))),
                    Span::styled(t.title.clone(), title_style),
                ]),
                Line::from(Span::styled(
                    format!("    Due: {}  Session: {}", t.deadline, t.session),
                    detail_style,
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Tasks ").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let hints: Vec<(&str, &str)> = if app.focus.is_some() {
        vec![
            ("Enter", if app.editing.is_some() { "update" } else { "add" }),
            ("Tab", "next field"),
            ("Esc", "cancel"),
        ]
    } else {
        vec![
            ("q", "quit"),
            ("j/k", "move"),
            ("a", "add"),
            ("e", "edit"),
            ("c", "done"),
            ("d", "delete"),
            ("r", "reload"),
        ]
    };

    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {action} ")));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use ratatui::backend::TestBackend;

    fn sample_app() -> App {
        let mut app = App::new();
        app.tasks = vec![Task {
            id: Some(1),
            title: "Algebra homework".to_string(),
            deadline: "friday".to_string(),
            session: "week 3".to_string(),
            completed: false,
        }];
        app
    }

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app, "https://example.com/posts")).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn draws_form_and_task_list() {
        let text = render(&sample_app());
        assert!(text.contains("Add Task"));
        assert!(text.contains("Title"));
        assert!(text.contains("Algebra homework"));
        assert!(text.contains("Due: friday"));
    }

    #[test]
    fn editing_mode_relabels_the_form() {
        let mut app = sample_app();
        app.start_editing();
        let text = render(&app);
        assert!(text.contains("Update Task"));
        assert!(!text.contains("Add Task"));
    }
}
