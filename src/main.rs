mod app;
mod catalog;
mod config;
mod engine;
mod event;
mod session;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen, RangeTarget};
use catalog::Catalog;
use config::Config;
use engine::stats::Summary;
use event::{AppEvent, EventPoller};
use store::schema::WordStatus;
use ui::components::daily_card::DailyCard;
use ui::components::matching_board::MatchingBoard;
use ui::components::stats_panel::StatsPanel;
use ui::components::typing_panel::TypingPanel;
use ui::components::users_panel::UsersPanel;
use ui::components::word_list::WordList;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "vocadr", version, about = "Terminal vocabulary trainer")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short = 'f', long, help = "Vocabulary JSON file")]
    vocabulary: Option<PathBuf>,

    #[arg(short, long, help = "Profile to activate on startup")]
    user: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    config.normalize();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let catalog = match cli
        .vocabulary
        .or_else(|| config.vocabulary_path.clone().map(PathBuf::from))
    {
        Some(path) => Catalog::from_file(&path)?,
        None => Catalog::bundled(),
    };

    let mut app = App::new(catalog, config);
    if let Some(user) = cli.user {
        app.switch_user(&user);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventPoller::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &mut events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Whatever happened, the active record leaves disk consistent
    app.persist_progress();

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventPoller,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        let wake_at = app.pending.as_ref().map(|p| p.due);
        match events.next(wake_at)? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Daily => handle_daily_key(app, key),
        AppScreen::RangePrompt => handle_range_key(app, key),
        AppScreen::Typing => handle_typing_key(app, key),
        AppScreen::Matching => handle_matching_key(app, key),
        AppScreen::List => handle_list_key(app, key),
        AppScreen::Stats => handle_stats_key(app, key),
        AppScreen::Users => handle_users_key(app, key),
    }
}

fn activate_menu_item(app: &mut App, index: usize) {
    match index {
        0 => app.start_daily(),
        1 => app.open_range_prompt(RangeTarget::Typing),
        2 => app.open_range_prompt(RangeTarget::Matching),
        3 => app.start_list(),
        4 => app.screen = AppScreen::Stats,
        5 => app.open_users(),
        _ => {}
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => activate_menu_item(app, 0),
        KeyCode::Char('2') => activate_menu_item(app, 1),
        KeyCode::Char('3') => activate_menu_item(app, 2),
        KeyCode::Char('4') => activate_menu_item(app, 3),
        KeyCode::Char('s') => activate_menu_item(app, 4),
        KeyCode::Char('u') => activate_menu_item(app, 5),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => activate_menu_item(app, app.menu.selected),
        _ => {}
    }
}

fn handle_daily_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.persist_progress();
            app.go_to_menu();
        }
        KeyCode::Char(' ') | KeyCode::Enter => app.daily_reveal(),
        // "I know it" / "I don't know it"
        KeyCode::Char('o') | KeyCode::Right => app.daily_grade(true),
        KeyCode::Char('x') | KeyCode::Left => app.daily_grade(false),
        KeyCode::Char('d') => app.open_range_prompt(RangeTarget::Daily),
        _ => {}
    }
}

fn handle_range_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Enter => app.commit_range(),
        _ => {
            app.range_input.handle_key(key);
        }
    }
}

fn handle_typing_key(app: &mut App, key: KeyEvent) {
    let awaiting_retry = app
        .typing
        .as_ref()
        .is_some_and(|t| t.answered && !t.is_correct && !t.answer_revealed);

    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Enter => app.typing_submit(),
        // After a wrong answer the input is locked; letters become commands
        KeyCode::Char('r') if awaiting_retry => app.typing_retry(),
        KeyCode::Char('h') if awaiting_retry => app.typing_hint(),
        KeyCode::Char('a') if awaiting_retry => app.typing_reveal(),
        _ if awaiting_retry => {}
        _ => {
            app.typing_input.handle_key(key);
        }
    }
}

fn handle_matching_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => app.matching_move(-1),
        KeyCode::Down | KeyCode::Char('j') => app.matching_move(1),
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
            app.matching_switch_column()
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.matching_select(),
        KeyCode::Char('n') => {
            // New board over the same range
            let range = app.progress.last_matching_range;
            app.start_matching(range);
        }
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    if app.search_active {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => app.search_active = false,
            _ => {
                if app.search_input.handle_key(key) {
                    app.list_apply_search();
                }
            }
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Char('/') => app.search_active = true,
        KeyCode::Char('d') => {
            let App { list, catalog, .. } = app;
            list.cycle_day_filter(catalog);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list.selected = app.list.selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let count = app.list.rows(&app.catalog, &app.progress).len();
            if count > 0 {
                app.list.selected = (app.list.selected + 1).min(count - 1);
            }
        }
        KeyCode::Char('1') => app.list_grade(WordStatus::Wrong),
        KeyCode::Char('2') => app.list_grade(WordStatus::Correct),
        KeyCode::Char('3') => app.list_grade(WordStatus::Mastered),
        _ => {}
    }
}

fn handle_stats_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter) {
        app.go_to_menu();
    }
}

fn handle_users_key(app: &mut App, key: KeyEvent) {
    if app.users_create_input.is_some() {
        match key.code {
            KeyCode::Esc => app.users_create_input = None,
            KeyCode::Enter => {
                if let Some(mut input) = app.users_create_input.take() {
                    let name = input.take();
                    app.create_user(&name);
                }
            }
            _ => {
                if let Some(input) = &mut app.users_create_input {
                    input.handle_key(key);
                }
            }
        }
        return;
    }

    if app.users_confirm_delete {
        match key.code {
            KeyCode::Char('y') => {
                app.delete_selected_user();
                app.users_confirm_delete = false;
            }
            KeyCode::Char('n') | KeyCode::Esc => app.users_confirm_delete = false,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.users_selected = app.users_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let count = app.users.all_names().len();
            app.users_selected = (app.users_selected + 1).min(count - 1);
        }
        KeyCode::Enter => {
            if let Some(name) = app.users.all_names().get(app.users_selected).cloned() {
                app.switch_user(&name);
            }
        }
        KeyCode::Char('n') => app.users_create_input = Some(ui::line_input::LineInput::new()),
        KeyCode::Char('x') | KeyCode::Delete => app.users_confirm_delete = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Daily => render_daily(frame, app),
        AppScreen::RangePrompt => render_range_prompt(frame, app),
        AppScreen::Typing => render_typing(frame, app),
        AppScreen::Matching => render_matching(frame, app),
        AppScreen::List => render_list(frame, app),
        AppScreen::Stats => render_stats(frame, app),
        AppScreen::Users => render_users(frame, app),
    }
}

fn header_line(app: &App) -> Paragraph<'_> {
    let colors = &app.theme.colors;
    let info = format!(
        " {} | day {} | {} mastered",
        app.users.active(),
        app.progress.last_day_number,
        app.progress.mastered_words,
    );
    Paragraph::new(Line::from(vec![
        Span::styled(
            " vocadr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()))
}

fn footer_line<'a>(app: &'a App, hints: &'a str) -> Paragraph<'a> {
    let colors = &app.theme.colors;
    match &app.notice {
        Some(notice) => Paragraph::new(Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(colors.warning()),
        ))),
        None => Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(colors.muted()),
        ))),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    frame.render_widget(header_line(app), layout.header);

    let menu_area = ui::layout::centered_rect(50, 80, layout.main);
    frame.render_widget(&app.menu, menu_area);

    frame.render_widget(
        footer_line(app, " [1-4] Modes  [s] Stats  [u] Users  [q] Quit "),
        layout.footer,
    );
}

fn render_daily(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    frame.render_widget(header_line(app), layout.header);

    if let Some(daily) = &app.daily {
        let card_area = ui::layout::centered_rect(60, 70, layout.main);
        frame.render_widget(DailyCard::new(daily, app.theme), card_area);
    }

    frame.render_widget(
        footer_line(
            app,
            " [Space] Reveal  [o] Know it  [x] Don't know  [d] Day  [Esc] Back ",
        ),
        layout.footer,
    );
}

fn render_range_prompt(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    frame.render_widget(header_line(app), layout.header);

    let prompt_area = ui::layout::centered_rect(40, 30, layout.main);
    let title = match app.range_target {
        RangeTarget::Daily => " Daily Study — jump to day ",
        RangeTarget::Typing => " Typing Drill — day range ",
        RangeTarget::Matching => " Matching Game — day range ",
    };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(prompt_area);
    frame.render_widget(block, prompt_area);

    let field = Paragraph::new(Line::from(vec![
        Span::styled(" Days: ", Style::default().fg(colors.muted())),
        Span::styled(app.range_input.value(), Style::default().fg(colors.fg())),
        Span::styled("█", Style::default().fg(colors.accent())),
    ]));
    frame.render_widget(field, inner);

    let hint = match app.range_target {
        RangeTarget::Daily => " Enter a day like 3, then [Enter]  [Esc] Back ",
        _ => " Enter a range like 3-7, then [Enter]  [Esc] Back ",
    };
    frame.render_widget(footer_line(app, hint), layout.footer);
}

fn render_typing(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    frame.render_widget(header_line(app), layout.header);

    if let Some(typing) = &app.typing {
        frame.render_widget(
            TypingPanel::new(typing, &app.typing_input, app.theme),
            layout.main,
        );
    }

    frame.render_widget(
        footer_line(app, " [Enter] Submit / Next  [Esc] Back "),
        layout.footer,
    );
}

fn render_matching(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    frame.render_widget(header_line(app), layout.header);

    if let Some(matching) = &app.matching {
        frame.render_widget(
            MatchingBoard::new(matching, app.matching_cursor, app.theme),
            layout.main,
        );
    }

    frame.render_widget(
        footer_line(
            app,
            " [j/k] Move  [Tab] Column  [Space] Select  [n] New board  [Esc] Back ",
        ),
        layout.footer,
    );
}

fn render_list(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    frame.render_widget(header_line(app), layout.header);

    let rows = app.list.rows(&app.catalog, &app.progress);
    let selected = app.list.selected.min(rows.len().saturating_sub(1));
    frame.render_widget(
        WordList::new(
            &rows,
            selected,
            app.search_input.value(),
            app.list.filter.day,
            app.search_active,
            app.theme,
        ),
        layout.main,
    );

    frame.render_widget(
        footer_line(
            app,
            " [/] Search  [d] Day filter  [1] Wrong [2] Correct [3] Mastered  [Esc] Back ",
        ),
        layout.footer,
    );
}

fn render_stats(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    frame.render_widget(header_line(app), layout.header);

    let summary = Summary::compute(&app.catalog, &app.progress);
    frame.render_widget(
        StatsPanel::new(&summary, app.users.active(), app.theme),
        layout.main,
    );

    frame.render_widget(footer_line(app, " [Esc] Back "), layout.footer);
}

fn render_users(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    frame.render_widget(header_line(app), layout.header);

    let names = app.users.all_names();
    let panel_area = ui::layout::centered_rect(50, 60, layout.main);
    frame.render_widget(
        UsersPanel {
            names: &names,
            active: app.users.active(),
            selected: app.users_selected.min(names.len().saturating_sub(1)),
            create_input: app.users_create_input.as_ref(),
            confirm_delete: app.users_confirm_delete,
            notice: app.notice.as_deref(),
            theme: app.theme,
        },
        panel_area,
    );

    frame.render_widget(footer_line(app, ""), layout.footer);
}
