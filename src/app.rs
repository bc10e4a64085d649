use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::engine::progress::ProgressEngine;
use crate::session::SessionNotice;
use crate::session::daily::{DAY_CYCLE_MAX, DailyOutcome, DailySession};
use crate::session::list::ListSession;
use crate::session::matching::{CardPos, Column, MatchingSession, SelectOutcome};
use crate::session::typing::{SubmitOutcome, TypingSession};
use crate::store::json_store::JsonStore;
use crate::store::schema::{DayRange, ProgressData};
use crate::store::users::UserRegistry;
use crate::ui::components::menu::Menu;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Daily,
    Typing,
    Matching,
    List,
    Stats,
    Users,
    RangePrompt,
}

/// What a committed day prompt should launch: a range-pooled mode, or a
/// jump of the daily pass to a single chosen day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeTarget {
    Daily,
    Typing,
    Matching,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingKind {
    /// Daily card auto-advance after a grade.
    DailyAdvance,
    /// Typing drill auto-advance after a correct answer.
    TypingAdvance,
    /// Clear a mismatched card pair's highlight.
    MatchingUnselect(CardPos, CardPos),
}

/// One armed UX timer. Only one is live at a time; arming a new one
/// cancels the old, which is what makes rapid input cascade-safe.
pub struct PendingAction {
    pub due: Instant,
    pub kind: PendingKind,
}

pub struct App {
    pub screen: AppScreen,
    pub catalog: Catalog,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub store: Option<JsonStore>,
    pub users: UserRegistry,
    pub progress: ProgressData,

    pub daily: Option<DailySession>,
    pub typing: Option<TypingSession>,
    pub matching: Option<MatchingSession>,
    pub list: ListSession,

    pub typing_input: LineInput,
    pub search_input: LineInput,
    pub search_active: bool,
    pub matching_cursor: CardPos,

    pub range_target: RangeTarget,
    pub range_input: LineInput,

    pub pending: Option<PendingAction>,
    pub notice: Option<String>,

    pub users_selected: usize,
    pub users_create_input: Option<LineInput>,
    pub users_confirm_delete: bool,

    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(catalog: Catalog, config: Config) -> Self {
        Self::with_store(catalog, config, JsonStore::new().ok())
    }

    pub fn with_store(catalog: Catalog, config: Config, store: Option<JsonStore>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        let (users, progress) = match &store {
            Some(s) => {
                let users = UserRegistry::new(s.load_registry());
                let progress = s.load_progress(users.active());
                (users, progress)
            }
            None => (
                UserRegistry::new(Default::default()),
                ProgressData::default(),
            ),
        };

        Self {
            screen: AppScreen::Menu,
            catalog,
            config,
            theme,
            menu,
            store,
            users,
            progress,
            daily: None,
            typing: None,
            matching: None,
            list: ListSession::new(),
            typing_input: LineInput::new(),
            search_input: LineInput::new(),
            search_active: false,
            matching_cursor: (Column::Left, 0),
            range_target: RangeTarget::Typing,
            range_input: LineInput::new(),
            pending: None,
            notice: None,
            should_quit: false,
            users_selected: 0,
            users_create_input: None,
            users_confirm_delete: false,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn persist_progress(&self) {
        if let Some(store) = &self.store {
            let _ = store.save_progress(self.users.active(), &self.progress);
        }
    }

    fn persist_registry(&self) {
        if let Some(store) = &self.store {
            let _ = store.save_registry(&self.users.data);
        }
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        self.pending = None;
        self.notice = None;
        self.search_active = false;
    }

    // ---- daily mode ----

    pub fn start_daily(&mut self) {
        let day = self.progress.last_day_number;
        let session = DailySession::new(&self.catalog, day);
        if session.is_exhausted() {
            self.notice = Some(SessionNotice::EmptyDay(day).message());
        } else {
            self.notice = None;
        }
        self.daily = Some(session);
        self.screen = AppScreen::Daily;
        self.pending = None;
    }

    pub fn daily_reveal(&mut self) {
        if let Some(daily) = &mut self.daily {
            daily.reveal();
        }
    }

    /// Grade the current card; a short timer then advances it so the user
    /// sees the verdict before the card flips.
    pub fn daily_grade(&mut self, is_correct: bool) {
        // Inside the advance window a repeat press would hit set_status's
        // toggle path and clear the grade that was just recorded
        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.kind == PendingKind::DailyAdvance)
        {
            return;
        }
        let Some(mut daily) = self.daily.take() else {
            return;
        };
        let engine = ProgressEngine::new(&self.catalog);
        let outcome = daily.grade(&engine, &mut self.progress, is_correct);
        self.daily = Some(daily);

        match outcome {
            DailyOutcome::Graded(_) => {
                self.persist_progress();
                self.arm(
                    PendingKind::DailyAdvance,
                    Duration::from_millis(self.config.daily_advance_ms),
                );
            }
            // Grading an exhausted (empty) day moves past it, one keypress
            // per day, so an empty stretch never auto-cascades
            DailyOutcome::DayFinished => self.finish_daily_day(),
            DailyOutcome::Revealed => {}
        }
    }

    fn daily_advance(&mut self) {
        let Some(daily) = &mut self.daily else {
            return;
        };
        if daily.advance() == Some(DailyOutcome::DayFinished) {
            self.finish_daily_day();
        }
    }

    /// End-of-day handling: the sequential pass completes the day outright
    /// and rolls to the next day number.
    fn finish_daily_day(&mut self) {
        let Some(daily) = &self.daily else {
            return;
        };
        let day = daily.day;
        let engine = ProgressEngine::new(&self.catalog);
        engine.complete_day_override(&mut self.progress, day);

        let next = DailySession::next_day_number(day);
        self.progress.last_day_number = next;
        self.persist_progress();

        let session = DailySession::new(&self.catalog, next);
        if session.is_exhausted() {
            // Do not cascade through further empty days; surface it and wait
            self.notice = Some(SessionNotice::EmptyDay(next).message());
        } else {
            self.notice = None;
        }
        self.daily = Some(session);
    }

    // ---- range prompt ----

    pub fn open_range_prompt(&mut self, target: RangeTarget) {
        let prefill = match target {
            RangeTarget::Daily => self.progress.last_day_number.to_string(),
            RangeTarget::Typing => {
                let last = self.progress.last_typing_range;
                format!("{}-{}", last.start, last.end)
            }
            RangeTarget::Matching => {
                let last = self.progress.last_matching_range;
                format!("{}-{}", last.start, last.end)
            }
        };
        self.range_target = target;
        self.range_input.clear();
        for ch in prefill.chars() {
            self.range_input.insert(ch);
        }
        self.notice = None;
        self.screen = AppScreen::RangePrompt;
    }

    /// Parse `"start-end"` (or a bare `"day"`). None means unparseable.
    pub fn parse_range(text: &str) -> Option<DayRange> {
        let text = text.trim();
        if let Some((a, b)) = text.split_once('-') {
            let start = a.trim().parse().ok()?;
            let end = b.trim().parse().ok()?;
            Some(DayRange::new(start, end))
        } else {
            let day = text.parse().ok()?;
            Some(DayRange::new(day, day))
        }
    }

    pub fn commit_range(&mut self) {
        let Some(range) = Self::parse_range(self.range_input.value()) else {
            self.notice = Some("Enter a range like 1-10".to_string());
            return;
        };
        if self.range_target == RangeTarget::Daily {
            self.jump_daily_day(range);
            return;
        }
        if !range.is_ordered() {
            self.notice = Some(
                SessionNotice::UnorderedRange {
                    start: range.start,
                    end: range.end,
                }
                .message(),
            );
            return;
        }
        match self.range_target {
            RangeTarget::Typing => self.start_typing(range),
            RangeTarget::Matching => self.start_matching(range),
            RangeTarget::Daily => {}
        }
    }

    /// Jump the sequential daily pass to a chosen day and persist it.
    fn jump_daily_day(&mut self, range: DayRange) {
        let day = range.start;
        if range.start != range.end || !(1..=DAY_CYCLE_MAX).contains(&day) {
            self.notice = Some(format!("Enter a single day between 1 and {DAY_CYCLE_MAX}"));
            return;
        }
        self.progress.last_day_number = day;
        self.persist_progress();
        self.start_daily();
    }

    // ---- typing mode ----

    pub fn start_typing(&mut self, range: DayRange) {
        match TypingSession::from_range(&self.catalog, range, &mut self.rng) {
            Some(session) => {
                self.typing = Some(session);
                self.typing_input.clear();
                self.progress.last_typing_range = range;
                self.persist_progress();
                self.notice = None;
                self.pending = None;
                self.screen = AppScreen::Typing;
            }
            None => {
                self.notice = Some(
                    SessionNotice::EmptyRange {
                        start: range.start,
                        end: range.end,
                    }
                    .message(),
                );
            }
        }
    }

    pub fn typing_submit(&mut self) {
        let Some(typing) = &mut self.typing else {
            return;
        };
        match typing.submit(self.typing_input.value()) {
            SubmitOutcome::Correct => {
                self.arm(
                    PendingKind::TypingAdvance,
                    Duration::from_millis(self.config.typing_advance_ms),
                );
            }
            SubmitOutcome::AdvanceRequested => self.typing_advance(),
            SubmitOutcome::Incorrect | SubmitOutcome::Ignored => {}
        }
    }

    pub fn typing_retry(&mut self) {
        if let Some(typing) = &mut self.typing {
            typing.retry();
            self.typing_input.clear();
        }
    }

    pub fn typing_hint(&mut self) {
        if let Some(typing) = &mut self.typing {
            typing.hint();
        }
    }

    pub fn typing_reveal(&mut self) {
        if let Some(typing) = &mut self.typing {
            typing.reveal_answer();
        }
    }

    pub fn typing_advance(&mut self) {
        // A manual advance also cancels any armed auto-advance
        self.pending = None;
        if let Some(typing) = &mut self.typing {
            typing.advance();
            self.typing_input.clear();
        }
    }

    // ---- matching mode ----

    pub fn start_matching(&mut self, range: DayRange) {
        match MatchingSession::from_range(
            &self.catalog,
            range,
            self.config.matching_board_size,
            &mut self.rng,
        ) {
            Some(session) => {
                self.matching = Some(session);
                self.matching_cursor = (Column::Left, 0);
                self.progress.last_matching_range = range;
                self.persist_progress();
                self.notice = None;
                self.pending = None;
                self.screen = AppScreen::Matching;
            }
            None => {
                self.notice = Some(
                    SessionNotice::EmptyRange {
                        start: range.start,
                        end: range.end,
                    }
                    .message(),
                );
            }
        }
    }

    pub fn matching_select(&mut self) {
        // Resolve any outstanding mismatch flash before the next pick
        if let Some(action) = self.pending.take() {
            if let PendingKind::MatchingUnselect(a, b) = action.kind {
                self.matching_unselect(a, b);
            } else {
                self.pending = Some(action);
            }
        }

        let cursor = self.matching_cursor;
        let Some(matching) = &mut self.matching else {
            return;
        };
        if let SelectOutcome::Mismatch { first, second } = matching.select(cursor) {
            self.arm(
                PendingKind::MatchingUnselect(first, second),
                Duration::from_millis(self.config.mismatch_flash_ms),
            );
        }
    }

    fn matching_unselect(&mut self, a: CardPos, b: CardPos) {
        if let Some(matching) = &mut self.matching {
            matching.unselect(a);
            matching.unselect(b);
        }
    }

    pub fn matching_move(&mut self, delta: i32) {
        let Some(matching) = &self.matching else {
            return;
        };
        let len = match self.matching_cursor.0 {
            Column::Left => matching.left.len(),
            Column::Right => matching.right.len(),
        };
        if len == 0 {
            return;
        }
        let idx = self.matching_cursor.1 as i32 + delta;
        self.matching_cursor.1 = idx.rem_euclid(len as i32) as usize;
    }

    pub fn matching_switch_column(&mut self) {
        let Some(matching) = &self.matching else {
            return;
        };
        let (column, len) = match self.matching_cursor.0 {
            Column::Left => (Column::Right, matching.right.len()),
            Column::Right => (Column::Left, matching.left.len()),
        };
        self.matching_cursor.0 = column;
        if len > 0 {
            self.matching_cursor.1 = self.matching_cursor.1.min(len - 1);
        }
    }

    // ---- list mode ----

    pub fn start_list(&mut self) {
        self.search_active = false;
        self.search_input.clear();
        self.list = ListSession::new();
        self.notice = None;
        self.screen = AppScreen::List;
    }

    pub fn list_grade(&mut self, status: crate::store::schema::WordStatus) {
        let rows = self.list.rows(&self.catalog, &self.progress);
        let Some(row) = rows.get(self.list.selected) else {
            return;
        };
        let engine = ProgressEngine::new(&self.catalog);
        self.list.grade(&engine, &mut self.progress, row, status);
        self.persist_progress();
    }

    pub fn list_apply_search(&mut self) {
        self.list.set_query(self.search_input.value().to_string());
    }

    // ---- users ----

    pub fn open_users(&mut self) {
        self.users_selected = 0;
        self.users_create_input = None;
        self.users_confirm_delete = false;
        self.notice = None;
        self.screen = AppScreen::Users;
    }

    /// Strict hand-off: persist the outgoing user's record, then load the
    /// incoming one. Selecting the already-active user is a no-op.
    pub fn switch_user(&mut self, name: &str) {
        self.persist_progress();
        if !self.users.set_active(name) {
            return;
        }
        self.persist_registry();
        self.progress = match &self.store {
            Some(store) => store.load_progress(name),
            None => ProgressData::default(),
        };
        // Sessions belong to the outgoing user
        self.daily = None;
        self.typing = None;
        self.matching = None;
        self.pending = None;
    }

    pub fn create_user(&mut self, name: &str) {
        match self.users.create(name) {
            Ok(name) => {
                self.persist_registry();
                self.switch_user(&name);
                self.notice = None;
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    /// Delete the selected profile and its record. The reserved default
    /// never deletes; its progress can only be overwritten by use.
    pub fn delete_selected_user(&mut self) {
        let names = self.users.all_names();
        let Some(name) = names.get(self.users_selected).cloned() else {
            return;
        };
        let was_active = self.users.active() == name;
        if !self.users.remove(&name) {
            self.notice = Some("The default profile cannot be deleted".to_string());
            return;
        }
        self.persist_registry();
        if let Some(store) = &self.store {
            store.delete_progress(&name);
        }
        if was_active {
            self.progress = match &self.store {
                Some(store) => store.load_progress(self.users.active()),
                None => ProgressData::default(),
            };
            self.daily = None;
            self.typing = None;
            self.matching = None;
            self.pending = None;
        }
        self.users_selected = 0;
    }

    // ---- timers ----

    fn arm(&mut self, kind: PendingKind, delay: Duration) {
        self.pending = Some(PendingAction {
            due: Instant::now() + delay,
            kind,
        });
    }

    /// Called on every event-loop tick; fires the armed timer when due.
    pub fn on_tick(&mut self) {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| Instant::now() >= p.due);
        if !due {
            return;
        }
        let Some(action) = self.pending.take() else {
            return;
        };
        match action.kind {
            PendingKind::DailyAdvance => self.daily_advance(),
            PendingKind::TypingAdvance => {
                if let Some(typing) = &mut self.typing {
                    typing.advance();
                    self.typing_input.clear();
                }
            }
            PendingKind::MatchingUnselect(a, b) => self.matching_unselect(a, b),
        }
    }
}
