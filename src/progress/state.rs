//! Global state for progress display.
//!
//! Bars are kept on a stack; only the most recently acquired bar is drawn.
//! Lock order is `TERM_LOCK`, then `ACTIVE`, then a bar's own state.
//! `TERM_LOCK` is never held while caller code runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex, OnceLock};
use std::time::{Duration, Instant};

use console::Term;

use super::bar::{ProgressBarChars, render_line};

/// Minimum time between redraws of an unfinished bar.
const REDRAW_INTERVAL: Duration = Duration::from_millis(50);

static ENV_NO_PROGRESS: OnceLock<bool> = OnceLock::new();

/// Checks if an environment variable is set to a truthy value ("1" or "true").
fn check_env_bool(var_name: &str) -> bool {
    std::env::var(var_name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Returns whether progress drawing is disabled.
///
/// Drawing is disabled when the `CLX_NO_PROGRESS` environment variable is set to
/// `1` or `true`. Disabled bars still count items; they are just never drawn.
#[must_use]
pub fn is_disabled() -> bool {
    *ENV_NO_PROGRESS.get_or_init(|| check_env_bool("CLX_NO_PROGRESS"))
}

/// Global terminal lock for synchronizing output operations.
pub(crate) static TERM_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Bars currently in scope, innermost last.
static ACTIVE: Mutex<Vec<Arc<Bar>>> = Mutex::new(Vec::new());

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Number of [`suspend`] calls in progress; bars are not drawn while nonzero.
static SUSPENDED: AtomicUsize = AtomicUsize::new(0);

fn term() -> &'static Term {
    static TERM: LazyLock<Term> = LazyLock::new(Term::stderr);
    &TERM
}

fn drawable() -> bool {
    !is_disabled() && term().is_term()
}

fn suspended() -> bool {
    SUSPENDED.load(Ordering::SeqCst) > 0
}

pub(crate) struct Bar {
    id: usize,
    state: Mutex<BarState>,
}

struct BarState {
    current: usize,
    total: usize,
    start: Instant,
    last_draw: Option<Instant>,
    label: Option<String>,
    chars: ProgressBarChars,
}

impl Bar {
    pub(crate) fn position(&self) -> usize {
        self.state.lock().unwrap().current
    }

    pub(crate) fn length(&self) -> usize {
        self.state.lock().unwrap().total
    }

    pub(crate) fn set_chars(&self, chars: ProgressBarChars) {
        self.state.lock().unwrap().chars = chars;
    }

    pub(crate) fn label(&self) -> Option<String> {
        self.state.lock().unwrap().label.clone()
    }

    pub(crate) fn set_label(&self, label: String) {
        self.state.lock().unwrap().label = Some(label);
    }

    fn render(&self) -> String {
        let mut state = self.state.lock().unwrap();
        state.last_draw = Some(Instant::now());
        render_line(
            state.current,
            state.total,
            state.start.elapsed(),
            term().size().1 as usize,
            state.label.as_deref(),
            &state.chars,
        )
    }
}

/// Returns `true` while at least one progress bar is in scope.
#[must_use]
pub fn is_active() -> bool {
    !ACTIVE.lock().unwrap().is_empty()
}

/// Registers a new bar and draws it.
pub(crate) fn acquire(total: usize) -> Arc<Bar> {
    let bar = Arc::new(Bar {
        id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        state: Mutex::new(BarState {
            current: 0,
            total,
            start: Instant::now(),
            last_draw: None,
            label: None,
            chars: ProgressBarChars::default(),
        }),
    });
    let _guard = TERM_LOCK.lock().unwrap();
    ACTIVE.lock().unwrap().push(bar.clone());
    if drawable() && !suspended() {
        draw(&bar);
    }
    bar
}

/// Advances a bar, redrawing it if it is on top and due for a redraw.
pub(crate) fn advance(bar: &Bar, n: usize) {
    let due = {
        let mut state = bar.state.lock().unwrap();
        state.current = state.current.saturating_add(n);
        state.current >= state.total
            || state
                .last_draw
                .is_none_or(|last| last.elapsed() >= REDRAW_INTERVAL)
    };
    if !due || !drawable() || suspended() {
        return;
    }
    let _guard = TERM_LOCK.lock().unwrap();
    let is_top = ACTIVE
        .lock()
        .unwrap()
        .last()
        .is_some_and(|top| top.id == bar.id);
    if is_top {
        draw(bar);
    }
}

/// Unregisters a bar, leaving its final state on screen.
pub(crate) fn release(bar: &Bar) {
    let _guard = TERM_LOCK.lock().unwrap();
    let next = {
        let mut active = ACTIVE.lock().unwrap();
        active.retain(|b| b.id != bar.id);
        active.last().cloned()
    };
    if !drawable() {
        return;
    }
    let term = term();
    let _ = term.clear_line();
    let _ = term.write_line(&bar.render());
    if let Some(next) = next.filter(|_| !suspended()) {
        draw(&next);
    }
}

/// Runs `f` with the current bar cleared from the screen, then redraws it.
///
/// Use this to write to stderr while a bar is visible without the output being
/// overwritten by the next redraw. No bar is drawn until `f` returns. `f` may
/// log, create or drop bars, and nest further `suspend` calls.
pub fn suspend<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _resume = Suspension::enter();
    f()
}

/// Keeps bars hidden while alive; the outermost one redraws the top bar on drop.
struct Suspension;

impl Suspension {
    fn enter() -> Self {
        let _guard = TERM_LOCK.lock().unwrap();
        if SUSPENDED.fetch_add(1, Ordering::SeqCst) == 0
            && drawable()
            && !ACTIVE.lock().unwrap().is_empty()
        {
            let _ = term().clear_line();
        }
        Suspension
    }
}

impl Drop for Suspension {
    fn drop(&mut self) {
        let _guard = TERM_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        if SUSPENDED.fetch_sub(1, Ordering::SeqCst) != 1 || !drawable() {
            return;
        }
        let top = ACTIVE.lock().unwrap_or_else(|e| e.into_inner()).last().cloned();
        if let Some(top) = top {
            draw(&top);
        }
    }
}

/// Draws a bar in place. Callers must hold `TERM_LOCK`.
fn draw(bar: &Bar) {
    let line = bar.render();
    let term = term();
    let _ = term.clear_line();
    let _ = term.write_str(&line);
}
