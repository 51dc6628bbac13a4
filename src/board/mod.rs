//! Browser binding for the word search.
//!
//! Renders one `Session` into the page, turns mouse and touch events on the
//! grid into `begin` / `extend` / `end`, refreshes the timer once a second and
//! shows the completion message. Expected markup:
//!
//! - `#wordsearch-grid`: container for the letter cells
//! - `#wordsearch-word-list`: container for the word checklist
//! - `#wordsearch-timer` (optional): `MM:SS` display
//! - `#wordsearch-restart` (optional): restart button
//! - `#game-message-modal`, `#game-message-title`, `#game-message-text`
//!   (optional): completion popup, shown by adding class `active`
//!
//! All game rules live in `crate::session`; this file only moves data between
//! the session and the DOM.
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, window};

use crate::puzzle::{Cell, MatchOutcome, PuzzleConfig};
use crate::session::{COMPLETION_BODY, COMPLETION_TITLE, Session};

const CELL_CLASS: &str = "wordsearch-cell";
const WORD_CLASS: &str = "wordsearch-word-item";
const SELECTED: &str = "selected";
const FOUND: &str = "found";
const TICK_MS: i32 = 1000;
const COMPLETION_DELAY_MS: i32 = 500;

/// Runtime board state.
struct BoardState {
    session: Session,
    rng: SmallRng,
    cell_els: Vec<Element>,          // row-major, same layout as the grid
    word_els: Vec<(String, Element)>, // checklist items keyed by word
    timer_el: Option<Element>,
    timer: Option<(i32, Closure<dyn FnMut()>)>, // interval handle + its callback
    // Bumped on every (re)start so a delayed completion popup from an old
    // puzzle does not show up on a new one.
    generation: u32,
}

thread_local! {
    static BOARD_STATE: std::cell::RefCell<Option<BoardState>> = const { std::cell::RefCell::new(None) };
}

pub fn start_board_mode<S: AsRef<str>>(words: &[S], config: PuzzleConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let grid_el = doc
        .get_element_by_id("wordsearch-grid")
        .ok_or_else(|| JsValue::from_str("missing #wordsearch-grid"))?;
    let list_el = doc
        .get_element_by_id("wordsearch-word-list")
        .ok_or_else(|| JsValue::from_str("missing #wordsearch-word-list"))?;

    // Starting again replaces any board already running.
    let previous_generation = BOARD_STATE.with(|cell| {
        cell.borrow_mut().take().map(|mut old| {
            stop_timer(&mut old);
            old.generation
        })
    });

    let mut rng = SmallRng::from_entropy();
    let session = Session::new(words, config, &mut rng, now())?;

    let mut state = BoardState {
        session,
        rng,
        cell_els: Vec::new(),
        word_els: Vec::new(),
        timer_el: doc.get_element_by_id("wordsearch-timer"),
        timer: None,
        generation: previous_generation.map_or(0, |g| g.wrapping_add(1)),
    };
    render(&doc, &grid_el, &list_el, &mut state)?;
    start_timer(&mut state)?;
    BOARD_STATE.with(|b| b.replace(Some(state)));

    bind_listeners(&doc, &grid_el)
}

fn with_state<T>(f: impl FnOnce(&mut BoardState) -> T) -> Option<T> {
    BOARD_STATE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

// --- Rendering ---------------------------------------------------------------

fn render(doc: &Document, grid_el: &Element, list_el: &Element, state: &mut BoardState) -> Result<(), JsValue> {
    grid_el.set_inner_html("");
    list_el.set_inner_html("");
    state.cell_els.clear();
    state.word_els.clear();

    let size = state.session.grid().size();
    if let Some(html) = grid_el.dyn_ref::<HtmlElement>() {
        html.style()
            .set_property("grid-template-columns", &format!("repeat({size}, 1fr)"))?;
    }
    for (r, row) in state.session.grid().rows().enumerate() {
        for (c, letter) in row.iter().enumerate() {
            let el = doc.create_element("div")?;
            el.set_class_name(CELL_CLASS);
            el.set_text_content(Some(&letter.to_string()));
            el.set_attribute("data-row", &r.to_string())?;
            el.set_attribute("data-col", &c.to_string())?;
            grid_el.append_child(&el)?;
            state.cell_els.push(el);
        }
    }

    for word in state.session.words() {
        let el = doc.create_element("div")?;
        el.set_class_name(WORD_CLASS);
        el.set_text_content(Some(&word_label(word)));
        el.set_attribute("data-word", word)?;
        list_el.append_child(&el)?;
        state.word_els.push((word.clone(), el));
    }

    update_timer_text(state);
    Ok(())
}

fn cell_el(state: &BoardState, cell: Cell) -> Option<&Element> {
    let size = state.session.grid().size();
    if cell.row >= size || cell.col >= size {
        return None;
    }
    state.cell_els.get(cell.row * size + cell.col)
}

/// Drop the transient highlight; found cells keep theirs.
fn clear_highlights(state: &BoardState) {
    for el in &state.cell_els {
        let classes = el.class_list();
        if !classes.contains(FOUND) {
            classes.remove_1(SELECTED).ok();
        }
    }
}

fn highlight(state: &BoardState, cells: &[Cell]) {
    for &c in cells {
        if let Some(el) = cell_el(state, c) {
            el.class_list().add_1(SELECTED).ok();
        }
    }
}

fn mark_found(state: &BoardState, word: &str, cells: &[Cell]) {
    for &c in cells {
        if let Some(el) = cell_el(state, c) {
            let classes = el.class_list();
            classes.remove_1(SELECTED).ok();
            classes.add_1(FOUND).ok();
        }
    }
    if let Some((_, el)) = state.word_els.iter().find(|(w, _)| w == word) {
        el.class_list().add_1(FOUND).ok();
    }
}

// --- Gesture handlers --------------------------------------------------------

fn on_begin(cell: Cell) {
    with_state(|st| {
        st.session.begin(cell);
        clear_highlights(st);
        highlight(st, &[cell]);
    });
}

fn on_extend(cell: Cell) {
    with_state(|st| {
        if !st.session.is_selecting() {
            return;
        }
        let cells = st.session.extend(cell).to_vec();
        clear_highlights(st);
        highlight(st, &cells);
    });
}

fn on_end() {
    let completed_generation = with_state(|st| {
        let result = st.session.end(now())?;
        match &result.outcome {
            MatchOutcome::Found { word, completed } => {
                mark_found(st, word, &result.cells);
                if *completed {
                    stop_timer(st);
                    update_timer_text(st);
                    return Some(st.generation);
                }
            }
            MatchOutcome::AlreadyFound(_) | MatchOutcome::Miss | MatchOutcome::TooShort => {
                clear_highlights(st);
            }
        }
        None
    })
    .flatten();

    if let Some(generation) = completed_generation {
        schedule_completion_message(generation);
    }
}

fn on_restart() {
    let Some(win) = window() else { return };
    let Some(doc) = win.document() else { return };
    let (Some(grid_el), Some(list_el)) = (
        doc.get_element_by_id("wordsearch-grid"),
        doc.get_element_by_id("wordsearch-word-list"),
    ) else {
        return;
    };
    with_state(|st| {
        // On failure the current puzzle, its clock and its timer stay as they are.
        let BoardState { session, rng, .. } = st;
        if let Err(e) = session.restart(rng, now()) {
            log::error!("restart failed: {e}");
            return;
        }
        st.generation = st.generation.wrapping_add(1);
        if let Err(e) = render(&doc, &grid_el, &list_el, st).and_then(|_| start_timer(st)) {
            log::error!("could not redraw board: {e:?}");
        }
    });
}

// --- Timer -------------------------------------------------------------------

fn update_timer_text(state: &BoardState) {
    if let Some(el) = &state.timer_el {
        el.set_text_content(Some(&state.session.timer_text(now())));
    }
}

fn start_timer(state: &mut BoardState) -> Result<(), JsValue> {
    stop_timer(state);
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let tick = Closure::wrap(Box::new(move || {
        with_state(|st| update_timer_text(st));
    }) as Box<dyn FnMut()>);
    let handle = win.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        TICK_MS,
    )?;
    state.timer = Some((handle, tick));
    Ok(())
}

fn stop_timer(state: &mut BoardState) {
    if let Some((handle, _tick)) = state.timer.take() {
        if let Some(w) = window() {
            w.clear_interval_with_handle(handle);
        }
    }
}

// --- Completion popup --------------------------------------------------------

fn schedule_completion_message(generation: u32) {
    let Some(win) = window() else { return };
    let show = Closure::once_into_js(move || {
        let current = with_state(|st| st.generation);
        if current == Some(generation) {
            show_game_message(COMPLETION_TITLE, COMPLETION_BODY);
        }
    });
    if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        show.unchecked_ref(),
        COMPLETION_DELAY_MS,
    ) {
        log::error!("could not schedule completion message: {e:?}");
    }
}

fn show_game_message(title: &str, text: &str) {
    let Some(doc) = window().and_then(|w| w.document()) else { return };
    let (Some(modal), Some(title_el), Some(text_el)) = (
        doc.get_element_by_id("game-message-modal"),
        doc.get_element_by_id("game-message-title"),
        doc.get_element_by_id("game-message-text"),
    ) else {
        log::info!("{title} {text}");
        return;
    };
    title_el.set_text_content(Some(title));
    text_el.set_text_content(Some(text));
    modal.class_list().add_1("active").ok();
}

// --- Event wiring ------------------------------------------------------------

/// Cell under an event target, read from its `data-row` / `data-col`.
fn cell_of(el: &Element) -> Option<Cell> {
    if !el.class_list().contains(CELL_CLASS) {
        return None;
    }
    parse_cell(el.get_attribute("data-row").as_deref(), el.get_attribute("data-col").as_deref())
}

fn target_cell(evt: &web_sys::Event) -> Option<Cell> {
    evt.target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| cell_of(&el))
}

fn parse_cell(row: Option<&str>, col: Option<&str>) -> Option<Cell> {
    Some(Cell::new(row?.trim().parse().ok()?, col?.trim().parse().ok()?))
}

/// Checklist label: words are shown in lower case.
fn word_label(word: &str) -> String {
    word.to_lowercase()
}

type Handler = Closure<dyn FnMut(web_sys::Event)>;

fn handler(f: impl FnMut(web_sys::Event) + 'static) -> Handler {
    Closure::wrap(Box::new(f) as Box<dyn FnMut(_)>)
}

/// Listeners attached to one element, kept so they can be detached when the
/// page swaps that element out.
struct Bound {
    target: Element,
    handlers: Vec<(&'static str, Handler)>,
}

impl Bound {
    fn attach(target: &Element, handlers: Vec<(&'static str, Handler)>) -> Result<Self, JsValue> {
        for (event, h) in &handlers {
            target.add_event_listener_with_callback(event, h.as_ref().unchecked_ref())?;
        }
        Ok(Self { target: target.clone(), handlers })
    }

    fn detach(self) {
        for (event, h) in &self.handlers {
            self.target
                .remove_event_listener_with_callback(event, h.as_ref().unchecked_ref())
                .ok();
        }
    }
}

struct Listeners {
    grid: Option<Bound>,
    restart: Option<Bound>,
    document_bound: bool,
}

thread_local! {
    static LISTENERS: std::cell::RefCell<Listeners> = const {
        std::cell::RefCell::new(Listeners { grid: None, restart: None, document_bound: false })
    };
}

/// Whether listeners on `bound` must move to `current`: the element appeared,
/// disappeared, or was replaced by a different node.
fn needs_rebind<T>(bound: Option<&T>, current: Option<&T>, same: impl Fn(&T, &T) -> bool) -> bool {
    match (bound, current) {
        (Some(b), Some(c)) => !same(b, c),
        (None, None) => false,
        _ => true,
    }
}

fn same_node(a: &Element, b: &Element) -> bool {
    a.is_same_node(Some(b.as_ref()))
}

/// Listeners are delegated from the grid container so re-rendering cells on
/// restart does not need to re-register anything. Called on every start; only
/// elements that changed since the last call are rebound.
fn bind_listeners(doc: &Document, grid_el: &Element) -> Result<(), JsValue> {
    let restart_el = doc.get_element_by_id("wordsearch-restart");
    LISTENERS.with(|cell| {
        let mut l = cell.borrow_mut();

        if needs_rebind(l.grid.as_ref().map(|b| &b.target), Some(grid_el), same_node) {
            if let Some(old) = l.grid.take() {
                old.detach();
            }
            l.grid = Some(Bound::attach(grid_el, grid_handlers())?);
        }

        if needs_rebind(l.restart.as_ref().map(|b| &b.target), restart_el.as_ref(), same_node) {
            if let Some(old) = l.restart.take() {
                old.detach();
            }
            if let Some(btn) = &restart_el {
                l.restart = Some(Bound::attach(btn, vec![("click", handler(|_| on_restart()))])?);
            }
        }

        // Release anywhere on the page so a drag that leaves the grid still ends.
        if !l.document_bound {
            let closure = handler(|_| on_end());
            doc.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
            l.document_bound = true;
        }
        Ok(())
    })
}

fn grid_handlers() -> Vec<(&'static str, Handler)> {
    vec![
        // Mouse: press starts, hovering another cell extends.
        (
            "mousedown",
            handler(|evt| {
                if let Some(cell) = target_cell(&evt) {
                    evt.prevent_default();
                    on_begin(cell);
                }
            }),
        ),
        (
            "mouseover",
            handler(|evt| {
                if let Some(cell) = target_cell(&evt) {
                    on_extend(cell);
                }
            }),
        ),
        (
            "touchstart",
            handler(|evt| {
                if let Some(cell) = target_cell(&evt) {
                    evt.prevent_default();
                    on_begin(cell);
                }
            }),
        ),
        // The touch target stays the first cell, so look up the cell under
        // the finger instead.
        (
            "touchmove",
            handler(|evt| {
                evt.prevent_default();
                let Some(touch) = evt
                    .dyn_ref::<web_sys::TouchEvent>()
                    .and_then(|t| t.touches().get(0))
                else {
                    return;
                };
                let Some(doc) = window().and_then(|w| w.document()) else { return };
                if let Some(el) = doc.element_from_point(touch.client_x() as f32, touch.client_y() as f32) {
                    if let Some(cell) = cell_of(&el) {
                        on_extend(cell);
                    }
                }
            }),
        ),
        (
            "touchend",
            handler(|evt| {
                evt.prevent_default();
                on_end();
            }),
        ),
    ]
}
