mod config;
mod engine;
mod input;
mod logging;
mod platform;
mod remote;
mod render;
mod save;
mod session;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use config::{RemoteConfig, TICKS_PER_SEC};
use engine::Lcg;
use input::{ClickTargets, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use remote::SupabaseCounter;
use session::{deliver_remote, RemoteCall, Session};
use time::FrameClock;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::PageTransitionEvent;

type SharedSession = Rc<RefCell<Session<Lcg>>>;

/// Query the grid container's bounding rect and map a click onto a target.
fn dom_pixel_to_action(mouse_x: u32, mouse_y: u32, ct: &ClickTargets) -> Option<u16> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();
    ct.hit_test_pixels(click_x, click_y, rect.width(), rect.height())
}

/// Apply one input: run the click through the session, then fire the
/// browser effects and the remote increment.
fn handle_input(session: &SharedSession, counter: &Rc<SupabaseCounter>, event: &InputEvent) {
    if !event.is_summon() {
        return;
    }
    let effects = match session.borrow_mut().click() {
        Some(e) => e,
        None => return,
    };

    platform::play(effects.sound);
    platform::vibrate();
    save::save_clicks(effects.save);

    spawn_remote(session, counter.clone(), RemoteCall::Increment);
}

/// Run a remote call off the event loop and hand its result back, provided
/// the session is still in the same mounted lifetime by then.
fn spawn_remote(session: &SharedSession, counter: Rc<SupabaseCounter>, call: RemoteCall) {
    let handle = Rc::downgrade(session);
    let token = session.borrow().liveness();
    wasm_bindgen_futures::spawn_local(async move {
        let result = match call {
            RemoteCall::Fetch => counter.fetch_count().await,
            RemoteCall::Increment => counter.increment_and_get().await,
        };
        deliver_remote(&handle, &token, call, result);
    });
}

fn add_page_listener(window: &web_sys::Window, event: &str, callback: Closure<dyn FnMut(PageTransitionEvent)>) {
    if let Err(e) = window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        log::warn!("{event} listener not installed: {e:?}");
    }
    callback.forget();
}

/// Unmount when the page goes away; mount a fresh session when it comes
/// back from the back/forward cache.
fn follow_page_lifecycle(session: &SharedSession, counter: &Rc<SupabaseCounter>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let handle = Rc::downgrade(session);
    let on_hide = Closure::<dyn FnMut(PageTransitionEvent)>::new(move |_event: PageTransitionEvent| {
        if let Some(s) = handle.upgrade() {
            s.borrow_mut().unmount();
        }
    });
    add_page_listener(&window, "pagehide", on_hide);

    let handle = Rc::downgrade(session);
    let counter = counter.clone();
    let on_show = Closure::<dyn FnMut(PageTransitionEvent)>::new(move |event: PageTransitionEvent| {
        // First loads are mounted by main().
        if !event.persisted() {
            return;
        }
        let Some(s) = handle.upgrade() else {
            return;
        };
        s.borrow_mut().remount(save::load_clicks());
        log::info!("restored from page cache; session remounted");
        spawn_remote(&s, counter.clone(), RemoteCall::Fetch);
    });
    add_page_listener(&window, "pageshow", on_show);
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logging::init();

    let remote_config = RemoteConfig::from_build_env();
    if !remote_config.is_enabled() {
        log::warn!("SUPABASE_URL not set; global counter disabled");
    }
    let counter = Rc::new(SupabaseCounter::new(remote_config));

    let session: SharedSession = Rc::new(RefCell::new(Session::mount(
        save::load_clicks(),
        config::sound_policy(),
        Lcg::from_clock(),
    )));
    let click_targets = Rc::new(RefCell::new(ClickTargets::new()));

    spawn_remote(&session, counter.clone(), RemoteCall::Fetch);
    follow_page_lifecycle(&session, &counter);

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let session = session.clone();
        let counter = counter.clone();
        let click_targets = click_targets.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let ct = click_targets.borrow();
                if ct.terminal_rows == 0 || ct.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_action(mouse_event.x, mouse_event.y, &ct)
            };

            if let Some(id) = action {
                handle_input(&session, &counter, &InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let session = session.clone();
        let counter = counter.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Enter => InputEvent::Key('\n'),
                _ => return,
            };
            handle_input(&session, &counter, &event);
        }
    });

    let clock = RefCell::new(FrameClock::new(TICKS_PER_SEC));
    terminal.draw_web(move |f| {
        let ticks = clock.borrow_mut().advance(time::now_ms());
        session.borrow_mut().tick(ticks);

        let size = f.area();
        let mut ct = click_targets.borrow_mut();
        ct.begin_frame(size.width, size.height);

        let s = session.borrow();
        render::render(&s, f, &mut ct);
    });

    Ok(())
}
