use leptos::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use crate::audio::session::PlayerSession;
use crate::canvas::bars_renderer::draw_frame;
use crate::canvas::surface::Surface;
use crate::state::{set_flag_if_changed, set_if_changed, AppState};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// The one running draw loop and the session it owns.
struct RenderLoop {
    session: Rc<RefCell<PlayerSession>>,
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

thread_local! {
    static ACTIVE_LOOP: RefCell<Option<RenderLoop>> = RefCell::new(None);
}

fn request_frame(callback: &FrameCallback, handle: &Cell<Option<i32>>) {
    let Some(window) = web_sys::window() else { return };
    let cb = callback.borrow();
    let Some(cb) = cb.as_ref() else { return };
    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(h) => handle.set(Some(h)),
        Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
    }
}

/// Start drawing `session` onto `surface`, one frame per animation frame.
/// Any loop already running is stopped first and its session torn down.
pub fn start(session: PlayerSession, surface: Surface, state: AppState) {
    if let Some(previous) = stop() {
        previous.teardown();
    }

    let session = Rc::new(RefCell::new(session));
    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let callback: FrameCallback = Rc::new(RefCell::new(None));

    let session_cb = session.clone();
    let handle_cb = handle.clone();
    let callback_cb = callback.clone();
    *callback.borrow_mut() = Some(Closure::new(move || {
        handle_cb.set(None);
        let Some(window) = web_sys::window() else { return };

        let geometry = surface.sync(window.device_pixel_ratio());
        let is_fullscreen = state.is_fullscreen.get_untracked();
        {
            let mut session = session_cb.borrow_mut();
            let plan = session.frame(geometry.logical, is_fullscreen);
            draw_frame(surface.context(), &plan);

            let element = session.element();
            set_if_changed(state.current_time, element.current_time());
            set_if_changed(state.duration, element.duration());
            set_flag_if_changed(state.is_playing, !element.paused());
        }

        request_frame(&callback_cb, &handle_cb);
    }));

    request_frame(&callback, &handle);
    ACTIVE_LOOP.with(|l| {
        *l.borrow_mut() = Some(RenderLoop {
            session,
            handle,
            callback,
        });
    });
}

/// Cancel the pending frame and hand back the session. The caller decides
/// whether to tear it down or reuse its visualizer state.
pub fn stop() -> Option<PlayerSession> {
    let active = ACTIVE_LOOP.with(|l| l.borrow_mut().take())?;
    if let Some(h) = active.handle.take() {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(h);
        }
    }
    // Dropping the closure releases its clones of the session and callback.
    active.callback.borrow_mut().take();
    match Rc::try_unwrap(active.session) {
        Ok(cell) => Some(cell.into_inner()),
        Err(_) => {
            log::error!("Render loop session still shared after stop");
            None
        }
    }
}

/// Run `f` against the active session, if any.
pub fn with_session<R>(f: impl FnOnce(&mut PlayerSession) -> R) -> Option<R> {
    let cell = ACTIVE_LOOP.with(|l| l.borrow().as_ref().map(|active| active.session.clone()))?;
    let mut session = cell.try_borrow_mut().ok()?;
    Some(f(&mut session))
}
