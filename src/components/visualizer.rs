use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use crate::canvas::render_loop;
use crate::state::AppState;

#[component]
pub fn Visualizer() -> impl IntoView {
    let state = expect_context::<AppState>();
    let container_ref = NodeRef::<leptos::html::Div>::new();

    // Track fullscreen changes from any source (button, Esc key).
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        let doc = document.clone();
        let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            let now_fullscreen = doc.fullscreen_element().is_some();
            let was_fullscreen = state.is_fullscreen.get_untracked();
            state.is_fullscreen.set(now_fullscreen);
            if was_fullscreen && !now_fullscreen {
                render_loop::with_session(|s| s.visualizer_mut().exit_fullscreen());
            }
        });
        if let Err(e) = document
            .add_event_listener_with_callback("fullscreenchange", on_change.as_ref().unchecked_ref())
        {
            log::error!("fullscreenchange listener: {e:?}");
        }
        on_change.forget();
    }

    let on_toggle = move |_: web_sys::MouseEvent| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
        if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
        } else if let Some(container) = container_ref.get_untracked() {
            if let Err(e) = container.request_fullscreen() {
                log::error!("requestFullscreen failed: {e:?}");
            }
        }
    };

    view! {
        <div
            class=move || if state.is_fullscreen.get() { "visualizer fullscreen" } else { "visualizer" }
            node_ref=container_ref
        >
            <canvas
                node_ref=state.visualizer_canvas
                style="width: 100%; height: 100%; display: block;"
            />
            <button class="fullscreen-btn" on:click=on_toggle>
                {move || if state.is_fullscreen.get() { "Exit fullscreen" } else { "Fullscreen" }}
            </button>
        </div>
    }
}
