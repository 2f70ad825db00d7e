use leptos::prelude::*;
use spinwave_core::transport::ease_out_cubic;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use crate::audio::player;
use crate::state::AppState;

const SCROLL_TOP_MS: f64 = 200.0;

#[component]
pub fn TrackList() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_search = move |ev: web_sys::Event| {
        state.search_query.set(event_target_value(&ev));
    };

    view! {
        <input
            class="track-search"
            type="search"
            placeholder="Search tracks"
            prop:value=move || state.search_query.get()
            on:input=on_search
        />
        <ul class="track-list">
            {move || {
                let query = state.search_query.get();
                let groups = state.catalog.with(|c| c.grouped(&query));
                if groups.is_empty() {
                    return view! { <li class="track-empty">"No tracks"</li> }.into_any();
                }
                groups.into_iter().map(|group| {
                    let items = group.tracks.into_iter().map(|track| {
                        let id = track.id.clone();
                        let is_active = move || {
                            state.current_track.with(|t| t.as_ref().is_some_and(|t| t.id == id))
                        };
                        let display = track.display.clone();
                        view! {
                            <li
                                class=move || if is_active() { "track active" } else { "track" }
                                on:click=move |_| {
                                    player::select_track(state, track.clone());
                                    scroll_to_top(SCROLL_TOP_MS);
                                }
                            >
                                {display}
                            </li>
                        }
                    }).collect_view();
                    view! {
                        <h3 class="track-group">{group.initial}</h3>
                        {items}
                    }
                }).collect_view().into_any()
            }}
        </ul>
    }
}

/// Smoothly scroll the page to the top with a cubic ease-out.
fn scroll_to_top(duration_ms: f64) {
    let Some(window) = web_sys::window() else { return };
    let Some(perf) = window.performance() else { return };
    let start_y = window.scroll_y().unwrap_or(0.0);
    if start_y <= 0.0 {
        return;
    }
    let start_time = perf.now();

    let cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let cb_clone = cb.clone();

    *cb.borrow_mut() = Some(Closure::new(move || {
        let Some(window) = web_sys::window() else { return };
        let now = window.performance().map(|p| p.now()).unwrap_or(start_time + duration_ms);
        let progress = ((now - start_time) / duration_ms).min(1.0);
        window.scroll_to_with_x_and_y(0.0, start_y * (1.0 - ease_out_cubic(progress)));

        if progress < 1.0 {
            if let Some(next) = cb_clone.borrow().as_ref() {
                let _ = window.request_animation_frame(next.as_ref().unchecked_ref());
            }
        }
    }));

    if let Some(first) = cb.borrow().as_ref() {
        let _ = window.request_animation_frame(first.as_ref().unchecked_ref());
    };
}
