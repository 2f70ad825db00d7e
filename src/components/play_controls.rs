use leptos::prelude::*;
use crate::audio::player;
use crate::state::AppState;

#[component]
pub fn PlayControls() -> impl IntoView {
    let state = expect_context::<AppState>();
    let has_track = move || state.current_track.with(|t| t.is_some());

    let on_volume = move |ev: web_sys::Event| {
        if let Ok(v) = event_target_value(&ev).parse::<f64>() {
            player::set_volume(state, v);
        }
    };

    view! {
        <div class="play-controls">
            <button
                class="transport-btn"
                disabled=move || !has_track()
                on:click=move |_| player::play(state)
            >"Play"</button>
            <button
                class="transport-btn"
                disabled=move || !has_track()
                on:click=move |_| player::pause(state)
            >"Pause"</button>
            <label class="volume">
                "Volume"
                <input
                    type="range"
                    min="0"
                    max="1"
                    step="0.01"
                    prop:value=move || state.volume.get().to_string()
                    on:input=on_volume
                />
            </label>
        </div>
    }
}
