use leptos::prelude::*;
use leptos::task::spawn_local;
use crate::audio::fetch;
use crate::components::play_controls::PlayControls;
use crate::components::seek_bar::SeekBar;
use crate::components::track_list::TrackList;
use crate::components::visualizer::Visualizer;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(state);

    spawn_local(async move {
        match fetch::fetch_config().await {
            Ok(config) => {
                log::info!("Loaded {}", fetch::CONFIG_PATH);
                state.config.set(config);
            }
            Err(e) => log::warn!("Using default visualizer settings ({}: {e})", fetch::CONFIG_PATH),
        }
    });

    spawn_local(async move {
        match fetch::fetch_catalog().await {
            Ok(catalog) => {
                log::info!("Track list: {} tracks", catalog.len());
                state.catalog.set(catalog);
            }
            Err(e) => {
                log::error!("Failed to fetch track list: {e}");
                state
                    .status_text
                    .set("\u{26A0}\u{FE0F} Track list unavailable".to_string());
            }
        }
    });

    view! {
        <div class="app">
            <aside class="sidebar">
                <TrackList />
            </aside>
            <main class="main">
                <h2 class="track-title">{move || state.status_text.get()}</h2>
                <Visualizer />
                <PlayControls />
                <SeekBar />
            </main>
        </div>
    }
}
