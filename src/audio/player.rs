use leptos::prelude::*;
use leptos::task::spawn_local;
use spinwave_core::catalog::asset_path;
use spinwave_core::transport::{clamp_volume, seek_time};
use spinwave_core::{Track, VisualizerSession};
use wasm_bindgen_futures::JsFuture;
use web_sys::AudioContext;
use crate::audio::{analyser, fetch};
use crate::audio::session::PlayerSession;
use crate::canvas::render_loop;
use crate::canvas::surface::Surface;
use crate::state::AppState;

pub const PAUSED_STATUS: &str = "\u{1F6D1} Music in stasis!";

/// Handle a click on a track: fetch it, swap sessions, start drawing and
/// playing. Errors end up in the status line.
pub fn select_track(state: AppState, track: Track) {
    let generation = state.next_generation();
    spawn_local(async move {
        if let Err(e) = load_and_attach(state, &track, generation).await {
            log::error!("Failed to load {}: {e}", track.id);
            if state.is_current_generation(generation) {
                state
                    .status_text
                    .set(format!("\u{26A0}\u{FE0F} Load failed: {}", track.id));
            }
        }
    });
}

async fn load_and_attach(state: AppState, track: &Track, generation: u64) -> Result<(), String> {
    let encoded = js_sys::encode_uri_component(&track.id);
    let url = asset_path(&encoded.as_string().unwrap_or_default());
    log::info!("Fetching {url}");
    let blob_url = fetch::fetch_blob_url(&url).await?;

    if !state.is_current_generation(generation) {
        log::info!("Discarding stale load of {}", track.id);
        let _ = web_sys::Url::revoke_object_url(&blob_url);
        return Ok(());
    }

    let surface = match state.visualizer_canvas.get_untracked() {
        Some(canvas) => Surface::new(canvas),
        None => Err("visualizer canvas not mounted".to_string()),
    };
    let surface = match surface {
        Ok(surface) => surface,
        Err(e) => {
            let _ = web_sys::Url::revoke_object_url(&blob_url);
            return Err(e);
        }
    };

    // The old analysis path must be gone before the new one is connected.
    let config = state.config.get_untracked();
    let visualizer = match render_loop::stop() {
        Some(previous) => previous.teardown().handover(config),
        None => VisualizerSession::new(config),
    };

    let (ctx, session) = match connect(state, track, blob_url, visualizer) {
        Ok(parts) => parts,
        Err(e) => {
            state.drop_current_track();
            return Err(e);
        }
    };
    render_loop::start(session, surface, state);

    state.current_track.set(Some(track.clone()));
    state.show_now_spinning(track);

    analyser::resume(&ctx).await;
    start_playback(state).await;
    Ok(())
}

fn connect(
    state: AppState,
    track: &Track,
    blob_url: String,
    visualizer: VisualizerSession,
) -> Result<(AudioContext, PlayerSession), String> {
    let ctx = match analyser::shared_context() {
        Ok(ctx) => ctx,
        Err(e) => {
            let _ = web_sys::Url::revoke_object_url(&blob_url);
            return Err(e);
        }
    };
    let session = PlayerSession::build(
        &ctx,
        track.clone(),
        blob_url,
        state.volume.get_untracked(),
        visualizer,
    )?;
    Ok((ctx, session))
}

async fn start_playback(state: AppState) {
    let Some(started) = render_loop::with_session(|s| s.element().play()) else {
        return;
    };
    let promise = match started {
        Ok(p) => p,
        Err(e) => {
            log::error!("play() failed: {e:?}");
            return;
        }
    };
    match JsFuture::from(promise).await {
        Ok(_) => state.is_playing.set(true),
        Err(e) => log::error!("Playback start rejected: {e:?}"),
    }
}

pub fn play(state: AppState) {
    let Some(track) = render_loop::with_session(|s| s.track().clone()) else {
        return;
    };
    spawn_local(async move {
        match analyser::shared_context() {
            Ok(ctx) => analyser::resume(&ctx).await,
            Err(e) => log::error!("{e}"),
        }
        start_playback(state).await;
        if state.is_playing.get_untracked() {
            state.show_now_spinning(&track);
        }
    });
}

pub fn pause(state: AppState) {
    let paused = render_loop::with_session(|s| s.element().pause());
    match paused {
        Some(Ok(())) => {
            state.is_playing.set(false);
            state.status_text.set(PAUSED_STATUS.to_string());
        }
        Some(Err(e)) => log::error!("pause() failed: {e:?}"),
        None => {}
    }
}

pub fn set_volume(state: AppState, volume: f64) {
    let volume = clamp_volume(volume);
    state.volume.set(volume);
    render_loop::with_session(|s| s.element().set_volume(volume));
}

/// Jump to `fraction` of the track. Ignored while the duration is unknown.
pub fn seek_to_fraction(state: AppState, fraction: f64) {
    let Some(target) = render_loop::with_session(|s| {
        let element = s.element();
        let target = seek_time(fraction, element.duration())?;
        element.set_current_time(target);
        Some(target)
    })
    .flatten() else {
        return;
    };
    state.current_time.set(target);
}
