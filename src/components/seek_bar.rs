use leptos::prelude::*;
use spinwave_core::transport::{
    format_time, pointer_fraction, progress_percent, seek_time, time_stamp, SeekDrag,
};
use web_sys::MouseEvent;
use crate::audio::player;
use crate::state::AppState;

#[component]
pub fn SeekBar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let bar_ref = NodeRef::<leptos::html::Div>::new();
    // (x offset in the bar, label) while hovering with a known duration.
    let hover: RwSignal<Option<(f64, String)>> = RwSignal::new(None);
    let drag = RwSignal::new(SeekDrag::default());

    let fraction_at = move |ev: &MouseEvent| -> Option<(f64, f64)> {
        let bar = bar_ref.get_untracked()?;
        let rect = bar.get_bounding_client_rect();
        let offset_x = ev.client_x() as f64 - rect.left();
        Some((offset_x, pointer_fraction(offset_x, rect.width())?))
    };

    let on_move = move |ev: MouseEvent| {
        let at = fraction_at(&ev);
        let preview = at.and_then(|(x, fraction)| {
            let t = seek_time(fraction, state.duration.get_untracked())?;
            Some((x, format_time(t)?))
        });
        hover.set(preview);
        if let Some(fraction) = at.and_then(|(_, f)| drag.get_untracked().drag_to(f)) {
            player::seek_to_fraction(state, fraction);
        }
    };

    let on_mousedown = move |ev: MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        let Some((_, fraction)) = fraction_at(&ev) else { return };
        let mut gesture = drag.get_untracked();
        if let Some(fraction) = gesture.press(fraction) {
            player::seek_to_fraction(state, fraction);
        }
        drag.set(gesture);
    };

    let end_drag = move || drag.update(|d| d.release());

    let fill_width = move || {
        let pct = progress_percent(state.current_time.get(), state.duration.get()).unwrap_or(0.0);
        format!("{pct}%")
    };

    let stamp = move || {
        let text = time_stamp(state.current_time.get(), state.duration.get())
            .unwrap_or_else(|| "--:-- / --:--".to_string());
        format!("\u{23F1}\u{FE0F} {text}")
    };

    view! {
        <div class="seek">
            <div
                class="seek-bar"
                node_ref=bar_ref
                on:mousedown=on_mousedown
                on:mousemove=on_move
                on:mouseup=move |_| end_drag()
                on:mouseleave=move |_| {
                    hover.set(None);
                    end_drag();
                }
            >
                <div class="seek-bar-fill" style:width=fill_width></div>
                {move || hover.get().map(|(x, label)| view! {
                    <span class="hover-time" style:left=format!("{x}px")>{label}</span>
                })}
            </div>
            <span class="time-stamp">{stamp}</span>
        </div>
    }
}
