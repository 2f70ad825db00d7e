use spinwave_core::{FramePlan, FrequencySource, SurfaceSize, Track, VisualizerSession};
use web_sys::{AudioContext, HtmlAudioElement, HtmlMediaElement};
use crate::audio::analyser::AnalyserSampler;

/// Everything tied to one selected track: its media element, the blob
/// backing it, the analysis path, and the visualizer state.
pub struct PlayerSession {
    track: Track,
    element: HtmlAudioElement,
    sampler: AnalyserSampler,
    visualizer: VisualizerSession,
    blob_url: String,
}

impl PlayerSession {
    /// Build a session around an already-fetched object URL. On error the
    /// URL is revoked here.
    pub fn build(
        ctx: &AudioContext,
        track: Track,
        blob_url: String,
        volume: f64,
        mut visualizer: VisualizerSession,
    ) -> Result<Self, String> {
        let built = Self::connect(ctx, &blob_url, volume, &visualizer);
        let (element, sampler) = match built {
            Ok(parts) => parts,
            Err(e) => {
                let _ = web_sys::Url::revoke_object_url(&blob_url);
                return Err(e);
            }
        };
        visualizer.attach(sampler.bin_count());
        log::info!("Attached {} ({} bins)", track.id, sampler.bin_count());
        Ok(Self {
            track,
            element,
            sampler,
            visualizer,
            blob_url,
        })
    }

    fn connect(
        ctx: &AudioContext,
        blob_url: &str,
        volume: f64,
        visualizer: &VisualizerSession,
    ) -> Result<(HtmlAudioElement, AnalyserSampler), String> {
        let element = HtmlAudioElement::new().map_err(|e| format!("Audio element: {e:?}"))?;
        element.set_cross_origin(Some("anonymous"));
        element.set_src(blob_url);
        element.set_volume(volume);
        element.load();
        let sampler = AnalyserSampler::attach(ctx, &element, visualizer.config())?;
        Ok((element, sampler))
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn element(&self) -> &HtmlMediaElement {
        &self.element
    }

    pub fn visualizer_mut(&mut self) -> &mut VisualizerSession {
        &mut self.visualizer
    }

    /// Pull this frame's snapshot and turn it into a draw plan.
    pub fn frame(&mut self, surface: SurfaceSize, is_fullscreen: bool) -> FramePlan {
        let snapshot = self.sampler.snapshot();
        self.visualizer.frame(snapshot, surface, is_fullscreen)
    }

    /// Stop the element, disconnect the analysis path and release the
    /// blob. The visualizer state is handed back for the next session.
    pub fn teardown(self) -> VisualizerSession {
        let _ = self.element.pause();
        self.sampler.detach();
        self.element.remove_attribute("src").ok();
        let _ = web_sys::Url::revoke_object_url(&self.blob_url);
        log::info!("Detached {}", self.track.id);
        self.visualizer
    }
}
