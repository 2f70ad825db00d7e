use spinwave_core::{FrequencySource, VisualizerConfig};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AnalyserNode, AudioContext, AudioContextState, HtmlMediaElement, MediaElementAudioSourceNode};
use std::cell::RefCell;

thread_local! {
    static AUDIO_CTX: RefCell<Option<AudioContext>> = RefCell::new(None);
}

/// The page-wide audio context, created on first use.
pub fn shared_context() -> Result<AudioContext, String> {
    AUDIO_CTX.with(|c| {
        let mut slot = c.borrow_mut();
        if let Some(ctx) = slot.as_ref() {
            return Ok(ctx.clone());
        }
        let ctx = AudioContext::new().map_err(|e| format!("AudioContext: {e:?}"))?;
        log::info!("Audio context created at {} Hz", ctx.sample_rate());
        *slot = Some(ctx.clone());
        Ok(ctx)
    })
}

/// Resume the context if the browser suspended it (autoplay policy).
/// Failure is logged, not returned: playback may still be retried.
pub async fn resume(ctx: &AudioContext) {
    if ctx.state() != AudioContextState::Suspended {
        return;
    }
    let promise = match ctx.resume() {
        Ok(p) => p,
        Err(e) => {
            log::error!("AudioContext resume failed: {e:?}");
            return;
        }
    };
    match JsFuture::from(promise).await {
        Ok(_) => log::info!("Audio context resumed"),
        Err(e) => log::error!("AudioContext resume rejected: {e:?}"),
    }
}

/// Analysis path for one media element:
/// element source -> analyser -> destination.
pub struct AnalyserSampler {
    source: MediaElementAudioSourceNode,
    analyser: AnalyserNode,
    bytes: Vec<u8>,
}

impl AnalyserSampler {
    pub fn attach(
        ctx: &AudioContext,
        element: &HtmlMediaElement,
        config: &VisualizerConfig,
    ) -> Result<Self, String> {
        let source = ctx
            .create_media_element_source(element)
            .map_err(|e| format!("createMediaElementSource: {e:?}"))?;
        let analyser = ctx
            .create_analyser()
            .map_err(|e| format!("createAnalyser: {e:?}"))?;
        analyser.set_fft_size(config.fft_size as u32);
        analyser.set_smoothing_time_constant(config.smoothing);

        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| format!("connect source -> analyser: {e:?}"))?;
        if let Err(e) = analyser.connect_with_audio_node(&ctx.destination()) {
            let _ = source.disconnect();
            return Err(format!("connect analyser -> destination: {e:?}"));
        }

        let bins = analyser.frequency_bin_count() as usize;
        Ok(Self {
            source,
            analyser,
            bytes: vec![0; bins],
        })
    }

    /// Disconnect both nodes. Safe to call more than once.
    pub fn detach(&self) {
        let _ = self.source.disconnect();
        let _ = self.analyser.disconnect();
    }
}

impl FrequencySource for AnalyserSampler {
    fn bin_count(&self) -> usize {
        self.bytes.len()
    }

    fn snapshot(&mut self) -> &[u8] {
        self.analyser.get_byte_frequency_data(&mut self.bytes);
        &self.bytes
    }
}
