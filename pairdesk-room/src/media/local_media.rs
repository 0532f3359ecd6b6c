use crate::error::RoomError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use uuid::Uuid;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::media::Sample;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// The local microphone/camera pair, owned by the room controller.
///
/// Capture itself happens in the embedding application; it feeds frames in
/// through the `write_*_sample` methods. Mute and camera-off are enablement
/// flags checked on the write path, so toggling them never renegotiates or
/// touches the peer registry.
pub struct LocalMedia {
    audio: Arc<TrackLocalStaticSample>,
    video: Arc<TrackLocalStaticSample>,
    audio_enabled: AtomicBool,
    video_enabled: AtomicBool,
}

impl LocalMedia {
    pub fn new() -> Self {
        // One stream id groups both tracks on the remote side.
        let stream_id = Uuid::new_v4().to_string();

        let audio = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                ..Default::default()
            },
            "audio".to_owned(),
            stream_id.clone(),
        ));

        let video = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_VP8.to_owned(),
                ..Default::default()
            },
            "video".to_owned(),
            stream_id,
        ));

        Self {
            audio,
            video,
            audio_enabled: AtomicBool::new(true),
            video_enabled: AtomicBool::new(true),
        }
    }

    /// Every local track, for attachment to a new peer connection. Tracks
    /// must be attached before any negotiation message is produced.
    pub fn tracks(&self) -> Vec<Arc<dyn TrackLocal + Send + Sync>> {
        vec![self.audio.clone(), self.video.clone()]
    }

    /// Flip microphone enablement. Returns the new state.
    pub fn toggle_mute(&self) -> bool {
        let enabled = !self.audio_enabled.load(Ordering::SeqCst);
        self.audio_enabled.store(enabled, Ordering::SeqCst);
        debug!("Audio enabled: {}", enabled);
        enabled
    }

    /// Flip camera enablement. Returns the new state.
    pub fn toggle_video(&self) -> bool {
        let enabled = !self.video_enabled.load(Ordering::SeqCst);
        self.video_enabled.store(enabled, Ordering::SeqCst);
        debug!("Video enabled: {}", enabled);
        enabled
    }

    pub fn is_audio_enabled(&self) -> bool {
        self.audio_enabled.load(Ordering::SeqCst)
    }

    pub fn is_video_enabled(&self) -> bool {
        self.video_enabled.load(Ordering::SeqCst)
    }

    /// Stop sending both kinds. Used on room exit.
    pub fn disable_all(&self) {
        self.audio_enabled.store(false, Ordering::SeqCst);
        self.video_enabled.store(false, Ordering::SeqCst);
    }

    /// Feed one captured audio sample. Dropped while muted.
    pub async fn write_audio_sample(&self, sample: &Sample) -> Result<(), RoomError> {
        if !self.is_audio_enabled() {
            return Ok(());
        }
        self.audio.write_sample(sample).await?;
        Ok(())
    }

    /// Feed one captured video frame. Dropped while the camera is off.
    pub async fn write_video_sample(&self, sample: &Sample) -> Result<(), RoomError> {
        if !self.is_video_enabled() {
            return Ok(());
        }
        self.video.write_sample(sample).await?;
        Ok(())
    }
}

impl Default for LocalMedia {
    fn default() -> Self {
        Self::new()
    }
}
