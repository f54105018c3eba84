//=========================================================================
// Audio Service
//
// Fire-and-forget playback contract. The engine starts one looped
// background track when the session begins and never interacts with the
// service again; decoding and mixing are entirely the host's business.
//
//=========================================================================

//=== AudioService ========================================================

/// Playback seam for the host's audio backend.
pub trait AudioService {
    /// Starts a looped track at the given volume (0.0..=1.0).
    fn play_looped(&mut self, track: &str, volume: f32);
}

//=== NullAudio ===========================================================

/// Audio service that plays nothing. The default for silent hosts.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioService for NullAudio {
    fn play_looped(&mut self, _track: &str, _volume: f32) {}
}
