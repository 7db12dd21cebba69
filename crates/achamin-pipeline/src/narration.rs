//! Narration synthesis with engine fallback.

use tracing::warn;

use achamin_ai::{SpeechSynthesizer, VoiceEngine};

use crate::deadline::Deadline;
use crate::error::Degradation;

/// Synthesize the narration audio.
///
/// The neural engine is tried first; a validation-class rejection (the
/// voice does not support the engine) retries once at standard fidelity
/// with identical text and voice. Any other failure, or both attempts
/// failing, degrades to an empty payload — downstream treats empty as
/// "narration unavailable" and continues.
pub async fn synthesize_narration(
    synthesizer: &dyn SpeechSynthesizer,
    text: &str,
    voice_id: &str,
    deadline: &Deadline,
) -> (Vec<u8>, Option<Degradation>) {
    match deadline
        .bound(synthesizer.synthesize(text, voice_id, VoiceEngine::Neural))
        .await
    {
        Some(Ok(audio)) => (audio, None),
        Some(Err(e)) if e.is_validation() => {
            warn!(
                voice_id,
                "Neural engine rejected, retrying with standard: {}", e
            );
            match deadline
                .bound(synthesizer.synthesize(text, voice_id, VoiceEngine::Standard))
                .await
            {
                Some(Ok(audio)) => (audio, None),
                Some(Err(e)) => {
                    warn!(voice_id, "Standard engine synthesis failed: {}", e);
                    (Vec::new(), Some(Degradation::Synthesis))
                }
                None => {
                    warn!(voice_id, "Standard engine synthesis hit the deadline");
                    (Vec::new(), Some(Degradation::Synthesis))
                }
            }
        }
        Some(Err(e)) => {
            warn!(voice_id, "Narration synthesis failed: {}", e);
            (Vec::new(), Some(Degradation::Synthesis))
        }
        None => {
            warn!(voice_id, "Narration synthesis hit the deadline");
            (Vec::new(), Some(Degradation::Synthesis))
        }
    }
}
