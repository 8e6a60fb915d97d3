//! Deterministic captions used when the text-generation assist is
//! unavailable. Plan creation never waits on the assist succeeding.

/// Why the assist could not produce a caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFallback {
  /// No credential configured.
  Unconfigured,
  /// The model answered with no usable text.
  EmptyResponse,
  /// Transport or API failure.
  Failed,
}

pub fn fallback_caption(location: &str, reason: CaptionFallback) -> String {
  match reason {
    CaptionFallback::Unconfigured => format!("Excited to be heading to {location}!"),
    CaptionFallback::EmptyResponse => format!("Heading to {location}!"),
    CaptionFallback::Failed => format!("Trip to {location}"),
  }
}
