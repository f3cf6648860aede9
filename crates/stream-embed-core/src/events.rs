//! Named events relayed from the embedded player.
//!
//! The player forwards the standard media-element events plus three
//! ad-lifecycle events that only fire when an `ad-url` is configured. The set
//! is closed: the sync layer binds exactly one listener per event per handle,
//! so an enum (rather than free-form strings) keeps the bookkeeping honest.

use std::fmt;

/// An event emitted by the live player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    /// Playback was aborted, e.g. the media restarted from the beginning.
    Abort,
    /// Enough data is available to play at least a couple of frames.
    CanPlay,
    /// The entire media can likely play through without interruption.
    CanPlayThrough,
    /// The media's duration changed (typically: became known).
    DurationChange,
    /// Playback completed.
    Ended,
    /// An error occurred (encoding not finished, bad signed URL, ...).
    Error,
    /// The first frame of the media has finished loading.
    LoadedData,
    /// All metadata has finished loading.
    LoadedMetaData,
    /// Loading of the media began.
    LoadStart,
    /// Playback state changed to paused.
    Pause,
    /// Playback state is no longer paused.
    Play,
    /// The media has enough data to start (or resume) playing.
    Playing,
    /// Periodic download-progress notification.
    Progress,
    /// The playback speed changed.
    RateChange,
    /// The video's intrinsic dimensions changed. Iframe variant only.
    Resize,
    /// A seek operation completed.
    Seeked,
    /// A seek operation began.
    Seeking,
    /// Media data is unexpectedly not forthcoming.
    Stalled,
    /// Loading of the media was suspended.
    Suspend,
    /// The current playback time changed.
    TimeUpdate,
    /// The audio volume or muted state changed.
    VolumeChange,
    /// The requested operation is delayed pending another operation.
    Waiting,
    /// An ad began playback (requires `ad-url`).
    StreamAdStart,
    /// An ad finished playback (requires `ad-url`).
    StreamAdEnd,
    /// An ad took too long to load (requires `ad-url`).
    StreamAdTimeout,
}

impl PlayerEvent {
    /// Every event the iframe variant relays.
    pub const ALL: [PlayerEvent; 25] = [
        PlayerEvent::Abort,
        PlayerEvent::CanPlay,
        PlayerEvent::CanPlayThrough,
        PlayerEvent::DurationChange,
        PlayerEvent::Ended,
        PlayerEvent::Error,
        PlayerEvent::LoadedData,
        PlayerEvent::LoadedMetaData,
        PlayerEvent::LoadStart,
        PlayerEvent::Pause,
        PlayerEvent::Play,
        PlayerEvent::Playing,
        PlayerEvent::Progress,
        PlayerEvent::RateChange,
        PlayerEvent::Resize,
        PlayerEvent::Seeked,
        PlayerEvent::Seeking,
        PlayerEvent::Stalled,
        PlayerEvent::Suspend,
        PlayerEvent::TimeUpdate,
        PlayerEvent::VolumeChange,
        PlayerEvent::Waiting,
        PlayerEvent::StreamAdStart,
        PlayerEvent::StreamAdEnd,
        PlayerEvent::StreamAdTimeout,
    ];

    /// Returns the wire name the player runtime uses for this event.
    pub fn name(self) -> &'static str {
        match self {
            PlayerEvent::Abort => "abort",
            PlayerEvent::CanPlay => "canplay",
            PlayerEvent::CanPlayThrough => "canplaythrough",
            PlayerEvent::DurationChange => "durationchange",
            PlayerEvent::Ended => "ended",
            PlayerEvent::Error => "error",
            PlayerEvent::LoadedData => "loadeddata",
            PlayerEvent::LoadedMetaData => "loadedmetadata",
            PlayerEvent::LoadStart => "loadstart",
            PlayerEvent::Pause => "pause",
            PlayerEvent::Play => "play",
            PlayerEvent::Playing => "playing",
            PlayerEvent::Progress => "progress",
            PlayerEvent::RateChange => "ratechange",
            PlayerEvent::Resize => "resize",
            PlayerEvent::Seeked => "seeked",
            PlayerEvent::Seeking => "seeking",
            PlayerEvent::Stalled => "stalled",
            PlayerEvent::Suspend => "suspend",
            PlayerEvent::TimeUpdate => "timeupdate",
            PlayerEvent::VolumeChange => "volumechange",
            PlayerEvent::Waiting => "waiting",
            PlayerEvent::StreamAdStart => "stream-adstart",
            PlayerEvent::StreamAdEnd => "stream-adend",
            PlayerEvent::StreamAdTimeout => "stream-adtimeout",
        }
    }

    /// Looks an event up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|event| event.name() == name)
    }
}

impl fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_the_fixed_set() {
        assert_eq!(PlayerEvent::ALL.len(), 25);
        // 22 media events + 3 ad-lifecycle events
        let ad_events = PlayerEvent::ALL
            .iter()
            .filter(|event| event.name().starts_with("stream-ad"))
            .count();
        assert_eq!(ad_events, 3);
    }

    #[test]
    fn test_wire_names_round_trip() {
        for event in PlayerEvent::ALL {
            assert_eq!(PlayerEvent::from_name(event.name()), Some(event));
        }
        assert_eq!(PlayerEvent::from_name("loadedmetadata"), Some(PlayerEvent::LoadedMetaData));
        assert_eq!(PlayerEvent::from_name("stream-adtimeout"), Some(PlayerEvent::StreamAdTimeout));
        assert_eq!(PlayerEvent::from_name("clicked"), None);
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in PlayerEvent::ALL.iter().enumerate() {
            for b in &PlayerEvent::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
