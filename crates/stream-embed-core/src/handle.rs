//! Live-player handle abstraction.
//!
//! Components own DOM nodes; what they talk to is a [`PlayerHandle`], the
//! capability surface of the embedded player runtime. The handle appears
//! asynchronously (the runtime SDK loads over the network), so components
//! hold a [`HandleSlot`] that starts empty and is filled on acquisition. The
//! sync layer ([`crate::sync`]) treats an empty slot as "nothing to do".

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use parking_lot::Mutex;
#[cfg(target_arch = "wasm32")]
use std::sync::Mutex;

use crate::config::EventCallback;
use crate::error::PlaybackError;
use crate::events::PlayerEvent;

/// Future returned by [`PlayerHandle::play`]. Browsers resolve play requests
/// asynchronously and may refuse them under autoplay policy.
pub type PlayResult = Pin<Box<dyn Future<Output = Result<(), PlaybackError>>>>;

/// Intrinsic dimensions of the loaded video, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VideoDimensions {
    pub width: f64,
    pub height: f64,
}

impl VideoDimensions {
    /// CSS `padding-top` value that reserves the video's aspect ratio on a
    /// zero-height container. `None` until real dimensions are known.
    pub fn padding_top_percent(&self) -> Option<String> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(format!("{}%", self.height / self.width * 100.0))
    }
}

/// Control surface of a live embedded player.
///
/// Property getters read the runtime's current value; setters write through
/// immediately. Setters are fire-and-forget except [`PlayerHandle::play`],
/// whose refusal is observable.
pub trait PlayerHandle {
    fn autoplay(&self) -> bool;
    fn set_autoplay(&self, autoplay: bool);

    fn controls(&self) -> bool;
    fn set_controls(&self, controls: bool);

    /// Playback position in seconds; writing seeks.
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);

    /// Duration in seconds, `NaN` until known.
    fn duration(&self) -> f64;

    fn ended(&self) -> bool;

    fn loop_playback(&self) -> bool;
    fn set_loop_playback(&self, loop_playback: bool);

    fn muted(&self) -> bool;
    fn set_muted(&self, muted: bool);

    fn paused(&self) -> bool;

    /// Current preload hint as the runtime reports it.
    fn preload(&self) -> String;
    fn set_preload(&self, preload: &str);

    fn seeking(&self) -> bool;

    /// Source the player is currently loading or playing. Writing swaps the
    /// video in place; the embed URL itself is never replaced.
    fn src(&self) -> String;
    fn set_src(&self, src: &str);

    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);

    /// Write-only on the runtime side; reads would race ad playback, which
    /// temporarily overrides the rate.
    fn set_playback_rate(&self, rate: f64);

    fn set_primary_color(&self, color: Option<&str>);
    fn set_letterbox_color(&self, color: Option<&str>);

    /// Intrinsic video width in pixels, `0` until metadata loads.
    fn video_width(&self) -> f64;
    /// Intrinsic video height in pixels, `0` until metadata loads.
    fn video_height(&self) -> f64;

    fn dimensions(&self) -> VideoDimensions {
        VideoDimensions {
            width: self.video_width(),
            height: self.video_height(),
        }
    }

    fn play(&self) -> PlayResult;
    fn pause(&self);

    /// Subscribes `callback` to `event`. The same callback may be registered
    /// once per event; registering it again is a runtime-side no-op.
    fn add_event_listener(&self, event: PlayerEvent, callback: EventCallback);

    /// Unsubscribes the listener previously registered for `event`, matched
    /// by callback identity ([`Rc::ptr_eq`]).
    fn remove_event_listener(&self, event: PlayerEvent, callback: &EventCallback);
}

/// Shared cell through which callers observe the player handle.
///
/// Cloned freely; all clones see the same slot. Empty until acquisition
/// completes, empty again after unmount.
#[derive(Clone, Default)]
pub struct HandleSlot {
    inner: Arc<Mutex<Option<Rc<dyn PlayerHandle>>>>,
}

impl HandleSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the slot. Called once when the runtime hands over its API.
    pub fn fill(&self, handle: Rc<dyn PlayerHandle>) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            *self.inner.lock() = Some(handle);
        }
        #[cfg(target_arch = "wasm32")]
        {
            *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
        }
    }

    /// Empties the slot, dropping the held handle.
    pub fn clear(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            *self.inner.lock() = None;
        }
        #[cfg(target_arch = "wasm32")]
        {
            *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = None;
        }
    }

    /// Returns the current handle, if acquired.
    pub fn get(&self) -> Option<Rc<dyn PlayerHandle>> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.inner.lock().clone()
        }
        #[cfg(target_arch = "wasm32")]
        {
            self.inner
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }
    }

    /// True once the handle has been acquired.
    pub fn is_ready(&self) -> bool {
        self.get().is_some()
    }
}

impl std::fmt::Debug for HandleSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleSlot")
            .field("ready", &self.is_ready())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaybackError;
    use crate::test_util::RecordingPlayer;
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    // Play futures from the in-memory player resolve without suspending, so
    // a single poll with an inert waker is enough to extract the result.
    fn poll_once(mut future: PlayResult) -> Poll<Result<(), PlaybackError>> {
        fn raw() -> RawWaker {
            static VTABLE: RawWakerVTable =
                RawWakerVTable::new(|_| raw(), |_| {}, |_| {}, |_| {});
            RawWaker::new(std::ptr::null(), &VTABLE)
        }
        let waker = unsafe { Waker::from_raw(raw()) };
        let mut cx = Context::from_waker(&waker);
        future.as_mut().poll(&mut cx)
    }

    #[test]
    fn test_slot_starts_empty_and_round_trips() {
        let slot = HandleSlot::new();
        assert!(!slot.is_ready());
        assert!(slot.get().is_none());

        let player = Rc::new(RecordingPlayer::new());
        slot.fill(player.clone());
        assert!(slot.is_ready());

        let held = slot.get().unwrap();
        held.set_volume(0.5);
        assert_eq!(player.volume(), 0.5);

        slot.clear();
        assert!(!slot.is_ready());
    }

    #[test]
    fn test_clones_share_the_slot() {
        let slot = HandleSlot::new();
        let clone = slot.clone();
        slot.fill(Rc::new(RecordingPlayer::new()));
        assert!(clone.is_ready());
    }

    #[test]
    fn test_play_refusal_surfaces_as_the_future_error() {
        let player = RecordingPlayer::new();
        assert!(matches!(poll_once(player.play()), Poll::Ready(Ok(()))));

        player.refuse_play();
        match poll_once(player.play()) {
            Poll::Ready(Err(PlaybackError::NotAllowed(_))) => {}
            other => panic!("expected a NotAllowed rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_dimensions_flow_into_responsive_padding() {
        let player = RecordingPlayer::new();
        // Before metadata loads the player reports zero dimensions and the
        // responsive container gets no padding.
        assert_eq!(player.dimensions(), VideoDimensions::default());
        assert_eq!(player.dimensions().padding_top_percent(), None);

        player.set_dimensions(1600.0, 900.0);
        let dimensions = player.dimensions();
        assert_eq!(
            dimensions,
            VideoDimensions {
                width: 1600.0,
                height: 900.0,
            }
        );
        assert_eq!(dimensions.padding_top_percent().as_deref(), Some("56.25%"));
    }

    #[test]
    fn test_padding_top_percent() {
        let unknown = VideoDimensions::default();
        assert_eq!(unknown.padding_top_percent(), None);

        let wide = VideoDimensions {
            width: 1920.0,
            height: 1080.0,
        };
        assert_eq!(wide.padding_top_percent().as_deref(), Some("56.25%"));

        let square = VideoDimensions {
            width: 720.0,
            height: 720.0,
        };
        assert_eq!(square.padding_top_percent().as_deref(), Some("100%"));
    }
}
