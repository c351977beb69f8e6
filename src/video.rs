//! Live video feed notifications
//!
//! Enemy faces can show a live camera feed instead of their composited face
//! image. Whatever owns the device holds a [`VideoFeed`]; the enemy collection
//! receives the matching [`VideoEvents`] at construction and drains it at the
//! start of every update.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::consts::VIDEO_FRAME_MS;

/// Notification about the shared video texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoEvent {
    /// The feed became available; faces should show it
    Enabled,
    /// The feed went away; faces revert to their own images
    Disabled,
    /// A new frame was copied into the shared texture
    FrameUpdated,
}

/// Create a connected feed / receiver pair
pub fn channel() -> (VideoFeed, VideoEvents) {
    let (tx, rx) = mpsc::channel();
    (
        VideoFeed {
            tx,
            playing: false,
            elapsed: 0.0,
        },
        VideoEvents { rx },
    )
}

/// Sending side, owned by whatever drives the camera device
#[derive(Debug)]
pub struct VideoFeed {
    tx: Sender<VideoEvent>,
    playing: bool,
    elapsed: f32,
}

impl VideoFeed {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The device stream started
    pub fn enable(&mut self) {
        self.playing = true;
        self.elapsed = 0.0;
        self.send(VideoEvent::Enabled);
    }

    /// The device stream stopped
    pub fn disable(&mut self) {
        self.playing = false;
        self.send(VideoEvent::Disabled);
    }

    /// Throttle frame notifications to one per [`VIDEO_FRAME_MS`] while playing
    pub fn update(&mut self, elapsed: f32) {
        if !self.playing {
            return;
        }
        self.elapsed += elapsed;
        if self.elapsed > VIDEO_FRAME_MS {
            self.elapsed = 0.0;
            self.send(VideoEvent::FrameUpdated);
        }
    }

    fn send(&self, event: VideoEvent) {
        // Receiver gone means the game is shutting down
        if self.tx.send(event).is_err() {
            log::debug!("video event {:?} dropped, no receiver", event);
        }
    }
}

/// Receiving side, injected into the enemy collection
#[derive(Debug)]
pub struct VideoEvents {
    rx: Receiver<VideoEvent>,
}

impl VideoEvents {
    /// Take every pending event without blocking
    pub fn drain(&self) -> Vec<VideoEvent> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_disable_are_delivered_in_order() {
        let (mut feed, events) = channel();
        feed.enable();
        feed.disable();
        assert_eq!(events.drain(), vec![VideoEvent::Enabled, VideoEvent::Disabled]);
        assert!(events.drain().is_empty());
    }

    #[test]
    fn test_frames_are_throttled() {
        let (mut feed, events) = channel();
        feed.update(500.0);
        assert!(events.drain().is_empty(), "no frames while stopped");

        feed.enable();
        events.drain();
        feed.update(60.0);
        feed.update(60.0);
        feed.update(60.0);
        assert_eq!(events.drain(), vec![VideoEvent::FrameUpdated]);
    }

    #[test]
    fn test_dropped_receiver_is_not_fatal() {
        let (mut feed, events) = channel();
        drop(events);
        feed.enable();
        assert!(feed.is_playing());
    }
}
