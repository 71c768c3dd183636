// Per-frame timestamp notifications for UI and other listeners

use std::sync::mpsc::{self, Receiver, Sender};

/// Receives the current timestamp once per frame.
///
/// The player controller publishes through this and never reads anything
/// back, so implementations must not block.
pub trait TickNotifier {
    fn time_changed(&mut self, time_ms: f64);
}

/// Forwards timestamps over a channel to a separate consumer (e.g. a HUD)
#[derive(Debug)]
pub struct ChannelNotifier {
    sender: Sender<f64>,
}

impl ChannelNotifier {
    /// Create a notifier together with the receiving end
    pub fn new() -> (Self, Receiver<f64>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl TickNotifier for ChannelNotifier {
    fn time_changed(&mut self, time_ms: f64) {
        // A dropped receiver just means nobody is listening anymore
        if self.sender.send(time_ms).is_err() {
            log::trace!("time-changed {:.1}ms with no listener", time_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_notifier_delivers_in_order() {
        let (mut notifier, receiver) = ChannelNotifier::new();
        notifier.time_changed(16.0);
        notifier.time_changed(32.5);

        let received: Vec<f64> = receiver.try_iter().collect();
        assert_eq!(received, vec![16.0, 32.5]);
    }

    #[test]
    fn test_channel_notifier_survives_dropped_receiver() {
        let (mut notifier, receiver) = ChannelNotifier::new();
        drop(receiver);
        notifier.time_changed(1.0);
    }
}
