// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The event channel between the windowing shell and the application.

use crate::input::InputEvent;

/// Shell-level events delivered to the application loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// The application window was resized. Dimensions are logical pixels.
    WindowResized {
        /// New window width.
        width: u32,
        /// New window height.
        height: u32,
    },

    /// An input event occurred (wraps the specific [`InputEvent`]).
    Input(InputEvent),

    /// The user asked to close the window.
    CloseRequested,
}

/// Manages the underlying event channel (sender and receiver).
#[derive(Debug)]
pub struct EventBus {
    sender: flume::Sender<ShellEvent>,
    receiver: flume::Receiver<ShellEvent>,
}

impl EventBus {
    /// Creates a new EventBus with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::debug!("EventBus initialized.");
        Self { sender, receiver }
    }

    /// Attempts to send an event, logging an error if the receiver is
    /// disconnected.
    pub fn publish(&self, event: ShellEvent) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to send event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sender end of the channel.
    /// Use this to allow other parts of the system to send events.
    pub fn sender(&self) -> flume::Sender<ShellEvent> {
        self.sender.clone()
    }

    /// Iterates over the events queued so far without blocking.
    ///
    /// The application loop drains the bus once per frame before updating.
    pub fn drain(&self) -> flume::TryIter<'_, ShellEvent> {
        self.receiver.try_iter()
    }

    /// Returns a reference to the receiver end of the channel.
    pub(crate) fn receiver(&self) -> &flume::Receiver<ShellEvent> {
        &self.receiver
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use flume::{SendError, TryRecvError};
    use std::{thread, time::Duration};

    fn dummy_input_event() -> ShellEvent {
        ShellEvent::Input(InputEvent::KeyPressed {
            key_code: "Test".to_string(),
            modifiers: Modifiers::NONE,
        })
    }

    #[test]
    fn event_bus_creation() {
        let bus = EventBus::new();
        let _sender = bus.sender();
    }

    #[test]
    fn send_receive_single_event() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let receiver = bus.receiver();
        let event_to_send = dummy_input_event();

        sender
            .send(event_to_send.clone())
            .expect("Send should succeed");

        // Use recv_timeout to wait a short duration, preventing infinite
        // hang if the test fails.
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(received_event) => assert_eq!(received_event, event_to_send),
            Err(e) => panic!("Failed to receive event: {e:?}"),
        }
    }

    #[test]
    fn try_receive_empty() {
        let bus = EventBus::new();
        let receiver = bus.receiver();

        match receiver.try_recv() {
            Err(TryRecvError::Empty) => { /* This is expected */ }
            Ok(event) => panic!("Received unexpected event: {event:?}"),
            Err(e) => panic!("Received unexpected error: {e:?}"),
        }
    }

    /// Publishes three events and checks that `drain` yields them in order
    /// and leaves the channel empty.
    #[test]
    fn drain_preserves_publish_order() {
        let bus = EventBus::new();

        let event1 = ShellEvent::WindowResized {
            width: 1,
            height: 1,
        };
        let event2 = dummy_input_event();
        let event3 = ShellEvent::CloseRequested;

        bus.publish(event1.clone());
        bus.publish(event2.clone());
        bus.publish(event3.clone());

        let received: Vec<ShellEvent> = bus.drain().collect();
        assert_eq!(received, vec![event1, event2, event3]);

        assert_eq!(bus.receiver().try_recv(), Err(TryRecvError::Empty));
    }

    /// Two senders feed one receiver; both events must arrive.
    #[test]
    fn multiple_senders() {
        let bus = EventBus::new();
        let sender1 = bus.sender();
        let sender2 = bus.sender();
        let receiver = bus.receiver();

        let event1 = ShellEvent::WindowResized {
            width: 1,
            height: 1,
        };
        let event2 = dummy_input_event();

        sender1.send(event1.clone()).expect("Send 1 should succeed");
        sender2.send(event2.clone()).expect("Send 2 should succeed");

        let rec1 = receiver
            .recv_timeout(Duration::from_millis(50))
            .expect("Receive 1 failed");
        let rec2 = receiver
            .recv_timeout(Duration::from_millis(50))
            .expect("Receive 2 failed");

        // Check that both events were received, regardless of order.
        assert!((rec1 == event1 && rec2 == event2) || (rec1 == event2 && rec2 == event1));
    }

    /// Sending from a spawned thread must reach the main-thread receiver.
    #[test]
    fn send_from_thread() {
        let bus = EventBus::new();
        let sender_clone = bus.sender();
        let receiver = bus.receiver();
        let event_to_send = dummy_input_event();
        let event_clone = event_to_send.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            sender_clone
                .send(event_clone)
                .expect("Send from thread failed");
        });

        match receiver.recv_timeout(Duration::from_secs(1)) {
            Ok(received_event) => assert_eq!(received_event, event_to_send),
            Err(e) => panic!("Failed to receive event from thread: {e:?}"),
        }

        handle.join().expect("Thread join failed");
    }

    /// Sending after the receiver is gone fails gracefully rather than
    /// panicking.
    #[test]
    fn send_error_on_receiver_drop() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let event_to_send = dummy_input_event();

        // Drop the bus, which drops the receiver.
        drop(bus);

        match sender.send(event_to_send) {
            Err(SendError(_)) => { /* This is the expected outcome */ }
            Ok(()) => panic!("Send unexpectedly succeeded after receiver drop"),
        }
    }
}
