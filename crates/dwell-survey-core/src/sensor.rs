//! Sensor hand-off into the update thread
//!
//! The sensor collaborator runs on its own thread and publishes
//! [`SensorEvent`]s through a [`SensorFeed`]. The update thread drains the
//! matching [`SensorInbox`] once per tick and only keeps the most recent
//! sample per person.

use std::collections::BTreeMap;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::spatial::Point2D;

/// Hand positions of one person, projected onto the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySample {
    pub entity_id: u32,
    pub left: Option<Point2D>,
    pub right: Option<Point2D>,
    pub captured_at: Instant,
}

impl BodySample {
    pub fn new(entity_id: u32, captured_at: Instant) -> Self {
        Self {
            entity_id,
            left: None,
            right: None,
            captured_at,
        }
    }

    pub fn with_left(mut self, point: Point2D) -> Self {
        self.left = Some(point);
        self
    }

    pub fn with_right(mut self, point: Point2D) -> Self {
        self.right = Some(point);
        self
    }
}

/// What the sensor collaborator can report
#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    /// A tracked person with fresh joint positions
    Sample(BodySample),
    /// The sensor stopped tracking this person
    Lost { entity_id: u32 },
}

/// Sending half, cloned into every sensor callback
#[derive(Debug, Clone)]
pub struct SensorFeed {
    tx: mpsc::UnboundedSender<SensorEvent>,
}

impl SensorFeed {
    /// Publish an event. Returns false once the kiosk has shut down.
    pub fn publish(&self, event: SensorEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Everything that arrived since the previous tick
#[derive(Debug, Default)]
pub struct SensorBatch {
    /// Latest sample per person
    pub samples: BTreeMap<u32, BodySample>,
    /// People lost with no newer sample afterwards
    pub lost: Vec<u32>,
}

impl SensorBatch {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty() && self.lost.is_empty()
    }
}

/// Receiving half, owned by the update thread
#[derive(Debug)]
pub struct SensorInbox {
    rx: mpsc::UnboundedReceiver<SensorEvent>,
    disconnected: bool,
}

impl SensorInbox {
    /// Create a connected feed/inbox pair
    pub fn channel() -> (SensorFeed, SensorInbox) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            SensorFeed { tx },
            SensorInbox {
                rx,
                disconnected: false,
            },
        )
    }

    /// Take every pending event without blocking, last writer wins per person
    pub fn drain(&mut self) -> SensorBatch {
        let mut batch = SensorBatch::default();

        loop {
            match self.rx.try_recv() {
                Ok(SensorEvent::Sample(sample)) => {
                    batch.lost.retain(|id| *id != sample.entity_id);
                    batch.samples.insert(sample.entity_id, sample);
                }
                Ok(SensorEvent::Lost { entity_id }) => {
                    batch.samples.remove(&entity_id);
                    if !batch.lost.contains(&entity_id) {
                        batch.lost.push(entity_id);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.disconnected = true;
                    break;
                }
            }
        }

        batch
    }

    /// True once every feed has been dropped and the queue is empty
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}
