// Pan gesture recognizer fed by raw mouse/touch positions (client coordinates).
use crate::model::{PanEvent, PanPhase, Point, Vector};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Tracking {
    #[default]
    Idle,
    /// Pressed but not yet moved past the slop.
    Pressed,
    Panning,
}

/// Single-pointer pan recognizer. Touches other than the first one are ignored.
#[derive(Clone, Debug, Default)]
pub struct PanRecognizer {
    tracking: Tracking,
    start: Point,
    last: Point,
    touch_id: Option<i32>,
    slop: f64,
}

impl PanRecognizer {
    pub fn new(slop: f64) -> Self {
        Self {
            slop: slop.max(0.0),
            ..Default::default()
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking != Tracking::Idle
    }

    pub fn touch_id(&self) -> Option<i32> {
        self.touch_id
    }

    /// Pointer went down. Returns `Possible` unless a pointer is already tracked.
    pub fn press(&mut self, at: Point, touch_id: Option<i32>) -> Option<PanEvent> {
        if self.is_tracking() {
            return None;
        }
        self.tracking = Tracking::Pressed;
        self.start = at;
        self.last = at;
        self.touch_id = touch_id;
        Some(PanEvent::new(PanPhase::Possible, Vector::ZERO))
    }

    /// Pointer moved. The first move past the slop yields `Began` then `Changed`.
    pub fn moved(&mut self, at: Point) -> Vec<PanEvent> {
        match self.tracking {
            Tracking::Idle => Vec::new(),
            Tracking::Pressed => {
                let translation = at.since(self.start);
                if translation.length() < self.slop {
                    return Vec::new();
                }
                self.tracking = Tracking::Panning;
                self.last = at;
                vec![
                    PanEvent::new(PanPhase::Began, translation),
                    PanEvent::new(PanPhase::Changed, translation),
                ]
            }
            Tracking::Panning => {
                if at == self.last {
                    return Vec::new();
                }
                self.last = at;
                vec![PanEvent::new(PanPhase::Changed, at.since(self.start))]
            }
        }
    }

    /// Pointer released at `at`. A press that never panned fails.
    pub fn release(&mut self, at: Point) -> Option<PanEvent> {
        let was = std::mem::take(&mut self.tracking);
        self.touch_id = None;
        match was {
            Tracking::Idle => None,
            Tracking::Pressed => Some(PanEvent::new(PanPhase::Failed, Vector::ZERO)),
            Tracking::Panning => Some(PanEvent::new(PanPhase::Ended, at.since(self.start))),
        }
    }

    /// System interrupted the gesture (touchcancel).
    pub fn cancel(&mut self) -> Option<PanEvent> {
        let was = std::mem::take(&mut self.tracking);
        self.touch_id = None;
        match was {
            Tracking::Idle => None,
            Tracking::Pressed => Some(PanEvent::new(PanPhase::Failed, Vector::ZERO)),
            Tracking::Panning => Some(PanEvent::new(
                PanPhase::Cancelled,
                self.last.since(self.start),
            )),
        }
    }
}
