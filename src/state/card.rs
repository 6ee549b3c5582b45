use thiserror::Error;

use crate::model::{
    CardId, CardTransform, DragSession, PanEvent, PanPhase, Point, Rgb, Size, SurfacePhase, Vector,
};
use crate::state::tuning::SwipeTuning;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DragError {
    #[error("pan {phase} delivered without an active drag session")]
    NoActiveSession { phase: PanPhase },
    #[error("pan {pan} ignored while card is {phase}")]
    NotInteractive { pan: PanPhase, phase: SurfacePhase },
}

/// A draggable card. Owned by the deck; `handle_pan` hands the final
/// displacement back to the owner when a drag completes.
#[derive(Clone, Debug, PartialEq)]
pub struct CardSurface {
    pub id: CardId,
    pub size: Size,
    pub color: Rgb,
    pub center: Point,
    pub transform: CardTransform,
    pub session: DragSession,
    /// Where a reset returns to: the origin of the last drag, or the spawn center.
    pub rest_center: Point,
    pub phase: SurfacePhase,
}

impl CardSurface {
    pub fn new(id: CardId, size: Size, center: Point, color: Rgb) -> Self {
        Self {
            id,
            size,
            color,
            center,
            transform: CardTransform::IDENTITY,
            session: DragSession::NoSession,
            rest_center: center,
            phase: SurfacePhase::Idle,
        }
    }

    /// Top-left corner of the untransformed card.
    pub fn top_left(&self) -> Point {
        Point::new(
            self.center.x - self.size.width * 0.5,
            self.center.y - self.size.height * 0.5,
        )
    }

    /// Applies one recognizer event. Returns the displacement when the drag ends.
    pub fn handle_pan(
        &mut self,
        event: PanEvent,
        tuning: &SwipeTuning,
    ) -> Result<Option<Vector>, DragError> {
        if !self.phase.accepts_input() {
            return Err(DragError::NotInteractive {
                pan: event.phase,
                phase: self.phase,
            });
        }
        match event.phase {
            PanPhase::Began => {
                self.session = DragSession::Active { origin: self.center };
                self.rest_center = self.center;
                self.phase = SurfacePhase::Dragging;
                Ok(None)
            }
            PanPhase::Changed => {
                let origin = self.active_origin(PanPhase::Changed)?;
                self.center = origin.offset(event.translation);
                self.transform = tuning.drag_transform(event.translation);
                Ok(None)
            }
            PanPhase::Ended => {
                self.active_origin(PanPhase::Ended)?;
                self.session = DragSession::NoSession;
                Ok(Some(event.translation))
            }
            PanPhase::Possible | PanPhase::Cancelled | PanPhase::Failed => Ok(None),
        }
    }

    fn active_origin(&self, phase: PanPhase) -> Result<Point, DragError> {
        self.session
            .origin()
            .ok_or(DragError::NoActiveSession { phase })
    }

    /// Starts the snap-back animation to the rest center with identity transform.
    pub fn reset(&mut self) {
        self.center = self.rest_center;
        self.transform = CardTransform::IDENTITY;
        self.session = DragSession::NoSession;
        self.phase = SurfacePhase::Resetting;
    }

    /// Starts the throw animation, continuing horizontally by `throw_dx`.
    pub fn dismiss(&mut self, throw_dx: f64) {
        self.center.x += throw_dx;
        self.session = DragSession::NoSession;
        self.phase = SurfacePhase::Dismissing;
    }

    /// Animation completed: dismissing cards are removed, resetting ones go idle.
    pub fn finish_animation(&mut self) -> SurfacePhase {
        self.phase = match self.phase {
            SurfacePhase::Dismissing => SurfacePhase::Removed,
            SurfacePhase::Resetting => SurfacePhase::Idle,
            other => other,
        };
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_at(x: f64, y: f64) -> CardSurface {
        CardSurface::new(
            CardId(1),
            Size::new(200.0, 260.0),
            Point::new(x, y),
            Rgb { r: 0.2, g: 0.4, b: 0.6 },
        )
    }

    fn pan(phase: PanPhase, dx: f64, dy: f64) -> PanEvent {
        PanEvent::new(phase, Vector::new(dx, dy))
    }

    #[test]
    fn update_is_computed_from_origin_not_accumulated() {
        let t = SwipeTuning::default();
        let mut c = card_at(100.0, 100.0);
        c.handle_pan(pan(PanPhase::Began, 0.0, 0.0), &t).unwrap();
        for step in 1..=40 {
            let dx = step as f64 * 5.0;
            c.handle_pan(pan(PanPhase::Changed, dx, dx / 2.0), &t).unwrap();
        }
        assert_eq!(c.center, Point::new(300.0, 200.0));
        assert_eq!(c.transform, t.drag_transform(Vector::new(200.0, 100.0)));
        assert_eq!(c.phase, SurfacePhase::Dragging);
    }

    #[test]
    fn end_yields_displacement_and_keeps_transform() {
        let t = SwipeTuning::default();
        let mut c = card_at(100.0, 100.0);
        c.handle_pan(pan(PanPhase::Began, 0.0, 0.0), &t).unwrap();
        c.handle_pan(pan(PanPhase::Changed, 200.0, 0.0), &t).unwrap();
        let before = c.transform;
        let done = c.handle_pan(pan(PanPhase::Ended, 200.0, 0.0), &t).unwrap();
        assert_eq!(done, Some(Vector::new(200.0, 0.0)));
        assert_eq!(c.transform, before);
        assert_eq!(c.session, DragSession::NoSession);
    }

    #[test]
    fn changed_without_began_fails_safely() {
        let t = SwipeTuning::default();
        let mut c = card_at(50.0, 60.0);
        let snapshot = c.clone();
        let err = c.handle_pan(pan(PanPhase::Changed, 10.0, 0.0), &t).unwrap_err();
        assert_eq!(err, DragError::NoActiveSession { phase: PanPhase::Changed });
        let err = c.handle_pan(pan(PanPhase::Ended, 10.0, 0.0), &t).unwrap_err();
        assert_eq!(err, DragError::NoActiveSession { phase: PanPhase::Ended });
        assert_eq!(c, snapshot);
    }

    #[test]
    fn inert_phases_are_no_ops() {
        let t = SwipeTuning::default();
        let mut c = card_at(0.0, 0.0);
        c.handle_pan(pan(PanPhase::Began, 0.0, 0.0), &t).unwrap();
        c.handle_pan(pan(PanPhase::Changed, 30.0, 30.0), &t).unwrap();
        let snapshot = c.clone();
        for phase in [PanPhase::Possible, PanPhase::Cancelled, PanPhase::Failed] {
            assert_eq!(c.handle_pan(pan(phase, 99.0, 99.0), &t), Ok(None));
        }
        assert_eq!(c, snapshot);
    }

    #[test]
    fn reset_returns_to_origin_and_is_idempotent() {
        let t = SwipeTuning::default();
        let mut c = card_at(100.0, 100.0);
        c.handle_pan(pan(PanPhase::Began, 0.0, 0.0), &t).unwrap();
        c.handle_pan(pan(PanPhase::Changed, 20.0, 0.0), &t).unwrap();
        c.handle_pan(pan(PanPhase::Ended, 20.0, 0.0), &t).unwrap();
        c.reset();
        let once = (c.center, c.transform);
        c.reset();
        assert_eq!((c.center, c.transform), once);
        assert_eq!(c.center, Point::new(100.0, 100.0));
        assert!(c.transform.is_identity());
    }

    #[test]
    fn animating_card_rejects_input() {
        let t = SwipeTuning::default();
        let mut c = card_at(100.0, 100.0);
        c.reset();
        let err = c.handle_pan(pan(PanPhase::Began, 0.0, 0.0), &t).unwrap_err();
        assert_eq!(
            err,
            DragError::NotInteractive {
                pan: PanPhase::Began,
                phase: SurfacePhase::Resetting
            }
        );
        assert_eq!(c.finish_animation(), SurfacePhase::Idle);
        assert!(c.handle_pan(pan(PanPhase::Began, 0.0, 0.0), &t).is_ok());
    }

    #[test]
    fn dismiss_then_finish_removes() {
        let mut c = card_at(300.0, 100.0);
        c.dismiss(400.0);
        assert_eq!(c.center, Point::new(700.0, 100.0));
        assert_eq!(c.phase, SurfacePhase::Dismissing);
        assert_eq!(c.finish_animation(), SurfacePhase::Removed);
        assert_eq!(c.finish_animation(), SurfacePhase::Removed);
    }

    #[test]
    fn top_left_centers_the_card() {
        let c = card_at(100.0, 130.0);
        assert_eq!(c.top_left(), Point::new(0.0, 0.0));
    }
}
