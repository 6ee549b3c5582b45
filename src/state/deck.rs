//! The card host: owns the current card and decides what happens when a drag ends.

use std::rc::Rc;
use yew::Reducible;

use crate::model::{CardId, PanEvent, Rgb, Size, SurfacePhase, Vector};
use crate::state::card::CardSurface;
use crate::state::tuning::{Outcome, SwipeTuning};
use crate::util::{clog, dlog};

#[derive(Clone, Debug, PartialEq)]
pub struct Deck {
    pub tuning: SwipeTuning,
    /// Host bounds the card is centered in.
    pub bounds: Size,
    pub card: Option<CardSurface>,
    pub next_id: u32,
    /// Set once a dismissed card is removed; cleared by the next spawn.
    pub respawn_pending: bool,
    pub dismissed: u32,
}

pub enum DeckAction {
    Spawn { bounds: Size, color: Rgb },
    Resize { bounds: Size },
    Pan { id: CardId, event: PanEvent },
    AnimationFinished { id: CardId },
}

impl Deck {
    pub fn new(tuning: SwipeTuning) -> Self {
        Self {
            tuning,
            bounds: Size::default(),
            card: None,
            next_id: 1,
            respawn_pending: false,
            dismissed: 0,
        }
    }

    fn spawn(&mut self, bounds: Size, color: Rgb) {
        self.bounds = bounds;
        let id = CardId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let card = CardSurface::new(id, self.tuning.card_size(), bounds.center(), color);
        dlog(&format!("spawn {} at ({:.0}, {:.0})", id, card.center.x, card.center.y));
        self.card = Some(card);
        self.respawn_pending = false;
    }

    /// Completion callback for a finished drag on the current card.
    fn drag_finished(&mut self, distance: Vector) {
        let outcome = self.tuning.outcome_for(distance);
        let Some(card) = self.card.as_mut() else {
            return;
        };
        dlog(&format!(
            "{} released at dx={:.1} dy={:.1}: {:?}",
            card.id, distance.dx, distance.dy, outcome
        ));
        match outcome {
            Outcome::Dismiss { throw_dx } => card.dismiss(throw_dx),
            Outcome::Reset => card.reset(),
        }
    }

    fn animation_finished(&mut self, id: CardId) {
        let Some(card) = self.card.as_mut().filter(|c| c.id == id) else {
            return;
        };
        if card.finish_animation() == SurfacePhase::Removed {
            dlog(&format!("{} removed", id));
            self.card = None;
            self.dismissed = self.dismissed.saturating_add(1);
            self.respawn_pending = true;
        }
    }
}

impl Reducible for Deck {
    type Action = DeckAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use DeckAction::*;
        let mut new = (*self).clone();
        match action {
            Spawn { bounds, color } => {
                if new.card.is_some() {
                    return self;
                }
                new.spawn(bounds, color);
            }
            Resize { bounds } => {
                if new.bounds == bounds {
                    return self;
                }
                new.bounds = bounds;
            }
            Pan { id, event } => {
                let tuning = new.tuning.clone();
                let Some(card) = new.card.as_mut().filter(|c| c.id == id) else {
                    return self;
                };
                match card.handle_pan(event, &tuning) {
                    Ok(Some(distance)) => new.drag_finished(distance),
                    Ok(None) => {}
                    Err(e) => {
                        clog(&format!("{}: {}", id, e));
                        return self;
                    }
                }
            }
            AnimationFinished { id } => new.animation_finished(id),
        }
        if new == *self { self } else { Rc::new(new) }
    }
}
