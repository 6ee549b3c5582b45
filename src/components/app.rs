use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use web_sys::Element;
use yew::prelude::*;

use super::card_view::CardView;
use crate::model::{PanEvent, Rgb, Size};
use crate::state::{Deck, DeckAction};
use crate::util::load_tuning;

/// Host bounds from the container element, falling back to the window size.
fn measure(host_ref: &NodeRef) -> Size {
    if let Some(el) = host_ref.cast::<Element>() {
        let rect = el.get_bounding_client_rect();
        if rect.width() > 0.0 && rect.height() > 0.0 {
            return Size::new(rect.width(), rect.height());
        }
    }
    let (w, h) = web_sys::window()
        .map(|win| {
            let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            (w, h)
        })
        .unwrap_or((800.0, 600.0));
    Size::new(w, h)
}

#[function_component(App)]
pub fn app() -> Html {
    let host_ref = use_node_ref();
    let deck = use_reducer(|| Deck::new(load_tuning()));

    // First card once the host is laid out, plus resize tracking
    {
        let host_ref = host_ref.clone();
        let dispatcher = deck.dispatcher();
        use_effect_with((), move |_| {
            dispatcher.dispatch(DeckAction::Spawn {
                bounds: measure(&host_ref),
                color: Rgb::random(),
            });
            let resize = web_sys::window().map(|window| {
                EventListener::new(&window, "resize", move |_| {
                    dispatcher.dispatch(DeckAction::Resize {
                        bounds: measure(&host_ref),
                    });
                })
            });
            move || drop(resize)
        });
    }

    // Animation completion; dropping the timeout cancels it
    {
        let animating = deck
            .card
            .as_ref()
            .filter(|c| c.phase.is_animating())
            .map(|c| (c.id, c.phase));
        let dispatcher = deck.dispatcher();
        let ms = deck.tuning.animation_ms();
        use_effect_with(animating, move |animating| {
            let timer = (*animating).map(|(id, _)| {
                Timeout::new(ms, move || {
                    dispatcher.dispatch(DeckAction::AnimationFinished { id })
                })
            });
            move || drop(timer)
        });
    }

    // Respawn after a dismissed card is removed; cancelled on unmount
    {
        let host_ref = host_ref.clone();
        let dispatcher = deck.dispatcher();
        let ms = deck.tuning.respawn_delay_ms();
        use_effect_with(deck.respawn_pending, move |pending| {
            let timer = (*pending).then(|| {
                Timeout::new(ms, move || {
                    dispatcher.dispatch(DeckAction::Spawn {
                        bounds: measure(&host_ref),
                        color: Rgb::random(),
                    })
                })
            });
            move || drop(timer)
        });
    }

    let card = deck.card.as_ref().map(|card| {
        let dispatcher = deck.dispatcher();
        let id = card.id;
        let on_pan =
            Callback::from(move |event: PanEvent| dispatcher.dispatch(DeckAction::Pan { id, event }));
        html! {
            <CardView
                key={id.to_string()}
                card={card.clone()}
                animation_secs={deck.tuning.animation_secs}
                pan_slop={deck.tuning.pan_slop}
                {on_pan}
            />
        }
    });

    html! {
        <div
            id="card-host"
            ref={host_ref}
            style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#ffffff;"
        >
            <div style="position:absolute; top:12px; left:50%; transform:translateX(-50%); color:#57606a; font:14px sans-serif; pointer-events:none;">
                { format!("Swiped: {}", deck.dismissed) }
            </div>
            { for card }
        </div>
    }
}
