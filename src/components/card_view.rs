use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, Touch, TouchEvent, TouchList};
use yew::prelude::*;

use crate::model::{PanEvent, Point};
use crate::state::{CardSurface, PanRecognizer};

#[derive(Properties, PartialEq, Clone)]
pub struct CardViewProps {
    pub card: CardSurface,
    pub animation_secs: f64,
    pub pan_slop: f64,
    /// Receives every recognizer event for this card.
    pub on_pan: Callback<PanEvent>,
}

fn mouse_point(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

fn touch_point(t: &Touch) -> Point {
    Point::new(t.client_x() as f64, t.client_y() as f64)
}

fn find_touch(list: &TouchList, id: i32) -> Option<Touch> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .find(|t| t.identifier() == id)
}

fn emit_all(cb: &Callback<PanEvent>, events: impl IntoIterator<Item = PanEvent>) {
    for ev in events {
        cb.emit(ev);
    }
}

#[function_component(CardView)]
pub fn card_view(props: &CardViewProps) -> Html {
    let recognizer = use_mut_ref(|| PanRecognizer::new(props.pan_slop));
    // latest callback for the window listeners installed once on mount
    let on_pan_ref = use_mut_ref(|| props.on_pan.clone());
    *on_pan_ref.borrow_mut() = props.on_pan.clone();

    // Mouse drags are tracked on the window so they survive leaving the card
    {
        let recognizer = recognizer.clone();
        let on_pan_ref = on_pan_ref.clone();
        use_effect_with((), move |_| {
            let listeners = web_sys::window().map(|window| {
                let mousemove = {
                    let recognizer = recognizer.clone();
                    let on_pan_ref = on_pan_ref.clone();
                    EventListener::new(&window, "mousemove", move |e| {
                        let Some(e) = e.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        if recognizer.borrow().touch_id().is_some() {
                            return;
                        }
                        let events = recognizer.borrow_mut().moved(mouse_point(e));
                        let cb = on_pan_ref.borrow().clone();
                        emit_all(&cb, events);
                    })
                };
                let mouseup = EventListener::new(&window, "mouseup", move |e| {
                    let Some(e) = e.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    if recognizer.borrow().touch_id().is_some() {
                        return;
                    }
                    let ev = recognizer.borrow_mut().release(mouse_point(e));
                    let cb = on_pan_ref.borrow().clone();
                    emit_all(&cb, ev);
                });
                (mousemove, mouseup)
            });
            move || drop(listeners)
        });
    }

    let onmousedown = {
        let recognizer = recognizer.clone();
        let on_pan = props.on_pan.clone();
        Callback::from(move |e: MouseEvent| {
            if e.button() != 0 {
                return;
            }
            e.prevent_default();
            let ev = recognizer.borrow_mut().press(mouse_point(&e), None);
            emit_all(&on_pan, ev);
        })
    };

    let ontouchstart = {
        let recognizer = recognizer.clone();
        let on_pan = props.on_pan.clone();
        Callback::from(move |e: TouchEvent| {
            let Some(t) = e.changed_touches().item(0) else {
                return;
            };
            let ev = recognizer
                .borrow_mut()
                .press(touch_point(&t), Some(t.identifier()));
            emit_all(&on_pan, ev);
        })
    };
    let ontouchmove = {
        let recognizer = recognizer.clone();
        let on_pan = props.on_pan.clone();
        Callback::from(move |e: TouchEvent| {
            let Some(id) = recognizer.borrow().touch_id() else {
                return;
            };
            let Some(t) = find_touch(&e.touches(), id) else {
                return;
            };
            let events = recognizer.borrow_mut().moved(touch_point(&t));
            emit_all(&on_pan, events);
        })
    };
    let ontouchend = {
        let recognizer = recognizer.clone();
        let on_pan = props.on_pan.clone();
        Callback::from(move |e: TouchEvent| {
            let Some(id) = recognizer.borrow().touch_id() else {
                return;
            };
            let Some(t) = find_touch(&e.changed_touches(), id) else {
                return;
            };
            let ev = recognizer.borrow_mut().release(touch_point(&t));
            emit_all(&on_pan, ev);
        })
    };
    let ontouchcancel = {
        let recognizer = recognizer.clone();
        let on_pan = props.on_pan.clone();
        Callback::from(move |e: TouchEvent| {
            let Some(id) = recognizer.borrow().touch_id() else {
                return;
            };
            if find_touch(&e.changed_touches(), id).is_none() {
                return;
            }
            let ev = recognizer.borrow_mut().cancel();
            emit_all(&on_pan, ev);
        })
    };

    let card = &props.card;
    let top_left = card.top_left();
    let transition = if card.phase.is_animating() {
        let s = props.animation_secs;
        format!("left {s}s ease-in-out, top {s}s ease-in-out, transform {s}s ease-in-out")
    } else {
        "none".to_string()
    };
    let style = format!(
        "position:absolute; left:{}px; top:{}px; width:{}px; height:{}px; background:{}; border-radius:12px; box-shadow:0 6px 18px rgba(0,0,0,0.25); transform:{}; transition:{}; touch-action:none; user-select:none; cursor:{};",
        top_left.x,
        top_left.y,
        card.size.width,
        card.size.height,
        card.color.to_css(),
        card.transform.to_css(),
        transition,
        if card.transform.is_identity() { "grab" } else { "grabbing" },
    );

    html! {
        <div
            class="swipe-card"
            data-phase={card.phase.to_string()}
            {style}
            {onmousedown}
            {ontouchstart}
            {ontouchmove}
            {ontouchend}
            {ontouchcancel}
        />
    }
}
