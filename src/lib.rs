pub mod config;
pub mod controller;
pub mod deck;
pub mod gesture;
pub mod images;
pub mod stage;
pub mod storage;

use config::SwipeConfig;
use controller::{SettleTicket, SwipeController, SwipeState};
use deck::{Decision, Item};
use gesture::Point;
use gloo_timers::callback::Timeout;
use images::CatImageSource;
use log::warn;
use stage::CardStage;
use std::cell::RefCell;
use std::rc::Rc;
use storage::{LocalStorageFlags, ThemePreference};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use web_sys::window;
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

const CONFIG_ELEMENT_ID: &str = "swipe-config";
const FALLBACK_VIEWPORT_WIDTH: f64 = 1024.0;

type SharedController = Rc<RefCell<SwipeController<CardStage, CatImageSource>>>;

#[function_component(App)]
fn app() -> Html {
    let controller: SharedController = use_mut_ref(|| {
        let config = load_config();
        let stage = CardStage::new(config.settle_duration_ms);
        SwipeController::new(config, stage, CatImageSource::new())
    });
    let theme = use_mut_ref(|| ThemePreference::load(LocalStorageFlags));
    let active_pointer = use_mut_ref(|| None::<i32>);
    let redraw = use_force_update();

    let features = controller.borrow().config().features;
    let initial_dark = features.dark_mode && theme.borrow().is_dark();
    let dark_mode = use_state(move || initial_dark);

    use_effect_with_deps(
        move |dark: &bool| {
            apply_theme(*dark);
            || ()
        },
        *dark_mode,
    );

    let on_swipe = |decision: Decision| {
        let controller = controller.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            let ticket = controller
                .borrow_mut()
                .swipe(decision, viewport_width());
            if let Some(ticket) = ticket {
                schedule_settle(controller.clone(), redraw.clone(), ticket);
            }
            redraw.force_update();
        })
    };
    let on_like = on_swipe(Decision::Like);
    let on_dislike = on_swipe(Decision::Dislike);

    let on_undo = {
        let controller = controller.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            if controller.borrow_mut().undo() {
                redraw.force_update();
            }
        })
    };

    let on_restart = {
        let controller = controller.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            if controller.borrow_mut().restart() {
                redraw.force_update();
            }
        })
    };

    let on_toggle_dark = {
        let theme = theme.clone();
        let dark_mode = dark_mode.clone();
        Callback::from(move |_: MouseEvent| {
            let dark = theme.borrow_mut().toggle();
            dark_mode.set(dark);
        })
    };

    let ctl = controller.borrow();
    let stage = ctl.sink();
    let progress = stage.progress();
    let idle = ctl.state() == SwipeState::Idle;
    let can_undo = ctl.can_undo();

    let top_card = stage.cards().first().cloned().map(|item| {
        render_top_card(
            stage,
            item,
            controller.clone(),
            active_pointer.clone(),
            redraw.clone(),
        )
    });
    let lower_cards = stage
        .cards()
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .map(|(index, item)| render_card(stage, index, item, Callbacks::default()))
        .collect::<Html>();

    let summary = match stage.summary() {
        Some(liked) => html! {
            <section class="summary">
                <h2>{ "That's every cat!" }</h2>
                <p>{ format!("You liked {} of {}", liked.len(), progress.total) }</p>
                <div class="liked-images">
                    { for liked.iter().map(|item| html! {
                        <img src={item.to_string()} alt="A cat you liked" />
                    }) }
                </div>
                if features.restart {
                    <button class="restart" onclick={on_restart.clone()}>{ "Start over" }</button>
                }
            </section>
        },
        None => html! {},
    };

    html! {
        <div class="app-container">
            <header class="toolbar">
                <div class="progress">
                    <span class="counter">
                        { format!("{} / {}", progress.display_position(), progress.total) }
                    </span>
                    <div class="progress-track">
                        <div class="progress-line" style={format!("width: {:.1}%;", progress.percent())}></div>
                    </div>
                </div>
                if features.dark_mode {
                    <button class="dark-toggle" onclick={on_toggle_dark}>
                        { if *dark_mode { "☀" } else { "☾" } }
                    </button>
                }
            </header>
            <main class="card-container">
                { lower_cards }
                { for top_card }
            </main>
            <nav class="controls">
                <button class="dislike" disabled={!idle} onclick={on_dislike}>{ "✕" }</button>
                if features.undo {
                    <button class="undo" disabled={!can_undo} onclick={on_undo}>{ "↺" }</button>
                }
                <button class="like" disabled={!idle} onclick={on_like}>{ "♥" }</button>
                if features.restart {
                    <button class="restart" onclick={on_restart}>{ "Restart" }</button>
                }
            </nav>
            { summary }
        </div>
    }
}

#[derive(Default)]
struct Callbacks {
    down: Option<Callback<web_sys::PointerEvent>>,
    moved: Option<Callback<web_sys::PointerEvent>>,
    up: Option<Callback<web_sys::PointerEvent>>,
    cancel: Option<Callback<web_sys::PointerEvent>>,
}

fn render_card(stage: &CardStage, index: usize, item: &Item, callbacks: Callbacks) -> Html {
    let (like_opacity, nope_opacity) = stage.label_opacity(index);
    let style = format!("background-image: url({}); {}", item, stage.card_style(index));
    let class = if index == 0 { "card top" } else { "card" };

    html! {
        <div class={class}
            key={format!("{index}-{item}")}
            style={style}
            onpointerdown={callbacks.down}
            onpointermove={callbacks.moved}
            onpointerup={callbacks.up}
            onpointercancel={callbacks.cancel}>
            <div class="label like" style={format!("opacity: {like_opacity:.2};")}>{ "LIKE" }</div>
            <div class="label dislike" style={format!("opacity: {nope_opacity:.2};")}>{ "NOPE" }</div>
        </div>
    }
}

fn render_top_card(
    stage: &CardStage,
    item: Item,
    controller: SharedController,
    active_pointer: Rc<RefCell<Option<i32>>>,
    redraw: UseForceUpdateHandle,
) -> Html {
    let pointer_down = {
        let item = item.clone();
        let controller = controller.clone();
        let active_pointer = active_pointer.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            event.prevent_default();
            if active_pointer.borrow().is_some() {
                return;
            }
            let origin = Point::new(event.client_x() as f64, event.client_y() as f64);
            if !controller.borrow_mut().start_drag(&item, origin) {
                return;
            }
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.set_pointer_capture(event.pointer_id());
            }
            *active_pointer.borrow_mut() = Some(event.pointer_id());
            redraw.force_update();
        })
    };

    let pointer_move = {
        let controller = controller.clone();
        let active_pointer = active_pointer.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if *active_pointer.borrow() != Some(event.pointer_id()) {
                return;
            }
            event.prevent_default();
            let point = Point::new(event.client_x() as f64, event.client_y() as f64);
            if controller.borrow_mut().drag_to(point).is_some() {
                redraw.force_update();
            }
        })
    };

    let pointer_end = {
        let controller = controller.clone();
        let active_pointer = active_pointer.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if !take_pointer(&active_pointer, &event) {
                return;
            }
            let ticket = controller.borrow_mut().release(viewport_width());
            if let Some(ticket) = ticket {
                schedule_settle(controller.clone(), redraw.clone(), ticket);
            }
            redraw.force_update();
        })
    };

    let pointer_cancel = Callback::from(move |event: web_sys::PointerEvent| {
        if !take_pointer(&active_pointer, &event) {
            return;
        }
        controller.borrow_mut().cancel_drag();
        redraw.force_update();
    });

    render_card(
        stage,
        0,
        &item,
        Callbacks {
            down: Some(pointer_down),
            moved: Some(pointer_move),
            up: Some(pointer_end),
            cancel: Some(pointer_cancel),
        },
    )
}

/// Clears the active pointer if `event` belongs to it and releases capture.
fn take_pointer(active_pointer: &RefCell<Option<i32>>, event: &web_sys::PointerEvent) -> bool {
    if *active_pointer.borrow() != Some(event.pointer_id()) {
        return false;
    }
    if let Some(target) = event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
    {
        let _ = target.release_pointer_capture(event.pointer_id());
    }
    *active_pointer.borrow_mut() = None;
    true
}

fn schedule_settle(controller: SharedController, redraw: UseForceUpdateHandle, ticket: SettleTicket) {
    let delay = controller.borrow().config().settle_duration_ms;
    Timeout::new(delay, move || {
        if controller.borrow_mut().complete_settle(ticket) {
            redraw.force_update();
        }
    })
    .forget();
}

fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_WIDTH)
}

fn load_config() -> SwipeConfig {
    let text = window()
        .and_then(|w| w.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());

    match text {
        Some(text) => SwipeConfig::from_json(&text).unwrap_or_else(|err| {
            warn!("Falling back to default swipe config: {}", err);
            SwipeConfig::default()
        }),
        None => SwipeConfig::default(),
    }
}

fn apply_theme(dark: bool) {
    if let Some(window) = window() {
        if let Some(document) = window.document() {
            if let Some(body) = document.body() {
                let _ = body.class_list().toggle_with_force("dark", dark);
            }
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
