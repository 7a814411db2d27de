use std::rc::Rc;

use gloo::console::log;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, Element, Event, HtmlElement, HtmlInputElement, MouseEvent, TouchEvent};
use yew::prelude::*;

use crate::confetti;
use crate::puzzle_image;
use irekae_core::{
    fit_board, grid_choice_label, tile_crop, GridChoice, ImageInfo, Session,
    BOARD_MAX_VIEWPORT_FRAC, GRID_CHOICES,
};

/// Delay between the winning swap and the success overlay, so the final
/// render settles first.
const WIN_NOTIFY_DELAY_MS: u32 = 200;
const GRID_CHOICE_KEY: &str = "irekae.grid.v1";
const SLOT_ATTR: &str = "data-slot";
const BOARD_FALLBACK_WIDTH: f32 = 480.0;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok()).flatten()
}

fn load_grid_choice() -> Option<GridChoice> {
    let storage = local_storage()?;
    let raw = storage.get_item(GRID_CHOICE_KEY).ok()??;
    let (cols, rows) = raw.split_once('x')?;
    let cols: u32 = cols.parse().ok()?;
    let rows: u32 = rows.parse().ok()?;
    GRID_CHOICES
        .iter()
        .copied()
        .find(|choice| choice.cols == cols && choice.rows == rows)
}

fn save_grid_choice(choice: GridChoice) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(GRID_CHOICE_KEY, &format!("{}x{}", choice.cols, choice.rows));
    }
}

fn window_inner_height() -> f32 {
    web_sys::window()
        .and_then(|window| window.inner_height().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(600.0) as f32
}

fn target_element(event: &Event) -> Option<Element> {
    event.target().and_then(|target| target.dyn_into::<Element>().ok())
}

fn add_target_class(event: &Event, class: &str) {
    if let Some(element) = target_element(event) {
        let _ = element.class_list().add_1(class);
    }
}

fn remove_target_class(event: &Event, class: &str) {
    if let Some(element) = target_element(event) {
        let _ = element.class_list().remove_1(class);
    }
}

fn clear_piece_class(class: &str) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Ok(list) = document.query_selector_all(&format!(".puzzle-piece.{class}")) else {
        return;
    };
    for index in 0..list.length() {
        if let Some(node) = list.item(index) {
            if let Ok(element) = node.dyn_into::<Element>() {
                let _ = element.class_list().remove_1(class);
            }
        }
    }
}

/// Resolve the board slot under a viewport point, walking up from the
/// hit-tested element to the tile carrying the slot attribute.
fn slot_under_point(x: f32, y: f32) -> Option<usize> {
    let document = web_sys::window()?.document()?;
    let mut current = document.element_from_point(x, y);
    while let Some(element) = current {
        if let Some(value) = element.get_attribute(SLOT_ATTR) {
            return value.parse().ok();
        }
        current = element.parent_element();
    }
    None
}

#[function_component(App)]
pub(crate) fn app() -> Html {
    let session = use_mut_ref(|| {
        let mut session = Session::new();
        if let Some(choice) = load_grid_choice() {
            session.set_grid(choice);
        }
        session
    });
    let redraw = use_force_update();
    let status_note = use_state(|| None::<String>);
    let show_success = use_state(|| false);
    let drag_source = use_mut_ref(|| None::<usize>);
    let touch_source = use_mut_ref(|| None::<usize>);
    let game_area_ref = use_node_ref();

    {
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            // Re-render once mounted so the board picks up the measured
            // game-area width, and again whenever the window resizes.
            redraw.force_update();
            let window = web_sys::window();
            let resize = window.as_ref().map(|window| {
                let redraw = redraw.clone();
                EventListener::new(window, "resize", move |_| redraw.force_update())
            });
            let contextmenu = window.and_then(|window| window.document()).map(|document| {
                EventListener::new_with_options(
                    &document,
                    "contextmenu",
                    EventListenerOptions::enable_prevent_default(),
                    |event| event.prevent_default(),
                )
            });
            move || {
                drop(resize);
                drop(contextmenu);
            }
        });
    }

    let (phase, image, grid, slots) = {
        let session = session.borrow();
        (
            session.phase(),
            session.image().cloned(),
            session.grid(),
            session.board().slots().to_vec(),
        )
    };

    let apply_swap: Rc<dyn Fn(usize, usize)> = {
        let session = session.clone();
        let redraw = redraw.clone();
        let show_success = show_success.clone();
        Rc::new(move |source: usize, target: usize| {
            let outcome = session.borrow_mut().swap_tiles(source, target);
            if outcome.swapped {
                redraw.force_update();
            }
            if outcome.solved {
                let show_success = show_success.clone();
                Timeout::new(WIN_NOTIFY_DELAY_MS, move || {
                    log!("puzzle solved");
                    show_success.set(true);
                    confetti::burst();
                })
                .forget();
            }
        })
    };

    let on_upload = {
        let session = session.clone();
        let redraw = redraw.clone();
        let status_note = status_note.clone();
        let show_success = show_success.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let Some(files) = input.files() else {
                return;
            };
            let Some(file) = files.get(0) else {
                return;
            };
            input.set_value("");
            let session = session.clone();
            let redraw = redraw.clone();
            let status_note = status_note.clone();
            let show_success = show_success.clone();
            spawn_local(async move {
                let url = match puzzle_image::create_object_url(&file) {
                    Ok(url) => url,
                    Err(message) => {
                        status_note.set(Some(message));
                        return;
                    }
                };
                let (width, height) = match puzzle_image::probe_image(&url).await {
                    Ok(dimensions) => dimensions,
                    Err(message) => {
                        puzzle_image::revoke_object_url(&url);
                        status_note.set(Some(message));
                        return;
                    }
                };
                let previous = session.borrow().image().map(|image| image.src.clone());
                session.borrow_mut().set_image(ImageInfo { src: url, width, height });
                if let Some(previous) = previous {
                    puzzle_image::revoke_object_url(&previous);
                }
                log!("image loaded", width, height);
                status_note.set(None);
                show_success.set(false);
                redraw.force_update();
            });
        })
    };

    let on_shuffle = {
        let session = session.clone();
        let redraw = redraw.clone();
        let status_note = status_note.clone();
        let show_success = show_success.clone();
        Callback::from(move |_: MouseEvent| {
            let mut rng = SmallRng::from_os_rng();
            let result = session.borrow_mut().shuffle(&mut rng);
            match result {
                Ok(()) => {
                    status_note.set(None);
                    show_success.set(false);
                    redraw.force_update();
                }
                Err(error) => status_note.set(Some(error.to_string())),
            }
        })
    };

    let on_rotate = {
        let session = session.clone();
        let redraw = redraw.clone();
        let status_note = status_note.clone();
        let show_success = show_success.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(image) = session.borrow().image().cloned() else {
                status_note.set(Some(irekae_core::SessionError::NoImage.to_string()));
                return;
            };
            let session = session.clone();
            let redraw = redraw.clone();
            let status_note = status_note.clone();
            let show_success = show_success.clone();
            spawn_local(async move {
                match puzzle_image::rotate_image_90(&image.src).await {
                    Ok(src) => {
                        session.borrow_mut().rotate_image(ImageInfo {
                            src,
                            width: image.height,
                            height: image.width,
                        });
                        puzzle_image::revoke_object_url(&image.src);
                        status_note.set(None);
                        show_success.set(false);
                        redraw.force_update();
                    }
                    Err(message) => status_note.set(Some(message)),
                }
            });
        })
    };

    let difficulty_buttons = GRID_CHOICES
        .iter()
        .map(|&choice| {
            let selected = choice == grid;
            let onclick = {
                let session = session.clone();
                let redraw = redraw.clone();
                let status_note = status_note.clone();
                let show_success = show_success.clone();
                Callback::from(move |_: MouseEvent| {
                    session.borrow_mut().set_grid(choice);
                    save_grid_choice(choice);
                    status_note.set(None);
                    show_success.set(false);
                    redraw.force_update();
                })
            };
            html! {
                <button
                    key={grid_choice_label(&choice)}
                    class={classes!("difficulty-btn", selected.then_some("active"))}
                    {onclick}
                >
                    { grid_choice_label(&choice) }
                </button>
            }
        })
        .collect::<Html>();

    let board_view = match image.as_ref() {
        Some(image) => {
            let area_width = game_area_ref
                .cast::<HtmlElement>()
                .map(|element| element.client_width() as f32)
                .filter(|width| *width > 0.0)
                .unwrap_or(BOARD_FALLBACK_WIDTH);
            let max_height = window_inner_height() * BOARD_MAX_VIEWPORT_FRAC;
            let fit = fit_board(image.ratio(), area_width, max_height);
            let board_style = format!(
                "width:{:.0}px;height:{:.0}px;grid-template-columns:repeat({},1fr);grid-template-rows:repeat({},1fr);",
                fit.width, fit.height, grid.cols, grid.rows
            );
            let tiles = slots
                .iter()
                .enumerate()
                .map(|(slot, &index)| {
                    let crop = tile_crop(index, grid.cols, grid.rows);
                    let style = format!(
                        "background-image:url({});background-position:{};background-size:{};",
                        image.src,
                        crop.background_position(),
                        crop.background_size()
                    );
                    let ondragstart = {
                        let session = session.clone();
                        let drag_source = drag_source.clone();
                        Callback::from(move |event: DragEvent| {
                            if !session.borrow().phase().is_active() {
                                return;
                            }
                            *drag_source.borrow_mut() = Some(slot);
                            add_target_class(&event, "dragging");
                            if let Some(transfer) = event.data_transfer() {
                                transfer.set_effect_allowed("move");
                            }
                        })
                    };
                    let ondragover = {
                        let session = session.clone();
                        Callback::from(move |event: DragEvent| {
                            if !session.borrow().phase().is_active() {
                                return;
                            }
                            event.prevent_default();
                            if let Some(transfer) = event.data_transfer() {
                                transfer.set_drop_effect("move");
                            }
                            add_target_class(&event, "drag-over");
                        })
                    };
                    let ondragleave = Callback::from(move |event: DragEvent| {
                        remove_target_class(&event, "drag-over");
                    });
                    let ondrop = {
                        let session = session.clone();
                        let drag_source = drag_source.clone();
                        let apply_swap = apply_swap.clone();
                        Callback::from(move |event: DragEvent| {
                            if !session.borrow().phase().is_active() {
                                return;
                            }
                            event.prevent_default();
                            remove_target_class(&event, "drag-over");
                            let source = drag_source.borrow_mut().take();
                            let Some(source) = source else {
                                return;
                            };
                            if source != slot {
                                apply_swap(source, slot);
                            }
                        })
                    };
                    let ondragend = {
                        let drag_source = drag_source.clone();
                        Callback::from(move |event: DragEvent| {
                            // Cleanup must run on every exit path, aborted
                            // drags included.
                            remove_target_class(&event, "dragging");
                            clear_piece_class("drag-over");
                            *drag_source.borrow_mut() = None;
                        })
                    };
                    let ontouchstart = {
                        let session = session.clone();
                        let touch_source = touch_source.clone();
                        Callback::from(move |event: TouchEvent| {
                            if !session.borrow().phase().is_active() {
                                return;
                            }
                            *touch_source.borrow_mut() = Some(slot);
                            add_target_class(&event, "dragging");
                        })
                    };
                    let ontouchend = {
                        let session = session.clone();
                        let touch_source = touch_source.clone();
                        let apply_swap = apply_swap.clone();
                        Callback::from(move |event: TouchEvent| {
                            remove_target_class(&event, "dragging");
                            let source = touch_source.borrow_mut().take();
                            let Some(source) = source else {
                                return;
                            };
                            if !session.borrow().phase().is_active() {
                                return;
                            }
                            let Some(touch) = event.changed_touches().get(0) else {
                                return;
                            };
                            let Some(target) =
                                slot_under_point(touch.client_x() as f32, touch.client_y() as f32)
                            else {
                                return;
                            };
                            if target != source {
                                apply_swap(source, target);
                            }
                        })
                    };
                    html! {
                        <div
                            key={slot.to_string()}
                            class="puzzle-piece"
                            draggable="true"
                            data-slot={slot.to_string()}
                            {style}
                            {ondragstart}
                            {ondragover}
                            {ondragleave}
                            {ondrop}
                            {ondragend}
                            {ontouchstart}
                            {ontouchend}
                        />
                    }
                })
                .collect::<Html>();
            let board_class = classes!(
                "puzzle-board",
                (!phase.is_active()).then_some("board-idle")
            );
            html! {
                <div class={board_class} style={board_style}>{ tiles }</div>
            }
        }
        None => html! {
            <p class="placeholder">{ "Upload an image to build a puzzle." }</p>
        },
    };

    let status = (*status_note)
        .as_ref()
        .map(|note| html! { <p class="status-note">{ note.clone() }</p> });

    let success_modal = (*show_success).then(|| {
        let onclick = {
            let show_success = show_success.clone();
            Callback::from(move |_: MouseEvent| show_success.set(false))
        };
        html! {
            <div class="success-modal">
                <div class="success-card">
                    <h2>{ "Puzzle solved!" }</h2>
                    <p>{ "Nice work. Shuffle again or try a harder grid." }</p>
                    <button class="close-modal-btn" {onclick}>{ "Close" }</button>
                </div>
            </div>
        }
    });

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{ "irekae" }</h1>
                <p class="tagline">{ "Swap the tiles back into place" }</p>
            </header>
            <div class="controls">
                <label class="upload-btn">
                    { "Upload image" }
                    <input type="file" accept="image/*" onchange={on_upload} />
                </label>
                <div class="difficulty-group">{ difficulty_buttons }</div>
                <button class="shuffle-btn" onclick={on_shuffle}>{ "Shuffle" }</button>
                <button class="rotate-btn" onclick={on_rotate}>{ "Rotate" }</button>
            </div>
            { status }
            <div class="game-area" ref={game_area_ref.clone()}>
                { board_view }
            </div>
            { success_modal }
        </div>
    }
}
