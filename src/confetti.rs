use gloo::timers::callback::Timeout;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub(crate) const CONFETTI_COUNT: usize = 50;
pub(crate) const CONFETTI_TTL_MS: u32 = 5_000;

/// Scatter short-lived confetti elements over the page. Each element falls
/// for a randomized 2-5s and removes itself after the animation is done.
pub(crate) fn burst() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let mut rng = SmallRng::from_os_rng();
    for _ in 0..CONFETTI_COUNT {
        let Ok(node) = document.create_element("div") else {
            continue;
        };
        let Ok(element) = node.dyn_into::<HtmlElement>() else {
            continue;
        };
        element.set_class_name("confetti");
        let left: f32 = rng.random_range(0.0..100.0);
        let duration: f32 = rng.random_range(2.0..5.0);
        let hue: f32 = rng.random_range(0.0..360.0);
        let style = element.style();
        let _ = style.set_property("left", &format!("{left:.1}vw"));
        let _ = style.set_property("animation-duration", &format!("{duration:.2}s"));
        let _ = style.set_property("background-color", &format!("hsl({hue:.0}, 100%, 50%)"));
        let _ = body.append_child(&element);
        Timeout::new(CONFETTI_TTL_MS, move || element.remove()).forget();
    }
}
