#[cfg(target_arch = "wasm32")]
mod confetti;
#[cfg(target_arch = "wasm32")]
mod puzzle_image;
#[cfg(target_arch = "wasm32")]
mod yew_app;

#[cfg(target_arch = "wasm32")]
fn main() {
    yew::Renderer::<yew_app::App>::new().render();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("irekae runs in the browser; build with trunk for wasm32-unknown-unknown");
}
