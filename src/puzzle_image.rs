use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, File, HtmlCanvasElement, HtmlImageElement};

pub(crate) fn create_object_url(file: &File) -> Result<String, String> {
    web_sys::Url::create_object_url_with_blob(file).map_err(|_| "failed to read file".to_string())
}

pub(crate) fn revoke_object_url(url: &str) {
    if url.starts_with("blob:") {
        let _ = web_sys::Url::revoke_object_url(url);
    }
}

/// Load `src` into a detached `<img>` and resolve once decoded.
async fn load_image_element(src: &str) -> Result<HtmlImageElement, String> {
    let img = HtmlImageElement::new().map_err(|_| "failed to read image".to_string())?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::once(move || {
            let _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
        });
        let onerror = Closure::once(move || {
            let _ = reject.call1(
                &wasm_bindgen::JsValue::NULL,
                &wasm_bindgen::JsValue::from_str("image_load_failed"),
            );
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        img.set_src(src);
        onload.forget();
        onerror.forget();
    });
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|_| "failed to read image".to_string())?;
    Ok(img)
}

/// Natural pixel dimensions of the image at `src`.
pub(crate) async fn probe_image(src: &str) -> Result<(u32, u32), String> {
    let img = load_image_element(src).await?;
    let width = img.natural_width();
    let height = img.natural_height();
    if width == 0 || height == 0 {
        return Err("invalid image dimensions".to_string());
    }
    Ok((width, height))
}

/// Redraw the image at `src` rotated 90 degrees clockwise and re-encode it
/// as a data URL.
pub(crate) async fn rotate_image_90(src: &str) -> Result<String, String> {
    let img = load_image_element(src).await?;
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "no document".to_string())?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "failed to create canvas".to_string())?
        .dyn_into()
        .map_err(|_| "failed to create canvas".to_string())?;
    canvas.set_width(img.natural_height());
    canvas.set_height(img.natural_width());
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .ok_or_else(|| "no 2d context".to_string())?
        .dyn_into()
        .map_err(|_| "no 2d context".to_string())?;
    context
        .translate(canvas.width() as f64, 0.0)
        .map_err(|_| "failed to rotate image".to_string())?;
    context
        .rotate(std::f64::consts::FRAC_PI_2)
        .map_err(|_| "failed to rotate image".to_string())?;
    context
        .draw_image_with_html_image_element(&img, 0.0, 0.0)
        .map_err(|_| "failed to rotate image".to_string())?;
    canvas
        .to_data_url()
        .map_err(|_| "failed to encode rotated image".to_string())
}
