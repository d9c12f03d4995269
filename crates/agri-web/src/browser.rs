//! Browser APIs as futures

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::{Function, Promise};
use web_sys::{File, FileReader, GeolocationPosition, GeolocationPositionError};

/// Geolocation failure, as reported by the browser
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationError {
    Unsupported,
    /// `GeolocationPositionError.code`
    Code(u16),
}

/// Ask the browser for the current position (`latitude`, `longitude`)
pub async fn current_position() -> Result<(f64, f64), LocationError> {
    let geolocation = web_sys::window()
        .and_then(|w| w.navigator().geolocation().ok())
        .ok_or(LocationError::Unsupported)?;

    let mut request_failed = false;
    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        request_failed = geolocation
            .get_current_position_with_error_callback(&resolve, Some(&reject))
            .is_err();
    });
    if request_failed {
        return Err(LocationError::Unsupported);
    }

    match JsFuture::from(promise).await {
        Ok(value) => {
            let coords = value.unchecked_into::<GeolocationPosition>().coords();
            Ok((coords.latitude(), coords.longitude()))
        }
        Err(err) => Err(LocationError::Code(
            err.dyn_into::<GeolocationPositionError>().map_or(0, |e| e.code()),
        )),
    }
}

/// Read a picked file as a `data:` URL
pub async fn read_as_data_url(file: &File) -> Result<String, String> {
    let failed = |_: JsValue| "Could not read the image file.".to_string();
    let reader = FileReader::new().map_err(failed)?;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });
    reader.read_as_data_url(file).map_err(failed)?;
    JsFuture::from(promise).await.map_err(failed)?;

    reader
        .result()
        .map_err(failed)?
        .as_string()
        .ok_or_else(|| "Could not read the image file.".to_string())
}

/// Flip the `dark` class on `<html>`
pub fn set_dark_mode(enabled: bool) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.class_list().toggle_with_force("dark", enabled);
    }
}
