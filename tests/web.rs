//! Browser-only checks; run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use webfm::{FmFile, FmFolder, NativeFile};

wasm_bindgen_test_configure!(run_in_browser);

fn web_file(name: &str, content: &str, mime: &str) -> web_sys::File {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = web_sys::FilePropertyBag::new();
    options.set_type(mime);
    web_sys::File::new_with_str_sequence_and_options(&parts, name, &options)
        .expect("File constructor")
}

#[wasm_bindgen_test]
async fn test_read_web_file() {
    let native = NativeFile::from_web_file(web_file("a.txt", "hello", "text/plain"));
    assert_eq!(native.size(), 5);

    let file = FmFile::from_native(&FmFolder::at_root(["home"]), native);
    assert!(file.is_valid());
    assert_eq!(file.read_text().await.unwrap(), "hello");
    assert_eq!(
        file.read_data_url().await.unwrap(),
        "data:text/plain;base64,aGVsbG8="
    );
}
