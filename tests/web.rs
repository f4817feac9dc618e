#![cfg(target_arch = "wasm32")]

use folio_wasm::config::{GlassConfig, LiquidConfig, ScrollConfig};
use folio_wasm::{GlassWindow, LiquidCanvas, Page};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn fixture(html: &str) -> web_sys::Element {
    let doc = document();
    let host = doc.create_element("div").unwrap();
    host.set_inner_html(html);
    doc.body().unwrap().append_child(&host).unwrap();
    host
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn small_glass() -> GlassConfig {
    GlassConfig {
        width: 90,
        height: 70,
        ..GlassConfig::default()
    }
}

#[wasm_bindgen_test]
fn glass_window_wires_the_filter() {
    let host = fixture("");
    let window = GlassWindow::mount(&document(), &host, small_glass()).unwrap();

    let filter_id = window.filter_id();
    let filter = host.query_selector(&format!("#{filter_id}")).unwrap().unwrap();
    let map = filter.query_selector("feImage").unwrap().unwrap();
    let displacement = filter.query_selector("feDisplacementMap").unwrap().unwrap();

    let href = map.get_attribute("href").unwrap();
    assert!(href.starts_with("data:image/png"));
    let scale: f64 = displacement.get_attribute("scale").unwrap().parse().unwrap();
    assert!(scale > 0.0);
    assert_eq!(displacement.get_attribute("xChannelSelector").as_deref(), Some("R"));
    assert_eq!(displacement.get_attribute("yChannelSelector").as_deref(), Some("G"));

    // mount renders once at t=0 and defers the loop
    assert_eq!(window.time(), 0.0);
    assert!(!window.is_animating());

    let tiles = host.query_selector_all(".tech-icon").unwrap().length();
    assert_eq!(tiles, 30 + 6);

    drop(window);
    assert!(host.query_selector(&format!("#{filter_id}")).unwrap().is_none());
}

#[wasm_bindgen_test]
fn glass_window_builds_detached() {
    let host = fixture("");
    let window = GlassWindow::build(&document(), small_glass()).unwrap();
    assert!(!window.root().is_connected());
    assert!(document().get_element_by_id(&window.filter_id()).is_none());
    assert_eq!(host.child_element_count(), 0);

    drop(window);
    assert_eq!(host.child_element_count(), 0);
    host.remove();
}

#[wasm_bindgen_test]
async fn glass_loop_starts_after_delay() {
    let host = fixture("");
    let window = GlassWindow::mount(&document(), &host, small_glass()).unwrap();
    assert!(!window.is_animating());

    sleep(300).await;
    assert!(window.is_animating());
    let t = window.time();
    assert!(t > 0.0);
    let steps = (t / 0.1).round();
    assert!((t - steps * 0.1).abs() < 1e-9, "time {t} is not a whole number of steps");

    drop(window);
    host.remove();
}

#[wasm_bindgen_test]
async fn glass_frames_stop_on_drop() {
    let host = fixture("");
    let window = GlassWindow::mount(&document(), &host, small_glass()).unwrap();
    let filter_id = window.filter_id();
    let filter = host.query_selector(&format!("#{filter_id}")).unwrap().unwrap();
    let map = filter.query_selector("feImage").unwrap().unwrap();
    let displacement = filter.query_selector("feDisplacementMap").unwrap().unwrap();
    let snapshot = || (map.get_attribute("href"), displacement.get_attribute("scale"));

    sleep(250).await;
    let running = snapshot();
    sleep(100).await;
    assert_ne!(snapshot(), running);

    drop(window);
    assert!(document().get_element_by_id(&filter_id).is_none());
    let frozen = snapshot();
    sleep(200).await;
    assert_eq!(snapshot(), frozen);
    host.remove();
}

#[wasm_bindgen_test]
fn page_tracks_sections_and_builds_dots() {
    let host = fixture(
        r#"<main id="t-main" style="position: relative; height: 200px; overflow-y: auto;">
             <section style="height: 200px"></section>
             <section style="height: 200px"></section>
             <section style="height: 200px"></section>
             <section style="height: 200px"></section>
           </main>
           <nav id="t-nav"></nav>
           <div id="t-hint"></div>"#,
    );
    let doc = document();
    let main: web_sys::HtmlElement = doc.get_element_by_id("t-main").unwrap().dyn_into().unwrap();
    let nav = doc.get_element_by_id("t-nav").unwrap();
    let hint = doc.get_element_by_id("t-hint");

    let page = Page::attach(&doc, main.clone(), &nav, hint.clone(), &ScrollConfig::default()).unwrap();
    assert_eq!(page.current(), 0);
    assert!(!page.has_scrolled());

    let dots = nav.query_selector_all(".nav-dot").unwrap();
    assert_eq!(dots.length(), 4);
    let first: web_sys::Element = dots.get(0).unwrap().dyn_into().unwrap();
    assert_eq!(first.get_attribute("aria-label").as_deref(), Some("Go to section 1"));
    assert!(first.class_list().contains("active"));

    main.set_scroll_top(400);
    page.refresh();
    assert_eq!(page.current(), 2);
    assert!(page.has_scrolled());
    assert!(hint.unwrap().class_list().contains("hidden"));

    drop(page);
    assert_eq!(nav.query_selector_all(".nav-dot").unwrap().length(), 0);
    host.remove();
}

#[wasm_bindgen_test]
async fn liquid_canvas_starts_and_stops() {
    let host = fixture(r#"<div style="width: 120px; height: 80px"><canvas></canvas></div>"#);
    let canvas: web_sys::HtmlCanvasElement = host.query_selector("canvas").unwrap().unwrap().dyn_into().unwrap();
    let liquid = LiquidCanvas::attach(canvas.clone(), LiquidConfig::default()).unwrap();
    assert!(liquid.is_animating());
    assert_eq!((canvas.width(), canvas.height()), (120, 80));

    sleep(100).await;
    drop(liquid);
    let frozen = canvas.to_data_url().unwrap();
    sleep(150).await;
    assert_eq!(canvas.to_data_url().unwrap(), frozen);
    host.remove();
}

#[wasm_bindgen_test]
fn unmount_without_page_is_harmless() {
    folio_wasm::unmount();
    folio_wasm::unmount();
}
