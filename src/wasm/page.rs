use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions};

use super::dom::{self, Listener};
use crate::config::ScrollConfig;
use crate::content;
use crate::error::Result;
use crate::scroll::{SectionBounds, SectionTracker, Viewport};

struct PageState {
    tracker: SectionTracker,
    main: HtmlElement,
    sections: Vec<HtmlElement>,
    dots: Vec<Element>,
    hint: Option<Element>,
}

impl PageState {
    fn bounds(&self) -> Vec<SectionBounds> {
        self.sections
            .iter()
            .map(|s| SectionBounds {
                top: s.offset_top() as f64,
                height: s.offset_height() as f64,
            })
            .collect()
    }

    fn on_scroll(&mut self) {
        let viewport = Viewport {
            scroll_top: self.main.scroll_top() as f64,
            height: self.main.client_height() as f64,
        };
        let bounds = self.bounds();
        let change = self.tracker.update(&bounds, viewport);
        if change.section {
            self.render_dots();
        }
        if change.hint {
            self.render_hint();
        }
    }

    fn render_dots(&self) {
        for (i, dot) in self.dots.iter().enumerate() {
            let _ = dot
                .class_list()
                .toggle_with_force("active", i == self.tracker.current());
        }
    }

    fn render_hint(&self) {
        if let Some(hint) = &self.hint {
            let _ = hint
                .class_list()
                .toggle_with_force("hidden", self.tracker.has_scrolled());
        }
    }
}

fn scroll_to(section: &HtmlElement) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    section.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Section tracking, the dot indicator and the scroll hint.
pub struct Page {
    state: Rc<RefCell<PageState>>,
    _listeners: Vec<Listener>,
}

impl Page {
    /// Attaches to `main#main`, `#nav` and (optionally) `#scroll-hint`.
    pub fn mount() -> Result<Self> {
        let document = dom::document()?;
        let main: HtmlElement = dom::by_id(&document, "main")?;
        let nav: Element = dom::by_id(&document, "nav")?;
        let hint = document.get_element_by_id("scroll-hint");
        Self::attach(&document, main, &nav, hint, &ScrollConfig::default())
    }

    pub fn attach(
        document: &Document,
        main: HtmlElement,
        nav: &Element,
        hint: Option<Element>,
        config: &ScrollConfig,
    ) -> Result<Self> {
        let found = main.query_selector_all(":scope > section")?;
        let sections: Vec<HtmlElement> = (0..found.length())
            .filter_map(|i| found.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect();

        let tracker = SectionTracker::new(config);
        let mut listeners = Vec::new();
        let mut dots = Vec::with_capacity(tracker.total());
        for i in 0..tracker.total() {
            let dot = dom::create(document, "button", "nav-dot")?;
            dot.set_attribute("aria-label", &content::nav_label(i))?;
            nav.append_child(&dot)?;
            if let Some(section) = sections.get(i).cloned() {
                listeners.push(Listener::new(&dot, "click", move |_| scroll_to(&section))?);
            }
            dots.push(dot);
        }

        if let (Some(hint), Some(next)) = (&hint, sections.get(1).cloned()) {
            listeners.push(Listener::new(hint, "click", move |_| scroll_to(&next))?);
        }

        let state = Rc::new(RefCell::new(PageState {
            tracker,
            main: main.clone(),
            sections,
            dots,
            hint,
        }));
        {
            let mut s = state.borrow_mut();
            s.on_scroll();
            s.render_dots();
            s.render_hint();
        }

        let on_scroll = {
            let state = state.clone();
            move |_: web_sys::Event| {
                if let Ok(mut s) = state.try_borrow_mut() {
                    s.on_scroll();
                }
            }
        };
        listeners.push(Listener::new(&main, "scroll", on_scroll)?);
        log::debug!("page tracking {} sections", state.borrow().sections.len());

        Ok(Self {
            state,
            _listeners: listeners,
        })
    }

    pub fn current(&self) -> usize {
        self.state.borrow().tracker.current()
    }

    pub fn has_scrolled(&self) -> bool {
        self.state.borrow().tracker.has_scrolled()
    }

    /// Re-reads the scroll position, as a scroll event would.
    pub fn refresh(&self) {
        self.state.borrow_mut().on_scroll();
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        for dot in &self.state.borrow().dots {
            dot.remove();
        }
    }
}
