//! Glass window over the skills grid, refracted by a live displacement map.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, ImageData};

use super::dom::{self, Listener, Timeout};
use super::render::{Animate, RenderLoop};
use crate::config::GlassConfig;
use crate::content::{self, SkillGroup};
use crate::error::{Result, SurfaceError};
use crate::field::{FieldGenerator, FieldParams, FrameInput, Pointer};

struct GlassEffect {
    generator: FieldGenerator,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    map: Element,
    displacement: Element,
    pointer: Rc<Cell<Pointer>>,
    time: f64,
    time_step: f64,
}

impl GlassEffect {
    fn paint(&mut self) -> Result<()> {
        let input = FrameInput {
            time: self.time,
            pointer: self.pointer.get(),
        };
        let dpi = self.generator.params().dpi;
        let map = self.generator.render(&input);
        let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(map.rgba.as_slice()), map.width, map.height)?;
        self.ctx.put_image_data(&image, 0.0, 0.0)?;
        self.map.set_attribute("href", &self.canvas.to_data_url()?)?;
        self.displacement
            .set_attribute("scale", &map.filter_scale(dpi).to_string())?;
        Ok(())
    }
}

impl Animate for GlassEffect {
    fn frame(&mut self, _frame: u64) {
        self.time += self.time_step;
        if let Err(err) = self.paint() {
            log::debug!("glass frame skipped: {err}");
        }
    }
}

/// Mounted glass window. Dropping it removes the effect's listeners and
/// stops its animation.
pub struct GlassWindow {
    id: String,
    root: Element,
    anim: RenderLoop<GlassEffect>,
    _pointer: Listener,
    _start: Timeout,
}

impl GlassWindow {
    /// Builds the window inside `#host_id` with the default configuration.
    pub fn mount_into(host_id: &str) -> Result<Self> {
        let document = dom::document()?;
        let host: Element = dom::by_id(&document, host_id)?;
        Self::mount(&document, &host, GlassConfig::default())
    }

    pub fn mount(document: &Document, host: &Element, config: GlassConfig) -> Result<Self> {
        let window = Self::build(document, config)?;
        host.append_child(&window.root)?;
        Ok(window)
    }

    /// Builds the window detached from the document. Nothing reaches the
    /// page until every fallible step has succeeded; a failed `build` leaves
    /// no trace.
    pub fn build(document: &Document, config: GlassConfig) -> Result<Self> {
        let id = format!("liquid-glass-{}", dom::random_suffix());
        let (width, height) = config.pixel_size();

        let (svg, map, displacement) = build_filter(document, &id, &config)?;
        let (root, container, content) = build_window(document, &id)?;

        let canvas: HtmlCanvasElement = dom::create(document, "canvas", "")?
            .dyn_into()
            .map_err(|_| SurfaceError::WrongElement("canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);
        canvas.style().set_property("display", "none")?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(SurfaceError::NoContext("2d"))?
            .dyn_into()
            .map_err(|_| SurfaceError::NoContext("2d"))?;

        content.append_child(&skills_grid(document)?)?;
        root.append_child(&svg)?;
        root.append_child(&container)?;
        root.append_child(&canvas)?;

        let pointer = Rc::new(Cell::new(Pointer::default()));
        let pointer_listener = {
            let pointer = pointer.clone();
            let bounds = container.clone();
            Listener::new(&container, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::MouseEvent>() else {
                    return;
                };
                let rect = bounds.get_bounding_client_rect();
                pointer.set(Pointer::from_client(
                    (event.client_x() as f64, event.client_y() as f64),
                    (rect.left(), rect.top()),
                    (rect.width(), rect.height()),
                ));
            })?
        };

        let mut effect = GlassEffect {
            generator: FieldGenerator::new(FieldParams::from(&config)),
            canvas,
            ctx,
            map,
            displacement,
            pointer,
            time: 0.0,
            time_step: config.time_step,
        };
        // Establish the filter before the loop starts.
        effect.paint()?;

        let anim = RenderLoop::new(effect)?;
        let start = Timeout::new(config.start_delay_ms, anim.starter())?;
        log::debug!("glass window {id} built at {width}x{height}");

        Ok(Self {
            id,
            root,
            anim,
            _pointer: pointer_listener,
            _start: start,
        })
    }

    /// Outermost element; attached to the host by [`mount`](Self::mount).
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn filter_id(&self) -> String {
        format!("{}_filter", self.id)
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_running()
    }

    /// Current animation time.
    pub fn time(&self) -> f64 {
        self.anim.with(|effect| effect.time)
    }
}

impl Drop for GlassWindow {
    fn drop(&mut self) {
        self.anim.stop();
        self.root.remove();
    }
}

fn build_filter(document: &Document, id: &str, config: &GlassConfig) -> Result<(Element, Element, Element)> {
    let width = config.width.to_string();
    let height = config.height.to_string();
    let filter_id = format!("{id}_filter");
    let map_id = format!("{id}_map");
    let displacement_id = format!("{id}_displacement");
    let (width, height) = (width.as_str(), height.as_str());

    let svg = dom::create_svg(
        document,
        "svg",
        &[
            ("width", "0"),
            ("height", "0"),
            ("style", "position: fixed; top: 0; left: 0; pointer-events: none; z-index: 9999;"),
        ],
    )?;
    let defs = dom::create_svg(document, "defs", &[])?;
    let filter = dom::create_svg(
        document,
        "filter",
        &[
            ("id", filter_id.as_str()),
            ("filterUnits", "userSpaceOnUse"),
            ("color-interpolation-filters", "sRGB"),
            ("x", "0"),
            ("y", "0"),
            ("width", width),
            ("height", height),
        ],
    )?;
    let map = dom::create_svg(
        document,
        "feImage",
        &[("id", map_id.as_str()), ("width", width), ("height", height)],
    )?;
    let displacement = dom::create_svg(
        document,
        "feDisplacementMap",
        &[
            ("id", displacement_id.as_str()),
            ("in", "SourceGraphic"),
            ("in2", map_id.as_str()),
            ("xChannelSelector", "R"),
            ("yChannelSelector", "G"),
        ],
    )?;

    filter.append_child(&map)?;
    filter.append_child(&displacement)?;
    defs.append_child(&filter)?;
    svg.append_child(&defs)?;
    Ok((svg, map, displacement))
}

/// Returns `(root, pointer container, filtered content)`.
fn build_window(document: &Document, id: &str) -> Result<(Element, Element, Element)> {
    let root = dom::create(document, "div", "glass-root")?;
    let container = dom::create(document, "div", "glass-container")?;
    let frame = dom::create(document, "div", "glass-window")?;

    let chrome = dom::create(document, "div", "glass-chrome")?;
    for light in ["red", "grey", "green"] {
        chrome.append_child(&dom::create(document, "div", &format!("glass-light {light}"))?)?;
    }

    let filtered: HtmlElement = dom::create(document, "div", "glass-filtered")?
        .dyn_into()
        .map_err(|_| SurfaceError::WrongElement("div".into()))?;
    filtered
        .style()
        .set_property("filter", &format!("url(#{id}_filter)"))?;
    let content = dom::create(document, "div", "glass-content")?;
    filtered.append_child(&content)?;

    frame.append_child(&chrome)?;
    frame.append_child(&filtered)?;
    container.append_child(&frame)?;
    root.append_child(&container)?;
    Ok((root, container, content))
}

fn skills_grid(document: &Document) -> Result<Element> {
    let grid = dom::create(document, "div", "skills")?;
    let title = dom::create(document, "h2", "skills-title")?;
    title.set_text_content(Some(content::WINDOW_TITLE));
    grid.append_child(&title)?;

    for (i, row) in content::SKILL_ROWS.iter().enumerate() {
        let row_el = dom::create(document, "div", &format!("skills-row cols-{}", row.len()))?;
        row_el.set_attribute("data-row", &i.to_string())?;
        for group in row.iter() {
            row_el.append_child(&skill_group(document, group)?)?;
        }
        grid.append_child(&row_el)?;
    }
    Ok(grid)
}

fn skill_group(document: &Document, group: &SkillGroup) -> Result<Element> {
    let el = dom::create(document, "div", "skills-group")?;
    let heading = dom::create(document, "h3", "")?;
    heading.set_text_content(Some(group.title));
    el.append_child(&heading)?;

    let tiles = dom::create(document, "div", "tech-grid")?;
    for skill in group.skills {
        let tile = dom::create(document, "div", "tech-icon")?;
        let badge = dom::create(document, "div", "tech-badge")?;
        let img = dom::create(document, "img", "")?;
        img.set_attribute("src", skill.icon)?;
        img.set_attribute("alt", skill.name)?;
        badge.append_child(&img)?;
        let label = dom::create(document, "span", "tech-name")?;
        label.set_text_content(Some(skill.name));
        tile.append_child(&badge)?;
        tile.append_child(&label)?;
        tiles.append_child(&tile)?;
    }
    for _ in 0..group.padding() {
        tiles.append_child(&dom::create(document, "div", "tech-icon empty")?)?;
    }
    el.append_child(&tiles)?;
    Ok(el)
}
