//! Navigation bar
//!
//! A pill-shaped bar of icon items. The selected item stretches and turns
//! translucent while the bar takes on its color; both changes ride the
//! same bouncy spring.

use serde::Deserialize;
use smallvec::SmallVec;
use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain, SpringConfig};
use soothing_core::{
    ensure_at_least, ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Path, Point,
    Rect, Size,
};
use tracing::debug;

use crate::component::{checked, ActionId, Component, ComponentCore};

/// Share of the bar width spent on padding
const PADDING_RATIO: f32 = 0.15;

/// Width multiplier of the selected item
const SELECTED_STRETCH: f32 = 1.6;

/// Opacity of the selected item's pill
const SELECTED_OPACITY: f32 = 0.3;

/// One item of the bar
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NavigationItem {
    /// Glyph name drawn in the item
    pub icon: String,
    /// Bar color while the item is selected
    pub color: Color,
}

impl NavigationItem {
    pub fn new(icon: impl Into<String>, color: Color) -> Self {
        Self {
            icon: icon.into(),
            color,
        }
    }
}

/// Navigation bar configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationBarConfig {
    pub width: f32,
    pub height: f32,
    pub items: Vec<NavigationItem>,
}

impl Default for NavigationBarConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 50.0,
            items: vec![
                NavigationItem::new("house", Color::BLUE),
                NavigationItem::new("gear", Color::GRAY),
            ],
        }
    }
}

impl NavigationBarConfig {
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn items(mut self, items: Vec<NavigationItem>) -> Self {
        self.items = items;
        self
    }

    pub fn item(mut self, icon: impl Into<String>, color: Color) -> Self {
        self.items.push(NavigationItem::new(icon, color));
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("width", self.width)?;
        ensure_positive("height", self.height)?;
        ensure_at_least("items", &self.items, 1)?;
        Ok(())
    }
}

/// Derived item geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarLayout {
    /// Gap between items and at both ends
    pub spacing: f32,
    /// Width of an unselected item
    pub item_width: f32,
    pub item_height: f32,
}

impl BarLayout {
    pub fn new(width: f32, height: f32, count: usize) -> Self {
        let count = count.max(1) as f32;
        let total_padding = width * PADDING_RATIO;
        let spacing = total_padding / (count + 1.0);
        let item_width = (width - total_padding - spacing * (count - 1.0)) / count;
        Self {
            spacing,
            item_width,
            item_height: height * (1.0 - PADDING_RATIO),
        }
    }
}

/// Bar of selectable icon items
pub struct NavigationBar {
    config: NavigationBarConfig,
    core: ComponentCore,
    layout: BarLayout,
    selected: usize,
    /// 0.0 for a plain item, 1.0 for the selected one
    emphasis: SmallVec<[AnimatedParam; 5]>,
    /// Blend from `previous_color` to the selected item's color
    blend: AnimatedParam,
    previous_color: Color,
    actions: SmallVec<[Option<ActionId>; 5]>,
}

impl NavigationBar {
    pub fn new(config: NavigationBarConfig) -> Result<Self, ConfigError> {
        checked("navigation_bar", config.validate())?;
        let core = ComponentCore::new("navigation_bar");
        let layout = BarLayout::new(config.width, config.height, config.items.len());
        let emphasis = (0..config.items.len())
            .map(|i| {
                AnimatedParam::new("emphasis", if i == 0 { 1.0 } else { 0.0 })
                    .with_redraw(core.redraw())
            })
            .collect();
        let blend = AnimatedParam::new("background", 1.0)
            .with_domain(ParamDomain::UNIT)
            .with_redraw(core.redraw());
        Ok(Self {
            previous_color: config.items[0].color,
            actions: SmallVec::from_elem(None, config.items.len()),
            config,
            core,
            layout,
            selected: 0,
            emphasis,
            blend,
        })
    }

    /// Run `action` whenever item `index` is selected
    pub fn with_action(mut self, index: usize, action: impl FnMut() + 'static) -> Self {
        if index < self.actions.len() {
            self.actions[index] = Some(self.core.add_action(Box::new(action)));
        }
        self
    }

    pub fn config(&self) -> &NavigationBarConfig {
        &self.config
    }

    pub fn layout(&self) -> BarLayout {
        self.layout
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn spring() -> AnimationSpec {
        AnimationSpec::spring(SpringConfig::interpolating(0.5, 100.0, 6.0))
    }

    /// Select item `index`; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) {
        if index >= self.config.items.len() {
            return;
        }
        self.previous_color = self.background_color();
        self.selected = index;
        for (i, param) in self.emphasis.iter_mut().enumerate() {
            let target = if i == index { 1.0 } else { 0.0 };
            param.animate_to(target, Self::spring());
        }
        self.blend.set(0.0);
        self.blend.animate_to(1.0, Self::spring());

        if let Some(action) = self.actions[index] {
            self.core.queue(action);
        }
        self.core.begin_cycle();
        debug!(index, icon = %self.config.items[index].icon, "navigation item selected");
    }

    /// Current width of item `index`
    pub fn item_width(&self, index: usize) -> f32 {
        let emphasis = self.emphasis.get(index).map_or(0.0, AnimatedParam::value);
        self.layout.item_width * (1.0 + (SELECTED_STRETCH - 1.0) * emphasis)
    }

    /// Current pill of every item, left to right
    pub fn item_rects(&self) -> SmallVec<[Rect; 5]> {
        let count = self.config.items.len();
        let widths: SmallVec<[f32; 5]> = (0..count).map(|i| self.item_width(i)).collect();
        let total: f32 = widths.iter().sum::<f32>() + self.layout.spacing * (count as f32 - 1.0);

        let y = (self.config.height - self.layout.item_height) / 2.0;
        let mut x = (self.config.width - total) / 2.0;
        widths
            .iter()
            .map(|&w| {
                let rect = Rect::new(x, y, w, self.layout.item_height);
                x += w + self.layout.spacing;
                rect
            })
            .collect()
    }

    /// Bar color, blending towards the selected item's color
    pub fn background_color(&self) -> Color {
        let target = self.config.items[self.selected].color;
        Color::lerp(&self.previous_color, &target, self.blend.value())
    }

    fn is_settling(&self) -> bool {
        self.blend.is_animating() || self.emphasis.iter().any(AnimatedParam::is_animating)
    }
}

impl Component for NavigationBar {
    fn name(&self) -> &'static str {
        "navigation_bar"
    }

    fn intrinsic_size(&self) -> Size {
        Size::new(self.config.width, self.config.height)
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn tap(&mut self, point: Point) -> bool {
        let hit = self.item_rects().iter().position(|r| r.contains(point));
        match hit {
            Some(index) => {
                self.select(index);
                true
            }
            None => false,
        }
    }

    fn tick(&mut self, dt: f32) {
        self.core.clock_mut().tick(dt);
        for param in self.emphasis.iter_mut() {
            param.step(dt);
        }
        self.blend.step(dt);

        if self.lifecycle() == crate::Lifecycle::Running && !self.is_settling() {
            self.core.complete();
            self.core.settle();
        }
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let height = self.config.height;
        let bar = Path::rounded_rect(self.intrinsic_size().to_rect(), height / 2.0);
        ctx.fill(&bar, self.background_color());

        let icon_side = self.layout.item_height / 2.0;
        for (i, rect) in self.item_rects().into_iter().enumerate() {
            let emphasis = self.emphasis[i].value().clamp(0.0, 1.0);
            let opacity = 1.0 - (1.0 - SELECTED_OPACITY) * emphasis;
            let pill = Path::rounded_rect(rect, height / 2.0);
            ctx.fill(&pill, Color::WHITE.opacity(opacity));

            let icon_color = if i == self.selected {
                Color::WHITE
            } else {
                Color::GRAY
            };
            let icon = Rect::centered(rect.center(), Size::square(icon_side));
            ctx.draw_glyph(&self.config.items[i].icon, icon, icon_color);
        }
    }
}
