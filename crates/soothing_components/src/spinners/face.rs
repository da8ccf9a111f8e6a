//! Face animation
//!
//! A round face whose pupils roll around the inside of its eyes.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain};
use soothing_core::{
    ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Path, Point, Rect, Size,
};

use crate::component::{checked, rotation, Component, ComponentCore};

/// Gap between the eye row and the mouth
const ROW_SPACING: f32 = 8.0;

/// Seconds per pupil orbit
const ORBIT_DURATION: f32 = 1.0;

/// Face animation configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaceAnimationConfig {
    /// Diameter of the face
    pub size: f32,
    pub face_color: Color,
}

impl Default for FaceAnimationConfig {
    fn default() -> Self {
        Self {
            size: 100.0,
            face_color: Color::YELLOW,
        }
    }
}

impl FaceAnimationConfig {
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn face_color(mut self, color: Color) -> Self {
        self.face_color = color;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("size", self.size)?;
        Ok(())
    }

    fn eye_size(&self) -> f32 {
        self.size / 3.0
    }

    /// Small faces lift the mouth, larger ones drop it
    fn mouth_offset(&self) -> f32 {
        if self.size <= 50.0 {
            -self.size / 8.0
        } else {
            self.size / 15.0
        }
    }
}

/// Face with rolling pupils
pub struct FaceAnimation {
    config: FaceAnimationConfig,
    core: ComponentCore,
    pupil: AnimatedParam,
}

impl FaceAnimation {
    pub fn new(config: FaceAnimationConfig) -> Result<Self, ConfigError> {
        checked("face_animation", config.validate())?;
        let core = ComponentCore::new("face_animation");
        let pupil = AnimatedParam::new("pupil_rotation", 0.0)
            .with_domain(ParamDomain::DEGREES)
            .with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            pupil,
        })
    }

    pub fn config(&self) -> &FaceAnimationConfig {
        &self.config
    }

    pub fn pupil_rotation(&self) -> f32 {
        self.pupil.value()
    }

    /// Centers of the left and right eyes
    pub fn eye_centers(&self) -> [Point; 2] {
        let size = self.config.size;
        let eye = self.config.eye_size();
        let center = self.intrinsic_size().to_rect().center();
        let y = self.column_top() + size / 15.0 + eye / 2.0 - self.config.mouth_offset() / 5.0;
        let dx = eye / 2.0 + size / 20.0;
        [Point::new(center.x - dx, y), Point::new(center.x + dx, y)]
    }

    pub fn mouth_center(&self) -> Point {
        let size = self.config.size;
        let eye = self.config.eye_size();
        let center = self.intrinsic_size().to_rect().center();
        let y = self.column_top()
            + size / 15.0
            + eye
            + ROW_SPACING
            + eye / 6.0
            + self.config.mouth_offset();
        Point::new(center.x, y)
    }

    /// Top of the eyes-over-mouth column, centered in the face
    fn column_top(&self) -> f32 {
        let eye = self.config.eye_size();
        let height = self.config.size / 15.0 + eye + ROW_SPACING + eye / 3.0;
        self.intrinsic_size().to_rect().center().y - height / 2.0
    }

    fn draw_eye(&self, ctx: &mut dyn DrawContext, center: Point) {
        let eye = self.config.eye_size();
        ctx.fill(&Path::circle(center, eye / 2.0), Color::BLACK);
        ctx.fill(&Path::circle(center, eye * 0.97 / 2.0), Color::WHITE);

        let pupil = center.offset(eye / 4.0, 0.0);
        ctx.with_transform(rotation(self.pupil_rotation(), center), |ctx| {
            ctx.fill(&Path::circle(pupil, eye / 6.0), Color::BLACK);
        });
    }
}

impl Component for FaceAnimation {
    fn name(&self) -> &'static str {
        "face_animation"
    }

    fn intrinsic_size(&self) -> Size {
        Size::square(self.config.size)
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn on_appear(&mut self) {
        self.pupil.set(0.0);
        self.pupil.animate_to(
            360.0,
            AnimationSpec::ease_out(ORBIT_DURATION).repeat_forever(false),
        );
        self.core.begin_cycle();
    }

    fn tick(&mut self, dt: f32) {
        self.core.clock_mut().tick(dt);
        self.pupil.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let face = self.intrinsic_size().to_rect();
        ctx.fill(&Path::ellipse(face), self.config.face_color);

        for eye in self.eye_centers() {
            self.draw_eye(ctx, eye);
        }

        let eye = self.config.eye_size();
        let mouth = Rect::centered(self.mouth_center(), Size::new(eye / 2.0, eye / 3.0));
        ctx.fill(&Path::ellipse(mouth), Color::BLACK);
    }
}
