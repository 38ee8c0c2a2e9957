//! On-frame presentation of the current emotion.
//!
//! Layout is decided by [`OverlayPlan`] without touching pixels; the
//! [`OverlayRenderer`] then draws a plan onto a frame with `OpenCV`.

use crate::{
    catalog::{response_for, BgrColor},
    constants::{
        ACTION_LINE_Y, EMOTION_LINE_Y, FONT_SCALE, INSTRUCTION_LINE_Y, INSTRUCTION_TEXT, MESSAGE_LINE_Y,
        OUTLINE_EXTRA_THICKNESS, OVERLAY_ALPHA, OVERLAY_BOX_HEIGHT, OVERLAY_BOX_LEFT, OVERLAY_BOX_RIGHT,
        OVERLAY_BOX_TOP, TEXT_LEFT, TEXT_THICKNESS,
    },
    emotion::EmotionLabel,
    Error, Result,
};
use opencv::{
    core::{self, Mat, Point, Rect, Scalar},
    imgproc::{self, FILLED, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};

impl From<BgrColor> for Scalar {
    fn from(color: BgrColor) -> Self {
        Scalar::new(f64::from(color.b), f64::from(color.g), f64::from(color.r), 0.0)
    }
}

/// One line of outlined text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub origin: Point,
    pub color: BgrColor,
}

/// Everything to draw on a single frame
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPlan {
    /// Translucent box behind the result lines, if any
    pub backdrop: Option<Rect>,
    pub lines: Vec<TextLine>,
}

impl OverlayPlan {
    /// Plan for the given display state.
    ///
    /// With a label: backdrop plus emotion, message and (when the catalog
    /// defines one) action lines in the label's color. The instruction line
    /// is always present.
    #[must_use]
    pub fn for_state(state: Option<EmotionLabel>) -> Self {
        let mut plan = Self {
            backdrop: None,
            lines: Vec::with_capacity(4),
        };

        if let Some(label) = state {
            let response = response_for(label);
            plan.backdrop = Some(Rect::new(
                OVERLAY_BOX_LEFT,
                OVERLAY_BOX_TOP,
                OVERLAY_BOX_RIGHT - OVERLAY_BOX_LEFT,
                OVERLAY_BOX_HEIGHT,
            ));
            plan.lines.push(TextLine {
                text: format!("Emotion: {}", label.as_str().to_uppercase()),
                origin: Point::new(TEXT_LEFT, EMOTION_LINE_Y),
                color: response.color,
            });
            plan.lines.push(TextLine {
                text: format!("Message: {}", response.message),
                origin: Point::new(TEXT_LEFT, MESSAGE_LINE_Y),
                color: response.color,
            });
            if let Some(action) = response.action {
                plan.lines.push(TextLine {
                    text: format!("Action: {action}"),
                    origin: Point::new(TEXT_LEFT, ACTION_LINE_Y),
                    color: response.color,
                });
            }
        }

        plan.lines.push(TextLine {
            text: INSTRUCTION_TEXT.to_string(),
            origin: Point::new(TEXT_LEFT, INSTRUCTION_LINE_Y),
            color: BgrColor::WHITE,
        });

        plan
    }

    /// Line whose text starts with `prefix`
    #[must_use]
    pub fn line_starting_with(&self, prefix: &str) -> Option<&TextLine> {
        self.lines.iter().find(|line| line.text.starts_with(prefix))
    }
}

/// Draws overlay plans onto frames
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    font_scale: f64,
    thickness: i32,
    alpha: f64,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self {
            font_scale: FONT_SCALE,
            thickness: TEXT_THICKNESS,
            alpha: OVERLAY_ALPHA,
        }
    }
}

impl OverlayRenderer {
    /// Create a renderer with custom text and backdrop settings
    ///
    /// # Errors
    ///
    /// Returns an error if `font_scale` or `thickness` is not positive or `alpha` is outside [0, 1]
    pub fn new(font_scale: f64, thickness: i32, alpha: f64) -> Result<Self> {
        if !font_scale.is_finite() || font_scale <= 0.0 {
            return Err(Error::InvalidInput(format!("Font scale must be positive, got {font_scale}")));
        }
        if thickness <= 0 {
            return Err(Error::InvalidInput(format!("Text thickness must be positive, got {thickness}")));
        }
        if !(0.0..=1.0).contains(&alpha) {
            return Err(Error::InvalidInput(format!("Overlay alpha must be between 0 and 1, got {alpha}")));
        }
        Ok(Self {
            font_scale,
            thickness,
            alpha,
        })
    }

    /// Draw `plan` onto `frame` in place
    ///
    /// # Errors
    ///
    /// Returns an error if any `OpenCV` drawing call fails
    pub fn render(&self, frame: &mut Mat, plan: &OverlayPlan) -> Result<()> {
        if let Some(backdrop) = plan.backdrop {
            self.draw_backdrop(frame, backdrop)?;
        }
        for line in &plan.lines {
            self.draw_text(frame, &line.text, line.origin, line.color)?;
        }
        Ok(())
    }

    /// Blend a filled black rectangle into the frame
    fn draw_backdrop(&self, frame: &mut Mat, area: Rect) -> Result<()> {
        let mut overlay = frame.try_clone()?;
        imgproc::rectangle(&mut overlay, area, BgrColor::BLACK.into(), FILLED, LINE_8, 0)?;

        let base = frame.try_clone()?;
        core::add_weighted(&overlay, self.alpha, &base, 1.0 - self.alpha, 0.0, frame, -1)?;
        Ok(())
    }

    /// Black outline first, colored text on top
    fn draw_text(&self, frame: &mut Mat, text: &str, origin: Point, color: BgrColor) -> Result<()> {
        imgproc::put_text(
            frame,
            text,
            origin,
            FONT_HERSHEY_SIMPLEX,
            self.font_scale,
            BgrColor::BLACK.into(),
            self.thickness + OUTLINE_EXTRA_THICKNESS,
            LINE_8,
            false,
        )?;
        imgproc::put_text(
            frame,
            text,
            origin,
            FONT_HERSHEY_SIMPLEX,
            self.font_scale,
            color.into(),
            self.thickness,
            LINE_8,
            false,
        )?;
        Ok(())
    }
}
