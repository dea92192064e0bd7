//! Rendering module
//!
//! The simulation draws through a `RenderSink`: clear, circles, squares
//! and lines with named paints. `CommandRecorder` keeps the calls for
//! tests and replay; the Canvas 2D sink draws them in the browser.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;
pub use shapes::{draw_entity, draw_gesture_overlay};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Named draw colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paint {
    /// Circles that are homing on a target
    White,
    /// Idle circles
    LightBlue,
    /// Drifting squares
    Navy,
    /// Drag vector
    Slate,
    /// Charge circle, target links
    Amber,
}

impl Paint {
    /// CSS color (alpha is applied separately)
    pub fn css(&self) -> &'static str {
        match self {
            Paint::White => "rgb(255, 255, 255)",
            Paint::LightBlue => "rgb(173, 216, 230)",
            Paint::Navy => "rgb(30, 30, 105)",
            Paint::Slate => "rgb(112, 128, 144)",
            Paint::Amber => "rgb(255, 191, 0)",
        }
    }
}

/// Fill and/or stroke with one alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub alpha: f32,
}

impl Style {
    pub fn fill(paint: Paint, alpha: f32) -> Self {
        Self {
            fill: Some(paint),
            stroke: None,
            alpha,
        }
    }

    pub fn stroke(paint: Paint, alpha: f32) -> Self {
        Self {
            fill: None,
            stroke: Some(paint),
            alpha,
        }
    }

    pub fn fill_and_stroke(fill: Paint, stroke: Paint, alpha: f32) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            alpha,
        }
    }
}

/// Drawing surface the render system writes to
pub trait RenderSink {
    /// Clear the whole surface; called first in every render pass
    fn clear(&mut self, width: f32, height: f32);
    fn circle(&mut self, center: Vec2, radius: f32, style: Style);
    fn rect(&mut self, center: Vec2, half_extent: f32, style: Style);
    fn line(&mut self, from: Vec2, to: Vec2, style: Style);
}

/// A recorded draw call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Circle { center: Vec2, radius: f32, style: Style },
    Rect { center: Vec2, half_extent: f32, style: Style },
    Line { from: Vec2, to: Vec2, style: Style },
}

/// Keeps the draw calls of the most recent pass
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Style)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Circle {
                center,
                radius,
                style,
            } => Some((center, radius, style)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Style)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Line { from, to, style } => Some((from, to, style)),
            _ => None,
        })
    }

    /// Replay the recorded pass into another sink
    pub fn replay(&self, sink: &mut dyn RenderSink) {
        for command in &self.commands {
            match *command {
                DrawCommand::Clear { width, height } => sink.clear(width, height),
                DrawCommand::Circle {
                    center,
                    radius,
                    style,
                } => sink.circle(center, radius, style),
                DrawCommand::Rect {
                    center,
                    half_extent,
                    style,
                } => sink.rect(center, half_extent, style),
                DrawCommand::Line { from, to, style } => sink.line(from, to, style),
            }
        }
    }
}

impl RenderSink for CommandRecorder {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn circle(&mut self, center: Vec2, radius: f32, style: Style) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            style,
        });
    }

    fn rect(&mut self, center: Vec2, half_extent: f32, style: Style) {
        self.commands.push(DrawCommand::Rect {
            center,
            half_extent,
            style,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, style: Style) {
        self.commands.push(DrawCommand::Line { from, to, style });
    }
}
