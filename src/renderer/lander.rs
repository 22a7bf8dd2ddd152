//! Rotating lunar lander wireframe
//!
//! Vertices are kept in polar form so a rotation is a phase offset on the
//! angle; projection back to screen space happens per frame.

use std::f32::consts::TAU;
use std::fmt;

use glam::Vec2;

use super::surface::Bitmap;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Lander outline in model units, y down
#[rustfmt::skip]
const CLASSIC_POINTS: [(f32, f32); 24] = [
    (-3.0, -7.0), (-7.0, -3.0), (-7.0, 3.0), (-3.0, 7.0),
    (3.0, 7.0), (7.0, 3.0), (7.0, -3.0), (3.0, -7.0),
    (-8.0, 8.0), (-8.0, 13.0), (8.0, 13.0), (8.0, 8.0),
    (-3.0, 8.0), (3.0, 8.0), (-4.0, 13.0), (-7.0, 16.0),
    (7.0, 16.0), (4.0, 13.0), (-10.0, 13.0), (-13.0, 17.0),
    (-10.0, 17.0), (10.0, 12.0), (10.0, 17.0), (13.0, 17.0),
];

#[rustfmt::skip]
const CLASSIC_EDGES: [(usize, usize); 25] = [
    (0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 7), (7, 0),
    (8, 9), (9, 10), (10, 11), (11, 8),
    (3, 12), (4, 13),
    (8, 19), (19, 20), (9, 20), (9, 19),
    (11, 23), (22, 23), (10, 22), (10, 23),
    (14, 15), (15, 16), (16, 17),
];

/// Invalid wireframe data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// An edge names a vertex that does not exist
    EdgeOutOfRange {
        edge: usize,
        vertex: usize,
        vertex_count: usize,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EdgeOutOfRange {
                edge,
                vertex,
                vertex_count,
            } => write!(
                f,
                "edge {edge} references vertex {vertex} but the model has {vertex_count}"
            ),
        }
    }
}

impl std::error::Error for ModelError {}

/// Vertex in polar form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarVertex {
    pub radius: f32,
    pub angle: f32,
}

/// Immutable wireframe: polar vertices plus index pairs
#[derive(Debug, Clone, PartialEq)]
pub struct LanderModel {
    vertices: Vec<PolarVertex>,
    edges: Vec<(usize, usize)>,
}

impl LanderModel {
    pub fn from_cartesian(points: &[(f32, f32)], edges: &[(usize, usize)]) -> Result<Self, ModelError> {
        for (i, &(a, b)) in edges.iter().enumerate() {
            if let Some(&vertex) = [a, b].iter().find(|&&v| v >= points.len()) {
                return Err(ModelError::EdgeOutOfRange {
                    edge: i,
                    vertex,
                    vertex_count: points.len(),
                });
            }
        }

        let vertices = points
            .iter()
            .map(|&(x, y)| {
                let (radius, angle) = cartesian_to_polar(Vec2::new(x, y));
                PolarVertex { radius, angle }
            })
            .collect();

        Ok(Self {
            vertices,
            edges: edges.to_vec(),
        })
    }

    /// The built-in lander outline
    pub fn classic() -> Result<Self, ModelError> {
        Self::from_cartesian(&CLASSIC_POINTS, &CLASSIC_EDGES)
    }

    pub fn vertices(&self) -> &[PolarVertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

/// Rotation state and projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanderView {
    pub phase: f32,
    /// Radians per second
    pub angular_speed: f32,
    /// Screen pixels per model unit
    pub scale: f32,
}

impl Default for LanderView {
    fn default() -> Self {
        Self {
            phase: 0.0,
            angular_speed: 0.3,
            scale: 16.0,
        }
    }
}

impl LanderView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        self.phase += self.angular_speed * dt;
        if self.phase.abs() > TAU {
            self.phase %= TAU;
        }
    }

    /// Screen position of a vertex around `center`
    pub fn project(&self, vertex: PolarVertex, center: Vec2) -> (i32, i32) {
        let p = center + polar_to_cartesian(vertex.radius * self.scale, vertex.angle + self.phase);
        (p.x.round() as i32, p.y.round() as i32)
    }

    /// Clear `target` and draw every edge in green around the screen center
    pub fn render(&self, model: &LanderModel, target: &mut Bitmap) {
        let green = target.pixel_value(0x00, 0xFF, 0x00);
        let center = Vec2::new(target.width() as f32 / 2.0, target.height() as f32 / 2.0);
        target.clear();

        let projected: Vec<(i32, i32)> = model
            .vertices()
            .iter()
            .map(|&v| self.project(v, center))
            .collect();

        for &(a, b) in model.edges() {
            let (x0, y0) = projected[a];
            let (x1, y1) = projected[b];
            target.draw_line(x0, y0, x1, y1, green);
        }
    }
}
