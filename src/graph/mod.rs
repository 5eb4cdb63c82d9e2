//! Line graph engine: samples scalar functions over their domains into colored series.
//!
//! Every mutation of the function set recomputes all series. Sampling is
//! cheap (resolution x function count evaluations of pure functions).

mod functions;

pub use crate::config::Color;
pub use functions::{DpsFunction, TurretDpsFunction};

use crate::config::GraphConfig;
use crate::model::CurvePoint;
use serde::Serialize;

/// A labeled scalar function over `[domain_min, domain_max)`.
pub trait GraphFunction {
    fn label(&self) -> String;
    fn domain_min(&self) -> f64;
    fn domain_max(&self) -> f64;
    fn value_at(&self, x: f64) -> f64;

    /// Format for displayed values; `{0}` is replaced by the value.
    fn value_format(&self) -> &str {
        "{0}"
    }
}

/// Handle returned by [`LineGraph::add_function`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionId(u64);

/// One sampled series, ready for a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct SampledCurve {
    pub label: String,
    pub color: Color,
    pub value_format: String,
    pub points: Vec<CurvePoint>,
}

pub struct LineGraph {
    config: GraphConfig,
    next_id: u64,
    functions: Vec<(FunctionId, Box<dyn GraphFunction>)>,
    curves: Vec<SampledCurve>,
    domain_max: f64,
    range_max: f64,
}

impl LineGraph {
    /// An empty palette falls back to the default colors.
    pub fn new(mut config: GraphConfig) -> Self {
        if config.palette.is_empty() {
            config.palette = GraphConfig::default().palette;
        }
        let domain_max = config.empty_domain_max;
        let range_max = config.empty_range_max;
        Self {
            config,
            next_id: 0,
            functions: Vec::new(),
            curves: Vec::new(),
            domain_max,
            range_max,
        }
    }

    pub fn add_function(&mut self, function: Box<dyn GraphFunction>) -> FunctionId {
        let id = self.push(function);
        self.recalculate_curves();
        id
    }

    /// Register several functions with a single recompute.
    pub fn add_functions(
        &mut self,
        functions: impl IntoIterator<Item = Box<dyn GraphFunction>>,
    ) -> Vec<FunctionId> {
        let ids = functions.into_iter().map(|f| self.push(f)).collect();
        self.recalculate_curves();
        ids
    }

    /// Returns false when `id` is not registered (nothing is recomputed then).
    pub fn remove_function(&mut self, id: FunctionId) -> bool {
        let before = self.functions.len();
        self.functions.retain(|(fid, _)| *fid != id);
        if self.functions.len() == before {
            return false;
        }
        self.recalculate_curves();
        true
    }

    pub fn clear_functions(&mut self) {
        self.functions.clear();
        self.recalculate_curves();
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Sampled series, in registration order.
    pub fn curves(&self) -> &[SampledCurve] {
        &self.curves
    }

    /// Horizontal extent `(0, max)` shared by all series.
    pub fn domain(&self) -> (f64, f64) {
        (0.0, self.domain_max)
    }

    /// Vertical extent `(0, max)`, including headroom.
    pub fn range(&self) -> (f64, f64) {
        (0.0, self.range_max)
    }

    fn push(&mut self, function: Box<dyn GraphFunction>) -> FunctionId {
        let id = FunctionId(self.next_id);
        self.next_id += 1;
        self.functions.push((id, function));
        id
    }

    fn recalculate_curves(&mut self) {
        self.curves.clear();

        if self.functions.is_empty() {
            self.domain_max = self.config.empty_domain_max;
            self.range_max = self.config.empty_range_max;
            return;
        }

        let mut domain_max = self
            .functions
            .iter()
            .map(|(_, f)| f.domain_max())
            .fold(f64::NEG_INFINITY, f64::max);
        if domain_max.abs() < f64::EPSILON {
            domain_max += 1.0;
        }
        self.domain_max = domain_max;
        let step = domain_max / self.config.resolution as f64;

        let eps = self.config.edge_epsilon;
        let mut max_value = 0.0f64;
        for (index, (_, func)) in self.functions.iter().enumerate() {
            let color = self.config.palette[index % self.config.palette.len()];
            let (min, max) = (func.domain_min(), func.domain_max());

            let mut points = Vec::new();
            if step > 0.0 && step.is_finite() {
                let mut i = 0u64;
                let mut x = min;
                while x < max {
                    let y = func.value_at(x);
                    points.push(CurvePoint { x, y });
                    max_value = max_value.max(y);
                    i += 1;
                    x = min + i as f64 * step;
                }
            }
            // zero the curve just outside its own domain
            points.push(CurvePoint { x: min - eps, y: 0.0 });
            points.push(CurvePoint { x: max + eps, y: 0.0 });
            points.sort_by(|a, b| a.x.total_cmp(&b.x));

            tracing::debug!(
                "sampled {} point(s) for {} over [{}, {})",
                points.len() - 2,
                func.label(),
                min,
                max
            );
            self.curves.push(SampledCurve {
                label: func.label(),
                color,
                value_format: func.value_format().to_string(),
                points,
            });
        }

        self.range_max = max_value * self.config.headroom;
    }
}

impl Default for LineGraph {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}
