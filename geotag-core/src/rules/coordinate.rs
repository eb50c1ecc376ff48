//! # Associação com Coordenadas
//!
//! Quando o documento traz coordenadas ("42.36N 71.06W"), hipóteses cujo
//! ponto fica perto de alguma delas são fortemente favorecidas. É a única
//! evidência geodésica do sistema e leva à maior confiança na escolha.
//!
//! O peso é `5 × proximidade`, com proximidade = `1 - distância / raio`,
//! usando a coordenada mais próxima.

use crate::context::DocumentContext;
use crate::evidence::Evidence;
use crate::mention::NameMention;
use crate::rules::{evaluate_each, GeocodeRule, COORDINATE_PROXIMITY};

const MAX_WEIGHT: f64 = 5.0;

#[derive(Debug)]
pub struct CoordinateRule {
    threshold_meters: f64,
}

impl Default for CoordinateRule {
    fn default() -> Self {
        Self::new(10_000.0)
    }
}

impl CoordinateRule {
    pub fn new(threshold_meters: f64) -> Self {
        Self { threshold_meters }
    }
}

impl GeocodeRule for CoordinateRule {
    fn name(&self) -> &'static str {
        "coordinate"
    }

    fn evaluate(&mut self, mentions: &mut [NameMention], ctx: &mut DocumentContext) {
        if ctx.coordinates.is_empty() {
            return;
        }
        evaluate_each(self, mentions, ctx);
    }

    fn evaluate_place(&mut self, mention: &mut NameMention, index: usize, ctx: &mut DocumentContext) {
        let place = &mention.hypotheses[index];
        let Some(point) = place.location else {
            return;
        };

        let nearest = ctx
            .coordinates
            .iter()
            .map(|c| c.distance_meters(&point))
            .fold(f64::INFINITY, f64::min);
        if nearest >= self.threshold_meters {
            return;
        }

        let proximity = 1.0 - nearest / self.threshold_meters;
        let weight = MAX_WEIGHT * proximity;
        let evidence = Evidence::from_place(COORDINATE_PROXIMITY, weight, place).evaluated();
        mention.increment_score(index, weight);
        mention.add_evidence(evidence);
        tracing::debug!(text = mention.text(), distance_m = nearest, weight, "hipótese perto de coordenada");
    }
}
