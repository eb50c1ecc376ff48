//! Regra de relevância de províncias.
//!
//! O chamador pode indicar, por documento, províncias (`PAÍS.ADMIN1`) que são
//! relevantes (ex: a região de cobertura de um jornal local). Hipóteses
//! dentro dessas províncias ganham uma evidência de peso 1.

use crate::context::DocumentContext;
use crate::evidence::Evidence;
use crate::mention::NameMention;
use crate::rules::{evaluate_each, GeocodeRule, PROVINCE_RELEVANCE};

const WEIGHT: f64 = 1.0;

#[derive(Debug, Default)]
pub struct ProvinceRelevanceRule;

impl ProvinceRelevanceRule {
    pub fn new() -> Self {
        Self
    }
}

impl GeocodeRule for ProvinceRelevanceRule {
    fn name(&self) -> &'static str {
        "province_relevance"
    }

    fn evaluate(&mut self, mentions: &mut [NameMention], ctx: &mut DocumentContext) {
        if ctx.relevant_provinces.is_empty() {
            return;
        }
        evaluate_each(self, mentions, ctx);
    }

    fn evaluate_place(&mut self, mention: &mut NameMention, index: usize, ctx: &mut DocumentContext) {
        let place = &mention.hypotheses[index];
        let relevant = place
            .hierarchical_key()
            .map(|k| ctx.relevant_provinces.contains(&k))
            .unwrap_or(false);
        if !relevant {
            return;
        }
        let evidence = Evidence::from_place(PROVINCE_RELEVANCE, WEIGHT, place).evaluated();
        mention.increment_score(index, WEIGHT);
        mention.add_evidence(evidence);
    }
}
