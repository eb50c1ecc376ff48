//! # Regra de Lugares Importantes
//!
//! Capitais nacionais e províncias (admin1) são as leituras mais prováveis de
//! um nome ambíguo. "Paris" sozinho no texto é quase sempre a capital da
//! França.
//!
//! - **Capital**: se nenhum país foi observado ainda, o país da capital é
//!   inferido. Peso 2, ou 3 quando o país já foi mencionado explicitamente.
//! - **Província**: peso 1, ou 2 quando o país já foi mencionado
//!   explicitamente. A província entra no histograma de fronteiras.
//!
//! Uma menção que recebe evidência fica validada, protegida dos filtros
//! seguintes.
//!
//! ## Abreviações
//!
//! Abreviações soltas ("MD" depois de um nome de pessoa) só são avaliadas se
//! alguma regra anterior as validou. Nesse caso só contam hipóteses
//! administrativas em forma abreviada; sem nenhuma, a menção é descartada.

use crate::context::DocumentContext;
use crate::evidence::Evidence;
use crate::mention::NameMention;
use crate::rules::{GeocodeRule, ABBREVIATION_UNMATCHED, FREQUENT_NAME_THRESHOLD, MAJOR_PLACE_ADMIN, MAJOR_PLACE_CAPITAL};

const CAPITAL_WEIGHT: f64 = 2.0;
const ADMIN_WEIGHT: f64 = 1.0;
const COUNTRY_IN_SCOPE_BONUS: f64 = 1.0;

#[derive(Debug, Default)]
pub struct MajorPlaceRule;

impl MajorPlaceRule {
    pub fn new() -> Self {
        Self
    }
}

impl GeocodeRule for MajorPlaceRule {
    fn name(&self) -> &'static str {
        "major_place"
    }

    fn evaluate(&mut self, mentions: &mut [NameMention], ctx: &mut DocumentContext) {
        for mention in mentions.iter_mut() {
            if mention.filtered_out || mention.chosen.is_some() {
                continue;
            }
            let abbrev = mention.is_short_name();
            if abbrev && !mention.valid {
                continue;
            }

            let frequent = mention.hypotheses.len() > FREQUENT_NAME_THRESHOLD;
            let mut matched_admin = false;
            for index in 0..mention.hypotheses.len() {
                let h = &mention.hypotheses[index];
                if frequent && !(h.is_populated || h.is_administrative) {
                    continue;
                }
                if abbrev {
                    // "MD" só vale como código de província, nunca como sigla de outro lugar
                    if !(h.is_administrative && h.is_abbreviation) {
                        continue;
                    }
                    matched_admin = true;
                }
                self.evaluate_place(mention, index, ctx);
            }

            if abbrev && !matched_admin {
                tracing::debug!(text = mention.text(), "abreviação sem leitura administrativa descartada");
                mention.filter_out(ABBREVIATION_UNMATCHED);
            }
        }
    }

    fn evaluate_place(&mut self, mention: &mut NameMention, index: usize, ctx: &mut DocumentContext) {
        let place = mention.hypotheses[index].clone();
        let cc = place.country_code.as_str();

        let (rule, weight) = if place.is_national_capital {
            let mentioned = ctx.country_mentioned(cc);
            if ctx.country_count() == 0 {
                ctx.infer_country(cc);
            }
            let bonus = if mentioned { COUNTRY_IN_SCOPE_BONUS } else { 0.0 };
            (MAJOR_PLACE_CAPITAL, CAPITAL_WEIGHT + bonus)
        } else if place.is_admin1 {
            let bonus = if ctx.country_mentioned(cc) { COUNTRY_IN_SCOPE_BONUS } else { 0.0 };
            if let Some(key) = place.hierarchical_key() {
                ctx.boundary_in_scope(&key);
            }
            (MAJOR_PLACE_ADMIN, ADMIN_WEIGHT + bonus)
        } else {
            return;
        };

        mention.mark_valid();
        mention.increment_score(index, weight);
        mention.add_evidence(Evidence::from_place(rule, weight, &place).evaluated());
        tracing::debug!(text = mention.text(), place = %place.id, rule, weight, "lugar importante");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::LocationHypothesis;
    use crate::span::Span;

    fn paris() -> NameMention {
        NameMention::new(
            Span::new(0, 5, "Paris"),
            vec![
                LocationHypothesis::new("fr", "Paris", "FR").capital(),
                LocationHypothesis::new("tx", "Paris", "US").with_admin1("48").populated(),
            ],
        )
    }

    #[test]
    fn test_capital_infere_pais() {
        let mut mentions = vec![paris()];
        let mut ctx = DocumentContext::new();
        MajorPlaceRule::new().evaluate(&mut mentions, &mut ctx);

        assert_eq!(mentions[0].hypotheses[0].score, CAPITAL_WEIGHT);
        assert!(mentions[0].has_rule(MAJOR_PLACE_CAPITAL));
        assert!(ctx.country_observed("FR"));
        assert!(!ctx.country_mentioned("FR"), "país inferido não conta como menção");
        assert!(mentions[0].evidence.iter().all(|e| e.evaluated));
    }

    #[test]
    fn test_capital_com_pais_mencionado() {
        let mut mentions = vec![paris()];
        let mut ctx = DocumentContext::new();
        ctx.country_in_scope("FR");
        MajorPlaceRule::new().evaluate(&mut mentions, &mut ctx);
        assert_eq!(mentions[0].hypotheses[0].score, CAPITAL_WEIGHT + COUNTRY_IN_SCOPE_BONUS);
    }

    #[test]
    fn test_capital_nao_infere_com_outros_paises() {
        let mut mentions = vec![paris()];
        let mut ctx = DocumentContext::new();
        ctx.country_in_scope("US");
        MajorPlaceRule::new().evaluate(&mut mentions, &mut ctx);
        assert!(!ctx.country_observed("FR"));
        assert_eq!(mentions[0].hypotheses[0].score, CAPITAL_WEIGHT);
    }

    #[test]
    fn test_provincia_entra_em_escopo() {
        let mut mentions = vec![NameMention::new(
            Span::new(0, 13, "Massachusetts"),
            vec![LocationHypothesis::new("ma", "Massachusetts", "US").with_admin1("25").admin1_boundary()],
        )];
        let mut ctx = DocumentContext::new();
        ctx.country_in_scope("US");
        MajorPlaceRule::new().evaluate(&mut mentions, &mut ctx);

        assert_eq!(mentions[0].hypotheses[0].score, 2.0);
        assert!(mentions[0].has_rule(MAJOR_PLACE_ADMIN));
        assert!(mentions[0].valid, "evidência protege dos filtros seguintes");
        assert!(ctx.boundary_observed("US.25"));
    }

    #[test]
    fn test_provincia_com_pais_so_inferido() {
        // "Paris" infere a França; "Bretagne" não ganha o bônus de país
        let mut mentions = vec![
            paris(),
            NameMention::new(
                Span::new(10, 18, "Bretagne"),
                vec![LocationHypothesis::new("fr53", "Bretagne", "FR").with_admin1("53").admin1_boundary()],
            ),
        ];
        let mut ctx = DocumentContext::new();
        MajorPlaceRule::new().evaluate(&mut mentions, &mut ctx);

        assert!(ctx.country_observed("FR") && !ctx.country_mentioned("FR"));
        assert_eq!(mentions[1].hypotheses[0].score, 1.0);
    }

    fn md(valid: bool, hyps: Vec<LocationHypothesis>) -> NameMention {
        let mut m = NameMention::new(Span::new(0, 2, "MD"), hyps);
        m.valid = valid;
        m
    }

    #[test]
    fn test_abreviacao_nao_validada_ignorada() {
        let mut mentions = vec![md(
            false,
            vec![LocationHypothesis::new("us24", "MD", "US").with_admin1("24").admin1_boundary().abbreviation()],
        )];
        MajorPlaceRule::new().evaluate(&mut mentions, &mut DocumentContext::new());
        assert!(mentions[0].rules.is_empty());
        assert!(!mentions[0].filtered_out);
    }

    #[test]
    fn test_abreviacao_sem_provincia_descartada() {
        let mut mentions = vec![md(
            true,
            vec![LocationHypothesis::new("md", "MD", "MD").populated().abbreviation()],
        )];
        MajorPlaceRule::new().evaluate(&mut mentions, &mut DocumentContext::new());
        assert!(mentions[0].filtered_out);
        assert!(mentions[0].has_rule(ABBREVIATION_UNMATCHED));
    }

    #[test]
    fn test_abreviacao_validada_de_provincia() {
        let mut mentions = vec![md(
            true,
            vec![
                LocationHypothesis::new("us24", "MD", "US").with_admin1("24").admin1_boundary().abbreviation(),
                LocationHypothesis::new("x", "Md", "US").populated(),
            ],
        )];
        let mut ctx = DocumentContext::new();
        MajorPlaceRule::new().evaluate(&mut mentions, &mut ctx);
        assert!(!mentions[0].filtered_out);
        assert_eq!(mentions[0].hypotheses[0].score, 1.0);
        assert_eq!(mentions[0].hypotheses[1].score, 0.0);
        assert!(ctx.boundary_observed("US.24"));
    }
}
