//! # Escolhedor de Localização
//!
//! Última regra de pontuação. Para cada menção ainda aberta:
//!
//! 1. **Contexto do documento**: hipóteses numa província em escopo ganham
//!    +3; senão, hipóteses num país em escopo ganham +2.
//! 2. **Evidências pendentes**: cada evidência ainda não avaliada é aplicada
//!    como o contexto: +3 nas hipóteses da mesma província, senão +2 nas do
//!    mesmo país. Depois é marcada como avaliada. Regras que já somaram o
//!    próprio peso registram a evidência como avaliada.
//! 3. **Escolha**: a hipótese de maior pontuação vira `chosen`, a seguinte
//!    vira `second_choice`, e a confiança é calculada.
//!
//! Menções filtradas nunca recebem escolha.

use crate::confidence::assess_confidence;
use crate::context::DocumentContext;
use crate::mention::NameMention;
use crate::rules::GeocodeRule;

pub const PROVINCE_IN_SCOPE_WEIGHT: f64 = 3.0;
pub const COUNTRY_IN_SCOPE_WEIGHT: f64 = 2.0;

#[derive(Debug, Default)]
pub struct LocationChooser;

impl LocationChooser {
    pub fn new() -> Self {
        Self
    }

    /// Bônus de escopo do documento para cada hipótese.
    fn score_context(mention: &mut NameMention, ctx: &DocumentContext) {
        for h in mention.hypotheses.iter_mut() {
            let in_province = h
                .hierarchical_key()
                .map(|k| ctx.boundary_observed(&k))
                .unwrap_or(false);
            if in_province {
                h.score += PROVINCE_IN_SCOPE_WEIGHT;
            } else if ctx.country_observed(&h.country_code) {
                h.score += COUNTRY_IN_SCOPE_WEIGHT;
            }
        }
    }

    /// Aplica as evidências ainda não avaliadas, uma única vez.
    fn apply_pending_evidence(mention: &mut NameMention) {
        let NameMention {
            evidence, hypotheses, ..
        } = mention;
        for ev in evidence.iter_mut().filter(|e| !e.evaluated) {
            for h in hypotheses.iter_mut() {
                if ev.matches_province(h) {
                    h.score += PROVINCE_IN_SCOPE_WEIGHT;
                } else if ev.matches_country(h) {
                    h.score += COUNTRY_IN_SCOPE_WEIGHT;
                }
            }
            ev.evaluated = true;
        }
    }
}

impl GeocodeRule for LocationChooser {
    fn name(&self) -> &'static str {
        "chooser"
    }

    fn evaluate(&mut self, mentions: &mut [NameMention], ctx: &mut DocumentContext) {
        for mention in mentions.iter_mut() {
            if !mention.is_open() || mention.hypotheses.is_empty() {
                continue;
            }

            Self::score_context(mention, ctx);
            Self::apply_pending_evidence(mention);
            mention.choose();
            mention.confidence = assess_confidence(mention, ctx);

            if let Some(place) = mention.chosen_place() {
                tracing::debug!(
                    text = mention.text(),
                    place = %place.id,
                    country = %place.country_code,
                    score = place.score,
                    confidence = mention.confidence,
                    "lugar escolhido"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::Evidence;
    use crate::place::LocationHypothesis;
    use crate::span::Span;

    fn springfield() -> NameMention {
        NameMention::new(
            Span::new(0, 11, "Springfield"),
            vec![
                LocationHypothesis::new("il", "Springfield", "US").with_admin1("17").populated(),
                LocationHypothesis::new("ma", "Springfield", "US").with_admin1("25").populated(),
                LocationHypothesis::new("au", "Springfield", "AU").with_admin1("04").populated(),
            ],
        )
    }

    #[test]
    fn test_provincia_em_escopo_vence() {
        let mut mentions = vec![springfield()];
        let mut ctx = DocumentContext::new();
        ctx.country_in_scope("US");
        ctx.boundary_in_scope("US.25");
        LocationChooser::new().evaluate(&mut mentions, &mut ctx);

        let m = &mentions[0];
        assert_eq!(m.chosen_place().map(|p| p.id.as_str()), Some("ma"));
        assert_eq!(m.second_place().map(|p| p.id.as_str()), Some("il"));
        assert_eq!(m.hypotheses[1].score, PROVINCE_IN_SCOPE_WEIGHT);
        assert_eq!(m.hypotheses[0].score, COUNTRY_IN_SCOPE_WEIGHT);
        assert_eq!(m.hypotheses[2].score, 0.0);
        assert!(m.confidence > 0);
    }

    #[test]
    fn test_evidencia_aplicada_uma_vez() {
        let mut m = springfield();
        m.add_evidence(Evidence::new("teste", 7.0).in_country("AU"));
        let mut mentions = vec![m];
        let mut ctx = DocumentContext::new();
        LocationChooser::new().evaluate(&mut mentions, &mut ctx);

        let m = &mentions[0];
        assert_eq!(m.chosen_place().map(|p| p.id.as_str()), Some("au"));
        assert!(m.evidence.iter().all(|e| e.evaluated));
        // Só país: +2, independente do peso da evidência
        assert_eq!(m.hypotheses[2].score, 2.0);

        // Reaplicar não soma de novo
        let mut again = m.clone();
        LocationChooser::apply_pending_evidence(&mut again);
        assert_eq!(again.hypotheses[2].score, 2.0);
    }

    #[test]
    fn test_evidencia_de_provincia_pendente() {
        let mut m = springfield();
        let il = m.hypotheses[0].clone();
        m.add_evidence(Evidence::from_place("teste", 0.5, &il));
        LocationChooser::apply_pending_evidence(&mut m);

        assert_eq!(m.hypotheses[0].score, 3.0);
        assert_eq!(m.hypotheses[1].score, 2.0, "mesmo país, outra província");
        assert_eq!(m.hypotheses[2].score, 0.0);
    }

    #[test]
    fn test_evidencia_avaliada_ignorada() {
        let mut m = springfield();
        m.add_evidence(Evidence::new("teste", 2.0).in_country("US").evaluated());
        LocationChooser::apply_pending_evidence(&mut m);
        assert!(m.hypotheses.iter().all(|h| h.score == 0.0));
    }

    #[test]
    fn test_filtradas_nunca_escolhidas() {
        let mut m = springfield();
        m.filter_out("person_name");
        let mut mentions = vec![m];
        LocationChooser::new().evaluate(&mut mentions, &mut DocumentContext::new());
        assert!(mentions[0].chosen.is_none());
        assert_eq!(mentions[0].confidence, 0);
    }
}
