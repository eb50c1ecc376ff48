//! # Regra de Países
//!
//! Menções cujo texto é nome ou código de país ("France", "USA") colocam o
//! país em escopo no documento. A hipótese de país ganha pontos e a menção
//! guarda uma evidência de país já aplicada.
//!
//! ## Formas aceitas
//!
//! | Texto         | Hipótese de país                  | Resultado        |
//! |---------------|-----------------------------------|------------------|
//! | `FRA`, `USA`  | código ou nome em maiúsculas      | código (peso 1)  |
//! | `U.S.A.`      | forma abreviada                   | código (peso 1)  |
//! | `France`      | qualquer                          | nome (peso 2)    |
//! | `MA`, `GA`    | qualquer                          | ignorado         |
//! | `al`, `Is`    | qualquer                          | descartado       |
//!
//! Códigos de duas letras coincidem com códigos de província ("MA" é
//! Massachusetts e Marrocos), então não marcam a menção como país; a regra
//! nome + código decide. Códigos curtos fora de maiúsculas são quase sempre
//! palavras comuns e são descartados.

use crate::context::DocumentContext;
use crate::evidence::Evidence;
use crate::mention::NameMention;
use crate::rules::{same_lexical_name, GeocodeRule, COUNTRY_CODE, COUNTRY_NAME, COUNTRY_SHORT_CODE};
use crate::span::TextCase;

const NAME_WEIGHT: f64 = 2.0;
const CODE_WEIGHT: f64 = 1.0;
/// Comprimento exato de um código de país aceito sozinho (ISO alfa-3)
const CODE_LEN: usize = 3;

#[derive(Debug, Default)]
pub struct CountryRule;

impl CountryRule {
    pub fn new() -> Self {
        Self
    }
}

impl GeocodeRule for CountryRule {
    fn name(&self) -> &'static str {
        "country"
    }

    fn evaluate_place(&mut self, mention: &mut NameMention, index: usize, ctx: &mut DocumentContext) {
        if mention.filtered_out || !mention.hypotheses[index].is_country {
            return;
        }

        let len = mention.char_len();
        if len <= CODE_LEN && !mention.span.is_upper() {
            tracing::debug!(text = mention.text(), "código de país curto fora de maiúsculas descartado");
            mention.is_country = false;
            mention.filter_out(COUNTRY_SHORT_CODE);
            return;
        }

        let geo = &mention.hypotheses[index];
        let (rule, weight) = if len == CODE_LEN {
            if !(geo.is_abbreviation || geo.name_case() == TextCase::Upper) {
                return;
            }
            (COUNTRY_CODE, CODE_WEIGHT)
        } else if len > CODE_LEN {
            let code = mention.is_abbreviation() && geo.is_abbreviation;
            same_lexical_name(mention, index);
            if code {
                (COUNTRY_CODE, CODE_WEIGHT)
            } else {
                (COUNTRY_NAME, NAME_WEIGHT)
            }
        } else {
            return;
        };

        let cc = mention.hypotheses[index].country_code.clone();
        mention.is_country = true;
        mention.increment_score(index, weight);
        mention.add_evidence(Evidence::new(rule, weight).in_country(cc.as_str()).evaluated());
        ctx.country_in_scope(&cc);

        tracing::debug!(text = mention.text(), country = %cc, rule, "país em escopo");
    }
}
