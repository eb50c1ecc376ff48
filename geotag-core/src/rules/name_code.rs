//! # Regra Nome + Código
//!
//! Padrões como "Boston, MA" ou "Springfield, Illinois": um nome de lugar
//! seguido de perto pelo código ou nome da província que o contém. Quando o
//! par é consistente, a província do código é a melhor pista para o nome.
//!
//! ## Condições para o par (nome, código)
//!
//! 1. As menções são vizinhas na lista e o código começa no máximo
//!    `max_distance` bytes depois do fim do nome.
//! 2. O código não é um país e não é um código curto em minúsculas.
//! 3. Concordância léxica: código abreviado ("MA") só combina com hipóteses
//!    abreviadas, nome por extenso só com nomes por extenso.
//! 4. Contenção: o nome já tem alguma hipótese dentro da província do código.
//!
//! ## Pontuação
//!
//! Peso base 3, +2 com vírgula entre nome e código, +1 quando o código
//! abreviado casa com a forma abreviada da província ("MA" → Massachusetts).
//! Esse casamento registra `admin_code`; com o nome por extenso da província
//! registra `admin_name`. Hipóteses do nome na mesma província recebem o
//! peso inteiro; hipóteses só no mesmo país recebem um peso menor.
//!
//! ## Revisão final
//!
//! Depois dos pares, menções sem evidência e não validadas passam por uma
//! revisão de nomes curtos:
//!
//! - até 2 caracteres (1 fora de ASCII): descartadas;
//! - caixa mista curta ("Colo", "Ma") com leitura abreviada: descartadas;
//! - siglas soltas ("MD"): descartadas, exceto apelidos de cidade ("NYC"),
//!   que ganham +1 na hipótese povoada abreviada.

use std::collections::HashSet;

use crate::context::DocumentContext;
use crate::evidence::Evidence;
use crate::mention::NameMention;
use crate::rules::{
    GeocodeRule, ADMIN_CODE, ADMIN_NAME, CITY_NICKNAME, NAME_SHORT_MIXED_CASE, NAME_TOO_SHORT,
};
use crate::text::normalize_name;

const BASE_WEIGHT: f64 = 3.0;
const COMMA_BONUS: f64 = 2.0;
const ABBREVIATION_BONUS: f64 = 1.0;
const SAME_COUNTRY_WEIGHT: f64 = 1.0;
/// Máximo de províncias associadas a um mesmo par
const MAX_MATCHES: usize = 4;
/// Caixa mista até este comprimento é tratada como possível abreviação
const ABBREVIATION_MAX_LEN: usize = 5;
/// Siglas até este comprimento são revisadas
const AVG_WORD_LEN: usize = 8;
const CITY_NICKNAME_WEIGHT: f64 = 1.0;

#[derive(Debug)]
pub struct NameCodeRule {
    max_distance: usize,
    /// Códigos já descartados neste documento (sem nenhuma leitura administrativa)
    ignored_codes: HashSet<String>,
}

impl Default for NameCodeRule {
    fn default() -> Self {
        Self::new(4)
    }
}

impl NameCodeRule {
    pub fn new(max_distance: usize) -> Self {
        Self {
            max_distance,
            ignored_codes: HashSet::new(),
        }
    }

    /// Avalia o par e devolve quantas províncias foram associadas.
    fn evaluate_pair(&mut self, name: &mut NameMention, code: &mut NameMention, ctx: &mut DocumentContext) -> usize {
        if code.span.start < name.span.end {
            return 0;
        }
        let gap = code.span.start - name.span.end;
        if gap > self.max_distance || code.is_country {
            return 0;
        }
        if code.span.is_lower() && code.text().chars().count() < 4 {
            return 0;
        }

        let code_norm = normalize_name(code.text());
        if self.ignored_codes.contains(&code_norm) {
            return 0;
        }

        // === Passo 1: texto entre nome e código ===
        let comma = name
            .span
            .context_after
            .as_deref()
            .and_then(|after| after.get(..gap))
            .map(|between| between.contains(','))
            .unwrap_or(false);

        let code_abbrev = code.is_abbreviation();
        let code_short = code.is_short_name();
        let mut base = BASE_WEIGHT;
        if comma {
            base += COMMA_BONUS;
        }

        // === Passo 2: hipóteses do código que descrevem uma província ===
        let mut matched = 0;
        for ci in 0..code.hypotheses.len() {
            let geo = code.hypotheses[ci].clone();
            if geo.is_country || !geo.is_administrative {
                continue;
            }
            let Some(key) = geo.hierarchical_key() else {
                continue;
            };
            if code_abbrev != geo.is_abbreviation {
                continue;
            }
            let contained = name
                .hypotheses
                .iter()
                .any(|h| h.hierarchical_key().as_deref() == Some(key.as_str()));
            if !contained {
                continue;
            }

            // === Passo 3: pontuação do nome e do código ===
            let (rule, weight) = if geo.is_abbreviation && code_short {
                (ADMIN_CODE, base + ABBREVIATION_BONUS)
            } else {
                (ADMIN_NAME, base)
            };
            for h in name.hypotheses.iter_mut() {
                if h.hierarchical_key().as_deref() == Some(key.as_str()) {
                    h.score += weight;
                } else if h.country_code == geo.country_code {
                    h.score += SAME_COUNTRY_WEIGHT;
                }
            }
            let evidence = Evidence::from_place(rule, weight, &geo).evaluated();
            name.add_evidence(evidence.clone());

            code.increment_score(ci, weight);
            code.add_evidence(evidence);
            ctx.boundary_in_scope(&key);

            tracing::debug!(name = name.text(), code = code.text(), province = %key, rule, weight, "nome + código");

            matched += 1;
            if matched >= MAX_MATCHES {
                break;
            }
        }

        if matched > 0 {
            name.mark_valid();
            code.mark_valid();
        } else if code_abbrev && !code.hypotheses.iter().any(|h| h.is_administrative) {
            self.ignored_codes.insert(code_norm);
        }
        matched
    }

    /// Revisão de nomes curtos sem nenhuma evidência.
    fn review(mentions: &mut [NameMention]) {
        for mention in mentions.iter_mut() {
            if mention.filtered_out || mention.chosen.is_some() || !mention.evidence.is_empty() {
                continue;
            }
            let len = mention.char_len();

            if !mention.valid {
                let allowed = if mention.span.is_ascii { 2 } else { 1 };
                if len <= allowed {
                    mention.filter_out(NAME_TOO_SHORT);
                    continue;
                }
            }

            if mention.span.is_mixed_case() && len <= ABBREVIATION_MAX_LEN {
                if mention.hypotheses.iter().any(|h| h.is_abbreviation) {
                    mention.filter_out(NAME_SHORT_MIXED_CASE);
                }
            } else if !mention.is_country && !mention.valid && mention.is_short_name() && len <= AVG_WORD_LEN {
                let nickname = mention
                    .hypotheses
                    .iter()
                    .position(|h| h.is_populated && h.is_abbreviation);
                match nickname {
                    Some(i) => {
                        mention.increment_score(i, CITY_NICKNAME_WEIGHT);
                        mention.add_rule(CITY_NICKNAME);
                    }
                    None => mention.filter_out(NAME_TOO_SHORT),
                }
            }
        }
    }
}

impl GeocodeRule for NameCodeRule {
    fn name(&self) -> &'static str {
        "name_code"
    }

    fn evaluate(&mut self, mentions: &mut [NameMention], ctx: &mut DocumentContext) {
        for x in 1..mentions.len() {
            let (left, right) = mentions.split_at_mut(x);
            let name = &mut left[x - 1];
            let code = &mut right[0];

            let skip = |m: &NameMention| (m.filtered_out && !m.valid) || m.chosen.is_some();
            if skip(&*name) || skip(&*code) {
                continue;
            }
            self.evaluate_pair(name, code, ctx);
        }

        Self::review(mentions);
    }

    fn reset(&mut self) {
        self.ignored_codes.clear();
    }
}
