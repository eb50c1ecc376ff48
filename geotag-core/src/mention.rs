//! # Menções de Nomes de Lugar
//!
//! Uma [`NameMention`] é um trecho do documento que pode ser um lugar, com a
//! lista de hipóteses vindas do gazetteer. As regras acumulam pontuação e
//! evidências; o escolhedor seleciona a hipótese vencedora (`chosen`) e a
//! segunda colocada, e atribui a confiança.
//!
//! `chosen` e `second_choice` são índices em `hypotheses`, então a escolha é
//! sempre uma das hipóteses da própria menção.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::evidence::Evidence;
use crate::overlap::{Extracted, OverlapFlags};
use crate::place::LocationHypothesis;
use crate::span::Span;
use crate::text::looks_like_abbreviation;

/// Comprimento máximo, em caracteres, de uma forma abreviada tratada como código.
pub const SHORT_NAME_LEN: usize = 6;

/// Uma menção candidata a lugar e o estado da sua resolução.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameMention {
    pub span: Span,
    pub hypotheses: Vec<LocationHypothesis>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
    /// Regras que dispararam para esta menção, em ordem alfabética
    #[serde(default)]
    pub rules: BTreeSet<String>,
    /// Descartada por um filtro (nome de pessoa, texto sem sentido, ...)
    #[serde(default)]
    pub filtered_out: bool,
    /// Validada por uma regra forte; protege contra filtros posteriores
    #[serde(default)]
    pub valid: bool,
    /// O texto foi reconhecido como nome ou código de país
    #[serde(default)]
    pub is_country: bool,
    #[serde(default)]
    pub flags: OverlapFlags,
    #[serde(default)]
    pub chosen: Option<usize>,
    #[serde(default)]
    pub second_choice: Option<usize>,
    #[serde(default)]
    pub second_choice_score: f64,
    /// Confiança de 0 a 100 na escolha
    #[serde(default)]
    pub confidence: i32,
}

impl NameMention {
    pub fn new(span: Span, hypotheses: Vec<LocationHypothesis>) -> Self {
        Self {
            span,
            hypotheses,
            evidence: Vec::new(),
            rules: BTreeSet::new(),
            filtered_out: false,
            valid: false,
            is_country: false,
            flags: OverlapFlags::default(),
            chosen: None,
            second_choice: None,
            second_choice_score: 0.0,
            confidence: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.span.text
    }

    /// O texto da menção tem forma abreviada ("MA", "U.S.").
    pub fn is_abbreviation(&self) -> bool {
        looks_like_abbreviation(&self.span.text)
    }

    /// Forma abreviada curta o bastante para ser um código ("MA", "Mass.").
    pub fn is_short_name(&self) -> bool {
        self.is_abbreviation() && self.char_len() <= SHORT_NAME_LEN
    }

    /// Comprimento do texto em caracteres.
    pub fn char_len(&self) -> usize {
        self.span.text.chars().count()
    }

    /// Ainda aguarda decisão: não filtrada e sem escolha.
    pub fn is_open(&self) -> bool {
        !self.filtered_out && self.chosen.is_none()
    }

    pub fn add_rule(&mut self, rule: &str) {
        self.rules.insert(rule.to_string());
    }

    pub fn has_rule(&self, rule: &str) -> bool {
        self.rules.contains(rule)
    }

    pub fn has_any_rule(&self, rules: &[&str]) -> bool {
        rules.iter().any(|r| self.has_rule(r))
    }

    /// Registra uma evidência e a regra que a produziu.
    pub fn add_evidence(&mut self, evidence: Evidence) {
        self.add_rule(&evidence.rule);
        self.evidence.push(evidence);
    }

    /// Soma `weight` à pontuação da hipótese `index`.
    pub fn increment_score(&mut self, index: usize, weight: f64) {
        if let Some(h) = self.hypotheses.get_mut(index) {
            h.score += weight;
        }
    }

    /// Descarta a menção, registrando o filtro responsável.
    pub fn filter_out(&mut self, rule: &str) {
        self.filtered_out = true;
        self.add_rule(rule);
    }

    pub fn mark_valid(&mut self) {
        self.valid = true;
    }

    pub fn chosen_place(&self) -> Option<&LocationHypothesis> {
        self.chosen.and_then(|i| self.hypotheses.get(i))
    }

    pub fn second_place(&self) -> Option<&LocationHypothesis> {
        self.second_choice.and_then(|i| self.hypotheses.get(i))
    }

    /// Número de países distintos entre as hipóteses.
    pub fn distinct_countries(&self) -> usize {
        self.hypotheses
            .iter()
            .map(|h| h.country_code.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Seleciona a hipótese de maior pontuação e registra a segunda colocada.
    ///
    /// Empates são desfeitos pela posição na lista (a primeira vence), então
    /// a escolha é determinística. Sem hipóteses, nada é escolhido.
    pub fn choose(&mut self) {
        let mut order: Vec<usize> = (0..self.hypotheses.len()).collect();
        order.sort_by(|&a, &b| {
            self.hypotheses[b]
                .score
                .total_cmp(&self.hypotheses[a].score)
                .then_with(|| a.cmp(&b))
        });

        self.chosen = order.first().copied();
        self.second_choice = order.get(1).copied();
        self.second_choice_score = self
            .second_choice
            .map(|i| self.hypotheses[i].score)
            .unwrap_or(0.0);
    }

    /// A escolha não supera estritamente a segunda colocada.
    pub fn is_ambiguous(&self) -> bool {
        match (self.chosen_place(), self.second_place()) {
            (Some(top), Some(_)) => top.score <= self.second_choice_score,
            _ => false,
        }
    }
}

impl Extracted for NameMention {
    fn span(&self) -> &Span {
        &self.span
    }

    fn flags_mut(&mut self) -> &mut OverlapFlags {
        &mut self.flags
    }
}
