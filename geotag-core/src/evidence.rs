//! # Evidências
//!
//! Uma [`Evidence`] é uma afirmação produzida por uma regra: "esta menção
//! provavelmente fica no país X" ou "na província X.Y", com um peso. O
//! escolhedor aplica evidências ainda não avaliadas às hipóteses que
//! combinam com elas e depois as marca como avaliadas, para nunca contar
//! a mesma evidência duas vezes.

use serde::{Deserialize, Serialize};

use crate::place::{hierarchical_key, LocationHypothesis};

/// Uma evidência geográfica ligada a uma menção.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Nome da regra que produziu a evidência (ex: "admin_code")
    pub rule: String,
    pub weight: f64,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub admin1: Option<String>,
    /// Já foi aplicada à pontuação das hipóteses
    #[serde(default)]
    pub evaluated: bool,
}

impl Evidence {
    pub fn new(rule: impl Into<String>, weight: f64) -> Self {
        Self {
            rule: rule.into(),
            weight,
            country_code: None,
            admin1: None,
            evaluated: false,
        }
    }

    /// Evidência com a geografia de uma hipótese (país e admin1).
    pub fn from_place(rule: impl Into<String>, weight: f64, place: &LocationHypothesis) -> Self {
        Self {
            country_code: Some(place.country_code.clone()),
            admin1: place.admin1.clone(),
            ..Self::new(rule, weight)
        }
    }

    pub fn in_country(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    pub fn evaluated(mut self) -> Self {
        self.evaluated = true;
        self
    }

    pub fn hierarchical_key(&self) -> Option<String> {
        let cc = self.country_code.as_deref()?;
        hierarchical_key(cc, self.admin1.as_deref())
    }

    /// A evidência aponta para a mesma província da hipótese.
    pub fn matches_province(&self, place: &LocationHypothesis) -> bool {
        match (self.hierarchical_key(), place.hierarchical_key()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// A evidência aponta para o mesmo país da hipótese.
    pub fn matches_country(&self, place: &LocationHypothesis) -> bool {
        self.country_code.as_deref() == Some(place.country_code.as_str())
    }
}
