//! # Filtro de Texto Sem Sentido
//!
//! O extrator de nomes às vezes casa trechos que atravessam pontuação ou
//! repetem sílabas:
//!
//! ```text
//! doo doo       - FALHA (palavra repetida em minúsculas)
//! St. Paul      - PASSA (abreviação regular)
//! south"  bend  - FALHA (pontuação irregular)
//! ```
//!
//! Só menções curtas (até `max_len` caracteres) são examinadas.

use regex::Regex;

use crate::context::DocumentContext;
use crate::error::ConfigResult;
use crate::mention::NameMention;
use crate::rules::{GeocodeRule, NONSENSE_PUNCT, NONSENSE_REPEATED};
use crate::text::normalize_name;

/// Pontuação irregular a partir da qual a menção é descartada.
const IRREGULAR_LIMIT: usize = 2;

#[derive(Debug, Clone)]
pub struct NonsenseFilter {
    max_len: usize,
    /// Abreviação regular: palavra, ponto, um espaço, palavra ("St. Paul")
    valid_abbrev: Regex,
}

impl NonsenseFilter {
    pub fn new(max_len: usize) -> ConfigResult<Self> {
        Ok(Self {
            max_len,
            valid_abbrev: Regex::new(r"\w+\.[ \n]\w+")?,
        })
    }

    /// Conta pontuação ou espaço logo depois de um caractere não alfanumérico,
    /// descontando as abreviações regulares.
    pub fn irregular_punctuation(&self, text: &str) -> usize {
        let mut irregular: usize = 0;
        let mut prev: Option<char> = None;
        for c in text.chars() {
            if let Some(p) = prev {
                if !c.is_alphanumeric() && !p.is_alphanumeric() {
                    irregular += 1;
                }
            }
            prev = Some(c);
        }
        irregular.saturating_sub(self.valid_abbrev.find_iter(text).count())
    }

    /// Alguma palavra se repete ("doo doo", "ha ha").
    pub fn has_repeated_token(text: &str) -> bool {
        let norm = normalize_name(text);
        let mut seen = std::collections::HashSet::new();
        norm.split(' ').filter(|w| !w.is_empty()).any(|w| !seen.insert(w))
    }
}

impl GeocodeRule for NonsenseFilter {
    fn name(&self) -> &'static str {
        "nonsense"
    }

    fn evaluate(&mut self, mentions: &mut [NameMention], _ctx: &mut DocumentContext) {
        for mention in mentions.iter_mut() {
            if mention.valid || mention.filtered_out || mention.chosen.is_some() {
                continue;
            }
            let text = mention.text();
            if text.chars().count() > self.max_len {
                continue;
            }

            let rule = if self.irregular_punctuation(text) >= IRREGULAR_LIMIT {
                NONSENSE_PUNCT
            } else if mention.span.is_lower() && Self::has_repeated_token(text) {
                NONSENSE_REPEATED
            } else {
                continue;
            };
            tracing::debug!(text, rule, "menção sem sentido descartada");
            mention.filter_out(rule);
        }
    }
}
