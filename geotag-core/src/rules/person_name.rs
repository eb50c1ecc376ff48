//! # Filtro de Nomes de Pessoa
//!
//! Muitos nomes de lugar também são nomes de gente: "Paris Hilton",
//! "Mr. Jackson", "Washington, Jr.". Este filtro descarta menções que:
//!
//! 1. estão na lista de nomes de pessoa conhecidos;
//! 2. vêm logo depois de um título ("Mr.", "Dr.", "Presidente");
//! 3. vêm logo antes de um sufixo ("Jr.", "III").
//!
//! Uma vez resolvido como pessoa, o mesmo nome é descartado em todo o
//! documento. Menções associadas a um código de província ("Jackson, MS")
//! não são filtradas.

use std::collections::HashSet;
use std::sync::Arc;

use crate::context::DocumentContext;
use crate::mention::NameMention;
use crate::rules::{GeocodeRule, ADMIN_CODE, ADMIN_NAME, PERSON_COREF, PERSON_NAME, PERSON_SUFFIX, PERSON_TITLE};
use crate::text::{following_token, normalize_name, preceding_token};
use crate::wordlist::PersonNameLists;

#[derive(Debug)]
pub struct PersonNameFilter {
    lists: Arc<PersonNameLists>,
    /// Nomes normalizados já resolvidos como pessoa neste documento
    resolved: HashSet<String>,
}

impl PersonNameFilter {
    pub fn new(lists: Arc<PersonNameLists>) -> Self {
        Self {
            lists,
            resolved: HashSet::new(),
        }
    }

    fn classify(&self, mention: &NameMention, norm: &str) -> Option<&'static str> {
        if self.lists.names.contains(norm) {
            return Some(PERSON_NAME);
        }
        if let Some(prev) = preceding_token(&mention.span) {
            if self.lists.titles.contains(&prev) {
                return Some(PERSON_TITLE);
            }
        }
        if let Some(next) = following_token(&mention.span) {
            let bare = next.trim_end_matches('.');
            if self.lists.suffixes.contains(&next) || self.lists.suffixes.contains(bare) {
                return Some(PERSON_SUFFIX);
            }
        }
        None
    }

    fn exempt(mention: &NameMention) -> bool {
        mention.filtered_out
            || mention.chosen.is_some()
            || mention.valid
            || mention.has_any_rule(&[ADMIN_NAME, ADMIN_CODE])
    }
}

impl GeocodeRule for PersonNameFilter {
    fn name(&self) -> &'static str {
        "person_name"
    }

    fn evaluate(&mut self, mentions: &mut [NameMention], _ctx: &mut DocumentContext) {
        // === Passo 1: listas, títulos e sufixos ===
        for mention in mentions.iter_mut() {
            if Self::exempt(mention) {
                continue;
            }
            let norm = normalize_name(mention.text());
            if let Some(rule) = self.classify(mention, &norm) {
                tracing::debug!(text = mention.text(), rule, "menção resolvida como pessoa");
                mention.filter_out(rule);
                self.resolved.insert(norm);
            }
        }

        // === Passo 2: outras menções do mesmo nome ===
        if self.resolved.is_empty() {
            return;
        }
        for mention in mentions.iter_mut() {
            if Self::exempt(mention) {
                continue;
            }
            if self.resolved.contains(&normalize_name(mention.text())) {
                mention.filter_out(PERSON_COREF);
            }
        }
    }

    fn reset(&mut self) {
        self.resolved.clear();
    }
}
