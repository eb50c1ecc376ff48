//! # Contexto do Documento
//!
//! Observadores de escopo geográfico acumulados durante o processamento de
//! um documento:
//!
//! - **Histograma de países**: países mencionados no texto ou inferidos
//!   (ex: uma capital nacional implica o seu país).
//! - **Histograma de fronteiras**: províncias (`PAÍS.ADMIN1`) em escopo.
//!
//! Além dos observadores, o contexto guarda as entradas por documento que
//! algumas regras consomem: coordenadas extraídas e províncias relevantes.
//!
//! Um contexto pertence a um único documento por vez; [`DocumentContext::reset`]
//! é chamado no início de cada documento. Processamento paralelo usa um
//! contexto por worker.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::place::GeoPoint;

/// Contagem de um país no histograma.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryObservation {
    pub count: usize,
    /// Houve ao menos uma menção explícita (não só inferência)
    pub explicit: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentContext {
    countries: HashMap<String, CountryObservation>,
    boundaries: HashMap<String, usize>,
    /// Coordenadas extraídas do documento
    pub coordinates: Vec<GeoPoint>,
    /// Chaves `PAÍS.ADMIN1` marcadas como relevantes para o documento
    pub relevant_provinces: HashSet<String>,
}

impl DocumentContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limpa todo o estado do documento anterior.
    pub fn reset(&mut self) {
        self.countries.clear();
        self.boundaries.clear();
        self.coordinates.clear();
        self.relevant_provinces.clear();
    }

    /// Um país foi mencionado explicitamente no texto.
    pub fn country_in_scope(&mut self, country_code: &str) {
        let obs = self.countries.entry(country_code.to_string()).or_default();
        obs.count += 1;
        obs.explicit = true;
    }

    /// Um país foi inferido (ex: a partir de uma capital).
    pub fn infer_country(&mut self, country_code: &str) {
        self.countries.entry(country_code.to_string()).or_default().count += 1;
    }

    /// Uma província entrou em escopo.
    pub fn boundary_in_scope(&mut self, key: &str) {
        *self.boundaries.entry(key.to_string()).or_insert(0) += 1;
    }

    /// Número de países distintos observados.
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    /// O país está no histograma, mencionado ou inferido.
    pub fn country_observed(&self, country_code: &str) -> bool {
        self.countries.contains_key(country_code)
    }

    /// O país foi mencionado explicitamente ao menos uma vez.
    pub fn country_mentioned(&self, country_code: &str) -> bool {
        self.countries
            .get(country_code)
            .map(|o| o.explicit)
            .unwrap_or(false)
    }

    pub fn country_observation(&self, country_code: &str) -> Option<CountryObservation> {
        self.countries.get(country_code).copied()
    }

    pub fn boundary_observed(&self, key: &str) -> bool {
        self.boundaries.contains_key(key)
    }

    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }
}
