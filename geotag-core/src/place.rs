//! # Hipóteses de Localização
//!
//! Uma [`LocationHypothesis`] é um lugar candidato do gazetteer para uma
//! menção: "Boston" pode ser Boston (MA, EUA), Boston (GA, EUA) ou Boston
//! (Lincolnshire, Reino Unido). Cada hipótese carrega seus atributos
//! geográficos e uma pontuação acumulada, própria da menção onde aparece.

use serde::{Deserialize, Serialize};

use crate::span::TextCase;

/// Ponto geográfico em graus decimais (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Distância de grande círculo (haversine) em metros.
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_008.8;
        let (phi1, phi2) = (self.lat.to_radians(), other.lat.to_radians());
        let dphi = (other.lat - self.lat).to_radians();
        let dlambda = (other.lon - self.lon).to_radians();
        let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

/// Um lugar candidato para uma menção.
///
/// # Exemplo
/// ```rust
/// use geotag_core::LocationHypothesis;
///
/// let ma = LocationHypothesis::new("4930956", "Boston", "US")
///     .with_admin1("25")
///     .populated();
/// assert_eq!(ma.hierarchical_key().as_deref(), Some("US.25"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationHypothesis {
    /// Identificador do lugar no gazetteer
    pub id: String,
    /// Nome do lugar como está no gazetteer
    pub name: String,
    /// Código ISO do país (ex: "US", "BR")
    pub country_code: String,
    /// Código da província/estado (admin1), se conhecido
    #[serde(default)]
    pub admin1: Option<String>,
    /// Código de segundo nível (condado, município), se conhecido
    #[serde(default)]
    pub admin2: Option<String>,
    #[serde(default)]
    pub is_country: bool,
    /// Fronteira de primeiro nível (estado, província)
    #[serde(default)]
    pub is_admin1: bool,
    /// Qualquer fronteira administrativa (inclui admin1)
    #[serde(default)]
    pub is_administrative: bool,
    /// Cidade, vila ou outro lugar povoado
    #[serde(default)]
    pub is_populated: bool,
    #[serde(default)]
    pub is_national_capital: bool,
    /// O nome é uma forma abreviada ("MA", "Mass.")
    #[serde(default)]
    pub is_abbreviation: bool,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Pontuação acumulada dentro da menção
    #[serde(default)]
    pub score: f64,
    /// Nome da província, preenchido na etapa final de anotação
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_name: Option<String>,
}

impl LocationHypothesis {
    pub fn new(id: impl Into<String>, name: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country_code: country_code.into(),
            admin1: None,
            admin2: None,
            is_country: false,
            is_admin1: false,
            is_administrative: false,
            is_populated: false,
            is_national_capital: false,
            is_abbreviation: false,
            location: None,
            score: 0.0,
            province_name: None,
        }
    }

    pub fn with_admin1(mut self, admin1: impl Into<String>) -> Self {
        self.admin1 = Some(admin1.into());
        self
    }

    pub fn with_admin2(mut self, admin2: impl Into<String>) -> Self {
        self.admin2 = Some(admin2.into());
        self
    }

    pub fn country(mut self) -> Self {
        self.is_country = true;
        self.is_administrative = true;
        self
    }

    pub fn admin1_boundary(mut self) -> Self {
        self.is_admin1 = true;
        self.is_administrative = true;
        self
    }

    pub fn populated(mut self) -> Self {
        self.is_populated = true;
        self
    }

    pub fn capital(mut self) -> Self {
        self.is_national_capital = true;
        self.is_populated = true;
        self
    }

    pub fn abbreviation(mut self) -> Self {
        self.is_abbreviation = true;
        self
    }

    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.location = Some(GeoPoint::new(lat, lon));
        self
    }

    /// Chave hierárquica `PAÍS.ADMIN1` (ex: "US.25"); `None` sem admin1.
    pub fn hierarchical_key(&self) -> Option<String> {
        hierarchical_key(&self.country_code, self.admin1.as_deref())
    }

    /// Formato de caixa do nome no gazetteer.
    pub fn name_case(&self) -> TextCase {
        TextCase::of(&self.name)
    }

    /// Duas hipóteses representam o mesmo lugar: mesmo id, ou mesmo nome
    /// dentro da mesma província e país.
    pub fn is_same_place(&self, other: &LocationHypothesis) -> bool {
        if self.id == other.id {
            return true;
        }
        self.name.eq_ignore_ascii_case(&other.name)
            && self.country_code == other.country_code
            && self.admin1 == other.admin1
    }
}

/// Monta a chave hierárquica a partir de país e admin1.
pub fn hierarchical_key(country_code: &str, admin1: Option<&str>) -> Option<String> {
    admin1.map(|a| format!("{}.{}", country_code, a))
}
