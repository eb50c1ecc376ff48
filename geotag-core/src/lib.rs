//! # geotag-core — Resolução de Nomes de Lugar (Geotagging)
//!
//! Este crate decide, para cada nome de lugar encontrado num documento, qual
//! lugar real ele designa. "Boston" pode ser a cidade de Massachusetts, a de
//! Lincolnshire ou uma vila na Geórgia; o contexto do documento decide.
//!
//! ## Arquitetura do Sistema
//!
//! A entrada é um [`Document`] já extraído: menções de lugar com as hipóteses
//! do gazetteer, além de coordenadas e datas. O dado flui assim:
//!
//! 1.  **Sobreposição** ([`overlap`]): trechos duplicados ou engolidos por
//!     trechos maiores são marcados, usando a álgebra de [`span`].
//! 2.  **Filtros** ([`rules`]): texto sem sentido e nomes de pessoa saem.
//! 3.  **Inferência** ([`rules`]): países, pares "Boston, MA", capitais e
//!     províncias alimentam o [`context`] do documento e as [`evidence`]s.
//! 4.  **Escolha** ([`chooser`]): cada menção aberta recebe a hipótese de
//!     maior pontuação e uma [`confidence`] de 0 a 100.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use geotag_core::{Document, GeotagPipeline, LocationHypothesis, NameMention, Span};
//!
//! // 1. Instancia o pipeline (carrega listas de palavras e tabelas)
//! let pipeline = GeotagPipeline::new().expect("recursos embutidos");
//!
//! // 2. Documento com as menções vindas do extrator
//! let text = "I flew into Boston, MA last week.";
//! let mut doc = Document::new("exemplo").with_text(text);
//! doc.mentions = vec![
//!     NameMention::new(
//!         Span::new(12, 18, "Boston"),
//!         vec![
//!             LocationHypothesis::new("ga", "Boston", "US").with_admin1("13").populated(),
//!             LocationHypothesis::new("ma", "Boston", "US").with_admin1("25").populated(),
//!         ],
//!     ),
//!     NameMention::new(
//!         Span::new(20, 22, "MA"),
//!         vec![LocationHypothesis::new("us25", "MA", "US").with_admin1("25").admin1_boundary().abbreviation()],
//!     ),
//! ];
//!
//! // 3. Resolve
//! pipeline.process(&mut doc);
//!
//! // 4. Exibe as escolhas
//! for m in &doc.mentions {
//!     if let Some(place) = m.chosen_place() {
//!         println!("{} -> {} ({}) confiança {}", m.text(), place.id, place.country_code, m.confidence);
//!     }
//! }
//! assert_eq!(doc.mentions[0].chosen_place().map(|p| p.id.as_str()), Some("ma"));
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: Orquestrador que conecta todos os estágios.
//! - [`rules`]: Regras de filtro e inferência.
//! - [`config`]: Parâmetros e caminhos de recursos.

pub mod chooser;
pub mod confidence;
pub mod config;
pub mod context;
pub mod error;
pub mod evidence;
pub mod mention;
pub mod overlap;
pub mod pipeline;
pub mod place;
pub mod rules;
pub mod span;
pub mod text;
pub mod wordlist;

pub use chooser::LocationChooser;
pub use config::GeotagConfig;
pub use context::DocumentContext;
pub use error::{ConfigError, ConfigResult};
pub use evidence::Evidence;
pub use mention::NameMention;
pub use overlap::{MatchKind, OverlapFlags, TextMatch};
pub use pipeline::{Document, DocumentResolver, DocumentSummary, GeotagPipeline, PipelineEvent};
pub use place::{GeoPoint, LocationHypothesis};
pub use rules::GeocodeRule;
pub use span::{Span, TextCase};
