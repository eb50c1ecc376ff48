//! # Pipeline de Geotagging: Orquestrador com Eventos Observáveis
//!
//! O pipeline recebe um [`Document`] já extraído (menções de lugar com suas
//! hipóteses, coordenadas, datas) e resolve cada menção para um lugar:
//!
//! 1. Reinicia o contexto e as regras do documento anterior.
//! 2. Resolve sobreposições entre todos os trechos extraídos.
//! 3. Anexa janelas de contexto às menções (quando há texto).
//! 4. Filtra ruído: texto sem sentido.
//! 5. Infere escopo: países, pares nome + código, nomes de pessoa,
//!    lugares importantes, províncias relevantes, coordenadas.
//! 6. Escolhe o lugar de cada menção aberta e calcula a confiança.
//! 7. Anota o nome da província da escolha.
//!
//! Cada passo pode emitir [`PipelineEvent`]s por um canal `mpsc`, como no
//! modo streaming do reconhecedor de entidades.
//!
//! ## Concorrência
//!
//! Um [`DocumentResolver`] (regras + contexto) processa um documento por vez.
//! [`GeotagPipeline::process_batch`] cria um resolver por worker do `rayon`.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::chooser::LocationChooser;
use crate::config::GeotagConfig;
use crate::context::DocumentContext;
use crate::error::ConfigResult;
use crate::mention::NameMention;
use crate::overlap::{classify_overlaps, MatchKind, TextMatch};
use crate::place::GeoPoint;
use crate::rules::{
    CoordinateRule, CountryRule, GeocodeRule, MajorPlaceRule, NameCodeRule, NonsenseFilter, PersonNameFilter,
    ProvinceNameSetter, ProvinceRelevanceRule,
};
use crate::span::Span;
use crate::text::attach_context;
use crate::wordlist::{PersonNameLists, ProvinceNames};

/// Regra registrada quando uma menção é engolida por outro trecho.
pub const OVERLAP_SUPERSEDED: &str = "overlap_superseded";

/// Um documento com tudo que os extratores encontraram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    /// Texto completo; sem ele as regras de título e vírgula ficam inertes
    #[serde(default)]
    pub text: Option<String>,
    pub mentions: Vec<NameMention>,
    /// Coordenadas, datas e outros trechos
    #[serde(default)]
    pub matches: Vec<TextMatch>,
    /// Províncias (`PAÍS.ADMIN1`) relevantes para este documento
    #[serde(default)]
    pub relevant_provinces: HashSet<String>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Resumo de um documento processado.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub mentions: usize,
    pub chosen: usize,
    pub filtered: usize,
    pub failed_rules: usize,
    pub processing_ms: u64,
}

/// Eventos emitidos durante o processamento de um documento.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 2**: Sobreposições resolvidas entre menções e outros trechos.
    OverlapsResolved {
        duplicates: usize,
        submatches: usize,
        overlaps: usize,
    },
    /// Uma regra terminou. `failed` indica que a regra entrou em pânico e foi isolada.
    RuleApplied {
        rule: String,
        filtered: usize,
        failed: bool,
    },
    /// Uma menção foi descartada.
    MentionFiltered {
        index: usize,
        text: String,
        rules: Vec<String>,
    },
    /// Uma menção foi resolvida para um lugar.
    PlaceChosen {
        index: usize,
        text: String,
        place_id: String,
        country_code: String,
        province: Option<String>,
        score: f64,
        confidence: i32,
    },
    /// **Conclusão**: documento processado.
    Done { document_id: String, summary: DocumentSummary },
}

/// Envia um evento, se houver canal. Receptor fechado não é erro.
fn emit(tx: Option<&mpsc::Sender<PipelineEvent>>, event: PipelineEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(event);
    }
}

/// Regras e contexto de um único worker.
pub struct DocumentResolver {
    rules: Vec<Box<dyn GeocodeRule>>,
    finishers: Vec<Box<dyn GeocodeRule>>,
    ctx: DocumentContext,
    context_window: usize,
}

impl DocumentResolver {
    /// Adiciona uma regra de pontuação, executada depois das regras padrão e
    /// antes da escolha.
    pub fn add_rule(&mut self, rule: Box<dyn GeocodeRule>) {
        self.rules.push(rule);
    }

    pub fn context(&self) -> &DocumentContext {
        &self.ctx
    }

    pub fn process(&mut self, doc: &mut Document) -> DocumentSummary {
        self.process_with_events(doc, None)
    }

    /// Processa o documento, emitindo eventos se `tx` for dado.
    pub fn process_with_events(
        &mut self,
        doc: &mut Document,
        tx: Option<&mpsc::Sender<PipelineEvent>>,
    ) -> DocumentSummary {
        let start = Instant::now();

        // === Passo 1: estado limpo ===
        self.ctx.reset();
        for rule in self.rules.iter_mut().chain(self.finishers.iter_mut()) {
            rule.reset();
        }

        // === Passo 2: sobreposição ===
        doc.mentions.sort_by(|a, b| a.span.cmp(&b.span));
        let (duplicates, submatches, overlaps) = resolve_document_overlaps(doc);
        emit(tx, PipelineEvent::OverlapsResolved { duplicates, submatches, overlaps });

        // === Passo 3: contexto textual e entradas do documento ===
        if let Some(text) = doc.text.as_deref() {
            for mention in doc.mentions.iter_mut() {
                attach_context(text, &mut mention.span, self.context_window);
            }
        }
        self.ctx.coordinates = doc
            .matches
            .iter()
            .filter(|m| !m.flags.is_superseded())
            .filter_map(|m| match m.kind {
                MatchKind::Coordinate { lat, lon } => Some(GeoPoint::new(lat, lon)),
                _ => None,
            })
            .collect();
        self.ctx.relevant_provinces = doc.relevant_provinces.clone();

        // === Passos 4 a 7: regras, escolha, anotação ===
        let mut failed_rules = 0;
        for rule in self.rules.iter_mut().chain(self.finishers.iter_mut()) {
            let before = count_filtered(&doc.mentions);
            let ok = run_isolated(rule.as_mut(), &mut doc.mentions, &mut self.ctx);
            if !ok {
                failed_rules += 1;
            }
            emit(
                tx,
                PipelineEvent::RuleApplied {
                    rule: rule.name().to_string(),
                    filtered: count_filtered(&doc.mentions).saturating_sub(before),
                    failed: !ok,
                },
            );
        }

        for (index, mention) in doc.mentions.iter().enumerate() {
            if mention.filtered_out {
                emit(
                    tx,
                    PipelineEvent::MentionFiltered {
                        index,
                        text: mention.text().to_string(),
                        rules: mention.rules.iter().cloned().collect(),
                    },
                );
            } else if let Some(place) = mention.chosen_place() {
                emit(
                    tx,
                    PipelineEvent::PlaceChosen {
                        index,
                        text: mention.text().to_string(),
                        place_id: place.id.clone(),
                        country_code: place.country_code.clone(),
                        province: place.province_name.clone(),
                        score: place.score,
                        confidence: mention.confidence,
                    },
                );
            }
        }

        let summary = DocumentSummary {
            mentions: doc.mentions.len(),
            chosen: doc.mentions.iter().filter(|m| m.chosen.is_some()).count(),
            filtered: count_filtered(&doc.mentions),
            failed_rules,
            processing_ms: start.elapsed().as_millis() as u64,
        };
        tracing::info!(
            document = %doc.id,
            mentions = summary.mentions,
            chosen = summary.chosen,
            filtered = summary.filtered,
            countries = self.ctx.country_count(),
            "documento processado"
        );
        emit(
            tx,
            PipelineEvent::Done {
                document_id: doc.id.clone(),
                summary: summary.clone(),
            },
        );
        summary
    }
}

fn count_filtered(mentions: &[NameMention]) -> usize {
    mentions.iter().filter(|m| m.filtered_out).count()
}

/// Executa uma regra isolando pânicos: uma regra com defeito não derruba o
/// documento. Retorna `false` se a regra falhou.
fn run_isolated(rule: &mut dyn GeocodeRule, mentions: &mut [NameMention], ctx: &mut DocumentContext) -> bool {
    let name = rule.name();
    let result = panic::catch_unwind(AssertUnwindSafe(|| rule.evaluate(mentions, ctx)));
    match result {
        Ok(()) => true,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            tracing::error!(rule = name, %message, "regra falhou; seguindo com as demais");
            false
        }
    }
}

/// Marca sobreposições entre menções e outros trechos e descarta menções
/// duplicadas ou contidas em trechos maiores.
fn resolve_document_overlaps(doc: &mut Document) -> (usize, usize, usize) {
    let flags = {
        let spans: Vec<&Span> = doc
            .mentions
            .iter()
            .map(|m| &m.span)
            .chain(doc.matches.iter().map(|m| &m.span))
            .collect();
        classify_overlaps(&spans)
    };

    let (mut duplicates, mut submatches, mut overlaps) = (0, 0, 0);
    for f in &flags {
        duplicates += f.is_duplicate as usize;
        submatches += f.is_submatch as usize;
        overlaps += f.is_overlap as usize;
    }

    let n = doc.mentions.len();
    for (mention, f) in doc.mentions.iter_mut().zip(&flags[..n]) {
        mention.flags = *f;
        if f.is_superseded() {
            mention.filter_out(OVERLAP_SUPERSEDED);
        }
    }
    for (m, f) in doc.matches.iter_mut().zip(&flags[n..]) {
        m.flags = *f;
    }

    (duplicates, submatches, overlaps)
}

/// O pipeline principal: configuração e recursos compartilhados entre workers.
///
/// # Modos de Uso
/// - **Sync**: [`GeotagPipeline::process`] para um documento.
/// - **Streaming**: [`GeotagPipeline::process_streaming`] envia eventos de progresso.
/// - **Lote**: [`GeotagPipeline::process_batch`] processa documentos em paralelo.
pub struct GeotagPipeline {
    config: GeotagConfig,
    person_lists: Arc<PersonNameLists>,
    province_names: Arc<ProvinceNames>,
    nonsense: NonsenseFilter,
}

impl GeotagPipeline {
    /// Pipeline com os recursos embutidos e parâmetros padrão.
    pub fn new() -> ConfigResult<Self> {
        Self::from_config(GeotagConfig::default())
    }

    /// Carrega todos os recursos da configuração. Falha antes de qualquer documento.
    pub fn from_config(config: GeotagConfig) -> ConfigResult<Self> {
        let person_lists = Arc::new(config.person_lists()?);
        let province_names = Arc::new(config.province_table()?);
        let nonsense = NonsenseFilter::new(config.nonsense_max_len)?;
        tracing::info!(
            person_names = person_lists.names.len(),
            person_titles = person_lists.titles.len(),
            provinces = province_names.len(),
            "pipeline de geotagging pronto"
        );
        Ok(Self {
            config,
            person_lists,
            province_names,
            nonsense,
        })
    }

    pub fn config(&self) -> &GeotagConfig {
        &self.config
    }

    /// Cria um resolver novo, com suas próprias regras e contexto.
    pub fn resolver(&self) -> DocumentResolver {
        let rules: Vec<Box<dyn GeocodeRule>> = vec![
            Box::new(self.nonsense.clone()),
            Box::new(CountryRule::new()),
            Box::new(NameCodeRule::new(self.config.name_code_max_distance)),
            Box::new(PersonNameFilter::new(Arc::clone(&self.person_lists))),
            Box::new(MajorPlaceRule::new()),
            Box::new(ProvinceRelevanceRule::new()),
            Box::new(CoordinateRule::new(self.config.coordinate_threshold_meters)),
        ];
        let finishers: Vec<Box<dyn GeocodeRule>> = vec![
            Box::new(LocationChooser::new()),
            Box::new(ProvinceNameSetter::new(Arc::clone(&self.province_names))),
        ];
        DocumentResolver {
            rules,
            finishers,
            ctx: DocumentContext::new(),
            context_window: self.config.context_window,
        }
    }

    /// Processa um documento de forma síncrona.
    pub fn process(&self, doc: &mut Document) -> DocumentSummary {
        let (tx, rx) = mpsc::channel();
        self.process_streaming(doc, tx);

        let mut summary = DocumentSummary::default();
        // Consome todos os eventos até o fim
        while let Ok(event) = rx.recv() {
            if let PipelineEvent::Done { summary: s, .. } = event {
                summary = s;
            }
        }
        summary
    }

    /// Processa um documento enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `OverlapsResolved`
    /// 2. `RuleApplied` (uma vez por regra)
    /// 3. `MentionFiltered` / `PlaceChosen` (uma vez por menção decidida)
    /// 4. `Done`
    pub fn process_streaming(&self, doc: &mut Document, tx: mpsc::Sender<PipelineEvent>) {
        self.resolver().process_with_events(doc, Some(&tx));
    }

    /// Processa vários documentos em paralelo, um resolver por worker.
    pub fn process_batch(&self, docs: &mut [Document]) -> Vec<DocumentSummary> {
        docs.par_iter_mut()
            .map_init(|| self.resolver(), |resolver, doc| resolver.process(doc))
            .collect()
    }
}
