//! # Resolvedor de Sobreposição
//!
//! Extratores diferentes (nomes de lugares, coordenadas, datas) frequentemente
//! marcam trechos que se cruzam. Antes de qualquer pontuação, cada trecho
//! recebe três marcas:
//!
//! - `is_duplicate`: mesmo span de um trecho anterior (a cópia posterior é a duplicada);
//! - `is_submatch`: contido em outro trecho mais longo;
//! - `is_overlap`: se cruza com algum outro trecho.
//!
//! O resolvedor só decide as marcas; quem consome o resultado decide o que
//! descartar.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Marcas de sobreposição de um trecho extraído.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapFlags {
    pub is_duplicate: bool,
    pub is_submatch: bool,
    pub is_overlap: bool,
}

impl OverlapFlags {
    /// Verdadeiro quando o trecho deve ser descartado pela resolução:
    /// duplicado ou engolido por um trecho maior.
    pub fn is_superseded(&self) -> bool {
        self.is_duplicate || self.is_submatch
    }
}

/// Tipo de um trecho extraído que não é uma menção de lugar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchKind {
    /// Coordenada geográfica já decodificada pelo extrator.
    Coordinate { lat: f64, lon: f64 },
    /// Data ou expressão temporal.
    Date,
    /// Qualquer outro padrão (ex: identificadores, códigos postais).
    Other { label: String },
}

/// Um trecho extraído por outro extrator (coordenadas, datas, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMatch {
    pub span: Span,
    #[serde(flatten)]
    pub kind: MatchKind,
    #[serde(default)]
    pub flags: OverlapFlags,
}

impl TextMatch {
    pub fn new(span: Span, kind: MatchKind) -> Self {
        Self {
            span,
            kind,
            flags: OverlapFlags::default(),
        }
    }
}

/// Qualquer trecho que participa da resolução de sobreposição.
pub trait Extracted {
    fn span(&self) -> &Span;
    fn flags_mut(&mut self) -> &mut OverlapFlags;
}

impl Extracted for TextMatch {
    fn span(&self) -> &Span {
        &self.span
    }

    fn flags_mut(&mut self) -> &mut OverlapFlags {
        &mut self.flags
    }
}

/// Calcula as marcas de sobreposição para uma lista de spans.
///
/// O resultado tem o mesmo tamanho e a mesma ordem da entrada. Comparações
/// são feitas par a par (`i < j`), então a entrada deve estar na ordem em
/// que os trechos foram extraídos: entre dois spans idênticos, o de índice
/// maior é marcado como duplicado.
pub fn classify_overlaps(spans: &[&Span]) -> Vec<OverlapFlags> {
    let mut flags = vec![OverlapFlags::default(); spans.len()];

    for i in 0..spans.len() {
        let m = spans[i];
        for j in (i + 1)..spans.len() {
            let n = spans[j];

            // Disjuntos: nada a marcar
            if m.end < n.start || m.start > n.end {
                continue;
            }

            if m.is_same(n) {
                flags[j].is_duplicate = true;
                flags[i].is_overlap = true;
            } else if m.is_within(n) {
                flags[i].is_submatch = true;
                flags[j].is_overlap = true;
            } else if n.is_within(m) {
                flags[j].is_submatch = true;
                flags[i].is_overlap = true;
            } else {
                flags[i].is_overlap = true;
                flags[j].is_overlap = true;
            }
        }
    }

    flags
}

/// Aplica [`classify_overlaps`] diretamente sobre trechos homogêneos.
///
/// Marcas já existentes são acumuladas (nunca desligadas).
pub fn reduce_matches<T: Extracted>(matches: &mut [T]) {
    let flags = {
        let spans: Vec<&Span> = matches.iter().map(|m| m.span()).collect();
        classify_overlaps(&spans)
    };
    for (m, f) in matches.iter_mut().zip(flags) {
        let current = m.flags_mut();
        current.is_duplicate |= f.is_duplicate;
        current.is_submatch |= f.is_submatch;
        current.is_overlap |= f.is_overlap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(start: usize, end: usize) -> TextMatch {
        TextMatch::new(Span::new(start, end, "x"), MatchKind::Date)
    }

    #[test]
    fn test_submatch_e_sobreposicao() {
        let mut matches = vec![m(14, 21), m(14, 17), m(30, 35)];
        reduce_matches(&mut matches);

        assert!(matches[0].flags.is_overlap);
        assert!(!matches[0].flags.is_submatch);
        assert!(matches[1].flags.is_submatch);
        assert_eq!(matches[2].flags, OverlapFlags::default(), "trecho isolado não recebe marcas");
    }

    #[test]
    fn test_duplicado_e_o_posterior() {
        let mut matches = vec![m(14, 21), m(14, 21)];
        reduce_matches(&mut matches);

        assert!(!matches[0].flags.is_duplicate);
        assert!(matches[0].flags.is_overlap);
        assert!(matches[1].flags.is_duplicate);
        assert!(matches[1].flags.is_superseded());
    }

    #[test]
    fn test_cruzamento_parcial() {
        let mut matches = vec![m(14, 21), m(12, 17)];
        reduce_matches(&mut matches);

        assert!(matches[0].flags.is_overlap && matches[1].flags.is_overlap);
        assert!(!matches[0].flags.is_submatch && !matches[1].flags.is_submatch);
    }

    #[test]
    fn test_contido_posterior() {
        // O trecho maior vem depois na lista
        let spans = [Span::new(18, 21, "x"), Span::new(14, 21, "x")];
        let refs: Vec<&Span> = spans.iter().collect();
        let flags = classify_overlaps(&refs);
        assert!(flags[0].is_submatch);
        assert!(flags[1].is_overlap);
        assert!(!flags[1].is_submatch);
    }
}
