//! # Álgebra de Spans
//!
//! Todo trecho extraído de um documento (menção de lugar, coordenada, data)
//! é um [`Span`]: um intervalo `[start, end]` de offsets no texto original.
//! As relações entre spans (antes, depois, igual, contido, sobreposto,
//! próximo) são a base do resolvedor de sobreposição e das regras de
//! adjacência (ex: "Boston, MA").
//!
//! ## Convenções
//!
//! - Offsets são **offsets de bytes** no texto UTF-8, como em todo o crate.
//! - As relações são avaliadas como `relação(A, B)`, com `A = self` e `B = other`.
//! - Entre dois spans quaisquer, exatamente um de {antes, depois, sobreposto}
//!   é verdadeiro.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Formato de caixa do texto de um span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCase {
    /// Todas as letras maiúsculas ("NYC", "MA").
    Upper,
    /// Todas as letras minúsculas ("boston").
    Lower,
    /// Qualquer outra combinação ("Boston"), ou texto sem letras.
    Mixed,
}

impl TextCase {
    /// Classifica o formato de caixa de um texto.
    ///
    /// Texto sem nenhuma letra é considerado [`TextCase::Mixed`].
    pub fn of(text: &str) -> Self {
        let mut upper = 0usize;
        let mut lower = 0usize;
        for c in text.chars().filter(|c| c.is_alphabetic()) {
            if c.is_uppercase() {
                upper += 1;
            } else if c.is_lowercase() {
                lower += 1;
            }
        }
        match (upper, lower) {
            (u, 0) if u > 0 => TextCase::Upper,
            (0, l) if l > 0 => TextCase::Lower,
            _ => TextCase::Mixed,
        }
    }
}

/// Um trecho de texto delimitado por offsets, com atributos derivados.
///
/// # Exemplo
/// Em "Moro em Boston, MA.", a menção "Boston":
/// `Span { start: 8, end: 14, text: "Boston", case: Mixed, .. }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Offset inicial (inclusivo)
    pub start: usize,
    /// Offset final (exclusivo)
    pub end: usize,
    /// Texto coberto pelo span
    pub text: String,
    /// Formato de caixa de `text`
    pub case: TextCase,
    /// Verdadeiro se `text`, desconsiderando pontuação, é ASCII puro
    pub is_ascii: bool,
    /// Janela de texto imediatamente anterior ao span, se o documento foi fornecido
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_before: Option<String>,
    /// Janela de texto imediatamente posterior ao span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_after: Option<String>,
}

impl Span {
    /// Cria um span e deriva os atributos de caixa e ASCII a partir do texto.
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let case = TextCase::of(&text);
        let is_ascii = text
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .all(|c| c.is_ascii());
        Self {
            start,
            end,
            text,
            case,
            is_ascii,
            context_before: None,
            context_after: None,
        }
    }

    /// Comprimento do span em bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_upper(&self) -> bool {
        self.case == TextCase::Upper
    }

    pub fn is_lower(&self) -> bool {
        self.case == TextCase::Lower
    }

    pub fn is_mixed_case(&self) -> bool {
        self.case == TextCase::Mixed
    }

    /// `A` termina antes de `B` começar: `b1 > a2`.
    pub fn is_before(&self, other: &Span) -> bool {
        other.start > self.end
    }

    /// `A` começa depois de `B` terminar: `a1 > b2`.
    pub fn is_after(&self, other: &Span) -> bool {
        self.start > other.end
    }

    /// Mesmos offsets de início e fim.
    pub fn is_same(&self, other: &Span) -> bool {
        self.start == other.start && self.end == other.end
    }

    /// `A` está contido em `B` (inclusive quando iguais).
    pub fn is_within(&self, other: &Span) -> bool {
        self.start >= other.start && self.end <= other.end
    }

    /// `A` e `B` compartilham ao menos um offset.
    ///
    /// Verdadeiro se iguais, se `A` termina dentro de `B` ou além dele
    /// começando dentro de `B`, ou se `A` começa antes de `B` e termina
    /// dentro dele.
    pub fn is_overlap(&self, other: &Span) -> bool {
        let (a1, a2) = (self.start, self.end);
        let (b1, b2) = (other.start, other.end);
        if self.is_same(other) {
            return true;
        }
        if a2 >= b2 && a1 >= b1 && a1 <= b2 {
            return true;
        }
        a2 <= b2 && a1 <= b1 && a2 >= b1
    }

    /// Proximidade: sobrepostos, ou a distância entre bordas opostas
    /// é no máximo `n`. Para `n < 0` nunca é verdadeiro.
    ///
    /// # Exemplo
    /// `A = (5, 10)` e `B = (25, 40)` estão a 15 bytes: `is_within_chars(B, 15)`
    /// é verdadeiro e `is_within_chars(B, 14)` é falso.
    pub fn is_within_chars(&self, other: &Span, n: i64) -> bool {
        if n < 0 {
            return false;
        }
        if self.is_overlap(other) {
            return true;
        }
        let n = n as u64;
        self.start.abs_diff(other.end) as u64 <= n || other.start.abs_diff(self.end) as u64 <= n
    }
}

/// Ordem de apresentação: por início, e com inícios iguais o span que
/// termina depois vem depois. Spans idênticos são iguais.
///
/// A ordem é lexicográfica em `(start, end)` para continuar total; o texto
/// e o contexto não participam.
impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(start: usize, end: usize) -> Span {
        Span::new(start, end, "x")
    }

    #[test]
    fn test_relacoes_disjuntas() {
        let a = s(14, 21);
        let b = s(3, 7);
        assert!(a.is_after(&b));
        assert!(b.is_before(&a));
        assert!(!a.is_overlap(&b));
        assert!(!a.is_within(&b));
    }

    #[test]
    fn test_sobreposicao_parcial() {
        let a = s(14, 21);
        let b = s(12, 17);
        assert!(a.is_overlap(&b));
        assert!(b.is_overlap(&a));
        assert!(!a.is_before(&b));
        assert!(!a.is_after(&b));
        assert!(!a.is_within(&b));
    }

    #[test]
    fn test_contencao() {
        let a = s(14, 21);
        let b = s(14, 17);
        assert!(b.is_within(&a));
        assert!(!a.is_within(&b));
        assert!(a.is_overlap(&b));

        let c = s(18, 21);
        assert!(c.is_within(&a));
        assert!(c.is_overlap(&a));
    }

    #[test]
    fn test_igualdade() {
        let a = s(14, 21);
        let b = s(14, 21);
        assert!(a.is_same(&b));
        assert!(a.is_within(&b));
        assert!(a.is_overlap(&b));
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_exatamente_uma_relacao() {
        let pares = [((14, 21), (3, 7)), ((14, 21), (12, 17)), ((5, 10), (11, 20)), ((5, 10), (10, 20))];
        for ((a1, a2), (b1, b2)) in pares {
            let a = s(a1, a2);
            let b = s(b1, b2);
            let n = [a.is_before(&b), a.is_after(&b), a.is_overlap(&b)]
                .iter()
                .filter(|v| **v)
                .count();
            assert_eq!(n, 1, "({a1},{a2}) vs ({b1},{b2}) deve ter exatamente uma relação");
        }
    }

    #[test]
    fn test_proximidade_em_caracteres() {
        let a = s(5, 10);
        let b = s(25, 40);
        assert!(a.is_within_chars(&b, 15));
        assert!(!a.is_within_chars(&b, 14));
        assert!(b.is_within_chars(&a, 15));
        assert!(!a.is_within_chars(&b, -1));
        assert!(a.is_within_chars(&s(8, 12), 0), "sobrepostos sempre estão próximos");
    }

    #[test]
    fn test_ordem_de_apresentacao() {
        let mut spans = vec![s(14, 21), s(3, 7), s(14, 17)];
        spans.sort();
        let offsets: Vec<_> = spans.iter().map(|x| (x.start, x.end)).collect();
        assert_eq!(offsets, vec![(3, 7), (14, 17), (14, 21)]);
    }

    #[test]
    fn test_formato_de_caixa() {
        assert_eq!(Span::new(0, 3, "NYC").case, TextCase::Upper);
        assert_eq!(Span::new(0, 6, "boston").case, TextCase::Lower);
        assert_eq!(Span::new(0, 6, "Boston").case, TextCase::Mixed);
        assert_eq!(Span::new(0, 3, "123").case, TextCase::Mixed);
        assert!(Span::new(0, 8, "St. Paul").is_ascii);
        assert!(!Span::new(0, 9, "São Paulo").is_ascii);
    }
}
