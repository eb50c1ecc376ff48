//! # Utilitários de Texto
//!
//! Normalização de nomes e acesso às palavras vizinhas de uma menção.
//! As regras comparam nomes sempre na forma normalizada (minúsculas,
//! palavras separadas por um único espaço, sem pontuação).
//!
//! ## Janelas de contexto
//!
//! Quando o texto do documento está disponível, cada menção recebe uma janela
//! de alguns bytes antes e depois de si ([`attach_context`]). As regras de
//! título ("Sr.", "Mr.") e sufixo ("Jr.") olham apenas para a palavra
//! imediatamente vizinha dentro dessa janela.

use unicode_segmentation::UnicodeSegmentation;

use crate::span::Span;

/// Forma normalizada de um nome: palavras Unicode em minúsculas unidas por espaço.
///
/// # Exemplo
/// `"  St. Paul "` → `"st paul"`
pub fn normalize_name(text: &str) -> String {
    text.unicode_words()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Heurística de forma abreviada: "MA", "U.S.", "Mass.", "NYC".
///
/// Verdadeiro se o texto termina com ponto, tem pontos entre letras,
/// ou é inteiramente maiúsculo com até 5 letras.
pub fn looks_like_abbreviation(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.ends_with('.') && trimmed.len() > 1 {
        return true;
    }
    let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return false;
    }
    if trimmed.contains('.') && !trimmed.contains(' ') {
        return true;
    }
    letters.len() <= 5 && letters.iter().all(|c| c.is_uppercase())
}

/// Última palavra (separada por espaço) antes da menção, em minúsculas e
/// sem pontos finais. `"Disse o Mr. "` → `Some("mr")`.
pub fn preceding_token(span: &Span) -> Option<String> {
    let before = span.context_before.as_deref()?;
    let token = before.split_whitespace().last()?;
    let token = token.trim_end_matches('.');
    if token.is_empty() {
        return None;
    }
    Some(token.to_lowercase())
}

/// Primeira palavra depois da menção, em minúsculas. Vírgulas separadoras e
/// o ponto inicial são descartados: `", Jr. disse"` → `Some("jr.")`.
pub fn following_token(span: &Span) -> Option<String> {
    let after = span.context_after.as_deref()?;
    let after = after.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
    let token = after.split_whitespace().next()?;
    let token = token.strip_prefix('.').unwrap_or(token);
    if token.is_empty() {
        return None;
    }
    Some(token.to_lowercase())
}

/// Preenche `context_before` e `context_after` de um span a partir do texto
/// do documento, com no máximo `window` bytes de cada lado.
///
/// Offsets fora do texto ou fora de fronteiras de caractere deixam o
/// contexto vazio (`None`) em vez de falhar.
pub fn attach_context(text: &str, span: &mut Span, window: usize) {
    if span.start > span.end
        || span.end > text.len()
        || !text.is_char_boundary(span.start)
        || !text.is_char_boundary(span.end)
    {
        span.context_before = None;
        span.context_after = None;
        return;
    }

    let mut from = span.start.saturating_sub(window);
    while !text.is_char_boundary(from) {
        from += 1;
    }
    let mut to = (span.end + window).min(text.len());
    while !text.is_char_boundary(to) {
        to -= 1;
    }

    span.context_before = Some(text[from..span.start].to_string());
    span.context_after = Some(text[span.end..to].to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  St. Paul "), "st paul");
        assert_eq!(normalize_name("JOHN   Doe"), "john doe");
        assert_eq!(normalize_name("São Paulo"), "são paulo");
    }

    #[test]
    fn test_abreviacoes() {
        assert!(looks_like_abbreviation("MA"));
        assert!(looks_like_abbreviation("U.S."));
        assert!(looks_like_abbreviation("Mass."));
        assert!(!looks_like_abbreviation("Boston"));
        assert!(!looks_like_abbreviation("MASSACHUSETTS"));
        assert!(!looks_like_abbreviation("St. Paul"));
    }

    #[test]
    fn test_palavras_vizinhas() {
        let text = "Ontem o Mr. John Doe, Jr. chegou.";
        let start = text.find("John").unwrap();
        let mut span = Span::new(start, start + "John Doe".len(), "John Doe");
        attach_context(text, &mut span, 32);

        assert_eq!(preceding_token(&span).as_deref(), Some("mr"));
        assert_eq!(following_token(&span).as_deref(), Some("jr."));
    }

    #[test]
    fn test_contexto_respeita_fronteiras_utf8() {
        let text = "Visitei São Paulo ontem";
        let start = text.find("Paulo").unwrap();
        let mut span = Span::new(start, start + 5, "Paulo");
        // Janela de 3 bytes cai no meio do "ã"
        attach_context(text, &mut span, 3);
        assert_eq!(span.context_before.as_deref(), Some("o "));
        assert_eq!(span.context_after.as_deref(), Some(" on"));
    }

    #[test]
    fn test_contexto_offsets_invalidos() {
        let mut span = Span::new(10, 50, "fora");
        attach_context("curto", &mut span, 8);
        assert!(span.context_before.is_none());
        assert!(preceding_token(&span).is_none());
    }
}
