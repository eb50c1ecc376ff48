//! # Confiança da Escolha
//!
//! A confiança (0 a 100) resume quão segura é a escolha de uma menção. É
//! calculada em duas etapas:
//!
//! ## 1. Base (primeira condição verdadeira)
//!
//! | Condição                                   | Base |
//! |--------------------------------------------|------|
//! | evidência de proximidade com coordenada    | 90   |
//! | uma única hipótese                         | 80   |
//! | associação nome + código de província      | 60   |
//! | exatamente um país em escopo no documento  | 50   |
//! | nenhuma evidência (só um lado em maiúsculas) | 10 (13) |
//! | vários países em escopo                    | 40   |
//! | caso geral                                 | 20   |
//!
//! ## 2. Ajustes (cumulativos)
//!
//! - menção em minúsculas: −15, devolvendo +10 se a escolha é
//!   administrativa ou +5 se é lugar povoado;
//! - escolha empatada com a segunda colocada: +2 se ambas são o mesmo
//!   lugar, −5 caso contrário;
//! - sem empate, escolha mais de 20% acima da segunda: +5;
//! - todas as hipóteses no mesmo país: +8;
//! - regra de lugar importante disparou: +5;
//! - o país da escolha é mencionado em outro ponto do documento: +5.
//!
//! O resultado não é limitado a 0..=100.

use crate::context::DocumentContext;
use crate::mention::NameMention;
use crate::rules::{ADMIN_CODE, ADMIN_NAME, COORDINATE_PROXIMITY, MAJOR_PLACE_ADMIN, MAJOR_PLACE_CAPITAL};
use crate::span::TextCase;

pub const GEODETIC: i32 = 90;
pub const ONE_LOCATION: i32 = 80;
pub const NAME_WITH_REGION: i32 = 60;
pub const ONE_COUNTRY_IN_SCOPE: i32 = 50;
pub const MANY_COUNTRIES_IN_SCOPE: i32 = 40;
pub const MINIMUM: i32 = 20;
pub const BARE_ACRONYM: i32 = 10;
pub const BARE_ACRONYM_CASE_MISMATCH: i32 = 13;

pub const LOWERCASE_PENALTY: i32 = -15;
pub const LOWERCASE_ADMIN_CREDIT: i32 = 10;
pub const LOWERCASE_POPULATED_CREDIT: i32 = 5;
pub const AMBIGUOUS_SAME_PLACE: i32 = 2;
pub const AMBIGUOUS_DIFFERENT_PLACE: i32 = -5;
pub const CLEAR_WINNER: i32 = 5;
pub const UNIQUE_COUNTRY: i32 = 8;
pub const MAJOR_PLACE: i32 = 5;
pub const COUNTRY_MENTIONED: i32 = 5;

/// Razão mínima entre a pontuação da escolha e da segunda colocada para o bônus.
pub const CLEAR_WINNER_RATIO: f64 = 1.2;

/// Confiança base, antes dos ajustes.
pub fn base_confidence(mention: &NameMention, ctx: &DocumentContext) -> i32 {
    if mention.has_rule(COORDINATE_PROXIMITY) {
        return GEODETIC;
    }
    if mention.hypotheses.len() == 1 {
        return ONE_LOCATION;
    }
    if mention.has_any_rule(&[ADMIN_NAME, ADMIN_CODE]) {
        return NAME_WITH_REGION;
    }
    let countries = ctx.country_count();
    if countries == 1 {
        return ONE_COUNTRY_IN_SCOPE;
    }
    if mention.evidence.is_empty() {
        // Sigla casada com nome comum, ou texto comum casado com sigla
        let mismatch = mention
            .chosen_place()
            .map(|p| mention.span.is_upper() != (p.name_case() == TextCase::Upper))
            .unwrap_or(false);
        return if mismatch { BARE_ACRONYM_CASE_MISMATCH } else { BARE_ACRONYM };
    }
    if countries > 1 {
        return MANY_COUNTRIES_IN_SCOPE;
    }
    MINIMUM
}

/// Confiança final da escolha de uma menção. Sem escolha, 0.
pub fn assess_confidence(mention: &NameMention, ctx: &DocumentContext) -> i32 {
    let Some(chosen) = mention.chosen_place() else {
        return 0;
    };

    let mut points = base_confidence(mention, ctx);

    if mention.span.is_lower() {
        points += LOWERCASE_PENALTY;
        if chosen.is_administrative {
            points += LOWERCASE_ADMIN_CREDIT;
        } else if chosen.is_populated {
            points += LOWERCASE_POPULATED_CREDIT;
        }
    }

    if mention.is_ambiguous() {
        let same = mention
            .second_place()
            .map(|second| chosen.is_same_place(second))
            .unwrap_or(false);
        points += if same { AMBIGUOUS_SAME_PLACE } else { AMBIGUOUS_DIFFERENT_PLACE };
    } else if mention.second_choice.is_some()
        && mention.second_choice_score > 0.0
        && chosen.score / mention.second_choice_score > CLEAR_WINNER_RATIO
    {
        points += CLEAR_WINNER;
    }

    if mention.distinct_countries() == 1 {
        points += UNIQUE_COUNTRY;
    }

    if mention.has_any_rule(&[MAJOR_PLACE_CAPITAL, MAJOR_PLACE_ADMIN]) {
        points += MAJOR_PLACE;
    }

    if country_mentioned_elsewhere(mention, ctx, &chosen.country_code) {
        points += COUNTRY_MENTIONED;
    }

    points
}

/// O país foi mencionado explicitamente por outra menção do documento.
fn country_mentioned_elsewhere(mention: &NameMention, ctx: &DocumentContext, cc: &str) -> bool {
    match ctx.country_observation(cc) {
        Some(obs) if obs.explicit => !mention.is_country || obs.count > 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::Evidence;
    use crate::place::LocationHypothesis;
    use crate::span::Span;

    fn chosen(text: &str, hyps: Vec<LocationHypothesis>) -> NameMention {
        let mut m = NameMention::new(Span::new(0, text.len(), text), hyps);
        m.choose();
        m
    }

    #[test]
    fn test_hipotese_unica() {
        let m = chosen("Kalamazoo", vec![LocationHypothesis::new("1", "Kalamazoo", "US").populated()]);
        assert_eq!(base_confidence(&m, &DocumentContext::new()), 80);
        // 80 de base, +8 por país único
        assert_eq!(assess_confidence(&m, &DocumentContext::new()), 80 + 8);
    }

    #[test]
    fn test_sem_escolha_sem_confianca() {
        let m = NameMention::new(Span::new(0, 3, "Xyz"), vec![]);
        assert_eq!(assess_confidence(&m, &DocumentContext::new()), 0);
    }

    #[test]
    fn test_acronimo_sem_evidencia() {
        let hyps = vec![
            LocationHypothesis::new("1", "Abc", "US"),
            LocationHypothesis::new("2", "Abc", "FR"),
        ];
        let m = chosen("ABC", hyps.clone());
        assert_eq!(base_confidence(&m, &DocumentContext::new()), 13);

        let m = chosen("Abc", hyps);
        assert_eq!(base_confidence(&m, &DocumentContext::new()), 10);
        // Empate entre lugares diferentes
        assert_eq!(assess_confidence(&m, &DocumentContext::new()), 10 - 5);
    }

    #[test]
    fn test_caixa_so_conta_maiusculas() {
        let paris = vec![
            LocationHypothesis::new("fr", "Paris", "FR"),
            LocationHypothesis::new("tx", "Paris", "US"),
        ];
        // Minúsculas contra nome comum não é sigla trocada
        let m = chosen("paris", paris.clone());
        assert_eq!(base_confidence(&m, &DocumentContext::new()), 10);

        let sigla = vec![
            LocationHypothesis::new("1", "PARIS", "FR"),
            LocationHypothesis::new("2", "PARIS", "US"),
        ];
        let m = chosen("Paris", sigla.clone());
        assert_eq!(base_confidence(&m, &DocumentContext::new()), 13);
        let m = chosen("PARIS", sigla);
        assert_eq!(base_confidence(&m, &DocumentContext::new()), 10);
    }

    #[test]
    fn test_escopo_de_paises() {
        let hyps = vec![
            LocationHypothesis::new("1", "Springfield", "US").with_admin1("17"),
            LocationHypothesis::new("2", "Springfield", "US").with_admin1("25"),
        ];
        let m = chosen("Springfield", hyps);
        let mut ctx = DocumentContext::new();
        ctx.country_in_scope("US");
        assert_eq!(base_confidence(&m, &ctx), 50);

        ctx.country_in_scope("CA");
        let mut m = m;
        m.evidence.push(Evidence::new("x", 1.0).in_country("US"));
        assert_eq!(base_confidence(&m, &ctx), 40);
    }

    #[test]
    fn test_nome_com_codigo_e_coordenada() {
        let hyps = vec![
            LocationHypothesis::new("ma", "Boston", "US").with_admin1("25"),
            LocationHypothesis::new("uk", "Boston", "GB").with_admin1("ENG"),
        ];
        let mut m = chosen("Boston", hyps);
        m.add_rule(ADMIN_CODE);
        assert_eq!(base_confidence(&m, &DocumentContext::new()), 60);
        m.add_rule(COORDINATE_PROXIMITY);
        assert_eq!(base_confidence(&m, &DocumentContext::new()), 90);
    }

    #[test]
    fn test_vencedor_claro_e_minusculas() {
        let mut m = NameMention::new(
            Span::new(0, 6, "boston"),
            vec![
                LocationHypothesis::new("ma", "Boston", "US").with_admin1("25").populated(),
                LocationHypothesis::new("uk", "Boston", "GB").with_admin1("ENG").populated(),
            ],
        );
        m.increment_score(0, 5.0);
        m.increment_score(1, 1.0);
        m.choose();
        m.evidence.push(Evidence::new("x", 1.0));

        // base 20, minúsculas -15, povoado +5, vencedor claro +5
        assert_eq!(assess_confidence(&m, &DocumentContext::new()), 20 - 15 + 5 + 5);
    }

    #[test]
    fn test_minusculas_administrativo() {
        let mut m = NameMention::new(
            Span::new(0, 7, "georgia"),
            vec![
                LocationHypothesis::new("us13", "Georgia", "US").with_admin1("13").admin1_boundary(),
                LocationHypothesis::new("ge", "Georgia", "GE").country(),
            ],
        );
        m.increment_score(0, 2.0);
        m.increment_score(1, 1.0);
        m.choose();
        m.evidence.push(Evidence::new("x", 1.0));

        // base 20, minúsculas -15, administrativo +10, vencedor claro +5
        assert_eq!(assess_confidence(&m, &DocumentContext::new()), 20 - 15 + 10 + 5);
    }

    #[test]
    fn test_empate_com_o_mesmo_lugar() {
        let m = chosen(
            "Springfield",
            vec![
                LocationHypothesis::new("a", "Springfield", "US").with_admin1("17"),
                LocationHypothesis::new("b", "Springfield", "US").with_admin1("17"),
            ],
        );
        assert!(m.is_ambiguous());
        // base 10, mesmo lugar +2, país único +8
        assert_eq!(assess_confidence(&m, &DocumentContext::new()), 10 + 2 + 8);
    }

    #[test]
    fn test_lugar_importante() {
        let mut m = NameMention::new(
            Span::new(0, 5, "Paris"),
            vec![
                LocationHypothesis::new("fr", "Paris", "FR").capital(),
                LocationHypothesis::new("tx", "Paris", "US").with_admin1("48").populated(),
            ],
        );
        m.increment_score(0, 2.0);
        m.add_evidence(Evidence::new(MAJOR_PLACE_CAPITAL, 2.0).in_country("FR").evaluated());
        m.choose();

        // base 20, lugar importante +5; segunda colocada com 0 não dá vencedor claro
        assert_eq!(assess_confidence(&m, &DocumentContext::new()), 20 + 5);
    }

    #[test]
    fn test_pais_mencionado_por_ela_mesma_nao_conta() {
        let mut m = chosen("France", vec![LocationHypothesis::new("fr", "France", "FR").country()]);
        m.is_country = true;
        let mut ctx = DocumentContext::new();
        ctx.country_in_scope("FR");
        assert_eq!(assess_confidence(&m, &ctx), 80 + 8);

        ctx.country_in_scope("FR");
        assert_eq!(assess_confidence(&m, &ctx), 80 + 8 + 5);
    }

    #[test]
    fn test_constantes_da_tabela() {
        assert_eq!(
            [GEODETIC, ONE_LOCATION, NAME_WITH_REGION, ONE_COUNTRY_IN_SCOPE, MANY_COUNTRIES_IN_SCOPE, MINIMUM],
            [90, 80, 60, 50, 40, 20]
        );
        assert_eq!((BARE_ACRONYM, BARE_ACRONYM_CASE_MISMATCH), (10, 13));
        assert_eq!(
            [
                LOWERCASE_PENALTY,
                LOWERCASE_ADMIN_CREDIT,
                LOWERCASE_POPULATED_CREDIT,
                AMBIGUOUS_SAME_PLACE,
                AMBIGUOUS_DIFFERENT_PLACE,
                CLEAR_WINNER,
                UNIQUE_COUNTRY,
                MAJOR_PLACE,
                COUNTRY_MENTIONED
            ],
            [-15, 10, 5, 2, -5, 5, 8, 5, 5]
        );
    }
}
