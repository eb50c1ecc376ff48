//! # Regras de Geocodificação
//!
//! Cada regra examina as menções de um documento e acumula pontuação,
//! evidências ou filtros. Regras são independentes entre si: conversam apenas
//! através das menções e do [`DocumentContext`].
//!
//! ## Laço padrão
//!
//! A maioria das regras decide olhando uma hipótese por vez. Para elas basta
//! implementar [`GeocodeRule::evaluate_place`]; o laço padrão
//! ([`evaluate_each`]) cuida de:
//!
//! 1. pular menções filtradas (exceto as validadas) e menções já escolhidas;
//! 2. em nomes muito frequentes, avaliar só lugares povoados ou administrativos;
//! 3. parar de olhar hipóteses assim que a menção for escolhida.
//!
//! Regras que relacionam menções vizinhas (nome + código) ou que agem sobre a
//! menção inteira (filtros) sobrescrevem [`GeocodeRule::evaluate`].

pub mod coordinate;
pub mod country;
pub mod major_place;
pub mod name_code;
pub mod nonsense;
pub mod person_name;
pub mod province;
pub mod province_name;

pub use coordinate::CoordinateRule;
pub use country::CountryRule;
pub use major_place::MajorPlaceRule;
pub use name_code::NameCodeRule;
pub use nonsense::NonsenseFilter;
pub use person_name::PersonNameFilter;
pub use province::ProvinceRelevanceRule;
pub use province_name::ProvinceNameSetter;

use crate::context::DocumentContext;
use crate::mention::NameMention;

// Nomes de regras registrados nas menções e evidências
pub const COUNTRY_NAME: &str = "country_name";
pub const COUNTRY_CODE: &str = "country_code";
pub const COUNTRY_SHORT_CODE: &str = "country_short_code";
pub const MAJOR_PLACE_CAPITAL: &str = "major_place_capital";
pub const MAJOR_PLACE_ADMIN: &str = "major_place_admin";
pub const ADMIN_NAME: &str = "admin_name";
pub const ADMIN_CODE: &str = "admin_code";
pub const PROVINCE_RELEVANCE: &str = "province_relevance";
pub const COORDINATE_PROXIMITY: &str = "coordinate_proximity";
pub const PERSON_NAME: &str = "person_name";
pub const PERSON_TITLE: &str = "person_title";
pub const PERSON_SUFFIX: &str = "person_suffix";
pub const PERSON_COREF: &str = "person_coref";
pub const NONSENSE_PUNCT: &str = "nonsense_punct";
pub const NONSENSE_REPEATED: &str = "nonsense_repeated";
pub const LEXICAL_EXACT: &str = "lexical_exact";
pub const LEXICAL_CASE: &str = "lexical_case";
pub const NAME_TOO_SHORT: &str = "name_too_short";
pub const NAME_SHORT_MIXED_CASE: &str = "name_short_mixed_case";
pub const CITY_NICKNAME: &str = "city_nickname";
pub const ABBREVIATION_UNMATCHED: &str = "abbreviation_unmatched";

/// Acima deste número de hipóteses, uma menção é considerada um nome frequente.
pub const FREQUENT_NAME_THRESHOLD: usize = 100;

const LEXICAL_EXACT_WEIGHT: f64 = 1.5;
const LEXICAL_EXACT_NON_ASCII_WEIGHT: f64 = 2.5;
const LEXICAL_CASE_WEIGHT: f64 = 0.5;

/// Uma regra que avalia as menções de um documento.
///
/// Implementações devem ser baratas de recriar: o processamento paralelo
/// cria um conjunto de regras por worker. Estado por documento é limpo em
/// [`GeocodeRule::reset`].
pub trait GeocodeRule: Send {
    fn name(&self) -> &'static str;

    /// Avalia a hipótese `index` da menção. O padrão não faz nada.
    fn evaluate_place(&mut self, _mention: &mut NameMention, _index: usize, _ctx: &mut DocumentContext) {}

    /// Avalia todas as menções do documento.
    fn evaluate(&mut self, mentions: &mut [NameMention], ctx: &mut DocumentContext) {
        evaluate_each(self, mentions, ctx);
    }

    /// Limpa o estado acumulado no documento anterior.
    fn reset(&mut self) {}
}

/// Laço padrão: chama `evaluate_place` para cada hipótese elegível.
pub fn evaluate_each<R: GeocodeRule + ?Sized>(
    rule: &mut R,
    mentions: &mut [NameMention],
    ctx: &mut DocumentContext,
) {
    for mention in mentions.iter_mut() {
        if (mention.filtered_out && !mention.valid) || mention.chosen.is_some() {
            continue;
        }

        let frequent = mention.hypotheses.len() > FREQUENT_NAME_THRESHOLD;
        for index in 0..mention.hypotheses.len() {
            if frequent {
                let h = &mention.hypotheses[index];
                if !(h.is_populated || h.is_administrative) {
                    continue;
                }
            }
            rule.evaluate_place(mention, index, ctx);
            if mention.chosen.is_some() {
                break;
            }
        }
    }
}

/// Pontua a hipótese `index` quando seu nome é o próprio texto da menção.
///
/// Igualdade exata vale 1.5 (2.5 em texto não ASCII, onde acentos tornam o
/// casamento mais raro); igualdade ignorando caixa vale 0.5.
pub fn same_lexical_name(mention: &mut NameMention, index: usize) {
    let Some(place) = mention.hypotheses.get(index) else {
        return;
    };
    let text = mention.text();
    let (rule, weight) = if place.name == text {
        let weight = if mention.span.is_ascii {
            LEXICAL_EXACT_WEIGHT
        } else {
            LEXICAL_EXACT_NON_ASCII_WEIGHT
        };
        (LEXICAL_EXACT, weight)
    } else if place.name.to_lowercase() == text.to_lowercase() {
        (LEXICAL_CASE, LEXICAL_CASE_WEIGHT)
    } else {
        return;
    };
    mention.increment_score(index, weight);
    mention.add_rule(rule);
}
