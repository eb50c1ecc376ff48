//! Anotação do nome da província.
//!
//! Etapa final, depois da escolha: a hipótese escolhida e a segunda colocada
//! recebem o nome legível da sua província ("US.25" → "Massachusetts").
//! Não altera pontuação nem escolha.

use std::sync::Arc;

use crate::context::DocumentContext;
use crate::mention::NameMention;
use crate::rules::GeocodeRule;
use crate::wordlist::ProvinceNames;

#[derive(Debug)]
pub struct ProvinceNameSetter {
    names: Arc<ProvinceNames>,
}

impl ProvinceNameSetter {
    pub fn new(names: Arc<ProvinceNames>) -> Self {
        Self { names }
    }

    fn annotate(&self, mention: &mut NameMention, index: Option<usize>) {
        let Some(h) = index.and_then(|i| mention.hypotheses.get_mut(i)) else {
            return;
        };
        if h.province_name.is_some() {
            return;
        }
        if let Some(key) = h.hierarchical_key() {
            h.province_name = self.names.get(&key).map(str::to_string);
        }
    }
}

impl GeocodeRule for ProvinceNameSetter {
    fn name(&self) -> &'static str {
        "province_name"
    }

    fn evaluate(&mut self, mentions: &mut [NameMention], _ctx: &mut DocumentContext) {
        for mention in mentions.iter_mut().filter(|m| m.chosen.is_some()) {
            let (chosen, second) = (mention.chosen, mention.second_choice);
            self.annotate(mention, chosen);
            self.annotate(mention, second);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::LocationHypothesis;
    use crate::span::Span;

    #[test]
    fn test_anota_escolha_e_segunda() {
        let mut mention = NameMention::new(
            Span::new(0, 6, "Boston"),
            vec![
                LocationHypothesis::new("ma", "Boston", "US").with_admin1("25"),
                LocationHypothesis::new("ga", "Boston", "US").with_admin1("13"),
                LocationHypothesis::new("il", "Boston", "US").with_admin1("17"),
            ],
        );
        mention.increment_score(0, 2.0);
        mention.increment_score(1, 1.0);
        mention.choose();
        let mut mentions = vec![mention];

        ProvinceNameSetter::new(Arc::new(ProvinceNames::builtin()))
            .evaluate(&mut mentions, &mut DocumentContext::new());

        let h = &mentions[0].hypotheses;
        assert_eq!(h[0].province_name.as_deref(), Some("Massachusetts"));
        assert_eq!(h[1].province_name.as_deref(), Some("Georgia"));
        assert!(h[2].province_name.is_none(), "só escolha e segunda colocada são anotadas");
        assert_eq!(h[0].score, 2.0);
    }
}
