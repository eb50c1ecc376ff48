//! # Configuração
//!
//! Parâmetros do pipeline e caminhos dos recursos. A configuração pode vir de
//! um arquivo JSON; campos ausentes usam os valores padrão. Caminhos relativos
//! são resolvidos a partir do diretório do próprio arquivo de configuração.
//!
//! ## Exemplo de arquivo
//!
//! ```json
//! {
//!   "person_names": "filters/person-name-filter.txt",
//!   "province_names": "province-names.tsv",
//!   "name_code_max_distance": 4
//! }
//! ```
//!
//! Sem caminhos configurados, os recursos embutidos no crate são usados.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::wordlist::{load_word_list, PersonNameLists, ProvinceNames};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeotagConfig {
    pub person_names: Option<PathBuf>,
    pub person_titles: Option<PathBuf>,
    pub person_suffixes: Option<PathBuf>,
    pub province_names: Option<PathBuf>,
    /// Distância máxima entre o fim do nome e o início do código ("Boston, MA")
    pub name_code_max_distance: usize,
    /// Menções mais longas que isso não passam pelo filtro de texto sem sentido
    pub nonsense_max_len: usize,
    /// Raio de associação entre coordenada e hipótese
    pub coordinate_threshold_meters: f64,
    /// Bytes de contexto guardados antes e depois de cada menção
    pub context_window: usize,
}

impl Default for GeotagConfig {
    fn default() -> Self {
        Self {
            person_names: None,
            person_titles: None,
            person_suffixes: None,
            province_names: None,
            name_code_max_distance: 4,
            nonsense_max_len: 15,
            coordinate_threshold_meters: 10_000.0,
            context_window: 32,
        }
    }
}

impl GeotagConfig {
    /// Lê a configuração de um arquivo JSON.
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: GeotagConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Torna absolutos os caminhos relativos, a partir de `base`.
    fn resolve_paths(&mut self, base: &Path) {
        for p in [
            &mut self.person_names,
            &mut self.person_titles,
            &mut self.person_suffixes,
            &mut self.province_names,
        ]
        .into_iter()
        .flatten()
        {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }

    /// Listas do filtro de pessoas: cada lista configurada substitui a embutida.
    pub fn person_lists(&self) -> ConfigResult<PersonNameLists> {
        let mut lists = PersonNameLists::builtin();
        if let Some(p) = &self.person_names {
            lists.names = load_word_list(p)?;
        }
        if let Some(p) = &self.person_titles {
            lists.titles = load_word_list(p)?;
        }
        if let Some(p) = &self.person_suffixes {
            lists.suffixes = load_word_list(p)?;
        }
        Ok(lists)
    }

    pub fn province_table(&self) -> ConfigResult<ProvinceNames> {
        match &self.province_names {
            Some(p) => ProvinceNames::load(p),
            None => Ok(ProvinceNames::builtin()),
        }
    }
}
